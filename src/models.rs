use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Longest logo prefix kept on a stored order.
pub const LOGO_PREVIEW_CHARS: usize = 120;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProxyOrder {
    pub id: String,
    pub timestamp: i64,
    pub impression: Option<String>,
    pub first_name: String,
    pub surname: String,
    pub club_school: String,
    pub contact_number: String,
    pub contact_email: String,
    pub payment_option: String,
    pub costing: String,
    pub colour: String,
    pub additional_notes: String,
    pub logo_image_truncated: String,
}

impl ProxyOrder {
    pub const FIELD_NAMES: [&'static str; 13] = [
        "id",
        "timestamp",
        "impression",
        "first_name",
        "surname",
        "club_school",
        "contact_number",
        "contact_email",
        "payment_option",
        "costing",
        "colour",
        "additional_notes",
        "logo_image_truncated",
    ];
}

/// Shortens an inline logo for storage, marking the cut with an ellipsis.
pub fn truncate_logo(logo: &str) -> String {
    let mut chars = logo.chars();
    let mut preview: String = chars.by_ref().take(LOGO_PREVIEW_CHARS).collect();
    if chars.next().is_some() {
        preview.push('…');
    }
    preview
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_logo_is_kept_whole() {
        assert_eq!(truncate_logo("data:image/png;base64,AAAA"), "data:image/png;base64,AAAA");
        assert_eq!(truncate_logo(""), "");
    }

    #[test]
    fn long_logo_is_cut_at_preview_length() {
        let logo = "x".repeat(LOGO_PREVIEW_CHARS + 5);
        let preview = truncate_logo(&logo);
        assert_eq!(preview.chars().count(), LOGO_PREVIEW_CHARS + 1);
        assert!(preview.ends_with('…'));

        let exact = "y".repeat(LOGO_PREVIEW_CHARS);
        assert_eq!(truncate_logo(&exact), exact);
    }
}
