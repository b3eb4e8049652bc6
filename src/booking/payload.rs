use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Characters of each value shown when the outgoing payload is logged.
const LOG_PREVIEW_CHARS: usize = 60;

/// One booking, built fresh for every submission.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BookingPayload {
    pub first_name: String,
    pub surname: String,
    pub club_school: String,
    pub contact_number: String,
    pub contact_email: String,
    pub payment_option: String,
    pub costing: String,
    pub colour: String,
    pub additional_notes: String,
    pub logo_image: String,
    pub logo_select: Option<String>,
}

impl BookingPayload {
    /// Fields read from the form through the field table. `logo_image`
    /// comes from the logo control after normalization instead.
    pub const FORM_FIELDS: [&'static str; 10] = [
        "first_name",
        "surname",
        "club_school",
        "contact_number",
        "contact_email",
        "payment_option",
        "costing",
        "colour",
        "additional_notes",
        "logo_select",
    ];

    pub fn from_fields(fields: &BTreeMap<String, String>, logo_image: String) -> Self {
        let get = |name: &str| fields.get(name).cloned().unwrap_or_default();
        Self {
            first_name: get("first_name"),
            surname: get("surname"),
            club_school: get("club_school"),
            contact_number: get("contact_number"),
            contact_email: get("contact_email"),
            payment_option: get("payment_option"),
            costing: get("costing"),
            colour: get("colour"),
            additional_notes: get("additional_notes"),
            logo_image,
            logo_select: Some(get("logo_select")).filter(|v| !v.is_empty()),
        }
    }

    /// Multipart fields in wire order. `logo_select` is only sent when set.
    pub fn form_fields(&self) -> Vec<(&'static str, String)> {
        let mut fields = vec![
            ("first_name", self.first_name.clone()),
            ("surname", self.surname.clone()),
            ("club_school", self.club_school.clone()),
            ("contact_number", self.contact_number.clone()),
            ("contact_email", self.contact_email.clone()),
            ("payment_option", self.payment_option.clone()),
            ("costing", self.costing.clone()),
            ("colour", self.colour.clone()),
            ("additional_notes", self.additional_notes.clone()),
            ("logo_image", self.logo_image.clone()),
        ];
        if let Some(select) = &self.logo_select {
            fields.push(("logo_select", select.clone()));
        }
        fields
    }

    /// Payload for the secondary store, keyed by the primary's identifier.
    pub fn secondary(&self, identifier: &str) -> SecondaryPayload {
        SecondaryPayload {
            id: identifier.to_string(),
            impression: identifier.to_string(),
            first_name: self.first_name.clone(),
            surname: self.surname.clone(),
            club_school: self.club_school.clone(),
            contact_number: self.contact_number.clone(),
            contact_email: self.contact_email.clone(),
            payment_option: self.payment_option.clone(),
            costing: self.costing.clone(),
            colour: self.colour.clone(),
            logo_image: self.logo_image.clone(),
            additional_notes: self.additional_notes.clone(),
        }
    }

    pub fn log_fields(&self) {
        for (name, value) in self.form_fields() {
            tracing::debug!(field = name, value = %preview(&value), "final form field");
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecondaryPayload {
    pub id: String,
    pub impression: String,
    pub first_name: String,
    pub surname: String,
    pub club_school: String,
    pub contact_number: String,
    pub contact_email: String,
    pub payment_option: String,
    pub costing: String,
    pub colour: String,
    pub logo_image: String,
    pub additional_notes: String,
}

fn preview(value: &str) -> String {
    let mut chars = value.chars();
    let mut out: String = chars.by_ref().take(LOG_PREVIEW_CHARS).collect();
    if chars.next().is_some() {
        out.push('…');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> BookingPayload {
        BookingPayload {
            first_name: "Jane".into(),
            surname: "Doe".into(),
            colour: "Red".into(),
            logo_image: "data:image/png;base64,AAAA".into(),
            ..BookingPayload::default()
        }
    }

    #[test]
    fn logo_select_is_omitted_when_blank() {
        let names: Vec<_> = sample().form_fields().into_iter().map(|(k, _)| k).collect();
        assert_eq!(names.len(), 10);
        assert_eq!(names.last(), Some(&"logo_image"));

        let with_select = BookingPayload {
            logo_select: Some("upload".into()),
            ..sample()
        };
        assert_eq!(with_select.form_fields().last().unwrap().0, "logo_select");
    }

    #[test]
    fn from_fields_treats_blank_logo_select_as_absent() {
        let mut fields = BTreeMap::new();
        fields.insert("first_name".to_string(), "Jane".to_string());
        fields.insert("logo_select".to_string(), String::new());
        let payload = BookingPayload::from_fields(&fields, String::new());
        assert_eq!(payload.first_name, "Jane");
        assert_eq!(payload.surname, "");
        assert_eq!(payload.logo_select, None);
    }

    #[test]
    fn secondary_carries_identifier_twice() {
        let body = serde_json::to_value(sample().secondary("IMP1")).unwrap();
        assert_eq!(body["id"], "IMP1");
        assert_eq!(body["impression"], "IMP1");
        assert_eq!(body["colour"], "Red");
        assert_eq!(body.as_object().unwrap().len(), 12);
    }

    #[test]
    fn preview_marks_truncation() {
        assert_eq!(preview("short"), "short");
        let long = "a".repeat(LOG_PREVIEW_CHARS + 1);
        assert!(preview(&long).ends_with('…'));
    }
}
