use base64::{Engine as _, engine::general_purpose::STANDARD};
use reqwest::Url;

use super::transport::Transport;
use crate::validation::is_data_url;

const FALLBACK_MEDIA_TYPE: &str = "application/octet-stream";

/// What to do when the logo could not be embedded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogoPolicy {
    /// Submit with whatever value the logo control holds.
    #[default]
    BestEffort,
    /// Refuse to submit a logo that is still a remote reference.
    RequireEmbedded,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NormalizationResult {
    /// Embedded (or empty) value ready to transmit.
    Ok(String),
    /// The reference answered but not with usable content; original value kept.
    Degraded { value: String, reason: String },
    /// The reference could not be fetched; original value kept.
    Failed { value: String, reason: String },
}

impl NormalizationResult {
    pub fn value(&self) -> &str {
        match self {
            Self::Ok(value) => value,
            Self::Degraded { value, .. } | Self::Failed { value, .. } => value,
        }
    }

    pub fn into_value(self) -> String {
        match self {
            Self::Ok(value) => value,
            Self::Degraded { value, .. } | Self::Failed { value, .. } => value,
        }
    }

    pub fn reason(&self) -> Option<&str> {
        match self {
            Self::Ok(_) => None,
            Self::Degraded { reason, .. } | Self::Failed { reason, .. } => Some(reason),
        }
    }
}

/// `data:<media type>;base64,<payload>`. Content-type parameters are dropped.
pub fn to_data_url(content_type: Option<&str>, bytes: &[u8]) -> String {
    let media_type = content_type
        .and_then(|ct| ct.split(';').next())
        .map(|ct| ct.trim().to_ascii_lowercase())
        .filter(|ct| !ct.is_empty())
        .unwrap_or_else(|| FALLBACK_MEDIA_TYPE.to_string());
    format!("data:{media_type};base64,{}", STANDARD.encode(bytes))
}

/// Resolves a relative logo reference against the page it was found on.
pub fn resolve_reference(page_url: Option<&str>, reference: &str) -> String {
    if Url::parse(reference).is_ok() {
        return reference.to_string();
    }
    page_url
        .and_then(|base| Url::parse(base).ok())
        .and_then(|base| base.join(reference).ok())
        .map(String::from)
        .unwrap_or_else(|| reference.to_string())
}

/// Turns a logo reference into an inline data URL. Empty and already
/// embedded values pass through untouched.
pub async fn normalize_logo<T: Transport>(
    transport: &T,
    value: &str,
    page_url: Option<&str>,
) -> NormalizationResult {
    if value.is_empty() || is_data_url(value) {
        return NormalizationResult::Ok(value.to_string());
    }

    let url = resolve_reference(page_url, value);
    let resource = match transport.fetch(&url).await {
        Ok(resource) => resource,
        Err(err) => {
            return NormalizationResult::Failed {
                value: value.to_string(),
                reason: err.to_string(),
            };
        }
    };

    if !(200..300).contains(&resource.status) {
        return NormalizationResult::Degraded {
            value: value.to_string(),
            reason: format!("logo fetch returned HTTP {}", resource.status),
        };
    }
    if resource.bytes.is_empty() {
        return NormalizationResult::Degraded {
            value: value.to_string(),
            reason: "logo fetch returned an empty body".to_string(),
        };
    }

    NormalizationResult::Ok(to_data_url(resource.content_type.as_deref(), &resource.bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn data_url_keeps_media_type_essence() {
        assert_eq!(
            to_data_url(Some("image/PNG; charset=binary"), b"hi"),
            "data:image/png;base64,aGk="
        );
        assert_eq!(to_data_url(None, b""), "data:application/octet-stream;base64,");
    }

    #[test]
    fn relative_reference_joins_page_url() {
        assert_eq!(
            resolve_reference(Some("https://snugfit.co.za/booking/form.html"), "img/logo.png"),
            "https://snugfit.co.za/booking/img/logo.png"
        );
        assert_eq!(
            resolve_reference(None, "img/logo.png"),
            "img/logo.png"
        );
        assert_eq!(
            resolve_reference(Some("https://a.io/"), "https://cdn.io/x.png"),
            "https://cdn.io/x.png"
        );
    }
}
