use thiserror::Error;

use super::transport::TransportError;
use crate::validation::PHONE_HINT;

#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("{}", PHONE_HINT)]
    InvalidPhone,

    #[error("Logo could not be embedded: {0}")]
    LogoNotEmbedded(String),

    /// Display is the raw transport error, which is what the user is shown.
    #[error("{0}")]
    PrimaryTransmission(#[source] TransportError),

    #[error("secondary endpoint unreachable: {0}")]
    SecondaryTransmission(#[source] TransportError),

    #[error("secondary endpoint returned HTTP {status}")]
    SecondaryStatus { status: u16, body: String },

    #[error("endpoint response is not valid JSON: {0}")]
    ResponseParse(#[from] serde_json::Error),
}
