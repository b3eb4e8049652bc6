use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ResponseStatus {
    /// Read succeeded.
    Ok,
    /// Write succeeded.
    Success,
    Error,
}

#[derive(Debug, Serialize, ToSchema, Clone)]
pub struct Meta {
    pub count: Option<usize>,
}

impl Meta {
    pub fn count(count: usize) -> Self {
        Self { count: Some(count) }
    }

    pub fn empty() -> Self {
        Self { count: None }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ApiResponse<T> {
    pub status: ResponseStatus,
    pub message: String,
    pub data: Option<T>,
    pub meta: Option<Meta>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn ok(message: impl Into<String>, data: T, meta: Option<Meta>) -> Self {
        Self {
            status: ResponseStatus::Ok,
            message: message.into(),
            data: Some(data),
            meta,
        }
    }

    pub fn success(message: impl Into<String>, data: T, meta: Option<Meta>) -> Self {
        Self {
            status: ResponseStatus::Success,
            message: message.into(),
            data: Some(data),
            meta,
        }
    }

    pub fn error(message: impl Into<String>, data: T) -> Self {
        Self {
            status: ResponseStatus::Error,
            message: message.into(),
            data: Some(data),
            meta: Some(Meta::empty()),
        }
    }
}
