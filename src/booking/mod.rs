//! Booking form submission: validation, field extraction, logo embedding and
//! delivery to the primary and optional secondary endpoints.

pub mod document;
pub mod error;
pub mod fields;
pub mod handler;
pub mod logo;
pub mod page;
pub mod payload;
pub mod transport;

pub use document::{Control, FormDocument, Selector};
pub use error::SubmitError;
pub use fields::{FieldMapping, FieldTable, FieldTableError};
pub use handler::{
    FormSubmitHandler, SecondaryOutcome, SubmissionOutcome, SubmissionState, SubmitConfig,
};
pub use logo::{LogoPolicy, NormalizationResult};
pub use page::{BreadcrumbStore, MemoryBreadcrumbs, Page, PageHost, SubmitHooks};
pub use payload::{BookingPayload, SecondaryPayload};
pub use transport::{FetchedResource, HttpTransport, Transport, TransportError, TransportResponse};
