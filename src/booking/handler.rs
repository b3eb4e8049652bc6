use serde_json::Value;

use super::{
    document::FormDocument,
    error::SubmitError,
    fields::FieldTable,
    logo::{LogoPolicy, NormalizationResult, normalize_logo},
    page::{IMPRESSION_KEY, PROXY_ORDER_KEY, Page},
    payload::BookingPayload,
    transport::Transport,
};
use crate::validation::{is_data_url, is_valid_phone};

/// Everything the handler needs to know about its page and endpoints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitConfig {
    pub form_id: String,
    pub primary_endpoint: String,
    pub secondary_endpoint: Option<String>,
    /// Where the page goes after a successful primary call.
    pub success_page: String,
    pub phone_field: String,
    pub logo_field: String,
    /// Base for relative logo references.
    pub page_url: Option<String>,
    pub logo_policy: LogoPolicy,
}

impl SubmitConfig {
    pub fn new(primary_endpoint: impl Into<String>) -> Self {
        Self {
            form_id: "snugfit-booking-form".to_string(),
            primary_endpoint: primary_endpoint.into(),
            secondary_endpoint: None,
            success_page: "ThankYou.html".to_string(),
            phone_field: "contact_number".to_string(),
            logo_field: "logo_image".to_string(),
            page_url: None,
            logo_policy: LogoPolicy::default(),
        }
    }

    pub fn with_secondary(mut self, endpoint: impl Into<String>) -> Self {
        self.secondary_endpoint = Some(endpoint.into());
        self
    }

    pub fn with_page_url(mut self, url: impl Into<String>) -> Self {
        self.page_url = Some(url.into());
        self
    }

    pub fn with_logo_policy(mut self, policy: LogoPolicy) -> Self {
        self.logo_policy = policy;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionState {
    Idle,
    Validating,
    Blocked,
    Submitting,
    Succeeded,
    Failed,
}

#[derive(Debug)]
pub enum SecondaryOutcome {
    /// No secondary endpoint configured.
    NotConfigured,
    /// The primary response carried no identifier to key the secondary store with.
    Skipped(String),
    Stored { id: Option<String> },
    Failed(SubmitError),
}

#[derive(Debug)]
pub enum SubmissionOutcome {
    /// Stopped before any network call.
    Blocked(SubmitError),
    Failed(SubmitError),
    Succeeded {
        redirect: String,
        secondary: SecondaryOutcome,
    },
}

impl SubmissionOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Succeeded { .. })
    }
}

/// Handles submit events for one booking form.
pub struct FormSubmitHandler<T, P> {
    config: SubmitConfig,
    fields: FieldTable,
    transport: T,
    page: P,
    document: FormDocument,
    state: SubmissionState,
}

impl<T: Transport, P: Page> FormSubmitHandler<T, P> {
    /// Returns `None` when the page has no booking form.
    pub fn attach(
        config: SubmitConfig,
        fields: FieldTable,
        transport: T,
        page: P,
        document: FormDocument,
    ) -> Option<Self> {
        if !document.has_form(&config.form_id) {
            tracing::debug!(form_id = %config.form_id, "booking form not on page, handler not attached");
            return None;
        }
        Some(Self {
            config,
            fields,
            transport,
            page,
            document,
            state: SubmissionState::Idle,
        })
    }

    pub fn state(&self) -> SubmissionState {
        self.state
    }

    pub fn config(&self) -> &SubmitConfig {
        &self.config
    }

    pub fn document(&self) -> &FormDocument {
        &self.document
    }

    pub fn page(&self) -> &P {
        &self.page
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub async fn submit(&mut self) -> SubmissionOutcome {
        self.transition(SubmissionState::Validating);

        let phone = self
            .document
            .by_id(&self.config.phone_field)
            .map(|c| c.value.clone())
            .unwrap_or_default();
        if !is_valid_phone(&phone) {
            let err = SubmitError::InvalidPhone;
            self.page.alert(&err.to_string());
            if self.document.by_id(&self.config.phone_field).is_some() {
                self.page.focus(&self.config.phone_field);
            }
            self.transition(SubmissionState::Blocked);
            self.transition(SubmissionState::Idle);
            return SubmissionOutcome::Blocked(err);
        }

        let unlocked = self.document.enable_all();
        if unlocked > 0 {
            tracing::debug!(unlocked, "disabled controls enabled for extraction");
        }

        let logo_image = match self.embed_logo().await {
            Ok(logo) => logo,
            Err(err) => {
                self.page.alert(&err.to_string());
                self.transition(SubmissionState::Failed);
                self.transition(SubmissionState::Idle);
                return SubmissionOutcome::Failed(err);
            }
        };

        let extracted = self.fields.extract(&self.document);
        let payload = BookingPayload::from_fields(&extracted, logo_image);
        payload.log_fields();

        self.transition(SubmissionState::Submitting);
        self.page.on_submit_start();

        let primary = match self
            .transport
            .post_multipart(&self.config.primary_endpoint, payload.form_fields())
            .await
        {
            Ok(response) => response,
            Err(err) => {
                tracing::error!(error = %err, endpoint = %self.config.primary_endpoint, "primary submission failed");
                self.page.on_submit_end(false);
                let err = SubmitError::PrimaryTransmission(err);
                self.page.alert(&format!("Error submitting form: {err}"));
                self.transition(SubmissionState::Failed);
                self.transition(SubmissionState::Idle);
                return SubmissionOutcome::Failed(err);
            }
        };
        if !primary.is_success() {
            tracing::warn!(status = primary.status, "primary endpoint answered with a non-success status");
        }

        let secondary = match self.config.secondary_endpoint.clone() {
            Some(endpoint) => self.send_secondary(&endpoint, &primary.body, &payload).await,
            None => SecondaryOutcome::NotConfigured,
        };

        self.page.on_submit_end(true);
        self.transition(SubmissionState::Succeeded);
        let redirect = self.config.success_page.clone();
        self.page.navigate(&redirect);

        SubmissionOutcome::Succeeded {
            redirect,
            secondary,
        }
    }

    /// Normalizes the logo control in place and returns the value to send.
    async fn embed_logo(&mut self) -> Result<String, SubmitError> {
        let current = match self.document.by_id(&self.config.logo_field) {
            Some(control) => control.value.clone(),
            None => return Ok(String::new()),
        };

        let result = normalize_logo(&self.transport, &current, self.config.page_url.as_deref()).await;
        match &result {
            NormalizationResult::Ok(value) if value != &current => {
                tracing::debug!(bytes = value.len(), "logo embedded as data URL");
            }
            NormalizationResult::Ok(_) => {}
            NormalizationResult::Degraded { reason, .. } => {
                tracing::warn!(%reason, "logo left as a reference");
            }
            NormalizationResult::Failed { reason, .. } => {
                tracing::warn!(%reason, "logo fetch failed");
            }
        }

        if self.config.logo_policy == LogoPolicy::RequireEmbedded
            && !result.value().is_empty()
            && !is_data_url(result.value())
        {
            let reason = result.reason().unwrap_or("not a data URL").to_string();
            return Err(SubmitError::LogoNotEmbedded(reason));
        }

        let value = result.into_value();
        self.document.set_value(&self.config.logo_field, value.clone());
        Ok(value)
    }

    async fn send_secondary(
        &mut self,
        endpoint: &str,
        primary_body: &str,
        payload: &BookingPayload,
    ) -> SecondaryOutcome {
        let identifier = match parse_identifier(primary_body, &["impression", "id"]) {
            Ok(Some(id)) => id,
            Ok(None) => {
                tracing::warn!("primary response has no identifier, secondary call skipped");
                return SecondaryOutcome::Skipped("no identifier in primary response".to_string());
            }
            Err(err) => {
                tracing::warn!(error = %err, "primary response unparseable, secondary call skipped");
                return SecondaryOutcome::Failed(err);
            }
        };
        self.page.set_item(IMPRESSION_KEY, &identifier);

        let body = match serde_json::to_value(payload.secondary(&identifier)) {
            Ok(body) => body,
            Err(err) => return SecondaryOutcome::Failed(err.into()),
        };

        let response = match self.transport.post_json(endpoint, &body).await {
            Ok(response) => response,
            Err(err) => {
                tracing::warn!(error = %err, %endpoint, "secondary submission failed");
                return SecondaryOutcome::Failed(SubmitError::SecondaryTransmission(err));
            }
        };
        if !response.is_success() {
            tracing::warn!(status = response.status, body = %response.body, "secondary endpoint rejected the booking");
            return SecondaryOutcome::Failed(SubmitError::SecondaryStatus {
                status: response.status,
                body: response.body,
            });
        }

        match parse_identifier(&response.body, &["id"]) {
            Ok(id) => {
                if let Some(id) = &id {
                    self.page.set_item(PROXY_ORDER_KEY, id);
                }
                tracing::info!(impression = %identifier, proxy_id = ?id, "secondary store updated");
                SecondaryOutcome::Stored { id }
            }
            Err(err) => {
                tracing::warn!(error = %err, "secondary response unparseable");
                SecondaryOutcome::Failed(err)
            }
        }
    }

    fn transition(&mut self, next: SubmissionState) {
        tracing::trace!(from = ?self.state, to = ?next, "submission state");
        self.state = next;
    }
}

/// Looks for the first of `keys` at the top level, then under `data`.
/// An empty body has no identifier; a non-empty body must be JSON.
fn parse_identifier(body: &str, keys: &[&str]) -> Result<Option<String>, SubmitError> {
    if body.trim().is_empty() {
        return Ok(None);
    }
    let json: Value = serde_json::from_str(body)?;
    let scopes = [Some(&json), json.get("data")];
    let found = scopes.into_iter().flatten().find_map(|scope| {
        keys.iter().find_map(|key| match scope.get(*key) {
            Some(Value::String(s)) if !s.is_empty() => Some(s.clone()),
            Some(Value::Number(n)) => Some(n.to_string()),
            _ => None,
        })
    });
    Ok(found)
}
