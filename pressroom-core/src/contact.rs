//! Contact and demo-request form submission.
//!
//! Delivery belongs to a third-party transactional email service. This
//! module only validates the form, builds the request payload the
//! service expects and hands it to a [`ContactSender`].

use crate::config::ContactConfig;
use serde::{Deserialize, Serialize};
use std::future::Future;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ContactError {
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Invalid email address: {0}")]
    InvalidEmail(String),

    #[error("Delivery failed: {0}")]
    Delivery(String),
}

/// Fields collected by the contact and demo-request forms
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactForm {
    pub name: String,
    pub email: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,

    pub message: String,
}

impl ContactForm {
    pub fn validate(&self) -> Result<(), ContactError> {
        if self.name.trim().is_empty() {
            return Err(ContactError::MissingField("name"));
        }
        if self.email.trim().is_empty() {
            return Err(ContactError::MissingField("email"));
        }
        if !looks_like_email(self.email.trim()) {
            return Err(ContactError::InvalidEmail(self.email.clone()));
        }
        if self.message.trim().is_empty() {
            return Err(ContactError::MissingField("message"));
        }
        Ok(())
    }
}

fn looks_like_email(email: &str) -> bool {
    match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && domain
                    .split_once('.')
                    .is_some_and(|(host, tld)| !host.is_empty() && !tld.is_empty())
        }
        None => false,
    }
}

/// Payload for the email service's template-send call
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContactRequest {
    pub service_id: String,
    pub template_id: String,

    /// The account's public key
    pub user_id: String,

    pub template_params: ContactForm,
}

impl ContactRequest {
    pub fn new(config: &ContactConfig, form: ContactForm) -> Self {
        Self {
            service_id: config.service_id.clone(),
            template_id: config.template_id.clone(),
            user_id: config.public_key.clone(),
            template_params: form,
        }
    }
}

/// Delivers a contact request to the email service
pub trait ContactSender: Send + Sync {
    fn send(
        &self,
        request: &ContactRequest,
    ) -> impl Future<Output = Result<(), ContactError>> + Send;
}

/// What the form should show after a submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContactOutcome {
    /// Show the confirmation message
    Sent,

    /// The form itself needs fixing
    Invalid(ContactError),

    /// Delivery failed; show the retry prompt
    RetryLater(String),
}

impl ContactOutcome {
    pub fn is_sent(&self) -> bool {
        matches!(self, ContactOutcome::Sent)
    }
}

/// Validate `form` and send it through `sender`
pub async fn submit<S: ContactSender>(
    sender: &S,
    config: &ContactConfig,
    form: ContactForm,
) -> ContactOutcome {
    if let Err(e) = form.validate() {
        tracing::debug!("Rejected contact form: {}", e);
        return ContactOutcome::Invalid(e);
    }

    let request = ContactRequest::new(config, form);
    match sender.send(&request).await {
        Ok(()) => {
            tracing::info!("Contact request sent via {}", request.service_id);
            ContactOutcome::Sent
        }
        Err(e) => {
            tracing::warn!("Contact request failed: {}", e);
            ContactOutcome::RetryLater(e.to_string())
        }
    }
}
