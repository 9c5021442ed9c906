//! Contact form submission from the command line.

use crate::envelope::envelope;
use anyhow::{bail, Context, Result};
use pressroom_core::config::ContactConfig;
use pressroom_core::{
    submit, ContactError, ContactForm, ContactOutcome, ContactRequest, ContactSender,
};

/// Writes the email service request to stdout instead of delivering it
struct StdoutSender;

impl ContactSender for StdoutSender {
    async fn send(&self, request: &ContactRequest) -> Result<(), ContactError> {
        let payload = serde_json::to_string_pretty(&envelope("contact.request", request))
            .map_err(|e| ContactError::Delivery(e.to_string()))?;
        println!("{}", payload);
        Ok(())
    }
}

/// Validate `form` and emit the request the email service would receive
pub async fn send_contact(settings: Option<&ContactConfig>, form: ContactForm) -> Result<()> {
    let settings = settings
        .context("No contact settings configured; add a `contact` section to pressroom.yml")?;

    match submit(&StdoutSender, settings, form).await {
        ContactOutcome::Sent => Ok(()),
        ContactOutcome::Invalid(e) => bail!("Invalid contact form: {}", e),
        ContactOutcome::RetryLater(reason) => {
            bail!("Contact request not sent, try again later: {}", reason)
        }
    }
}
