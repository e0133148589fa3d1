//! Email delivery of the rendered digest.
//!
//! Sends a multipart/alternative message (plain-text fallback plus the HTML
//! digest) over SMTP upgraded with STARTTLS. Credentials are only offered
//! when both `SMTP_USER` and `SMTP_PASS` are set.

use crate::config::SmtpSettings;
use crate::error::DeliveryError;
use crate::models::Digest;
use lettre::message::{Mailbox, MultiPart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use tracing::{info, instrument};

/// Plain-text part for clients that do not render HTML.
pub const PLAIN_BODY: &str = "Segue o resumo diário em HTML.";

/// `[Resumo Diário] <filename-without-extension>`
pub fn subject(digest: &Digest) -> String {
    format!("[Resumo Diário] {}", digest.stem())
}

/// Build the message for `digest` without sending it.
pub fn build_message(smtp: &SmtpSettings, digest: &Digest) -> Result<Message, DeliveryError> {
    let from: Mailbox = smtp.from.parse()?;
    let to: Mailbox = smtp.to.parse()?;
    let message = Message::builder()
        .from(from)
        .to(to)
        .subject(subject(digest))
        .multipart(MultiPart::alternative_plain_html(
            PLAIN_BODY.to_string(),
            digest.html.clone(),
        ))?;
    Ok(message)
}

/// Deliver `digest` to the configured recipient.
///
/// # Errors
///
/// Fails when no SMTP host is configured, an address does not parse, or
/// the SMTP exchange (connection, STARTTLS, auth, send) fails.
#[instrument(level = "info", skip_all, fields(to = %smtp.to, file = %digest.filename))]
pub async fn send_digest(smtp: &SmtpSettings, digest: &Digest) -> Result<(), DeliveryError> {
    let host = smtp.host.as_deref().ok_or(DeliveryError::MissingHost)?;
    let message = build_message(smtp, digest)?;

    let mut builder = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(host)?.port(smtp.port);
    if let Some((user, pass)) = smtp.credentials() {
        builder = builder.credentials(Credentials::new(user.to_string(), pass.to_string()));
    }
    let transport = builder.build();

    let response = transport.send(message).await?;
    info!(host, port = smtp.port, code = %response.code(), "Digest delivered");
    Ok(())
}
