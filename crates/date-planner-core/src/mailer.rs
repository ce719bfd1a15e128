use std::future::Future;
use std::time::Duration;

use lettre::address::AddressError;
use lettre::message::{header::ContentType, Mailbox};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use thiserror::Error;
use tracing::{info, warn};

use crate::summary::{COPY_SUBJECT, SUBJECT};

pub const DEFAULT_SMTP_PORT: u16 = 465;
const SMTP_TIMEOUT: Duration = Duration::from_secs(15);

#[derive(Debug, Error)]
pub enum MailError {
    #[error("Email not sent: {0} is not set")]
    MissingSetting(&'static str),

    #[error("Email not sent: invalid SMTP port '{0}'")]
    InvalidPort(String),

    #[error("Invalid email address: {0}")]
    Address(#[from] AddressError),

    #[error("Could not build message: {0}")]
    Message(#[from] lettre::error::Error),

    #[error("SMTP error: {0}")]
    Smtp(#[from] lettre::transport::smtp::Error),

    #[error("SMTP error: {tls} (STARTTLS fallback: {starttls})")]
    Fallback { tls: String, starttls: String },

    #[error("Send task failed: {0}")]
    Task(String),
}

/// Everything needed to reach the SMTP server, already validated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SmtpSettings {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub sender: String,
    pub recipient: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingMail {
    pub to: String,
    pub subject: String,
    pub body: String,
}

/// Something that can deliver a plain-text message.
pub trait MailTransport {
    fn send(&self, mail: OutgoingMail) -> impl Future<Output = Result<(), MailError>> + Send;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CopyOutcome {
    NotRequested,
    Sent(String),
    Failed { to: String, error: String },
}

/// Result of a submission whose primary message went out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryReport {
    pub recipient: String,
    pub copy: CopyOutcome,
}

/// Send the plan to `recipient`, then a copy to `copy_to` if one was asked for.
///
/// The copy is only attempted after the primary message is delivered, and a
/// failed copy does not turn the submission into a failure.
pub async fn submit_and_notify<T: MailTransport>(
    transport: &T,
    recipient: &str,
    body: &str,
    copy_to: Option<&str>,
) -> Result<DeliveryReport, MailError> {
    transport
        .send(OutgoingMail {
            to: recipient.to_string(),
            subject: SUBJECT.to_string(),
            body: body.to_string(),
        })
        .await?;
    info!(%recipient, "submission delivered");

    let copy = match copy_to {
        None => CopyOutcome::NotRequested,
        Some(to) => {
            let mail = OutgoingMail {
                to: to.to_string(),
                subject: COPY_SUBJECT.to_string(),
                body: body.to_string(),
            };
            match transport.send(mail).await {
                Ok(()) => CopyOutcome::Sent(to.to_string()),
                Err(e) => {
                    warn!(%to, error = %e, "copy not delivered");
                    CopyOutcome::Failed {
                        to: to.to_string(),
                        error: e.to_string(),
                    }
                }
            }
        }
    };

    Ok(DeliveryReport {
        recipient: recipient.to_string(),
        copy,
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TlsMode {
    Implicit,
    StartTls,
}

/// SMTP over lettre's tokio transport.
///
/// Connects with implicit TLS first. With `starttls_fallback` set, a failed
/// attempt is retried once on the same host and port with STARTTLS.
#[derive(Debug, Clone)]
pub struct SmtpMailer {
    settings: SmtpSettings,
    starttls_fallback: bool,
    timeout: Duration,
}

impl SmtpMailer {
    pub fn new(settings: SmtpSettings, starttls_fallback: bool) -> Self {
        Self {
            settings,
            starttls_fallback,
            timeout: SMTP_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn recipient(&self) -> &str {
        &self.settings.recipient
    }

    fn message(&self, mail: &OutgoingMail) -> Result<Message, MailError> {
        let from: Mailbox = self.settings.sender.parse()?;
        let to: Mailbox = mail.to.parse()?;

        let message = Message::builder()
            .from(from)
            .to(to)
            .subject(mail.subject.clone())
            .header(ContentType::TEXT_PLAIN)
            .body(mail.body.clone())?;
        Ok(message)
    }

    fn transport(&self, mode: TlsMode) -> Result<AsyncSmtpTransport<Tokio1Executor>, MailError> {
        let builder = match mode {
            TlsMode::Implicit => AsyncSmtpTransport::<Tokio1Executor>::relay(&self.settings.host)?,
            TlsMode::StartTls => AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&self.settings.host)?,
        };

        let credentials = Credentials::new(
            self.settings.username.clone(),
            self.settings.password.clone(),
        );

        Ok(builder
            .port(self.settings.port)
            .credentials(credentials)
            .timeout(Some(self.timeout))
            .build())
    }

    async fn attempt(&self, mode: TlsMode, message: Message) -> Result<(), MailError> {
        let transport = self.transport(mode)?;
        transport.send(message).await?;
        Ok(())
    }

    async fn deliver(&self, mail: &OutgoingMail) -> Result<(), MailError> {
        let message = self.message(mail)?;
        info!(host = %self.settings.host, port = self.settings.port, to = %mail.to, "sending email");

        match self.attempt(TlsMode::Implicit, message.clone()).await {
            Ok(()) => Ok(()),
            Err(tls_err) if self.starttls_fallback => {
                warn!(error = %tls_err, "implicit TLS failed, retrying with STARTTLS");
                self.attempt(TlsMode::StartTls, message)
                    .await
                    .map_err(|starttls_err| MailError::Fallback {
                        tls: tls_err.to_string(),
                        starttls: starttls_err.to_string(),
                    })
            }
            Err(e) => Err(e),
        }
    }
}

impl MailTransport for SmtpMailer {
    fn send(&self, mail: OutgoingMail) -> impl Future<Output = Result<(), MailError>> + Send {
        let mailer = self.clone();
        async move { mailer.deliver(&mail).await }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    /// Records every message; fails for one chosen address.
    #[derive(Default)]
    struct RecordingTransport {
        sent: Mutex<Vec<OutgoingMail>>,
        reject: Option<String>,
    }

    impl RecordingTransport {
        fn rejecting(address: &str) -> Self {
            Self {
                sent: Mutex::new(Vec::new()),
                reject: Some(address.to_string()),
            }
        }

        fn sent(&self) -> Vec<OutgoingMail> {
            self.sent.lock().unwrap().clone()
        }
    }

    impl MailTransport for RecordingTransport {
        fn send(&self, mail: OutgoingMail) -> impl Future<Output = Result<(), MailError>> + Send {
            let result = if self.reject.as_deref() == Some(mail.to.as_str()) {
                Err(MailError::Task(format!("mailbox {} unavailable", mail.to)))
            } else {
                self.sent.lock().unwrap().push(mail);
                Ok(())
            };
            async move { result }
        }
    }

    fn settings(host: &str, port: u16) -> SmtpSettings {
        SmtpSettings {
            host: host.to_string(),
            port,
            username: "planner@example.com".to_string(),
            password: "secret".to_string(),
            sender: "planner@example.com".to_string(),
            recipient: "me@example.com".to_string(),
        }
    }

    #[tokio::test]
    async fn test_primary_only() {
        let transport = RecordingTransport::default();
        let report = submit_and_notify(&transport, "me@example.com", "body", None)
            .await
            .unwrap();

        assert_eq!(report.copy, CopyOutcome::NotRequested);
        let sent = transport.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].subject, SUBJECT);
        assert_eq!(sent[0].to, "me@example.com");
    }

    #[tokio::test]
    async fn test_copy_after_primary() {
        let transport = RecordingTransport::default();
        let report = submit_and_notify(&transport, "me@example.com", "body", Some("you@example.com"))
            .await
            .unwrap();

        assert_eq!(report.copy, CopyOutcome::Sent("you@example.com".to_string()));
        let sent = transport.sent();
        assert_eq!(sent.len(), 2);
        assert_eq!(sent[1].subject, COPY_SUBJECT);
        assert_eq!(sent[1].body, "body");
    }

    #[tokio::test]
    async fn test_primary_failure_skips_copy() {
        let transport = RecordingTransport::rejecting("me@example.com");
        let result = submit_and_notify(&transport, "me@example.com", "body", Some("you@example.com")).await;

        assert!(result.is_err());
        assert!(transport.sent().is_empty());
    }

    #[tokio::test]
    async fn test_copy_failure_is_not_fatal() {
        let transport = RecordingTransport::rejecting("you@example.com");
        let report = submit_and_notify(&transport, "me@example.com", "body", Some("you@example.com"))
            .await
            .unwrap();

        assert!(matches!(report.copy, CopyOutcome::Failed { ref to, .. } if to == "you@example.com"));
    }

    #[test]
    fn test_message_rejects_bad_address() {
        let mailer = SmtpMailer::new(settings("smtp.example.com", 465), false);
        let mail = OutgoingMail {
            to: "not an address".to_string(),
            subject: SUBJECT.to_string(),
            body: "body".to_string(),
        };
        assert!(matches!(mailer.message(&mail), Err(MailError::Address(_))));
    }

    #[tokio::test]
    async fn test_unreachable_host_fails_with_fallback() {
        // Nothing listens on port 1, so both attempts are refused.
        let mailer = SmtpMailer::new(settings("127.0.0.1", 1), true).with_timeout(Duration::from_secs(2));
        let result = submit_and_notify(&mailer, "me@example.com", "body", None).await;
        assert!(matches!(result, Err(MailError::Fallback { .. })));
    }

    #[tokio::test]
    async fn test_unreachable_host_fails_without_fallback() {
        let mailer = SmtpMailer::new(settings("127.0.0.1", 1), false).with_timeout(Duration::from_secs(2));
        let result = submit_and_notify(&mailer, "me@example.com", "body", None).await;
        assert!(matches!(result, Err(MailError::Smtp(_))));
    }
}
