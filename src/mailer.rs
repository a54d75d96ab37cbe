use crate::configuration::{MailSettings, MailerType};
use crate::errors::AppErrors;
use crate::submission::ContactSubmission;
use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use std::sync::Mutex;
use thiserror::Error;
use tracing::info;

pub const SUBMISSION_SUBJECT: &str = "New Message from Portfolio";

#[derive(Error, Debug)]
pub enum MailError {
    #[error("invalid mailbox: {0}")]
    Address(#[from] lettre::address::AddressError),
    #[error("failed to assemble email: {0}")]
    Assembly(#[from] lettre::error::Error),
    #[error("smtp delivery failed: {0}")]
    Delivery(#[from] lettre::transport::smtp::Error),
    #[error("mail transport rejected the message")]
    Rejected,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingEmail {
    pub from: String,
    pub to: String,
    pub subject: String,
    pub text: String,
}

impl OutgoingEmail {
    pub fn from_submission(submission: &ContactSubmission, recipient: &str) -> Self {
        Self {
            from: submission.email.clone(),
            to: recipient.to_string(),
            subject: SUBMISSION_SUBJECT.to_string(),
            text: format!(
                "Name: {}\nEmail: {}\nMessage: {}",
                submission.name, submission.email, submission.message
            ),
        }
    }
}

#[derive(Debug)]
pub enum Mailer {
    Smtp(SmtpMailer),
    Stub(StubMailer),
}

impl Mailer {
    pub fn try_from(settings: &MailSettings) -> Result<Self, AppErrors> {
        settings.check_if_valid()?;
        match settings.transport {
            MailerType::Smtp => {
                let mailer = SmtpMailer::try_init(
                    &settings.smtp_host_unchecked(),
                    settings.smtp_port_unchecked(),
                    settings.credentials(),
                )
                .map_err(AppErrors::MailError)?;
                Ok(Self::Smtp(mailer))
            }
            MailerType::Stub => Ok(Self::Stub(StubMailer::default())),
        }
    }

    pub async fn send(&self, email: OutgoingEmail) -> Result<(), MailError> {
        match self {
            Mailer::Smtp(mailer) => mailer.send(email).await,
            Mailer::Stub(mailer) => mailer.send(email),
        }
    }
}

/// One transport for the whole process, built at startup and shared across
/// requests through `AppState`.
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
}

impl std::fmt::Debug for SmtpMailer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SmtpMailer").finish_non_exhaustive()
    }
}

impl SmtpMailer {
    pub fn try_init(
        host: &str,
        port: u16,
        credentials: Option<(String, String)>,
    ) -> Result<Self, MailError> {
        let transport = match credentials {
            Some((username, password)) => {
                info!(
                    smtp_host = %host,
                    smtp_port = port,
                    "smtp transport initialised with authentication"
                );
                AsyncSmtpTransport::<Tokio1Executor>::relay(host)?
                    .port(port)
                    .credentials(Credentials::new(username, password))
                    .build()
            }
            None => {
                // Unauthenticated connection, e.g. a local MailDev instance.
                info!(
                    smtp_host = %host,
                    smtp_port = port,
                    "smtp credentials not configured, using unauthenticated connection"
                );
                AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(host)
                    .port(port)
                    .build()
            }
        };
        Ok(Self { transport })
    }

    pub async fn send(&self, email: OutgoingEmail) -> Result<(), MailError> {
        let message = Message::builder()
            .from(email.from.parse()?)
            .to(email.to.parse()?)
            .subject(email.subject)
            .header(ContentType::TEXT_PLAIN)
            .body(email.text)?;
        self.transport.send(message).await?;
        Ok(())
    }
}

/// Records outgoing emails instead of delivering them. Doubles as the local
/// development transport and, with `fail_sending`, as a provider outage.
#[derive(Debug, Default)]
pub struct StubMailer {
    fail_sending: bool,
    sent: Mutex<Vec<OutgoingEmail>>,
}

impl StubMailer {
    pub fn failing() -> Self {
        Self {
            fail_sending: true,
            ..Default::default()
        }
    }

    pub fn send(&self, email: OutgoingEmail) -> Result<(), MailError> {
        if self.fail_sending {
            return Err(MailError::Rejected);
        }
        self.sent
            .lock()
            .expect("stub mailer lock poisoned")
            .push(email);
        Ok(())
    }

    pub fn sent(&self) -> Vec<OutgoingEmail> {
        self.sent
            .lock()
            .expect("stub mailer lock poisoned")
            .clone()
    }
}
