use crate::configuration::Settings;
use crate::errors::AppErrors;
use crate::mailer::Mailer;
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct AppState {
    pub mailer: Arc<Mailer>,
    pub recipient: String,
}

impl AppState {
    pub fn try_init(settings: &Settings) -> Result<Self, AppErrors> {
        let mailer = Mailer::try_from(&settings.mail)?;
        Ok(Self::with_mailer(mailer, &settings.mail.recipient))
    }

    pub fn with_mailer(mailer: Mailer, recipient: &str) -> Self {
        Self {
            mailer: Arc::new(mailer),
            recipient: recipient.to_string(),
        }
    }
}
