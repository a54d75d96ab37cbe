use crate::errors::ConfigurationError;
use config::{Config, FileFormat};
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DisplayFromStr};
use std::env::var;
use std::fmt::{Display, Formatter};
use std::path::Path;
use std::str::FromStr;

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Settings {
    pub application: Application,
    pub mail: MailSettings,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Application {
    pub host: String,
    pub port: u16,
    pub static_dir: String,
}

impl Application {
    pub fn check_if_valid(&self) -> Result<(), ConfigurationError> {
        if !Path::new(&self.static_dir).is_dir() {
            return Err(ConfigurationError::StaticDirNotFound);
        }
        Ok(())
    }
}

#[serde_as]
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct MailSettings {
    #[serde_as(as = "DisplayFromStr")]
    pub transport: MailerType,
    pub smtp_host: Option<String>,
    pub smtp_port: Option<u16>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub recipient: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy)]
pub enum MailerType {
    Smtp,
    Stub,
}

impl Display for MailerType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            MailerType::Smtp => write!(f, "smtp"),
            MailerType::Stub => write!(f, "stub"),
        }
    }
}

impl FromStr for MailerType {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "smtp" => Ok(MailerType::Smtp),
            "stub" => Ok(MailerType::Stub),
            &_ => Err(ConfigurationError::UnknownMailerType),
        }
    }
}

impl MailSettings {
    pub fn check_if_valid(&self) -> Result<(), ConfigurationError> {
        match self.transport {
            MailerType::Smtp => {
                if self.smtp_host.is_none() || self.smtp_port.is_none() {
                    return Err(ConfigurationError::MissingSmtpSettings);
                }
                if self.username.is_some() != self.password.is_some() {
                    return Err(ConfigurationError::IncompleteCredentials);
                }
            }
            MailerType::Stub => {}
        }
        Ok(())
    }

    pub fn smtp_host_unchecked(&self) -> String {
        self.smtp_host.to_owned().unwrap()
    }

    pub fn smtp_port_unchecked(&self) -> u16 {
        self.smtp_port.unwrap()
    }

    pub fn credentials(&self) -> Option<(String, String)> {
        match (&self.username, &self.password) {
            (Some(username), Some(password)) => Some((username.clone(), password.clone())),
            _ => None,
        }
    }
}

/// The possible runtime environment for our application.
#[derive(Debug, Eq, PartialEq)]
pub enum Environment {
    Dev,
    Prod,
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Dev => "dev",
            Environment::Prod => "prod",
        }
    }
}

impl TryFrom<String> for Environment {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        match s.to_lowercase().as_str() {
            "dev" => Ok(Self::Dev),
            "prod" => Ok(Self::Prod),
            other => Err(format!(
                "{other} is not a supported environment. Use either `dev` or `prod`."
            )),
        }
    }
}

pub fn get_env() -> Environment {
    let environment: Environment = var("APP_ENVIRONMENT")
        .unwrap_or_else(|_| "dev".into())
        .try_into()
        .expect("Failed to parse APP_ENVIRONMENT.");
    environment
}

/// Layered configuration: base file, environment file, then `APP_`-prefixed
/// environment variables. Credentials are expected to arrive only through the
/// last layer.
pub fn get_configuration() -> Result<Settings, config::ConfigError> {
    let environment = get_env();
    let second_source = format!("configuration/{}", environment.as_str());
    let settings = Config::builder()
        .add_source(config::File::new("configuration/base", FileFormat::Yaml))
        .add_source(config::File::new(&second_source, FileFormat::Yaml))
        .add_source(
            config::Environment::with_prefix("APP")
                .prefix_separator("_")
                .separator("__"),
        )
        .build()?;
    settings.try_deserialize::<Settings>()
}
