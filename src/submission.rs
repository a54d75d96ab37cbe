use serde::{Deserialize, Serialize};
use validator::Validate;

pub trait ExternalText {
    fn cleaned(&self) -> Self;

    fn clean(&self, value: &str) -> String {
        value.trim().to_string()
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
pub struct ContactSubmission {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1, max = 2000))]
    pub message: String,
}

impl ExternalText for ContactSubmission {
    fn cleaned(&self) -> Self {
        Self {
            name: self.clean(&self.name),
            email: self.clean(&self.email),
            message: self.clean(&self.message),
        }
    }
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, Deserialize, Serialize)]
pub struct SubmissionOutcome {
    pub success: bool,
}
