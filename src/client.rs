use crate::errors::SubmitError;
use crate::submission::{ContactSubmission, SubmissionOutcome};
use reqwest::Client;

/// Submits contact forms to a running relay. Any non-success status collapses
/// into `SubmitError::Rejected`; the relay reveals nothing more.
#[derive(Debug, Clone)]
pub struct SubmissionClient {
    base_url: String,
    http_client: Client,
}

impl SubmissionClient {
    pub fn new(base_url: String) -> Self {
        Self {
            base_url,
            http_client: Client::new(),
        }
    }

    pub async fn submit(
        &self,
        submission: &ContactSubmission,
    ) -> Result<SubmissionOutcome, SubmitError> {
        let response = self
            .http_client
            .post(format!("{}/submit", self.base_url))
            .json(submission)
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(SubmitError::Rejected);
        }
        Ok(response.json::<SubmissionOutcome>().await?)
    }
}
