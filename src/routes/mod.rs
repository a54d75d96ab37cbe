use crate::app_state::AppState;
use crate::errors::AppErrors;
use crate::mailer::OutgoingEmail;
use crate::submission::{ContactSubmission, ExternalText, SubmissionOutcome};
use axum::async_trait;
use axum::extract::{Form, FromRequest, Request, State};
use axum::http::header::CONTENT_TYPE;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Result};
use serde::de::DeserializeOwned;
use validator::Validate;

pub async fn health_check() -> impl IntoResponse {
    StatusCode::OK
}

pub async fn submit(
    State(state): State<AppState>,
    JsonOrForm(submission): JsonOrForm<ContactSubmission>,
) -> Result<Json<SubmissionOutcome>, AppErrors> {
    let submission = submission.cleaned();
    submission.validate()?;
    let email = OutgoingEmail::from_submission(&submission, &state.recipient);
    state.mailer.send(email).await?;
    Ok(Json(SubmissionOutcome { success: true }))
}

/// The form posts either JSON or URL-encoded bodies depending on how it was
/// submitted; both deserialize into the same payload.
pub struct JsonOrForm<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for JsonOrForm<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Send,
{
    type Rejection = AppErrors;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let content_type = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default()
            .to_owned();

        if content_type.starts_with("application/json") {
            let Json(payload) = Json::<T>::from_request(req, state)
                .await
                .map_err(|rejection| AppErrors::MalformedSubmission(rejection.to_string()))?;
            return Ok(Self(payload));
        }
        if content_type.starts_with("application/x-www-form-urlencoded") {
            let Form(payload) = Form::<T>::from_request(req, state)
                .await
                .map_err(|rejection| AppErrors::MalformedSubmission(rejection.to_string()))?;
            return Ok(Self(payload));
        }
        Err(AppErrors::UnsupportedContentType(content_type))
    }
}
