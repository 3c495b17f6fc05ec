use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Router,
};
use chrono::{Local, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::info;

use super::calendar;
use super::domain::ApplicationForm;
use super::eligibility::EligibilityCalculator;
use super::hydrate::hydrate;
use super::normalizer::SubmissionNormalizer;
use super::payload::ApplicationPayload;
use super::settings::{FormSettings, PrefillFields};
use super::wizard::{FormController, StateChange, WizardAction, WizardError};

/// Router exposing the headless form controller over HTTP.
pub fn intake_router(settings: Arc<FormSettings>) -> Router {
    Router::new()
        .route("/api/v1/intake/eligibility", post(eligibility_handler))
        .route("/api/v1/intake/normalize", post(normalize_handler))
        .route("/api/v1/intake/hydrate", post(hydrate_handler))
        .route("/api/v1/intake/actions", post(action_handler))
        .with_state(settings)
}

#[derive(Debug, Deserialize)]
pub(crate) struct EligibilityRequest {
    /// Overrides the unit figures from the loaded settings.
    #[serde(default)]
    pub(crate) fields: Option<PrefillFields>,
    /// Household income in cents.
    #[serde(default)]
    pub(crate) total_income: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct NormalizeRequest {
    pub(crate) form: ApplicationForm,
    #[serde(default)]
    pub(crate) notes: Option<String>,
    #[serde(default, with = "calendar::optional_date")]
    pub(crate) today: Option<NaiveDate>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct HydrateRequest {
    pub(crate) application: ApplicationPayload,
    #[serde(default, with = "calendar::optional_date")]
    pub(crate) today: Option<NaiveDate>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ActionRequest {
    pub(crate) form: ApplicationForm,
    pub(crate) action: WizardAction,
    /// Applicant the page has selected; defaults to the last one.
    #[serde(default)]
    pub(crate) active_applicant: Option<usize>,
    #[serde(default, with = "calendar::optional_datetime")]
    pub(crate) now: Option<NaiveDateTime>,
}

#[derive(Debug, Serialize)]
pub(crate) struct ActionResponse {
    pub(crate) form: ApplicationForm,
    pub(crate) change: StateChange,
    pub(crate) active_applicant: Option<usize>,
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

pub(crate) async fn eligibility_handler(
    State(settings): State<Arc<FormSettings>>,
    axum::Json(request): axum::Json<EligibilityRequest>,
) -> Response {
    let calculator = match &request.fields {
        Some(fields) => EligibilityCalculator::new(fields, settings.limits.clone()),
        None => EligibilityCalculator::from_settings(&settings),
    };
    let summary = calculator.summary(request.total_income);
    (StatusCode::OK, axum::Json(summary)).into_response()
}

pub(crate) async fn normalize_handler(
    axum::Json(request): axum::Json<NormalizeRequest>,
) -> Response {
    let normalizer =
        SubmissionNormalizer::new(request.today.unwrap_or_else(today)).with_notes(request.notes);
    let payload = normalizer.normalize(&request.form);
    info!(applicants = payload.applicants.len(), "normalized application over http");
    (StatusCode::OK, axum::Json(payload)).into_response()
}

pub(crate) async fn hydrate_handler(axum::Json(request): axum::Json<HydrateRequest>) -> Response {
    let hydrated = hydrate(&request.application, request.today.unwrap_or_else(today));
    (StatusCode::OK, axum::Json(hydrated)).into_response()
}

pub(crate) async fn action_handler(
    State(settings): State<Arc<FormSettings>>,
    axum::Json(request): axum::Json<ActionRequest>,
) -> Response {
    let now = request
        .now
        .unwrap_or_else(|| Local::now().naive_local());
    let controller = FormController::from_snapshot(request.form, (*settings).clone(), now);
    let mut controller = match request.active_applicant {
        Some(applicant) => match controller.with_active_applicant(applicant) {
            Ok(controller) => controller,
            Err(error) => return unprocessable(error),
        },
        None => controller,
    };

    match controller.apply(request.action) {
        Ok(change) => {
            let active_applicant = controller.active_applicant();
            let body = ActionResponse {
                form: controller.into_form(),
                change,
                active_applicant,
            };
            (StatusCode::OK, axum::Json(body)).into_response()
        }
        Err(error) => unprocessable(error),
    }
}

fn unprocessable(error: WizardError) -> Response {
    let payload = json!({
        "error": error.to_string(),
    });
    (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response()
}
