use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use reqwest::header::ACCEPT;
use reqwest::{Method, StatusCode};
use serde::Deserialize;
use serde_json::Value;
use tracing::{info, warn};

use super::domain::DocumentLink;
use super::field_errors::ErrorReport;
use super::listing::{ListPage, ListQuery};
use super::payload::{ApplicationPayload, LocationResponse};
use super::settings::FormUrls;
use crate::config::IntakeConfig;

const SUBMIT_ACCEPT: &str = "text/html, application/json, text/plain, */*";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitMethod {
    /// New application (`POST`).
    Create,
    /// Edit of a stored application (`PUT`).
    Update,
}

impl SubmitMethod {
    fn http(self) -> Method {
        match self {
            SubmitMethod::Create => Method::POST,
            SubmitMethod::Update => Method::PUT,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The backend named the page to continue on.
    Redirect(String),
    /// The backend answered with a page to render as is.
    Markup(String),
    /// Update accepted; continue on the listing above the edited record.
    Updated,
}

#[derive(Debug, thiserror::Error)]
pub enum SubmitError {
    #[error("submission rejected with status {status}: {}", report.banner.message())]
    Rejected { status: u16, report: ErrorReport },
    #[error("unable to reach the backend: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("response arrived after a newer request was issued")]
    Stale,
}

impl SubmitError {
    pub fn report(&self) -> Option<&ErrorReport> {
        match self {
            SubmitError::Rejected { report, .. } => Some(report),
            _ => None,
        }
    }
}

/// Failure of a list, document or resident request.
#[derive(Debug, thiserror::Error)]
pub enum ListError {
    #[error("backend answered {status}: {detail}")]
    Status { status: u16, detail: String },
    #[error("unable to reach the backend: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("{0} is not configured")]
    MissingUrl(&'static str),
    #[error("response arrived after a newer request was issued")]
    Stale,
}

/// Backend client shared by the wizard and the list view.
///
/// Each request kind keeps its own generation counter. A response is discarded
/// as [`SubmitError::Stale`] / [`ListError::Stale`] once a newer request of the
/// same kind starts or [`IntakeClient::invalidate`] is called.
#[derive(Clone)]
pub struct IntakeClient {
    http: reqwest::Client,
    intake: IntakeConfig,
    generations: Arc<[AtomicU64; RequestKind::COUNT]>,
}

#[derive(Debug, Clone, Copy)]
enum RequestKind {
    Submit,
    List,
    Documents,
}

impl RequestKind {
    const COUNT: usize = 3;
}

impl IntakeClient {
    pub fn new(intake: IntakeConfig) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder().build()?;
        Ok(Self::with_client(http, intake))
    }

    pub fn with_client(http: reqwest::Client, intake: IntakeConfig) -> Self {
        Self {
            http,
            intake,
            generations: Arc::new(std::array::from_fn(|_| AtomicU64::new(0))),
        }
    }

    /// Drops every in-flight response, e.g. when the user navigates away.
    pub fn invalidate(&self) {
        for generation in self.generations.iter() {
            generation.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn begin(&self, kind: RequestKind) -> u64 {
        self.generations[kind as usize].fetch_add(1, Ordering::SeqCst) + 1
    }

    fn is_current(&self, kind: RequestKind, token: u64) -> bool {
        self.generations[kind as usize].load(Ordering::SeqCst) == token
    }

    pub fn resolve(&self, endpoint: &str) -> String {
        self.intake.resolve_url(endpoint)
    }

    /// Sends the normalized application once.
    pub async fn submit(
        &self,
        post_url: &str,
        method: SubmitMethod,
        payload: &ApplicationPayload,
    ) -> Result<SubmitOutcome, SubmitError> {
        let token = self.begin(RequestKind::Submit);
        let url = self.resolve(post_url);
        info!(%url, ?method, applicants = payload.applicants.len(), "submitting application");

        let mut request = self.http.request(method.http(), &url).json(payload);
        if method == SubmitMethod::Create {
            request = request.header(ACCEPT, SUBMIT_ACCEPT);
        }
        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !self.is_current(RequestKind::Submit, token) {
            warn!(%url, "discarding stale submission response");
            return Err(SubmitError::Stale);
        }

        if !status.is_success() {
            let report = ErrorReport::from_response(status.as_u16(), &body_value(&body));
            warn!(%url, status = status.as_u16(), "submission rejected");
            return Err(SubmitError::Rejected {
                status: status.as_u16(),
                report,
            });
        }

        Ok(match method {
            SubmitMethod::Update => SubmitOutcome::Updated,
            SubmitMethod::Create => match serde_json::from_str::<LocationResponse>(&body) {
                Ok(redirect) => SubmitOutcome::Redirect(redirect.location),
                Err(_) => SubmitOutcome::Markup(body),
            },
        })
    }

    /// One page of applications; a failed load is retried once with `force=1`.
    pub async fn fetch_list(&self, api_url: &str, query: &ListQuery) -> Result<ListPage, ListError> {
        let token = self.begin(RequestKind::List);
        let url = self.resolve(api_url);
        info!(%url, "refreshing application list");

        let page = match self.get_json::<ListPage>(&url, &query.to_pairs(false)).await {
            Ok(page) => page,
            Err(err) => {
                warn!(%url, error = %err, "list refresh failed, retrying with force");
                self.get_json::<ListPage>(&url, &query.to_pairs(true)).await?
            }
        };

        if !self.is_current(RequestKind::List, token) {
            return Err(ListError::Stale);
        }
        Ok(page)
    }

    /// Saves one application from the list view at `<api_url>/<slug>`.
    pub async fn save(&self, api_url: &str, slug: &str, application: &Value) -> Result<(), ListError> {
        let url = format!("{}/{slug}", self.resolve(api_url));
        let response = self.http.put(&url).json(application).send().await?;
        check_status(response).await.map(|_| ())
    }

    /// Supporting documents, fetching credentials first when the settings ask for it.
    pub async fn load_documents(&self, urls: &FormUrls) -> Result<Vec<DocumentLink>, ListError> {
        let upload_url = urls
            .api_document_upload
            .as_deref()
            .ok_or(ListError::MissingUrl("api_document_upload"))?;
        let token = self.begin(RequestKind::Documents);

        if let Some(credentials) = urls.api_credentials.as_deref() {
            let response = self.http.get(self.resolve(credentials)).send().await?;
            check_status(response).await?;
        }

        let documents: DocumentPage = self.get_json(&self.resolve(upload_url), &[]).await?;
        if !self.is_current(RequestKind::Documents, token) {
            return Err(ListError::Stale);
        }
        Ok(documents.results)
    }

    /// Removes the resident and returns the page to continue on.
    pub async fn remove_resident(&self, urls: &FormUrls) -> Result<String, ListError> {
        let resident_url = urls
            .api_application_resident
            .as_deref()
            .ok_or(ListError::MissingUrl("api_application_resident"))?;
        let detail_url = urls
            .application_detail
            .clone()
            .ok_or(ListError::MissingUrl("application_detail"))?;

        let response = self.http.delete(self.resolve(resident_url)).send().await?;
        check_status(response).await?;
        info!(url = %resident_url, "removed resident from application");
        Ok(detail_url)
    }

    async fn get_json<T>(&self, url: &str, query: &[(&str, String)]) -> Result<T, ListError>
    where
        T: for<'de> Deserialize<'de>,
    {
        let response = self.http.get(url).query(query).send().await?;
        let response = check_status(response).await?;
        Ok(response.json::<T>().await?)
    }
}

#[derive(Debug, Deserialize)]
struct DocumentPage {
    #[serde(default)]
    results: Vec<DocumentLink>,
}

async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, ListError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(ListError::Status {
        status: status.as_u16(),
        detail: detail(status, &body),
    })
}

fn detail(status: StatusCode, body: &str) -> String {
    match body_value(body) {
        Value::Object(map) => map
            .get("detail")
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or_else(|| body.to_string()),
        _ if body.trim().is_empty() => status.canonical_reason().unwrap_or("error").to_string(),
        _ => body.to_string(),
    }
}

fn body_value(body: &str) -> Value {
    serde_json::from_str(body).unwrap_or_else(|_| Value::String(body.to_string()))
}

/// Listing page above an edited record: `/app/tenants/jane/edit` becomes `/app/tenants/`.
pub fn parent_listing_path(path: &str) -> String {
    let segments: Vec<&str> = path.split('/').collect();
    let keep = segments.len().saturating_sub(2);
    format!("{}/", segments[..keep].join("/"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parent_listing_drops_two_segments() {
        assert_eq!(parent_listing_path("/app/tenants/jane/edit"), "/app/tenants/");
        assert_eq!(parent_listing_path("/edit"), "/");
    }
}
