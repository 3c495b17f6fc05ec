//! Integration scenarios for the tenant income certification wizard.
//!
//! Scenarios drive the public controller from settings through wizard actions to a
//! submission against a local backend, so the document conversions are checked the
//! way the hosting page uses them.

mod common {
    use std::sync::{Arc, Mutex};

    use axum::extract::State;
    use axum::http::StatusCode;
    use axum::response::{IntoResponse, Response};
    use axum::routing::post;
    use axum::{Json, Router};
    use chrono::{NaiveDate, NaiveDateTime};
    use serde_json::{json, Value};

    use tenant_intake::config::IntakeConfig;
    use tenant_intake::workflows::intake::{FormSettings, IntakeClient};

    pub(super) const SETTINGS: &str = r#"{
        "fields": {
            "nb_bedrooms": 1,
            "federal_income_restriction": 60,
            "monthly_rent": 95000,
            "federal_rent_restriction": 60,
            "bond_rent_restriction": 50,
            "federal_rent_assistance": 10000,
            "non_federal_rent_assistance": 5000
        },
        "limits": {
            "income_100": 5000000,
            "rent_100": [
                {"maximum_federal_lihtc_rent": 100000, "utility_allowance": 5000, "non_optional_charges": 2000},
                {"maximum_federal_lihtc_rent": 120000, "utility_allowance": 7500, "non_optional_charges": 2500}
            ]
        },
        "sources": [
            {"slug": "acme-grocers", "position": "Cashier", "name": "Acme Grocers", "phone": "555-0100"}
        ],
        "urls": {"add_source": "/app/maple-court/sources/new/"},
        "lihtcProperty": "maple-court"
    }"#;

    pub(super) fn settings() -> FormSettings {
        FormSettings::from_reader(SETTINGS.as_bytes()).expect("settings parse")
    }

    pub(super) fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 10, 16)
            .and_then(|date| date.and_hms_opt(9, 30, 0))
            .expect("valid date-time")
    }

    #[derive(Default)]
    pub(super) struct Backend {
        received: Mutex<Option<Value>>,
    }

    impl Backend {
        pub(super) fn received(&self) -> Option<Value> {
            self.received.lock().expect("backend mutex poisoned").clone()
        }
    }

    async fn create(State(backend): State<Arc<Backend>>, Json(body): Json<Value>) -> Response {
        *backend.received.lock().expect("backend mutex poisoned") = Some(body);
        (
            StatusCode::CREATED,
            Json(json!({"location": "/app/maple-court/tenants/jane-doe/"})),
        )
            .into_response()
    }

    pub(super) async fn spawn_backend() -> (IntakeClient, Arc<Backend>) {
        let backend = Arc::new(Backend::default());
        let app = Router::new()
            .route("/app/maple-court/tenants/", post(create))
            .with_state(backend.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind fake backend");
        let addr = listener.local_addr().expect("local addr");
        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("fake backend runs");
        });

        let intake = IntakeConfig {
            form_settings: None,
            backend_url: Some(format!("http://{addr}")),
        };
        let client = IntakeClient::new(intake).expect("http client builds");
        (client, backend)
    }
}

use common::*;
use tenant_intake::workflows::intake::{
    FormController, IncomeCategory, NumericInput, SourceForm, SourcePick, SourceRef, StateChange,
    SubmitMethod, SubmitOutcome, Verified, WizardAction,
};

fn employee(index: usize) -> SourceRef {
    SourceRef {
        applicant: 0,
        category: IncomeCategory::Employee,
        index,
    }
}

/// Head of household working 40 hours a week at 20 dollars an hour.
fn filled_controller() -> FormController {
    let mut controller = FormController::with_clock(settings(), now());
    controller.form_mut().slug = "jane-doe".to_string();
    controller.form_mut().applicants[0].full_name = "Jane Doe".to_string();

    controller
        .apply(WizardAction::AddSource {
            applicant: 0,
            category: IncomeCategory::Employee,
            source: Some(SourceForm {
                pk: Some(SourcePick::Key("0".to_string())),
                ..SourceForm::default()
            }),
        })
        .expect("employer added");
    controller
        .apply(WizardAction::CheckAddSource {
            source: employee(0),
        })
        .expect("directory entry copied");
    controller
        .apply(WizardAction::AddSourceIncomes {
            applicant: 0,
            category: IncomeCategory::Employee,
            categories: vec!["regular".to_string()],
        })
        .expect("hourly row added");
    controller
        .apply(WizardAction::UpdateVerified {
            source: employee(0),
            verified: Some(Verified::Employer),
        })
        .expect("verification recorded");

    let income = &mut controller.form_mut().applicants[0]
        .categories
        .sources_mut(IncomeCategory::Employee)[0]
        .incomes[0];
    income.amount = NumericInput::from("20");
    income.period_per_avg = NumericInput::from(40.0);
    income.avg_per_year = NumericInput::from(52.0);
    controller
}

#[test]
fn settings_drive_the_eligibility_figures() {
    let controller = FormController::with_clock(settings(), now());
    let eligibility = controller.eligibility();

    assert_eq!(eligibility.lihtc_income_limit(), 30_000.0);
    assert!(eligibility.is_eligible(2_080_000));
    assert!(!eligibility.is_eligible(3_000_001));

    let summary = eligibility.summary(Some(2_080_000));
    assert_eq!(summary.utility_allowance, 75.0);
    assert!(summary.income_check.is_some_and(|check| check.is_eligible));
}

#[test]
fn completed_application_is_in_cents_without_empty_benefits() {
    let controller = filled_controller();
    let payload = controller.complete_application();

    let applicant = &payload.applicants[0];
    assert_eq!(payload.lihtc_property.as_deref(), Some("maple-court"));
    assert_eq!(applicant.full_name, "Jane Doe");
    for category in IncomeCategory::BENEFITS {
        assert!(applicant.categories.slot(category).is_none());
    }

    let source = &applicant.categories.sources(IncomeCategory::Employee)[0];
    assert_eq!(source.name, "Acme Grocers");
    let income = &source.incomes[0];
    assert_eq!(income.amount, 2_000);
    assert_eq!(income.period_per_avg, 4_000);
    assert_eq!(income.avg_per_year, 5_200);
    assert_eq!(income.verified, Some(Verified::Employer));
}

#[test]
fn steps_are_addressed_by_name() {
    let mut controller = filled_controller();
    let change = controller
        .apply(WizardAction::GotoStep {
            step: Some("employment".to_string()),
        })
        .expect("step exists");

    assert!(matches!(change, StateChange::Focus { .. }));
    assert_eq!(controller.current_step(), Some("employment"));
}

#[tokio::test]
async fn submission_reaches_the_backend_and_redirects() {
    let (client, backend) = spawn_backend().await;
    let controller = filled_controller();
    let payload = controller.complete_application();

    let outcome = client
        .submit("/app/maple-court/tenants/", SubmitMethod::Create, &payload)
        .await
        .expect("submission accepted");

    assert_eq!(
        outcome,
        SubmitOutcome::Redirect("/app/maple-court/tenants/jane-doe/".to_string())
    );
    let received = backend.received().expect("backend saw the payload");
    assert_eq!(received["slug"], "jane-doe");
    assert_eq!(received["applicants"][0]["employee"][0]["incomes"][0]["amount"], 2_000);
    assert!(received["applicants"][0].get("disability").is_none());
}
