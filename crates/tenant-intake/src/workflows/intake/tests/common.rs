use std::sync::{Arc, Mutex};

use axum::response::Response;
use chrono::{NaiveDate, NaiveDateTime};
use serde_json::Value;

use crate::workflows::intake::domain::{
    ApplicantForm, ApplicationForm, IncomeForm, SourceContact, SourceForm, Verified,
};
use crate::workflows::intake::inputs::NumericInput;
use crate::workflows::intake::payload::{
    ApplicantPayload, ApplicationPayload, CourtAward, IncomePayload, SourcePayload,
};
use crate::workflows::intake::period::Period;
use crate::workflows::intake::settings::{
    DirectoryEntry, FormSettings, FormUrls, Limits, PrefillFields, RentLimit,
};
use crate::workflows::intake::wizard::{FormController, FormObserver, StateChange};
use crate::workflows::intake::IncomeCategory;

pub(super) fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 16).expect("valid date")
}

pub(super) fn now() -> NaiveDateTime {
    today().and_hms_opt(9, 30, 0).expect("valid time")
}

pub(super) fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}

pub(super) fn limits() -> Limits {
    Limits {
        income_100: 5_000_000,
        rent_100: vec![
            RentLimit {
                maximum_federal_lihtc_rent: Some(100_000),
                utility_allowance: Some(5_000),
                non_optional_charges: Some(2_000),
            },
            RentLimit {
                maximum_federal_lihtc_rent: Some(120_000),
                utility_allowance: Some(7_500),
                non_optional_charges: Some(2_500),
            },
        ],
    }
}

pub(super) fn prefill() -> PrefillFields {
    PrefillFields {
        nb_bedrooms: Some(1),
        federal_income_restriction: Some(60.0),
        monthly_rent: Some(95_000),
        federal_rent_restriction: Some(60.0),
        bond_rent_restriction: Some(50.0),
        federal_rent_assistance: Some(10_000),
        non_federal_rent_assistance: Some(5_000),
        effective_date: Some(date(2026, 11, 1)),
        move_in_date: None,
    }
}

pub(super) fn settings() -> FormSettings {
    FormSettings {
        fields: prefill(),
        limits: limits(),
        sources: vec![DirectoryEntry {
            slug: "acme-grocers".to_string(),
            position: "Cashier".to_string(),
            name: "Acme Grocers".to_string(),
            contact: SourceContact {
                phone: "555-0100".to_string(),
                locality: "Oakland".to_string(),
                region: "CA".to_string(),
                ..SourceContact::default()
            },
        }],
        urls: FormUrls {
            add_source: Some("/app/maple-court/sources/new/".to_string()),
            ..FormUrls::default()
        },
        lihtc_property: Some("maple-court".to_string()),
        application: None,
    }
}

pub(super) fn controller() -> FormController {
    FormController::with_clock(settings(), now())
}

/// Hourly job verified by the employer, `amount` dollars per hour.
pub(super) fn employee_source(amount: f64) -> SourceForm {
    SourceForm {
        name: "Acme Grocers".to_string(),
        position: "Cashier".to_string(),
        verified: Some(Verified::Employer),
        starts_at: Some(date(2026, 1, 1)),
        ends_at: Some(date(2026, 10, 16)),
        avg_per_year: Some(NumericInput::from(52.0)),
        incomes: vec![IncomeForm {
            category: "regular".to_string(),
            amount: NumericInput::from(amount),
            period: Period::Hourly,
            avg: Some(Period::Weekly),
            period_per_avg: NumericInput::from(40.0),
            avg_per_year: NumericInput::from(52.0),
            ..IncomeForm::default()
        }],
        ..SourceForm::default()
    }
}

pub(super) fn applicant_with(category: IncomeCategory, sources: Vec<SourceForm>) -> ApplicantForm {
    let mut applicant = ApplicantForm {
        full_name: "Jane Doe".to_string(),
        relation_to_head: "HEAD".to_string(),
        ..ApplicantForm::default()
    };
    *applicant.categories.slot_mut(category) = Some(sources);
    applicant
}

pub(super) fn form_with(applicants: Vec<ApplicantForm>) -> ApplicationForm {
    ApplicationForm {
        slug: "jane-doe".to_string(),
        lihtc_property: Some("maple-court".to_string()),
        applicants,
        ..ApplicationForm::default()
    }
}

/// Stored application with one employer paying 123.45 an hour.
pub(super) fn stored_application() -> ApplicationPayload {
    let mut applicant = ApplicantPayload {
        slug: Some("jane".to_string()),
        full_name: "Jane Doe".to_string(),
        relation_to_head: "HEAD".to_string(),
        ..ApplicantPayload::default()
    };
    applicant.categories.employee = Some(vec![SourcePayload {
        name: "Acme Grocers".to_string(),
        incomes: vec![IncomePayload {
            category: Some("regular".to_string()),
            amount: 12_345,
            period: Period::Hourly,
            avg: Some(Period::Weekly),
            period_per_avg: 4_000,
            avg_per_year: 5_200,
            verified: Some(Verified::Employer),
            starts_at: Some(date(2026, 2, 1)),
            ends_at: Some(date(2026, 9, 30)),
            descr: Some("pay stubs on file".to_string()),
            ..IncomePayload::default()
        }],
        ..SourcePayload::default()
    }]);
    applicant.categories.support_payments = Some(vec![SourcePayload {
        incomes: vec![IncomePayload {
            amount: 25_000,
            period: Period::Monthly,
            avg_per_year: 1_200,
            court_award: Some(CourtAward::Partial),
            descr: Some("collected half".to_string()),
            ..IncomePayload::default()
        }],
        ..SourcePayload::default()
    }]);

    ApplicationPayload {
        slug: "jane-doe".to_string(),
        lihtc_property: Some("maple-court".to_string()),
        applicants: vec![applicant],
        children: Vec::new(),
    }
}

#[derive(Default)]
pub(super) struct RecordingObserver {
    changes: Mutex<Vec<StateChange>>,
}

impl FormObserver for RecordingObserver {
    fn notify(&self, change: &StateChange) {
        self.changes
            .lock()
            .expect("observer mutex poisoned")
            .push(change.clone());
    }
}

impl RecordingObserver {
    pub(super) fn changes(&self) -> Vec<StateChange> {
        self.changes
            .lock()
            .expect("observer mutex poisoned")
            .clone()
    }
}

pub(super) fn observed_controller() -> (FormController, Arc<RecordingObserver>) {
    let mut controller = controller();
    let observer = Arc::new(RecordingObserver::default());
    controller.subscribe(observer.clone());
    (controller, observer)
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 1 << 20)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
