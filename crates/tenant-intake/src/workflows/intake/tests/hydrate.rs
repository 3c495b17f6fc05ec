use super::common::*;
use crate::workflows::intake::hydrate::hydrate;
use crate::workflows::intake::inputs::NumericInput;
use crate::workflows::intake::normalizer::SubmissionNormalizer;
use crate::workflows::intake::payload::{IncomePayload, SourcePayload};
use crate::workflows::intake::period::Period;
use crate::workflows::intake::{IncomeCategory, Verified};

#[test]
fn cents_become_display_amounts() {
    let hydrated = hydrate(&stored_application(), today());
    let applicant = &hydrated.form.applicants[0];
    let source = &applicant.categories.sources(IncomeCategory::Employee)[0];
    let income = &source.incomes[0];

    assert_eq!(income.amount, NumericInput::from(123.45));
    assert_eq!(income.period_per_avg, NumericInput::from(40.0));
    assert_eq!(income.avg_per_year, NumericInput::from(52.0));
    assert_eq!(income.period, Period::Hourly);
}

#[test]
fn source_figures_come_from_first_income() {
    let hydrated = hydrate(&stored_application(), today());
    let source = &hydrated.form.applicants[0]
        .categories
        .sources(IncomeCategory::Employee)[0];

    assert_eq!(source.verified, Some(Verified::Employer));
    assert_eq!(source.starts_at, Some(date(2026, 2, 1)));
    assert_eq!(source.ends_at, Some(date(2026, 9, 30)));
    assert_eq!(source.avg_per_year, Some(NumericInput::from(52.0)));
}

#[test]
fn missing_dates_default_to_year_so_far() {
    let hydrated = hydrate(&stored_application(), today());
    let support = &hydrated.form.applicants[0]
        .categories
        .sources(IncomeCategory::SupportPayments)[0];

    assert_eq!(support.verified, None);
    assert_eq!(support.starts_at, Some(date(2026, 1, 1)));
    assert_eq!(support.ends_at, Some(today()));
}

#[test]
fn source_without_incomes_assumes_weekly_average() {
    let mut stored = stored_application();
    stored.applicants[0].categories.trusts = Some(vec![SourcePayload::default()]);

    let hydrated = hydrate(&stored, today());
    let trust = &hydrated.form.applicants[0]
        .categories
        .sources(IncomeCategory::Trusts)[0];
    assert_eq!(trust.avg_per_year, Some(NumericInput::from(52.0)));
}

#[test]
fn court_award_splits_into_answer_and_collection() {
    let hydrated = hydrate(&stored_application(), today());
    let income = &hydrated.form.applicants[0]
        .categories
        .sources(IncomeCategory::SupportPayments)[0]
        .incomes[0];

    assert_eq!(income.court_award.as_deref(), Some("yes"));
    assert_eq!(income.collection, Some(true));
}

#[test]
fn descriptions_are_gathered_into_notes() {
    let hydrated = hydrate(&stored_application(), today());

    assert_eq!(hydrated.notes, "pay stubs on file\ncollected half");
    assert_eq!(hydrated.active_applicant, Some(0));
}

#[test]
fn applicant_gets_blank_student_page() {
    let hydrated = hydrate(&stored_application(), today());
    let applicant = &hydrated.form.applicants[0];

    let student = applicant.student_status.as_ref().expect("student status");
    assert!(!student.current);
    assert!(student.financial_aid.is_some());
    assert!(applicant.date_of_birth.is_some());
}

#[test]
fn hydrate_then_normalize_restores_cents() {
    let stored = stored_application();
    let hydrated = hydrate(&stored, today());

    let payload = SubmissionNormalizer::new(today())
        .with_notes(Some(hydrated.notes.clone()))
        .normalize(&hydrated.form);
    let income: &IncomePayload =
        &payload.applicants[0].categories.sources(IncomeCategory::Employee)[0].incomes[0];

    assert_eq!(income.amount, 12_345);
    assert_eq!(income.avg_per_year, 5_200);
    assert_eq!(income.verified, Some(Verified::Employer));
    assert_eq!(
        income.descr.as_deref(),
        Some("pay stubs on file\ncollected half")
    );
}
