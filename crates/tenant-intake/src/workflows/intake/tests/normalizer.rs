use super::common::*;
use crate::workflows::intake::domain::{
    AddressForm, CashOnHandForm, IncomeForm, SourceForm, StudentAccountForm, StudentStatusForm,
};
use crate::workflows::intake::inputs::{CalendarInput, ChoiceInput, DatePicker, NumericInput};
use crate::workflows::intake::normalizer::{mark_for_deletion, SubmissionNormalizer};
use crate::workflows::intake::payload::CourtAward;
use crate::workflows::intake::period::Period;
use crate::workflows::intake::{IncomeCategory, Verified};

fn normalizer() -> SubmissionNormalizer {
    SubmissionNormalizer::new(today())
}

#[test]
fn display_amounts_become_cents() {
    let form = form_with(vec![applicant_with(
        IncomeCategory::Employee,
        vec![employee_source(123.45)],
    )]);

    let payload = normalizer().normalize(&form);
    let sources = payload.applicants[0].categories.sources(IncomeCategory::Employee);
    let income = &sources[0].incomes[0];

    assert_eq!(income.amount, 12_345);
    assert_eq!(income.period_per_avg, 4_000);
    assert_eq!(income.avg_per_year, 5_200);
    assert_eq!(income.verified, Some(Verified::Employer));
    assert_eq!(income.starts_at, Some(date(2026, 1, 1)));
    assert_eq!(income.category.as_deref(), Some("regular"));
}

#[test]
fn all_zero_category_is_dropped() {
    let mut applicant = applicant_with(IncomeCategory::Employee, vec![employee_source(18.0)]);
    *applicant.categories.slot_mut(IncomeCategory::Disability) =
        Some(vec![SourceForm::monthly_benefit(), SourceForm::monthly_benefit()]);
    let form = form_with(vec![applicant]);

    let payload = normalizer().normalize(&form);
    let categories = &payload.applicants[0].categories;

    assert!(categories.disability.is_none());
    assert!(categories.employee.is_some());
}

#[test]
fn category_with_one_nonzero_entry_keeps_zero_entries() {
    let mut idle = employee_source(0.0);
    idle.name = "Night Shift".to_string();
    let form = form_with(vec![applicant_with(
        IncomeCategory::Employee,
        vec![employee_source(18.0), idle],
    )]);

    let payload = normalizer().normalize(&form);
    let sources = payload.applicants[0].categories.sources(IncomeCategory::Employee);

    assert_eq!(sources.len(), 2);
    let zero = &sources[1].incomes[0];
    assert_eq!(zero.amount, 0);
    assert_eq!(zero.period_per_avg, 4_000);
    assert_eq!(zero.verified, None);
    assert_eq!(zero.starts_at, None);
}

#[test]
fn source_average_is_rescaled_to_each_income_period() {
    let mut source = employee_source(20.0);
    source.incomes.push(IncomeForm {
        category: "bonus".to_string(),
        amount: NumericInput::from(150.0),
        period: Period::Monthly,
        ..IncomeForm::default()
    });
    let form = form_with(vec![applicant_with(IncomeCategory::Employee, vec![source])]);

    let payload = normalizer().normalize(&form);
    let incomes = &payload.applicants[0].categories.sources(IncomeCategory::Employee)[0].incomes;

    assert_eq!(incomes[0].avg_per_year, 5_200);
    assert_eq!(incomes[1].avg_per_year, 1_200);
}

#[test]
fn malformed_numbers_coerce_to_zero() {
    let mut source = employee_source(0.0);
    source.incomes[0].amount = NumericInput::from("twelve");
    let form = form_with(vec![applicant_with(IncomeCategory::Employee, vec![source])]);

    let payload = normalizer().normalize(&form);
    assert!(payload.applicants[0].categories.employee.is_none());
}

#[test]
fn deletion_sentinel_survives_normalization() {
    let mut applicant = applicant_with(
        IncomeCategory::Employee,
        vec![employee_source(18.0), employee_source(0.0)],
    );
    *applicant.categories.slot_mut(IncomeCategory::Veteran) =
        Some(vec![SourceForm::monthly_benefit()]);

    assert_eq!(mark_for_deletion(&mut applicant), 3);
    let payload = normalizer().normalize(&form_with(vec![applicant]));
    let categories = &payload.applicants[0].categories;

    for category in [IncomeCategory::Employee, IncomeCategory::Veteran] {
        for source in categories.sources(category) {
            for income in &source.incomes {
                assert_eq!(income.amount, -100);
            }
        }
    }
    assert_eq!(categories.sources(IncomeCategory::Employee).len(), 2);
}

#[test]
fn notes_replace_descriptions_in_edit_flow() {
    let mut source = employee_source(18.0);
    source.incomes[0].descr = Some("old".to_string());
    let form = form_with(vec![applicant_with(IncomeCategory::Employee, vec![source])]);

    let payload = normalizer()
        .with_notes(Some("verified by phone".to_string()))
        .normalize(&form);
    let income = &payload.applicants[0].categories.sources(IncomeCategory::Employee)[0].incomes[0];
    assert_eq!(income.descr.as_deref(), Some("verified by phone"));

    let untouched = normalizer().normalize(&form);
    let income = &untouched.applicants[0].categories.sources(IncomeCategory::Employee)[0].incomes[0];
    assert_eq!(income.descr.as_deref(), Some("old"));
}

#[test]
fn support_payment_answers_are_normalized() {
    let mut payment = IncomeForm::support_payment();
    payment.amount = NumericInput::from(250.0);
    payment.court_award = Some("yes".to_string());
    payment.collection = Some(true);
    payment.payer = Some(String::new());
    let source = SourceForm {
        incomes: vec![payment],
        ..SourceForm::default()
    };
    let form = form_with(vec![applicant_with(IncomeCategory::SupportPayments, vec![source])]);

    let payload = normalizer().normalize(&form);
    let income =
        &payload.applicants[0].categories.sources(IncomeCategory::SupportPayments)[0].incomes[0];
    assert_eq!(income.court_award, Some(CourtAward::Partial));
    assert_eq!(income.payer, None);
    assert_eq!(income.amount, 25_000);
}

#[test]
fn cash_wages_need_both_flags() {
    let mut source = employee_source(18.0);
    source.incomes[0].cash_wages = Some(true);
    let form = form_with(vec![applicant_with(IncomeCategory::Employee, vec![source.clone()])]);
    let income = normalizer().normalize(&form).applicants[0]
        .categories
        .sources(IncomeCategory::Employee)[0]
        .incomes[0]
        .clone();
    assert_eq!(income.cash_wages, None);

    source.cash_wages = Some(true);
    let form = form_with(vec![applicant_with(IncomeCategory::Employee, vec![source])]);
    let income = normalizer().normalize(&form).applicants[0]
        .categories
        .sources(IncomeCategory::Employee)[0]
        .incomes[0]
        .clone();
    assert_eq!(income.cash_wages, Some(true));
}

#[test]
fn financial_aid_moves_into_its_own_category() {
    let mut applicant = applicant_with(IncomeCategory::Employee, vec![employee_source(18.0)]);
    applicant.student_status = Some(StudentStatusForm {
        current: true,
        financial_aid: Some(StudentAccountForm::monthly(800.0)),
        cost_of_tuition: Some(StudentAccountForm::monthly(300.0)),
        ..StudentStatusForm::default()
    });

    let payload = normalizer().normalize(&form_with(vec![applicant]));
    let applicant = &payload.applicants[0];

    let aid = &applicant.categories.sources(IncomeCategory::StudentFinancialAid)[0].incomes[0];
    assert_eq!(aid.amount, 80_000);
    assert_eq!(aid.avg_per_year, 1_200);
    let student = applicant.student_status.as_ref().expect("student status");
    assert!(student.current);
    assert_eq!(student.cost_of_tuition.as_ref().map(|t| t.amount), Some(30_000));
}

#[test]
fn zero_financial_aid_adds_no_source() {
    let mut applicant = applicant_with(IncomeCategory::Employee, vec![employee_source(18.0)]);
    applicant.student_status = Some(StudentStatusForm {
        financial_aid: Some(StudentAccountForm::monthly(0.0)),
        cost_of_tuition: Some(StudentAccountForm::monthly(0.0)),
        ..StudentStatusForm::default()
    });

    let payload = normalizer().normalize(&form_with(vec![applicant]));
    let applicant = &payload.applicants[0];
    assert!(applicant.categories.studentfinancialaid.is_none());
    assert_eq!(
        applicant.student_status.as_ref().and_then(|s| s.cost_of_tuition.clone()),
        None
    );
}

#[test]
fn personal_fields_are_cleaned() {
    let mut applicant = applicant_with(IncomeCategory::Employee, vec![employee_source(18.0)]);
    applicant.date_of_birth = Some(CalendarInput::new(1990, 8, 17));
    applicant.race = Some(ChoiceInput::Text("3".to_string()));
    applicant.ethnicity = Some(ChoiceInput::Text(String::new()));
    applicant.disabled = Some(ChoiceInput::Code(0));
    applicant.cash_on_hand = Some(CashOnHandForm::default());
    applicant.past_addresses.push(AddressForm {
        starts_at: DatePicker::closed(date(2024, 10, 16).and_hms_opt(9, 30, 0).expect("time")),
        ends_at: DatePicker::closed(now()),
        street_address: "12 Elm St".to_string(),
        locality: "Oakland".to_string(),
        region: "CA".to_string(),
        postal_code: "94607".to_string(),
        country: "US".to_string(),
        monthly_rent: NumericInput::from(1_250.4),
    });

    let payload = normalizer().normalize(&form_with(vec![applicant]));
    let applicant = &payload.applicants[0];

    assert_eq!(
        applicant.date_of_birth,
        date(1990, 9, 17).and_hms_opt(0, 0, 0)
    );
    assert_eq!(applicant.race, Some(3));
    assert_eq!(applicant.ethnicity, None);
    assert_eq!(applicant.disabled, Some(0));
    assert!(applicant.cash_on_hand.is_none());
    assert_eq!(applicant.past_addresses[0].monthly_rent, 1_250);

    let mut blank = applicant_with(IncomeCategory::Employee, Vec::new());
    blank.date_of_birth = Some(CalendarInput::blank());
    let payload = normalizer().normalize(&form_with(vec![blank]));
    assert_eq!(payload.applicants[0].date_of_birth, None);
}

#[test]
fn normalizing_leaves_form_untouched() {
    let form = form_with(vec![applicant_with(
        IncomeCategory::Employee,
        vec![employee_source(18.0)],
    )]);
    let before = form.clone();

    let first = normalizer().normalize(&form);
    let second = normalizer().normalize(&form);

    assert_eq!(form, before);
    assert_eq!(first, second);
}
