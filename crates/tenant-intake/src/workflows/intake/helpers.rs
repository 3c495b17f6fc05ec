//! Read-only questions the wizard pages ask about the document.

use chrono::{Datelike, Months, NaiveDate};

use super::domain::{IncomeForm, SourceForm, StudentStatusForm};
use super::inputs::CalendarInput;
use super::period::Period;

/// True while the verification is unset or totals a date range.
pub fn has_implicit_period(source: &SourceForm) -> bool {
    source
        .verified
        .map_or(true, |verified| verified.is_implicit_period())
}

/// Whether `income` (or, without one, any income of `source`) is paid by the hour or day.
pub fn has_period_rates(source: &SourceForm, income: Option<&IncomeForm>) -> bool {
    match income {
        Some(income) => income.period.is_rate(),
        None => source.incomes.iter().any(|income| income.period.is_rate()),
    }
}

pub fn has_source_selected(source: &SourceForm) -> bool {
    !source.name.is_empty()
        || source
            .pk
            .as_ref()
            .is_some_and(|pick| !pick.is_blank() && !pick.is_add_source())
}

pub fn has_source_position(source: &SourceForm) -> bool {
    has_source_selected(source) && !source.position.is_empty()
}

pub fn has_verification_selected(source: &SourceForm) -> bool {
    has_source_selected(source) && source.verified.is_some()
}

/// The period select is locked once the verification implies the period.
pub fn period_select_disabled(source: &SourceForm) -> bool {
    source
        .verified
        .is_some_and(|verified| verified.is_implicit_period())
}

/// A named account holding a positive balance.
pub fn valid_financial_account(source: &SourceForm) -> bool {
    let funded = source
        .assets
        .iter()
        .any(|asset| asset.amount.coerce() > 0.0);
    funded && !source.name.is_empty()
}

pub fn is_full_time_student(student: &StudentStatusForm) -> bool {
    student.current || student.past || student.future
}

/// Monthly financial aid left after tuition.
pub fn student_financial_aid(student: Option<&StudentStatusForm>) -> f64 {
    let Some(aid) = student.and_then(|student| student.financial_aid.as_ref()) else {
        return 0.0;
    };
    let tuition = student
        .and_then(|student| student.cost_of_tuition.as_ref())
        .map(|tuition| tuition.amount.coerce())
        .unwrap_or(0.0);
    aid.amount.coerce() - tuition
}

/// "January 2026": first month the student questions cover.
pub fn student_lower_bound(today: NaiveDate) -> String {
    NaiveDate::from_ymd_opt(today.year(), 1, 1)
        .unwrap_or(today)
        .format("%B %Y")
        .to_string()
}

/// Twelve months ahead of `today`.
pub fn student_upper_bound(today: NaiveDate) -> String {
    today
        .checked_add_months(Months::new(12))
        .unwrap_or(today)
        .format("%B %Y")
        .to_string()
}

/// Earliest month the housing history must reach back to.
pub fn housing_history_lower_bound(today: NaiveDate) -> String {
    two_years_before(today).format("%B %Y").to_string()
}

pub(crate) fn two_years_before(date: NaiveDate) -> NaiveDate {
    date.checked_sub_months(Months::new(24)).unwrap_or(date)
}

pub fn first_name(full_name: &str) -> &str {
    full_name.split(' ').next().unwrap_or_default()
}

/// Second word of the full name, if any.
pub fn last_name(full_name: &str) -> Option<&str> {
    full_name.split(' ').nth(1)
}

pub fn birth_date(date_of_birth: &CalendarInput) -> Option<NaiveDate> {
    date_of_birth.to_date()
}

/// Completed years between the birth date and `today`.
pub fn age(date_of_birth: &CalendarInput, today: NaiveDate) -> Option<u32> {
    let born = birth_date(date_of_birth)?;
    today.years_since(born)
}

/// Label shown next to the `avg_per_year` input for this income.
pub fn per_year_label(income: &IncomeForm) -> &'static str {
    income.period.per_year_label()
}

/// Days in `[starts_at, ends_at]` for a date-range verification.
pub fn nb_days(source: &SourceForm) -> Option<i64> {
    match (source.starts_at, source.ends_at) {
        (Some(starts_at), Some(ends_at)) => Some(super::period::inclusive_days(starts_at, ends_at)),
        _ => None,
    }
}

/// `Period::Other` averaged over the year containing `today`.
pub fn days_this_year(today: NaiveDate) -> u32 {
    Period::Other.natural_avg_per_year(today.year())
}
