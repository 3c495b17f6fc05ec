use chrono::{Datelike, NaiveDate};
use tracing::debug;

use super::categories::{Categories, IncomeCategory};
use super::domain::{
    AddressForm, ApplicantForm, ApplicationForm, AssetForm, CashOnHandForm, ChildForm,
    IncomeForm, SourceForm, StudentAccountForm, StudentStatusForm,
};
use super::inputs::{round_half_up, to_cents};
use super::payload::{
    AddressPayload, ApplicantPayload, ApplicationPayload, AssetPayload, ChildPayload, CourtAward,
    IncomePayload, SourcePayload, StudentAccountPayload, StudentStatusPayload,
};
use super::period::Period;
use super::property;

/// Amount written into every entry the user asked to delete.
pub const DELETE_SENTINEL: f64 = -1.0;

/// Converts the bound form document into the payload the backend stores.
///
/// The form is left untouched; each call builds a fresh payload.
#[derive(Debug, Clone, PartialEq)]
pub struct SubmissionNormalizer {
    today: NaiveDate,
    notes: Option<String>,
}

impl SubmissionNormalizer {
    pub fn new(today: NaiveDate) -> Self {
        Self { today, notes: None }
    }

    /// Edit flow: every non-zero entry's description is replaced by `notes`.
    pub fn with_notes(mut self, notes: Option<String>) -> Self {
        self.notes = notes;
        self
    }

    pub fn normalize(&self, form: &ApplicationForm) -> ApplicationPayload {
        let applicants: Vec<ApplicantPayload> = form
            .applicants
            .iter()
            .map(|applicant| self.applicant(applicant))
            .collect();
        debug!(
            applicants = applicants.len(),
            children = form.children.len(),
            "normalized application"
        );
        ApplicationPayload {
            slug: form.slug.clone(),
            lihtc_property: form.lihtc_property.clone(),
            applicants,
            children: form.children.iter().map(child).collect(),
        }
    }

    fn natural(&self, period: Period) -> f64 {
        period.natural_avg_per_year(self.today.year()) as f64
    }

    fn applicant(&self, applicant: &ApplicantForm) -> ApplicantPayload {
        let mut categories = self.categories(&applicant.categories);

        let (student_status, financial_aid) = match &applicant.student_status {
            Some(status) => {
                let (status, aid) = self.student_status(status);
                (Some(status), aid)
            }
            None => (None, None),
        };
        if let Some(aid) = financial_aid {
            categories
                .sources_mut(IncomeCategory::StudentFinancialAid)
                .push(aid);
        }

        ApplicantPayload {
            slug: applicant.slug.clone(),
            full_name: applicant.full_name.clone(),
            email: applicant.email.clone(),
            phone: applicant.phone.clone(),
            ssn: applicant.ssn.clone(),
            date_of_birth: applicant
                .date_of_birth
                .as_ref()
                .and_then(|birth| birth.to_datetime()),
            relation_to_head: applicant.relation_to_head.clone(),
            marital_status: applicant.marital_status,
            race: applicant.race.as_ref().and_then(|choice| choice.code()),
            ethnicity: applicant.ethnicity.as_ref().and_then(|choice| choice.code()),
            disabled: applicant.disabled.as_ref().and_then(|choice| choice.code()),
            past_addresses: applicant.past_addresses.iter().map(address).collect(),
            student_status,
            categories,
            properties: applicant
                .properties
                .as_ref()
                .map(|properties| properties.iter().map(property::to_payload).collect()),
            cash_on_hand: applicant.cash_on_hand.as_ref().and_then(cash_on_hand),
        }
    }

    /// Converts every present category, dropping the ones with nothing but zeros.
    fn categories(&self, categories: &Categories<SourceForm>) -> Categories<SourcePayload> {
        let mut converted = Categories::default();
        for (category, sources) in categories.present() {
            let mut empty = true;
            let mut payloads = Vec::with_capacity(sources.len());
            for source in sources {
                let (payload, has_entries) = self.source(source);
                empty &= !has_entries;
                payloads.push(payload);
            }
            if empty {
                debug!(category = category.key(), "dropping empty category");
                continue;
            }
            *converted.slot_mut(category) = Some(payloads);
        }
        converted
    }

    /// Returns the payload and whether any entry carried a non-zero amount.
    fn source(&self, source: &SourceForm) -> (SourcePayload, bool) {
        let first_period = source
            .incomes
            .first()
            .map(|income| income.period)
            .unwrap_or_default();
        let mut has_entries = false;

        let incomes = source
            .incomes
            .iter()
            .map(|income| {
                let (payload, nonzero) = self.income(source, first_period, income);
                has_entries |= nonzero;
                payload
            })
            .collect();
        let assets = source
            .assets
            .iter()
            .map(|asset| {
                let (payload, nonzero) = self.asset(source, asset);
                has_entries |= nonzero;
                payload
            })
            .collect();

        let payload = SourcePayload {
            slug: source.slug.clone(),
            position: source.position.clone(),
            name: source.name.clone(),
            contact: source.contact.clone(),
            dependent: source.dependent.clone(),
            incomes,
            assets,
        };
        (payload, has_entries)
    }

    fn income(
        &self,
        source: &SourceForm,
        first_period: Period,
        income: &IncomeForm,
    ) -> (IncomePayload, bool) {
        let amount = income.amount.coerce();
        let period_per_avg = income.period_per_avg.coerce();
        let category = non_empty(&income.category);
        let payer = income.payer.as_deref().and_then(non_empty);

        if amount == 0.0 {
            let payload = IncomePayload {
                group: income.group.clone(),
                category,
                amount: 0,
                period: income.period,
                avg: income.avg,
                period_per_avg: to_cents(period_per_avg),
                avg_per_year: to_cents(income.avg_per_year.coerce()),
                descr: income.descr.clone(),
                payer,
                ..IncomePayload::default()
            };
            return (payload, false);
        }

        let avg_per_year = match &source.avg_per_year {
            Some(source_avg) => round_half_up(
                self.natural(income.period) * source_avg.coerce() * 100.0
                    / self.natural(first_period),
            ) as i64,
            None => to_cents(income.avg_per_year.coerce()),
        };

        let payload = IncomePayload {
            group: income.group.clone(),
            category,
            amount: to_cents(amount),
            period: income.period,
            avg: income.avg,
            period_per_avg: to_cents(period_per_avg),
            avg_per_year,
            starts_at: source.starts_at,
            ends_at: source.ends_at,
            verified: source.verified,
            descr: self.notes.clone().or_else(|| income.descr.clone()),
            cash_wages: income.cash_wages.and(source.cash_wages),
            payer,
            court_award: income.court_award.as_deref().map(|answer| {
                CourtAward::normalize(answer, income.collection.unwrap_or(false))
            }),
        };
        (payload, true)
    }

    fn asset(&self, source: &SourceForm, asset: &AssetForm) -> (AssetPayload, bool) {
        let amount = asset.amount.coerce();
        let interest_rate = to_cents(asset.interest_rate.coerce());
        let category = non_empty(&asset.category);

        if amount == 0.0 {
            let payload = AssetPayload {
                group: asset.group.clone(),
                category,
                verified: None,
                amount: 0,
                interest_rate,
                descr: asset.descr.clone(),
            };
            return (payload, false);
        }

        let payload = AssetPayload {
            group: asset.group.clone(),
            category,
            verified: source.verified,
            amount: to_cents(amount),
            interest_rate,
            descr: self.notes.clone().or_else(|| asset.descr.clone()),
        };
        (payload, true)
    }

    /// Student page figures; a non-zero financial aid becomes its own income source.
    fn student_status(
        &self,
        status: &StudentStatusForm,
    ) -> (StudentStatusPayload, Option<SourcePayload>) {
        let financial_aid = status
            .financial_aid
            .as_ref()
            .filter(|aid| aid.amount.coerce() != 0.0)
            .map(|aid| self.financial_aid_source(aid));
        let cost_of_tuition = status
            .cost_of_tuition
            .as_ref()
            .filter(|tuition| tuition.amount.coerce() != 0.0)
            .map(student_account);

        let payload = StudentStatusPayload {
            current: status.current,
            past: status.past,
            future: status.future,
            title_iv: status.title_iv,
            job_training: status.job_training,
            has_children: status.has_children,
            foster_care: status.foster_care,
            cost_of_tuition,
        };
        (payload, financial_aid)
    }

    fn financial_aid_source(&self, aid: &StudentAccountForm) -> SourcePayload {
        let avg_per_year = match aid.avg_per_year.coerce() {
            value if value == 0.0 => self.natural(aid.period),
            value => value,
        };
        SourcePayload {
            incomes: vec![IncomePayload {
                amount: to_cents(aid.amount.coerce()),
                period: aid.period,
                period_per_avg: to_cents(aid.period_per_avg.coerce()),
                avg_per_year: to_cents(avg_per_year),
                descr: self.notes.clone(),
                ..IncomePayload::default()
            }],
            ..SourcePayload::default()
        }
    }
}

/// Marks every income and asset of `applicant` for deletion.
pub fn mark_for_deletion(applicant: &mut ApplicantForm) -> usize {
    let mut marked = 0;
    for category in IncomeCategory::ALL {
        let Some(sources) = applicant.categories.slot_mut(category).as_mut() else {
            continue;
        };
        for source in sources {
            for income in &mut source.incomes {
                income.amount = DELETE_SENTINEL.into();
                marked += 1;
            }
            for asset in &mut source.assets {
                asset.amount = DELETE_SENTINEL.into();
                marked += 1;
            }
        }
    }
    marked
}

fn student_account(account: &StudentAccountForm) -> StudentAccountPayload {
    StudentAccountPayload {
        amount: to_cents(account.amount.coerce()),
        period: account.period,
        period_per_avg: to_cents(account.period_per_avg.coerce()),
        avg_per_year: to_cents(account.avg_per_year.coerce()),
    }
}

fn address(address: &AddressForm) -> AddressPayload {
    AddressPayload {
        starts_at: address.starts_at.val,
        ends_at: address.ends_at.val,
        street_address: address.street_address.clone(),
        locality: address.locality.clone(),
        region: address.region.clone(),
        postal_code: address.postal_code.clone(),
        country: address.country.clone(),
        monthly_rent: round_half_up(address.monthly_rent.coerce()) as i64,
    }
}

fn child(child: &ChildForm) -> ChildPayload {
    ChildPayload {
        full_name: child.full_name.clone(),
        relation_to_head: child.relation_to_head.clone(),
        date_of_birth: child.date_of_birth.to_datetime(),
        full_time_student: child.full_time_student,
    }
}

fn cash_on_hand(cash: &CashOnHandForm) -> Option<AssetPayload> {
    let amount = cash.amount.coerce();
    if amount == 0.0 {
        return None;
    }
    Some(AssetPayload {
        amount: to_cents(amount),
        descr: cash.descr.clone(),
        ..AssetPayload::default()
    })
}

fn non_empty(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}
