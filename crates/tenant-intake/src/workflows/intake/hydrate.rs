use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use super::categories::Categories;
use super::domain::{
    AddressForm, ApplicantForm, ApplicationForm, AssetForm, CashOnHandForm, ChildForm,
    IncomeForm, PropertyForm, SourceForm, StudentAccountForm, StudentStatusForm,
};
use super::inputs::{from_cents, CalendarInput, ChoiceInput, DatePicker, NumericInput};
use super::payload::{
    AddressPayload, ApplicantPayload, ApplicationPayload, AssetPayload, ChildPayload, CourtAward,
    IncomePayload, PropertyPayload, SourcePayload, StudentAccountPayload, StudentStatusPayload,
};

/// Weeks per year assumed for a source that reported no income rows.
const DEFAULT_SOURCE_AVG_PER_YEAR: f64 = 52.0;

/// Form document rebuilt from a stored application, ready for editing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hydrated {
    pub form: ApplicationForm,
    /// Descriptions found on the stored entries, one per line.
    pub notes: String,
    pub active_applicant: Option<usize>,
}

/// Converts the stored application back to display units.
pub fn hydrate(payload: &ApplicationPayload, today: NaiveDate) -> Hydrated {
    let mut notes = Notes::default();
    let applicants: Vec<ApplicantForm> = payload
        .applicants
        .iter()
        .map(|applicant| hydrate_applicant(applicant, today, &mut notes))
        .collect();
    let active_applicant = applicants.len().checked_sub(1);

    Hydrated {
        form: ApplicationForm {
            slug: payload.slug.clone(),
            lihtc_property: payload.lihtc_property.clone(),
            applicants,
            children: payload.children.iter().map(hydrate_child).collect(),
            docs: Vec::new(),
        },
        notes: notes.0,
        active_applicant,
    }
}

#[derive(Default)]
struct Notes(String);

impl Notes {
    fn push(&mut self, descr: Option<&str>) {
        let Some(descr) = descr.filter(|descr| !descr.is_empty()) else {
            return;
        };
        if !self.0.is_empty() {
            self.0.push('\n');
        }
        self.0.push_str(descr);
    }
}

fn hydrate_applicant(
    applicant: &ApplicantPayload,
    today: NaiveDate,
    notes: &mut Notes,
) -> ApplicantForm {
    let mut categories: Categories<SourceForm> = Categories::default();
    for (category, sources) in applicant.categories.present() {
        *categories.slot_mut(category) = Some(
            sources
                .iter()
                .map(|source| hydrate_source(source, today, notes))
                .collect(),
        );
    }

    ApplicantForm {
        slug: applicant.slug.clone(),
        full_name: applicant.full_name.clone(),
        email: applicant.email.clone(),
        phone: applicant.phone.clone(),
        ssn: applicant.ssn.clone(),
        date_of_birth: Some(
            applicant
                .date_of_birth
                .map(|dt| CalendarInput::from(dt.date()))
                .unwrap_or_else(CalendarInput::blank),
        ),
        relation_to_head: applicant.relation_to_head.clone(),
        marital_status: applicant.marital_status,
        race: applicant.race.map(ChoiceInput::Code),
        ethnicity: applicant.ethnicity.map(ChoiceInput::Code),
        disabled: applicant.disabled.map(ChoiceInput::Code),
        past_addresses: applicant.past_addresses.iter().map(hydrate_address).collect(),
        student_status: Some(
            applicant
                .student_status
                .as_ref()
                .map(hydrate_student_status)
                .unwrap_or_else(blank_student_status),
        ),
        categories,
        properties: applicant
            .properties
            .as_ref()
            .map(|properties| properties.iter().map(hydrate_property).collect()),
        cash_on_hand: applicant.cash_on_hand.as_ref().map(|cash| CashOnHandForm {
            amount: NumericInput::from(from_cents(cash.amount)),
            descr: cash.descr.clone(),
        }),
    }
}

/// Source-level figures are read back from the first income row.
fn hydrate_source(source: &SourcePayload, today: NaiveDate, notes: &mut Notes) -> SourceForm {
    let first = source.incomes.first();
    let start_of_year = NaiveDate::from_ymd_opt(today.year(), 1, 1).unwrap_or(today);
    let incomes: Vec<IncomeForm> = source
        .incomes
        .iter()
        .map(|income| {
            notes.push(income.descr.as_deref());
            hydrate_income(income)
        })
        .collect();
    let assets = source
        .assets
        .iter()
        .map(|asset| {
            notes.push(asset.descr.as_deref());
            hydrate_asset(asset)
        })
        .collect();
    let avg_per_year = first
        .map(|income| from_cents(income.avg_per_year))
        .unwrap_or(DEFAULT_SOURCE_AVG_PER_YEAR);

    SourceForm {
        pk: None,
        slug: source.slug.clone(),
        position: source.position.clone(),
        name: source.name.clone(),
        contact: source.contact.clone(),
        dependent: source.dependent.clone(),
        verified: first.and_then(|income| income.verified),
        starts_at: Some(first.and_then(|income| income.starts_at).unwrap_or(start_of_year)),
        ends_at: Some(first.and_then(|income| income.ends_at).unwrap_or(today)),
        avg_per_year: Some(NumericInput::from(avg_per_year)),
        cash_wages: first.and_then(|income| income.cash_wages),
        incomes,
        assets,
    }
}

fn hydrate_income(income: &IncomePayload) -> IncomeForm {
    IncomeForm {
        group: income.group.clone(),
        category: income.category.clone().unwrap_or_default(),
        amount: NumericInput::from(from_cents(income.amount)),
        period: income.period,
        avg: income.avg,
        period_per_avg: NumericInput::from(from_cents(income.period_per_avg)),
        avg_per_year: NumericInput::from(from_cents(income.avg_per_year)),
        descr: income.descr.clone(),
        court_award: income.court_award.map(|award| {
            match award {
                CourtAward::No => "no",
                CourtAward::Yes | CourtAward::Partial => "yes",
            }
            .to_string()
        }),
        payer: income.payer.clone(),
        collection: income
            .court_award
            .map(|award| award == CourtAward::Partial),
        cash_wages: income.cash_wages,
    }
}

fn hydrate_asset(asset: &AssetPayload) -> AssetForm {
    AssetForm {
        group: asset.group.clone(),
        category: asset.category.clone().unwrap_or_default(),
        name: None,
        amount: NumericInput::from(from_cents(asset.amount)),
        interest_rate: NumericInput::from(from_cents(asset.interest_rate)),
        descr: asset.descr.clone(),
    }
}

fn hydrate_address(address: &AddressPayload) -> AddressForm {
    AddressForm {
        starts_at: DatePicker::closed(address.starts_at),
        ends_at: DatePicker::closed(address.ends_at),
        street_address: address.street_address.clone(),
        locality: address.locality.clone(),
        region: address.region.clone(),
        postal_code: address.postal_code.clone(),
        country: address.country.clone(),
        monthly_rent: NumericInput::from(address.monthly_rent),
    }
}

fn hydrate_student_status(status: &StudentStatusPayload) -> StudentStatusForm {
    StudentStatusForm {
        current: status.current,
        past: status.past,
        future: status.future,
        title_iv: status.title_iv,
        job_training: status.job_training,
        has_children: status.has_children,
        foster_care: status.foster_care,
        financial_aid: Some(StudentAccountForm::monthly(0.0)),
        cost_of_tuition: Some(
            status
                .cost_of_tuition
                .as_ref()
                .map(hydrate_student_account)
                .unwrap_or_else(|| StudentAccountForm::monthly(0.0)),
        ),
    }
}

pub(crate) fn blank_student_status() -> StudentStatusForm {
    StudentStatusForm {
        financial_aid: Some(StudentAccountForm::monthly(0.0)),
        cost_of_tuition: Some(StudentAccountForm::monthly(0.0)),
        ..StudentStatusForm::default()
    }
}

fn hydrate_student_account(account: &StudentAccountPayload) -> StudentAccountForm {
    StudentAccountForm {
        amount: NumericInput::from(from_cents(account.amount)),
        period: account.period,
        period_per_avg: NumericInput::from(from_cents(account.period_per_avg)),
        avg_per_year: NumericInput::from(from_cents(account.avg_per_year)),
    }
}

fn hydrate_property(property: &PropertyPayload) -> PropertyForm {
    let defaults = PropertyForm::default();
    PropertyForm {
        amount: NumericInput::from(property.amount),
        descr: property.descr.clone(),
        rent_collected: NumericInput::from(property.rent_collected),
        monthly_mortgage: NumericInput::from(property.monthly_mortgage),
        maintenance: NumericInput::from(property.maintenance),
        reverse_mortgage: NumericInput::from(property.reverse_mortgage),
        sell_at: property
            .sell_at
            .map(CalendarInput::from)
            .unwrap_or(defaults.sell_at),
        sell_price: NumericInput::from(property.sell_price),
        total_mortgage: NumericInput::from(property.total_mortgage),
        sell_closing_cost: NumericInput::from(property.sell_closing_cost),
        foreclosure: property.foreclosure,
        short_sale: property.short_sale,
        assets: property
            .assets
            .iter()
            .map(|account| AssetForm {
                category: account.category.clone(),
                name: account.name.clone(),
                amount: NumericInput::from(account.amount),
                interest_rate: NumericInput::from(account.interest_rate),
                ..AssetForm::default()
            })
            .collect(),
    }
}

fn hydrate_child(child: &ChildPayload) -> ChildForm {
    ChildForm {
        full_name: child.full_name.clone(),
        relation_to_head: child.relation_to_head.clone(),
        date_of_birth: child
            .date_of_birth
            .map(|dt| CalendarInput::from(dt.date()))
            .unwrap_or_else(CalendarInput::blank),
        full_time_student: child.full_time_student,
    }
}
