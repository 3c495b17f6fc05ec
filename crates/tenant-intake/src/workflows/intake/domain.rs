use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::calendar;
use super::categories::Categories;
use super::inputs::{blank_as_none, CalendarInput, ChoiceInput, DatePicker, NumericInput};
use super::period::Period;

/// Relation code of the applicant who heads the household.
pub const HEAD_OF_HOUSEHOLD: &str = "HEAD";
/// Relation code recorded for every child added to the household.
pub const CHILD: &str = "Child";
/// Directory pick that sends the user to the add-source page instead of copying a record.
pub const ADD_SOURCE: &str = "add-source";

/// Application document as bound to the wizard, in display units.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ApplicationForm {
    #[serde(default)]
    pub slug: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lihtc_property: Option<String>,
    #[serde(default)]
    pub applicants: Vec<ApplicantForm>,
    #[serde(default)]
    pub children: Vec<ChildForm>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub docs: Vec<DocumentLink>,
}

/// One adult member of the household.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ApplicantForm {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub ssn: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<CalendarInput>,
    #[serde(default)]
    pub relation_to_head: String,
    #[serde(default)]
    pub marital_status: MaritalStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub race: Option<ChoiceInput>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ethnicity: Option<ChoiceInput>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disabled: Option<ChoiceInput>,
    #[serde(default)]
    pub past_addresses: Vec<AddressForm>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub student_status: Option<StudentStatusForm>,
    #[serde(flatten)]
    pub categories: Categories<SourceForm>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<Vec<PropertyForm>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cash_on_hand: Option<CashOnHandForm>,
}

impl ApplicantForm {
    pub fn is_head_of_household(&self) -> bool {
        self.relation_to_head == HEAD_OF_HOUSEHOLD
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum MaritalStatus {
    #[default]
    NoneOfTheAbove,
    MarriedFileJointly,
    Separated,
    LegallySeparated,
}

impl TryFrom<u8> for MaritalStatus {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(MaritalStatus::NoneOfTheAbove),
            1 => Ok(MaritalStatus::MarriedFileJointly),
            2 => Ok(MaritalStatus::Separated),
            3 => Ok(MaritalStatus::LegallySeparated),
            other => Err(format!("unknown marital status {other}")),
        }
    }
}

impl From<MaritalStatus> for u8 {
    fn from(value: MaritalStatus) -> Self {
        match value {
            MaritalStatus::NoneOfTheAbove => 0,
            MaritalStatus::MarriedFileJointly => 1,
            MaritalStatus::Separated => 2,
            MaritalStatus::LegallySeparated => 3,
        }
    }
}

/// Housing history row; both bounds are date pickers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddressForm {
    pub starts_at: DatePicker,
    pub ends_at: DatePicker,
    #[serde(default)]
    pub street_address: String,
    #[serde(default)]
    pub locality: String,
    #[serde(default)]
    pub region: String,
    #[serde(default)]
    pub postal_code: String,
    #[serde(default)]
    pub country: String,
    #[serde(default = "NumericInput::zero")]
    pub monthly_rent: NumericInput,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct StudentStatusForm {
    #[serde(default)]
    pub current: bool,
    #[serde(default)]
    pub past: bool,
    #[serde(default)]
    pub future: bool,
    #[serde(default)]
    pub title_iv: bool,
    #[serde(default)]
    pub job_training: bool,
    #[serde(default)]
    pub has_children: bool,
    #[serde(default)]
    pub foster_care: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub financial_aid: Option<StudentAccountForm>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cost_of_tuition: Option<StudentAccountForm>,
}

/// Monthly financial aid or tuition figure entered on the student page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudentAccountForm {
    #[serde(default = "NumericInput::zero")]
    pub amount: NumericInput,
    #[serde(default)]
    pub period: Period,
    #[serde(default = "NumericInput::zero")]
    pub period_per_avg: NumericInput,
    #[serde(default = "NumericInput::zero")]
    pub avg_per_year: NumericInput,
}

impl StudentAccountForm {
    pub fn monthly(amount: f64) -> Self {
        Self {
            amount: NumericInput::from(amount),
            period: Period::Monthly,
            period_per_avg: NumericInput::zero(),
            avg_per_year: NumericInput::zero(),
        }
    }
}

/// Address and contact details shared by sources and directory entries.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SourceContact {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub email: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub phone: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub street_address: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub locality: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub region: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub postal_code: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub country: String,
}

/// Selection made in the source directory dropdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SourcePick {
    Index(usize),
    Key(String),
}

impl SourcePick {
    pub fn is_add_source(&self) -> bool {
        matches!(self, SourcePick::Key(key) if key == ADD_SOURCE)
    }

    pub fn is_blank(&self) -> bool {
        matches!(self, SourcePick::Key(key) if key.is_empty())
    }

    /// Directory index, accepting the stringified form the select produces.
    pub fn index(&self) -> Option<usize> {
        match self {
            SourcePick::Index(idx) => Some(*idx),
            SourcePick::Key(key) => key.trim().parse().ok(),
        }
    }
}

/// Employer, agency or institution paying or holding money for an applicant.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SourceForm {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pk: Option<SourcePick>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    #[serde(default)]
    pub position: String,
    #[serde(default)]
    pub name: String,
    #[serde(flatten)]
    pub contact: SourceContact,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dependent: Option<String>,
    #[serde(
        default,
        deserialize_with = "blank_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub verified: Option<Verified>,
    #[serde(
        default,
        with = "calendar::optional_date",
        skip_serializing_if = "Option::is_none"
    )]
    pub starts_at: Option<NaiveDate>,
    #[serde(
        default,
        with = "calendar::optional_date",
        skip_serializing_if = "Option::is_none"
    )]
    pub ends_at: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avg_per_year: Option<NumericInput>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cash_wages: Option<bool>,
    #[serde(default)]
    pub incomes: Vec<IncomeForm>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub assets: Vec<AssetForm>,
}

impl SourceForm {
    /// Empty source row as added by the "add source" buttons.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Source with one monthly benefit row, as seeded for a new applicant.
    pub fn monthly_benefit() -> Self {
        Self {
            incomes: vec![IncomeForm::monthly_benefit()],
            ..Self::default()
        }
    }
}

/// How an income figure was verified.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Verified {
    Tenant,
    Employer,
    YearToDate,
    PeriodToDate,
    TaxReturn,
}

impl Verified {
    /// Verifications that total a date range instead of quoting a rate.
    pub const fn is_implicit_period(self) -> bool {
        matches!(
            self,
            Verified::YearToDate | Verified::PeriodToDate | Verified::TaxReturn
        )
    }
}

/// Income row attached to a source.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct IncomeForm {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub amount: NumericInput,
    #[serde(default)]
    pub period: Period,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avg: Option<Period>,
    #[serde(default = "NumericInput::zero")]
    pub period_per_avg: NumericInput,
    #[serde(default = "NumericInput::zero")]
    pub avg_per_year: NumericInput,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub descr: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub court_award: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payer: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collection: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cash_wages: Option<bool>,
}

impl IncomeForm {
    /// Blank monthly row: twelve payments a year.
    pub fn monthly_benefit() -> Self {
        Self {
            amount: NumericInput::default(),
            period: Period::Monthly,
            period_per_avg: NumericInput::zero(),
            avg_per_year: NumericInput::from(12.0),
            ..Self::default()
        }
    }

    /// Monthly row with the support-payment questions attached.
    pub fn support_payment() -> Self {
        Self {
            court_award: Some(String::new()),
            payer: Some(String::new()),
            collection: Some(false),
            descr: Some(String::new()),
            ..Self::monthly_benefit()
        }
    }

    /// Blank hourly row for one wage category of an employer.
    pub fn hourly(category: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            amount: NumericInput::default(),
            period: Period::Hourly,
            avg: Some(Period::Weekly),
            period_per_avg: NumericInput::default(),
            avg_per_year: NumericInput::zero(),
            ..Self::default()
        }
    }
}

/// Account or policy held at a source.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AssetForm {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
    #[serde(default)]
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub amount: NumericInput,
    #[serde(default = "NumericInput::zero")]
    pub interest_rate: NumericInput,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub descr: Option<String>,
}

impl AssetForm {
    pub fn blank(category: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            ..Self::default()
        }
    }
}

/// Bank category offered for proceeds of a property sale.
pub const BANK_CD: &str = "certificate of deposit";

/// Printable bank category names, keyed by the select value.
pub fn bank_category_label(category: &str) -> Option<&'static str> {
    let label = match category {
        "checking" => "Checking",
        "savings" => "Savings",
        "certificate of deposit" => "Certificates of Deposit",
        "money market" => "Money Market",
        "revokable trust" => "Revocable trust",
        "IRA" => "IRA",
        "lump sump pension" => "Lump Sum Pension",
        "Keogh account" => "Keogh account",
        "401K" => "401K",
        "brokerage" => "Brokerage",
        _ => return None,
    };
    Some(label)
}

/// Real estate owned, sold, rented out or under a reverse mortgage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyForm {
    #[serde(default = "NumericInput::zero")]
    pub amount: NumericInput,
    #[serde(default)]
    pub descr: String,
    #[serde(default = "NumericInput::zero")]
    pub rent_collected: NumericInput,
    #[serde(default = "NumericInput::zero")]
    pub monthly_mortgage: NumericInput,
    #[serde(default = "NumericInput::zero")]
    pub maintenance: NumericInput,
    #[serde(default = "NumericInput::zero")]
    pub reverse_mortgage: NumericInput,
    #[serde(default = "CalendarInput::blank")]
    pub sell_at: CalendarInput,
    #[serde(default = "NumericInput::zero")]
    pub sell_price: NumericInput,
    #[serde(default = "NumericInput::zero")]
    pub total_mortgage: NumericInput,
    #[serde(default = "NumericInput::zero")]
    pub sell_closing_cost: NumericInput,
    #[serde(default)]
    pub foreclosure: bool,
    #[serde(default)]
    pub short_sale: bool,
    #[serde(default)]
    pub assets: Vec<AssetForm>,
}

impl Default for PropertyForm {
    fn default() -> Self {
        Self {
            amount: NumericInput::zero(),
            descr: String::new(),
            rent_collected: NumericInput::zero(),
            monthly_mortgage: NumericInput::zero(),
            maintenance: NumericInput::zero(),
            reverse_mortgage: NumericInput::zero(),
            sell_at: CalendarInput {
                month: NumericInput::Text("1".to_string()),
                ..CalendarInput::blank()
            },
            sell_price: NumericInput::zero(),
            total_mortgage: NumericInput::zero(),
            sell_closing_cost: NumericInput::zero(),
            foreclosure: false,
            short_sale: false,
            assets: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChildForm {
    #[serde(default)]
    pub full_name: String,
    #[serde(default = "child_relation")]
    pub relation_to_head: String,
    pub date_of_birth: CalendarInput,
    #[serde(default)]
    pub full_time_student: bool,
}

fn child_relation() -> String {
    CHILD.to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CashOnHandForm {
    #[serde(default = "NumericInput::zero")]
    pub amount: NumericInput,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub descr: Option<String>,
}

impl Default for CashOnHandForm {
    fn default() -> Self {
        Self {
            amount: NumericInput::zero(),
            descr: None,
        }
    }
}

/// Supporting document already uploaded for the application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentLink {
    pub printable_name: String,
    pub url: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflows::intake::categories::IncomeCategory;

    #[test]
    fn applicant_reads_flattened_categories() {
        let applicant: ApplicantForm = serde_json::from_value(serde_json::json!({
            "full_name": "Jane Doe",
            "relation_to_head": "HEAD",
            "marital_status": 1,
            "race": "",
            "employee": [{
                "name": "Acme",
                "verified": "",
                "incomes": [{"category": "regular", "amount": "15.5", "period": "hourly"}]
            }]
        }))
        .expect("parse applicant");

        assert!(applicant.is_head_of_household());
        assert_eq!(applicant.marital_status, MaritalStatus::MarriedFileJointly);
        let employers = applicant.categories.sources(IncomeCategory::Employee);
        assert_eq!(employers.len(), 1);
        assert_eq!(employers[0].verified, None);
        assert_eq!(employers[0].incomes[0].amount.value(), Some(15.5));
        assert!(applicant.categories.slot(IncomeCategory::Veteran).is_none());
    }

    #[test]
    fn source_pick_recognizes_sentinel_and_indexes() {
        assert!(SourcePick::Key(ADD_SOURCE.to_string()).is_add_source());
        assert_eq!(SourcePick::Key("2".to_string()).index(), Some(2));
        assert_eq!(SourcePick::Index(4).index(), Some(4));
        assert!(SourcePick::Key(String::new()).is_blank());
    }

    #[test]
    fn verified_slugs_are_kebab_case() {
        let parsed: Verified = serde_json::from_str("\"year-to-date\"").expect("parse");
        assert_eq!(parsed, Verified::YearToDate);
        assert!(parsed.is_implicit_period());
        assert!(!Verified::Employer.is_implicit_period());
    }

    #[test]
    fn unknown_marital_status_is_rejected() {
        let parsed = serde_json::from_str::<MaritalStatus>("7");
        assert!(parsed.is_err());
    }
}
