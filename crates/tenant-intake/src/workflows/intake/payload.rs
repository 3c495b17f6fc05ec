//! Wire document exchanged with the backend.
//!
//! Money is integer cents, rates are hundredths, and calendar values are plain
//! strings. Property rows are the exception: they travel in dollars.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use super::calendar;
use super::categories::Categories;
use super::domain::{MaritalStatus, SourceContact, Verified};
use super::period::Period;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ApplicationPayload {
    #[serde(default)]
    pub slug: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lihtc_property: Option<String>,
    #[serde(default)]
    pub applicants: Vec<ApplicantPayload>,
    #[serde(default)]
    pub children: Vec<ChildPayload>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ApplicantPayload {
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
    #[serde(
        default,
        with = "calendar::optional_datetime",
        skip_serializing_if = "Option::is_none"
    )]
    pub date_of_birth: Option<NaiveDateTime>,
    #[serde(default)]
    pub relation_to_head: String,
    #[serde(default)]
    pub marital_status: MaritalStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub race: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ethnicity: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disabled: Option<i64>,
    #[serde(default)]
    pub past_addresses: Vec<AddressPayload>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub student_status: Option<StudentStatusPayload>,
    #[serde(flatten)]
    pub categories: Categories<SourcePayload>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<Vec<PropertyPayload>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cash_on_hand: Option<AssetPayload>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddressPayload {
    #[serde(with = "calendar::minutes")]
    pub starts_at: NaiveDateTime,
    #[serde(with = "calendar::minutes")]
    pub ends_at: NaiveDateTime,
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
    #[serde(default)]
    pub monthly_rent: i64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct StudentStatusPayload {
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
    pub cost_of_tuition: Option<StudentAccountPayload>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudentAccountPayload {
    pub amount: i64,
    #[serde(default)]
    pub period: Period,
    #[serde(default)]
    pub period_per_avg: i64,
    #[serde(default)]
    pub avg_per_year: i64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SourcePayload {
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
    #[serde(default)]
    pub incomes: Vec<IncomePayload>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub assets: Vec<AssetPayload>,
}

/// Income entry in storage units. A negative `amount` asks the backend to delete it.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct IncomePayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    pub amount: i64,
    #[serde(default)]
    pub period: Period,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avg: Option<Period>,
    #[serde(default)]
    pub period_per_avg: i64,
    #[serde(default)]
    pub avg_per_year: i64,
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
    pub verified: Option<Verified>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub descr: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cash_wages: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payer: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub court_award: Option<CourtAward>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CourtAward {
    No,
    Yes,
    Partial,
}

impl CourtAward {
    /// `no` stays `no`; any other answer is `partial` when only part is collected.
    pub fn normalize(answer: &str, collection: bool) -> Self {
        if answer == "no" {
            CourtAward::No
        } else if collection {
            CourtAward::Partial
        } else {
            CourtAward::Yes
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AssetPayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verified: Option<Verified>,
    pub amount: i64,
    #[serde(default)]
    pub interest_rate: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub descr: Option<String>,
}

/// How a sold property left the household.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum SaleCategory {
    NormalSale,
    Foreclosure,
    ShortSale,
}

impl TryFrom<u8> for SaleCategory {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(SaleCategory::NormalSale),
            2 => Ok(SaleCategory::Foreclosure),
            3 => Ok(SaleCategory::ShortSale),
            other => Err(format!("unknown sale category {other}")),
        }
    }
}

impl From<SaleCategory> for u8 {
    fn from(value: SaleCategory) -> Self {
        match value {
            SaleCategory::NormalSale => 1,
            SaleCategory::Foreclosure => 2,
            SaleCategory::ShortSale => 3,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PropertyPayload {
    #[serde(default)]
    pub amount: f64,
    #[serde(default)]
    pub descr: String,
    #[serde(default)]
    pub rent_collected: f64,
    #[serde(default)]
    pub monthly_mortgage: f64,
    #[serde(default)]
    pub maintenance: f64,
    #[serde(default)]
    pub reverse_mortgage: f64,
    #[serde(
        default,
        with = "calendar::optional_date",
        skip_serializing_if = "Option::is_none"
    )]
    pub sell_at: Option<NaiveDate>,
    #[serde(default)]
    pub sell_price: f64,
    #[serde(default)]
    pub total_mortgage: f64,
    #[serde(default)]
    pub sell_closing_cost: f64,
    #[serde(default)]
    pub foreclosure: bool,
    #[serde(default)]
    pub short_sale: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<SaleCategory>,
    #[serde(default)]
    pub assets: Vec<PropertyAccount>,
}

/// Account a sale's proceeds were deposited in, in dollars.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PropertyAccount {
    #[serde(default)]
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub amount: f64,
    #[serde(default)]
    pub interest_rate: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChildPayload {
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub relation_to_head: String,
    #[serde(
        default,
        with = "calendar::optional_datetime",
        skip_serializing_if = "Option::is_none"
    )]
    pub date_of_birth: Option<NaiveDateTime>,
    #[serde(default)]
    pub full_time_student: bool,
}

/// Success body of a create request that redirects instead of returning markup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationResponse {
    pub location: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflows::intake::categories::IncomeCategory;

    #[test]
    fn backend_applicant_parses_with_sources() {
        let applicant: ApplicantPayload = serde_json::from_value(serde_json::json!({
            "slug": "jane",
            "full_name": "Jane Doe",
            "date_of_birth": "1980-04-02T00:00:00Z",
            "marital_status": 0,
            "past_addresses": [{
                "starts_at": "2023-01-01T00:00",
                "ends_at": "2025-01-01T00:00:00",
                "region": "CA",
                "monthly_rent": 1200
            }],
            "employee": [{
                "slug": "acme",
                "name": "Acme",
                "locality": "Oakland",
                "incomes": [{
                    "amount": 12345,
                    "period": "hourly",
                    "period_per_avg": 4000,
                    "avg_per_year": 5200,
                    "verified": "employer",
                    "starts_at": "2025-01-01",
                    "ends_at": "2025-06-30"
                }]
            }]
        }))
        .expect("parse applicant");

        assert!(applicant.date_of_birth.is_some());
        assert_eq!(applicant.past_addresses[0].monthly_rent, 1200);
        let sources = applicant.categories.sources(IncomeCategory::Employee);
        assert_eq!(sources[0].contact.locality, "Oakland");
        assert_eq!(sources[0].incomes[0].amount, 12345);
        assert_eq!(sources[0].incomes[0].verified, Some(Verified::Employer));
    }

    #[test]
    fn court_award_collapses_answers() {
        assert_eq!(CourtAward::normalize("no", true), CourtAward::No);
        assert_eq!(CourtAward::normalize("yes", true), CourtAward::Partial);
        assert_eq!(CourtAward::normalize("", false), CourtAward::Yes);
    }

    #[test]
    fn sale_category_serializes_as_code() {
        let json = serde_json::to_value(SaleCategory::ShortSale).expect("serialize");
        assert_eq!(json, serde_json::json!(3));
    }
}
