use serde::{Deserialize, Serialize};

use super::inputs::{from_cents, round_half_up};
use super::settings::{FormSettings, Limits, PrefillFields, RentLimit};

/// Income and rent restriction percentages offered as preset choices.
pub const STANDARD_RESTRICTIONS: [f64; 2] = [50.0, 60.0];

/// Income and rent limit arithmetic for one unit.
///
/// Restrictions are percentages of area median, money inputs are dollars and
/// the limits tables are cents. Missing table entries read as zero.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct EligibilityCalculator {
    pub nb_bedrooms: usize,
    pub federal_income_restriction: f64,
    pub monthly_rent: f64,
    pub federal_rent_restriction: f64,
    pub bond_rent_restriction: f64,
    pub federal_rent_assistance: f64,
    pub non_federal_rent_assistance: f64,
    pub limits: Limits,
}

impl EligibilityCalculator {
    pub fn new(fields: &PrefillFields, limits: Limits) -> Self {
        Self {
            nb_bedrooms: fields.nb_bedrooms.unwrap_or(0),
            federal_income_restriction: fields.federal_income_restriction.unwrap_or(0.0),
            monthly_rent: fields.monthly_rent.map(from_cents).unwrap_or(0.0),
            federal_rent_restriction: fields.federal_rent_restriction.unwrap_or(0.0),
            bond_rent_restriction: fields.bond_rent_restriction.unwrap_or(0.0),
            federal_rent_assistance: fields.federal_rent_assistance.map(from_cents).unwrap_or(0.0),
            non_federal_rent_assistance: fields
                .non_federal_rent_assistance
                .map(from_cents)
                .unwrap_or(0.0),
            limits,
        }
    }

    pub fn from_settings(settings: &FormSettings) -> Self {
        Self::new(&settings.fields, settings.limits.clone())
    }

    fn rent_row(&self) -> RentLimit {
        self.limits.rent_for(self.nb_bedrooms)
    }

    /// Annual income limit in dollars.
    pub fn lihtc_income_limit(&self) -> f64 {
        self.federal_income_restriction * self.limits.income_100 as f64 / 10000.0
    }

    pub fn bond_income_limit(&self) -> f64 {
        self.lihtc_income_limit()
    }

    /// `total_income` is in cents and compared against the rounded limit.
    pub fn is_eligible(&self, total_income: i64) -> bool {
        total_income as f64 <= round_half_up(self.lihtc_income_limit() * 100.0)
    }

    /// Compared against the unrounded dollar figure, unlike [`Self::is_eligible`].
    pub fn is_eligible_140(&self, total_income: i64) -> bool {
        total_income as f64 <= self.lihtc_income_limit() * 140.0 / 100.0
    }

    /// Monthly utility allowance in dollars.
    pub fn utility_allowance(&self) -> f64 {
        from_cents(self.rent_row().utility_allowance.unwrap_or(0))
    }

    /// Monthly non optional charges in dollars.
    pub fn non_optional_charges(&self) -> f64 {
        from_cents(self.rent_row().non_optional_charges.unwrap_or(0))
    }

    /// Gross monthly rent for the unit in dollars.
    pub fn gross_monthly_rent_for_unit(&self) -> f64 {
        let row = self.rent_row();
        let cents = round_half_up(self.monthly_rent * 100.0)
            + row.utility_allowance.unwrap_or(0) as f64
            + row.non_optional_charges.unwrap_or(0) as f64;
        cents / 100.0
    }

    /// Monthly rent limit in whole dollars.
    pub fn lihtc_rent_limit(&self) -> f64 {
        let maximum = self.rent_row().maximum_federal_lihtc_rent.unwrap_or(0) as f64;
        round_half_up(self.federal_rent_restriction * maximum / 10000.0)
    }

    pub fn bond_rent_limit(&self) -> f64 {
        self.lihtc_rent_limit()
    }

    pub fn total_rent_assistance(&self) -> f64 {
        self.federal_rent_assistance + self.non_federal_rent_assistance
    }

    pub fn is_less_than_rent_limit(&self) -> bool {
        self.gross_monthly_rent_for_unit() - self.total_rent_assistance() <= self.lihtc_rent_limit()
    }

    pub fn federal_income_restriction_other(&self) -> Option<f64> {
        other_restriction(self.federal_income_restriction)
    }

    pub fn federal_rent_restriction_other(&self) -> Option<f64> {
        other_restriction(self.federal_rent_restriction)
    }

    pub fn summary(&self, total_income: Option<i64>) -> EligibilitySummary {
        EligibilitySummary {
            lihtc_income_limit: self.lihtc_income_limit(),
            bond_income_limit: self.bond_income_limit(),
            utility_allowance: self.utility_allowance(),
            non_optional_charges: self.non_optional_charges(),
            gross_monthly_rent_for_unit: self.gross_monthly_rent_for_unit(),
            lihtc_rent_limit: self.lihtc_rent_limit(),
            bond_rent_limit: self.bond_rent_limit(),
            total_rent_assistance: self.total_rent_assistance(),
            is_less_than_rent_limit: self.is_less_than_rent_limit(),
            federal_income_restriction_other: self.federal_income_restriction_other(),
            federal_rent_restriction_other: self.federal_rent_restriction_other(),
            income_check: total_income.map(|total_income| IncomeCheck {
                total_income,
                is_eligible: self.is_eligible(total_income),
                is_eligible_140: self.is_eligible_140(total_income),
            }),
        }
    }
}

/// A restriction outside the preset choices, reported as the custom value.
pub fn other_restriction(restriction: f64) -> Option<f64> {
    if STANDARD_RESTRICTIONS.contains(&restriction) {
        None
    } else {
        Some(restriction)
    }
}

/// Every derived figure at once, as shown on the certification page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EligibilitySummary {
    pub lihtc_income_limit: f64,
    pub bond_income_limit: f64,
    pub utility_allowance: f64,
    pub non_optional_charges: f64,
    pub gross_monthly_rent_for_unit: f64,
    pub lihtc_rent_limit: f64,
    pub bond_rent_limit: f64,
    pub total_rent_assistance: f64,
    pub is_less_than_rent_limit: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub federal_income_restriction_other: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub federal_rent_restriction_other: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub income_check: Option<IncomeCheck>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncomeCheck {
    pub total_income: i64,
    pub is_eligible: bool,
    pub is_eligible_140: bool,
}
