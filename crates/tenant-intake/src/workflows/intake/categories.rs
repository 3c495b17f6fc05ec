use serde::{Deserialize, Serialize};

/// Question keys under which an applicant lists income and asset sources.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IncomeCategory {
    #[serde(rename = "selfemployed")]
    SelfEmployed,
    Employee,
    Disability,
    #[serde(rename = "publicassistance")]
    PublicAssistance,
    #[serde(rename = "socialsecurity")]
    SocialSecurity,
    Supplemental,
    Unemployment,
    Veteran,
    Others,
    SupportPayments,
    Trusts,
    Unearned,
    #[serde(rename = "studentfinancialaid")]
    StudentFinancialAid,
    Fiduciaries,
    LifeInsurances,
}

impl IncomeCategory {
    /// Every category, in the order the wizard asks about them.
    pub const ALL: [IncomeCategory; 15] = [
        IncomeCategory::SelfEmployed,
        IncomeCategory::Employee,
        IncomeCategory::Disability,
        IncomeCategory::PublicAssistance,
        IncomeCategory::SocialSecurity,
        IncomeCategory::Supplemental,
        IncomeCategory::Unemployment,
        IncomeCategory::Veteran,
        IncomeCategory::Others,
        IncomeCategory::SupportPayments,
        IncomeCategory::Trusts,
        IncomeCategory::Unearned,
        IncomeCategory::StudentFinancialAid,
        IncomeCategory::Fiduciaries,
        IncomeCategory::LifeInsurances,
    ];

    /// Benefit categories a new applicant starts with, one monthly row each.
    pub const BENEFITS: [IncomeCategory; 6] = [
        IncomeCategory::Disability,
        IncomeCategory::PublicAssistance,
        IncomeCategory::SocialSecurity,
        IncomeCategory::Supplemental,
        IncomeCategory::Unemployment,
        IncomeCategory::Veteran,
    ];

    pub const fn key(self) -> &'static str {
        match self {
            IncomeCategory::SelfEmployed => "selfemployed",
            IncomeCategory::Employee => "employee",
            IncomeCategory::Disability => "disability",
            IncomeCategory::PublicAssistance => "publicassistance",
            IncomeCategory::SocialSecurity => "socialsecurity",
            IncomeCategory::Supplemental => "supplemental",
            IncomeCategory::Unemployment => "unemployment",
            IncomeCategory::Veteran => "veteran",
            IncomeCategory::Others => "others",
            IncomeCategory::SupportPayments => "support_payments",
            IncomeCategory::Trusts => "trusts",
            IncomeCategory::Unearned => "unearned",
            IncomeCategory::StudentFinancialAid => "studentfinancialaid",
            IncomeCategory::Fiduciaries => "fiduciaries",
            IncomeCategory::LifeInsurances => "life_insurances",
        }
    }
}

/// One optional source list per category, flattened into the applicant record.
///
/// An absent list means the applicant reported nothing for that question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Categories<S> {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selfemployed: Option<Vec<S>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub employee: Option<Vec<S>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disability: Option<Vec<S>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publicassistance: Option<Vec<S>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub socialsecurity: Option<Vec<S>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub supplemental: Option<Vec<S>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unemployment: Option<Vec<S>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub veteran: Option<Vec<S>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub others: Option<Vec<S>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub support_payments: Option<Vec<S>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trusts: Option<Vec<S>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unearned: Option<Vec<S>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub studentfinancialaid: Option<Vec<S>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fiduciaries: Option<Vec<S>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub life_insurances: Option<Vec<S>>,
}

impl<S> Default for Categories<S> {
    fn default() -> Self {
        Self {
            selfemployed: None,
            employee: None,
            disability: None,
            publicassistance: None,
            socialsecurity: None,
            supplemental: None,
            unemployment: None,
            veteran: None,
            others: None,
            support_payments: None,
            trusts: None,
            unearned: None,
            studentfinancialaid: None,
            fiduciaries: None,
            life_insurances: None,
        }
    }
}

impl<S> Categories<S> {
    pub fn slot(&self, category: IncomeCategory) -> &Option<Vec<S>> {
        match category {
            IncomeCategory::SelfEmployed => &self.selfemployed,
            IncomeCategory::Employee => &self.employee,
            IncomeCategory::Disability => &self.disability,
            IncomeCategory::PublicAssistance => &self.publicassistance,
            IncomeCategory::SocialSecurity => &self.socialsecurity,
            IncomeCategory::Supplemental => &self.supplemental,
            IncomeCategory::Unemployment => &self.unemployment,
            IncomeCategory::Veteran => &self.veteran,
            IncomeCategory::Others => &self.others,
            IncomeCategory::SupportPayments => &self.support_payments,
            IncomeCategory::Trusts => &self.trusts,
            IncomeCategory::Unearned => &self.unearned,
            IncomeCategory::StudentFinancialAid => &self.studentfinancialaid,
            IncomeCategory::Fiduciaries => &self.fiduciaries,
            IncomeCategory::LifeInsurances => &self.life_insurances,
        }
    }

    pub fn slot_mut(&mut self, category: IncomeCategory) -> &mut Option<Vec<S>> {
        match category {
            IncomeCategory::SelfEmployed => &mut self.selfemployed,
            IncomeCategory::Employee => &mut self.employee,
            IncomeCategory::Disability => &mut self.disability,
            IncomeCategory::PublicAssistance => &mut self.publicassistance,
            IncomeCategory::SocialSecurity => &mut self.socialsecurity,
            IncomeCategory::Supplemental => &mut self.supplemental,
            IncomeCategory::Unemployment => &mut self.unemployment,
            IncomeCategory::Veteran => &mut self.veteran,
            IncomeCategory::Others => &mut self.others,
            IncomeCategory::SupportPayments => &mut self.support_payments,
            IncomeCategory::Trusts => &mut self.trusts,
            IncomeCategory::Unearned => &mut self.unearned,
            IncomeCategory::StudentFinancialAid => &mut self.studentfinancialaid,
            IncomeCategory::Fiduciaries => &mut self.fiduciaries,
            IncomeCategory::LifeInsurances => &mut self.life_insurances,
        }
    }

    pub fn sources(&self, category: IncomeCategory) -> &[S] {
        self.slot(category).as_deref().unwrap_or(&[])
    }

    /// Source list for `category`, created empty when the question was absent.
    pub fn sources_mut(&mut self, category: IncomeCategory) -> &mut Vec<S> {
        self.slot_mut(category).get_or_insert_with(Vec::new)
    }

    /// Categories that are present, in wizard order.
    pub fn present(&self) -> impl Iterator<Item = (IncomeCategory, &Vec<S>)> + '_ {
        IncomeCategory::ALL
            .into_iter()
            .filter_map(move |category| self.slot(category).as_ref().map(|list| (category, list)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_round_trip_through_serde() {
        for category in IncomeCategory::ALL {
            let json = serde_json::to_value(category).expect("serialize");
            assert_eq!(json, category.key());
            let parsed: IncomeCategory = serde_json::from_value(json).expect("parse");
            assert_eq!(parsed, category);
        }
    }

    #[test]
    fn absent_categories_are_not_serialized() {
        let mut categories: Categories<u8> = Categories::default();
        categories.sources_mut(IncomeCategory::SupportPayments).push(1);
        let json = serde_json::to_value(&categories).expect("serialize");
        assert_eq!(json, serde_json::json!({ "support_payments": [1] }));
    }
}
