use super::domain::{bank_category_label, PropertyForm};
use super::payload::{PropertyAccount, PropertyPayload, SaleCategory};

/// Annual interest above which a sale's imputed return takes over.
const IMPUTED_INTEREST_THRESHOLD: f64 = 5000.0;
/// Passbook rate applied to sale proceeds, in percent.
const IMPUTED_RATE: f64 = 2.0;

/// Cash value of the property in dollars.
///
/// A sold property is valued by the interest its proceeds earn, or the imputed
/// passbook return when that interest exceeds the threshold.
pub fn cash_value(property: &PropertyForm) -> f64 {
    if property.foreclosure {
        return 0.0;
    }
    if property.sell_price.coerce() > 0.0 {
        let first: f64 = property
            .assets
            .iter()
            .map(|account| account.amount.coerce() * account.interest_rate.coerce() / 100.0)
            .sum();
        let imputed = if first > IMPUTED_INTEREST_THRESHOLD {
            sales_proceeds(property) * IMPUTED_RATE / 100.0
        } else {
            0.0
        };
        return first.max(imputed);
    }
    property.amount.coerce() - property.reverse_mortgage.coerce()
}

pub fn sales_proceeds(property: &PropertyForm) -> f64 {
    if property.foreclosure {
        return 0.0;
    }
    property.sell_price.coerce() - property.total_mortgage.coerce() - property.sell_closing_cost.coerce()
}

/// Rental income in dollars, never below the cash value.
pub fn rental_income(property: &PropertyForm) -> f64 {
    let monthly = property.rent_collected.coerce()
        - property.monthly_mortgage.coerce()
        - property.maintenance.coerce();
    cash_value(property).max(monthly)
}

pub fn sale_category(property: &PropertyForm) -> Option<SaleCategory> {
    if property.sell_price.coerce() <= 0.0 {
        return None;
    }
    Some(if property.foreclosure {
        SaleCategory::Foreclosure
    } else if property.short_sale {
        SaleCategory::ShortSale
    } else {
        SaleCategory::NormalSale
    })
}

/// Sentence recorded with the property so reviewers see the case that applied.
pub fn describe(property: &PropertyForm) -> String {
    let sell_price = property.sell_price.coerce();
    if sell_price > 0.0 {
        let sold_on = property
            .sell_at
            .to_date()
            .map(|date| date.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| "an unknown date".to_string());
        let mut descr = format!(
            "Sold real-estate on {sold_on} for ${} with ${} owed mortgage and ${} of closing cost.",
            dollars(sell_price),
            dollars(property.total_mortgage.coerce()),
            dollars(property.sell_closing_cost.coerce()),
        );
        for account in &property.assets {
            let bank = bank_category_label(&account.category).unwrap_or(account.category.as_str());
            descr.push_str(&format!(
                " {} deposited in a {}% {bank} at {}.",
                dollars(account.amount.coerce()),
                dollars(account.interest_rate.coerce()),
                account.name.as_deref().unwrap_or_default(),
            ));
        }
        return descr;
    }

    let rent_collected = property.rent_collected.coerce();
    if rent_collected != 0.0 {
        return format!(
            "Real-estate rented for ${} monthly less a mortgage of ${} and maintenance costs of ${} ({}).",
            dollars(rent_collected),
            dollars(property.monthly_mortgage.coerce()),
            dollars(property.maintenance.coerce()),
            property.descr,
        );
    }

    let reverse_mortgage = property.reverse_mortgage.coerce();
    if reverse_mortgage > 0.0 {
        return format!(
            "Balance of ${} on a reverse mortgage for a property value of ${} ({}).",
            dollars(reverse_mortgage),
            dollars(property.amount.coerce()),
            property.descr,
        );
    }

    property.descr.clone()
}

/// Property row as sent to the backend, still in dollars.
pub fn to_payload(property: &PropertyForm) -> PropertyPayload {
    PropertyPayload {
        amount: property.amount.coerce(),
        descr: describe(property),
        rent_collected: property.rent_collected.coerce(),
        monthly_mortgage: property.monthly_mortgage.coerce(),
        maintenance: property.maintenance.coerce(),
        reverse_mortgage: property.reverse_mortgage.coerce(),
        sell_at: property.sell_at.to_date(),
        sell_price: property.sell_price.coerce(),
        total_mortgage: property.total_mortgage.coerce(),
        sell_closing_cost: property.sell_closing_cost.coerce(),
        foreclosure: property.foreclosure,
        short_sale: property.short_sale,
        category: sale_category(property),
        assets: property
            .assets
            .iter()
            .map(|account| PropertyAccount {
                category: account.category.clone(),
                name: account.name.clone(),
                amount: account.amount.coerce(),
                interest_rate: account.interest_rate.coerce(),
            })
            .collect(),
    }
}

fn dollars(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        format!("{value:.2}")
    }
}
