use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Pay period attached to an income entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Period {
    Other,
    Hourly,
    Daily,
    Weekly,
    BiWeekly,
    SemiMonthly,
    #[default]
    Monthly,
    Yearly,
}

impl Period {
    pub const ALL: [Period; 8] = [
        Period::Other,
        Period::Hourly,
        Period::Daily,
        Period::Weekly,
        Period::BiWeekly,
        Period::SemiMonthly,
        Period::Monthly,
        Period::Yearly,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Period::Other => "other",
            Period::Hourly => "hourly",
            Period::Daily => "daily",
            Period::Weekly => "weekly",
            Period::BiWeekly => "bi-weekly",
            Period::SemiMonthly => "semi-monthly",
            Period::Monthly => "monthly",
            Period::Yearly => "yearly",
        }
    }

    /// Plural noun used in "N <nouns> per ..." sentences.
    pub const fn nouns(self) -> &'static str {
        match self {
            Period::Other => "other",
            Period::Hourly => "hours",
            Period::Daily => "days",
            Period::Weekly => "weeks",
            Period::BiWeekly => "bi-weeklies",
            Period::SemiMonthly => "1/2-months",
            Period::Monthly => "months",
            Period::Yearly => "out",
        }
    }

    /// Label for the `period_per_avg` input.
    pub const fn per_natural_label(self) -> &'static str {
        match self {
            Period::Daily => "days per week",
            _ => "hours per week",
        }
    }

    /// Label for the `avg_per_year` input.
    pub const fn per_year_label(self) -> &'static str {
        match self {
            Period::Other => "days per year",
            Period::Hourly | Period::Daily | Period::Weekly => "weeks per year",
            Period::BiWeekly => "bi-weeklies per year",
            Period::SemiMonthly => "1/2-months per year",
            Period::Monthly => "months per year",
            Period::Yearly => "yearly fraction",
        }
    }

    /// Hourly and daily rates need an explicit hours/days-per-week figure.
    pub const fn is_rate(self) -> bool {
        matches!(self, Period::Hourly | Period::Daily)
    }

    /// Number of natural averaging units in a year for this period.
    ///
    /// `Other` counts days, so the answer depends on `year`.
    pub fn natural_avg_per_year(self, year: i32) -> u32 {
        match self {
            Period::Hourly | Period::Daily | Period::Weekly => 52,
            Period::BiWeekly | Period::SemiMonthly => 26,
            Period::Monthly => 12,
            Period::Yearly => 1,
            Period::Other => days_in_year(year),
        }
    }
}

pub fn days_in_year(year: i32) -> u32 {
    if year % 4 != 0 || (year % 100 == 0 && year % 400 != 0) {
        365
    } else {
        366
    }
}

/// Days covered by `[starts_at, ends_at]`, both ends included.
pub fn inclusive_days(starts_at: NaiveDate, ends_at: NaiveDate) -> i64 {
    (ends_at - starts_at).num_days() + 1
}
