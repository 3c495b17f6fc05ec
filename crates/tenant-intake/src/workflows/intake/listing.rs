use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::calendar;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

impl SortDirection {
    pub const fn as_str(self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }
}

/// Server-side defaults for the application list view.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ListDefaults {
    #[serde(default)]
    pub sort_by_field: Option<String>,
    #[serde(default)]
    pub sort_direction: Option<SortDirection>,
    #[serde(default, with = "calendar::optional_datetime")]
    pub start_at: Option<NaiveDateTime>,
    #[serde(default, with = "calendar::optional_datetime")]
    pub ends_at: Option<NaiveDateTime>,
    #[serde(default)]
    pub items_per_page: Option<u32>,
}

/// Query string state of the application list: sort, filter, page and date range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListQuery {
    pub o: String,
    pub ot: SortDirection,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub q: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(
        default,
        with = "calendar::optional_datetime",
        skip_serializing_if = "Option::is_none"
    )]
    pub start_at: Option<NaiveDateTime>,
    #[serde(
        default,
        with = "calendar::optional_datetime",
        skip_serializing_if = "Option::is_none"
    )]
    pub ends_at: Option<NaiveDateTime>,
}

impl Default for ListQuery {
    fn default() -> Self {
        Self::from_defaults(&ListDefaults::default())
    }
}

impl ListQuery {
    pub fn from_defaults(defaults: &ListDefaults) -> Self {
        let (o, ot) = match &defaults.sort_by_field {
            Some(field) => (field.clone(), defaults.sort_direction.unwrap_or_default()),
            None => ("created_at".to_string(), SortDirection::Desc),
        };
        Self {
            o,
            ot,
            q: None,
            page: None,
            start_at: defaults.start_at,
            ends_at: defaults.ends_at,
        }
    }

    /// Sorts by `field`, flipping direction when it is already the ascending key.
    pub fn sort_by(&mut self, field: &str) {
        let ascending = self.o == field && self.ot == SortDirection::Asc;
        self.o = field.to_string();
        self.ot = if ascending {
            SortDirection::Desc
        } else {
            SortDirection::Asc
        };
        self.page = None;
    }

    /// Filters on `expr`; a new filter always restarts at the first page.
    pub fn filter(&mut self, expr: Option<&str>) {
        match expr.filter(|expr| !expr.is_empty()) {
            Some(expr) => {
                self.page = None;
                self.q = Some(expr.to_string());
            }
            None => self.q = None,
        }
    }

    pub fn page_changed(&mut self, current_page: u32) {
        self.page = (current_page > 1).then_some(current_page);
    }

    /// Moves the range start, dragging the end along if it would precede it.
    pub fn set_start_at(&mut self, start_at: NaiveDateTime) {
        self.start_at = Some(start_at);
        if self.ends_at.is_some_and(|ends_at| ends_at < start_at) {
            self.ends_at = Some(start_at);
        }
    }

    /// Moves the range end, dragging the start along if it would follow it.
    pub fn set_ends_at(&mut self, ends_at: NaiveDateTime) {
        self.ends_at = Some(ends_at);
        if self.start_at.is_some_and(|start_at| start_at > ends_at) {
            self.start_at = Some(ends_at);
        }
    }

    pub fn current_page(&self) -> u32 {
        self.page.unwrap_or(1)
    }

    /// Query pairs in request order; `force` bypasses backend reconciliation.
    pub fn to_pairs(&self, force: bool) -> Vec<(&'static str, String)> {
        let mut pairs = vec![("o", self.o.clone()), ("ot", self.ot.as_str().to_string())];
        if let Some(q) = &self.q {
            pairs.push(("q", q.clone()));
        }
        if let Some(page) = self.page {
            pairs.push(("page", page.to_string()));
        }
        if let Some(start_at) = &self.start_at {
            pairs.push(("start_at", start_at.format("%Y-%m-%dT%H:%M:%S").to_string()));
        }
        if let Some(ends_at) = &self.ends_at {
            pairs.push(("ends_at", ends_at.format("%Y-%m-%dT%H:%M:%S").to_string()));
        }
        if force {
            pairs.push(("force", "1".to_string()));
        }
        pairs
    }

    /// "3 days ago" or "2 months left", measured from the range end or `now`.
    pub fn relative_date(&self, at_time: NaiveDateTime, now: NaiveDateTime) -> String {
        let cut_off = self.ends_at.unwrap_or(now);
        if at_time <= cut_off {
            format!("{} ago", humanize((cut_off - at_time).num_seconds()))
        } else {
            format!("{} left", humanize((at_time - cut_off).num_seconds()))
        }
    }
}

fn humanize(seconds: i64) -> String {
    let seconds = seconds.abs() as f64;
    let minutes = (seconds / 60.0).round();
    let hours = (seconds / 3600.0).round();
    let days = (seconds / 86400.0).round();
    let months = (seconds / (86400.0 * 30.4)).round();
    let years = (seconds / (86400.0 * 365.0)).round();

    if seconds < 45.0 {
        "a few seconds".to_string()
    } else if seconds < 90.0 {
        "a minute".to_string()
    } else if minutes < 45.0 {
        format!("{minutes} minutes")
    } else if minutes < 90.0 {
        "an hour".to_string()
    } else if hours < 22.0 {
        format!("{hours} hours")
    } else if hours < 36.0 {
        "a day".to_string()
    } else if days < 26.0 {
        format!("{days} days")
    } else if days < 45.0 {
        "a month".to_string()
    } else if days < 320.0 {
        format!("{months} months")
    } else if days < 548.0 {
        "a year".to_string()
    } else {
        format!("{years} years")
    }
}

/// One page of applications as returned by the list endpoint.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ListPage {
    #[serde(default)]
    pub count: u64,
    #[serde(default)]
    pub results: Vec<serde_json::Value>,
}
