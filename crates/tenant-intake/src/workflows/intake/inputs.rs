//! Permissive wrappers around values typed into form controls.
//!
//! Bound inputs hold whatever the user typed: a number, free text, or nothing.
//! Malformed numbers are never an error; they coerce to zero at submission.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use super::calendar;

/// Numeric control value, kept as typed until the document is normalized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NumericInput {
    Number(f64),
    Text(String),
    Blank,
}

impl Default for NumericInput {
    fn default() -> Self {
        NumericInput::Text(String::new())
    }
}

impl From<f64> for NumericInput {
    fn from(value: f64) -> Self {
        NumericInput::Number(value)
    }
}

impl From<i64> for NumericInput {
    fn from(value: i64) -> Self {
        NumericInput::Number(value as f64)
    }
}

impl From<&str> for NumericInput {
    fn from(value: &str) -> Self {
        NumericInput::Text(value.to_string())
    }
}

impl NumericInput {
    pub fn zero() -> Self {
        NumericInput::Number(0.0)
    }

    /// The numeric value when the input reads as a finite number.
    pub fn value(&self) -> Option<f64> {
        match self {
            NumericInput::Number(value) if value.is_finite() => Some(*value),
            NumericInput::Number(_) | NumericInput::Blank => None,
            NumericInput::Text(text) => text
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|value| value.is_finite()),
        }
    }

    pub fn is_numeric(&self) -> bool {
        self.value().is_some()
    }

    /// Value with non-numeric input treated as zero.
    pub fn coerce(&self) -> f64 {
        self.value().unwrap_or(0.0)
    }

    /// Display units to storage units: `round(value * 100)`.
    pub fn to_cents(&self) -> i64 {
        to_cents(self.coerce())
    }
}

pub fn to_cents(value: f64) -> i64 {
    round_half_up(value * 100.0) as i64
}

/// Rounds halves toward positive infinity (`-12.5` becomes `-12`).
pub fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}

pub fn from_cents(value: i64) -> f64 {
    value as f64 / 100.0
}

/// Value of a `<select>` holding an enumerated code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ChoiceInput {
    Code(i64),
    Text(String),
}

impl Default for ChoiceInput {
    fn default() -> Self {
        ChoiceInput::Text(String::new())
    }
}

impl ChoiceInput {
    /// Integer code, or `None` for an empty or unreadable selection.
    ///
    /// Text reads its leading integer the way the select values are written
    /// (`"3"`, `"12 - other"`).
    pub fn code(&self) -> Option<i64> {
        match self {
            ChoiceInput::Code(code) => Some(*code),
            ChoiceInput::Text(text) => leading_integer(text),
        }
    }
}

fn leading_integer(text: &str) -> Option<i64> {
    let trimmed = text.trim_start();
    let end = trimmed
        .char_indices()
        .find(|(idx, ch)| !(ch.is_ascii_digit() || (*idx == 0 && (*ch == '-' || *ch == '+'))))
        .map(|(idx, _)| idx)
        .unwrap_or(trimmed.len());
    trimmed[..end].parse().ok()
}

/// Year / month / day selects. `month` is zero-based like the select options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarInput {
    #[serde(default)]
    pub year: NumericInput,
    #[serde(default)]
    pub month: NumericInput,
    #[serde(default)]
    pub day: NumericInput,
}

impl CalendarInput {
    pub fn new(year: i32, month0: u32, day: u32) -> Self {
        Self {
            year: NumericInput::from(year as i64),
            month: NumericInput::Text(month0.to_string()),
            day: NumericInput::from(day as i64),
        }
    }

    /// Unset year selection, January 1st.
    pub fn blank() -> Self {
        Self {
            year: NumericInput::default(),
            month: NumericInput::Text("0".to_string()),
            day: NumericInput::from(1_i64),
        }
    }

    pub fn to_date(&self) -> Option<NaiveDate> {
        let year = self.year.value()?;
        let month0 = self.month.value().unwrap_or(0.0);
        let day = self.day.value().unwrap_or(1.0);
        if year.fract() != 0.0 || month0 < 0.0 || day < 1.0 {
            return None;
        }
        NaiveDate::from_ymd_opt(year as i32, month0 as u32 + 1, day as u32)
    }

    pub fn to_datetime(&self) -> Option<NaiveDateTime> {
        self.to_date().and_then(|date| date.and_hms_opt(0, 0, 0))
    }
}

impl From<NaiveDate> for CalendarInput {
    fn from(date: NaiveDate) -> Self {
        use chrono::Datelike;
        Self::new(date.year(), date.month0(), date.day())
    }
}

/// Date picker binding: the chosen moment plus whether the popup is open.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatePicker {
    #[serde(default)]
    pub opened: bool,
    #[serde(with = "calendar::datetime")]
    pub val: NaiveDateTime,
}

impl DatePicker {
    pub fn closed(val: NaiveDateTime) -> Self {
        Self { opened: false, val }
    }
}

/// Reads a blank string or null as `None` before handing the value to `T`.
pub(crate) fn blank_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: serde::Deserializer<'de>,
    T: serde::de::DeserializeOwned,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    match value {
        None | Some(serde_json::Value::Null) => Ok(None),
        Some(serde_json::Value::String(text)) if text.trim().is_empty() => Ok(None),
        Some(other) => serde_json::from_value(other)
            .map(Some)
            .map_err(serde::de::Error::custom),
    }
}
