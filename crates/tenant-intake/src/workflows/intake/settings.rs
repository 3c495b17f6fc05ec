use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::calendar;
use super::domain::SourceContact;
use super::payload::ApplicationPayload;

/// Configuration object handed to the wizard at construction.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FormSettings {
    #[serde(default)]
    pub fields: PrefillFields,
    #[serde(default)]
    pub limits: Limits,
    #[serde(default)]
    pub sources: Vec<DirectoryEntry>,
    #[serde(default)]
    pub urls: FormUrls,
    #[serde(default, alias = "lihtcProperty", skip_serializing_if = "Option::is_none")]
    pub lihtc_property: Option<String>,
    /// Existing application for the edit flow; absent for a new tenant.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub application: Option<ApplicationPayload>,
}

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("unable to read form settings from {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("form settings are not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

impl FormSettings {
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, SettingsError> {
        Ok(serde_json::from_reader(reader)?)
    }

    pub fn from_path(path: &Path) -> Result<Self, SettingsError> {
        let file = File::open(path).map_err(|source| SettingsError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_reader(BufReader::new(file))
    }

    pub fn is_edit_flow(&self) -> bool {
        self.application.is_some()
    }
}

/// Unit figures pre-filled by the server. Money fields are cents.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PrefillFields {
    #[serde(default)]
    pub nb_bedrooms: Option<usize>,
    #[serde(default)]
    pub federal_income_restriction: Option<f64>,
    #[serde(default)]
    pub monthly_rent: Option<i64>,
    #[serde(default)]
    pub federal_rent_restriction: Option<f64>,
    #[serde(default)]
    pub bond_rent_restriction: Option<f64>,
    #[serde(default)]
    pub federal_rent_assistance: Option<i64>,
    #[serde(default)]
    pub non_federal_rent_assistance: Option<i64>,
    #[serde(
        default,
        with = "calendar::optional_date",
        skip_serializing_if = "Option::is_none"
    )]
    pub effective_date: Option<NaiveDate>,
    #[serde(
        default,
        with = "calendar::optional_date",
        skip_serializing_if = "Option::is_none"
    )]
    pub move_in_date: Option<NaiveDate>,
}

/// Static area-median tables, in cents.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Limits {
    /// Annual income at 100% of area median.
    #[serde(default)]
    pub income_100: i64,
    /// Rent figures indexed by bedroom count.
    #[serde(default)]
    pub rent_100: Vec<RentLimit>,
}

impl Limits {
    /// Row for `nb_bedrooms`; a missing row reads as all zeros.
    pub fn rent_for(&self, nb_bedrooms: usize) -> RentLimit {
        self.rent_100.get(nb_bedrooms).cloned().unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RentLimit {
    #[serde(default)]
    pub maximum_federal_lihtc_rent: Option<i64>,
    #[serde(default)]
    pub utility_allowance: Option<i64>,
    #[serde(default)]
    pub non_optional_charges: Option<i64>,
}

/// Employer or agency offered in the source picker.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DirectoryEntry {
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub position: String,
    #[serde(default)]
    pub name: String,
    #[serde(flatten)]
    pub contact: SourceContact,
}

/// Endpoints the wizard and list views talk to; relative paths resolve against the backend URL.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FormUrls {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub add_source: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_items: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_document_upload: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_credentials: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_application_resident: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub application_detail: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_settings_with_sparse_tables() {
        let raw = r#"{
            "fields": {"nb_bedrooms": 2, "federal_income_restriction": 60, "monthly_rent": 125050},
            "limits": {
                "income_100": 5000000,
                "rent_100": [
                    {"maximum_federal_lihtc_rent": 100000},
                    {"maximum_federal_lihtc_rent": 120000, "utility_allowance": null}
                ]
            },
            "sources": [{"slug": "acme", "name": "Acme", "phone": "555-0100"}],
            "lihtcProperty": "maple-court"
        }"#;
        let settings = FormSettings::from_reader(raw.as_bytes()).expect("parse settings");

        assert_eq!(settings.fields.nb_bedrooms, Some(2));
        assert_eq!(settings.limits.income_100, 5_000_000);
        assert_eq!(settings.limits.rent_for(1).utility_allowance, None);
        assert_eq!(settings.limits.rent_for(5), RentLimit::default());
        assert_eq!(settings.sources[0].contact.phone, "555-0100");
        assert_eq!(settings.lihtc_property.as_deref(), Some("maple-court"));
        assert!(!settings.is_edit_flow());
    }

    #[test]
    fn missing_file_reports_path() {
        let err = FormSettings::from_path(Path::new("/nonexistent/form.json"))
            .expect_err("missing file");
        assert!(err.to_string().contains("/nonexistent/form.json"));
    }
}
