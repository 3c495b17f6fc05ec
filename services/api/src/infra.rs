use chrono::NaiveDate;
use metrics_exporter_prometheus::PrometheusHandle;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs::File;
use std::io::{self, BufReader};
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tenant_intake::config::IntakeConfig;
use tenant_intake::error::AppError;
use tenant_intake::workflows::intake::FormSettings;
use tracing::info;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Form settings from `path`, else the configured file, else an empty configuration.
pub(crate) fn load_settings(
    path: Option<&Path>,
    intake: &IntakeConfig,
) -> Result<FormSettings, AppError> {
    match path.or(intake.form_settings.as_deref()) {
        Some(path) => {
            let settings = FormSettings::from_path(path)?;
            info!(path = %path.display(), edit = settings.is_edit_flow(), "loaded form settings");
            Ok(settings)
        }
        None => Ok(FormSettings::default()),
    }
}

/// Reads a JSON document from `path`, or standard input when absent.
pub(crate) fn read_json<T: DeserializeOwned>(path: Option<&Path>) -> Result<T, AppError> {
    let value = match path {
        Some(path) => serde_json::from_reader(BufReader::new(File::open(path)?))?,
        None => serde_json::from_reader(io::stdin().lock())?,
    };
    Ok(value)
}

pub(crate) fn print_json<T: Serialize>(value: &T) -> Result<(), AppError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dates_parse_from_iso_strings() {
        assert_eq!(
            parse_date(" 2026-10-16 "),
            Ok(NaiveDate::from_ymd_opt(2026, 10, 16).expect("valid date"))
        );
        assert!(parse_date("10/16/2026").is_err());
    }

    #[test]
    fn settings_fall_back_to_empty_configuration() {
        let settings = load_settings(None, &IntakeConfig::default()).expect("defaults load");
        assert_eq!(settings, FormSettings::default());
    }

    #[test]
    fn missing_settings_file_is_reported() {
        let err = load_settings(
            Some(Path::new("/nonexistent/form-settings.json")),
            &IntakeConfig::default(),
        )
        .expect_err("file is missing");
        assert!(matches!(err, AppError::Settings(_)));
    }
}
