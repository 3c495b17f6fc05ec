use crate::infra::{load_settings, print_json, read_json};
use chrono::{Local, NaiveDate};
use clap::Args;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::PathBuf;
use tenant_intake::config::AppConfig;
use tenant_intake::error::AppError;
use tenant_intake::telemetry;
use tenant_intake::workflows::intake::{
    import_rent_limits, parent_listing_path, ApplicationForm, ApplicationPayload,
    EligibilityCalculator, ErrorReport, IntakeClient, Limits, SubmissionNormalizer, SubmitError,
    SubmitMethod, SubmitOutcome,
};
use tracing::info;

#[derive(Args, Debug, Default)]
pub(crate) struct EligibilityArgs {
    /// Form settings JSON (defaults to APP_FORM_SETTINGS)
    #[arg(long)]
    pub(crate) settings: Option<PathBuf>,
    /// Household income in cents to check against the limits
    #[arg(long)]
    pub(crate) total_income: Option<i64>,
}

#[derive(Args, Debug, Default)]
pub(crate) struct NormalizeArgs {
    /// Form document JSON (reads standard input when omitted)
    #[arg(long)]
    pub(crate) input: Option<PathBuf>,
    /// Notes that replace every entry description
    #[arg(long)]
    pub(crate) notes: Option<String>,
    /// Reference date for natural period averages (defaults to today)
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) today: Option<NaiveDate>,
}

#[derive(Args, Debug)]
pub(crate) struct SubmitArgs {
    /// Endpoint receiving the application, relative to APP_BACKEND_URL
    #[arg(long)]
    pub(crate) url: String,
    /// Form document JSON (reads standard input when omitted)
    #[arg(long)]
    pub(crate) input: Option<PathBuf>,
    /// Update a stored application instead of creating one
    #[arg(long)]
    pub(crate) update: bool,
    /// Page the form was opened on; an update continues on the listing above it
    #[arg(long)]
    pub(crate) page: Option<String>,
    /// Notes that replace every entry description
    #[arg(long)]
    pub(crate) notes: Option<String>,
}

#[derive(Args, Debug)]
pub(crate) struct LimitsImportArgs {
    /// CSV export with nb_bedrooms and rent columns in cents
    #[arg(long)]
    pub(crate) csv: PathBuf,
    /// Annual income at 100% of area median, in cents
    #[arg(long)]
    pub(crate) income_100: Option<i64>,
}

pub(crate) fn run_eligibility(args: EligibilityArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let settings = load_settings(args.settings.as_deref(), &config.intake)?;
    let summary = EligibilityCalculator::from_settings(&settings).summary(args.total_income);
    print_json(&summary)
}

pub(crate) fn run_normalize(args: NormalizeArgs) -> Result<(), AppError> {
    let form: ApplicationForm = read_json(args.input.as_deref())?;
    let today = args.today.unwrap_or_else(|| Local::now().date_naive());
    print_json(&normalize_form(&form, today, args.notes))
}

pub(crate) async fn run_submit(args: SubmitArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;

    let form: ApplicationForm = read_json(args.input.as_deref())?;
    let payload = normalize_form(&form, Local::now().date_naive(), args.notes);
    let client = IntakeClient::new(config.intake.clone()).map_err(SubmitError::from)?;
    let method = submit_method(args.update);

    match client.submit(&args.url, method, &payload).await {
        Ok(SubmitOutcome::Redirect(location)) => println!("Submitted, continue at {location}"),
        Ok(SubmitOutcome::Markup(body)) => println!("{body}"),
        Ok(SubmitOutcome::Updated) => {
            let page = args.page.as_deref().unwrap_or(&args.url);
            println!("Updated, continue at {}", parent_listing_path(page));
        }
        Err(err) => {
            if let Some(report) = err.report() {
                eprint!("{}", render_report(report));
            }
            return Err(err.into());
        }
    }
    Ok(())
}

pub(crate) fn run_limits_import(args: LimitsImportArgs) -> Result<(), AppError> {
    let file = File::open(&args.csv)?;
    let limits = limits_table(BufReader::new(file), args.income_100.unwrap_or(0))?;
    info!(path = %args.csv.display(), rows = limits.rent_100.len(), "converted rent table");
    print_json(&limits)
}

pub(crate) fn normalize_form(
    form: &ApplicationForm,
    today: NaiveDate,
    notes: Option<String>,
) -> ApplicationPayload {
    SubmissionNormalizer::new(today)
        .with_notes(notes)
        .normalize(form)
}

fn submit_method(update: bool) -> SubmitMethod {
    if update {
        SubmitMethod::Update
    } else {
        SubmitMethod::Create
    }
}

fn limits_table<R: Read>(reader: R, income_100: i64) -> Result<Limits, AppError> {
    Ok(Limits {
        income_100,
        rent_100: import_rent_limits(reader)?,
    })
}

/// Banner followed by one line per decorated field.
pub(crate) fn render_report(report: &ErrorReport) -> String {
    let mut out = format!("{}\n", report.banner.message());
    for decoration in &report.decorations {
        out.push_str(&format!(
            "  - {}: {}\n",
            decoration.path(),
            decoration.messages.join(" ")
        ));
    }
    out
}
