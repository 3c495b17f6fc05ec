use crate::infra::print_json;
use chrono::{Local, NaiveDate, NaiveTime};
use clap::Args;
use std::path::PathBuf;
use std::sync::Arc;
use tenant_intake::error::AppError;
use tenant_intake::workflows::intake::{
    helpers, hydrate, CalendarInput, DirectoryEntry, FormController, FormObserver, FormSettings,
    FormUrls, IncomeCategory, Limits, NumericInput, PrefillFields, RentLimit, SourceContact,
    SourceForm, SourcePick, SourceRef, StateChange, Verified, WizardAction,
};

#[derive(Args, Debug)]
pub(crate) struct DemoArgs {
    /// Form settings JSON (defaults to a sample one-bedroom unit)
    #[arg(long)]
    pub(crate) settings: Option<PathBuf>,
    /// Reference date for the walk-through (defaults to today)
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) today: Option<NaiveDate>,
    /// Household income in cents checked against the limits
    #[arg(long, default_value_t = 2_080_000)]
    pub(crate) total_income: i64,
    /// Print the normalized payload after the walk-through
    #[arg(long)]
    pub(crate) show_payload: bool,
}

struct ChangePrinter;

impl FormObserver for ChangePrinter {
    fn notify(&self, change: &StateChange) {
        println!("  - {}", describe(change));
    }
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let today = args.today.unwrap_or_else(|| Local::now().date_naive());
    let settings = match args.settings.as_deref() {
        Some(path) => FormSettings::from_path(path)?,
        None => sample_settings(),
    };
    let has_directory = !settings.sources.is_empty();

    let mut controller = FormController::with_clock(settings, today.and_time(NaiveTime::default()));
    println!(
        "Tenant intake demo for {}",
        controller
            .form()
            .lihtc_property
            .as_deref()
            .unwrap_or("unassigned property")
    );

    let summary = controller.eligibility().summary(Some(args.total_income));
    println!(
        "- Income limit ${:.2} | rent limit ${:.2} | gross rent ${:.2}",
        summary.lihtc_income_limit, summary.lihtc_rent_limit, summary.gross_monthly_rent_for_unit
    );
    if let Some(check) = summary.income_check {
        println!(
            "- Household income ${:.2}: eligible {} | within 140% {}",
            check.total_income as f64 / 100.0,
            check.is_eligible,
            check.is_eligible_140
        );
    }

    println!("\nWizard walk-through");
    controller.subscribe(Arc::new(ChangePrinter));
    walk_household(&mut controller, has_directory)?;

    let head = &controller.form().applicants[0];
    println!(
        "  Head of household {} (age {})",
        helpers::first_name(&head.full_name),
        head.date_of_birth
            .as_ref()
            .and_then(|dob| helpers::age(dob, today))
            .map_or_else(|| "unknown".to_string(), |age| age.to_string())
    );

    let payload = controller.complete_application();
    println!("\nNormalized payload");
    for (index, applicant) in payload.applicants.iter().enumerate() {
        let reported: Vec<String> = applicant
            .categories
            .present()
            .map(|(category, sources)| format!("{} ({})", category.key(), sources.len()))
            .collect();
        println!(
            "- applicant {index}: {} | {}",
            if applicant.full_name.is_empty() {
                "(unnamed)"
            } else {
                applicant.full_name.as_str()
            },
            if reported.is_empty() {
                "no income reported".to_string()
            } else {
                reported.join(", ")
            }
        );
    }
    println!("- children: {}", payload.children.len());

    let restored = hydrate(&payload, today);
    let hourly = restored
        .form
        .applicants
        .first()
        .and_then(|applicant| applicant.categories.sources(IncomeCategory::Employee).first())
        .and_then(|source| source.incomes.first())
        .map(|income| income.amount.coerce())
        .unwrap_or(0.0);
    println!(
        "\nEdit flow restores {} applicants, first hourly rate ${hourly:.2}",
        restored.form.applicants.len()
    );

    if args.show_payload {
        print_json(&payload)?;
    }
    Ok(())
}

/// Head of household with one hourly job, a co-applicant and a child.
fn walk_household(controller: &mut FormController, has_directory: bool) -> Result<(), AppError> {
    if controller.form().applicants.is_empty() {
        controller.apply(WizardAction::AddApplicant)?;
    }
    {
        let head = &mut controller.form_mut().applicants[0];
        head.full_name = "Jane Doe".to_string();
        head.date_of_birth = Some(CalendarInput::new(1988, 3, 12));
    }

    let source = if has_directory {
        SourceForm {
            pk: Some(SourcePick::Key("0".to_string())),
            ..SourceForm::default()
        }
    } else {
        SourceForm::named("Acme Grocers")
    };
    let added = controller.apply(WizardAction::AddSource {
        applicant: 0,
        category: IncomeCategory::Employee,
        source: Some(source),
    })?;
    let employer = SourceRef {
        applicant: 0,
        category: IncomeCategory::Employee,
        index: match added {
            StateChange::Added { index, .. } => index,
            _ => 0,
        },
    };
    if has_directory {
        controller.apply(WizardAction::CheckAddSource { source: employer })?;
    }
    controller.apply(WizardAction::AddSourceIncomes {
        applicant: 0,
        category: IncomeCategory::Employee,
        categories: vec!["regular".to_string()],
    })?;
    controller.apply(WizardAction::UpdateVerified {
        source: employer,
        verified: Some(Verified::Employer),
    })?;

    if let Some(income) = controller.form_mut().applicants[0]
        .categories
        .sources_mut(IncomeCategory::Employee)
        .get_mut(employer.index)
        .and_then(|source| source.incomes.first_mut())
    {
        income.amount = NumericInput::from(20.0);
        income.period_per_avg = NumericInput::from(40.0);
        income.avg_per_year = NumericInput::from(52.0);
    }

    controller.apply(WizardAction::AddApplicant)?;
    controller.apply(WizardAction::SetActiveApplicant { applicant: 0 })?;
    controller.apply(WizardAction::AddFirstChild {
        node: "children".to_string(),
    })?;
    controller.apply(WizardAction::GotoStep { step: None })?;
    Ok(())
}

fn describe(change: &StateChange) -> String {
    match change {
        StateChange::Added { path, index } => format!("added {path}[{index}]"),
        StateChange::Removed { path, index } => format!("removed {path}[{index}]"),
        StateChange::Updated { path } => format!("updated {path}"),
        StateChange::ActiveApplicant { index } => format!("applicant {index} is active"),
        StateChange::Focus { step } => format!("moved to step {step}"),
        StateChange::Navigate { url } => format!("navigate to {url}"),
        StateChange::Visibility { shown, hidden } => {
            format!("shown [{}] hidden [{}]", shown.join(", "), hidden.join(", "))
        }
        StateChange::MarkedForDeletion { entries } => {
            format!("{entries} entries marked for deletion")
        }
    }
}

fn sample_settings() -> FormSettings {
    FormSettings {
        fields: PrefillFields {
            nb_bedrooms: Some(1),
            federal_income_restriction: Some(60.0),
            monthly_rent: Some(95_000),
            federal_rent_restriction: Some(60.0),
            bond_rent_restriction: Some(50.0),
            federal_rent_assistance: Some(10_000),
            non_federal_rent_assistance: Some(5_000),
            ..PrefillFields::default()
        },
        limits: Limits {
            income_100: 5_000_000,
            rent_100: vec![
                RentLimit {
                    maximum_federal_lihtc_rent: Some(100_000),
                    utility_allowance: Some(5_000),
                    non_optional_charges: Some(2_000),
                },
                RentLimit {
                    maximum_federal_lihtc_rent: Some(120_000),
                    utility_allowance: Some(7_500),
                    non_optional_charges: Some(2_500),
                },
            ],
        },
        sources: vec![DirectoryEntry {
            slug: "acme-grocers".to_string(),
            position: "Cashier".to_string(),
            name: "Acme Grocers".to_string(),
            contact: SourceContact {
                phone: "555-0100".to_string(),
                locality: "Oakland".to_string(),
                region: "CA".to_string(),
                ..SourceContact::default()
            },
        }],
        urls: FormUrls {
            add_source: Some("/app/maple-court/sources/new/".to_string()),
            ..FormUrls::default()
        },
        lihtc_property: Some("maple-court".to_string()),
        application: None,
    }
}
