use std::collections::BTreeSet;
use std::sync::Arc;

use chrono::{Datelike, NaiveDateTime};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::categories::IncomeCategory;
use super::domain::{
    AddressForm, ApplicantForm, ApplicationForm, AssetForm, CashOnHandForm, ChildForm,
    DocumentLink, IncomeForm, MaritalStatus, PropertyForm, SourceForm, Verified, BANK_CD, CHILD,
    HEAD_OF_HOUSEHOLD,
};
use super::eligibility::EligibilityCalculator;
use super::helpers::{has_implicit_period, two_years_before};
use super::hydrate::{blank_student_status, hydrate};
use super::inputs::{CalendarInput, ChoiceInput, DatePicker, NumericInput};
use super::normalizer::{mark_for_deletion, SubmissionNormalizer};
use super::payload::ApplicationPayload;
use super::period::Period;
use super::settings::FormSettings;

/// Wizard pages in the order the applicant walks through them.
pub const DEFAULT_STEPS: [&str; 8] = [
    "household",
    "past-addresses",
    "student-status",
    "employment",
    "benefits",
    "other-income",
    "assets",
    "review",
];

/// Printable name given to a document right after upload.
pub const RECENT_UPLOAD: &str = "recent upload";

/// Receives a description of every change applied to the document.
pub trait FormObserver: Send + Sync {
    fn notify(&self, change: &StateChange);
}

/// Locates one source inside an applicant's category list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceRef {
    pub applicant: usize,
    pub category: IncomeCategory,
    pub index: usize,
}

/// Repeated collection an element can be removed from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "collection", rename_all = "snake_case")]
pub enum CollectionRef {
    Applicants,
    Children,
    PastAddresses { applicant: usize },
    Sources { applicant: usize, category: IncomeCategory },
    Incomes { source: SourceRef },
    Assets { source: SourceRef },
    Properties { applicant: usize },
    PropertyAccounts { applicant: usize, property: usize },
}

/// User intent applied to the document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum WizardAction {
    AddApplicant,
    SetActiveApplicant {
        applicant: usize,
    },
    AddChild,
    /// Adds a child and reveals the children section.
    AddFirstChild {
        node: String,
    },
    AddPastAddress {
        applicant: usize,
    },
    RemoveAtIndex {
        target: CollectionRef,
        index: usize,
    },
    SetMaritalStatus {
        applicant: usize,
        status: MaritalStatus,
    },
    AddSource {
        applicant: usize,
        category: IncomeCategory,
        #[serde(default)]
        source: Option<SourceForm>,
    },
    AddSupportPayment {
        applicant: usize,
        category: IncomeCategory,
    },
    AddOtherPayment {
        applicant: usize,
        category: IncomeCategory,
    },
    /// One hourly income row per wage category on the most recent source.
    AddSourceIncomes {
        applicant: usize,
        category: IncomeCategory,
        categories: Vec<String>,
    },
    AddSourceAssets {
        applicant: usize,
        category: IncomeCategory,
        categories: Vec<String>,
    },
    AddPropertyAccount {
        applicant: usize,
        property: usize,
    },
    CheckAddSource {
        source: SourceRef,
    },
    UpdateVerified {
        source: SourceRef,
        #[serde(default)]
        verified: Option<Verified>,
    },
    PeriodUpdated {
        source: SourceRef,
        income: usize,
        period: Period,
    },
    DocumentUploaded {
        location: String,
    },
    GotoStep {
        #[serde(default)]
        step: Option<String>,
    },
    ShowNode {
        name: String,
    },
    HideNode {
        name: String,
    },
    /// Shows `name` after hiding every node in `hidden`.
    ActiveNode {
        name: String,
        hidden: Vec<String>,
    },
    /// Marks every entry of the active applicant for deletion.
    DeleteEntry,
}

/// What an action did, as reported to observers and API callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "change", rename_all = "snake_case")]
pub enum StateChange {
    Added { path: String, index: usize },
    Removed { path: String, index: usize },
    Updated { path: String },
    ActiveApplicant { index: usize },
    Focus { step: String },
    Navigate { url: String },
    Visibility { shown: Vec<String>, hidden: Vec<String> },
    MarkedForDeletion { entries: usize },
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum WizardError {
    #[error("applicant {0} does not exist")]
    UnknownApplicant(usize),
    #[error("{path} has no element at index {index}")]
    IndexOutOfRange { path: String, index: usize },
    #[error("{0} has no source to extend")]
    NoSource(String),
    #[error("source directory has no entry for the selected source")]
    UnknownDirectoryEntry,
    #[error("no add-source URL is configured")]
    MissingAddSourceUrl,
    #[error("no applicant is active")]
    NoActiveApplicant,
    #[error("unknown wizard step '{0}'")]
    UnknownStep(String),
}

/// Owns the application document and applies wizard actions to it.
pub struct FormController {
    form: ApplicationForm,
    settings: FormSettings,
    notes: Option<String>,
    active_applicant: Option<usize>,
    steps: Vec<String>,
    current_step: usize,
    hidden: BTreeSet<String>,
    now: NaiveDateTime,
    observers: Vec<Arc<dyn FormObserver>>,
}

impl FormController {
    pub fn new(settings: FormSettings) -> Self {
        Self::with_clock(settings, chrono::Local::now().naive_local())
    }

    /// Builds the controller as of `now`: the stored application is hydrated
    /// for editing, otherwise a new document starts with one applicant.
    pub fn with_clock(settings: FormSettings, now: NaiveDateTime) -> Self {
        let mut controller = Self {
            form: ApplicationForm {
                lihtc_property: settings.lihtc_property.clone(),
                ..ApplicationForm::default()
            },
            settings,
            notes: None,
            active_applicant: None,
            steps: DEFAULT_STEPS.iter().map(|step| step.to_string()).collect(),
            current_step: 0,
            hidden: BTreeSet::new(),
            now,
            observers: Vec::new(),
        };

        match controller.settings.application.as_ref() {
            Some(stored) => {
                let hydrated = hydrate(stored, now.date());
                controller.form = hydrated.form;
                controller.notes = Some(hydrated.notes);
                controller.active_applicant = hydrated.active_applicant;
            }
            None => {
                controller.add_applicant();
            }
        }
        controller
    }

    pub fn with_steps(mut self, steps: Vec<String>) -> Self {
        self.steps = steps;
        self.current_step = 0;
        self
    }

    /// Rebuilds a controller around a document snapshot, without seeding defaults.
    pub fn from_snapshot(form: ApplicationForm, settings: FormSettings, now: NaiveDateTime) -> Self {
        let active_applicant = form.applicants.len().checked_sub(1);
        Self {
            form,
            settings,
            notes: None,
            active_applicant,
            steps: DEFAULT_STEPS.iter().map(|step| step.to_string()).collect(),
            current_step: 0,
            hidden: BTreeSet::new(),
            now,
            observers: Vec::new(),
        }
    }

    /// Makes `applicant` the active one without notifying observers.
    pub fn with_active_applicant(mut self, applicant: usize) -> Result<Self, WizardError> {
        self.applicant(applicant)?;
        self.active_applicant = Some(applicant);
        Ok(self)
    }

    pub fn subscribe(&mut self, observer: Arc<dyn FormObserver>) {
        self.observers.push(observer);
    }

    pub fn form(&self) -> &ApplicationForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut ApplicationForm {
        &mut self.form
    }

    pub fn into_form(self) -> ApplicationForm {
        self.form
    }

    pub fn settings(&self) -> &FormSettings {
        &self.settings
    }

    pub fn notes(&self) -> Option<&str> {
        self.notes.as_deref()
    }

    /// Notes replace entry descriptions on the next submission.
    pub fn set_notes(&mut self, notes: impl Into<String>) {
        self.notes = Some(notes.into());
    }

    pub fn active_applicant(&self) -> Option<usize> {
        self.active_applicant
    }

    pub fn current_step(&self) -> Option<&str> {
        self.steps.get(self.current_step).map(String::as_str)
    }

    pub fn is_hidden(&self, name: &str) -> bool {
        self.hidden.contains(name)
    }

    pub fn set_now(&mut self, now: NaiveDateTime) {
        self.now = now;
    }

    pub fn eligibility(&self) -> EligibilityCalculator {
        EligibilityCalculator::from_settings(&self.settings)
    }

    pub fn normalizer(&self) -> SubmissionNormalizer {
        SubmissionNormalizer::new(self.now.date()).with_notes(self.notes.clone())
    }

    /// The payload the next submission would send.
    pub fn complete_application(&self) -> ApplicationPayload {
        self.normalizer().normalize(&self.form)
    }

    /// Applies `action`, notifies observers and returns the change.
    pub fn apply(&mut self, action: WizardAction) -> Result<StateChange, WizardError> {
        debug!(?action, "applying wizard action");
        let change = self.dispatch(action)?;
        for observer in &self.observers {
            observer.notify(&change);
        }
        Ok(change)
    }

    fn dispatch(&mut self, action: WizardAction) -> Result<StateChange, WizardError> {
        match action {
            WizardAction::AddApplicant => Ok(self.add_applicant()),
            WizardAction::SetActiveApplicant { applicant } => {
                self.applicant(applicant)?;
                self.active_applicant = Some(applicant);
                Ok(StateChange::ActiveApplicant { index: applicant })
            }
            WizardAction::AddChild => Ok(self.add_child()),
            WizardAction::AddFirstChild { node } => {
                self.add_child();
                Ok(self.show_node(node))
            }
            WizardAction::AddPastAddress { applicant } => self.add_past_address(applicant),
            WizardAction::RemoveAtIndex { target, index } => self.remove_at_index(target, index),
            WizardAction::SetMaritalStatus { applicant, status } => {
                self.applicant_mut(applicant)?.marital_status = status;
                self.goto_step(None)
            }
            WizardAction::AddSource {
                applicant,
                category,
                source,
            } => self.add_source(applicant, category, source.unwrap_or_default()),
            WizardAction::AddSupportPayment {
                applicant,
                category,
            } => {
                let source = SourceForm {
                    incomes: vec![IncomeForm::support_payment()],
                    ..SourceForm::default()
                };
                self.add_source(applicant, category, source)
            }
            WizardAction::AddOtherPayment {
                applicant,
                category,
            } => {
                let source = SourceForm {
                    incomes: vec![IncomeForm::monthly_benefit()],
                    ..SourceForm::default()
                };
                self.add_source(applicant, category, source)
            }
            WizardAction::AddSourceIncomes {
                applicant,
                category,
                categories,
            } => self.add_source_incomes(applicant, category, categories),
            WizardAction::AddSourceAssets {
                applicant,
                category,
                categories,
            } => self.add_source_assets(applicant, category, categories),
            WizardAction::AddPropertyAccount {
                applicant,
                property,
            } => self.add_property_account(applicant, property),
            WizardAction::CheckAddSource { source } => self.check_add_source(source),
            WizardAction::UpdateVerified { source, verified } => {
                self.update_verified(source, verified)
            }
            WizardAction::PeriodUpdated {
                source,
                income,
                period,
            } => self.period_updated(source, income, period),
            WizardAction::DocumentUploaded { location } => Ok(self.document_uploaded(location)),
            WizardAction::GotoStep { step } => self.goto_step(step),
            WizardAction::ShowNode { name } => Ok(self.show_node(name)),
            WizardAction::HideNode { name } => {
                self.hidden.insert(name.clone());
                Ok(StateChange::Visibility {
                    shown: Vec::new(),
                    hidden: vec![name],
                })
            }
            WizardAction::ActiveNode { name, hidden } => {
                for node in &hidden {
                    self.hidden.insert(node.clone());
                }
                self.hidden.remove(&name);
                Ok(StateChange::Visibility {
                    shown: vec![name],
                    hidden,
                })
            }
            WizardAction::DeleteEntry => {
                let index = self.active_applicant.ok_or(WizardError::NoActiveApplicant)?;
                let entries = mark_for_deletion(self.applicant_mut(index)?);
                Ok(StateChange::MarkedForDeletion { entries })
            }
        }
    }

    fn applicant(&self, index: usize) -> Result<&ApplicantForm, WizardError> {
        self.form
            .applicants
            .get(index)
            .ok_or(WizardError::UnknownApplicant(index))
    }

    fn applicant_mut(&mut self, index: usize) -> Result<&mut ApplicantForm, WizardError> {
        self.form
            .applicants
            .get_mut(index)
            .ok_or(WizardError::UnknownApplicant(index))
    }

    fn source_mut(&mut self, source: SourceRef) -> Result<&mut SourceForm, WizardError> {
        let path = source_path(source);
        self.applicant_mut(source.applicant)?
            .categories
            .sources_mut(source.category)
            .get_mut(source.index)
            .ok_or(WizardError::IndexOutOfRange {
                path,
                index: source.index,
            })
    }

    /// Appends an applicant seeded with one past address and the benefit rows.
    fn add_applicant(&mut self) -> StateChange {
        let index = self.form.applicants.len();
        let mut applicant = ApplicantForm {
            date_of_birth: Some(CalendarInput::blank()),
            relation_to_head: if index == 0 {
                HEAD_OF_HOUSEHOLD.to_string()
            } else {
                String::new()
            },
            race: Some(ChoiceInput::default()),
            ethnicity: Some(ChoiceInput::default()),
            disabled: Some(ChoiceInput::default()),
            student_status: Some(blank_student_status()),
            properties: Some(vec![PropertyForm::default()]),
            cash_on_hand: Some(CashOnHandForm::default()),
            ..ApplicantForm::default()
        };
        for category in [
            IncomeCategory::SelfEmployed,
            IncomeCategory::Employee,
            IncomeCategory::SupportPayments,
            IncomeCategory::Fiduciaries,
            IncomeCategory::LifeInsurances,
            IncomeCategory::Others,
        ] {
            applicant.categories.sources_mut(category);
        }
        for category in IncomeCategory::BENEFITS {
            applicant
                .categories
                .sources_mut(category)
                .push(SourceForm::monthly_benefit());
        }
        push_past_address(&mut applicant.past_addresses, self.now);

        self.form.applicants.push(applicant);
        self.active_applicant = Some(index);
        StateChange::Added {
            path: "applicants".to_string(),
            index,
        }
    }

    fn add_child(&mut self) -> StateChange {
        let index = self.form.children.len();
        self.form.children.push(ChildForm {
            full_name: String::new(),
            relation_to_head: CHILD.to_string(),
            date_of_birth: CalendarInput {
                year: NumericInput::from(self.now.year() as i64),
                ..CalendarInput::blank()
            },
            full_time_student: false,
        });
        StateChange::Added {
            path: "children".to_string(),
            index,
        }
    }

    fn add_past_address(&mut self, applicant: usize) -> Result<StateChange, WizardError> {
        let now = self.now;
        let addresses = &mut self.applicant_mut(applicant)?.past_addresses;
        let index = push_past_address(addresses, now);
        Ok(StateChange::Added {
            path: format!("applicant-{applicant}.past_addresses"),
            index,
        })
    }

    fn remove_at_index(
        &mut self,
        target: CollectionRef,
        index: usize,
    ) -> Result<StateChange, WizardError> {
        let path = collection_path(target);
        let removed = match target {
            CollectionRef::Applicants => remove(&mut self.form.applicants, index),
            CollectionRef::Children => remove(&mut self.form.children, index),
            CollectionRef::PastAddresses { applicant } => {
                remove(&mut self.applicant_mut(applicant)?.past_addresses, index)
            }
            CollectionRef::Sources {
                applicant,
                category,
            } => remove(
                self.applicant_mut(applicant)?.categories.sources_mut(category),
                index,
            ),
            CollectionRef::Incomes { source } => remove(&mut self.source_mut(source)?.incomes, index),
            CollectionRef::Assets { source } => remove(&mut self.source_mut(source)?.assets, index),
            CollectionRef::Properties { applicant } => remove(
                self.applicant_mut(applicant)?
                    .properties
                    .get_or_insert_with(Vec::new),
                index,
            ),
            CollectionRef::PropertyAccounts {
                applicant,
                property,
            } => {
                let properties = self
                    .applicant_mut(applicant)?
                    .properties
                    .get_or_insert_with(Vec::new);
                match properties.get_mut(property) {
                    Some(property) => remove(&mut property.assets, index),
                    None => false,
                }
            }
        };
        if !removed {
            return Err(WizardError::IndexOutOfRange { path, index });
        }

        if target == CollectionRef::Applicants {
            self.active_applicant = self.form.applicants.len().checked_sub(1);
        }
        Ok(StateChange::Removed { path, index })
    }

    fn add_source(
        &mut self,
        applicant: usize,
        category: IncomeCategory,
        source: SourceForm,
    ) -> Result<StateChange, WizardError> {
        let sources = self.applicant_mut(applicant)?.categories.sources_mut(category);
        sources.push(source);
        Ok(StateChange::Added {
            path: format!("applicant-{applicant}.{}", category.key()),
            index: sources.len() - 1,
        })
    }

    fn last_source_mut(
        &mut self,
        applicant: usize,
        category: IncomeCategory,
    ) -> Result<(usize, &mut SourceForm), WizardError> {
        let sources = self.applicant_mut(applicant)?.categories.sources_mut(category);
        let index = sources.len().checked_sub(1);
        match (index, sources.last_mut()) {
            (Some(index), Some(source)) => Ok((index, source)),
            _ => Err(WizardError::NoSource(format!(
                "applicant-{applicant}.{}",
                category.key()
            ))),
        }
    }

    fn add_source_incomes(
        &mut self,
        applicant: usize,
        category: IncomeCategory,
        categories: Vec<String>,
    ) -> Result<StateChange, WizardError> {
        let (index, source) = self.last_source_mut(applicant, category)?;
        let regular = categories.iter().any(|key| key == "regular");
        source.avg_per_year = Some(NumericInput::from(if regular { 52.0 } else { 0.0 }));
        source
            .incomes
            .extend(categories.into_iter().map(IncomeForm::hourly));
        Ok(StateChange::Updated {
            path: format!("applicant-{applicant}.{}-{index}.incomes", category.key()),
        })
    }

    fn add_source_assets(
        &mut self,
        applicant: usize,
        category: IncomeCategory,
        categories: Vec<String>,
    ) -> Result<StateChange, WizardError> {
        let (index, source) = self.last_source_mut(applicant, category)?;
        source.assets = categories.into_iter().map(AssetForm::blank).collect();
        Ok(StateChange::Updated {
            path: format!("applicant-{applicant}.{}-{index}.assets", category.key()),
        })
    }

    fn add_property_account(
        &mut self,
        applicant: usize,
        property: usize,
    ) -> Result<StateChange, WizardError> {
        let path = format!("applicant-{applicant}.properties-{property}.assets");
        let properties = self
            .applicant_mut(applicant)?
            .properties
            .get_or_insert_with(Vec::new);
        let Some(target) = properties.get_mut(property) else {
            return Err(WizardError::IndexOutOfRange {
                path: format!("applicant-{applicant}.properties"),
                index: property,
            });
        };
        target.assets.push(AssetForm {
            category: BANK_CD.to_string(),
            amount: NumericInput::zero(),
            ..AssetForm::default()
        });
        Ok(StateChange::Added {
            path,
            index: target.assets.len() - 1,
        })
    }

    /// Copies the picked directory entry into the source, or asks to leave
    /// for the add-source page when the sentinel was picked.
    fn check_add_source(&mut self, source_ref: SourceRef) -> Result<StateChange, WizardError> {
        let add_source_url = self.settings.urls.add_source.clone();
        let directory = self.settings.sources.clone();
        let source = self.source_mut(source_ref)?;
        let pick = source.pk.clone().ok_or(WizardError::UnknownDirectoryEntry)?;

        if pick.is_add_source() {
            let url = add_source_url.ok_or(WizardError::MissingAddSourceUrl)?;
            return Ok(StateChange::Navigate { url });
        }

        let entry = pick
            .index()
            .and_then(|idx| directory.get(idx))
            .ok_or(WizardError::UnknownDirectoryEntry)?;
        source.slug = Some(entry.slug.clone());
        source.position = entry.position.clone();
        source.name = entry.name.clone();
        source.contact = entry.contact.clone();
        Ok(StateChange::Updated {
            path: source_path(source_ref),
        })
    }

    /// Implicit-period verifications switch every income to a day count.
    fn update_verified(
        &mut self,
        source_ref: SourceRef,
        verified: Option<Verified>,
    ) -> Result<StateChange, WizardError> {
        let days = Period::Other.natural_avg_per_year(self.now.year());
        let source = self.source_mut(source_ref)?;
        source.verified = verified;
        if has_implicit_period(source) {
            for income in &mut source.incomes {
                income.period = Period::Other;
                income.avg = Some(Period::Other);
            }
            source.avg_per_year = Some(NumericInput::from(days as i64));
        }
        Ok(StateChange::Updated {
            path: source_path(source_ref),
        })
    }

    fn period_updated(
        &mut self,
        source_ref: SourceRef,
        income: usize,
        period: Period,
    ) -> Result<StateChange, WizardError> {
        let year = self.now.year();
        let path = format!("{}.incomes", source_path(source_ref));
        let source = self.source_mut(source_ref)?;
        let Some(target) = source.incomes.get_mut(income) else {
            return Err(WizardError::IndexOutOfRange { path, index: income });
        };
        target.period = period;
        target.avg_per_year = NumericInput::from(period.natural_avg_per_year(year) as i64);
        Ok(StateChange::Updated {
            path: format!("{path}-{income}"),
        })
    }

    fn document_uploaded(&mut self, location: String) -> StateChange {
        self.form.docs.push(DocumentLink {
            printable_name: RECENT_UPLOAD.to_string(),
            url: location,
        });
        StateChange::Added {
            path: "docs".to_string(),
            index: self.form.docs.len() - 1,
        }
    }

    /// Moves to `step`, or to the page after the current one.
    fn goto_step(&mut self, step: Option<String>) -> Result<StateChange, WizardError> {
        let next = match step {
            Some(name) => self
                .steps
                .iter()
                .position(|candidate| *candidate == name)
                .ok_or(WizardError::UnknownStep(name))?,
            None => (self.current_step + 1).min(self.steps.len().saturating_sub(1)),
        };
        self.current_step = next;
        let step = self
            .steps
            .get(next)
            .cloned()
            .ok_or_else(|| WizardError::UnknownStep(next.to_string()))?;
        Ok(StateChange::Focus { step })
    }

    fn show_node(&mut self, name: String) -> StateChange {
        self.hidden.remove(&name);
        StateChange::Visibility {
            shown: vec![name],
            hidden: Vec::new(),
        }
    }
}

/// New address runs from the previous one's end (or two years back) to now.
fn push_past_address(addresses: &mut Vec<AddressForm>, now: NaiveDateTime) -> usize {
    let starts_at = match addresses.last() {
        Some(previous) => previous.ends_at.val,
        None => two_years_before(now.date()).and_time(now.time()),
    };
    addresses.push(AddressForm {
        starts_at: DatePicker::closed(starts_at),
        ends_at: DatePicker::closed(now),
        street_address: String::new(),
        locality: String::new(),
        region: "CA".to_string(),
        postal_code: String::new(),
        country: "US".to_string(),
        monthly_rent: NumericInput::zero(),
    });
    addresses.len() - 1
}

fn remove<T>(items: &mut Vec<T>, index: usize) -> bool {
    if index < items.len() {
        items.remove(index);
        true
    } else {
        false
    }
}

fn source_path(source: SourceRef) -> String {
    format!(
        "applicant-{}.{}-{}",
        source.applicant,
        source.category.key(),
        source.index
    )
}

fn collection_path(target: CollectionRef) -> String {
    match target {
        CollectionRef::Applicants => "applicants".to_string(),
        CollectionRef::Children => "children".to_string(),
        CollectionRef::PastAddresses { applicant } => {
            format!("applicant-{applicant}.past_addresses")
        }
        CollectionRef::Sources {
            applicant,
            category,
        } => format!("applicant-{applicant}.{}", category.key()),
        CollectionRef::Incomes { source } => format!("{}.incomes", source_path(source)),
        CollectionRef::Assets { source } => format!("{}.assets", source_path(source)),
        CollectionRef::Properties { applicant } => format!("applicant-{applicant}.properties"),
        CollectionRef::PropertyAccounts {
            applicant,
            property,
        } => format!("applicant-{applicant}.properties-{property}.assets"),
    }
}
