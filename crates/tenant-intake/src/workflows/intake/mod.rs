//! LIHTC tenant income certification intake.
//!
//! The wizard edits an [`ApplicationForm`] in display units (dollars, 0-based
//! months, per-period amounts). [`SubmissionNormalizer`] turns it into the
//! [`ApplicationPayload`] the backend stores in cents, and [`hydrate`] goes the
//! other way for the edit flow.

pub(crate) mod calendar;
pub mod categories;
pub mod client;
pub mod domain;
pub mod eligibility;
pub mod field_errors;
pub mod helpers;
pub mod hydrate;
pub mod inputs;
pub mod limits;
pub mod listing;
pub mod normalizer;
pub mod payload;
pub mod period;
pub mod property;
pub mod router;
pub mod settings;
pub mod wizard;

#[cfg(test)]
mod tests;

pub use categories::{Categories, IncomeCategory};
pub use client::{
    parent_listing_path, IntakeClient, ListError, SubmitError, SubmitMethod, SubmitOutcome,
};
pub use domain::{
    AddressForm, ApplicantForm, ApplicationForm, AssetForm, CashOnHandForm, ChildForm,
    DocumentLink, IncomeForm, MaritalStatus, PropertyForm, SourceContact, SourceForm, SourcePick,
    StudentAccountForm, StudentStatusForm, Verified,
};
pub use eligibility::{EligibilityCalculator, EligibilitySummary, IncomeCheck};
pub use field_errors::{Banner, Decoration, ErrorReport};
pub use hydrate::{hydrate, Hydrated};
pub use inputs::{CalendarInput, ChoiceInput, DatePicker, NumericInput};
pub use limits::{import_rent_limits, LimitsImportError};
pub use listing::{ListDefaults, ListPage, ListQuery, SortDirection};
pub use normalizer::{mark_for_deletion, SubmissionNormalizer, DELETE_SENTINEL};
pub use payload::{
    AddressPayload, ApplicantPayload, ApplicationPayload, AssetPayload, ChildPayload, CourtAward,
    IncomePayload, PropertyPayload, SourcePayload,
};
pub use period::Period;
pub use router::intake_router;
pub use settings::{
    DirectoryEntry, FormSettings, FormUrls, Limits, PrefillFields, RentLimit, SettingsError,
};
pub use wizard::{
    CollectionRef, FormController, FormObserver, SourceRef, StateChange, WizardAction,
    WizardError, DEFAULT_STEPS,
};
