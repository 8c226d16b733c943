//! Contact form controller: current values, per-field errors and the submission lifecycle.

use tracing::{debug, info};

use super::validation::{RuleSet, ValidationState};
use super::values::{Field, FormValues};

/// Where the form is in its submission lifecycle.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SubmissionState {
    /// No valid submission has happened yet.
    #[default]
    Editing,
    /// Values captured at the last fully valid submit.
    Submitted(FormValues),
}

/// Input to [`ContactForm::reduce`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormEvent {
    /// The user changed a field to the given value.
    Changed(Field, String),
    /// The user pressed the submit control.
    Submit,
}

/// One `label: value` line of the submitted summary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryLine<'a> {
    pub field: Field,
    pub label: &'static str,
    pub value: &'a str,
}

/// The contact form state machine.
///
/// Field changes validate only the changed field. Submitting re-validates
/// every field from scratch and, when all pass, snapshots the values, clears
/// the inputs and switches to [`SubmissionState::Submitted`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactForm {
    rules: RuleSet,
    values: FormValues,
    validation: ValidationState,
    submission: SubmissionState,
}

impl Default for ContactForm {
    fn default() -> Self {
        Self::new(RuleSet::default())
    }
}

impl ContactForm {
    /// Creates an empty form validated by `rules`.
    pub fn new(rules: RuleSet) -> Self {
        Self {
            rules,
            values: FormValues::default(),
            validation: ValidationState::default(),
            submission: SubmissionState::Editing,
        }
    }

    /// Current (editable) values.
    pub fn values(&self) -> &FormValues {
        &self.values
    }

    /// Errors from the last validation pass.
    pub fn validation(&self) -> &ValidationState {
        &self.validation
    }

    pub fn submission(&self) -> &SubmissionState {
        &self.submission
    }

    /// Values captured at the last successful submit, if any.
    pub fn snapshot(&self) -> Option<&FormValues> {
        match &self.submission {
            SubmissionState::Editing => None,
            SubmissionState::Submitted(values) => Some(values),
        }
    }

    /// Stores `value` for `field` and re-validates that field alone.
    pub fn on_field_change(&mut self, field: Field, value: impl Into<String>) {
        self.values.set(field, value);
        let result = self.rules.validate_field(field, &self.values);
        debug!(field = field.name(), valid = result.is_ok(), "field changed");
        self.validation.set(field, result);
    }

    /// Validates every field. Returns `true` if the form was submitted.
    pub fn on_submit(&mut self) -> bool {
        self.validation = self.rules.validate(&self.values);
        if !self.validation.is_valid() {
            let failing: Vec<&str> = self
                .validation
                .errors()
                .map(|e| e.field().name())
                .collect();
            debug!(
                errors = self.validation.error_count(),
                fields = ?failing,
                "submission rejected"
            );
            return false;
        }

        let snapshot = std::mem::take(&mut self.values);
        info!(
            has_message = !snapshot.message.is_empty(),
            "contact form submitted"
        );
        self.submission = SubmissionState::Submitted(snapshot);
        self.validation.clear();
        true
    }

    /// Applies `event` in place.
    pub fn apply(&mut self, event: FormEvent) {
        match event {
            FormEvent::Changed(field, value) => self.on_field_change(field, value),
            FormEvent::Submit => {
                self.on_submit();
            }
        }
    }

    /// Pure transition: consumes the form and returns its successor.
    #[must_use]
    pub fn reduce(mut self, event: FormEvent) -> Self {
        self.apply(event);
        self
    }

    /// Lines of the submitted summary. The message line is omitted when the
    /// submitted message was empty.
    pub fn summary(&self) -> Vec<SummaryLine<'_>> {
        let Some(snapshot) = self.snapshot() else {
            return Vec::new();
        };
        Field::ALL
            .iter()
            .filter(|&&f| f != Field::Message || !snapshot.message.is_empty())
            .map(|&field| SummaryLine {
                field,
                label: summary_label(field),
                value: snapshot.get(field),
            })
            .collect()
    }
}

fn summary_label(field: Field) -> &'static str {
    match field {
        Field::FirstName => "First Name",
        Field::LastName => "Last Name",
        Field::Email => "Email",
        Field::Message => "Message",
    }
}
