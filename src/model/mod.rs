mod form;
mod validation;
mod values;

pub use form::{ContactForm, FormEvent, SubmissionState, SummaryLine};
pub use validation::{
    DEFAULT_FIRST_NAME_MIN, FieldRule, RuleSet, ValidationError, ValidationState,
};
pub use values::{Field, FormValues};
