//! Defines a trait that performs model data validation.

use crate::error::{NError, NResult};

pub trait Validate {
    /// Determines if the model is fit for saving.
    ///
    /// Returns a vec of errors pairs (field, error) if there were problems.
    fn validate(&self) -> Vec<(String, String)> {
        Vec::new()
    }

    /// Quick way to return an error if validaton fails.
    fn do_validate(&self, model_type: &str) -> NResult<()> {
        let errors = self.validate();
        if errors.len() > 0 {
            return NErr!(NError::Validation(String::from(model_type), errors));
        }
        Ok(())
    }
}

/// Create an error entry
pub fn entry<T>(field: T, message: T) -> (String, String)
    where T: Into<String>
{
    (field.into(), message.into())
}

/// Flags a string field that is empty (or only whitespace)
pub fn required(errors: &mut Vec<(String, String)>, field: &str, val: &str) {
    if val.trim().is_empty() {
        errors.push(entry(field, "is required"));
    }
}
