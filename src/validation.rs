//! Client-side parameter checks, run before any request is sent.

use crate::{Error, ErrorContext, Result};

pub(crate) fn require_non_empty(source: &'static str, field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(Error::validation_with_context(
            format!("{} must not be empty", field),
            ErrorContext::new()
                .with_field_path(field)
                .with_source(source),
        ));
    }
    Ok(())
}

pub(crate) fn require_non_empty_list<T>(source: &'static str, field: &str, values: &[T]) -> Result<()> {
    if values.is_empty() {
        return Err(Error::validation_with_context(
            format!("{} must contain at least one entry", field),
            ErrorContext::new()
                .with_field_path(field)
                .with_source(source),
        ));
    }
    Ok(())
}
