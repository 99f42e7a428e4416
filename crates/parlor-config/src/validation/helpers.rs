//! Shared validation helpers used by the section validators.

/// Push an error if `value` is outside `[min, max]`.
pub(crate) fn validate_range(errors: &mut Vec<String>, name: &str, value: u32, min: u32, max: u32) {
    if value < min || value > max {
        errors.push(format!("{name} = {value} is out of range [{min}, {max}]"));
    }
}

/// Push an error if `value` is empty or whitespace only.
pub(crate) fn validate_non_empty(errors: &mut Vec<String>, name: &str, value: &str) {
    if value.trim().is_empty() {
        errors.push(format!("{name} must not be empty"));
    }
}

/// Push an error if `value` contains characters unsafe in a file name.
pub(crate) fn validate_file_component(errors: &mut Vec<String>, name: &str, value: &str) {
    let bad = value.chars().find(|c| {
        matches!(*c, '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|') || c.is_control()
    });
    if let Some(c) = bad {
        errors.push(format!("{name} contains invalid file name character {c:?}"));
    }
}
