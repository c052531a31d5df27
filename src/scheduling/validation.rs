use super::SchedulingError;

/// Collects missing required fields across a creation request.
#[derive(Default)]
pub(crate) struct RequiredFields {
    missing: Vec<&'static str>,
}

impl RequiredFields {
    /// Take a required value. Absent or blank values are recorded as
    /// missing and an empty placeholder is returned.
    pub(crate) fn take(&mut self, name: &'static str, value: Option<String>) -> String {
        match value {
            Some(v) if !v.trim().is_empty() => v,
            _ => {
                self.missing.push(name);
                String::new()
            }
        }
    }

    pub(crate) fn finish(self) -> Result<(), SchedulingError> {
        if self.missing.is_empty() {
            Ok(())
        } else {
            Err(SchedulingError::Validation(format!(
                "Missing required fields: {}",
                self.missing.join(", ")
            )))
        }
    }
}

/// Treat a blank optional value like an absent one, so defaults apply.
pub(crate) fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
