use validator::Validate;

/// Minimum provider score for a tag to be returned.
#[derive(Debug, Clone, Copy, PartialEq, Validate)]
pub struct ConfidenceThreshold {
    #[validate(range(min = 0.0, max = 1.0))]
    pub value: f64,
}

impl ConfidenceThreshold {
    pub fn new(value: f64) -> Result<Self, validator::ValidationErrors> {
        if value.is_nan() {
            let mut errors = validator::ValidationErrors::new();
            errors.add("value", validator::ValidationError::new("range"));
            return Err(errors);
        }
        let threshold = Self { value };
        threshold.validate()?;
        Ok(threshold)
    }
}

impl Default for ConfidenceThreshold {
    fn default() -> Self {
        Self { value: 0.5 }
    }
}

/// Client-supplied file name, kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadFileName(String);

impl UploadFileName {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True when the name resolves to a single entry inside the uploads
    /// directory.
    pub fn is_single_component(&self) -> bool {
        let name = self.0.as_str();
        !name.is_empty()
            && name != "."
            && name != ".."
            && !name.contains(['/', '\\', '\0'])
    }
}

impl std::fmt::Display for UploadFileName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
