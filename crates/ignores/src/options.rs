/// File name looked up in the base directory when no other name is configured.
pub const DEFAULT_IGNORE_FILE: &str = ".ignore";

/// Settings controlling where the ignore file lives and how patterns compile.
///
/// # Examples
///
/// ```
/// use ignores::IgnoreOptions;
///
/// let options = IgnoreOptions::default()
///     .with_file_name(".codegen-ignore")
///     .with_case_insensitive(true);
/// assert_eq!(options.file_name(), ".codegen-ignore");
/// assert!(options.is_case_insensitive());
/// ```
#[derive(Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "kebab-case"))]
pub struct IgnoreOptions {
    file_name: String,
    case_insensitive: bool,
}

impl IgnoreOptions {
    /// Returns the ignore file name.
    #[must_use]
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// Returns whether patterns match without regard to case.
    #[must_use]
    pub const fn is_case_insensitive(&self) -> bool {
        self.case_insensitive
    }

    /// Sets the ignore file name.
    #[must_use]
    pub fn with_file_name(mut self, file_name: impl Into<String>) -> Self {
        self.file_name = file_name.into();
        self
    }

    /// Sets whether patterns match without regard to case.
    ///
    /// Useful when the generated tree lives on a case-insensitive filesystem.
    #[must_use]
    pub const fn with_case_insensitive(mut self, case_insensitive: bool) -> Self {
        self.case_insensitive = case_insensitive;
        self
    }
}

impl Default for IgnoreOptions {
    fn default() -> Self {
        Self {
            file_name: DEFAULT_IGNORE_FILE.to_owned(),
            case_insensitive: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_use_dot_ignore_case_sensitive() {
        let options = IgnoreOptions::default();
        assert_eq!(options.file_name(), ".ignore");
        assert!(!options.is_case_insensitive());
    }

    #[test]
    fn builders_replace_fields() {
        let options = IgnoreOptions::default()
            .with_file_name("patterns.txt")
            .with_case_insensitive(true);
        assert_eq!(options.file_name(), "patterns.txt");
        assert!(options.is_case_insensitive());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn deserializes_with_defaults() {
        let options: IgnoreOptions =
            serde_json::from_str(r#"{"case-insensitive": true}"#).unwrap();
        assert_eq!(options.file_name(), DEFAULT_IGNORE_FILE);
        assert!(options.is_case_insensitive());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn serializes_kebab_case_fields() {
        let json = serde_json::to_string(&IgnoreOptions::default()).unwrap();
        assert_eq!(json, r#"{"file-name":".ignore","case-insensitive":false}"#);
    }
}
