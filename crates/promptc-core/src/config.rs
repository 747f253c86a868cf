//! Compile options and the external pattern configuration.

use indexmap::IndexMap;
use promptc_ir::{AmbiguityCategory, Language, Persona, SchemaVersion};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;

use crate::error::{CompileError, ConfigLoadError, OverrideKind};

/// Keyword tables supplied by an external configuration file.
///
/// Loaded once, shared behind an `Arc`, never mutated afterwards.
///
/// ```json
/// {
///   "domains": {"cloud": ["aws", "gcp"], "gaming": ["unity", "unreal"]},
///   "ambiguous_terms": {"snappy": "performance"},
///   "risk": {"financial": ["forex", "options trading"]}
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PatternConfig {
    /// Domain name -> keywords. Replaces a built-in domain of the same name.
    #[serde(default)]
    pub domains: IndexMap<String, Vec<String>>,
    /// Ambiguous term -> category. Adds to (or recategorizes) the built-in vocabulary.
    #[serde(default)]
    pub ambiguous_terms: IndexMap<String, AmbiguityCategory>,
    /// Risk category -> keywords. Replaces a built-in category of the same name.
    #[serde(default)]
    pub risk: IndexMap<String, Vec<String>>,
}

impl PatternConfig {
    /// Parse and validate a JSON pattern configuration.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigLoadError> {
        let config: PatternConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a pattern configuration file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigLoadError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigLoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&content)
    }

    /// Check every entry; the first problem found rejects the whole file.
    pub fn validate(&self) -> Result<(), ConfigLoadError> {
        for (name, keywords) in &self.domains {
            check_name("domain", name)?;
            check_keywords("domain", name, keywords)?;
        }
        for (name, keywords) in &self.risk {
            check_name("risk category", name)?;
            check_keywords("risk category", name, keywords)?;
        }
        for term in self.ambiguous_terms.keys() {
            if term.trim().is_empty() {
                return Err(ConfigLoadError::Invalid(
                    "ambiguous term must not be blank".to_string(),
                ));
            }
        }
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self.domains.is_empty() && self.ambiguous_terms.is_empty() && self.risk.is_empty()
    }
}

fn check_name(what: &str, name: &str) -> Result<(), ConfigLoadError> {
    let valid = name
        .chars()
        .next()
        .is_some_and(|c| c.is_ascii_lowercase())
        && name
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_');
    if valid {
        Ok(())
    } else {
        Err(ConfigLoadError::Invalid(format!(
            "{what} name '{name}' must match [a-z][a-z0-9_]*"
        )))
    }
}

fn check_keywords(what: &str, name: &str, keywords: &[String]) -> Result<(), ConfigLoadError> {
    if keywords.is_empty() {
        return Err(ConfigLoadError::Invalid(format!(
            "{what} '{name}' has no keywords"
        )));
    }
    if keywords.iter().any(|k| k.trim().is_empty()) {
        return Err(ConfigLoadError::Invalid(format!(
            "{what} '{name}' has a blank keyword"
        )));
    }
    Ok(())
}

/// Per-call configuration bundle.
#[derive(Debug, Clone, Default)]
pub struct CompileOptions {
    /// Persona to force; validated against the persona enum.
    pub persona_override: Option<String>,
    /// Language to force; validated against the language enum.
    pub language_override: Option<String>,
    /// Return the human-readable heuristic trace.
    pub trace: bool,
    pub schema_version: SchemaVersion,
    /// Pattern snapshot for this call only; the compiler's tables are used when absent.
    pub patterns: Option<Arc<PatternConfig>>,
}

impl CompileOptions {
    pub fn builder() -> CompileOptionsBuilder {
        CompileOptionsBuilder::default()
    }

    /// Validate the persona override, if any.
    pub fn persona(&self) -> Result<Option<Persona>, CompileError> {
        self.persona_override
            .as_deref()
            .map(|value| {
                value.parse::<Persona>().map_err(|e| CompileError::InvalidOverride {
                    kind: OverrideKind::Persona,
                    value: e.value,
                    expected: e.expected,
                })
            })
            .transpose()
    }

    /// Validate the language override, if any.
    pub fn language(&self) -> Result<Option<Language>, CompileError> {
        self.language_override
            .as_deref()
            .map(|value| {
                value.parse::<Language>().map_err(|e| CompileError::InvalidOverride {
                    kind: OverrideKind::Language,
                    value: e.value,
                    expected: e.expected,
                })
            })
            .transpose()
    }
}

/// Builder for compile options.
#[derive(Debug, Default)]
pub struct CompileOptionsBuilder {
    options: CompileOptions,
}

impl CompileOptionsBuilder {
    pub fn persona(mut self, persona: impl Into<String>) -> Self {
        self.options.persona_override = Some(persona.into());
        self
    }

    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.options.language_override = Some(language.into());
        self
    }

    pub fn trace(mut self, trace: bool) -> Self {
        self.options.trace = trace;
        self
    }

    pub fn schema(mut self, version: SchemaVersion) -> Self {
        self.options.schema_version = version;
        self
    }

    pub fn patterns(mut self, patterns: Arc<PatternConfig>) -> Self {
        self.options.patterns = Some(patterns);
        self
    }

    pub fn build(self) -> CompileOptions {
        self.options
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_valid_config() {
        let config = PatternConfig::from_json_str(
            r#"{
                "domains": {"gaming": ["unity", "unreal engine"], "cloud": ["aws"]},
                "ambiguous_terms": {"snappy": "performance"},
                "risk": {"gambling": ["betting", "casino"]}
            }"#,
        )
        .unwrap();

        let names: Vec<_> = config.domains.keys().map(String::as_str).collect();
        assert_eq!(names, vec!["gaming", "cloud"]);
        assert_eq!(
            config.ambiguous_terms.get("snappy"),
            Some(&AmbiguityCategory::Performance)
        );
    }

    #[test]
    fn test_unknown_category_is_rejected() {
        let err = PatternConfig::from_json_str(r#"{"ambiguous_terms": {"x": "vibes"}}"#)
            .unwrap_err();
        assert!(matches!(err, ConfigLoadError::Parse(_)));
    }

    #[test]
    fn test_unknown_key_is_rejected() {
        let err = PatternConfig::from_json_str(r#"{"domain": {}}"#).unwrap_err();
        assert!(matches!(err, ConfigLoadError::Parse(_)));
    }

    #[test]
    fn test_invalid_entries_are_rejected() {
        for json in [
            r#"{"domains": {"Cloud": ["aws"]}}"#,
            r#"{"domains": {"cloud": []}}"#,
            r#"{"risk": {"legal": ["  "]}}"#,
            r#"{"ambiguous_terms": {" ": "scope"}}"#,
        ] {
            let err = PatternConfig::from_json_str(json).unwrap_err();
            assert!(matches!(err, ConfigLoadError::Invalid(_)), "{json}");
        }
    }

    #[test]
    fn test_from_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"domains": {{"gaming": ["unity"]}}}}"#).unwrap();
        let config = PatternConfig::from_path(file.path()).unwrap();
        assert_eq!(config.domains.len(), 1);

        let err = PatternConfig::from_path("/nonexistent/patterns.json").unwrap_err();
        assert!(matches!(err, ConfigLoadError::Io { .. }));
    }

    #[test]
    fn test_override_validation() {
        let options = CompileOptions::builder().persona("Teacher").language("es").build();
        assert_eq!(options.persona().unwrap(), Some(Persona::Teacher));
        assert_eq!(options.language().unwrap(), Some(Language::Es));

        let options = CompileOptions::builder().persona("pirate").build();
        let err = options.persona().unwrap_err();
        assert!(matches!(
            err,
            CompileError::InvalidOverride { kind: OverrideKind::Persona, ref value, .. } if value == "pirate"
        ));

        let options = CompileOptions::builder().language("fr").build();
        assert!(options.language().is_err());
    }
}
