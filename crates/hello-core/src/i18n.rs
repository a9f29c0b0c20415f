//! Localized string tables.
//!
//! A [`Catalog`] holds one [`StringTable`] per two-letter language code.
//! Tables are parsed from TOML with a single `[strings]` section:
//!
//! ```toml
//! [strings]
//! HELLO_MSG = "Hello World!"
//! REFLECTOR_MSG = "You just triggered {intent_name}."
//! ```

use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use tracing::{debug, warn};

use crate::error::SkillError;

/// Extract the lower-cased language segment of a `language-REGION` locale.
pub fn language_of(locale: &str) -> String {
    locale
        .split(['-', '_'])
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase()
}

/// Replace `{name}` placeholders in `template` with the matching argument.
/// Unknown or unterminated placeholders are left as-is. Substituted values
/// are never scanned again.
pub fn interpolate(template: &str, args: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let close = match after.find(['{', '}']) {
            Some(i) if after.as_bytes()[i] == b'}' => i,
            _ => {
                out.push('{');
                rest = after;
                continue;
            }
        };
        let name = &after[..close];
        match args.iter().find(|(key, _)| *key == name) {
            Some((_, value)) => out.push_str(value),
            None => {
                out.push('{');
                out.push_str(name);
                out.push('}');
            }
        }
        rest = &after[close + 1..];
    }
    out.push_str(rest);
    out
}

#[derive(Debug, Deserialize)]
struct LocaleFile {
    #[serde(default)]
    strings: HashMap<String, String>,
}

/// Strings for one language.
#[derive(Debug, Clone, Default)]
pub struct StringTable {
    strings: HashMap<String, String>,
}

impl StringTable {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.strings.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.strings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strings.is_empty()
    }
}

/// All loaded string tables plus the fallback language.
#[derive(Debug, Clone)]
pub struct Catalog {
    tables: HashMap<String, StringTable>,
    default_language: String,
}

impl Catalog {
    pub fn new(default_language: &str) -> Self {
        Self {
            tables: HashMap::new(),
            default_language: language_of(default_language),
        }
    }

    /// Parse `source` and merge its strings into `language`'s table.
    /// Keys already present are overridden.
    pub fn insert_toml(&mut self, language: &str, source: &str) -> Result<(), SkillError> {
        let file: LocaleFile = toml::from_str(source)
            .map_err(|e| SkillError::Locale(format!("failed to parse '{language}': {e}")))?;
        let table = self.tables.entry(language_of(language)).or_default();
        table.strings.extend(file.strings);
        Ok(())
    }

    /// Load every `<language>.toml` file in `dir`. Returns the number of
    /// files merged.
    pub fn load_dir(&mut self, dir: &Path) -> Result<usize, SkillError> {
        let entries = std::fs::read_dir(dir).map_err(|e| {
            SkillError::Locale(format!("failed to read {}: {e}", dir.display()))
        })?;

        let mut loaded = 0;
        for entry in entries {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some("toml") {
                continue;
            }
            let Some(language) = path.file_stem().and_then(|s| s.to_str()) else {
                warn!("skipping locale file with non-UTF-8 name: {}", path.display());
                continue;
            };
            let content = std::fs::read_to_string(&path)?;
            self.insert_toml(language, &content)?;
            debug!("loaded locale file {}", path.display());
            loaded += 1;
        }
        Ok(loaded)
    }

    pub fn default_language(&self) -> &str {
        &self.default_language
    }

    pub fn has_language(&self, language: &str) -> bool {
        self.tables.contains_key(language)
    }

    pub fn table(&self, language: &str) -> Option<&StringTable> {
        self.tables.get(language)
    }

    /// Loaded languages, sorted.
    pub fn languages(&self) -> Vec<&str> {
        let mut langs: Vec<&str> = self.tables.keys().map(String::as_str).collect();
        langs.sort_unstable();
        langs
    }

    /// Look up `key` in `language`'s table. No fallback to other languages.
    pub fn lookup(&self, language: &str, key: &str) -> Result<&str, SkillError> {
        self.tables
            .get(language)
            .and_then(|t| t.get(key))
            .ok_or_else(|| SkillError::MissingString {
                language: language.to_string(),
                key: key.to_string(),
            })
    }
}
