//! Internationalization: string tables bundled with the skill.
//!
//! Each `locales/<language>.toml` file is compiled into the binary. A
//! configured locales directory is merged on top, so deployments can add a
//! language or reword a string without rebuilding.


use hello_core::config::{shellexpand, SkillConfig};
use hello_core::error::SkillError;
use hello_core::i18n::Catalog;
use std::path::Path;
use tracing::info;

/// Bundled tables: (language, TOML source).
const BUNDLED: &[(&str, &str)] = &[
    ("en", include_str!("../../locales/en.toml")),
    ("es", include_str!("../../locales/es.toml")),
    ("fr", include_str!("../../locales/fr.toml")),
    ("de", include_str!("../../locales/de.toml")),
    ("it", include_str!("../../locales/it.toml")),
    ("pt", include_str!("../../locales/pt.toml")),
];

/// Keys every handler relies on.
pub const REQUIRED_KEYS: &[&str] = &[
    "WELCOME_MESSAGE",
    "HELLO_MSG",
    "HELP_MSG",
    "GOODBYE_MSG",
    "REFLECTOR_MSG",
    "ERROR",
];

/// Catalog with only the bundled tables.
pub fn bundled_catalog(default_language: &str) -> Result<Catalog, SkillError> {
    let mut catalog = Catalog::new(default_language);
    for (language, source) in BUNDLED {
        catalog.insert_toml(language, source)?;
    }
    Ok(catalog)
}

/// Build the catalog for a configured skill: bundled tables, then the
/// optional locales directory on top.
pub fn load_catalog(cfg: &SkillConfig) -> Result<Catalog, SkillError> {
    let mut catalog = bundled_catalog(&cfg.default_language)?;

    if let Some(ref dir) = cfg.locales_dir {
        let dir = shellexpand(dir);
        let loaded = catalog.load_dir(Path::new(&dir))?;
        info!("merged {loaded} locale file(s) from {dir}");
    }

    if !catalog.has_language(catalog.default_language()) {
        return Err(SkillError::Config(format!(
            "default language '{}' has no string table",
            catalog.default_language()
        )));
    }

    Ok(catalog)
}

/// Keys from [`REQUIRED_KEYS`] missing in `language`'s table.
pub fn missing_keys(catalog: &Catalog, language: &str) -> Vec<&'static str> {
    REQUIRED_KEYS
        .iter()
        .copied()
        .filter(|key| catalog.lookup(language, key).is_err())
        .collect()
}
