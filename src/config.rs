//! Site configuration.
//!
//! Loaded from `config.toml` in the working directory (or the path given with
//! `--config`). Every key is optional; the file is merged over stock defaults,
//! unknown keys are rejected to catch typos, and the result is validated.
//!
//! ```toml
//! settings_path = "settings.json"   # Settings document holding `customPages`
//! output_dir = "dist"               # Where `build` writes the site
//!
//! [site]
//! languages = ["ar", "en"]          # Languages to build, in order
//! default_lang = "ar"               # Used when --lang is not given
//!
//! [site.title]
//! ar = ""
//! en = ""
//!
//! [hero]
//! background_color = "#0f172a"      # Section color when a page sets none
//! text_box_background = "rgba(15, 23, 42, 0.6)"
//! ```

use crate::component::is_plain_css_value;
use crate::hero::HeroTheme;
use crate::types::{Lang, LocalizedString};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// JSON settings document the pages are read from.
    pub settings_path: String,
    /// Output directory for `build`.
    pub output_dir: String,
    pub site: SiteSection,
    pub hero: HeroDefaults,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            settings_path: "settings.json".to_string(),
            output_dir: "dist".to_string(),
            site: SiteSection::default(),
            hero: HeroDefaults::default(),
        }
    }
}

impl SiteConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.site.languages.is_empty() {
            return Err(ConfigError::Validation(
                "site.languages must not be empty".into(),
            ));
        }
        let mut seen = Vec::new();
        for lang in &self.site.languages {
            if seen.contains(lang) {
                return Err(ConfigError::Validation(format!(
                    "site.languages lists {lang} twice"
                )));
            }
            seen.push(*lang);
        }
        if !self.site.languages.contains(&self.site.default_lang) {
            return Err(ConfigError::Validation(
                "site.default_lang must be one of site.languages".into(),
            ));
        }
        for (key, value) in [
            ("hero.background_color", &self.hero.background_color),
            ("hero.text_box_background", &self.hero.text_box_background),
        ] {
            if !is_plain_css_value(value.trim()) {
                return Err(ConfigError::Validation(format!(
                    "{key} must be a plain CSS color"
                )));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteSection {
    pub languages: Vec<Lang>,
    pub default_lang: Lang,
    /// Appended to document titles when set.
    pub title: LocalizedString,
}

impl Default for SiteSection {
    fn default() -> Self {
        Self {
            languages: vec![Lang::Ar, Lang::En],
            default_lang: Lang::Ar,
            title: LocalizedString::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HeroDefaults {
    pub background_color: String,
    pub text_box_background: String,
}

impl Default for HeroDefaults {
    fn default() -> Self {
        let theme = HeroTheme::default();
        Self {
            background_color: theme.background_color,
            text_box_background: theme.text_box_background,
        }
    }
}

impl HeroDefaults {
    pub fn theme(&self) -> HeroTheme {
        HeroTheme {
            background_color: self.background_color.trim().to_string(),
            text_box_background: self.text_box_background.trim().to_string(),
        }
    }
}

/// Stock defaults as a TOML table, the base layer for user overrides.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(SiteConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`; tables merge key by key.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load and validate a config file. A missing file yields the defaults.
pub fn load_config(path: &Path) -> Result<SiteConfig, ConfigError> {
    let base = stock_defaults_value();
    let merged = if path.exists() {
        let content = fs::read_to_string(path)?;
        let overlay: toml::Value = toml::from_str(&content)?;
        merge_toml(base, overlay)
    } else {
        base
    };
    let config: SiteConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Fully commented stock `config.toml`, printed by `gen-config`.
pub fn stock_config_toml() -> &'static str {
    r##"# Custom Pages Configuration
# ==========================
# All settings are optional. Values shown below are the defaults.
# Unknown keys will cause an error.

# JSON settings document holding the `customPages` array.
settings_path = "settings.json"

# Where `build` writes slot fragments and standalone pages.
output_dir = "dist"

# ---------------------------------------------------------------------------
# Site
# ---------------------------------------------------------------------------
[site]
# Languages to build. Arabic renders right-to-left.
languages = ["ar", "en"]

# Language used by `render` and `page` when --lang is not given.
default_lang = "ar"

# Site name appended to standalone page titles ("Page | Site").
[site.title]
ar = ""
en = ""

# ---------------------------------------------------------------------------
# Hero sections
# ---------------------------------------------------------------------------
[hero]
# Section background when a hero page does not set one.
background_color = "#0f172a"

# Text box background when a hero page does not set one.
text_box_background = "rgba(15, 23, 42, 0.6)"
"##
}
