//! Generator configuration
//!
//! Configuration is loaded from multiple sources with clear precedence:
//!
//! 1. Environment variables (highest priority, `TABLEGEN_` prefix, `__` for nesting)
//! 2. `./tablegen.toml` (project)
//! 3. `~/.config/tablegen/config.toml` (user config, XDG)
//! 4. `/etc/tablegen/config.toml` (system config)
//! 5. Hardcoded defaults (fallback)
//!
//! Environment variable format: `TABLEGEN_SECTION__FIELD_NAME`, for example
//! `TABLEGEN_TEMPLATES__STRICT_UNDEFINED=true`.
//!
//! # Example Configuration
//!
//! ```toml
//! [templates]
//! dir = "./codegen-templates"
//! extension = "jinja"
//! strict_undefined = false
//! path_style = "output"
//!
//! [defaults]
//! module_name = "system"
//! category = "crud"
//! popup_type = "modal"
//! form_type = "useForm"
//! parent_menu_id = 0
//!
//! [archive]
//! compression = "deflated"
//! ```

use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::archive::Compression;
use crate::metadata::ImportDefaults;
use crate::template::{PathStyle, DEFAULT_EXTENSION};

/// Template loading and evaluation settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TemplateSettings {
    /// Directory replacing the built-in template set
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dir: Option<PathBuf>,

    /// Template file suffix, stripped from output paths
    pub extension: String,

    /// Treat references to missing context keys as render errors
    pub strict_undefined: bool,

    /// Path style used to key generated files
    pub path_style: PathStyle,
}

impl Default for TemplateSettings {
    fn default() -> Self {
        Self {
            dir: None,
            extension: DEFAULT_EXTENSION.to_string(),
            strict_undefined: false,
            path_style: PathStyle::Output,
        }
    }
}

/// Archive settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArchiveSettings {
    /// Entry compression
    pub compression: Compression,
}

/// Complete generator configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Template settings
    pub templates: TemplateSettings,

    /// Table import defaults
    pub defaults: ImportDefaults,

    /// Archive settings
    pub archive: ArchiveSettings,
}

impl GeneratorConfig {
    /// Load configuration for a service
    ///
    /// Searches the locations listed in the [module docs](self), lowest
    /// priority first.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Default configuration cannot be serialized to TOML
    /// - A configuration file cannot be read or parsed
    /// - Configuration values fail type conversion
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use tablegen::GeneratorConfig;
    ///
    /// # fn example() -> anyhow::Result<()> {
    /// let config = GeneratorConfig::load_for_service("tablegen")?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn load_for_service(service_name: &str) -> anyhow::Result<Self> {
        let mut figment = Figment::new()
            // 5. Start with defaults (lowest priority)
            .merge(Toml::string(&toml::to_string(&Self::default())?));

        // 4. System config: /etc/{service_name}/config.toml
        let system_config = PathBuf::from("/etc").join(service_name).join("config.toml");
        if system_config.exists() {
            figment = figment.merge(Toml::file(&system_config));
        }

        // 3. User config: ~/.config/{service_name}/config.toml
        let user_config = Self::recommended_path(service_name);
        if user_config.exists() {
            figment = figment.merge(Toml::file(&user_config));
        }

        // 2. Project config: ./{service_name}.toml
        let local_config = PathBuf::from(format!("./{service_name}.toml"));
        if local_config.exists() {
            figment = figment.merge(Toml::file(&local_config));
        }

        // 1. Environment variables (highest priority, double underscore for nesting)
        figment = figment.merge(Env::prefixed("TABLEGEN_").split("__").lowercase(true));

        let config = figment.extract()?;
        Ok(config)
    }

    /// Load configuration from a specific file
    ///
    /// A missing file leaves the defaults in place; environment variables
    /// still override everything.
    ///
    /// # Errors
    ///
    /// Returns an error if the file contains invalid TOML or values fail type
    /// conversion.
    pub fn load_from(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let config = Figment::new()
            .merge(Toml::string(&toml::to_string(&Self::default())?))
            .merge(Toml::file(path.as_ref()))
            .merge(Env::prefixed("TABLEGEN_").split("__").lowercase(true))
            .extract()?;

        Ok(config)
    }

    /// Recommended XDG config path for a service
    ///
    /// Returns `~/.config/{service_name}/config.toml` on Linux.
    #[must_use]
    pub fn recommended_path(service_name: &str) -> PathBuf {
        dirs::config_dir().map_or_else(
            || PathBuf::from(format!("./{service_name}.toml")),
            |config_dir| config_dir.join(service_name).join("config.toml"),
        )
    }
}
