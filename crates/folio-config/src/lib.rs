//! Configuration management for Folio.
//!
//! Parses `folio.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! A configuration describes the site, its locales and its sidebar:
//!
//! ```toml
//! [site]
//! title = "FolioChain Protocol"
//! base = "/foliochain-docs"
//!
//! [locales.root]
//! label = "English"
//! lang = "en"
//! default = true
//!
//! [locales.es]
//! label = "Español"
//!
//! [[sidebar]]
//! label = "Overview"
//! translations = { es = "Visión General" }
//!
//! [[sidebar.items]]
//! label = "Introduction"
//! link = "/overview/introduction/"
//! ```
//!
//! ## Environment Variable Expansion
//!
//! String configuration values support environment variable expansion:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! Expanded fields:
//! - `site.url`
//! - `site.base`
//! - `site.social.*`

mod expand;

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use folio_nav::{
    ConfigurationError, LocaleSpec, NavigationConfig, NavigationNodeSpec, SiteNavigation,
};
use serde::Deserialize;

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override content directory.
    pub content_dir: Option<PathBuf>,
    /// Override site base path.
    pub base: Option<String>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "folio.toml";

/// Content directory used when `[docs]` does not set one.
const DEFAULT_CONTENT_DIR: &str = "src/content/docs";

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Site metadata.
    pub site: SiteConfig,
    /// Documentation configuration (paths are relative strings from TOML).
    docs: DocsConfigRaw,
    /// Locales keyed by code. Empty means a single English `root` locale.
    pub locales: BTreeMap<String, LocaleSpec>,
    /// Top-level sidebar entries.
    pub sidebar: Vec<NavigationNodeSpec>,

    /// Resolved docs configuration (set after loading).
    #[serde(skip)]
    pub docs_resolved: DocsConfig,
    /// Resolved asset paths (set after loading).
    #[serde(skip)]
    pub assets_resolved: AssetsConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

/// Site metadata.
#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Site title.
    pub title: String,
    /// Site description for metadata.
    pub description: Option<String>,
    /// Deployed origin (e.g., `https://elwizard33.github.io`).
    pub url: Option<String>,
    /// Path the site is served under (e.g., `/foliochain-docs`).
    pub base: String,
    /// Logo file, relative to the config file.
    pub logo: Option<String>,
    /// Extra stylesheets, relative to the config file.
    pub custom_css: Vec<String>,
    /// Social links keyed by network (e.g., `github`).
    pub social: BTreeMap<String, String>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "Documentation".to_owned(),
            description: None,
            url: None,
            base: String::new(),
            logo: None,
            custom_css: Vec::new(),
            social: BTreeMap::new(),
        }
    }
}

/// Raw docs configuration as parsed from TOML (paths as strings).
#[derive(Debug, Deserialize, Default)]
#[serde(default, deny_unknown_fields)]
struct DocsConfigRaw {
    content_dir: Option<String>,
}

/// Resolved documentation configuration with absolute paths.
#[derive(Debug, Default)]
pub struct DocsConfig {
    /// Content directory holding the markdown documents.
    pub content_dir: PathBuf,
}

/// Resolved site asset paths.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct AssetsConfig {
    /// Logo file.
    pub logo: Option<PathBuf>,
    /// Custom stylesheets, in configured order.
    pub custom_css: Vec<PathBuf>,
}

impl AssetsConfig {
    /// Asset files that do not exist on disk.
    #[must_use]
    pub fn missing(&self) -> Vec<&Path> {
        self.logo
            .iter()
            .chain(&self.custom_css)
            .map(PathBuf::as_path)
            .filter(|path| !path.is_file())
            .collect()
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`site.url`").
        field: String,
        /// Error message (e.g., "${`SITE_URL`} not set").
        message: String,
    },
    /// Invalid locale or sidebar configuration.
    #[error("Navigation error: {0}")]
    Navigation(#[from] ConfigurationError),
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

/// Require a URL field to use http:// or https:// scheme.
fn require_http_url(url: &str, field: &str) -> Result<(), ConfigError> {
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(ConfigError::Validation(format!(
            "{field} must start with http:// or https://"
        )));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `folio.toml` in current directory and parents.
    ///
    /// CLI settings are applied after loading and path resolution, allowing CLI
    /// arguments to take precedence over config file values.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist or parsing fails.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            tracing::info!("No {CONFIG_FILENAME} found, using defaults");
            Self::default_with_cwd()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }

        Ok(config)
    }

    /// Build the validated site navigation from `[site]`, `[locales]` and `[[sidebar]]`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Navigation` naming the offending locale or
    /// sidebar entry.
    pub fn navigation(&self) -> Result<SiteNavigation, ConfigError> {
        let config = NavigationConfig {
            base: self.site.base.clone(),
            locales: self.locales.clone(),
            sidebar: self.sidebar.clone(),
        };
        Ok(SiteNavigation::build(&config)?)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(content_dir) = &settings.content_dir {
            self.docs_resolved.content_dir.clone_from(content_dir);
        }
        if let Some(base) = &settings.base {
            self.site.base.clone_from(base);
        }
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Create default config with paths relative to current working directory.
    fn default_with_cwd() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::default_with_base(&cwd)
    }

    /// Create default config with paths relative to given base directory.
    fn default_with_base(base: &Path) -> Self {
        Self {
            site: SiteConfig::default(),
            docs: DocsConfigRaw::default(),
            locales: BTreeMap::new(),
            sidebar: Vec::new(),
            docs_resolved: DocsConfig {
                content_dir: base.join(DEFAULT_CONTENT_DIR),
            },
            assets_resolved: AssetsConfig::default(),
            config_path: None,
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        // Expand environment variables before path resolution
        config.expand_env_vars()?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir);
        config.config_path = Some(path.to_path_buf());

        config.validate()?;

        tracing::debug!(
            path = %path.display(),
            locales = config.locales.len(),
            sidebar = config.sidebar.len(),
            "Loaded configuration"
        );

        Ok(config)
    }

    /// Validate site metadata.
    ///
    /// Locales and the sidebar are validated by [`Config::navigation`].
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.site.title, "site.title")?;

        if let Some(url) = &self.site.url {
            require_non_empty(url, "site.url")?;
            require_http_url(url, "site.url")?;
        }

        for (network, url) in &self.site.social {
            let field = format!("site.social.{network}");
            require_non_empty(url, &field)?;
            require_http_url(url, &field)?;
        }

        Ok(())
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        if let Some(url) = &self.site.url {
            self.site.url = Some(expand::expand_env(url, "site.url")?);
        }
        self.site.base = expand::expand_env(&self.site.base, "site.base")?;

        for (network, url) in &mut self.site.social {
            *url = expand::expand_env(url, &format!("site.social.{network}"))?;
        }

        Ok(())
    }

    /// Resolve relative paths to absolute paths based on config directory.
    fn resolve_paths(&mut self, config_dir: &Path) {
        self.docs_resolved = DocsConfig {
            content_dir: config_dir.join(
                self.docs
                    .content_dir
                    .as_deref()
                    .unwrap_or(DEFAULT_CONTENT_DIR),
            ),
        };

        self.assets_resolved = AssetsConfig {
            logo: self.site.logo.as_ref().map(|logo| config_dir.join(logo)),
            custom_css: self
                .site
                .custom_css
                .iter()
                .map(|css| config_dir.join(css))
                .collect(),
        };
    }
}

#[cfg(test)]
mod tests {
    use folio_nav::{ConfigurationErrorKind, ErrorLocation};
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default_with_base(Path::new("/test"));
        assert_eq!(config.site.title, "Documentation");
        assert_eq!(config.site.base, "");
        assert_eq!(
            config.docs_resolved.content_dir,
            PathBuf::from("/test/src/content/docs")
        );
        assert!(config.locales.is_empty());
        assert!(config.sidebar.is_empty());
    }

    #[test]
    fn test_parse_minimal_config() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.site.title, "Documentation");
        assert!(config.site.custom_css.is_empty());
    }

    #[test]
    fn test_parse_site_config() {
        let toml = r#"
[site]
title = "FolioChain Protocol"
description = "Real-world asset tokenization"
url = "https://elwizard33.github.io"
base = "/foliochain-docs"
logo = "./src/assets/logo.svg"
custom_css = ["./src/styles/custom.css"]

[site.social]
github = "https://github.com/foliochain/protocol"
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.site.title, "FolioChain Protocol");
        assert_eq!(
            config.site.description.as_deref(),
            Some("Real-world asset tokenization")
        );
        assert_eq!(config.site.base, "/foliochain-docs");
        assert_eq!(config.site.custom_css, ["./src/styles/custom.css"]);
        assert_eq!(
            config.site.social.get("github").map(String::as_str),
            Some("https://github.com/foliochain/protocol")
        );
    }

    #[test]
    fn test_parse_unknown_site_key_fails() {
        let toml = r#"
[site]
titel = "Typo"
"#;
        assert!(toml::from_str::<Config>(toml).is_err());
    }

    #[test]
    fn test_parse_misspelled_section_fails() {
        let toml = r#"
[locale.es]
label = "Español"

[[sidebr]]
label = "Overview"
link = "/overview/"
"#;
        let err = toml::from_str::<Config>(toml).unwrap_err();
        assert!(err.to_string().contains("unknown field"), "unexpected error: {err}");
    }

    #[test]
    fn test_load_misspelled_sidebar_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILENAME);
        std::fs::write(&path, "[[sidebr]]\nlabel = \"Overview\"\nlink = \"/overview/\"\n").unwrap();

        let err = Config::load(Some(&path), None).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)), "got {err:?}");
    }

    #[test]
    fn test_parse_locales_and_sidebar() {
        let toml = r#"
[locales.root]
label = "English"
lang = "en"
default = true

[locales.es]
label = "Español"

[[sidebar]]
label = "Overview"
translations = { es = "Visión General" }

[[sidebar.items]]
label = "Introduction"
link = "/overview/introduction/"
translations = { es = "Introducción" }

[[sidebar]]
label = "Implementation"
collapsed = true
items = [{ label = "Scalability & Tech Stack", link = "/implementation/scalability/" }]
"#;
        let config: Config = toml::from_str(toml).unwrap();

        assert_eq!(config.locales.len(), 2);
        assert!(config.locales["root"].default);
        assert_eq!(config.sidebar.len(), 2);
        assert_eq!(
            config.sidebar[0],
            NavigationNodeSpec::group(
                "Overview",
                vec![
                    NavigationNodeSpec::leaf("Introduction", "/overview/introduction/")
                        .with_translation("es", "Introducción")
                ],
            )
            .with_translation("es", "Visión General")
        );
        assert_eq!(config.sidebar[1].collapsed, Some(true));

        let nav = config.navigation().unwrap();
        let links: Vec<_> = nav.tree().flatten_links().map(|l| l.as_str()).collect();
        assert_eq!(
            links,
            ["/overview/introduction/", "/implementation/scalability/"]
        );
    }

    #[test]
    fn test_navigation_error_names_node() {
        let toml = r#"
[[sidebar]]
label = "Overview"
link = "/overview/"
items = [{ label = "Introduction", link = "/overview/introduction/" }]
"#;
        let config: Config = toml::from_str(toml).unwrap();
        let err = config.navigation().unwrap_err();

        let ConfigError::Navigation(inner) = &err else {
            panic!("Expected ConfigError::Navigation, got {err:?}");
        };
        assert_eq!(inner.kind, ConfigurationErrorKind::LinkAndChildren);
        assert!(matches!(inner.location, ErrorLocation::Sidebar(_)));
        assert!(err.to_string().contains(r#"#1 "Overview""#));
    }

    #[test]
    fn test_navigation_rejects_unknown_locale() {
        let toml = r#"
[locales.root]
label = "English"
lang = "en"
default = true

[locales.es]
label = "Español"

[[sidebar]]
label = "Welcome"
link = "/"
translations = { fr = "Bienvenue" }
"#;
        let config: Config = toml::from_str(toml).unwrap();
        let err = config.navigation().unwrap_err();
        assert!(err.to_string().contains("\"fr\""));
    }

    #[test]
    fn test_resolve_paths() {
        let toml = r#"
[site]
logo = "src/assets/logo.svg"
custom_css = ["src/styles/custom.css", "src/styles/print.css"]

[docs]
content_dir = "content"
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        config.resolve_paths(Path::new("/project"));

        assert_eq!(
            config.docs_resolved.content_dir,
            PathBuf::from("/project/content")
        );
        assert_eq!(
            config.assets_resolved,
            AssetsConfig {
                logo: Some(PathBuf::from("/project/src/assets/logo.svg")),
                custom_css: vec![
                    PathBuf::from("/project/src/styles/custom.css"),
                    PathBuf::from("/project/src/styles/print.css"),
                ],
            }
        );
    }

    #[test]
    fn test_resolve_paths_default_content_dir() {
        let mut config: Config = toml::from_str("").unwrap();
        config.resolve_paths(Path::new("/project"));
        assert_eq!(
            config.docs_resolved.content_dir,
            PathBuf::from("/project/src/content/docs")
        );
    }

    #[test]
    fn test_assets_missing() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("logo.svg"), "<svg/>").unwrap();

        let assets = AssetsConfig {
            logo: Some(dir.path().join("logo.svg")),
            custom_css: vec![dir.path().join("custom.css")],
        };
        let custom_css = dir.path().join("custom.css");
        assert_eq!(assets.missing(), [custom_css.as_path()]);
    }

    #[test]
    fn test_apply_cli_settings_content_dir() {
        let mut config = Config::default_with_base(Path::new("/test"));
        let overrides = CliSettings {
            content_dir: Some(PathBuf::from("/custom/docs")),
            ..Default::default()
        };

        config.apply_cli_settings(&overrides);

        assert_eq!(
            config.docs_resolved.content_dir,
            PathBuf::from("/custom/docs")
        );
        assert_eq!(config.site.base, ""); // Unchanged
    }

    #[test]
    fn test_apply_cli_settings_base() {
        let mut config = Config::default_with_base(Path::new("/test"));
        let overrides = CliSettings {
            base: Some("/preview".to_owned()),
            ..Default::default()
        };

        config.apply_cli_settings(&overrides);

        assert_eq!(config.site.base, "/preview");
    }

    #[test]
    fn test_apply_cli_settings_empty() {
        let mut config = Config::default_with_base(Path::new("/test"));

        config.apply_cli_settings(&CliSettings::default());

        assert_eq!(
            config.docs_resolved.content_dir,
            PathBuf::from("/test/src/content/docs")
        );
        assert_eq!(config.site.base, "");
    }

    #[test]
    fn test_expand_env_vars_site() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::set_var("FOLIO_TEST_ORIGIN", "https://docs.example.com");
            std::env::set_var("FOLIO_TEST_REPO", "https://github.com/example/repo");
        }

        let toml = r#"
[site]
url = "${FOLIO_TEST_ORIGIN}"
base = "${FOLIO_TEST_BASE_UNSET:-/docs}"

[site.social]
github = "${FOLIO_TEST_REPO}"
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        config.expand_env_vars().unwrap();

        assert_eq!(config.site.url.as_deref(), Some("https://docs.example.com"));
        assert_eq!(config.site.base, "/docs");
        assert_eq!(config.site.social["github"], "https://github.com/example/repo");

        unsafe {
            std::env::remove_var("FOLIO_TEST_ORIGIN");
            std::env::remove_var("FOLIO_TEST_REPO");
        }
    }

    #[test]
    fn test_expand_env_vars_missing_required_var() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::remove_var("FOLIO_TEST_MISSING_URL");
        }

        let toml = r#"
[site]
url = "${FOLIO_TEST_MISSING_URL}"
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        let err = config.expand_env_vars().unwrap_err();

        assert!(matches!(err, ConfigError::EnvVar { .. }));
        assert!(err.to_string().contains("FOLIO_TEST_MISSING_URL"));
        assert!(err.to_string().contains("site.url"));
    }

    // Validation tests

    /// Assert that validation fails with expected substrings in the error message.
    fn assert_validation_error(config: &Config, expected_substrings: &[&str]) {
        let result = config.validate();
        assert!(result.is_err(), "Expected validation to fail");
        let err = result.unwrap_err();
        assert!(
            matches!(err, ConfigError::Validation(_)),
            "Expected ConfigError::Validation, got {err:?}"
        );
        let msg = err.to_string();
        for s in expected_substrings {
            assert!(
                msg.contains(s),
                "Expected error to contain '{s}', got: {msg}"
            );
        }
    }

    #[test]
    fn test_validate_default_config_passes() {
        let config = Config::default_with_base(Path::new("/test"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_title_empty() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.site.title = " ".to_owned();
        assert_validation_error(&config, &["site.title", "empty"]);
    }

    #[test]
    fn test_validate_url_invalid_scheme() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.site.url = Some("elwizard33.github.io".to_owned());
        assert_validation_error(&config, &["site.url", "http"]);
    }

    #[test]
    fn test_validate_social_invalid_scheme() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config
            .site
            .social
            .insert("github".to_owned(), "github.com/foliochain".to_owned());
        assert_validation_error(&config, &["site.social.github", "http"]);
    }

    #[test]
    fn test_load_explicit_missing_file() {
        let err = Config::load(Some(Path::new("/nonexistent/folio.toml")), None).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound(_)));
    }

    #[test]
    fn test_load_from_file_resolves_relative_to_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILENAME);
        std::fs::write(
            &path,
            r#"
[site]
title = "FolioChain Protocol"

[docs]
content_dir = "docs"
"#,
        )
        .unwrap();

        let config = Config::load(Some(&path), None).unwrap();
        assert_eq!(config.docs_resolved.content_dir, dir.path().join("docs"));
        assert_eq!(config.config_path.as_deref(), Some(path.as_path()));
    }

    #[test]
    fn test_load_from_file_validates() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILENAME);
        std::fs::write(&path, "[site]\ntitle = \"\"\n").unwrap();

        let err = Config::load(Some(&path), None).unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
    }
}
