//! Locale set for localized navigation.
//!
//! Locales are keyed by code. The `root` code is served without a URL
//! prefix; every other code doubles as its content directory and URL
//! segment (`es` → `/es/...`).

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use crate::error::{ConfigurationError, ConfigurationErrorKind, ErrorLocation};

/// Code of the locale served at the site root.
pub const ROOT_LOCALE: &str = "root";

/// Locale entry as written in configuration.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LocaleSpec {
    /// Name shown in the language picker.
    pub label: String,
    /// BCP-47 tag. Defaults to the locale code, required for `root`.
    #[serde(default)]
    pub lang: Option<String>,
    /// Marks the default locale.
    #[serde(default)]
    pub default: bool,
}

/// A validated locale.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Locale {
    /// Locale code (`root`, `es`, ...).
    pub code: String,
    /// Display label.
    pub label: String,
    /// BCP-47 language tag.
    pub lang: String,
    /// Whether labels fall back to this locale.
    pub is_default: bool,
}

impl Locale {
    /// Whether this locale is served at the site root.
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.code == ROOT_LOCALE
    }

    /// Content directory and URL segment, `None` for the root locale.
    #[must_use]
    pub fn directory(&self) -> Option<&str> {
        (!self.is_root()).then_some(self.code.as_str())
    }
}

/// Immutable set of configured locales with exactly one default.
///
/// Iteration yields the default locale first, then the rest ordered by code.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LocaleSet {
    locales: Vec<Locale>,
}

impl LocaleSet {
    /// Validate locale entries keyed by code.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError`] when the table is empty, a code or label
    /// is empty, `root` has no `lang`, or a lang tag repeats. The default
    /// locale must be `root` and nothing else may be marked default.
    pub fn new(specs: &BTreeMap<String, LocaleSpec>) -> Result<Self, ConfigurationError> {
        if specs.is_empty() {
            return Err(ConfigurationError {
                location: ErrorLocation::Locales,
                kind: ConfigurationErrorKind::NoLocales,
            });
        }

        let mut locales = Vec::with_capacity(specs.len());
        let mut langs: HashMap<String, &str> = HashMap::new();
        let mut has_default = false;

        for (code, spec) in specs {
            if code.trim().is_empty() {
                return Err(ConfigurationError::locale(
                    code,
                    ConfigurationErrorKind::EmptyLocaleCode,
                ));
            }
            if spec.label.trim().is_empty() {
                return Err(ConfigurationError::locale(
                    code,
                    ConfigurationErrorKind::EmptyLabel,
                ));
            }

            let lang = match spec.lang.as_deref().map(str::trim) {
                Some(lang) if !lang.is_empty() => lang.to_owned(),
                _ if code == ROOT_LOCALE => {
                    return Err(ConfigurationError::locale(
                        code,
                        ConfigurationErrorKind::MissingLang,
                    ));
                }
                _ => code.clone(),
            };
            if let Some(first) = langs.insert(lang.to_ascii_lowercase(), code.as_str()) {
                return Err(ConfigurationError::locale(
                    code,
                    ConfigurationErrorKind::DuplicateLang {
                        lang,
                        first: first.to_owned(),
                    },
                ));
            }

            match (code == ROOT_LOCALE, spec.default) {
                (true, false) => {
                    return Err(ConfigurationError::locale(
                        code,
                        ConfigurationErrorKind::RootNotDefault,
                    ));
                }
                (false, true) => {
                    return Err(ConfigurationError::locale(
                        code,
                        ConfigurationErrorKind::DefaultNotRoot,
                    ));
                }
                (true, true) => has_default = true,
                (false, false) => {}
            }

            locales.push(Locale {
                code: code.clone(),
                label: spec.label.clone(),
                lang,
                is_default: spec.default,
            });
        }

        if !has_default {
            return Err(ConfigurationError {
                location: ErrorLocation::Locales,
                kind: ConfigurationErrorKind::NoDefaultLocale,
            });
        }

        // Stable sort keeps code order among non-default locales.
        locales.sort_by_key(|locale| !locale.is_default);
        Ok(Self { locales })
    }

    /// A single English `root` locale, used when none are configured.
    #[must_use]
    pub fn single_default() -> Self {
        Self {
            locales: vec![Locale {
                code: ROOT_LOCALE.to_owned(),
                label: "English".to_owned(),
                lang: "en".to_owned(),
                is_default: true,
            }],
        }
    }

    /// The default locale.
    #[must_use]
    pub fn default_locale(&self) -> &Locale {
        // `new` and `single_default` both guarantee a default at index 0.
        &self.locales[0]
    }

    /// Look up a locale by code.
    #[must_use]
    pub fn get(&self, code: &str) -> Option<&Locale> {
        self.locales.iter().find(|l| l.code == code)
    }

    /// Look up a locale by code, then by lang tag (case-insensitive).
    #[must_use]
    pub fn find(&self, key: &str) -> Option<&Locale> {
        self.get(key).or_else(|| {
            self.locales
                .iter()
                .find(|l| l.lang.eq_ignore_ascii_case(key))
        })
    }

    /// Resolve a requested locale, falling back to the default.
    #[must_use]
    pub fn resolve(&self, key: &str) -> &Locale {
        self.find(key).unwrap_or_else(|| self.default_locale())
    }

    /// Iterate locales, default first.
    pub fn iter(&self) -> std::slice::Iter<'_, Locale> {
        self.locales.iter()
    }

    /// Number of locales.
    #[must_use]
    pub fn len(&self) -> usize {
        self.locales.len()
    }

    /// Always `false`; a locale set holds at least the default locale.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.locales.is_empty()
    }
}

impl<'a> IntoIterator for &'a LocaleSet {
    type Item = &'a Locale;
    type IntoIter = std::slice::Iter<'a, Locale>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
