//! Locale codes and the deployment's locale settings.

use crate::error::PolyglotError;

/// Check that `code` is a usable locale code (`en`, `pt-BR`, `zh_Hant`).
///
/// Codes end up inside store query paths, so only ASCII letters, digits,
/// `-` and `_` are accepted.
pub fn validate_locale_code(code: &str) -> Result<(), PolyglotError> {
    if code.is_empty() {
        return Err(PolyglotError::Config("locale code must not be empty".into()));
    }
    if !code
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(PolyglotError::Config(format!(
            "invalid locale code '{code}'"
        )));
    }
    Ok(())
}

/// Default and available locales, passed explicitly into the resolver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocaleSettings {
    default_locale: String,
    available: Vec<String>,
}

impl LocaleSettings {
    /// Build settings from a default locale and the available locales.
    ///
    /// The default locale is always available; it is appended when missing.
    pub fn new<'a>(
        default_locale: &str,
        available: impl IntoIterator<Item = &'a str>,
    ) -> Result<Self, PolyglotError> {
        validate_locale_code(default_locale)?;

        let mut locales: Vec<String> = Vec::new();
        for code in available {
            validate_locale_code(code)?;
            if !locales.iter().any(|l| l == code) {
                locales.push(code.to_string());
            }
        }
        if !locales.iter().any(|l| l == default_locale) {
            locales.push(default_locale.to_string());
        }

        Ok(Self {
            default_locale: default_locale.to_string(),
            available: locales,
        })
    }

    /// Settings with a single locale.
    pub fn single(default_locale: &str) -> Result<Self, PolyglotError> {
        Self::new(default_locale, std::iter::empty())
    }

    pub fn default_locale(&self) -> &str {
        &self.default_locale
    }

    /// Available locales in configured order.
    pub fn available(&self) -> &[String] {
        &self.available
    }

    pub fn is_default(&self, locale: &str) -> bool {
        self.default_locale == locale
    }

    pub fn is_available(&self, locale: &str) -> bool {
        self.available.iter().any(|l| l == locale)
    }
}
