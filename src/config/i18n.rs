//! `[i18n]` section configuration.

use super::defaults;
use crate::i18n::Lang;
use educe::Educe;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// `[i18n]` section in bych4n.toml.
///
/// # Example
/// ```toml
/// [i18n]
/// default_language = "tr"
/// storage = ".bych4n/storage.json"
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(default, deny_unknown_fields)]
pub struct I18nConfig {
    /// Language used when nothing else decides, and the one rendered at `/`.
    #[serde(default = "defaults::i18n::default_language")]
    #[educe(Default = defaults::i18n::default_language())]
    pub default_language: Lang,

    /// Key/value file holding the saved language preference.
    #[serde(default = "defaults::i18n::storage")]
    #[educe(Default = defaults::i18n::storage())]
    pub storage: PathBuf,

    #[serde(default = "defaults::i18n::storage_key")]
    #[educe(Default = defaults::i18n::storage_key())]
    pub storage_key: String,
}

#[cfg(test)]
mod tests {
    use super::super::SiteConfig;
    use crate::i18n::Lang;

    #[test]
    fn test_i18n_defaults() {
        let config: SiteConfig = toml::from_str("").unwrap();
        assert_eq!(config.i18n.default_language, Lang::Tr);
        assert_eq!(config.i18n.storage_key, "bych4n-language");
    }

    #[test]
    fn test_i18n_english_default() {
        let config: SiteConfig = toml::from_str(
            r#"
            [i18n]
            default_language = "en"
        "#,
        )
        .unwrap();
        assert_eq!(config.i18n.default_language, Lang::En);
    }

    #[test]
    fn test_i18n_unsupported_language() {
        let result: Result<SiteConfig, _> = toml::from_str(
            r#"
            [i18n]
            default_language = "de"
        "#,
        );
        assert!(result.is_err());
    }
}
