use std::collections::HashMap;

/// Language used when the browser offers nothing better.
pub const DEFAULT_LANGUAGE: &str = "en";

/// Information about a supported language
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct LanguageInfo {
    pub code: &'static str,
    pub translation: &'static str,
}

/// Get a map of supported languages
pub fn supported_languages() -> HashMap<&'static str, LanguageInfo> {
    HashMap::from([(
        "en",
        LanguageInfo {
            code: "en",
            translation: include_str!("../translations/en.json"),
        },
    )])
}

/// Translation tables keyed by language code, as the i18n provider expects them.
pub fn translations() -> HashMap<&'static str, &'static str> {
    supported_languages()
        .into_values()
        .map(|info| (info.code, info.translation))
        .collect()
}
