// SPDX-License-Identifier: MIT

//! The small set of output languages the daemon can narrate in.
//!
//! Spec §6's `language` config key is a free-form code; anything this enum
//! doesn't recognize falls back to `English` (spec: "falling back to `en`").

/// A narration language, identified by its ISO 639-1 code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Language {
    English,
    Spanish,
    French,
    German,
    Japanese,
    ChineseSimplified,
    Portuguese,
    Russian,
    Korean,
    Italian,
}

impl Language {
    /// Parse a locale/language code (`"en"`, `"en_US"`, `"pt-BR"`, ...),
    /// falling back to `English` for anything unrecognized.
    pub fn from_code(code: &str) -> Self {
        let primary = code.split(['_', '-']).next().unwrap_or(code).to_lowercase();
        match primary.as_str() {
            "es" => Language::Spanish,
            "fr" => Language::French,
            "de" => Language::German,
            "ja" => Language::Japanese,
            "zh" => Language::ChineseSimplified,
            "pt" => Language::Portuguese,
            "ru" => Language::Russian,
            "ko" => Language::Korean,
            "it" => Language::Italian,
            _ => Language::English,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Language::English => "en",
            Language::Spanish => "es",
            Language::French => "fr",
            Language::German => "de",
            Language::Japanese => "ja",
            Language::ChineseSimplified => "zh",
            Language::Portuguese => "pt",
            Language::Russian => "ru",
            Language::Korean => "ko",
            Language::Italian => "it",
        }
    }

    /// The readable name used in the summarizer's system prompt
    /// (spec §4.4: "the target language (by readable name when known)").
    pub fn readable_name(&self) -> &'static str {
        match self {
            Language::English => "English",
            Language::Spanish => "Spanish",
            Language::French => "French",
            Language::German => "German",
            Language::Japanese => "Japanese",
            Language::ChineseSimplified => "Chinese",
            Language::Portuguese => "Portuguese",
            Language::Russian => "Russian",
            Language::Korean => "Korean",
            Language::Italian => "Italian",
        }
    }
}

impl Default for Language {
    fn default() -> Self {
        Language::English
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_bare_code() {
        assert_eq!(Language::from_code("es"), Language::Spanish);
    }

    #[test]
    fn parses_region_qualified_code() {
        assert_eq!(Language::from_code("pt-BR"), Language::Portuguese);
        assert_eq!(Language::from_code("en_US"), Language::English);
    }

    #[test]
    fn unknown_code_falls_back_to_english() {
        assert_eq!(Language::from_code("xx"), Language::English);
        assert_eq!(Language::from_code(""), Language::English);
    }

    #[test]
    fn readable_name_for_known_language() {
        assert_eq!(Language::Japanese.readable_name(), "Japanese");
    }
}
