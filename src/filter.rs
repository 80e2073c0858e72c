//! Banned-word redaction for message content.
//!
//! Each banned word is matched as a case-insensitive literal substring, with no
//! word-boundary anchoring, and every occurrence is replaced by [`MASK`]. Words
//! are applied one pass at a time in list order against the text produced by
//! the previous pass.

use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const MASK: &str = "***";

#[derive(Debug, Error)]
pub enum FilterError {
    #[error("banned word {0:?} contains the mask character")]
    ContainsMask(String),
    #[error("couldn't compile banned word {word:?}: {source}")]
    Compile {
        word: String,
        #[source]
        source: regex::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WordFilterConfig {
    pub enabled: bool,
    pub banned_words: Vec<String>,
}

impl Default for WordFilterConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            banned_words: Vec::new(),
        }
    }
}

impl WordFilterConfig {
    pub fn new<I, S>(enabled: bool, banned_words: I) -> Result<Self, FilterError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut config = Self { enabled, banned_words: Vec::new() };
        config.set_banned_words(banned_words)?;
        Ok(config)
    }

    /// Replaces the banned words, trimming each entry and dropping blanks and
    /// duplicates. Order of first occurrence is kept. Words containing `*` are
    /// rejected.
    pub fn set_banned_words<I, S>(&mut self, words: I) -> Result<(), FilterError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut banned_words: Vec<String> = Vec::new();
        for word in words {
            let word = word.as_ref().trim();
            if word.is_empty() || banned_words.iter().any(|w| w == word) {
                continue;
            }
            // a later word must never match across an earlier mask
            if word.contains('*') {
                return Err(FilterError::ContainsMask(word.to_owned()));
            }
            banned_words.push(word.to_owned());
        }
        self.banned_words = banned_words;
        Ok(())
    }
}

/// Splits the admin's comma separated word list (`価格, 料金, price`).
pub fn parse_banned_words(list: &str) -> Vec<&str> {
    list.split([',', '、']).map(str::trim).filter(|w| !w.is_empty()).collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Filtered {
    pub filtered: String,
    pub is_filtered: bool,
}

/// A compiled [`WordFilterConfig`].
#[derive(Debug, Clone)]
pub struct MessageFilter {
    enabled: bool,
    matchers: Vec<Regex>,
}

impl MessageFilter {
    pub fn new(config: &WordFilterConfig) -> Result<Self, FilterError> {
        let matchers = config.banned_words
            .iter()
            .map(|word| {
                RegexBuilder::new(&regex::escape(word))
                    .case_insensitive(true)
                    .build()
                    .map_err(|source| FilterError::Compile { word: word.clone(), source })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            enabled: config.enabled,
            matchers,
        })
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn filter(&self, text: &str) -> Filtered {
        let mut filtered = text.to_owned();
        let mut is_filtered = false;

        if self.enabled {
            for matcher in &self.matchers {
                if !matcher.is_match(&filtered) {
                    continue;
                }
                filtered = matcher.replace_all(&filtered, MASK).into_owned();
                is_filtered = true;
            }
        }

        Filtered { filtered, is_filtered }
    }
}

/// Compiles `config` and filters `text` in one go.
pub fn filter_message(text: &str, config: &WordFilterConfig) -> Result<Filtered, FilterError> {
    Ok(MessageFilter::new(config)?.filter(text))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(words: &[&str]) -> WordFilterConfig {
        WordFilterConfig::new(true, words).unwrap()
    }

    #[test]
    fn masks_every_banned_word() {
        let out = filter_message("What's your price? Contact me by email", &config(&["price", "email"])).unwrap();
        assert_eq!(out.filtered, "What's your ***? Contact me by ***");
        assert!(out.is_filtered);
    }

    #[test]
    fn matching_ignores_case() {
        let out = filter_message("Add me on WHATSAPP or whatsapp", &config(&["WhatsApp"])).unwrap();
        assert_eq!(out.filtered, "Add me on *** or ***");
        assert!(out.is_filtered);
    }

    #[test]
    fn matches_inside_longer_words() {
        let out = filter_message("the outside bar", &config(&["side"])).unwrap();
        assert_eq!(out.filtered, "the out*** bar");
    }

    #[test]
    fn japanese_words_are_masked() {
        let out = filter_message("料金はいくらですか？", &config(&["料金"])).unwrap();
        assert_eq!(out.filtered, "***はいくらですか？");
        assert!(out.is_filtered);
    }

    #[test]
    fn metacharacters_are_literal() {
        let out = filter_message("a.b and axb", &config(&["a.b"])).unwrap();
        assert_eq!(out.filtered, "*** and axb");
    }

    #[test]
    fn disabled_filter_passes_through() {
        let mut cfg = config(&["price"]);
        cfg.enabled = false;
        let out = filter_message("price", &cfg).unwrap();
        assert_eq!(out, Filtered { filtered: "price".into(), is_filtered: false });
    }

    #[test]
    fn empty_input_and_empty_list() {
        assert_eq!(filter_message("", &config(&["price"])).unwrap(), Filtered { filtered: String::new(), is_filtered: false });
        assert_eq!(filter_message("price", &config(&[])).unwrap().filtered, "price");
    }

    #[test]
    fn later_words_see_earlier_replacements() {
        // "phone number" is gone before "number" runs
        let out = filter_message("my phone number, your number", &config(&["phone number", "number"])).unwrap();
        assert_eq!(out.filtered, "my ***, your ***");
    }

    #[test]
    fn word_list_is_normalized() {
        let cfg = config(&[" price ", "", "price", "cash"]);
        assert_eq!(cfg.banned_words, vec!["price", "cash"]);
    }

    #[test]
    fn words_with_mask_characters_are_rejected() {
        assert!(matches!(WordFilterConfig::new(true, ["**"]), Err(FilterError::ContainsMask(_))));
        assert!(matches!(
            WordFilterConfig::new(true, ["price", "*x"]),
            Err(FilterError::ContainsMask(w)) if w == "*x"
        ));
        assert!(WordFilterConfig::new(true, ["price", "x"]).is_ok());
    }

    #[test]
    fn later_words_never_match_inside_a_mask() {
        let out = filter_message("pricex", &config(&["price", "x"])).unwrap();
        assert_eq!(out.filtered, "******");
    }

    #[test]
    fn serializes_as_filtered_and_is_filtered() {
        let out = filter_message("cash only", &config(&["cash"])).unwrap();
        assert_eq!(
            serde_json::to_value(&out).unwrap(),
            serde_json::json!({ "filtered": "*** only", "isFiltered": true })
        );
    }

    #[test]
    fn parses_admin_list() {
        assert_eq!(parse_banned_words("価格, 料金,,price 、 cash"), vec!["価格", "料金", "price", "cash"]);
    }
}
