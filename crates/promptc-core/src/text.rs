//! Pre-tokenized request text shared by every stage.

use promptc_lexer::Token;
use rustc_hash::FxHashSet;
use smol_str::SmolStr;

/// Request text with its token stream and lowercase views.
///
/// Built once per compile; stages only read it.
#[derive(Debug)]
pub struct Text<'a> {
    /// The text as given.
    pub raw: &'a str,
    /// Lowercased, whitespace-collapsed text used for phrase lookups.
    pub lower: String,
    pub tokens: Vec<Token>,
    /// Lowercased word tokens in order.
    pub words: Vec<SmolStr>,
    word_set: FxHashSet<SmolStr>,
    word_count: usize,
}

impl<'a> Text<'a> {
    pub fn new(raw: &'a str) -> Self {
        let tokens = promptc_lexer::tokenize(raw);
        let words = promptc_lexer::lower_words(raw);
        let word_count = promptc_lexer::word_count(raw);

        let mut word_set = FxHashSet::default();
        for word in &words {
            word_set.insert(word.clone());
            // `go'yu`, `well-known`: the parts are words too
            if word.contains(['\'', '’', '-']) {
                for part in word.split(['\'', '’', '-']).filter(|p| !p.is_empty()) {
                    word_set.insert(SmolStr::new(part));
                }
            }
        }

        let lower = raw
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ")
            .to_lowercase();

        Self {
            raw,
            lower,
            tokens,
            words,
            word_set,
            word_count,
        }
    }

    pub fn is_blank(&self) -> bool {
        self.lower.is_empty()
    }

    pub fn has_word(&self, word: &str) -> bool {
        self.word_set.contains(word)
    }

    /// Whether `keyword` occurs in the text.
    ///
    /// Keywords are lowercase. A single word is looked up in the word set; a
    /// trailing `*` turns it into a prefix (`öğret*` matches `öğretir`);
    /// anything else (`binary search`, `tl;dr`, `c++`) is searched as a
    /// boundary-delimited substring.
    pub fn has_phrase(&self, keyword: &str) -> bool {
        if let Some(prefix) = keyword.strip_suffix('*') {
            return self.word_set.iter().any(|w| w.starts_with(prefix));
        }
        if is_plain_word(keyword) {
            return self.has_word(keyword);
        }
        self.find_phrase(keyword).is_some()
    }

    /// Byte offset of the first bounded occurrence of `keyword` in [`Text::lower`].
    pub fn find_phrase(&self, keyword: &str) -> Option<usize> {
        let needle = keyword.trim_end_matches('*');
        if needle.is_empty() {
            return None;
        }
        let prefix = keyword.ends_with('*');
        let mut from = 0;
        while let Some(offset) = self.lower[from..].find(needle) {
            let start = from + offset;
            let end = start + needle.len();
            let before_ok = self.lower[..start]
                .chars()
                .next_back()
                .map_or(true, |c| !c.is_alphanumeric());
            let after_ok = prefix
                || self.lower[end..]
                    .chars()
                    .next()
                    .map_or(true, |c| !c.is_alphanumeric());
            if before_ok && after_ok {
                return Some(start);
            }
            from = start + self.lower[start..].chars().next().map_or(1, char::len_utf8);
        }
        None
    }

    /// Distinct keywords that occur in the text, in keyword order.
    pub fn matches<'k, I>(&self, keywords: I) -> Vec<&'k str>
    where
        I: IntoIterator<Item = &'k str>,
    {
        let mut found: Vec<&'k str> = Vec::new();
        for keyword in keywords {
            if !found.contains(&keyword) && self.has_phrase(keyword) {
                found.push(keyword);
            }
        }
        found
    }

    pub fn any(&self, keywords: &[&str]) -> bool {
        keywords.iter().any(|k| self.has_phrase(k))
    }

    /// Number of word and number tokens.
    pub fn word_count(&self) -> usize {
        self.word_count
    }
}

fn is_plain_word(keyword: &str) -> bool {
    !keyword.is_empty()
        && keyword
            .chars()
            .all(|c| c.is_alphanumeric() || matches!(c, '\'' | '’' | '-' | '_'))
        && keyword.chars().next().is_some_and(char::is_alphabetic)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_word_and_phrase_lookup() {
        let text = Text::new("Teach me  Binary Search, then write C++ code. tl;dr please");
        assert!(text.has_phrase("teach"));
        assert!(text.has_phrase("binary search"));
        assert!(text.has_phrase("c++"));
        assert!(text.has_phrase("tl;dr"));
        assert!(!text.has_phrase("search engine"));
        assert!(!text.has_phrase("bin"));
    }

    #[test]
    fn test_boundaries() {
        let text = Text::new("reactive scaling and node.js");
        assert!(!text.has_phrase("react"));
        assert!(!text.has_phrase("scale"));
        assert!(text.has_phrase("node.js"));
        assert!(!text.has_phrase("ode.js"));
    }

    #[test]
    fn test_prefix_and_suffixed_words() {
        let text = Text::new("Bana python'u öğretir misin");
        assert!(text.has_phrase("öğret*"));
        assert!(text.has_phrase("python"));
        assert!(!text.has_phrase("öğret"));
    }

    #[test]
    fn test_matches_are_distinct_in_keyword_order() {
        let text = Text::new("aws lambda on aws with kubernetes");
        let found = text.matches(["kubernetes", "aws", "gcp", "aws"]);
        assert_eq!(found, vec!["kubernetes", "aws"]);
    }

    #[test]
    fn test_find_phrase_position() {
        let text = Text::new("secure resilient scalable api");
        assert_eq!(text.find_phrase("secure"), Some(0));
        assert_eq!(text.find_phrase("scalable"), Some(17));
        assert_eq!(text.find_phrase("cure"), None);
    }

    #[test]
    fn test_words_follow_lexer() {
        let source = "Teach ME Binary-Search, 10 minutes";
        let text = Text::new(source);
        assert_eq!(text.words, promptc_lexer::lower_words(source));
        assert_eq!(text.word_count(), 5);
    }

    #[test]
    fn test_blank_text() {
        let text = Text::new(" \t\n ");
        assert!(text.is_blank());
        assert_eq!(text.word_count(), 0);
    }
}
