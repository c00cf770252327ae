//! # Keyword Extraction
//!
//! Turns a question into the ordered list of keywords the scorer counts in
//! each passage.

use crate::{
    catalog::{SINGLE_CHAR_TERMS, STOPWORDS},
    tokenizer::Tokenizer,
};
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct TermExtractor {
    tokenizer: Arc<dyn Tokenizer>,
    stopwords: &'static [&'static str],
    single_char_terms: &'static [&'static str],
}

impl TermExtractor {
    pub fn new(tokenizer: Arc<dyn Tokenizer>) -> Self {
        Self {
            tokenizer,
            stopwords: STOPWORDS,
            single_char_terms: SINGLE_CHAR_TERMS,
        }
    }

    /// Keywords for country-scoped scoring.
    ///
    /// Drops stopwords and the country name itself. Single characters survive
    /// only when they are on the HR allow-list (年, 假, 税, ...), since a lone
    /// Chinese character is usually too ambiguous to count as a match.
    /// Duplicates are kept: a word the user repeats counts twice.
    pub fn extract(&self, question: &str, exclude_country: Option<&str>) -> Vec<String> {
        self.tokens(question)
            .filter(|token| exclude_country != Some(token.as_str()))
            .filter(|token| {
                token.chars().count() > 1 || self.single_char_terms.contains(&token.as_str())
            })
            .collect()
    }

    /// Keywords for unscoped scoring: anything longer than one character that
    /// is not a stopword.
    pub fn extract_unscoped(&self, question: &str) -> Vec<String> {
        self.tokens(question)
            .filter(|token| token.chars().count() > 1)
            .collect()
    }

    fn tokens<'a>(&'a self, question: &str) -> impl Iterator<Item = String> + 'a {
        self.tokenizer
            .segment(question)
            .into_iter()
            .filter(|token| !token.trim().is_empty())
            .filter(move |token| !self.stopwords.contains(&token.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Splits on spaces so each test controls the exact token stream.
    #[derive(Debug)]
    struct SpaceTokenizer;

    impl Tokenizer for SpaceTokenizer {
        fn segment(&self, text: &str) -> Vec<String> {
            text.split(' ').map(str::to_string).collect()
        }
    }

    fn extractor() -> TermExtractor {
        TermExtractor::new(Arc::new(SpaceTokenizer))
    }

    #[test]
    fn drops_stopwords_and_the_country() {
        let keywords = extractor().extract("巴西 的 年假 是 多少 天 ？", Some("巴西"));
        assert_eq!(keywords, vec!["年假"]);
    }

    #[test]
    fn keeps_allow_listed_single_characters() {
        let keywords = extractor().extract("德国 年 假 税 天 费", Some("德国"));
        assert_eq!(keywords, vec!["年", "假", "税", "费"]);
    }

    #[test]
    fn unscoped_extraction_keeps_country_and_drops_single_characters() {
        let keywords = extractor().extract_unscoped("巴西 的 年 最低工资 是 多少");
        assert_eq!(keywords, vec!["巴西", "最低工资"]);
    }

    #[test]
    fn repeated_words_are_kept_in_order() {
        let keywords = extractor().extract("加班 工资 加班", None);
        assert_eq!(keywords, vec!["加班", "工资", "加班"]);
    }

    #[test]
    fn blank_tokens_are_ignored() {
        let keywords = extractor().extract_unscoped("年假   天数");
        assert_eq!(keywords, vec!["年假", "天数"]);
    }
}
