//! # Word Segmentation
//!
//! Chinese questions have no spaces, so keyword extraction needs a segmenter.
//! The [`Tokenizer`] trait keeps the pipeline independent of which one is used.

use jieba_rs::Jieba;
use std::fmt::{self, Debug};

/// Splits text into word-like tokens. Must be deterministic and free of I/O.
pub trait Tokenizer: Send + Sync + Debug {
    fn segment(&self, text: &str) -> Vec<String>;
}

/// A [`Tokenizer`] backed by jieba's bundled dictionary with HMM enabled for
/// out-of-vocabulary words.
///
/// Loading the dictionary takes a noticeable moment, so build one at startup
/// and share it.
pub struct JiebaTokenizer {
    jieba: Jieba,
}

impl JiebaTokenizer {
    pub fn new() -> Self {
        Self {
            jieba: Jieba::new(),
        }
    }
}

impl Default for JiebaTokenizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Debug for JiebaTokenizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JiebaTokenizer").finish_non_exhaustive()
    }
}

impl Tokenizer for JiebaTokenizer {
    fn segment(&self, text: &str) -> Vec<String> {
        self.jieba
            .cut(text, true)
            .into_iter()
            .map(str::to_string)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn segments_cover_the_whole_input() {
        let tokenizer = JiebaTokenizer::new();
        let question = "巴西的年假是多少天？";
        let tokens = tokenizer.segment(question);
        assert!(tokens.len() > 1);
        assert_eq!(tokens.concat(), question);
    }

    #[test]
    fn segmentation_is_deterministic() {
        let tokenizer = JiebaTokenizer::new();
        let question = "德国的试用期最长可以多久";
        assert_eq!(tokenizer.segment(question), tokenizer.segment(question));
    }
}
