//! # Static Lookup Tables
//!
//! Everything the relevance heuristics know about the domain lives here as
//! plain data. The tables are read-only for the lifetime of the process.

pub mod concepts;
pub mod countries;

pub use concepts::{Concept, Trigger, DOMAIN_CONCEPTS};
pub use countries::{known_countries, COUNTRY_ALIASES, SUPPORTED_COUNTRIES, UNSUPPORTED_COUNTRIES};

/// Substrings that mark a question as a probe about something made up.
pub const FICTIONAL_MARKERS: &[&str] = &[
    "火星", "月球", "测试", "abcdefg", "不存在", "虚拟", "假的", "虚构", "幻想",
];

/// Interrogatives and particles that never make useful match terms.
pub const STOPWORDS: &[&str] = &[
    "什么", "哪些", "如何", "怎么", "多少", "为什么", "是否", "有没有", "的", "了", "吗", "呢", "？",
];

/// Single characters specific enough to keep as keywords in scoped retrieval.
pub const SINGLE_CHAR_TERMS: &[&str] = &["年", "假", "税", "金", "费", "期"];
