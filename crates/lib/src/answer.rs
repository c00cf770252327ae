//! # Answer Generation
//!
//! Turns retrieved passages into the four-part answer the API returns:
//!
//! 1. 精准回答, the direct answer.
//! 2. 更多相关参考, supporting notes.
//! 3. 知识库原文段落, the passages themselves.
//! 4. 原始文章链接, links to the source guides.
//!
//! Parts 1 and 2 come from the first configured generative backend, or from an
//! extractive summary of the best passage when no backend is configured. Parts
//! 3 and 4 are always rendered here.

use crate::{
    constants::NO_CONTEXT_ANSWER,
    errors::AnswerError,
    prompts::tasks::ANSWER_USER_PROMPT,
    providers::ai::AiProvider,
    terms::TermExtractor,
    types::ContextPassage,
};
use std::{collections::HashSet, time::Duration};
use tracing::{debug, info};

pub const DEFAULT_GENERATION_TIMEOUT: Duration = Duration::from_secs(60);

const ANSWER_HEADING: &str = "## ✨ 第一部分：精准回答";
const REFERENCE_HEADING: &str = "## 📖 第二部分：更多相关参考";
const PASSAGES_HEADING: &str = "## 📚 第三部分：知识库原文段落";
const LINKS_HEADING: &str = "## 🔗 第四部分：原始文章链接";
const REFERENCE_MARKER: &str = "【更多相关参考】";

const PASSAGE_PREVIEW_CHARS: usize = 300;
const MAX_EXTRACTED_SENTENCES: usize = 5;
const MIN_SENTENCE_CHARS: usize = 10;
const FALLBACK_SENTENCE_CHARS: usize = 20;

/// Words that usually sit in sentences stating a concrete rule.
const HR_UNIT_TERMS: &[&str] = &[
    "工资", "年假", "试用期", "小时", "天", "周", "月", "小时", "美元", "欧元", "英镑",
];

#[derive(Debug, Clone)]
pub struct AnswerGenerator {
    providers: Vec<Box<dyn AiProvider>>,
    extractor: TermExtractor,
    user_prompt: String,
    timeout: Duration,
}

impl AnswerGenerator {
    /// A generator with no backends; it answers extractively until one is added.
    pub fn new(extractor: TermExtractor) -> Self {
        Self {
            providers: Vec::new(),
            extractor,
            user_prompt: ANSWER_USER_PROMPT.to_string(),
            timeout: DEFAULT_GENERATION_TIMEOUT,
        }
    }

    /// Backends in order of preference. Only the first one is called.
    pub fn with_providers(mut self, providers: Vec<Box<dyn AiProvider>>) -> Self {
        self.providers = providers;
        self
    }

    /// Replaces the answer template. It must contain `{context}` and `{question}`.
    pub fn with_user_prompt(mut self, template: impl Into<String>) -> Self {
        self.user_prompt = template.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn backend_name(&self) -> Option<&str> {
        self.providers.first().map(|p| p.name())
    }

    pub async fn generate(
        &self,
        question: &str,
        contexts: &[ContextPassage],
    ) -> Result<String, AnswerError> {
        if contexts.is_empty() {
            return Ok(NO_CONTEXT_ANSWER.to_string());
        }

        let draft = match self.providers.first() {
            Some(provider) => {
                let user_prompt = self
                    .user_prompt
                    .replace("{context}", &render_context(contexts))
                    .replace("{question}", question);
                info!("Generating answer with '{}'", provider.name());
                debug!(user_prompt = %user_prompt, "--> Sending answer prompt");
                tokio::time::timeout(self.timeout, provider.generate("", &user_prompt))
                    .await
                    .map_err(|_| AnswerError::Timeout {
                        operation: "answer generation",
                        after: self.timeout,
                    })??
            }
            None => {
                info!("No generative backend configured, answering extractively");
                let keywords = self.extractor.extract_unscoped(question);
                extractive_answer(&keywords, &contexts[0])
            }
        };

        Ok(finalize(draft, contexts))
    }
}

/// Renders passages for the answer prompt.
pub fn render_context(contexts: &[ContextPassage]) -> String {
    contexts
        .iter()
        .enumerate()
        .map(|(i, ctx)| {
            format!(
                "【段落{} - 来源：{} - {}】\n{}",
                i + 1,
                ctx.country,
                ctx.source,
                ctx.text
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n---\n\n")
}

/// Picks the most informative sentences of `passage` and lays them out as the
/// first two answer sections.
pub fn extractive_answer(keywords: &[String], passage: &ContextPassage) -> String {
    let text = passage.text.replace("  ", " ").replace("   ", " ");
    let sentences: Vec<&str> = text
        .trim()
        .split_inclusive(['。', '；'])
        .collect();

    let mut scored: Vec<(&str, usize)> = sentences
        .iter()
        .map(|s| s.trim())
        .filter(|s| s.chars().count() >= MIN_SENTENCE_CHARS)
        .map(|s| (s, score_sentence(s, keywords)))
        .filter(|(_, score)| *score > 0)
        .collect();
    scored.sort_by(|a, b| b.1.cmp(&a.1));

    let mut selected: Vec<&str> = scored
        .into_iter()
        .take(MAX_EXTRACTED_SENTENCES)
        .map(|(s, _)| s)
        .collect();
    if selected.is_empty() {
        selected = sentences
            .iter()
            .take(3)
            .map(|s| s.trim())
            .filter(|s| s.chars().count() > FALLBACK_SENTENCE_CHARS)
            .collect();
    }

    let mut answer = format!("{ANSWER_HEADING}\n\n");
    for sentence in selected {
        answer.push_str(&format!("- {sentence}\n"));
    }
    answer.push_str(&format!(
        "\n{REFERENCE_HEADING}\n\n基于检索到的政策内容，建议关注具体实施细节和最新法规更新。\n"
    ));
    answer
}

fn score_sentence(sentence: &str, keywords: &[String]) -> usize {
    let digit = if sentence.chars().any(char::is_numeric) { 3 } else { 0 };
    let keyword_hits = keywords
        .iter()
        .filter(|kw| sentence.contains(kw.as_str()))
        .count();
    let unit_hits = HR_UNIT_TERMS
        .iter()
        .filter(|term| sentence.contains(*term))
        .count();
    digit + keyword_hits + unit_hits
}

/// Adds the headings a model answer lacks, then appends the passages and links.
pub fn finalize(draft: String, contexts: &[ContextPassage]) -> String {
    let mut answer = draft;
    if !answer.starts_with("## ") {
        answer = format!("{ANSWER_HEADING}\n\n{answer}");
        if answer.contains(REFERENCE_MARKER) {
            answer = answer.replace(REFERENCE_MARKER, REFERENCE_HEADING);
        } else if !answer.contains("第二部分") {
            answer.push_str(&format!(
                "\n\n{REFERENCE_HEADING}\n\n更多详细信息请参考下方原文段落。"
            ));
        }
    }

    if contexts.is_empty() {
        return answer;
    }

    answer.push_str(&format!("\n\n---\n\n{PASSAGES_HEADING}\n\n"));
    for (i, ctx) in contexts.iter().enumerate() {
        answer.push_str(&format!(
            "**段落 {}** - {} - {}\n\n> {}\n\n",
            i + 1,
            ctx.country,
            ctx.source,
            preview(&ctx.text)
        ));
    }

    answer.push_str(&format!("---\n\n{LINKS_HEADING}\n\n"));
    let mut seen = HashSet::new();
    for ctx in contexts {
        if !ctx.url.is_empty() && seen.insert(ctx.url.as_str()) {
            answer.push_str(&format!(
                "- <a href=\"{}\" target=\"_blank\" style=\"color:#00726d;text-decoration:none;font-weight:500;\">{} - {}</a>\n",
                ctx.url, ctx.country, ctx.source
            ));
        }
    }
    answer
}

fn preview(text: &str) -> String {
    match text.char_indices().nth(PASSAGE_PREVIEW_CHARS) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn passage(text: &str, url: &str) -> ContextPassage {
        ContextPassage {
            text: text.to_string(),
            country: "巴西".to_string(),
            source: "巴西用工指南".to_string(),
            url: url.to_string(),
        }
    }

    #[test]
    fn context_is_numbered_and_separated() {
        let rendered = render_context(&[passage("甲", ""), passage("乙", "")]);
        assert_eq!(
            rendered,
            "【段落1 - 来源：巴西 - 巴西用工指南】\n甲\n\n---\n\n【段落2 - 来源：巴西 - 巴西用工指南】\n乙"
        );
    }

    #[test]
    fn model_marker_becomes_second_heading() {
        let out = finalize("年假30天。\n【更多相关参考】\n可分三次休。".to_string(), &[]);
        assert!(out.starts_with(ANSWER_HEADING));
        assert!(out.contains(REFERENCE_HEADING));
        assert!(!out.contains(REFERENCE_MARKER));
    }

    #[test]
    fn missing_second_part_gets_a_default() {
        let out = finalize("年假30天。".to_string(), &[]);
        assert!(out.ends_with("更多详细信息请参考下方原文段落。"));
    }

    #[test]
    fn links_are_deduplicated_and_long_passages_truncated() {
        let long = "长".repeat(301);
        let contexts = vec![passage(&long, "https://a.example"), passage("短", "https://a.example")];
        let out = finalize("## 已有标题".to_string(), &contexts);

        assert!(out.contains(&format!("> {}...", "长".repeat(300))));
        assert_eq!(out.matches("<a href=\"https://a.example\"").count(), 1);
        assert!(out.contains(PASSAGES_HEADING));
        assert!(out.contains(LINKS_HEADING));
    }

    #[test]
    fn extractive_answer_prefers_sentences_with_numbers() {
        let text = "巴西劳动法对员工的休假有专门规定。员工每年享有30天带薪年假；年假可以分三次休完。这是一个没有关键内容的普通句子。";
        let answer = extractive_answer(&["巴西".to_string()], &passage(text, ""));
        let first = answer.lines().find(|l| l.starts_with("- ")).unwrap();
        assert_eq!(first, "- 员工每年享有30天带薪年假；");
        assert!(answer.contains(REFERENCE_HEADING));
    }

    #[test]
    fn extractive_answer_drops_short_sentences() {
        let answer = extractive_answer(&[], &passage("年假30天。", ""));
        assert!(!answer.lines().any(|l| l.starts_with("- ")));
    }
}
