//! # Answer Generator Tests
//!
//! Checks backend selection, prompt assembly, the extractive fallback and the
//! error paths of `AnswerGenerator`.

mod common;

use common::setup_tracing;
use hrqa::providers::ai::AiProvider;
use hrqa::terms::TermExtractor;
use hrqa::{AnswerError, AnswerGenerator, ContextPassage};
use hrqa_test_utils::{FixedTokenizer, MockAiProvider};
use std::sync::Arc;
use std::time::Duration;

fn contexts() -> Vec<ContextPassage> {
    vec![
        ContextPassage {
            text: "员工每年享有30天带薪年假；年假可以分三次休完。".to_string(),
            country: "巴西".to_string(),
            source: "巴西用工指南".to_string(),
            url: "https://guides.example/br".to_string(),
        },
        ContextPassage {
            text: "加班费按150%计算。".to_string(),
            country: "巴西".to_string(),
            source: "巴西用工指南".to_string(),
            url: "https://guides.example/br".to_string(),
        },
    ]
}

fn generator() -> AnswerGenerator {
    setup_tracing();
    AnswerGenerator::new(TermExtractor::new(Arc::new(FixedTokenizer::new())))
}

#[tokio::test]
async fn test_first_backend_answers_with_rendered_passages() {
    // Arrange
    let first = MockAiProvider::answering("30天。\n【更多相关参考】\n可分三次休。");
    let second = MockAiProvider::answering("unused");
    let generator = generator().with_providers(vec![
        Box::new(first.clone()) as Box<dyn AiProvider>,
        Box::new(second.clone()),
    ]);

    // Act
    let answer = generator
        .generate("巴西的年假是多少天？", &contexts())
        .await
        .unwrap();

    // Assert
    let calls = first.get_calls();
    assert_eq!(calls.len(), 1);
    let (system, user) = &calls[0];
    assert!(system.is_empty());
    assert!(user.contains("【段落1 - 来源：巴西 - 巴西用工指南】"));
    assert!(user.contains("用户问题：巴西的年假是多少天？"));
    assert!(second.get_calls().is_empty());

    assert!(answer.starts_with("## ✨ 第一部分：精准回答"));
    assert!(answer.contains("## 📖 第二部分：更多相关参考"));
    assert!(answer.contains("## 📚 第三部分：知识库原文段落"));
    assert_eq!(answer.matches("<a href=").count(), 1);
}

#[tokio::test]
async fn test_backend_failure_is_an_error() {
    let generator = generator().with_providers(vec![
        Box::new(MockAiProvider::failing("quota exceeded")) as Box<dyn AiProvider>,
    ]);

    let err = generator.generate("问题", &contexts()).await.unwrap_err();

    assert!(matches!(err, AnswerError::Prompt(_)), "got {err:?}");
}

#[derive(Clone, Debug)]
struct SlowProvider;

#[async_trait::async_trait]
impl AiProvider for SlowProvider {
    fn name(&self) -> &str {
        "slow"
    }

    async fn generate(&self, _: &str, _: &str) -> Result<String, hrqa::PromptError> {
        tokio::time::sleep(Duration::from_millis(500)).await;
        Ok("late".to_string())
    }
}

#[tokio::test]
async fn test_slow_backend_times_out() {
    let generator = generator()
        .with_providers(vec![Box::new(SlowProvider) as Box<dyn AiProvider>])
        .with_timeout(Duration::from_millis(20));

    let err = generator.generate("问题", &contexts()).await.unwrap_err();

    assert!(matches!(err, AnswerError::Timeout { .. }), "got {err:?}");
}

#[tokio::test]
async fn test_without_backend_answers_extractively() {
    let generator = generator();
    assert!(generator.backend_name().is_none());

    let answer = generator
        .generate("巴西的年假是多少天？", &contexts())
        .await
        .unwrap();

    assert!(answer.contains("- 员工每年享有30天带薪年假；"));
    assert!(answer.contains("基于检索到的政策内容"));
    assert!(answer.contains("**段落 2** - 巴西 - 巴西用工指南"));
}

#[tokio::test]
async fn test_no_contexts_short_circuits() {
    let provider = MockAiProvider::answering("unused");
    let generator =
        generator().with_providers(vec![Box::new(provider.clone()) as Box<dyn AiProvider>]);

    let answer = generator.generate("问题", &[]).await.unwrap();

    assert_eq!(answer, hrqa::constants::NO_CONTEXT_ANSWER);
    assert!(provider.get_calls().is_empty());
}
