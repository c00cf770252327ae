//! # Application State
//!
//! This module defines the shared application state (`AppState`) and the logic
//! for building it at startup. Everything in it is read-only after startup, so
//! handlers share it through cheap clones.

use crate::config::{AppConfig, ProviderConfig};
use hrqa::{
    providers::{
        ai::{
            anthropic::{AnthropicProvider, DEFAULT_ANTHROPIC_API_URL},
            local::LocalAiProvider,
            AiProvider,
        },
        store::{ChromaStore, DocumentStore, EmbeddingSettings},
    },
    terms::TermExtractor,
    AnswerGenerator, JiebaTokenizer, RetrievalPipeline, Tokenizer,
};
use std::{collections::HashMap, sync::Arc};
use tracing::{info, warn};

/// The provider and prompt used by the web-search endpoint.
#[derive(Clone, Debug)]
pub struct WebSearch {
    pub provider: Box<dyn AiProvider>,
    pub user_prompt: String,
}

/// The shared application state, accessible from all request handlers.
#[derive(Clone)]
pub struct AppState {
    /// The application's configuration, loaded from `config.yml`.
    pub config: Arc<AppConfig>,
    pub pipeline: Arc<RetrievalPipeline>,
    pub answer_generator: Arc<AnswerGenerator>,
    /// `None` when no usable web-search provider is configured.
    pub web_search: Option<Arc<WebSearch>>,
}

/// Builds the shared application state from the configuration.
///
/// Connects to the Chroma collection named in `store` and loads the jieba
/// dictionary, then hands over to [`build_app_state_with`].
pub async fn build_app_state(config: AppConfig) -> anyhow::Result<AppState> {
    let embedding = EmbeddingSettings {
        api_url: config.embedding.api_url.clone(),
        model: config.embedding.model_name.clone(),
        api_key: config.embedding.api_key.clone().filter(|k| !k.is_empty()),
    };
    let store = ChromaStore::connect(&config.store.url, &config.store.collection, embedding).await?;
    let tokenizer = JiebaTokenizer::new();

    build_app_state_with(config, Arc::new(store), Arc::new(tokenizer))
}

/// Builds the application state around an already constructed store and
/// tokenizer.
pub fn build_app_state_with(
    config: AppConfig,
    store: Arc<dyn DocumentStore>,
    tokenizer: Arc<dyn Tokenizer>,
) -> anyhow::Result<AppState> {
    // Instantiate every configured provider, keyed by its name in the config.
    let mut ai_providers: HashMap<String, Box<dyn AiProvider>> = HashMap::new();
    for (name, provider_config) in &config.providers {
        match build_provider(name, provider_config, false)? {
            Some(provider) => {
                ai_providers.insert(name.clone(), provider);
            }
            None => warn!("Provider '{name}' has no api_key and is disabled."),
        }
    }

    let answer_providers: Vec<Box<dyn AiProvider>> = config
        .answer
        .providers
        .iter()
        .filter_map(|name| ai_providers.get(name).cloned())
        .collect();
    match answer_providers.first() {
        Some(provider) => info!("Answers will be generated by '{}'.", provider.name()),
        None => info!("No answer provider available; answers will be extracted from passages."),
    }

    let web_search = match &config.web_search.provider {
        Some(name) => match config.providers.get(name) {
            Some(provider_config) => build_provider(name, provider_config, true)?.map(|provider| {
                Arc::new(WebSearch {
                    provider,
                    user_prompt: config.web_search.user_prompt.clone(),
                })
            }),
            None => {
                return Err(anyhow::anyhow!(
                    "web_search.provider '{name}' is not defined under providers"
                ))
            }
        },
        None => None,
    };

    let pipeline = RetrievalPipeline::new(store, tokenizer.clone(), config.retrieval.clone())?
        .with_store_timeout(config.timeouts.store());

    let answer_generator = AnswerGenerator::new(TermExtractor::new(tokenizer))
        .with_providers(answer_providers)
        .with_user_prompt(config.answer.user_prompt.clone())
        .with_timeout(config.timeouts.generation());

    Ok(AppState {
        config: Arc::new(config),
        pipeline: Arc::new(pipeline),
        answer_generator: Arc::new(answer_generator),
        web_search,
    })
}

/// Instantiates one configured provider, or `None` if it has no key.
fn build_provider(
    name: &str,
    provider_config: &ProviderConfig,
    web_search: bool,
) -> anyhow::Result<Option<Box<dyn AiProvider>>> {
    let Some(api_key) = provider_config.configured_key() else {
        return Ok(None);
    };

    let provider: Box<dyn AiProvider> = match provider_config.provider.as_str() {
        "local" => {
            let api_url = provider_config.api_url.clone().ok_or_else(|| {
                anyhow::anyhow!("api_url is required for local provider '{name}'")
            })?;
            Box::new(
                LocalAiProvider::new(
                    name,
                    api_url,
                    Some(api_key.to_string()),
                    Some(provider_config.model_name.clone()),
                )?
                .with_max_tokens(provider_config.max_tokens)
                .with_web_search(web_search),
            )
        }
        "anthropic" if web_search => {
            return Err(anyhow::anyhow!(
                "Provider '{name}' cannot serve web search; only 'local' providers support it"
            ));
        }
        "anthropic" => {
            let api_url = provider_config
                .api_url
                .clone()
                .unwrap_or_else(|| DEFAULT_ANTHROPIC_API_URL.to_string());
            Box::new(
                AnthropicProvider::new(
                    name,
                    api_url,
                    api_key.to_string(),
                    provider_config.model_name.clone(),
                )?
                .with_max_tokens(provider_config.max_tokens),
            )
        }
        _ => {
            return Err(anyhow::anyhow!(
                "Unsupported AI provider type '{}' for provider '{}'",
                provider_config.provider,
                name
            ));
        }
    };
    Ok(Some(provider))
}
