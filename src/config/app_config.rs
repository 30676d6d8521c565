use serde::Deserialize;

use crate::domain::pipeline::GatePolicy;
use crate::domain::DomainError;

/// Application configuration
#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub azure_openai: AzureOpenAiSettings,
    #[serde(default)]
    pub embedding: EmbeddingSettings,
    #[serde(default)]
    pub qdrant: QdrantSettings,
    #[serde(default)]
    pub pipeline: PipelineConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Azure OpenAI completion deployment
#[derive(Debug, Clone, Deserialize)]
pub struct AzureOpenAiSettings {
    pub endpoint: String,
    pub api_key: String,
    pub api_version: String,
    /// Deployment name used for chat completions
    pub deployment: String,
}

impl Default for AzureOpenAiSettings {
    fn default() -> Self {
        Self {
            endpoint: String::new(),
            api_key: String::new(),
            api_version: "2024-02-01".to_string(),
            deployment: "gpt-4o".to_string(),
        }
    }
}

/// Embedding deployment - separate endpoint and key from the completion
/// deployment, matching how the hosting subscription is provisioned
#[derive(Debug, Clone, Deserialize)]
pub struct EmbeddingSettings {
    pub endpoint: String,
    pub api_key: String,
    pub api_version: String,
    pub deployment: String,
    pub model: String,
}

impl Default for EmbeddingSettings {
    fn default() -> Self {
        Self {
            endpoint: String::new(),
            api_key: String::new(),
            api_version: "2024-02-01".to_string(),
            deployment: "text-embedding-ada-002".to_string(),
            model: "text-embedding-ada-002".to_string(),
        }
    }
}

/// Qdrant vector store connection
#[derive(Debug, Clone, Deserialize)]
pub struct QdrantSettings {
    pub url: String,
    pub api_key: Option<String>,
    pub collection: String,
}

impl Default for QdrantSettings {
    fn default() -> Self {
        Self {
            url: "http://localhost:6333".to_string(),
            api_key: None,
            collection: "campus_knowledge".to_string(),
        }
    }
}

/// Policy constants for the answer pipeline. Deployment-tunable, fixed per
/// request.
#[derive(Debug, Clone, Deserialize)]
pub struct PipelineConfig {
    /// Completion deployment used for both reformulation and generation
    #[serde(default = "default_deployment")]
    pub deployment: String,
    #[serde(default)]
    pub retrieval: RetrievalPolicy,
    #[serde(default)]
    pub gate: GatePolicy,
    #[serde(default)]
    pub generation: GenerationParams,
    #[serde(default)]
    pub reformulation: ReformulationParams,
    /// Trailing history turns included in the assembled prompt
    #[serde(default = "default_history_window")]
    pub history_window: usize,
}

fn default_deployment() -> String {
    "gpt-4o".to_string()
}

fn default_history_window() -> usize {
    6
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            deployment: default_deployment(),
            retrieval: RetrievalPolicy::default(),
            gate: GatePolicy::default(),
            generation: GenerationParams::default(),
            reformulation: ReformulationParams::default(),
            history_window: default_history_window(),
        }
    }
}

/// Retrieval fan-out policy
#[derive(Debug, Clone, Deserialize)]
pub struct RetrievalPolicy {
    /// Documents handed to the gate per query
    pub top_k: u32,
    /// Loose floor passed to the vector backend; the gate applies the strict
    /// threshold afterwards
    pub search_floor: f32,
}

impl Default for RetrievalPolicy {
    fn default() -> Self {
        Self {
            top_k: 5,
            search_floor: 0.4,
        }
    }
}

/// Sampling parameters for answer generation, tuned for low hallucination
/// and low repetition rather than creativity
#[derive(Debug, Clone, Deserialize)]
pub struct GenerationParams {
    pub temperature: f32,
    pub max_tokens: u32,
    pub top_p: f32,
    pub frequency_penalty: f32,
    pub presence_penalty: f32,
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self {
            temperature: 0.4,
            max_tokens: 500,
            top_p: 0.9,
            frequency_penalty: 0.3,
            presence_penalty: 0.2,
        }
    }
}

/// Query reformulation policy
#[derive(Debug, Clone, Deserialize)]
pub struct ReformulationParams {
    pub temperature: f32,
    pub max_tokens: u32,
    /// Questions longer than this many words are treated as already
    /// standalone and skip the rewrite call
    pub max_passthrough_words: usize,
    /// Trailing history turns embedded in the rewrite prompt
    pub history_window: usize,
}

impl Default for ReformulationParams {
    fn default() -> Self {
        Self {
            temperature: 0.3,
            max_tokens: 100,
            max_passthrough_words: 10,
            history_window: 6,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::default(),
        }
    }
}

impl AppConfig {
    pub fn load() -> Result<Self, DomainError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(
                config::Environment::with_prefix("APP")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| DomainError::configuration(e.to_string()))?;

        config
            .try_deserialize()
            .map_err(|e| DomainError::configuration(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_policy_constants() {
        let config = PipelineConfig::default();

        assert_eq!(config.retrieval.top_k, 5);
        assert_eq!(config.gate.similarity_threshold, 0.55);
        assert_eq!(config.gate.min_relevant_docs, 1);
        assert_eq!(config.generation.temperature, 0.4);
        assert_eq!(config.generation.max_tokens, 500);
        assert_eq!(config.generation.top_p, 0.9);
        assert_eq!(config.generation.frequency_penalty, 0.3);
        assert_eq!(config.generation.presence_penalty, 0.2);
        assert_eq!(config.reformulation.max_passthrough_words, 10);
        assert_eq!(config.history_window, 6);
    }

    #[test]
    fn test_load_reports_configuration_error() {
        unsafe { std::env::set_var("APP__PIPELINE__RETRIEVAL__TOP_K", "not-a-number") };
        let result = AppConfig::load();
        unsafe { std::env::remove_var("APP__PIPELINE__RETRIEVAL__TOP_K") };

        assert!(matches!(result, Err(DomainError::Configuration { .. })));
    }

    #[test]
    fn test_pipeline_config_deserializes_with_partial_input() {
        let config: PipelineConfig =
            serde_json::from_str(r#"{"deployment": "gpt-4o-mini"}"#).unwrap();

        assert_eq!(config.deployment, "gpt-4o-mini");
        assert_eq!(config.retrieval.top_k, 5);
        assert_eq!(config.gate.similarity_threshold, 0.55);
    }
}
