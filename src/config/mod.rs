//! Application configuration

mod app_config;

pub use app_config::{
    AppConfig, AzureOpenAiSettings, EmbeddingSettings, GenerationParams, LogFormat, LoggingConfig,
    PipelineConfig, QdrantSettings, ReformulationParams, RetrievalPolicy,
};
