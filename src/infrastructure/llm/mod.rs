//! Completion provider implementations

mod azure_openai;

pub use azure_openai::AzureOpenAiProvider;

pub(crate) use azure_openai::map_http_error;
