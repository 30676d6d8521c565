//! Persona domain - versioned system-prompt text managed outside the pipeline
//!
//! The persona carries the assistant's business copy (identity, tone, campus
//! facts). Keeping it behind a store keeps pipeline logic free of that copy.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use uuid::Uuid;

use super::DomainError;

/// A versioned persona/system prompt
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Persona {
    pub id: Uuid,
    pub name: String,
    pub content: String,
    pub version: u32,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Persona {
    pub fn new(name: impl Into<String>, content: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            content: content.into(),
            version: 1,
            active: false,
            created_at: now,
            updated_at: now,
        }
    }

    /// Replace the content, bumping the version.
    pub fn revise(&mut self, content: impl Into<String>) {
        self.content = content.into();
        self.version += 1;
        self.updated_at = Utc::now();
    }
}

/// Read interface to the persona store.
///
/// The pipeline only ever reads; editing and activation belong to the admin
/// surface that owns the store.
#[async_trait]
pub trait PersonaStore: Send + Sync + Debug {
    /// The currently active persona, if any.
    async fn active(&self) -> Result<Option<Persona>, DomainError>;

    /// Get a persona by id.
    async fn get(&self, id: &Uuid) -> Result<Option<Persona>, DomainError>;

    /// List all personas.
    async fn list(&self) -> Result<Vec<Persona>, DomainError>;
}
