//! In-memory persona store

use std::sync::RwLock;

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::persona::{Persona, PersonaStore};
use crate::domain::DomainError;

/// Thread-safe in-memory persona store
///
/// Holds the persona catalog for deployments without a database. At most one
/// persona is active at a time; activating one deactivates the rest.
#[derive(Debug, Default)]
pub struct InMemoryPersonaStore {
    personas: RwLock<Vec<Persona>>,
}

impl InMemoryPersonaStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-populated with a single active persona.
    pub fn with_active(name: impl Into<String>, content: impl Into<String>) -> Self {
        let mut persona = Persona::new(name, content);
        persona.active = true;

        Self {
            personas: RwLock::new(vec![persona]),
        }
    }

    pub fn insert(&self, persona: Persona) -> Result<(), DomainError> {
        let mut personas = self
            .personas
            .write()
            .map_err(|e| DomainError::internal(format!("Failed to acquire write lock: {}", e)))?;

        personas.push(persona);
        Ok(())
    }

    /// Marks the given persona active and deactivates every other one.
    pub fn activate(&self, id: &Uuid) -> Result<(), DomainError> {
        let mut personas = self
            .personas
            .write()
            .map_err(|e| DomainError::internal(format!("Failed to acquire write lock: {}", e)))?;

        if !personas.iter().any(|p| p.id == *id) {
            return Err(DomainError::not_found(format!("Persona '{}' not found", id)));
        }

        for persona in personas.iter_mut() {
            persona.active = persona.id == *id;
        }

        Ok(())
    }
}

#[async_trait]
impl PersonaStore for InMemoryPersonaStore {
    async fn active(&self) -> Result<Option<Persona>, DomainError> {
        let personas = self
            .personas
            .read()
            .map_err(|e| DomainError::internal(format!("Failed to acquire read lock: {}", e)))?;

        Ok(personas.iter().find(|p| p.active).cloned())
    }

    async fn get(&self, id: &Uuid) -> Result<Option<Persona>, DomainError> {
        let personas = self
            .personas
            .read()
            .map_err(|e| DomainError::internal(format!("Failed to acquire read lock: {}", e)))?;

        Ok(personas.iter().find(|p| p.id == *id).cloned())
    }

    async fn list(&self) -> Result<Vec<Persona>, DomainError> {
        let personas = self
            .personas
            .read()
            .map_err(|e| DomainError::internal(format!("Failed to acquire read lock: {}", e)))?;

        Ok(personas.clone())
    }
}
