use async_trait::async_trait;
use std::path::Path;
use tokio::sync::RwLock;

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::Card;
use crate::domain::ports::CardSet;

/// Card set backed by a vector, optionally loaded from a host JSON export.
#[derive(Debug, Default)]
pub struct InMemoryCardSet {
    cards: RwLock<Vec<Card>>,
}

impl InMemoryCardSet {
    pub fn new(cards: Vec<Card>) -> Self {
        Self {
            cards: RwLock::new(cards),
        }
    }

    /// Load a JSON array of cards.
    pub async fn load(path: impl AsRef<Path>) -> DomainResult<Self> {
        let path = path.as_ref();
        let raw = tokio::fs::read_to_string(path).await.map_err(|e| {
            DomainError::HostReadFailed(format!("{}: {e}", path.display()))
        })?;
        let cards: Vec<Card> = serde_json::from_str(&raw)?;
        Ok(Self::new(cards))
    }

    /// Swap in a fresh export.
    pub async fn replace(&self, cards: Vec<Card>) {
        *self.cards.write().await = cards;
    }
}

#[async_trait]
impl CardSet for InMemoryCardSet {
    async fn all(&self) -> DomainResult<Vec<Card>> {
        Ok(self.cards.read().await.clone())
    }
}
