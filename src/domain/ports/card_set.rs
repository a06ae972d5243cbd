//! Card set port.

use async_trait::async_trait;

use crate::domain::errors::DomainResult;
use crate::domain::models::Card;

/// Read-only view of the host's spaced-repetition cards.
#[async_trait]
pub trait CardSet: Send + Sync {
    async fn all(&self) -> DomainResult<Vec<Card>>;
}
