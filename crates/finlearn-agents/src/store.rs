use std::collections::HashMap;

use async_trait::async_trait;
use finlearn_models::content_piece::{ContentPiece, ContentReference};
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

use crate::error::AgentError;

/// Persistence for finished content. Pipeline runs never write to it.
#[async_trait]
pub trait ContentStore: Send + Sync {
    /// Insert or replace a piece by id.
    async fn save(&self, piece: ContentPiece) -> Result<(), AgentError>;

    async fn get(&self, id: Uuid) -> Result<Option<ContentPiece>, AgentError>;

    /// Lightweight references to every stored piece, ordered by title.
    async fn references(&self) -> Result<Vec<ContentReference>, AgentError>;
}

/// Process-local store backed by a map.
#[derive(Debug, Default)]
pub struct MemoryStore {
    pieces: RwLock<HashMap<Uuid, ContentPiece>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.pieces.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.pieces.read().await.is_empty()
    }
}

#[async_trait]
impl ContentStore for MemoryStore {
    async fn save(&self, piece: ContentPiece) -> Result<(), AgentError> {
        debug!(id = %piece.id, slug = %piece.slug, "Storing content piece");
        self.pieces.write().await.insert(piece.id, piece);
        Ok(())
    }

    async fn get(&self, id: Uuid) -> Result<Option<ContentPiece>, AgentError> {
        Ok(self.pieces.read().await.get(&id).cloned())
    }

    async fn references(&self) -> Result<Vec<ContentReference>, AgentError> {
        let mut refs: Vec<ContentReference> = self
            .pieces
            .read()
            .await
            .values()
            .map(ContentReference::from)
            .collect();
        refs.sort_by(|a, b| a.title.cmp(&b.title));
        Ok(refs)
    }
}
