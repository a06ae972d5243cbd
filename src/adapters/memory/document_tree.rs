use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::NodeId;
use crate::domain::ports::{DocumentTree, NodeRef};

/// One node of an exported document tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotNode {
    pub id: NodeId,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub parent: Option<NodeId>,
    /// Ids of the nodes tagged onto this one.
    #[serde(default)]
    pub tags: Vec<NodeId>,
}

/// `{"nodes": [...]}` as written by the host bridge.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DocumentSnapshot {
    pub nodes: Vec<SnapshotNode>,
}

/// Document tree held in a map, built in code or from a snapshot.
///
/// Nothing stops a snapshot from describing a cycle; traversals must bound
/// themselves.
#[derive(Debug, Clone, Default)]
pub struct InMemoryDocumentTree {
    nodes: HashMap<NodeId, SnapshotNode>,
}

impl InMemoryDocumentTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_snapshot(snapshot: DocumentSnapshot) -> Self {
        Self {
            nodes: snapshot
                .nodes
                .into_iter()
                .map(|n| (n.id.clone(), n))
                .collect(),
        }
    }

    pub async fn load(path: impl AsRef<Path>) -> DomainResult<Self> {
        let path = path.as_ref();
        let raw = tokio::fs::read_to_string(path).await.map_err(|e| {
            DomainError::HostReadFailed(format!("{}: {e}", path.display()))
        })?;
        let snapshot: DocumentSnapshot = serde_json::from_str(&raw)?;
        Ok(Self::from_snapshot(snapshot))
    }

    /// Add a node under `parent`.
    #[must_use]
    pub fn with_node(mut self, id: &str, text: &str, parent: Option<&str>) -> Self {
        self.nodes.insert(
            NodeId::new(id),
            SnapshotNode {
                id: NodeId::new(id),
                text: Some(text.to_string()),
                parent: parent.map(NodeId::new),
                tags: Vec::new(),
            },
        );
        self
    }

    /// Tag `node` with `tag`. Both must already exist.
    #[must_use]
    pub fn with_tag(mut self, node: &str, tag: &str) -> Self {
        if let Some(n) = self.nodes.get_mut(&NodeId::new(node)) {
            n.tags.push(NodeId::new(tag));
        }
        self
    }

    fn node(&self, id: &NodeId) -> DomainResult<&SnapshotNode> {
        self.nodes
            .get(id)
            .ok_or_else(|| DomainError::NodeNotFound(id.to_string()))
    }
}

#[async_trait]
impl DocumentTree for InMemoryDocumentTree {
    async fn tags(&self, node: &NodeId) -> DomainResult<Vec<NodeRef>> {
        let node = self.node(node)?;
        Ok(node
            .tags
            .iter()
            .map(|tag| NodeRef {
                id: tag.clone(),
                text: self.nodes.get(tag).and_then(|t| t.text.clone()),
            })
            .collect())
    }

    async fn parent(&self, node: &NodeId) -> DomainResult<Option<NodeId>> {
        Ok(self.node(node)?.parent.clone())
    }
}
