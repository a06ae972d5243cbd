//! Decides whether an edited node lies under the edit-counting tag.

use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::domain::errors::DomainResult;
use crate::domain::models::NodeId;
use crate::domain::ports::DocumentTree;

/// Walks a node's ancestor chain looking for a sentinel tag.
pub struct AncestorTagResolver {
    tree: Arc<dyn DocumentTree>,
    sentinel: String,
    max_depth: usize,
}

impl AncestorTagResolver {
    pub fn new(tree: Arc<dyn DocumentTree>, sentinel: impl Into<String>, max_depth: usize) -> Self {
        Self {
            tree,
            sentinel: sentinel.into(),
            max_depth,
        }
    }

    /// True when `node` or any ancestor carries the sentinel tag.
    ///
    /// Host read failures count as "not tagged".
    pub async fn should_count(&self, node: &NodeId) -> bool {
        match self.find_tagged_ancestor(node).await {
            Ok(found) => found.is_some(),
            Err(err) => {
                warn!(node = %node, error = %err, "ancestor walk failed, not counting edit");
                false
            }
        }
    }

    /// The nearest node at or above `node` that carries the sentinel tag.
    pub async fn find_tagged_ancestor(&self, node: &NodeId) -> DomainResult<Option<NodeId>> {
        let mut visited = HashSet::new();
        let mut current = Some(node.clone());

        while let Some(id) = current {
            if !visited.insert(id.clone()) {
                warn!(node = %node, at = %id, "cycle in ancestor chain");
                return Ok(None);
            }
            if visited.len() > self.max_depth {
                warn!(node = %node, depth = self.max_depth, "ancestor chain deeper than limit");
                return Ok(None);
            }

            let tags = self.tree.tags(&id).await?;
            if tags
                .iter()
                .any(|tag| tag.text.as_deref() == Some(self.sentinel.as_str()))
            {
                debug!(node = %node, tagged = %id, "found edit-counting tag");
                return Ok(Some(id));
            }

            current = self.tree.parent(&id).await?;
        }

        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryDocumentTree;
    use crate::domain::ports::NodeRef;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    const TAG: &str = "BmCountEdits";

    fn tree() -> InMemoryDocumentTree {
        InMemoryDocumentTree::new()
            .with_node("tag", TAG, None)
            .with_node("other-tag", "Reading", None)
            .with_node("root", "Notes", None)
            .with_node("chapter", "Chapter 1", Some("root"))
            .with_node("leaf", "A fact", Some("chapter"))
            .with_node("loose", "Scratch", None)
    }

    fn resolver(tree: InMemoryDocumentTree) -> AncestorTagResolver {
        AncestorTagResolver::new(Arc::new(tree), TAG, 256)
    }

    #[tokio::test]
    async fn test_tag_on_node_itself() {
        let r = resolver(tree().with_tag("leaf", "tag"));
        assert!(r.should_count(&NodeId::new("leaf")).await);
    }

    /// Counts `parent()` reads made against the wrapped tree.
    struct CountingTree {
        inner: InMemoryDocumentTree,
        parent_reads: AtomicUsize,
    }

    #[async_trait]
    impl DocumentTree for CountingTree {
        async fn tags(&self, node: &NodeId) -> DomainResult<Vec<NodeRef>> {
            self.inner.tags(node).await
        }

        async fn parent(&self, node: &NodeId) -> DomainResult<Option<NodeId>> {
            self.parent_reads.fetch_add(1, Ordering::SeqCst);
            self.inner.parent(node).await
        }
    }

    #[tokio::test]
    async fn test_tagged_node_stops_before_reading_parent() {
        let tree = Arc::new(CountingTree {
            inner: tree().with_tag("leaf", "tag"),
            parent_reads: AtomicUsize::new(0),
        });
        let r = AncestorTagResolver::new(tree.clone(), TAG, 256);

        assert_eq!(
            r.find_tagged_ancestor(&NodeId::new("leaf")).await.unwrap(),
            Some(NodeId::new("leaf"))
        );
        assert_eq!(tree.parent_reads.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_tag_on_parent() {
        let r = resolver(tree().with_tag("chapter", "tag"));
        assert!(r.should_count(&NodeId::new("leaf")).await);
        assert_eq!(
            r.find_tagged_ancestor(&NodeId::new("leaf")).await.unwrap(),
            Some(NodeId::new("chapter"))
        );
    }

    #[tokio::test]
    async fn test_tag_on_root() {
        let r = resolver(tree().with_tag("root", "tag"));
        assert!(r.should_count(&NodeId::new("leaf")).await);
        assert!(!r.should_count(&NodeId::new("loose")).await);
    }

    #[tokio::test]
    async fn test_no_tag_anywhere() {
        let r = resolver(tree().with_tag("chapter", "other-tag"));
        assert!(!r.should_count(&NodeId::new("leaf")).await);
    }

    #[tokio::test]
    async fn test_unknown_node_is_not_counted() {
        let r = resolver(tree());
        assert!(!r.should_count(&NodeId::new("ghost")).await);
    }

    #[tokio::test]
    async fn test_cycle_terminates() {
        let cyclic = InMemoryDocumentTree::new()
            .with_node("a", "A", Some("b"))
            .with_node("b", "B", Some("a"));
        assert!(!resolver(cyclic).should_count(&NodeId::new("a")).await);
    }

    /// Tree where every node's parent is a fresh node; never reaches a root.
    struct EndlessTree {
        reads: AtomicUsize,
    }

    #[async_trait]
    impl DocumentTree for EndlessTree {
        async fn tags(&self, _node: &NodeId) -> DomainResult<Vec<NodeRef>> {
            Ok(Vec::new())
        }

        async fn parent(&self, _node: &NodeId) -> DomainResult<Option<NodeId>> {
            let n = self.reads.fetch_add(1, Ordering::SeqCst);
            Ok(Some(NodeId::new(format!("n{n}"))))
        }
    }

    #[tokio::test]
    async fn test_depth_cap_terminates() {
        let tree = Arc::new(EndlessTree {
            reads: AtomicUsize::new(0),
        });
        let r = AncestorTagResolver::new(tree.clone(), TAG, 16);
        assert!(!r.should_count(&NodeId::new("start")).await);
        assert!(tree.reads.load(Ordering::SeqCst) <= 16);
    }
}
