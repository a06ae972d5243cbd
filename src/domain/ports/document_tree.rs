//! Document tree port.

use async_trait::async_trait;

use crate::domain::errors::DomainResult;
use crate::domain::models::NodeId;

/// A node as seen through one of its references, e.g. a tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeRef {
    pub id: NodeId,
    /// Display text; `None` when the node has no text.
    pub text: Option<String>,
}

/// Read-only traversal of the host's document tree.
///
/// Every call may suspend on the host.
#[async_trait]
pub trait DocumentTree: Send + Sync {
    /// Nodes directly tagged onto `node`.
    async fn tags(&self, node: &NodeId) -> DomainResult<Vec<NodeRef>>;

    /// Parent of `node`, `None` at the root.
    async fn parent(&self, node: &NodeId) -> DomainResult<Option<NodeId>>;
}
