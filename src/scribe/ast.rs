//! The external tree contract
//!
//! scribe does not own a syntax tree. The walker that drives a writer owns
//! one, and the writers only need a narrow view of it: a stable identity
//! (for the span side table), a kind name, the child slot the node occupies
//! in its parent, and the trivia anchored to it. Any tree can participate
//! by implementing [`AstNode`] for its node type.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::token::SlotTag;
use super::trivia::Trivia;

/// Stable identity of a tree node, unique within one tree
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct NodeId(pub u64);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n{}", self.0)
    }
}

/// The view of a tree node the rendering pipeline consumes
///
/// Object-safe on purpose: writer operations take `&dyn AstNode` so one
/// compiled pipeline serves any tree implementation.
pub trait AstNode {
    /// Stable node identity, the key of the span side table
    fn id(&self) -> NodeId;

    /// The node's kind name (for example `"Method"` or `"BinaryExpr"`)
    fn node_type(&self) -> &str;

    /// The child slot this node occupies in its parent
    fn slot(&self) -> SlotTag<'_> {
        SlotTag::NONE
    }

    /// Trivia anchored to this node, in source order
    fn trivia(&self) -> &[Trivia] {
        &[]
    }
}
