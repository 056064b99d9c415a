//! modcss DOM - Document Object Model
//!
//! Arena DOM tree used as the host document for style assertions, with
//! selector matching over the modcss selector grammar.

mod document;
mod interner;
mod node;
mod query;
mod tree;

pub use document::{Document, StyleSource};
pub use interner::{InternedString, StringInterner};
pub use node::{Attribute, ElementData, Node, NodeData, TextData};
pub use query::{matches_selector, ElementQuery};
pub use tree::{Children, DomTree};

/// Node identifier (index into arena)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u32);

impl NodeId {
    /// Root node ID
    pub const ROOT: NodeId = NodeId(0);
    /// Invalid/null node ID
    pub const NONE: NodeId = NodeId(u32::MAX);

    #[inline]
    pub fn is_valid(&self) -> bool {
        *self != Self::NONE
    }
}
