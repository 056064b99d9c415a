//! DOM Tree (arena-based allocation)

use std::fmt::Write as _;

use crate::{InternedString, Node, NodeId, StringInterner};

/// Arena-based DOM tree
///
/// Index 0 always holds the document node.
#[derive(Debug)]
pub struct DomTree {
    nodes: Vec<Node>,
    interner: StringInterner,
}

impl DomTree {
    /// Create a tree holding only the document node
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::document()],
            interner: StringInterner::new(),
        }
    }

    #[inline]
    pub fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    /// Get a node by ID
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        if !id.is_valid() {
            return None;
        }
        self.nodes.get(id.0 as usize)
    }

    /// Get a mutable node by ID
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        if !id.is_valid() {
            return None;
        }
        self.nodes.get_mut(id.0 as usize)
    }

    /// Number of nodes in the tree
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn interner(&self) -> &StringInterner {
        &self.interner
    }

    pub fn interner_mut(&mut self) -> &mut StringInterner {
        &mut self.interner
    }

    /// Resolve an interned name
    #[inline]
    pub fn resolve(&self, name: InternedString) -> &str {
        self.interner.get(name)
    }

    fn push(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    // === Construction ===

    /// Create a detached element; the tag name is lowercased
    pub fn create_element(&mut self, tag: &str) -> NodeId {
        let name = self.interner.intern(&tag.to_ascii_lowercase());
        self.push(Node::element(name))
    }

    pub fn create_text(&mut self, content: &str) -> NodeId {
        self.push(Node::text(content.to_string()))
    }

    pub fn create_comment(&mut self, content: &str) -> NodeId {
        self.push(Node::comment(content.to_string()))
    }

    pub fn create_doctype(&mut self, name: &str) -> NodeId {
        let name = self.interner.intern(name);
        self.push(Node::doctype(name))
    }

    /// Set an attribute on an element; ignored for other node kinds
    pub fn set_attribute(&mut self, element: NodeId, name: &str, value: &str) {
        let name_id = self.interner.intern(name);
        if let Some(elem) = self.get_mut(element).and_then(Node::as_element_mut) {
            elem.set_attr(name_id, name, value.to_string());
        }
    }

    /// Append `child` as the last child of `parent`
    ///
    /// An attached child is moved. Invalid IDs, and appending a node into
    /// its own subtree, are ignored.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        if self.get(parent).is_none() || self.get(child).is_none() || self.is_inclusive_ancestor(child, parent) {
            return;
        }

        self.detach(child);
        let prev_last = self.nodes[parent.0 as usize].last_child;

        {
            let node = &mut self.nodes[child.0 as usize];
            node.parent = parent;
            node.prev_sibling = prev_last;
            node.next_sibling = NodeId::NONE;
        }

        if prev_last.is_valid() {
            self.nodes[prev_last.0 as usize].next_sibling = child;
        } else {
            self.nodes[parent.0 as usize].first_child = child;
        }
        self.nodes[parent.0 as usize].last_child = child;
    }

    /// Unlink `node` from its parent and siblings
    pub fn detach(&mut self, node: NodeId) {
        let Some(current) = self.get(node) else {
            return;
        };
        let (parent, prev, next) = (current.parent, current.prev_sibling, current.next_sibling);

        if prev.is_valid() {
            self.nodes[prev.0 as usize].next_sibling = next;
        } else if parent.is_valid() {
            self.nodes[parent.0 as usize].first_child = next;
        }

        if next.is_valid() {
            self.nodes[next.0 as usize].prev_sibling = prev;
        } else if parent.is_valid() {
            self.nodes[parent.0 as usize].last_child = prev;
        }

        let node = &mut self.nodes[node.0 as usize];
        node.parent = NodeId::NONE;
        node.prev_sibling = NodeId::NONE;
        node.next_sibling = NodeId::NONE;
    }

    fn is_inclusive_ancestor(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = node;
        while current.is_valid() {
            if current == ancestor {
                return true;
            }
            current = self.get(current).map(|n| n.parent).unwrap_or(NodeId::NONE);
        }
        false
    }

    // === Traversal ===

    /// Iterate the direct children of a node
    pub fn children(&self, parent: NodeId) -> Children<'_> {
        let next = self.get(parent).map(|n| n.first_child).unwrap_or(NodeId::NONE);
        Children { tree: self, next }
    }

    /// Direct children that are elements
    pub fn element_children(&self, parent: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.children(parent)
            .filter(|(_, node)| node.is_element())
            .map(|(id, _)| id)
    }

    pub fn is_element(&self, id: NodeId) -> bool {
        self.get(id).is_some_and(Node::is_element)
    }

    /// Parent, if it is an element
    pub fn parent_element(&self, id: NodeId) -> Option<NodeId> {
        let parent = self.get(id)?.parent;
        self.is_element(parent).then_some(parent)
    }

    /// Closest preceding sibling that is an element
    pub fn previous_element_sibling(&self, id: NodeId) -> Option<NodeId> {
        let mut current = self.get(id)?.prev_sibling;
        while let Some(node) = self.get(current) {
            if node.is_element() {
                return Some(current);
            }
            current = node.prev_sibling;
        }
        None
    }

    /// Tag name of an element
    pub fn tag_name(&self, id: NodeId) -> Option<&str> {
        let elem = self.get(id)?.as_element()?;
        Some(self.resolve(elem.name))
    }

    /// Attribute value by name, compared ASCII case-insensitively
    pub fn get_attribute(&self, id: NodeId, name: &str) -> Option<&str> {
        let elem = self.get(id)?.as_element()?;
        elem.attrs
            .iter()
            .find(|a| self.resolve(a.name).eq_ignore_ascii_case(name))
            .map(|a| a.value.as_str())
    }

    pub fn has_attribute(&self, id: NodeId, name: &str) -> bool {
        self.get_attribute(id, name).is_some()
    }

    /// Concatenated text of all descendant text nodes
    pub fn text_content(&self, id: NodeId) -> String {
        let mut text = String::new();
        if let Some(content) = self.get(id).and_then(Node::as_text) {
            text.push_str(content);
        }
        for descendant in self.descendants(id) {
            if let Some(content) = self.get(descendant).and_then(Node::as_text) {
                text.push_str(content);
            }
        }
        text
    }

    /// All nodes below `root` in document order, `root` excluded
    pub fn descendants(&self, root: NodeId) -> Vec<NodeId> {
        let mut result = Vec::new();
        let mut stack: Vec<NodeId> = self.children(root).map(|(id, _)| id).collect();
        stack.reverse();

        while let Some(id) = stack.pop() {
            result.push(id);
            let first = stack.len();
            stack.extend(self.children(id).map(|(child, _)| child));
            stack[first..].reverse();
        }

        result
    }

    /// Short markup-like description of a node, for diagnostics
    pub fn describe(&self, id: NodeId) -> String {
        let Some(node) = self.get(id) else {
            return "<invalid node>".to_string();
        };

        match &node.data {
            crate::NodeData::Element(elem) => {
                let mut out = format!("<{}", self.resolve(elem.name));
                for attr in &elem.attrs {
                    let _ = write!(out, " {}=\"{}\"", self.resolve(attr.name), attr.value);
                }
                out.push('>');
                out
            }
            crate::NodeData::Text(t) => format!("#text {:?}", t.content),
            crate::NodeData::Comment(_) => "#comment".to_string(),
            crate::NodeData::Doctype { .. } => "#doctype".to_string(),
            crate::NodeData::Document => "#document".to_string(),
        }
    }
}

impl Default for DomTree {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over the children of a node
pub struct Children<'a> {
    tree: &'a DomTree,
    next: NodeId,
}

impl<'a> Iterator for Children<'a> {
    type Item = (NodeId, &'a Node);

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.next;
        let node = self.tree.get(id)?;
        self.next = node.next_sibling;
        Some((id, node))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> (DomTree, NodeId, NodeId, NodeId) {
        let mut tree = DomTree::new();
        let ul = tree.create_element("UL");
        let li1 = tree.create_element("li");
        let text = tree.create_text("between");
        let li2 = tree.create_element("li");
        tree.append_child(tree.root(), ul);
        tree.append_child(ul, li1);
        tree.append_child(ul, text);
        tree.append_child(ul, li2);
        (tree, ul, li1, li2)
    }

    #[test]
    fn test_append_and_children() {
        let (tree, ul, li1, li2) = sample();
        let children: Vec<NodeId> = tree.children(ul).map(|(id, _)| id).collect();
        assert_eq!(children.len(), 3);
        assert_eq!(children[0], li1);
        assert_eq!(children[2], li2);
        assert_eq!(tree.element_children(ul).count(), 2);
        assert_eq!(tree.tag_name(ul), Some("ul"));
    }

    #[test]
    fn test_append_moves_attached_child() {
        let (mut tree, ul, li1, li2) = sample();
        let ol = tree.create_element("ol");
        tree.append_child(tree.root(), ol);

        tree.append_child(ol, li1);
        let remaining: Vec<NodeId> = tree.children(ul).map(|(id, _)| id).collect();
        assert_eq!(remaining.len(), 2);
        assert_eq!(remaining[1], li2);
        assert_eq!(tree.previous_element_sibling(li2), None);
        assert_eq!(tree.children(ol).map(|(id, _)| id).collect::<Vec<_>>(), vec![li1]);
        assert_eq!(tree.parent_element(li1), Some(ol));

        // Re-appending to the same parent moves it to the end
        tree.append_child(ol, li2);
        tree.append_child(ol, li1);
        assert_eq!(tree.children(ol).map(|(id, _)| id).collect::<Vec<_>>(), vec![li2, li1]);
        assert_eq!(tree.previous_element_sibling(li1), Some(li2));
    }

    #[test]
    fn test_append_into_own_subtree_is_ignored() {
        let (mut tree, ul, li1, _) = sample();
        tree.append_child(li1, ul);
        tree.append_child(ul, ul);
        assert_eq!(tree.parent_element(li1), Some(ul));
        assert_eq!(tree.get(ul).map(|n| n.parent), Some(tree.root()));
    }

    #[test]
    fn test_sibling_and_parent_navigation() {
        let (tree, ul, li1, li2) = sample();
        assert_eq!(tree.previous_element_sibling(li2), Some(li1));
        assert_eq!(tree.previous_element_sibling(li1), None);
        assert_eq!(tree.parent_element(li1), Some(ul));
        // Parent of <ul> is the document node, which is not an element
        assert_eq!(tree.parent_element(ul), None);
    }

    #[test]
    fn test_descendants_in_document_order() {
        let (tree, ul, li1, li2) = sample();
        let all = tree.descendants(tree.root());
        assert_eq!(all.len(), 4);
        assert_eq!(all[0], ul);
        assert_eq!(all[1], li1);
        assert_eq!(all[3], li2);
    }

    #[test]
    fn test_attributes() {
        let (mut tree, ul, _, _) = sample();
        tree.set_attribute(ul, "data-role", "menu");
        tree.set_attribute(ul, "class", "nav main");
        assert_eq!(tree.get_attribute(ul, "DATA-ROLE"), Some("menu"));
        assert!(tree.has_attribute(ul, "class"));
        assert!(!tree.has_attribute(ul, "title"));
        assert_eq!(tree.describe(ul), "<ul data-role=\"menu\" class=\"nav main\">");
    }

    #[test]
    fn test_text_content() {
        let (tree, ul, _, _) = sample();
        assert_eq!(tree.text_content(ul), "between");
    }

    #[test]
    fn test_invalid_ids_are_ignored() {
        let mut tree = DomTree::new();
        tree.append_child(NodeId::NONE, NodeId(42));
        assert_eq!(tree.len(), 1);
        assert!(tree.get(NodeId::NONE).is_none());
        assert_eq!(tree.children(NodeId(99)).count(), 0);
    }
}
