//! Document - High-level document API

use crate::{DomTree, NodeId};

/// A stylesheet embedded in a document as a module style element
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleSource {
    /// Module identifier, the marker attribute's value
    pub id: String,
    /// CSS text of the element
    pub css: String,
}

/// HTML Document
#[derive(Debug)]
pub struct Document {
    /// The DOM tree
    pub tree: DomTree,
    url: String,
    html_element: NodeId,
    head_element: NodeId,
    body_element: NodeId,
}

impl Document {
    /// Create a document with an empty `<html><head></head><body></body></html>`
    pub fn new(url: &str) -> Self {
        let mut tree = DomTree::new();

        let html = tree.create_element("html");
        let head = tree.create_element("head");
        let body = tree.create_element("body");

        tree.append_child(tree.root(), html);
        tree.append_child(html, head);
        tree.append_child(html, body);

        Self {
            tree,
            url: url.to_string(),
            html_element: html,
            head_element: head,
            body_element: body,
        }
    }

    /// Create a document holding only the document node
    pub fn empty(url: &str) -> Self {
        Self {
            tree: DomTree::new(),
            url: url.to_string(),
            html_element: NodeId::NONE,
            head_element: NodeId::NONE,
            body_element: NodeId::NONE,
        }
    }

    /// Locate `<html>`, `<head>` and `<body>` after the tree was built externally
    pub fn finalize(&mut self) {
        self.html_element = self
            .tree
            .element_children(NodeId::ROOT)
            .find(|&id| self.tree.tag_name(id) == Some("html"))
            .unwrap_or(NodeId::NONE);

        if !self.html_element.is_valid() {
            return;
        }

        for child in self.tree.element_children(self.html_element) {
            match self.tree.tag_name(child) {
                Some("head") => self.head_element = child,
                Some("body") => self.body_element = child,
                _ => {}
            }
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Text of the `<title>` element in `<head>`
    pub fn title(&self) -> String {
        if !self.head_element.is_valid() {
            return String::new();
        }

        self.tree
            .element_children(self.head_element)
            .find(|&id| self.tree.tag_name(id) == Some("title"))
            .map(|id| self.tree.text_content(id))
            .unwrap_or_default()
    }

    /// Get `<html>` element
    pub fn document_element(&self) -> NodeId {
        self.html_element
    }

    pub fn head(&self) -> NodeId {
        self.head_element
    }

    pub fn body(&self) -> NodeId {
        self.body_element
    }

    /// First element in document order with the given id
    pub fn get_element_by_id(&self, id: &str) -> Option<NodeId> {
        self.tree.descendants(self.tree.root()).into_iter().find(|&node_id| {
            self.tree
                .get(node_id)
                .and_then(|n| n.as_element())
                .is_some_and(|elem| elem.id.as_deref() == Some(id))
        })
    }

    /// `<style>` elements carrying `attribute`, in document order
    pub fn style_sources(&self, attribute: &str) -> Vec<StyleSource> {
        self.tree
            .descendants(self.tree.root())
            .into_iter()
            .filter(|&id| self.tree.tag_name(id) == Some("style"))
            .filter_map(|id| {
                let module = self.tree.get_attribute(id, attribute)?;
                Some(StyleSource {
                    id: module.to_string(),
                    css: self.tree.text_content(id),
                })
            })
            .collect()
    }

    pub fn tree(&self) -> &DomTree {
        &self.tree
    }

    pub fn tree_mut(&mut self) -> &mut DomTree {
        &mut self.tree
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new("about:blank")
    }
}
