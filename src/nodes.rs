//! UI node factory capability and the in-memory view tree behind it.
//!
//! The panel layer never touches a UI toolkit directly. It builds and
//! looks up nodes through [`NodeFactory`]; the egui renderer then walks the
//! [`ViewTree`] to decide what to paint.

use std::collections::HashMap;

use crate::error::PanelError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeHandle(u64);

pub trait NodeFactory {
    /// Creates a detached container carrying `class_hints`
    fn add_container(&mut self, id: &str, class_hints: &[&str]) -> NodeHandle;
    fn add_image_node(&mut self, id: &str, color_hint: &str, image_path: &str) -> NodeHandle;
    fn add_text_node(&mut self, id: &str) -> NodeHandle;
    /// Removes the node and everything below it. Stale handles are ignored.
    fn remove_node(&mut self, node: NodeHandle);

    fn attach_to_root(&mut self, node: NodeHandle) -> Result<(), PanelError>;
    fn append_child(&mut self, parent: NodeHandle, child: NodeHandle) -> Result<(), PanelError>;

    /// Looks up a node that is part of the view tree
    fn find_by_id(&self, id: &str) -> Option<NodeHandle>;
    /// Every node in the view tree carrying `class`
    fn find_by_class(&self, class: &str) -> Vec<NodeHandle>;

    /// Swaps `from` for `to` in place. `Ok(false)` when `from` was not present.
    fn replace_class(&mut self, node: NodeHandle, from: &str, to: &str)
    -> Result<bool, PanelError>;
    fn set_text(&mut self, node: NodeHandle, text: &str) -> Result<(), PanelError>;

    fn set_text_by_id(&mut self, id: &str, text: &str) -> Result<(), PanelError> {
        let node = self
            .find_by_id(id)
            .ok_or_else(|| PanelError::MissingNode(id.to_string()))?;
        self.set_text(node, text)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    Container,
    Image { color_hint: String, image_path: String },
    Text { text: String },
}

#[derive(Debug, Clone)]
pub struct Node {
    pub id: String,
    pub classes: Vec<String>,
    pub kind: NodeKind,
    pub children: Vec<NodeHandle>,
    parent: Option<NodeHandle>,
    attached: bool,
}

impl Node {
    fn new(id: &str, kind: NodeKind) -> Self {
        Self {
            id: id.to_string(),
            classes: Vec::new(),
            kind,
            children: Vec::new(),
            parent: None,
            attached: false,
        }
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    pub fn text(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::Text { text } => Some(text),
            _ => None,
        }
    }
}

/// Arena-backed node tree with an id index
#[derive(Debug, Default)]
pub struct ViewTree {
    nodes: HashMap<NodeHandle, Node>,
    ids: HashMap<String, NodeHandle>,
    roots: Vec<NodeHandle>,
    next_handle: u64,
}

impl ViewTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn node(&self, handle: NodeHandle) -> Option<&Node> {
        self.nodes.get(&handle)
    }

    pub fn roots(&self) -> &[NodeHandle] {
        &self.roots
    }

    /// Text content of the attached text node `id`
    pub fn text_of(&self, id: &str) -> Option<&str> {
        self.find_by_id(id)
            .and_then(|handle| self.node(handle))
            .and_then(Node::text)
    }

    /// Number of nodes, attached or not
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    fn insert(&mut self, node: Node) -> NodeHandle {
        let handle = NodeHandle(self.next_handle);
        self.next_handle += 1;
        self.ids.insert(node.id.clone(), handle);
        self.nodes.insert(handle, node);
        handle
    }

    fn get_mut(&mut self, handle: NodeHandle) -> Result<&mut Node, PanelError> {
        self.nodes
            .get_mut(&handle)
            .ok_or(PanelError::StaleHandle(handle))
    }

    /// Sets `attached` over the whole subtree under `handle`
    fn set_attached(&mut self, handle: NodeHandle, attached: bool) {
        let mut pending = vec![handle];
        while let Some(current) = pending.pop() {
            if let Some(node) = self.nodes.get_mut(&current) {
                node.attached = attached;
                pending.extend(node.children.iter().copied());
            }
        }
    }

    fn detach(&mut self, handle: NodeHandle) {
        let parent = self.nodes.get(&handle).and_then(|n| n.parent);
        match parent {
            Some(parent) => {
                if let Some(parent) = self.nodes.get_mut(&parent) {
                    parent.children.retain(|c| *c != handle);
                }
            }
            None => self.roots.retain(|r| *r != handle),
        }
    }
}

impl NodeFactory for ViewTree {
    fn add_container(&mut self, id: &str, class_hints: &[&str]) -> NodeHandle {
        let mut node = Node::new(id, NodeKind::Container);
        node.classes = class_hints.iter().map(|c| c.to_string()).collect();
        self.insert(node)
    }

    fn add_image_node(&mut self, id: &str, color_hint: &str, image_path: &str) -> NodeHandle {
        self.insert(Node::new(
            id,
            NodeKind::Image {
                color_hint: color_hint.to_string(),
                image_path: image_path.to_string(),
            },
        ))
    }

    fn add_text_node(&mut self, id: &str) -> NodeHandle {
        self.insert(Node::new(
            id,
            NodeKind::Text {
                text: String::new(),
            },
        ))
    }

    fn remove_node(&mut self, node: NodeHandle) {
        if !self.nodes.contains_key(&node) {
            return;
        }
        self.detach(node);

        let mut pending = vec![node];
        while let Some(current) = pending.pop() {
            if let Some(removed) = self.nodes.remove(&current) {
                if self.ids.get(&removed.id) == Some(&current) {
                    self.ids.remove(&removed.id);
                }
                pending.extend(removed.children);
            }
        }
    }

    fn attach_to_root(&mut self, node: NodeHandle) -> Result<(), PanelError> {
        if self.get_mut(node)?.parent.is_some() {
            self.detach(node);
            self.get_mut(node)?.parent = None;
        }
        if !self.roots.contains(&node) {
            self.roots.push(node);
        }
        self.set_attached(node, true);
        Ok(())
    }

    fn append_child(&mut self, parent: NodeHandle, child: NodeHandle) -> Result<(), PanelError> {
        // Both handles must be live before anything moves
        self.get_mut(child)?;
        let parent_attached = self.get_mut(parent)?.attached;

        self.detach(child);
        self.get_mut(child)?.parent = Some(parent);
        self.get_mut(parent)?.children.push(child);
        self.set_attached(child, parent_attached);
        Ok(())
    }

    fn find_by_id(&self, id: &str) -> Option<NodeHandle> {
        let handle = *self.ids.get(id)?;
        self.nodes
            .get(&handle)
            .filter(|node| node.attached)
            .map(|_| handle)
    }

    fn find_by_class(&self, class: &str) -> Vec<NodeHandle> {
        let mut found: Vec<NodeHandle> = self
            .nodes
            .iter()
            .filter(|(_, node)| node.attached && node.has_class(class))
            .map(|(handle, _)| *handle)
            .collect();
        found.sort();
        found
    }

    fn replace_class(
        &mut self,
        node: NodeHandle,
        from: &str,
        to: &str,
    ) -> Result<bool, PanelError> {
        let node = self.get_mut(node)?;
        match node.classes.iter_mut().find(|c| c.as_str() == from) {
            Some(class) => {
                *class = to.to_string();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn set_text(&mut self, node: NodeHandle, text: &str) -> Result<(), PanelError> {
        let node = self.get_mut(node)?;
        match &mut node.kind {
            NodeKind::Text { text: current } => {
                *current = text.to_string();
                Ok(())
            }
            _ => Err(PanelError::MissingNode(format!("{} (not a text node)", node.id))),
        }
    }
}
