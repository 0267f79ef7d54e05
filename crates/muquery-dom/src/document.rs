//! Arena document tree.

use std::fmt;
use std::sync::Arc;

use crate::capabilities::Capabilities;
use crate::classes::{AttrStringBackend, ClassList, TokenListBackend};
use crate::element::ElementData;
use crate::parser;
use crate::render;

/// Handle to a node in a [`Document`] arena.
///
/// Ids are element identity: handles compare equal exactly when they refer
/// to the same node. A handle is only meaningful against the document that
/// issued it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

pub(crate) enum NodeData {
	Element(ElementData),
	Text(String),
}

pub(crate) struct Node {
	pub(crate) parent: Option<NodeId>,
	pub(crate) children: Vec<NodeId>,
	pub(crate) data: NodeData,
}

/// The document: an arena of nodes under a synthetic root element.
///
/// Nodes are never freed; detaching a subtree (for example when replacing
/// content) leaves its nodes unreachable in the arena. Documents here are
/// short-lived working sets, not long-running stores, so reclaiming detached
/// nodes is not worth an id-invalidation scheme.
pub struct Document {
	nodes: Vec<Node>,
	root: NodeId,
	capabilities: Capabilities,
	classes: Arc<dyn ClassList>,
}

impl fmt::Debug for Document {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Document")
			.field("nodes", &self.nodes.len())
			.field("root", &self.root)
			.field("capabilities", &self.capabilities)
			.finish()
	}
}

/// Tag of the synthetic root element. The leading `#` keeps it out of reach
/// of type selectors, which cannot contain one.
const ROOT_TAG: &str = "#document";

impl Document {
	/// Creates an empty document with full capabilities.
	pub fn new() -> Self {
		Self::with_capabilities(Capabilities::default())
	}

	/// Creates an empty document, choosing the class strategy from the
	/// host capabilities.
	pub fn with_capabilities(capabilities: Capabilities) -> Self {
		let classes: Arc<dyn ClassList> = if capabilities.class_list {
			Arc::new(TokenListBackend)
		} else {
			Arc::new(AttrStringBackend)
		};
		let root = NodeId(0);
		Self {
			nodes: vec![Node {
				parent: None,
				children: Vec::new(),
				data: NodeData::Element(ElementData::new(ROOT_TAG)),
			}],
			root,
			capabilities,
			classes,
		}
	}

	/// Parses markup into a fresh full-capability document.
	pub fn parse(markup: &str) -> Self {
		Self::parse_with_capabilities(markup, Capabilities::default())
	}

	/// Parses markup into a fresh document with the given capabilities.
	pub fn parse_with_capabilities(markup: &str, capabilities: Capabilities) -> Self {
		let mut doc = Self::with_capabilities(capabilities);
		let root = doc.root;
		parser::parse_fragment(&mut doc, root, markup);
		doc
	}

	/// The synthetic root element.
	pub fn root(&self) -> NodeId {
		self.root
	}

	/// The capabilities this document was constructed with.
	pub fn capabilities(&self) -> &Capabilities {
		&self.capabilities
	}

	// -- node construction ------------------------------------------------

	/// Creates a detached element.
	pub fn create_element(&mut self, tag: impl Into<String>) -> NodeId {
		self.push_node(NodeData::Element(ElementData::new(tag.into())))
	}

	/// Creates a detached text node.
	pub fn create_text_node(&mut self, text: impl Into<String>) -> NodeId {
		self.push_node(NodeData::Text(text.into()))
	}

	/// Appends `child` as the last child of `parent`, detaching it from any
	/// previous parent. Appending to a text node is a silent no-op.
	pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
		if parent == child || !self.is_element(parent) {
			return;
		}
		self.detach(child);
		self.nodes[child.0].parent = Some(parent);
		self.nodes[parent.0].children.push(child);
	}

	fn push_node(&mut self, data: NodeData) -> NodeId {
		let id = NodeId(self.nodes.len());
		self.nodes.push(Node {
			parent: None,
			children: Vec::new(),
			data,
		});
		id
	}

	fn detach(&mut self, id: NodeId) {
		if let Some(parent) = self.nodes[id.0].parent.take() {
			self.nodes[parent.0].children.retain(|c| *c != id);
		}
	}

	// -- node access ------------------------------------------------------

	/// Whether the handle refers to an element node.
	pub fn is_element(&self, id: NodeId) -> bool {
		matches!(
			self.nodes.get(id.0).map(|n| &n.data),
			Some(NodeData::Element(_))
		)
	}

	/// Element payload, if the handle refers to an element.
	pub fn element(&self, id: NodeId) -> Option<&ElementData> {
		match self.nodes.get(id.0).map(|n| &n.data) {
			Some(NodeData::Element(el)) => Some(el),
			_ => None,
		}
	}

	/// Mutable element payload, if the handle refers to an element.
	pub fn element_mut(&mut self, id: NodeId) -> Option<&mut ElementData> {
		match self.nodes.get_mut(id.0).map(|n| &mut n.data) {
			Some(NodeData::Element(el)) => Some(el),
			_ => None,
		}
	}

	/// Tag name of an element.
	pub fn tag_name(&self, id: NodeId) -> Option<&str> {
		self.element(id).map(ElementData::tag)
	}

	pub(crate) fn node(&self, id: NodeId) -> &Node {
		&self.nodes[id.0]
	}

	// -- traversal --------------------------------------------------------

	/// Parent node; `None` at the root.
	pub fn parent(&self, id: NodeId) -> Option<NodeId> {
		self.nodes.get(id.0)?.parent
	}

	/// Ordered child handles (elements and text nodes).
	pub fn children(&self, id: NodeId) -> &[NodeId] {
		self.nodes
			.get(id.0)
			.map(|n| n.children.as_slice())
			.unwrap_or(&[])
	}

	/// Ordered element children.
	pub fn child_elements(&self, id: NodeId) -> Vec<NodeId> {
		self.children(id)
			.iter()
			.copied()
			.filter(|c| self.is_element(*c))
			.collect()
	}

	/// First element child, if any.
	pub fn first_element_child(&self, id: NodeId) -> Option<NodeId> {
		self.children(id)
			.iter()
			.copied()
			.find(|c| self.is_element(*c))
	}

	/// Next sibling that is an element.
	pub fn next_element_sibling(&self, id: NodeId) -> Option<NodeId> {
		let parent = self.parent(id)?;
		let siblings = self.children(parent);
		let position = siblings.iter().position(|c| *c == id)?;
		siblings[position + 1..]
			.iter()
			.copied()
			.find(|c| self.is_element(*c))
	}

	/// Previous sibling that is an element.
	pub fn previous_element_sibling(&self, id: NodeId) -> Option<NodeId> {
		let parent = self.parent(id)?;
		let siblings = self.children(parent);
		let position = siblings.iter().position(|c| *c == id)?;
		siblings[..position]
			.iter()
			.copied()
			.rev()
			.find(|c| self.is_element(*c))
	}

	/// Iterator over ancestors, from the parent up to and including the root.
	pub fn ancestors(&self, id: NodeId) -> Ancestors<'_> {
		Ancestors {
			doc: self,
			next: self.parent(id),
		}
	}

	/// Descendant elements of `id` in document (pre-)order, excluding `id`
	/// itself. Returns a concrete snapshot, safe to iterate while mutating
	/// the document.
	pub fn descendant_elements(&self, id: NodeId) -> Vec<NodeId> {
		let mut out = Vec::new();
		let mut stack: Vec<NodeId> = self.children(id).iter().rev().copied().collect();
		while let Some(current) = stack.pop() {
			if self.is_element(current) {
				out.push(current);
			}
			stack.extend(self.children(current).iter().rev().copied());
		}
		out
	}

	// -- content ----------------------------------------------------------

	/// Concatenated text of all descendant text nodes, in document order.
	pub fn text_content(&self, id: NodeId) -> String {
		let mut out = String::new();
		self.collect_text(id, &mut out);
		out
	}

	fn collect_text(&self, id: NodeId, out: &mut String) {
		match &self.nodes[id.0].data {
			NodeData::Text(text) => out.push_str(text),
			NodeData::Element(_) => {
				for &child in &self.nodes[id.0].children {
					self.collect_text(child, out);
				}
			}
		}
	}

	/// Replaces all children with a single text node.
	pub fn set_text_content(&mut self, id: NodeId, text: impl Into<String>) {
		if !self.is_element(id) {
			return;
		}
		self.remove_children(id);
		let text_node = self.create_text_node(text.into());
		self.append_child(id, text_node);
	}

	/// Serialized markup of the node's children.
	pub fn inner_html(&self, id: NodeId) -> String {
		render::render_children(self, id)
	}

	/// Replaces the node's children by parsing a markup fragment.
	pub fn set_inner_html(&mut self, id: NodeId, markup: &str) {
		if !self.is_element(id) {
			return;
		}
		self.remove_children(id);
		parser::parse_fragment(self, id, markup);
	}

	/// Serialized markup of the node itself. The synthetic root serializes
	/// as its children.
	pub fn outer_html(&self, id: NodeId) -> String {
		render::render_node(self, id)
	}

	fn remove_children(&mut self, id: NodeId) {
		let children = std::mem::take(&mut self.nodes[id.0].children);
		for child in children {
			self.nodes[child.0].parent = None;
		}
	}

	// -- attributes and styles -------------------------------------------

	/// Attribute value on an element.
	pub fn attribute(&self, id: NodeId, name: &str) -> Option<&str> {
		self.element(id)?.attribute(name)
	}

	/// Sets an attribute on an element; no-op on non-elements.
	pub fn set_attribute(&mut self, id: NodeId, name: &str, value: &str) {
		if let Some(el) = self.element_mut(id) {
			el.set_attribute(name, value);
		}
	}

	/// Removes an attribute from an element. Returns whether it was present.
	pub fn remove_attribute(&mut self, id: NodeId, name: &str) -> bool {
		self.element_mut(id)
			.map(|el| el.remove_attribute(name))
			.unwrap_or(false)
	}

	/// Inline style declaration value on an element.
	pub fn style(&self, id: NodeId, property: &str) -> Option<&str> {
		self.element(id)?.style(property)
	}

	/// Sets an inline style declaration; no-op on non-elements.
	pub fn set_style(&mut self, id: NodeId, property: &str, value: &str) {
		if let Some(el) = self.element_mut(id) {
			el.set_style(property, value);
		}
	}

	// -- classes ----------------------------------------------------------

	/// Adds a class through the document's class strategy.
	pub fn add_class(&mut self, id: NodeId, class: &str) {
		let backend = Arc::clone(&self.classes);
		if let Some(el) = self.element_mut(id) {
			backend.add(el, class);
		}
	}

	/// Removes a class through the document's class strategy.
	pub fn remove_class(&mut self, id: NodeId, class: &str) {
		let backend = Arc::clone(&self.classes);
		if let Some(el) = self.element_mut(id) {
			backend.remove(el, class);
		}
	}

	/// Toggles a class through the document's class strategy.
	pub fn toggle_class(&mut self, id: NodeId, class: &str) {
		let backend = Arc::clone(&self.classes);
		if let Some(el) = self.element_mut(id) {
			backend.toggle(el, class);
		}
	}

	/// Whether an element carries a class.
	pub fn has_class(&self, id: NodeId, class: &str) -> bool {
		self.element(id)
			.map(|el| self.classes.contains(el, class))
			.unwrap_or(false)
	}
}

impl Default for Document {
	fn default() -> Self {
		Self::new()
	}
}

/// Iterator over a node's ancestor chain, parent first, root last.
pub struct Ancestors<'a> {
	doc: &'a Document,
	next: Option<NodeId>,
}

impl Iterator for Ancestors<'_> {
	type Item = NodeId;

	fn next(&mut self) -> Option<NodeId> {
		let current = self.next?;
		self.next = self.doc.parent(current);
		Some(current)
	}
}
