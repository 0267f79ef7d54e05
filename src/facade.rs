//! The `Mu` facade.

use std::sync::Arc;

use muquery_dom::{Capabilities, Document, NodeId};
use muquery_events::{EventHandler, EventRegistry};
use muquery_selectors::SelectorList;
use parking_lot::RwLock;
use serde_json::{Map, Value};
use tracing::debug;

use crate::error::MuError;
use crate::ready::ReadyQueue;

/// The DOM utility facade: one shared document, one instance-owned event
/// registry, one ready queue.
///
/// `Mu` is cheap to clone; clones share all three. Every operation takes
/// the subject element explicitly — document-rooted variants (`find`,
/// `find_all`) and element-rooted variants (`find_in`, `find_all_in`) are
/// separate methods rather than one method inspecting its argument shapes.
///
/// Failed lookups return `None` or empty collections; operations on stale
/// or non-element handles are no-ops. The only loud failure is
/// construction, which verifies the host capabilities.
#[derive(Clone)]
pub struct Mu {
	doc: Arc<RwLock<Document>>,
	events: EventRegistry,
	ready: ReadyQueue,
}

impl Mu {
	/// Wraps a document, verifying the host capabilities.
	///
	/// # Errors
	///
	/// [`MuError::UnsupportedEnvironment`] when selector matching or
	/// synthetic events are unavailable. A missing class-list capability is
	/// not an error; it selects the attribute-string fallback instead.
	pub fn new(doc: Document) -> Result<Self, MuError> {
		let capabilities = *doc.capabilities();
		if !capabilities.selector_matching {
			return Err(MuError::UnsupportedEnvironment {
				missing: "selector matching",
			});
		}
		if !capabilities.synthetic_events {
			return Err(MuError::UnsupportedEnvironment {
				missing: "synthetic events",
			});
		}
		let doc = Arc::new(RwLock::new(doc));
		let events = EventRegistry::new(Arc::clone(&doc));
		Ok(Self {
			doc,
			events,
			ready: ReadyQueue::new(),
		})
	}

	/// Parses markup into a full-capability document and wraps it.
	/// The ready queue is not fired; call [`Mu::document_ready`] once
	/// registrations are in place.
	///
	/// # Errors
	///
	/// See [`Mu::new`].
	pub fn from_markup(markup: &str) -> Result<Self, MuError> {
		Self::with_capabilities(markup, Capabilities::default())
	}

	/// Parses markup under explicit host capabilities.
	///
	/// # Errors
	///
	/// See [`Mu::new`].
	pub fn with_capabilities(markup: &str, capabilities: Capabilities) -> Result<Self, MuError> {
		Self::new(Document::parse_with_capabilities(markup, capabilities))
	}

	/// The shared document handle.
	pub fn document(&self) -> Arc<RwLock<Document>> {
		Arc::clone(&self.doc)
	}

	/// The instance-owned event registry.
	pub fn events(&self) -> &EventRegistry {
		&self.events
	}

	/// The synthetic root element (the whole-document subject).
	pub fn root(&self) -> NodeId {
		self.doc.read().root()
	}

	fn compile(&self, selector: &str) -> Option<SelectorList> {
		match selector.parse::<SelectorList>() {
			Ok(list) => Some(list),
			Err(err) => {
				debug!(selector, %err, "selector failed to parse; matching nothing");
				None
			}
		}
	}

	// -- query and traversal ----------------------------------------------

	/// First element in the document matching the selector.
	pub fn find(&self, selector: &str) -> Option<NodeId> {
		let root = self.root();
		self.find_in(root, selector)
	}

	/// First descendant of `el` matching the selector.
	pub fn find_in(&self, el: NodeId, selector: &str) -> Option<NodeId> {
		let compiled = self.compile(selector)?;
		let doc = self.doc.read();
		doc.descendant_elements(el)
			.into_iter()
			.find(|candidate| compiled.matches(&doc, *candidate))
	}

	/// All elements in the document matching the selector, in document
	/// order. Always a concrete snapshot, never a live view.
	pub fn find_all(&self, selector: &str) -> Vec<NodeId> {
		let root = self.root();
		self.find_all_in(root, selector)
	}

	/// All descendants of `el` matching the selector, in document order.
	pub fn find_all_in(&self, el: NodeId, selector: &str) -> Vec<NodeId> {
		let Some(compiled) = self.compile(selector) else {
			return Vec::new();
		};
		let doc = self.doc.read();
		doc.descendant_elements(el)
			.into_iter()
			.filter(|candidate| compiled.matches(&doc, *candidate))
			.collect()
	}

	/// First ancestor of `el` (parent first, root last) matching the
	/// selector; `None` when nothing up the chain matches.
	pub fn up(&self, el: NodeId, selector: &str) -> Option<NodeId> {
		let compiled = self.compile(selector)?;
		let doc = self.doc.read();
		doc.ancestors(el)
			.find(|ancestor| compiled.matches(&doc, *ancestor))
	}

	/// The immediate parent element (the no-selector form of [`Mu::up`]).
	pub fn parent(&self, el: NodeId) -> Option<NodeId> {
		let doc = self.doc.read();
		doc.parent(el).filter(|parent| doc.is_element(*parent))
	}

	/// First descendant of `el` matching the selector.
	pub fn down(&self, el: NodeId, selector: &str) -> Option<NodeId> {
		self.find_in(el, selector)
	}

	/// First element child (the no-selector form of [`Mu::down`]).
	pub fn first_child(&self, el: NodeId) -> Option<NodeId> {
		self.doc.read().first_element_child(el)
	}

	/// Next element sibling.
	pub fn next(&self, el: NodeId) -> Option<NodeId> {
		self.doc.read().next_element_sibling(el)
	}

	/// Previous element sibling.
	pub fn prev(&self, el: NodeId) -> Option<NodeId> {
		self.doc.read().previous_element_sibling(el)
	}

	/// Whether `el` matches the selector. The no-selector case is vacuously
	/// true and is expressed by not calling this at all; an unparsable
	/// selector matches nothing.
	pub fn is(&self, el: NodeId, selector: &str) -> bool {
		let Some(compiled) = self.compile(selector) else {
			return false;
		};
		compiled.matches(&self.doc.read(), el)
	}

	/// Filters any collection of element handles by the selector,
	/// normalizing to a concrete ordered `Vec` first.
	pub fn filter(&self, els: impl IntoIterator<Item = NodeId>, selector: &str) -> Vec<NodeId> {
		let els: Vec<NodeId> = els.into_iter().collect();
		let Some(compiled) = self.compile(selector) else {
			return Vec::new();
		};
		let doc = self.doc.read();
		els.into_iter()
			.filter(|el| compiled.matches(&doc, *el))
			.collect()
	}

	// -- content ----------------------------------------------------------

	/// Concatenated descendant text of `el`; empty for stale handles.
	pub fn text(&self, el: NodeId) -> String {
		self.doc.read().text_content(el)
	}

	/// Replaces the content of `el` with a single text node. Setting the
	/// empty string clears the content. Returns `el` for chaining.
	pub fn set_text(&self, el: NodeId, value: &str) -> NodeId {
		self.doc.write().set_text_content(el, value);
		el
	}

	/// Serialized markup of the content of `el`.
	pub fn html(&self, el: NodeId) -> String {
		self.doc.read().inner_html(el)
	}

	/// Replaces the content of `el` by parsing a markup fragment. Setting
	/// the empty string clears the content. Returns `el` for chaining.
	pub fn set_html(&self, el: NodeId, markup: &str) -> NodeId {
		self.doc.write().set_inner_html(el, markup);
		el
	}

	// -- classes and styles -----------------------------------------------

	/// Adds a class; duplicate insertion is guarded. Returns `el`.
	pub fn add_class(&self, el: NodeId, class: &str) -> NodeId {
		self.doc.write().add_class(el, class);
		el
	}

	/// Removes a class; absent classes are a no-op. Returns `el`.
	pub fn remove_class(&self, el: NodeId, class: &str) -> NodeId {
		self.doc.write().remove_class(el, class);
		el
	}

	/// Toggles a class. Returns `el`.
	pub fn toggle_class(&self, el: NodeId, class: &str) -> NodeId {
		self.doc.write().toggle_class(el, class);
		el
	}

	/// Whether `el` carries a class.
	pub fn has_class(&self, el: NodeId, class: &str) -> bool {
		self.doc.read().has_class(el, class)
	}

	/// Applies each property/value pair as an inline style declaration.
	/// Returns `el` for chaining.
	pub fn css(&self, el: NodeId, declarations: &[(&str, &str)]) -> NodeId {
		let mut doc = self.doc.write();
		for (property, value) in declarations {
			doc.set_style(el, property, value);
		}
		el
	}

	/// Reads an inline style declaration. The headless document has no
	/// cascade, so this is also the computed value.
	pub fn style(&self, el: NodeId, property: &str) -> Option<String> {
		self.doc
			.read()
			.style(el, property)
			.map(|value| value.to_string())
	}

	// -- ready ------------------------------------------------------------

	/// Registers a callback to run once, when [`Mu::document_ready`] fires.
	/// Callbacks run in registration order; callbacks registered after the
	/// fire never run.
	pub fn ready(&self, callback: impl FnOnce() + Send + 'static) {
		self.ready.register(Box::new(callback));
	}

	/// Marks the document loaded and runs the ready queue. Only the first
	/// call has any effect.
	pub fn document_ready(&self) {
		self.ready.fire();
	}

	// -- events -----------------------------------------------------------

	/// Registers a handler for a (possibly namespaced) event name on `el`.
	pub fn on(&self, el: NodeId, name: &str, handler: EventHandler) {
		self.events.on(el, name, handler);
	}

	/// Registers a delegated handler: on the platform dispatch path it
	/// only fires when the event's target matches `selector`.
	pub fn on_delegated(&self, el: NodeId, name: &str, selector: &str, handler: EventHandler) {
		self.events.on_delegated(el, name, selector, handler);
	}

	/// Removes registrations on `el` matching the name (empty type or
	/// namespace act as wildcards).
	pub fn off(&self, el: NodeId, name: &str) {
		self.events.off(el, name);
	}

	/// Removes registrations on `el` matching name and exact selector.
	pub fn off_delegated(&self, el: NodeId, name: &str, selector: &str) {
		self.events.off_delegated(el, name, selector);
	}

	/// Triggers an event with an empty payload. See
	/// [`EventRegistry::trigger_with`] for matching semantics.
	pub fn trigger(&self, el: NodeId, name: &str) {
		self.events.trigger(el, name);
	}

	/// Triggers an event with a payload.
	pub fn trigger_with(&self, el: NodeId, name: &str, data: Map<String, Value>) {
		self.events.trigger_with(el, name, data);
	}
}

impl std::fmt::Debug for Mu {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Mu")
			.field("doc", &self.doc.read())
			.field("events", &self.events)
			.finish()
	}
}
