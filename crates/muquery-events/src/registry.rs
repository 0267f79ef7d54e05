//! The instance-owned event registry.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use muquery_dom::{Document, NodeId};
use muquery_selectors::SelectorList;
use parking_lot::RwLock;
use serde_json::{Map, Value};
use tracing::{debug, trace};

use crate::event::Event;
use crate::name::EventName;

/// Handler signature shared by the registration and platform layers.
pub type EventHandler = Arc<dyn Fn(&Event) + Send + Sync + 'static>;

/// One registration: created by `on`, removed by a matching `off`, never
/// mutated in place.
#[derive(Clone)]
struct EventEntry {
	name: EventName,
	selector: Option<String>,
	/// The caller's handler, invoked directly by `trigger`.
	handler: EventHandler,
	/// What was attached at the platform layer: the delegation wrapper when
	/// a selector was given, otherwise the handler itself. Detaching must
	/// use this reference, since platform removal is by reference equality.
	listener: EventHandler,
}

#[derive(Clone)]
struct NativeListener {
	event_type: String,
	handler: EventHandler,
}

#[derive(Default)]
struct RegistryInner {
	entries: HashMap<NodeId, Vec<EventEntry>>,
	listeners: HashMap<NodeId, Vec<NativeListener>>,
}

/// Event registry bound to one document.
///
/// Clones share state: the registry a facade hands to a consumer is the
/// same registry the facade mutates. Dispatch snapshots the matching
/// handlers before invoking any of them, so a handler may freely re-enter
/// the registry or the document.
#[derive(Clone)]
pub struct EventRegistry {
	doc: Arc<RwLock<Document>>,
	inner: Arc<RwLock<RegistryInner>>,
}

impl fmt::Debug for EventRegistry {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let inner = self.inner.read();
		f.debug_struct("EventRegistry")
			.field("elements", &inner.entries.len())
			.field("listeners", &inner.listeners.len())
			.finish()
	}
}

impl EventRegistry {
	/// Creates an empty registry over a shared document.
	pub fn new(doc: Arc<RwLock<Document>>) -> Self {
		Self {
			doc,
			inner: Arc::new(RwLock::new(RegistryInner::default())),
		}
	}

	// -- registration -----------------------------------------------------

	/// Registers a handler for a (possibly namespaced) event name.
	pub fn on(&self, el: NodeId, name: &str, handler: EventHandler) {
		self.register(el, EventName::parse(name), None, handler);
	}

	/// Registers a delegated handler: it only fires, on the platform
	/// dispatch path, when the event's target itself matches `selector`
	/// (the target is tested directly; there is no ancestor walking).
	pub fn on_delegated(&self, el: NodeId, name: &str, selector: &str, handler: EventHandler) {
		self.register(el, EventName::parse(name), Some(selector.to_string()), handler);
	}

	fn register(
		&self,
		el: NodeId,
		name: EventName,
		selector: Option<String>,
		handler: EventHandler,
	) {
		let listener = match selector.as_deref() {
			Some(raw) => self.delegation_wrapper(raw, &handler),
			None => Arc::clone(&handler),
		};
		trace!(
			target_el = ?el,
			event_type = name.event_type(),
			namespace = name.namespace(),
			delegated = selector.is_some(),
			"registering event handler"
		);
		self.inner
			.write()
			.entries
			.entry(el)
			.or_default()
			.push(EventEntry {
				name: name.clone(),
				selector,
				handler,
				listener: Arc::clone(&listener),
			});
		// The platform listener is always attached directly to the element;
		// delegation is purely the wrapper's filter.
		self.add_event_listener(el, name.event_type(), listener);
	}

	fn delegation_wrapper(&self, selector: &str, handler: &EventHandler) -> EventHandler {
		match selector.parse::<SelectorList>() {
			Ok(compiled) => {
				let doc = Arc::clone(&self.doc);
				let handler = Arc::clone(handler);
				Arc::new(move |event: &Event| {
					let target_matches = {
						let doc = doc.read();
						compiled.matches(&doc, event.target())
					};
					if target_matches {
						handler(event);
					}
				})
			}
			Err(err) => {
				debug!(selector, %err, "delegation selector failed to parse; wrapper will never fire");
				Arc::new(|_: &Event| {})
			}
		}
	}

	// -- removal ----------------------------------------------------------

	/// Removes every registration on `el` matching the name: an empty type
	/// matches any type, an empty namespace matches any namespace, and no
	/// selector constraint is applied. Each removed entry's platform
	/// listener is detached by reference.
	pub fn off(&self, el: NodeId, name: &str) {
		self.unregister(el, EventName::parse(name), None);
	}

	/// Like [`EventRegistry::off`], additionally requiring an exact
	/// delegation-selector match.
	pub fn off_delegated(&self, el: NodeId, name: &str, selector: &str) {
		self.unregister(el, EventName::parse(name), Some(selector));
	}

	fn unregister(&self, el: NodeId, name: EventName, selector: Option<&str>) {
		let removed: Vec<EventEntry> = {
			let mut inner = self.inner.write();
			let Some(entries) = inner.entries.get_mut(&el) else {
				return;
			};
			let mut removed = Vec::new();
			entries.retain(|entry| {
				if entry_matches(entry, &name, selector) {
					removed.push(entry.clone());
					false
				} else {
					true
				}
			});
			if entries.is_empty() {
				inner.entries.remove(&el);
			}
			removed
		};
		trace!(target_el = ?el, count = removed.len(), "unregistering event handlers");
		for entry in removed {
			self.remove_event_listener(el, entry.name.event_type(), &entry.listener);
		}
	}

	// -- triggering -------------------------------------------------------

	/// Triggers with an empty payload. See [`EventRegistry::trigger_with`].
	pub fn trigger(&self, el: NodeId, name: &str) {
		self.trigger_with(el, name, Map::new());
	}

	/// Synthesizes an event and invokes, directly and in registration
	/// order, the original handler of every entry on `el` whose type and
	/// namespace match.
	///
	/// The delegation selector is deliberately NOT consulted here, unlike
	/// removal: a namespaced, selector-scoped handler fires on any trigger
	/// to its element/type/namespace regardless of the selector. This
	/// asymmetry is long-standing observable behavior and is kept as is
	/// (see DESIGN.md).
	///
	/// When nothing matched, falls back to platform dispatch of the bare
	/// type; the namespace and the payload are dropped on that path.
	pub fn trigger_with(&self, el: NodeId, name: &str, data: Map<String, Value>) {
		let name = EventName::parse(name);
		let matched: Vec<EventHandler> = {
			let inner = self.inner.read();
			inner
				.entries
				.get(&el)
				.map(|entries| {
					entries
						.iter()
						.filter(|entry| entry_matches(entry, &name, None))
						.map(|entry| Arc::clone(&entry.handler))
						.collect()
				})
				.unwrap_or_default()
		};
		if matched.is_empty() {
			debug!(
				target_el = ?el,
				event_type = name.event_type(),
				"no matching registrations; falling back to platform dispatch"
			);
			self.dispatch_event(&Event::new(el, name.event_type()));
			return;
		}
		let event = Event::with_data(el, name.event_type(), data);
		for handler in matched {
			handler(&event);
		}
	}

	// -- platform layer ---------------------------------------------------

	/// Attaches a raw platform listener (`addEventListener` analog).
	pub fn add_event_listener(&self, el: NodeId, event_type: &str, handler: EventHandler) {
		self.inner
			.write()
			.listeners
			.entry(el)
			.or_default()
			.push(NativeListener {
				event_type: event_type.to_string(),
				handler,
			});
	}

	/// Detaches a raw platform listener by reference equality
	/// (`removeEventListener` analog). Unknown handlers are a no-op.
	pub fn remove_event_listener(&self, el: NodeId, event_type: &str, handler: &EventHandler) {
		let mut inner = self.inner.write();
		let Some(listeners) = inner.listeners.get_mut(&el) else {
			return;
		};
		if let Some(position) = listeners
			.iter()
			.position(|l| l.event_type == event_type && Arc::ptr_eq(&l.handler, handler))
		{
			listeners.remove(position);
		}
		if listeners.is_empty() {
			inner.listeners.remove(&el);
		}
	}

	/// Runs the platform listeners registered on the event's target for the
	/// event's type (`dispatchEvent` analog; no bubbling). Listeners are
	/// snapshotted before any of them runs.
	pub fn dispatch_event(&self, event: &Event) {
		for handler in self.listeners_for(event.target(), event.event_type()) {
			handler(event);
		}
	}

	/// Delivers an event the way host input arrives: listeners run on the
	/// target first, then on each ancestor up to the root, while the
	/// event's target stays the originating element. This is what makes a
	/// delegated handler on an ancestor see descendant targets. Events
	/// synthesized by the trigger fallback do not take this path.
	pub fn dispatch_bubbling(&self, event: &Event) {
		let chain: Vec<NodeId> = {
			let doc = self.doc.read();
			std::iter::once(event.target())
				.chain(doc.ancestors(event.target()))
				.collect()
		};
		for el in chain {
			for handler in self.listeners_for(el, event.event_type()) {
				handler(event);
			}
		}
	}

	fn listeners_for(&self, el: NodeId, event_type: &str) -> Vec<EventHandler> {
		let inner = self.inner.read();
		inner
			.listeners
			.get(&el)
			.map(|listeners| {
				listeners
					.iter()
					.filter(|l| l.event_type == event_type)
					.map(|l| Arc::clone(&l.handler))
					.collect()
			})
			.unwrap_or_default()
	}

	// -- observability ----------------------------------------------------

	/// Number of registrations currently held for an element.
	pub fn entry_count(&self, el: NodeId) -> usize {
		self.inner
			.read()
			.entries
			.get(&el)
			.map(Vec::len)
			.unwrap_or(0)
	}

	/// Number of platform listeners currently attached to an element.
	pub fn listener_count(&self, el: NodeId) -> usize {
		self.inner
			.read()
			.listeners
			.get(&el)
			.map(Vec::len)
			.unwrap_or(0)
	}
}

/// Removal/trigger matching, mirroring the original registry predicate:
/// empty type and namespace act as wildcards; the selector is only checked
/// when the caller supplied one (removal does, triggering never does).
fn entry_matches(entry: &EventEntry, name: &EventName, selector: Option<&str>) -> bool {
	(name.event_type().is_empty() || entry.name.event_type() == name.event_type())
		&& (name.namespace().is_empty() || entry.name.namespace() == name.namespace())
		&& selector.is_none_or(|sel| entry.selector.as_deref() == Some(sel))
}
