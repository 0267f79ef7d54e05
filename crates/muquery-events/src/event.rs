//! Synthetic event objects.

use std::sync::atomic::{AtomicBool, Ordering};

use muquery_dom::NodeId;
use serde_json::{Map, Value};

/// A synthetic event delivered to handlers.
///
/// Carries the dispatch target, the bare event type, and an arbitrary JSON
/// payload supplied by the trigger call (keyboard handlers read the `which`
/// key code from it). The default-prevented flag is interior-mutable so
/// handlers can set it through the shared reference they receive.
#[derive(Debug)]
pub struct Event {
	target: NodeId,
	event_type: String,
	data: Map<String, Value>,
	default_prevented: AtomicBool,
}

impl Event {
	/// Creates an event with an empty payload.
	pub fn new(target: NodeId, event_type: impl Into<String>) -> Self {
		Self::with_data(target, event_type, Map::new())
	}

	/// Creates an event with a payload.
	pub fn with_data(target: NodeId, event_type: impl Into<String>, data: Map<String, Value>) -> Self {
		Self {
			target,
			event_type: event_type.into(),
			data,
			default_prevented: AtomicBool::new(false),
		}
	}

	/// The element the event was dispatched to.
	pub fn target(&self) -> NodeId {
		self.target
	}

	/// The bare event type (no namespace).
	pub fn event_type(&self) -> &str {
		&self.event_type
	}

	/// The payload supplied at trigger time.
	pub fn data(&self) -> &Map<String, Value> {
		&self.data
	}

	/// The `which` key code from the payload, when present and integral.
	pub fn which(&self) -> Option<u64> {
		self.data.get("which").and_then(Value::as_u64)
	}

	/// Marks the host's default action as suppressed.
	pub fn prevent_default(&self) {
		self.default_prevented.store(true, Ordering::SeqCst);
	}

	/// Whether a handler suppressed the default action.
	pub fn default_prevented(&self) -> bool {
		self.default_prevented.load(Ordering::SeqCst)
	}
}
