//! Namespaced event registry for the muquery document model.
//!
//! This crate is the event subsystem behind the facade's `on`/`off`/
//! `trigger` surface. It layers two tables, both keyed by element identity:
//!
//! - a **platform listener table** — the `addEventListener` analog: plain
//!   `(type, handler)` pairs, detached by handler reference equality and
//!   run by [`EventRegistry::dispatch_event`];
//! - a **registration table** — one entry per `on` call, carrying the
//!   parsed [`EventName`] (type plus dotted namespace), the optional
//!   delegation selector, the caller's handler, and the wrapper actually
//!   attached at the platform layer.
//!
//! The registry is instance-owned and dependency-injected; there is no
//! process-wide state.
//!
//! ## Example
//!
//! ```
//! use std::sync::Arc;
//! use std::sync::atomic::{AtomicUsize, Ordering};
//! use muquery_dom::Document;
//! use muquery_events::EventRegistry;
//! use parking_lot::RwLock;
//!
//! let doc = Arc::new(RwLock::new(Document::parse("<section></section>")));
//! let section = {
//! 	let doc = doc.read();
//! 	doc.first_element_child(doc.root()).unwrap()
//! };
//! let registry = EventRegistry::new(Arc::clone(&doc));
//!
//! let hits = Arc::new(AtomicUsize::new(0));
//! let counter = Arc::clone(&hits);
//! registry.on(section, "click.nav", Arc::new(move |_| {
//! 	counter.fetch_add(1, Ordering::SeqCst);
//! }));
//!
//! registry.trigger(section, "click.nav");
//! assert_eq!(hits.load(Ordering::SeqCst), 1);
//! ```

mod event;
mod name;
mod registry;

pub use event::Event;
pub use name::EventName;
pub use registry::{EventHandler, EventRegistry};
