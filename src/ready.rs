//! Ready-callback queue.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::Mutex;
use tracing::debug;

type ReadyCallback = Box<dyn FnOnce() + Send + 'static>;

/// FIFO queue of callbacks run exactly once, when the document's load
/// completes (the `DOMContentLoaded` analog).
///
/// Callbacks registered after the queue has fired never run, matching the
/// original listener-registration semantics; they are logged and dropped.
#[derive(Clone, Default)]
pub(crate) struct ReadyQueue {
	fired: Arc<AtomicBool>,
	callbacks: Arc<Mutex<Vec<ReadyCallback>>>,
}

impl ReadyQueue {
	pub(crate) fn new() -> Self {
		Self::default()
	}

	pub(crate) fn register(&self, callback: ReadyCallback) {
		if self.fired.load(Ordering::SeqCst) {
			debug!("ready callback registered after document ready; dropping");
			return;
		}
		self.callbacks.lock().push(callback);
	}

	/// Fires the queue in registration order. Only the first call runs
	/// anything; later calls are no-ops.
	pub(crate) fn fire(&self) {
		if self.fired.swap(true, Ordering::SeqCst) {
			return;
		}
		// Drain before running so a callback registering another callback
		// cannot deadlock on the queue lock (it will be dropped as late).
		let callbacks = std::mem::take(&mut *self.callbacks.lock());
		debug!(count = callbacks.len(), "document ready; running callbacks");
		for callback in callbacks {
			callback();
		}
	}

	#[cfg(test)]
	pub(crate) fn has_fired(&self) -> bool {
		self.fired.load(Ordering::SeqCst)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::sync::atomic::AtomicUsize;

	#[test]
	fn callbacks_run_once_in_fifo_order() {
		let queue = ReadyQueue::new();
		let order = Arc::new(Mutex::new(Vec::new()));
		for tag in ["first", "second", "third"] {
			let order = Arc::clone(&order);
			queue.register(Box::new(move || order.lock().push(tag)));
		}
		queue.fire();
		queue.fire();
		assert_eq!(*order.lock(), vec!["first", "second", "third"]);
	}

	#[test]
	fn late_registration_is_dropped() {
		let queue = ReadyQueue::new();
		queue.fire();
		assert!(queue.has_fired());

		let hits = Arc::new(AtomicUsize::new(0));
		let captured = Arc::clone(&hits);
		queue.register(Box::new(move || {
			captured.fetch_add(1, Ordering::SeqCst);
		}));
		queue.fire();
		assert_eq!(hits.load(Ordering::SeqCst), 0);
	}
}
