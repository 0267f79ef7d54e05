//! Host capability probing.

/// What the document host supports.
///
/// The original library ran against whatever browser it was loaded into and
/// rejected hosts without modern query/event APIs at load time, falling back
/// to string-based class manipulation where `classList` was missing. The
/// headless document keeps that shape: capabilities default to all-on, and
/// tests construct degraded documents to exercise the guard and the
/// fallback class backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capabilities {
	/// Selector matching is available (`querySelector`/`matches` analog).
	pub selector_matching: bool,
	/// Synthetic event dispatch is available (`dispatchEvent` analog).
	pub synthetic_events: bool,
	/// Token-set class manipulation is available (`classList` analog).
	/// When false, class operations go through the attribute-string backend.
	pub class_list: bool,
}

impl Default for Capabilities {
	fn default() -> Self {
		Self {
			selector_matching: true,
			synthetic_events: true,
			class_list: true,
		}
	}
}

impl Capabilities {
	/// Full-featured host.
	pub fn modern() -> Self {
		Self::default()
	}

	/// Host without token-set class support; class helpers use the
	/// whitespace-string fallback.
	pub fn without_class_list() -> Self {
		Self {
			class_list: false,
			..Self::default()
		}
	}
}
