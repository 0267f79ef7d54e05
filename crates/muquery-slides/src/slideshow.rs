//! The slideshow controller and its input bindings.

use std::sync::Arc;

use mu::prelude::{Event, Mu, NodeId};
use once_cell::sync::Lazy;
use parking_lot::RwLock;
use regex::Regex;
use thiserror::Error;
use tracing::{debug, warn};

/// Key code for the left arrow key, as reported in event payloads.
pub const KEY_LEFT: u64 = 37;
/// Key code for the right arrow key, as reported in event payloads.
pub const KEY_RIGHT: u64 = 39;

/// Matches the first closing paren of a `url(…)` value together with any
/// cache-busting query fragment already in front of it.
static CACHE_BUSTER: Lazy<Regex> =
	Lazy::new(|| Regex::new(r"(\?rand=[^)]+)?\)").expect("static pattern"));

/// Error type for slideshow construction.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SlideshowError {
	/// The document holds no `section` elements.
	///
	/// The index invariant (0 ≤ index < count) is unsatisfiable for an
	/// empty deck, so construction fails instead of deferring to a
	/// wrap-around division by zero later.
	#[error("no slide sections found in the document")]
	EmptyDeck,
}

struct SlideState {
	slides: Vec<NodeId>,
	count: usize,
	index: usize,
}

/// Cycles an ordered set of slide elements with a wrapping index.
///
/// Slides are references into the live document; the controller never
/// creates or destroys nodes, it only flips their inline `display` style.
/// Construction does not show slide 0 — the page markup/CSS is expected to
/// present the first slide by default, and the controller only takes over
/// from the first transition onward.
///
/// Clones share state, so the handles captured by the input bindings and
/// the handle held by the caller always agree on the current index.
#[derive(Clone)]
pub struct Slideshow {
	mu: Mu,
	state: Arc<RwLock<SlideState>>,
}

impl Slideshow {
	/// Collects all `section` elements, in document order, starting at
	/// index 0.
	///
	/// # Errors
	///
	/// [`SlideshowError::EmptyDeck`] when the document has no sections.
	pub fn new(mu: &Mu) -> Result<Self, SlideshowError> {
		let slides = mu.find_all("section");
		let count = slides.len();
		if count == 0 {
			return Err(SlideshowError::EmptyDeck);
		}
		debug!(count, "slideshow initialized");
		Ok(Self {
			mu: mu.clone(),
			state: Arc::new(RwLock::new(SlideState {
				slides,
				count,
				index: 0,
			})),
		})
	}

	/// The current slide index.
	pub fn index(&self) -> usize {
		self.state.read().index
	}

	/// Number of slides in the deck; always at least one.
	pub fn len(&self) -> usize {
		self.state.read().count
	}

	/// Always false; an empty deck cannot be constructed.
	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}

	/// The current slide element.
	pub fn current(&self) -> NodeId {
		let state = self.state.read();
		state.slides[state.index]
	}

	/// Hides the current slide (`display: none`).
	pub fn hide(&self) {
		self.hide_slide(self.current());
	}

	/// Shows the current slide (`display: block`), restarting its
	/// background animation first.
	pub fn show(&self) {
		self.show_slide(self.current());
	}

	/// Advances to the next slide, wrapping past the end.
	pub fn next(&self) {
		let (old, new, index) = {
			let mut state = self.state.write();
			let old = state.slides[state.index];
			state.index = (state.index + 1) % state.count;
			(old, state.slides[state.index], state.index)
		};
		debug!(index, "advancing to next slide");
		self.hide_slide(old);
		self.show_slide(new);
	}

	/// Moves to the previous slide, wrapping before the start.
	pub fn prev(&self) {
		let (old, new, index) = {
			let mut state = self.state.write();
			let old = state.slides[state.index];
			state.index = (state.index + state.count - 1) % state.count;
			(old, state.slides[state.index], state.index)
		};
		debug!(index, "moving to previous slide");
		self.hide_slide(old);
		self.show_slide(new);
	}

	fn hide_slide(&self, slide: NodeId) {
		self.mu.css(slide, &[("display", "none")]);
	}

	fn show_slide(&self, slide: NodeId) {
		self.restart_background(slide);
		self.mu.css(slide, &[("display", "block")]);
	}

	/// Rewrites the slide background's cache-busting query fragment so an
	/// animated image restarts from its first frame. A slide without a
	/// `div.bg` child, or one whose background has no image value, is
	/// skipped silently.
	///
	/// The headless document has no cascade; the inline value read here is
	/// the computed value.
	fn restart_background(&self, slide: NodeId) {
		let Some(bg) = self.mu.find_in(slide, "div.bg") else {
			return;
		};
		let Some(image) = self.mu.style(bg, "background-image") else {
			return;
		};
		let refreshed = refresh_cache_buster(&image, rand::random::<f64>());
		self.mu.css(bg, &[("background-image", &refreshed)]);
	}

	// -- input bindings ---------------------------------------------------

	/// Registers the input bindings on the document root, namespaced under
	/// `slides`: keyup with left/right arrow key codes, click for next,
	/// and contextmenu for previous with the host default suppressed.
	pub fn bind(&self) {
		let root = self.mu.root();

		let keys = self.clone();
		self.mu.on(
			root,
			"keyup.slides",
			Arc::new(move |event: &Event| match event.which() {
				Some(KEY_LEFT) => keys.prev(),
				Some(KEY_RIGHT) => keys.next(),
				_ => {}
			}),
		);

		let clicks = self.clone();
		self.mu.on(
			root,
			"click.slides",
			Arc::new(move |_: &Event| {
				clicks.next();
			}),
		);

		let context = self.clone();
		self.mu.on(
			root,
			"contextmenu.slides",
			Arc::new(move |event: &Event| {
				context.prev();
				event.prevent_default();
			}),
		);
	}

	/// Removes every binding registered by [`Slideshow::bind`]: the empty
	/// type matches all three event types, the `slides` namespace scopes
	/// the removal to this controller's registrations.
	pub fn detach(&self) {
		self.mu.off(self.mu.root(), ".slides");
	}
}

/// Wires the slideshow up the way the original page script did: on
/// document ready, collect the slides and register the input bindings. An
/// empty deck logs a warning instead of failing, since nothing useful can
/// be done about it from inside a ready callback.
pub fn run(mu: &Mu) {
	let mu_at_ready = mu.clone();
	mu.ready(move || match Slideshow::new(&mu_at_ready) {
		Ok(show) => show.bind(),
		Err(err) => warn!(%err, "slideshow not started"),
	});
}

/// Replaces an existing `?rand=…` fragment before the first closing paren,
/// or inserts one, carrying the new seed.
fn refresh_cache_buster(image: &str, seed: f64) -> String {
	let replacement = format!("?rand={})", seed);
	CACHE_BUSTER.replace(image, replacement.as_str()).into_owned()
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn cache_buster_is_appended_when_missing() {
		assert_eq!(
			refresh_cache_buster("url(cat.gif)", 0.5),
			"url(cat.gif?rand=0.5)"
		);
	}

	#[test]
	fn cache_buster_replaces_existing_fragment() {
		assert_eq!(
			refresh_cache_buster("url(cat.gif?rand=0.25)", 0.5),
			"url(cat.gif?rand=0.5)"
		);
	}

	#[test]
	fn values_without_parens_are_untouched() {
		assert_eq!(refresh_cache_buster("none", 0.5), "none");
	}

	#[test]
	fn only_first_paren_is_rewritten() {
		assert_eq!(
			refresh_cache_buster("url(a.gif), url(b.gif)", 0.5),
			"url(a.gif?rand=0.5), url(b.gif)"
		);
	}
}
