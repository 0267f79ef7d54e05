//! Class-manipulation strategies.
//!
//! The original library feature-detected `classList` on every call and fell
//! back to manual string manipulation of `className`. Here the choice is
//! made once, at document construction, and the selected strategy object is
//! used for every class operation thereafter. Both strategies read and write
//! the same storage (the element's `class` attribute) and are observably
//! equivalent through the facade; they differ only in how they normalize the
//! raw attribute text.

use crate::element::ElementData;

/// Strategy interface for class manipulation on an element.
pub trait ClassList: Send + Sync {
	/// Adds a class token. Adding an already-present token is a no-op.
	fn add(&self, el: &mut ElementData, class: &str);

	/// Removes a class token. Removing an absent token is a no-op.
	fn remove(&self, el: &mut ElementData, class: &str);

	/// Whether a class token is present.
	fn contains(&self, el: &ElementData, class: &str) -> bool {
		el.has_class_token(class)
	}

	/// Adds the token when absent, removes it when present.
	fn toggle(&self, el: &mut ElementData, class: &str) {
		if self.contains(el, class) {
			self.remove(el, class);
		} else {
			self.add(el, class);
		}
	}
}

/// Token-set strategy: the `classList` analog.
///
/// Operates on the attribute as an ordered token set; the attribute is
/// rewritten in canonical single-space form on every mutation.
#[derive(Debug, Default, Clone, Copy)]
pub struct TokenListBackend;

impl ClassList for TokenListBackend {
	fn add(&self, el: &mut ElementData, class: &str) {
		if el.has_class_token(class) {
			return;
		}
		let mut tokens: Vec<&str> = el.class_attribute().split_whitespace().collect();
		tokens.push(class);
		el.set_class_attribute(tokens.join(" "));
	}

	fn remove(&self, el: &mut ElementData, class: &str) {
		if !el.has_class_token(class) {
			return;
		}
		let tokens: Vec<&str> = el
			.class_attribute()
			.split_whitespace()
			.filter(|token| *token != class)
			.collect();
		el.set_class_attribute(tokens.join(" "));
	}
}

/// Whitespace-string strategy: the `className` fallback analog.
///
/// Splices tokens in and out of the raw attribute text, guarding against
/// duplicate insertion and trimming the extra whitespace a removal leaves
/// behind. Unlike [`TokenListBackend`] it does not canonicalize whitespace
/// it did not touch.
#[derive(Debug, Default, Clone, Copy)]
pub struct AttrStringBackend;

impl ClassList for AttrStringBackend {
	fn add(&self, el: &mut ElementData, class: &str) {
		let current = el.class_attribute();
		if current.is_empty() {
			el.set_class_attribute(class);
		} else if !el.has_class_token(class) {
			let appended = format!("{} {}", current, class);
			el.set_class_attribute(appended);
		}
	}

	fn remove(&self, el: &mut ElementData, class: &str) {
		let current = el.class_attribute();
		let Some((start, end)) = token_span(current, class) else {
			return;
		};
		// Widen the span over one neighboring whitespace char on each side,
		// splice a single space back in, and trim the ends.
		let bytes = current.as_bytes();
		let start = if start > 0 && bytes[start - 1].is_ascii_whitespace() {
			start - 1
		} else {
			start
		};
		let end = if end < bytes.len() && bytes[end].is_ascii_whitespace() {
			end + 1
		} else {
			end
		};
		let spliced = format!("{} {}", &current[..start], &current[end..]);
		el.set_class_attribute(spliced.trim());
	}
}

/// Finds the byte span of the first whitespace-bounded occurrence of
/// `token` in `attr`.
fn token_span(attr: &str, token: &str) -> Option<(usize, usize)> {
	if token.is_empty() {
		return None;
	}
	let bytes = attr.as_bytes();
	let mut from = 0;
	while let Some(pos) = attr[from..].find(token) {
		let start = from + pos;
		let end = start + token.len();
		let left_ok = start == 0 || bytes[start - 1].is_ascii_whitespace();
		let right_ok = end == bytes.len() || bytes[end].is_ascii_whitespace();
		if left_ok && right_ok {
			return Some((start, end));
		}
		from = start + 1;
	}
	None
}

#[cfg(test)]
mod tests {
	use super::*;

	fn element_with_class(value: &str) -> ElementData {
		let mut el = ElementData::new("div");
		el.set_class_attribute(value);
		el
	}

	#[test]
	fn token_list_add_deduplicates() {
		let backend = TokenListBackend;
		let mut el = element_with_class("bg");
		backend.add(&mut el, "bg");
		assert_eq!(el.class_attribute(), "bg");
	}

	#[test]
	fn token_list_remove_drops_all_occurrences() {
		let backend = TokenListBackend;
		let mut el = element_with_class("a bg  bg b");
		backend.remove(&mut el, "bg");
		assert_eq!(el.class_attribute(), "a b");
	}

	#[test]
	fn attr_string_add_appends_with_single_space() {
		let backend = AttrStringBackend;
		let mut el = element_with_class("a");
		backend.add(&mut el, "b");
		assert_eq!(el.class_attribute(), "a b");
	}

	#[test]
	fn attr_string_add_is_duplicate_guarded() {
		let backend = AttrStringBackend;
		let mut el = element_with_class("a b");
		backend.add(&mut el, "a");
		assert_eq!(el.class_attribute(), "a b");
	}

	#[test]
	fn attr_string_remove_trims_leftover_whitespace() {
		let backend = AttrStringBackend;
		let mut el = element_with_class("a x b");
		backend.remove(&mut el, "x");
		assert_eq!(el.class_attribute(), "a b");

		let mut el = element_with_class("x b");
		backend.remove(&mut el, "x");
		assert_eq!(el.class_attribute(), "b");

		let mut el = element_with_class("a x");
		backend.remove(&mut el, "x");
		assert_eq!(el.class_attribute(), "a");
	}

	#[test]
	fn attr_string_remove_ignores_substring_matches() {
		let backend = AttrStringBackend;
		let mut el = element_with_class("background bg");
		backend.remove(&mut el, "bg");
		assert_eq!(el.class_attribute(), "background");
	}

	#[test]
	fn toggle_round_trips_on_both_backends() {
		for backend in [
			Box::new(TokenListBackend) as Box<dyn ClassList>,
			Box::new(AttrStringBackend) as Box<dyn ClassList>,
		] {
			let mut el = element_with_class("");
			backend.toggle(&mut el, "on");
			assert!(backend.contains(&el, "on"));
			backend.toggle(&mut el, "on");
			assert!(!backend.contains(&el, "on"));
		}
	}
}
