//! Document model integration tests
//!
//! Success Criteria:
//! 1. Markup parses into a traversable arena tree
//! 2. Content getters/setters round-trip through the serializer
//! 3. Class helpers behave identically through both strategies
//! 4. Capability selection picks the right class backend
//!
//! Test Categories:
//! - Happy Path: 3 tests
//! - Edge Cases: 4 tests
//! - Equivalence Partitioning: 2 tests

use muquery_dom::{Capabilities, Document};
use rstest::*;

// ============================================================================
// Fixtures
// ============================================================================

const DECK: &str = "\
<section id=\"one\"><div class=\"bg\" style=\"background-image: url(a.gif)\"></div></section>\
<section id=\"two\"><div class=\"bg\"></div></section>\
<section id=\"three\"><p>fin</p></section>";

#[fixture]
fn deck() -> Document {
	Document::parse(DECK)
}

// ============================================================================
// Happy Path Tests
// ============================================================================

#[rstest]
fn parsed_deck_has_three_sections_in_order(deck: Document) {
	let sections = deck.child_elements(deck.root());
	assert_eq!(sections.len(), 3);
	let ids: Vec<_> = sections
		.iter()
		.map(|s| deck.attribute(*s, "id").unwrap().to_string())
		.collect();
	assert_eq!(ids, ["one", "two", "three"]);
}

#[rstest]
fn inner_html_round_trips_structure(deck: Document) {
	let reparsed = Document::parse(&deck.inner_html(deck.root()));
	assert_eq!(
		reparsed.inner_html(reparsed.root()),
		deck.inner_html(deck.root())
	);
}

#[rstest]
fn set_text_content_then_read_back(mut deck: Document) {
	let sections = deck.child_elements(deck.root());
	deck.set_text_content(sections[2], "done");
	assert_eq!(deck.text_content(sections[2]), "done");
	assert_eq!(deck.child_elements(sections[2]).len(), 0);
}

// ============================================================================
// Edge Cases
// ============================================================================

#[rstest]
fn set_inner_html_replaces_subtree(mut deck: Document) {
	let sections = deck.child_elements(deck.root());
	deck.set_inner_html(sections[0], "<p>a</p><p>b</p>");
	let children = deck.child_elements(sections[0]);
	assert_eq!(children.len(), 2);
	assert_eq!(deck.text_content(sections[0]), "ab");
}

#[rstest]
fn setting_empty_text_clears_content(mut deck: Document) {
	let sections = deck.child_elements(deck.root());
	deck.set_text_content(sections[2], "");
	assert_eq!(deck.text_content(sections[2]), "");
}

#[test]
fn empty_markup_yields_empty_root() {
	let doc = Document::parse("");
	assert!(doc.child_elements(doc.root()).is_empty());
	assert_eq!(doc.inner_html(doc.root()), "");
}

#[rstest]
fn descendant_snapshot_survives_mutation(mut deck: Document) {
	let all = deck.descendant_elements(deck.root());
	for id in &all {
		// removing children while iterating the snapshot must not panic
		deck.set_text_content(*id, "x");
	}
	assert_eq!(all.len(), 6);
}

// ============================================================================
// Equivalence Partitioning: class strategies
// ============================================================================

#[rstest]
#[case::token_list(Capabilities::modern())]
#[case::attr_string(Capabilities::without_class_list())]
fn class_round_trip_is_backend_independent(#[case] caps: Capabilities) {
	let mut doc = Document::parse_with_capabilities(DECK, caps);
	let section = doc.child_elements(doc.root())[0];

	doc.add_class(section, "active");
	assert!(doc.has_class(section, "active"));

	doc.add_class(section, "active");
	let tokens: Vec<_> = doc
		.attribute(section, "class")
		.unwrap_or("")
		.split_whitespace()
		.filter(|t| *t == "active")
		.collect();
	assert_eq!(tokens.len(), 1, "duplicate insertion must be guarded");

	doc.remove_class(section, "active");
	assert!(!doc.has_class(section, "active"));

	doc.toggle_class(section, "dim");
	assert!(doc.has_class(section, "dim"));
	doc.toggle_class(section, "dim");
	assert!(!doc.has_class(section, "dim"));
}
