//! Event subsystem integration tests
//!
//! Success Criteria:
//! 1. Namespaced names parse with multi-segment namespaces intact
//! 2. trigger invokes exactly the matching registrations
//! 3. off removes exactly the matching registrations and detaches the
//!    attached wrapper by reference
//! 4. The trigger/off selector asymmetry behaves exactly as documented
//! 5. Unmatched triggers fall back to platform dispatch of the bare type
//!
//! Test Categories:
//! - Happy Path: 3 tests
//! - Edge Cases: 5 tests
//! - State Transitions: 2 tests
//! - Property-based: 1 test

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use muquery_dom::{Document, NodeId};
use muquery_events::{EventHandler, EventRegistry};
use parking_lot::RwLock;
use proptest::prelude::*;
use rstest::*;
use serde_json::{Map, json};

// ============================================================================
// Fixtures
// ============================================================================

struct Rig {
	registry: EventRegistry,
	root: NodeId,
	link: NodeId,
	other: NodeId,
}

#[fixture]
fn rig() -> Rig {
	let doc = Document::parse(
		"<section><a class=\"link\" href=\"#\">go</a></section><section id=\"other\"></section>",
	);
	let root = doc.root();
	let sections = doc.child_elements(root);
	let link = doc.first_element_child(sections[0]).unwrap();
	let other = sections[1];
	let doc = Arc::new(RwLock::new(doc));
	Rig {
		registry: EventRegistry::new(doc),
		root,
		link,
		other,
	}
}

fn counter() -> (Arc<AtomicUsize>, EventHandler) {
	let hits = Arc::new(AtomicUsize::new(0));
	let captured = Arc::clone(&hits);
	let handler: EventHandler = Arc::new(move |_| {
		captured.fetch_add(1, Ordering::SeqCst);
	});
	(hits, handler)
}

// ============================================================================
// Happy Path Tests
// ============================================================================

#[rstest]
fn trigger_fires_matching_handler_exactly_once(rig: Rig) {
	let (hits, handler) = counter();
	let (noise_hits, noise) = counter();

	rig.registry.on(rig.root, "click.nav", handler);
	rig.registry.on(rig.root, "keyup.nav", Arc::clone(&noise));
	rig.registry.on(rig.other, "click.nav", Arc::clone(&noise));
	rig.registry.on(rig.root, "click.other", noise);

	rig.registry.trigger(rig.root, "click.nav");

	assert_eq!(hits.load(Ordering::SeqCst), 1);
	assert_eq!(noise_hits.load(Ordering::SeqCst), 0);
}

#[rstest]
fn bare_type_trigger_matches_all_namespaces(rig: Rig) {
	let (hits, handler) = counter();
	rig.registry.on(rig.root, "click", Arc::clone(&handler));
	rig.registry.on(rig.root, "click.a", Arc::clone(&handler));
	rig.registry.on(rig.root, "click.b.c", handler);

	rig.registry.trigger(rig.root, "click");
	assert_eq!(hits.load(Ordering::SeqCst), 3);
}

#[rstest]
fn trigger_payload_reaches_handlers(rig: Rig) {
	let seen = Arc::new(AtomicUsize::new(0));
	let captured = Arc::clone(&seen);
	rig.registry.on(
		rig.root,
		"keyup",
		Arc::new(move |event| {
			if event.which() == Some(39) {
				captured.fetch_add(1, Ordering::SeqCst);
			}
		}),
	);

	let mut data = Map::new();
	data.insert("which".to_string(), json!(39));
	rig.registry.trigger_with(rig.root, "keyup", data);
	assert_eq!(seen.load(Ordering::SeqCst), 1);
}

// ============================================================================
// State Transitions: off
// ============================================================================

#[rstest]
fn off_removes_only_exact_type_and_namespace(rig: Rig) {
	let (foo_hits, foo) = counter();
	let (bare_hits, bare) = counter();
	let (other_ns_hits, other_ns) = counter();

	rig.registry.on(rig.root, "click.foo", foo);
	rig.registry.on(rig.root, "click", bare);
	rig.registry.on(rig.root, "click.bar", other_ns);

	rig.registry.off(rig.root, "click.foo");
	rig.registry.trigger(rig.root, "click");

	assert_eq!(foo_hits.load(Ordering::SeqCst), 0);
	assert_eq!(bare_hits.load(Ordering::SeqCst), 1);
	assert_eq!(other_ns_hits.load(Ordering::SeqCst), 1);
}

#[rstest]
fn off_by_bare_namespace_removes_across_types(rig: Rig) {
	let (hits, handler) = counter();
	rig.registry.on(rig.root, "click.slides", Arc::clone(&handler));
	rig.registry.on(rig.root, "keyup.slides", Arc::clone(&handler));
	rig.registry.on(rig.root, "click.keep", handler);

	rig.registry.off(rig.root, ".slides");

	assert_eq!(rig.registry.entry_count(rig.root), 1);
	rig.registry.trigger(rig.root, "click");
	rig.registry.trigger(rig.root, "keyup");
	assert_eq!(hits.load(Ordering::SeqCst), 1);
}

#[rstest]
fn off_detaches_platform_listener_by_reference(rig: Rig) {
	let (hits, handler) = counter();
	rig.registry.on_delegated(rig.root, "click.nav", "a.link", handler);
	assert_eq!(rig.registry.listener_count(rig.root), 1);

	rig.registry.off(rig.root, "click.nav");
	assert_eq!(rig.registry.entry_count(rig.root), 0);
	assert_eq!(
		rig.registry.listener_count(rig.root),
		0,
		"the attached wrapper, not the original handler, must be detached"
	);

	// nothing left to fire through either path
	rig.registry.trigger(rig.root, "click.nav");
	assert_eq!(hits.load(Ordering::SeqCst), 0);
}

// ============================================================================
// Edge Cases: delegation and the trigger/off asymmetry
// ============================================================================

#[rstest]
fn bubbling_dispatch_filters_delegated_handlers_by_target(rig: Rig) {
	let (hits, handler) = counter();
	rig.registry
		.on_delegated(rig.root, "click", "a.link", handler);

	// Input originating on a non-matching element bubbles to the root
	// listener, whose wrapper filters it out.
	rig.registry
		.dispatch_bubbling(&muquery_events::Event::new(rig.other, "click"));
	assert_eq!(hits.load(Ordering::SeqCst), 0);

	// Input originating on the matching element passes the filter.
	rig.registry
		.dispatch_bubbling(&muquery_events::Event::new(rig.link, "click"));
	assert_eq!(hits.load(Ordering::SeqCst), 1);
}

#[rstest]
fn trigger_bypasses_delegation_filter(rig: Rig) {
	let (hits, handler) = counter();
	rig.registry
		.on_delegated(rig.root, "click.nav", "a.link", handler);

	// The root does not match `a.link`, yet trigger matches on
	// element/type/namespace only and invokes the original handler.
	rig.registry.trigger(rig.root, "click.nav");
	assert_eq!(hits.load(Ordering::SeqCst), 1);
}

#[rstest]
fn off_honors_selector_where_trigger_does_not(rig: Rig) {
	let (delegated_hits, delegated) = counter();
	let (plain_hits, plain) = counter();
	rig.registry
		.on_delegated(rig.root, "click.nav", "a.link", delegated);
	rig.registry.on(rig.root, "click.nav", plain);

	rig.registry.off_delegated(rig.root, "click.nav", "a.link");
	rig.registry.trigger(rig.root, "click.nav");

	assert_eq!(delegated_hits.load(Ordering::SeqCst), 0);
	assert_eq!(plain_hits.load(Ordering::SeqCst), 1);
}

#[rstest]
fn unmatched_trigger_falls_back_to_platform_dispatch(rig: Rig) {
	let (hits, handler) = counter();
	// Registered under namespace "a"; triggering namespace "b" matches no
	// registration, so the fallback dispatches the bare type at the
	// platform layer, where the same listener is attached.
	rig.registry.on(rig.root, "click.a", handler);
	rig.registry.trigger(rig.root, "click.b");
	assert_eq!(hits.load(Ordering::SeqCst), 1);
}

#[rstest]
fn removing_unregistered_handler_is_a_no_op(rig: Rig) {
	rig.registry.off(rig.root, "click.ghost");
	rig.registry.off(rig.other, "whatever");
	assert_eq!(rig.registry.entry_count(rig.root), 0);
}

// ============================================================================
// Property-based: name grammar
// ============================================================================

proptest! {
	#[test]
	fn namespace_rejoins_everything_after_first_dot(
		event_type in "[a-z]{1,8}",
		segments in prop::collection::vec("[a-z0-9]{1,5}", 1..4),
	) {
		let raw = format!("{}.{}", event_type, segments.join("."));
		let name = muquery_events::EventName::parse(&raw);
		prop_assert_eq!(name.event_type(), event_type.as_str());
		prop_assert_eq!(name.namespace(), segments.join(".").as_str());
	}
}
