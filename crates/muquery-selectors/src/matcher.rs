//! Right-to-left selector matching.

use muquery_dom::{Document, NodeId};

use crate::{Combinator, ComplexSelector, CompoundSelector, SimpleSelector};

pub(crate) fn matches_complex(doc: &Document, node: NodeId, selector: &ComplexSelector) -> bool {
	let mut compounds: Vec<&CompoundSelector> = Vec::with_capacity(selector.rest.len() + 1);
	let mut combinators: Vec<Combinator> = Vec::with_capacity(selector.rest.len());
	compounds.push(&selector.first);
	for (combinator, compound) in &selector.rest {
		combinators.push(*combinator);
		compounds.push(compound);
	}
	matches_from_end(doc, node, &compounds, &combinators)
}

/// Matches the rightmost compound against `node`, then walks left through
/// the combinators, backtracking over ancestors for descendant links.
fn matches_from_end(
	doc: &Document,
	node: NodeId,
	compounds: &[&CompoundSelector],
	combinators: &[Combinator],
) -> bool {
	let Some((last, init)) = compounds.split_last() else {
		return false;
	};
	if !matches_compound(doc, node, last) {
		return false;
	}
	if init.is_empty() {
		return true;
	}
	let remaining = &combinators[..init.len() - 1];
	match combinators[init.len() - 1] {
		Combinator::Child => parent_element(doc, node)
			.is_some_and(|parent| matches_from_end(doc, parent, init, remaining)),
		Combinator::Descendant => {
			let mut current = parent_element(doc, node);
			while let Some(ancestor) = current {
				if matches_from_end(doc, ancestor, init, remaining) {
					return true;
				}
				current = parent_element(doc, ancestor);
			}
			false
		}
	}
}

fn parent_element(doc: &Document, node: NodeId) -> Option<NodeId> {
	doc.parent(node).filter(|parent| doc.is_element(*parent))
}

fn matches_compound(doc: &Document, node: NodeId, compound: &CompoundSelector) -> bool {
	let Some(el) = doc.element(node) else {
		return false;
	};
	// The synthetic document root is not a real element and never matches.
	if el.tag().starts_with('#') {
		return false;
	}
	compound.parts.iter().all(|part| match part {
		SimpleSelector::Universal => true,
		SimpleSelector::Type(tag) => el.tag().eq_ignore_ascii_case(tag),
		SimpleSelector::Id(id) => el.id() == Some(id.as_str()),
		SimpleSelector::Class(class) => el.has_class_token(class),
		SimpleSelector::Attr { name, value: None } => el.attribute(name).is_some(),
		SimpleSelector::Attr {
			name,
			value: Some(expected),
		} => el.attribute(name) == Some(expected.as_str()),
	})
}
