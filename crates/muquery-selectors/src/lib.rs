//! CSS-subset selector parsing and matching for the muquery document model.
//!
//! The grammar covers what the library's call surface needs: universal,
//! type, id, class, and attribute simple selectors; compounds (`div.bg`);
//! descendant and child combinators; and comma-separated selector lists.
//! Complex selectors are matched right-to-left with ancestor backtracking.
//!
//! Parsing is strict at this layer — an invalid selector is a typed error —
//! and the facade above decides how to degrade (it logs and matches
//! nothing, keeping the library's non-strict surface).
//!
//! ## Example
//!
//! ```
//! use muquery_dom::Document;
//! use muquery_selectors::SelectorList;
//!
//! let doc = Document::parse("<section class=\"intro\"><div class=\"bg\"></div></section>");
//! let section = doc.first_element_child(doc.root()).unwrap();
//! let bg = doc.first_element_child(section).unwrap();
//!
//! let selector: SelectorList = "section.intro > div.bg".parse().unwrap();
//! assert!(selector.matches(&doc, bg));
//! assert!(!selector.matches(&doc, section));
//! ```

use std::str::FromStr;

use muquery_dom::{Document, NodeId};
use thiserror::Error;

mod matcher;
mod parser;

/// Error type for selector parsing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectorError {
	/// The selector string was empty or all whitespace.
	#[error("empty selector")]
	Empty,
	/// The selector string did not parse.
	#[error("invalid selector `{0}`")]
	Invalid(String),
}

// ============================================================================
// AST Definitions
// ============================================================================

/// A parsed, comma-separated selector list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectorList {
	/// The comma-separated alternatives; the list matches when any does.
	pub alternatives: Vec<ComplexSelector>,
}

/// A sequence of compound selectors joined by combinators.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComplexSelector {
	/// The leftmost compound.
	pub first: CompoundSelector,
	/// Each following compound with the combinator that links it to the
	/// previous one.
	pub rest: Vec<(Combinator, CompoundSelector)>,
}

/// How two compounds in a complex selector relate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Combinator {
	/// Whitespace: any ancestor.
	Descendant,
	/// `>`: immediate parent.
	Child,
}

/// A run of simple selectors that must all match one element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompoundSelector {
	/// The simple selectors; never empty.
	pub parts: Vec<SimpleSelector>,
}

/// A single constraint on one element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SimpleSelector {
	/// `*`
	Universal,
	/// A tag name; matched ASCII case-insensitively.
	Type(String),
	/// `#id`
	Id(String),
	/// `.class`
	Class(String),
	/// `[name]` or `[name=value]`
	Attr {
		/// Attribute name.
		name: String,
		/// Required value; `None` means presence alone suffices.
		value: Option<String>,
	},
}

impl SelectorList {
	/// Whether `node` matches any alternative in the list.
	///
	/// Non-element nodes and the synthetic document root never match.
	pub fn matches(&self, doc: &Document, node: NodeId) -> bool {
		self.alternatives
			.iter()
			.any(|complex| matcher::matches_complex(doc, node, complex))
	}
}

impl FromStr for SelectorList {
	type Err = SelectorError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		parser::parse(s)
	}
}
