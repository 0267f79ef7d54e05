//! Headless in-memory document model for muquery.
//!
//! This crate supplies the substrate the rest of the workspace operates on:
//! an arena-backed tree of elements and text nodes with attributes, classes,
//! and inline styles, plus an HTML-subset parser and serializer.
//!
//! ## Overview
//!
//! - [`Document`] owns every node and hands out copyable [`NodeId`] handles.
//!   Handles are element identity: two equal ids refer to the same node.
//! - [`ElementData`] carries tag name, ordered attributes, and the inline
//!   style declarations serialized into the `style` attribute.
//! - [`ClassList`] is the class-manipulation strategy, chosen once at
//!   document construction from [`Capabilities`]: a token-set backend (the
//!   `classList` analog) or a whitespace-string fallback backend (the
//!   `className` analog).
//!
//! ## Example
//!
//! ```
//! use muquery_dom::Document;
//!
//! let mut doc = Document::parse("<section class=\"intro\"><div class=\"bg\"></div></section>");
//! let section = doc.child_elements(doc.root())[0];
//! doc.add_class(section, "active");
//! assert!(doc.has_class(section, "active"));
//! assert!(doc.has_class(section, "intro"));
//! ```

mod capabilities;
mod classes;
mod document;
mod element;
mod parser;
mod render;

pub use capabilities::Capabilities;
pub use classes::{AttrStringBackend, ClassList, TokenListBackend};
pub use document::{Ancestors, Document, NodeId};
pub use element::ElementData;
