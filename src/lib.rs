//! # muquery
//!
//! A terse convenience surface over a headless in-memory document: query and
//! traversal, content access, class and inline-style manipulation, a
//! ready-callback registrar, and a namespaced event subsystem with selector
//! delegation.
//!
//! The crate is organized the way its pieces depend on one another:
//!
//! - [`dom`] — the document substrate (arena tree, attributes, styles,
//!   class-list strategies, HTML-subset parsing);
//! - [`selectors`] — selector parsing and matching;
//! - [`events`] — the instance-owned event registry;
//! - [`Mu`] — the facade binding one document to one registry and a ready
//!   queue.
//!
//! ## Example
//!
//! ```
//! use mu::Mu;
//!
//! let mu = Mu::from_markup(
//! 	"<section><h1 class=\"title\">One</h1></section><section>Two</section>",
//! )
//! .expect("modern capabilities");
//!
//! let title = mu.find("section .title").unwrap();
//! assert_eq!(mu.text(title), "One");
//!
//! mu.add_class(title, "shown");
//! assert!(mu.has_class(title, "shown"));
//!
//! let sections = mu.find_all("section");
//! assert_eq!(sections.len(), 2);
//! ```

#![warn(missing_docs)]

mod error;
mod facade;
mod ready;

pub mod prelude;

pub use error::MuError;
pub use facade::Mu;

// Re-export the subsystem crates under stable names.
pub use muquery_dom as dom;
pub use muquery_events as events;
pub use muquery_selectors as selectors;
