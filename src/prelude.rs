//! Unified prelude for simplified imports.
//!
//! ```
//! use mu::prelude::*;
//!
//! let mu = Mu::from_markup("<p>hi</p>").unwrap();
//! let p = mu.find("p").unwrap();
//! assert_eq!(mu.text(p), "hi");
//! ```

pub use crate::{Mu, MuError};
pub use muquery_dom::{Capabilities, Document, NodeId};
pub use muquery_events::{Event, EventHandler, EventName, EventRegistry};
pub use muquery_selectors::SelectorList;
