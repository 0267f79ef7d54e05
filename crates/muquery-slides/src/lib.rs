//! Slideshow controller over the muquery facade.
//!
//! Cycles through the document's `section` elements in response to keyboard
//! and mouse input: left/right arrows and right-click move backward, left
//! click moves forward. Visibility is driven exclusively through the inline
//! `display` style, and entering a slide rewrites the cache-busting query
//! fragment on its background image so looping GIFs restart from their
//! first frame.
//!
//! The controller is the facade's sole consumer; the facade knows nothing
//! about it.
//!
//! ## Example
//!
//! ```
//! use mu::Mu;
//! use muquery_slides::Slideshow;
//!
//! let mu = Mu::from_markup(
//! 	"<section><div class=\"bg\"></div></section>\
//! 	 <section><div class=\"bg\"></div></section>",
//! )
//! .unwrap();
//! mu.document_ready();
//!
//! let show = Slideshow::new(&mu).unwrap();
//! assert_eq!(show.index(), 0);
//! show.next();
//! assert_eq!(show.index(), 1);
//! show.next();
//! assert_eq!(show.index(), 0);
//! ```

#![warn(missing_docs)]

mod slideshow;

pub use slideshow::{KEY_LEFT, KEY_RIGHT, Slideshow, SlideshowError, run};
