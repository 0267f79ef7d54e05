//! Error types for the facade.

use thiserror::Error;

/// Error type for facade construction.
///
/// This is the library's single loud failure: everything past construction
/// is silent on missing input (empty results and no-ops). The original
/// rejected pre-modern hosts with a thrown string at load time; here the
/// guard is a typed error from the constructor.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MuError {
	/// The document host lacks a required capability.
	#[error("muquery requires a modern document host: {missing} unsupported")]
	UnsupportedEnvironment {
		/// The capability that was missing (for example `selector matching`).
		missing: &'static str,
	},
}
