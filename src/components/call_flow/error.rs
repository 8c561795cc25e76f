//! Errors raised at the ingestion boundary.
//!
//! Layout, traversal and the interaction controllers are total; the only
//! failures are failing to locate or parse the graph document itself.

use thiserror::Error;

/// Failure to obtain a graph load result.
#[derive(Error, Debug)]
pub enum LoadError {
	/// The host page has no element carrying the graph document.
	#[error("no element with id '{id}' in the document")]
	MissingElement {
		/// Element id that was looked up.
		id: String,
	},

	/// The element exists but its text could not be read.
	#[error("element '{id}' has no readable text")]
	Unreadable {
		/// Element id that was read.
		id: String,
	},

	/// The graph document is not valid JSON for a load result.
	#[error("failed to parse graph data")]
	Parse(#[from] serde_json::Error),
}
