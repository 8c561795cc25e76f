//! Wire format of a graph load result, as delivered by the backend.
//!
//! Everything here is deliberately loose: `node_type` stays a raw string so a
//! single unknown kind does not fail the whole document, and optional sections
//! default when absent. Validation happens in [`super::model::Graph::from_load_result`].

use serde::Deserialize;
use serde_json::{Map, Value};

use super::error::LoadError;
use super::stats::Statistics;

/// A node as sent by the backend.
#[derive(Clone, Debug, Deserialize)]
pub struct RawNode {
	/// Unique identifier, referenced by [`RawEdge::source_id`] and [`RawEdge::target_id`].
	pub node_id: String,
	/// Semantic type (`did`, `auto_attendant`, ...). Unknown values are dropped at ingestion.
	pub node_type: String,
	/// Free-form per-node properties. `null` and missing are both treated as empty.
	#[serde(default)]
	pub metadata: Option<Map<String, Value>>,
}

/// A directed edge as sent by the backend.
#[derive(Clone, Debug, Deserialize)]
pub struct RawEdge {
	/// Unique identifier of the edge.
	pub edge_id: String,
	/// Node the call leaves from.
	pub source_id: String,
	/// Node the call is routed to.
	pub target_id: String,
	/// Semantic label, e.g. `to_queue` or `agent`.
	pub edge_type: String,
}

/// Complete load result: nodes, edges, backend statistics and graph id.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct GraphLoadResult {
	/// Nodes in backend order.
	#[serde(default)]
	pub nodes: Vec<RawNode>,
	/// Edges in backend order.
	#[serde(default)]
	pub edges: Vec<RawEdge>,
	/// Statistics computed by the backend, if it sent any.
	#[serde(default)]
	pub statistics: Option<Statistics>,
	/// Backend identifier of the graph, shown as a subtitle.
	#[serde(default)]
	pub graph_id: Option<String>,
}

impl GraphLoadResult {
	/// Parse a load result from its JSON text.
	pub fn from_json(text: &str) -> Result<Self, LoadError> {
		Ok(serde_json::from_str(text)?)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn parses_minimal_document() {
		let raw = GraphLoadResult::from_json(
			r#"{
				"graph_id": "acme_graph",
				"nodes": [
					{ "node_id": "d1", "node_type": "did", "metadata": { "phone_number": "+15550100" } },
					{ "node_id": "x1", "node_type": "fax_machine", "metadata": null }
				],
				"edges": [
					{ "edge_id": "e1", "source_id": "d1", "target_id": "x1", "edge_type": "to_fax" }
				]
			}"#,
		)
		.unwrap();

		assert_eq!(raw.graph_id.as_deref(), Some("acme_graph"));
		assert_eq!(raw.nodes.len(), 2);
		assert_eq!(raw.nodes[1].node_type, "fax_machine");
		assert!(raw.nodes[1].metadata.is_none());
		assert_eq!(raw.edges[0].edge_type, "to_fax");
		assert!(raw.statistics.is_none());
	}

	#[test]
	fn missing_sections_default_to_empty() {
		let raw = GraphLoadResult::from_json("{}").unwrap();
		assert!(raw.nodes.is_empty());
		assert!(raw.edges.is_empty());
		assert!(raw.graph_id.is_none());
	}

	#[test]
	fn malformed_json_is_a_parse_error() {
		let err = GraphLoadResult::from_json("{ \"nodes\": [").unwrap_err();
		assert!(matches!(err, LoadError::Parse(_)));
	}
}
