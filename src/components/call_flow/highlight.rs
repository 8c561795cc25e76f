//! Hover highlighting of the edges touching a node.
//!
//! Purely a rendering annotation: the controller never adds or removes nodes
//! or edges, and it does not care whether the displayed graph is the full one
//! or a focused view.

use std::collections::HashSet;

use super::model::Edge;

/// Rendering emphasis of a single edge.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum EdgeEmphasis {
	/// Nothing is hovered.
	#[default]
	Neutral,
	/// Incident to the hovered node.
	Emphasized,
	/// Not incident while something else is emphasized.
	Dimmed,
}

/// An edge together with its current emphasis.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AnnotatedEdge {
	/// The displayed edge.
	pub edge: Edge,
	/// How the surface should draw it.
	pub emphasis: EdgeEmphasis,
}

/// Ids of all edges where `node_id` is the source or the target.
pub fn edges_incident(node_id: &str, edges: &[Edge]) -> HashSet<String> {
	edges
		.iter()
		.filter(|e| e.source == node_id || e.target == node_id)
		.map(|e| e.id.clone())
		.collect()
}

/// Tracks the hovered node and the edges it touches.
#[derive(Clone, Debug, Default)]
pub struct HighlightController {
	hovered_node: Option<String>,
	incident: HashSet<String>,
}

impl HighlightController {
	/// Controller with nothing hovered.
	pub fn new() -> Self {
		Self::default()
	}

	/// Currently hovered node.
	pub fn hovered_node(&self) -> Option<&str> {
		self.hovered_node.as_deref()
	}

	/// Pointer entered `node_id`; recompute its incident edges within `edges`.
	pub fn hover_enter(&mut self, node_id: &str, edges: &[Edge]) {
		if self.hovered_node.as_deref() == Some(node_id) {
			return;
		}
		self.hovered_node = Some(node_id.to_owned());
		self.incident = edges_incident(node_id, edges);
	}

	/// Pointer left the node; every edge goes back to neutral.
	pub fn hover_leave(&mut self) {
		self.hovered_node = None;
		self.incident.clear();
	}

	/// Emphasis for one edge id.
	pub fn emphasis(&self, edge_id: &str) -> EdgeEmphasis {
		if self.incident.is_empty() {
			EdgeEmphasis::Neutral
		} else if self.incident.contains(edge_id) {
			EdgeEmphasis::Emphasized
		} else {
			EdgeEmphasis::Dimmed
		}
	}

	/// Annotate `edges` with their current emphasis.
	pub fn annotate(&self, edges: &[Edge]) -> Vec<AnnotatedEdge> {
		edges
			.iter()
			.map(|edge| AnnotatedEdge {
				edge: edge.clone(),
				emphasis: self.emphasis(&edge.id),
			})
			.collect()
	}
}
