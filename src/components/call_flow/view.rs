//! Interactive call-flow session.
//!
//! [`CallFlowView`] owns one loaded graph plus its focus and highlight state
//! and is driven by the surface's events. Every method runs to completion
//! synchronously, so rapid clicks can never interleave.

use log::{info, warn};

use super::details::NodeDetails;
use super::focus::{FocusController, FocusEvent, FocusState, FocusTransition};
use super::highlight::{AnnotatedEdge, EdgeEmphasis, HighlightController};
use super::layout::{LayoutConfig, layout};
use super::model::{Graph, IngestReport, PositionedGraph, PositionedNode};
use super::stats::Statistics;
use super::types::GraphLoadResult;

/// Current view handed to the rendering surface.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DisplayGraph {
	/// Displayed nodes.
	pub nodes: Vec<PositionedNode>,
	/// Displayed edges with their hover emphasis.
	pub edges: Vec<AnnotatedEdge>,
}

/// What panels around the canvas need to know about the session.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ViewSummary {
	/// Backend identifier of the loaded graph.
	pub graph_id: Option<String>,
	/// Statistics of the loaded graph.
	pub statistics: Statistics,
	/// What ingestion dropped.
	pub ingest: IngestReport,
	/// Details of the focused node, when focus mode is active and the node exists.
	pub focused: Option<NodeDetails>,
}

/// One interactive session over a loaded call flow.
#[derive(Clone, Debug, Default)]
pub struct CallFlowView {
	config: LayoutConfig,
	graph: Graph,
	graph_id: Option<String>,
	statistics: Statistics,
	ingest: IngestReport,
	displayed: PositionedGraph,
	focus: FocusController,
	highlight: HighlightController,
}

impl CallFlowView {
	/// Empty session; nothing is displayed until a graph is loaded.
	pub fn new(config: LayoutConfig) -> Self {
		Self {
			config,
			..Self::default()
		}
	}

	/// A load result arrived. Resets focus and hover unconditionally.
	pub fn on_graph_loaded(&mut self, raw: GraphLoadResult) {
		self.focus.reset();
		self.highlight.hover_leave();

		let graph_id = raw.graph_id.clone();
		let backend_statistics = raw.statistics.clone();
		let (graph, report) = Graph::from_load_result(raw);
		if !report.is_clean() {
			warn!(
				"call-flow: ingestion dropped {} unknown-type nodes, {} duplicate nodes, {} dangling edges",
				report.unknown_kind_nodes, report.duplicate_nodes, report.dangling_edges
			);
		}

		self.statistics = backend_statistics.unwrap_or_else(|| Statistics::from_graph(&graph));
		self.displayed = PositionedGraph {
			nodes: layout(&graph.nodes, &self.config),
			edges: graph.edges.clone(),
		};
		info!(
			"call-flow: loaded graph {} ({} nodes, {} edges)",
			graph_id.as_deref().unwrap_or("<unnamed>"),
			graph.nodes.len(),
			graph.edges.len()
		);
		self.graph = graph;
		self.graph_id = graph_id;
		self.ingest = report;
	}

	/// A node was clicked: enter, switch or leave focus.
	pub fn on_node_selected(&mut self, node_id: &str) -> FocusTransition {
		self.apply_focus(FocusEvent::Select(node_id))
	}

	/// Explicit "leave focus" action.
	pub fn on_focus_exit_requested(&mut self) -> FocusTransition {
		self.apply_focus(FocusEvent::Exit)
	}

	fn apply_focus(&mut self, event: FocusEvent<'_>) -> FocusTransition {
		let transition = self.focus.apply(event, &mut self.displayed, &self.config);
		if transition != FocusTransition::Unchanged {
			self.highlight.hover_leave();
		}
		transition
	}

	/// Pointer entered a node; emphasize its edges in the displayed graph.
	pub fn on_node_hover_enter(&mut self, node_id: &str) {
		self.highlight.hover_enter(node_id, &self.displayed.edges);
	}

	/// Pointer left the hovered node.
	pub fn on_node_hover_leave(&mut self) {
		self.highlight.hover_leave();
	}

	/// Snapshot of what should be drawn right now.
	pub fn display_graph(&self) -> DisplayGraph {
		DisplayGraph {
			nodes: self.displayed.nodes.clone(),
			edges: self.highlight.annotate(&self.displayed.edges),
		}
	}

	/// Borrowing access to the displayed graph, for per-frame drawing.
	pub fn displayed(&self) -> &PositionedGraph {
		&self.displayed
	}

	/// Emphasis of one displayed edge.
	pub fn edge_emphasis(&self, edge_id: &str) -> EdgeEmphasis {
		self.highlight.emphasis(edge_id)
	}

	/// Currently hovered node.
	pub fn hovered_node(&self) -> Option<&str> {
		self.highlight.hovered_node()
	}

	/// Current focus mode.
	pub fn focus_state(&self) -> &FocusState {
		self.focus.state()
	}

	/// The full graph of the current load, regardless of focus.
	pub fn graph(&self) -> &Graph {
		&self.graph
	}

	/// Statistics of the current load.
	pub fn statistics(&self) -> &Statistics {
		&self.statistics
	}

	/// Topmost displayed node whose `width` x `height` card contains `(x, y)`.
	pub fn node_at(&self, x: f64, y: f64, width: f64, height: f64) -> Option<&PositionedNode> {
		self.displayed
			.nodes
			.iter()
			.rev()
			.find(|p| x >= p.x && x <= p.x + width && y >= p.y && y <= p.y + height)
	}

	/// Snapshot for side panels.
	pub fn summary(&self) -> ViewSummary {
		ViewSummary {
			graph_id: self.graph_id.clone(),
			statistics: self.statistics.clone(),
			ingest: self.ingest,
			focused: self
				.focus
				.state()
				.focused_node_id()
				.and_then(|id| self.graph.node(id))
				.map(NodeDetails::from_node),
		}
	}
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;
	use serde_json::json;

	use super::*;

	fn scenario() -> GraphLoadResult {
		serde_json::from_value(json!({
			"graph_id": "acme_graph",
			"nodes": [
				{ "node_id": "D1", "node_type": "did", "metadata": { "phone_number": "+15550100" } },
				{ "node_id": "A1", "node_type": "auto_attendant", "metadata": { "attendant_name": "Main" } },
				{ "node_id": "Q1", "node_type": "call_queue", "metadata": {} },
				{ "node_id": "U1", "node_type": "user", "metadata": {} },
				{ "node_id": "V1", "node_type": "voicemail", "metadata": {} }
			],
			"edges": [
				{ "edge_id": "e1", "source_id": "D1", "target_id": "A1", "edge_type": "to_auto_attendant" },
				{ "edge_id": "e2", "source_id": "A1", "target_id": "Q1", "edge_type": "to_queue" },
				{ "edge_id": "e3", "source_id": "A1", "target_id": "U1", "edge_type": "to_user" },
				{ "edge_id": "e4", "source_id": "U1", "target_id": "V1", "edge_type": "to_voicemail" }
			]
		}))
		.unwrap()
	}

	fn loaded() -> CallFlowView {
		let mut view = CallFlowView::new(LayoutConfig::default());
		view.on_graph_loaded(scenario());
		view
	}

	#[test]
	fn empty_session_displays_nothing() {
		let view = CallFlowView::new(LayoutConfig::default());
		assert_eq!(view.display_graph(), DisplayGraph::default());
		assert_eq!(view.summary(), ViewSummary::default());
	}

	#[test]
	fn load_lays_out_everything_and_computes_statistics() {
		let view = loaded();
		let display = view.display_graph();

		assert_eq!(display.nodes.len(), 5);
		assert_eq!(display.edges.len(), 4);
		assert!(display.edges.iter().all(|e| e.emphasis == EdgeEmphasis::Neutral));
		assert_eq!(view.statistics().connected_components, 1);
		assert_eq!(view.summary().graph_id.as_deref(), Some("acme_graph"));
	}

	#[test]
	fn backend_statistics_take_precedence() {
		let mut raw = scenario();
		raw.statistics = Some(Statistics {
			total_nodes: 99,
			..Statistics::default()
		});
		let mut view = CallFlowView::new(LayoutConfig::default());
		view.on_graph_loaded(raw);
		assert_eq!(view.statistics().total_nodes, 99);
	}

	#[test]
	fn focus_summary_reports_the_focused_node() {
		let mut view = loaded();
		assert_eq!(view.on_node_selected("A1"), FocusTransition::Entered);

		let focused = view.summary().focused.unwrap();
		assert_eq!(focused.id, "A1");
		assert_eq!(focused.name, "Main");
		assert_eq!(view.display_graph().edges.len(), 3);
	}

	#[test]
	fn focus_transitions_clear_hover() {
		let mut view = loaded();
		view.on_node_hover_enter("A1");
		assert_eq!(view.edge_emphasis("e1"), EdgeEmphasis::Emphasized);

		view.on_node_selected("A1");
		assert_eq!(view.hovered_node(), None);
		assert!(
			view.display_graph()
				.edges
				.iter()
				.all(|e| e.emphasis == EdgeEmphasis::Neutral)
		);
	}

	#[test]
	fn hover_works_on_the_focused_view() {
		let mut view = loaded();
		view.on_node_selected("U1");
		view.on_node_hover_enter("U1");

		let display = view.display_graph();
		assert_eq!(display.edges.len(), 1);
		assert_eq!(display.edges[0].emphasis, EdgeEmphasis::Emphasized);
	}

	#[test]
	fn loading_while_focused_resets_to_inactive() {
		let mut view = loaded();
		view.on_node_selected("A1");
		view.on_graph_loaded(scenario());

		assert!(!view.focus_state().is_active());
		assert_eq!(view.display_graph().nodes.len(), 5);
		assert_eq!(view.on_focus_exit_requested(), FocusTransition::Unchanged);
	}

	#[test]
	fn node_at_hits_cards_only() {
		let mut view = CallFlowView::new(LayoutConfig::grid());
		view.on_graph_loaded(scenario());

		assert_eq!(view.node_at(60.0, 110.0, 220.0, 80.0).map(|p| p.id()), Some("D1"));
		assert_eq!(view.node_at(5.0, 5.0, 220.0, 80.0), None);
	}
}
