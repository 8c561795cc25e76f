//! Typed call-flow graph: node kinds, nodes, edges and their positioned views.
//!
//! A [`Graph`] is built once per load from a [`GraphLoadResult`] and is the
//! single source of truth for that load. Positioned views are derived from it
//! by the layout engine and can always be recomputed.

use std::collections::HashSet;
use std::fmt;

use log::warn;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::types::GraphLoadResult;

/// Semantic node type. Variant order is the left-to-right column order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
	/// Inbound phone number.
	Did,
	/// IVR menu.
	AutoAttendant,
	/// Queue of agents.
	CallQueue,
	/// Ring group, laid out below the call queues.
	HuntGroup,
	/// Person with an extension.
	User,
	/// Voicemail box.
	Voicemail,
}

impl NodeKind {
	/// All kinds in column order.
	pub const ALL: [NodeKind; 6] = [
		NodeKind::Did,
		NodeKind::AutoAttendant,
		NodeKind::CallQueue,
		NodeKind::HuntGroup,
		NodeKind::User,
		NodeKind::Voicemail,
	];

	/// Parse a backend `node_type`. Unknown strings yield `None`.
	pub fn parse(s: &str) -> Option<Self> {
		Self::ALL.into_iter().find(|kind| kind.as_str() == s)
	}

	/// Wire name of this kind.
	pub fn as_str(self) -> &'static str {
		match self {
			NodeKind::Did => "did",
			NodeKind::AutoAttendant => "auto_attendant",
			NodeKind::CallQueue => "call_queue",
			NodeKind::HuntGroup => "hunt_group",
			NodeKind::User => "user",
			NodeKind::Voicemail => "voicemail",
		}
	}

	/// Human-readable name for panels and node cards.
	pub fn title(self) -> &'static str {
		match self {
			NodeKind::Did => "DID",
			NodeKind::AutoAttendant => "Auto Attendant",
			NodeKind::CallQueue => "Call Queue",
			NodeKind::HuntGroup => "Hunt Group",
			NodeKind::User => "User",
			NodeKind::Voicemail => "Voicemail",
		}
	}
}

impl fmt::Display for NodeKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// A call-flow node. Immutable once created.
#[derive(Clone, Debug, PartialEq)]
pub struct Node {
	/// Unique within a graph.
	pub id: String,
	/// Semantic type; picks the column.
	pub kind: NodeKind,
	/// Opaque to the engine apart from the optional layout sort key and display labels.
	pub metadata: Map<String, Value>,
}

impl Node {
	/// Create a node with empty metadata.
	pub fn new(id: impl Into<String>, kind: NodeKind) -> Self {
		Self {
			id: id.into(),
			kind,
			metadata: Map::new(),
		}
	}

	/// Attach a metadata entry.
	pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
		self.metadata.insert(key.into(), value.into());
		self
	}
}

/// A directed edge between two nodes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Edge {
	/// Unique within a graph.
	pub id: String,
	/// Id of the calling node.
	pub source: String,
	/// Id of the node calls are routed to.
	pub target: String,
	/// Semantic label, e.g. `to_queue` or `agent`.
	pub kind: String,
}

impl Edge {
	/// Create an edge.
	pub fn new(
		id: impl Into<String>,
		source: impl Into<String>,
		target: impl Into<String>,
		kind: impl Into<String>,
	) -> Self {
		Self {
			id: id.into(),
			source: source.into(),
			target: target.into(),
			kind: kind.into(),
		}
	}

	/// Display label: `to_queue` becomes `TO QUEUE`.
	pub fn label(&self) -> String {
		self.kind.replace('_', " ").to_uppercase()
	}
}

/// Nodes and edges of a loaded call flow.
///
/// Every edge endpoint refers to a node in `nodes` when built through
/// [`Graph::from_load_result`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Graph {
	/// Nodes in input order.
	pub nodes: Vec<Node>,
	/// Edges in input order.
	pub edges: Vec<Edge>,
}

/// Counts of what ingestion threw away.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct IngestReport {
	/// Nodes with an unrecognized `node_type`.
	pub unknown_kind_nodes: usize,
	/// Nodes whose id was already taken by an earlier node.
	pub duplicate_nodes: usize,
	/// Edges with at least one endpoint missing from the node set.
	pub dangling_edges: usize,
}

impl IngestReport {
	/// Whether ingestion dropped nothing.
	pub fn is_clean(&self) -> bool {
		*self == Self::default()
	}

	/// Short line for the statistics panel, `None` when nothing was dropped.
	pub fn dropped_line(&self) -> Option<String> {
		if self.is_clean() {
			return None;
		}
		let nodes = self.unknown_kind_nodes + self.duplicate_nodes;
		Some(format!(
			"{} node{} / {} edge{} dropped",
			nodes,
			if nodes == 1 { "" } else { "s" },
			self.dangling_edges,
			if self.dangling_edges == 1 { "" } else { "s" },
		))
	}
}

impl Graph {
	/// Validate a raw load result into a graph.
	///
	/// Unknown node kinds, duplicate node ids (first one wins) and edges with
	/// a missing endpoint are dropped and logged; nothing here is fatal.
	pub fn from_load_result(raw: GraphLoadResult) -> (Self, IngestReport) {
		let mut report = IngestReport::default();
		let mut seen = HashSet::new();
		let mut nodes = Vec::with_capacity(raw.nodes.len());

		for raw_node in raw.nodes {
			let Some(kind) = NodeKind::parse(&raw_node.node_type) else {
				warn!(
					"call-flow: dropping node '{}' with unknown type '{}'",
					raw_node.node_id, raw_node.node_type
				);
				report.unknown_kind_nodes += 1;
				continue;
			};
			if !seen.insert(raw_node.node_id.clone()) {
				warn!("call-flow: dropping duplicate node '{}'", raw_node.node_id);
				report.duplicate_nodes += 1;
				continue;
			}
			nodes.push(Node {
				id: raw_node.node_id,
				kind,
				metadata: raw_node.metadata.unwrap_or_default(),
			});
		}

		let mut edges = Vec::with_capacity(raw.edges.len());
		for raw_edge in raw.edges {
			if !seen.contains(&raw_edge.source_id) || !seen.contains(&raw_edge.target_id) {
				warn!(
					"call-flow: dropping edge '{}' ({} -> {}): missing endpoint",
					raw_edge.edge_id, raw_edge.source_id, raw_edge.target_id
				);
				report.dangling_edges += 1;
				continue;
			}
			edges.push(Edge {
				id: raw_edge.edge_id,
				source: raw_edge.source_id,
				target: raw_edge.target_id,
				kind: raw_edge.edge_type,
			});
		}

		(Self { nodes, edges }, report)
	}

	/// Look up a node by id.
	pub fn node(&self, id: &str) -> Option<&Node> {
		self.nodes.iter().find(|n| n.id == id)
	}
}

/// A node with layout coordinates and presentation flags.
#[derive(Clone, Debug, PartialEq)]
pub struct PositionedNode {
	/// The underlying node.
	pub node: Node,
	/// Left edge of the node card in world units.
	pub x: f64,
	/// Top edge of the node card in world units.
	pub y: f64,
	/// Set on every node of a focused view so the surface can style it.
	pub focused: bool,
}

impl PositionedNode {
	/// Id of the underlying node.
	pub fn id(&self) -> &str {
		&self.node.id
	}

	/// Kind of the underlying node.
	pub fn kind(&self) -> NodeKind {
		self.node.kind
	}
}

/// The graph as currently shown: positioned nodes plus their edges.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PositionedGraph {
	/// Nodes in layout output order.
	pub nodes: Vec<PositionedNode>,
	/// Edges between displayed nodes.
	pub edges: Vec<Edge>,
}

impl PositionedGraph {
	/// Strip positions, recovering the underlying graph.
	pub fn to_graph(&self) -> Graph {
		Graph {
			nodes: self.nodes.iter().map(|p| p.node.clone()).collect(),
			edges: self.edges.clone(),
		}
	}

	/// Look up a displayed node by id.
	pub fn node(&self, id: &str) -> Option<&PositionedNode> {
		self.nodes.iter().find(|p| p.node.id == id)
	}

	/// Node ids in display order.
	pub fn node_ids(&self) -> Vec<&str> {
		self.nodes.iter().map(|p| p.id()).collect()
	}

	/// Edge ids in display order.
	pub fn edge_ids(&self) -> Vec<&str> {
		self.edges.iter().map(|e| e.id.as_str()).collect()
	}
}
