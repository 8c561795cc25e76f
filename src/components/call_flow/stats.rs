//! Summary statistics for a loaded call flow.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use super::details::format_key;
use super::model::{Graph, NodeKind};

/// Graph statistics as shown in the statistics panel.
///
/// The backend may send these; any field it omits defaults.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Statistics {
	/// Number of nodes.
	pub total_nodes: usize,
	/// Number of edges.
	pub total_edges: usize,
	/// Node count per wire `node_type`.
	pub node_type_counts: BTreeMap<String, usize>,
	/// Edge count per wire `edge_type`.
	pub edge_type_counts: BTreeMap<String, usize>,
	/// Weakly connected components.
	pub connected_components: usize,
	/// Nodes with no incident edge.
	pub isolated_nodes: usize,
	/// `edges / (n * (n - 1))`; zero below two nodes.
	pub density: f64,
}

impl Statistics {
	/// Compute statistics from an ingested graph.
	pub fn from_graph(graph: &Graph) -> Self {
		let n = graph.nodes.len();
		let index: HashMap<&str, usize> = graph
			.nodes
			.iter()
			.enumerate()
			.map(|(i, node)| (node.id.as_str(), i))
			.collect();

		let mut node_type_counts = BTreeMap::new();
		for node in &graph.nodes {
			*node_type_counts.entry(node.kind.as_str().to_owned()).or_insert(0) += 1;
		}

		let mut edge_type_counts = BTreeMap::new();
		let mut degree = vec![0usize; n];
		let mut components = DisjointSet::new(n);
		for edge in &graph.edges {
			*edge_type_counts.entry(edge.kind.clone()).or_insert(0) += 1;
			if let (Some(&s), Some(&t)) = (index.get(edge.source.as_str()), index.get(edge.target.as_str())) {
				degree[s] += 1;
				degree[t] += 1;
				components.union(s, t);
			}
		}

		let density = if n < 2 {
			0.0
		} else {
			graph.edges.len() as f64 / (n * (n - 1)) as f64
		};

		Self {
			total_nodes: n,
			total_edges: graph.edges.len(),
			node_type_counts,
			edge_type_counts,
			connected_components: components.count(),
			isolated_nodes: degree.iter().filter(|&&d| d == 0).count(),
			density,
		}
	}

	/// `(label, count)` per node type, labelled with the kind title when known.
	pub fn node_type_rows(&self) -> Vec<(String, usize)> {
		self.node_type_counts
			.iter()
			.map(|(key, &count)| {
				let label = NodeKind::parse(key).map_or_else(|| format_key(key), |k| k.title().to_owned());
				(label, count)
			})
			.collect()
	}

	/// `(label, count)` per edge type.
	pub fn edge_type_rows(&self) -> Vec<(String, usize)> {
		self.edge_type_counts
			.iter()
			.map(|(key, &count)| (format_key(key), count))
			.collect()
	}
}

/// Union-find over `0..n` with path halving.
struct DisjointSet {
	parent: Vec<usize>,
	sets: usize,
}

impl DisjointSet {
	fn new(n: usize) -> Self {
		Self {
			parent: (0..n).collect(),
			sets: n,
		}
	}

	fn find(&mut self, mut x: usize) -> usize {
		while self.parent[x] != x {
			self.parent[x] = self.parent[self.parent[x]];
			x = self.parent[x];
		}
		x
	}

	fn union(&mut self, a: usize, b: usize) {
		let (ra, rb) = (self.find(a), self.find(b));
		if ra != rb {
			self.parent[ra] = rb;
			self.sets -= 1;
		}
	}

	fn count(&self) -> usize {
		self.sets
	}
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;

	use super::*;
	use crate::components::call_flow::model::{Edge, Node, NodeKind};

	#[test]
	fn empty_graph_has_zero_everything() {
		assert_eq!(Statistics::from_graph(&Graph::default()), Statistics::default());
	}

	#[test]
	fn counts_components_isolation_and_density() {
		let graph = Graph {
			nodes: vec![
				Node::new("d1", NodeKind::Did),
				Node::new("a1", NodeKind::AutoAttendant),
				Node::new("u1", NodeKind::User),
				Node::new("u2", NodeKind::User),
				Node::new("v9", NodeKind::Voicemail),
			],
			edges: vec![
				Edge::new("e1", "d1", "a1", "to_auto_attendant"),
				Edge::new("e2", "a1", "u1", "to_user"),
				Edge::new("e3", "u2", "u2", "forward"),
			],
		};
		let stats = Statistics::from_graph(&graph);

		assert_eq!(stats.total_nodes, 5);
		assert_eq!(stats.total_edges, 3);
		assert_eq!(stats.node_type_counts["user"], 2);
		assert_eq!(stats.node_type_counts.get("call_queue"), None);
		assert_eq!(stats.edge_type_counts["to_user"], 1);
		// {d1, a1, u1}, {u2}, {v9}
		assert_eq!(stats.connected_components, 3);
		assert_eq!(stats.isolated_nodes, 1);
		assert_eq!(stats.density, 3.0 / 20.0);
	}

	#[test]
	fn type_rows_carry_readable_labels() {
		let stats: Statistics = serde_json::from_str(
			r#"{
				"node_type_counts": { "auto_attendant": 1, "did": 2, "pager": 4 },
				"edge_type_counts": { "to_queue": 3 }
			}"#,
		)
		.unwrap();

		assert_eq!(
			stats.node_type_rows(),
			vec![
				("Auto Attendant".to_owned(), 1),
				("DID".to_owned(), 2),
				("Pager".to_owned(), 4),
			]
		);
		assert_eq!(stats.edge_type_rows(), vec![("To Queue".to_owned(), 3)]);
	}

	#[test]
	fn backend_statistics_parse_leniently() {
		let stats: Statistics =
			serde_json::from_str(r#"{ "total_nodes": 7, "node_type_counts": { "did": 2 } }"#).unwrap();
		assert_eq!(stats.total_nodes, 7);
		assert_eq!(stats.node_type_counts["did"], 2);
		assert_eq!(stats.density, 0.0);
	}
}
