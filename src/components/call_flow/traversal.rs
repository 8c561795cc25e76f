//! Directed reachability over call-flow edges.

use std::collections::{HashMap, HashSet};

use super::model::{Edge, Graph};

/// Ids of every node reachable from `root` following edges source to target.
///
/// The root is always part of the result, even when no edge mentions it.
/// Uses an explicit stack; each node is expanded at most once, so cycles
/// (including ones through the root) terminate.
pub fn downstream(root: &str, edges: &[Edge]) -> HashSet<String> {
	let mut successors: HashMap<&str, Vec<&str>> = HashMap::new();
	for edge in edges {
		successors
			.entry(edge.source.as_str())
			.or_default()
			.push(edge.target.as_str());
	}

	let mut visited: HashSet<&str> = HashSet::new();
	let mut stack = vec![root];
	while let Some(id) = stack.pop() {
		if !visited.insert(id) {
			continue;
		}
		if let Some(next) = successors.get(id) {
			stack.extend(next.iter().filter(|t| !visited.contains(*t)));
		}
	}

	visited.into_iter().map(str::to_owned).collect()
}

/// Restrict `graph` to `ids`: nodes in the set, and edges with both endpoints
/// in the set. Input order is preserved.
pub fn induced_subgraph(ids: &HashSet<String>, graph: &Graph) -> Graph {
	Graph {
		nodes: graph
			.nodes
			.iter()
			.filter(|n| ids.contains(&n.id))
			.cloned()
			.collect(),
		edges: graph
			.edges
			.iter()
			.filter(|e| ids.contains(&e.source) && ids.contains(&e.target))
			.cloned()
			.collect(),
	}
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;
	use proptest::prelude::*;

	use super::*;
	use crate::components::call_flow::model::{Node, NodeKind};

	fn set(ids: &[&str]) -> HashSet<String> {
		ids.iter().map(|s| s.to_string()).collect()
	}

	fn chain() -> Vec<Edge> {
		vec![
			Edge::new("e1", "D1", "A1", "to_auto_attendant"),
			Edge::new("e2", "A1", "Q1", "to_queue"),
			Edge::new("e3", "A1", "U1", "to_user"),
			Edge::new("e4", "U1", "V1", "to_voicemail"),
		]
	}

	#[test]
	fn follows_edges_forward_only() {
		assert_eq!(downstream("A1", &chain()), set(&["A1", "Q1", "U1", "V1"]));
		assert_eq!(downstream("U1", &chain()), set(&["U1", "V1"]));
		assert_eq!(downstream("V1", &chain()), set(&["V1"]));
	}

	#[test]
	fn unknown_root_is_a_singleton() {
		assert_eq!(downstream("nope", &chain()), set(&["nope"]));
		assert_eq!(downstream("alone", &[]), set(&["alone"]));
	}

	#[test]
	fn cycles_terminate() {
		let edges = vec![
			Edge::new("e1", "a", "b", "x"),
			Edge::new("e2", "b", "c", "x"),
			Edge::new("e3", "c", "a", "x"),
			Edge::new("e4", "c", "c", "x"),
			Edge::new("e5", "b", "d", "x"),
		];
		assert_eq!(downstream("a", &edges), set(&["a", "b", "c", "d"]));
		assert_eq!(downstream("d", &edges), set(&["d"]));
	}

	#[test]
	fn long_chain_does_not_exhaust_the_stack() {
		let edges: Vec<Edge> = (0..100_000)
			.map(|i| Edge::new(format!("e{i}"), format!("n{i}"), format!("n{}", i + 1), "next"))
			.collect();
		assert_eq!(downstream("n0", &edges).len(), 100_001);
	}

	#[test]
	fn induced_subgraph_drops_edges_leaving_the_set() {
		let graph = Graph {
			nodes: vec![
				Node::new("D1", NodeKind::Did),
				Node::new("A1", NodeKind::AutoAttendant),
				Node::new("Q1", NodeKind::CallQueue),
				Node::new("U1", NodeKind::User),
				Node::new("V1", NodeKind::Voicemail),
			],
			edges: chain(),
		};
		let sub = induced_subgraph(&set(&["A1", "Q1", "U1", "V1"]), &graph);

		let node_ids: Vec<&str> = sub.nodes.iter().map(|n| n.id.as_str()).collect();
		let edge_ids: Vec<&str> = sub.edges.iter().map(|e| e.id.as_str()).collect();
		assert_eq!(node_ids, vec!["A1", "Q1", "U1", "V1"]);
		assert_eq!(edge_ids, vec!["e2", "e3", "e4"]);
	}

	#[test]
	fn induced_subgraph_of_missing_ids_is_empty() {
		let graph = Graph {
			nodes: vec![Node::new("D1", NodeKind::Did)],
			edges: vec![],
		};
		assert_eq!(induced_subgraph(&set(&["ghost"]), &graph), Graph::default());
	}

	/// Least fixed point computed the slow way: keep adding targets until nothing changes.
	fn naive_closure(root: &str, edges: &[Edge]) -> HashSet<String> {
		let mut reached = set(&[root]);
		loop {
			let before = reached.len();
			for e in edges {
				if reached.contains(&e.source) {
					reached.insert(e.target.clone());
				}
			}
			if reached.len() == before {
				return reached;
			}
		}
	}

	fn arb_edges() -> impl Strategy<Value = Vec<Edge>> {
		prop::collection::vec((0u8..12, 0u8..12), 0..40).prop_map(|pairs| {
			pairs
				.into_iter()
				.enumerate()
				.map(|(i, (s, t))| Edge::new(format!("e{i}"), format!("n{s}"), format!("n{t}"), "x"))
				.collect()
		})
	}

	proptest! {
		#[test]
		fn downstream_is_the_reachability_closure(edges in arb_edges(), root in 0u8..14) {
			let root = format!("n{root}");
			prop_assert_eq!(downstream(&root, &edges), naive_closure(&root, &edges));
		}

		#[test]
		fn induced_edges_have_both_endpoints_inside(edges in arb_edges(), keep in prop::collection::hash_set(0u8..12, 0..12)) {
			let ids: HashSet<String> = keep.into_iter().map(|i| format!("n{i}")).collect();
			let graph = Graph {
				nodes: (0..12).map(|i| Node::new(format!("n{i}"), NodeKind::User)).collect(),
				edges: edges.clone(),
			};
			let sub = induced_subgraph(&ids, &graph);
			for e in &sub.edges {
				prop_assert!(ids.contains(&e.source) && ids.contains(&e.target));
			}
			let expected = edges
				.iter()
				.filter(|e| ids.contains(&e.source) && ids.contains(&e.target))
				.count();
			prop_assert_eq!(sub.edges.len(), expected);
		}
	}
}
