//! End-to-end focus and highlight behaviour through the public session API.

// Integration tests only touch part of the dependency graph.
#![allow(unused_crate_dependencies)]

use call_flow_graph::components::call_flow::{
	CallFlowView, EdgeEmphasis, FocusTransition, GraphLoadResult, LayoutConfig,
};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

const SCENARIO: &str = r#"{
	"graph_id": "acme_graph",
	"statistics": null,
	"nodes": [
		{ "node_id": "D1", "node_type": "did", "metadata": { "phone_number": "+15550100" } },
		{ "node_id": "A1", "node_type": "auto_attendant", "metadata": { "attendant_name": "Main menu" } },
		{ "node_id": "Q1", "node_type": "call_queue", "metadata": { "name": "Sales" } },
		{ "node_id": "U1", "node_type": "user", "metadata": { "full_name": "Ada Lovelace" } },
		{ "node_id": "V1", "node_type": "voicemail", "metadata": {} },
		{ "node_id": "X1", "node_type": "pager", "metadata": {} }
	],
	"edges": [
		{ "edge_id": "e1", "source_id": "D1", "target_id": "A1", "edge_type": "to_auto_attendant" },
		{ "edge_id": "e2", "source_id": "A1", "target_id": "Q1", "edge_type": "to_queue" },
		{ "edge_id": "e3", "source_id": "A1", "target_id": "U1", "edge_type": "to_user" },
		{ "edge_id": "e4", "source_id": "U1", "target_id": "V1", "edge_type": "to_voicemail" },
		{ "edge_id": "e5", "source_id": "U1", "target_id": "X1", "edge_type": "to_pager" }
	]
}"#;

fn loaded() -> CallFlowView {
	let mut view = CallFlowView::new(LayoutConfig::default());
	view.on_graph_loaded(GraphLoadResult::from_json(SCENARIO).unwrap());
	view
}

fn node_ids(view: &CallFlowView) -> Vec<String> {
	let mut ids: Vec<String> = view
		.display_graph()
		.nodes
		.iter()
		.map(|p| p.id().to_owned())
		.collect();
	ids.sort();
	ids
}

fn edge_ids(view: &CallFlowView) -> Vec<String> {
	let mut ids: Vec<String> = view
		.display_graph()
		.edges
		.iter()
		.map(|e| e.edge.id.clone())
		.collect();
	ids.sort();
	ids
}

#[test]
fn pager_node_and_its_edge_are_dropped_on_load() {
	let view = loaded();
	assert_eq!(node_ids(&view), vec!["A1", "D1", "Q1", "U1", "V1"]);
	assert_eq!(edge_ids(&view), vec!["e1", "e2", "e3", "e4"]);
	let summary = view.summary();
	assert_eq!(summary.ingest.unknown_kind_nodes, 1);
	assert_eq!(summary.ingest.dangling_edges, 1);
	assert_eq!(
		summary.ingest.dropped_line().as_deref(),
		Some("1 node / 1 edge dropped")
	);
	assert_eq!(
		summary.statistics.node_type_rows(),
		vec![
			("Auto Attendant".to_owned(), 1),
			("Call Queue".to_owned(), 1),
			("DID".to_owned(), 1),
			("User".to_owned(), 1),
			("Voicemail".to_owned(), 1),
		]
	);
	assert_eq!(
		summary.statistics.edge_type_rows(),
		vec![
			("To Auto Attendant".to_owned(), 1),
			("To Queue".to_owned(), 1),
			("To User".to_owned(), 1),
			("To Voicemail".to_owned(), 1),
		]
	);
}

#[test]
fn switching_focus_is_never_cumulative() {
	let mut view = loaded();

	assert_eq!(view.on_node_selected("A1"), FocusTransition::Entered);
	assert_eq!(node_ids(&view), vec!["A1", "Q1", "U1", "V1"]);
	assert_eq!(edge_ids(&view), vec!["e2", "e3", "e4"]);
	assert!(view.display_graph().nodes.iter().all(|p| p.focused));

	assert_eq!(view.on_node_selected("D1"), FocusTransition::Switched);
	assert_eq!(node_ids(&view), vec!["A1", "D1", "Q1", "U1", "V1"]);
	assert_eq!(edge_ids(&view), vec!["e1", "e2", "e3", "e4"]);
	assert_eq!(view.summary().focused.unwrap().name, "+15550100");
}

#[test]
fn exit_restores_the_exact_pre_focus_display() {
	let mut view = loaded();
	let before = view.display_graph();

	view.on_node_selected("U1");
	view.on_node_selected("Q1");
	assert_eq!(view.on_focus_exit_requested(), FocusTransition::Exited);

	assert_eq!(view.display_graph(), before);
	assert!(view.summary().focused.is_none());
}

#[test]
fn highlight_follows_the_displayed_graph_and_clears() {
	let mut view = loaded();
	view.on_node_selected("A1");
	view.on_node_hover_enter("U1");

	let display = view.display_graph();
	let emphasized: Vec<&str> = display
		.edges
		.iter()
		.filter(|e| e.emphasis == EdgeEmphasis::Emphasized)
		.map(|e| e.edge.id.as_str())
		.collect();
	let dimmed = display
		.edges
		.iter()
		.filter(|e| e.emphasis == EdgeEmphasis::Dimmed)
		.count();
	assert_eq!(emphasized, vec!["e3", "e4"]);
	assert_eq!(dimmed, 1);

	view.on_node_hover_leave();
	assert!(
		view.display_graph()
			.edges
			.iter()
			.all(|e| e.emphasis == EdgeEmphasis::Neutral)
	);
}

proptest! {
	#[test]
	fn any_focus_sequence_exits_to_the_baseline(clicks in prop::collection::vec(0usize..6, 1..12)) {
		const IDS: [&str; 6] = ["D1", "A1", "Q1", "U1", "V1", "missing"];
		let mut view = loaded();
		let before_nodes = node_ids(&view);
		let before_edges = edge_ids(&view);

		for i in clicks {
			view.on_node_selected(IDS[i]);
		}
		view.on_focus_exit_requested();

		prop_assert!(!view.focus_state().is_active());
		prop_assert_eq!(node_ids(&view), before_nodes);
		prop_assert_eq!(edge_ids(&view), before_edges);
	}
}
