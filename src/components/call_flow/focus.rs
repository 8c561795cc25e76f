//! Focus mode: show only what a node routes calls to.
//!
//! [`FocusState`] is a two-state machine with a pure [`FocusState::step`]
//! transition. While active it owns the baseline, the graph that was displayed
//! before focus was entered, and every focused view is derived from that
//! baseline, never from the currently filtered view. Switching focus therefore
//! never narrows cumulatively, and exiting restores the baseline verbatim.

use log::debug;

use super::layout::{LayoutConfig, layout};
use super::model::PositionedGraph;
use super::traversal::{downstream, induced_subgraph};

/// Input to the focus state machine.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FocusEvent<'a> {
	/// The user selected a node.
	Select(&'a str),
	/// Explicit request to leave focus mode.
	Exit,
}

/// What a transition did, for logging and for the surface to react to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FocusTransition {
	/// Focus mode started on a node.
	Entered,
	/// Focus moved to a different node.
	Switched,
	/// Focus mode ended and the baseline is shown again.
	Exited,
	/// Nothing changed, e.g. an unknown node or an exit while inactive.
	Unchanged,
}

/// Current focus mode.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum FocusState {
	/// The full graph is displayed.
	#[default]
	Inactive,
	/// Only the nodes downstream of `node_id` are displayed.
	Active {
		/// The focused node.
		node_id: String,
		/// Displayed graph at the moment focus was entered.
		baseline: PositionedGraph,
	},
}

impl FocusState {
	/// Whether focus mode is on.
	pub fn is_active(&self) -> bool {
		matches!(self, FocusState::Active { .. })
	}

	/// Id of the focused node, if any.
	pub fn focused_node_id(&self) -> Option<&str> {
		match self {
			FocusState::Active { node_id, .. } => Some(node_id),
			FocusState::Inactive => None,
		}
	}

	/// Graph that exiting focus restores.
	pub fn baseline(&self) -> Option<&PositionedGraph> {
		match self {
			FocusState::Active { baseline, .. } => Some(baseline),
			FocusState::Inactive => None,
		}
	}

	/// Apply `event` given the currently `displayed` graph.
	///
	/// Returns the next state, the graph to display next, and what happened.
	pub fn step(
		self,
		event: FocusEvent<'_>,
		displayed: PositionedGraph,
		config: &LayoutConfig,
	) -> (Self, PositionedGraph, FocusTransition) {
		match (self, event) {
			(FocusState::Inactive, FocusEvent::Select(id)) => {
				let view = focused_view(id, &displayed, config);
				let next = FocusState::Active {
					node_id: id.to_owned(),
					baseline: displayed,
				};
				(next, view, FocusTransition::Entered)
			}
			(FocusState::Inactive, FocusEvent::Exit) => {
				(FocusState::Inactive, displayed, FocusTransition::Unchanged)
			}
			(FocusState::Active { node_id, baseline }, FocusEvent::Select(id)) if node_id == id => {
				(FocusState::Inactive, baseline, FocusTransition::Exited)
			}
			(FocusState::Active { baseline, .. }, FocusEvent::Select(id)) => {
				let view = focused_view(id, &baseline, config);
				let next = FocusState::Active {
					node_id: id.to_owned(),
					baseline,
				};
				(next, view, FocusTransition::Switched)
			}
			(FocusState::Active { baseline, .. }, FocusEvent::Exit) => {
				(FocusState::Inactive, baseline, FocusTransition::Exited)
			}
		}
	}
}

/// Downstream subgraph of `node_id` within `source`, laid out compactly with
/// every node flagged as focused.
pub fn focused_view(node_id: &str, source: &PositionedGraph, config: &LayoutConfig) -> PositionedGraph {
	let graph = source.to_graph();
	if graph.node(node_id).is_none() {
		debug!("call-flow: focus requested on unknown node '{}'", node_id);
	}
	let reachable = downstream(node_id, &graph.edges);
	let sub = induced_subgraph(&reachable, &graph);

	let mut nodes = layout(&sub.nodes, config);
	for p in &mut nodes {
		p.focused = true;
	}
	PositionedGraph {
		nodes,
		edges: sub.edges,
	}
}

/// Owns the [`FocusState`] and applies events to a displayed graph in place.
#[derive(Clone, Debug, Default)]
pub struct FocusController {
	state: FocusState,
}

impl FocusController {
	/// Controller with focus inactive.
	pub fn new() -> Self {
		Self::default()
	}

	/// Current focus mode.
	pub fn state(&self) -> &FocusState {
		&self.state
	}

	/// Run one transition, replacing `displayed` with the graph to show next.
	pub fn apply(
		&mut self,
		event: FocusEvent<'_>,
		displayed: &mut PositionedGraph,
		config: &LayoutConfig,
	) -> FocusTransition {
		let state = std::mem::take(&mut self.state);
		let current = std::mem::take(displayed);
		let (next, view, transition) = state.step(event, current, config);
		self.state = next;
		*displayed = view;
		if transition != FocusTransition::Unchanged {
			debug!(
				"call-flow: focus {:?} ({} nodes, {} edges displayed)",
				transition,
				displayed.nodes.len(),
				displayed.edges.len()
			);
		}
		transition
	}

	/// Drop any focus and baseline without touching the display.
	///
	/// Used when a new graph is loaded; the old baseline must not leak into it.
	pub fn reset(&mut self) {
		self.state = FocusState::Inactive;
	}
}
