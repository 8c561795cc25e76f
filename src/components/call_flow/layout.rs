//! Deterministic column layout.
//!
//! Nodes are grouped into one column per [`NodeKind`], left to right in call
//! order, and stacked top to bottom in input order. Hunt groups share the call
//! queue column and start below its last row. A small per-node jitter keeps
//! long columns from looking mechanical; it is derived from the node id so the
//! same input always lands in the same place.

use serde::Deserialize;
use serde_json::Value;

use super::model::{Node, NodeKind, PositionedNode};

/// Maximum offset applied to each coordinate, in world units.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
pub struct Jitter {
	/// Horizontal bound.
	pub x: f64,
	/// Vertical bound.
	pub y: f64,
}

/// Layout tuning. Every field has a default, so partial JSON configs work.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
	/// Column x of DIDs.
	pub did_x: f64,
	/// Column x of auto attendants.
	pub auto_attendant_x: f64,
	/// Shared by call queues and hunt groups.
	pub call_queue_x: f64,
	/// Column x of users.
	pub user_x: f64,
	/// Column x of voicemail boxes.
	pub voicemail_x: f64,
	/// Vertical distance between consecutive rows of a column.
	pub row_spacing: f64,
	/// Y of the first row.
	pub top_margin: f64,
	/// Extra gap between the last call queue row and the first hunt group row.
	pub hunt_group_margin: f64,
	/// Per-node offset bound; `None` gives an exact grid.
	pub jitter: Option<Jitter>,
	/// Metadata key used to order nodes within a column. Nodes lacking the key
	/// keep their input order after the ones that have it.
	pub sort_key: Option<String>,
}

impl Default for LayoutConfig {
	fn default() -> Self {
		Self {
			did_x: 50.0,
			auto_attendant_x: 380.0,
			call_queue_x: 730.0,
			user_x: 1060.0,
			voicemail_x: 1360.0,
			row_spacing: 180.0,
			top_margin: 100.0,
			hunt_group_margin: 50.0,
			jitter: Some(Jitter { x: 15.0, y: 10.0 }),
			sort_key: None,
		}
	}
}

impl LayoutConfig {
	/// Default layout without jitter: exact column and row coordinates.
	pub fn grid() -> Self {
		Self {
			jitter: None,
			..Self::default()
		}
	}

	/// Column x for a kind, before jitter.
	pub fn column_x(&self, kind: NodeKind) -> f64 {
		match kind {
			NodeKind::Did => self.did_x,
			NodeKind::AutoAttendant => self.auto_attendant_x,
			NodeKind::CallQueue | NodeKind::HuntGroup => self.call_queue_x,
			NodeKind::User => self.user_x,
			NodeKind::Voicemail => self.voicemail_x,
		}
	}
}

/// Position `nodes` in kind columns.
///
/// Output is ordered column by column. A pure function of `nodes` and `config`.
pub fn layout(nodes: &[Node], config: &LayoutConfig) -> Vec<PositionedNode> {
	let call_queue_rows = nodes
		.iter()
		.filter(|n| n.kind == NodeKind::CallQueue)
		.count();
	let mut positioned = Vec::with_capacity(nodes.len());

	for kind in NodeKind::ALL {
		let mut column: Vec<&Node> = nodes.iter().filter(|n| n.kind == kind).collect();
		if let Some(key) = &config.sort_key {
			column.sort_by_key(|n| sort_value(n, key));
		}

		let column_top = if kind == NodeKind::HuntGroup {
			config.top_margin
				+ call_queue_rows as f64 * config.row_spacing
				+ config.hunt_group_margin
		} else {
			config.top_margin
		};
		let x = config.column_x(kind);

		for (row, node) in column.into_iter().enumerate() {
			let y = column_top + row as f64 * config.row_spacing;
			let (dx, dy) = match config.jitter {
				Some(j) => (
					(pseudo_random(&node.id, 1) * 2.0 - 1.0) * j.x,
					(pseudo_random(&node.id, 2) * 2.0 - 1.0) * j.y,
				),
				None => (0.0, 0.0),
			};
			positioned.push(PositionedNode {
				node: node.clone(),
				x: x + dx,
				y: y + dy,
				focused: false,
			});
		}
	}

	positioned
}

/// Sort key: present values first (by their string form), then missing ones.
fn sort_value(node: &Node, key: &str) -> (bool, String) {
	match node.metadata.get(key) {
		Some(Value::String(s)) => (false, s.clone()),
		Some(Value::Null) | None => (true, String::new()),
		Some(other) => (false, other.to_string()),
	}
}

/// Deterministic value in `[0, 1)` for a node id and salt.
///
/// FNV-1a over the id, finished with a splitmix64 round so neighbouring ids
/// spread out.
fn pseudo_random(id: &str, salt: u64) -> f64 {
	let mut h: u64 = 0xcbf2_9ce4_8422_2325;
	for byte in id.bytes() {
		h ^= byte as u64;
		h = h.wrapping_mul(0x0100_0000_01b3);
	}
	let mut z = h.wrapping_add(salt.wrapping_mul(0x9e37_79b9_7f4a_7c15));
	z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
	z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
	z ^= z >> 31;
	(z >> 11) as f64 / (1u64 << 53) as f64
}
