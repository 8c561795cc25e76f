//! Human-readable node summaries for cards and the details panel.

use serde_json::Value;

use super::model::{Node, NodeKind};

/// Metadata fields tried in order for a node's display name.
fn name_fields(kind: NodeKind) -> &'static [&'static str] {
	match kind {
		NodeKind::Did => &["phone_number"],
		NodeKind::AutoAttendant => &["attendant_name"],
		NodeKind::CallQueue => &["name", "callqueue"],
		NodeKind::HuntGroup => &["name", "hunt_group_id"],
		NodeKind::User => &["full_name", "user_id"],
		NodeKind::Voicemail => &["name", "voicemail_id"],
	}
}

/// Best display name for a node, falling back to its id.
pub fn display_name(node: &Node) -> String {
	name_fields(node.kind)
		.iter()
		.find_map(|field| match node.metadata.get(*field) {
			Some(Value::String(s)) if !s.is_empty() => Some(s.clone()),
			Some(Value::Number(n)) => Some(n.to_string()),
			_ => None,
		})
		.unwrap_or_else(|| node.id.clone())
}

/// `dial_rule_application` becomes `Dial Rule Application`.
pub fn format_key(key: &str) -> String {
	key.split('_')
		.filter(|word| !word.is_empty())
		.map(|word| {
			let mut chars = word.chars();
			match chars.next() {
				Some(first) => first.to_uppercase().chain(chars).collect(),
				None => String::new(),
			}
		})
		.collect::<Vec<_>>()
		.join(" ")
}

/// Render a metadata value for display.
pub fn format_value(value: &Value) -> String {
	match value {
		Value::Null => "N/A".to_owned(),
		Value::Bool(true) => "Yes".to_owned(),
		Value::Bool(false) => "No".to_owned(),
		Value::String(s) => s.clone(),
		Value::Number(n) => n.to_string(),
		Value::Array(_) | Value::Object(_) => {
			serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
		}
	}
}

/// Everything the details panel shows about one node.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NodeDetails {
	/// Node id.
	pub id: String,
	/// Node kind.
	pub kind: NodeKind,
	/// Display name, see [`display_name`].
	pub name: String,
	/// `(formatted key, formatted value)` in metadata order.
	pub properties: Vec<(String, String)>,
}

impl NodeDetails {
	/// Collect the details of `node`.
	pub fn from_node(node: &Node) -> Self {
		Self {
			id: node.id.clone(),
			kind: node.kind,
			name: display_name(node),
			properties: node
				.metadata
				.iter()
				.map(|(k, v)| (format_key(k), format_value(v)))
				.collect(),
		}
	}
}
