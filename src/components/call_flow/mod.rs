//! Call-flow graph visualization.
//!
//! Turns a backend call-flow document (DIDs, auto attendants, call queues,
//! hunt groups, users, voicemail boxes) into a column layout and lets the
//! operator explore it:
//! - Deterministic column layout grouped by node kind
//! - Focus mode: click a node to show only what it routes calls to
//! - Hover highlighting of the edges touching a node
//! - Statistics and node details for side panels
//!
//! The engine ([`Graph`], [`layout()`], [`downstream`], [`FocusState`],
//! [`HighlightController`], [`CallFlowView`]) is plain Rust with no browser
//! dependency; [`CallFlowCanvas`] is the Leptos surface that draws it.
//!
//! # Example
//!
//! ```ignore
//! use call_flow_graph::{CallFlowCanvas, GraphLoadResult};
//!
//! let data = GraphLoadResult::from_json(json_text)?;
//! view! { <CallFlowCanvas data=Signal::derive(move || data.clone()) fullscreen=true /> }
//! ```

mod component;
mod details;
mod error;
mod focus;
mod highlight;
mod layout;
mod model;
mod render;
mod state;
mod stats;
mod theme;
mod traversal;
mod types;
mod view;

pub use component::CallFlowCanvas;
pub use details::NodeDetails;
pub use error::LoadError;
pub use focus::{FocusController, FocusEvent, FocusState, FocusTransition};
pub use highlight::{AnnotatedEdge, EdgeEmphasis, HighlightController, edges_incident};
pub use layout::{Jitter, LayoutConfig, layout};
pub use model::{Edge, Graph, IngestReport, Node, NodeKind, PositionedGraph, PositionedNode};
pub use stats::Statistics;
pub use traversal::{downstream, induced_subgraph};
pub use types::{GraphLoadResult, RawEdge, RawNode};
pub use view::{CallFlowView, DisplayGraph, ViewSummary};
