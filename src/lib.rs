//! call-flow-graph: Interactive visualization of telephony call flows.
//!
//! This crate lays out call-flow graphs (DIDs, auto attendants, queues, hunt
//! groups, users, voicemail) in kind columns and lets operators focus on the
//! downstream routing of any node, with hover highlighting of its edges. The
//! layout and traversal engine is plain Rust; the WASM canvas component on top
//! of it is built with Leptos.

use leptos::prelude::*;
use leptos_meta::*;
use log::{Level, info, warn};
use wasm_bindgen::JsCast;
use web_sys::{HtmlScriptElement, Window};

pub mod components;

pub use components::call_flow::{
	CallFlowCanvas, CallFlowView, GraphLoadResult, LayoutConfig, LoadError, ViewSummary,
};

/// Id of the script element holding the graph document.
const GRAPH_DATA_ELEMENT: &str = "graph-data";

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("call-flow: logging initialized");
}

/// Load the graph document from a script element with id="graph-data".
/// Expected format: a graph load result, `{ nodes, edges, statistics, graph_id }`.
pub fn load_graph_data() -> Result<GraphLoadResult, LoadError> {
	let missing = || LoadError::MissingElement {
		id: GRAPH_DATA_ELEMENT.to_owned(),
	};
	let window: Window = web_sys::window().ok_or_else(missing)?;
	let document = window.document().ok_or_else(missing)?;
	let element = document
		.get_element_by_id(GRAPH_DATA_ELEMENT)
		.ok_or_else(missing)?;
	let unreadable = || LoadError::Unreadable {
		id: GRAPH_DATA_ELEMENT.to_owned(),
	};
	let script: HtmlScriptElement = element.dyn_into().map_err(|_| unreadable())?;
	let json_text = script.text().map_err(|_| unreadable())?;

	let data = GraphLoadResult::from_json(&json_text)?;
	info!(
		"call-flow: read {} nodes, {} edges from #{}",
		data.nodes.len(),
		data.edges.len(),
		GRAPH_DATA_ELEMENT
	);
	Ok(data)
}

/// Side panel with graph statistics and details of the focused node.
#[component]
fn SummaryPanel(#[prop(into)] summary: Signal<ViewSummary>) -> impl IntoView {
	let graph_id = move || summary.get().graph_id.unwrap_or_else(|| "unnamed graph".into());
	let totals = move || {
		let stats = summary.get().statistics;
		format!(
			"{} nodes · {} edges · {} components · {} isolated · density {:.1}%",
			stats.total_nodes,
			stats.total_edges,
			stats.connected_components,
			stats.isolated_nodes,
			stats.density * 100.0
		)
	};
	let type_list = |rows: Vec<(String, usize)>| {
		rows.into_iter()
			.map(|(label, count)| {
				view! {
					<li>
						<span class="type-label">{label}</span>
						<span class="type-count">{count}</span>
					</li>
				}
			})
			.collect_view()
	};
	let node_types = move || type_list(summary.get().statistics.node_type_rows());
	let edge_types = move || type_list(summary.get().statistics.edge_type_rows());
	let dropped = move || {
		summary
			.get()
			.ingest
			.dropped_line()
			.map(|line| view! { <p class="ingest-warning">{line}</p> })
	};
	let focused = move || {
		summary.get().focused.map(|details| {
			let properties = details
				.properties
				.into_iter()
				.map(|(key, value)| {
					view! {
						<dt>{key}</dt>
						<dd>{value}</dd>
					}
				})
				.collect_view();
			view! {
				<section class="node-details">
					<h2>{details.kind.title()} " · " {details.name}</h2>
					<p class="node-id">{details.id}</p>
					<dl>{properties}</dl>
					<p class="hint">"Click the node again or press Escape to leave focus."</p>
				</section>
			}
		})
	};

	view! {
		<div class="graph-overlay">
			<h1>"Call Flow"</h1>
			<p class="subtitle">{graph_id}</p>
			<p class="statistics">{totals}</p>
			{dropped}
			<h3>"Node types"</h3>
			<ul class="type-counts">{node_types}</ul>
			<h3>"Edge types"</h3>
			<ul class="type-counts">{edge_types}</ul>
			{focused}
		</div>
	}
}

/// Main application component.
/// Loads the graph document from the DOM and renders the call-flow canvas.
#[component]
pub fn App() -> impl IntoView {
	provide_meta_context();

	let graph_data = load_graph_data().unwrap_or_else(|e| {
		warn!("call-flow: no graph loaded: {}", e);
		GraphLoadResult::default()
	});
	let graph_signal = Signal::derive(move || graph_data.clone());
	let (summary, set_summary) = signal(ViewSummary::default());

	view! {
		<Html attr:lang="en" attr:dir="ltr" />
		<Title text="Call Flow Visualizer" />
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<div class="fullscreen-graph">
			<CallFlowCanvas
				data=graph_signal
				on_change=Callback::new(move |s: ViewSummary| set_summary.set(s))
				fullscreen=true
			/>
			<SummaryPanel summary=summary />
		</div>
	}
}
