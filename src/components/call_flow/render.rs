//! Canvas rendering for the call-flow view.
//!
//! Draws in world space after applying the pan/zoom transform. Passes:
//! 1. Background (screen space)
//! 2. Neutral and dimmed edges, then emphasized edges on top
//! 3. Node cards, with focus and hover outlines

use std::collections::HashMap;

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use super::details::display_name;
use super::highlight::EdgeEmphasis;
use super::model::{Edge, PositionedNode};
use super::state::CanvasState;
use super::theme::Theme;

/// Longest display name drawn on a card before it is elided.
const MAX_NAME_CHARS: usize = 26;

/// Renders the complete view to the canvas.
pub fn render(state: &CanvasState, ctx: &CanvasRenderingContext2d, theme: &Theme) {
	ctx.set_fill_style_str(&theme.background.to_css());
	ctx.fill_rect(0.0, 0.0, state.width, state.height);

	ctx.save();
	let _ = ctx.translate(state.transform.x, state.transform.y);
	let _ = ctx.scale(state.transform.k, state.transform.k);

	draw_edges(state, ctx, theme);
	draw_nodes(state, ctx, theme);

	ctx.restore();
}

fn draw_edges(state: &CanvasState, ctx: &CanvasRenderingContext2d, theme: &Theme) {
	let displayed = state.view.displayed();
	let positions: HashMap<&str, &PositionedNode> =
		displayed.nodes.iter().map(|p| (p.id(), p)).collect();

	for pass in [false, true] {
		for edge in &displayed.edges {
			let emphasis = state.view.edge_emphasis(&edge.id);
			if (emphasis == EdgeEmphasis::Emphasized) != pass {
				continue;
			}
			let (Some(source), Some(target)) = (
				positions.get(edge.source.as_str()),
				positions.get(edge.target.as_str()),
			) else {
				continue;
			};
			draw_edge(ctx, theme, edge, source, target, emphasis);
		}
	}

	let _ = ctx.set_line_dash(&js_sys::Array::new());
}

fn draw_edge(
	ctx: &CanvasRenderingContext2d,
	theme: &Theme,
	edge: &Edge,
	source: &PositionedNode,
	target: &PositionedNode,
	emphasis: EdgeEmphasis,
) {
	let style = &theme.edge;
	let (x1, y1) = (source.x + theme.node.width, source.y + theme.node.height / 2.0);
	let (x2, y2) = (target.x, target.y + theme.node.height / 2.0);
	let (dx, dy) = (x2 - x1, y2 - y1);
	let dist = (dx * dx + dy * dy).sqrt();
	if dist < 0.001 {
		return;
	}
	let (ux, uy) = (dx / dist, dy / dist);

	let (color, width) = match emphasis {
		EdgeEmphasis::Neutral => (style.color, style.width),
		EdgeEmphasis::Emphasized => (style.emphasized, style.emphasized_width),
		EdgeEmphasis::Dimmed => (style.dimmed, style.dimmed_width),
	};

	ctx.set_stroke_style_str(&color.to_css());
	ctx.set_line_width(width);
	if style.dashed_kinds.contains(&edge.kind.as_str()) {
		let _ = ctx.set_line_dash(&js_sys::Array::of2(
			&JsValue::from_f64(style.dash_pattern.0),
			&JsValue::from_f64(style.dash_pattern.1),
		));
	} else {
		let _ = ctx.set_line_dash(&js_sys::Array::new());
	}

	ctx.begin_path();
	ctx.move_to(x1, y1);
	ctx.line_to(x2 - ux * style.arrow_size, y2 - uy * style.arrow_size);
	ctx.stroke();

	let _ = ctx.set_line_dash(&js_sys::Array::new());
	ctx.set_fill_style_str(&color.to_css());
	let (back_x, back_y) = (x2 - ux * style.arrow_size, y2 - uy * style.arrow_size);
	let (px, py) = (-uy * style.arrow_size * 0.5, ux * style.arrow_size * 0.5);
	ctx.begin_path();
	ctx.move_to(x2, y2);
	ctx.line_to(back_x + px, back_y + py);
	ctx.line_to(back_x - px, back_y - py);
	ctx.close_path();
	ctx.fill();

	if emphasis != EdgeEmphasis::Dimmed {
		let label = edge.label();
		let (mid_x, mid_y) = ((x1 + x2) / 2.0, (y1 + y2) / 2.0);
		ctx.set_font(style.label_font);
		let label_width = ctx
			.measure_text(&label)
			.map(|m| m.width())
			.unwrap_or(label.len() as f64 * 6.0);
		ctx.set_fill_style_str(&theme.background.with_alpha(0.85).to_css());
		ctx.fill_rect(mid_x - label_width / 2.0 - 3.0, mid_y - 8.0, label_width + 6.0, 14.0);
		ctx.set_fill_style_str(&style.label_color.to_css());
		let _ = ctx.fill_text(&label, mid_x - label_width / 2.0, mid_y + 3.0);
	}
}

fn draw_nodes(state: &CanvasState, ctx: &CanvasRenderingContext2d, theme: &Theme) {
	let hovered = state.view.hovered_node();
	let style = &theme.node;

	for p in &state.view.displayed().nodes {
		let kind_style = theme.kind_style(p.kind());
		let (x, y, w, h) = (p.x, p.y, style.width, style.height);

		if p.focused {
			ctx.set_stroke_style_str(&style.focus_ring.to_css());
			ctx.set_line_width(style.border_width * 3.0);
			ctx.stroke_rect(x - 4.0, y - 4.0, w + 8.0, h + 8.0);
		}
		if hovered == Some(p.id()) {
			ctx.set_stroke_style_str(&style.hover_ring.to_css());
			ctx.set_line_width(style.border_width);
			ctx.stroke_rect(x - 7.0, y - 7.0, w + 14.0, h + 14.0);
		}

		ctx.set_fill_style_str(&kind_style.fill.to_css());
		ctx.fill_rect(x, y, w, h);
		ctx.set_stroke_style_str(&kind_style.stroke.to_css());
		ctx.set_line_width(style.border_width);
		ctx.stroke_rect(x, y, w, h);

		ctx.set_font(style.title_font);
		ctx.set_fill_style_str(&kind_style.stroke.darken(0.35).to_css());
		let _ = ctx.fill_text(p.kind().title(), x + 12.0, y + 24.0);

		ctx.set_font(style.name_font);
		ctx.set_fill_style_str(&style.text.to_css());
		let _ = ctx.fill_text(&elide(&display_name(&p.node)), x + 12.0, y + 50.0);
	}
}

/// Shorten `text` to fit a card, marking the cut with an ellipsis.
fn elide(text: &str) -> String {
	if text.chars().count() <= MAX_NAME_CHARS {
		return text.to_owned();
	}
	let mut short: String = text.chars().take(MAX_NAME_CHARS - 1).collect();
	short.push('…');
	short
}
