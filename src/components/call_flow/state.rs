//! Canvas-side state: the call-flow session plus pan/zoom and pointer tracking.

use super::layout::LayoutConfig;
use super::model::PositionedNode;
use super::theme::Theme;
use super::view::CallFlowView;

/// Pan and zoom transform applied to the entire graph view.
#[derive(Clone, Debug, PartialEq)]
pub struct ViewTransform {
	pub x: f64,
	pub y: f64,
	/// Zoom factor (1.0 = 100%, clamped to 0.1..10.0).
	pub k: f64,
}

impl Default for ViewTransform {
	fn default() -> Self {
		Self { x: 0.0, y: 0.0, k: 0.8 }
	}
}

/// Tracks an in-progress canvas pan operation.
#[derive(Clone, Debug, Default)]
pub struct PanState {
	pub active: bool,
	/// Set once the pointer travelled far enough that the release is not a click.
	pub moved: bool,
	pub start_x: f64,
	pub start_y: f64,
	pub transform_start_x: f64,
	pub transform_start_y: f64,
}

/// Pointer travel (screen pixels) below which a press-release still counts as a click.
const CLICK_SLOP: f64 = 4.0;

/// Fraction of the viewport kept free around fitted content.
const FIT_PADDING: f64 = 0.2;
const FIT_MIN_ZOOM: f64 = 0.5;
const FIT_MAX_ZOOM: f64 = 1.5;

/// Everything the canvas component keeps between events.
pub struct CanvasState {
	pub view: CallFlowView,
	pub transform: ViewTransform,
	pub pan: PanState,
	pub width: f64,
	pub height: f64,
}

impl CanvasState {
	pub fn new(config: LayoutConfig, width: f64, height: f64) -> Self {
		Self {
			view: CallFlowView::new(config),
			transform: ViewTransform::default(),
			pan: PanState::default(),
			width,
			height,
		}
	}

	pub fn screen_to_graph(&self, sx: f64, sy: f64) -> (f64, f64) {
		(
			(sx - self.transform.x) / self.transform.k,
			(sy - self.transform.y) / self.transform.k,
		)
	}

	/// Displayed node under a screen position.
	pub fn node_at_position(&self, sx: f64, sy: f64, theme: &Theme) -> Option<&PositionedNode> {
		let (gx, gy) = self.screen_to_graph(sx, sy);
		self.view
			.node_at(gx, gy, theme.node.width, theme.node.height)
	}

	/// Update hover from a pointer position.
	pub fn hover_at(&mut self, sx: f64, sy: f64, theme: &Theme) {
		match self.node_at_position(sx, sy, theme).map(|p| p.id().to_owned()) {
			Some(id) => self.view.on_node_hover_enter(&id),
			None if self.view.hovered_node().is_some() => self.view.on_node_hover_leave(),
			None => {}
		}
	}

	pub fn begin_pan(&mut self, sx: f64, sy: f64) {
		self.pan = PanState {
			active: true,
			moved: false,
			start_x: sx,
			start_y: sy,
			transform_start_x: self.transform.x,
			transform_start_y: self.transform.y,
		};
	}

	pub fn update_pan(&mut self, sx: f64, sy: f64) {
		if !self.pan.active {
			return;
		}
		let (dx, dy) = (sx - self.pan.start_x, sy - self.pan.start_y);
		if dx.abs() > CLICK_SLOP || dy.abs() > CLICK_SLOP {
			self.pan.moved = true;
		}
		self.transform.x = self.pan.transform_start_x + dx;
		self.transform.y = self.pan.transform_start_y + dy;
	}

	/// Finish a pan; returns whether it was really a click.
	pub fn end_pan(&mut self) -> bool {
		let was_click = self.pan.active && !self.pan.moved;
		self.pan.active = false;
		was_click
	}

	/// Zoom around a screen point; positive `delta_y` zooms out.
	pub fn zoom_at(&mut self, sx: f64, sy: f64, delta_y: f64) {
		let factor = if delta_y > 0.0 { 0.9 } else { 1.1 };
		let new_k = (self.transform.k * factor).clamp(0.1, 10.0);
		let ratio = new_k / self.transform.k;
		self.transform.x = sx - (sx - self.transform.x) * ratio;
		self.transform.y = sy - (sy - self.transform.y) * ratio;
		self.transform.k = new_k;
	}

	/// Center the displayed graph in the viewport at a readable zoom.
	pub fn fit_view(&mut self, theme: &Theme) {
		let nodes = &self.view.displayed().nodes;
		if nodes.is_empty() {
			self.transform = ViewTransform::default();
			return;
		}

		let (mut min_x, mut min_y) = (f64::INFINITY, f64::INFINITY);
		let (mut max_x, mut max_y) = (f64::NEG_INFINITY, f64::NEG_INFINITY);
		for p in nodes {
			min_x = min_x.min(p.x);
			min_y = min_y.min(p.y);
			max_x = max_x.max(p.x + theme.node.width);
			max_y = max_y.max(p.y + theme.node.height);
		}

		let (content_w, content_h) = (max_x - min_x, max_y - min_y);
		let usable = 1.0 - 2.0 * FIT_PADDING;
		let k = (self.width * usable / content_w)
			.min(self.height * usable / content_h)
			.clamp(FIT_MIN_ZOOM, FIT_MAX_ZOOM);

		self.transform = ViewTransform {
			x: self.width / 2.0 - (min_x + content_w / 2.0) * k,
			y: self.height / 2.0 - (min_y + content_h / 2.0) * k,
			k,
		};
	}

	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
	}
}
