//! Visual theming for the call-flow canvas.
//!
//! Colors follow the legend operators already know: one hue per node kind,
//! indigo edges, red for the edges of the hovered node.

use super::model::NodeKind;

/// RGBA color representation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
	pub r: u8,
	pub g: u8,
	pub b: u8,
	pub a: f64,
}

impl Color {
	pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
		Self { r, g, b, a: 1.0 }
	}

	pub const fn rgba(r: u8, g: u8, b: u8, a: f64) -> Self {
		Self { r, g, b, a }
	}

	pub fn with_alpha(self, a: f64) -> Self {
		Self { a, ..self }
	}

	/// Darken the color by a factor (0.0 = unchanged, 1.0 = black)
	pub fn darken(self, factor: f64) -> Self {
		let f = 1.0 - factor.clamp(0.0, 1.0);
		Self {
			r: (self.r as f64 * f) as u8,
			g: (self.g as f64 * f) as u8,
			b: (self.b as f64 * f) as u8,
			a: self.a,
		}
	}

	pub fn to_css(self) -> String {
		if (self.a - 1.0).abs() < 0.001 {
			format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
		} else {
			format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
		}
	}
}

/// Card colors for one node kind.
#[derive(Clone, Copy, Debug)]
pub struct KindStyle {
	pub fill: Color,
	pub stroke: Color,
}

/// Node card style.
#[derive(Clone, Debug)]
pub struct NodeStyle {
	/// Card width in world units.
	pub width: f64,
	/// Card height in world units.
	pub height: f64,
	pub border_width: f64,
	/// Outline drawn around cards of a focused view.
	pub focus_ring: Color,
	/// Outline drawn around the hovered card.
	pub hover_ring: Color,
	pub title_font: &'static str,
	pub name_font: &'static str,
	pub text: Color,
}

/// Edge style.
#[derive(Clone, Debug)]
pub struct EdgeStyle {
	pub color: Color,
	pub emphasized: Color,
	pub dimmed: Color,
	pub width: f64,
	pub emphasized_width: f64,
	pub dimmed_width: f64,
	pub arrow_size: f64,
	/// Edge kinds drawn dashed (relationships rather than call routes).
	pub dashed_kinds: &'static [&'static str],
	pub dash_pattern: (f64, f64),
	pub label_font: &'static str,
	pub label_color: Color,
}

/// Complete visual theme.
#[derive(Clone, Debug)]
pub struct Theme {
	pub background: Color,
	pub node: NodeStyle,
	pub edge: EdgeStyle,
}

impl Theme {
	/// Colors for a node kind.
	pub fn kind_style(&self, kind: NodeKind) -> KindStyle {
		let (fill, stroke) = match kind {
			NodeKind::Did => (Color::rgb(219, 234, 254), Color::rgb(59, 130, 246)),
			NodeKind::AutoAttendant => (Color::rgb(209, 250, 229), Color::rgb(16, 185, 129)),
			NodeKind::CallQueue => (Color::rgb(237, 233, 254), Color::rgb(139, 92, 246)),
			NodeKind::HuntGroup => (Color::rgb(254, 249, 195), Color::rgb(234, 179, 8)),
			NodeKind::User => (Color::rgb(254, 243, 199), Color::rgb(245, 158, 11)),
			NodeKind::Voicemail => (Color::rgb(254, 226, 226), Color::rgb(239, 68, 68)),
		};
		KindStyle { fill, stroke }
	}
}

impl Default for Theme {
	fn default() -> Self {
		Self {
			background: Color::rgb(243, 244, 246),
			node: NodeStyle {
				width: 220.0,
				height: 80.0,
				border_width: 2.0,
				focus_ring: Color::rgba(37, 99, 235, 0.6),
				hover_ring: Color::rgba(17, 24, 39, 0.5),
				title_font: "bold 13px sans-serif",
				name_font: "12px monospace",
				text: Color::rgb(31, 41, 55),
			},
			edge: EdgeStyle {
				color: Color::rgb(79, 70, 229),
				emphasized: Color::rgb(239, 68, 68),
				dimmed: Color::rgba(156, 163, 175, 0.5),
				width: 2.0,
				emphasized_width: 3.5,
				dimmed_width: 1.0,
				arrow_size: 9.0,
				dashed_kinds: &["agent"],
				dash_pattern: (8.0, 4.0),
				label_font: "bold 10px sans-serif",
				label_color: Color::rgb(102, 102, 102),
			},
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn css_uses_hex_for_opaque_colors() {
		assert_eq!(Color::rgb(59, 130, 246).to_css(), "#3b82f6");
		assert_eq!(Color::rgba(0, 0, 0, 0.5).to_css(), "rgba(0, 0, 0, 0.5)");
	}

	#[test]
	fn every_kind_has_a_distinct_stroke() {
		let theme = Theme::default();
		let strokes: Vec<String> = NodeKind::ALL
			.iter()
			.map(|&k| theme.kind_style(k).stroke.to_css())
			.collect();
		for (i, a) in strokes.iter().enumerate() {
			assert!(strokes[i + 1..].iter().all(|b| a != b));
		}
	}

	#[test]
	fn darken_scales_channels() {
		let c = Color::rgb(200, 100, 50).darken(0.5);
		assert_eq!((c.r, c.g, c.b), (100, 50, 25));
	}
}
