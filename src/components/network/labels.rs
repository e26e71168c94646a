//! Text labels drawn once into small offscreen canvases and blitted as
//! camera-facing sprites.

use glam::DVec3;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement};

use super::camera::Projected;
use super::error::{VizError, VizResult};

/// Size, placement and typography of node labels.
#[derive(Clone, Debug)]
pub struct LabelStyle {
	/// Height above the node center.
	pub offset: f64,
	/// Sprite width in world units.
	pub world_width: f64,
	/// Sprite height in world units.
	pub world_height: f64,
	/// Texture width in pixels.
	pub canvas_width: u32,
	/// Texture height in pixels.
	pub canvas_height: u32,
	/// CSS font shorthand.
	pub font: &'static str,
	/// CSS text color.
	pub color: &'static str,
}

impl Default for LabelStyle {
	fn default() -> Self {
		Self {
			offset: 0.8,
			world_width: 1.8,
			world_height: 0.4,
			canvas_width: 256,
			canvas_height: 64,
			font: "16px \"Helvetica Neue\", Helvetica, Arial, sans-serif",
			color: "#000000",
		}
	}
}

impl LabelStyle {
	/// Sprite center for a node at `position`.
	pub fn anchor(&self, position: DVec3) -> DVec3 {
		position + DVec3::new(0.0, self.offset, 0.0)
	}

	/// Screen rectangle `(x, y, w, h)` of a sprite centered on its projected anchor.
	pub fn screen_rect(&self, anchor: &Projected) -> (f64, f64, f64, f64) {
		let w = self.world_width * anchor.pixels_per_unit;
		let h = self.world_height * anchor.pixels_per_unit;
		(anchor.x - w / 2.0, anchor.y - h / 2.0, w, h)
	}
}

/// A rendered label and the world point it is drawn at.
pub struct LabelSprite {
	/// Offscreen canvas holding the text.
	pub texture: HtmlCanvasElement,
	/// World-space center of the sprite.
	pub anchor: DVec3,
}

/// Renders `text` centered on a transparent canvas.
pub fn create_label_sprite(
	document: &Document,
	text: &str,
	position: DVec3,
	style: &LabelStyle,
) -> VizResult<LabelSprite> {
	let texture: HtmlCanvasElement = document
		.create_element("canvas")?
		.dyn_into()
		.map_err(|_| VizError::MissingContext)?;
	texture.set_width(style.canvas_width);
	texture.set_height(style.canvas_height);

	let ctx: CanvasRenderingContext2d = texture
		.get_context("2d")?
		.ok_or(VizError::MissingContext)?
		.dyn_into()
		.map_err(|_| VizError::MissingContext)?;
	ctx.set_font(style.font);
	ctx.set_fill_style_str(style.color);
	ctx.set_text_align("center");
	ctx.set_text_baseline("middle");
	ctx.fill_text(
		text,
		style.canvas_width as f64 / 2.0,
		style.canvas_height as f64 / 2.0,
	)?;

	Ok(LabelSprite {
		texture,
		anchor: style.anchor(position),
	})
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn anchor_sits_above_node() {
		let style = LabelStyle::default();
		let anchor = style.anchor(DVec3::new(1.0, 2.0, 3.0));
		assert!(anchor.distance(DVec3::new(1.0, 2.8, 3.0)) < 1e-12);
	}

	#[test]
	fn screen_rect_keeps_sprite_aspect() {
		let style = LabelStyle::default();
		let p = Projected {
			x: 100.0,
			y: 50.0,
			depth: 5.0,
			pixels_per_unit: 40.0,
		};
		let (x, y, w, h) = style.screen_rect(&p);
		assert!((w - 72.0).abs() < 1e-9);
		assert!((h - 16.0).abs() < 1e-9);
		assert!((x + w / 2.0 - 100.0).abs() < 1e-9);
		assert!((y + h / 2.0 - 50.0).abs() < 1e-9);
	}
}
