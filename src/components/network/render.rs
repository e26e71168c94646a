use std::f64::consts::TAU;

use glam::DVec3;
use web_sys::{CanvasGradient, CanvasRenderingContext2d};

use super::camera::Projected;
use super::color::Rgb;
use super::error::VizResult;
use super::labels::LabelSprite;
use super::state::VisualizationSession;

const SHADOW_SEGMENTS: usize = 24;

pub fn render(state: &VisualizationSession, labels: &[LabelSprite], ctx: &CanvasRenderingContext2d) {
	let ratio = state.pixel_ratio;
	let _ = ctx.set_transform(ratio, 0.0, 0.0, ratio, 0.0, 0.0);
	ctx.set_global_alpha(1.0);
	ctx.set_fill_style_str(state.config.background);
	ctx.fill_rect(0.0, 0.0, state.width, state.height);
	draw_shadows(state, ctx);
	draw_edges(state, ctx);
	draw_nodes(state, labels, ctx);
}

fn project(state: &VisualizationSession, point: DVec3) -> Option<Projected> {
	state.camera.project(point, state.width, state.height)
}

/// Ground footprints of every sphere under the key light, stretched along the
/// light's horizontal heading.
fn draw_shadows(state: &VisualizationSession, ctx: &CanvasRenderingContext2d) {
	let Some(caster) = state.lighting.shadow_caster() else {
		return;
	};
	let dir = caster.direction;
	if dir.y > -1e-6 {
		return;
	}
	let radius = state.config.sphere_radius;
	let heading = DVec3::new(dir.x, 0.0, dir.z).normalize_or_zero();
	let (along, across, stretch) = if heading == DVec3::ZERO {
		(DVec3::X, DVec3::Z, 1.0)
	} else {
		(heading, DVec3::new(-heading.z, 0.0, heading.x), 1.0 / -dir.y)
	};

	ctx.set_fill_style_str(state.config.shadow_color);
	for node in &state.nodes {
		let center = node.position + dir * ((state.floor_y - node.position.y) / dir.y);
		if !caster.covers(center) {
			continue;
		}
		let outline: Option<Vec<Projected>> = (0..SHADOW_SEGMENTS)
			.map(|k| {
				let a = k as f64 / SHADOW_SEGMENTS as f64 * TAU;
				let p = center + along * (a.cos() * radius * stretch) + across * (a.sin() * radius);
				project(state, p)
			})
			.collect();
		let Some(outline) = outline else {
			continue;
		};
		ctx.begin_path();
		for (k, p) in outline.iter().enumerate() {
			if k == 0 {
				ctx.move_to(p.x, p.y);
			} else {
				ctx.line_to(p.x, p.y);
			}
		}
		ctx.close_path();
		ctx.fill();
	}
}

fn draw_edges(state: &VisualizationSession, ctx: &CanvasRenderingContext2d) {
	let _ = ctx.set_line_dash(&js_sys::Array::new());
	ctx.set_stroke_style_str(state.config.edge_color);
	ctx.set_line_width(1.0);
	ctx.begin_path();
	for edge in state.edges.edges() {
		let (a, b) = (&state.nodes[edge.a], &state.nodes[edge.b]);
		if let (Some(pa), Some(pb)) = (project(state, a.position), project(state, b.position)) {
			ctx.move_to(pa.x, pa.y);
			ctx.line_to(pb.x, pb.y);
		}
	}
	ctx.stroke();
}

/// Spheres far to near, each followed by its label sprite.
fn draw_nodes(state: &VisualizationSession, labels: &[LabelSprite], ctx: &CanvasRenderingContext2d) {
	let mut order: Vec<(usize, Projected)> = state
		.nodes
		.iter()
		.enumerate()
		.filter_map(|(i, n)| project(state, n.position).map(|p| (i, p)))
		.collect();
	order.sort_by(|a, b| b.1.depth.total_cmp(&a.1.depth));

	let key_dir = state
		.lighting
		.shadow_caster()
		.map_or(DVec3::Y, |caster| -caster.direction);

	for (i, projected) in order {
		let node = &state.nodes[i];
		let albedo = state.display_colors()[i].to_rgb();
		let radius = state.config.sphere_radius * projected.pixels_per_unit;

		let view = (state.camera.position - node.position).normalize_or_zero();
		let highlight = (view + key_dir).normalize_or_zero();
		let away = (-key_dir).reject_from_normalized(view).normalize_or_zero();
		let rim = if away == DVec3::ZERO {
			view
		} else {
			(view * 0.2 + away).normalize_or_zero()
		};
		let lit = |normal: DVec3| state.lighting.shade(albedo, node.position, normal);
		let shades = [lit(highlight), lit(view), lit(rim)];

		let hotspot = project(state, node.position + highlight * state.config.sphere_radius * 0.5)
			.unwrap_or(projected);
		match sphere_gradient(ctx, &projected, &hotspot, radius, &shades) {
			Ok(gradient) => {
				#[allow(deprecated)]
				ctx.set_fill_style(&gradient);
			}
			Err(_) => ctx.set_fill_style_str(&shades[1].to_css()),
		}
		ctx.begin_path();
		let _ = ctx.arc(projected.x, projected.y, radius, 0.0, TAU);
		ctx.fill();

		if let Some(sprite) = labels.get(node.id) {
			draw_label(state, sprite, ctx);
		}
	}
}

fn sphere_gradient(
	ctx: &CanvasRenderingContext2d,
	center: &Projected,
	hotspot: &Projected,
	radius: f64,
	shades: &[Rgb; 3],
) -> VizResult<CanvasGradient> {
	let gradient = ctx.create_radial_gradient(hotspot.x, hotspot.y, 0.0, center.x, center.y, radius)?;
	gradient.add_color_stop(0.0, &shades[0].to_css())?;
	gradient.add_color_stop(0.55, &shades[1].to_css())?;
	gradient.add_color_stop(1.0, &shades[2].to_css())?;
	Ok(gradient)
}

fn draw_label(state: &VisualizationSession, sprite: &LabelSprite, ctx: &CanvasRenderingContext2d) {
	let Some(anchor) = project(state, sprite.anchor) else {
		return;
	};
	let (x, y, w, h) = state.config.labels.screen_rect(&anchor);
	let _ = ctx.draw_image_with_html_canvas_element_and_dw_and_dh(&sprite.texture, x, y, w, h);
}
