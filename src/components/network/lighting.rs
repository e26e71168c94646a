//! Fixed four-light rig: ambient, cool key (shadow caster), warm fill, rim.

use glam::DVec3;

use super::color::Rgb;

/// Orthographic bounds of the key light's shadow camera.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ShadowFrustum {
	pub near: f64,
	pub far: f64,
	pub left: f64,
	pub right: f64,
	pub top: f64,
	pub bottom: f64,
}

/// The shadow-casting directional light, resolved for projection.
#[derive(Clone, Copy, Debug)]
pub struct ShadowCaster<'a> {
	pub position: DVec3,
	pub target: DVec3,
	/// Unit travel direction, light towards target.
	pub direction: DVec3,
	pub frustum: &'a ShadowFrustum,
}

impl ShadowCaster<'_> {
	/// Whether `point` lies inside the shadow camera: within the side planes
	/// around the target (world x/z) and between near and far along the beam.
	pub fn covers(&self, point: DVec3) -> bool {
		let f = self.frustum;
		let offset = point - self.target;
		let depth = (point - self.position).dot(self.direction);
		(f.left..=f.right).contains(&offset.x)
			&& (f.bottom..=f.top).contains(&offset.z)
			&& (f.near..=f.far).contains(&depth)
	}
}

#[derive(Clone, Debug, PartialEq)]
pub enum LightKind {
	Ambient,
	Directional {
		target: DVec3,
		shadow: Option<ShadowFrustum>,
	},
	Point {
		range: f64,
	},
}

#[derive(Clone, Debug, PartialEq)]
pub struct Light {
	pub kind: LightKind,
	pub color: Rgb,
	pub intensity: f64,
	pub position: DVec3,
}

impl Light {
	/// Radiance reaching a surface at `point` with unit `normal`, before albedo.
	fn contribution(&self, point: DVec3, normal: DVec3) -> Rgb {
		let strength = match &self.kind {
			LightKind::Ambient => 1.0,
			LightKind::Directional { target, .. } => {
				let dir = (self.position - *target).normalize_or_zero();
				normal.dot(dir).max(0.0)
			}
			LightKind::Point { range } => {
				let to_light = self.position - point;
				let distance = to_light.length();
				let falloff = if *range > 0.0 {
					(1.0 - distance / range).max(0.0)
				} else {
					1.0
				};
				normal.dot(to_light.normalize_or_zero()).max(0.0) * falloff
			}
		};
		self.color.scale(self.intensity * strength)
	}
}

#[derive(Clone, Debug)]
pub struct LightingRig {
	lights: Vec<Light>,
}

impl Default for LightingRig {
	fn default() -> Self {
		Self::standard()
	}
}

impl LightingRig {
	pub fn standard() -> Self {
		Self {
			lights: vec![
				Light {
					kind: LightKind::Ambient,
					color: Rgb::from_hex(0x404040),
					intensity: 0.35,
					position: DVec3::ZERO,
				},
				Light {
					kind: LightKind::Directional {
						target: DVec3::ZERO,
						shadow: Some(ShadowFrustum {
							near: 0.5,
							far: 80.0,
							left: -16.0,
							right: 16.0,
							top: 16.0,
							bottom: -16.0,
						}),
					},
					color: Rgb::from_hex(0xa8e3ff),
					intensity: 0.9,
					position: DVec3::new(8.0, 12.0, 8.0),
				},
				Light {
					kind: LightKind::Directional {
						target: DVec3::ZERO,
						shadow: None,
					},
					color: Rgb::from_hex(0xc2ffff),
					intensity: 0.35,
					position: DVec3::new(-10.0, 6.0, -6.0),
				},
				Light {
					kind: LightKind::Point { range: 100.0 },
					color: Rgb::from_hex(0xffffff),
					intensity: 0.35,
					position: DVec3::new(0.0, 10.0, -10.0),
				},
			],
		}
	}

	/// The first directional light carrying a shadow frustum.
	pub fn shadow_caster(&self) -> Option<ShadowCaster<'_>> {
		self.lights.iter().find_map(|light| match &light.kind {
			LightKind::Directional {
				target,
				shadow: Some(frustum),
			} => Some(ShadowCaster {
				position: light.position,
				target: *target,
				direction: (*target - light.position).normalize_or_zero(),
				frustum,
			}),
			_ => None,
		})
	}

	/// Lambert shading of `albedo` at a surface point.
	pub fn shade(&self, albedo: Rgb, point: DVec3, normal: DVec3) -> Rgb {
		let normal = normal.normalize_or_zero();
		let irradiance = self
			.lights
			.iter()
			.fold(Rgb::new(0.0, 0.0, 0.0), |acc, light| {
				acc.add(light.contribution(point, normal))
			});
		albedo.modulate(irradiance)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn standard_rig_has_one_shadow_caster() {
		let rig = LightingRig::standard();
		assert_eq!(rig.lights.len(), 4);
		assert!(matches!(rig.lights[0].kind, LightKind::Ambient));
		assert!(matches!(rig.lights[3].kind, LightKind::Point { .. }));
		let shadowed = rig
			.lights
			.iter()
			.filter(|l| matches!(l.kind, LightKind::Directional { shadow: Some(_), .. }))
			.count();
		assert_eq!(shadowed, 1);
	}

	#[test]
	fn key_light_casts_downward() {
		let rig = LightingRig::standard();
		let caster = rig.shadow_caster().expect("key light");
		assert_eq!(caster.target, DVec3::ZERO);
		assert_eq!(caster.position, DVec3::new(8.0, 12.0, 8.0));
		assert!(caster.direction.y < 0.0);
		assert!((caster.direction.length() - 1.0).abs() < 1e-12);
	}

	#[test]
	fn surfaces_facing_key_are_brighter() {
		let rig = LightingRig::standard();
		let white = Rgb::new(1.0, 1.0, 1.0);
		let lit = rig.shade(white, DVec3::ZERO, DVec3::new(8.0, 12.0, 8.0));
		let unlit = rig.shade(white, DVec3::ZERO, DVec3::new(-8.0, -12.0, -8.0));
		assert!(lit.r > unlit.r && lit.g > unlit.g && lit.b > unlit.b);
	}

	#[test]
	fn ambient_alone_lights_back_faces() {
		let rig = LightingRig::standard();
		let c = rig.shade(Rgb::new(1.0, 1.0, 1.0), DVec3::ZERO, DVec3::NEG_Y);
		let ambient = Rgb::from_hex(0x404040).scale(0.35);
		assert!((c.r - ambient.r).abs() < 1e-12);
	}

	#[test]
	fn frustum_covers_only_inner_square() {
		let rig = LightingRig::standard();
		let caster = rig.shadow_caster().expect("key light");
		assert!(caster.covers(DVec3::new(15.0, -1.6, -15.0)));
		assert!(!caster.covers(DVec3::new(17.0, -1.6, 0.0)));
	}

	#[test]
	fn frustum_clips_by_depth_along_beam() {
		let rig = LightingRig::standard();
		let caster = rig.shadow_caster().expect("key light");
		// Directly behind the light, inside the side planes but before near.
		assert!(!caster.covers(DVec3::new(8.0, 13.0, 8.0)));
		// Far below the target, past the far plane.
		assert!(!caster.covers(DVec3::new(0.0, -110.0, 0.0)));
		assert!(caster.covers(DVec3::new(0.0, -1.6, 0.0)));
	}
}
