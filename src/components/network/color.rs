//! HSL/RGB conversions and the drag-driven color animation.

/// Hue in turns (`[0, 1)`), saturation and lightness in `[0, 1]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Hsl {
	pub h: f64,
	pub s: f64,
	pub l: f64,
}

/// Linear channels in `[0, 1]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rgb {
	pub r: f64,
	pub g: f64,
	pub b: f64,
}

impl Hsl {
	pub fn new(h: f64, s: f64, l: f64) -> Self {
		Self {
			h: h.rem_euclid(1.0),
			s: s.clamp(0.0, 1.0),
			l: l.clamp(0.0, 1.0),
		}
	}

	pub fn to_rgb(self) -> Rgb {
		if self.s == 0.0 {
			return Rgb::new(self.l, self.l, self.l);
		}
		let q = if self.l <= 0.5 {
			self.l * (1.0 + self.s)
		} else {
			self.l + self.s - self.l * self.s
		};
		let p = 2.0 * self.l - q;
		Rgb::new(
			hue_to_channel(p, q, self.h + 1.0 / 3.0),
			hue_to_channel(p, q, self.h),
			hue_to_channel(p, q, self.h - 1.0 / 3.0),
		)
	}
}

fn hue_to_channel(p: f64, q: f64, mut t: f64) -> f64 {
	if t < 0.0 {
		t += 1.0;
	}
	if t > 1.0 {
		t -= 1.0;
	}
	if t < 1.0 / 6.0 {
		p + (q - p) * 6.0 * t
	} else if t < 0.5 {
		q
	} else if t < 2.0 / 3.0 {
		p + (q - p) * 6.0 * (2.0 / 3.0 - t)
	} else {
		p
	}
}

impl Rgb {
	pub const fn new(r: f64, g: f64, b: f64) -> Self {
		Self { r, g, b }
	}

	pub fn from_hex(hex: u32) -> Self {
		Self::new(
			((hex >> 16) & 0xff) as f64 / 255.0,
			((hex >> 8) & 0xff) as f64 / 255.0,
			(hex & 0xff) as f64 / 255.0,
		)
	}

	pub fn to_hsl(self) -> Hsl {
		let max = self.r.max(self.g).max(self.b);
		let min = self.r.min(self.g).min(self.b);
		let l = (min + max) / 2.0;
		if max == min {
			return Hsl::new(0.0, 0.0, l);
		}
		let delta = max - min;
		let s = if l <= 0.5 {
			delta / (max + min)
		} else {
			delta / (2.0 - max - min)
		};
		let h = if max == self.r {
			(self.g - self.b) / delta + if self.g < self.b { 6.0 } else { 0.0 }
		} else if max == self.g {
			(self.b - self.r) / delta + 2.0
		} else {
			(self.r - self.g) / delta + 4.0
		};
		Hsl::new(h / 6.0, s, l)
	}

	/// Component-wise product, used for tinting an albedo by a light color.
	pub fn modulate(self, other: Rgb) -> Self {
		Self::new(self.r * other.r, self.g * other.g, self.b * other.b)
	}

	pub fn scale(self, k: f64) -> Self {
		Self::new(self.r * k, self.g * k, self.b * k)
	}

	pub fn add(self, other: Rgb) -> Self {
		Self::new(self.r + other.r, self.g + other.g, self.b + other.b)
	}

	pub fn to_css(self) -> String {
		let byte = |c: f64| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
		format!("rgb({}, {}, {})", byte(self.r), byte(self.g), byte(self.b))
	}
}

/// Tuning for the drag-driven saturation/lightness boost.
#[derive(Clone, Debug)]
pub struct ColorAnimation {
	pub drag_speed: f64,
	pub phase_step: f64,
	pub amplitude_s: f64,
	pub amplitude_l: f64,
}

impl Default for ColorAnimation {
	fn default() -> Self {
		Self {
			drag_speed: 0.02,
			phase_step: 0.15,
			amplitude_s: 0.8,
			amplitude_l: 0.5,
		}
	}
}

impl ColorAnimation {
	pub fn phase(&self, index: usize) -> f64 {
		index as f64 * self.phase_step
	}

	/// Displayed color for a node with `base` and `phase` after `accumulated`
	/// pixels of drag. Equal to `base` while `accumulated` is zero.
	pub fn display_color(&self, base: Hsl, phase: f64, accumulated: f64) -> Hsl {
		let t = accumulated * self.drag_speed;
		let raw = ((t + phase).sin() + 1.0) * 0.5;
		let baseline = (phase.sin() + 1.0) * 0.5;
		let delta = (raw - baseline).max(0.0);
		Hsl {
			h: base.h,
			s: (base.s + delta * self.amplitude_s).clamp(0.0, 1.0),
			l: (base.l + delta * self.amplitude_l).clamp(0.0, 1.0),
		}
	}
}
