//! Fullscreen overlay lifecycle: lazy scene construction, show/hide, resize,
//! pointer wiring and teardown.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use log::{debug, error, info};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::Closure;
use web_sys::{
	AddEventListenerOptions, CanvasRenderingContext2d, Event, EventTarget, HtmlCanvasElement,
	HtmlElement, PointerEvent, WheelEvent, Window,
};

use super::config::SceneConfig;
use super::controls::{ControlFactory, PointerSample};
use super::error::{VizError, VizResult};
use super::labels::{LabelSprite, create_label_sprite};
use super::render;
use super::render_loop::{AnimationFrameScheduler, FrameCallback, RenderLoop};
use super::state::VisualizationSession;

/// Id given to the render surface.
pub const CANVAS_ID: &str = "fullscreen-threejs-canvas";
const CONTAINER_CLASS: &str = "fullscreen-canvas";

/// Overlay visibility. Page scroll is locked exactly while shown.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Overlay {
	#[default]
	Hidden,
	Shown,
}

impl Overlay {
	fn scroll_locked(self) -> bool {
		self == Overlay::Shown
	}

	fn display(self) -> &'static str {
		match self {
			Overlay::Hidden => "none",
			Overlay::Shown => "block",
		}
	}

	fn body_overflow(self) -> &'static str {
		if self.scroll_locked() { "hidden" } else { "auto" }
	}
}

/// A DOM listener kept alive until detached.
struct Listener {
	target: EventTarget,
	event: &'static str,
	callback: Closure<dyn FnMut(Event)>,
}

impl Listener {
	fn attach(
		target: &EventTarget,
		event: &'static str,
		callback: Closure<dyn FnMut(Event)>,
	) -> VizResult<Self> {
		let options = AddEventListenerOptions::new();
		options.set_passive(false);
		target.add_event_listener_with_callback_and_add_event_listener_options(
			event,
			callback.as_ref().unchecked_ref(),
			&options,
		)?;
		Ok(Self {
			target: target.clone(),
			event,
			callback,
		})
	}

	fn detach(&self) {
		let _ = self
			.target
			.remove_event_listener_with_callback(self.event, self.callback.as_ref().unchecked_ref());
	}
}

/// Everything that exists only after the first `enter()`.
struct Stage {
	body: HtmlElement,
	container: HtmlElement,
	canvas: HtmlCanvasElement,
	ctx: CanvasRenderingContext2d,
	session: VisualizationSession,
	labels: Vec<LabelSprite>,
	listeners: Vec<Listener>,
}

struct ViewportInner {
	config: SceneConfig,
	controls: Option<ControlFactory>,
	overlay: Overlay,
	stage: Option<Stage>,
	render_loop: RenderLoop<AnimationFrameScheduler>,
}

type Handle = Weak<RefCell<ViewportInner>>;

/// Entry/exit surface for page glue. Cloning shares the same viewport.
#[derive(Clone)]
pub struct NetworkViewport {
	inner: Rc<RefCell<ViewportInner>>,
}

impl NetworkViewport {
	/// `controls` is the optional camera-control capability; `None` renders
	/// with a fixed camera.
	pub fn new(config: SceneConfig, controls: Option<ControlFactory>) -> Self {
		let frame: FrameCallback = Rc::new(RefCell::new(None));
		let inner = Rc::new(RefCell::new(ViewportInner {
			config,
			controls,
			overlay: Overlay::Hidden,
			stage: None,
			render_loop: RenderLoop::new(AnimationFrameScheduler::new(frame.clone())),
		}));

		let handle = Rc::downgrade(&inner);
		*frame.borrow_mut() = Some(Closure::new(move || {
			let Some(inner) = handle.upgrade() else {
				return;
			};
			let Ok(mut inner) = inner.try_borrow_mut() else {
				return;
			};
			inner.on_frame();
		}));

		Self { inner }
	}

	/// Shows the overlay, building the scene on first use, and starts drawing.
	pub fn enter(&self) {
		let handle = Rc::downgrade(&self.inner);
		let Ok(mut inner) = self.inner.try_borrow_mut() else {
			return;
		};
		if inner.stage.is_none() {
			match Stage::build(handle, &inner.config, inner.controls) {
				Ok(stage) => inner.stage = Some(stage),
				Err(e) => {
					error!("network viewport unavailable: {e}");
					return;
				}
			}
		}
		inner.set_overlay(Overlay::Shown);
		if let Some(stage) = inner.stage.as_mut() {
			if let Some(window) = web_sys::window() {
				stage.fit(&window);
			}
			let _ = stage.canvas.focus();
		}
		if let Err(e) = inner.render_loop.start() {
			error!("render loop failed to start: {e}");
		}
		info!("network viewport entered");
	}

	/// Hides the overlay, restores page scroll and stops drawing.
	pub fn exit(&self) {
		let Ok(mut inner) = self.inner.try_borrow_mut() else {
			return;
		};
		if inner.stage.is_none() {
			return;
		}
		inner.set_overlay(Overlay::Hidden);
		inner.render_loop.stop();
		info!("network viewport exited");
	}

	/// Releases the scene, listeners and DOM nodes. Safe to call repeatedly or
	/// before any `enter()`; a later `enter()` rebuilds from scratch.
	pub fn dispose(&self) {
		if let Ok(mut inner) = self.inner.try_borrow_mut() {
			inner.teardown();
		}
	}

	/// Whether the overlay is currently shown.
	pub fn is_visible(&self) -> bool {
		self.inner
			.try_borrow()
			.is_ok_and(|inner| inner.overlay == Overlay::Shown)
	}

	/// Whether frames are being scheduled.
	pub fn is_running(&self) -> bool {
		self.inner
			.try_borrow()
			.is_ok_and(|inner| inner.render_loop.is_running())
	}

	/// Whether a scene exists (entered and not yet disposed).
	pub fn is_built(&self) -> bool {
		self.inner
			.try_borrow()
			.is_ok_and(|inner| inner.stage.is_some())
	}
}

impl ViewportInner {
	fn on_frame(&mut self) {
		if !self.render_loop.frame_fired() {
			return;
		}
		if let Some(stage) = self.stage.as_mut() {
			stage.session.tick();
			render::render(&stage.session, &stage.labels, &stage.ctx);
		}
	}

	fn set_overlay(&mut self, overlay: Overlay) {
		self.overlay = overlay;
		if let Some(stage) = self.stage.as_ref() {
			stage.apply_overlay(overlay);
		}
	}

	fn teardown(&mut self) {
		self.render_loop.stop();
		let Some(mut stage) = self.stage.take() else {
			debug!("network viewport: nothing to dispose");
			return;
		};
		stage.apply_overlay(Overlay::Hidden);
		self.overlay = Overlay::Hidden;
		for listener in &stage.listeners {
			listener.detach();
		}
		stage.session.dispose();
		stage.container.remove();
		info!("network viewport disposed");
	}
}

impl Drop for ViewportInner {
	fn drop(&mut self) {
		self.teardown();
	}
}

fn with_stage(handle: &Handle, f: impl FnOnce(&mut Stage)) {
	let Some(inner) = handle.upgrade() else {
		return;
	};
	let Ok(mut inner) = inner.try_borrow_mut() else {
		return;
	};
	if let Some(stage) = inner.stage.as_mut() {
		f(stage);
	}
}

fn html<T: JsCast>(element: web_sys::Element) -> VizResult<T> {
	element
		.dyn_into()
		.map_err(|_| VizError::Js("unexpected element type".into()))
}

impl Stage {
	fn build(handle: Handle, config: &SceneConfig, controls: Option<ControlFactory>) -> VizResult<Self> {
		let window = web_sys::window().ok_or(VizError::MissingWindow)?;
		let document = window.document().ok_or(VizError::MissingDocument)?;
		let body = document.body().ok_or(VizError::MissingBody)?;

		let container: HtmlElement = html(document.create_element("div")?)?;
		container.set_class_name(CONTAINER_CLASS);
		let style = container.style();
		style.set_property("display", Overlay::Hidden.display())?;
		style.set_property("position", "fixed")?;
		style.set_property("inset", "0")?;
		style.set_property("z-index", "1000")?;

		let canvas: HtmlCanvasElement = html(document.create_element("canvas")?)?;
		canvas.set_id(CANVAS_ID);
		canvas.set_tab_index(0);
		canvas.style().set_property("display", "block")?;
		canvas.style().set_property("touch-action", "none")?;
		container.append_child(&canvas)?;

		let ctx: CanvasRenderingContext2d = canvas
			.get_context("2d")?
			.ok_or(VizError::MissingContext)?
			.dyn_into()
			.map_err(|_| VizError::MissingContext)?;

		let session = VisualizationSession::new(config.clone(), controls.map(|make| make(&config.orbit)));
		let labels = session
			.nodes
			.iter()
			.map(|n| create_label_sprite(&document, &n.label, n.position, &config.labels))
			.collect::<VizResult<Vec<_>>>()?;

		body.append_child(&container)?;
		let mut stage = Self {
			body,
			container,
			canvas,
			ctx,
			session,
			labels,
			listeners: Vec::new(),
		};
		if let Err(e) = stage.attach_listeners(&window, handle) {
			for listener in &stage.listeners {
				listener.detach();
			}
			stage.container.remove();
			return Err(e);
		}
		Ok(stage)
	}

	fn attach_listeners(&mut self, window: &Window, handle: Handle) -> VizResult<()> {
		let canvas: &EventTarget = self.canvas.as_ref();

		let h = handle.clone();
		self.listeners.push(Listener::attach(
			window.as_ref(),
			"resize",
			Closure::new(move |_: Event| {
				let Some(window) = web_sys::window() else {
					return;
				};
				with_stage(&h, |stage| stage.fit(&window));
			}),
		)?);

		let h = handle.clone();
		self.listeners.push(Listener::attach(
			canvas,
			"pointerdown",
			Closure::new(move |ev: Event| {
				let Some(ev) = ev.dyn_ref::<PointerEvent>() else {
					return;
				};
				let pan = ev.button() == 2 || ev.shift_key() || ev.ctrl_key() || ev.meta_key();
				with_stage(&h, |stage| {
					let p = stage.pointer(ev);
					stage.session.pointer_down(p, pan);
				});
			}),
		)?);

		let h = handle.clone();
		self.listeners.push(Listener::attach(
			canvas,
			"pointermove",
			Closure::new(move |ev: Event| {
				let Some(ev) = ev.dyn_ref::<PointerEvent>() else {
					return;
				};
				with_stage(&h, |stage| {
					let p = stage.pointer(ev);
					stage.session.pointer_move(p);
				});
			}),
		)?);

		for event in ["pointerup", "pointerleave"] {
			let h = handle.clone();
			self.listeners.push(Listener::attach(
				canvas,
				event,
				Closure::new(move |_: Event| with_stage(&h, |stage| stage.session.pointer_up())),
			)?);
		}

		let h = handle.clone();
		self.listeners.push(Listener::attach(
			canvas,
			"wheel",
			Closure::new(move |ev: Event| {
				let Some(ev) = ev.dyn_ref::<WheelEvent>() else {
					return;
				};
				ev.prevent_default();
				with_stage(&h, |stage| stage.session.wheel(ev.delta_y()));
			}),
		)?);

		self.listeners.push(Listener::attach(
			canvas,
			"contextmenu",
			Closure::new(move |ev: Event| ev.prevent_default()),
		)?);

		Ok(())
	}

	fn pointer(&self, ev: &PointerEvent) -> PointerSample {
		let rect = self.canvas.get_bounding_client_rect();
		PointerSample {
			x: ev.client_x() as f64 - rect.left(),
			y: ev.client_y() as f64 - rect.top(),
		}
	}

	/// Matches camera aspect and backing store to the window. Applying the
	/// same size twice leaves everything unchanged.
	fn fit(&mut self, window: &Window) {
		let dimension = |v: Result<wasm_bindgen::JsValue, wasm_bindgen::JsValue>| {
			v.ok().and_then(|v| v.as_f64()).unwrap_or(0.0)
		};
		let (w, h) = (dimension(window.inner_width()), dimension(window.inner_height()));
		let (bw, bh) = self.session.resize(w, h, window.device_pixel_ratio());
		if self.canvas.width() != bw {
			self.canvas.set_width(bw);
		}
		if self.canvas.height() != bh {
			self.canvas.set_height(bh);
		}
		let style = self.canvas.style();
		let _ = style.set_property("width", &format!("{w}px"));
		let _ = style.set_property("height", &format!("{h}px"));
		debug!("network viewport resized to {w}x{h} ({bw}x{bh} backing)");
	}

	fn apply_overlay(&self, overlay: Overlay) {
		let _ = self.container.style().set_property("display", overlay.display());
		let _ = self.body.style().set_property("overflow", overlay.body_overflow());
	}
}
