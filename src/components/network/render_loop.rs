//! Frame scheduling as an explicit Idle/Running state machine.

use std::cell::RefCell;
use std::rc::Rc;

use log::{debug, warn};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::Closure;

use super::error::{VizError, VizResult};

/// Host primitive that runs a callback once on the next display refresh.
pub trait FrameScheduler {
	fn request(&self) -> VizResult<i32>;
	fn cancel(&self, handle: i32);
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoopState {
	Idle,
	Running { handle: i32 },
}

pub struct RenderLoop<S: FrameScheduler> {
	scheduler: S,
	state: LoopState,
}

impl<S: FrameScheduler> RenderLoop<S> {
	pub fn new(scheduler: S) -> Self {
		Self {
			scheduler,
			state: LoopState::Idle,
		}
	}

	pub fn is_running(&self) -> bool {
		matches!(self.state, LoopState::Running { .. })
	}

	/// Idle -> Running. A no-op when already running.
	pub fn start(&mut self) -> VizResult<()> {
		if self.is_running() {
			return Ok(());
		}
		let handle = self.scheduler.request()?;
		self.state = LoopState::Running { handle };
		debug!("render loop started");
		Ok(())
	}

	/// Running -> Idle, cancelling the pending frame. A no-op when idle.
	pub fn stop(&mut self) {
		match self.state {
			LoopState::Running { handle } => {
				self.scheduler.cancel(handle);
				self.state = LoopState::Idle;
				debug!("render loop stopped");
			}
			LoopState::Idle => debug!("render loop already idle"),
		}
	}

	/// Called at the top of each scheduled callback. Re-arms the next frame and
	/// returns whether this frame should be drawn.
	pub fn frame_fired(&mut self) -> bool {
		if !self.is_running() {
			return false;
		}
		match self.scheduler.request() {
			Ok(handle) => self.state = LoopState::Running { handle },
			Err(e) => {
				warn!("could not schedule next frame: {e}");
				self.state = LoopState::Idle;
			}
		}
		true
	}
}

/// Shared slot for the per-frame closure; the closure itself is built by the
/// owner because it needs to reach back into the owner's state.
pub type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

/// `requestAnimationFrame`-backed scheduler.
pub struct AnimationFrameScheduler {
	callback: FrameCallback,
}

impl AnimationFrameScheduler {
	pub fn new(callback: FrameCallback) -> Self {
		Self { callback }
	}
}

impl FrameScheduler for AnimationFrameScheduler {
	fn request(&self) -> VizResult<i32> {
		let window = web_sys::window().ok_or(VizError::MissingWindow)?;
		let slot = self.callback.borrow();
		let cb = slot
			.as_ref()
			.ok_or_else(|| VizError::Js("frame callback not installed".into()))?;
		Ok(window.request_animation_frame(cb.as_ref().unchecked_ref())?)
	}

	fn cancel(&self, handle: i32) {
		if let Some(window) = web_sys::window() {
			let _ = window.cancel_animation_frame(handle);
		}
	}
}
