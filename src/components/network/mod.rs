//! Fullscreen 3D node-link view: arc layout, proximity edges, lighting and a
//! drag-driven color animation drawn on a 2D canvas.

mod camera;
mod color;
mod component;
mod config;
mod connectivity;
mod controls;
mod error;
mod labels;
mod layout;
mod lighting;
mod render;
mod render_loop;
mod state;
mod types;
mod viewport;

pub(crate) use component::NetworkLauncher;
pub use config::SceneConfig;
pub use controls::{ControlFactory, orbit_controls};
pub use labels::{LabelSprite, LabelStyle, create_label_sprite};
pub use viewport::{CANVAS_ID, NetworkViewport};
