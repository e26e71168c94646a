use leptos::ev;
use leptos::prelude::*;

use super::config::SceneConfig;
use super::controls::{ControlFactory, orbit_controls};
use super::viewport::NetworkViewport;

/// Button that opens the fullscreen network view. Escape closes it and the
/// scene is released when the button unmounts.
#[component]
pub fn NetworkLauncher(
	#[prop(optional)] config: Option<SceneConfig>,
	#[prop(default = "Open network view")] label: &'static str,
	#[prop(default = true)] camera_controls: bool,
) -> impl IntoView {
	let controls = camera_controls.then_some(orbit_controls as ControlFactory);
	let viewport = StoredValue::new_local(NetworkViewport::new(config.unwrap_or_default(), controls));

	let escape = window_event_listener(ev::keydown, move |ev| {
		if ev.key() != "Escape" {
			return;
		}
		viewport.with_value(|v| {
			if v.is_visible() {
				v.exit();
			}
		});
	});

	on_cleanup(move || {
		escape.remove();
		viewport.try_with_value(NetworkViewport::dispose);
	});

	view! {
		<button
			id="fullscreen-btn"
			class="network-launcher"
			on:click=move |_| viewport.with_value(NetworkViewport::enter)
		>
			{label}
		</button>
	}
}
