use leptos::prelude::*;

use crate::components::network::NetworkLauncher;

/// Default Home Page
#[component]
pub fn Home() -> impl IntoView {
	view! {
		<div class="network-page">
			<h1>"Ontology Network"</h1>
			<p class="subtitle">
				"Drag to orbit and shift the colors. Scroll to zoom. Right-drag to pan. Escape closes the view."
			</p>
			<NetworkLauncher />
		</div>
	}
}
