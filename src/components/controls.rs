//! Slider panel feeding live force parameters back into the layout.

use leptos::callback::UnsyncCallback;
use leptos::prelude::*;

/// Three range inputs for the tunable forces. Each input event reports
/// its raw value: no range checks, and non-numeric input degrades to
/// NaN rather than being rejected.
#[component]
pub fn ControlPanel(
	#[prop(into)] on_repulsion: UnsyncCallback<f64>,
	#[prop(into)] on_collide_radius: UnsyncCallback<f64>,
	#[prop(into)] on_link_strength: UnsyncCallback<f64>,
) -> impl IntoView {
	view! {
		<div class="control-panel">
			<label for="chargeStrength">"Repulsion strength"</label>
			<input
				type="range"
				id="chargeStrength"
				min="-300"
				max="0"
				step="5"
				value="-100"
				on:input=move |ev| {
					on_repulsion.run(event_target_value(&ev).parse().unwrap_or(f64::NAN))
				}
			/>
			<label for="collideRadius">"Collision radius"</label>
			<input
				type="range"
				id="collideRadius"
				min="0"
				max="40"
				step="1"
				value="10"
				on:input=move |ev| {
					on_collide_radius.run(event_target_value(&ev).parse().unwrap_or(f64::NAN))
				}
			/>
			<label for="linkStrength">"Link strength"</label>
			<input
				type="range"
				id="linkStrength"
				min="0"
				max="2"
				step="0.05"
				value="1"
				on:input=move |ev| {
					on_link_strength.run(event_target_value(&ev).parse().unwrap_or(f64::NAN))
				}
			/>
		</div>
	}
}
