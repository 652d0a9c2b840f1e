//! Progress Bar Component

use leptos::prelude::*;

/// Collection progress; renders nothing while `percent` is `None`
#[component]
pub fn ProgressBar(#[prop(into)] percent: Signal<Option<u32>>) -> impl IntoView {
    move || {
        percent.get().map(|p| view! {
            <div class="progress">
                <div class="progress-label">{format!("{}%", p)}</div>
                <div class="progress-track">
                    <div class="progress-fill" style=format!("width: {}%;", p)></div>
                </div>
            </div>
        })
    }
}
