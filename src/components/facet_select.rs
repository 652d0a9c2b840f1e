//! Facet Select Component
//!
//! Single-valued `<select>` with an "All" option first.

use leptos::prelude::*;

use crate::filters::ALL;

#[component]
pub fn FacetSelect(
    /// Label of the "All" option, e.g. "All eras"
    all_label: &'static str,
    /// (value, label) pairs
    options: &'static [(&'static str, &'static str)],
    #[prop(into)] value: Signal<String>,
    #[prop(into)] on_change: Callback<String>,
) -> impl IntoView {
    view! {
        <select
            class="facet-select"
            prop:value=move || value.get()
            on:change=move |ev| on_change.run(event_target_value(&ev))
        >
            <option value=ALL>{all_label}</option>
            {options.iter().map(|(option_value, label)| view! {
                <option value=*option_value>{*label}</option>
            }).collect_view()}
        </select>
    }
}
