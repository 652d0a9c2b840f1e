//! Member Selector Component
//!
//! "All" chip plus one toggle chip per member.

use leptos::prelude::*;

use crate::config::MEMBERS;

#[component]
pub fn MemberSelector(
    #[prop(into)] selected: Signal<Vec<String>>,
    #[prop(into)] on_toggle: Callback<String>,
    #[prop(into)] on_clear: Callback<()>,
) -> impl IntoView {
    let chip_class = |active: bool| if active { "chip active" } else { "chip" };

    view! {
        <section class="member-selector">
            <button
                class=move || chip_class(selected.with(|m| m.is_empty()))
                on:click=move |_| on_clear.run(())
            >
                "All"
            </button>
            {MEMBERS.iter().map(|member| {
                let name = member.to_string();
                let is_active = move || selected.with(|m| m.iter().any(|s| s == member));
                view! {
                    <button
                        class=move || chip_class(is_active())
                        on:click=move |_| on_toggle.run(name.clone())
                    >
                        {*member}
                    </button>
                }
            }).collect_view()}
        </section>
    }
}
