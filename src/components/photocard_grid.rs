//! Photocard Grid Component
//!
//! Grid of clickable cards; clicking a card advances its status.

use std::collections::HashMap;

use leptos::prelude::*;

use crate::models::{Photocard, Status};

fn badge_class(status: Status) -> &'static str {
    match status {
        Status::Priority => "badge badge-prio",
        Status::OnTheWay => "badge badge-otw",
        Status::Owned => "badge badge-owned",
    }
}

/// Single card: image or member placeholder, tint, status badge, name caption
#[component]
fn PhotocardCell(
    pc: Photocard,
    #[prop(into)] status: Signal<Option<Status>>,
    on_cycle: Callback<i64>,
) -> impl IntoView {
    let id = pc.id;
    let label = pc.label().to_string();

    let picture = match pc.image_url.clone() {
        Some(src) => view! { <img class="pc-image" src=src alt=label /> }.into_any(),
        None => view! { <div class="pc-placeholder">{pc.member.clone()}</div> }.into_any(),
    };

    view! {
        <button class="pc-cell" on:click=move |_| on_cycle.run(id)>
            {picture}
            // Everything but owned cards is dimmed
            <Show when=move || status.get() != Some(Status::Owned)>
                <div class="pc-tint"></div>
            </Show>
            {move || status.get().map(|s| view! {
                <span class=badge_class(s)>{s.badge()}</span>
            })}
            {pc.pc_name.clone().map(|name| view! {
                <div class="pc-name">{name}</div>
            })}
        </button>
    }
}

#[component]
pub fn PhotocardGrid(
    #[prop(into)] cards: Signal<Vec<Photocard>>,
    #[prop(into)] statuses: Signal<HashMap<i64, Status>>,
    #[prop(into)] on_cycle: Callback<i64>,
) -> impl IntoView {
    view! {
        <section class="pc-grid">
            <For
                each=move || cards.get()
                key=|pc| pc.id
                children=move |pc| {
                    let id = pc.id;
                    let status = Signal::derive(move || statuses.with(|s| s.get(&id).copied()));
                    view! { <PhotocardCell pc=pc status=status on_cycle=on_cycle /> }
                }
            />
        </section>
    }
}
