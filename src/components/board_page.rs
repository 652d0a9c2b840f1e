//! Board Page Component
//!
//! Collection board: loads the catalog and the user's statuses on mount,
//! renders the filter bar, progress and grid, and cycles card statuses.

use leptos::prelude::*;
use leptos::task::spawn_local;
use reactive_stores::Store;

use crate::app::LOGIN_PATH;
use crate::board;
use crate::browser;
use crate::commands::auth;
use crate::components::{FacetSelect, MemberSelector, PhotocardGrid, ProgressBar, SyncNotice};
use crate::config::{ERAS, TYPES};
use crate::context::use_app_context;
use crate::filters::{self, Facet};
use crate::models::Session;
use crate::store::{begin_cycle, BoardState, BoardStateStoreFields, BoardStore};

#[component]
pub fn BoardPage() -> impl IntoView {
    let ctx = use_app_context();
    let store: BoardStore = Store::new(BoardState::new());
    let (session, set_session) = signal(None::<Session>);

    // Load session, catalog and statuses on mount
    let client = ctx.client.clone();
    Effect::new(move |_| {
        let client = client.clone();
        spawn_local(async move {
            let current = auth::get_session(&client).await;
            let backend = match &current {
                Some(s) => client.authorized(s),
                None => client.clone(),
            };
            let loaded = board::load_board(&backend, current.as_ref()).await;

            store.user_id().set(loaded.user_id);
            store.photocards().set(loaded.photocards);
            store.statuses().set(loaded.statuses);
            set_session.set(current);
            store.loading().set(false);
        });
    });

    let visible = Memo::new(move |_| {
        let active = store.filters().get();
        store.photocards().with(|pcs| filters::visible(pcs, &active))
    });
    let progress = Memo::new(move |_| {
        store.statuses().with(|statuses| visible.with(|pcs| filters::progress(pcs, statuses)))
    });

    // Status cycling: apply locally first, then reconcile with the backend
    let client = ctx.client.clone();
    let on_cycle = Callback::new(move |pc_id: i64| {
        let (Some(user_id), Some(current)) = (store.user_id().get_untracked(), session.get_untracked()) else {
            return;
        };
        let Some(change) = store
            .statuses()
            .try_update(|statuses| begin_cycle(Some(&user_id), statuses, pc_id))
            .flatten()
        else {
            return;
        };

        let backend = client.authorized(&current);
        spawn_local(async move {
            let notice = board::finish_cycle(&backend, &user_id, change).await;
            store.sync_error().set(notice);
        });
    });

    let client = ctx.client;
    let sign_out = move |_: web_sys::MouseEvent| {
        let client = client.clone();
        let Some(current) = session.get_untracked() else {
            return;
        };
        spawn_local(async move {
            auth::sign_out(&client, &current).await;
            if let Err(e) = browser::navigate(LOGIN_PATH) {
                log::error!("[BOARD] Cannot open sign-in page: {}", e);
            }
        });
    };

    view! {
        <main class="board">
            <header class="board-header">
                <h1>"Alpha Drive One PC Tracker"</h1>
                <p class="subtitle">"Track your photocard collection"</p>
                <Show when=move || session.with(Option::is_some)>
                    <button class="sign-out-btn" on:click=sign_out.clone()>"Sign out"</button>
                </Show>
            </header>

            <MemberSelector
                selected=Signal::derive(move || store.filters().with(|f| f.members.clone()))
                on_toggle=move |member: String| store.filters().write().toggle_member(&member)
                on_clear=move |_: ()| store.filters().write().clear_members()
            />

            <section class="facet-bar">
                <FacetSelect
                    all_label="All eras"
                    options=ERAS
                    value=Signal::derive(move || store.filters().with(|f| f.era.as_value().to_string()))
                    on_change=move |value: String| store.filters().write().era = Facet::from_value(&value)
                />
                <FacetSelect
                    all_label="All types"
                    options=TYPES
                    value=Signal::derive(move || store.filters().with(|f| f.pc_type.as_value().to_string()))
                    on_change=move |value: String| store.filters().write().pc_type = Facet::from_value(&value)
                />
            </section>

            <ProgressBar percent=progress />

            <SyncNotice
                message=Signal::derive(move || store.sync_error().get())
                on_dismiss=move |_: ()| store.sync_error().set(None)
            />

            {move || if store.loading().get() {
                view! { <p class="loading">"Loading photocards…"</p> }.into_any()
            } else {
                view! {
                    <PhotocardGrid
                        cards=visible
                        statuses=Signal::derive(move || store.statuses().get())
                        on_cycle=on_cycle
                    />
                }.into_any()
            }}
        </main>
    }
}
