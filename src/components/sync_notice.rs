//! Sync Notice Component
//!
//! Transient banner for failed status writes. Dismisses itself after a few
//! seconds; the card keeps its new status either way.

use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;

const DISMISS_AFTER_MS: u32 = 4_000;
/// Log lines attached to the banner tooltip
const DETAIL_LINES: usize = 5;

/// Hands out one ticket per shown message; only the latest may dismiss.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct DismissTickets {
    latest: u64,
}

impl DismissTickets {
    fn issue(&mut self) -> u64 {
        self.latest += 1;
        self.latest
    }

    fn is_current(&self, ticket: u64) -> bool {
        self.latest == ticket
    }
}

#[component]
pub fn SyncNotice(
    #[prop(into)] message: Signal<Option<String>>,
    #[prop(into)] on_dismiss: Callback<()>,
) -> impl IntoView {
    let tickets = StoredValue::new(DismissTickets::default());

    Effect::new(move |_| {
        // Any change, including a clear, invalidates pending timers
        let shown = message.get().is_some();
        let ticket = tickets.try_update_value(DismissTickets::issue).unwrap_or_default();
        if shown {
            spawn_local(async move {
                TimeoutFuture::new(DISMISS_AFTER_MS).await;
                if tickets.try_with_value(|t| t.is_current(ticket)).unwrap_or(false) {
                    on_dismiss.run(());
                }
            });
        }
    });

    move || {
        message.get().map(|text| {
            let details = rolling_logger::tail(DETAIL_LINES).join("\n");
            view! {
                <div class="sync-notice" role="status" title=details on:click=move |_| on_dismiss.run(())>
                    {text}
                </div>
            }
        })
    }
}
