use dioxus::prelude::*;

use super::party_form::PartyForm;
use super::party_grid::PartyGrid;
use super::store_state::{provide_party_store, use_party_store};

#[component]
pub fn App() -> Element {
    provide_party_store();
    let store = use_party_store();
    let sort_by = use_signal(|| "recent".to_string());
    let filter_ideology = use_signal(|| "all".to_string());
    let mut show_success = use_signal(|| false);

    let party_count = store.read().len();
    let ideologies = store.read().ideologies();

    let on_created = move |_| {
        show_success.set(true);
        // Auto-dismiss after 3 seconds; the close button works regardless
        #[cfg(target_family = "wasm")]
        spawn(async move {
            gloo_timers::future::TimeoutFuture::new(3_000).await;
            show_success.set(false);
        });
    };

    rsx! {
        div { class: "polis-app",
            header { class: "app-header",
                h1 { "Polis" }
                p { "Create, browse and support political parties" }
            }
            main {
                PartyForm { on_created }
                section { class: "party-list",
                    div { class: "list-header",
                        h2 { "Registered Parties ({party_count})" }
                        div { class: "list-controls",
                            SortSelect { sort_by }
                            FilterSelect { filter_ideology, ideologies }
                        }
                    }
                    PartyGrid { sort_by, filter_ideology }
                }
            }
            if *show_success.read() {
                SuccessModal { on_close: move |_| show_success.set(false) }
            }
        }
    }
}

#[component]
fn SortSelect(sort_by: Signal<String>) -> Element {
    rsx! {
        select {
            value: "{sort_by}",
            onchange: move |evt| sort_by.set(evt.value()),
            option { value: "recent", "Most Recent" }
            option { value: "popular", "Most Popular" }
            option { value: "alphabetical", "Alphabetical" }
        }
    }
}

/// Ideology filter built from the labels currently in the store.
#[component]
fn FilterSelect(filter_ideology: Signal<String>, ideologies: Vec<String>) -> Element {
    rsx! {
        select {
            value: "{filter_ideology}",
            onchange: move |evt| filter_ideology.set(evt.value()),
            option { value: "all", "All Ideologies" }
            for ideology in ideologies {
                option { value: "{ideology}", "{ideology}" }
            }
        }
    }
}

#[component]
fn SuccessModal(on_close: EventHandler<()>) -> Element {
    rsx! {
        div { class: "modal-overlay", onclick: move |_| on_close.call(()),
            div { class: "modal", onclick: move |evt| evt.stop_propagation(),
                button { class: "modal-close", onclick: move |_| on_close.call(()), "\u{00d7}" }
                h3 { "Party registered!" }
                p { "Your party has been added to the list." }
            }
        }
    }
}
