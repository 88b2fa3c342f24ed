use dioxus::prelude::*;

use polis_common::store::{IdeologyFilter, SortKey};

use super::party_card::PartyCard;
use super::store_state::use_party_store;

/// Renders the filtered, sorted party grid.
///
/// `sort_by` and `filter_ideology` carry the raw control values
/// ("recent"/"popular"/"alphabetical" and "all"/an ideology label).
#[component]
pub fn PartyGrid(sort_by: Signal<String>, filter_ideology: Signal<String>) -> Element {
    let store = use_party_store();

    let filter = IdeologyFilter::from_selection(&filter_ideology.read());
    let sort = SortKey::from_selection(&sort_by.read());
    let parties = store.read().query(&filter, sort);

    rsx! {
        div { class: "parties-grid",
            if parties.is_empty() {
                div { class: "no-parties",
                    p { "No political parties found." }
                    p { "Create a new party or adjust the filter criteria." }
                }
            } else {
                for party in parties {
                    PartyCard { key: "{party.id}", party }
                }
            }
        }
    }
}
