use dioxus::prelude::*;

use polis_common::store::PartyStore;

use super::local_storage::BrowserStorage;

/// The application's store instance: the PartyStore core over browser
/// localStorage.
pub type AppStore = PartyStore<BrowserStorage>;

/// Construct the store once and provide it as shared context at the top
/// of the app. Loads persisted parties, seeding the demonstration set on
/// first run. A corrupt persisted payload is logged and replaced with the
/// demonstration set rather than leaving the app empty.
pub fn provide_party_store() -> Signal<AppStore> {
    use_context_provider(|| {
        let mut store = PartyStore::new(BrowserStorage::new());
        if let Err(err) = store.initialize(false) {
            tracing::warn!("could not load persisted parties: {err}");
            if let Err(err) = store.reset_to_demo() {
                tracing::warn!("could not reseed demonstration parties: {err}");
            }
        }
        Signal::new(store)
    })
}

pub fn use_party_store() -> Signal<AppStore> {
    use_context::<Signal<AppStore>>()
}
