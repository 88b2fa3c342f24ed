use dioxus::prelude::*;

use polis_common::party::Party;

use super::store_state::use_party_store;

/// A single party card with logo, details and the support button.
#[component]
pub fn PartyCard(party: Party) -> Element {
    let mut store = use_party_store();
    let mut just_supported = use_signal(|| false);

    let party_id = party.id;
    let initial = party.name.chars().next().unwrap_or('?');
    let founded = party.created_at.format("%-m/%-d/%Y");

    let support = move |_| {
        if let Err(err) = store.write().support(party_id) {
            tracing::warn!("support failed for party {party_id}: {err}");
            return;
        }
        // Brief confirmation flash on the button
        just_supported.set(true);
        #[cfg(target_family = "wasm")]
        spawn(async move {
            gloo_timers::future::TimeoutFuture::new(1_500).await;
            just_supported.set(false);
        });
    };

    rsx! {
        div { class: "party-card", style: "border-left-color: {party.color};",
            div { class: "party-header",
                if let Some(logo) = party.logo.as_ref() {
                    img { class: "party-logo", src: "{logo}", alt: "Logo of {party.name}" }
                } else {
                    // Deterministic fallback: first letter on the party color
                    div { class: "party-logo party-logo-fallback",
                        style: "background: {party.color};",
                        "{initial}"
                    }
                }
                div { class: "party-info",
                    h3 { "{party.name}" }
                    p { class: "party-slogan", "\"{party.slogan}\"" }
                }
            }
            div { class: "party-details",
                p { class: "party-description", "{party.description}" }
                div { class: "party-meta",
                    span { class: "meta-item", "Leader: {party.founder}" }
                    span { class: "meta-item", "{party.ideology}" }
                    span { class: "meta-item", "Founded: {founded}" }
                }
            }
            div { class: "party-footer",
                span { class: "support-count", "{party.supports} supporters" }
                if *just_supported.read() {
                    button { class: "support-btn supported", disabled: true, "Supported" }
                } else {
                    button { class: "support-btn", onclick: support, "Support" }
                }
            }
        }
    }
}
