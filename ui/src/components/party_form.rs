use dioxus::prelude::*;

use polis_common::party::{encode_logo, guess_content_type, PartyDraft};
use polis_common::store::StoreError;

use super::store_state::use_party_store;

const DEFAULT_COLOR: &str = "#2c5aa0";

const IDEOLOGY_OPTIONS: &[&str] = &[
    "Social Democracy",
    "Conservatism",
    "Green Politics",
    "Liberalism",
    "Socialism",
    "Libertarianism",
    "Nationalism",
    "Centrism",
    "Other",
];

/// Party creation form. Calls `on_created` after the store accepts the
/// new party.
#[component]
pub fn PartyForm(on_created: EventHandler<()>) -> Element {
    let mut store = use_party_store();
    let mut name = use_signal(String::new);
    let mut slogan = use_signal(String::new);
    let mut description = use_signal(String::new);
    let mut color = use_signal(|| DEFAULT_COLOR.to_string());
    let mut ideology = use_signal(String::new);
    let mut founder = use_signal(String::new);
    let mut logo = use_signal(|| None::<String>);
    let mut error = use_signal(|| None::<String>);

    let submit = move |_| {
        let draft = PartyDraft {
            name: name.read().clone(),
            slogan: slogan.read().clone(),
            description: description.read().clone(),
            color: color.read().clone(),
            ideology: ideology.read().clone(),
            founder: founder.read().clone(),
            logo: logo.read().clone(),
        };

        let result = store.write().create(draft);
        match result {
            Ok(_) => {
                name.set(String::new());
                slogan.set(String::new());
                description.set(String::new());
                color.set(DEFAULT_COLOR.into());
                ideology.set(String::new());
                founder.set(String::new());
                logo.set(None);
                error.set(None);
                on_created.call(());
            }
            Err(err @ StoreError::Validation { .. }) => {
                error.set(Some(err.to_string()));
            }
            Err(err) => {
                // Party is in memory; only the save failed
                tracing::warn!("saving parties failed: {err}");
                error.set(Some(format!("Party registered but not saved: {err}")));
                on_created.call(());
            }
        }
    };

    rsx! {
        section { class: "party-form",
            h2 { "Register a New Party" }

            div { class: "form-group",
                label { "Party name:" }
                input {
                    r#type: "text",
                    placeholder: "e.g. Unity Party",
                    value: "{name}",
                    oninput: move |evt| name.set(evt.value()),
                }
            }

            div { class: "form-group",
                label { "Slogan:" }
                input {
                    r#type: "text",
                    placeholder: "A short motto...",
                    value: "{slogan}",
                    oninput: move |evt| slogan.set(evt.value()),
                }
            }

            div { class: "form-group",
                label { "Description:" }
                textarea {
                    placeholder: "What does this party stand for?",
                    value: "{description}",
                    oninput: move |evt| description.set(evt.value()),
                }
            }

            div { class: "form-group",
                label { "Ideology:" }
                select {
                    value: "{ideology}",
                    onchange: move |evt| ideology.set(evt.value()),
                    option { value: "", disabled: true, "Select an ideology..." }
                    for opt in IDEOLOGY_OPTIONS {
                        option { value: "{opt}", "{opt}" }
                    }
                }
            }

            div { class: "form-group",
                label { "Founder:" }
                input {
                    r#type: "text",
                    placeholder: "Founder's name",
                    value: "{founder}",
                    oninput: move |evt| founder.set(evt.value()),
                }
            }

            div { class: "form-group",
                label { "Party color:" }
                input {
                    r#type: "color",
                    value: "{color}",
                    oninput: move |evt| color.set(evt.value()),
                }
            }

            div { class: "form-group",
                label { "Logo (optional):" }
                input {
                    r#type: "file",
                    accept: "image/*",
                    onchange: move |evt| {
                        let Some(file) = evt.files().into_iter().next() else {
                            logo.set(None);
                            return;
                        };
                        spawn(async move {
                            let file_name = file.name();
                            match file.read_bytes().await {
                                Ok(bytes) => {
                                    let content_type = guess_content_type(&file_name);
                                    logo.set(Some(encode_logo(content_type, &bytes)));
                                    error.set(None);
                                }
                                Err(err) => {
                                    logo.set(None);
                                    error.set(Some(format!("Could not read the logo file: {err}")));
                                }
                            }
                        });
                    },
                }
                if let Some(preview) = logo.read().as_ref() {
                    div { class: "logo-preview",
                        img { src: "{preview}", alt: "Logo preview" }
                    }
                }
            }

            if let Some(err) = error.read().as_ref() {
                p { class: "form-error", "{err}" }
            }

            button { class: "submit-btn", onclick: submit, "Register Party" }
        }
    }
}
