pub mod app;
pub mod local_storage;
pub mod party_card;
pub mod party_form;
pub mod party_grid;
pub mod store_state;
