pub mod party;
pub mod storage;
pub mod store;
