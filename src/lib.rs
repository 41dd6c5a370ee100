// Library root: re-exports all modules so integration tests and external
// consumers can access the crate's public API.

pub mod catalog;
pub mod club;
pub mod config;
pub mod inventory;
pub mod marketplace;
pub mod player;
pub mod scoring;
pub mod service;
pub mod squad;
pub mod store;
