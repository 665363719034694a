pub mod config;
pub mod logging;
pub mod mvi;
pub mod search;
pub mod translation;
