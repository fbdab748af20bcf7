pub mod config;
pub mod history;
pub mod profile;
pub mod session;
pub mod stats;
