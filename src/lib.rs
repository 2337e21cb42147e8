pub mod app;
pub mod config;
pub mod installer;
pub mod migration;
pub mod setup;
pub mod shared;
pub mod templates;
