#[path = "config/mod.rs"]
pub mod config_mod;
pub use config_mod as config;
pub mod assets;
pub mod bootstrap;
pub mod classifiers;
pub mod storage;
