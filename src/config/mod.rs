//! Configuration loading and merging with CLI overrides.
mod loader;
mod settings;
pub mod types;


pub use loader::{load_config, load_config_file};
pub use settings::{RunSettings, resolve_settings};
