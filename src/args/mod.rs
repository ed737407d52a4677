//! CLI argument types and parsing helpers.
mod cli;
mod defaults;
pub(crate) mod parsers;
mod types;

#[cfg(test)]
mod test_support;

pub use cli::RunArgs;
pub use types::PositiveU64;

pub(crate) use defaults::{
    DEFAULT_CONFIG_FILES, DEFAULT_CONNECT_TIMEOUT, DEFAULT_OUTPUT_PATH, DEFAULT_REQUEST_TIMEOUT,
    DEFAULT_USER_AGENT,
};
