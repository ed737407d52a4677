//! URL construction and timed HTTP sampling.
mod client;
mod sampler;
mod tls;
mod urls;


pub use client::{ClientOptions, build_client};
pub use sampler::{HttpSampler, Sampler};
pub use urls::{Endpoint, UNIQUE_PARAM, make_unique_url, resolve_base_url, resolve_pages};
