use std::time::Duration;

use reqwest::{Client, redirect};

use crate::args::DEFAULT_USER_AGENT;
use crate::error::HttpError;

use super::tls::apply_tls_settings;

#[derive(Debug, Clone, Copy)]
pub struct ClientOptions {
    pub request_timeout: Duration,
    pub connect_timeout: Duration,
    /// Reuse connections between attempts instead of dialing each time.
    pub keepalive: bool,
}

/// Builds the measurement client: bounded timeouts, no redirects followed,
/// certificate checks off.
///
/// # Errors
///
/// Returns an error when the TLS backend cannot be initialized.
pub fn build_client(options: &ClientOptions) -> Result<Client, HttpError> {
    let mut builder = Client::builder()
        .timeout(options.request_timeout)
        .connect_timeout(options.connect_timeout)
        .user_agent(DEFAULT_USER_AGENT)
        .redirect(redirect::Policy::none());

    if !options.keepalive {
        builder = builder
            .pool_max_idle_per_host(0)
            .pool_idle_timeout(Some(Duration::from_secs(0)));
    }

    apply_tls_settings(builder)
        .build()
        .map_err(|err| HttpError::BuildClientFailed { source: err })
}
