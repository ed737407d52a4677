use reqwest::ClientBuilder;

/// Staging hosts often serve self-signed certificates; measurement accepts
/// them. Callers needing verification pass their own client to
/// `HttpSampler::with_client`.
pub(super) fn apply_tls_settings(builder: ClientBuilder) -> ClientBuilder {
    builder
        .danger_accept_invalid_certs(true)
        .danger_accept_invalid_hostnames(true)
}
