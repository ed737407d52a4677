use async_trait::async_trait;
use futures_util::StreamExt;
use reqwest::{Client, Response, header::CONTENT_TYPE};
use tokio::time::Instant;
use tracing::{debug, trace};

use crate::error::HttpError;
use crate::metrics::{FailureKind, Mode, ResponseMeta, Sample, Timing};

use super::client::{ClientOptions, build_client};
use super::urls::make_unique_url;

/// Performs one timed attempt. Transport failures are reported inside the
/// returned [`Sample`], never as an error.
#[async_trait]
pub trait Sampler: Send + Sync {
    async fn measure_once(&self, url: &str, mode: Mode) -> Sample;
}

#[derive(Debug, Clone)]
pub struct HttpSampler {
    client: Client,
}

impl HttpSampler {
    /// Creates a sampler with the default measurement client.
    ///
    /// # Errors
    ///
    /// Returns an error when the HTTP client cannot be built.
    pub fn new(options: &ClientOptions) -> Result<Self, HttpError> {
        Ok(Self {
            client: build_client(options)?,
        })
    }

    #[must_use]
    pub const fn with_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Sampler for HttpSampler {
    async fn measure_once(&self, url: &str, mode: Mode) -> Sample {
        let request_url = make_unique_url(url);
        let start = Instant::now();

        let response = match self.client.get(&request_url).send().await {
            Ok(response) => response,
            Err(err) => {
                debug!("{} request to {} failed: {}", mode.as_str(), request_url, err);
                return Sample::failed(request_url, failure_kind(&err));
            }
        };
        let ttfb = start.elapsed();
        let meta = response_meta(&response);

        let total = match mode {
            Mode::Header => {
                // Dropping the response closes the stream without reading the body.
                drop(response);
                ttfb
            }
            Mode::Body => match drain_response_body(response).await {
                Ok(bytes) => {
                    let total = start.elapsed();
                    trace!("Drained {} body bytes from {}", bytes, request_url);
                    total
                }
                Err(err) => {
                    debug!("Reading body of {} failed: {}", request_url, err);
                    return Sample::failed(request_url, failure_kind(&err));
                }
            },
        };

        Sample::completed(request_url, Timing { total, ttfb }, meta)
    }
}

fn failure_kind(err: &reqwest::Error) -> FailureKind {
    if err.is_timeout() {
        FailureKind::Timeout
    } else if err.is_connect() {
        FailureKind::Connect
    } else {
        FailureKind::Transport
    }
}

fn response_meta(response: &Response) -> ResponseMeta {
    let content_type = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned);
    ResponseMeta {
        status: response.status().as_u16(),
        content_type,
    }
}

async fn drain_response_body(response: Response) -> Result<u64, reqwest::Error> {
    let mut stream = response.bytes_stream();
    let mut total_bytes: u64 = 0;
    while let Some(chunk) = stream.next().await {
        let bytes = chunk?;
        total_bytes = total_bytes.saturating_add(u64::try_from(bytes.len()).unwrap_or(u64::MAX));
    }
    Ok(total_bytes)
}
