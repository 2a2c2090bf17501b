//! HTTP probe used by the health check.

use std::error::Error as StdError;
use std::future::Future;
use std::time::Duration;

use reqwest::StatusCode;
use thiserror::Error;
use url::Url;

use crate::config::HealthCheckConfig;

/// Transport-level failure, with the full cause chain flattened to text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct TransportError(pub String);

impl TransportError {
    pub fn from_error(err: &(dyn StdError + 'static)) -> Self {
        let mut message = err.to_string();
        let mut source = err.source();
        while let Some(cause) = source {
            message.push_str(": ");
            message.push_str(&cause.to_string());
            source = cause.source();
        }
        Self(message)
    }
}

/// Issues the single GET behind a health check.
///
/// `Ok(None)` means the exchange completed without producing a response.
pub trait HttpProbe {
    fn get(&self, url: &Url) -> impl Future<Output = Result<Option<StatusCode>, TransportError>> + Send;
}

/// [`HttpProbe`] backed by a `reqwest` client.
#[derive(Debug, Clone)]
pub struct ReqwestProbe {
    client: reqwest::Client,
}

impl ReqwestProbe {
    /// Build a client honouring the debug, proxy and timeout settings.
    ///
    /// Without an explicit proxy the client ignores `HTTP_PROXY` and friends.
    pub fn from_config(config: &HealthCheckConfig) -> Result<Self, reqwest::Error> {
        let mut builder = reqwest::Client::builder().connection_verbose(config.debug);

        builder = match &config.proxy {
            Some(proxy) => builder.proxy(reqwest::Proxy::all(proxy.as_str())?),
            None => builder.no_proxy(),
        };

        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        Ok(Self {
            client: builder.build()?,
        })
    }

    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

impl HttpProbe for ReqwestProbe {
    async fn get(&self, url: &Url) -> Result<Option<StatusCode>, TransportError> {
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| TransportError::from_error(&e))?;

        Ok(Some(response.status()))
    }
}
