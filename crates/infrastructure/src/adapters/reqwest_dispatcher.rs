//! Dispatcher implementation using reqwest.
//!
//! Applies method, full URL, headers, credentials and body from a
//! [`RequestDefinition`] and turns the reply into a [`ResponseRecord`].

use std::collections::BTreeMap;
use std::error::Error as _;
use std::time::{Duration, Instant};

use chrono::Utc;
use khabari_application::ports::{DispatchError, Dispatcher};
use khabari_domain::{Credentials, HttpMethod, RequestDefinition, ResponseRecord};
use reqwest::{Client, Method, RequestBuilder, Url};
use tracing::debug;

use crate::settings::AppConfig;

/// HTTP dispatcher backed by `reqwest::Client`.
pub struct ReqwestDispatcher {
    client: Client,
    timeout_ms: u64,
    max_redirects: usize,
}

impl ReqwestDispatcher {
    /// Creates a dispatcher with the given limits.
    ///
    /// # Errors
    ///
    /// Returns an error if the client cannot be created.
    pub fn new(
        timeout_ms: u64,
        max_redirects: usize,
        user_agent: &str,
    ) -> Result<Self, DispatchError> {
        let client = Client::builder()
            .user_agent(user_agent)
            .redirect(reqwest::redirect::Policy::limited(max_redirects))
            .build()
            .map_err(|e| DispatchError::Other(e.to_string()))?;

        Ok(Self {
            client,
            timeout_ms,
            max_redirects,
        })
    }

    /// Creates a dispatcher from the application configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the client cannot be created.
    pub fn from_config(config: &AppConfig) -> Result<Self, DispatchError> {
        Self::new(
            config.request_timeout_ms,
            config.max_redirects,
            &config.user_agent,
        )
    }

    /// Converts domain `HttpMethod` to reqwest `Method`.
    const fn to_reqwest_method(method: HttpMethod) -> Method {
        match method {
            HttpMethod::Get => Method::GET,
            HttpMethod::Post => Method::POST,
            HttpMethod::Put => Method::PUT,
            HttpMethod::Patch => Method::PATCH,
            HttpMethod::Delete => Method::DELETE,
            HttpMethod::Head => Method::HEAD,
            HttpMethod::Options => Method::OPTIONS,
        }
    }

    /// Adds the auth header. Incomplete credentials add nothing.
    fn apply_credentials(builder: RequestBuilder, credentials: Credentials) -> RequestBuilder {
        match credentials {
            Credentials::None => builder,
            Credentials::Basic { username, password } => {
                builder.basic_auth(username, Some(password))
            }
            Credentials::Bearer { token } => builder.bearer_auth(token),
            Credentials::ApiKey { key, value } => builder.header(key, value),
        }
    }

    /// Maps reqwest errors to `DispatchError`.
    fn map_error(&self, error: &reqwest::Error) -> DispatchError {
        if error.is_timeout() {
            return DispatchError::Timeout {
                timeout_ms: self.timeout_ms,
            };
        }

        if error.is_redirect() {
            return DispatchError::TooManyRedirects {
                max: self.max_redirects,
            };
        }

        let message = error_chain(error);

        if error.is_connect() {
            let host = error
                .url()
                .and_then(Url::host_str)
                .unwrap_or("unknown")
                .to_string();
            let lower = message.to_lowercase();
            if lower.contains("dns") || lower.contains("resolve") {
                return DispatchError::DnsError { host, message };
            }
            if lower.contains("refused") {
                let port = error
                    .url()
                    .and_then(Url::port_or_known_default)
                    .unwrap_or(80);
                return DispatchError::ConnectionRefused { host, port };
            }
            return DispatchError::ConnectionFailed(message);
        }

        if error.is_body() {
            return DispatchError::InvalidBody(message);
        }

        DispatchError::Other(message)
    }
}

/// Joins an error with all of its sources.
fn error_chain(error: &reqwest::Error) -> String {
    let mut message = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

impl Dispatcher for ReqwestDispatcher {
    async fn dispatch(&self, request: &RequestDefinition) -> Result<ResponseRecord, DispatchError> {
        let url = request.full_url();
        let parsed_url =
            Url::parse(&url).map_err(|e| DispatchError::InvalidUrl(format!("{e}: {url}")))?;

        let mut builder = self
            .client
            .request(Self::to_reqwest_method(request.method), parsed_url)
            .timeout(Duration::from_millis(self.timeout_ms));

        for (name, value) in request.headers.iter() {
            builder = builder.header(name, value);
        }
        builder = Self::apply_credentials(builder, request.auth.credentials());
        if request.sends_body() {
            builder = builder.body(request.body.clone());
        }

        debug!(method = %request.method, url = %url, "dispatching");
        let start = Instant::now();

        let response = builder.send().await.map_err(|e| self.map_error(&e))?;

        let status = response.status();
        let headers: BTreeMap<String, String> = response
            .headers()
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_str().unwrap_or("<binary>").to_string()))
            .collect();

        let body = response.bytes().await.map_err(|e| self.map_error(&e))?;
        let elapsed = start.elapsed();

        Ok(ResponseRecord::received(
            status.as_u16(),
            status.canonical_reason().unwrap_or_default(),
            headers,
            &body,
            elapsed,
            Utc::now(),
        ))
    }
}
