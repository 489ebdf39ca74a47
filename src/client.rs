//! HTTP session shared by every fetch
//!
//! One [`reqwest::Client`] is built at session construction carrying the
//! credential cookie, the referer Pixiv's CDN requires, and the optional
//! proxy. It is cheap to clone and safe to share across workers.

use crate::config::Config;
use crate::error::{Error, Result};
use reqwest::header::{ACCEPT_LANGUAGE, COOKIE, HeaderMap, HeaderValue, REFERER, USER_AGENT};
use serde::de::DeserializeOwned;

const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (X11; Linux x86_64; rv:109.0) Gecko/20100101 Firefox/116.0";

/// HTTP client carrying the session's credential, headers, and proxy
#[derive(Clone, Debug)]
pub struct HttpClient {
    inner: reqwest::Client,
}

impl HttpClient {
    /// Build a client from the session configuration
    ///
    /// Fails with [`Error::Config`] when the cookie cannot be used as a
    /// header value, and with [`Error::Network`] when the proxy URL is
    /// invalid.
    pub fn new(config: &Config) -> Result<Self> {
        let mut headers = HeaderMap::new();
        let cookie = HeaderValue::from_str(&config.cookie).map_err(|_| Error::Config {
            message: "cookie contains characters not allowed in a header value".to_string(),
            key: Some("cookie".to_string()),
        })?;
        headers.insert(COOKIE, cookie);
        headers.insert(REFERER, HeaderValue::from_static("https://www.pixiv.net/"));
        headers.insert(USER_AGENT, HeaderValue::from_static(DEFAULT_USER_AGENT));
        headers.insert(
            ACCEPT_LANGUAGE,
            HeaderValue::from_static("zh-CN, zh;q=0.9, en;q=0.8, en-GB;q=0.7, en-US;q=0.6"),
        );

        let mut builder = reqwest::Client::builder().default_headers(headers);
        if let Some(proxy) = &config.proxy {
            builder = builder.proxy(reqwest::Proxy::all(proxy)?);
        }

        Ok(Self {
            inner: builder.build()?,
        })
    }

    /// Issue one GET request, treating non-success HTTP statuses as errors
    pub async fn get(&self, url: &str) -> Result<reqwest::Response> {
        tracing::trace!(url, "GET");
        let response = self.inner.get(url).send().await?;
        Ok(response.error_for_status()?)
    }

    /// Issue one GET request and parse the response body as JSON
    pub async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        Ok(self.get(url).await?.json().await?)
    }
}
