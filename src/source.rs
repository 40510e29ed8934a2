//! Where manifest documents and skin images come from.

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};

use std::time::Duration;



/// Fetches the full body behind a URL.
/// Implemented over HTTP by [`HttpSource`]; any other implementation can stand in for it.
#[async_trait]
pub trait Source: Send + Sync {
  async fn fetch(&self, url: &str) -> Result<Vec<u8>, crate::Error>;
}

/// A [`Source`] sending plain GET requests with a fixed `User-Agent` header.
#[derive(Debug, Clone)]
pub struct HttpSource {
  client: reqwest::Client
}

impl HttpSource {
  const CONNECT_TIMEOUT: Duration = Duration::from_secs(30);

  pub fn new(user_agent: &str) -> Result<Self, crate::Error> {
    let user_agent = HeaderValue::from_str(user_agent)
      .map_err(|_| crate::Error::InvalidHeader(user_agent.to_owned()))?;
    let mut headers = HeaderMap::new();
    headers.insert(USER_AGENT, user_agent);
    let client = reqwest::Client::builder()
      .default_headers(headers)
      .connect_timeout(Self::CONNECT_TIMEOUT)
      .build()?;
    Ok(HttpSource { client })
  }

  /// Wraps an already configured client. Its default headers are used as is.
  pub fn from_client(client: reqwest::Client) -> Self {
    HttpSource { client }
  }
}

#[async_trait]
impl Source for HttpSource {
  async fn fetch(&self, url: &str) -> Result<Vec<u8>, crate::Error> {
    trace!(%url, "GET");
    let response = self.client.get(url).send().await?;
    let status = response.status();
    if !status.is_success() {
      return Err(crate::Error::StatusError { url: url.to_owned(), status: status.as_u16() });
    };

    Ok(response.bytes().await?.to_vec())
  }
}
