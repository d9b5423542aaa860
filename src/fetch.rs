//! Boundary to the transit authority's web server
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use tracing::{Instrument, info_span};

const USER_AGENT: &str = concat!("ctpcj-timetables/", env!("CARGO_PKG_VERSION"));

/// Raw answer of a GET request, whatever its status
#[derive(Clone, Debug)]
pub struct FetchResponse {
    pub url: Url,
    pub status: StatusCode,
    pub body: String,
}

impl FetchResponse {
    /// The body of a successful response. Every other status is an error, 404 included.
    pub fn into_body(self) -> Result<String, FetchError> {
        if self.status.is_success() {
            Ok(self.body)
        } else {
            Err(FetchError::Status {
                url: self.url,
                status: self.status,
            })
        }
    }

    /// Like [`FetchResponse::into_body`] but a 404 means there's nothing published.
    pub fn into_optional_body(self) -> Result<Option<String>, FetchError> {
        if self.status == StatusCode::NOT_FOUND {
            return Ok(None);
        }

        self.into_body().map(Some)
    }
}

#[async_trait]
pub trait TextFetcher: Send + Sync {
    async fn fetch_text(&self, url: &Url) -> Result<FetchResponse, FetchError>;
}

#[derive(thiserror::Error, Debug)]
pub enum FetchError {
    #[error("error fetching {url}")]
    Transport {
        url: Url,
        #[source]
        source: reqwest::Error,
    },

    #[error("got status {status} fetching {url}")]
    Status { url: Url, status: StatusCode },
}

/// Fetches over plain http with reqwest. Never retries.
pub struct ReqwestFetcher(Client);

impl ReqwestFetcher {
    pub fn new(timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self(client))
    }
}

#[async_trait]
impl TextFetcher for ReqwestFetcher {
    #[tracing::instrument(skip(self, url), fields(url = %url), err)]
    async fn fetch_text(&self, url: &Url) -> Result<FetchResponse, FetchError> {
        let transport = |source| FetchError::Transport {
            url: url.clone(),
            source,
        };

        let response = self
            .0
            .get(url.clone())
            .send()
            .instrument(info_span!("Fetching"))
            .await
            .map_err(transport)?;

        let status = response.status();

        let body = response
            .text()
            .instrument(info_span!("Reading body of response"))
            .await
            .map_err(transport)?;

        Ok(FetchResponse {
            url: url.clone(),
            status,
            body,
        })
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    fn response(status: StatusCode) -> Result<FetchResponse, anyhow::Error> {
        Ok(FetchResponse {
            url: Url::parse("http://ctpcj.ro/orare/csv/orar_25_lv.csv")?,
            status,
            body: "body".to_string(),
        })
    }

    #[test]
    fn not_found_is_only_absent_for_optional_bodies() -> Result<(), anyhow::Error> {
        assert_eq!(response(StatusCode::NOT_FOUND)?.into_optional_body()?, None);
        assert!(matches!(
            response(StatusCode::NOT_FOUND)?.into_body(),
            Err(FetchError::Status {
                status: StatusCode::NOT_FOUND,
                ..
            })
        ));

        Ok(())
    }

    #[test]
    fn server_errors_are_fatal() -> Result<(), anyhow::Error> {
        assert!(matches!(
            response(StatusCode::INTERNAL_SERVER_ERROR)?.into_optional_body(),
            Err(FetchError::Status { .. })
        ));

        Ok(())
    }

    #[test]
    fn success_returns_the_body() -> Result<(), anyhow::Error> {
        assert_eq!(response(StatusCode::OK)?.into_body()?, "body");
        assert_eq!(
            response(StatusCode::OK)?.into_optional_body()?,
            Some("body".to_string())
        );

        Ok(())
    }

    #[test]
    fn builds_a_client() {
        assert!(ReqwestFetcher::new(Duration::from_secs(5)).is_ok());
    }
}
