//! Remote existence checks against the notebook service.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{StatusCode, Url};

pub const DEFAULT_LOOKUP_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, thiserror::Error)]
pub enum LookupError {
    #[error("request to notebook service failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("notebook service answered with status {0}")]
    UnexpectedStatus(StatusCode),

    #[error("invalid notebook service address '{0}'")]
    InvalidBaseUrl(String),
}

/// Outcome of asking whether a notebook exists.
///
/// `NotFound` is a definitive answer about the id; `RemoteError` means the
/// answer could not be obtained and says nothing about the id.
#[derive(Debug)]
pub enum NotebookVerdict {
    Exists,
    NotFound,
    RemoteError(LookupError),
}

impl NotebookVerdict {
    /// Classifies a status returned by the notebook service's get-by-id endpoint.
    ///
    /// A malformed id (400) can never resolve, so it collapses into `NotFound`.
    pub fn from_status(status: StatusCode) -> Self {
        if status.is_success() {
            Self::Exists
        } else if status == StatusCode::NOT_FOUND || status == StatusCode::BAD_REQUEST {
            Self::NotFound
        } else {
            Self::RemoteError(LookupError::UnexpectedStatus(status))
        }
    }
}

#[async_trait]
pub trait NotebookLookup: Send + Sync {
    async fn check_exists(&self, notebook_id: &str) -> NotebookVerdict;
}

/// Asks the notebook service over HTTP. Every check is a live request.
#[derive(Clone)]
pub struct HttpNotebookLookup {
    base_url: Url,
    client: reqwest::Client,
}

impl HttpNotebookLookup {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, LookupError> {
        let base_url =
            Url::parse(base_url).map_err(|_| LookupError::InvalidBaseUrl(base_url.to_string()))?;
        if base_url.cannot_be_a_base() {
            return Err(LookupError::InvalidBaseUrl(base_url.to_string()));
        }

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .connect_timeout(timeout)
            .build()?;

        Ok(Self { base_url, client })
    }

    fn notebook_url(&self, notebook_id: &str) -> Url {
        let mut url = self.base_url.clone();
        // Checked in `new`: the base can always carry path segments.
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().extend(["notebooks", notebook_id]);
        }
        url
    }
}

#[async_trait]
impl NotebookLookup for HttpNotebookLookup {
    async fn check_exists(&self, notebook_id: &str) -> NotebookVerdict {
        // Dot segments are normalised out of the path and would address the list endpoint.
        if matches!(notebook_id, "." | "..") {
            tracing::debug!("Notebook id '{}' cannot name a notebook", notebook_id);
            return NotebookVerdict::NotFound;
        }

        let url = self.notebook_url(notebook_id);
        tracing::debug!("Checking notebook existence at {}", url);

        match self.client.get(url).send().await {
            Ok(response) => {
                let verdict = NotebookVerdict::from_status(response.status());
                tracing::debug!(
                    "Notebook service answered {} for '{}'",
                    response.status(),
                    notebook_id
                );
                verdict
            }
            Err(e) => NotebookVerdict::RemoteError(LookupError::Transport(e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn mock_notebook_service(status: u16) -> MockServer {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/notebooks/abc"))
            .respond_with(ResponseTemplate::new(status))
            .mount(&server)
            .await;
        server
    }

    async fn check(server: &MockServer) -> NotebookVerdict {
        HttpNotebookLookup::new(&server.uri(), Duration::from_secs(2))
            .unwrap()
            .check_exists("abc")
            .await
    }

    #[tokio::test]
    async fn success_status_means_exists() {
        let server = mock_notebook_service(200).await;
        assert!(matches!(check(&server).await, NotebookVerdict::Exists));
    }

    #[tokio::test]
    async fn not_found_and_malformed_id_both_mean_not_found() {
        for status in [404, 400] {
            let server = mock_notebook_service(status).await;
            assert!(
                matches!(check(&server).await, NotebookVerdict::NotFound),
                "status {status}"
            );
        }
    }

    #[tokio::test]
    async fn server_errors_are_remote_errors() {
        for status in [500, 502, 503] {
            let server = mock_notebook_service(status).await;
            assert!(
                matches!(
                    check(&server).await,
                    NotebookVerdict::RemoteError(LookupError::UnexpectedStatus(_))
                ),
                "status {status}"
            );
        }
    }

    #[tokio::test]
    async fn unexpected_client_status_is_a_remote_error() {
        let server = mock_notebook_service(401).await;
        assert!(matches!(
            check(&server).await,
            NotebookVerdict::RemoteError(_)
        ));
    }

    #[tokio::test]
    async fn unreachable_service_is_a_remote_error() {
        // A dedicated (non-pooled) server, so dropping it actually stops the listener.
        let server = MockServer::builder().start().await;
        let uri = server.uri();
        drop(server);

        let lookup = HttpNotebookLookup::new(&uri, Duration::from_secs(2)).unwrap();
        assert!(matches!(
            lookup.check_exists("abc").await,
            NotebookVerdict::RemoteError(LookupError::Transport(_))
        ));
    }

    #[tokio::test]
    async fn slow_service_times_out_as_remote_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(5)))
            .mount(&server)
            .await;

        let lookup = HttpNotebookLookup::new(&server.uri(), Duration::from_millis(200)).unwrap();
        assert!(matches!(
            lookup.check_exists("abc").await,
            NotebookVerdict::RemoteError(LookupError::Transport(_))
        ));
    }

    #[tokio::test]
    async fn dot_segment_ids_never_reach_the_list_endpoint() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/notebooks"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let lookup = HttpNotebookLookup::new(&server.uri(), Duration::from_secs(2)).unwrap();
        for notebook_id in [".", ".."] {
            assert!(
                matches!(
                    lookup.check_exists(notebook_id).await,
                    NotebookVerdict::NotFound
                ),
                "notebookId {notebook_id}"
            );
        }
    }

    #[test]
    fn id_is_encoded_as_a_single_segment() {
        let lookup =
            HttpNotebookLookup::new("http://notebooks.local:3000/", DEFAULT_LOOKUP_TIMEOUT)
                .unwrap();
        let url = lookup.notebook_url("a/b c");
        assert_eq!(url.path(), "/notebooks/a%2Fb%20c");
    }

    #[test]
    fn base_path_is_preserved() {
        let lookup =
            HttpNotebookLookup::new("http://gateway.local/api", DEFAULT_LOOKUP_TIMEOUT).unwrap();
        assert_eq!(lookup.notebook_url("n1").path(), "/api/notebooks/n1");
    }

    #[test]
    fn rejects_unusable_base_address() {
        assert!(matches!(
            HttpNotebookLookup::new("not a url", DEFAULT_LOOKUP_TIMEOUT),
            Err(LookupError::InvalidBaseUrl(_))
        ));
        assert!(matches!(
            HttpNotebookLookup::new("mailto:notebooks@example.com", DEFAULT_LOOKUP_TIMEOUT),
            Err(LookupError::InvalidBaseUrl(_))
        ));
    }
}
