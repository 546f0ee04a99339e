//! PyPI JSON API client.

use std::time::Duration;

use anyhow::{anyhow, Context};
use reqwest::StatusCode;
use tracing::debug;

use crate::error::{ReqzError, Result};

use super::release::ReleaseInfo;
use super::PackageIndex;

/// Blocking client for `{index_url}/{name}/json`.
///
/// # Example
///
/// ```no_run
/// use requirementz::registry::{PackageIndex, PypiClient};
/// use std::time::Duration;
///
/// let client = PypiClient::new(PypiClient::DEFAULT_INDEX_URL, Duration::from_secs(30)).unwrap();
/// let info = client.release_info("docopt").unwrap();
/// println!("{} {}", info.info.name, info.latest_version());
/// ```
pub struct PypiClient {
    index_url: String,
    client: reqwest::blocking::Client,
}

impl PypiClient {
    pub const DEFAULT_INDEX_URL: &'static str = "https://pypi.org/pypi";

    /// Create a client for `index_url` with a request timeout.
    pub fn new(index_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("requirementz/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            index_url: index_url.into().trim_end_matches('/').to_string(),
            client,
        })
    }

    /// JSON endpoint for `name`.
    pub fn package_url(&self, name: &str) -> String {
        format!("{}/{}/json", self.index_url, name)
    }

    /// `Ok(None)` when the index answers 404.
    fn fetch(&self, name: &str) -> anyhow::Result<Option<ReleaseInfo>> {
        let url = self.package_url(name);
        debug!("Getting info for '{}' from: {}", name, url);

        let response = self
            .client
            .get(&url)
            .send()
            .with_context(|| format!("Failed to fetch {}", url))?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !status.is_success() {
            return Err(anyhow!("HTTP {} fetching {}", status, url));
        }

        let info = response
            .json::<ReleaseInfo>()
            .with_context(|| format!("Unable to decode JSON data from {}", url))?;
        Ok(Some(info))
    }
}

impl PackageIndex for PypiClient {
    fn release_info(&self, name: &str) -> Result<ReleaseInfo> {
        match self.fetch(name) {
            Ok(Some(info)) => Ok(info),
            Ok(None) => Err(ReqzError::PackageNotFound {
                package: name.to_string(),
            }),
            Err(err) => Err(ReqzError::Remote {
                package: name.to_string(),
                message: format!("{:#}", err),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    const DOCOPT_JSON: &str = r#"{
        "info": {"name": "docopt", "version": "0.6.2", "summary": "Pythonic argument parser"},
        "releases": {"0.6.2": [{"downloads": 3}]}
    }"#;

    fn client_for(server: &MockServer) -> PypiClient {
        PypiClient::new(server.url("/pypi/"), Duration::from_secs(5)).unwrap()
    }

    #[test]
    fn package_url_joins_index() {
        let client = PypiClient::new("https://pypi.example.com/pypi/", Duration::from_secs(1)).unwrap();
        assert_eq!(
            client.package_url("six"),
            "https://pypi.example.com/pypi/six/json"
        );
    }

    #[test]
    fn release_info_success() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET).path("/pypi/docopt/json");
            then.status(200)
                .header("content-type", "application/json")
                .body(DOCOPT_JSON);
        });

        let info = client_for(&server).release_info("docopt").unwrap();

        mock.assert();
        assert_eq!(info.info.name, "docopt");
        assert_eq!(info.latest_version(), "0.6.2");
    }

    #[test]
    fn release_info_404_is_not_found() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/pypi/nope/json");
            then.status(404).body("Not Found");
        });

        let err = client_for(&server).release_info("nope").unwrap_err();
        assert!(matches!(err, ReqzError::PackageNotFound { ref package } if package == "nope"));
    }

    #[test]
    fn release_info_server_error_is_remote() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/pypi/broken/json");
            then.status(500).body("Internal Server Error");
        });

        let err = client_for(&server).release_info("broken").unwrap_err();
        match err {
            ReqzError::Remote { package, message } => {
                assert_eq!(package, "broken");
                assert!(message.contains("500"), "{}", message);
            }
            other => panic!("expected remote error, got {:?}", other),
        }
    }

    #[test]
    fn release_info_bad_json_is_remote() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/pypi/garbled/json");
            then.status(200).body("<html>not json</html>");
        });

        let err = client_for(&server).release_info("garbled").unwrap_err();
        assert!(matches!(err, ReqzError::Remote { .. }));
    }
}
