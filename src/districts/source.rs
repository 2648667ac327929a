//! Where the district list comes from: a JSON array of identifier strings.

use std::path::{Path, PathBuf};

use futures::future::{BoxFuture, FutureExt};
use reqwest::Client;
use thiserror::Error;
use tracing::debug;
use url::Url;

/// Why a district list could not be loaded.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{url} returned HTTP {status}")]
    Status { url: Url, status: u16 },

    #[error("district list is not a JSON array of strings: {0}")]
    Parse(#[from] serde_json::Error),
}

/// A resource that yields the full district list.
pub trait DistrictSource: Send + Sync {
    fn fetch(&self) -> BoxFuture<'_, Result<Vec<String>, LoadError>>;

    /// Short description for logs
    fn describe(&self) -> String;
}

/// Pick a source for a configured location.
///
/// `http(s)://` locations are fetched over HTTP, anything else is a file path.
pub fn from_location(location: &str) -> Box<dyn DistrictSource> {
    match Url::parse(location) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => Box::new(HttpSource::new(url)),
        _ => Box::new(FileSource::new(location)),
    }
}

/// Decode the district resource body.
pub fn parse_districts(bytes: &[u8]) -> Result<Vec<String>, LoadError> {
    Ok(serde_json::from_slice(bytes)?)
}

/// District list stored in a local JSON file
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl DistrictSource for FileSource {
    fn fetch(&self) -> BoxFuture<'_, Result<Vec<String>, LoadError>> {
        async move {
            debug!("Reading districts from {}", self.path.display());
            let bytes = tokio::fs::read(&self.path)
                .await
                .map_err(|source| LoadError::Io {
                    path: self.path.clone(),
                    source,
                })?;
            parse_districts(&bytes)
        }
        .boxed()
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// District list served over HTTP
#[derive(Debug, Clone)]
pub struct HttpSource {
    client: Client,
    url: Url,
}

impl HttpSource {
    pub fn new(url: Url) -> Self {
        Self::with_client(Client::new(), url)
    }

    pub fn with_client(client: Client, url: Url) -> Self {
        Self { client, url }
    }
}

impl DistrictSource for HttpSource {
    fn fetch(&self) -> BoxFuture<'_, Result<Vec<String>, LoadError>> {
        async move {
            debug!("Fetching districts from {}", self.url);
            let response = self.client.get(self.url.clone()).send().await?;

            if !response.status().is_success() {
                return Err(LoadError::Status {
                    url: self.url.clone(),
                    status: response.status().as_u16(),
                });
            }

            let bytes = response.bytes().await?;
            parse_districts(&bytes)
        }
        .boxed()
    }

    fn describe(&self) -> String {
        self.url.to_string()
    }
}

/// In-memory district list
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    districts: Vec<String>,
}

impl StaticSource {
    pub fn new<I, S>(districts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            districts: districts.into_iter().map(Into::into).collect(),
        }
    }
}

impl DistrictSource for StaticSource {
    fn fetch(&self) -> BoxFuture<'_, Result<Vec<String>, LoadError>> {
        futures::future::ready(Ok(self.districts.clone())).boxed()
    }

    fn describe(&self) -> String {
        format!("static list ({} districts)", self.districts.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    use axum::{http::StatusCode, routing::get, Router};

    async fn serve(router: Router) -> Url {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        Url::parse(&format!("http://{}/korea_districts.json", addr)).unwrap()
    }

    #[test]
    fn test_parse_districts() {
        let parsed = parse_districts(r#"["서울특별시", "서울특별시-종로구"]"#.as_bytes()).unwrap();
        assert_eq!(parsed, vec!["서울특별시", "서울특별시-종로구"]);

        assert!(matches!(
            parse_districts(br#"{"districts": []}"#),
            Err(LoadError::Parse(_))
        ));
        assert!(matches!(parse_districts(b"[1, 2]"), Err(LoadError::Parse(_))));
    }

    #[tokio::test]
    async fn test_file_source() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(r#"["부산광역시-해운대구"]"#.as_bytes()).unwrap();

        let source = FileSource::new(file.path());
        assert_eq!(source.fetch().await.unwrap(), vec!["부산광역시-해운대구"]);
    }

    #[tokio::test]
    async fn test_file_source_missing() {
        let source = FileSource::new("/nonexistent/korea_districts.json");
        assert!(matches!(source.fetch().await, Err(LoadError::Io { .. })));
    }

    #[tokio::test]
    async fn test_http_source() {
        let url = serve(Router::new().route(
            "/korea_districts.json",
            get(|| async { r#"["대전광역시-유성구"]"# }),
        ))
        .await;

        let source = HttpSource::new(url);
        assert_eq!(source.fetch().await.unwrap(), vec!["대전광역시-유성구"]);
    }

    #[tokio::test]
    async fn test_http_source_error_status() {
        let url = serve(Router::new().route(
            "/korea_districts.json",
            get(|| async { (StatusCode::NOT_FOUND, "missing") }),
        ))
        .await;

        let source = HttpSource::new(url);
        assert!(matches!(
            source.fetch().await,
            Err(LoadError::Status { status: 404, .. })
        ));
    }

    #[test]
    fn test_from_location() {
        let http = from_location("https://example.com/korea_districts.json");
        assert_eq!(http.describe(), "https://example.com/korea_districts.json");

        let file = from_location("public/korea_districts.json");
        assert_eq!(file.describe(), "public/korea_districts.json");
    }
}
