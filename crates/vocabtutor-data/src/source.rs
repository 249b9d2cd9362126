//! Vocabulary sources: a local directory tree or an HTTP server.

use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::instrument;

use vocabtutor_core::config::DataConfig;
use vocabtutor_core::error::LoadError;
use vocabtutor_core::parser::vocab_path;
use vocabtutor_core::traits::VocabSource;

/// Reads `<root>/<lang>/<level>.dat`.
#[derive(Debug, Clone)]
pub struct DirectorySource {
    root: PathBuf,
}

impl DirectorySource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

#[async_trait]
impl VocabSource for DirectorySource {
    fn location(&self, lang: &str, level: &str) -> String {
        self.root.join(vocab_path(lang, level)).display().to_string()
    }

    async fn fetch(&self, lang: &str, level: &str) -> Result<String, LoadError> {
        let path = self.location(lang, level);
        tokio::fs::read_to_string(&path)
            .await
            .map_err(|e| LoadError::Unavailable {
                path,
                reason: e.to_string(),
            })
    }
}

/// Fetches `<base_url>/data/<lang>/<level>.dat` over HTTP.
///
/// No timeout is applied; a hanging server leaves the caller loading.
pub struct HttpSource {
    base_url: String,
    client: reqwest::Client,
}

impl HttpSource {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl VocabSource for HttpSource {
    fn location(&self, lang: &str, level: &str) -> String {
        format!("{}/data/{}", self.base_url, vocab_path(lang, level))
    }

    #[instrument(skip(self))]
    async fn fetch(&self, lang: &str, level: &str) -> Result<String, LoadError> {
        let url = self.location(lang, level);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| LoadError::Unavailable {
                path: url.clone(),
                reason: e.without_url().to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(LoadError::Status {
                path: url,
                status: status.as_u16(),
            });
        }

        response.text().await.map_err(|e| LoadError::Unavailable {
            path: url,
            reason: e.without_url().to_string(),
        })
    }
}

/// Build the vocabulary source described by `[data]`.
pub fn source_from_config(config: &DataConfig) -> Arc<dyn VocabSource> {
    match config {
        DataConfig::Directory { path } => Arc::new(DirectorySource::new(path.clone())),
        DataConfig::Http { base_url } => Arc::new(HttpSource::new(base_url)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vocabtutor_core::source::load_vocabulary;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn directory_source_reads_lang_level_file() {
        let dir = tempfile::tempdir().unwrap();
        let lang_dir = dir.path().join("nederlands");
        std::fs::create_dir_all(&lang_dir).unwrap();
        std::fs::write(
            lang_dir.join("B1.dat"),
            "[Verkeer]\nfiets|bicycle|Ik fiets naar werk\n",
        )
        .unwrap();

        let source = DirectorySource::new(dir.path());
        let vocab = load_vocabulary(&source, "nederlands", "B1").await.unwrap();
        assert_eq!(vocab.len(), 1);
        assert_eq!(vocab.entries()[0].topic, "Verkeer");
    }

    #[tokio::test]
    async fn directory_source_missing_file_carries_path() {
        let dir = tempfile::tempdir().unwrap();
        let source = DirectorySource::new(dir.path());

        let err = source.fetch("francais", "C1").await.unwrap_err();
        assert!(matches!(err, LoadError::Unavailable { .. }));
        assert!(err.path().ends_with("C1.dat"));
        assert!(err.path().contains("francais"));
    }

    #[tokio::test]
    async fn http_source_fetches_data_path() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/data/francais/B1.dat"))
            .respond_with(ResponseTemplate::new(200).set_body_string("[Food]\npomme|apple\n"))
            .expect(1)
            .mount(&server)
            .await;

        let source = HttpSource::new(&format!("{}/", server.uri()));
        let vocab = load_vocabulary(&source, "francais", "B1").await.unwrap();
        assert_eq!(vocab.topics(), vec!["Food".to_string()]);
    }

    #[tokio::test]
    async fn http_source_status_error() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let source = HttpSource::new(&server.uri());
        let err = source.fetch("nederlands", "A2").await.unwrap_err();
        assert_eq!(
            err,
            LoadError::Status {
                path: format!("{}/data/nederlands/A2.dat", server.uri()),
                status: 404,
            }
        );
    }

    #[tokio::test]
    async fn http_source_unreachable() {
        let source = HttpSource::new("http://127.0.0.1:1");
        let err = source.fetch("nederlands", "A2").await.unwrap_err();
        assert!(matches!(err, LoadError::Unavailable { .. }));
        assert_eq!(err.path(), "http://127.0.0.1:1/data/nederlands/A2.dat");
    }

    #[test]
    fn config_selects_source() {
        let source = source_from_config(&DataConfig::Http {
            base_url: "https://vocab.example.com".into(),
        });
        assert_eq!(
            source.location("francais", "B2"),
            "https://vocab.example.com/data/francais/B2.dat"
        );

        let source = source_from_config(&DataConfig::Directory {
            path: PathBuf::from("words"),
        });
        assert_eq!(
            source.location("nederlands", "A2"),
            PathBuf::from("words")
                .join("nederlands/A2.dat")
                .display()
                .to_string()
        );
    }
}
