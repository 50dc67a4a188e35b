//! Where the session's leads come from.

use crate::config::ConsoleConfig;
use crate::error::{ConsoleError, Result};
use crate::model::Lead;
use std::path::{Path, PathBuf};
use std::sync::Once;
use std::time::Duration;

#[derive(Debug, Clone)]
pub enum LeadSource {
    /// A JSON array of leads on disk.
    Fixture { path: PathBuf, delay: Duration },
    /// An endpoint answering `GET` with a JSON array of leads.
    Http { url: url::Url, delay: Duration },
    /// A fixed list, for tests and demos.
    Static { leads: Vec<Lead>, delay: Duration },
}

impl LeadSource {
    pub fn from_config(config: &ConsoleConfig, project_root: &Path) -> Result<Self> {
        let delay = config.source.delay();
        Ok(match config.source.parsed_url()? {
            Some(url) => LeadSource::Http { url, delay },
            None => LeadSource::Fixture {
                path: config.fixture_path(project_root),
                delay,
            },
        })
    }

    pub fn describe(&self) -> String {
        match self {
            LeadSource::Fixture { path, .. } => path.display().to_string(),
            LeadSource::Http { url, .. } => url.to_string(),
            LeadSource::Static { leads, .. } => format!("{} static leads", leads.len()),
        }
    }

    /// Fetch every lead, in source order. No retries.
    pub async fn fetch_all(&self) -> Result<Vec<Lead>> {
        tracing::debug!(source = %self.describe(), "Fetching leads");
        let leads = match self {
            LeadSource::Fixture { path, delay } => {
                tokio::time::sleep(*delay).await;
                let content = tokio::fs::read(path).await.map_err(|e| {
                    ConsoleError::Transport(format!("{}: {}", path.display(), e))
                })?;
                decode(&content)?
            }
            LeadSource::Http { url, delay } => {
                tokio::time::sleep(*delay).await;
                fetch_http(url).await?
            }
            LeadSource::Static { leads, delay } => {
                tokio::time::sleep(*delay).await;
                leads.clone()
            }
        };
        tracing::info!(count = leads.len(), "Fetched leads");
        Ok(leads)
    }
}

fn decode(content: &[u8]) -> Result<Vec<Lead>> {
    serde_json::from_slice(content)
        .map_err(|e| ConsoleError::Transport(format!("Unexpected response body: {}", e)))
}

fn install_crypto_provider() {
    static INSTALL: Once = Once::new();
    INSTALL.call_once(|| {
        let _ = rustls::crypto::ring::default_provider().install_default();
    });
}

async fn fetch_http(url: &url::Url) -> Result<Vec<Lead>> {
    install_crypto_provider();
    let transport = |e: reqwest::Error| ConsoleError::Transport(e.to_string());

    let client = reqwest::Client::builder().build().map_err(transport)?;
    let response = client
        .get(url.as_str())
        .send()
        .await
        .map_err(transport)?;
    if !response.status().is_success() {
        return Err(ConsoleError::Transport(format!(
            "Failed to fetch data. {} returned {}",
            url,
            response.status()
        )));
    }
    let body = response.bytes().await.map_err(transport)?;
    decode(&body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_fixture_fetch_preserves_order() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("leads.json");
        std::fs::write(
            &path,
            r#"[
                {"id":"2","name":"Bob","company":"Beta","email":"b@beta.io","source":"Web","score":10,"status":"New"},
                {"id":"1","name":"Ann","company":"Acme","email":"a@acme.com","source":"Web","score":90,"status":"Qualified"}
            ]"#,
        )
        .unwrap();

        let source = LeadSource::Fixture {
            path,
            delay: Duration::ZERO,
        };
        let leads = source.fetch_all().await.unwrap();
        assert_eq!(leads.len(), 2);
        assert_eq!(leads[0].id, "2");
    }

    #[tokio::test]
    async fn test_fixture_accepts_numeric_ids() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("leads.json");
        std::fs::write(
            &path,
            r#"[
                {"id":7,"name":"Sam","company":"Foo","email":"sam@foo.com","source":"Web","score":70,"status":"New"},
                {"id":"b-2","name":"Bob","company":"Beta","email":"b@beta.io","source":"Web","score":10,"status":"New"}
            ]"#,
        )
        .unwrap();

        let source = LeadSource::Fixture {
            path,
            delay: Duration::ZERO,
        };
        let leads = source.fetch_all().await.unwrap();
        assert_eq!(leads[0].id, "7");
        assert_eq!(leads[1].id, "b-2");
    }

    #[tokio::test]
    async fn test_missing_fixture_is_transport_error() {
        let temp_dir = TempDir::new().unwrap();
        let source = LeadSource::Fixture {
            path: temp_dir.path().join("absent.json"),
            delay: Duration::ZERO,
        };
        assert!(matches!(
            source.fetch_all().await,
            Err(ConsoleError::Transport(_))
        ));
    }

    #[tokio::test]
    async fn test_garbage_fixture_is_transport_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("leads.json");
        std::fs::write(&path, "<html>502</html>").unwrap();

        let source = LeadSource::Fixture {
            path,
            delay: Duration::ZERO,
        };
        assert!(matches!(
            source.fetch_all().await,
            Err(ConsoleError::Transport(_))
        ));
    }

    #[test]
    fn test_from_config_prefers_url() {
        let mut config = ConsoleConfig::default();
        let root = Path::new("/tmp/project");
        assert!(matches!(
            LeadSource::from_config(&config, root).unwrap(),
            LeadSource::Fixture { .. }
        ));

        config.source.url = Some("http://localhost:3000/api/leads".to_string());
        assert!(matches!(
            LeadSource::from_config(&config, root).unwrap(),
            LeadSource::Http { .. }
        ));
    }
}
