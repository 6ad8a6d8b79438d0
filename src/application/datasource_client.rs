// Datasource client - the public operations of the Simple JSON protocol
use crate::application::executor::RequestExecutor;
use crate::application::normalizer::Endpoint;
use crate::application::transport::Transport;
use crate::domain::connection::Connection;
use crate::domain::error::ClientResult;
use crate::domain::requests::{
    AnnotationRequest, QueryRequest, SearchRequest, TagKeysRequest, TagValuesRequest, TimeRange,
};
use crate::domain::response::DatasourceResponse;
use crate::domain::settings::{self, FidelityLevel, Settings};
use crate::infrastructure::config::ClientConfig;
use crate::infrastructure::reqwest_transport::ReqwestTransport;
use std::sync::Arc;
use std::time::Duration;

/// Client for a Simple JSON datasource.
///
/// Every operation takes the `Connection` to talk to and performs exactly one
/// HTTP round trip. The shape of the result follows the `Settings` in effect
/// when the response arrives (see [`settings::resolve`]).
#[derive(Clone)]
pub struct DatasourceClient {
    executor: RequestExecutor,
}

impl DatasourceClient {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self {
            executor: RequestExecutor::new(transport),
        }
    }

    /// Client backed by a default reqwest transport
    pub fn with_default_transport() -> Self {
        Self::new(Arc::new(ReqwestTransport::new()))
    }

    /// Build a client and connection from loaded configuration
    pub fn from_config(config: &ClientConfig) -> ClientResult<(Self, Connection)> {
        let datasource = &config.datasource;
        let transport = match datasource.timeout_secs {
            Some(secs) => ReqwestTransport::with_timeout(Duration::from_secs(secs))?,
            None => ReqwestTransport::new(),
        };

        tracing::debug!(
            "Configured datasource client for {} (fidelity={}, convert={})",
            datasource.url,
            datasource.fidelity,
            datasource.convert
        );

        let client = Self::new(Arc::new(transport)).with_settings(datasource.settings());
        Ok((client, datasource.connection()))
    }

    /// Pin settings on this client instead of following the global default
    pub fn with_settings(self, settings: Settings) -> Self {
        Self {
            executor: self.executor.with_settings(settings),
        }
    }

    pub fn effective_settings(&self) -> Settings {
        self.executor.effective_settings()
    }

    /// Check that the datasource answers `GET /` with a success status
    pub async fn ping(&self, connection: &Connection) -> ClientResult<()> {
        let forced = self.effective_settings().with_fidelity(FidelityLevel::Raw);
        settings::scoped(
            forced,
            self.executor.execute::<()>(connection, Endpoint::Ping, None),
        )
        .await?;
        Ok(())
    }

    /// Metric names matching `target`. Normalized into a `SearchResult`.
    pub async fn search(&self, connection: &Connection, target: &str) -> ClientResult<DatasourceResponse> {
        let body = SearchRequest::new(target);
        self.executor
            .execute(connection, Endpoint::Search, Some(&body))
            .await
    }

    /// Time series for `targets` over `range`. Normalized into a `QueryResult`.
    pub async fn query<S: AsRef<str> + Sync>(
        &self,
        connection: &Connection,
        targets: &[S],
        range: &TimeRange,
    ) -> ClientResult<DatasourceResponse> {
        let body = QueryRequest::new(targets, range);
        self.executor
            .execute(connection, Endpoint::Query, Some(&body))
            .await
    }

    pub async fn annotations(
        &self,
        connection: &Connection,
        name: &str,
        range: &TimeRange,
    ) -> ClientResult<DatasourceResponse> {
        let body = AnnotationRequest::new(name, range);
        self.executor
            .execute(connection, Endpoint::Annotations, Some(&body))
            .await
    }

    pub async fn tag_keys(&self, connection: &Connection) -> ClientResult<DatasourceResponse> {
        self.executor
            .execute(connection, Endpoint::TagKeys, Some(&TagKeysRequest {}))
            .await
    }

    pub async fn tag_values(&self, connection: &Connection, key: &str) -> ClientResult<DatasourceResponse> {
        let body = TagValuesRequest::new(key);
        self.executor
            .execute(connection, Endpoint::TagValues, Some(&body))
            .await
    }
}
