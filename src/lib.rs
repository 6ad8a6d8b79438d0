//! Client for the Simple JSON datasource protocol.
//!
//! Six operations (`ping`, `search`, `query`, `annotations`, `tag_keys`,
//! `tag_values`) each perform one HTTP round trip. What comes back depends on
//! the [`FidelityLevel`] in effect when the response arrives: the raw transport
//! response, the decoded JSON body, or an endpoint-specific shape.
//!
//! ```no_run
//! use chrono::{Duration, Utc};
//! use simplejson_client::{Connection, DatasourceClient, TimeRange};
//!
//! # async fn run() -> simplejson_client::ClientResult<()> {
//! let client = DatasourceClient::with_default_transport();
//! let conn = Connection::new("http://localhost:3003");
//!
//! client.ping(&conn).await?;
//! let now = Utc::now();
//! let series = client
//!     .query(&conn, &["cows"], &TimeRange::new(now - Duration::hours(1), now))
//!     .await?
//!     .into_query();
//! # let _ = series;
//! # Ok(())
//! # }
//! ```
pub mod application;
pub mod domain;
pub mod infrastructure;

pub use application::datasource_client::DatasourceClient;
pub use application::normalizer::Endpoint;
pub use application::transport::{OutboundRequest, Transport};
pub use domain::connection::Connection;
pub use domain::error::{ClientError, ClientResult};
pub use domain::requests::TimeRange;
pub use domain::response::{DatasourceResponse, RawResponse};
pub use domain::results::{QueryResult, RawTimestamp, SearchResult, SeriesContext, SeriesPoints};
pub use domain::settings::{self, FidelityLevel, Settings};
pub use infrastructure::config::{ClientConfig, DatasourceSettings, load_client_config, parse_client_config};
pub use infrastructure::reqwest_transport::ReqwestTransport;
