//! Process-wide settings live in their own test binary so no other test observes them

mod common;

use async_trait::async_trait;
use simplejson_client::{
    ClientResult, Connection, DatasourceClient, DatasourceResponse, FidelityLevel, OutboundRequest,
    RawResponse, ReqwestTransport, Settings, Transport, settings,
};
use std::sync::Arc;
use tokio::sync::Mutex;

/// Tests in this binary take turns with the global
static GLOBAL_LOCK: Mutex<()> = Mutex::const_new(());

/// Forwards to reqwest, then switches the global settings before handing the response back
struct SwitchingTransport {
    inner: ReqwestTransport,
    switch_to: Settings,
}

#[async_trait]
impl Transport for SwitchingTransport {
    async fn send(&self, request: OutboundRequest) -> ClientResult<RawResponse> {
        let response = self.inner.send(request).await?;
        settings::set_global(self.switch_to);
        Ok(response)
    }
}

#[tokio::test]
async fn test_global_settings_apply_to_unpinned_clients() -> anyhow::Result<()> {
    let _guard = GLOBAL_LOCK.lock().await;
    let conn = Connection::new(common::spawn_datasource().await);
    let unpinned = DatasourceClient::with_default_transport();
    let pinned = DatasourceClient::with_default_transport().with_settings(Settings::default());

    assert_eq!(settings::global(), Settings::default());
    assert!(matches!(unpinned.search(&conn, "a").await?, DatasourceResponse::Search(_)));

    settings::set_global(Settings::new(FidelityLevel::Body, true));
    assert_eq!(unpinned.effective_settings().fidelity, FidelityLevel::Body);
    assert!(matches!(unpinned.search(&conn, "a").await?, DatasourceResponse::Body(_)));
    assert!(matches!(pinned.search(&conn, "a").await?, DatasourceResponse::Search(_)));

    settings::set_global(Settings::default());
    assert!(matches!(unpinned.search(&conn, "a").await?, DatasourceResponse::Search(_)));
    Ok(())
}

#[tokio::test]
async fn test_settings_are_read_when_the_response_arrives() -> anyhow::Result<()> {
    let _guard = GLOBAL_LOCK.lock().await;
    let conn = Connection::new(common::spawn_datasource().await);
    let client = DatasourceClient::new(Arc::new(SwitchingTransport {
        inner: ReqwestTransport::from_client(reqwest::Client::new()),
        switch_to: Settings::new(FidelityLevel::Body, false),
    }));

    assert_eq!(client.effective_settings(), Settings::default());
    let response = client.search(&conn, "herd").await;
    settings::set_global(Settings::default());

    match response? {
        DatasourceResponse::Body(body) => assert_eq!(body[0]["value"], "herd-1"),
        other => panic!("expected the decoded body, got {:?}", other),
    }
    Ok(())
}
