//! HTTP client adaptor for the entries API.
//!
//! Surface (matched to the backend service):
//! `GET /health`, `GET|POST /api/entries`, `GET|PUT|DELETE /api/entries/{id}`,
//! `POST /api/entries/{id}/unlock`.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response};
use url::Url;

use super::codec::WireEntry;
use super::{Health, RemoteBackend};
use crate::entry::Entry;
use crate::error::RemoteError;

/// Reqwest-backed [`RemoteBackend`] implementation.
pub struct HttpBackend {
    client: Client,
    base_url: Url,
}

impl HttpBackend {
    /// Build a client with a hard request timeout; a call that outlives it
    /// fails like any other transport error.
    pub fn new(base_url: Url, timeout: Duration) -> Result<Self, RemoteError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client, base_url })
    }

    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut parts) = url.path_segments_mut() {
            parts.pop_if_empty();
            for segment in segments {
                parts.push(segment);
            }
        }
        url
    }
}

/// Check the status and decode the JSON body, collapsing both failure modes
/// into [`RemoteError`].
async fn decode<T: serde::de::DeserializeOwned>(
    endpoint: &str,
    response: Response,
) -> Result<T, RemoteError> {
    let status = response.status();
    if !status.is_success() {
        return Err(RemoteError::Status {
            endpoint: endpoint.to_string(),
            status: status.as_u16(),
        });
    }
    let bytes = response.bytes().await?;
    serde_json::from_slice(&bytes).map_err(|err| RemoteError::Decode {
        endpoint: endpoint.to_string(),
        message: err.to_string(),
    })
}

/// Create/update payload: the wire entry without its id. The server assigns
/// ids on create and takes the id from the path on update.
fn entry_payload(entry: &Entry) -> Result<serde_json::Value, RemoteError> {
    let mut value =
        serde_json::to_value(WireEntry::from_entry(entry)).map_err(|err| RemoteError::Decode {
            endpoint: "payload".to_string(),
            message: err.to_string(),
        })?;
    if let Some(object) = value.as_object_mut() {
        object.remove("id");
    }
    Ok(value)
}

#[async_trait]
impl RemoteBackend for HttpBackend {
    async fn health(&self) -> Result<Health, RemoteError> {
        let response = self.client.get(self.endpoint(&["health"])).send().await?;
        decode("/health", response).await
    }

    async fn list(&self) -> Result<Vec<Entry>, RemoteError> {
        let response = self
            .client
            .get(self.endpoint(&["api", "entries"]))
            .send()
            .await?;
        let wires: Vec<WireEntry> = decode("/api/entries", response).await?;
        Ok(wires.into_iter().map(WireEntry::into_entry).collect())
    }

    async fn fetch(&self, id: &str) -> Result<Entry, RemoteError> {
        let response = self
            .client
            .get(self.endpoint(&["api", "entries", id]))
            .send()
            .await?;
        let wire: WireEntry = decode("/api/entries/{id}", response).await?;
        Ok(wire.into_entry())
    }

    async fn create(&self, entry: &Entry) -> Result<Entry, RemoteError> {
        let response = self
            .client
            .post(self.endpoint(&["api", "entries"]))
            .json(&entry_payload(entry)?)
            .send()
            .await?;
        let wire: WireEntry = decode("/api/entries", response).await?;
        Ok(wire.into_entry())
    }

    async fn update(&self, entry: &Entry) -> Result<Entry, RemoteError> {
        let response = self
            .client
            .put(self.endpoint(&["api", "entries", &entry.id]))
            .json(&entry_payload(entry)?)
            .send()
            .await?;
        let wire: WireEntry = decode("/api/entries/{id}", response).await?;
        Ok(wire.into_entry())
    }

    async fn delete(&self, id: &str) -> Result<(), RemoteError> {
        let response = self
            .client
            .delete(self.endpoint(&["api", "entries", id]))
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            return Err(RemoteError::Status {
                endpoint: "/api/entries/{id}".to_string(),
                status: status.as_u16(),
            });
        }
        Ok(())
    }

    async fn unlock(&self, id: &str) -> Result<Entry, RemoteError> {
        let response = self
            .client
            .post(self.endpoint(&["api", "entries", id, "unlock"]))
            .send()
            .await?;
        let wire: WireEntry = decode("/api/entries/{id}/unlock", response).await?;
        Ok(wire.into_entry())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entry::EntryDraft;
    use chrono::TimeZone;
    use chrono::Utc;

    fn backend_for(server: &mockito::ServerGuard) -> HttpBackend {
        HttpBackend::new(
            Url::parse(&server.url()).unwrap(),
            Duration::from_secs(2),
        )
        .unwrap()
    }

    fn sample_entry() -> Entry {
        EntryDraft::new("Test", "x")
            .into_entry(
                "client-id".into(),
                Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap(),
            )
            .unwrap()
    }

    const WIRE_ENTRY: &str = r#"{
        "id": "srv-1",
        "title": "Test",
        "content": "x",
        "creationDate": "2025-06-01T12:00:00",
        "geofence": null,
        "weather": null,
        "emotion": null,
        "earliestUnlock": "2025-06-02T12:00:00",
        "unlockedAt": null
    }"#;

    #[test]
    fn test_entry_payload_omits_id() {
        let payload = entry_payload(&sample_entry()).unwrap();
        let object = payload.as_object().unwrap();
        assert!(!object.contains_key("id"));
        assert_eq!(object["title"], "Test");
        assert!(object.contains_key("earliestUnlock"));
    }

    #[tokio::test]
    async fn test_health() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/health")
            .with_status(200)
            .with_body(r#"{"status": "healthy", "service": "spark-backend"}"#)
            .create_async()
            .await;

        let health = backend_for(&server).health().await.unwrap();
        assert_eq!(health.status, "healthy");
        assert_eq!(health.service, "spark-backend");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_list_decodes_entries() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/api/entries")
            .with_status(200)
            .with_body(format!("[{WIRE_ENTRY}]"))
            .create_async()
            .await;

        let entries = backend_for(&server).list().await.unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].id, "srv-1");
        assert!(entries[0].is_locked());
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_fetch_single_entry() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/api/entries/srv-1")
            .with_status(200)
            .with_body(WIRE_ENTRY)
            .create_async()
            .await;

        let entry = backend_for(&server).fetch("srv-1").await.unwrap();
        assert_eq!(entry.id, "srv-1");
        assert_eq!(entry.body, "x");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_fetch_unknown_id_maps_to_status_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/api/entries/ghost")
            .with_status(404)
            .with_body(r#"{"error": "Entry not found"}"#)
            .create_async()
            .await;

        let err = backend_for(&server).fetch("ghost").await.unwrap_err();
        assert!(matches!(err, RemoteError::Status { status: 404, .. }));
    }

    #[tokio::test]
    async fn test_create_returns_server_entry() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/api/entries")
            .match_body(mockito::Matcher::PartialJson(serde_json::json!({
                "title": "Test",
                "content": "x",
            })))
            .with_status(201)
            .with_body(WIRE_ENTRY)
            .create_async()
            .await;

        let created = backend_for(&server).create(&sample_entry()).await.unwrap();
        assert_eq!(created.id, "srv-1");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_update_not_found_maps_to_status_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("PUT", "/api/entries/client-id")
            .with_status(404)
            .with_body(r#"{"error": "Entry not found"}"#)
            .create_async()
            .await;

        let err = backend_for(&server)
            .update(&sample_entry())
            .await
            .unwrap_err();
        assert!(matches!(err, RemoteError::Status { status: 404, .. }));
    }

    #[tokio::test]
    async fn test_server_error_maps_to_status_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/api/entries")
            .with_status(500)
            .create_async()
            .await;

        let err = backend_for(&server).list().await.unwrap_err();
        assert!(matches!(err, RemoteError::Status { status: 500, .. }));
    }

    #[tokio::test]
    async fn test_undecodable_body_maps_to_decode_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/api/entries")
            .with_status(200)
            .with_body("not json at all")
            .create_async()
            .await;

        let err = backend_for(&server).list().await.unwrap_err();
        assert!(matches!(err, RemoteError::Decode { .. }));
    }

    #[tokio::test]
    async fn test_delete_checks_status_only() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("DELETE", "/api/entries/srv-1")
            .with_status(200)
            .with_body(r#"{"message": "Entry deleted"}"#)
            .create_async()
            .await;

        backend_for(&server).delete("srv-1").await.unwrap();
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_unlock_posts_to_action_endpoint() {
        let mut server = mockito::Server::new_async().await;
        let body = WIRE_ENTRY.replace(
            r#""unlockedAt": null"#,
            r#""unlockedAt": "2025-06-03T08:00:00""#,
        );
        let mock = server
            .mock("POST", "/api/entries/srv-1/unlock")
            .with_status(200)
            .with_body(body)
            .create_async()
            .await;

        let entry = backend_for(&server).unlock("srv-1").await.unwrap();
        assert!(!entry.is_locked());
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_connection_refused_maps_to_transport_error() {
        // Nothing listens on this port.
        let backend = HttpBackend::new(
            Url::parse("http://127.0.0.1:1").unwrap(),
            Duration::from_millis(200),
        )
        .unwrap();
        let err = backend.list().await.unwrap_err();
        assert!(matches!(err, RemoteError::Transport(_)));
    }
}
