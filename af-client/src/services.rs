//! AF services of the 5G OAM API.

use crate::client::{AfClient, Api, Created};
use crate::errors::Result;
use crate::types::Service;
use http::Method;
use serde_json::Value as JsonValue;

const RESOURCE: &str = "service";

impl AfClient {
    /// Lists the registered AF services.
    pub async fn list_services(&self) -> Result<Vec<Service>> {
        let url = self.endpoint(Api::Oam, &["af", "services"])?;
        self.get_list(RESOURCE, url, Some("afServiceList")).await
    }

    pub async fn get_service(&self, id: &str) -> Result<Service> {
        let url = self.endpoint(Api::Oam, &["af", "services", id])?;
        self.get_json(RESOURCE, url).await
    }

    /// Registers a service. The OAM API answers with the new
    /// `afServiceId` in the body rather than a `Location` header.
    pub async fn create_service(&self, service: &Service) -> Result<Created> {
        let url = self.endpoint(Api::Oam, &["af", "services"])?;
        let created = self.create(RESOURCE, url, service).await?;
        tracing::info!(id = ?created.id().or_else(|| created_service_id(&created)), "Created service");
        Ok(created)
    }

    pub async fn patch_service(&self, id: &str, service: &Service) -> Result<()> {
        let url = self.endpoint(Api::Oam, &["af", "services", id])?;
        self.modify(RESOURCE, Method::PATCH, url, service).await
    }

    pub async fn delete_service(&self, id: &str) -> Result<()> {
        let url = self.endpoint(Api::Oam, &["af", "services", id])?;
        self.delete(RESOURCE, url).await
    }
}

/// Service ID from a create response body.
pub fn created_service_id(created: &Created) -> Option<&str> {
    created
        .body
        .as_ref()
        .and_then(|body| body.get("afServiceId"))
        .and_then(JsonValue::as_str)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ClientError;
    use crate::testutils::{MockResponse, start_mock_api, test_config};
    use crate::types::LocationService;
    use http::StatusCode;
    use serde_json::json;

    #[tokio::test]
    async fn test_list_services_wrapped() {
        let api = start_mock_api(|_| {
            MockResponse::json(
                StatusCode::OK,
                json!({"afServiceList": [
                    {"afServiceId": "s1", "locationService": {"dnai": "edge1", "tac": 1}},
                    {"afServiceId": "s2"}
                ]}),
            )
        })
        .await;
        let client = AfClient::new(test_config(api.url.clone())).unwrap();

        let services = client.list_services().await.unwrap();

        assert_eq!(services.len(), 2);
        assert_eq!(services[0].af_service_id.as_deref(), Some("s1"));
        assert_eq!(
            services[0].location_service.as_ref().unwrap().dnai.as_deref(),
            Some("edge1")
        );

        let requests = api.requests();
        assert_eq!(requests[0].method, Method::GET);
        assert_eq!(requests[0].path, "/ngcoam/v1/af/services");
    }

    #[tokio::test]
    async fn test_create_service() {
        let api = start_mock_api(|_| {
            MockResponse::json(StatusCode::OK, json!({"afServiceId": "s7"}))
        })
        .await;
        let client = AfClient::new(test_config(api.url.clone())).unwrap();

        let service = Service {
            location_service: Some(LocationService {
                dnai: Some("edge1".into()),
                upf_ip: Some("10.0.0.2".into()),
                ..Default::default()
            }),
            ..Default::default()
        };
        let created = client.create_service(&service).await.unwrap();

        assert_eq!(created_service_id(&created), Some("s7"));
        assert_eq!(created.id(), None);

        let requests = api.requests();
        assert_eq!(requests[0].method, Method::POST);
        assert_eq!(
            requests[0].body,
            Some(json!({"locationService": {"dnai": "edge1", "upfIp": "10.0.0.2"}}))
        );
    }

    #[tokio::test]
    async fn test_patch_and_delete_service() {
        let api = start_mock_api(|_| MockResponse::status(StatusCode::NO_CONTENT)).await;
        let client = AfClient::new(test_config(api.url.clone())).unwrap();

        let service = Service {
            af_service_id: Some("s1".into()),
            ..Default::default()
        };
        client.patch_service("s1", &service).await.unwrap();
        client.delete_service("s1").await.unwrap();

        let requests = api.requests();
        assert_eq!(requests[0].method, Method::PATCH);
        assert_eq!(requests[0].path, "/ngcoam/v1/af/services/s1");
        assert_eq!(requests[0].body, Some(json!({"afServiceId": "s1"})));
        assert_eq!(requests[1].method, Method::DELETE);
        assert_eq!(requests[1].path, "/ngcoam/v1/af/services/s1");
    }

    #[tokio::test]
    async fn test_get_missing_service() {
        let api = start_mock_api(|_| MockResponse::status(StatusCode::NOT_FOUND)).await;
        let client = AfClient::new(test_config(api.url.clone())).unwrap();

        let err = client.get_service("nope").await.unwrap_err();
        assert!(matches!(err, ClientError::NotFound { resource: "service", .. }));
    }
}
