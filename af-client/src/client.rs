use crate::config::ApiConfig;
use crate::errors::{ClientError, Result};
use crate::metrics_defs::{API_REQUEST_DURATION, API_REQUESTS};
use http::header::LOCATION;
use http::{Method, StatusCode};
use reqwest::Response;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use shared::{counter, histogram};
use std::time::{Duration, Instant};
use url::Url;

/// The APIs behind the console, each with its own base URL.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Api {
    Af,
    Oam,
    Cups,
}

impl Api {
    fn prefix(&self) -> &'static [&'static str] {
        match self {
            Api::Af => &["af", "v1"],
            Api::Oam => &["ngcoam", "v1"],
            Api::Cups => &[],
        }
    }
}

/// Outcome of a create call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Created {
    /// `Location` header, when the server sends one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    /// Response body, when the server sends one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<JsonValue>,
}

impl Created {
    /// ID of the new resource: the last segment of the `Location` header.
    pub fn id(&self) -> Option<&str> {
        self.location
            .as_deref()
            .map(|location| location.trim_end_matches('/'))
            .and_then(|location| location.rsplit('/').next())
            .filter(|id| !id.is_empty())
    }
}

/// Client for the AF, 5G OAM and CUPS REST APIs.
///
/// Resource operations live in the `services`, `subscriptions`, `transactions`
/// and `userplanes` modules.
#[derive(Clone)]
pub struct AfClient {
    http: reqwest::Client,
    config: ApiConfig,
}

impl AfClient {
    pub fn new(config: ApiConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(AfClient { http, config })
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    /// Builds `{base}/{api prefix}/{segments...}`. Segments are
    /// percent-encoded, so IDs may contain any character.
    pub(crate) fn endpoint(&self, api: Api, segments: &[&str]) -> Result<Url> {
        let base = match api {
            Api::Af => &self.config.af_url,
            Api::Oam => &self.config.oam_url,
            Api::Cups => &self.config.cups_url,
        };

        let mut url = base.clone();
        url.path_segments_mut()
            .map_err(|_| ClientError::InvalidBaseUrl(base.to_string()))?
            .pop_if_empty()
            .extend(api.prefix())
            .extend(segments);

        Ok(url)
    }

    /// Sends a request and maps non-success statuses to errors.
    async fn send<B>(
        &self,
        resource: &'static str,
        method: Method,
        url: Url,
        body: Option<&B>,
    ) -> Result<Response>
    where
        B: Serialize + ?Sized,
    {
        tracing::debug!(resource, method = %method, url = %url, "Sending API request");

        let mut request = self.http.request(method.clone(), url.clone());
        if let Some(body) = body {
            request = request.json(body);
        }

        let start = Instant::now();
        let result = request.send().await;

        let status = match &result {
            Ok(response) => response.status().as_u16().to_string(),
            Err(_) => "error".to_string(),
        };
        counter!(API_REQUESTS, "resource" => resource, "method" => method.to_string(), "status" => status)
            .increment(1);
        histogram!(API_REQUEST_DURATION, "resource" => resource, "method" => method.to_string())
            .record(start.elapsed().as_secs_f64());

        let response = result.inspect_err(|e| {
            tracing::warn!(resource, method = %method, url = %url, error = %e, "API request failed");
        })?;

        check_status(resource, response).await
    }

    pub(crate) async fn get(&self, resource: &'static str, url: Url) -> Result<Response> {
        self.send::<()>(resource, Method::GET, url, None).await
    }

    pub(crate) async fn get_json<T: DeserializeOwned>(
        &self,
        resource: &'static str,
        url: Url,
    ) -> Result<T> {
        let body = self.get(resource, url).await?.bytes().await?;
        decode(resource, &body)
    }

    /// Fetches a collection. An empty body is an empty list, and the items
    /// may come either as a bare array or wrapped in an object under
    /// `wrapper_key`.
    pub(crate) async fn get_list<T: DeserializeOwned>(
        &self,
        resource: &'static str,
        url: Url,
        wrapper_key: Option<&str>,
    ) -> Result<Vec<T>> {
        let body = self.get(resource, url).await?.bytes().await?;
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(Vec::new());
        }

        let value: JsonValue = decode(resource, &body)?;
        let items = match (value, wrapper_key) {
            (JsonValue::Array(items), _) => JsonValue::Array(items),
            (JsonValue::Null, _) => return Ok(Vec::new()),
            (JsonValue::Object(mut map), Some(key)) if map.contains_key(key) => {
                map.remove(key).unwrap_or(JsonValue::Null)
            }
            (other, _) => {
                return Err(ClientError::Decode {
                    resource,
                    reason: format!("expected a list, got {other}"),
                });
            }
        };

        if items.is_null() {
            return Ok(Vec::new());
        }
        serde_json::from_value(items).map_err(|e| ClientError::Decode {
            resource,
            reason: e.to_string(),
        })
    }

    pub(crate) async fn create<B>(&self, resource: &'static str, url: Url, body: &B) -> Result<Created>
    where
        B: Serialize + ?Sized,
    {
        let response = self.send(resource, Method::POST, url, Some(body)).await?;

        let location = response
            .headers()
            .get(LOCATION)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);

        let bytes = response.bytes().await?;
        let body = if bytes.iter().all(u8::is_ascii_whitespace) {
            None
        } else {
            Some(decode(resource, &bytes)?)
        };

        Ok(Created { location, body })
    }

    /// PUT or PATCH; the response body, if any, is not interpreted.
    pub(crate) async fn modify<B>(
        &self,
        resource: &'static str,
        method: Method,
        url: Url,
        body: &B,
    ) -> Result<()>
    where
        B: Serialize + ?Sized,
    {
        self.send(resource, method, url, Some(body)).await?;
        Ok(())
    }

    pub(crate) async fn delete(&self, resource: &'static str, url: Url) -> Result<()> {
        self.send::<()>(resource, Method::DELETE, url, None).await?;
        Ok(())
    }
}

pub(crate) fn decode<T: DeserializeOwned>(resource: &'static str, body: &[u8]) -> Result<T> {
    serde_json::from_slice(body).map_err(|e| ClientError::Decode {
        resource,
        reason: e.to_string(),
    })
}

async fn check_status(resource: &'static str, response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let url = response.url().to_string();
    let body = response.text().await.unwrap_or_default();

    tracing::warn!(resource, status = %status, url = %url, "API request rejected");

    match status {
        StatusCode::NOT_FOUND => Err(ClientError::NotFound { resource, url }),
        _ => Err(ClientError::UnexpectedStatus {
            resource,
            status,
            body,
        }),
    }
}
