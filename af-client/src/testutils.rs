use crate::config::ApiConfig;
use http::header::{CONTENT_TYPE, LOCATION};
use http::{Method, StatusCode};
use http_body_util::{BodyExt, Full};
use hyper::body::{Bytes, Incoming};
use hyper::service::service_fn;
use hyper::{Request, Response};
use hyper_util::rt::{TokioExecutor, TokioIo};
use serde_json::Value as JsonValue;
use std::convert::Infallible;
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;
use url::Url;

/// A request as seen by the mock API.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: Method,
    pub path: String,
    pub body: Option<JsonValue>,
}

pub struct MockResponse {
    status: StatusCode,
    body: Option<JsonValue>,
    location: Option<String>,
}

impl MockResponse {
    pub fn status(status: StatusCode) -> Self {
        MockResponse {
            status,
            body: None,
            location: None,
        }
    }

    pub fn json(status: StatusCode, body: JsonValue) -> Self {
        MockResponse {
            status,
            body: Some(body),
            location: None,
        }
    }

    pub fn with_location(mut self, location: &str) -> Self {
        self.location = Some(location.to_string());
        self
    }
}

pub struct MockApi {
    /// Base URL of the server, with a trailing slash.
    pub url: Url,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl MockApi {
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }
}

/// Start a mock HTTP server that answers every request with `respond`
/// and records what it received.
pub async fn start_mock_api<F>(respond: F) -> MockApi
where
    F: Fn(&RecordedRequest) -> MockResponse + Send + Sync + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    let respond = Arc::new(respond);
    let requests = Arc::new(Mutex::new(Vec::new()));
    let recorded = requests.clone();

    tokio::spawn(async move {
        loop {
            let (stream, _) = listener.accept().await.unwrap();
            let io = TokioIo::new(stream);
            let respond = respond.clone();
            let recorded = recorded.clone();

            tokio::spawn(async move {
                let service = service_fn(move |req: Request<Incoming>| {
                    let respond = respond.clone();
                    let recorded = recorded.clone();
                    async move {
                        let method = req.method().clone();
                        let path = req.uri().path().to_string();
                        let bytes = req.into_body().collect().await.unwrap().to_bytes();
                        let body = serde_json::from_slice(&bytes).ok();

                        let request = RecordedRequest { method, path, body };
                        let reply = respond(&request);
                        recorded.lock().unwrap().push(request);

                        let mut builder = Response::builder()
                            .status(reply.status)
                            .header(CONTENT_TYPE, "application/json");
                        if let Some(location) = reply.location {
                            builder = builder.header(LOCATION, location);
                        }
                        let body = reply
                            .body
                            .map(|b| serde_json::to_vec(&b).unwrap())
                            .unwrap_or_default();

                        Ok::<_, Infallible>(builder.body(Full::new(Bytes::from(body))).unwrap())
                    }
                });

                let _ = hyper_util::server::conn::auto::Builder::new(TokioExecutor::new())
                    .serve_connection(io, service)
                    .await;
            });
        }
    });

    MockApi {
        url: Url::parse(&format!("http://127.0.0.1:{port}/")).unwrap(),
        requests,
    }
}

/// Config pointing all three APIs at `url`.
pub fn test_config(url: Url) -> ApiConfig {
    ApiConfig {
        af_url: url.clone(),
        oam_url: url.clone(),
        cups_url: url,
        timeout_secs: 5,
    }
}
