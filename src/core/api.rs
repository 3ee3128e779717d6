use crate::adapters::http::ReqwestFetch;
use crate::core::decode::decode_body;
use crate::domain::model::{ApiValue, FetchRequest, RequestOptions, JSON_CONTENT_TYPE};
use crate::domain::ports::{ConfigProvider, Fetch};
use crate::utils::error::Result;
use std::collections::HashMap;
use std::sync::{Arc, Once};

static INIT: Once = Once::new();

/// Emits the load message. Safe to call any number of times; logs once per process.
pub fn init() {
    INIT.call_once(|| {
        tracing::info!("Mega Tool api helper loaded");
    });
}

/// Request helper: issues a request and decodes the body as JSON or text
/// depending on the response's declared content type.
///
/// Holds no per-call state, so one instance can be cloned and shared freely.
#[derive(Clone)]
pub struct MegaApi {
    fetch: Arc<dyn Fetch>,
}

impl MegaApi {
    pub fn new<F: Fetch + 'static>(fetch: F) -> Self {
        Self {
            fetch: Arc::new(fetch),
        }
    }

    pub fn from_config<C: ConfigProvider>(config: &C) -> Result<Self> {
        Ok(Self::new(ReqwestFetch::from_config(config)?))
    }

    /// Fetches `path` and returns the decoded body.
    ///
    /// When `options.headers` is `None` a `Content-Type: application/json`
    /// header is sent. The response status is not inspected: error responses
    /// are decoded and returned like any other.
    pub async fn json(&self, path: &str, options: Option<RequestOptions>) -> Result<ApiValue> {
        let request = build_request(path, options.unwrap_or_default());
        tracing::debug!("📡 {} {}", request.method, request.path);

        let response = self.fetch.fetch(request).await?;
        tracing::debug!(
            "📡 {} responded {} ({})",
            path,
            response.status,
            response.content_type.as_deref().unwrap_or("no content-type")
        );

        decode_body(response)
    }
}

impl std::fmt::Debug for MegaApi {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MegaApi").finish_non_exhaustive()
    }
}

fn build_request(path: &str, options: RequestOptions) -> FetchRequest {
    let headers = options.headers.unwrap_or_else(default_headers);
    FetchRequest {
        method: options.method.unwrap_or_else(|| "GET".to_string()),
        path: path.to_string(),
        headers: headers.into_iter().collect(),
        body: options.body,
    }
}

fn default_headers() -> HashMap<String, String> {
    HashMap::from([("Content-Type".to_string(), JSON_CONTENT_TYPE.to_string())])
}
