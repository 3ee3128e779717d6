use crate::domain::model::{FetchRequest, FetchResponse};
use crate::domain::ports::{ConfigProvider, Fetch};
use crate::utils::error::{ApiError, Result};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE};
use reqwest::{Client, Method};
use url::Url;

/// `Fetch` backed by a shared `reqwest::Client`.
///
/// Relative paths are resolved against `base_url`, the way a browser resolves
/// them against the page origin.
#[derive(Debug, Clone)]
pub struct ReqwestFetch {
    client: Client,
    base_url: Option<Url>,
}

impl ReqwestFetch {
    pub fn new(client: Client, base_url: Option<Url>) -> Self {
        Self { client, base_url }
    }

    pub fn from_config<C: ConfigProvider>(config: &C) -> Result<Self> {
        let base_url = config
            .base_url()
            .map(|raw| {
                Url::parse(raw).map_err(|e| ApiError::InvalidUrl {
                    url: raw.to_string(),
                    reason: e.to_string(),
                })
            })
            .transpose()?;

        let mut builder = Client::builder().cookie_store(config.cookie_store());
        if let Some(user_agent) = config.user_agent() {
            builder = builder.user_agent(user_agent);
        }

        Ok(Self::new(builder.build()?, base_url))
    }

    pub fn resolve(&self, path: &str) -> Result<Url> {
        let invalid = |e: url::ParseError| ApiError::InvalidUrl {
            url: path.to_string(),
            reason: e.to_string(),
        };

        match Url::parse(path) {
            Ok(url) => Ok(url),
            Err(url::ParseError::RelativeUrlWithoutBase) => match &self.base_url {
                Some(base) => base.join(path).map_err(invalid),
                None => Err(invalid(url::ParseError::RelativeUrlWithoutBase)),
            },
            Err(e) => Err(invalid(e)),
        }
    }
}

fn parse_method(method: &str) -> Result<Method> {
    Method::from_bytes(method.as_bytes()).map_err(|_| ApiError::InvalidMethod {
        method: method.to_string(),
    })
}

fn build_header_map(headers: &[(String, String)]) -> Result<HeaderMap> {
    let mut map = HeaderMap::with_capacity(headers.len());
    for (name, value) in headers {
        let header_name =
            HeaderName::from_bytes(name.as_bytes()).map_err(|e| ApiError::InvalidHeader {
                name: name.clone(),
                reason: e.to_string(),
            })?;
        let header_value = HeaderValue::from_str(value).map_err(|e| ApiError::InvalidHeader {
            name: name.clone(),
            reason: e.to_string(),
        })?;
        map.append(header_name, header_value);
    }
    Ok(map)
}

#[async_trait]
impl Fetch for ReqwestFetch {
    async fn fetch(&self, request: FetchRequest) -> Result<FetchResponse> {
        let url = self.resolve(&request.path)?;
        let method = parse_method(&request.method)?;
        if request.body.is_some() && (method == Method::GET || method == Method::HEAD) {
            return Err(ApiError::BodyNotAllowed {
                method: method.to_string(),
            });
        }
        let headers = build_header_map(&request.headers)?;

        let mut builder = self.client.request(method, url).headers(headers);
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);
        let body = response.bytes().await?.to_vec();

        Ok(FetchResponse {
            status,
            content_type,
            body,
        })
    }
}
