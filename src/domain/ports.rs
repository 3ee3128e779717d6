use crate::domain::model::{FetchRequest, FetchResponse};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::collections::HashMap;

/// The networked-fetch capability the request helper is built on.
#[async_trait]
pub trait Fetch: Send + Sync {
    async fn fetch(&self, request: FetchRequest) -> Result<FetchResponse>;
}

pub trait ConfigProvider: Send + Sync {
    fn base_url(&self) -> Option<&str>;
    fn default_headers(&self) -> Option<&HashMap<String, String>>;
    fn user_agent(&self) -> Option<&str>;
    fn cookie_store(&self) -> bool;
}
