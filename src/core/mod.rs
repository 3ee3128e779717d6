pub mod api;
pub mod decode;

pub use crate::domain::model::{ApiValue, FetchRequest, FetchResponse, RequestOptions};
pub use crate::domain::ports::{ConfigProvider, Fetch};
pub use crate::utils::error::Result;
