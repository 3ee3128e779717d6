use crate::domain::model::{ApiValue, FetchResponse, JSON_CONTENT_TYPE};
use crate::utils::error::Result;

/// Whether a `content-type` value declares JSON.
///
/// Case-sensitive substring match on `application/json`, so parameters such
/// as `; charset=utf-8` are accepted but `Application/JSON` is not.
pub fn is_json_content_type(content_type: Option<&str>) -> bool {
    content_type
        .map(|value| value.contains(JSON_CONTENT_TYPE))
        .unwrap_or(false)
}

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

pub fn decode_body(response: FetchResponse) -> Result<ApiValue> {
    // UTF-8 decoding drops one leading BOM for both JSON and text bodies.
    let body = response
        .body
        .strip_prefix(UTF8_BOM)
        .unwrap_or(response.body.as_slice());

    if is_json_content_type(response.content_type.as_deref()) {
        let value = serde_json::from_slice(body)?;
        return Ok(ApiValue::Json(value));
    }

    Ok(ApiValue::Text(String::from_utf8_lossy(body).into_owned()))
}
