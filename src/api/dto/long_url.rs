//! DTOs for the short URL resolution endpoint.
//!
//! # Wire quirk
//!
//! The request field is named `long_url` but carries the **short** URL to look
//! up. The name is part of the public contract and is kept as-is.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Request to resolve a short URL.
#[derive(Debug, Deserialize, Validate)]
pub struct LongUrlRequest {
    /// The short URL to resolve, e.g. `http://reclink.com/1a2b3c4d`.
    #[serde(rename = "long_url")]
    #[validate(length(min = 1, message = "long_url must not be empty"))]
    pub short_url: String,
}

#[derive(Debug, Serialize)]
pub struct LongUrlResponse {
    pub long_url: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_long_url_key_carries_short_url() {
        let req: LongUrlRequest =
            serde_json::from_str(r#"{"long_url": "http://reclink.com/1a2b3c4d"}"#).unwrap();
        assert_eq!(req.short_url, "http://reclink.com/1a2b3c4d");
    }

    #[test]
    fn test_short_url_key_is_not_accepted() {
        let result =
            serde_json::from_str::<LongUrlRequest>(r#"{"short_url": "http://reclink.com/x"}"#);
        assert!(result.is_err());
    }
}
