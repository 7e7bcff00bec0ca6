//! Header-layer merging and the header-borne metadata codec.
//!
//! Metadata travels out-of-band in a single reserved header whose value is a
//! JSON-encoded map. Merging is an explicit ordered operation over layers so
//! precedence is testable without a network.

use std::collections::BTreeMap;

use crate::error::StoreResult;

/// Transport headers: string keys to string values
pub type HeaderMap = BTreeMap<String, String>;

/// Caller-supplied metadata: string keys to arbitrarily nested JSON values
pub type Metadata = serde_json::Map<String, serde_json::Value>;

/// Reserved header carrying the JSON-encoded metadata map
pub const META_HEADER: &str = "X-Object-Meta";

/// Header key for the object's MIME type
pub const CONTENT_TYPE: &str = "Content-Type";

/// Build the full header set for a put.
///
/// Precedence, lowest to highest: configured defaults, the metadata-derived
/// reserved header, per-call headers, the computed content type. Later layers
/// win on full-key collisions, so an explicit `X-Object-Meta` in the per-call
/// headers replaces the encoded metadata, and nothing outranks `Content-Type`.
pub fn merge(
    defaults: &HeaderMap,
    meta: &Metadata,
    per_call: &HeaderMap,
    content_type: &str,
) -> StoreResult<HeaderMap> {
    let mut merged = defaults.clone();
    merged.insert(META_HEADER.to_string(), encode_meta(meta)?);
    for (key, value) in per_call {
        merged.insert(key.clone(), value.clone());
    }
    merged.insert(CONTENT_TYPE.to_string(), content_type.to_string());
    Ok(merged)
}

/// JSON-encode a metadata map for the reserved header
pub fn encode_meta(meta: &Metadata) -> StoreResult<String> {
    Ok(serde_json::to_string(meta)?)
}

/// Decode metadata from a response header set.
///
/// An absent or empty reserved header means the object carries no metadata.
pub fn decode_meta(headers: &HeaderMap) -> StoreResult<Option<Metadata>> {
    match headers.get(META_HEADER) {
        Some(raw) if !raw.is_empty() => Ok(Some(serde_json::from_str(raw)?)),
        _ => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn meta_of(value: serde_json::Value) -> Metadata {
        value.as_object().cloned().unwrap_or_default()
    }

    #[test]
    fn merge_layers_defaults_then_per_call_then_content_type() {
        let mut defaults = HeaderMap::new();
        defaults.insert("X-Acl".to_string(), "private".to_string());
        defaults.insert(CONTENT_TYPE.to_string(), "text/html".to_string());

        let mut per_call = HeaderMap::new();
        per_call.insert("X-Acl".to_string(), "public-read".to_string());
        per_call.insert(CONTENT_TYPE.to_string(), "application/xml".to_string());

        let merged = merge(&defaults, &Metadata::new(), &per_call, "image/png").unwrap();

        assert_eq!(merged["X-Acl"], "public-read");
        // Computed content type beats both the default and the per-call value
        assert_eq!(merged[CONTENT_TYPE], "image/png");
    }

    #[test]
    fn per_call_meta_header_overrides_encoded_metadata() {
        let mut per_call = HeaderMap::new();
        per_call.insert(META_HEADER.to_string(), r#"{"explicit":true}"#.to_string());

        let meta = meta_of(json!({"from_content": 1}));
        let merged = merge(&HeaderMap::new(), &meta, &per_call, "text/plain").unwrap();

        assert_eq!(merged[META_HEADER], r#"{"explicit":true}"#);
    }

    #[test]
    fn meta_round_trips_through_the_reserved_header() {
        let meta = meta_of(json!({"x": 1, "nested": {"a": [1, 2, 3]}}));
        let mut headers = HeaderMap::new();
        headers.insert(META_HEADER.to_string(), encode_meta(&meta).unwrap());

        assert_eq!(decode_meta(&headers).unwrap(), Some(meta));
    }

    #[test]
    fn absent_or_empty_meta_header_decodes_to_none() {
        assert_eq!(decode_meta(&HeaderMap::new()).unwrap(), None);

        let mut headers = HeaderMap::new();
        headers.insert(META_HEADER.to_string(), String::new());
        assert_eq!(decode_meta(&headers).unwrap(), None);
    }
}
