use anyhow::{Context, Result};
use serde::Serialize;

/// Emit a value as JCS-canonical JSON (RFC 8785).
///
/// Used for every JSON document packfill prints or stores, so output is
/// byte-stable regardless of struct field order.
///
/// ```rust
/// use packfill_utils::canonicalization::emit_jcs;
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Entry {
///     size: u64,
///     count: u64,
/// }
///
/// let json = emit_jcs(&Entry { size: 500, count: 1 }).unwrap();
/// assert_eq!(json, r#"{"count":1,"size":500}"#);
/// ```
pub fn emit_jcs<T: Serialize>(value: &T) -> Result<String> {
    let json_value =
        serde_json::to_value(value).with_context(|| "Failed to serialize value to JSON")?;
    let json_bytes = serde_json_canonicalizer::to_vec(&json_value)
        .with_context(|| "Failed to canonicalize JSON using JCS")?;
    String::from_utf8(json_bytes).with_context(|| "JCS output contained invalid UTF-8")
}
