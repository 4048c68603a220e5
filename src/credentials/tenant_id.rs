use serde_json::Value;

/// Unwrap a stored tenant id down to its bare value.
///
/// Values may have been stored raw (`acme`) or JSON-encoded (`"acme"`). JSON
/// is tried first; if it does not parse, surrounding quotes are stripped.
/// Blank values and JSON `null` read as absent.
pub fn decode_tenant_id(raw: &str) -> Option<String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    let decoded = match serde_json::from_str::<Value>(raw) {
        Ok(Value::String(s)) => s,
        Ok(Value::Null) => return None,
        Ok(Value::Number(n)) => n.to_string(),
        // Objects, arrays and booleans are not tenant ids; treat the text as raw
        Ok(_) | Err(_) => strip_quotes(raw).to_string(),
    };

    let decoded = decoded.trim();
    if decoded.is_empty() || decoded == "undefined" || decoded == "null" {
        None
    } else {
        Some(decoded.to_string())
    }
}

fn strip_quotes(raw: &str) -> &str {
    raw.trim_matches(|c| c == '"' || c == '\'')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_both_encodings() {
        assert_eq!(decode_tenant_id("acme").as_deref(), Some("acme"));
        assert_eq!(decode_tenant_id("\"acme\"").as_deref(), Some("acme"));
        assert_eq!(decode_tenant_id("  \"acme\"  ").as_deref(), Some("acme"));
        assert_eq!(decode_tenant_id("42").as_deref(), Some("42"));
    }

    #[test]
    fn malformed_json_falls_back_to_quote_stripping() {
        assert_eq!(decode_tenant_id("\"acme").as_deref(), Some("acme"));
        assert_eq!(decode_tenant_id("'acme'").as_deref(), Some("acme"));
        assert_eq!(decode_tenant_id("acme\"").as_deref(), Some("acme"));
    }

    #[test]
    fn empty_and_sentinel_values_are_absent() {
        for raw in ["", "   ", "\"\"", "null", "\"null\"", "undefined", "\"", "''"] {
            assert_eq!(decode_tenant_id(raw), None, "raw: {:?}", raw);
        }
    }

    #[test]
    fn never_panics_on_odd_input() {
        for raw in ["{", "[1,2]", "{\"id\":1}", "true", "\u{0}", "\"\\u00e9\""] {
            let _ = decode_tenant_id(raw);
        }
        assert_eq!(decode_tenant_id("\"\\u00e9\"").as_deref(), Some("é"));
    }
}
