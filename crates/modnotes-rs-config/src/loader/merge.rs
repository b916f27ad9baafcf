//! JSON merge helper for layered configuration.

use serde_json::Value;

/// Merge overlay values into the base, recursively overriding objects.
///
/// Non-object overlay values (including `null`) replace the base value.
pub(super) fn merge_json_values(base: &mut Value, overlay: &Value) {
    match (base, overlay) {
        (Value::Object(base_map), Value::Object(overlay_map)) => {
            for (key, value) in overlay_map {
                match base_map.get_mut(key) {
                    Some(existing) => merge_json_values(existing, value),
                    None => {
                        base_map.insert(key.clone(), value.clone());
                    }
                }
            }
        }
        (base_slot, overlay_value) => {
            *base_slot = overlay_value.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::merge_json_values;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn merges_nested_objects_and_overrides_scalars() {
        let mut base = json!({ "api": { "base_url": "a", "timeout_ms": 5 }, "notes": {} });
        merge_json_values(
            &mut base,
            &json!({ "api": { "timeout_ms": 10 }, "notes": { "listing_limit": null } }),
        );
        assert_eq!(
            base,
            json!({
                "api": { "base_url": "a", "timeout_ms": 10 },
                "notes": { "listing_limit": null }
            })
        );
    }
}
