//! Canonical JSON minimal: claves de objeto ordenadas, sin espacios.
//!
//! Garantiza que dos artifacts con los mismos campos (en cualquier orden de
//! declaración) produzcan el mismo hash.

use serde_json::Value;
use std::collections::BTreeMap;

pub fn to_canonical_json(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        // `Display` de Value produce el literal JSON escapado.
        Value::String(_) => value.to_string(),
        Value::Array(arr) => {
            let items: Vec<String> = arr.iter().map(to_canonical_json).collect();
            format!("[{}]", items.join(","))
        }
        Value::Object(map) => {
            let tree: BTreeMap<&String, String> = map.iter().map(|(k, v)| (k, to_canonical_json(v))).collect();
            let items: Vec<String> = tree.into_iter()
                                         .map(|(k, v)| format!("{}:{}", Value::String(k.clone()), v))
                                         .collect();
            format!("{{{}}}", items.join(","))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn object_keys_are_sorted_recursively() {
        let v = json!({"b": {"z": 1, "a": [true, null]}, "a": "x\"y"});
        assert_eq!(to_canonical_json(&v), r#"{"a":"x\"y","b":{"a":[true,null],"z":1}}"#);
    }
}
