//! Ordered JSON object layering.

use serde_json::{Map, Value};

/// Shallow-merge `layers` in order; a key set by a later layer replaces the earlier value.
///
/// Keys keep the position of their first occurrence, so the output order is deterministic.
pub fn merge_layers<'a, I>(layers: I) -> Map<String, Value>
where
  I: IntoIterator<Item = &'a Map<String, Value>>,
{
  let mut merged = Map::new();
  for layer in layers {
    for (key, value) in layer {
      merged.insert(key.clone(), value.clone());
    }
  }
  merged
}

/// Fill keys missing from `target`, or set to `null`, with the values in `defaults`.
///
/// Where both sides hold an object the fill continues one level down, so partially
/// specified nested sections still pick up their defaults.
pub fn fill_defaults(target: &mut Map<String, Value>, defaults: &Map<String, Value>) {
  for (key, default) in defaults {
    match target.get_mut(key) {
      None => {
        target.insert(key.clone(), default.clone());
      }
      Some(slot @ Value::Null) => *slot = default.clone(),
      Some(Value::Object(existing)) => {
        if let Value::Object(nested) = default {
          fill_defaults(existing, nested);
        }
      }
      Some(_) => {}
    }
  }
}
