use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

/// Free-form layout knobs addressed by dotted paths (`relax.iterations`, `cluster.seed`, ...).
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutConfig(Value);

impl Default for LayoutConfig {
    fn default() -> Self {
        Self::empty_object()
    }
}

impl LayoutConfig {
    pub fn empty_object() -> Self {
        Self(Value::Object(Map::new()))
    }

    pub fn from_value(value: Value) -> Self {
        Self(value)
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    pub fn get(&self, dotted_path: &str) -> Option<&Value> {
        let mut cur = &self.0;
        for segment in dotted_path.split('.') {
            cur = cur.as_object()?.get(segment)?;
        }
        Some(cur)
    }

    pub fn get_str(&self, dotted_path: &str) -> Option<&str> {
        self.get(dotted_path)?.as_str()
    }

    /// Typed read of a knob. A value that does not deserialize into `T` reads as unset, so a
    /// negative `graph.k` or a string `relax.iterations` falls back to the default.
    pub fn knob<T: DeserializeOwned>(&self, dotted_path: &str) -> Option<T> {
        T::deserialize(self.get(dotted_path)?).ok()
    }

    pub fn get_bool(&self, dotted_path: &str) -> Option<bool> {
        self.knob(dotted_path)
    }

    pub fn get_f64(&self, dotted_path: &str) -> Option<f64> {
        self.knob::<f64>(dotted_path).filter(|v| v.is_finite())
    }

    pub fn get_usize(&self, dotted_path: &str) -> Option<usize> {
        self.knob(dotted_path)
    }

    /// Writes `value` at `dotted_path`, turning every non-object on the way into an object.
    pub fn set_value(&mut self, dotted_path: &str, value: Value) {
        let segments: Vec<&str> = dotted_path.split('.').collect();
        insert_at(&mut self.0, &segments, value);
    }

    /// Overlays `other` onto the knobs: objects merge key by key, anything else replaces.
    pub fn deep_merge(&mut self, other: &Value) {
        overlay(&mut self.0, other);
    }
}

fn insert_at(slot: &mut Value, segments: &[&str], value: Value) {
    let Some((head, rest)) = segments.split_first() else {
        *slot = value;
        return;
    };
    if !slot.is_object() {
        *slot = Value::Object(Map::new());
    }
    if let Value::Object(map) = slot {
        let child = map.entry(*head).or_insert(Value::Null);
        insert_at(child, rest, value);
    }
}

fn overlay(base: &mut Value, top: &Value) {
    let (Value::Object(base_map), Value::Object(top_map)) = (&mut *base, top) else {
        *base = top.clone();
        return;
    };
    for (key, top_value) in top_map {
        match base_map.get_mut(key) {
            Some(existing) => overlay(existing, top_value),
            None => {
                base_map.insert(key.clone(), top_value.clone());
            }
        }
    }
}
