//! Comparers for `serde_json::Value` keys.
//!
//! Numbers compare by value regardless of representation (`1` equals `1.0`).
//! Values of different JSON types order by type rank:
//! null < bool < number < string < array < object.

use std::cmp::Ordering;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use serde_json::{Number, Value};

use seqops_core::prelude::{EqualityComparer, FloatOrder, IgnoreAsciiCase, OrderComparer};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct JsonEquality {
    pub ignore_case: bool,
}

impl JsonEquality {
    pub fn new(ignore_case: bool) -> Self {
        Self { ignore_case }
    }
}

impl EqualityComparer<Value> for JsonEquality {
    fn equals(&self, a: &Value, b: &Value) -> bool {
        json_eq(a, b, self.ignore_case)
    }

    fn hash(&self, key: &Value) -> u64 {
        let mut h = DefaultHasher::new();
        hash_value(key, self.ignore_case, &mut h);
        h.finish()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct JsonOrder {
    pub ignore_case: bool,
}

impl JsonOrder {
    pub fn new(ignore_case: bool) -> Self {
        Self { ignore_case }
    }
}

impl OrderComparer<Value> for JsonOrder {
    fn compare(&self, a: &Value, b: &Value) -> Ordering {
        json_cmp(a, b, self.ignore_case)
    }
}

fn rank(v: &Value) -> u8 {
    match v {
        Value::Null => 0,
        Value::Bool(_) => 1,
        Value::Number(_) => 2,
        Value::String(_) => 3,
        Value::Array(_) => 4,
        Value::Object(_) => 5,
    }
}

fn as_f64(n: &Number) -> f64 {
    // -0.0 and 0.0 must hash alike.
    let f = n.as_f64().unwrap_or(0.0);
    if f == 0.0 {
        0.0
    } else {
        f
    }
}

fn num_cmp(a: &Number, b: &Number) -> Ordering {
    if let (Some(x), Some(y)) = (a.as_i64(), b.as_i64()) {
        return x.cmp(&y);
    }
    if let (Some(x), Some(y)) = (a.as_u64(), b.as_u64()) {
        return x.cmp(&y);
    }
    OrderComparer::<f64>::compare(&FloatOrder, &as_f64(a), &as_f64(b))
}

fn json_eq(a: &Value, b: &Value, ignore_case: bool) -> bool {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => num_cmp(x, y) == Ordering::Equal,
        (Value::String(x), Value::String(y)) => {
            if ignore_case {
                x.eq_ignore_ascii_case(y)
            } else {
                x == y
            }
        }
        (Value::Array(xs), Value::Array(ys)) => {
            xs.len() == ys.len() && xs.iter().zip(ys).all(|(x, y)| json_eq(x, y, ignore_case))
        }
        (Value::Object(xs), Value::Object(ys)) => {
            xs.len() == ys.len()
                && xs
                    .iter()
                    .all(|(k, x)| ys.get(k).is_some_and(|y| json_eq(x, y, ignore_case)))
        }
        _ => a == b,
    }
}

fn hash_value<H: Hasher>(v: &Value, ignore_case: bool, h: &mut H) {
    rank(v).hash(h);
    match v {
        Value::Null => {}
        Value::Bool(b) => b.hash(h),
        Value::Number(n) => as_f64(n).to_bits().hash(h),
        Value::String(s) => {
            if ignore_case {
                for b in s.bytes() {
                    b.to_ascii_lowercase().hash(h);
                }
            } else {
                s.hash(h);
            }
        }
        Value::Array(items) => {
            items.len().hash(h);
            for item in items {
                hash_value(item, ignore_case, h);
            }
        }
        // field order is not part of object equality
        Value::Object(map) => map.len().hash(h),
    }
}

fn json_cmp(a: &Value, b: &Value, ignore_case: bool) -> Ordering {
    match (a, b) {
        (Value::Bool(x), Value::Bool(y)) => x.cmp(y),
        (Value::Number(x), Value::Number(y)) => num_cmp(x, y),
        (Value::String(x), Value::String(y)) => {
            if ignore_case {
                OrderComparer::<str>::compare(&IgnoreAsciiCase, x, y)
            } else {
                x.cmp(y)
            }
        }
        (Value::Array(xs), Value::Array(ys)) => {
            for (x, y) in xs.iter().zip(ys) {
                match json_cmp(x, y, ignore_case) {
                    Ordering::Equal => continue,
                    other => return other,
                }
            }
            xs.len().cmp(&ys.len())
        }
        (Value::Object(_), Value::Object(_)) => a.to_string().cmp(&b.to_string()),
        _ => rank(a).cmp(&rank(b)),
    }
}
