//! Reading record files: a JSON array or JSON lines.

use std::path::Path;

use serde_json::Value;

use crate::error::{QueryError, Result};

/// Parse `src` as a JSON array, or as one JSON value per non-blank line.
pub fn parse_records(src: &str) -> Result<Vec<Value>> {
    let trimmed = src.trim_start();
    if trimmed.starts_with('[') {
        return Ok(serde_json::from_str(trimmed)?);
    }
    src.lines()
        .filter(|l| !l.trim().is_empty())
        .map(|l| serde_json::from_str::<Value>(l).map_err(QueryError::from))
        .collect()
}

pub fn load_records(path: impl AsRef<Path>) -> Result<Vec<Value>> {
    let src = std::fs::read_to_string(path)?;
    parse_records(&src)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn array_and_lines() {
        assert_eq!(parse_records(" [1, 2]").unwrap(), vec![json!(1), json!(2)]);
        let lines = "{\"a\":1}\n\n{\"a\":2}\n";
        assert_eq!(parse_records(lines).unwrap(), vec![json!({"a":1}), json!({"a":2})]);
        assert!(parse_records("{oops}").is_err());
    }
}
