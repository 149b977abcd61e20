//! YAML → [`Query`] for linear record pipelines.
//!
//! Example:
//! ```yaml
//! config: { initial_bucket_count: 7 }
//! steps:
//!   - op: join
//!     inner: products
//!     outer_key: id
//!     inner_key: category_id
//!     into: product
//!   - op: order
//!     levels:
//!       - { key: name }
//!       - { key: product.price, descending: true }
//!   - op: group
//!     key: name
//!     element: product.title
//! ```

use std::fmt::Write as _;

use serde::{Deserialize, Serialize};

use seqops_core::comparer::SortDirection;
use seqops_core::config::SeqConfig;

use crate::error::{QueryError, Result};
use crate::path::KeyPath;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Query {
    #[serde(default)]
    pub config: Option<QueryConfig>,
    pub steps: Vec<Step>,
}

/// The `config:` block. Unset fields keep whatever the caller's base config says.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct QueryConfig {
    pub initial_bucket_count: Option<usize>,
    pub buffer_seed_capacity: Option<usize>,
}

impl QueryConfig {
    /// Overlay the fields this block sets onto `cfg`.
    pub fn apply(&self, cfg: &mut SeqConfig) {
        if let Some(buckets) = self.initial_bucket_count {
            cfg.initial_bucket_count = buckets;
        }
        if let Some(seed) = self.buffer_seed_capacity {
            cfg.buffer_seed_capacity = seed;
        }
    }

    pub fn validate(&self) -> Result<()> {
        let mut cfg = SeqConfig::default();
        self.apply(&mut cfg);
        cfg.validate()?;
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "op")]
pub enum Step {
    /// Emits `{ "key": .., "elements": [..] }` per distinct key.
    Group {
        key: String,
        #[serde(default)]
        element: Option<String>,
        #[serde(default)]
        ignore_case: bool,
    },

    Order { levels: Vec<OrderLevel> },

    /// Inner join: each outer record gains `into` = one matching inner record.
    Join {
        inner: String,
        outer_key: String,
        inner_key: String,
        into: String,
        #[serde(default)]
        ignore_case: bool,
    },

    /// Group join: each outer record gains `into` = array of its matches.
    GroupJoin {
        inner: String,
        outer_key: String,
        inner_key: String,
        into: String,
        #[serde(default)]
        ignore_case: bool,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderLevel {
    pub key: String,
    #[serde(default)]
    pub descending: bool,
    #[serde(default)]
    pub ignore_case: bool,
}

impl OrderLevel {
    pub fn direction(&self) -> SortDirection {
        SortDirection::from_descending(self.descending)
    }
}

impl Step {
    pub fn name(&self) -> &'static str {
        match self {
            Step::Group { .. } => "group",
            Step::Order { .. } => "order",
            Step::Join { .. } => "join",
            Step::GroupJoin { .. } => "group_join",
        }
    }

    /// Datasets this step reads besides its input.
    pub fn dataset(&self) -> Option<&str> {
        match self {
            Step::Join { inner, .. } | Step::GroupJoin { inner, .. } => Some(inner.as_str()),
            _ => None,
        }
    }

    fn validate(&self) -> Result<()> {
        match self {
            Step::Group { key, element, .. } => {
                KeyPath::parse(key)?;
                if let Some(e) = element {
                    KeyPath::parse(e)?;
                }
            }
            Step::Order { levels } => {
                if levels.is_empty() {
                    return Err(QueryError::invalid("order step needs at least one level"));
                }
                for level in levels {
                    KeyPath::parse(&level.key)?;
                }
            }
            Step::Join {
                inner,
                outer_key,
                inner_key,
                into,
                ..
            }
            | Step::GroupJoin {
                inner,
                outer_key,
                inner_key,
                into,
                ..
            } => {
                if inner.trim().is_empty() {
                    return Err(QueryError::invalid(format!("{} step has no inner dataset", self.name())));
                }
                if into.trim().is_empty() {
                    return Err(QueryError::invalid(format!("{} step has no 'into' field", self.name())));
                }
                KeyPath::parse(outer_key)?;
                KeyPath::parse(inner_key)?;
            }
        }
        Ok(())
    }

    fn describe(&self) -> String {
        match self {
            Step::Group {
                key,
                element,
                ignore_case,
            } => {
                let mut s = format!("group by {key}");
                if let Some(e) = element {
                    let _ = write!(s, " select {e}");
                }
                if *ignore_case {
                    s.push_str(" (ignore case)");
                }
                s
            }
            Step::Order { levels } => {
                let parts: Vec<String> = levels
                    .iter()
                    .map(|l| {
                        let dir = match l.direction() {
                            SortDirection::Ascending => "asc",
                            SortDirection::Descending => "desc",
                        };
                        if l.ignore_case {
                            format!("{} {dir} (ignore case)", l.key)
                        } else {
                            format!("{} {dir}", l.key)
                        }
                    })
                    .collect();
                format!("order by {}", parts.join(", then "))
            }
            Step::Join {
                inner,
                outer_key,
                inner_key,
                into,
                ..
            }
            | Step::GroupJoin {
                inner,
                outer_key,
                inner_key,
                into,
                ..
            } => format!(
                "{} {inner} on {outer_key} = {inner_key} into {into}",
                self.name()
            ),
        }
    }
}

impl Query {
    /// Parse and validate a YAML document.
    pub fn from_yaml(src: &str) -> Result<Self> {
        let query: Query = serde_yaml::from_str(src)?;
        query.validate()?;
        Ok(query)
    }

    /// Structural checks only; no data is read.
    pub fn validate(&self) -> Result<()> {
        if self.steps.is_empty() {
            return Err(QueryError::invalid("query has no steps"));
        }
        if let Some(cfg) = &self.config {
            cfg.validate()?;
        }
        for (i, step) in self.steps.iter().enumerate() {
            step.validate().map_err(|e| match e {
                QueryError::Invalid(msg) => QueryError::invalid(format!("step {}: {msg}", i + 1)),
                other => other,
            })?;
        }
        Ok(())
    }

    /// `base` with the document's `config:` block laid over it field by field.
    pub fn effective_config(&self, mut base: SeqConfig) -> SeqConfig {
        if let Some(block) = &self.config {
            block.apply(&mut base);
        }
        base
    }

    /// Every dataset name referenced by a join step, in step order.
    pub fn datasets(&self) -> Vec<&str> {
        self.steps.iter().filter_map(Step::dataset).collect()
    }

    /// One numbered line per step.
    pub fn explain(&self) -> String {
        let mut out = String::new();
        for (i, step) in self.steps.iter().enumerate() {
            let _ = writeln!(out, "{}. {}", i + 1, step.describe());
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOC: &str = r#"
config: { initial_bucket_count: 3 }
steps:
  - op: group_join
    inner: employees
    outer_key: name
    inner_key: dept
    into: staff
  - op: order
    levels:
      - { key: name, descending: true }
"#;

    #[test]
    fn parses_steps_and_config() {
        let q = Query::from_yaml(DOC).unwrap();
        assert_eq!(q.steps.len(), 2);
        assert_eq!(q.datasets(), vec!["employees"]);
        let cfg = q.effective_config(SeqConfig::default());
        assert_eq!(cfg.initial_bucket_count, 3);
        assert_eq!(cfg.buffer_seed_capacity, 4);
    }

    #[test]
    fn config_block_overlays_only_set_fields() {
        let q = Query::from_yaml(DOC).unwrap();
        let base = SeqConfig {
            initial_bucket_count: 31,
            buffer_seed_capacity: 16,
        };
        let cfg = q.effective_config(base.clone());
        assert_eq!(cfg.initial_bucket_count, 3);
        assert_eq!(cfg.buffer_seed_capacity, 16);

        let q = Query::from_yaml("steps:\n  - op: group\n    key: a\n").unwrap();
        assert_eq!(q.effective_config(base.clone()), base);
    }

    #[test]
    fn config_block_rejects_zero_and_unknown_fields() {
        let err = Query::from_yaml("config: { buffer_seed_capacity: 0 }\nsteps:\n  - op: group\n    key: a\n")
            .unwrap_err();
        assert!(matches!(err, QueryError::Core(_)));
        let err = Query::from_yaml("config: { buckets: 3 }\nsteps:\n  - op: group\n    key: a\n")
            .unwrap_err();
        assert!(matches!(err, QueryError::Yaml(_)));
    }

    #[test]
    fn explain_lists_steps() {
        let q = Query::from_yaml(DOC).unwrap();
        assert_eq!(
            q.explain(),
            "1. group_join employees on name = dept into staff\n2. order by name desc\n"
        );
    }

    #[test]
    fn unknown_op_is_a_yaml_error() {
        let err = Query::from_yaml("steps:\n  - op: pivot\n    key: a\n").unwrap_err();
        assert!(matches!(err, QueryError::Yaml(_)));
    }

    #[test]
    fn empty_levels_and_paths_rejected() {
        let err = Query::from_yaml("steps:\n  - op: order\n    levels: []\n").unwrap_err();
        assert!(err.to_string().contains("at least one level"));
        let err = Query::from_yaml("steps:\n  - op: group\n    key: \"\"\n").unwrap_err();
        assert!(err.to_string().contains("step 1"));
        assert!(Query::from_yaml("steps: []\n").is_err());
    }
}
