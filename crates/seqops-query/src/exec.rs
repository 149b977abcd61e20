//! Runs a [`Query`] over in-memory records.

use std::collections::HashMap;

use serde_json::Value;

use seqops_core::config::SeqConfig;
use seqops_operators::group::to_lookup_with;
use seqops_operators::join::{group_join_with, join_with};
use seqops_operators::sort::{BoxedLevel, OrderedSequence, SortLevel};

use crate::compare::{JsonEquality, JsonOrder};
use crate::dsl::{OrderLevel, Query, Step};
use crate::error::{QueryError, Result};
use crate::path::KeyPath;

/// Executes queries; owns the named datasets joins read from.
#[derive(Debug, Default)]
pub struct Executor {
    config: SeqConfig,
    datasets: HashMap<String, Vec<Value>>,
}

impl Executor {
    pub fn new(config: SeqConfig) -> Self {
        Self {
            config,
            datasets: HashMap::new(),
        }
    }

    pub fn config(&self) -> &SeqConfig {
        &self.config
    }

    pub fn with_dataset(mut self, name: impl Into<String>, records: Vec<Value>) -> Self {
        self.add_dataset(name, records);
        self
    }

    /// Register (or replace) a dataset that join steps can name as `inner`.
    pub fn add_dataset(&mut self, name: impl Into<String>, records: Vec<Value>) {
        self.datasets.insert(name.into(), records);
    }

    fn dataset(&self, name: &str) -> Result<&[Value]> {
        self.datasets
            .get(name)
            .map(Vec::as_slice)
            .ok_or_else(|| QueryError::UnknownDataset(name.to_string()))
    }

    /// Run every step in order; each step consumes the previous output.
    pub fn run(&self, query: &Query, input: Vec<Value>) -> Result<Vec<Value>> {
        query.validate()?;
        self.config.validate()?;
        for name in query.datasets() {
            self.dataset(name)?;
        }

        let mut records = input;
        for step in &query.steps {
            #[cfg(feature = "tracing")]
            let rows_in = records.len();

            records = self.run_step(step, records)?;

            #[cfg(feature = "tracing")]
            tracing::debug!(step = step.name(), rows_in, rows_out = records.len(), "query step");
        }
        Ok(records)
    }

    fn run_step(&self, step: &Step, records: Vec<Value>) -> Result<Vec<Value>> {
        match step {
            Step::Group {
                key,
                element,
                ignore_case,
            } => self.group(records, key, element.as_deref(), *ignore_case),
            Step::Order { levels } => self.order(records, levels),
            Step::Join {
                inner,
                outer_key,
                inner_key,
                into,
                ignore_case,
            } => {
                require_objects(&records, "join")?;
                let outer_key = KeyPath::parse(outer_key)?;
                let inner_key = KeyPath::parse(inner_key)?;
                let joined = join_with(
                    records,
                    self.dataset(inner)?,
                    |o| outer_key.lookup(o).cloned(),
                    |i| inner_key.lookup(i).cloned(),
                    |o, i| attach(o.clone(), into, (*i).clone()),
                    JsonEquality::new(*ignore_case),
                    &self.config,
                )?;
                Ok(joined.collect())
            }
            Step::GroupJoin {
                inner,
                outer_key,
                inner_key,
                into,
                ignore_case,
            } => {
                require_objects(&records, "group_join")?;
                let outer_key = KeyPath::parse(outer_key)?;
                let inner_key = KeyPath::parse(inner_key)?;
                let joined = group_join_with(
                    records,
                    self.dataset(inner)?,
                    |o| outer_key.lookup(o).cloned(),
                    |i| inner_key.lookup(i).cloned(),
                    |o, matches| {
                        let matches: Vec<Value> = matches.iter().map(|m| (*m).clone()).collect();
                        attach(o, into, Value::Array(matches))
                    },
                    JsonEquality::new(*ignore_case),
                    &self.config,
                )?;
                Ok(joined.collect())
            }
        }
    }

    fn group(
        &self,
        records: Vec<Value>,
        key: &str,
        element: Option<&str>,
        ignore_case: bool,
    ) -> Result<Vec<Value>> {
        let key = KeyPath::parse(key)?;
        let element = element.map(KeyPath::parse).transpose()?;
        let lookup = to_lookup_with(
            records,
            |r: &Value| key.value_or_null(r),
            |r: Value| match &element {
                Some(path) => path.value_or_null(&r),
                None => r,
            },
            JsonEquality::new(ignore_case),
            &self.config,
        )?;
        lookup
            .into_groupings()
            .map(|g| serde_json::to_value(&g).map_err(QueryError::from))
            .collect()
    }

    fn order(&self, records: Vec<Value>, levels: &[OrderLevel]) -> Result<Vec<Value>> {
        let mut chain: Vec<BoxedLevel<'static, Value>> = Vec::with_capacity(levels.len());
        for level in levels {
            let path = KeyPath::parse(&level.key)?;
            chain.push(Box::new(SortLevel::new(
                move |r: &Value| path.value_or_null(r),
                JsonOrder::new(level.ignore_case),
                level.direction(),
            )));
        }
        let ordered = OrderedSequence::from_levels(records.into_iter(), chain)?.with_config(&self.config);
        Ok(ordered.into_iter().collect())
    }
}

fn require_objects(records: &[Value], step: &str) -> Result<()> {
    match records.iter().position(|r| !r.is_object()) {
        Some(idx) => Err(QueryError::invalid(format!(
            "{step} step needs object records; record {idx} is not an object"
        ))),
        None => Ok(()),
    }
}

fn attach(mut record: Value, field: &str, value: Value) -> Value {
    if let Value::Object(map) = &mut record {
        map.insert(field.to_string(), value);
    }
    record
}
