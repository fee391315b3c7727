use chrono::{Months, NaiveDate};
use serde::Deserialize;
use std::collections::HashMap;

use crate::errors::{ToolboxError, ToolboxResult};

/// Named parameters of one call, from a query string or a JSON body.
/// JSON arrays are also kept item by item in `lists`.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(from = "HashMap<String, String>")]
pub struct QueryParams {
    values: HashMap<String, String>,
    lists: HashMap<String, Vec<String>>,
}

impl From<HashMap<String, String>> for QueryParams {
    fn from(values: HashMap<String, String>) -> Self {
        Self {
            values,
            lists: HashMap::new(),
        }
    }
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: &str, value: &str) -> Self {
        self.values.insert(name.to_string(), value.to_string());
        self
    }

    /// Raw value as supplied, if present. Lists read back comma-joined.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    /// Id list: a JSON array is taken item by item, a string is split on
    /// commas. Blanks and repeats are dropped either way.
    pub fn ids(&self, name: &str) -> ToolboxResult<Vec<String>> {
        if let Some(items) = self.lists.get(name) {
            return Ok(dedupe(items.iter().map(String::as_str)));
        }
        self.get(name)
            .map(split_ids)
            .ok_or_else(|| ToolboxError::MissingParameter(name.to_string()))
    }

    /// Trimmed value; absent or blank is `MissingParameter`.
    pub fn require(&self, name: &str) -> ToolboxResult<&str> {
        self.get(name)
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .ok_or_else(|| ToolboxError::MissingParameter(name.to_string()))
    }

    /// Parameters from a JSON object body. Strings are taken as-is, numbers
    /// and booleans in their JSON text form, arrays of those joined with `,`.
    /// `null` counts as absent.
    pub fn from_json(body: &serde_json::Value) -> ToolboxResult<Self> {
        let object = match body {
            serde_json::Value::Null => return Ok(Self::new()),
            serde_json::Value::Object(map) => map,
            _ => return Err(ToolboxError::invalid("body", "expected a JSON object of parameters")),
        };

        let mut params = Self::new();
        for (name, value) in object {
            match value {
                serde_json::Value::Null => continue,
                serde_json::Value::Array(items) => {
                    let items = items
                        .iter()
                        .map(|item| scalar_text(name, item))
                        .collect::<ToolboxResult<Vec<_>>>()?;
                    params.values.insert(name.clone(), items.join(","));
                    params.lists.insert(name.clone(), items);
                }
                other => {
                    params.values.insert(name.clone(), scalar_text(name, other)?);
                }
            }
        }
        Ok(params)
    }
}

fn scalar_text(name: &str, value: &serde_json::Value) -> ToolboxResult<String> {
    match value {
        serde_json::Value::String(s) => Ok(s.clone()),
        serde_json::Value::Number(n) => Ok(n.to_string()),
        serde_json::Value::Bool(b) => Ok(b.to_string()),
        _ => Err(ToolboxError::invalid(name, "expected a string, number or list of strings")),
    }
}

/// Parse a `yyyy-mm-dd` date and return the half-open window
/// `[date, date + 1 month)`. Month arithmetic clamps to the end of the
/// following month, e.g. `2023-01-31` ends at `2023-02-28`.
pub fn month_window(name: &str, raw: &str) -> ToolboxResult<(NaiveDate, NaiveDate)> {
    let start = NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|e| ToolboxError::invalid(name, format!("expected yyyy-mm-dd, got {:?} ({})", raw, e)))?;
    let end = start
        .checked_add_months(Months::new(1))
        .ok_or_else(|| ToolboxError::invalid(name, "date out of range"))?;
    Ok((start, end))
}

/// Split a comma-separated id list, dropping blanks and repeats.
pub fn split_ids(raw: &str) -> Vec<String> {
    dedupe(raw.split(','))
}

fn dedupe<'a>(items: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut ids: Vec<String> = Vec::new();
    for id in items.map(str::trim).filter(|id| !id.is_empty()) {
        if !ids.iter().any(|seen| seen == id) {
            ids.push(id.to_string());
        }
    }
    ids
}
