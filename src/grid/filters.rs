//! Filter keys, values and the validity gate.
//!
//! A [`FilterSpec`] fixes the set of filter keys of a collection. A
//! [`FilterSet`] built from it always holds exactly those keys; only values
//! change. The empty string means "unconstrained".

use std::fmt;

/// A paired start/end filter that must be filled in together.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: &'static str,
    pub end: &'static str,
}

/// Static description of the filters a collection accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterSpec {
    pub entity: &'static str,
    /// Every filter key, in display and request order
    pub keys: &'static [&'static str],
    /// Keys whose values are chosen from the backend's filter options
    pub option_keys: &'static [&'static str],
    pub date_range: Option<DateRange>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FilterError {
    #[error("Invalid filter key '{key}' for {entity}")]
    InvalidFilterKey { key: String, entity: &'static str },
}

/// A filter combination that must not be sent to the backend.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Both {start} and {end} must be set, or neither")]
    IncompleteDateRange { start: &'static str, end: &'static str },
}

impl FilterSpec {
    pub fn contains(&self, key: &str) -> bool {
        self.keys.contains(&key)
    }

    pub fn has_options(&self, key: &str) -> bool {
        self.option_keys.contains(&key)
    }

    /// Resolve a caller-supplied key to its static key.
    pub fn resolve(&self, key: &str) -> Result<&'static str, FilterError> {
        self.keys
            .iter()
            .copied()
            .find(|candidate| *candidate == key)
            .ok_or_else(|| FilterError::InvalidFilterKey {
                key: key.to_string(),
                entity: self.entity,
            })
    }

    /// A fresh, all-empty filter set for this collection.
    pub fn defaults(&self) -> FilterSet {
        FilterSet {
            values: self.keys.iter().map(|key| (*key, String::new())).collect(),
        }
    }

    /// A date range is valid when both ends are empty or both are set.
    pub fn validate(&self, filters: &FilterSet) -> Result<(), ValidationError> {
        if let Some(range) = self.date_range {
            let start_set = !filters.get(range.start).unwrap_or_default().is_empty();
            let end_set = !filters.get(range.end).unwrap_or_default().is_empty();
            if start_set != end_set {
                return Err(ValidationError::IncompleteDateRange {
                    start: range.start,
                    end: range.end,
                });
            }
        }
        Ok(())
    }
}

/// Current value per filter key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FilterSet {
    values: Vec<(&'static str, String)>,
}

impl FilterSet {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values
            .iter()
            .find(|(candidate, _)| *candidate == key)
            .map(|(_, value)| value.as_str())
    }

    /// Set the value of an existing key. Unknown keys are rejected, never added.
    pub fn set(&mut self, spec: &FilterSpec, key: &str, value: impl Into<String>) -> Result<(), FilterError> {
        let key = spec.resolve(key)?;
        let slot = self
            .values
            .iter_mut()
            .find(|(candidate, _)| *candidate == key)
            .ok_or_else(|| FilterError::InvalidFilterKey {
                key: key.to_string(),
                entity: spec.entity,
            })?;
        slot.1 = value.into();
        Ok(())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.values.iter().map(|(key, value)| (*key, value.as_str()))
    }

    /// True when no filter constrains the result
    pub fn is_unconstrained(&self) -> bool {
        self.values.iter().all(|(_, value)| value.is_empty())
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl fmt::Display for FilterSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let active: Vec<String> = self
            .values
            .iter()
            .filter(|(_, value)| !value.is_empty())
            .map(|(key, value)| format!("{}={}", key, value))
            .collect();
        if active.is_empty() {
            f.write_str("(none)")
        } else {
            f.write_str(&active.join(", "))
        }
    }
}
