//! Per-variable classification.
//!
//! Everything here is a pure function of a variable's value at call time:
//! there is no memory of earlier calls.

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

/// Substrings that mark a value as an unreplaced template.
pub const PLACEHOLDER_MARKERS: [&str; 2] = ["your_", "REPLACE_ME"];

/// Literal that boolean flag variables must equal to count as enabled.
pub const FLAG_ENABLED: &str = "true";

/// Whether a variable's absence makes the reported state unhealthy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VarClass {
    /// Absence makes the report unhealthy; values are checked for placeholders.
    Required,
    /// Tracked for visibility only.
    Optional,
}

/// A named variable and its classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VarSpec {
    /// Environment variable name.
    pub name: &'static str,
    /// Classification.
    pub class: VarClass,
}

impl VarSpec {
    /// Declare a required variable.
    #[must_use]
    pub const fn required(name: &'static str) -> Self {
        Self {
            name,
            class: VarClass::Required,
        }
    }

    /// Declare an optional variable.
    #[must_use]
    pub const fn optional(name: &'static str) -> Self {
        Self {
            name,
            class: VarClass::Optional,
        }
    }
}

/// Result of checking a single variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VariableCheck {
    /// Present and non-empty.
    pub configured: bool,
    /// Present with a value of length > 0.
    pub has_value: bool,
    /// Required variables only: unset, or still carrying a placeholder marker.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<bool>,
}

impl VariableCheck {
    /// Classify a raw value for the given variable class.
    #[must_use]
    pub fn evaluate(class: VarClass, value: Option<&str>) -> Self {
        let value = value.filter(|value| !value.is_empty());
        let configured = value.is_some();
        let placeholder = match class {
            VarClass::Required => Some(value.is_none_or(contains_placeholder)),
            VarClass::Optional => None,
        };

        Self {
            configured,
            has_value: configured,
            placeholder,
        }
    }
}

/// True when the value contains any placeholder marker.
#[must_use]
pub fn contains_placeholder(value: &str) -> bool {
    PLACEHOLDER_MARKERS
        .iter()
        .any(|marker| value.contains(marker))
}

/// Exact comparison against [`FLAG_ENABLED`]; anything else (including
/// `"TRUE"` or `"1"`) is disabled.
#[must_use]
pub fn flag_enabled(value: Option<&str>) -> bool {
    value == Some(FLAG_ENABLED)
}

/// The value when present and non-empty, otherwise the sentinel.
#[must_use]
pub fn value_or_sentinel(value: Option<&str>, sentinel: &str) -> String {
    value
        .filter(|value| !value.is_empty())
        .unwrap_or(sentinel)
        .to_owned()
}

/// Ordered name → check mapping that serializes as a JSON object.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VariableChecks(Vec<(&'static str, VariableCheck)>);

impl VariableChecks {
    /// Append a check, keeping table order.
    pub fn push(&mut self, name: &'static str, check: VariableCheck) {
        self.0.push((name, check));
    }
}

impl Serialize for VariableChecks {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (name, check) in &self.0 {
            map.serialize_entry(name, check)?;
        }
        map.end()
    }
}
