use std::fmt;

use serde::Serialize;

use crate::models::common::ContractKind;

/// Outcome of a successful contract assertion
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContractReport {
    pub contract: ContractKind,
    pub type_name: String,
    /// Properties that were exercised, in enumeration order
    pub checked: Vec<String>,
    /// Properties skipped because they were excluded
    pub skipped: Vec<String>,
}

impl ContractReport {
    pub fn new(contract: ContractKind, type_name: &str) -> Self {
        ContractReport {
            contract,
            type_name: type_name.to_string(),
            checked: Vec::new(),
            skipped: Vec::new(),
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Fold another report for the same type into this one
    pub fn absorb(&mut self, other: ContractReport) {
        for name in other.checked {
            if !self.checked.contains(&name) {
                self.checked.push(name);
            }
        }
        for name in other.skipped {
            if !self.skipped.contains(&name) {
                self.skipped.push(name);
            }
        }
    }
}

impl fmt::Display for ContractReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} contract holds for {} ({} checked",
            self.contract,
            self.type_name,
            self.checked.len()
        )?;
        if self.skipped.is_empty() {
            write!(f, ")")
        } else {
            write!(f, ", skipped: {})", self.skipped.join(", "))
        }
    }
}
