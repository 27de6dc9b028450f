use std::fmt;

use serde::Serialize;

/// How a declared property type is compared after a round trip
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Semantics {
    ByValue,     // Compared with `==`
    ByReference, // The exact instance must come back
}

/// The behavioral contracts the engine can check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ContractKind {
    Accessor,
    EqualsHashCode,
    ImmutableConstruction,
    Bean,
}

impl fmt::Display for ContractKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContractKind::Accessor => write!(f, "accessor"),
            ContractKind::EqualsHashCode => write!(f, "equals/hash"),
            ContractKind::ImmutableConstruction => write!(f, "immutable construction"),
            ContractKind::Bean => write!(f, "bean"),
        }
    }
}

/// Strips the module path (and generic arguments) from a `std::any::type_name`
pub fn simple_type_name(full: &str) -> &str {
    let base = full.split('<').next().unwrap_or(full);
    base.rsplit("::").next().unwrap_or(base)
}
