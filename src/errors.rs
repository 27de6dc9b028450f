use std::fmt;

use serde::Serialize;
use thiserror::Error;

use crate::config::ConfigError;

/// Errors raised while asserting an object contract
#[derive(Debug, Error)]
pub enum ContractError {
    #[error("Introspection error on {type_name}: {message}")]
    Introspection { type_name: String, message: String },

    #[error("Could not construct {type_name}: no zero-argument or designated constructor")]
    NotConstructible { type_name: String },

    #[error("Ambiguous constructors on {type_name}: {candidates:?}, mark exactly one as primary")]
    AmbiguousConstructor { type_name: String, candidates: Vec<String> },

    #[error("No default value registered or constructible for type {type_name}")]
    UnresolvableType { type_name: String },

    #[error(transparent)]
    Violation(#[from] ContractViolation),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Result type specific to contract assertions
pub type ContractResult<T> = Result<T, ContractError>;

impl ContractError {
    pub fn introspection(type_name: &str, message: impl Into<String>) -> Self {
        ContractError::Introspection {
            type_name: type_name.to_string(),
            message: message.into(),
        }
    }

    /// Log the failure before handing it to the caller
    pub(crate) fn logged(self) -> Self {
        log::error!("{}", self);
        self
    }

    /// The violation kind, when this error is a contract violation
    pub fn violation_kind(&self) -> Option<ViolationKind> {
        match self {
            ContractError::Violation(violation) => Some(violation.kind),
            _ => None,
        }
    }
}

/// The rule a type broke
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ViolationKind {
    Accessor,
    Equality,
    NotOverridden,
    MutableAfterConstruction,
    UnverifiableProperty,
}

impl fmt::Display for ViolationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ViolationKind::Accessor => write!(f, "accessor"),
            ViolationKind::Equality => write!(f, "equality"),
            ViolationKind::NotOverridden => write!(f, "not-overridden"),
            ViolationKind::MutableAfterConstruction => write!(f, "mutable-after-construction"),
            ViolationKind::UnverifiableProperty => write!(f, "unverifiable-property"),
        }
    }
}

/// A failed behavioral check
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind} contract violated by {type_name}{}: {message}", property_suffix(.property))]
pub struct ContractViolation {
    pub kind: ViolationKind,
    pub type_name: String,
    pub property: Option<String>,
    pub message: String,
}

fn property_suffix(property: &Option<String>) -> String {
    match property {
        Some(name) => format!(".{}", name),
        None => String::new(),
    }
}

impl ContractViolation {
    pub fn new(kind: ViolationKind, type_name: &str, message: impl Into<String>) -> Self {
        Self {
            kind,
            type_name: type_name.to_string(),
            property: None,
            message: message.into(),
        }
    }

    pub fn on_property(mut self, property: &str) -> Self {
        self.property = Some(property.to_string());
        self
    }

    /// Wrap into a logged `ContractError`
    pub(crate) fn raise(self) -> ContractError {
        ContractError::Violation(self).logged()
    }
}
