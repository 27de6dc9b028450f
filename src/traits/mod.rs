pub mod property_type;
pub mod introspect;
pub mod contract_asserter;

// Re-export traits
pub use property_type::PropertyType;
pub use introspect::Introspect;
pub use contract_asserter::ContractAsserter;
