pub mod models;
pub mod traits;
pub mod errors;
pub mod config;
pub mod implementations;
#[cfg(test)]
pub mod tests;

// Re-export core components
pub use config::{ AsserterConfig, ConfigError };
pub use errors::{ ContractError, ContractResult, ContractViolation, ViolationKind };
pub use implementations::{
    accessor::AccessorContractAsserter,
    bean_asserter::{
        assert_basic_getter_setter_behavior,
        assert_basic_getter_setter_behavior_with_blacklist,
        assert_bean,
        assert_equals_hash_code,
        assert_getters_on_constructor_immutable_object,
        create_object,
        BeanAsserter,
    },
    equality::EqualityContractAsserter,
    immutable::ImmutableConstructionAsserter,
    introspector::PropertyIntrospector,
    registry::{
        default_types,
        register_type_and_default_argument,
        reset_to_default_types,
        ScopedDefaults,
        TypeDefaults,
        TEXT_DEFAULT,
    },
};
pub use models::{
    bean::{ hash_of, param, BeanDescriptor, ConstructorArgs },
    common::{ ContractKind, Semantics },
    exclusion::ExclusionSet,
    property::PropertyDescriptor,
    value::{ TypeRef, Value },
    verification::ContractReport,
};
pub use traits::{ ContractAsserter, Introspect, PropertyType };
