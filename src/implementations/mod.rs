pub mod registry;
pub mod builtin_types;
pub mod introspector;
pub mod accessor;
pub mod equality;
pub mod immutable;
pub mod bean_asserter;
