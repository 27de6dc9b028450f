pub mod common;
pub mod value;
pub mod property;
pub mod exclusion;
pub mod bean;
pub mod verification;

// Re-export common model types
pub use common::{ ContractKind, Semantics };
pub use value::{ TypeRef, Value };
pub use property::PropertyDescriptor;
pub use exclusion::ExclusionSet;
pub use bean::{ hash_of, param, BeanDescriptor, ConstructorArgs, ConstructorSpec, ParamSpec, PropertyAccess };
pub use verification::ContractReport;
