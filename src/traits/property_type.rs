use std::any::Any;
use std::fmt::Debug;

use crate::errors::ContractResult;
use crate::implementations::registry::TypeDefaults;
use crate::models::common::Semantics;

/// A type that may appear as a property or constructor parameter.
///
/// Scalar, text, temporal and the common container types are covered by the
/// crate. Your own types get an empty impl, which means they resolve only when
/// registered:
///
/// ```ignore
/// impl PropertyType for AddressDto {}
/// ```
///
/// or override [`PropertyType::synthesize`] to give them a zero-argument
/// construction path.
pub trait PropertyType: Any + Clone + Debug + PartialEq + Send + Sync {
    fn semantics() -> Semantics {
        Semantics::ByValue
    }

    /// Whether `other` counts as "the value that was set". Reference types
    /// compare identity.
    fn same(&self, other: &Self) -> bool {
        self == other
    }

    /// Build a representative value when nothing is registered for this type
    fn synthesize(_defaults: &TypeDefaults) -> ContractResult<Option<Self>> {
        Ok(None)
    }

    /// The "unset" value of a nullable type
    fn absent() -> Option<Self> {
        None
    }
}
