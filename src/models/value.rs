use std::any::{ type_name, Any, TypeId };
use std::fmt;
use std::sync::Arc;

use crate::errors::ContractResult;
use crate::implementations::registry::TypeDefaults;
use crate::models::common::Semantics;
use crate::traits::property_type::PropertyType;

trait AnyValue: Any + fmt::Debug + Send + Sync {
    fn as_any(&self) -> &dyn Any;
}

impl<T: Any + fmt::Debug + Send + Sync> AnyValue for T {
    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// A type-erased property value.
///
/// Cloning a `Value` shares the payload, so an `Arc` stored inside keeps its
/// identity no matter how often the value is passed around.
#[derive(Clone)]
pub struct Value {
    type_id: TypeId,
    type_name: &'static str,
    inner: Arc<dyn AnyValue>,
}

impl Value {
    pub fn new<D: PropertyType>(value: D) -> Self {
        Value {
            type_id: TypeId::of::<D>(),
            type_name: type_name::<D>(),
            inner: Arc::new(value),
        }
    }

    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    pub fn is<D: 'static>(&self) -> bool {
        self.type_id == TypeId::of::<D>()
    }

    pub fn downcast_ref<D: 'static>(&self) -> Option<&D> {
        (*self.inner).as_any().downcast_ref::<D>()
    }

    /// Clones the payload out as a `D`
    pub fn downcast<D: PropertyType>(&self) -> Option<D> {
        self.downcast_ref::<D>().cloned()
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", &*self.inner)
    }
}

/// Handle to a declared property or parameter type, with the type-erased
/// operations the asserters need.
#[derive(Clone, Copy)]
pub struct TypeRef {
    id: TypeId,
    name: &'static str,
    semantics: Semantics,
    nullable: bool,
    same: fn(&Value, &Value) -> bool,
    synthesize: fn(&TypeDefaults) -> ContractResult<Value>,
    absent: fn() -> Option<Value>,
}

impl TypeRef {
    pub fn of<D: PropertyType>() -> Self {
        TypeRef {
            id: TypeId::of::<D>(),
            name: type_name::<D>(),
            semantics: D::semantics(),
            nullable: D::absent().is_some(),
            same: same_erased::<D>,
            synthesize: synthesize_erased::<D>,
            absent: absent_erased::<D>,
        }
    }

    pub fn id(&self) -> TypeId {
        self.id
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn semantics(&self) -> Semantics {
        self.semantics
    }

    pub fn is_nullable(&self) -> bool {
        self.nullable
    }

    pub fn accepts(&self, value: &Value) -> bool {
        value.type_id() == self.id
    }

    /// Identity for reference types, equality for value types
    pub fn same(&self, expected: &Value, actual: &Value) -> bool {
        (self.same)(expected, actual)
    }

    pub fn synthesize(&self, defaults: &TypeDefaults) -> ContractResult<Value> {
        (self.synthesize)(defaults)
    }

    /// The "unset" value, for nullable types only
    pub fn absent(&self) -> Option<Value> {
        (self.absent)()
    }
}

impl PartialEq for TypeRef {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TypeRef {}

impl fmt::Debug for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeRef")
            .field("name", &self.name)
            .field("semantics", &self.semantics)
            .field("nullable", &self.nullable)
            .finish()
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

fn same_erased<D: PropertyType>(expected: &Value, actual: &Value) -> bool {
    match (expected.downcast_ref::<D>(), actual.downcast_ref::<D>()) {
        (Some(expected), Some(actual)) => expected.same(actual),
        _ => false,
    }
}

fn synthesize_erased<D: PropertyType>(defaults: &TypeDefaults) -> ContractResult<Value> {
    defaults.lookup::<D>().map(Value::new)
}

fn absent_erased<D: PropertyType>() -> Option<Value> {
    D::absent().map(Value::new)
}
