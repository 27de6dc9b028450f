use std::any::type_name;
use std::collections::hash_map::DefaultHasher;
use std::hash::{ Hash, Hasher };

use crate::errors::{ ContractError, ContractResult };
use crate::implementations::registry::TypeDefaults;
use crate::models::common::simple_type_name;
use crate::models::property::PropertyDescriptor;
use crate::models::value::{ TypeRef, Value };
use crate::traits::property_type::PropertyType;

type Getter<T> = Box<dyn Fn(&T) -> Value>;
type Setter<T> = Box<dyn Fn(&mut T, &Value) -> ContractResult<()>>;
type Build<T> = Box<dyn Fn(&ConstructorArgs) -> ContractResult<T>>;
pub type EqualsFn<T> = Box<dyn Fn(&T, &T) -> bool>;
pub type HashFn<T> = Box<dyn Fn(&T) -> u64>;

/// Hash a value with the standard library's default hasher
pub fn hash_of<H: Hash + ?Sized>(value: &H) -> u64 {
    let mut hasher = DefaultHasher::new();
    value.hash(&mut hasher);
    hasher.finish()
}

/// Accessor and mutator of one property, erased to `Value`
pub struct PropertyAccess<T> {
    owner: &'static str,
    name: String,
    declared_type: TypeRef,
    getter: Option<Getter<T>>,
    setter: Option<Setter<T>>,
}

impl<T: 'static> PropertyAccess<T> {
    fn new<D: PropertyType>(name: &str) -> Self {
        PropertyAccess {
            owner: simple_type_name(type_name::<T>()),
            name: name.to_string(),
            declared_type: TypeRef::of::<D>(),
            getter: None,
            setter: None,
        }
    }

    fn with_getter<D: PropertyType>(mut self, get: impl Fn(&T) -> D + 'static) -> Self {
        self.getter = Some(Box::new(move |target: &T| Value::new(get(target))));
        self
    }

    fn with_setter<D: PropertyType>(mut self, set: impl Fn(&mut T, D) + 'static) -> Self {
        let owner = self.owner;
        let property = self.name.clone();
        self.setter = Some(
            Box::new(move |target: &mut T, value: &Value| {
                let argument = value.downcast::<D>().ok_or_else(|| {
                    ContractError::introspection(
                        owner,
                        format!(
                            "mutator for [{}] expects {}, got {}",
                            property,
                            type_name::<D>(),
                            value.type_name()
                        )
                    ).logged()
                })?;
                set(target, argument);
                Ok(())
            })
        );
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn declared_type(&self) -> &TypeRef {
        &self.declared_type
    }

    pub fn is_readable(&self) -> bool {
        self.getter.is_some()
    }

    pub fn is_writable(&self) -> bool {
        self.setter.is_some()
    }

    pub fn describe(&self) -> PropertyDescriptor {
        PropertyDescriptor {
            name: self.name.clone(),
            declared_type: self.declared_type,
            readable: self.is_readable(),
            writable: self.is_writable(),
        }
    }

    pub fn read(&self, target: &T) -> ContractResult<Value> {
        match &self.getter {
            Some(get) => Ok(get(target)),
            None =>
                Err(
                    ContractError::introspection(
                        self.owner,
                        format!("property [{}] has no accessor", self.name)
                    ).logged()
                ),
        }
    }

    pub fn write(&self, target: &mut T, value: &Value) -> ContractResult<()> {
        match &self.setter {
            Some(set) => set(target, value),
            None =>
                Err(
                    ContractError::introspection(
                        self.owner,
                        format!("property [{}] has no mutator", self.name)
                    ).logged()
                ),
        }
    }
}

/// A named, typed constructor parameter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamSpec {
    pub name: String,
    pub declared_type: TypeRef,
}

pub fn param<D: PropertyType>(name: &str) -> ParamSpec {
    ParamSpec {
        name: name.to_string(),
        declared_type: TypeRef::of::<D>(),
    }
}

/// Arguments handed to a constructor, keyed by parameter name
#[derive(Debug, Clone)]
pub struct ConstructorArgs {
    owner: &'static str,
    values: Vec<(String, Value)>,
}

impl ConstructorArgs {
    pub fn new(owner: &'static str, values: Vec<(String, Value)>) -> Self {
        ConstructorArgs { owner, values }
    }

    pub fn value(&self, name: &str) -> Option<&Value> {
        self.values
            .iter()
            .find(|(param, _)| param == name)
            .map(|(_, value)| value)
    }

    pub fn get<D: PropertyType>(&self, name: &str) -> ContractResult<D> {
        self.value(name)
            .and_then(Value::downcast::<D>)
            .ok_or_else(|| {
                ContractError::introspection(
                    self.owner,
                    format!("constructor argument [{}] of type {} was not supplied", name, type_name::<D>())
                ).logged()
            })
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// A constructor taking one or more parameters
pub struct ConstructorSpec<T> {
    name: String,
    params: Vec<ParamSpec>,
    primary: bool,
    build: Build<T>,
}

impl<T> ConstructorSpec<T> {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn params(&self) -> &[ParamSpec] {
        &self.params
    }

    pub fn is_primary(&self) -> bool {
        self.primary
    }

    /// e.g. `new(id: alloc::string::String)`
    pub fn signature(&self) -> String {
        let params: Vec<String> = self.params
            .iter()
            .map(|param| format!("{}: {}", param.name, param.declared_type))
            .collect();
        format!("{}({})", self.name, params.join(", "))
    }

    /// Look up a default for every parameter
    pub fn arguments_from(&self, owner: &'static str, defaults: &TypeDefaults) -> ContractResult<ConstructorArgs> {
        let mut values = Vec::with_capacity(self.params.len());
        for param in &self.params {
            let value = defaults.lookup_value(&param.declared_type)?;
            log::debug!("{}::{} argument [{}] = {:?}", owner, self.name, param.name, value);
            values.push((param.name.clone(), value));
        }
        Ok(ConstructorArgs::new(owner, values))
    }

    pub fn construct(&self, args: &ConstructorArgs) -> ContractResult<T> {
        (self.build)(args)
    }
}

/// An equality or hash function and the level that declares it
pub struct Declared<F> {
    level: String,
    function: F,
}

impl<F> Declared<F> {
    pub fn level(&self) -> &str {
        &self.level
    }

    pub fn function(&self) -> &F {
        &self.function
    }
}

/// The self-description a type hands to the asserters: its properties,
/// constructors and equality.
pub struct BeanDescriptor<T> {
    type_name: &'static str,
    properties: Vec<PropertyAccess<T>>,
    zero_arg: Option<Box<dyn Fn() -> T>>,
    constructors: Vec<ConstructorSpec<T>>,
    equals: Option<Declared<EqualsFn<T>>>,
    hash: Option<Declared<HashFn<T>>>,
}

impl<T: 'static> BeanDescriptor<T> {
    pub fn new() -> Self {
        BeanDescriptor {
            type_name: simple_type_name(type_name::<T>()),
            properties: Vec::new(),
            zero_arg: None,
            constructors: Vec::new(),
            equals: None,
            hash: None,
        }
    }

    pub fn zero_arg(mut self, construct: impl Fn() -> T + 'static) -> Self {
        self.zero_arg = Some(Box::new(construct));
        self
    }

    pub fn default_constructible(self) -> Self where T: Default {
        self.zero_arg(T::default)
    }

    pub fn read_write<D: PropertyType>(
        mut self,
        name: &str,
        get: impl Fn(&T) -> D + 'static,
        set: impl Fn(&mut T, D) + 'static
    ) -> Self {
        self.properties.push(PropertyAccess::new::<D>(name).with_getter(get).with_setter(set));
        self
    }

    pub fn read_only<D: PropertyType>(mut self, name: &str, get: impl Fn(&T) -> D + 'static) -> Self {
        self.properties.push(PropertyAccess::new::<D>(name).with_getter(get));
        self
    }

    pub fn write_only<D: PropertyType>(mut self, name: &str, set: impl Fn(&mut T, D) + 'static) -> Self {
        self.properties.push(PropertyAccess::new::<D>(name).with_setter(set));
        self
    }

    pub fn constructor(
        self,
        name: &str,
        params: Vec<ParamSpec>,
        build: impl Fn(&ConstructorArgs) -> ContractResult<T> + 'static
    ) -> Self {
        self.add_constructor(name, params, false, build)
    }

    /// A constructor that wins when several are declared
    pub fn primary_constructor(
        self,
        name: &str,
        params: Vec<ParamSpec>,
        build: impl Fn(&ConstructorArgs) -> ContractResult<T> + 'static
    ) -> Self {
        self.add_constructor(name, params, true, build)
    }

    fn add_constructor(
        mut self,
        name: &str,
        params: Vec<ParamSpec>,
        primary: bool,
        build: impl Fn(&ConstructorArgs) -> ContractResult<T> + 'static
    ) -> Self {
        self.constructors.push(ConstructorSpec {
            name: name.to_string(),
            params,
            primary,
            build: Box::new(build),
        });
        self
    }

    /// Equality implemented at `level`, which may be a type this one delegates to
    pub fn equals_declared_by(mut self, level: &str, equals: impl Fn(&T, &T) -> bool + 'static) -> Self {
        self.equals = Some(Declared {
            level: level.to_string(),
            function: Box::new(equals),
        });
        self
    }

    pub fn hash_declared_by(mut self, level: &str, hash: impl Fn(&T) -> u64 + 'static) -> Self {
        self.hash = Some(Declared {
            level: level.to_string(),
            function: Box::new(hash),
        });
        self
    }

    /// `PartialEq` and `Hash` both implemented on the type itself
    pub fn derived_equality(self) -> Self where T: PartialEq + Hash {
        let level = type_name::<T>();
        self.equals_declared_by(level, |a: &T, b: &T| a == b).hash_declared_by(level, |target: &T|
            hash_of(target)
        )
    }

    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    pub fn properties(&self) -> &[PropertyAccess<T>] {
        &self.properties
    }

    pub fn property(&self, name: &str) -> ContractResult<&PropertyAccess<T>> {
        self.properties
            .iter()
            .find(|access| access.name() == name)
            .ok_or_else(|| {
                ContractError::introspection(
                    self.type_name,
                    format!("no property named [{}]. Do you have a getter and a setter?", name)
                ).logged()
            })
    }

    pub fn constructors(&self) -> &[ConstructorSpec<T>] {
        &self.constructors
    }

    pub fn has_zero_arg(&self) -> bool {
        self.zero_arg.is_some()
    }

    /// A fresh instance from the zero-argument constructor
    pub fn instantiate(&self) -> ContractResult<T> {
        match &self.zero_arg {
            Some(construct) => Ok(construct()),
            None =>
                Err(
                    (ContractError::NotConstructible {
                        type_name: self.type_name.to_string(),
                    }).logged()
                ),
        }
    }

    /// The only constructor, or the single primary one among several
    pub fn designated_constructor(&self) -> ContractResult<&ConstructorSpec<T>> {
        match self.constructors.as_slice() {
            [] =>
                Err(
                    (ContractError::NotConstructible {
                        type_name: self.type_name.to_string(),
                    }).logged()
                ),
            [only] => Ok(only),
            candidates => {
                let primaries: Vec<&ConstructorSpec<T>> = candidates
                    .iter()
                    .filter(|constructor| constructor.is_primary())
                    .collect();
                match primaries.as_slice() {
                    [primary] => Ok(*primary),
                    _ =>
                        Err(
                            (ContractError::AmbiguousConstructor {
                                type_name: self.type_name.to_string(),
                                candidates: candidates.iter().map(ConstructorSpec::signature).collect(),
                            }).logged()
                        ),
                }
            }
        }
    }

    pub fn equality(&self) -> Option<&Declared<EqualsFn<T>>> {
        self.equals.as_ref()
    }

    pub fn hashing(&self) -> Option<&Declared<HashFn<T>>> {
        self.hash.as_ref()
    }
}

impl<T: 'static> Default for BeanDescriptor<T> {
    fn default() -> Self {
        Self::new()
    }
}
