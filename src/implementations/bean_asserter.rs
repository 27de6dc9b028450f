use log::info;

use crate::config::AsserterConfig;
use crate::errors::{ ContractError, ContractResult, ContractViolation, ViolationKind };
use crate::implementations::accessor::AccessorContractAsserter;
use crate::implementations::equality::EqualityContractAsserter;
use crate::implementations::immutable::ImmutableConstructionAsserter;
use crate::implementations::introspector::PropertyIntrospector;
use crate::implementations::registry::{ default_types, TypeDefaults };
use crate::models::common::ContractKind;
use crate::models::exclusion::ExclusionSet;
use crate::models::value::Value;
use crate::models::verification::ContractReport;
use crate::traits::contract_asserter::ContractAsserter;
use crate::traits::introspect::Introspect;
use crate::traits::property_type::PropertyType;

/// Entry point bundling a registry and configuration for all contract checks
#[derive(Debug, Clone, Default)]
pub struct BeanAsserter {
    defaults: TypeDefaults,
    config: AsserterConfig,
}

impl BeanAsserter {
    pub fn new(defaults: TypeDefaults) -> Self {
        BeanAsserter {
            defaults,
            config: AsserterConfig::default(),
        }
    }

    /// Uses a snapshot of the process-wide registry
    pub fn from_global() -> Self {
        Self::new(default_types())
    }

    pub fn with_config(mut self, config: AsserterConfig) -> Self {
        self.config = config;
        self
    }

    pub fn register<D: PropertyType>(&mut self, value: D) -> &mut Self {
        self.defaults.register(value);
        self
    }

    pub fn defaults(&self) -> &TypeDefaults {
        &self.defaults
    }

    pub fn defaults_mut(&mut self) -> &mut TypeDefaults {
        &mut self.defaults
    }

    pub fn config(&self) -> &AsserterConfig {
        &self.config
    }

    fn exclusions(&self, excluded: &[&str]) -> ExclusionSet {
        ExclusionSet::merged(excluded, &self.config.excluded_properties)
    }

    fn run<A: ContractAsserter, T: Introspect>(
        asserter: &A,
        excluded: &ExclusionSet
    ) -> ContractResult<ContractReport> {
        info!("Asserting {} contract", asserter.contract());
        asserter.assert_contract::<T>(excluded)
    }

    /// Accessor round trips on every writable property, then the equality walk.
    /// A bean needs a zero-argument constructor and at least one settable property.
    pub fn assert_bean<T: Introspect>(&self) -> ContractResult<ContractReport> {
        let excluded = self.exclusions(&[]);
        let descriptor = PropertyIntrospector::inspect::<T>()?;
        let type_name = descriptor.type_name();

        let settable = descriptor
            .properties()
            .iter()
            .any(|access| access.is_writable() && !excluded.contains(access.name()));
        if !settable {
            return Err(
                ContractViolation::new(
                    ViolationKind::Accessor,
                    type_name,
                    format!("{} has no settable properties; it is immutable, not a bean", type_name)
                ).raise()
            );
        }
        if !descriptor.has_zero_arg() {
            return Err(
                (ContractError::NotConstructible {
                    type_name: type_name.to_string(),
                }).logged()
            );
        }

        let accessors = Self::run::<_, T>(&AccessorContractAsserter::new(&self.defaults), &excluded)?;
        let equality = Self::run::<_, T>(
            &EqualityContractAsserter::new(&self.defaults, &self.config),
            &excluded
        )?;

        let mut report = ContractReport::new(ContractKind::Bean, &accessors.type_name);
        report.absorb(accessors);
        report.absorb(equality);
        Ok(report)
    }

    pub fn assert_equals_hash_code<T: Introspect>(&self, excluded: &[&str]) -> ContractResult<ContractReport> {
        Self::run::<_, T>(
            &EqualityContractAsserter::new(&self.defaults, &self.config),
            &self.exclusions(excluded)
        )
    }

    pub fn assert_getters_on_constructor_immutable_object<T: Introspect>(
        &self,
        excluded: &[&str]
    ) -> ContractResult<ContractReport> {
        Self::run::<_, T>(&ImmutableConstructionAsserter::new(&self.defaults), &self.exclusions(excluded))
    }

    /// Round-trip one property; `None` takes the registry default
    pub fn assert_basic_getter_setter_behavior<T: Introspect>(
        &self,
        property: &str,
        value: Option<Value>
    ) -> ContractResult<()> {
        AccessorContractAsserter::new(&self.defaults).assert_accessor::<T>(property, value)
    }

    pub fn assert_basic_getter_setter_behavior_with_blacklist<T: Introspect>(
        &self,
        excluded: &[&str]
    ) -> ContractResult<ContractReport> {
        Self::run::<_, T>(&AccessorContractAsserter::new(&self.defaults), &self.exclusions(excluded))
    }

    /// Round-trip the named properties with the given (or default) values
    pub fn assert_basic_getter_setter_behavior_with_values<T: Introspect>(
        &self,
        values: Vec<(&str, Option<Value>)>
    ) -> ContractResult<ContractReport> {
        AccessorContractAsserter::new(&self.defaults).assert_accessors_with::<T>(values)
    }

    /// A representative instance: built by the designated constructor with
    /// registry arguments, or by the zero-argument constructor with every
    /// writable property set to its registry default.
    pub fn create_object<T: Introspect>(&self) -> ContractResult<T> {
        let descriptor = PropertyIntrospector::inspect::<T>()?;
        if descriptor.constructors().is_empty() {
            let mut instance = descriptor.instantiate()?;
            for access in descriptor.properties().iter().filter(|access| access.is_writable()) {
                let value = self.defaults.lookup_value(access.declared_type())?;
                access.write(&mut instance, &value)?;
            }
            return Ok(instance);
        }
        let constructor = descriptor.designated_constructor()?;
        let args = constructor.arguments_from(descriptor.type_name(), &self.defaults)?;
        constructor.construct(&args)
    }
}

/// `BeanAsserter::assert_bean` against the process-wide registry
pub fn assert_bean<T: Introspect>() -> ContractResult<ContractReport> {
    BeanAsserter::from_global().assert_bean::<T>()
}

pub fn assert_equals_hash_code<T: Introspect>(excluded: &[&str]) -> ContractResult<ContractReport> {
    BeanAsserter::from_global().assert_equals_hash_code::<T>(excluded)
}

pub fn assert_getters_on_constructor_immutable_object<T: Introspect>(
    excluded: &[&str]
) -> ContractResult<ContractReport> {
    BeanAsserter::from_global().assert_getters_on_constructor_immutable_object::<T>(excluded)
}

pub fn assert_basic_getter_setter_behavior<T: Introspect>(
    property: &str,
    value: Option<Value>
) -> ContractResult<()> {
    BeanAsserter::from_global().assert_basic_getter_setter_behavior::<T>(property, value)
}

pub fn assert_basic_getter_setter_behavior_with_blacklist<T: Introspect>(
    excluded: &[&str]
) -> ContractResult<ContractReport> {
    BeanAsserter::from_global().assert_basic_getter_setter_behavior_with_blacklist::<T>(excluded)
}

pub fn create_object<T: Introspect>() -> ContractResult<T> {
    BeanAsserter::from_global().create_object::<T>()
}
