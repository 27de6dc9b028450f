use log::{ debug, info };

use crate::errors::{ ContractError, ContractResult, ContractViolation, ViolationKind };
use crate::implementations::introspector::PropertyIntrospector;
use crate::implementations::registry::TypeDefaults;
use crate::models::bean::BeanDescriptor;
use crate::models::common::{ ContractKind, Semantics };
use crate::models::exclusion::ExclusionSet;
use crate::models::value::Value;
use crate::models::verification::ContractReport;
use crate::traits::contract_asserter::ContractAsserter;
use crate::traits::introspect::Introspect;

/// Checks that what a mutator stores is exactly what the accessor returns
pub struct AccessorContractAsserter<'a> {
    defaults: &'a TypeDefaults,
}

impl<'a> AccessorContractAsserter<'a> {
    pub fn new(defaults: &'a TypeDefaults) -> Self {
        AccessorContractAsserter { defaults }
    }

    /// Round-trip one property. Without `value`, a registry default is used.
    pub fn assert_accessor<T: Introspect>(&self, property: &str, value: Option<Value>) -> ContractResult<()> {
        let descriptor = PropertyIntrospector::inspect::<T>()?;
        self.round_trip(&descriptor, property, value)
    }

    /// Round-trip every writable, non-excluded property
    pub fn assert_all_accessors<T: Introspect>(&self, excluded: &ExclusionSet) -> ContractResult<ContractReport> {
        let descriptor = PropertyIntrospector::inspect::<T>()?;
        let mut report = ContractReport::new(ContractKind::Accessor, descriptor.type_name());

        for access in descriptor.properties() {
            // Read-only properties cannot be set, so there is nothing to round-trip
            if !access.is_writable() {
                continue;
            }
            if excluded.contains(access.name()) {
                report.skipped.push(access.name().to_string());
                continue;
            }
            self.round_trip(&descriptor, access.name(), None)?;
            report.checked.push(access.name().to_string());
        }

        info!("{}", report);
        Ok(report)
    }

    /// Round-trip the given properties. `None` values come from the registry.
    pub fn assert_accessors_with<T: Introspect>(
        &self,
        values: Vec<(&str, Option<Value>)>
    ) -> ContractResult<ContractReport> {
        let descriptor = PropertyIntrospector::inspect::<T>()?;
        let mut report = ContractReport::new(ContractKind::Accessor, descriptor.type_name());

        for (property, value) in values {
            self.round_trip(&descriptor, property, value)?;
            report.checked.push(property.to_string());
        }

        info!("{}", report);
        Ok(report)
    }

    fn round_trip<T: 'static>(
        &self,
        descriptor: &BeanDescriptor<T>,
        property: &str,
        value: Option<Value>
    ) -> ContractResult<()> {
        let type_name = descriptor.type_name();
        let mut target = descriptor.instantiate()?;
        let access = descriptor.property(property)?;

        if !access.is_readable() || !access.is_writable() {
            return Err(
                ContractError::introspection(
                    type_name,
                    format!("property [{}] needs both an accessor and a mutator", property)
                ).logged()
            );
        }

        let declared = access.declared_type();
        let argument = match value {
            Some(value) if declared.accepts(&value) => value,
            Some(value) => {
                return Err(
                    ContractError::introspection(
                        type_name,
                        format!(
                            "property [{}] is declared as {}, got a value of type {}",
                            property,
                            declared,
                            value.type_name()
                        )
                    ).logged()
                );
            }
            None => self.defaults.lookup_value(declared)?,
        };

        access.write(&mut target, &argument)?;
        let returned = access.read(&target)?;
        debug!("{}.{}: set {:?}, got {:?}", type_name, property, argument, returned);

        if !declared.same(&argument, &returned) {
            let expectation = match declared.semantics() {
                Semantics::ByValue => "a value equal to",
                Semantics::ByReference => "the same instance as",
            };
            return Err(
                ContractViolation::new(
                    ViolationKind::Accessor,
                    type_name,
                    format!(
                        "getter/setter failed: accessor returned {:?}, expected {} {:?}",
                        returned,
                        expectation,
                        argument
                    )
                )
                    .on_property(property)
                    .raise()
            );
        }
        Ok(())
    }
}

impl<'a> ContractAsserter for AccessorContractAsserter<'a> {
    fn contract(&self) -> ContractKind {
        ContractKind::Accessor
    }

    fn assert_contract<T: Introspect>(&self, excluded: &ExclusionSet) -> ContractResult<ContractReport> {
        self.assert_all_accessors::<T>(excluded)
    }
}
