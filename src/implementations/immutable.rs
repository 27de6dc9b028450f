use log::{ debug, info };

use crate::errors::{ ContractResult, ContractViolation, ViolationKind };
use crate::implementations::introspector::PropertyIntrospector;
use crate::implementations::registry::TypeDefaults;
use crate::models::bean::ConstructorArgs;
use crate::models::common::{ ContractKind, Semantics };
use crate::models::exclusion::ExclusionSet;
use crate::models::verification::ContractReport;
use crate::traits::contract_asserter::ContractAsserter;
use crate::traits::introspect::Introspect;

/// Checks that a type built through its designated constructor exposes only
/// read access, and that every accessor returns its constructor argument.
pub struct ImmutableConstructionAsserter<'a> {
    defaults: &'a TypeDefaults,
}

impl<'a> ImmutableConstructionAsserter<'a> {
    pub fn new(defaults: &'a TypeDefaults) -> Self {
        ImmutableConstructionAsserter { defaults }
    }

    pub fn assert_immutable_construction<T: Introspect>(
        &self,
        excluded: &ExclusionSet
    ) -> ContractResult<ContractReport> {
        let descriptor = PropertyIntrospector::inspect::<T>()?;
        let type_name = descriptor.type_name();
        let mut report = ContractReport::new(ContractKind::ImmutableConstruction, type_name);

        // Only a zero-argument constructor: nothing can be correlated, so every
        // readable property must be excluded
        let (instance, args, signature) = if descriptor.constructors().is_empty() && descriptor.has_zero_arg() {
            (
                descriptor.instantiate()?,
                ConstructorArgs::new(type_name, Vec::new()),
                "zero-argument constructor".to_string(),
            )
        } else {
            let constructor = descriptor.designated_constructor()?;
            let args = constructor.arguments_from(type_name, self.defaults)?;
            (constructor.construct(&args)?, args, constructor.signature())
        };
        debug!("Constructed {} with {}", type_name, signature);

        for access in descriptor.properties() {
            if access.is_writable() && !excluded.contains(access.name()) {
                return Err(
                    ContractViolation::new(
                        ViolationKind::MutableAfterConstruction,
                        type_name,
                        format!("property [{}] can still be changed after construction", access.name())
                    )
                        .on_property(access.name())
                        .raise()
                );
            }
        }

        for access in descriptor.properties() {
            if !access.is_readable() {
                continue;
            }
            if excluded.contains(access.name()) {
                report.skipped.push(access.name().to_string());
                continue;
            }

            let supplied = match args.value(access.name()) {
                Some(supplied) => supplied,
                None => {
                    return Err(
                        ContractViolation::new(
                            ViolationKind::UnverifiableProperty,
                            type_name,
                            format!(
                                "property [{}] has no matching parameter in {}; exclude it to skip the check",
                                access.name(),
                                signature
                            )
                        )
                            .on_property(access.name())
                            .raise()
                    );
                }
            };

            let declared = access.declared_type();
            let returned = access.read(&instance)?;
            if !declared.same(supplied, &returned) {
                let expectation = match declared.semantics() {
                    Semantics::ByValue => "a value equal to",
                    Semantics::ByReference => "the same instance as",
                };
                return Err(
                    ContractViolation::new(
                        ViolationKind::Accessor,
                        type_name,
                        format!(
                            "accessor returned {:?}, expected {} the constructor argument {:?}",
                            returned,
                            expectation,
                            supplied
                        )
                    )
                        .on_property(access.name())
                        .raise()
                );
            }
            report.checked.push(access.name().to_string());
        }

        info!("{}", report);
        Ok(report)
    }
}

impl<'a> ContractAsserter for ImmutableConstructionAsserter<'a> {
    fn contract(&self) -> ContractKind {
        ContractKind::ImmutableConstruction
    }

    fn assert_contract<T: Introspect>(&self, excluded: &ExclusionSet) -> ContractResult<ContractReport> {
        self.assert_immutable_construction::<T>(excluded)
    }
}
