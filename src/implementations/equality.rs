use std::any::Any;

use log::{ debug, info };

use crate::config::AsserterConfig;
use crate::errors::{ ContractResult, ContractViolation, ViolationKind };
use crate::implementations::introspector::PropertyIntrospector;
use crate::implementations::registry::TypeDefaults;
use crate::models::bean::{ BeanDescriptor, EqualsFn, HashFn, PropertyAccess };
use crate::models::common::{ simple_type_name, ContractKind };
use crate::models::exclusion::ExclusionSet;
use crate::models::value::Value;
use crate::models::verification::ContractReport;
use crate::traits::contract_asserter::ContractAsserter;
use crate::traits::introspect::Introspect;

/// Stand-in for "an instance of some unrelated type"
struct OtherType;

/// Checks the equality/hash laws, then perturbs each writable property on one
/// of two equal instances to catch fields missing from either function.
pub struct EqualityContractAsserter<'a> {
    defaults: &'a TypeDefaults,
    config: &'a AsserterConfig,
}

/// The pieces of one per-property walk
struct Walk<'d, T> {
    type_name: &'static str,
    equals: &'d EqualsFn<T>,
    hash: &'d HashFn<T>,
}

impl<'d, T: 'static> Walk<'d, T> {
    fn violation(&self, message: String) -> ContractViolation {
        ContractViolation::new(ViolationKind::Equality, self.type_name, message)
    }

    /// Untyped comparison: anything that is not a `T` is unequal. The declared
    /// equality takes two `T`s, so the other-type and absent laws hold for every
    /// descriptor; they stay in the instance checks to keep all five laws explicit.
    fn equals_any(&self, one: &T, other: Option<&dyn Any>) -> bool {
        match other.and_then(|other| other.downcast_ref::<T>()) {
            Some(other) => (self.equals)(one, other),
            None => false,
        }
    }

    fn check_instances(&self, one: &T, two: &T) -> ContractResult<()> {
        let checks: [(bool, &str); 5] = [
            ((self.equals)(one, two), "instances from the zero-argument constructor are not equal (one == two)"),
            ((self.equals)(one, one), "instance is not equal to itself (one == one)"),
            ((self.equals)(two, one), "instances from the zero-argument constructor are not equal (two == one)"),
            (!self.equals_any(one, Some(&OtherType)), "instance equals an object of a different type"),
            (!self.equals_any(one, None), "instance equals an absent reference"),
        ];
        for (holds, message) in checks {
            if !holds {
                return Err(self.violation(message.to_string()).raise());
            }
        }
        Ok(())
    }

    /// Set `value` on `one` and expect divergence, then on `two` and expect
    /// equal instances with equal hashes.
    fn check_divergence(
        &self,
        access: &PropertyAccess<T>,
        one: &mut T,
        two: &mut T,
        value: &Value,
        variant: &str
    ) -> ContractResult<()> {
        let property = access.name();

        access.write(one, value)?;
        if (self.equals)(&*one, &*two) {
            return Err(
                self
                    .violation(
                        format!(
                            "divergence not detected: instances with one having [{}] set to {} {:?} and two having it not set are equal",
                            property,
                            variant,
                            value
                        )
                    )
                    .on_property(property)
                    .raise()
            );
        }

        access.write(two, value)?;
        if !(self.equals)(&*one, &*two) {
            return Err(
                self
                    .violation(
                        format!(
                            "convergence not restored: instances with [{}] set to the same {} {:?} are not equal",
                            property,
                            variant,
                            value
                        )
                    )
                    .on_property(property)
                    .raise()
            );
        }
        if (self.hash)(&*one) != (self.hash)(&*two) {
            return Err(
                self
                    .violation(
                        format!(
                            "convergence not restored: instances with [{}] set to the same {} {:?} have different hash codes",
                            property,
                            variant,
                            value
                        )
                    )
                    .on_property(property)
                    .raise()
            );
        }

        debug!("{}.{}: {} divergence/convergence holds", self.type_name, property, variant);
        Ok(())
    }
}

impl<'a> EqualityContractAsserter<'a> {
    pub fn new(defaults: &'a TypeDefaults, config: &'a AsserterConfig) -> Self {
        EqualityContractAsserter { defaults, config }
    }

    pub fn assert_equals_hash_code<T: Introspect>(&self, excluded: &ExclusionSet) -> ContractResult<ContractReport> {
        let descriptor = PropertyIntrospector::inspect::<T>()?;
        let walk = Self::overridden_pair(&descriptor)?;
        let mut report = ContractReport::new(ContractKind::EqualsHashCode, walk.type_name);

        let mut one = descriptor.instantiate()?;
        let mut two = descriptor.instantiate()?;
        walk.check_instances(&one, &two)?;

        for access in descriptor.properties() {
            if !access.is_writable() {
                continue;
            }
            if excluded.contains(access.name()) {
                report.skipped.push(access.name().to_string());
                continue;
            }

            let declared = access.declared_type();
            let value = self.defaults.lookup_value(declared)?;
            walk.check_divergence(access, &mut one, &mut two, &value, "value")?;

            if self.config.check_null_values {
                if let Some(absent) = declared.absent() {
                    walk.check_divergence(access, &mut one, &mut two, &absent, "null")?;
                }
            }
            report.checked.push(access.name().to_string());
        }

        info!("{}", report);
        Ok(report)
    }

    /// Equality and hashing must both be declared, and by the same level
    fn overridden_pair<T: 'static>(descriptor: &BeanDescriptor<T>) -> ContractResult<Walk<'_, T>> {
        let type_name = descriptor.type_name();
        let not_overridden = |message: String| {
            ContractViolation::new(ViolationKind::NotOverridden, type_name, message).raise()
        };

        match (descriptor.equality(), descriptor.hashing()) {
            (None, None) =>
                Err(
                    not_overridden(
                        format!("{} does not override equality and hashing; both fall back to identity", type_name)
                    )
                ),
            (Some(_), None) =>
                Err(not_overridden(format!("{} overrides equality but not hashing", type_name))),
            (None, Some(_)) =>
                Err(not_overridden(format!("{} overrides hashing but not equality", type_name))),
            (Some(equals), Some(hash)) if equals.level() != hash.level() =>
                Err(
                    not_overridden(
                        format!(
                            "equality and hashing of {} have different declaring levels ({} and {})",
                            type_name,
                            simple_type_name(equals.level()),
                            simple_type_name(hash.level())
                        )
                    )
                ),
            (Some(equals), Some(hash)) =>
                Ok(Walk {
                    type_name,
                    equals: equals.function(),
                    hash: hash.function(),
                }),
        }
    }
}

impl<'a> ContractAsserter for EqualityContractAsserter<'a> {
    fn contract(&self) -> ContractKind {
        ContractKind::EqualsHashCode
    }

    fn assert_contract<T: Introspect>(&self, excluded: &ExclusionSet) -> ContractResult<ContractReport> {
        self.assert_equals_hash_code::<T>(excluded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Default, PartialEq, Hash)]
    struct Tag(u8);

    impl Introspect for Tag {
        fn descriptor() -> BeanDescriptor<Self> {
            BeanDescriptor::<Self>::new().default_constructible().derived_equality()
        }
    }

    #[test]
    fn test_untyped_comparison() {
        let descriptor = Tag::descriptor();
        let walk = EqualityContractAsserter::overridden_pair(&descriptor).expect("equality and hashing declared");

        assert!(walk.equals_any(&Tag(1), Some(&Tag(1))));
        assert!(!walk.equals_any(&Tag(1), Some(&Tag(2))));
        assert!(!walk.equals_any(&Tag(1), Some(&OtherType)));
        assert!(!walk.equals_any(&Tag(1), Some(&1u8)));
        assert!(!walk.equals_any(&Tag(1), None));
        assert!(walk.check_instances(&Tag(1), &Tag(1)).is_ok());
    }
}
