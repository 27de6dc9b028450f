use std::collections::HashSet;

use log::debug;

use crate::errors::{ ContractError, ContractResult };
use crate::models::bean::BeanDescriptor;
use crate::models::property::PropertyDescriptor;
use crate::traits::introspect::Introspect;

/// Enumerates the properties a type exposes through its descriptor table
pub struct PropertyIntrospector;

impl PropertyIntrospector {
    /// One descriptor per property, in declaration order
    pub fn describe<T: Introspect>() -> ContractResult<Vec<PropertyDescriptor>> {
        let descriptor = Self::inspect::<T>()?;
        Ok(
            descriptor
                .properties()
                .iter()
                .map(|access| access.describe())
                .collect()
        )
    }

    /// The descriptor of a single named property
    pub fn describe_property<T: Introspect>(name: &str) -> ContractResult<PropertyDescriptor> {
        let descriptor = Self::inspect::<T>()?;
        let access = descriptor.property(name)?;
        Ok(access.describe())
    }

    /// Fetch and validate the descriptor table of `T`. A fresh table is built on
    /// every call.
    pub fn inspect<T: Introspect>() -> ContractResult<BeanDescriptor<T>> {
        let descriptor = T::descriptor();
        let type_name = descriptor.type_name();

        if
            descriptor.properties().is_empty() &&
            descriptor.constructors().is_empty() &&
            !descriptor.has_zero_arg()
        {
            return Err(
                ContractError::introspection(
                    type_name,
                    "descriptor declares no properties and no constructors; not a structured type"
                ).logged()
            );
        }

        let mut seen = HashSet::new();
        for access in descriptor.properties() {
            if !seen.insert(access.name()) {
                return Err(
                    ContractError::introspection(
                        type_name,
                        format!("property [{}] is declared more than once", access.name())
                    ).logged()
                );
            }
        }

        for constructor in descriptor.constructors() {
            let mut params = HashSet::new();
            for param in constructor.params() {
                if !params.insert(param.name.as_str()) {
                    return Err(
                        ContractError::introspection(
                            type_name,
                            format!(
                                "constructor {} repeats parameter [{}]",
                                constructor.signature(),
                                param.name
                            )
                        ).logged()
                    );
                }
            }
        }

        debug!(
            "Introspected {}: {} properties, {} constructors",
            type_name,
            descriptor.properties().len(),
            descriptor.constructors().len()
        );
        Ok(descriptor)
    }
}
