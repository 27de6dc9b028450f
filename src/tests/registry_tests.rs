use std::collections::HashMap;
use std::sync::Arc;

use chrono::NaiveDate;

use crate::errors::{ ContractError, ContractResult };
use crate::implementations::registry::{
    default_types,
    register_type_and_default_argument,
    reset_to_default_types,
    ScopedDefaults,
    TypeDefaults,
    TEXT_DEFAULT,
};
use crate::models::value::TypeRef;
use crate::tests::fixtures::{ lock_global_defaults, setup, test_address, AddressDto, Money };

#[test]
fn test_baseline_scalars() -> ContractResult<()> {
    setup();
    let defaults = TypeDefaults::new();

    assert_eq!(defaults.lookup::<String>()?, TEXT_DEFAULT);
    assert_eq!(defaults.lookup::<&'static str>()?, "String");
    assert_eq!(defaults.lookup::<u32>()?, 1);
    assert_eq!(defaults.lookup::<i64>()?, 1);
    assert_eq!(defaults.lookup::<f64>()?, 1.0);
    assert!(defaults.lookup::<bool>()?);
    assert_eq!(defaults.lookup::<NaiveDate>()?, NaiveDate::from_ymd_opt(2000, 1, 1).unwrap());
    Ok(())
}

#[test]
fn test_baseline_differs_from_rust_defaults() -> ContractResult<()> {
    let defaults = TypeDefaults::new();

    assert_ne!(defaults.lookup::<String>()?, String::default());
    assert_ne!(defaults.lookup::<u8>()?, u8::default());
    assert_ne!(defaults.lookup::<bool>()?, bool::default());
    assert_ne!(defaults.lookup::<NaiveDate>()?, NaiveDate::default());
    assert_ne!(defaults.lookup::<Vec<u32>>()?, Vec::<u32>::new());
    Ok(())
}

#[test]
fn test_containers_synthesized_from_elements() -> ContractResult<()> {
    let defaults = TypeDefaults::new();

    assert_eq!(defaults.lookup::<Vec<String>>()?, vec!["String".to_string()]);
    assert_eq!(defaults.lookup::<Option<u32>>()?, Some(1));
    assert_eq!(defaults.lookup::<Box<u16>>()?, Box::new(1));
    assert_eq!(defaults.lookup::<HashMap<String, u32>>()?, HashMap::from([("String".to_string(), 1)]));
    assert!(!defaults.is_registered::<Vec<String>>());
    Ok(())
}

#[test]
fn test_register_replaces_entry() -> ContractResult<()> {
    let mut defaults = TypeDefaults::new();
    let size = defaults.len();

    assert!(defaults.register(7u32).is_some());
    assert_eq!(defaults.lookup::<u32>()?, 7);
    assert_eq!(defaults.len(), size);

    assert!(defaults.register(Money(42)).is_none());
    assert_eq!(defaults.len(), size + 1);
    assert_eq!(defaults.lookup::<Money>()?, Money(42));
    Ok(())
}

#[test]
fn test_registered_reference_keeps_identity() -> ContractResult<()> {
    let mut defaults = TypeDefaults::new();
    let address = Arc::new(test_address());
    defaults.register(Arc::clone(&address));

    let first = defaults.lookup::<Arc<AddressDto>>()?;
    let second = defaults.lookup::<Arc<AddressDto>>()?;
    assert!(Arc::ptr_eq(&first, &address));
    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(first.city(), "c");
    Ok(())
}

#[test]
fn test_unresolvable_type() {
    let defaults = TypeDefaults::new();

    match defaults.lookup::<Arc<AddressDto>>() {
        Err(ContractError::UnresolvableType { type_name }) => {
            assert!(type_name.contains("AddressDto"), "unexpected type name {}", type_name);
        }
        other => panic!("expected UnresolvableType, got {:?}", other),
    }

    let empty = TypeDefaults::empty();
    assert!(empty.is_empty());
    assert!(matches!(empty.lookup::<u32>(), Err(ContractError::UnresolvableType { .. })));
}

#[test]
fn test_reset_restores_baseline() -> ContractResult<()> {
    let mut defaults = TypeDefaults::new();
    let baseline = defaults.len();
    defaults.register(Money(42));
    defaults.register(99u32);

    defaults.reset();

    assert_eq!(defaults.len(), baseline);
    assert_eq!(defaults.lookup::<u32>()?, 1);
    assert!(matches!(defaults.lookup::<Money>(), Err(ContractError::UnresolvableType { .. })));
    Ok(())
}

#[test]
fn test_lookup_value_through_type_ref() -> ContractResult<()> {
    let defaults = TypeDefaults::new();

    let value = defaults.lookup_value(&TypeRef::of::<Option<String>>())?;
    assert_eq!(value.downcast::<Option<String>>(), Some(Some("String".to_string())));
    Ok(())
}

#[test]
fn test_global_register_and_reset() -> ContractResult<()> {
    let _guard = lock_global_defaults();
    setup();

    register_type_and_default_argument(Money(42));
    assert_eq!(default_types().lookup::<Money>()?, Money(42));

    reset_to_default_types();
    assert!(!default_types().is_registered::<Money>());
    Ok(())
}

#[test]
fn test_scoped_defaults_restore_on_drop() {
    let _guard = lock_global_defaults();

    {
        let scope = ScopedDefaults::new();
        scope.register(Money(7)).register(test_address());
        assert!(default_types().is_registered::<Money>());
        assert!(default_types().is_registered::<AddressDto>());
    }

    assert!(!default_types().is_registered::<Money>());
    assert!(!default_types().is_registered::<AddressDto>());
}

#[test]
fn test_scoped_defaults_restore_on_panic() {
    let _guard = lock_global_defaults();

    let result = std::panic::catch_unwind(|| {
        let scope = ScopedDefaults::new();
        scope.register(Money(7));
        panic!("assertion session aborted");
    });

    assert!(result.is_err());
    assert!(!default_types().is_registered::<Money>());
}
