use std::sync::Arc;

use chrono::NaiveDate;

use crate::config::AsserterConfig;
use crate::errors::{ ContractError, ContractResult, ViolationKind };
use crate::implementations::bean_asserter::{
    assert_basic_getter_setter_behavior,
    assert_basic_getter_setter_behavior_with_blacklist,
    assert_bean,
    assert_equals_hash_code,
    assert_getters_on_constructor_immutable_object,
    create_object,
    BeanAsserter,
};
use crate::implementations::registry::{ ScopedDefaults, TypeDefaults };
use crate::models::common::ContractKind;
use crate::models::value::Value;
use crate::tests::fixtures::{
    asserter,
    lock_global_defaults,
    setup,
    test_address,
    AddressDto,
    BusinessLocationDto,
    Employee,
    InventoryDto,
    Money,
    NotImmutableBuildingDto,
    Person,
};

#[test]
fn test_compliant_bean() -> ContractResult<()> {
    let asserter = asserter();

    let report = asserter.assert_bean::<Person>()?;
    assert_eq!(report.contract, ContractKind::Bean);
    assert_eq!(report.type_name, "Person");
    assert_eq!(report.checked, vec!["name", "age", "email", "address", "salary", "nicknames", "birth_date"]);
    Ok(())
}

#[test]
fn test_immutable_type_is_not_a_bean() {
    let asserter = asserter();

    let error = asserter.assert_bean::<BusinessLocationDto>().expect_err("no settable properties");
    assert_eq!(error.violation_kind(), Some(ViolationKind::Accessor));
    assert!(error.to_string().contains("BusinessLocationDto"), "{}", error);
}

#[test]
fn test_immutable_type_with_equality_is_not_a_bean() {
    let asserter = asserter();

    match asserter.assert_bean::<InventoryDto>() {
        Err(ContractError::Violation(violation)) => {
            assert_eq!(violation.kind, ViolationKind::Accessor);
            assert_eq!(violation.type_name, "InventoryDto");
            assert!(violation.message.contains("immutable"), "{}", violation.message);
        }
        other => panic!("expected an accessor violation, got {:?}", other),
    }
}

#[test]
fn test_bean_requires_zero_argument_constructor() {
    let asserter = asserter();

    let result = asserter.assert_bean::<NotImmutableBuildingDto>();
    assert!(matches!(result, Err(ContractError::NotConstructible { .. })));
}

#[test]
fn test_bean_without_registered_money() {
    setup();
    let mut defaults = TypeDefaults::new();
    defaults.register(test_address());
    let asserter = BeanAsserter::new(defaults);

    match asserter.assert_bean::<Person>() {
        Err(ContractError::UnresolvableType { type_name }) => assert!(type_name.contains("Money")),
        other => panic!("expected UnresolvableType, got {:?}", other),
    }
}

#[test]
fn test_register_on_asserter() -> ContractResult<()> {
    setup();
    let mut asserter = BeanAsserter::new(TypeDefaults::new());
    asserter.register(test_address()).register(Money(42));

    assert!(asserter.defaults().is_registered::<Money>());
    asserter.assert_bean::<Person>()?;

    asserter.defaults_mut().reset();
    assert!(!asserter.defaults().is_registered::<Money>());
    Ok(())
}

#[test]
fn test_configured_exclusions_apply_to_every_call() -> ContractResult<()> {
    setup();
    let config = AsserterConfig::from_yaml_str("excluded_properties: [insured_amount]")?;
    let asserter = BeanAsserter::new(crate::tests::fixtures::registered_defaults()).with_config(config);
    assert_eq!(asserter.config().excluded_properties, vec!["insured_amount"]);

    let report = asserter.assert_getters_on_constructor_immutable_object::<InventoryDto>(&[])?;
    assert_eq!(report.skipped, vec!["insured_amount"]);

    let report = asserter.assert_basic_getter_setter_behavior_with_blacklist::<Person>(&["email"])?;
    assert_eq!(report.skipped, vec!["email"]);
    Ok(())
}

#[test]
fn test_create_object_from_constructor() -> ContractResult<()> {
    let asserter = asserter();

    let employee = asserter.create_object::<Employee>()?;
    assert_eq!(employee.to_string(), "Employee{id='String'}");

    let location = asserter.create_object::<BusinessLocationDto>()?;
    assert_eq!(location.address().city(), "c");
    Ok(())
}

#[test]
fn test_create_object_from_zero_argument_constructor() -> ContractResult<()> {
    let asserter = asserter();

    let person = asserter.create_object::<Person>()?;
    assert_ne!(person, Person::default());
    assert_eq!(person.name(), "String");
    assert_eq!(person.age(), 1);
    assert_eq!(person.email(), Some("String"));
    assert_eq!(person.address().map(|address| address.city()), Some("c"));
    assert_eq!(person.salary(), Some(Money(42)));
    assert_eq!(person.nicknames(), ["String".to_string()]);
    assert_eq!(person.birth_date(), NaiveDate::from_ymd_opt(2000, 1, 1));
    assert_eq!(person.display_name(), "String (1)");
    Ok(())
}

#[test]
fn test_report_rendering() -> Result<(), Box<dyn std::error::Error>> {
    let asserter = asserter();

    let report = asserter.assert_getters_on_constructor_immutable_object::<InventoryDto>(&["insured_amount"])?;
    assert_eq!(
        report.to_string(),
        "immutable construction contract holds for InventoryDto (3 checked, skipped: insured_amount)"
    );

    let json: serde_json::Value = serde_json::from_str(&report.to_json()?)?;
    assert_eq!(json["contract"], "immutable_construction");
    assert_eq!(json["checked"][2], "value");
    Ok(())
}

#[test]
fn test_violation_rendering() {
    let asserter = asserter();

    let error = asserter
        .assert_equals_hash_code::<Employee>(&[])
        .expect_err("Employee declares equality and hashing at different levels");
    assert!(error.to_string().starts_with("not-overridden contract violated by Employee: "), "{}", error);
}

#[test]
fn test_global_free_functions() -> ContractResult<()> {
    let _guard = lock_global_defaults();
    setup();

    let scope = ScopedDefaults::new();
    scope.register(test_address()).register(Money(42));

    assert_bean::<Person>()?;
    assert_equals_hash_code::<Person>(&["salary"])?;
    assert_getters_on_constructor_immutable_object::<BusinessLocationDto>(&[])?;
    assert_basic_getter_setter_behavior::<Person>("name", None)?;
    assert_basic_getter_setter_behavior_with_blacklist::<Person>(&[])?;

    let address = AddressDto::builder().street("Stationsplein 1").city("Amsterdam").build();
    assert_basic_getter_setter_behavior::<Person>("address", Some(Value::new(Some(Arc::new(address)))))?;

    assert_eq!(create_object::<Employee>()?.to_string(), "Employee{id='String'}");
    Ok(())
}

#[test]
fn test_global_registry_scoped_per_test() {
    let _guard = lock_global_defaults();
    setup();

    {
        let _scope = ScopedDefaults::new();
        crate::implementations::registry::register_type_and_default_argument(test_address());
        crate::implementations::registry::register_type_and_default_argument(Money(42));
        assert!(assert_bean::<Person>().is_ok());
    }

    assert!(matches!(assert_bean::<Person>(), Err(ContractError::UnresolvableType { .. })));
}
