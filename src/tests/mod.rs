mod registry_tests;
mod bean_asserter_tests;
