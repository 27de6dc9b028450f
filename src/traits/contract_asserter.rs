use crate::errors::ContractResult;
use crate::models::common::ContractKind;
use crate::models::exclusion::ExclusionSet;
use crate::models::verification::ContractReport;
use crate::traits::introspect::Introspect;

/// Trait for checking one behavioral contract against a type
pub trait ContractAsserter {
    /// The contract this asserter checks
    fn contract(&self) -> ContractKind;

    /// Check every non-excluded property of `T`, stopping at the first violation
    fn assert_contract<T: Introspect>(&self, excluded: &ExclusionSet) -> ContractResult<ContractReport>;
}
