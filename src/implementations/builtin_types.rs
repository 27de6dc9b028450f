use std::collections::{ BTreeMap, BTreeSet, HashMap, HashSet, VecDeque };
use std::hash::Hash;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use chrono::{ DateTime, NaiveDate, NaiveDateTime, Utc };

use crate::errors::ContractResult;
use crate::implementations::registry::TypeDefaults;
use crate::models::common::Semantics;
use crate::traits::property_type::PropertyType;

macro_rules! scalar_property_types {
    ($($ty:ty),* $(,)?) => {
        $(impl PropertyType for $ty {})*
    };
}

// Resolved from the registry baseline
scalar_property_types!(
    i8, i16, i32, i64, i128, isize,
    u8, u16, u32, u64, u128, usize,
    f32, f64, bool, char,
    String, &'static str, PathBuf, Duration,
    NaiveDate, NaiveDateTime, DateTime<Utc>,
);

impl<T: PropertyType> PropertyType for Option<T> {
    fn semantics() -> Semantics {
        T::semantics()
    }

    fn same(&self, other: &Self) -> bool {
        match (self, other) {
            (Some(expected), Some(actual)) => expected.same(actual),
            (None, None) => true,
            _ => false,
        }
    }

    fn synthesize(defaults: &TypeDefaults) -> ContractResult<Option<Self>> {
        defaults.lookup::<T>().map(|value| Some(Some(value)))
    }

    fn absent() -> Option<Self> {
        Some(None)
    }
}

impl<T: PropertyType> PropertyType for Arc<T> {
    fn semantics() -> Semantics {
        Semantics::ByReference
    }

    fn same(&self, other: &Self) -> bool {
        Arc::ptr_eq(self, other)
    }

    fn synthesize(defaults: &TypeDefaults) -> ContractResult<Option<Self>> {
        defaults.lookup::<T>().map(|value| Some(Arc::new(value)))
    }
}

impl<T: PropertyType> PropertyType for Box<T> {
    fn synthesize(defaults: &TypeDefaults) -> ContractResult<Option<Self>> {
        defaults.lookup::<T>().map(|value| Some(Box::new(value)))
    }
}

// Collections get a single element so they differ from an empty `Default`
impl<T: PropertyType> PropertyType for Vec<T> {
    fn synthesize(defaults: &TypeDefaults) -> ContractResult<Option<Self>> {
        defaults.lookup::<T>().map(|value| Some(vec![value]))
    }
}

impl<T: PropertyType> PropertyType for VecDeque<T> {
    fn synthesize(defaults: &TypeDefaults) -> ContractResult<Option<Self>> {
        defaults.lookup::<T>().map(|value| Some(VecDeque::from(vec![value])))
    }
}

impl<T: PropertyType + Eq + Hash> PropertyType for HashSet<T> {
    fn synthesize(defaults: &TypeDefaults) -> ContractResult<Option<Self>> {
        defaults.lookup::<T>().map(|value| Some(HashSet::from([value])))
    }
}

impl<T: PropertyType + Ord> PropertyType for BTreeSet<T> {
    fn synthesize(defaults: &TypeDefaults) -> ContractResult<Option<Self>> {
        defaults.lookup::<T>().map(|value| Some(BTreeSet::from([value])))
    }
}

impl<K: PropertyType + Eq + Hash, V: PropertyType> PropertyType for HashMap<K, V> {
    fn synthesize(defaults: &TypeDefaults) -> ContractResult<Option<Self>> {
        let key = defaults.lookup::<K>()?;
        let value = defaults.lookup::<V>()?;
        Ok(Some(HashMap::from([(key, value)])))
    }
}

impl<K: PropertyType + Ord, V: PropertyType> PropertyType for BTreeMap<K, V> {
    fn synthesize(defaults: &TypeDefaults) -> ContractResult<Option<Self>> {
        let key = defaults.lookup::<K>()?;
        let value = defaults.lookup::<V>()?;
        Ok(Some(BTreeMap::from([(key, value)])))
    }
}
