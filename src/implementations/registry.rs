use std::any::{ type_name, TypeId };
use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

use chrono::{ DateTime, NaiveDate, NaiveDateTime, Utc };
use log::{ debug, info };
use once_cell::sync::Lazy;
use parking_lot::Mutex;

use crate::errors::{ ContractError, ContractResult };
use crate::models::value::{ TypeRef, Value };
use crate::traits::property_type::PropertyType;

/// Text default; `create_object` output such as `Employee{id='String'}` relies on it
pub const TEXT_DEFAULT: &str = "String";

/// Maps a declared type to the representative value used for it.
///
/// One entry per type: registering again replaces the previous value. Types
/// without an entry fall back to [`PropertyType::synthesize`], which covers
/// the standard containers.
#[derive(Debug, Clone)]
pub struct TypeDefaults {
    entries: HashMap<TypeId, Value>,
}

impl TypeDefaults {
    /// The built-in baseline
    pub fn new() -> Self {
        let mut defaults = Self::empty();
        defaults.seed_baseline();
        defaults
    }

    /// No entries at all, not even the scalars
    pub fn empty() -> Self {
        TypeDefaults {
            entries: HashMap::new(),
        }
    }

    fn seed_baseline(&mut self) {
        self.register(1i8);
        self.register(1i16);
        self.register(1i32);
        self.register(1i64);
        self.register(1i128);
        self.register(1isize);
        self.register(1u8);
        self.register(1u16);
        self.register(1u32);
        self.register(1u64);
        self.register(1u128);
        self.register(1usize);
        self.register(1.0f32);
        self.register(1.0f64);
        self.register(true);
        self.register('Y');
        self.register(TEXT_DEFAULT.to_string());
        self.register(TEXT_DEFAULT);
        self.register(Duration::from_secs(1));
        self.register(PathBuf::from("path"));

        // Away from the epoch so a `Default` timestamp still diverges
        let date = NaiveDate::from_ymd_opt(2000, 1, 1).unwrap_or_default();
        let date_time = date.and_hms_opt(0, 0, 0).unwrap_or_default();
        self.register(date);
        self.register(date_time);
        self.register(DateTime::<Utc>::from_naive_utc_and_offset(date_time, Utc));
    }

    /// Associate `D` with `value`, returning the value it replaces
    pub fn register<D: PropertyType>(&mut self, value: D) -> Option<Value> {
        debug!("Registering default for {}: {:?}", type_name::<D>(), value);
        self.entries.insert(TypeId::of::<D>(), Value::new(value))
    }

    pub fn is_registered<D: PropertyType>(&self) -> bool {
        self.entries.contains_key(&TypeId::of::<D>())
    }

    /// The registered default for `D`, or one synthesized from element types
    pub fn lookup<D: PropertyType>(&self) -> ContractResult<D> {
        if let Some(value) = self.entries.get(&TypeId::of::<D>()).and_then(Value::downcast::<D>) {
            return Ok(value);
        }
        match D::synthesize(self)? {
            Some(value) => Ok(value),
            None =>
                Err(
                    (ContractError::UnresolvableType {
                        type_name: type_name::<D>().to_string(),
                    }).logged()
                ),
        }
    }

    pub fn lookup_value(&self, declared: &TypeRef) -> ContractResult<Value> {
        declared.synthesize(self)
    }

    /// Drop every registration and go back to the baseline
    pub fn reset(&mut self) {
        self.entries.clear();
        self.seed_baseline();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for TypeDefaults {
    fn default() -> Self {
        Self::new()
    }
}

// Process-wide registry backing the free functions. Not meant for concurrent
// test sessions that register conflicting defaults; use an explicit
// `TypeDefaults` or `ScopedDefaults` there.
static DEFAULT_TYPES: Lazy<Mutex<TypeDefaults>> = Lazy::new(|| Mutex::new(TypeDefaults::new()));

/// Register a default in the process-wide registry
pub fn register_type_and_default_argument<D: PropertyType>(value: D) {
    DEFAULT_TYPES.lock().register(value);
}

/// Restore the process-wide registry to the built-in baseline
pub fn reset_to_default_types() {
    info!("Resetting default types to the built-in baseline");
    DEFAULT_TYPES.lock().reset();
}

/// Snapshot of the process-wide registry
pub fn default_types() -> TypeDefaults {
    DEFAULT_TYPES.lock().clone()
}

/// Restores the process-wide registry to its state at creation when dropped,
/// whether the scope ends normally, early, or by unwinding.
#[must_use = "the previous defaults are restored as soon as the guard is dropped"]
pub struct ScopedDefaults {
    previous: TypeDefaults,
}

impl ScopedDefaults {
    pub fn new() -> Self {
        ScopedDefaults {
            previous: default_types(),
        }
    }

    pub fn register<D: PropertyType>(&self, value: D) -> &Self {
        register_type_and_default_argument(value);
        self
    }
}

impl Default for ScopedDefaults {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for ScopedDefaults {
    fn drop(&mut self) {
        debug!("Restoring default types from scope");
        *DEFAULT_TYPES.lock() = std::mem::take(&mut self.previous);
    }
}
