use crate::models::bean::BeanDescriptor;

/// Trait for types that describe their own properties, constructors and equality
///
/// ```ignore
/// impl Introspect for Person {
///     fn descriptor() -> BeanDescriptor<Self> {
///         BeanDescriptor::<Self>::new()
///             .default_constructible()
///             .read_write("name", |p| p.name.clone(), |p, name| p.name = name)
///             .derived_equality()
///     }
/// }
/// ```
pub trait Introspect: Sized + 'static {
    /// Build the descriptor table. Called once per assertion, never cached.
    fn descriptor() -> BeanDescriptor<Self>;
}
