use crate::models::value::TypeRef;

/// An exposed property of a structured type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyDescriptor {
    pub name: String,
    pub declared_type: TypeRef,
    pub readable: bool,
    pub writable: bool,
}

impl PropertyDescriptor {
    pub fn is_read_only(&self) -> bool {
        self.readable && !self.writable
    }
}
