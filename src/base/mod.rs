//! Foundation types for the docmap toolchain.
//!
//! This module provides fundamental types used throughout the crate:
//! - [`Name`] - Cheap-to-clone field, type and segment names
//! - [`TypeId`] - Dense identifier of a mapped type inside its graph
//! - Domain constants (identifier token, path separator)
//!
//! This module has NO dependencies on other docmap modules.

pub mod constants;

use std::fmt;

pub use smol_str::SmolStr;

/// An owned name. Short names are stored inline, longer ones are shared.
pub type Name = SmolStr;

/// Index of a [`MappedType`](crate::mapping::MappedType) in its [`MetadataGraph`](crate::mapping::MetadataGraph).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeId(u32);

impl TypeId {
    pub(crate) fn from_index(index: usize) -> Self {
        Self(index as u32)
    }

    /// Position of the type in declaration order.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for TypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}
