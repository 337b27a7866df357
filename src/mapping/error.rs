//! Errors raised while assembling a metadata graph.

use thiserror::Error;

use crate::base::Name;

/// A set of declarations that cannot form a consistent metadata graph.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum MappingError {
    #[error("Type '{0}' is declared more than once")]
    DuplicateType(Name),

    /// Two fields of one type share a logical or a storage name.
    #[error("Type '{ty}' declares '{name}' more than once")]
    DuplicateField { ty: Name, name: Name },

    #[error("Type '{0}' has no identifier field")]
    MissingIdentifier(Name),

    #[error("Type '{ty}' declares more than one identifier ('{first}', '{second}')")]
    MultipleIdentifiers { ty: Name, first: Name, second: Name },

    #[error("Field '{ty}.{field}' references unknown type '{target}'")]
    UnknownReferenceTarget { ty: Name, field: Name, target: Name },
}
