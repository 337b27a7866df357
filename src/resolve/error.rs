//! Resolution failures.
//!
//! Every failure is an ordinary value: callers decide whether it aborts a
//! query or is treated as "no matching documents".

use thiserror::Error;

use crate::base::{Name, TypeId};

/// What went wrong while walking a logical path.
#[derive(Clone, Debug, Error, PartialEq, Eq, Hash)]
pub enum ResolveErrorKind {
    /// The path is empty or contains an empty segment.
    #[error("path is empty or has an empty segment")]
    EmptyPath,

    /// The root type id was not issued by the resolving graph.
    #[error("root type {0} is not part of the metadata graph")]
    UnknownRootType(TypeId),

    #[error("'{segment}' is not a field of '{on}'")]
    UnresolvableField { segment: Name, on: Name },

    /// `segment` follows a field of `on` that holds a plain value.
    #[error("'{segment}' follows a value field of '{on}'")]
    PathContinuesPastValue { segment: Name, on: Name },

    /// `segment` tries to select the identifier of `on` but is not a recognised spelling.
    #[error("'{segment}' is not a valid identifier qualifier for '{on}'")]
    InvalidIdentifierQualifier { segment: Name, on: Name },
}

impl ResolveErrorKind {
    /// The path element that could not be resolved.
    pub fn segment(&self) -> &str {
        match self {
            ResolveErrorKind::EmptyPath | ResolveErrorKind::UnknownRootType(_) => "",
            ResolveErrorKind::UnresolvableField { segment, .. }
            | ResolveErrorKind::PathContinuesPastValue { segment, .. }
            | ResolveErrorKind::InvalidIdentifierQualifier { segment, .. } => segment,
        }
    }

    /// The mapped type the failing segment was looked up on, if any.
    pub fn type_name(&self) -> Option<&Name> {
        match self {
            ResolveErrorKind::EmptyPath | ResolveErrorKind::UnknownRootType(_) => None,
            ResolveErrorKind::UnresolvableField { on, .. }
            | ResolveErrorKind::PathContinuesPastValue { on, .. }
            | ResolveErrorKind::InvalidIdentifierQualifier { on, .. } => Some(on),
        }
    }
}

/// A logical path that could not be resolved against a root type.
///
/// `Display` produces the user-facing message, see [`describe`].
#[derive(Clone, Debug, Error, PartialEq, Eq, Hash)]
#[error(
    "Could not resolve path '{path}' against '{root}'. Unknown path element: '{}'.",
    .kind.segment()
)]
pub struct ResolutionError {
    path: Name,
    root: Name,
    #[source]
    kind: ResolveErrorKind,
}

impl ResolutionError {
    pub(crate) fn new(path: Name, root: Name, kind: ResolveErrorKind) -> Self {
        Self { path, root, kind }
    }

    /// The logical path as the caller wrote it.
    pub fn path(&self) -> &Name {
        &self.path
    }

    /// Name of the root type resolution started from.
    pub fn root(&self) -> &Name {
        &self.root
    }

    pub fn kind(&self) -> &ResolveErrorKind {
        &self.kind
    }

    pub fn segment(&self) -> &str {
        self.kind.segment()
    }

    /// The type the failing segment was looked up on; the root for malformed
    /// paths and unknown roots.
    pub fn type_name(&self) -> &Name {
        self.kind.type_name().unwrap_or(&self.root)
    }
}

/// Human-readable message for a resolution failure.
pub fn describe(error: &ResolutionError) -> String {
    error.to_string()
}
