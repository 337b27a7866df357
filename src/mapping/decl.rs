//! Static entity declarations.
//!
//! An [`EntityDecl`] is what a mapping scan would produce for one document
//! type: its name and the ordered list of fields with their storage names.
//! Declarations refer to other types by name; the names are only checked
//! when the declarations are assembled into a [`MetadataGraph`](super::MetadataGraph).

use crate::base::Name;
use crate::base::constants::DEFAULT_ID_STORAGE_NAME;

/// How a declared field is stored.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum DeclKind {
    Value,
    Identifier,
    /// Reference to the type with the given name.
    Reference(Name),
}

#[derive(Clone, Debug)]
pub(crate) struct FieldDecl {
    pub name: Name,
    pub storage_name: Name,
    pub kind: DeclKind,
}

/// Declaration of one mapped document type.
///
/// ```
/// use docmap::mapping::EntityDecl;
///
/// let root = EntityDecl::new("com.foo.RootDocument")
///     .id("id")
///     .reference("ref", "com.foo.ReferenceDocument");
/// assert_eq!(root.name(), "com.foo.RootDocument");
/// ```
#[derive(Clone, Debug)]
pub struct EntityDecl {
    pub(crate) name: Name,
    pub(crate) fields: Vec<FieldDecl>,
}

impl EntityDecl {
    pub fn new(name: impl Into<Name>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declare the identifier field, stored under `_id`.
    pub fn id(self, name: impl Into<Name>) -> Self {
        self.id_as(name, DEFAULT_ID_STORAGE_NAME)
    }

    /// Declare the identifier field with an explicit storage name.
    pub fn id_as(self, name: impl Into<Name>, storage_name: impl Into<Name>) -> Self {
        self.push(name.into(), storage_name.into(), DeclKind::Identifier)
    }

    /// Declare a value field stored under its own name.
    pub fn value(self, name: impl Into<Name>) -> Self {
        let name = name.into();
        self.push(name.clone(), name, DeclKind::Value)
    }

    pub fn value_as(self, name: impl Into<Name>, storage_name: impl Into<Name>) -> Self {
        self.push(name.into(), storage_name.into(), DeclKind::Value)
    }

    /// Declare a reference to another mapped type, stored under its own name.
    pub fn reference(self, name: impl Into<Name>, target: impl Into<Name>) -> Self {
        let name = name.into();
        self.push(name.clone(), name, DeclKind::Reference(target.into()))
    }

    pub fn reference_as(
        self,
        name: impl Into<Name>,
        storage_name: impl Into<Name>,
        target: impl Into<Name>,
    ) -> Self {
        self.push(
            name.into(),
            storage_name.into(),
            DeclKind::Reference(target.into()),
        )
    }

    fn push(mut self, name: Name, storage_name: Name, kind: DeclKind) -> Self {
        self.fields.push(FieldDecl {
            name,
            storage_name,
            kind,
        });
        self
    }
}
