//! Entity metadata graph — the static description of mapped document types.
//!
//! The graph is built once from [`EntityDecl`]s and never changes afterwards.
//! It is shared as `Arc<MetadataGraph>` and read concurrently without locking.
//!
//! ## Key Types
//!
//! - [`MetadataGraph`] - All mapped types, indexed by [`TypeId`] and by name
//! - [`MappedType`] - One document type with its ordered fields
//! - [`FieldDescriptor`] - A field's logical name, storage name and [`FieldKind`]
//! - [`EntityDecl`] - Declaration input for [`MetadataGraph::build`]

mod decl;
mod error;

use indexmap::IndexMap;
use rustc_hash::FxHashMap;

use crate::base::{Name, TypeId};

pub use decl::EntityDecl;
use decl::DeclKind;
pub use error::MappingError;

// ============================================================================
// FIELDS
// ============================================================================

/// Whether a field holds its value inline or points at another document.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldKind {
    Value,
    /// Stored as the identifier of a document of `target`.
    Reference { target: TypeId },
}

/// A single field of a [`MappedType`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldDescriptor {
    name: Name,
    storage_name: Name,
    kind: FieldKind,
    is_identifier: bool,
}

impl FieldDescriptor {
    /// The name used in logical paths.
    pub fn name(&self) -> &Name {
        &self.name
    }

    /// The key under which the field is stored.
    pub fn storage_name(&self) -> &Name {
        &self.storage_name
    }

    pub fn kind(&self) -> FieldKind {
        self.kind
    }

    pub fn is_identifier(&self) -> bool {
        self.is_identifier
    }

    pub fn is_reference(&self) -> bool {
        matches!(self.kind, FieldKind::Reference { .. })
    }

    /// The referenced type, for reference fields.
    pub fn target(&self) -> Option<TypeId> {
        match self.kind {
            FieldKind::Reference { target } => Some(target),
            FieldKind::Value => None,
        }
    }
}

// ============================================================================
// MAPPED TYPE
// ============================================================================

/// A document-backed type.
#[derive(Clone, Debug)]
pub struct MappedType {
    id: TypeId,
    name: Name,
    /// Logical name -> descriptor, in declaration order.
    fields: IndexMap<Name, FieldDescriptor>,
    /// Storage name -> position in `fields`.
    by_storage_name: FxHashMap<Name, usize>,
    identifier: usize,
}

impl MappedType {
    pub fn id(&self) -> TypeId {
        self.id
    }

    pub fn name(&self) -> &Name {
        &self.name
    }

    /// All fields keyed by logical name, in declaration order.
    pub fn fields(&self) -> &IndexMap<Name, FieldDescriptor> {
        &self.fields
    }

    /// Look up a field by its logical name.
    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.get(name)
    }

    /// Look up a field by the key it is stored under.
    pub fn field_by_storage_name(&self, storage_name: &str) -> Option<&FieldDescriptor> {
        self.by_storage_name
            .get(storage_name)
            .and_then(|&idx| self.fields.get_index(idx))
            .map(|(_, field)| field)
    }

    pub fn identifier(&self) -> &FieldDescriptor {
        // Checked non-empty and in range by `MetadataGraph::build`.
        &self.fields[self.identifier]
    }
}

// ============================================================================
// GRAPH
// ============================================================================

/// Immutable set of mapped types.
#[derive(Clone, Debug, Default)]
pub struct MetadataGraph {
    types: Vec<MappedType>,
    by_name: FxHashMap<Name, TypeId>,
}

impl MetadataGraph {
    /// Assemble declarations into a graph.
    ///
    /// References are resolved by type name, so declarations may refer to types
    /// that appear later in the list, to themselves, or form cycles.
    pub fn build(decls: impl IntoIterator<Item = EntityDecl>) -> Result<Self, MappingError> {
        let decls: Vec<EntityDecl> = decls.into_iter().collect();

        let mut by_name = FxHashMap::default();
        for (idx, decl) in decls.iter().enumerate() {
            if by_name
                .insert(decl.name.clone(), TypeId::from_index(idx))
                .is_some()
            {
                return Err(MappingError::DuplicateType(decl.name.clone()));
            }
        }

        let types = decls
            .into_iter()
            .enumerate()
            .map(|(idx, decl)| build_type(TypeId::from_index(idx), decl, &by_name))
            .collect::<Result<Vec<_>, _>>()?;

        tracing::info!("metadata graph built: {} mapped types", types.len());
        Ok(Self { types, by_name })
    }

    /// Look up a mapped type by name.
    pub fn type_named(&self, name: &str) -> Option<TypeId> {
        self.by_name.get(name).copied()
    }

    /// Get a mapped type.
    ///
    /// # Panics
    ///
    /// Panics if `id` was not issued by this graph.
    pub fn get(&self, id: TypeId) -> &MappedType {
        &self.types[id.index()]
    }

    /// Get a mapped type, or `None` if `id` belongs to another graph.
    pub fn try_get(&self, id: TypeId) -> Option<&MappedType> {
        self.types.get(id.index())
    }

    pub fn contains(&self, id: TypeId) -> bool {
        id.index() < self.types.len()
    }

    /// Fields of `ty` keyed by logical name.
    pub fn fields_of(&self, ty: TypeId) -> &IndexMap<Name, FieldDescriptor> {
        self.get(ty).fields()
    }

    pub fn identifier_field(&self, ty: TypeId) -> &FieldDescriptor {
        self.get(ty).identifier()
    }

    pub fn types(&self) -> impl Iterator<Item = &MappedType> {
        self.types.iter()
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

fn build_type(
    id: TypeId,
    decl: EntityDecl,
    by_name: &FxHashMap<Name, TypeId>,
) -> Result<MappedType, MappingError> {
    let mut fields: IndexMap<Name, FieldDescriptor> = IndexMap::with_capacity(decl.fields.len());
    let mut by_storage_name = FxHashMap::default();
    let mut identifier: Option<usize> = None;

    for field in decl.fields {
        let kind = match &field.kind {
            DeclKind::Value | DeclKind::Identifier => FieldKind::Value,
            DeclKind::Reference(target) => {
                let target = by_name.get(target).copied().ok_or_else(|| {
                    MappingError::UnknownReferenceTarget {
                        ty: decl.name.clone(),
                        field: field.name.clone(),
                        target: target.clone(),
                    }
                })?;
                FieldKind::Reference { target }
            }
        };
        let is_identifier = field.kind == DeclKind::Identifier;

        let position = fields.len();
        if fields.contains_key(&field.name)
            || by_storage_name
                .insert(field.storage_name.clone(), position)
                .is_some()
        {
            return Err(MappingError::DuplicateField {
                ty: decl.name.clone(),
                name: field.name,
            });
        }

        if is_identifier {
            if let Some(first) = identifier {
                return Err(MappingError::MultipleIdentifiers {
                    ty: decl.name.clone(),
                    first: fields[first].name.clone(),
                    second: field.name,
                });
            }
            identifier = Some(position);
        }

        fields.insert(
            field.name.clone(),
            FieldDescriptor {
                name: field.name,
                storage_name: field.storage_name,
                kind,
                is_identifier,
            },
        );
    }

    let identifier = identifier.ok_or_else(|| MappingError::MissingIdentifier(decl.name.clone()))?;

    Ok(MappedType {
        id,
        name: decl.name,
        fields,
        by_storage_name,
        identifier,
    })
}
