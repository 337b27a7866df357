//! The path walk itself.
//!
//! [`Resolver`] is a pure function of the metadata graph, the configuration
//! and its inputs. It holds no state between calls, so it can be rebuilt
//! freely and shared across threads.

use tracing::trace;

use crate::base::constants::{DEFAULT_ID_NAME, DEFAULT_ID_STORAGE_NAME};
use crate::base::{Name, TypeId};
use crate::mapping::{FieldDescriptor, FieldKind, MappedType, MetadataGraph};
use crate::path::{LogicalPath, PathSegment, StoragePath, tokenize_with};

use super::ResolutionResult;
use super::config::ResolverConfig;
use super::error::{ResolutionError, ResolveErrorKind};

/// Resolves logical paths against a [`MetadataGraph`].
#[derive(Clone, Copy, Debug)]
pub struct Resolver<'a> {
    graph: &'a MetadataGraph,
    config: &'a ResolverConfig,
}

impl<'a> Resolver<'a> {
    pub fn new(graph: &'a MetadataGraph, config: &'a ResolverConfig) -> Self {
        Self { graph, config }
    }

    /// Tokenize `path` and resolve it starting at `root`.
    pub fn resolve(&self, root: TypeId, path: &str) -> ResolutionResult {
        let root_ty = self.root_type(root, path)?;
        let logical = tokenize_with(path, self.config.separator, &self.config.id_token)
            .map_err(|_| {
                ResolutionError::new(
                    Name::from(path),
                    root_ty.name().clone(),
                    ResolveErrorKind::EmptyPath,
                )
            })?;
        self.resolve_path(root, &logical)
    }

    /// Resolve an already tokenized path starting at `root`.
    ///
    /// Reference fields switch the walk to their target type. Right after a
    /// reference, an identifier qualifier (`$id`, the identifier's storage name
    /// or its logical name) appends the identifier's storage name and must be
    /// the final segment.
    pub fn resolve_path(&self, root: TypeId, path: &LogicalPath) -> ResolutionResult {
        let root_ty = self.root_type(root, path.text())?;
        let fail = |kind| ResolutionError::new(path.text().clone(), root_ty.name().clone(), kind);

        let segments = path.segments();
        let mut current = root_ty;
        let mut storage: Vec<Name> = Vec::with_capacity(segments.len());
        let mut after_reference = false;

        for (idx, segment) in segments.iter().enumerate() {
            let next = segments.get(idx + 1);

            if after_reference {
                if let Some(id) = self.identifier_qualifier(current, segment) {
                    trace!(
                        "[RESOLVE] '{}' qualifies identifier of '{}' -> {}",
                        segment.as_str(),
                        current.name(),
                        id.storage_name()
                    );
                    storage.push(id.storage_name().clone());
                    if let Some(next) = next {
                        return Err(fail(ResolveErrorKind::PathContinuesPastValue {
                            segment: self.segment_text(next),
                            on: current.name().clone(),
                        }));
                    }
                    break;
                }
            }

            let name = match segment {
                PathSegment::Field(name) => name,
                PathSegment::IdToken => {
                    return Err(fail(ResolveErrorKind::InvalidIdentifierQualifier {
                        segment: self.config.id_token.clone(),
                        on: current.name().clone(),
                    }));
                }
            };

            let Some(field) = lookup(current, name) else {
                let kind = if after_reference && self.is_misspelled_identifier(current, name) {
                    ResolveErrorKind::InvalidIdentifierQualifier {
                        segment: name.clone(),
                        on: current.name().clone(),
                    }
                } else {
                    ResolveErrorKind::UnresolvableField {
                        segment: name.clone(),
                        on: current.name().clone(),
                    }
                };
                return Err(fail(kind));
            };

            trace!(
                "[RESOLVE] '{}' on '{}' -> {} ({:?})",
                name,
                current.name(),
                field.storage_name(),
                field.kind()
            );
            storage.push(field.storage_name().clone());

            match field.kind() {
                FieldKind::Value => {
                    if let Some(next) = next {
                        return Err(fail(ResolveErrorKind::PathContinuesPastValue {
                            segment: self.segment_text(next),
                            on: current.name().clone(),
                        }));
                    }
                    after_reference = false;
                }
                FieldKind::Reference { target } => {
                    current = self.graph.get(target);
                    after_reference = true;
                }
            }
        }

        Ok(StoragePath::new(storage))
    }

    /// The mapped type for `root`, or an error if it belongs to another graph.
    ///
    /// Reference targets come from the same graph, so only the root needs checking.
    fn root_type(&self, root: TypeId, path: &str) -> Result<&'a MappedType, ResolutionError> {
        self.graph.try_get(root).ok_or_else(|| {
            ResolutionError::new(
                Name::from(path),
                Name::from(root.to_string()),
                ResolveErrorKind::UnknownRootType(root),
            )
        })
    }

    /// The identifier of `ty` if `segment` is one of its accepted qualifiers.
    fn identifier_qualifier<'t>(
        &self,
        ty: &'t MappedType,
        segment: &PathSegment,
    ) -> Option<&'t FieldDescriptor> {
        let id = ty.identifier();
        let matches = match segment {
            PathSegment::IdToken => true,
            PathSegment::Field(name) => name == id.storage_name() || name == id.name(),
        };
        matches.then_some(id)
    }

    /// Whether an undeclared `name` reads as an attempt to select the identifier.
    ///
    /// Covers case variants of the accepted qualifiers and the conventional
    /// `id` / `_id` spellings on types whose identifier is named differently.
    fn is_misspelled_identifier(&self, ty: &MappedType, name: &str) -> bool {
        if !self.config.strict_identifier_spelling {
            return false;
        }
        let id = ty.identifier();
        [
            self.config.id_token.as_str(),
            id.storage_name().as_str(),
            id.name().as_str(),
            DEFAULT_ID_STORAGE_NAME,
            DEFAULT_ID_NAME,
        ]
        .iter()
        .any(|accepted| accepted.eq_ignore_ascii_case(name))
    }

    fn segment_text(&self, segment: &PathSegment) -> Name {
        match segment {
            PathSegment::Field(name) => name.clone(),
            PathSegment::IdToken => self.config.id_token.clone(),
        }
    }
}

/// Logical name first, then storage name.
fn lookup<'t>(ty: &'t MappedType, name: &str) -> Option<&'t FieldDescriptor> {
    ty.field(name).or_else(|| ty.field_by_storage_name(name))
}
