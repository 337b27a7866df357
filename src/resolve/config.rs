//! Resolver options

use crate::base::Name;
use crate::base::constants::{ID_TOKEN, PATH_SEPARATOR};

/// Options controlling path resolution.
#[derive(Debug, Clone)]
pub struct ResolverConfig {
    /// Token selecting the identifier of a referenced document.
    pub id_token: Name,
    /// Separator between logical path segments.
    pub separator: char,
    /// Memoize successful resolutions per (root type, path).
    pub cache_enabled: bool,
    /// Reject case variants of identifier qualifiers (`$ID`, `Id`) after a reference
    /// instead of reporting them as unknown fields.
    pub strict_identifier_spelling: bool,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            id_token: Name::new_static(ID_TOKEN),
            separator: PATH_SEPARATOR,
            cache_enabled: true,
            strict_identifier_spelling: true,
        }
    }
}
