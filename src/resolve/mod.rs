//! Path resolution — turning logical field paths into storage paths.
//!
//! ## Layers
//!
//! ```text
//! PathMapper::resolve(root, "ref.$id")   ← cached entry point
//!     │
//!     ▼
//! ResolutionCache::get_or_resolve        ← hit: return, miss: resolve then publish on success
//!     │
//!     ▼
//! Resolver::resolve                      ← tokenize + walk the metadata graph (pure)
//! ```
//!
//! Resolution is a pure function of the root type, the path text and the
//! immutable [`MetadataGraph`](crate::mapping::MetadataGraph). The cache only
//! stores successes, so a repeated call can never flip between failure and
//! success.

mod cache;
mod config;
mod error;
mod mapper;
mod resolver;

pub use cache::{CacheStats, ResolutionCache};
pub use config::ResolverConfig;
pub use error::{ResolutionError, ResolveErrorKind, describe};
pub use mapper::PathMapper;
pub use resolver::Resolver;

use crate::path::StoragePath;

/// Outcome of resolving one logical path.
pub type ResolutionResult = Result<StoragePath, ResolutionError>;
