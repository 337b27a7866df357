//! Domain constants shared by the tokenizer, the resolver and the store.

/// Reserved path token selecting the identifier of a referenced document.
pub const ID_TOKEN: &str = "$id";

/// Storage key used for identifier fields that do not declare one.
pub const DEFAULT_ID_STORAGE_NAME: &str = "_id";

/// Separator between logical path segments.
pub const PATH_SEPARATOR: char = '.';

/// Conventional logical name of an identifier field.
pub const DEFAULT_ID_NAME: &str = "id";
