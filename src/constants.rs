pub const DEFAULT_INDENT: usize = 2;

/// Remaining stack below which the parser switches to a freshly allocated segment.
pub(crate) const STACK_RED_ZONE: usize = 64 * 1024;

/// Size of each stack segment allocated for deeply nested documents.
pub(crate) const STACK_GROW_SIZE: usize = 1024 * 1024;
