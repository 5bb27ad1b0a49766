//! Centralized limits and thresholds for the kempt rewriters.
//!
//! Tree rewrites recurse once per nesting level of the input. Hosts hand us
//! trees produced from arbitrary user input, so every recursive rewrite is
//! bounded and degrades to "pass the subtree through" past the bound.

/// Maximum nesting depth the brace normalizer rewrites.
///
/// Subtrees nested deeper than this are returned unchanged. Each level costs
/// a handful of stack frames; 256 levels stay well inside the 2 MB stack of
/// test threads.
///
/// # TypeScript example
///
/// ```typescript
/// // Pathologically nested conditionals (generated code):
/// if (a) { if (b) { if (c) { /* ... 300 levels ... */ } } }
/// ```
pub const MAX_NORMALIZE_DEPTH: u32 = 256;

/// Maximum number of `extends` hops followed when loading a `tsconfig.json`.
///
/// Cycles are detected separately; this bounds long acyclic chains.
pub const MAX_TSCONFIG_EXTENDS_DEPTH: u32 = 32;
