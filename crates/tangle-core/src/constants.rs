//! # Built-in Constants
//!
//! Hardcoded values compiled into the core. The graph starts empty but the
//! editing rules are fixed; these constants are immutable at runtime.

/// Prefix for allocator-produced node ids (`n0`, `n1`, ...).
pub const NODE_ID_PREFIX: &str = "n";

/// Prefix for allocator-produced edge ids (`e0`, `e1`, ...).
pub const EDGE_ID_PREFIX: &str = "e";

/// Generic predicate attached to edges created by `AddEdge`/`AddHop` and to
/// the default template. Callers may replace it via `EditPredicates`.
pub const DEFAULT_PREDICATE: &str = "biolink:related_to";

/// Category URI prefix stripped when humanizing a category into a display
/// name (`biolink:ChemicalSubstance` becomes "Chemical Substance").
pub const CATEGORY_PREFIX: &str = "biolink:";
