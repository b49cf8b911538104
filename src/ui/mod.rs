/// UI helpers
///
/// The window itself lives in main.rs; this module holds the pieces that
/// can be tested without one.

pub mod keys;

/// Shown under the status line
pub const KEY_LEGEND: &str = "← previous   → next   ↓ keep   ↑ unkeep";
