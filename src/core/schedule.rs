//! Deterministic execution ordering for structure entries
//!
//! Invariant: a drop rule never runs before a copy rule that shares its
//! destination path. The schedule is two-phase: every copy entry first,
//! then every drop entry, each phase in lexicographic destination order,
//! declaration order breaking ties (the sort is stable). Lexicographic
//! ordering also puts parent destinations before their children, so
//! ancestor directories exist by the time a nested entry is applied.

use crate::core::rule::StructureEntry;

/// Compute the linear application order for the given entries.
pub fn schedule(entries: &[StructureEntry]) -> Vec<&StructureEntry> {
  let mut ordered: Vec<&StructureEntry> = entries.iter().collect();
  ordered.sort_by(|a, b| {
    a.rule
      .is_drop()
      .cmp(&b.rule.is_drop())
      .then_with(|| a.dest.cmp(&b.dest))
  });
  ordered
}
