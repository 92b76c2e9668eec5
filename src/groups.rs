//! Grouping hourly tasks by overlap.
//!
//! Week/day views split a day column into side-by-side sub-columns: tasks
//! that overlap in time must not share one. This module clusters a day's
//! hourly holders so the renderer can divide the column width per group.

use tracing::trace;

use crate::day::TaskHolder;

/// Partition `holders` into groups of mutually overlapping tasks.
///
/// Greedy single pass: the first remaining holder seeds a group, and the
/// rest of the list is scanned once, absorbing any holder overlapping any
/// current member. Every holder lands in exactly one group; relative input
/// order is kept within groups, and groups appear in seed order.
///
/// The scan does not revisit holders rejected earlier in the same pass, so
/// two groups connected only through a holder processed after both were
/// seeded stay separate. That is sensitive to input order and kept as-is;
/// callers feed holders in chronological order, where it does not bite.
pub fn group_by_overlapping(holders: Vec<TaskHolder<'_>>) -> Vec<Vec<TaskHolder<'_>>> {
    let mut remaining: Vec<Option<TaskHolder<'_>>> = holders.into_iter().map(Some).collect();
    let mut groups = Vec::new();

    for seed_index in 0..remaining.len() {
        let Some(seed) = remaining[seed_index].take() else {
            continue;
        };
        let mut group = vec![seed];
        for candidate_slot in remaining[seed_index + 1..].iter_mut() {
            let absorb = candidate_slot
                .as_ref()
                .is_some_and(|candidate| group.iter().any(|member| member.task.overlaps(candidate.task)));
            if absorb {
                if let Some(candidate) = candidate_slot.take() {
                    group.push(candidate);
                }
            }
        }
        groups.push(group);
    }

    trace!(groups = groups.len(), "grouped holders by overlap");
    groups
}
