//! Greedy merit-order allocation.

use super::error::PlanError;
use super::types::{Assignment, CostAnnotatedUnit};

/// Allocates the target load across units, cheapest first.
///
/// Units are stably sorted ascending by `(min_cost, max_cost)` and walked
/// once with a running `remaining` accumulator. At each unit:
///
/// - If even the unit's maximum leaves demand unmet, it runs at maximum —
///   but only when the next-cheapest unit's minimum still fits in what
///   would remain. Otherwise the unit is skipped entirely, spare capacity
///   and all; partially loading it here would strand the next unit below
///   its minimum. This is a deliberate gap of the single-pass heuristic.
/// - Otherwise the unit absorbs the remainder and the plan is complete.
///
/// An empty unit list yields an empty plan.
///
/// # Errors
///
/// Returns [`PlanError::UnmetDemand`] when the fleet runs out of units
/// with demand still unmet. The last unit's maximal output has already
/// been appended to the partial allocation carried in the error.
pub fn plan(
    mut units: Vec<CostAnnotatedUnit>,
    target_load: f64,
) -> Result<Vec<Assignment>, PlanError> {
    units.sort_by(|a, b| {
        a.min_cost
            .total_cmp(&b.min_cost)
            .then(a.max_cost.total_cmp(&b.max_cost))
    });

    let mut remaining = target_load;
    let mut assignments = Vec::with_capacity(units.len());

    for (i, unit) in units.iter().enumerate() {
        let diff = remaining - unit.p_max;

        if diff > 0.0 {
            let Some(next) = units.get(i + 1) else {
                // Fleet exhausted: record the last unit at max, then fail
                // with whatever is still unserved.
                assignments.push(Assignment {
                    name: unit.name.clone(),
                    p: unit.p_max,
                });
                remaining -= unit.p_max;
                return Err(PlanError::UnmetDemand {
                    remaining,
                    partial: assignments,
                });
            };
            if diff >= next.p_min {
                assignments.push(Assignment {
                    name: unit.name.clone(),
                    p: unit.p_max,
                });
                remaining -= unit.p_max;
            }
            // diff < next.p_min: skip this unit without assigning anything.
        } else {
            assignments.push(Assignment {
                name: unit.name.clone(),
                p: remaining,
            });
            return Ok(assignments);
        }
    }

    // Only reachable with no units at all.
    Ok(assignments)
}
