//! Merit-order production planning: cost annotation and greedy allocation.

/// Per-unit cost model and availability adjustment.
pub mod cost;
pub mod error;
/// Single-pass greedy allocator over cost-ranked units.
pub mod planner;
pub mod types;

pub use error::PlanError;
pub use types::{Assignment, CostAnnotatedUnit, FuelPrices, GeneratingUnit, PlanRequest, UnitKind};

/// Computes a full production plan for one request.
///
/// Annotates every unit with its cost and effective bounds, then allocates
/// the requested load cheapest-first. Stateless: the CO2 flag comes in as
/// typed configuration, and the request is never mutated.
///
/// # Errors
///
/// Any unit failing validation or missing a fuel price aborts the call
/// before allocation starts. See [`planner::plan`] for `UnmetDemand`.
pub fn production_plan(
    request: &PlanRequest,
    include_co2: bool,
) -> Result<Vec<Assignment>, PlanError> {
    let annotated = request
        .powerplants
        .iter()
        .map(|unit| cost::annotate(unit, &request.fuels, include_co2))
        .collect::<Result<Vec<_>, _>>()?;
    planner::plan(annotated, request.load)
}
