//! Per-unit production cost and availability adjustment.

use super::error::PlanError;
use super::types::{CostAnnotatedUnit, FuelPrices, GeneratingUnit, UnitKind};

/// Emission intensity applied to generated output: tons of CO2 per MWh.
const CO2_TONS_PER_MWH: f64 = 0.3;

/// Converts a wind availability percentage into a capacity scale factor.
const PERCENT_SCALE: f64 = 0.01;

/// Derives the cost-per-MWh and effective output bounds for one unit.
///
/// Cost is `fuel_price / efficiency`; wind carries no fuel price so its
/// cost is zero. With `include_co2` set, non-wind units additionally pay
/// `0.3 × co2_price` per MWh of output. Wind bounds are scaled by the
/// availability percentage; all other bounds pass through unchanged.
///
/// Pure: the caller-supplied unit is never modified.
///
/// # Errors
///
/// Returns [`PlanError::InvalidUnit`] for structurally invalid units and
/// [`PlanError::MissingFuelPrice`] when the snapshot lacks a price this
/// unit needs.
pub fn annotate(
    unit: &GeneratingUnit,
    fuels: &FuelPrices,
    include_co2: bool,
) -> Result<CostAnnotatedUnit, PlanError> {
    unit.validate()?;

    let fuel_price = match unit.kind {
        UnitKind::Gasfired => require(fuels.gas, unit.kind)?,
        UnitKind::Turbojet => require(fuels.kerosine, unit.kind)?,
        // Wind is free to run; its "fuel" key selects availability, not price.
        UnitKind::Windturbine => 0.0,
    };

    let mut cost_per_mwh = fuel_price / unit.efficiency;
    if include_co2 && unit.kind != UnitKind::Windturbine {
        let co2_price = fuels.co2.ok_or(PlanError::MissingFuelPrice {
            fuel: "co2(euro/ton)",
        })?;
        cost_per_mwh += CO2_TONS_PER_MWH * co2_price;
    }

    let (p_min, p_max) = match unit.kind {
        UnitKind::Windturbine => {
            let availability =
                require(fuels.wind_percent, UnitKind::Windturbine)? * PERCENT_SCALE;
            (unit.pmin * availability, unit.pmax * availability)
        }
        _ => (unit.pmin, unit.pmax),
    };

    Ok(CostAnnotatedUnit {
        name: unit.name.clone(),
        cost_per_mwh,
        p_min,
        p_max,
        min_cost: p_min * cost_per_mwh,
        max_cost: p_max * cost_per_mwh,
    })
}

fn require(price: Option<f64>, kind: UnitKind) -> Result<f64, PlanError> {
    price.ok_or(PlanError::MissingFuelPrice {
        fuel: kind.fuel_key(),
    })
}
