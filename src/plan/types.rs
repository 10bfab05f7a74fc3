//! Request value objects and derived planning records.

use serde::{Deserialize, Serialize};

use super::error::PlanError;

/// Fuel price snapshot supplied with each plan request.
///
/// Field names keep the wire keys of the request payload. Every price is
/// optional at the parsing layer; the cost model raises
/// [`PlanError::MissingFuelPrice`] when a unit actually needs an absent one.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct FuelPrices {
    /// Gas price (euro/MWh).
    #[serde(rename = "gas(euro/MWh)")]
    pub gas: Option<f64>,
    /// Kerosine price (euro/MWh).
    #[serde(rename = "kerosine(euro/MWh)")]
    pub kerosine: Option<f64>,
    /// CO2 allowance price (euro/ton).
    #[serde(rename = "co2(euro/ton)")]
    pub co2: Option<f64>,
    /// Wind availability (percent, 0–100).
    #[serde(rename = "wind(%)")]
    pub wind_percent: Option<f64>,
}

/// Kind of generating unit, selecting its fuel and availability treatment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitKind {
    Gasfired,
    Turbojet,
    Windturbine,
}

impl UnitKind {
    /// Wire name of the fuel key this kind reads from [`FuelPrices`].
    pub fn fuel_key(self) -> &'static str {
        match self {
            UnitKind::Gasfired => "gas(euro/MWh)",
            UnitKind::Turbojet => "kerosine(euro/MWh)",
            UnitKind::Windturbine => "wind(%)",
        }
    }
}

/// A generating unit as described in the request payload.
///
/// Immutable after deserialization; the cost model derives new records
/// instead of adjusting these bounds in place.
#[derive(Debug, Clone, Deserialize)]
pub struct GeneratingUnit {
    /// Unique unit name, echoed back in the allocation result.
    pub name: String,
    #[serde(rename = "type")]
    pub kind: UnitKind,
    /// Conversion efficiency, in (0, 1]; 1 for wind.
    pub efficiency: f64,
    /// Minimum output when running (MWh).
    pub pmin: f64,
    /// Maximum output (MWh).
    pub pmax: f64,
}

impl GeneratingUnit {
    /// Checks structural constraints on the unit itself.
    ///
    /// # Errors
    ///
    /// Returns [`PlanError::InvalidUnit`] if efficiency is non-positive,
    /// the minimum output is negative, or minimum exceeds maximum.
    pub fn validate(&self) -> Result<(), PlanError> {
        if self.efficiency <= 0.0 {
            return Err(PlanError::InvalidUnit {
                name: self.name.clone(),
                reason: format!("efficiency must be > 0, got {}", self.efficiency),
            });
        }
        if self.pmin < 0.0 {
            return Err(PlanError::InvalidUnit {
                name: self.name.clone(),
                reason: format!("pmin must be >= 0, got {}", self.pmin),
            });
        }
        if self.pmin > self.pmax {
            return Err(PlanError::InvalidUnit {
                name: self.name.clone(),
                reason: format!("pmin ({}) exceeds pmax ({})", self.pmin, self.pmax),
            });
        }
        Ok(())
    }
}

/// A unit annotated with its production cost and availability-adjusted
/// bounds, ready for merit-order ranking.
///
/// Derived once per request by [`super::cost::annotate`]; never mutated.
#[derive(Debug, Clone, PartialEq)]
pub struct CostAnnotatedUnit {
    pub name: String,
    /// Fuel (plus optional CO2) cost to produce one MWh.
    pub cost_per_mwh: f64,
    /// Minimum output after availability adjustment (MWh).
    pub p_min: f64,
    /// Maximum output after availability adjustment (MWh).
    pub p_max: f64,
    /// Cost of running at the adjusted minimum: `p_min * cost_per_mwh`.
    pub min_cost: f64,
    /// Cost of running at the adjusted maximum: `p_max * cost_per_mwh`.
    pub max_cost: f64,
}

/// One entry of the allocation result: a unit and its assigned output.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Assignment {
    pub name: String,
    /// Assigned output in MWh; may be fractional.
    pub p: f64,
}

/// Inbound plan request: target load, fuel snapshot, and unit fleet.
#[derive(Debug, Clone, Deserialize)]
pub struct PlanRequest {
    /// Target load to dispatch (MWh).
    pub load: f64,
    pub fuels: FuelPrices,
    pub powerplants: Vec<GeneratingUnit>,
}
