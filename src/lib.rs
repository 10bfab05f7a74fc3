//! Merit-order production plan service: given a target load, fuel prices,
//! and a fleet of generating units, computes how much each unit should
//! produce to meet the load at minimum fuel cost.

pub mod api;
pub mod config;
/// Cost model and greedy allocation core.
pub mod plan;
