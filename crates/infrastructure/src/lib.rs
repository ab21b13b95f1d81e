//! Ecostats Infrastructure Layer
pub mod data;
pub mod heuristics;
pub mod system;
