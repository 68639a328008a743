// Core Logic
pub mod actions;
pub mod chart;
pub mod validation;
