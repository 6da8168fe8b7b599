//! aqroute - Plan obstacle-avoiding drone flights over air-quality sensors

pub mod api;
pub mod config;
pub mod domain;
pub mod geometry;
pub mod output;
pub mod planner;
