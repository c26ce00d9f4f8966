//! Shared library surface for the waterway planning service and its tests.

pub mod api;
pub mod classifier;
pub mod config;
pub mod providers;
pub mod route_planner;
pub mod state;
