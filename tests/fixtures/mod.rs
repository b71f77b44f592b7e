//! Test fixtures for pickup-planner.
//!
//! Named Henderson-area locations plus ready-made school-run entities.

pub mod school_run;
