pub mod core;
pub mod main;
pub mod metrics;
pub mod render;
pub mod result_view;
pub mod run_effect;
