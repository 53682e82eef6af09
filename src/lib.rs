// Infrastructure (shared components)
pub mod config;
pub mod error;
pub mod telemetry;

// Domain layer
pub mod data;
pub mod records;
pub mod template;

// Application layer
pub mod email;
