// ReqLog - core/mod.rs
//
// Core business logic layer.
// Must NOT depend on: platform or app; takes readers/writers, never paths to open.

pub mod aggregate;
pub mod export;
pub mod layout;
pub mod model;
pub mod parser;
