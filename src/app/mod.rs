// ReqLog - app/mod.rs
//
// Application layer: joins core logic to the filesystem and exposes the
// callable operations (health, analyze, export).

pub mod service;
pub mod source;
