// ReqLog - lib.rs
//
// Library entry point, exposing every layer for integration testing and
// for embedding behind an HTTP front end.

pub mod app;
pub mod core;
pub mod platform;
pub mod util;
