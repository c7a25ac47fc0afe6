// src/scripts/mod.rs
pub mod collect;
pub mod create;
pub mod list_sets;
pub mod resolve;
pub mod submit;
