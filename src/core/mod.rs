// src/core/mod.rs

pub mod binder;
pub mod builder;
pub mod coercer;
pub mod descriptor;
pub mod help;
pub mod registry;
pub mod resolver;
pub mod template;
