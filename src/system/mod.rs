// src/system/mod.rs

pub mod app_info;
pub mod output;
