pub mod app;
pub mod collector;
pub mod compare;
pub mod config;
pub mod domain;
pub mod error;
pub mod metric;
pub mod neuromorpho;
pub mod normalize;
pub mod output;
pub mod stats;
