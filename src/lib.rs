//! Statusboard - reduces raw monitoring data into a presentation model.
//!
//! Upstream `/api/status` responses are decoded, folded into per-entity
//! history buckets, scored, and served as filterable and sortable views.

pub mod config;
pub mod model;
pub mod orchestrator;
pub mod pipeline;
pub mod query;
pub mod source;
pub mod web;
