//! edutrack-core — Topic registry, student roster, and performance aggregation.
//!
//! This crate owns all of edutrack's state: the ordered topic list with its
//! draft ratings and edit/delete workflows, the roster of submitted students,
//! and the aggregation that feeds the class and per-student charts. The CLI
//! is a thin presentation layer over [`engine::Engine`].

pub mod aggregate;
pub mod command;
pub mod config;
pub mod engine;
pub mod error;
pub mod model;
pub mod rating;
pub mod registry;
pub mod report;
pub mod roster;
pub mod session;
