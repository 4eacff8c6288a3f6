//! Personal trip logger server.
//!
//! Records trips (where from, where to, how, why, and what it cost) through
//! a four-stage entry wizard, estimates cost from distance and mode, and
//! keeps the log behind a small JSON API.

pub mod cache;
pub mod config;
pub mod domain;
pub mod geocode;
pub mod pricing;
pub mod store;
pub mod web;
pub mod wizard;
