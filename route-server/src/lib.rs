//! Taxi and public-transit route planner server.
//!
//! Answers: "how do I get there within this many minutes, walking at most
//! this much, as cheaply as possible?" Candidates combine walking, taxi
//! rides and transit itineraries; feasible ones are ranked by cost.

pub mod cache;
pub mod config;
pub mod domain;
pub mod geo;
pub mod planner;
pub mod providers;
pub mod web;
