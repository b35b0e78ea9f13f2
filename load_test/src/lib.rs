//! Load testing for the search GraphQL API.
//!
//! Simulated users pick search tasks at random, wait a think-time, and POST
//! one GraphQL query per task to `/searchapi/graphql` with a bearer token.

pub mod auth;
pub mod cli;
pub mod client;
pub mod config;
pub mod error;
pub mod graphql;
pub mod metrics;
pub mod runner;
pub mod scenarios;
pub mod tasks;
pub mod user;
