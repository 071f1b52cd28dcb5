//! alumni-console web server.
//!
//! This crate provides the web shell of the alumni console: it guards every
//! route with the access policy, handles login and logout against the
//! remote REST API, and serves the documents the front-end mounts on.

pub mod app;
pub mod auth;
pub mod config;
pub mod pages;
