//! Core of the employee self-service portal: slip list filtering, the
//! notification panel, and the session state that owns them.

pub mod api;
pub mod auth;
pub mod config;
pub mod db;
pub mod model;
pub mod models;
pub mod session;
pub mod utils;
