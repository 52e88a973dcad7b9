//! Accounts domain API handlers

pub mod auth;
