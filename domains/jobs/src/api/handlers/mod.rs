//! Jobs domain API handlers

pub mod jobs;
