//! Applications domain API handlers

pub mod applications;
