//! Domain layer for the Applications domain

pub mod entities;
