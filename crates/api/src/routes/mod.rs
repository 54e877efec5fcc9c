//! API Route Handlers

pub mod countries;
pub mod estimate;
