// handlers/public/mod.rs - Public handlers (no authentication required)
//
// Service information, health, and read-only catalog lookups.
pub mod categories;
pub mod products;
pub mod service;
