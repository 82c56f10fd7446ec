// handlers/mod.rs - 3-Tier Handler Architecture
//
// Public (no auth) → Protected (JWT + known user) → Elevated (JWT + admin role)
pub mod elevated;
pub mod protected;
pub mod public;
