// handlers/elevated/mod.rs - Elevated handlers (admin role required)
//
// Same middleware stack as protected routes plus require_admin_middleware.
pub mod categories;
