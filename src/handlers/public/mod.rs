// handlers/public/mod.rs - Public handlers (no token required)
//
// Home and health, registration and login, and every read of malls,
// stores and employees.

pub mod home;
pub mod malls;
pub mod stores;
pub mod users;
