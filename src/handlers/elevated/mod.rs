// handlers/elevated/mod.rs - Elevated handlers (token + admin flag)
//
// Every delete lives here. `require_auth` runs before `require_admin`.

pub mod malls;
pub mod stores;
