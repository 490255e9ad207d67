pub mod purge;
pub mod user;
