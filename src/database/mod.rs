pub mod filter;
pub mod manager;
pub mod memory;
pub mod postgres;
pub mod repository;
pub mod store;

pub use filter::Filter;
pub use manager::{connect_postgres, open_store, DatabaseError};
pub use memory::MemoryStore;
pub use postgres::PostgresStore;
pub use repository::Repository;
pub use store::DocumentStore;
