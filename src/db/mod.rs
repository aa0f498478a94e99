pub mod filter;
pub mod model;
pub mod repo;
pub mod sqlite;

pub use filter::*;
pub use model::*;
pub use repo::*;
pub use sqlite::SqliteRepository;
