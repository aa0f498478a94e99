pub mod error;
pub mod favorites;
pub mod movies;
pub mod types;
pub mod users;

pub use error::ApiError;
