pub mod github;
pub mod schema;
pub mod types;
