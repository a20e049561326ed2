pub mod object_store;
pub mod repository;
pub mod state;
pub mod workspace;
