pub mod blob;
pub mod commit;
pub mod object;
pub mod object_id;
pub mod object_type;
