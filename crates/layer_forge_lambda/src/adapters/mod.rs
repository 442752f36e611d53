pub mod installer;
pub mod object_store;
pub mod publisher;
