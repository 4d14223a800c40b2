pub mod archive;
pub mod entity;
pub mod repository;
