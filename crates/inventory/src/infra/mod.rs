pub mod archive;
pub mod postgres;
