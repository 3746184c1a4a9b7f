//! Upload storage adapters

pub mod temp_dir;

pub use temp_dir::TempDirStorage;
