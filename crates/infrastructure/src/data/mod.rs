pub mod json_file_loader;

pub use json_file_loader::JsonFileDataLoader;
