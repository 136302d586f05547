pub mod file_store;

pub use file_store::{FileStore, ALLOWED_IMAGE_EXTENSIONS};
