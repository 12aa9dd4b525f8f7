// System Layer
pub mod enumerator;
pub mod image_loader;

pub use enumerator::{FileEnumerator, DEFAULT_RESERVED_NAME};
pub use image_loader::ImageLoader;
