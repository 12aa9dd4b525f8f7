// Data Models
pub mod image_info;
pub mod pane_state;

pub use image_info::{ImageInfo, ImageStatus};
pub use pane_state::PaneState;
