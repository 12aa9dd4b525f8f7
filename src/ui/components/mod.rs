// UI Components
pub mod command_bar;
pub mod gallery_panel;
pub mod status_bar;
pub mod title_bar;
pub mod warning;

// Re-export components for convenience
pub use command_bar::CommandBar;
pub use gallery_panel::{GalleryPanel, PanelStatus};
pub use status_bar::StatusBar;
pub use title_bar::{TitleBar, TitleButton};
pub use warning::WarningScreen;
