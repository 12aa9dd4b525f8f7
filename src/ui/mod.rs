// UI Layer
pub mod components;
pub mod i18n;
pub mod layout;
pub mod theme;

pub use i18n::{I18n, Language, MessageKey, TextKey};
pub use layout::{ActivePanel, LayoutManager, LayoutMode};
pub use theme::{Theme, ThemeManager};

pub use components::{
    CommandBar, GalleryPanel, PanelStatus, StatusBar, TitleBar, TitleButton,
    WarningScreen,
};
