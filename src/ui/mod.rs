/// User interface module
///
/// - Skins: colour palettes and copy for the two looks (theme.rs)
/// - Panels: the upload, configuration, action and result views (panels.rs)

pub mod panels;
pub mod theme;

pub use theme::Skin;
