pub mod profile;
pub mod theme;
pub mod video;
