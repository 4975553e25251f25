pub mod map;
pub mod timeline;
