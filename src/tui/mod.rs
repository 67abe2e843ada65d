pub mod app;
pub mod detail;
pub mod fetch;
pub mod input;
pub mod list;
pub mod markup;
pub mod render;
pub mod resize;
