mod components;
pub mod feed;
mod layout;

pub use layout::render;
