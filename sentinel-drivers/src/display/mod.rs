//! Display drivers

pub mod framebuffer;
pub mod ssd1306;

pub use framebuffer::Framebuffer;
pub use ssd1306::{DisplayError, DisplayState, Ssd1306};
