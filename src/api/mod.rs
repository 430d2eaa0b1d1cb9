//! 入站边界模块
//!
//! 管线与外部传输层之间的契约

pub mod quiz;

pub use quiz::{handle_generate, StatusClass};
