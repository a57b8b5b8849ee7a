pub mod ai;
pub mod degit;
pub mod image;
pub mod metadata;
pub mod pipeline;
pub mod publish;
pub mod replace;
pub mod utils;
pub mod validate;

pub use crate::utils::{Error, Result};
