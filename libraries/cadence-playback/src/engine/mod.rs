//! Audio engine backends

mod backend;
#[cfg(feature = "silent-engine")]
mod silent;

pub use backend::{available_engines, create_engine, EngineKind};
#[cfg(feature = "silent-engine")]
pub use silent::SilentEngine;
