//! Domain types shared by the engine, playlist and orchestrator

mod engine;
mod item;
mod locator;
mod metadata;

pub use engine::{EngineEvent, EngineEventSender, EngineState, TrackChangeType};
pub use item::{ItemOptions, SpecialLoadResult};
pub use locator::Locator;
pub use metadata::{MetaBundle, Metadata};
