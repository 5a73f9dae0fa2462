pub mod commit;
pub mod config;
pub mod drag;
pub mod engine;
pub mod events;
pub mod input;
pub mod registry;
pub mod resize;
pub mod store;
pub mod view;

pub use commit::{Commit, CommitGateway, CommitOutcome, CommitRequest};
pub use config::{ConfigError, GripConfig, ItemProps};
pub use engine::InteractionEngine;
pub use events::{EngineEvent, Events, SessionKind};
pub use input::{InputEvent, Modifiers};
pub use registry::{ActiveSessionRegistry, SessionHandle, SessionId};
pub use resize::{ResizeFrame, ResizeSession, compute_resize};
pub use store::{ItemStore, MemoryStore};
pub use view::{ViewLayer, ViewState};
