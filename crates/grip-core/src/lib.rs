pub mod error;
pub mod hit;
pub mod id;
pub mod model;
pub mod resolve;
pub mod transform;

pub use error::TransformError;
pub use hit::PointerTarget;
pub use id::ItemId;
pub use model::*;
pub use resolve::{CanvasSource, TransformInput, parse_css_transform, resolve};
pub use transform::{CanvasTransform, Viewport};

// Re-export kurbo geometry so downstream crates share one version
pub use kurbo::{Point, Rect, Size, Vec2};
