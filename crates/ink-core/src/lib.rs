pub mod config;
pub mod model;
pub mod persist;
pub mod store;
pub mod view;

pub use config::{EditorConfig, ViewSettings};
pub use model::*;
pub use persist::{KeyValueStore, MemoryStore, load_scene, load_settings, save_scene, save_settings};
pub use store::SceneStore;
pub use view::{ViewState, ZoomDirection};

// Re-export kurbo geometry so downstream crates agree on one version
pub use kurbo::{Point, Rect, Vec2};
