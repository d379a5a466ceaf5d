//! Texture studio: the stateful layer on top of the projection engine.
//!
//! - [`ProjectionStateController`]: projection kind / draw mode state machine
//! - [`TextureSourceRegistry`]: default, uploaded and hand-drawn textures
//! - [`DrawCanvas`]: the freehand drawing surface
//! - [`ReferenceProxySlot`]: the proxy solid shown next to the model
//! - [`Command`]: the command surface driving the controller
//! - [`StudioSettings`]: configuration

pub mod canvas;
pub mod command;
pub mod controller;
pub mod proxy;
pub mod registry;
pub mod settings;

pub use canvas::{BrushColor, DrawCanvas};
pub use command::Command;
pub use controller::{ProjectionState, ProjectionStateController};
pub use proxy::{ReferenceProxy, ReferenceProxySlot, build_proxy_geometry, proxy_transform};
pub use registry::{TextureSource, TextureSourceRegistry};
pub use settings::{CanvasSettings, ProxySettings, StudioSettings};
