#![warn(clippy::all, rust_2018_idioms)]

pub mod app;
pub mod controller;
pub mod error;
pub mod export;
pub mod history;
pub mod input;
pub mod panels;
pub mod snapshot;
pub mod style;
pub mod surface;
pub mod tool;
pub mod util;
pub mod view;

pub use app::EaselApp;
pub use controller::{PaintController, SessionState};
pub use error::{SurfaceError, SurfaceResult};
pub use export::ImageFormat;
pub use history::History;
pub use input::InputEvent;
pub use snapshot::Snapshot;
pub use style::StyleSelection;
pub use surface::Surface;
pub use tool::Tool;
pub use view::ViewTransform;
