pub mod config;
pub mod error;
pub mod input;
pub mod model;
pub mod painter;
pub mod raster;
pub mod surface;

pub use config::{Binding, ControlName, PainterConfig, SurfaceSpec};
pub use error::{ConfigurationError, PainterError, PencilError};
pub use input::{PointerEvent, PointerKind, SurfaceOrigin, resolve_coordinates};
pub use model::*;
pub use painter::Painter;
pub use raster::{RasterSnapshot, RasterSurface};
pub use surface::DrawSurface;
