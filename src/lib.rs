//! Whitted-style sphere ray tracer
//!
//! This library renders a static scene of spheres lit by ambient, point and
//! directional lights. Every pixel is traced independently: camera ray,
//! nearest sphere hit, diffuse + specular shading with hard shadows, and
//! mirror reflection up to a bounded recursion depth. Rows are split into
//! bands and rendered on a fixed pool of worker threads.

pub mod canvas;
pub mod color;
pub mod config;
pub mod math;
pub mod raster;
pub mod renderer;
pub mod scene;

pub use canvas::{Canvas, PixelSink};
pub use color::Color;
pub use config::AppConfig;
pub use renderer::{RenderSettings, Renderer};
pub use scene::{Camera, Light, Scene, Sphere};

/// Default number of reflection bounces
pub const DEFAULT_RECURSION_DEPTH: u32 = 3;

/// Minimum parametric distance for shadow and reflection rays (shadow bias)
pub const EPSILON: f32 = 0.001;

/// Near-plane distance for primary camera rays
pub const NEAR_PLANE: f32 = 1.0;
