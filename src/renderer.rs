//! CPU ray tracer and parallel frame driver
//!
//! Rays are traced recursively: nearest sphere, local Phong shading with
//! binary shadows, then an optional mirror bounce blended by reflectivity.
//! A frame is split into horizontal bands that are rendered on a fixed
//! worker pool and joined before the frame is returned.

use std::time::Instant;

use rayon::ThreadPool;

use crate::canvas::{Canvas, CanvasBand, PixelSink};
use crate::color::Color;
use crate::math::{reflect, Vec3};
use crate::scene::{Light, Scene, Sphere};
use crate::{DEFAULT_RECURSION_DEPTH, EPSILON, NEAR_PLANE};

/// A ray in 3D space
#[derive(Debug, Clone, Copy)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self { origin, direction }
    }

    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}

/// Both parametric roots of `ray` against `sphere`, `(+root, -root)`.
///
/// The pair is not sorted. A miss returns `(inf, inf)`.
pub fn intersect_ray_sphere(ray: &Ray, sphere: &Sphere) -> (f32, f32) {
    let oc = ray.origin - sphere.center;

    let k1 = ray.direction.dot(&ray.direction);
    let k2 = 2.0 * oc.dot(&ray.direction);
    let k3 = oc.dot(&oc) - sphere.radius * sphere.radius;
    debug_assert!(k1 > 0.0, "ray direction must be non-zero");

    let discriminant = k2 * k2 - 4.0 * k1 * k3;
    if discriminant < 0.0 {
        return (f32::INFINITY, f32::INFINITY);
    }

    let sqrt_d = discriminant.sqrt();
    let t1 = (-k2 + sqrt_d) / (2.0 * k1);
    let t2 = (-k2 - sqrt_d) / (2.0 * k1);
    (t1, t2)
}

/// Index and distance of the nearest sphere hit strictly inside `(t_min, t_max)`
pub fn closest_intersection(
    ray: &Ray,
    spheres: &[Sphere],
    t_min: f32,
    t_max: f32,
    exclude: Option<usize>,
) -> Option<(usize, f32)> {
    let mut closest: Option<(usize, f32)> = None;
    let mut closest_t = f32::INFINITY;

    for (index, sphere) in spheres.iter().enumerate() {
        if exclude == Some(index) {
            continue;
        }

        let (t1, t2) = intersect_ray_sphere(ray, sphere);
        for t in [t1, t2] {
            if t > t_min && t < t_max && t < closest_t {
                closest_t = t;
                closest = Some((index, t));
            }
        }
    }

    closest
}

/// Whether anything other than `exclude` blocks `ray` within `(EPSILON, t_max)`
fn is_occluded(ray: &Ray, spheres: &[Sphere], t_max: f32, exclude: Option<usize>) -> bool {
    spheres.iter().enumerate().any(|(index, sphere)| {
        if exclude == Some(index) {
            return false;
        }
        let (t1, t2) = intersect_ray_sphere(ray, sphere);
        (t1 > EPSILON && t1 < t_max) || (t2 > EPSILON && t2 < t_max)
    })
}

/// Total light intensity reaching `point`.
///
/// Sums ambient, diffuse and (when `specular >= 0`) specular terms. The
/// result is not clamped and can exceed 1.0 under overlapping lights.
/// `self_index` is the sphere being shaded; it never shadows itself.
pub fn compute_lighting(
    point: &Vec3,
    normal: &Vec3,
    view: &Vec3,
    lights: &[Light],
    spheres: &[Sphere],
    specular: i32,
    self_index: Option<usize>,
) -> f32 {
    let mut intensity = 0.0;
    let normal_length = normal.norm();
    let view_length = view.norm();

    for light in lights {
        let Some((l, t_max)) = light.incidence(point) else {
            intensity += light.intensity();
            continue;
        };

        let shadow_ray = Ray::new(*point, l);
        if is_occluded(&shadow_ray, spheres, t_max, self_index) {
            continue;
        }

        // Diffuse
        let n_dot_l = normal.dot(&l);
        if n_dot_l > 0.0 {
            intensity += light.intensity() * n_dot_l / (normal_length * l.norm());
        }

        // Specular
        if specular >= 0 {
            let r = reflect(&l, normal);
            let r_dot_v = r.dot(view);
            if r_dot_v > 0.0 {
                intensity += light.intensity() * (r_dot_v / (r.norm() * view_length)).powi(specular);
            }
        }
    }

    intensity
}

/// Color seen along `ray`, counting only hits inside `(t_min, t_max)`.
///
/// `depth` is the number of mirror bounces still allowed. `exclude` is the
/// sphere the ray leaves from, if any. The result is not clamped.
pub fn trace_ray(
    scene: &Scene,
    ray: &Ray,
    t_min: f32,
    t_max: f32,
    depth: u32,
    exclude: Option<usize>,
) -> Color {
    let Some((index, t)) = closest_intersection(ray, &scene.spheres, t_min, t_max, exclude) else {
        return scene.background;
    };
    let sphere = &scene.spheres[index];

    let point = ray.at(t);
    let normal = (point - sphere.center).normalize();
    let view = -ray.direction;

    let lighting = compute_lighting(
        &point,
        &normal,
        &view,
        &scene.lights,
        &scene.spheres,
        sphere.specular,
        Some(index),
    );
    let local_color = sphere.color.scale(lighting);

    if sphere.reflective <= 0.0 || depth == 0 {
        return local_color;
    }

    let reflected_ray = Ray::new(point, reflect(&view, &normal));
    let reflected_color = trace_ray(
        scene,
        &reflected_ray,
        EPSILON,
        f32::INFINITY,
        depth - 1,
        Some(index),
    );

    local_color.scale(1.0 - sphere.reflective) + reflected_color.scale(sphere.reflective)
}

/// Frame size, bounce budget and worker count for a render pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderSettings {
    pub width: u32,
    pub height: u32,
    pub recursion_depth: u32,
    pub workers: usize,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            width: 600,
            height: 600,
            recursion_depth: DEFAULT_RECURSION_DEPTH,
            workers: default_workers(),
        }
    }
}

/// Platform concurrency hint, falling back to a single worker
pub fn default_workers() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}

#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("worker count must be at least 1")]
    NoWorkers,

    #[error("canvas must be at least 1x1, got {0}x{1}")]
    EmptyCanvas(u32, u32),

    #[error("failed to start worker pool: {0}")]
    Pool(#[from] rayon::ThreadPoolBuildError),
}

/// The parallel frame driver
pub struct Renderer {
    settings: RenderSettings,
    pool: ThreadPool,
}

impl Renderer {
    pub fn new(settings: RenderSettings) -> Result<Self, RenderError> {
        if settings.workers == 0 {
            return Err(RenderError::NoWorkers);
        }
        if settings.width == 0 || settings.height == 0 {
            return Err(RenderError::EmptyCanvas(settings.width, settings.height));
        }

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(settings.workers)
            .thread_name(|i| format!("band-worker-{i}"))
            .build()?;

        Ok(Self { settings, pool })
    }

    pub fn settings(&self) -> &RenderSettings {
        &self.settings
    }

    /// Render `scene` into a fresh canvas
    pub fn render(&self, scene: &Scene) -> Canvas {
        let mut canvas = Canvas::new(self.settings.width, self.settings.height, scene.background);
        self.render_into(scene, &mut canvas);
        canvas
    }

    /// Render `scene` over every pixel of `canvas`.
    ///
    /// The canvas is split into one band per worker; each band is traced on
    /// its own pool thread and all bands are joined before returning.
    pub fn render_into(&self, scene: &Scene, canvas: &mut Canvas) {
        debug_assert_eq!(
            (canvas.width(), canvas.height()),
            (self.settings.width, self.settings.height),
            "canvas size must match render settings"
        );

        let started = Instant::now();
        let depth = self.settings.recursion_depth;
        let bands = canvas.bands_mut(self.settings.workers);

        tracing::debug!(
            workers = self.settings.workers,
            bands = bands.len(),
            width = self.settings.width,
            height = self.settings.height,
            depth,
            "Starting render pass"
        );

        self.pool.scope(|s| {
            for band in bands {
                s.spawn(move |_| render_band(scene, depth, band));
            }
        });

        tracing::debug!(
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Render pass complete"
        );
    }
}

/// Trace every pixel of one band and write the clamped colors into it
fn render_band(scene: &Scene, depth: u32, mut band: CanvasBand<'_>) {
    let (width, height) = (band.canvas_width(), band.canvas_height());
    let camera = &scene.camera;

    for y in band.canvas_rows() {
        for x in band.canvas_columns() {
            let ray = Ray::new(camera.position, camera.ray_direction(x, y, width, height));
            let color = trace_ray(scene, &ray, NEAR_PLANE, f32::INFINITY, depth, None);
            band.put_pixel(x, y, color.clamp());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::Rotation;
    use crate::scene::Camera;

    fn settings(width: u32, height: u32, workers: usize) -> RenderSettings {
        RenderSettings {
            width,
            height,
            recursion_depth: DEFAULT_RECURSION_DEPTH,
            workers,
        }
    }

    fn matte(center: Vec3, radius: f32, color: Color) -> Sphere {
        Sphere::new(center, radius, color, -1, 0.0)
    }

    fn forward_ray() -> Ray {
        Ray::new(Vec3::zeros(), Vec3::new(0.0, 0.0, 1.0))
    }

    #[test]
    fn test_ray_at() {
        let ray = Ray::new(Vec3::new(1.0, 0.0, 0.0), Vec3::new(0.0, 2.0, 0.0));
        assert!((ray.at(1.5).y - 3.0).abs() < 0.001);
    }

    #[test]
    fn test_intersect_returns_unsorted_roots() {
        let sphere = matte(Vec3::zeros(), 1.0, Color::WHITE);
        let ray = Ray::new(Vec3::new(0.0, 0.0, -5.0), Vec3::new(0.0, 0.0, 1.0));

        let (t1, t2) = intersect_ray_sphere(&ray, &sphere);
        assert!((t1 - 6.0).abs() < 0.001);
        assert!((t2 - 4.0).abs() < 0.001);
    }

    #[test]
    fn test_intersect_miss() {
        let sphere = matte(Vec3::new(0.0, 5.0, 0.0), 1.0, Color::WHITE);
        let (t1, t2) = intersect_ray_sphere(&forward_ray(), &sphere);
        assert!(t1.is_infinite() && t2.is_infinite());
    }

    #[test]
    fn test_intersect_from_surface_pointing_outward() {
        let sphere = matte(Vec3::zeros(), 1.0, Color::WHITE);
        let ray = Ray::new(Vec3::new(0.0, 0.0, 1.0), Vec3::new(0.0, 0.0, 1.0));

        let (t1, t2) = intersect_ray_sphere(&ray, &sphere);
        assert!(t1.abs() < 0.001);
        assert!((t2 + 2.0).abs() < 0.001);
    }

    #[test]
    fn test_intersect_is_scale_invariant() {
        let sphere = matte(Vec3::new(0.0, 0.0, 4.0), 1.0, Color::WHITE);
        let short = Ray::new(Vec3::zeros(), Vec3::new(0.0, 0.0, 1.0));
        let long = Ray::new(Vec3::zeros(), Vec3::new(0.0, 0.0, 2.0));

        let (_, near_short) = intersect_ray_sphere(&short, &sphere);
        let (_, near_long) = intersect_ray_sphere(&long, &sphere);
        assert!((near_short - 3.0).abs() < 0.001);
        assert!((near_long - 1.5).abs() < 0.001);
    }

    #[test]
    fn test_closest_intersection_skips_excluded() {
        let spheres = [
            matte(Vec3::new(0.0, 0.0, 3.0), 1.0, Color::WHITE),
            matte(Vec3::new(0.0, 0.0, 8.0), 1.0, Color::WHITE),
        ];
        let ray = forward_ray();

        let (index, t) = closest_intersection(&ray, &spheres, 1.0, f32::INFINITY, None).unwrap();
        assert_eq!(index, 0);
        assert!((t - 2.0).abs() < 0.001);

        let (index, t) = closest_intersection(&ray, &spheres, 1.0, f32::INFINITY, Some(0)).unwrap();
        assert_eq!(index, 1);
        assert!((t - 7.0).abs() < 0.001);
    }

    #[test]
    fn test_closest_intersection_respects_bounds() {
        let spheres = [matte(Vec3::new(0.0, 0.0, 3.0), 1.0, Color::WHITE)];
        let ray = forward_ray();

        // Near root at 2.0 is rejected, far root at 4.0 remains
        let (_, t) = closest_intersection(&ray, &spheres, 2.5, f32::INFINITY, None).unwrap();
        assert!((t - 4.0).abs() < 0.001);

        assert!(closest_intersection(&ray, &spheres, 1.0, 1.5, None).is_none());
    }

    // Shading point on the near side of a sphere at (0, 0, 5), facing -z
    fn shading_fixture() -> (Vec3, Vec3, Vec3) {
        (
            Vec3::new(0.0, 0.0, 4.0),
            Vec3::new(0.0, 0.0, -1.0),
            Vec3::new(0.0, 0.0, -4.0),
        )
    }

    #[test]
    fn test_lighting_ambient_only() {
        let (point, normal, view) = shading_fixture();
        let lights = [Light::Ambient { intensity: 0.3 }];
        let spheres = [matte(Vec3::new(0.0, 0.0, 5.0), 1.0, Color::WHITE)];

        let i = compute_lighting(&point, &normal, &view, &lights, &spheres, 10, Some(0));
        assert!((i - 0.3).abs() < 0.001);
    }

    #[test]
    fn test_lighting_diffuse_and_specular_unclamped() {
        let (point, normal, view) = shading_fixture();
        let lights = [Light::Point { intensity: 0.6, position: Vec3::new(0.0, 0.0, 1.0) }];
        let spheres = [matte(Vec3::new(0.0, 0.0, 5.0), 1.0, Color::WHITE)];

        let diffuse_only = compute_lighting(&point, &normal, &view, &lights, &spheres, -1, Some(0));
        assert!((diffuse_only - 0.6).abs() < 0.001);

        // Light, normal and view all aligned: specular adds the full intensity
        let with_specular = compute_lighting(&point, &normal, &view, &lights, &spheres, 10, Some(0));
        assert!((with_specular - 1.2).abs() < 0.001);
    }

    #[test]
    fn test_lighting_ignores_light_behind_surface() {
        let (point, normal, view) = shading_fixture();
        let lights = [Light::Directional { intensity: 0.5, direction: Vec3::new(0.0, 0.0, 1.0) }];

        let i = compute_lighting(&point, &normal, &view, &lights, &[], 50, None);
        assert!(i.abs() < 0.001);
    }

    #[test]
    fn test_shadow_removes_only_that_light() {
        let (point, normal, view) = shading_fixture();
        let lights = [
            Light::Ambient { intensity: 0.2 },
            Light::Point { intensity: 0.6, position: Vec3::new(0.0, 0.0, 1.0) },
        ];
        let surface = matte(Vec3::new(0.0, 0.0, 5.0), 1.0, Color::WHITE);
        let blocker = matte(Vec3::new(0.0, 0.0, 2.5), 0.5, Color::WHITE);

        let lit = compute_lighting(&point, &normal, &view, &lights, &[surface], 10, Some(0));
        assert!((lit - 1.4).abs() < 0.001);

        let shadowed =
            compute_lighting(&point, &normal, &view, &lights, &[surface, blocker], 10, Some(0));
        assert!((shadowed - 0.2).abs() < 0.001);
    }

    #[test]
    fn test_point_light_shadow_stops_at_light() {
        let (point, normal, view) = shading_fixture();
        let surface = matte(Vec3::new(0.0, 0.0, 5.0), 1.0, Color::WHITE);
        let beyond = matte(Vec3::new(0.0, 0.0, -2.0), 0.5, Color::WHITE);

        let point_light = [Light::Point { intensity: 0.6, position: Vec3::new(0.0, 0.0, 1.0) }];
        let i = compute_lighting(&point, &normal, &view, &point_light, &[surface, beyond], -1, Some(0));
        assert!((i - 0.6).abs() < 0.001);

        // A directional light has no far bound, so the same sphere occludes it
        let sun = [Light::Directional { intensity: 0.6, direction: Vec3::new(0.0, 0.0, -1.0) }];
        let i = compute_lighting(&point, &normal, &view, &sun, &[surface, beyond], -1, Some(0));
        assert!(i.abs() < 0.001);
    }

    #[test]
    fn test_shaded_sphere_does_not_shadow_itself() {
        let (_, normal, view) = shading_fixture();
        let lights = [Light::Point { intensity: 0.6, position: Vec3::new(0.0, 0.0, 1.0) }];
        let surface = matte(Vec3::new(0.0, 0.0, 5.0), 1.0, Color::WHITE);
        // Hit point that landed slightly inside the surface, past the EPSILON bias
        let point = Vec3::new(0.0, 0.0, 4.01);

        let excluded = compute_lighting(&point, &normal, &view, &lights, &[surface], -1, Some(0));
        assert!((excluded - 0.6).abs() < 0.001);

        let included = compute_lighting(&point, &normal, &view, &lights, &[surface], -1, None);
        assert!(included.abs() < 0.001);
    }

    #[test]
    fn test_shadow_ignores_blockers_within_epsilon() {
        let (point, normal, view) = shading_fixture();
        let lights = [Light::Point { intensity: 0.6, position: Vec3::new(0.0, 0.0, 1.0) }];
        let surface = matte(Vec3::new(0.0, 0.0, 5.0), 1.0, Color::WHITE);
        // Neighbour's surface crosses the shadow ray at t ~= 0.00033
        let neighbour = matte(Vec3::new(0.0, 0.0, 4.5), 0.501, Color::WHITE);

        let i = compute_lighting(&point, &normal, &view, &lights, &[surface, neighbour], -1, Some(0));
        assert!((i - 0.6).abs() < 0.001);
    }

    #[test]
    fn test_shadow_counts_blockers_past_epsilon() {
        let (point, normal, view) = shading_fixture();
        let lights = [Light::Point { intensity: 0.6, position: Vec3::new(0.0, 0.0, 1.0) }];
        let surface = matte(Vec3::new(0.0, 0.0, 5.0), 1.0, Color::WHITE);
        // Only positive root is at t = 0.002
        let neighbour = matte(Vec3::new(0.0, 0.0, 4.5), 0.506, Color::WHITE);

        let i = compute_lighting(&point, &normal, &view, &lights, &[surface, neighbour], -1, Some(0));
        assert!(i.abs() < 0.001);
    }

    #[test]
    fn test_bounce_ray_skips_hits_within_epsilon() {
        let mut scene = Scene::empty(Color::new(1, 2, 3));
        scene.lights.push(Light::Ambient { intensity: 1.0 });
        let ray = Ray::new(Vec3::zeros(), Vec3::new(0.0, 0.0, 1.0));

        // Far root at t = 0.0005
        scene.spheres.push(matte(Vec3::new(0.0, 0.0, -1.0), 1.0005, Color::new(0, 0, 100)));
        let color = trace_ray(&scene, &ray, EPSILON, f32::INFINITY, 0, None);
        assert_eq!(color, Color::new(1, 2, 3));

        // Far root at t = 0.002
        scene.spheres[0].radius = 1.002;
        let color = trace_ray(&scene, &ray, EPSILON, f32::INFINITY, 0, None);
        assert_eq!(color, Color::new(0, 0, 100));
    }

    #[test]
    fn test_trace_miss_returns_background() {
        let mut scene = Scene::empty(Color::new(12, 34, 56));
        scene.spheres.push(matte(Vec3::new(0.0, 10.0, 3.0), 1.0, Color::WHITE));
        scene.lights.push(Light::Ambient { intensity: 1.0 });

        let color = trace_ray(&scene, &forward_ray(), 1.0, f32::INFINITY, 3, None);
        assert_eq!(color, Color::new(12, 34, 56));
    }

    #[test]
    fn test_trace_ambient_only_scales_sphere_color() {
        let mut scene = Scene::empty(Color::BLACK);
        scene.spheres.push(Sphere::new(Vec3::new(0.0, 0.0, 3.0), 1.0, Color::new(10, 20, 200), 500, 0.0));
        scene.lights.push(Light::Ambient { intensity: 0.5 });

        let color = trace_ray(&scene, &forward_ray(), 1.0, f32::INFINITY, 3, None);
        assert_eq!(color.clamp(), Color::new(10, 20, 200).scale(0.5).clamp());
        assert_eq!(color, Color::new(5, 10, 100));
    }

    #[test]
    fn test_trace_ignores_hits_before_near_plane() {
        let mut scene = Scene::empty(Color::BLACK);
        // Camera sits inside this sphere; only the far wall at t = 1.5 counts
        scene.spheres.push(matte(Vec3::new(0.0, 0.0, 0.5), 1.0, Color::new(0, 0, 100)));
        scene.lights.push(Light::Ambient { intensity: 1.0 });

        let color = trace_ray(&scene, &forward_ray(), 1.0, f32::INFINITY, 0, None);
        assert_eq!(color, Color::new(0, 0, 100));
        let color = trace_ray(&scene, &forward_ray(), 2.0, f32::INFINITY, 0, None);
        assert_eq!(color, Color::BLACK);
    }

    fn mirror_scene() -> Scene {
        let mut scene = Scene::empty(Color::BLACK);
        // Half mirror in front of the camera, matte sphere behind it
        scene.spheres.push(Sphere::new(Vec3::new(0.0, 0.0, 3.0), 1.0, Color::new(0, 0, 200), -1, 0.5));
        scene.spheres.push(matte(Vec3::new(0.0, 0.0, -3.0), 1.0, Color::new(0, 200, 0)));
        scene.lights.push(Light::Ambient { intensity: 0.5 });
        scene
    }

    #[test]
    fn test_reflection_blend() {
        let scene = mirror_scene();
        let color = trace_ray(&scene, &forward_ray(), 1.0, f32::INFINITY, 1, None);

        let point = Vec3::new(0.0, 0.0, 2.0);
        let normal = Vec3::new(0.0, 0.0, -1.0);
        let view = Vec3::new(0.0, 0.0, -1.0);
        let bounce = Ray::new(point, reflect(&view, &normal));
        let reflected = trace_ray(&scene, &bounce, EPSILON, f32::INFINITY, 0, Some(0));
        let local = Color::new(0, 0, 200).scale(0.5);

        assert_eq!(reflected, Color::new(0, 100, 0));
        assert_eq!(color, local.scale(0.5) + reflected.scale(0.5));
        assert_eq!(color, Color::new(0, 50, 50));
    }

    #[test]
    fn test_zero_depth_returns_local_color() {
        let scene = mirror_scene();
        let color = trace_ray(&scene, &forward_ray(), 1.0, f32::INFINITY, 0, None);
        assert_eq!(color, Color::new(0, 0, 100));
    }

    #[test]
    fn test_reflection_blend_saturates_under_huge_intensity() {
        let mut scene = Scene::empty(Color::BLACK);
        let red = Color::new(0, 0, 200);
        scene.spheres.push(Sphere::new(Vec3::new(0.0, 0.0, 3.0), 1.0, red, -1, 0.5));
        scene.spheres.push(matte(Vec3::new(0.0, 0.0, -3.0), 1.0, red));
        scene.lights.push(Light::Ambient { intensity: 1.0e8 });
        assert!(scene.validate().is_ok());

        let color = trace_ray(&scene, &forward_ray(), 1.0, f32::INFINITY, 1, None);
        assert_eq!(color.clamp(), Color::new(0, 0, 255));
    }

    #[test]
    fn test_renderer_rejects_bad_settings() {
        assert!(matches!(Renderer::new(settings(8, 8, 0)), Err(RenderError::NoWorkers)));
        assert!(matches!(Renderer::new(settings(0, 8, 1)), Err(RenderError::EmptyCanvas(0, 8))));
    }

    #[test]
    fn test_center_pixel_matches_hand_computed_lighting() {
        let mut scene = Scene::empty(Color::WHITE);
        scene.camera = Camera::new(Vec3::zeros(), Rotation::identity());
        scene.spheres.push(matte(Vec3::new(0.0, -1.0, 3.0), 1.0, Color::new(0, 0, 255)));
        scene.lights.push(Light::Ambient { intensity: 0.2 });
        scene.lights.push(Light::Point { intensity: 0.6, position: Vec3::new(2.0, 1.0, 0.0) });

        let canvas = Renderer::new(settings(16, 16, 2)).unwrap().render(&scene);

        // Center ray grazes the top of the sphere at (0, 0, 3) with normal +y,
        // so L = (2, 1, -3) and n . L = 1
        let intensity = 0.2 + 0.6 / 14.0f32.sqrt();
        let expected = Color::new(0, 0, 255).scale(intensity).clamp();
        assert_eq!(canvas.get(0, 0), Some(expected));
        assert_eq!(expected, Color::new(0, 0, 91));
    }

    #[test]
    fn test_empty_scene_renders_background() {
        let scene = Scene::empty(Color::new(1, 2, 3));
        let canvas = Renderer::new(settings(8, 6, 3)).unwrap().render(&scene);
        assert!(canvas.pixels().iter().all(|&c| c == Color::new(1, 2, 3)));
    }

    #[test]
    fn test_parallel_matches_single_worker() {
        let scene = Scene::demo();
        let single = Renderer::new(settings(48, 48, 1)).unwrap().render(&scene);

        for workers in [2, 4, 5, 48] {
            let banded = Renderer::new(settings(48, 48, workers)).unwrap().render(&scene);
            assert_eq!(single.pixels(), banded.pixels(), "workers = {workers}");
        }
    }

    #[test]
    fn test_more_workers_than_rows() {
        let scene = Scene::demo();
        let single = Renderer::new(settings(10, 3, 1)).unwrap().render(&scene);
        let wide = Renderer::new(settings(10, 3, 8)).unwrap().render(&scene);
        assert_eq!(single.pixels(), wide.pixels());
    }

    #[test]
    fn test_render_into_overwrites_every_pixel() {
        let scene = Scene::demo();
        let renderer = Renderer::new(settings(12, 12, 3)).unwrap();
        let expected = renderer.render(&scene);

        let mut canvas = Canvas::new(12, 12, Color::new(1, 1, 1));
        renderer.render_into(&scene, &mut canvas);
        assert_eq!(canvas.pixels(), expected.pixels());
    }
}
