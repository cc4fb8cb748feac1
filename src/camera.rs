//! Camera model and the render loop that drives it.

use glam::Vec3A;
use image::{ImageBuffer, Rgb};
use indicatif::{ProgressBar, ProgressStyle};
use log::info;
use rand::RngCore;
use thiserror::Error;

use crate::hittable::Hittable;
use crate::interval::Interval;
use crate::material::Color;
use crate::random;
use crate::ray::Ray;

/// Configurations the camera refuses to render with.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CameraError {
    /// The image must be at least one pixel wide.
    #[error("invalid configuration: image width must be at least 1 pixel")]
    ZeroImageWidth,
    /// Every pixel needs at least one sample.
    #[error("invalid configuration: samples per pixel must be at least 1")]
    ZeroSampleCount,
}

/// Camera for rendering scenes
///
/// Builds the viewport geometry from its public configuration, then walks the
/// image pixel by pixel, averaging jittered sample rays into linear RGB.
#[derive(Debug, Clone)]
pub struct Camera {
    /// Ratio of image width over height
    pub aspect_ratio: f32,
    /// Rendered image width in pixel count
    pub image_width: u32,
    /// Count of random samples for each pixel
    pub samples_per_pixel: u32,
    /// Maximum number of ray bounces into scene
    pub max_depth: u32,
    /// Vertical view angle (field of view) in degrees
    pub vfov: f32,
    /// Point camera is looking from
    pub lookfrom: Vec3A,
    /// Point camera is looking at
    pub lookat: Vec3A,
    /// Camera-relative "up" direction
    pub vup: Vec3A,

    image_height: u32,
    pixel_samples_scale: f32,
    center: Vec3A,
    pixel00_loc: Vec3A,
    pixel_delta_u: Vec3A,
    pixel_delta_v: Vec3A,
    u: Vec3A,
    v: Vec3A,
    w: Vec3A,
    initialized: bool,
}

impl Camera {
    /// Create a camera with default settings: a 400 pixel wide 16:9 frame
    /// looking down the negative z axis with a 90 degree field of view.
    pub fn new() -> Self {
        Camera {
            aspect_ratio: 16.0 / 9.0,
            image_width: 400,
            samples_per_pixel: 100,
            max_depth: 50,
            vfov: 90.0,
            lookfrom: Vec3A::ZERO,
            lookat: Vec3A::NEG_Z,
            vup: Vec3A::Y,
            image_height: 0,
            pixel_samples_scale: 0.0,
            center: Vec3A::ZERO,
            pixel00_loc: Vec3A::ZERO,
            pixel_delta_u: Vec3A::ZERO,
            pixel_delta_v: Vec3A::ZERO,
            u: Vec3A::ZERO,
            v: Vec3A::ZERO,
            w: Vec3A::ZERO,
            initialized: false,
        }
    }

    /// Derive the viewport geometry from the public configuration.
    ///
    /// Runs once; repeated calls return immediately, so configuration edits
    /// after the first call have no effect. Fails when the configuration
    /// cannot produce an image.
    pub fn initialize(&mut self) -> Result<(), CameraError> {
        if self.initialized {
            return Ok(());
        }
        if self.image_width == 0 {
            return Err(CameraError::ZeroImageWidth);
        }
        if self.samples_per_pixel == 0 {
            return Err(CameraError::ZeroSampleCount);
        }

        let height = (self.image_width as f32 / self.aspect_ratio) as u32;
        self.image_height = height.max(1);

        self.pixel_samples_scale = 1.0 / self.samples_per_pixel as f32;
        self.center = self.lookfrom;

        // The viewport spans the vertical field of view at the look-at distance
        let focal_length = (self.lookfrom - self.lookat).length();
        let theta = self.vfov.to_radians();
        let h = (theta / 2.0).tan();
        let viewport_height = 2.0 * h * focal_length;
        let viewport_width =
            viewport_height * (self.image_width as f32 / self.image_height as f32);

        // Orthonormal camera frame: w points opposite the view direction
        self.w = (self.lookfrom - self.lookat).normalize();
        self.u = self.vup.cross(self.w).normalize();
        self.v = self.w.cross(self.u);

        // Viewport edge vectors, v runs down the image
        let viewport_u = viewport_width * self.u;
        let viewport_v = viewport_height * -self.v;

        self.pixel_delta_u = viewport_u / self.image_width as f32;
        self.pixel_delta_v = viewport_v / self.image_height as f32;

        let viewport_upper_left =
            self.center - (focal_length * self.w) - viewport_u / 2.0 - viewport_v / 2.0;
        self.pixel00_loc = viewport_upper_left + 0.5 * (self.pixel_delta_u + self.pixel_delta_v);

        self.initialized = true;
        Ok(())
    }

    /// Render the scene into a linear RGB image buffer.
    ///
    /// Initializes the camera if needed, then averages `samples_per_pixel`
    /// jittered paths per pixel, row by row from the top. The returned buffer
    /// holds linear values; gamma correction happens at output time.
    pub fn render(
        &mut self,
        world: &Hittable,
        rng: &mut dyn RngCore,
    ) -> Result<ImageBuffer<Rgb<f32>, Vec<f32>>, CameraError> {
        self.initialize()?;

        let mut image = ImageBuffer::new(self.image_width, self.image_height);

        info!(
            "Rendering {}x{} image at {} samples per pixel...",
            self.image_width, self.image_height, self.samples_per_pixel
        );
        let generation_start = std::time::Instant::now();

        let pb = ProgressBar::new(u64::from(self.image_width) * u64::from(self.image_height));
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{bar:40} {pos}/{len} ETA: {eta}")
                .unwrap(),
        );

        for j in 0..self.image_height {
            for i in 0..self.image_width {
                let mut pixel_color = Color::ZERO;
                for _ in 0..self.samples_per_pixel {
                    let r = self.get_ray(i, j, rng);
                    pixel_color += Self::ray_color(&r, world, self.max_depth, rng);
                }
                pixel_color *= self.pixel_samples_scale;
                image.put_pixel(i, j, Rgb([pixel_color.x, pixel_color.y, pixel_color.z]));
                pb.inc(1);
            }
        }

        pb.finish();
        info!("Image generated in {:?}", generation_start.elapsed());

        Ok(image)
    }

    /// Construct a camera ray from the center toward a randomly sampled
    /// point around pixel location `(i, j)`.
    fn get_ray(&self, i: u32, j: u32, rng: &mut dyn RngCore) -> Ray {
        let offset = sample_square(rng);
        let pixel_sample = self.pixel00_loc
            + ((i as f32 + offset.x) * self.pixel_delta_u)
            + ((j as f32 + offset.y) * self.pixel_delta_v);

        Ray::new(self.center, pixel_sample - self.center)
    }

    /// Radiance arriving along `r`, following scattered bounces through the
    /// scene until the ray escapes, is absorbed or spends its bounce budget.
    fn ray_color(r: &Ray, world: &Hittable, depth: u32, rng: &mut dyn RngCore) -> Color {
        // An exhausted bounce budget gathers no more light
        if depth == 0 {
            return Color::ZERO;
        }

        // The 0.001 lower bound skips self-intersections with the surface
        // the ray just left
        if let Some(rec) = world.hit(r, Interval::new(0.001, f32::INFINITY)) {
            return match rec.material.scatter(r, &rec, rng) {
                Some((attenuation, scattered)) => {
                    attenuation * Self::ray_color(&scattered, world, depth - 1, rng)
                }
                None => Color::ZERO,
            };
        }

        // Miss: blend the sky gradient from the ray direction's height
        let unit_direction = r.direction.normalize();
        let a = 0.5 * (unit_direction.y + 1.0);
        (1.0 - a) * Color::new(1.0, 1.0, 1.0) + a * Color::new(0.5, 0.7, 1.0)
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new()
    }
}

/// Vector to a random point in the unit square centered on the origin.
fn sample_square(rng: &mut dyn RngCore) -> Vec3A {
    Vec3A::new(
        random::random_f32(rng) - 0.5,
        random::random_f32(rng) - 0.5,
        0.0,
    )
}
