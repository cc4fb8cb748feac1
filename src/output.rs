//! # Output Module
//!
//! This module writes rendered images to their final destinations:
//! - Plain-text PPM (P3) streams, the primary output format
//! - PNG file export through the `image` crate
//!
//! ## Display transform
//!
//! Rendered buffers hold linear radiance. Every output path applies the same
//! per-channel transform: square-root gamma correction, a clamp into
//! [0.0, 0.999], then scaling by 256 and truncating to a byte. The 0.999
//! ceiling keeps the byte below 256 even for fully saturated channels.

use std::fs::File;
use std::io::{self, BufWriter, Write};

use image::{ImageBuffer, Rgb};
use log::{info, warn};

use crate::interval::Interval;

/// Gamma encode a linear color component with the gamma-2 curve.
fn linear_to_gamma(linear: f32) -> f32 {
    if linear > 0.0 {
        linear.sqrt()
    } else {
        0.0
    }
}

/// Quantize a linear color component to a display byte.
fn color_component_to_byte(linear: f32) -> u8 {
    const INTENSITY: Interval = Interval {
        min: 0.0,
        max: 0.999,
    };
    (256.0 * INTENSITY.clamp(linear_to_gamma(linear))) as u8
}

/// Write an f32 RGB image as a plain-text P3 (PPM) stream
///
/// The stream opens with the header `P3\n<width> <height>\n255\n`, followed by
/// one `R G B` line per pixel in row-major order, top-to-bottom and
/// left-to-right within each row. Each channel goes through the shared
/// display transform before printing.
///
/// # Arguments
///
/// * `image` - f32 RGB image buffer holding linear radiance values
/// * `out` - Destination writer, typically a locked stdout or a buffered file
///
/// # Examples
///
/// ```ignore
/// use image::{ImageBuffer, Rgb};
///
/// let image: ImageBuffer<Rgb<f32>, Vec<f32>> = ImageBuffer::new(400, 225);
/// let mut buf = Vec::new();
/// write_ppm(&image, &mut buf)?;
/// ```
///
/// # Errors
///
/// Propagates any I/O error raised by the destination writer.
pub fn write_ppm<W: Write>(
    image: &ImageBuffer<Rgb<f32>, Vec<f32>>,
    out: &mut W,
) -> io::Result<()> {
    writeln!(out, "P3\n{} {}\n255", image.width(), image.height())?;
    for pixel in image.pixels() {
        writeln!(
            out,
            "{} {} {}",
            color_component_to_byte(pixel[0]),
            color_component_to_byte(pixel[1]),
            color_component_to_byte(pixel[2])
        )?;
    }
    Ok(())
}

/// Save an f32 RGB image as a P3 (PPM) file
///
/// Creates the file, wraps it in a buffered writer and streams the image
/// through [`write_ppm`].
///
/// # Arguments
///
/// * `image` - f32 RGB image buffer holding linear radiance values
/// * `output_path` - File path for the output (should include .ppm extension)
///
/// # Errors
///
/// Logs warnings for I/O errors but does not panic. Common error causes:
/// - Invalid file path or insufficient permissions
/// - Disk space issues
pub fn save_image_as_ppm(image: &ImageBuffer<Rgb<f32>, Vec<f32>>, output_path: &str) {
    let file = match File::create(output_path) {
        Ok(file) => file,
        Err(e) => {
            warn!("Failed to create {}: {}", output_path, e);
            return;
        }
    };

    let mut out = BufWriter::new(file);
    match write_ppm(image, &mut out).and_then(|_| out.flush()) {
        Ok(_) => info!("Image saved as {}", output_path),
        Err(e) => warn!("Failed to save image: {}", e),
    }
}

/// Save an f32 RGB image as PNG
///
/// Converts the linear f32 buffer to 8-bit color with the same display
/// transform as the PPM path, so both formats render identically, then
/// delegates encoding and file I/O to the `image` crate.
///
/// # Arguments
///
/// * `image` - f32 RGB image buffer holding linear radiance values
/// * `output_path` - File path for the output (should include .png extension)
///
/// # Errors
///
/// Logs warnings for I/O errors but does not panic. Common error causes:
/// - Invalid file path or insufficient permissions
/// - Disk space issues
pub fn save_image_as_png(image: &ImageBuffer<Rgb<f32>, Vec<f32>>, output_path: &str) {
    let u8_image: ImageBuffer<Rgb<u8>, Vec<u8>> =
        ImageBuffer::from_fn(image.width(), image.height(), |x, y| {
            let pixel = image.get_pixel(x, y);
            Rgb([
                color_component_to_byte(pixel[0]),
                color_component_to_byte(pixel[1]),
                color_component_to_byte(pixel[2]),
            ])
        });

    match u8_image.save(output_path) {
        Ok(_) => info!("Image saved as {}", output_path),
        Err(e) => warn!("Failed to save image: {}", e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::Camera;
    use crate::hittable::{Hittable, HittableList};
    use crate::material::Material;
    use crate::sphere::Sphere;
    use glam::Vec3A;
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;
    use std::sync::Arc;

    #[test]
    fn the_display_transform_is_gamma_then_clamp_then_truncate() {
        let mut image: ImageBuffer<Rgb<f32>, Vec<f32>> = ImageBuffer::new(2, 1);
        image.put_pixel(0, 0, Rgb([0.0, 0.25, 1.0]));
        image.put_pixel(1, 0, Rgb([2.0, -1.0, 0.5]));

        let mut buf = Vec::new();
        write_ppm(&image, &mut buf).unwrap();

        let text = String::from_utf8(buf).unwrap();
        assert_eq!(text, "P3\n2 1\n255\n0 128 255\n255 0 181\n");
    }

    fn wide_angle_stream(samples_per_pixel: u32, max_depth: u32) -> String {
        let r = std::f32::consts::FRAC_PI_4.cos();
        let mut world = HittableList::new();
        world.add(Sphere::new(
            Vec3A::new(-r, 0.0, -1.0),
            r,
            Arc::new(Material::lambertian(Vec3A::new(0.0, 0.0, 1.0))),
        ));
        world.add(Sphere::new(
            Vec3A::new(r, 0.0, -1.0),
            r,
            Arc::new(Material::lambertian(Vec3A::new(1.0, 0.0, 0.0))),
        ));
        let world = Hittable::List(world);

        let mut camera = Camera::new();
        camera.aspect_ratio = 16.0 / 9.0;
        camera.image_width = 400;
        camera.samples_per_pixel = samples_per_pixel;
        camera.max_depth = max_depth;
        camera.vfov = 90.0;

        let mut rng = ChaCha20Rng::seed_from_u64(11);
        let image = camera.render(&world, &mut rng).unwrap();

        let mut buf = Vec::new();
        write_ppm(&image, &mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn the_wide_angle_scene_renders_the_contracted_stream() {
        let text = wide_angle_stream(2, 5);
        assert!(text.starts_with("P3\n400 225\n255\n"));
        assert_eq!(text.lines().count(), 3 + 400 * 225);

        for line in text.lines().skip(3) {
            let channels = line
                .split_whitespace()
                .map(|token| token.parse::<u8>().unwrap())
                .count();
            assert_eq!(channels, 3);
        }

        // The top-center pixel sees pure sky, whose blue component is 1.0
        let top_center = text.lines().skip(3).nth(200).unwrap();
        let blue: u8 = top_center
            .split_whitespace()
            .nth(2)
            .unwrap()
            .parse()
            .unwrap();
        assert_eq!(blue, 255);
    }

    #[test]
    #[ignore = "full-quality render, slow in debug builds"]
    fn the_wide_angle_scene_at_full_quality_keeps_the_contract() {
        let text = wide_angle_stream(100, 20);
        assert!(text.starts_with("P3\n400 225\n255\n"));
        assert_eq!(text.lines().count(), 3 + 400 * 225);
    }

    #[test]
    fn ppm_files_round_through_the_filesystem() {
        let mut image: ImageBuffer<Rgb<f32>, Vec<f32>> = ImageBuffer::new(1, 1);
        image.put_pixel(0, 0, Rgb([0.25, 0.25, 0.25]));

        let path = std::env::temp_dir().join("lumipath_output_test.ppm");
        let path = path.to_string_lossy().into_owned();
        save_image_as_ppm(&image, &path);

        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text, "P3\n1 1\n255\n128 128 128\n");
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn png_files_carry_the_same_display_bytes() {
        let mut image: ImageBuffer<Rgb<f32>, Vec<f32>> = ImageBuffer::new(1, 1);
        image.put_pixel(0, 0, Rgb([0.25, 1.0, 0.0]));

        let path = std::env::temp_dir().join("lumipath_output_test.png");
        let path = path.to_string_lossy().into_owned();
        save_image_as_png(&image, &path);

        let decoded = image::open(&path).unwrap().to_rgb8();
        assert_eq!(decoded.get_pixel(0, 0).0, [128, 255, 0]);
        let _ = std::fs::remove_file(&path);
    }
}
