use anyhow::Result;
use clap::Parser;
use glam::Vec3A;
use log::info;
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha20Rng;
use std::io::{self, Write};
use std::sync::Arc;

mod cli;

use cli::{Args, ScenePreset};
use lumipath::camera::Camera;
use lumipath::hittable::{Hittable, HittableList};
use lumipath::material::Material;
use lumipath::output::{save_image_as_png, save_image_as_ppm, write_ppm};
use lumipath::random;
use lumipath::sphere::Sphere;

/// Two touching lambertian spheres that fill a 90 degree field of view
fn wide_angle_scene() -> (HittableList, Camera) {
    let mut world = HittableList::new();

    let r = std::f32::consts::FRAC_PI_4.cos();
    let material_left = Arc::new(Material::lambertian(Vec3A::new(0.0, 0.0, 1.0)));
    let material_right = Arc::new(Material::lambertian(Vec3A::new(1.0, 0.0, 0.0)));

    world.add(Sphere::new(Vec3A::new(-r, 0.0, -1.0), r, material_left));
    world.add(Sphere::new(Vec3A::new(r, 0.0, -1.0), r, material_right));

    let mut camera = Camera::new();
    camera.vfov = 90.0;
    camera.lookfrom = Vec3A::new(0.0, 0.0, 0.0);
    camera.lookat = Vec3A::new(0.0, 0.0, -1.0);
    camera.vup = Vec3A::new(0.0, 1.0, 0.0);
    (world, camera)
}

/// Three feature spheres over a ground sphere: matte center, glass sphere
/// with an air bubble on the left, fuzzed metal on the right
fn glass_scene() -> (HittableList, Camera) {
    let mut world = HittableList::new();

    let material_ground = Arc::new(Material::lambertian(Vec3A::new(0.8, 0.8, 0.0)));
    let material_center = Arc::new(Material::lambertian(Vec3A::new(0.1, 0.2, 0.5)));
    let material_left = Arc::new(Material::dielectric(1.5));
    let material_bubble = Arc::new(Material::dielectric(1.0 / 1.5));
    let material_right = Arc::new(Material::metal(Vec3A::new(0.8, 0.6, 0.2), 0.3));

    world.add(Sphere::new(
        Vec3A::new(0.0, -100.5, -1.0),
        100.0,
        material_ground,
    ));
    world.add(Sphere::new(Vec3A::new(0.0, 0.0, -1.2), 0.5, material_center));
    world.add(Sphere::new(Vec3A::new(-1.0, 0.0, -1.0), 0.5, material_left));
    world.add(Sphere::new(Vec3A::new(-1.0, 0.0, -1.0), 0.4, material_bubble));
    world.add(Sphere::new(Vec3A::new(1.0, 0.0, -1.0), 0.5, material_right));

    let mut camera = Camera::new();
    camera.vfov = 90.0;
    camera.lookfrom = Vec3A::new(0.0, 0.0, 0.0);
    camera.lookat = Vec3A::new(0.0, 0.0, -1.0);
    camera.vup = Vec3A::new(0.0, 1.0, 0.0);
    (world, camera)
}

/// The cover scene: a field of small random spheres around three large ones
fn cover_scene(rng: &mut dyn RngCore) -> (HittableList, Camera) {
    let mut world = HittableList::new();

    // Ground sphere
    let ground_material = Arc::new(Material::lambertian(Vec3A::new(0.5, 0.5, 0.5)));
    world.add(Sphere::new(
        Vec3A::new(0.0, -1000.0, 0.0),
        1000.0,
        ground_material,
    ));

    // 22x22 grid of small spheres
    for a in -11..11 {
        for b in -11..11 {
            let choose_mat = random::random_f32(rng);
            let center = Vec3A::new(
                a as f32 + 0.9 * random::random_f32(rng),
                0.2,
                b as f32 + 0.9 * random::random_f32(rng),
            );

            // Keep clear of the large metal sphere
            if (center - Vec3A::new(4.0, 0.2, 0.0)).length() > 0.9 {
                let sphere_material = if choose_mat < 0.8 {
                    // Diffuse material
                    let albedo = random::random_color(rng) * random::random_color(rng);
                    Arc::new(Material::lambertian(albedo))
                } else if choose_mat < 0.95 {
                    // Metal material
                    let albedo = random::random_color_range(rng, 0.5, 1.0);
                    let fuzz = random::random_f32_range(rng, 0.0, 0.5);
                    Arc::new(Material::metal(albedo, fuzz))
                } else {
                    // Glass material
                    Arc::new(Material::dielectric(1.5))
                };

                world.add(Sphere::new(center, 0.2, sphere_material));
            }
        }
    }

    // Three large feature spheres
    let material1 = Arc::new(Material::dielectric(1.5));
    world.add(Sphere::new(Vec3A::new(0.0, 1.0, 0.0), 1.0, material1));

    let material2 = Arc::new(Material::lambertian(Vec3A::new(0.4, 0.2, 0.1)));
    world.add(Sphere::new(Vec3A::new(-4.0, 1.0, 0.0), 1.0, material2));

    let material3 = Arc::new(Material::metal(Vec3A::new(0.7, 0.6, 0.5), 0.0));
    world.add(Sphere::new(Vec3A::new(4.0, 1.0, 0.0), 1.0, material3));

    let mut camera = Camera::new();
    camera.vfov = 20.0;
    camera.lookfrom = Vec3A::new(13.0, 2.0, 3.0);
    camera.lookat = Vec3A::new(0.0, 0.0, 0.0);
    camera.vup = Vec3A::new(0.0, 1.0, 0.0);
    (world, camera)
}

/// Build the selected scene and the camera pose that frames it
fn create_scene(preset: ScenePreset, rng: &mut dyn RngCore) -> (HittableList, Camera) {
    match preset {
        ScenePreset::WideAngle => wide_angle_scene(),
        ScenePreset::Glass => glass_scene(),
        ScenePreset::Cover => cover_scene(rng),
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    env_logger::Builder::from_default_env()
        .filter_level(args.debug_level.clone().into())
        .init();

    // Log application startup with version information
    info!(
        "Lumipath - Git Version {} ({})",
        env!("GIT_HASH"),
        env!("GIT_DATE")
    );

    // Seeded runs repeat exactly; unseeded runs draw entropy from the OS
    let mut rng = match args.seed {
        Some(seed) => ChaCha20Rng::seed_from_u64(seed),
        None => ChaCha20Rng::from_rng(&mut rand::rng()),
    };

    info!(
        "Scene: {:?}, samples per pixel: {}, max depth: {}",
        args.scene, args.samples_per_pixel, args.max_depth
    );

    let (world, mut camera) = create_scene(args.scene, &mut rng);
    camera.aspect_ratio = args.aspect_ratio;
    camera.image_width = args.width;
    camera.samples_per_pixel = args.samples_per_pixel;
    camera.max_depth = args.max_depth;
    if let Some(vfov) = args.vfov {
        camera.vfov = vfov;
    }

    let world = Hittable::List(world);
    let image = camera.render(&world, &mut rng)?;

    // Write the image based on the output destination
    if args.output == "-" {
        let stdout = io::stdout();
        let mut out = io::BufWriter::new(stdout.lock());
        write_ppm(&image, &mut out)?;
        out.flush()?;
    } else if args.output.ends_with(".ppm") {
        save_image_as_ppm(&image, &args.output);
    } else if args.output.ends_with(".png") {
        save_image_as_png(&image, &args.output);
    } else {
        log::error!(
            "Unsupported file extension '{}'. Only .ppm and .png formats are supported.",
            std::path::Path::new(&args.output)
                .extension()
                .unwrap_or_default()
                .to_string_lossy()
        );
        std::process::exit(1);
    }

    Ok(())
}
