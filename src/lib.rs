//! Lumipath path tracer
//!
//! A CPU Monte-Carlo path tracer over spherical primitives with lambertian,
//! metal and dielectric materials. Renders into a linear f32 buffer and
//! writes plain-text PPM streams or PNG files.

#![warn(missing_docs)]
#![warn(rustdoc::broken_intra_doc_links)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod ray;
pub mod sphere;
pub mod hittable;
pub mod interval;
pub mod camera;
pub mod random;
pub mod material;
pub mod output;
