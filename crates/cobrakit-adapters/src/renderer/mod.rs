//! Template engine adapters.

mod tera;

pub use self::tera::TeraRenderer;
