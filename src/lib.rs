//! Orrery - animated solar system scale model
//!
//! A library crate providing the body registry, scene composition and
//! animation components for the binary and for integration tests.

pub mod animation;
pub mod bodies;
pub mod camera;
pub mod input;
pub mod render;
pub mod types;
pub mod ui;

#[cfg(test)]
pub mod test_utils;
