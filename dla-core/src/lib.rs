//! Core diffusion-limited aggregation simulation for a kaleidoscopic
//! 12-fold symmetric growth pattern.
//!
//! Main components:
//! - [`engine`] — spawn, random walk, freeze and termination of walkers.
//! - [`render`] — 12-fold symmetric drawing through a [`render::DrawSurface`].
//! - [`cluster`] — frozen particles in deposition order.
//! - [`config`] — fixed geometry and colour constants for a run.
//! - [`geometry`] — polar helpers and the touch test.
//! - [`types`] — shared type aliases.

pub mod cluster;
pub mod config;
pub mod engine;
pub mod geometry;
pub mod render;
pub mod types;
