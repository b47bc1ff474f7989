//! Simulation core for a fixed-screen cannon-versus-formation shooter.
//!
//! The crate is split the same way every frame flows through it:
//! [`entities`] holds the plain data, [`compute::step`] advances it, and the
//! helpers in [`formation`], [`projectiles`] and [`collision`] each own one
//! slice of the per-frame rules. Nothing here performs I/O; the terminal
//! host lives in the binary.

pub mod collision;
pub mod compute;
pub mod config;
pub mod entities;
pub mod formation;
pub mod geometry;
pub mod projectiles;
