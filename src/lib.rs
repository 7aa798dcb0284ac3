//! This crate contains the game logic for raycastuine, a first-person raycaster drawn in the
//! terminal.
//!
//! The world is a grid of wall and floor cells, either the built-in arena, a map file, or a maze
//! carved by [`labyrinth`]. Every frame casts one ray per terminal column from the viewer's
//! [`pose`], turns the hit distances into shaded wall and floor slices, and draws them with
//! Ratatui.

#![expect(
    clippy::cargo_common_metadata,
    reason = "Temporary allow during development."
)]

mod app;
mod clock;
pub mod composer;
pub mod config;
mod events;
pub mod file_loader;
pub mod input;
pub mod labyrinth;
pub mod logging;
pub mod movement;
pub mod pose;
pub mod raycast;
pub mod session;
pub mod shading;
mod types;
mod ui;
pub mod world;

pub use app::App;
