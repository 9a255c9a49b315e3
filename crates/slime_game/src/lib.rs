//! Dungeon Slime: atlas-driven 2D sprites, tile maps and a bounded-arena
//! motion engine, independent of any windowing or GPU backend.

pub mod animation;
pub mod arena;
pub mod atlas;
pub mod config;
pub mod content;
pub mod context;
pub mod controller;
pub mod error;
pub mod region;
pub mod render;
pub mod replay;
pub mod scene;
pub mod sprite;
pub mod tilemap;

pub use error::LoadError;
