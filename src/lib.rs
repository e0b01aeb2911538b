//! Relic Escape: a small tile platformer.
//!
//! The game is a set of pure functions over [`entities::World`]:
//! [`compute::start`] builds a world, [`compute::tick`] advances it one frame,
//! and [`render::compose`] turns it into a draw list.  [`display`] paints that
//! list to a terminal.

pub mod combat;
pub mod compute;
pub mod display;
pub mod entities;
pub mod map;
pub mod narrative;
pub mod physics;
pub mod render;
