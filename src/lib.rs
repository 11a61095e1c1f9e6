//! Grid ray caster: a top-down tile map rendered as a first-person 3-D view,
//! one screen column per ray.

pub mod config;
pub mod engine;
pub mod map;
pub mod renderer;
pub mod sim;
pub mod world;
