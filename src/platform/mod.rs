//! Platform abstraction layer
//!
//! Browser driver: translates DOM keyboard/touch events into the input
//! buffer, paces ticks from `requestAnimationFrame`, and hands the scene
//! snapshot to the JavaScript renderer as JSON.

#[cfg(target_arch = "wasm32")]
pub mod web;
