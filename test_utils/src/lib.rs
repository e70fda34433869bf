//! Utility helpers for tests.
//!
//! Builds headless apps standing on a flat floor, drives frames by hand and
//! records the notifications the furniture plugin raises.

pub mod app;
pub mod rspec_runner;
pub mod surfaces;
pub mod thread_safe_app;

pub use app::{
    advance_frames, capture, flat_floor_app, placed_furniture, request, screen_point, tap_world,
    test_catalog, Captured, FRAME,
};
pub use rspec_runner::run_serial;
pub use surfaces::ScriptedFloor;
pub use thread_safe_app::{lock_app, share, SharedApp, ThreadSafeApp};
