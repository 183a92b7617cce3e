//! Drives 3D scene objects from 2D hand landmark predictions.
//!
//! A hand detector yields, for every video frame, a set of named landmark groups in pixel
//! coordinates. This crate re-projects a few of those landmarks into a centered 3D scene and infers
//! an orientation for each tracked part of the hand from pairs of points, since the detector itself
//! only reports positions.
//!
//! The per-frame data flow is strictly one-way:
//!
//! ```text
//! Prediction -> normalized points -> per-part orientation -> Scene
//! ```
//!
//! # Coordinates
//!
//! Landmarks arrive in image space: X points to the right, Y points *down*, and the origin is the
//! top left corner of the captured frame. Scene space uses X to the right and Y *up*. The depth
//! component reported by the detector is not used; normalized points always lie in the `z = 0`
//! plane.
//!
//! # Environment Variables
//!
//! [`Config::from_env`] reads the following variables:
//!
//! * `HANDPOSE_RESOLUTION`: capture resolution the landmarks refer to, as `WIDTHxHEIGHT`.
//! * `HANDPOSE_OFFSET`: scale factor from the `[-1, 1]` frame range to scene units.
//! * `HANDPOSE_BIAS`: scene-space `x,y` point that the frame center is mapped to.
//!
//! [`Config::from_env`]: config::Config::from_env

use log::LevelFilter;

pub mod config;
pub mod frame;
pub mod landmark;
pub mod model;
pub mod normalize;
pub mod orientation;
pub mod pose;
pub mod resolution;
pub mod rig;
pub mod runner;
pub mod scene;
pub mod timer;
pub mod video;

#[cfg(test)]
mod test;

/// macro-use only, not part of public API.
#[doc(hidden)]
pub fn init_logger(calling_crate: &'static str) {
    let log_level = if cfg!(debug_assertions) {
        LevelFilter::Trace
    } else {
        LevelFilter::Debug
    };
    env_logger::Builder::new()
        .filter(Some(calling_crate), log_level)
        .filter(Some(env!("CARGO_CRATE_NAME")), log_level)
        .filter(Some("pawawwewism"), LevelFilter::Info)
        .parse_default_env()
        .try_init()
        .ok();
}

/// Initializes logging to *stderr*.
///
/// If `cfg!(debug_assertions)` is enabled, the calling crate and `handpose3d` will log at *trace*
/// level. Otherwise, they will log at *debug* level.
///
/// `RUST_LOG` takes precedence over these defaults.
///
/// If a global logger is already registered, this macro will do nothing.
#[macro_export]
macro_rules! init_logger {
    () => {
        $crate::init_logger(env!("CARGO_CRATE_NAME"))
    };
}
