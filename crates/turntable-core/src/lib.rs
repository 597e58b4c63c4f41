//! Platform-free core of the turntable player: frequency analysis,
//! smoothing, the playback/transition state machines and the visual
//! parameter mappers. The web crate wires these to the DOM and WebAudio.

pub mod analysis;
pub mod catalog;
pub mod config;
pub mod constants;
pub mod controller;
pub mod easing;
pub mod error;
pub mod format;
pub mod media;
pub mod playback;
pub mod smoothing;
pub mod transition;
pub mod visuals;
pub mod waveform;

pub use analysis::*;
pub use catalog::*;
pub use config::*;
pub use controller::*;
pub use error::*;
pub use format::*;
pub use media::*;
pub use playback::*;
pub use smoothing::*;
pub use transition::*;
pub use visuals::*;
