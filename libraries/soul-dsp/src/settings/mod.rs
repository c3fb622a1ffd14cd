//! Effect variant payloads
//!
//! One module per effect type. Each payload carries its own bounded ranges,
//! default constructor and preset table:
//! - **eq**: parametric EQ bands (1-8 bands)
//! - **graphic_eq**: 10-band ISO graphic equalizer
//! - **compressor**: dynamic range compressor
//! - **limiter**: brick-wall limiter
//! - **crossfeed**: Bauer-style headphone crossfeed
//! - **stereo**: width, mid/side gain and balance
//! - **convolution**: impulse-response reverb

pub mod compressor;
pub mod convolution;
pub mod crossfeed;
pub mod eq;
pub mod graphic_eq;
pub mod limiter;
pub mod stereo;

pub use compressor::{compressor_presets, CompressorSettings};
pub use convolution::{BundledImpulseResponse, ConvolutionSettings, ImpulseSource};
pub use crossfeed::{crossfeed_presets, CrossfeedPreset, CrossfeedSettings};
pub use eq::{eq_presets, EqBand};
pub use graphic_eq::{graphic_eq_presets, GraphicEqPreset, GraphicEqSettings};
pub use limiter::{limiter_presets, LimiterSettings};
pub use stereo::{stereo_presets, StereoSettings};
