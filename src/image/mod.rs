//! Owned pixel buffers used throughout the pipeline.
//!
//! - [`RgbImageF32`]: three-channel image with values in `[0, 1]`.
//! - [`Mask`]: binary `u8` mask with values in `{0, 1}`.
//! - [`ImageF32`]: single-channel float buffer, used for feathered alpha.
//!
//! All buffers are row-major with `stride == width` and expose rows through
//! [`ImageView`] / [`ImageViewMut`].
pub mod f32;
pub mod io;
pub mod mask;
pub mod rgb;
pub mod traits;

pub use self::f32::ImageF32;
pub use self::mask::Mask;
pub use self::rgb::RgbImageF32;
pub use self::traits::{ImageView, ImageViewMut, Rows};
