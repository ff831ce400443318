pub mod bandwidth;
pub mod platform;

pub use bandwidth::{Accumulator, DeltaEngine};
pub use platform::{RawSampler, create_platform_sampler};
