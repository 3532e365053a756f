//! Platform abstraction layer
//!
//! Browser-facing pieces that are still testable natively:
//! - Input latching (key/touch press and release -> held directions)
//! - Frame scheduling (one animation frame in flight, cancellable)

pub mod frame;
pub mod input;

pub use frame::{FrameHost, FrameLoop};
pub use input::{Command, Direction, DirectionKeys};
