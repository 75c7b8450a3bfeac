//! Typewriter banner animation primitives.
//!
//! [`Typewriter`] is the pure state machine: each tick renders one display
//! frame and picks the pause before the next. [`driver::spawn`] paces it on
//! a tokio runtime and delivers frames over a channel.

pub mod driver;
pub mod typewriter;

pub use driver::TypewriterHandle;
pub use typewriter::Frame;
pub use typewriter::Typewriter;
pub use typewriter::TypewriterConfig;
