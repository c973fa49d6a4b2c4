//! Runtime implementations.
//!
//! Two backends:
//! - **System**: the installed OpenCL library, loaded at startup.
//! - **Software**: synthetic platforms and devices with the same wire
//!   encoding, so every probe path runs on machines with no OpenCL stack.

pub mod software;
pub mod system;

pub use software::{SoftwareDevice, SoftwarePlatform, SoftwareRuntime};
pub use system::SystemRuntime;
