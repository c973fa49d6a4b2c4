//! Safe OpenCL enumeration layer for `clprobe`.
//!
//! The probe is a single blocking pass: platform count → platform
//! attributes → devices per platform → device attributes, with the report
//! written to any `io::Write`. The [`ClRuntime`] trait is the seam between
//! that logic and the OpenCL library; [`SystemRuntime`] loads the vendor
//! library at startup, [`SoftwareRuntime`] serves synthetic fixtures so the
//! full pass runs without any OpenCL stack installed.
//!
//! # Quick start
//!
//! ```
//! use clprobe_driver::{probe, SoftwareDevice, SoftwarePlatform, SoftwareRuntime};
//!
//! # fn main() -> clprobe_driver::Result<()> {
//! let rt = SoftwareRuntime::new().with_platform(
//!     SoftwarePlatform::new("Example Platform", "Example Vendor")
//!         .with_device(SoftwareDevice::gpu("Example GPU", "Example Vendor")),
//! );
//!
//! let mut report = Vec::new();
//! let summary = probe(&rt, &mut report)?;
//! assert!(summary.is_clean());
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::cast_possible_truncation)]

mod attributes;
pub mod backends;
mod error;
mod probe;
mod runtime;

pub use attributes::{AttrKind, AttrValue, DeviceAttr, PlatformAttr, DEVICE_ATTRS, PLATFORM_ATTRS};
pub use backends::{SoftwareDevice, SoftwarePlatform, SoftwareRuntime, SystemRuntime};
pub use error::{ClStatus, ProbeError, Result};
pub use probe::{probe, ProbeSummary};
pub use runtime::{
    fetch_device_info, fetch_platform_info, ClResult, ClRuntime, DeviceHandle, PlatformHandle,
};
