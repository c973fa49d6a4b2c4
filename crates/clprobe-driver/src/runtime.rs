//! The hardware-abstraction seam.
//!
//! `ClRuntime` mirrors the shape of the four OpenCL enumeration calls so
//! the probe logic is identical over the real library and the software
//! fixture. Attribute queries expose the two-call protocol directly: a call
//! with no buffer returns the required byte size, a call with a buffer of
//! exactly that size fills it.

use crate::error::ClStatus;
use clprobe_sys::{cl_device_id, cl_device_info, cl_platform_id, cl_platform_info};
use std::fmt;
use std::ptr;

/// Result of a raw runtime call.
pub type ClResult<T> = std::result::Result<T, ClStatus>;

/// Opaque platform handle.
///
/// Process-scoped; never released. The null handle only appears as the
/// fill value of id buffers before the fetch call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(transparent)]
pub struct PlatformHandle(cl_platform_id);

impl PlatformHandle {
    /// Wrap a raw platform id.
    #[must_use]
    pub const fn from_raw(raw: cl_platform_id) -> Self {
        Self(raw)
    }

    /// The raw platform id.
    #[must_use]
    pub const fn as_raw(self) -> cl_platform_id {
        self.0
    }

    /// Fill value for id buffers.
    #[must_use]
    pub const fn null() -> Self {
        Self(ptr::null_mut())
    }
}

/// Opaque device handle, child of exactly one platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(transparent)]
pub struct DeviceHandle(cl_device_id);

impl DeviceHandle {
    /// Wrap a raw device id.
    #[must_use]
    pub const fn from_raw(raw: cl_device_id) -> Self {
        Self(raw)
    }

    /// The raw device id.
    #[must_use]
    pub const fn as_raw(self) -> cl_device_id {
        self.0
    }

    /// Fill value for id buffers.
    #[must_use]
    pub const fn null() -> Self {
        Self(ptr::null_mut())
    }
}

/// Blocking enumeration interface over an OpenCL-shaped runtime.
///
/// `info` queries take `None` to ask for the required byte size and
/// `Some(buf)` to fetch the value; both return the value's byte length.
pub trait ClRuntime: fmt::Debug {
    /// Number of available platforms.
    fn platform_count(&self) -> ClResult<u32>;

    /// Fetch platform handles into `ids`, which the caller sizes to the
    /// reported count.
    fn platform_ids(&self, ids: &mut [PlatformHandle]) -> ClResult<()>;

    /// Size query (`buf` = `None`) or fetch (`buf` = `Some`) for one
    /// platform attribute.
    fn platform_info(
        &self,
        platform: PlatformHandle,
        param: cl_platform_info,
        buf: Option<&mut [u8]>,
    ) -> ClResult<usize>;

    /// Number of devices on `platform`, across all device categories.
    fn device_count(&self, platform: PlatformHandle) -> ClResult<u32>;

    /// Fetch device handles into `ids`, which the caller sizes to the
    /// reported count.
    fn device_ids(&self, platform: PlatformHandle, ids: &mut [DeviceHandle]) -> ClResult<()>;

    /// Size query (`buf` = `None`) or fetch (`buf` = `Some`) for one
    /// device attribute.
    fn device_info(
        &self,
        device: DeviceHandle,
        param: cl_device_info,
        buf: Option<&mut [u8]>,
    ) -> ClResult<usize>;
}

/// Two-call fetch of one platform attribute: size query, then a fetch with
/// a buffer of exactly the reported size. The buffer is scoped to this
/// call frame on every path.
pub fn fetch_platform_info(
    rt: &dyn ClRuntime,
    platform: PlatformHandle,
    param: cl_platform_info,
) -> ClResult<Vec<u8>> {
    let size = rt.platform_info(platform, param, None)?;
    let mut buf = vec![0u8; size];
    rt.platform_info(platform, param, Some(&mut buf))?;
    Ok(buf)
}

/// Two-call fetch of one device attribute.
pub fn fetch_device_info(
    rt: &dyn ClRuntime,
    device: DeviceHandle,
    param: cl_device_info,
) -> ClResult<Vec<u8>> {
    let size = rt.device_info(device, param, None)?;
    let mut buf = vec![0u8; size];
    rt.device_info(device, param, Some(&mut buf))?;
    Ok(buf)
}
