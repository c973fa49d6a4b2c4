//! Software backend: synthetic platforms and devices.
//!
//! Implements `ClRuntime` over in-memory fixtures with the same wire
//! encoding the vendor library uses: NUL-terminated strings, native-endian
//! scalars, an 8-byte bit-field for the device type. This keeps every probe
//! path exercisable in CI and on development machines with no OpenCL stack.
//!
//! The backend is stricter than most vendor libraries in one deliberate
//! way: the fetch call of the two-call protocol must pass a buffer of
//! exactly the size the first call reported, otherwise it fails with
//! `CL_INVALID_VALUE`. Query failures can also be injected per selector to
//! drive the error paths.

use crate::error::ClStatus;
use crate::runtime::{ClResult, ClRuntime, DeviceHandle, PlatformHandle};
use clprobe_sys::params::{device, platform, CL_DEVICE_TYPE_GPU};
use clprobe_sys::status::{CL_INVALID_DEVICE, CL_INVALID_PLATFORM, CL_INVALID_VALUE};
use clprobe_sys::{
    cl_bool, cl_device_info, cl_device_type, cl_int, cl_platform_info, cl_uint, cl_ulong,
    CL_FALSE, CL_TRUE,
};
use std::ffi::c_void;

/// A synthetic platform and its devices.
#[derive(Debug, Clone)]
pub struct SoftwarePlatform {
    /// `CL_PLATFORM_PROFILE`
    pub profile: String,
    /// `CL_PLATFORM_NAME`
    pub name: String,
    /// `CL_PLATFORM_VERSION`
    pub version: String,
    /// `CL_PLATFORM_VENDOR`
    pub vendor: String,
    /// `CL_PLATFORM_EXTENSIONS`
    pub extensions: String,
    /// Devices exposed by this platform
    pub devices: Vec<SoftwareDevice>,
}

impl SoftwarePlatform {
    /// A full-profile platform with no devices and no extensions.
    pub fn new(name: impl Into<String>, vendor: impl Into<String>) -> Self {
        Self {
            profile: "FULL_PROFILE".into(),
            name: name.into(),
            version: "OpenCL 3.0".into(),
            vendor: vendor.into(),
            extensions: String::new(),
            devices: Vec::new(),
        }
    }

    /// Set the version string.
    #[must_use]
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    /// Set the extension list (space-separated).
    #[must_use]
    pub fn with_extensions(mut self, extensions: impl Into<String>) -> Self {
        self.extensions = extensions.into();
        self
    }

    /// Add a device.
    #[must_use]
    pub fn with_device(mut self, device: SoftwareDevice) -> Self {
        self.devices.push(device);
        self
    }
}

/// A synthetic device answering the fourteen probed attributes.
#[derive(Debug, Clone)]
pub struct SoftwareDevice {
    /// `CL_DEVICE_NAME`
    pub name: String,
    /// `CL_DEVICE_TYPE` bits
    pub device_type: cl_device_type,
    /// `CL_DEVICE_VENDOR`
    pub vendor: String,
    /// `CL_DEVICE_ADDRESS_BITS`
    pub address_bits: cl_uint,
    /// `CL_DEVICE_AVAILABLE`
    pub available: bool,
    /// `CL_DEVICE_GLOBAL_MEM_CACHE_SIZE` in bytes
    pub global_mem_cache_size: cl_ulong,
    /// `CL_DEVICE_GLOBAL_MEM_SIZE` in bytes
    pub global_mem_size: cl_ulong,
    /// `CL_DEVICE_LOCAL_MEM_SIZE` in bytes
    pub local_mem_size: cl_ulong,
    /// `CL_DEVICE_MAX_CLOCK_FREQUENCY` in MHz
    pub max_clock_frequency: cl_uint,
    /// `CL_DEVICE_MAX_COMPUTE_UNITS`
    pub max_compute_units: cl_uint,
    /// `CL_DEVICE_MAX_WORK_GROUP_SIZE` — `size_t` on the wire
    pub max_work_group_size: usize,
    /// `CL_DEVICE_MAX_WORK_ITEM_DIMENSIONS`
    pub max_work_item_dimensions: cl_uint,
    /// `CL_DEVICE_VERSION`
    pub device_version: String,
    /// `CL_DRIVER_VERSION`
    pub driver_version: String,
}

impl SoftwareDevice {
    /// A plausible discrete GPU.
    pub fn gpu(name: impl Into<String>, vendor: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            device_type: CL_DEVICE_TYPE_GPU,
            vendor: vendor.into(),
            address_bits: 64,
            available: true,
            global_mem_cache_size: 4 << 20,
            global_mem_size: 8 << 30,
            local_mem_size: 48 << 10,
            max_clock_frequency: 1800,
            max_compute_units: 36,
            max_work_group_size: 1024,
            max_work_item_dimensions: 3,
            device_version: "OpenCL 3.0".into(),
            driver_version: "1.0".into(),
        }
    }

    /// Override the classification bits.
    #[must_use]
    pub fn with_type(mut self, device_type: cl_device_type) -> Self {
        self.device_type = device_type;
        self
    }

    /// Override availability.
    #[must_use]
    pub fn with_available(mut self, available: bool) -> Self {
        self.available = available;
        self
    }
}

/// Synthetic runtime over fixture platforms, with per-selector failure
/// injection.
#[derive(Debug, Default)]
pub struct SoftwareRuntime {
    platforms: Vec<SoftwarePlatform>,
    fail_platform_count: Option<cl_int>,
    fail_device_count: Option<cl_int>,
    fail_platform_param: Option<(cl_platform_info, cl_int)>,
    fail_device_param: Option<(cl_device_info, cl_int)>,
}

impl SoftwareRuntime {
    /// An empty runtime: zero platforms, no injected failures.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a platform.
    #[must_use]
    pub fn with_platform(mut self, platform: SoftwarePlatform) -> Self {
        self.platforms.push(platform);
        self
    }

    /// Make the platform-count query fail with `status`.
    #[must_use]
    pub fn fail_platform_count(mut self, status: cl_int) -> Self {
        self.fail_platform_count = Some(status);
        self
    }

    /// Make every device-count query fail with `status`.
    #[must_use]
    pub fn fail_device_count(mut self, status: cl_int) -> Self {
        self.fail_device_count = Some(status);
        self
    }

    /// Make queries for one platform selector fail with `status`.
    #[must_use]
    pub fn fail_platform_param(mut self, param: cl_platform_info, status: cl_int) -> Self {
        self.fail_platform_param = Some((param, status));
        self
    }

    /// Make queries for one device selector fail with `status`.
    #[must_use]
    pub fn fail_device_param(mut self, param: cl_device_info, status: cl_int) -> Self {
        self.fail_device_param = Some((param, status));
        self
    }

    fn platform(&self, handle: PlatformHandle) -> ClResult<&SoftwarePlatform> {
        let raw = handle.as_raw() as usize;
        let index = (raw >> 8).checked_sub(1).ok_or(ClStatus(CL_INVALID_PLATFORM))?;
        if raw & 0xFF != 0 {
            return Err(ClStatus(CL_INVALID_PLATFORM));
        }
        self.platforms
            .get(index)
            .ok_or(ClStatus(CL_INVALID_PLATFORM))
    }

    fn device(&self, handle: DeviceHandle) -> ClResult<&SoftwareDevice> {
        let raw = handle.as_raw() as usize;
        let platform_index = (raw >> 8).checked_sub(1).ok_or(ClStatus(CL_INVALID_DEVICE))?;
        let device_index = (raw & 0xFF).checked_sub(1).ok_or(ClStatus(CL_INVALID_DEVICE))?;
        self.platforms
            .get(platform_index)
            .and_then(|p| p.devices.get(device_index))
            .ok_or(ClStatus(CL_INVALID_DEVICE))
    }

    fn platform_handle(index: usize) -> PlatformHandle {
        PlatformHandle::from_raw(((index + 1) << 8) as *mut c_void)
    }

    fn device_handle(platform_index: usize, device_index: usize) -> DeviceHandle {
        DeviceHandle::from_raw((((platform_index + 1) << 8) | (device_index + 1)) as *mut c_void)
    }
}

fn nul_terminated(s: &str) -> Vec<u8> {
    let mut bytes = s.as_bytes().to_vec();
    bytes.push(0);
    bytes
}

fn platform_info_bytes(p: &SoftwarePlatform, param: cl_platform_info) -> Option<Vec<u8>> {
    let text = match param {
        platform::CL_PLATFORM_PROFILE => &p.profile,
        platform::CL_PLATFORM_NAME => &p.name,
        platform::CL_PLATFORM_VERSION => &p.version,
        platform::CL_PLATFORM_VENDOR => &p.vendor,
        platform::CL_PLATFORM_EXTENSIONS => &p.extensions,
        _ => return None,
    };
    Some(nul_terminated(text))
}

fn device_info_bytes(d: &SoftwareDevice, param: cl_device_info) -> Option<Vec<u8>> {
    let bytes = match param {
        device::CL_DEVICE_NAME => nul_terminated(&d.name),
        device::CL_DEVICE_TYPE => d.device_type.to_ne_bytes().to_vec(),
        device::CL_DEVICE_VENDOR => nul_terminated(&d.vendor),
        device::CL_DEVICE_ADDRESS_BITS => d.address_bits.to_ne_bytes().to_vec(),
        device::CL_DEVICE_AVAILABLE => {
            let b: cl_bool = if d.available { CL_TRUE } else { CL_FALSE };
            b.to_ne_bytes().to_vec()
        }
        device::CL_DEVICE_GLOBAL_MEM_CACHE_SIZE => d.global_mem_cache_size.to_ne_bytes().to_vec(),
        device::CL_DEVICE_GLOBAL_MEM_SIZE => d.global_mem_size.to_ne_bytes().to_vec(),
        device::CL_DEVICE_LOCAL_MEM_SIZE => d.local_mem_size.to_ne_bytes().to_vec(),
        device::CL_DEVICE_MAX_CLOCK_FREQUENCY => d.max_clock_frequency.to_ne_bytes().to_vec(),
        device::CL_DEVICE_MAX_COMPUTE_UNITS => d.max_compute_units.to_ne_bytes().to_vec(),
        device::CL_DEVICE_MAX_WORK_GROUP_SIZE => d.max_work_group_size.to_ne_bytes().to_vec(),
        device::CL_DEVICE_MAX_WORK_ITEM_DIMENSIONS => {
            d.max_work_item_dimensions.to_ne_bytes().to_vec()
        }
        device::CL_DEVICE_VERSION => nul_terminated(&d.device_version),
        device::CL_DRIVER_VERSION => nul_terminated(&d.driver_version),
        _ => return None,
    };
    Some(bytes)
}

/// Strict fetch step: the buffer must be exactly the size reported by the
/// size query, matching the two-call contract.
fn serve(bytes: &[u8], buf: Option<&mut [u8]>) -> ClResult<usize> {
    match buf {
        None => Ok(bytes.len()),
        Some(dst) => {
            if dst.len() != bytes.len() {
                return Err(ClStatus(CL_INVALID_VALUE));
            }
            dst.copy_from_slice(bytes);
            Ok(bytes.len())
        }
    }
}

impl ClRuntime for SoftwareRuntime {
    fn platform_count(&self) -> ClResult<u32> {
        if let Some(status) = self.fail_platform_count {
            return Err(ClStatus(status));
        }
        Ok(self.platforms.len() as u32)
    }

    fn platform_ids(&self, ids: &mut [PlatformHandle]) -> ClResult<()> {
        if self.fail_platform_count.is_some() || ids.len() != self.platforms.len() {
            return Err(ClStatus(CL_INVALID_VALUE));
        }
        for (index, slot) in ids.iter_mut().enumerate() {
            *slot = Self::platform_handle(index);
        }
        Ok(())
    }

    fn platform_info(
        &self,
        platform: PlatformHandle,
        param: cl_platform_info,
        buf: Option<&mut [u8]>,
    ) -> ClResult<usize> {
        if let Some((failing, status)) = self.fail_platform_param {
            if failing == param {
                return Err(ClStatus(status));
            }
        }
        let p = self.platform(platform)?;
        let bytes = platform_info_bytes(p, param).ok_or(ClStatus(CL_INVALID_VALUE))?;
        serve(&bytes, buf)
    }

    fn device_count(&self, platform: PlatformHandle) -> ClResult<u32> {
        if let Some(status) = self.fail_device_count {
            return Err(ClStatus(status));
        }
        let p = self.platform(platform)?;
        Ok(p.devices.len() as u32)
    }

    fn device_ids(&self, platform: PlatformHandle, ids: &mut [DeviceHandle]) -> ClResult<()> {
        let raw = platform.as_raw() as usize;
        let platform_index = (raw >> 8).wrapping_sub(1);
        let p = self.platform(platform)?;
        if ids.len() != p.devices.len() {
            return Err(ClStatus(CL_INVALID_VALUE));
        }
        for (index, slot) in ids.iter_mut().enumerate() {
            *slot = Self::device_handle(platform_index, index);
        }
        Ok(())
    }

    fn device_info(
        &self,
        device: DeviceHandle,
        param: cl_device_info,
        buf: Option<&mut [u8]>,
    ) -> ClResult<usize> {
        if let Some((failing, status)) = self.fail_device_param {
            if failing == param {
                return Err(ClStatus(status));
            }
        }
        let d = self.device(device)?;
        let bytes = device_info_bytes(d, param).ok_or(ClStatus(CL_INVALID_VALUE))?;
        serve(&bytes, buf)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::{fetch_device_info, fetch_platform_info};

    fn one_gpu_runtime() -> SoftwareRuntime {
        SoftwareRuntime::new().with_platform(
            SoftwarePlatform::new("Test Platform", "Test Vendor")
                .with_device(SoftwareDevice::gpu("Test GPU", "Test Vendor")),
        )
    }

    fn first_platform(rt: &SoftwareRuntime) -> PlatformHandle {
        let mut ids = [PlatformHandle::null()];
        rt.platform_ids(&mut ids).unwrap();
        ids[0]
    }

    #[test]
    fn size_query_then_fetch_round_trips() {
        let rt = one_gpu_runtime();
        let p = first_platform(&rt);
        let bytes = fetch_platform_info(&rt, p, platform::CL_PLATFORM_NAME).unwrap();
        assert_eq!(bytes, b"Test Platform\0");
    }

    #[test]
    fn fetch_with_wrong_size_is_rejected() {
        let rt = one_gpu_runtime();
        let p = first_platform(&rt);
        let size = rt
            .platform_info(p, platform::CL_PLATFORM_NAME, None)
            .unwrap();
        let mut short = vec![0u8; size - 1];
        let err = rt
            .platform_info(p, platform::CL_PLATFORM_NAME, Some(&mut short))
            .unwrap_err();
        assert_eq!(err, ClStatus(CL_INVALID_VALUE));
    }

    #[test]
    fn device_scalars_use_wire_widths() {
        let rt = one_gpu_runtime();
        let p = first_platform(&rt);
        let mut devices = [DeviceHandle::null()];
        rt.device_ids(p, &mut devices).unwrap();

        let ty = fetch_device_info(&rt, devices[0], device::CL_DEVICE_TYPE).unwrap();
        assert_eq!(ty.len(), 8);
        let avail = fetch_device_info(&rt, devices[0], device::CL_DEVICE_AVAILABLE).unwrap();
        assert_eq!(avail.len(), 4);
        let wg = fetch_device_info(&rt, devices[0], device::CL_DEVICE_MAX_WORK_GROUP_SIZE).unwrap();
        assert_eq!(wg.len(), std::mem::size_of::<usize>());
    }

    #[test]
    fn stale_handle_is_invalid() {
        let rt = one_gpu_runtime();
        let bogus = PlatformHandle::from_raw(0xDEAD_0000 as *mut c_void);
        let err = rt
            .platform_info(bogus, platform::CL_PLATFORM_NAME, None)
            .unwrap_err();
        assert_eq!(err, ClStatus(CL_INVALID_PLATFORM));
    }

    #[test]
    fn injected_failure_hits_only_its_selector() {
        let rt = one_gpu_runtime().fail_platform_param(platform::CL_PLATFORM_PROFILE, CL_INVALID_VALUE);
        let p = first_platform(&rt);
        assert!(rt.platform_info(p, platform::CL_PLATFORM_PROFILE, None).is_err());
        assert!(rt.platform_info(p, platform::CL_PLATFORM_NAME, None).is_ok());
    }
}
