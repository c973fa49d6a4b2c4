//! System backend: the installed OpenCL library.

use crate::error::{ClStatus, ProbeError, Result};
use crate::runtime::{ClResult, ClRuntime, DeviceHandle, PlatformHandle};
use clprobe_sys::params::CL_DEVICE_TYPE_ALL;
use clprobe_sys::status::CL_SUCCESS;
use clprobe_sys::{cl_device_info, cl_int, cl_platform_info, cl_uint, OpenClApi};
use std::ptr;

/// Runtime backed by the vendor OpenCL library.
#[derive(Debug)]
pub struct SystemRuntime {
    api: OpenClApi,
}

impl SystemRuntime {
    /// Load the OpenCL library and resolve the enumeration entry points.
    ///
    /// # Errors
    ///
    /// Returns [`ProbeError::RuntimeUnavailable`] when no OpenCL library
    /// can be loaded or an entry point is missing.
    pub fn load() -> Result<Self> {
        let api = OpenClApi::load().map_err(|e| ProbeError::runtime_unavailable(e.to_string()))?;
        tracing::debug!("resolved OpenCL entry points from {}", api.library_name());
        Ok(Self { api })
    }
}

fn check(status: cl_int) -> ClResult<()> {
    if status == CL_SUCCESS {
        Ok(())
    } else {
        Err(ClStatus(status))
    }
}

impl ClRuntime for SystemRuntime {
    fn platform_count(&self) -> ClResult<u32> {
        let mut count: cl_uint = 0;
        // SAFETY: num_entries = 0 with a null platform buffer is the
        // documented count-query form.
        let status = unsafe { (self.api.get_platform_ids)(0, ptr::null_mut(), &mut count) };
        check(status)?;
        Ok(count)
    }

    fn platform_ids(&self, ids: &mut [PlatformHandle]) -> ClResult<()> {
        let count = ids.len() as cl_uint;
        // SAFETY: PlatformHandle is a transparent wrapper around the raw
        // id pointer, and the buffer holds exactly `count` entries.
        let status = unsafe {
            (self.api.get_platform_ids)(count, ids.as_mut_ptr().cast(), ptr::null_mut())
        };
        check(status)
    }

    fn platform_info(
        &self,
        platform: PlatformHandle,
        param: cl_platform_info,
        buf: Option<&mut [u8]>,
    ) -> ClResult<usize> {
        match buf {
            None => {
                let mut size: usize = 0;
                // SAFETY: size-query form: null value buffer, out-size pointer.
                let status = unsafe {
                    (self.api.get_platform_info)(
                        platform.as_raw(),
                        param,
                        0,
                        ptr::null_mut(),
                        &mut size,
                    )
                };
                check(status)?;
                Ok(size)
            }
            Some(buf) => {
                // SAFETY: the buffer length is passed alongside its pointer.
                let status = unsafe {
                    (self.api.get_platform_info)(
                        platform.as_raw(),
                        param,
                        buf.len(),
                        buf.as_mut_ptr().cast(),
                        ptr::null_mut(),
                    )
                };
                check(status)?;
                Ok(buf.len())
            }
        }
    }

    fn device_count(&self, platform: PlatformHandle) -> ClResult<u32> {
        let mut count: cl_uint = 0;
        // SAFETY: count-query form of clGetDeviceIDs.
        let status = unsafe {
            (self.api.get_device_ids)(
                platform.as_raw(),
                CL_DEVICE_TYPE_ALL,
                0,
                ptr::null_mut(),
                &mut count,
            )
        };
        check(status)?;
        Ok(count)
    }

    fn device_ids(&self, platform: PlatformHandle, ids: &mut [DeviceHandle]) -> ClResult<()> {
        let count = ids.len() as cl_uint;
        // SAFETY: DeviceHandle is a transparent wrapper around the raw id
        // pointer, and the buffer holds exactly `count` entries.
        let status = unsafe {
            (self.api.get_device_ids)(
                platform.as_raw(),
                CL_DEVICE_TYPE_ALL,
                count,
                ids.as_mut_ptr().cast(),
                ptr::null_mut(),
            )
        };
        check(status)
    }

    fn device_info(
        &self,
        device: DeviceHandle,
        param: cl_device_info,
        buf: Option<&mut [u8]>,
    ) -> ClResult<usize> {
        match buf {
            None => {
                let mut size: usize = 0;
                // SAFETY: size-query form: null value buffer, out-size pointer.
                let status = unsafe {
                    (self.api.get_device_info)(device.as_raw(), param, 0, ptr::null_mut(), &mut size)
                };
                check(status)?;
                Ok(size)
            }
            Some(buf) => {
                // SAFETY: the buffer length is passed alongside its pointer.
                let status = unsafe {
                    (self.api.get_device_info)(
                        device.as_raw(),
                        param,
                        buf.len(),
                        buf.as_mut_ptr().cast(),
                        ptr::null_mut(),
                    )
                };
                check(status)?;
                Ok(buf.len())
            }
        }
    }
}
