//! Runtime loader for the installed OpenCL library.
//!
//! The four enumeration entry points are resolved with `libloading` instead
//! of a link-time `-lOpenCL`, so the crate builds and its tests run on
//! machines with no OpenCL stack installed. Resolution happens once, at
//! startup.

use libloading::Library;

use crate::{
    cl_device_id, cl_device_info, cl_device_type, cl_int, cl_platform_id, cl_platform_info,
    cl_uint,
};
use std::ffi::c_void;

/// `clGetPlatformIDs(num_entries, platforms, num_platforms)`
pub type ClGetPlatformIds =
    unsafe extern "C" fn(cl_uint, *mut cl_platform_id, *mut cl_uint) -> cl_int;

/// `clGetPlatformInfo(platform, param_name, param_value_size, param_value,
/// param_value_size_ret)`
pub type ClGetPlatformInfo = unsafe extern "C" fn(
    cl_platform_id,
    cl_platform_info,
    usize,
    *mut c_void,
    *mut usize,
) -> cl_int;

/// `clGetDeviceIDs(platform, device_type, num_entries, devices, num_devices)`
pub type ClGetDeviceIds = unsafe extern "C" fn(
    cl_platform_id,
    cl_device_type,
    cl_uint,
    *mut cl_device_id,
    *mut cl_uint,
) -> cl_int;

/// `clGetDeviceInfo(device, param_name, param_value_size, param_value,
/// param_value_size_ret)`
pub type ClGetDeviceInfo =
    unsafe extern "C" fn(cl_device_id, cl_device_info, usize, *mut c_void, *mut usize) -> cl_int;

#[cfg(target_os = "linux")]
const CANDIDATES: &[&str] = &["libOpenCL.so.1", "libOpenCL.so"];
#[cfg(target_os = "windows")]
const CANDIDATES: &[&str] = &["OpenCL.dll"];
#[cfg(target_os = "macos")]
const CANDIDATES: &[&str] = &["/System/Library/Frameworks/OpenCL.framework/OpenCL"];
#[cfg(not(any(target_os = "linux", target_os = "windows", target_os = "macos")))]
const CANDIDATES: &[&str] = &[];

/// Resolved OpenCL entry points.
///
/// The function pointers stay valid for as long as this struct lives; the
/// backing library handle is held alongside them.
#[derive(Debug)]
pub struct OpenClApi {
    /// `clGetPlatformIDs`
    pub get_platform_ids: ClGetPlatformIds,
    /// `clGetPlatformInfo`
    pub get_platform_info: ClGetPlatformInfo,
    /// `clGetDeviceIDs`
    pub get_device_ids: ClGetDeviceIds,
    /// `clGetDeviceInfo`
    pub get_device_info: ClGetDeviceInfo,

    library_name: &'static str,
    _library: Library,
}

impl OpenClApi {
    /// Load the first OpenCL library found among the platform's usual
    /// names and resolve the enumeration entry points from it.
    ///
    /// # Errors
    ///
    /// Returns the loader error for the last candidate tried if no library
    /// can be opened, or a symbol-resolution error if one opens but lacks
    /// an entry point.
    pub fn load() -> Result<Self, libloading::Error> {
        let mut last_err = None;
        for &name in CANDIDATES {
            // SAFETY: loading libOpenCL runs its initialisers; that is the
            // documented way to use the vendor ICD loader.
            match unsafe { Library::new(name) } {
                Ok(library) => return unsafe { Self::from_library(library, name) },
                Err(e) => last_err = Some(e),
            }
        }
        Err(last_err.unwrap_or(libloading::Error::DlOpenUnknown))
    }

    /// Name of the library the entry points were resolved from.
    #[must_use]
    pub const fn library_name(&self) -> &'static str {
        self.library_name
    }

    unsafe fn from_library(
        library: Library,
        library_name: &'static str,
    ) -> Result<Self, libloading::Error> {
        let get_platform_ids = *library.get::<ClGetPlatformIds>(b"clGetPlatformIDs\0")?;
        let get_platform_info = *library.get::<ClGetPlatformInfo>(b"clGetPlatformInfo\0")?;
        let get_device_ids = *library.get::<ClGetDeviceIds>(b"clGetDeviceIDs\0")?;
        let get_device_info = *library.get::<ClGetDeviceInfo>(b"clGetDeviceInfo\0")?;

        Ok(Self {
            get_platform_ids,
            get_platform_info,
            get_device_ids,
            get_device_info,
            library_name,
            _library: library,
        })
    }
}
