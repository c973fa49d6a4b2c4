//! Raw OpenCL ABI surface.
//!
//! Type aliases matching `CL/cl.h`, the parameter and status constants the
//! probe queries, and a runtime loader for the installed OpenCL library.
//! Everything here is the untranslated C contract; the safe layer lives in
//! `clprobe-driver`.

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(non_camel_case_types)]
#![allow(clippy::doc_markdown)]

use std::ffi::c_void;

mod api;
pub mod params;
pub mod status;

pub use api::OpenClApi;

/// Signed 32-bit status code.
pub type cl_int = i32;
/// Unsigned 32-bit scalar.
pub type cl_uint = u32;
/// Unsigned 64-bit scalar.
pub type cl_ulong = u64;
/// Boolean, 4 bytes on the wire (`CL_FALSE` = 0, `CL_TRUE` = 1).
pub type cl_bool = cl_uint;
/// Bit-field carrier, 8 bytes on the wire.
pub type cl_bitfield = cl_ulong;
/// Device classification bit-field.
pub type cl_device_type = cl_bitfield;
/// Platform attribute selector.
pub type cl_platform_info = cl_uint;
/// Device attribute selector.
pub type cl_device_info = cl_uint;

/// Opaque platform identifier. Valid for the lifetime of the process; never
/// released explicitly.
pub type cl_platform_id = *mut c_void;
/// Opaque device identifier, child of exactly one platform.
pub type cl_device_id = *mut c_void;

/// `CL_FALSE`
pub const CL_FALSE: cl_bool = 0;
/// `CL_TRUE`
pub const CL_TRUE: cl_bool = 1;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_sizes_match_the_abi() {
        assert_eq!(std::mem::size_of::<cl_uint>(), 4);
        assert_eq!(std::mem::size_of::<cl_ulong>(), 8);
        assert_eq!(std::mem::size_of::<cl_bool>(), 4);
        assert_eq!(std::mem::size_of::<cl_device_type>(), 8);
    }
}
