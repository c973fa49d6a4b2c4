//! Attribute selectors and device classification bits.
//!
//! Values are from `CL/cl.h` and stable since OpenCL 1.0.

use crate::{cl_device_info, cl_device_type, cl_platform_info};

/// Platform attribute selectors (`clGetPlatformInfo`).
pub mod platform {
    use super::cl_platform_info;

    /// `CL_PLATFORM_PROFILE` — `FULL_PROFILE` or `EMBEDDED_PROFILE`.
    pub const CL_PLATFORM_PROFILE: cl_platform_info = 0x0900;
    /// `CL_PLATFORM_VERSION` — e.g. `OpenCL 3.0 CUDA 12.2.148`.
    pub const CL_PLATFORM_VERSION: cl_platform_info = 0x0901;
    /// `CL_PLATFORM_NAME`
    pub const CL_PLATFORM_NAME: cl_platform_info = 0x0902;
    /// `CL_PLATFORM_VENDOR`
    pub const CL_PLATFORM_VENDOR: cl_platform_info = 0x0903;
    /// `CL_PLATFORM_EXTENSIONS` — space-separated extension names.
    pub const CL_PLATFORM_EXTENSIONS: cl_platform_info = 0x0904;
}

/// Device attribute selectors (`clGetDeviceInfo`).
pub mod device {
    use super::cl_device_info;

    /// `CL_DEVICE_TYPE` — classification bit-field.
    pub const CL_DEVICE_TYPE: cl_device_info = 0x1000;
    /// `CL_DEVICE_MAX_COMPUTE_UNITS`
    pub const CL_DEVICE_MAX_COMPUTE_UNITS: cl_device_info = 0x1002;
    /// `CL_DEVICE_MAX_WORK_ITEM_DIMENSIONS`
    pub const CL_DEVICE_MAX_WORK_ITEM_DIMENSIONS: cl_device_info = 0x1003;
    /// `CL_DEVICE_MAX_WORK_GROUP_SIZE` — a `size_t` on the wire.
    pub const CL_DEVICE_MAX_WORK_GROUP_SIZE: cl_device_info = 0x1004;
    /// `CL_DEVICE_MAX_CLOCK_FREQUENCY` — megahertz.
    pub const CL_DEVICE_MAX_CLOCK_FREQUENCY: cl_device_info = 0x100C;
    /// `CL_DEVICE_ADDRESS_BITS`
    pub const CL_DEVICE_ADDRESS_BITS: cl_device_info = 0x100D;
    /// `CL_DEVICE_GLOBAL_MEM_CACHE_SIZE` — bytes.
    pub const CL_DEVICE_GLOBAL_MEM_CACHE_SIZE: cl_device_info = 0x101E;
    /// `CL_DEVICE_GLOBAL_MEM_SIZE` — bytes.
    pub const CL_DEVICE_GLOBAL_MEM_SIZE: cl_device_info = 0x101F;
    /// `CL_DEVICE_LOCAL_MEM_SIZE` — bytes.
    pub const CL_DEVICE_LOCAL_MEM_SIZE: cl_device_info = 0x1023;
    /// `CL_DEVICE_AVAILABLE`
    pub const CL_DEVICE_AVAILABLE: cl_device_info = 0x1027;
    /// `CL_DEVICE_NAME`
    pub const CL_DEVICE_NAME: cl_device_info = 0x102B;
    /// `CL_DEVICE_VENDOR`
    pub const CL_DEVICE_VENDOR: cl_device_info = 0x102C;
    /// `CL_DRIVER_VERSION`
    pub const CL_DRIVER_VERSION: cl_device_info = 0x102D;
    /// `CL_DEVICE_VERSION`
    pub const CL_DEVICE_VERSION: cl_device_info = 0x102F;
}

/// `CL_DEVICE_TYPE_DEFAULT`
pub const CL_DEVICE_TYPE_DEFAULT: cl_device_type = 1 << 0;
/// `CL_DEVICE_TYPE_CPU`
pub const CL_DEVICE_TYPE_CPU: cl_device_type = 1 << 1;
/// `CL_DEVICE_TYPE_GPU`
pub const CL_DEVICE_TYPE_GPU: cl_device_type = 1 << 2;
/// `CL_DEVICE_TYPE_ACCELERATOR`
pub const CL_DEVICE_TYPE_ACCELERATOR: cl_device_type = 1 << 3;
/// `CL_DEVICE_TYPE_ALL` — matches every device category.
pub const CL_DEVICE_TYPE_ALL: cl_device_type = 0xFFFF_FFFF;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selector_values_match_cl_h() {
        assert_eq!(platform::CL_PLATFORM_PROFILE, 0x0900);
        assert_eq!(platform::CL_PLATFORM_EXTENSIONS, 0x0904);
        assert_eq!(device::CL_DEVICE_TYPE, 0x1000);
        assert_eq!(device::CL_DEVICE_NAME, 0x102B);
        assert_eq!(device::CL_DEVICE_VERSION, 0x102F);
    }

    #[test]
    fn device_type_bits_are_disjoint() {
        let bits = [
            CL_DEVICE_TYPE_DEFAULT,
            CL_DEVICE_TYPE_CPU,
            CL_DEVICE_TYPE_GPU,
            CL_DEVICE_TYPE_ACCELERATOR,
        ];
        for (i, a) in bits.iter().enumerate() {
            for b in &bits[i + 1..] {
                assert_eq!(a & b, 0);
            }
        }
    }
}
