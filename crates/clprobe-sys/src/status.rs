//! OpenCL status codes.

use crate::cl_int;

/// `CL_SUCCESS`
pub const CL_SUCCESS: cl_int = 0;
/// `CL_DEVICE_NOT_FOUND`
pub const CL_DEVICE_NOT_FOUND: cl_int = -1;
/// `CL_DEVICE_NOT_AVAILABLE`
pub const CL_DEVICE_NOT_AVAILABLE: cl_int = -2;
/// `CL_OUT_OF_RESOURCES`
pub const CL_OUT_OF_RESOURCES: cl_int = -5;
/// `CL_OUT_OF_HOST_MEMORY`
pub const CL_OUT_OF_HOST_MEMORY: cl_int = -6;
/// `CL_INVALID_VALUE`
pub const CL_INVALID_VALUE: cl_int = -30;
/// `CL_INVALID_DEVICE_TYPE`
pub const CL_INVALID_DEVICE_TYPE: cl_int = -31;
/// `CL_INVALID_PLATFORM`
pub const CL_INVALID_PLATFORM: cl_int = -32;
/// `CL_INVALID_DEVICE`
pub const CL_INVALID_DEVICE: cl_int = -33;

/// Symbolic name for a status code, if it is one the probe can encounter.
#[must_use]
pub const fn status_name(status: cl_int) -> Option<&'static str> {
    Some(match status {
        CL_SUCCESS => "CL_SUCCESS",
        CL_DEVICE_NOT_FOUND => "CL_DEVICE_NOT_FOUND",
        CL_DEVICE_NOT_AVAILABLE => "CL_DEVICE_NOT_AVAILABLE",
        CL_OUT_OF_RESOURCES => "CL_OUT_OF_RESOURCES",
        CL_OUT_OF_HOST_MEMORY => "CL_OUT_OF_HOST_MEMORY",
        CL_INVALID_VALUE => "CL_INVALID_VALUE",
        CL_INVALID_DEVICE_TYPE => "CL_INVALID_DEVICE_TYPE",
        CL_INVALID_PLATFORM => "CL_INVALID_PLATFORM",
        CL_INVALID_DEVICE => "CL_INVALID_DEVICE",
        _ => return None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_codes_have_names() {
        assert_eq!(status_name(CL_SUCCESS), Some("CL_SUCCESS"));
        assert_eq!(status_name(CL_INVALID_VALUE), Some("CL_INVALID_VALUE"));
        assert_eq!(status_name(-9999), None);
    }
}
