//! Error types for probe operations.

use clprobe_sys::cl_int;
use clprobe_sys::status::status_name;
use std::fmt;
use thiserror::Error;

/// Result type alias for probe operations.
pub type Result<T> = std::result::Result<T, ProbeError>;

/// An OpenCL status code, rendered by symbolic name where known.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClStatus(pub cl_int);

impl fmt::Display for ClStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match status_name(self.0) {
            Some(name) => f.write_str(name),
            None => write!(f, "status {}", self.0),
        }
    }
}

/// Errors that can occur while enumerating platforms and devices.
///
/// The display texts keep the wording the tool has always reported, with
/// the failing attribute label and the OpenCL status appended.
#[derive(Debug, Error)]
pub enum ProbeError {
    /// No OpenCL library could be loaded.
    #[error("OpenCL runtime unavailable: {reason}")]
    RuntimeUnavailable {
        /// Loader failure description
        reason: String,
    },

    /// The platform-count query failed.
    #[error("couldn't find any platforms ({status})")]
    PlatformCount {
        /// Status returned by the count query
        status: ClStatus,
    },

    /// The platform-id fetch failed.
    #[error("couldn't list platforms ({status})")]
    PlatformIds {
        /// Status returned by the id fetch
        status: ClStatus,
    },

    /// A platform attribute query failed.
    #[error("couldn't read {label} data ({status})")]
    PlatformInfo {
        /// Label of the attribute that failed
        label: &'static str,
        /// Status returned by the query
        status: ClStatus,
    },

    /// The device-count query failed.
    #[error("couldn't access any devices ({status})")]
    DeviceCount {
        /// Status returned by the count query
        status: ClStatus,
    },

    /// The device-id fetch failed.
    #[error("couldn't get any devices ({status})")]
    DeviceIds {
        /// Status returned by the id fetch
        status: ClStatus,
    },

    /// A device attribute query failed.
    #[error("couldn't get {label} parameter from device ({status})")]
    DeviceInfo {
        /// Label of the attribute that failed
        label: &'static str,
        /// Status returned by the query
        status: ClStatus,
    },

    /// An attribute buffer did not match its declared semantic kind.
    #[error("{label} value has unexpected size ({got} bytes)")]
    MalformedValue {
        /// Label of the attribute
        label: &'static str,
        /// Byte length actually returned
        got: usize,
    },

    /// Writing the report failed.
    #[error("couldn't write report: {source}")]
    Io {
        /// Underlying I/O error
        #[from]
        source: std::io::Error,
    },
}

impl ProbeError {
    /// Create a runtime-unavailable error.
    pub fn runtime_unavailable(reason: impl Into<String>) -> Self {
        Self::RuntimeUnavailable {
            reason: reason.into(),
        }
    }

    /// Process exit code for this failure class.
    ///
    /// The contract is a closed set: 0 success, 1 platform enumeration
    /// failure, 2 device enumeration failure, 3 attribute-query failure.
    #[must_use]
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::RuntimeUnavailable { .. }
            | Self::PlatformCount { .. }
            | Self::PlatformIds { .. }
            | Self::Io { .. } => 1,
            Self::DeviceCount { .. } | Self::DeviceIds { .. } => 2,
            Self::PlatformInfo { .. }
            | Self::DeviceInfo { .. }
            | Self::MalformedValue { .. } => 3,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clprobe_sys::status::{CL_INVALID_PLATFORM, CL_INVALID_VALUE};

    #[test]
    fn status_renders_by_name() {
        assert_eq!(ClStatus(CL_INVALID_VALUE).to_string(), "CL_INVALID_VALUE");
        assert_eq!(ClStatus(-1234).to_string(), "status -1234");
    }

    #[test]
    fn display_names_the_failed_label() {
        let err = ProbeError::PlatformInfo {
            label: "PLATFORM",
            status: ClStatus(CL_INVALID_PLATFORM),
        };
        let text = err.to_string();
        assert!(text.contains("PLATFORM"));
        assert!(text.contains("CL_INVALID_PLATFORM"));
    }

    #[test]
    fn exit_codes_form_the_closed_set() {
        let platform = ProbeError::PlatformCount {
            status: ClStatus(CL_INVALID_VALUE),
        };
        let device = ProbeError::DeviceCount {
            status: ClStatus(CL_INVALID_VALUE),
        };
        let attribute = ProbeError::DeviceInfo {
            label: "CL_DEVICE_NAME",
            status: ClStatus(CL_INVALID_VALUE),
        };
        assert_eq!(platform.exit_code(), 1);
        assert_eq!(device.exit_code(), 2);
        assert_eq!(attribute.exit_code(), 3);
        assert_eq!(ProbeError::runtime_unavailable("no library").exit_code(), 1);
    }
}
