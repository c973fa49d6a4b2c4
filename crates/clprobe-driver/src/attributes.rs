//! The fixed attribute tables and value decoding.
//!
//! Each table is an ordered sequence of `{id, label, kind}` records; the
//! report iterates them in declaration order. Values decode into
//! [`AttrValue`], whose `Display` implementation is the single formatting
//! point for every semantic kind.

use crate::error::{ProbeError, Result};
use clprobe_sys::params::{
    device, platform, CL_DEVICE_TYPE_ACCELERATOR, CL_DEVICE_TYPE_CPU, CL_DEVICE_TYPE_GPU,
};
use clprobe_sys::{cl_bool, cl_device_info, cl_device_type, cl_platform_info};
use std::fmt;

/// Semantic kind of an attribute value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttrKind {
    /// NUL-terminated byte string.
    Text,
    /// Unsigned 32-bit integer. `CL_DEVICE_MAX_WORK_GROUP_SIZE` arrives as
    /// a `size_t`, so an 8-byte buffer is also accepted and narrowed.
    Uint,
    /// Unsigned 64-bit integer.
    Ulong,
    /// Boolean, printed as its raw integer representation.
    Bool,
    /// Device classification bit-field.
    DeviceType,
}

/// One platform attribute: selector and report label. All platform
/// attributes are strings.
#[derive(Debug, Clone, Copy)]
pub struct PlatformAttr {
    /// `clGetPlatformInfo` selector
    pub id: cl_platform_info,
    /// Label printed before the value
    pub label: &'static str,
}

/// The five platform attributes, in report order.
pub const PLATFORM_ATTRS: [PlatformAttr; 5] = [
    PlatformAttr {
        id: platform::CL_PLATFORM_PROFILE,
        label: "PLATFORM",
    },
    PlatformAttr {
        id: platform::CL_PLATFORM_NAME,
        label: "NAME",
    },
    PlatformAttr {
        id: platform::CL_PLATFORM_VERSION,
        label: "VERSION",
    },
    PlatformAttr {
        id: platform::CL_PLATFORM_VENDOR,
        label: "VENDOR",
    },
    PlatformAttr {
        id: platform::CL_PLATFORM_EXTENSIONS,
        label: "EXTENSIONS",
    },
];

/// One device attribute: selector, report label, semantic kind.
#[derive(Debug, Clone, Copy)]
pub struct DeviceAttr {
    /// `clGetDeviceInfo` selector
    pub id: cl_device_info,
    /// Label printed before the value
    pub label: &'static str,
    /// How the returned bytes decode
    pub kind: AttrKind,
}

/// The fourteen device attributes, in report order.
pub const DEVICE_ATTRS: [DeviceAttr; 14] = [
    DeviceAttr {
        id: device::CL_DEVICE_NAME,
        label: "CL_DEVICE_NAME",
        kind: AttrKind::Text,
    },
    DeviceAttr {
        id: device::CL_DEVICE_TYPE,
        label: "CL_DEVICE_TYPE",
        kind: AttrKind::DeviceType,
    },
    DeviceAttr {
        id: device::CL_DEVICE_VENDOR,
        label: "CL_DEVICE_VENDOR",
        kind: AttrKind::Text,
    },
    DeviceAttr {
        id: device::CL_DEVICE_ADDRESS_BITS,
        label: "CL_DEVICE_ADDRESS_BITS",
        kind: AttrKind::Uint,
    },
    DeviceAttr {
        id: device::CL_DEVICE_AVAILABLE,
        label: "CL_DEVICE_AVAILABLE",
        kind: AttrKind::Bool,
    },
    DeviceAttr {
        id: device::CL_DEVICE_GLOBAL_MEM_CACHE_SIZE,
        label: "CL_DEVICE_GLOBAL_MEM_CACHE_SIZE",
        kind: AttrKind::Ulong,
    },
    DeviceAttr {
        id: device::CL_DEVICE_GLOBAL_MEM_SIZE,
        label: "CL_DEVICE_GLOBAL_MEM_SIZE",
        kind: AttrKind::Ulong,
    },
    DeviceAttr {
        id: device::CL_DEVICE_LOCAL_MEM_SIZE,
        label: "CL_DEVICE_LOCAL_MEM_SIZE",
        kind: AttrKind::Ulong,
    },
    DeviceAttr {
        id: device::CL_DEVICE_MAX_CLOCK_FREQUENCY,
        label: "CL_DEVICE_MAX_CLOCK_FREQUENCY",
        kind: AttrKind::Uint,
    },
    DeviceAttr {
        id: device::CL_DEVICE_MAX_COMPUTE_UNITS,
        label: "CL_DEVICE_MAX_COMPUTE_UNITS",
        kind: AttrKind::Uint,
    },
    DeviceAttr {
        id: device::CL_DEVICE_MAX_WORK_GROUP_SIZE,
        label: "CL_DEVICE_MAX_WORK_GROUP_SIZE",
        kind: AttrKind::Uint,
    },
    DeviceAttr {
        id: device::CL_DEVICE_MAX_WORK_ITEM_DIMENSIONS,
        label: "CL_DEVICE_MAX_WORK_ITEM_DIMENSIONS",
        kind: AttrKind::Uint,
    },
    DeviceAttr {
        id: device::CL_DEVICE_VERSION,
        label: "CL_DEVICE_VERSION",
        kind: AttrKind::Text,
    },
    DeviceAttr {
        id: device::CL_DRIVER_VERSION,
        label: "CL_DRIVER_VERSION",
        kind: AttrKind::Text,
    },
];

const DEVICE_TYPE_FLAGS: [(cl_device_type, &str); 3] = [
    (CL_DEVICE_TYPE_CPU, "CL_DEVICE_TYPE_CPU"),
    (CL_DEVICE_TYPE_GPU, "CL_DEVICE_TYPE_GPU"),
    (CL_DEVICE_TYPE_ACCELERATOR, "CL_DEVICE_TYPE_ACCELERATOR"),
];

/// A decoded attribute value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttrValue {
    /// String attribute, terminator stripped.
    Text(String),
    /// Unsigned 32-bit attribute.
    Uint(u32),
    /// Unsigned 64-bit attribute.
    Ulong(u64),
    /// Boolean attribute, kept as the raw integer.
    Bool(cl_bool),
    /// Device classification bits.
    DeviceType(cl_device_type),
}

impl AttrValue {
    /// Decode an attribute buffer according to its semantic kind.
    ///
    /// # Errors
    ///
    /// Returns [`ProbeError::MalformedValue`] when the buffer length does
    /// not match the kind's wire size.
    pub fn decode(kind: AttrKind, label: &'static str, bytes: &[u8]) -> Result<Self> {
        let malformed = || ProbeError::MalformedValue {
            label,
            got: bytes.len(),
        };

        match kind {
            AttrKind::Text => {
                // OpenCL strings are NUL-terminated; anything after the
                // first NUL is padding.
                let end = bytes
                    .iter()
                    .position(|&b| b == 0)
                    .unwrap_or(bytes.len());
                Ok(Self::Text(
                    String::from_utf8_lossy(&bytes[..end]).into_owned(),
                ))
            }
            AttrKind::Uint => match bytes.len() {
                4 => Ok(Self::Uint(u32::from_ne_bytes(
                    bytes.try_into().map_err(|_| malformed())?,
                ))),
                // size_t-typed selectors on LP64
                8 => {
                    let wide = u64::from_ne_bytes(bytes.try_into().map_err(|_| malformed())?);
                    u32::try_from(wide).map(Self::Uint).map_err(|_| malformed())
                }
                _ => Err(malformed()),
            },
            AttrKind::Ulong => bytes
                .try_into()
                .map(|raw| Self::Ulong(u64::from_ne_bytes(raw)))
                .map_err(|_| malformed()),
            AttrKind::Bool => bytes
                .try_into()
                .map(|raw| Self::Bool(cl_bool::from_ne_bytes(raw)))
                .map_err(|_| malformed()),
            AttrKind::DeviceType => bytes
                .try_into()
                .map(|raw| Self::DeviceType(cl_device_type::from_ne_bytes(raw)))
                .map_err(|_| malformed()),
        }
    }
}

impl fmt::Display for AttrValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) => f.write_str(s),
            Self::Uint(v) => write!(f, "{v}"),
            Self::Ulong(v) => write!(f, "{v}"),
            Self::Bool(v) => write!(f, "{v}"),
            Self::DeviceType(bits) => {
                let names: Vec<&str> = DEVICE_TYPE_FLAGS
                    .iter()
                    .filter(|(bit, _)| bits & bit != 0)
                    .map(|&(_, name)| name)
                    .collect();
                f.write_str(&names.join("; "))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn platform_table_is_the_fixed_five() {
        let labels: Vec<&str> = PLATFORM_ATTRS.iter().map(|a| a.label).collect();
        assert_eq!(
            labels,
            ["PLATFORM", "NAME", "VERSION", "VENDOR", "EXTENSIONS"]
        );
    }

    #[test]
    fn device_table_is_the_fixed_fourteen() {
        assert_eq!(DEVICE_ATTRS.len(), 14);
        assert_eq!(DEVICE_ATTRS[0].label, "CL_DEVICE_NAME");
        assert_eq!(DEVICE_ATTRS[1].label, "CL_DEVICE_TYPE");
        assert_eq!(DEVICE_ATTRS[13].label, "CL_DRIVER_VERSION");
        // ids are unique
        for (i, a) in DEVICE_ATTRS.iter().enumerate() {
            for b in &DEVICE_ATTRS[i + 1..] {
                assert_ne!(a.id, b.id);
            }
        }
    }

    #[test]
    fn text_decodes_up_to_the_terminator() {
        let value = AttrValue::decode(AttrKind::Text, "NAME", b"FULL_PROFILE\0").unwrap();
        assert_eq!(value, AttrValue::Text("FULL_PROFILE".into()));
        assert_eq!(value.to_string(), "FULL_PROFILE");
    }

    #[test]
    fn uint_accepts_size_t_width() {
        let narrow = AttrValue::decode(AttrKind::Uint, "X", &32u32.to_ne_bytes()).unwrap();
        assert_eq!(narrow, AttrValue::Uint(32));
        let wide = AttrValue::decode(AttrKind::Uint, "X", &1024u64.to_ne_bytes()).unwrap();
        assert_eq!(wide, AttrValue::Uint(1024));
    }

    #[test]
    fn wrong_size_is_malformed() {
        let err = AttrValue::decode(AttrKind::Ulong, "CL_DEVICE_GLOBAL_MEM_SIZE", &[0u8; 3])
            .unwrap_err();
        assert!(matches!(
            err,
            ProbeError::MalformedValue {
                label: "CL_DEVICE_GLOBAL_MEM_SIZE",
                got: 3
            }
        ));
    }

    #[test]
    fn bool_prints_raw_integer() {
        let value = AttrValue::decode(AttrKind::Bool, "X", &1u32.to_ne_bytes()).unwrap();
        assert_eq!(value.to_string(), "1");
        let value = AttrValue::decode(AttrKind::Bool, "X", &0u32.to_ne_bytes()).unwrap();
        assert_eq!(value.to_string(), "0");
    }

    #[test]
    fn device_type_flags_combine() {
        let gpu = AttrValue::DeviceType(CL_DEVICE_TYPE_GPU);
        assert_eq!(gpu.to_string(), "CL_DEVICE_TYPE_GPU");

        let both = AttrValue::DeviceType(CL_DEVICE_TYPE_CPU | CL_DEVICE_TYPE_GPU);
        assert_eq!(both.to_string(), "CL_DEVICE_TYPE_CPU; CL_DEVICE_TYPE_GPU");

        let all = AttrValue::DeviceType(
            CL_DEVICE_TYPE_CPU | CL_DEVICE_TYPE_GPU | CL_DEVICE_TYPE_ACCELERATOR,
        );
        assert_eq!(
            all.to_string(),
            "CL_DEVICE_TYPE_CPU; CL_DEVICE_TYPE_GPU; CL_DEVICE_TYPE_ACCELERATOR"
        );
    }

    #[test]
    fn unknown_device_type_bits_print_empty() {
        let custom = AttrValue::DeviceType(1 << 5);
        assert_eq!(custom.to_string(), "");
    }
}
