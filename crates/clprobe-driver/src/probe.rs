//! Platform and device enumeration.
//!
//! One pass, strictly top-down: platform count, then per platform the five
//! platform attributes and the device section, then per device the
//! fourteen device attributes. The report goes to the supplied writer;
//! failures are logged where they occur and collected in the summary.
//!
//! Abort scope is per nesting level: a platform attribute failure ends
//! that platform's block but later platforms still enumerate, and a device
//! attribute failure ends that device's attribute list but sibling devices
//! still enumerate. Only the platform-count stage (and report I/O) is
//! fatal to the whole run.

use crate::attributes::{AttrKind, AttrValue, DEVICE_ATTRS, PLATFORM_ATTRS};
use crate::error::{ProbeError, Result};
use crate::runtime::{
    fetch_device_info, fetch_platform_info, ClRuntime, DeviceHandle, PlatformHandle,
};
use std::io::Write;

/// Outcome of a full probe pass.
#[derive(Debug, Default)]
pub struct ProbeSummary {
    /// Platforms reported by the runtime
    pub platform_count: u32,
    /// Devices successfully enumerated across all platforms
    pub device_count: u32,
    /// Non-fatal query failures, in order of occurrence
    pub failures: Vec<ProbeError>,
}

impl ProbeSummary {
    /// True when every query succeeded.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }

    /// Process exit code: 0 when clean, otherwise the code of the first
    /// failure encountered.
    #[must_use]
    pub fn exit_code(&self) -> u8 {
        self.failures.first().map_or(0, ProbeError::exit_code)
    }
}

/// Enumerate every platform and device and write the report to `out`.
///
/// # Errors
///
/// Returns an error when the platform-count stage fails or the report
/// cannot be written. All other failures are recorded in the summary.
pub fn probe<W: Write>(rt: &dyn ClRuntime, out: &mut W) -> Result<ProbeSummary> {
    let count = rt
        .platform_count()
        .map_err(|status| ProbeError::PlatformCount { status })?;
    tracing::info!("found {count} OpenCL platform(s)");

    let mut handles = vec![PlatformHandle::null(); count as usize];
    if count > 0 {
        rt.platform_ids(&mut handles)
            .map_err(|status| ProbeError::PlatformIds { status })?;
    }

    let mut summary = ProbeSummary {
        platform_count: count,
        ..ProbeSummary::default()
    };

    for (index, &platform) in handles.iter().enumerate() {
        writeln!(out, "Platform {index}:")?;

        if let Err(e) = report_platform(rt, platform, out) {
            if matches!(e, ProbeError::Io { .. }) {
                return Err(e);
            }
            tracing::error!("platform {index}: {e}");
            summary.failures.push(e);
            // Skip this platform's device section too: a handle that cannot
            // answer profile queries will not answer device queries.
            continue;
        }

        report_devices(rt, platform, out, &mut summary)?;
        writeln!(out)?;
    }

    Ok(summary)
}

/// Report the five platform attributes. The first failed query aborts the
/// rest of the table.
fn report_platform(rt: &dyn ClRuntime, platform: PlatformHandle, out: &mut impl Write) -> Result<()> {
    for attr in &PLATFORM_ATTRS {
        let bytes = fetch_platform_info(rt, platform, attr.id)
            .map_err(|status| ProbeError::PlatformInfo {
                label: attr.label,
                status,
            })?;
        let value = AttrValue::decode(AttrKind::Text, attr.label, &bytes)?;
        writeln!(out, "  {}: {value}", attr.label)?;
    }
    Ok(())
}

/// Report one platform's device section: count, handles, then the
/// fourteen attributes per device.
fn report_devices(
    rt: &dyn ClRuntime,
    platform: PlatformHandle,
    out: &mut impl Write,
    summary: &mut ProbeSummary,
) -> Result<()> {
    let count = match rt.device_count(platform) {
        Ok(count) => count,
        Err(status) => {
            let e = ProbeError::DeviceCount { status };
            tracing::error!("{e}");
            summary.failures.push(e);
            return Ok(());
        }
    };

    if count == 0 {
        writeln!(out, "No devices were found.")?;
        return Ok(());
    }

    let mut devices = vec![DeviceHandle::null(); count as usize];
    if let Err(status) = rt.device_ids(platform, &mut devices) {
        let e = ProbeError::DeviceIds { status };
        tracing::error!("{e}");
        summary.failures.push(e);
        return Ok(());
    }

    for (index, &device) in devices.iter().enumerate() {
        writeln!(out, "\n    Device {index}:")?;
        summary.device_count += 1;

        for attr in &DEVICE_ATTRS {
            match report_device_attr(rt, device, attr.id, attr.kind, attr.label, out) {
                Ok(()) => {}
                Err(e @ ProbeError::Io { .. }) => return Err(e),
                Err(e) => {
                    tracing::error!("device {index}: {e}");
                    summary.failures.push(e);
                    // Remaining attributes of this device are skipped;
                    // sibling devices still enumerate.
                    break;
                }
            }
        }
    }

    Ok(())
}

fn report_device_attr(
    rt: &dyn ClRuntime,
    device: DeviceHandle,
    id: clprobe_sys::cl_device_info,
    kind: AttrKind,
    label: &'static str,
    out: &mut impl Write,
) -> Result<()> {
    let bytes = fetch_device_info(rt, device, id)
        .map_err(|status| ProbeError::DeviceInfo { label, status })?;
    let value = AttrValue::decode(kind, label, &bytes)?;
    writeln!(out, "    {label}: {value}")?;
    Ok(())
}
