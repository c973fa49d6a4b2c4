//! Probe a synthetic OpenCL stack.
//!
//! Runs the full enumeration pass against the software backend, so the
//! report format can be inspected on a machine with no OpenCL installed.

use clprobe_driver::{probe, Result, SoftwareDevice, SoftwarePlatform, SoftwareRuntime};
use clprobe_sys::params::{CL_DEVICE_TYPE_ACCELERATOR, CL_DEVICE_TYPE_CPU};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter("clprobe_driver=debug")
        .init();

    let rt = SoftwareRuntime::new()
        .with_platform(
            SoftwarePlatform::new("Synthetic CL", "clprobe")
                .with_extensions("cl_khr_icd cl_khr_fp64")
                .with_device(SoftwareDevice::gpu("Synthetic GPU", "clprobe"))
                .with_device(
                    SoftwareDevice::gpu("Synthetic CPU", "clprobe").with_type(CL_DEVICE_TYPE_CPU),
                ),
        )
        .with_platform(
            SoftwarePlatform::new("Synthetic Accelerators", "clprobe").with_device(
                SoftwareDevice::gpu("Synthetic NPU", "clprobe")
                    .with_type(CL_DEVICE_TYPE_ACCELERATOR),
            ),
        );

    let stdout = std::io::stdout();
    let summary = probe(&rt, &mut stdout.lock())?;

    eprintln!(
        "{} platform(s), {} device(s), {} failure(s)",
        summary.platform_count,
        summary.device_count,
        summary.failures.len()
    );

    Ok(())
}
