//! Full probe passes over the software backend.
//!
//! The software runtime serves the same wire encoding as the vendor
//! library, so these cover the complete pipeline: enumeration, the
//! two-call protocol, decoding, formatting, and the abort policy at each
//! nesting level.

use clprobe_driver::{
    probe, ClStatus, ProbeError, SoftwareDevice, SoftwarePlatform, SoftwareRuntime, SystemRuntime,
};
use clprobe_sys::params::{device, platform, CL_DEVICE_TYPE_ACCELERATOR, CL_DEVICE_TYPE_CPU, CL_DEVICE_TYPE_GPU};
use clprobe_sys::status::CL_INVALID_VALUE;

fn run(rt: &SoftwareRuntime) -> (String, clprobe_driver::ProbeSummary) {
    let mut out = Vec::new();
    let summary = probe(rt, &mut out).expect("probe should not fail fatally");
    (String::from_utf8(out).unwrap(), summary)
}

#[test]
fn full_report_layout() {
    let rt = SoftwareRuntime::new().with_platform(
        SoftwarePlatform::new("Test Platform", "Test Vendor")
            .with_extensions("cl_khr_icd")
            .with_device(SoftwareDevice::gpu("Test GPU", "Test Vendor")),
    );

    let (report, summary) = run(&rt);

    assert!(summary.is_clean());
    assert_eq!(summary.platform_count, 1);
    assert_eq!(summary.device_count, 1);
    assert_eq!(summary.exit_code(), 0);

    let expected = "\
Platform 0:
  PLATFORM: FULL_PROFILE
  NAME: Test Platform
  VERSION: OpenCL 3.0
  VENDOR: Test Vendor
  EXTENSIONS: cl_khr_icd

    Device 0:
    CL_DEVICE_NAME: Test GPU
    CL_DEVICE_TYPE: CL_DEVICE_TYPE_GPU
    CL_DEVICE_VENDOR: Test Vendor
    CL_DEVICE_ADDRESS_BITS: 64
    CL_DEVICE_AVAILABLE: 1
    CL_DEVICE_GLOBAL_MEM_CACHE_SIZE: 4194304
    CL_DEVICE_GLOBAL_MEM_SIZE: 8589934592
    CL_DEVICE_LOCAL_MEM_SIZE: 49152
    CL_DEVICE_MAX_CLOCK_FREQUENCY: 1800
    CL_DEVICE_MAX_COMPUTE_UNITS: 36
    CL_DEVICE_MAX_WORK_GROUP_SIZE: 1024
    CL_DEVICE_MAX_WORK_ITEM_DIMENSIONS: 3
    CL_DEVICE_VERSION: OpenCL 3.0
    CL_DRIVER_VERSION: 1.0

";
    assert_eq!(report, expected);
}

#[test]
fn platform_attributes_print_exactly_five_in_order() {
    let rt = SoftwareRuntime::new()
        .with_platform(SoftwarePlatform::new("Solo", "Vendor"));
    let (report, _) = run(&rt);

    let labels: Vec<&str> = report
        .lines()
        .filter(|l| l.starts_with("  ") && !l.starts_with("    "))
        .map(|l| l.trim_start().split(':').next().unwrap())
        .collect();
    assert_eq!(labels, ["PLATFORM", "NAME", "VERSION", "VENDOR", "EXTENSIONS"]);
}

#[test]
fn device_attributes_print_exactly_fourteen_in_order() {
    let rt = SoftwareRuntime::new().with_platform(
        SoftwarePlatform::new("P", "V").with_device(SoftwareDevice::gpu("G", "V")),
    );
    let (report, _) = run(&rt);

    let labels: Vec<&str> = report
        .lines()
        .filter(|l| l.starts_with("    CL_"))
        .map(|l| l.trim_start().split(':').next().unwrap())
        .collect();
    assert_eq!(labels.len(), 14);
    assert_eq!(labels[0], "CL_DEVICE_NAME");
    assert_eq!(labels[1], "CL_DEVICE_TYPE");
    assert_eq!(labels[13], "CL_DRIVER_VERSION");
}

#[test]
fn zero_platforms_is_clean_and_silent() {
    let (report, summary) = run(&SoftwareRuntime::new());
    assert!(report.is_empty());
    assert!(summary.is_clean());
    assert_eq!(summary.platform_count, 0);
    assert_eq!(summary.exit_code(), 0);
}

#[test]
fn zero_devices_reports_and_continues() {
    let rt = SoftwareRuntime::new()
        .with_platform(SoftwarePlatform::new("Empty", "Vendor"))
        .with_platform(
            SoftwarePlatform::new("Busy", "Vendor")
                .with_device(SoftwareDevice::gpu("G", "Vendor")),
        );
    let (report, summary) = run(&rt);

    assert!(summary.is_clean());
    assert!(report.contains("No devices were found.\n"));
    // The empty platform does not stop the next one.
    assert!(report.contains("Platform 1:"));
    assert!(report.contains("CL_DEVICE_NAME: G"));
}

#[test]
fn combined_type_bits_print_every_matching_label() {
    let rt = SoftwareRuntime::new().with_platform(
        SoftwarePlatform::new("P", "V").with_device(
            SoftwareDevice::gpu("Hybrid", "V").with_type(CL_DEVICE_TYPE_CPU | CL_DEVICE_TYPE_GPU),
        ),
    );
    let (report, _) = run(&rt);
    assert!(report.contains("CL_DEVICE_TYPE: CL_DEVICE_TYPE_CPU; CL_DEVICE_TYPE_GPU\n"));

    let rt = SoftwareRuntime::new().with_platform(
        SoftwarePlatform::new("P", "V")
            .with_device(SoftwareDevice::gpu("Accel", "V").with_type(CL_DEVICE_TYPE_ACCELERATOR)),
    );
    let (report, _) = run(&rt);
    assert!(report.contains("CL_DEVICE_TYPE: CL_DEVICE_TYPE_ACCELERATOR\n"));
}

#[test]
fn profile_failure_skips_platform_but_not_siblings() {
    let rt = SoftwareRuntime::new()
        .with_platform(
            SoftwarePlatform::new("Broken", "Vendor")
                .with_device(SoftwareDevice::gpu("Unreached", "Vendor")),
        )
        .fail_platform_param(platform::CL_PLATFORM_PROFILE, CL_INVALID_VALUE);

    let (report, summary) = run(&rt);

    assert_eq!(summary.failures.len(), 1);
    let text = summary.failures[0].to_string();
    assert!(text.contains("PLATFORM"), "failure must name the label: {text}");
    assert_eq!(summary.exit_code(), 3);

    // No attribute lines and no device enumeration for the broken platform.
    assert!(report.contains("Platform 0:"));
    assert!(!report.contains("NAME:"));
    assert!(!report.contains("Device 0:"));
    assert_eq!(summary.device_count, 0);
}

#[test]
fn device_attribute_failure_spares_sibling_devices() {
    let rt = SoftwareRuntime::new()
        .with_platform(
            SoftwarePlatform::new("P", "V")
                .with_device(SoftwareDevice::gpu("First", "V"))
                .with_device(SoftwareDevice::gpu("Second", "V")),
        )
        .fail_device_param(device::CL_DEVICE_VENDOR, CL_INVALID_VALUE);

    let (report, summary) = run(&rt);

    // Both devices got their first two attributes out before the failure.
    assert!(report.contains("CL_DEVICE_NAME: First"));
    assert!(report.contains("CL_DEVICE_NAME: Second"));
    assert!(!report.contains("CL_DEVICE_VENDOR:"));
    assert_eq!(summary.failures.len(), 2);
    assert_eq!(summary.exit_code(), 3);
    assert!(matches!(
        summary.failures[0],
        ProbeError::DeviceInfo {
            label: "CL_DEVICE_VENDOR",
            ..
        }
    ));
}

#[test]
fn device_count_failure_aborts_only_the_device_section() {
    let rt = SoftwareRuntime::new()
        .with_platform(SoftwarePlatform::new("P", "V"))
        .fail_device_count(CL_INVALID_VALUE);

    let (report, summary) = run(&rt);

    assert!(report.contains("EXTENSIONS:"));
    assert!(!report.contains("No devices were found."));
    assert_eq!(summary.failures.len(), 1);
    assert!(matches!(summary.failures[0], ProbeError::DeviceCount { .. }));
    assert_eq!(summary.exit_code(), 2);
}

#[test]
fn platform_count_failure_is_fatal() {
    let rt = SoftwareRuntime::new().fail_platform_count(CL_INVALID_VALUE);
    let mut out = Vec::new();
    let err = probe(&rt, &mut out).unwrap_err();
    assert!(matches!(
        err,
        ProbeError::PlatformCount {
            status: ClStatus(CL_INVALID_VALUE)
        }
    ));
    assert_eq!(err.exit_code(), 1);
    assert!(out.is_empty());
}

#[test]
fn first_failure_decides_the_exit_code() {
    let summary = clprobe_driver::ProbeSummary {
        platform_count: 2,
        device_count: 0,
        failures: vec![
            ProbeError::DeviceCount {
                status: ClStatus(CL_INVALID_VALUE),
            },
            ProbeError::DeviceInfo {
                label: "CL_DEVICE_NAME",
                status: ClStatus(CL_INVALID_VALUE),
            },
        ],
    };
    assert_eq!(summary.exit_code(), 2);
}

#[test]
#[ignore] // Requires an installed OpenCL stack
fn system_runtime_probes_real_hardware() {
    let rt = SystemRuntime::load().expect("OpenCL library");
    let mut out = Vec::new();
    let summary = probe(&rt, &mut out).expect("probe");
    println!("{}", String::from_utf8_lossy(&out));
    println!("platforms: {}", summary.platform_count);
}
