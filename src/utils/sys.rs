use once_cell::sync::Lazy;
use sysinfo::{CpuExt, System, SystemExt};

use crate::meta::SystemInfo;

#[cfg(target_os = "linux")]
fn get_logged_in_users() -> anyhow::Result<Vec<String>> {
    use std::process::Command;

    let output = Command::new("users").output()?;
    let mut users = String::from_utf8_lossy(&output.stdout)
        .split_whitespace()
        .map(|s| s.to_owned())
        .collect::<Vec<_>>();
    users.sort();
    users.dedup();
    Ok(users)
}

fn collect_system_info() -> SystemInfo {
    let mut sys = System::new_all();
    sys.refresh_all();
    const UNKNOWN: &str = "<unknown>";
    SystemInfo {
        host: sys.host_name().unwrap_or(UNKNOWN.to_string()),
        os: sys.long_os_version().unwrap_or(UNKNOWN.to_string()),
        arch: std::env::consts::ARCH.to_string(),
        kernel: sys.kernel_version().unwrap_or(UNKNOWN.to_string()),
        cpu_model: sys.global_cpu_info().brand().to_owned(),
        cpus: sys.cpus().len(),
        memory_size: sys.total_memory() as usize,
        #[cfg(target_os = "linux")]
        users: get_logged_in_users().unwrap_or_default(),
        pid: std::process::id() as usize,
    }
}

static SYSTEM_INFO: Lazy<SystemInfo> = Lazy::new(collect_system_info);

/// Snapshot of the current machine, collected once per process.
pub fn get_current_system_info() -> SystemInfo {
    SYSTEM_INFO.clone()
}
