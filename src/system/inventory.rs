//! Platform hardware inventory
//!
//! Each OS family exposes its hardware through different command-line
//! tools. The inventory layer runs those tools and stores their stdout
//! verbatim; the raw text goes into the report untouched. Output is never
//! parsed into structured fields here.
//!
//! A failing or missing command yields an explanatory placeholder string
//! in its capture slot and the run continues.

use serde::{Deserialize, Serialize};
use std::process::{Command, Stdio};

/// Captured output of one external command
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommandCapture {
    /// Short label identifying the capture within its section
    pub label: String,
    /// The command line that was executed
    pub command: String,
    /// Raw stdout, or a placeholder describing the failure
    pub output: String,
}

/// One inventory category (storage, gpu, battery, display, thermal)
/// as a list of raw command captures
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InventorySection {
    /// Human-readable description of where this data came from
    pub source: String,
    /// Ordered command captures
    pub captures: Vec<CommandCapture>,
    /// Set when the whole category is unavailable on this platform
    pub error: Option<String>,
}

impl InventorySection {
    /// Section built from a list of captures
    pub fn from_captures(source: impl Into<String>, captures: Vec<CommandCapture>) -> Self {
        Self {
            source: source.into(),
            captures,
            error: None,
        }
    }

    /// Section for a category this platform cannot provide
    pub fn unavailable(source: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            captures: Vec::new(),
            error: Some(reason.into()),
        }
    }
}

/// Run one external command and capture its stdout as text.
///
/// Non-zero exit or a missing binary never escapes: the capture slot gets
/// a placeholder string instead.
pub fn capture(label: &str, program: &str, args: &[&str]) -> CommandCapture {
    let command_line = if args.is_empty() {
        program.to_string()
    } else {
        format!("{} {}", program, args.join(" "))
    };

    let output = match Command::new(program)
        .args(args)
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
    {
        Ok(out) if out.status.success() => String::from_utf8_lossy(&out.stdout).into_owned(),
        Ok(out) => {
            let stderr = String::from_utf8_lossy(&out.stderr);
            tracing::debug!(command = %command_line, status = %out.status, "inventory command failed");
            format!(
                "'{}' exited with {}: {}",
                command_line,
                out.status,
                stderr.trim()
            )
        }
        Err(e) => {
            tracing::debug!(command = %command_line, error = %e, "inventory command unavailable");
            format!("'{}' not available: {}", command_line, e)
        }
    };

    CommandCapture {
        label: label.to_string(),
        command: command_line,
        output,
    }
}

/// Capability interface over the per-platform inventory commands.
///
/// One implementation exists per OS family; `provider_for_host` selects
/// it once at startup from the detected platform.
pub trait InventoryProvider: Send + Sync {
    /// OS family this provider targets
    fn os_family(&self) -> &'static str;
    /// Disk and volume listing
    fn storage(&self) -> InventorySection;
    /// Graphics adapter listing
    fn gpu(&self) -> InventorySection;
    /// Battery and power state
    fn battery(&self) -> InventorySection;
    /// Display/monitor information
    fn display(&self) -> InventorySection;
    /// Temperature sensors
    fn thermal(&self) -> InventorySection;
}

/// Select the inventory provider for the running host
pub fn provider_for_host() -> Box<dyn InventoryProvider> {
    match std::env::consts::OS {
        "windows" => Box::new(WindowsInventory),
        "macos" => Box::new(MacosInventory),
        _ => Box::new(UnixInventory),
    }
}

/// Inventory via `wmic` queries
pub struct WindowsInventory;

impl InventoryProvider for WindowsInventory {
    fn os_family(&self) -> &'static str {
        "windows"
    }

    fn storage(&self) -> InventorySection {
        InventorySection::from_captures(
            "Windows storage inventory",
            vec![
                capture(
                    "logical_disks",
                    "wmic",
                    &["logicaldisk", "get", "size,freespace,caption,drivetype,filesystem"],
                ),
                capture(
                    "disk_drives",
                    "wmic",
                    &["diskdrive", "get", "model,size,status,interfacetype"],
                ),
            ],
        )
    }

    fn gpu(&self) -> InventorySection {
        InventorySection::from_captures(
            "Windows GPU inventory",
            vec![capture(
                "video_controller",
                "wmic",
                &[
                    "path",
                    "win32_VideoController",
                    "get",
                    "name,adapterram,driverversion",
                ],
            )],
        )
    }

    fn battery(&self) -> InventorySection {
        InventorySection::from_captures(
            "Windows battery inventory",
            vec![capture(
                "battery",
                "wmic",
                &[
                    "path",
                    "Win32_Battery",
                    "get",
                    "BatteryStatus,EstimatedChargeRemaining,EstimatedRunTime,DesignCapacity",
                ],
            )],
        )
    }

    fn display(&self) -> InventorySection {
        InventorySection::from_captures(
            "Windows display inventory",
            vec![capture(
                "resolution",
                "wmic",
                &[
                    "path",
                    "Win32_VideoController",
                    "get",
                    "CurrentHorizontalResolution,CurrentVerticalResolution,MaxRefreshRate",
                ],
            )],
        )
    }

    fn thermal(&self) -> InventorySection {
        InventorySection::unavailable(
            "Windows thermal inventory",
            "temperature monitoring requires additional tools on Windows",
        )
    }
}

/// Inventory via `diskutil`, `system_profiler`, `pmset`
pub struct MacosInventory;

impl InventoryProvider for MacosInventory {
    fn os_family(&self) -> &'static str {
        "macos"
    }

    fn storage(&self) -> InventorySection {
        InventorySection::from_captures(
            "macOS storage inventory",
            vec![
                capture("diskutil", "diskutil", &["list"]),
                capture("df", "df", &["-h"]),
            ],
        )
    }

    fn gpu(&self) -> InventorySection {
        InventorySection::from_captures(
            "macOS GPU inventory",
            vec![capture(
                "system_profiler",
                "system_profiler",
                &["SPDisplaysDataType"],
            )],
        )
    }

    fn battery(&self) -> InventorySection {
        InventorySection::from_captures(
            "macOS battery inventory",
            vec![
                capture("pmset", "pmset", &["-g", "batt"]),
                capture("power_profile", "system_profiler", &["SPPowerDataType"]),
            ],
        )
    }

    fn display(&self) -> InventorySection {
        InventorySection::from_captures(
            "macOS display inventory",
            vec![capture(
                "system_profiler",
                "system_profiler",
                &["SPDisplaysDataType"],
            )],
        )
    }

    fn thermal(&self) -> InventorySection {
        // powermetrics needs root; unprivileged runs flow into the
        // placeholder path like any other failing command.
        InventorySection::from_captures(
            "macOS thermal inventory",
            vec![capture(
                "powermetrics",
                "powermetrics",
                &["-n", "1", "-s", "smc"],
            )],
        )
    }
}

/// Inventory via the usual Linux/BSD command set plus /sys pseudo-files
pub struct UnixInventory;

impl InventoryProvider for UnixInventory {
    fn os_family(&self) -> &'static str {
        "unix"
    }

    fn storage(&self) -> InventorySection {
        InventorySection::from_captures(
            "Linux storage inventory",
            vec![
                capture("lsblk", "lsblk", &["-f"]),
                capture("df", "df", &["-h"]),
                capture("fdisk", "fdisk", &["-l"]),
            ],
        )
    }

    fn gpu(&self) -> InventorySection {
        InventorySection::from_captures(
            "Linux GPU inventory",
            vec![Self::capture_lspci_vga(), Self::capture_glxinfo()],
        )
    }

    fn battery(&self) -> InventorySection {
        InventorySection::from_captures(
            "Linux battery inventory",
            vec![capture("acpi", "acpi", &["-b"]), Self::capture_upower()],
        )
    }

    fn display(&self) -> InventorySection {
        InventorySection::from_captures(
            "Linux display inventory",
            vec![capture("xrandr", "xrandr", &[])],
        )
    }

    fn thermal(&self) -> InventorySection {
        InventorySection::from_captures(
            "Linux thermal inventory",
            vec![capture("sensors", "sensors", &[]), Self::thermal_zones()],
        )
    }
}

impl UnixInventory {
    /// lspci output trimmed to display-class devices (still raw lines)
    fn capture_lspci_vga() -> CommandCapture {
        let mut cap = capture("lspci", "lspci", &[]);
        if cap.output.lines().count() > 1 {
            let vga_lines: Vec<&str> = cap
                .output
                .lines()
                .filter(|line| {
                    let lower = line.to_lowercase();
                    lower.contains("vga")
                        || lower.contains("3d controller")
                        || lower.contains("display controller")
                })
                .collect();
            cap.output = if vga_lines.is_empty() {
                "no display-class device reported by lspci".to_string()
            } else {
                vga_lines.join("\n")
            };
        }
        cap
    }

    /// glxinfo header (first 20 lines, matching the interesting preamble)
    fn capture_glxinfo() -> CommandCapture {
        let mut cap = capture("glxinfo", "glxinfo", &[]);
        cap.output = cap
            .output
            .lines()
            .take(20)
            .collect::<Vec<_>>()
            .join("\n");
        cap
    }

    /// Battery details via upower: enumerate devices, then query the
    /// first battery path found
    fn capture_upower() -> CommandCapture {
        let enumerate = capture("upower_enumerate", "upower", &["-e"]);
        let battery_path = enumerate
            .output
            .lines()
            .find(|line| line.contains("BAT") || line.contains("battery"))
            .map(str::trim)
            .map(str::to_string);

        match battery_path {
            Some(path) => capture("upower", "upower", &["-i", &path]),
            None => CommandCapture {
                label: "upower".to_string(),
                command: "upower -i <battery>".to_string(),
                output: "UPower reported no battery device".to_string(),
            },
        }
    }

    /// Thermal zone pseudo-files, read directly without spawning a shell
    fn thermal_zones() -> CommandCapture {
        let mut readings = Vec::new();

        if let Ok(entries) = std::fs::read_dir("/sys/class/thermal") {
            let mut zones: Vec<_> = entries
                .flatten()
                .filter(|e| e.file_name().to_string_lossy().starts_with("thermal_zone"))
                .collect();
            zones.sort_by_key(|e| e.file_name());

            for zone in zones {
                let name = zone.file_name().to_string_lossy().into_owned();
                if let Ok(raw) = std::fs::read_to_string(zone.path().join("temp")) {
                    readings.push(format!("{}: {}", name, raw.trim()));
                }
            }
        }

        CommandCapture {
            label: "thermal_zones".to_string(),
            command: "/sys/class/thermal/thermal_zone*/temp".to_string(),
            output: if readings.is_empty() {
                "thermal zones not accessible".to_string()
            } else {
                readings.join("\n")
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_binary_becomes_placeholder() {
        let cap = capture("bogus", "definitely-not-a-real-binary-9f2c", &["--version"]);
        assert!(cap.output.contains("not available"));
        assert_eq!(cap.label, "bogus");
    }

    #[cfg(unix)]
    #[test]
    fn test_capture_collects_stdout() {
        let cap = capture("echo", "echo", &["hello", "inventory"]);
        assert_eq!(cap.output.trim(), "hello inventory");
        assert_eq!(cap.command, "echo hello inventory");
    }

    #[test]
    fn test_provider_selection_matches_host() {
        let provider = provider_for_host();
        match std::env::consts::OS {
            "windows" => assert_eq!(provider.os_family(), "windows"),
            "macos" => assert_eq!(provider.os_family(), "macos"),
            _ => assert_eq!(provider.os_family(), "unix"),
        }
    }

    #[test]
    fn test_unavailable_section_has_error() {
        let section = InventorySection::unavailable("test", "no sensors here");
        assert!(section.captures.is_empty());
        assert_eq!(section.error.as_deref(), Some("no sensors here"));
    }

    #[test]
    fn test_inventory_runs_never_panic() {
        // Commands may all be missing in a minimal container; every
        // category must still come back as text.
        let provider = provider_for_host();
        for section in [
            provider.storage(),
            provider.gpu(),
            provider.battery(),
            provider.display(),
            provider.thermal(),
        ] {
            assert!(!section.source.is_empty());
            assert!(section.error.is_some() || !section.captures.is_empty());
        }
    }
}
