//! Framebuffer device discovery
//!
//! On hardware the LED matrix is one of the `/dev/fbN` framebuffers; the
//! kernel names it [`SENSE_HAT_FB_NAME`] under `/sys/class/graphics/fbN/name`.
//! Without hardware, the Sense HAT emulator exposes the same 128-byte layout
//! as a shared memory file at [`EMULATOR_SCREEN`].
//!
//! ## Example
//!
//! ```rust,no_run
//! use sense_hat_led::{DeviceLocator, Display};
//!
//! let located = DeviceLocator::default().locate();
//! let found = located.is_some();
//!
//! // Without a device every write is a silent no-op
//! let display = Display::from_located(located);
//! assert_eq!(display.is_attached(), found);
//! ```

use std::fs;
use std::path::{Path, PathBuf};

/// Name the kernel driver gives the Sense HAT framebuffer
pub const SENSE_HAT_FB_NAME: &str = "RPi-Sense FB";

/// Default sysfs directory listing framebuffers
pub const SYSFS_GRAPHICS: &str = "/sys/class/graphics";

/// Default directory holding framebuffer device nodes
pub const DEV_ROOT: &str = "/dev";

/// Emulator screen file
pub const EMULATOR_SCREEN: &str = "/dev/shm/rpi-sense-emu-screen";

/// Where a device was found
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DeviceKind {
    /// A kernel framebuffer driven by the Sense HAT
    Hardware,
    /// The emulator's shared memory screen
    Emulator,
}

/// A framebuffer ready to be opened
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LocatedDevice {
    /// Path to write frames to
    pub path: PathBuf,
    /// Whether the path is hardware or the emulator
    pub kind: DeviceKind,
}

/// Searches the filesystem for the LED matrix framebuffer
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DeviceLocator {
    sysfs_graphics: PathBuf,
    dev_root: PathBuf,
    emulator_screen: PathBuf,
}

impl Default for DeviceLocator {
    fn default() -> Self {
        Self {
            sysfs_graphics: PathBuf::from(SYSFS_GRAPHICS),
            dev_root: PathBuf::from(DEV_ROOT),
            emulator_screen: PathBuf::from(EMULATOR_SCREEN),
        }
    }
}

impl DeviceLocator {
    /// Locator using the system paths
    pub fn new() -> Self {
        Self::default()
    }

    /// Scan `path` instead of [`SYSFS_GRAPHICS`]
    pub fn sysfs_graphics(mut self, path: impl Into<PathBuf>) -> Self {
        self.sysfs_graphics = path.into();
        self
    }

    /// Resolve device nodes under `path` instead of [`DEV_ROOT`]
    pub fn dev_root(mut self, path: impl Into<PathBuf>) -> Self {
        self.dev_root = path.into();
        self
    }

    /// Fall back to `path` instead of [`EMULATOR_SCREEN`]
    pub fn emulator_screen(mut self, path: impl Into<PathBuf>) -> Self {
        self.emulator_screen = path.into();
        self
    }

    /// Find the framebuffer, preferring hardware over the emulator
    ///
    /// Framebuffers are checked in order from `fb0`; the scan ends at the
    /// first one without a readable `name`.
    pub fn locate(&self) -> Option<LocatedDevice> {
        if let Some(path) = self.scan_hardware() {
            log::debug!("found Sense HAT framebuffer at {}", path.display());
            return Some(LocatedDevice {
                path,
                kind: DeviceKind::Hardware,
            });
        }
        if self.emulator_screen.exists() {
            log::debug!(
                "using emulator screen at {}",
                self.emulator_screen.display()
            );
            return Some(LocatedDevice {
                path: self.emulator_screen.clone(),
                kind: DeviceKind::Emulator,
            });
        }
        log::warn!("no Sense HAT framebuffer or emulator screen found");
        None
    }

    fn scan_hardware(&self) -> Option<PathBuf> {
        (0..)
            .map_while(|n| fb_name(&self.sysfs_graphics, n).map(|name| (n, name)))
            .find(|(_, name)| name.contains(SENSE_HAT_FB_NAME))
            .map(|(n, _)| self.dev_root.join(format!("fb{n}")))
    }
}

fn fb_name(sysfs: &Path, n: u32) -> Option<String> {
    let path = sysfs.join(format!("fb{n}")).join("name");
    match fs::read_to_string(&path) {
        Ok(name) => {
            log::trace!("fb{n} is {:?}", name.trim_end());
            Some(name)
        }
        Err(_) => None,
    }
}
