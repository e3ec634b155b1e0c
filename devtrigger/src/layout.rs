//! Device tree locations as configuration.
//!
//! Control files live in two conventional sysfs hierarchies:
//!
//! - class: `<class_root>/<subsystem>/<device>/uevent`
//! - bus: `<bus_root>/<subsystem>/devices/<device>/uevent`
//!
//! The roots are configuration rather than hardcoded constants so tests can
//! point the engine at a fabricated tree, and so containers with a relocated
//! sysfs mount still work.

/// Locations of the two hierarchies that expose uevent control files.
#[derive(Debug, Clone)]
pub struct SysfsLayout {
    /// Device-class hierarchy (conventionally `/sys/class`).
    pub class_root: String,

    /// Bus hierarchy (conventionally `/sys/bus`).
    pub bus_root: String,
}

impl SysfsLayout {
    /// Layout under an alternate sysfs mount point.
    pub fn rooted_at(root: &str) -> Self {
        let root = root.trim_end_matches('/');
        Self {
            class_root: format!("{}/class", root),
            bus_root: format!("{}/bus", root),
        }
    }

}

impl Default for SysfsLayout {
    fn default() -> Self {
        Self::rooted_at("/sys")
    }
}
