//! Selection-pattern expansion against the device tree.
//!
//! A pattern like `net` or `usb*` selects subsystems; resolution expands it
//! into the concrete set of uevent control files currently present. Both
//! sysfs hierarchies are searched: a device class and a bus-driven device
//! enumeration are not the same tree, and a subsystem may appear in either.

use std::path::PathBuf;

use glob::{glob, Paths};
use tracing::debug;

use crate::error::TriggerError;
use crate::layout::SysfsLayout;

/// Point-in-time snapshot of the control-file paths matching a pattern.
///
/// Never cached across invocations; the device tree can change between runs.
#[derive(Debug, Default)]
pub struct Resolution {
    /// Matched uevent paths, class hierarchy first, each hierarchy in its
    /// own enumeration order. Order carries no meaning to the kernel.
    pub paths: Vec<PathBuf>,

    /// Enumeration of some directory hit a real error (not "no matches").
    /// The paths that were found are still valid; results are partial.
    pub degraded: bool,
}

/// Expand `pattern` into the set of uevent control files currently present.
///
/// An empty expansion is not an error: the target subsystem may simply be
/// absent on this machine. The only fatal condition is a pattern that
/// cannot be formed into a glob expression; it is rejected before any
/// filesystem access.
pub fn resolve(layout: &SysfsLayout, pattern: &str) -> Result<Resolution, TriggerError> {
    if pattern.is_empty() {
        return Ok(Resolution::default());
    }
    validate_pattern(pattern)?;

    let class_expr = format!("{}/{}/*/uevent", layout.class_root, pattern);
    let bus_expr = format!("{}/{}/devices/*/uevent", layout.bus_root, pattern);

    // Compile both expressions up front so a malformed pattern is rejected
    // before the first hierarchy is touched
    let class_paths = compile(pattern, &class_expr)?;
    let bus_paths = compile(pattern, &bus_expr)?;

    let mut resolution = Resolution::default();
    expand(class_paths, &mut resolution);
    expand(bus_paths, &mut resolution);

    debug!(
        pattern,
        matched = resolution.paths.len(),
        degraded = resolution.degraded,
        "resolved selection pattern"
    );

    Ok(resolution)
}

/// A pattern must stay inside its hierarchy level: one path component, no
/// embedded NUL. Length is unbounded; paths are grown dynamically.
fn validate_pattern(pattern: &str) -> Result<(), TriggerError> {
    if pattern.contains('/') || pattern.contains('\0') {
        return Err(TriggerError::PatternInvalid {
            pattern: pattern.to_string(),
            detail: "pattern must be a single path component".to_string(),
        });
    }
    Ok(())
}

fn compile(pattern: &str, expr: &str) -> Result<Paths, TriggerError> {
    glob(expr).map_err(|e| TriggerError::PatternInvalid {
        pattern: pattern.to_string(),
        detail: e.to_string(),
    })
}

fn expand(entries: Paths, resolution: &mut Resolution) {
    for entry in entries {
        match entry {
            Ok(path) => resolution.paths.push(path),
            Err(e) => {
                // Unreadable directory mid-walk; keep whatever else matches
                debug!(error = %e, "skipping unreadable device tree entry");
                resolution.degraded = true;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;
    use std::fs;
    use std::path::Path;
    use tempfile::{tempdir, TempDir};

    fn fake_tree() -> (TempDir, SysfsLayout) {
        let dir = tempdir().unwrap();
        let layout = SysfsLayout::rooted_at(dir.path().to_str().unwrap());
        (dir, layout)
    }

    fn add_class_device(layout: &SysfsLayout, subsystem: &str, device: &str) {
        let dir = Path::new(&layout.class_root).join(subsystem).join(device);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("uevent"), "").unwrap();
    }

    fn add_bus_device(layout: &SysfsLayout, subsystem: &str, device: &str) {
        let dir = Path::new(&layout.bus_root)
            .join(subsystem)
            .join("devices")
            .join(device);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("uevent"), "").unwrap();
    }

    fn path_set(resolution: &Resolution) -> BTreeSet<PathBuf> {
        resolution.paths.iter().cloned().collect()
    }

    #[test]
    fn test_wildcard_spans_both_hierarchies() {
        let (_dir, layout) = fake_tree();
        add_class_device(&layout, "net", "eth0");
        add_class_device(&layout, "block", "sda");
        add_bus_device(&layout, "pci", "0000:00:01.0");

        let resolution = resolve(&layout, "*").unwrap();
        assert_eq!(resolution.paths.len(), 3);
        assert!(!resolution.degraded);
    }

    #[test]
    fn test_scoped_pattern_stays_in_scope() {
        let (_dir, layout) = fake_tree();
        add_class_device(&layout, "widgets", "w0");
        add_class_device(&layout, "gadgets", "g0");
        add_bus_device(&layout, "gadgets", "g1");

        let resolution = resolve(&layout, "widgets").unwrap();
        assert_eq!(resolution.paths.len(), 1);
        for path in &resolution.paths {
            assert!(!path.to_string_lossy().contains("gadgets"));
        }
    }

    #[test]
    fn test_wildcard_is_union_of_subsystems() {
        let (_dir, layout) = fake_tree();
        add_class_device(&layout, "net", "eth0");
        add_class_device(&layout, "block", "sda");
        add_bus_device(&layout, "usb", "1-1");

        let all = path_set(&resolve(&layout, "*").unwrap());
        let mut union = BTreeSet::new();
        for subsystem in ["net", "block", "usb"] {
            union.extend(path_set(&resolve(&layout, subsystem).unwrap()));
        }
        assert_eq!(all, union);
    }

    #[test]
    fn test_no_match_is_not_an_error() {
        let (_dir, layout) = fake_tree();
        add_class_device(&layout, "net", "eth0");

        let resolution = resolve(&layout, "nonexistent-class").unwrap();
        assert!(resolution.paths.is_empty());
        assert!(!resolution.degraded);
    }

    #[test]
    fn test_empty_pattern_resolves_to_empty_set() {
        let (_dir, layout) = fake_tree();
        add_class_device(&layout, "net", "eth0");

        let resolution = resolve(&layout, "").unwrap();
        assert!(resolution.paths.is_empty());
    }

    #[test]
    fn test_pattern_with_separator_is_invalid() {
        let (_dir, layout) = fake_tree();

        let err = resolve(&layout, "net/../../etc").unwrap_err();
        assert!(matches!(err, TriggerError::PatternInvalid { .. }));
    }

    #[test]
    fn test_pattern_with_nul_is_invalid() {
        let (_dir, layout) = fake_tree();

        let err = resolve(&layout, "net\0").unwrap_err();
        assert!(matches!(err, TriggerError::PatternInvalid { .. }));
    }

    #[test]
    fn test_malformed_glob_is_invalid() {
        let (_dir, layout) = fake_tree();

        // An unclosed character class cannot be compiled
        let err = resolve(&layout, "[net").unwrap_err();
        assert!(matches!(err, TriggerError::PatternInvalid { .. }));
    }

    #[test]
    fn test_resolution_is_idempotent() {
        let (_dir, layout) = fake_tree();
        add_class_device(&layout, "net", "eth0");
        add_class_device(&layout, "net", "wlan0");
        add_bus_device(&layout, "pci", "0000:00:01.0");

        let first = path_set(&resolve(&layout, "*").unwrap());
        let second = path_set(&resolve(&layout, "*").unwrap());
        assert_eq!(first, second);
    }

    #[test]
    #[cfg(unix)]
    fn test_unreadable_directory_degrades_resolution() {
        use std::os::unix::fs::PermissionsExt;

        let (_dir, layout) = fake_tree();
        add_class_device(&layout, "net", "eth0");
        add_class_device(&layout, "secret", "s0");

        let secret = Path::new(&layout.class_root).join("secret");
        fs::set_permissions(&secret, fs::Permissions::from_mode(0o000)).unwrap();

        // Running with CAP_DAC_OVERRIDE (root) makes the directory readable
        // anyway; nothing to observe in that case
        if fs::read_dir(&secret).is_ok() {
            fs::set_permissions(&secret, fs::Permissions::from_mode(0o755)).unwrap();
            return;
        }

        let resolution = resolve(&layout, "*").unwrap();
        assert!(resolution.degraded);
        // The readable subsystem still contributes its paths
        assert!(resolution
            .paths
            .iter()
            .any(|p| p.to_string_lossy().contains("net")));

        fs::set_permissions(&secret, fs::Permissions::from_mode(0o755)).unwrap();
    }
}
