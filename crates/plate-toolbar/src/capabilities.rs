use std::collections::{BTreeSet, HashMap, HashSet};

/// Host-provided table of the commands currently available, by name.
///
/// Anything the table does not positively know about counts as absent.
pub trait Capabilities {
    fn has(&self, name: &str) -> bool;
}

impl<T: Capabilities + ?Sized> Capabilities for &T {
    fn has(&self, name: &str) -> bool {
        (**self).has(name)
    }
}

impl Capabilities for HashSet<String> {
    fn has(&self, name: &str) -> bool {
        self.contains(name)
    }
}

impl Capabilities for BTreeSet<String> {
    fn has(&self, name: &str) -> bool {
        self.contains(name)
    }
}

/// `false` entries are treated like missing ones.
impl Capabilities for HashMap<String, bool> {
    fn has(&self, name: &str) -> bool {
        self.get(name).copied().unwrap_or(false)
    }
}

impl Capabilities for [&str] {
    fn has(&self, name: &str) -> bool {
        self.iter().any(|candidate| *candidate == name)
    }
}

impl<const N: usize> Capabilities for [&str; N] {
    fn has(&self, name: &str) -> bool {
        self.as_slice().has(name)
    }
}

/// Every command is available.
#[derive(Debug, Clone, Copy, Default)]
pub struct AllCapabilities;

impl Capabilities for AllCapabilities {
    fn has(&self, _name: &str) -> bool {
        true
    }
}
