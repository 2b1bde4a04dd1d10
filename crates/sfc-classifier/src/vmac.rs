//! Virtual MAC addresses for MAC chaining.
//!
//! MAC chaining encodes the position of a packet in a chain in its
//! destination MAC: every (path, hop) pair owns one virtual MAC. The
//! builders only need the mapping to be deterministic, so it is injected
//! through [`VirtualMacTable`]; any `Fn(PathId, ServiceIndex) -> MacAddress`
//! closure is a table as well.

use sfc_types::{MacAddress, PathId, ServiceIndex};

/// Deterministic mapping from (path, hop) to a virtual MAC.
pub trait VirtualMacTable: Send + Sync {
    /// Returns the virtual MAC of `hop` on `path_id`.
    fn lookup(&self, path_id: PathId, hop: ServiceIndex) -> MacAddress;

    /// Returns a handle answering lookups for the forward direction of one path.
    fn forward_path(&self, path_id: PathId) -> PathMacs<'_, Self>
    where
        Self: Sized,
    {
        PathMacs {
            table: self,
            path_id,
        }
    }
}

impl<F> VirtualMacTable for F
where
    F: Fn(PathId, ServiceIndex) -> MacAddress + Send + Sync,
{
    fn lookup(&self, path_id: PathId, hop: ServiceIndex) -> MacAddress {
        self(path_id, hop)
    }
}

/// Per-path view of a [`VirtualMacTable`], indexed by hop.
pub struct PathMacs<'a, T> {
    table: &'a T,
    path_id: PathId,
}

impl<T: VirtualMacTable> PathMacs<'_, T> {
    pub fn path_id(&self) -> PathId {
        self.path_id
    }

    pub fn hop(&self, index: ServiceIndex) -> MacAddress {
        self.table.lookup(self.path_id, index)
    }
}

/// Default virtual MAC layout: `02:pp:pp:pp:pp:hh`.
///
/// Locally administered unicast, the path id big endian in octets 1-4 and
/// the hop index in the last octet.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VirtualMacGenerator;

impl VirtualMacGenerator {
    pub const fn new() -> Self {
        VirtualMacGenerator
    }
}

impl VirtualMacTable for VirtualMacGenerator {
    fn lookup(&self, path_id: PathId, hop: ServiceIndex) -> MacAddress {
        let [p0, p1, p2, p3] = path_id.to_be_bytes();
        MacAddress::new([0x02, p0, p1, p2, p3, hop])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_generator_layout() {
        let mac = VirtualMacGenerator.lookup(7, 3);
        assert_eq!(mac.to_string(), "02:00:00:00:07:03");
        assert!(mac.is_locally_administered());
        assert!(!mac.is_multicast());

        let mac = VirtualMacGenerator.lookup(0x0102_0304, 0xff);
        assert_eq!(mac.to_string(), "02:01:02:03:04:ff");
    }

    #[test]
    fn test_distinct_hops_and_paths() {
        let table = VirtualMacGenerator::new();
        assert_ne!(table.lookup(7, 0), table.lookup(7, 1));
        assert_ne!(table.lookup(7, 0), table.lookup(8, 0));
        assert_eq!(table.lookup(7, 0), table.lookup(7, 0));
    }

    #[test]
    fn test_forward_path_handle() {
        let table = VirtualMacGenerator::new();
        let path = table.forward_path(7);
        assert_eq!(path.path_id(), 7);
        assert_eq!(path.hop(2), table.lookup(7, 2));
    }

    #[test]
    fn test_closure_table() {
        let table = |path_id: PathId, hop: ServiceIndex| {
            MacAddress::new([0xaa, 0, 0, 0, path_id as u8, hop])
        };
        assert_eq!(
            table.forward_path(9).hop(1),
            MacAddress::new([0xaa, 0, 0, 0, 9, 1])
        );
    }
}
