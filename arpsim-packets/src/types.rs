use std::fmt;
use std::net::Ipv4Addr;

/// Packets are buffers of bytes. Frame types in this crate decorate one of
/// these buffers with accessors rather than copying fields out of it.
pub type PacketData = Vec<u8>;

pub trait Packet {}

pub const ARP_ETHER_TYPE: u16 = 0x0806;
pub const IPV4_ETHER_TYPE: u16 = 0x0800;

/// A 48-bit IEEE 802 MAC address.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct MacAddr {
    pub bytes: [u8; 6],
}

impl MacAddr {
    /// The all-ones broadcast address.
    pub const BROADCAST: MacAddr = MacAddr { bytes: [0xff; 6] };

    /// The all-zero address. ARP requests carry it in the target hardware
    /// field to mean "sought, not known".
    pub const ZERO: MacAddr = MacAddr { bytes: [0; 6] };

    pub fn new(bytes: [u8; 6]) -> MacAddr {
        MacAddr { bytes }
    }

    pub fn is_broadcast(self) -> bool {
        self == MacAddr::BROADCAST
    }

    pub fn is_zero(self) -> bool {
        self == MacAddr::ZERO
    }

    /// Maps an IPv4 multicast group onto its Ethernet group address: the
    /// 01:00:5e OUI, one zero bit, then the low 23 bits of the group.
    /// Callers are expected to have checked that `group` is in 224.0.0.0/4.
    pub fn ipv4_multicast(group: Ipv4Addr) -> MacAddr {
        let octets = group.octets();
        MacAddr::new([0x01, 0x00, 0x5e, octets[1] & 0x7f, octets[2], octets[3]])
    }
}

impl fmt::Display for MacAddr {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{:02x}:{:02x}:{:02x}:{:02x}:{:02x}:{:02x}",
            self.bytes[0], self.bytes[1], self.bytes[2], self.bytes[3], self.bytes[4], self.bytes[5]
        )
    }
}

impl fmt::Debug for MacAddr {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl From<[u8; 6]> for MacAddr {
    fn from(bytes: [u8; 6]) -> MacAddr {
        MacAddr::new(bytes)
    }
}
