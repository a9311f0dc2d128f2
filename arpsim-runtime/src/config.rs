use arpsim_packets::MacAddr;
use std::net::Ipv4Addr;

/// The addresses the resolution core answers for. The cache uses them to short-circuit
/// lookups of the interface's own address, and the encoder stamps them into the sender
/// fields of every frame it emits.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InterfaceConfig {
    pub ip_addr: Ipv4Addr,
    pub mac_addr: MacAddr,
}

impl InterfaceConfig {
    pub fn new(ip_addr: Ipv4Addr, mac_addr: MacAddr) -> Self {
        InterfaceConfig { ip_addr, mac_addr }
    }
}
