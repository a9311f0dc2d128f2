use crate::component::{Component, LookupReply};
use crate::config::InterfaceConfig;
use arpsim_packets::MacAddr;
use std::net::Ipv4Addr;

/// The single remembered table resolution. Broadcast, local and multicast answers are
/// computed, not stored, so one entry is all the cache keeps.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CacheEntry {
    pub ip: Ipv4Addr,
    pub mac: MacAddr,
}

#[derive(Clone, Debug, Default)]
pub struct CacheInputs {
    /// Address the client wants resolved.
    pub request: Option<Ipv4Addr>,
    /// Client readiness for the answer.
    pub answer_ready: bool,
    /// The table accepted the query on offer this tick.
    pub query_taken: bool,
    /// The table delivered its reply this tick.
    pub reply: Option<LookupReply>,
}

#[derive(Clone, Debug, Default)]
pub struct CacheOutputs {
    pub request_taken: bool,
    /// The completed resolution, on the tick the client takes it.
    pub answer: Option<LookupReply>,
}

enum CacheState {
    Idle,
    /// Query on offer to the table, not yet accepted.
    Querying(Ipv4Addr),
    /// Query accepted; waiting on the table's reply.
    AwaitingReply(Ipv4Addr),
}

/// The fast path in front of the table.
///
/// One lookup is in flight end to end. On the acceptance tick the cache answers directly
/// when a rule applies, in priority order: the all-ones broadcast address maps to the
/// broadcast MAC, the configured local address to the local MAC, any multicast address to
/// its derived group MAC, and the single cached entry to its remembered MAC. Everything
/// else goes to the table, and a found reply becomes the new cached entry on its way
/// through. A not-found reply is relayed with the MAC zeroed and caches nothing.
pub struct ArpCache {
    config: InterfaceConfig,
    entry: Option<CacheEntry>,
    state: CacheState,
    answer_out: Option<LookupReply>,
}

impl ArpCache {
    pub fn new(config: InterfaceConfig) -> Self {
        ArpCache {
            config,
            entry: None,
            state: CacheState::Idle,
            answer_out: None,
        }
    }

    /// The query the cache wants the table to serve, while one is on offer.
    pub fn query_offer(&self) -> Option<Ipv4Addr> {
        match self.state {
            CacheState::Querying(ip) => Some(ip),
            _ => None,
        }
    }

    /// True while the cache waits on a table reply; doubles as its ready toward the table.
    pub fn awaiting_reply(&self) -> bool {
        match self.state {
            CacheState::AwaitingReply(_) => true,
            _ => false,
        }
    }

    /// True when a new lookup would be accepted on the next step.
    pub fn request_ready(&self) -> bool {
        match self.state {
            CacheState::Idle => self.answer_out.is_none(),
            _ => false,
        }
    }

    fn rule_answer(&self, ip: Ipv4Addr) -> Option<MacAddr> {
        if ip == Ipv4Addr::BROADCAST {
            return Some(MacAddr::BROADCAST);
        }
        if ip == self.config.ip_addr {
            return Some(self.config.mac_addr);
        }
        if ip.is_multicast() {
            return Some(MacAddr::ipv4_multicast(ip));
        }
        match self.entry {
            Some(entry) if entry.ip == ip => Some(entry.mac),
            _ => None,
        }
    }
}

impl Component for ArpCache {
    type Inputs = CacheInputs;
    type Outputs = CacheOutputs;

    fn step(&mut self, inputs: CacheInputs) -> CacheOutputs {
        let mut outputs = CacheOutputs::default();
        let idle = self.request_ready();

        // A held answer leaves as soon as the client is ready for it.
        if inputs.answer_ready {
            outputs.answer = self.answer_out.take();
        }

        // Table-side progress.
        match self.state {
            CacheState::Idle => {}
            CacheState::Querying(ip) => {
                if inputs.query_taken {
                    self.state = CacheState::AwaitingReply(ip);
                }
            }
            CacheState::AwaitingReply(ip) => {
                if let Some(reply) = inputs.reply {
                    if reply.found {
                        self.entry = Some(CacheEntry { ip, mac: reply.mac });
                        self.answer_out = Some(reply);
                    } else {
                        // A miss is relayed with the slot's leftover MAC scrubbed.
                        self.answer_out = Some(LookupReply {
                            mac: MacAddr::ZERO,
                            found: false,
                        });
                    }
                    self.state = CacheState::Idle;
                }
            }
        }

        // New lookups are taken only from a tick that began fully idle.
        if idle {
            if let Some(ip) = inputs.request {
                outputs.request_taken = true;
                match self.rule_answer(ip) {
                    Some(mac) => {
                        let answer = LookupReply { mac, found: true };
                        if inputs.answer_ready {
                            outputs.answer = Some(answer);
                        } else {
                            self.answer_out = Some(answer);
                        }
                    }
                    None => self.state = CacheState::Querying(ip),
                }
            }
        }

        outputs
    }

    fn reset(&mut self) {
        self.entry = None;
        self.state = CacheState::Idle;
        self.answer_out = None;
    }
}
