use crate::component::Component;
use arpsim_packets::MacAddr;
use std::convert::TryInto;
use std::net::Ipv4Addr;

/// Number of slots in the table's backing store.
pub const TABLE_SLOTS: usize = 256;

/// Byte stride of one slot in the diagnostic address window.
pub const DIAG_SLOT_STRIDE: u32 = 0x10;

const DIAG_IP_ADDR_OFFSET: u32 = 0x0;
const DIAG_MAC_LSB_OFFSET: u32 = 0x4;
const DIAG_MAC_MSB_OFFSET: u32 = 0x8;
const DIAG_RESERVED_OFFSET: u32 = 0xC;

/// Ticks between a read being issued and its reply becoming valid.
const READ_LATENCY_TICKS: u8 = 2;

/// One entry of the backing store. Slots have no presence flag; a zeroed slot simply stores
/// the all-zero address, and a lookup counts as found when the stored address matches the
/// queried one exactly.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Slot {
    pub ip: Ipv4Addr,
    pub mac: MacAddr,
}

impl Default for Slot {
    fn default() -> Self {
        Slot {
            ip: Ipv4Addr::UNSPECIFIED,
            mac: MacAddr::ZERO,
        }
    }
}

/// What a lookup came back with. `found = false` means the slot the address hashes to holds
/// some other address; the MAC field then carries whatever the slot stored.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LookupReply {
    pub mac: MacAddr,
    pub found: bool,
}

/// The register fields each slot decomposes into on the diagnostic port.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SlotField {
    IpAddr,
    MacLsb,
    MacMsb,
}

#[derive(Clone, Debug, Default)]
pub struct TableInputs {
    /// Binding to store, replacing whatever its slot held.
    pub insert: Option<Slot>,
    /// Address to look up.
    pub query: Option<Ipv4Addr>,
    /// Starts the full-store clear sweep.
    pub clear: bool,
    /// Consumer readiness for the lookup reply.
    pub reply_ready: bool,
}

#[derive(Clone, Debug, Default)]
pub struct TableOutputs {
    pub insert_taken: bool,
    pub query_taken: bool,
    /// The completed lookup, on the tick the consumer takes it.
    pub reply: Option<LookupReply>,
    /// Single-tick pulse when the clear sweep finishes.
    pub clear_done: bool,
}

/// Returns the slot an address lives in: the XOR fold of its four octets.
pub fn slot_index(ip: Ipv4Addr) -> usize {
    let octets = ip.octets();
    ((octets[0] ^ octets[1]) ^ (octets[2] ^ octets[3])) as usize
}

/// A 256-slot direct-mapped store of address bindings behind a single-ported storage array.
///
/// Writes win the port on every tick they appear. A query that arrives alongside a write
/// still completes its handshake; the read itself is parked in a one-deep pending register
/// and issues on the next write-free tick. Only one lookup may be in flight end to end, a
/// read takes a fixed two ticks from issue to reply, and the reply is held until the
/// consumer is ready for it.
///
/// The diagnostic port is a second, always-available method group over the same storage.
/// It never touches the functional port's arbitration and keeps working during a clear
/// sweep, which is how the sweep's progress can be observed.
pub struct ArpTable {
    slots: Vec<Slot>,
    pending_read: Option<Ipv4Addr>,
    in_flight: Option<(LookupReply, u8)>,
    reply_out: Option<LookupReply>,
    clearing: Option<usize>,
}

impl ArpTable {
    pub fn new() -> Self {
        ArpTable {
            slots: vec![Slot::default(); TABLE_SLOTS],
            pending_read: None,
            in_flight: None,
            reply_out: None,
            clearing: None,
        }
    }

    /// True while the table accepts port operations, which is any tick outside a clear
    /// sweep.
    pub fn ready(&self) -> bool {
        self.clearing.is_none()
    }

    /// True when a fresh query would be accepted on the next step: no sweep running and no
    /// lookup anywhere between acceptance and reply delivery.
    pub fn query_ready(&self) -> bool {
        self.ready()
            && self.pending_read.is_none()
            && self.in_flight.is_none()
            && self.reply_out.is_none()
    }

    /// True while a completed reply is waiting for the consumer.
    pub fn reply_valid(&self) -> bool {
        self.reply_out.is_some()
    }

    fn issue_read(&mut self, ip: Ipv4Addr) {
        let slot = self.slots[slot_index(ip)];
        let reply = LookupReply {
            mac: slot.mac,
            found: slot.ip == ip,
        };
        self.in_flight = Some((reply, READ_LATENCY_TICKS));
    }

    pub fn diag_read(&self, slot: usize, field: SlotField) -> u32 {
        assert!(slot < TABLE_SLOTS, "diagnostic slot index must be below 256");
        let stored = self.slots[slot];
        match field {
            SlotField::IpAddr => u32::from(stored.ip),
            SlotField::MacLsb => u32::from_be_bytes(stored.mac.bytes[2..6].try_into().unwrap()),
            SlotField::MacMsb => {
                u32::from(u16::from_be_bytes(stored.mac.bytes[0..2].try_into().unwrap()))
            }
        }
    }

    pub fn diag_write(&mut self, slot: usize, field: SlotField, value: u32) {
        assert!(slot < TABLE_SLOTS, "diagnostic slot index must be below 256");
        let stored = &mut self.slots[slot];
        match field {
            SlotField::IpAddr => stored.ip = Ipv4Addr::from(value),
            SlotField::MacLsb => stored.mac.bytes[2..6].copy_from_slice(&value.to_be_bytes()),
            // The upper half word of the MSB register is reserved; writes to it are masked.
            SlotField::MacMsb => stored.mac.bytes[0..2].copy_from_slice(&(value as u16).to_be_bytes()),
        }
    }

    /// Reads the diagnostic window by byte address: each slot takes a 16-byte stride with
    /// `IpAddr` at 0x0, `MacLsb` at 0x4, `MacMsb` at 0x8 and a reserved word at 0xC that
    /// reads zero.
    pub fn diag_read_addr(&self, addr: u32) -> Result<u32, &'static str> {
        let slot = (addr / DIAG_SLOT_STRIDE) as usize;
        if slot >= TABLE_SLOTS {
            return Err("Diagnostic address is past the last slot");
        }
        match addr % DIAG_SLOT_STRIDE {
            DIAG_IP_ADDR_OFFSET => Ok(self.diag_read(slot, SlotField::IpAddr)),
            DIAG_MAC_LSB_OFFSET => Ok(self.diag_read(slot, SlotField::MacLsb)),
            DIAG_MAC_MSB_OFFSET => Ok(self.diag_read(slot, SlotField::MacMsb)),
            DIAG_RESERVED_OFFSET => Ok(0),
            _ => Err("Diagnostic address is not 32-bit aligned"),
        }
    }

    /// Writes the diagnostic window by byte address. Writes to the reserved word are
    /// accepted and ignored.
    pub fn diag_write_addr(&mut self, addr: u32, value: u32) -> Result<(), &'static str> {
        let slot = (addr / DIAG_SLOT_STRIDE) as usize;
        if slot >= TABLE_SLOTS {
            return Err("Diagnostic address is past the last slot");
        }
        match addr % DIAG_SLOT_STRIDE {
            DIAG_IP_ADDR_OFFSET => self.diag_write(slot, SlotField::IpAddr, value),
            DIAG_MAC_LSB_OFFSET => self.diag_write(slot, SlotField::MacLsb, value),
            DIAG_MAC_MSB_OFFSET => self.diag_write(slot, SlotField::MacMsb, value),
            DIAG_RESERVED_OFFSET => {}
            _ => return Err("Diagnostic address is not 32-bit aligned"),
        }
        Ok(())
    }
}

impl Default for ArpTable {
    fn default() -> Self {
        ArpTable::new()
    }
}

impl Component for ArpTable {
    type Inputs = TableInputs;
    type Outputs = TableOutputs;

    fn step(&mut self, inputs: TableInputs) -> TableOutputs {
        let mut outputs = TableOutputs::default();
        // Acceptance looks at where the lookup machinery stood when the tick began, so a
        // reply leaving this tick does not open the port until the next one.
        let lookup_idle =
            self.pending_read.is_none() && self.in_flight.is_none() && self.reply_out.is_none();

        // An issued read marches toward its fixed latency. Its data was captured at issue
        // time, so storage traffic on later ticks cannot disturb it.
        if let Some((reply, ticks_left)) = self.in_flight {
            if ticks_left > 1 {
                self.in_flight = Some((reply, ticks_left - 1));
            } else {
                self.in_flight = None;
                self.reply_out = Some(reply);
            }
        }

        // A completed reply is held until the consumer is ready for it.
        if inputs.reply_ready {
            outputs.reply = self.reply_out.take();
        }

        if self.clearing.is_none() && inputs.clear {
            self.clearing = Some(0);
        }

        if let Some(slot) = self.clearing {
            // The sweep owns the storage port, one slot per tick; inserts and queries are
            // not accepted until it finishes.
            self.slots[slot] = Slot::default();
            if slot + 1 == TABLE_SLOTS {
                self.clearing = None;
                outputs.clear_done = true;
            } else {
                self.clearing = Some(slot + 1);
            }
            return outputs;
        }

        // Writes win the storage port on every tick they appear.
        let mut port_free = true;
        if let Some(slot) = inputs.insert {
            self.slots[slot_index(slot.ip)] = slot;
            outputs.insert_taken = true;
            port_free = false;
        }

        // A read parked behind an earlier write goes ahead of any fresh query.
        if port_free {
            if let Some(ip) = self.pending_read.take() {
                self.issue_read(ip);
                port_free = false;
            }
        }

        if let Some(ip) = inputs.query {
            if lookup_idle {
                outputs.query_taken = true;
                if port_free {
                    self.issue_read(ip);
                } else {
                    self.pending_read = Some(ip);
                }
            }
        }

        outputs
    }

    fn reset(&mut self) {
        // The slots are storage, not control state; they keep their contents.
        self.pending_read = None;
        self.in_flight = None;
        self.reply_out = None;
        self.clearing = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(ip: Ipv4Addr, tail: u8) -> Slot {
        Slot {
            ip,
            mac: MacAddr::new([0xde, 0xad, 0xbe, 0xef, 0x00, tail]),
        }
    }

    fn idle() -> TableInputs {
        TableInputs {
            reply_ready: true,
            ..Default::default()
        }
    }

    fn insert(slot: Slot) -> TableInputs {
        TableInputs {
            insert: Some(slot),
            reply_ready: true,
            ..Default::default()
        }
    }

    fn query(ip: Ipv4Addr) -> TableInputs {
        TableInputs {
            query: Some(ip),
            reply_ready: true,
            ..Default::default()
        }
    }

    #[test]
    fn slot_index_folds_octets() {
        assert_eq!(slot_index(Ipv4Addr::new(10, 0, 0, 1)), 0x0b);
        assert_eq!(slot_index(Ipv4Addr::new(11, 0, 0, 0)), 0x0b);
        assert_eq!(slot_index(Ipv4Addr::new(192, 168, 1, 1)), 0x68);
        assert_eq!(slot_index(Ipv4Addr::UNSPECIFIED), 0);
    }

    #[test]
    fn insert_then_query_replies_after_two_ticks() {
        let mut table = ArpTable::new();
        let stored = entry(Ipv4Addr::new(10, 0, 0, 1), 0x01);

        let out = table.step(insert(stored));
        assert!(out.insert_taken);

        let out = table.step(query(stored.ip));
        assert!(out.query_taken);
        assert_eq!(out.reply, None);

        let out = table.step(idle());
        assert_eq!(out.reply, None);

        let out = table.step(idle());
        assert_eq!(
            out.reply,
            Some(LookupReply {
                mac: stored.mac,
                found: true
            })
        );
    }

    #[test]
    fn unknown_address_is_not_found() {
        let mut table = ArpTable::new();

        let out = table.step(query(Ipv4Addr::new(10, 0, 0, 1)));
        assert!(out.query_taken);
        table.step(idle());
        let out = table.step(idle());

        let reply = out.reply.unwrap();
        assert!(!reply.found);
    }

    #[test]
    fn all_zero_address_reads_back_from_a_fresh_slot() {
        // Zeroed slots store 0.0.0.0, so looking that address up matches slot 0 exactly.
        let mut table = ArpTable::new();

        table.step(query(Ipv4Addr::UNSPECIFIED));
        table.step(idle());
        let out = table.step(idle());

        assert_eq!(
            out.reply,
            Some(LookupReply {
                mac: MacAddr::ZERO,
                found: true
            })
        );
    }

    #[test]
    fn colliding_insert_evicts_silently() {
        // 10.0.0.1 and 11.0.0.0 fold to the same slot.
        let mut table = ArpTable::new();
        let first = entry(Ipv4Addr::new(10, 0, 0, 1), 0x01);
        let second = entry(Ipv4Addr::new(11, 0, 0, 0), 0x02);

        table.step(insert(first));
        table.step(insert(second));

        table.step(query(first.ip));
        table.step(idle());
        let out = table.step(idle());
        assert!(!out.reply.unwrap().found);

        table.step(query(second.ip));
        table.step(idle());
        let out = table.step(idle());
        assert_eq!(
            out.reply,
            Some(LookupReply {
                mac: second.mac,
                found: true
            })
        );
    }

    #[test]
    fn simultaneous_insert_and_query_defers_the_read() {
        let mut table = ArpTable::new();
        let stored = entry(Ipv4Addr::new(10, 0, 0, 1), 0x01);
        let other = entry(Ipv4Addr::new(172, 16, 0, 9), 0x02);

        table.step(insert(stored));

        // Both handshakes complete on the same tick; the write gets the port.
        let out = table.step(TableInputs {
            insert: Some(other),
            query: Some(stored.ip),
            reply_ready: true,
            ..Default::default()
        });
        assert!(out.insert_taken);
        assert!(out.query_taken);

        // Read issues one tick late, so the reply lands one tick later than usual.
        assert_eq!(table.step(idle()).reply, None);
        assert_eq!(table.step(idle()).reply, None);
        let out = table.step(idle());
        assert_eq!(
            out.reply,
            Some(LookupReply {
                mac: stored.mac,
                found: true
            })
        );
    }

    #[test]
    fn deferred_read_observes_the_write_it_waited_on() {
        let mut table = ArpTable::new();
        let stored = entry(Ipv4Addr::new(10, 0, 0, 1), 0x01);

        let out = table.step(TableInputs {
            insert: Some(stored),
            query: Some(stored.ip),
            reply_ready: true,
            ..Default::default()
        });
        assert!(out.insert_taken && out.query_taken);

        table.step(idle());
        table.step(idle());
        let out = table.step(idle());
        assert_eq!(
            out.reply,
            Some(LookupReply {
                mac: stored.mac,
                found: true
            })
        );
    }

    #[test]
    fn back_to_back_inserts_park_the_pending_read() {
        let mut table = ArpTable::new();
        let target = entry(Ipv4Addr::new(10, 0, 0, 1), 0x01);
        let updated = entry(Ipv4Addr::new(10, 0, 0, 1), 0x99);
        let unrelated = entry(Ipv4Addr::new(172, 16, 0, 9), 0x02);

        table.step(insert(target));

        let out = table.step(TableInputs {
            insert: Some(unrelated),
            query: Some(target.ip),
            reply_ready: true,
            ..Default::default()
        });
        assert!(out.query_taken);

        // Another write keeps the port; the parked read waits and is not dropped. A younger
        // query cannot jump the queue meanwhile.
        let out = table.step(TableInputs {
            insert: Some(updated),
            query: Some(Ipv4Addr::new(8, 8, 8, 8)),
            reply_ready: true,
            ..Default::default()
        });
        assert!(out.insert_taken);
        assert!(!out.query_taken);

        // The read issues here and captures what the last write left behind.
        table.step(idle());
        table.step(idle());
        let out = table.step(idle());
        assert_eq!(
            out.reply,
            Some(LookupReply {
                mac: updated.mac,
                found: true
            })
        );
    }

    #[test]
    fn one_lookup_in_flight_at_a_time() {
        let mut table = ArpTable::new();

        let out = table.step(query(Ipv4Addr::new(10, 0, 0, 1)));
        assert!(out.query_taken);
        assert!(!table.query_ready());

        let out = table.step(query(Ipv4Addr::new(10, 0, 0, 2)));
        assert!(!out.query_taken);

        let out = table.step(query(Ipv4Addr::new(10, 0, 0, 2)));
        assert!(!out.query_taken);
        assert!(out.reply.is_some());

        // Delivery reopens the port on the following tick.
        let out = table.step(query(Ipv4Addr::new(10, 0, 0, 2)));
        assert!(out.query_taken);
    }

    #[test]
    fn reply_is_held_until_the_consumer_is_ready() {
        let mut table = ArpTable::new();
        let stored = entry(Ipv4Addr::new(10, 0, 0, 1), 0x01);
        table.step(insert(stored));

        table.step(TableInputs {
            query: Some(stored.ip),
            ..Default::default()
        });

        for _ in 0..5 {
            let out = table.step(TableInputs::default());
            assert_eq!(out.reply, None);
        }
        assert!(table.reply_valid());

        let out = table.step(idle());
        assert_eq!(
            out.reply,
            Some(LookupReply {
                mac: stored.mac,
                found: true
            })
        );

        // Delivered exactly once.
        assert!(!table.reply_valid());
        assert_eq!(table.step(idle()).reply, None);
    }

    #[test]
    fn clear_sweeps_every_slot_and_pulses_done_once() {
        let mut table = ArpTable::new();
        let stored = entry(Ipv4Addr::new(10, 0, 0, 1), 0x01);
        table.step(insert(stored));

        // An insert arriving with the trigger loses to the sweep.
        let out = table.step(TableInputs {
            insert: Some(entry(Ipv4Addr::new(172, 16, 0, 9), 0x02)),
            clear: true,
            reply_ready: true,
            ..Default::default()
        });
        assert!(!out.insert_taken);
        assert!(!out.clear_done);
        assert!(!table.ready());

        for _ in 0..254 {
            let out = table.step(TableInputs {
                insert: Some(stored),
                query: Some(stored.ip),
                reply_ready: true,
                ..Default::default()
            });
            assert!(!out.insert_taken);
            assert!(!out.query_taken);
            assert!(!out.clear_done);
        }

        // Slot 255 is zeroed 255 ticks after the trigger, with the done pulse.
        let out = table.step(idle());
        assert!(out.clear_done);
        assert!(table.ready());
        assert_eq!(table.step(idle()).clear_done, false);

        // The store really is empty and service has resumed.
        assert_eq!(table.diag_read(slot_index(stored.ip), SlotField::IpAddr), 0);
        let out = table.step(insert(stored));
        assert!(out.insert_taken);
    }

    #[test]
    fn sweep_progress_is_visible_on_the_diagnostic_port() {
        let mut table = ArpTable::new();
        let low = entry(Ipv4Addr::new(3, 0, 0, 0), 0x03);
        let high = entry(Ipv4Addr::new(200, 0, 0, 0), 0xc8);
        table.step(insert(low));
        table.step(insert(high));

        table.step(TableInputs {
            clear: true,
            ..Default::default()
        });
        for _ in 0..9 {
            table.step(TableInputs::default());
        }

        // Ten slots in: slot 3 is already swept, slot 200 is still intact.
        assert_eq!(table.diag_read(3, SlotField::IpAddr), 0);
        assert_eq!(
            table.diag_read(200, SlotField::IpAddr),
            u32::from(high.ip)
        );
    }

    #[test]
    fn sweep_does_not_cancel_an_issued_read() {
        let mut table = ArpTable::new();
        let stored = entry(Ipv4Addr::new(10, 0, 0, 1), 0x01);
        table.step(insert(stored));
        table.step(query(stored.ip));

        // Sweep starts while the read is in flight; its captured data still arrives on
        // schedule.
        let out = table.step(TableInputs {
            clear: true,
            reply_ready: true,
            ..Default::default()
        });
        assert_eq!(out.reply, None);
        let out = table.step(idle());
        assert_eq!(
            out.reply,
            Some(LookupReply {
                mac: stored.mac,
                found: true
            })
        );
    }

    #[test]
    fn pending_read_waits_out_the_sweep() {
        let mut table = ArpTable::new();
        let stored = entry(Ipv4Addr::new(10, 0, 0, 1), 0x01);
        table.step(insert(stored));

        // Query parks behind a same-tick write, then the sweep takes the port.
        let out = table.step(TableInputs {
            insert: Some(entry(Ipv4Addr::new(172, 16, 0, 9), 0x02)),
            query: Some(stored.ip),
            reply_ready: true,
            ..Default::default()
        });
        assert!(out.query_taken);
        table.step(TableInputs {
            clear: true,
            reply_ready: true,
            ..Default::default()
        });
        for _ in 0..255 {
            table.step(idle());
        }

        // The parked read issues after the sweep and finds the slot zeroed.
        table.step(idle());
        table.step(idle());
        let out = table.step(idle());
        assert_eq!(
            out.reply,
            Some(LookupReply {
                mac: MacAddr::ZERO,
                found: false
            })
        );
    }

    #[test]
    fn retrigger_during_sweep_is_ignored() {
        let mut table = ArpTable::new();
        table.step(TableInputs {
            clear: true,
            ..Default::default()
        });

        // Hold the trigger high the whole time; there is still exactly one done pulse.
        let mut pulses = 0;
        for _ in 0..255 {
            let out = table.step(TableInputs {
                clear: true,
                ..Default::default()
            });
            if out.clear_done {
                pulses += 1;
            }
        }
        assert_eq!(pulses, 1);
        assert!(table.ready());
    }

    #[test]
    fn reset_drops_pending_work_but_keeps_the_store() {
        let mut table = ArpTable::new();
        let stored = entry(Ipv4Addr::new(10, 0, 0, 1), 0x01);
        table.step(insert(stored));
        table.step(query(stored.ip));

        table.reset();

        // The read that was in flight never answers.
        for _ in 0..10 {
            assert_eq!(table.step(idle()).reply, None);
        }

        // The stored binding survived.
        table.step(query(stored.ip));
        table.step(idle());
        let out = table.step(idle());
        assert_eq!(
            out.reply,
            Some(LookupReply {
                mac: stored.mac,
                found: true
            })
        );
    }

    #[test]
    fn reset_cancels_a_sweep_without_a_done_pulse() {
        let mut table = ArpTable::new();
        let high = entry(Ipv4Addr::new(200, 0, 0, 0), 0xc8);
        table.step(insert(high));
        table.step(TableInputs {
            clear: true,
            ..Default::default()
        });
        for _ in 0..9 {
            table.step(TableInputs::default());
        }

        table.reset();
        assert!(table.ready());

        // No pulse arrives later, and the sweep stopped where it was: slot 200 intact.
        for _ in 0..300 {
            assert!(!table.step(idle()).clear_done);
        }
        assert_eq!(
            table.diag_read(200, SlotField::IpAddr),
            u32::from(high.ip)
        );
    }

    #[test]
    fn diagnostic_fields_split_the_mac() {
        let mut table = ArpTable::new();
        let stored = Slot {
            ip: Ipv4Addr::new(192, 168, 1, 1),
            mac: MacAddr::new([0x01, 0x23, 0x45, 0x67, 0x89, 0xab]),
        };
        table.step(insert(stored));

        let slot = slot_index(stored.ip);
        assert_eq!(table.diag_read(slot, SlotField::IpAddr), 0xc0a8_0101);
        assert_eq!(table.diag_read(slot, SlotField::MacLsb), 0x4567_89ab);
        assert_eq!(table.diag_read(slot, SlotField::MacMsb), 0x0123);
    }

    #[test]
    fn diagnostic_writes_feed_the_query_path() {
        let mut table = ArpTable::new();
        let ip = Ipv4Addr::new(192, 168, 1, 23);
        let slot = slot_index(ip);

        table.diag_write(slot, SlotField::IpAddr, u32::from(ip));
        table.diag_write(slot, SlotField::MacLsb, 0x4567_89ab);
        // The upper half word is masked off on write.
        table.diag_write(slot, SlotField::MacMsb, 0xffff_0123);

        table.step(query(ip));
        table.step(idle());
        let out = table.step(idle());
        assert_eq!(
            out.reply,
            Some(LookupReply {
                mac: MacAddr::new([0x01, 0x23, 0x45, 0x67, 0x89, 0xab]),
                found: true
            })
        );
    }

    #[test]
    fn diagnostic_window_decodes_byte_addresses() {
        let mut table = ArpTable::new();
        let stored = Slot {
            ip: Ipv4Addr::new(192, 168, 1, 1),
            mac: MacAddr::new([0x01, 0x23, 0x45, 0x67, 0x89, 0xab]),
        };
        table.step(insert(stored));
        let base = slot_index(stored.ip) as u32 * DIAG_SLOT_STRIDE;

        assert_eq!(table.diag_read_addr(base), Ok(0xc0a8_0101));
        assert_eq!(table.diag_read_addr(base + 0x4), Ok(0x4567_89ab));
        assert_eq!(table.diag_read_addr(base + 0x8), Ok(0x0123));
        assert_eq!(table.diag_read_addr(base + 0xc), Ok(0));
        assert!(table.diag_read_addr(base + 0x1).is_err());
        assert!(table.diag_read_addr(TABLE_SLOTS as u32 * DIAG_SLOT_STRIDE).is_err());

        // Reserved-word writes are accepted and ignored.
        assert_eq!(table.diag_write_addr(base + 0xc, 0xdead_beef), Ok(()));
        assert_eq!(table.diag_read_addr(base + 0xc), Ok(0));
        assert_eq!(table.diag_read_addr(base), Ok(0xc0a8_0101));
    }
}
