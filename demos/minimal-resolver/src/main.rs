use crossbeam::crossbeam_channel;
use std::collections::VecDeque;
use std::net::Ipv4Addr;

use arpsim_packets::{ArpOp, MacAddr};
use arpsim_runtime::component::{
    Component, EncoderInputs, FrameEncoder, FrameJob, Resolver, ResolverInputs, Slot,
};
use arpsim_runtime::config::InterfaceConfig;
use arpsim_runtime::trace::EventLog;
use arpsim_runtime::utils::test::collectors::FrameReassembler;

/// More than enough for the burst below; the longest lookup takes five ticks
/// and the encoder four beats behind it.
const TICKS: usize = 64;

fn main() {
    let config = InterfaceConfig::new(
        Ipv4Addr::new(192, 168, 1, 1),
        MacAddr::new([0x01, 0x23, 0x45, 0x67, 0x89, 0xab]),
    );

    // Lookups go in over one channel, (address, answer) pairs come out over another.
    let (lookup_sender, lookup_receiver) = crossbeam_channel::unbounded();
    let lookups = vec![
        Ipv4Addr::BROADCAST,           // link broadcast, answered by rule
        config.ip_addr,                // our own station
        Ipv4Addr::new(224, 0, 0, 251), // multicast group
        Ipv4Addr::new(192, 168, 1, 23), // learned below
        Ipv4Addr::new(192, 168, 1, 99), // nobody knows this one
    ];
    for ip in lookups {
        match lookup_sender.send(ip) {
            Ok(_) => {}
            Err(err) => panic!("Input channel error {}", err),
        }
    }

    let (answer_sender, answer_receiver) = crossbeam_channel::unbounded();

    let mut resolver = Resolver::new(config);
    let mut encoder = FrameEncoder::new(config, 16);
    let mut log = match EventLog::to_file("minimal-resolver.log") {
        Ok(log) => log,
        Err(err) => panic!("Log file error {}", err),
    };

    // One binding learned over the insert port, so the fourth lookup has a slot to hit.
    let mut bindings: VecDeque<Slot> = VecDeque::new();
    bindings.push_back(Slot {
        ip: Ipv4Addr::new(192, 168, 1, 23),
        mac: MacAddr::new([0xde, 0xad, 0xbe, 0xef, 0x00, 0x17]),
    });

    let mut pending_lookup: Option<Ipv4Addr> = None;
    let mut in_flight: VecDeque<Ipv4Addr> = VecDeque::new();
    let mut jobs: VecDeque<FrameJob> = VecDeque::new();
    let mut reassembler = FrameReassembler::new();

    for tick in 0..TICKS {
        if pending_lookup.is_none() {
            pending_lookup = lookup_receiver.try_recv().ok();
        }

        let out = resolver.step(ResolverInputs {
            request: pending_lookup,
            answer_ready: true,
            insert: bindings.front().copied(),
            clear: false,
        });
        if out.request_taken {
            in_flight.push_back(pending_lookup.take().unwrap());
        }
        if out.insert_taken {
            bindings.pop_front();
        }
        if let Some(reply) = out.answer {
            // One lookup in flight at a time, so the front of the queue is the
            // address this answer belongs to.
            let ip = in_flight.pop_front().unwrap();
            log.record(tick, (ip, reply));
            if !reply.found {
                // A station nobody knows: put the question on the wire.
                jobs.push_back(FrameJob {
                    op: ArpOp::Request,
                    target_mac: MacAddr::BROADCAST,
                    target_ip: ip,
                });
            }
            match answer_sender.send((ip, reply)) {
                Ok(_) => {}
                Err(err) => panic!("Output channel error {}", err),
            }
        }

        let out = encoder.step(EncoderInputs {
            job: jobs.front().copied(),
            beat_ready: true,
        });
        if out.job_taken {
            jobs.pop_front();
        }
        if let Some(beat) = out.beat {
            reassembler.push(&beat);
        }
    }

    for (ip, reply) in answer_receiver.try_iter() {
        if reply.found {
            println!("{} is at {}", ip, reply.mac);
        } else {
            println!("{} is unknown", ip);
        }
    }

    for frame in reassembler.frames() {
        println!("Wire query ({} bytes):", frame.len());
        for chunk in frame.chunks(16) {
            let hex: Vec<String> = chunk.iter().map(|b| format!("{:02x}", b)).collect();
            println!("  {}", hex.join(" "));
        }
    }

    println!("It finished!");
}
