use crate::component::Component;
use crate::config::InterfaceConfig;
use arpsim_packets::{ArpFrame, ArpOp, MacAddr, MIN_FRAME_LEN};
use std::net::Ipv4Addr;

/// One frame's worth of work for the encoder. The sender fields come from the encoder's
/// `InterfaceConfig`, so a job only names the other side.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FrameJob {
    pub op: ArpOp,
    pub target_mac: MacAddr,
    pub target_ip: Ipv4Addr,
}

/// One beat of the outgoing byte stream: `beat_width` data lanes, a keep flag per lane, and
/// the end-of-frame marker on the last beat.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Beat {
    pub data: Vec<u8>,
    pub keep: Vec<bool>,
    pub last: bool,
}

#[derive(Clone, Debug, Default)]
pub struct EncoderInputs {
    pub job: Option<FrameJob>,
    /// Consumer readiness for the next beat.
    pub beat_ready: bool,
}

#[derive(Clone, Debug, Default)]
pub struct EncoderOutputs {
    pub job_taken: bool,
    /// The beat transferred this tick, if the consumer was ready for one.
    pub beat: Option<Beat>,
}

enum EncoderState {
    Idle,
    Framing { bytes: Vec<u8>, cursor: usize },
}

/// Cuts the beat starting at `cursor` out of `bytes`. Lanes past the end of the frame are
/// zero-filled with their keep flags cleared; they only ever appear on the last beat.
fn beat_at(bytes: &[u8], cursor: usize, width: usize) -> Beat {
    let end = (cursor + width).min(bytes.len());
    let mut data = bytes[cursor..end].to_vec();
    let mut keep = vec![true; data.len()];
    data.resize(width, 0);
    keep.resize(width, false);
    Beat {
        data,
        keep,
        last: end == bytes.len(),
    }
}

/// Turns accepted `FrameJob`s into a stream of fixed-width beats.
///
/// The full frame is assembled on the acceptance tick: 42 meaningful bytes of Ethernet
/// header plus ARP payload, zero-padded to the 60-byte wire minimum. Every frame byte is
/// a valid one, padding included. The first beat is offered on the tick after acceptance,
/// each beat waits for the consumer's ready, and a new job is accepted only on a tick that
/// begins in Idle.
///
/// A job whose `target_mac` is the broadcast address is a query for a station nobody knows
/// yet: the Ethernet destination keeps the broadcast address while the ARP target hardware
/// field is forced to all-zero.
pub struct FrameEncoder {
    config: InterfaceConfig,
    beat_width: usize,
    state: EncoderState,
}

impl FrameEncoder {
    pub fn new(config: InterfaceConfig, beat_width: usize) -> Self {
        assert!(
            beat_width >= 1 && beat_width <= 64,
            "beat width must be between 1 and 64 bytes"
        );
        FrameEncoder {
            config,
            beat_width,
            state: EncoderState::Idle,
        }
    }

    /// True when a new job would be accepted on the next step.
    pub fn idle(&self) -> bool {
        match self.state {
            EncoderState::Idle => true,
            EncoderState::Framing { .. } => false,
        }
    }

    fn assemble(&self, job: &FrameJob) -> Vec<u8> {
        let mut arp_frame = ArpFrame::new_ipv4(job.op);
        arp_frame.set_dest_mac(job.target_mac);
        arp_frame.set_src_mac(self.config.mac_addr);
        arp_frame.set_sender_hardware_addr(self.config.mac_addr);
        arp_frame.set_sender_protocol_addr(self.config.ip_addr);
        let target_hw = if job.target_mac.is_broadcast() {
            MacAddr::ZERO
        } else {
            job.target_mac
        };
        arp_frame.set_target_hardware_addr(target_hw);
        arp_frame.set_target_protocol_addr(job.target_ip);

        let mut frame = arp_frame.frame();
        frame.pad_to_minimum();
        frame.data
    }
}

impl Component for FrameEncoder {
    type Inputs = EncoderInputs;
    type Outputs = EncoderOutputs;

    fn step(&mut self, inputs: EncoderInputs) -> EncoderOutputs {
        let mut outputs = EncoderOutputs::default();
        let idle = self.idle();
        let width = self.beat_width;

        // Stream the frame in progress, one beat per ready tick.
        if inputs.beat_ready {
            if let EncoderState::Framing { bytes, cursor } = &mut self.state {
                let beat = beat_at(bytes, *cursor, width);
                *cursor = (*cursor + width).min(bytes.len());
                let finished = beat.last;
                outputs.beat = Some(beat);
                if finished {
                    self.state = EncoderState::Idle;
                }
            }
        }

        // A job is only taken on a tick that began in Idle, so the first beat follows one
        // tick after acceptance at the earliest.
        if idle {
            if let Some(job) = inputs.job {
                let bytes = self.assemble(&job);
                debug_assert_eq!(bytes.len(), MIN_FRAME_LEN);
                self.state = EncoderState::Framing { bytes, cursor: 0 };
                outputs.job_taken = true;
            }
        }

        outputs
    }

    fn reset(&mut self) {
        // A frame in progress is dropped, not flushed.
        self.state = EncoderState::Idle;
    }
}
