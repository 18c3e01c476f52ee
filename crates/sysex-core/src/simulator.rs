//! In-memory device that speaks the register protocol over [`Transport`].
//!
//! Replies are delivered from a spawned thread, as a real MIDI input would,
//! so the engine's blocking wait is exercised end to end.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use tracing::trace;

use crate::bitpack::unpack_from_7bit;
use crate::device::DeviceKind;
use crate::error::TransportError;
use crate::frame::{
    build_write_command, frame_address, frame_payload, verify_checksum, CommandType, ModelId,
    IDENTITY_REPLY_PREFIX, IDENTITY_REQUEST, MANUFACTURER_HEADER, SYSEX_END,
};
use crate::transport::{MessageHandler, Transport};

type SharedHandler = Arc<Mutex<Option<MessageHandler>>>;

/// How the simulated device answers requests.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SimulatorBehavior {
    /// Never answer RQ1 or identity requests.
    pub silent: bool,
    /// Send every reply twice.
    pub duplicate_replies: bool,
    /// Frames delivered ahead of every reply.
    pub stray_frames: Vec<Vec<u8>>,
    /// Delay before replies are delivered.
    pub reply_delay: Duration,
}

/// Register-space device backed by a byte map.
pub struct SimulatedDevice {
    model_id: ModelId,
    aliases: Vec<ModelId>,
    family_code: u8,
    memory: BTreeMap<u32, u8>,
    handler: SharedHandler,
    behavior: SimulatorBehavior,
    sent: Vec<Vec<u8>>,
    dropped: Arc<AtomicUsize>,
    deliveries: Vec<JoinHandle<()>>,
}

impl std::fmt::Debug for SimulatedDevice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SimulatedDevice")
            .field("model_id", &self.model_id)
            .field("family_code", &self.family_code)
            .field("behavior", &self.behavior)
            .field("sent", &self.sent.len())
            .finish_non_exhaustive()
    }
}

impl SimulatedDevice {
    /// Device answering register requests for `model_id` and identity
    /// requests with `family_code`. All registers read as zero.
    #[must_use]
    pub fn new(model_id: ModelId, family_code: u8) -> Self {
        Self {
            model_id,
            aliases: Vec::new(),
            family_code,
            memory: BTreeMap::new(),
            handler: Arc::new(Mutex::new(None)),
            behavior: SimulatorBehavior::default(),
            sent: Vec::new(),
            dropped: Arc::new(AtomicUsize::new(0)),
            deliveries: Vec::new(),
        }
    }

    /// Device impersonating a known family.
    #[must_use]
    pub fn for_device(kind: DeviceKind) -> Self {
        Self::new(kind.model_id(), kind.family_code())
    }

    /// Also answers register requests addressed to `model_id`, from the same
    /// memory.
    #[must_use]
    pub fn answering_as(mut self, model_id: ModelId) -> Self {
        self.aliases.push(model_id);
        self
    }

    /// Replaces the reply behaviour.
    #[must_use]
    pub fn with_behavior(mut self, behavior: SimulatorBehavior) -> Self {
        self.behavior = behavior;
        self
    }

    /// Mutable access to the reply behaviour.
    pub fn behavior_mut(&mut self) -> &mut SimulatorBehavior {
        &mut self.behavior
    }

    /// Stores `bytes` starting at packed `address`.
    pub fn load(&mut self, address: u32, bytes: &[u8]) {
        let start = unpack_from_7bit(address);
        for (offset, &byte) in (start..).zip(bytes) {
            self.memory.insert(offset, byte);
        }
    }

    /// Reads `len` bytes starting at packed `address`; unset bytes are zero.
    #[must_use]
    pub fn peek(&self, address: u32, len: usize) -> Vec<u8> {
        let start = unpack_from_7bit(address);
        (start..)
            .take(len)
            .map(|offset| self.memory.get(&offset).copied().unwrap_or_default())
            .collect()
    }

    /// Every message received from the host, oldest first.
    #[must_use]
    pub fn sent(&self) -> &[Vec<u8>] {
        &self.sent
    }

    /// Number of messages that arrived while no handler was installed.
    #[must_use]
    pub fn dropped(&self) -> usize {
        self.dropped.load(Ordering::SeqCst)
    }

    /// Blocks until every message scheduled so far has been delivered or
    /// dropped.
    pub fn settle(&mut self) {
        for delivery in self.deliveries.drain(..) {
            let _ = delivery.join();
        }
    }

    fn respond(&mut self, message: &[u8]) -> Vec<Vec<u8>> {
        if message == IDENTITY_REQUEST {
            return if self.behavior.silent {
                Vec::new()
            } else {
                vec![self.identity_reply()]
            };
        }
        let Some(model_id) = self.addressed_model(message) else {
            return Vec::new();
        };
        if verify_checksum(message).is_err() {
            return Vec::new();
        }
        let (Some(address), Some(payload)) = (frame_address(message), frame_payload(message))
        else {
            return Vec::new();
        };
        let address = u32::from_be_bytes(address);
        match message.get(7).copied() {
            Some(command) if command == CommandType::Dt1.as_u8() => {
                self.load(address, payload);
                Vec::new()
            }
            Some(command) if command == CommandType::Rq1.as_u8() && !self.behavior.silent => {
                let Ok(size) = <[u8; 4]>::try_from(payload) else {
                    return Vec::new();
                };
                let len = usize::try_from(unpack_from_7bit(u32::from_be_bytes(size)))
                    .unwrap_or_default();
                let data = self.peek(address, len);
                vec![build_write_command(model_id, address, &data)]
            }
            _ => Vec::new(),
        }
    }

    fn addressed_model(&self, message: &[u8]) -> Option<ModelId> {
        if message.get(1..3) != Some(&MANUFACTURER_HEADER[..]) {
            return None;
        }
        let bytes: [u8; 4] = message.get(3..7)?.try_into().ok()?;
        std::iter::once(&self.model_id)
            .chain(&self.aliases)
            .copied()
            .find(|model_id| model_id.bytes() == bytes)
    }

    fn identity_reply(&self) -> Vec<u8> {
        let mut frame = IDENTITY_REPLY_PREFIX.to_vec();
        frame.extend_from_slice(&[self.family_code, 0x02, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00]);
        frame.push(SYSEX_END);
        frame
    }

    fn deliver(&mut self, replies: Vec<Vec<u8>>) {
        let mut outbound = self.behavior.stray_frames.clone();
        for reply in replies {
            if self.behavior.duplicate_replies {
                outbound.push(reply.clone());
            }
            outbound.push(reply);
        }
        if outbound.is_empty() {
            return;
        }
        let handler = Arc::clone(&self.handler);
        let dropped = Arc::clone(&self.dropped);
        let delay = self.behavior.reply_delay;
        self.deliveries.retain(|delivery| !delivery.is_finished());
        self.deliveries.push(thread::spawn(move || {
            if !delay.is_zero() {
                thread::sleep(delay);
            }
            for message in outbound {
                let mut guard = handler.lock().unwrap_or_else(PoisonError::into_inner);
                match guard.as_mut() {
                    Some(handler) => handler(message.as_slice()),
                    None => {
                        trace!("no handler installed, dropping {} byte message", message.len());
                        dropped.fetch_add(1, Ordering::SeqCst);
                    }
                }
            }
        }));
    }
}

impl Transport for SimulatedDevice {
    fn send(&mut self, message: &[u8]) -> Result<(), TransportError> {
        if message.is_empty() {
            return Err(TransportError::new("empty message"));
        }
        self.sent.push(message.to_vec());
        let replies = self.respond(message);
        self.deliver(replies);
        Ok(())
    }

    fn on_message(&mut self, handler: MessageHandler) {
        *self.handler.lock().unwrap_or_else(PoisonError::into_inner) = Some(handler);
    }

    fn cancel_handler(&mut self) {
        *self.handler.lock().unwrap_or_else(PoisonError::into_inner) = None;
    }
}

#[cfg(test)]
mod tests {
    use std::thread;
    use std::time::{Duration, Instant};

    use super::SimulatedDevice;
    use crate::frame::{build_read_request, build_write_command, ModelId};
    use crate::transport::Transport;

    const GO_KEYS: ModelId = ModelId::from_bytes([0x00, 0x00, 0x00, 0x3C]);
    const AUX: ModelId = ModelId::from_bytes([0x00, 0x00, 0x00, 0x28]);

    #[test]
    fn memory_is_addressed_in_the_unpacked_domain() {
        let mut device = SimulatedDevice::new(GO_KEYS, 0x3C);
        device.load(0x0000_007F, &[1, 2, 3]);
        assert_eq!(device.peek(0x0000_0100, 2), vec![2, 3]);
        assert_eq!(device.peek(0x0000_0102, 1), vec![0]);
    }

    #[test]
    fn writes_apply_only_for_known_model_ids() {
        let mut device = SimulatedDevice::new(GO_KEYS, 0x3C).answering_as(AUX);
        device
            .send(&build_write_command(AUX, 0x0100_0504, &[7]))
            .expect("accepted");
        device
            .send(&build_write_command(ModelId([0, 0, 0, 0x3D]), 0x0100_0000, &[9]))
            .expect("accepted");
        assert_eq!(device.peek(0x0100_0504, 1), vec![7]);
        assert_eq!(device.peek(0x0100_0000, 1), vec![0]);
        assert_eq!(device.sent().len(), 2);
    }

    #[test]
    fn corrupted_writes_are_ignored() {
        let mut device = SimulatedDevice::new(GO_KEYS, 0x3C);
        let mut frame = build_write_command(GO_KEYS, 0x0100_0000, &[5]);
        let index = frame.len() - 2;
        frame[index] ^= 0x01;
        device.send(&frame).expect("accepted");
        assert_eq!(device.peek(0x0100_0000, 1), vec![0]);
    }

    #[test]
    fn empty_messages_are_refused() {
        let mut device = SimulatedDevice::new(GO_KEYS, 0x3C);
        assert!(device.send(&[]).is_err());
    }

    #[test]
    fn finished_deliveries_are_reaped() {
        let mut device = SimulatedDevice::new(GO_KEYS, 0x3C);
        device.on_message(Box::new(|_| {}));
        let deadline = Instant::now() + Duration::from_secs(5);
        for _ in 0..8 {
            device
                .send(&build_read_request(GO_KEYS, 0x0100_0000, 1))
                .expect("accepted");
            while !device.deliveries.iter().all(|delivery| delivery.is_finished())
                && Instant::now() < deadline
            {
                thread::sleep(Duration::from_millis(1));
            }
        }
        assert_eq!(device.deliveries.len(), 1);
        device.settle();
        assert!(device.deliveries.is_empty());
        assert_eq!(device.dropped(), 0);
    }
}
