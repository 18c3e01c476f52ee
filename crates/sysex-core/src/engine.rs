//! Blocking request/response exchange over a [`Transport`].
//!
//! The engine owns its transport and takes `&mut self` for every operation,
//! so at most one transaction is ever outstanding. Reads and identity
//! requests install a single-fire inbound handler, send the request, and
//! block on a one-slot channel until the handler hands over the first
//! correlated reply or the configured timeout expires. Writes are not
//! acknowledged by the device and return as soon as the frame is sent.

use std::sync::mpsc::{self, RecvTimeoutError};
use std::time::Duration;

use tracing::{debug, trace, warn};

use crate::codec::{decode, encode, RegisterBlock};
use crate::device::DeviceKind;
use crate::error::{Error, Result, TransportError};
use crate::frame::{
    build_read_request, build_write_command, frame_payload, is_identity_reply, is_reply_to,
    verify_checksum, ModelId, IDENTITY_FAMILY_OFFSET, IDENTITY_REQUEST,
};
use crate::model::RegisterModel;
use crate::transport::Transport;

/// Default wait for a correlated reply.
pub const DEFAULT_REPLY_TIMEOUT: Duration = Duration::from_secs(2);

/// Engine configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct EngineConfig {
    /// How long reads and identity requests wait; `None` waits forever.
    pub reply_timeout: Option<Duration>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            reply_timeout: Some(DEFAULT_REPLY_TIMEOUT),
        }
    }
}

impl EngineConfig {
    /// Configuration that blocks until a reply arrives, however long.
    #[must_use]
    pub const fn unbounded() -> Self {
        Self {
            reply_timeout: None,
        }
    }

    /// Configuration with a fixed reply timeout.
    #[must_use]
    pub const fn with_timeout(timeout: Duration) -> Self {
        Self {
            reply_timeout: Some(timeout),
        }
    }
}

/// One exchange with the device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Transaction {
    /// RQ1 awaiting a DT1 with the same address.
    Read {
        /// Requested start address.
        address: u32,
        /// Requested byte count.
        byte_count: usize,
    },
    /// Unacknowledged DT1.
    Write {
        /// Written start address.
        address: u32,
        /// Payload size.
        byte_count: usize,
    },
    /// Identity request awaiting an identity reply.
    Identify,
}

/// Lifecycle of the most recent transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TransactionState {
    /// Nothing has been exchanged yet.
    #[default]
    Idle,
    /// Request sent, reply not yet handed over.
    AwaitingReply(Transaction),
    /// Last transaction finished successfully.
    Completed(Transaction),
    /// Last transaction failed.
    Failed(Transaction),
}

/// Synchronous register read/write driver.
#[derive(Debug)]
pub struct TransactionEngine<T: Transport> {
    transport: T,
    config: EngineConfig,
    state: TransactionState,
}

impl<T: Transport> TransactionEngine<T> {
    /// Wraps `transport` with the default configuration.
    pub fn new(transport: T) -> Self {
        Self::with_config(transport, EngineConfig::default())
    }

    /// Wraps `transport` with an explicit configuration.
    pub const fn with_config(transport: T, config: EngineConfig) -> Self {
        Self {
            transport,
            config,
            state: TransactionState::Idle,
        }
    }

    /// Active configuration.
    pub const fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// State of the most recent transaction.
    pub const fn state(&self) -> TransactionState {
        self.state
    }

    /// Borrows the transport.
    pub const fn transport(&self) -> &T {
        &self.transport
    }

    /// Mutably borrows the transport.
    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    /// Releases the transport.
    pub fn into_transport(self) -> T {
        self.transport
    }

    /// Sends a message that expects no reply, such as a channel message.
    ///
    /// # Errors
    ///
    /// [`Error::Transport`] when the transport rejects the message.
    pub fn send(&mut self, message: &[u8]) -> Result<()> {
        trace!("sending {} byte message", message.len());
        self.transport.send(message).map_err(Error::from)
    }

    /// Reads `byte_count` raw register bytes starting at `address`.
    ///
    /// # Errors
    ///
    /// [`Error::Timeout`], [`Error::ChecksumMismatch`],
    /// [`Error::ReplyLengthMismatch`], or [`Error::Transport`].
    pub fn read_raw(
        &mut self,
        address: u32,
        byte_count: usize,
        model_id: ModelId,
    ) -> Result<Vec<u8>> {
        let transaction = Transaction::Read {
            address,
            byte_count,
        };
        let request = build_read_request(
            model_id,
            address,
            u32::try_from(byte_count).unwrap_or(u32::MAX),
        );
        debug!("RQ1 {address:#010X} ({byte_count} bytes) to model {model_id}");

        let result = self
            .exchange(transaction, &request, move |message| {
                is_reply_to(message, model_id, address)
            })
            .and_then(|reply| {
                verify_checksum(&reply)?;
                let payload = frame_payload(&reply).unwrap_or_default();
                if payload.len() != byte_count {
                    return Err(Error::ReplyLengthMismatch {
                        expected: byte_count,
                        actual: payload.len(),
                    });
                }
                Ok(payload.to_vec())
            });
        self.finish(transaction, result)
    }

    /// Reads and decodes one register block of `model` at `base_address`.
    ///
    /// # Errors
    ///
    /// Any error of [`Self::read_raw`] or [`decode`].
    pub fn read_block<'m>(
        &mut self,
        model: &'m RegisterModel,
        base_address: u32,
        model_id: ModelId,
    ) -> Result<RegisterBlock<'m>> {
        let data = self.read_raw(base_address, model.byte_size(), model_id)?;
        let transaction = Transaction::Read {
            address: base_address,
            byte_count: model.byte_size(),
        };
        self.finish(transaction, decode(&data, model))
    }

    /// Writes raw register bytes starting at `address`.
    ///
    /// The device does not acknowledge writes.
    ///
    /// # Errors
    ///
    /// [`Error::Transport`] when the frame could not be sent.
    pub fn write_raw(&mut self, address: u32, payload: &[u8], model_id: ModelId) -> Result<()> {
        let transaction = Transaction::Write {
            address,
            byte_count: payload.len(),
        };
        let command = build_write_command(model_id, address, payload);
        debug!(
            "DT1 {address:#010X} ({} bytes) to model {model_id}",
            payload.len()
        );
        let result = self.transport.send(&command).map_err(Error::from);
        self.finish(transaction, result)
    }

    /// Encodes `block` and writes it at `base_address`.
    ///
    /// # Errors
    ///
    /// Any error of [`encode`] or [`Self::write_raw`].
    pub fn write_block(
        &mut self,
        block: &RegisterBlock<'_>,
        base_address: u32,
        model_id: ModelId,
    ) -> Result<()> {
        let payload = match encode(block) {
            Ok(payload) => payload,
            Err(error) => {
                let transaction = Transaction::Write {
                    address: base_address,
                    byte_count: block.model().byte_size(),
                };
                return self.finish(transaction, Err(error));
            }
        };
        self.write_raw(base_address, &payload, model_id)
    }

    /// Asks the connected device for its identity.
    ///
    /// # Errors
    ///
    /// [`Error::UnknownDevice`], [`Error::Timeout`], or [`Error::Transport`].
    pub fn identify(&mut self) -> Result<DeviceKind> {
        let transaction = Transaction::Identify;
        debug!("sending identity request");
        let result = self
            .exchange(transaction, &IDENTITY_REQUEST, is_identity_reply)
            .and_then(|reply| {
                DeviceKind::from_family_code(
                    reply
                        .get(IDENTITY_FAMILY_OFFSET)
                        .copied()
                        .unwrap_or_default(),
                )
            });
        if let Ok(kind) = &result {
            debug!("identified {kind}");
        }
        self.finish(transaction, result)
    }

    fn exchange<F>(
        &mut self,
        transaction: Transaction,
        request: &[u8],
        matches: F,
    ) -> Result<Vec<u8>>
    where
        F: Fn(&[u8]) -> bool + Send + 'static,
    {
        let (sender, receiver) = mpsc::sync_channel::<Vec<u8>>(1);
        let mut sender = Some(sender);
        self.transport.on_message(Box::new(move |message: &[u8]| {
            if !matches(message) {
                trace!("dropping unrelated {} byte message", message.len());
                return;
            }
            if let Some(sender) = sender.take() {
                let _ = sender.try_send(message.to_vec());
            }
        }));

        self.state = TransactionState::AwaitingReply(transaction);
        if let Err(error) = self.transport.send(request) {
            self.transport.cancel_handler();
            return Err(error.into());
        }

        let outcome = match self.config.reply_timeout {
            Some(timeout) => receiver.recv_timeout(timeout).map_err(|error| match error {
                RecvTimeoutError::Timeout => {
                    warn!("no reply to {transaction:?} within {timeout:?}");
                    Error::Timeout(timeout)
                }
                RecvTimeoutError::Disconnected => handler_dropped(),
            }),
            None => receiver.recv().map_err(|_| handler_dropped()),
        };
        self.transport.cancel_handler();
        outcome
    }

    fn finish<R>(&mut self, transaction: Transaction, result: Result<R>) -> Result<R> {
        self.state = if result.is_ok() {
            TransactionState::Completed(transaction)
        } else {
            TransactionState::Failed(transaction)
        };
        result
    }
}

fn handler_dropped() -> Error {
    TransportError::new("inbound handler released before a reply arrived").into()
}
