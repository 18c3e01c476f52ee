//! Message-channel contract consumed by the transaction engine.
//!
//! Opening, enumerating, and closing physical ports is the implementor's job.

use crate::error::TransportError;

/// Callback invoked with each complete inbound message.
///
/// Runs on whatever thread the transport delivers from.
pub type MessageHandler = Box<dyn FnMut(&[u8]) + Send + 'static>;

/// Bidirectional byte-message channel to a device.
pub trait Transport {
    /// Sends one complete message.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError`] when the message could not be handed to
    /// the device.
    fn send(&mut self, message: &[u8]) -> Result<(), TransportError>;

    /// Installs the inbound handler, replacing any previous one.
    fn on_message(&mut self, handler: MessageHandler);

    /// Removes the inbound handler. Messages arriving afterwards are dropped.
    fn cancel_handler(&mut self);
}

impl<T: Transport + ?Sized> Transport for &mut T {
    fn send(&mut self, message: &[u8]) -> Result<(), TransportError> {
        (**self).send(message)
    }

    fn on_message(&mut self, handler: MessageHandler) {
        (**self).on_message(handler);
    }

    fn cancel_handler(&mut self) {
        (**self).cancel_handler();
    }
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn send(&mut self, message: &[u8]) -> Result<(), TransportError> {
        (**self).send(message)
    }

    fn on_message(&mut self, handler: MessageHandler) {
        (**self).on_message(handler);
    }

    fn cancel_handler(&mut self) {
        (**self).cancel_handler();
    }
}
