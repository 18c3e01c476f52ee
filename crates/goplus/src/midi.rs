//! `midir`-backed [`Transport`].

use std::sync::{Arc, Mutex, PoisonError};

use anyhow::{anyhow, Context, Result};
use midir::{
    Ignore, MidiInput, MidiInputConnection, MidiInputPort, MidiOutput, MidiOutputConnection,
    MidiOutputPort,
};
use sysex_core::{MessageHandler, Transport, TransportError};
use tracing::{debug, trace};

const CLIENT_NAME: &str = "goplus";

type SharedHandler = Arc<Mutex<Option<MessageHandler>>>;

/// Input and output connection to one MIDI device.
///
/// Both ports close when the transport is dropped.
pub struct MidiTransport {
    _input: MidiInputConnection<()>,
    output: MidiOutputConnection,
    handler: SharedHandler,
    input_name: String,
    output_name: String,
}

impl std::fmt::Debug for MidiTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MidiTransport")
            .field("input", &self.input_name)
            .field("output", &self.output_name)
            .finish_non_exhaustive()
    }
}

impl MidiTransport {
    /// Opens the first input and output whose names contain `port`, or the
    /// first available ports when `port` is `None`.
    ///
    /// # Errors
    ///
    /// Fails when no matching port exists or a connection cannot be made.
    pub fn open(port: Option<&str>) -> Result<Self> {
        let mut midi_in =
            MidiInput::new(CLIENT_NAME).map_err(|e| anyhow!("creating MIDI input: {e}"))?;
        midi_in.ignore(Ignore::None);
        let midi_out =
            MidiOutput::new(CLIENT_NAME).map_err(|e| anyhow!("creating MIDI output: {e}"))?;

        let (in_port, input_name) = select_port(
            midi_in.ports(),
            |p: &MidiInputPort| midi_in.port_name(p).unwrap_or_default(),
            port,
        )
        .context("no matching MIDI input port")?;
        let (out_port, output_name) = select_port(
            midi_out.ports(),
            |p: &MidiOutputPort| midi_out.port_name(p).unwrap_or_default(),
            port,
        )
        .context("no matching MIDI output port")?;
        debug!("opening MIDI input `{input_name}` and output `{output_name}`");

        let handler: SharedHandler = Arc::new(Mutex::new(None));
        let inbound = Arc::clone(&handler);
        let input = midi_in
            .connect(
                &in_port,
                "goplus-in",
                move |_stamp, message, _| {
                    if message.first() != Some(&0xF0) {
                        return;
                    }
                    trace!("received {} byte SysEx", message.len());
                    let mut guard = inbound.lock().unwrap_or_else(PoisonError::into_inner);
                    if let Some(handler) = guard.as_mut() {
                        handler(message);
                    }
                },
                (),
            )
            .map_err(|e| anyhow!("connecting to `{input_name}`: {e}"))?;
        let output = midi_out
            .connect(&out_port, "goplus-out")
            .map_err(|e| anyhow!("connecting to `{output_name}`: {e}"))?;

        Ok(Self {
            _input: input,
            output,
            handler,
            input_name,
            output_name,
        })
    }

    /// Name of the connected input port.
    #[must_use]
    pub fn input_name(&self) -> &str {
        &self.input_name
    }

    /// Name of the connected output port.
    #[must_use]
    pub fn output_name(&self) -> &str {
        &self.output_name
    }
}

impl Transport for MidiTransport {
    fn send(&mut self, message: &[u8]) -> Result<(), TransportError> {
        self.output.send(message).map_err(TransportError::new)
    }

    fn on_message(&mut self, handler: MessageHandler) {
        *self.handler.lock().unwrap_or_else(PoisonError::into_inner) = Some(handler);
    }

    fn cancel_handler(&mut self) {
        *self.handler.lock().unwrap_or_else(PoisonError::into_inner) = None;
    }
}

fn select_port<P>(
    ports: Vec<P>,
    name_of: impl Fn(&P) -> String,
    wanted: Option<&str>,
) -> Option<(P, String)> {
    ports
        .into_iter()
        .map(|port| {
            let name = name_of(&port);
            (port, name)
        })
        .find(|(_, name)| wanted.map_or(true, |wanted| name.contains(wanted)))
}

/// Names of the available MIDI ports.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PortList {
    /// Input port names.
    pub inputs: Vec<String>,
    /// Output port names.
    pub outputs: Vec<String>,
}

/// Lists the available MIDI input and output ports.
///
/// # Errors
///
/// Fails when the MIDI backend cannot be initialised.
pub fn list_ports() -> Result<PortList> {
    let midi_in = MidiInput::new(CLIENT_NAME).map_err(|e| anyhow!("creating MIDI input: {e}"))?;
    let midi_out =
        MidiOutput::new(CLIENT_NAME).map_err(|e| anyhow!("creating MIDI output: {e}"))?;
    Ok(PortList {
        inputs: midi_in
            .ports()
            .iter()
            .map(|port| midi_in.port_name(port).unwrap_or_default())
            .collect(),
        outputs: midi_out
            .ports()
            .iter()
            .map(|port| midi_out.port_name(port).unwrap_or_default())
            .collect(),
    })
}
