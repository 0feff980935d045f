//! Link session
//!
//! A [`Session`] owns one physical link: the transport, the clock, the
//! frame receiver, the liveness monitor, the latest telemetry snapshot and
//! the outgoing control record. The application drives it from a single
//! loop:
//!
//! ```text
//! loop {
//!     match session.poll()? {
//!         SessionEvent::Telemetry => { /* read session.vessel(), update controls */ }
//!         _ => {}
//!     }
//!     session.send_control_if_due()?;
//! }
//! ```
//!
//! Nothing here blocks on input. A poll that only sees half a frame returns
//! [`SessionEvent::Incomplete`] and picks up where it left off next time.

use ksplink_hal::{elapsed_ms, Clock, SerialPort};
use ksplink_protocol::{
    send_record, ActionGroup, ControlPacket, FrameError, FrameReceiver, HandshakePacket,
    MainControl, NavballMode, ReceiveStatus, Record, SasMode, SendError, VesselData, WireRecord,
};

use crate::config::LinkConfig;
use crate::liveness::{LinkTransition, LivenessMonitor};

/// What one [`Session::poll`] did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SessionEvent {
    /// No bytes, or only noise outside any frame
    NoData,
    /// Part of a frame is buffered
    Incomplete,
    /// The host's handshake arrived and the device answered it
    HandshakeAnswered(HandshakePacket),
    /// A new telemetry snapshot is available through [`Session::vessel`]
    Telemetry,
    /// A valid frame of a known tag the device does not act on
    Ignored { tag: u8 },
    /// A frame was discarded
    Rejected(FrameError),
}

impl SessionEvent {
    /// Tag of the record that was processed, if any
    pub fn packet_id(&self) -> Option<u8> {
        match self {
            SessionEvent::HandshakeAnswered(_) => Some(HandshakePacket::TAG),
            SessionEvent::Telemetry => Some(VesselData::TAG),
            SessionEvent::Ignored { tag } => Some(*tag),
            _ => None,
        }
    }
}

/// Frame counters since the session started
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LinkStats {
    pub frames_accepted: u32,
    pub length_mismatches: u32,
    pub checksum_mismatches: u32,
    pub handshakes: u32,
    pub control_sent: u32,
}

impl LinkStats {
    fn record_rejection(&mut self, error: &FrameError) {
        let counter = match error {
            FrameError::ChecksumMismatch { .. } => &mut self.checksum_mismatches,
            _ => &mut self.length_mismatches,
        };
        *counter = counter.saturating_add(1);
    }
}

/// One device-side link to the host
pub struct Session<P, C> {
    port: P,
    clock: C,
    config: LinkConfig,
    receiver: FrameReceiver,
    liveness: LivenessMonitor,
    vessel: Option<VesselData>,
    control: ControlPacket,
    last_control_ms: Option<u32>,
    stats: LinkStats,
}

impl<P: SerialPort, C: Clock> Session<P, C> {
    /// Create a session over a transport
    pub fn new(port: P, clock: C, config: LinkConfig) -> Self {
        Self {
            port,
            clock,
            liveness: LivenessMonitor::new(config.idle_timeout_ms),
            config,
            receiver: FrameReceiver::new(),
            vessel: None,
            control: ControlPacket::default(),
            last_control_ms: None,
            stats: LinkStats::default(),
        }
    }

    /// Advance the receiver and dispatch whatever completed
    ///
    /// Handshakes are answered before this returns. Telemetry replaces the
    /// snapshot before [`SessionEvent::Telemetry`] is returned. The only
    /// error is a transport failure while answering a handshake.
    pub fn poll(&mut self) -> Result<SessionEvent, SendError<P::Error>> {
        let now = self.clock.now_ms();
        let status = self.receiver.poll(&mut self.port);

        if let Some(transition) = self.liveness.observe(now, status.is_accepted()) {
            self.on_transition(transition);
        }

        let event = match status {
            ReceiveStatus::NoData => SessionEvent::NoData,
            ReceiveStatus::Incomplete => SessionEvent::Incomplete,
            ReceiveStatus::Rejected(error) => {
                self.stats.record_rejection(&error);
                #[cfg(feature = "defmt")]
                defmt::debug!("Frame rejected: {:?}", error);
                SessionEvent::Rejected(error)
            }
            ReceiveStatus::Accepted(record) => {
                self.stats.frames_accepted = self.stats.frames_accepted.saturating_add(1);
                self.dispatch(record)?
            }
        };

        Ok(event)
    }

    fn dispatch(&mut self, record: Record) -> Result<SessionEvent, SendError<P::Error>> {
        match record {
            Record::Handshake(packet) => {
                self.handshake()?;
                self.stats.handshakes = self.stats.handshakes.saturating_add(1);
                #[cfg(feature = "defmt")]
                defmt::info!("Handshake answered: host sent {:?}", packet);
                Ok(SessionEvent::HandshakeAnswered(packet))
            }
            Record::Telemetry(vessel) => {
                self.vessel = Some(vessel);
                Ok(SessionEvent::Telemetry)
            }
            Record::Control(_) => {
                #[cfg(feature = "defmt")]
                defmt::trace!("Ignoring control record from host");
                Ok(SessionEvent::Ignored {
                    tag: ControlPacket::TAG,
                })
            }
        }
    }

    fn on_transition(&mut self, transition: LinkTransition) {
        match transition {
            LinkTransition::Connected => {
                #[cfg(feature = "defmt")]
                defmt::info!("Link connected");
            }
            LinkTransition::Lost => {
                #[cfg(feature = "defmt")]
                defmt::warn!(
                    "Link idle: no valid frame for {} ms",
                    self.config.idle_timeout_ms
                );
            }
        }
    }

    /// Send this device's capability handshake
    pub fn handshake(&mut self) -> Result<(), SendError<P::Error>> {
        send_record(&mut self.port, &HandshakePacket::DEVICE)?;
        Ok(())
    }

    /// Send the current control record
    pub fn send_control(&mut self) -> Result<(), SendError<P::Error>> {
        send_record(&mut self.port, &self.control)?;
        self.last_control_ms = Some(self.clock.now_ms());
        self.stats.control_sent = self.stats.control_sent.saturating_add(1);
        Ok(())
    }

    /// Send the control record if the refresh interval has passed
    ///
    /// Returns whether a record was sent.
    pub fn send_control_if_due(&mut self) -> Result<bool, SendError<P::Error>> {
        let due = match self.last_control_ms {
            None => true,
            Some(last) => elapsed_ms(self.clock.now_ms(), last) >= self.config.control_refresh_ms,
        };
        if due {
            self.send_control()?;
        }
        Ok(due)
    }

    /// Whether a valid frame arrived within the idle timeout
    pub fn is_connected(&self) -> bool {
        self.liveness.is_connected()
    }

    /// Latest telemetry snapshot, `None` until the first one arrives
    pub fn vessel(&self) -> Option<&VesselData> {
        self.vessel.as_ref()
    }

    /// Whether the host reports an action group as active
    ///
    /// Reads `false` until telemetry has arrived.
    pub fn action_group(&self, group: ActionGroup) -> bool {
        self.vessel.as_ref().is_some_and(|v| v.action_group(group))
    }

    /// Autopilot mode reported by the host
    pub fn sas_mode(&self) -> Option<SasMode> {
        self.vessel.as_ref().and_then(|v| v.sas_mode())
    }

    /// Navball mode reported by the host
    pub fn navball_mode(&self) -> Option<NavballMode> {
        self.vessel.as_ref().and_then(|v| v.navball_mode())
    }

    /// Control record sent by [`Session::send_control`]
    pub fn control(&self) -> &ControlPacket {
        &self.control
    }

    /// Edit the control record before the next send
    pub fn control_mut(&mut self) -> &mut ControlPacket {
        &mut self.control
    }

    /// Request an autopilot mode
    pub fn set_sas_mode(&mut self, mode: SasMode) {
        self.control.set_sas_mode(mode);
    }

    /// Request a navball reference mode
    pub fn set_navball_mode(&mut self, mode: NavballMode) {
        self.control.set_navball_mode(mode);
    }

    /// Turn a main control toggle on or off
    pub fn set_main_control(&mut self, control: MainControl, on: bool) {
        self.control.set_main_control(control, on);
    }

    /// Set or clear custom control group `group` (1-10)
    pub fn set_control_group(&mut self, group: u8, on: bool) -> bool {
        self.control.set_control_group(group, on)
    }

    /// Set throttle, pitch and yaw in one go
    pub fn set_axes(&mut self, throttle: i16, pitch: i16, yaw: i16) {
        self.control.set_axes(throttle, pitch, yaw);
    }

    pub fn stats(&self) -> LinkStats {
        self.stats
    }

    pub fn config(&self) -> &LinkConfig {
        &self.config
    }

    /// Borrow the transport
    pub fn port(&self) -> &P {
        &self.port
    }

    /// Mutably borrow the transport
    pub fn port_mut(&mut self) -> &mut P {
        &mut self.port
    }

    /// Tear the session down, returning the transport and clock
    pub fn into_parts(self) -> (P, C) {
        (self.port, self.clock)
    }
}
