//! Fixed-layout records carried inside frames
//!
//! Each record has one tag and one byte size. The first byte of every
//! encoded record is its tag, which is not stored in the struct. Fields are
//! packed little-endian with no padding; adding or removing a field changes
//! the size and is a breaking change to the wire format.
//!
//! | Record            | Tag | Size | Direction      |
//! |-------------------|-----|------|----------------|
//! | [`HandshakePacket`] | 0   | 4    | both           |
//! | [`VesselData`]      | 1   | 214  | host → device  |
//! | [`ControlPacket`]   | 101 | 25   | device → host  |

use crate::fields::{
    ActionGroup, ActionGroups, ControlGroups, ControlMode, MainControl, MainControls,
    NavballMode, NavballSasMode, SasMode,
};
use crate::frame::FrameError;
use crate::wire::{Reader, Writer};

/// A record with a fixed tag and byte layout
pub trait WireRecord: Sized {
    /// Type tag, written as the record's leading byte
    const TAG: u8;
    /// Encoded size in bytes, tag included
    const SIZE: usize;

    /// Encode into `out`, tag first, returning the number of bytes written
    fn encode(&self, out: &mut [u8]) -> Result<usize, FrameError>;

    /// Decode from exactly `SIZE` bytes starting with `TAG`
    fn decode(bytes: &[u8]) -> Option<Self>;
}

fn writer_for<R: WireRecord>(out: &mut [u8]) -> Result<Writer<'_>, FrameError> {
    if out.len() < R::SIZE {
        return Err(FrameError::BufferTooSmall);
    }
    let mut w = Writer::new(&mut out[..R::SIZE]);
    w.u8(R::TAG);
    Ok(w)
}

fn reader_for<R: WireRecord>(bytes: &[u8]) -> Option<Reader<'_>> {
    match bytes.split_first() {
        Some((&tag, body)) if tag == R::TAG && bytes.len() == R::SIZE => Some(Reader::new(body)),
        _ => None,
    }
}

/// Capability handshake
///
/// The host opens with a handshake; the device answers with its own
/// capability bytes ([`HandshakePacket::DEVICE`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct HandshakePacket {
    pub m1: u8,
    pub m2: u8,
    pub m3: u8,
}

impl HandshakePacket {
    /// Capability constants this device reports
    pub const DEVICE: HandshakePacket = HandshakePacket {
        m1: 3,
        m2: 1,
        m3: 4,
    };
}

impl WireRecord for HandshakePacket {
    const TAG: u8 = 0;
    const SIZE: usize = 4;

    fn encode(&self, out: &mut [u8]) -> Result<usize, FrameError> {
        let mut w = writer_for::<Self>(out)?;
        w.u8(self.m1);
        w.u8(self.m2);
        w.u8(self.m3);
        Ok(w.position())
    }

    fn decode(bytes: &[u8]) -> Option<Self> {
        let mut r = reader_for::<Self>(bytes)?;
        Some(Self {
            m1: r.u8(),
            m2: r.u8(),
            m3: r.u8(),
        })
    }
}

/// Pilot and autopilot inputs sent to the host
///
/// Axes are -1000..=1000, throttles 0..=1000. Values outside those ranges
/// are sent as-is; the host clamps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ControlPacket {
    pub main_controls: MainControls,
    /// Raw [`ControlMode`] byte
    pub mode: u8,
    pub control_groups: ControlGroups,
    pub navball_sas_mode: NavballSasMode,
    pub additional_control_byte1: u8,
    pub pitch: i16,
    pub roll: i16,
    pub yaw: i16,
    pub tx: i16,
    pub ty: i16,
    pub tz: i16,
    pub wheel_steer: i16,
    pub throttle: i16,
    pub wheel_throttle: i16,
}

impl Default for ControlPacket {
    fn default() -> Self {
        Self {
            main_controls: MainControls::default(),
            mode: ControlMode::Stage.to_byte(),
            control_groups: ControlGroups::default(),
            navball_sas_mode: NavballSasMode::default(),
            additional_control_byte1: 0,
            pitch: 0,
            roll: 0,
            yaw: 0,
            tx: 0,
            ty: 0,
            tz: 0,
            wheel_steer: 0,
            throttle: 0,
            wheel_throttle: 0,
        }
    }
}

impl ControlPacket {
    /// Set throttle, pitch and yaw in one go
    pub fn set_axes(&mut self, throttle: i16, pitch: i16, yaw: i16) {
        self.throttle = throttle;
        self.pitch = pitch;
        self.yaw = yaw;
    }

    /// Turn a main control toggle on or off
    pub fn set_main_control(&mut self, control: MainControl, on: bool) {
        self.main_controls.set(control, on);
    }

    /// Set or clear custom control group `group` (1-10)
    ///
    /// Returns `false` for groups outside 1-10.
    pub fn set_control_group(&mut self, group: u8, on: bool) -> bool {
        self.control_groups.set(group, on)
    }

    /// Request an autopilot mode
    pub fn set_sas_mode(&mut self, mode: SasMode) {
        self.navball_sas_mode.set_sas_mode(mode);
    }

    /// Request a navball reference mode
    pub fn set_navball_mode(&mut self, mode: NavballMode) {
        self.navball_sas_mode.set_navball_mode(mode);
    }

    pub fn control_mode(&self) -> Option<ControlMode> {
        ControlMode::from_byte(self.mode)
    }

    pub fn set_control_mode(&mut self, mode: ControlMode) {
        self.mode = mode.to_byte();
    }
}

impl WireRecord for ControlPacket {
    const TAG: u8 = 101;
    const SIZE: usize = 25;

    fn encode(&self, out: &mut [u8]) -> Result<usize, FrameError> {
        let mut w = writer_for::<Self>(out)?;
        w.u8(self.main_controls.0);
        w.u8(self.mode);
        w.u16(self.control_groups.0);
        w.u8(self.navball_sas_mode.0);
        w.u8(self.additional_control_byte1);
        w.i16(self.pitch);
        w.i16(self.roll);
        w.i16(self.yaw);
        w.i16(self.tx);
        w.i16(self.ty);
        w.i16(self.tz);
        w.i16(self.wheel_steer);
        w.i16(self.throttle);
        w.i16(self.wheel_throttle);
        Ok(w.position())
    }

    fn decode(bytes: &[u8]) -> Option<Self> {
        let mut r = reader_for::<Self>(bytes)?;
        Some(Self {
            main_controls: MainControls(r.u8()),
            mode: r.u8(),
            control_groups: ControlGroups(r.u16()),
            navball_sas_mode: NavballSasMode(r.u8()),
            additional_control_byte1: r.u8(),
            pitch: r.i16(),
            roll: r.i16(),
            yaw: r.i16(),
            tx: r.i16(),
            ty: r.i16(),
            tz: r.i16(),
            wheel_steer: r.i16(),
            throttle: r.i16(),
            wheel_throttle: r.i16(),
        })
    }
}

/// Vessel telemetry streamed by the host
///
/// Distances in metres, speeds in m/s, times in seconds unless noted.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct VesselData {
    /// Apoapsis altitude
    pub ap: f32,
    /// Periapsis altitude
    pub pe: f32,
    pub semi_major_axis: f32,
    pub semi_minor_axis: f32,
    /// Vertical velocity
    pub vvi: f32,
    /// Eccentricity
    pub e: f32,
    /// Inclination (degrees)
    pub inc: f32,
    /// Acceleration in g
    pub g: f32,
    /// Time to apoapsis
    pub t_ap: i32,
    /// Time to periapsis
    pub t_pe: i32,
    pub true_anomaly: f32,
    pub density: f32,
    /// Orbital period
    pub period: i32,
    /// Radar altitude
    pub r_alt: f32,
    pub alt: f32,
    /// Surface velocity
    pub v_surf: f32,
    pub lat: f32,
    pub lon: f32,
    pub liquid_fuel_tot: f32,
    pub liquid_fuel: f32,
    pub oxidizer_tot: f32,
    pub oxidizer: f32,
    pub echarge_tot: f32,
    pub echarge: f32,
    pub monoprop_tot: f32,
    pub monoprop: f32,
    pub intake_air_tot: f32,
    pub intake_air: f32,
    pub solid_fuel_tot: f32,
    pub solid_fuel: f32,
    pub xenon_gas_tot: f32,
    pub xenon_gas: f32,
    /// Current-stage liquid fuel capacity
    pub liquid_fuel_tot_s: f32,
    pub liquid_fuel_s: f32,
    /// Current-stage oxidizer capacity
    pub oxidizer_tot_s: f32,
    pub oxidizer_s: f32,
    pub mission_time: u32,
    pub delta_time: f32,
    /// Orbital velocity
    pub v_orbit: f32,
    /// Time to next maneuver node
    pub mn_time: u32,
    /// Delta-v of next maneuver node
    pub mn_delta_v: f32,
    pub pitch: f32,
    pub roll: f32,
    pub heading: f32,
    pub action_groups: ActionGroups,
    /// Sphere of influence (sun-planet-moon digits, e.g. 130 = Kerbin)
    pub soi_number: u8,
    /// Hottest part, percent of its limit
    pub max_overheat: u8,
    pub mach_number: f32,
    /// Indicated air speed
    pub ias: f32,
    pub current_stage: u8,
    pub total_stage: u8,
    /// Distance to target vessel
    pub target_dist: f32,
    /// Target relative velocity
    pub target_v: f32,
    pub navball_sas_mode: NavballSasMode,
    // Vector angles below are fixed point, degrees × 50
    pub prograde_pitch: u16,
    pub prograde_heading: u16,
    pub maneuver_pitch: u16,
    pub maneuver_heading: u16,
    pub target_pitch: u16,
    pub target_heading: u16,
    pub normal_heading: u16,
}

impl VesselData {
    /// Whether the host reports an action group as active
    pub fn action_group(&self, group: ActionGroup) -> bool {
        self.action_groups.is_active(group)
    }

    /// Autopilot mode currently engaged on the vessel
    pub fn sas_mode(&self) -> Option<SasMode> {
        self.navball_sas_mode.sas_mode()
    }

    /// Navball reference mode currently shown
    pub fn navball_mode(&self) -> Option<NavballMode> {
        self.navball_sas_mode.navball_mode()
    }
}

impl WireRecord for VesselData {
    const TAG: u8 = 1;
    const SIZE: usize = 214;

    fn encode(&self, out: &mut [u8]) -> Result<usize, FrameError> {
        let mut w = writer_for::<Self>(out)?;
        w.f32(self.ap);
        w.f32(self.pe);
        w.f32(self.semi_major_axis);
        w.f32(self.semi_minor_axis);
        w.f32(self.vvi);
        w.f32(self.e);
        w.f32(self.inc);
        w.f32(self.g);
        w.i32(self.t_ap);
        w.i32(self.t_pe);
        w.f32(self.true_anomaly);
        w.f32(self.density);
        w.i32(self.period);
        w.f32(self.r_alt);
        w.f32(self.alt);
        w.f32(self.v_surf);
        w.f32(self.lat);
        w.f32(self.lon);
        w.f32(self.liquid_fuel_tot);
        w.f32(self.liquid_fuel);
        w.f32(self.oxidizer_tot);
        w.f32(self.oxidizer);
        w.f32(self.echarge_tot);
        w.f32(self.echarge);
        w.f32(self.monoprop_tot);
        w.f32(self.monoprop);
        w.f32(self.intake_air_tot);
        w.f32(self.intake_air);
        w.f32(self.solid_fuel_tot);
        w.f32(self.solid_fuel);
        w.f32(self.xenon_gas_tot);
        w.f32(self.xenon_gas);
        w.f32(self.liquid_fuel_tot_s);
        w.f32(self.liquid_fuel_s);
        w.f32(self.oxidizer_tot_s);
        w.f32(self.oxidizer_s);
        w.u32(self.mission_time);
        w.f32(self.delta_time);
        w.f32(self.v_orbit);
        w.u32(self.mn_time);
        w.f32(self.mn_delta_v);
        w.f32(self.pitch);
        w.f32(self.roll);
        w.f32(self.heading);
        w.u16(self.action_groups.0);
        w.u8(self.soi_number);
        w.u8(self.max_overheat);
        w.f32(self.mach_number);
        w.f32(self.ias);
        w.u8(self.current_stage);
        w.u8(self.total_stage);
        w.f32(self.target_dist);
        w.f32(self.target_v);
        w.u8(self.navball_sas_mode.0);
        w.u16(self.prograde_pitch);
        w.u16(self.prograde_heading);
        w.u16(self.maneuver_pitch);
        w.u16(self.maneuver_heading);
        w.u16(self.target_pitch);
        w.u16(self.target_heading);
        w.u16(self.normal_heading);
        Ok(w.position())
    }

    fn decode(bytes: &[u8]) -> Option<Self> {
        let mut r = reader_for::<Self>(bytes)?;
        Some(Self {
            ap: r.f32(),
            pe: r.f32(),
            semi_major_axis: r.f32(),
            semi_minor_axis: r.f32(),
            vvi: r.f32(),
            e: r.f32(),
            inc: r.f32(),
            g: r.f32(),
            t_ap: r.i32(),
            t_pe: r.i32(),
            true_anomaly: r.f32(),
            density: r.f32(),
            period: r.i32(),
            r_alt: r.f32(),
            alt: r.f32(),
            v_surf: r.f32(),
            lat: r.f32(),
            lon: r.f32(),
            liquid_fuel_tot: r.f32(),
            liquid_fuel: r.f32(),
            oxidizer_tot: r.f32(),
            oxidizer: r.f32(),
            echarge_tot: r.f32(),
            echarge: r.f32(),
            monoprop_tot: r.f32(),
            monoprop: r.f32(),
            intake_air_tot: r.f32(),
            intake_air: r.f32(),
            solid_fuel_tot: r.f32(),
            solid_fuel: r.f32(),
            xenon_gas_tot: r.f32(),
            xenon_gas: r.f32(),
            liquid_fuel_tot_s: r.f32(),
            liquid_fuel_s: r.f32(),
            oxidizer_tot_s: r.f32(),
            oxidizer_s: r.f32(),
            mission_time: r.u32(),
            delta_time: r.f32(),
            v_orbit: r.f32(),
            mn_time: r.u32(),
            mn_delta_v: r.f32(),
            pitch: r.f32(),
            roll: r.f32(),
            heading: r.f32(),
            action_groups: ActionGroups(r.u16()),
            soi_number: r.u8(),
            max_overheat: r.u8(),
            mach_number: r.f32(),
            ias: r.f32(),
            current_stage: r.u8(),
            total_stage: r.u8(),
            target_dist: r.f32(),
            target_v: r.f32(),
            navball_sas_mode: NavballSasMode(r.u8()),
            prograde_pitch: r.u16(),
            prograde_heading: r.u16(),
            maneuver_pitch: r.u16(),
            maneuver_heading: r.u16(),
            target_pitch: r.u16(),
            target_heading: r.u16(),
            normal_heading: r.u16(),
        })
    }
}

/// Any record the link knows how to carry
// Telemetry dwarfs the other variants; there is no allocator to box it.
#[allow(clippy::large_enum_variant)]
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Record {
    Handshake(HandshakePacket),
    Telemetry(VesselData),
    Control(ControlPacket),
}

impl Record {
    /// Fixed payload length for a tag, `None` for unknown tags
    pub fn expected_len(tag: u8) -> Option<u8> {
        let size = match tag {
            HandshakePacket::TAG => HandshakePacket::SIZE,
            VesselData::TAG => VesselData::SIZE,
            ControlPacket::TAG => ControlPacket::SIZE,
            _ => return None,
        };
        Some(size as u8)
    }

    /// Decode a complete payload (tag byte first)
    pub fn decode(payload: &[u8]) -> Option<Self> {
        match *payload.first()? {
            HandshakePacket::TAG => HandshakePacket::decode(payload).map(Record::Handshake),
            VesselData::TAG => VesselData::decode(payload).map(Record::Telemetry),
            ControlPacket::TAG => ControlPacket::decode(payload).map(Record::Control),
            _ => None,
        }
    }

    /// Encode into `out`, returning the number of bytes written
    pub fn encode(&self, out: &mut [u8]) -> Result<usize, FrameError> {
        match self {
            Record::Handshake(packet) => packet.encode(out),
            Record::Telemetry(packet) => packet.encode(out),
            Record::Control(packet) => packet.encode(out),
        }
    }

    /// Type tag of this variant
    pub fn tag(&self) -> u8 {
        match self {
            Record::Handshake(_) => HandshakePacket::TAG,
            Record::Telemetry(_) => VesselData::TAG,
            Record::Control(_) => ControlPacket::TAG,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_encoded_sizes_match_layout() {
        let mut buf = [0u8; 256];
        assert_eq!(HandshakePacket::DEVICE.encode(&mut buf), Ok(HandshakePacket::SIZE));
        assert_eq!(ControlPacket::default().encode(&mut buf), Ok(ControlPacket::SIZE));
        assert_eq!(VesselData::default().encode(&mut buf), Ok(VesselData::SIZE));
    }

    #[test]
    fn test_all_records_fit_length_byte() {
        assert!(VesselData::SIZE <= u8::MAX as usize);
        assert!(ControlPacket::SIZE <= u8::MAX as usize);
    }

    #[test]
    fn test_device_handshake_bytes() {
        let mut buf = [0u8; 4];
        HandshakePacket::DEVICE.encode(&mut buf).unwrap();
        assert_eq!(buf, [0x00, 0x03, 0x01, 0x04]);
    }

    #[test]
    fn test_encode_buffer_too_small() {
        let mut buf = [0u8; 24];
        assert_eq!(
            ControlPacket::default().encode(&mut buf),
            Err(FrameError::BufferTooSmall)
        );
    }

    #[test]
    fn test_decode_wrong_size() {
        assert!(HandshakePacket::decode(&[0, 3, 1]).is_none());
        assert!(HandshakePacket::decode(&[0, 3, 1, 4, 5]).is_none());
        assert!(HandshakePacket::decode(&[1, 3, 1, 4]).is_none());
    }

    #[test]
    fn test_control_layout() {
        let mut packet = ControlPacket::default();
        packet.set_main_control(MainControl::Gear, true);
        packet.set_control_mode(ControlMode::Map);
        packet.set_control_group(2, true);
        packet.set_sas_mode(SasMode::Prograde);
        packet.set_navball_mode(NavballMode::Orbit);
        packet.set_axes(1000, -1000, 500);

        let mut buf = [0u8; ControlPacket::SIZE];
        packet.encode(&mut buf).unwrap();

        assert_eq!(buf[0], 101); // tag
        assert_eq!(buf[1], 1 << 4); // gear
        assert_eq!(buf[2], 2); // map mode
        assert_eq!(&buf[3..5], &[0x04, 0x00]); // group 2, little-endian
        assert_eq!(buf[5], 0x12); // navball orbit, sas prograde
        assert_eq!(&buf[7..9], &(-1000i16).to_le_bytes()); // pitch
        assert_eq!(&buf[11..13], &500i16.to_le_bytes()); // yaw
        assert_eq!(&buf[21..23], &1000i16.to_le_bytes()); // throttle
    }

    #[test]
    fn test_vessel_field_offsets() {
        let vessel = VesselData {
            ap: 80_000.0,
            action_groups: ActionGroups(0xA5A5),
            navball_sas_mode: NavballSasMode(0x21),
            normal_heading: 0xBEEF,
            ..VesselData::default()
        };
        let mut buf = [0u8; VesselData::SIZE];
        vessel.encode(&mut buf).unwrap();

        assert_eq!(buf[0], 1);
        assert_eq!(&buf[1..5], &80_000.0f32.to_le_bytes());
        // 1 + 44 four-byte fields
        assert_eq!(&buf[177..179], &[0xA5, 0xA5]);
        assert_eq!(buf[199], 0x21);
        assert_eq!(&buf[212..214], &[0xEF, 0xBE]);
    }

    #[test]
    fn test_vessel_layout_walk() {
        let vessel = VesselData {
            semi_minor_axis: 2.0,
            g: 3.0,
            t_pe: -4,
            true_anomaly: 5.0,
            period: 6,
            r_alt: 7.0,
            liquid_fuel_tot: 8.0,
            oxidizer_s: 9.0,
            mission_time: 10,
            delta_time: 11.0,
            mn_time: 12,
            heading: 13.0,
            soi_number: 14,
            max_overheat: 15,
            mach_number: 16.0,
            total_stage: 17,
            target_dist: 18.0,
            target_v: 19.0,
            prograde_pitch: 20,
            target_heading: 21,
            ..VesselData::default()
        };
        let mut buf = [0u8; VesselData::SIZE];
        vessel.encode(&mut buf).unwrap();

        let f32_at = |at: usize| f32::from_le_bytes([buf[at], buf[at + 1], buf[at + 2], buf[at + 3]]);
        let u32_at = |at: usize| u32::from_le_bytes([buf[at], buf[at + 1], buf[at + 2], buf[at + 3]]);
        let u16_at = |at: usize| u16::from_le_bytes([buf[at], buf[at + 1]]);

        assert_eq!(f32_at(13), 2.0);
        assert_eq!(f32_at(29), 3.0);
        assert_eq!(u32_at(37) as i32, -4);
        assert_eq!(f32_at(41), 5.0);
        assert_eq!(u32_at(49), 6);
        assert_eq!(f32_at(53), 7.0);
        assert_eq!(f32_at(73), 8.0);
        assert_eq!(f32_at(141), 9.0);
        assert_eq!(u32_at(145), 10);
        assert_eq!(f32_at(149), 11.0);
        assert_eq!(u32_at(157), 12);
        assert_eq!(f32_at(173), 13.0);
        assert_eq!(buf[179], 14);
        assert_eq!(buf[180], 15);
        assert_eq!(f32_at(181), 16.0);
        assert_eq!(buf[190], 17);
        assert_eq!(f32_at(191), 18.0);
        assert_eq!(f32_at(195), 19.0);
        assert_eq!(u16_at(200), 20);
        assert_eq!(u16_at(210), 21);
        assert_eq!(VesselData::decode(&buf), Some(vessel));
    }

    #[test]
    fn test_vessel_accessors() {
        let vessel = VesselData {
            action_groups: ActionGroups(1 << ActionGroup::Gear.bit()),
            navball_sas_mode: NavballSasMode(0x38),
            ..VesselData::default()
        };
        assert!(vessel.action_group(ActionGroup::Gear));
        assert!(!vessel.action_group(ActionGroup::Brakes));
        assert_eq!(vessel.sas_mode(), Some(SasMode::Target));
        assert_eq!(vessel.navball_mode(), Some(NavballMode::Target));
    }

    #[test]
    fn test_record_dispatch_by_tag() {
        assert_eq!(Record::expected_len(0), Some(4));
        assert_eq!(Record::expected_len(1), Some(214));
        assert_eq!(Record::expected_len(101), Some(25));
        assert_eq!(Record::expected_len(2), None);

        let decoded = Record::decode(&[0, 3, 1, 4]).unwrap();
        assert_eq!(decoded, Record::Handshake(HandshakePacket::DEVICE));
        assert_eq!(decoded.tag(), 0);
        assert!(Record::decode(&[7, 0, 0, 0]).is_none());
        assert!(Record::decode(&[]).is_none());
    }

    fn any_control() -> impl Strategy<Value = ControlPacket> {
        (
            any::<u8>(),
            0u8..=2,
            any::<u16>(),
            any::<u8>(),
            any::<u8>(),
            prop::array::uniform7(-1000i16..=1000),
            prop::array::uniform2(0i16..=1000),
        )
            .prop_map(|(main, mode, groups, navball, extra, axes, throttles)| ControlPacket {
                main_controls: MainControls(main),
                mode,
                control_groups: ControlGroups(groups),
                navball_sas_mode: NavballSasMode(navball),
                additional_control_byte1: extra,
                pitch: axes[0],
                roll: axes[1],
                yaw: axes[2],
                tx: axes[3],
                ty: axes[4],
                tz: axes[5],
                wheel_steer: axes[6],
                throttle: throttles[0],
                wheel_throttle: throttles[1],
            })
    }

    proptest! {
        #[test]
        fn prop_handshake_roundtrip(m1 in any::<u8>(), m2 in any::<u8>(), m3 in any::<u8>()) {
            let packet = HandshakePacket { m1, m2, m3 };
            let mut buf = [0u8; HandshakePacket::SIZE];
            packet.encode(&mut buf).unwrap();
            prop_assert_eq!(HandshakePacket::decode(&buf), Some(packet));
        }

        #[test]
        fn prop_control_roundtrip(packet in any_control()) {
            let mut buf = [0u8; ControlPacket::SIZE];
            packet.encode(&mut buf).unwrap();
            prop_assert_eq!(ControlPacket::decode(&buf), Some(packet));
        }

        #[test]
        fn prop_vessel_roundtrip(
            f in prop::array::uniform32(-1.0e7f32..1.0e7),
            g in prop::array::uniform11(-1.0e7f32..1.0e7),
            times in prop::array::uniform3(any::<i32>()),
            clocks in prop::array::uniform2(any::<u32>()),
            words in prop::array::uniform8(any::<u16>()),
            bytes in prop::array::uniform5(any::<u8>()),
        ) {
            let vessel = VesselData {
                ap: f[0],
                pe: f[1],
                semi_major_axis: f[2],
                semi_minor_axis: f[3],
                vvi: f[4],
                e: f[5],
                inc: f[6],
                g: f[7],
                t_ap: times[0],
                t_pe: times[1],
                true_anomaly: f[8],
                density: f[9],
                period: times[2],
                r_alt: f[10],
                alt: f[11],
                v_surf: f[12],
                lat: f[13],
                lon: f[14],
                liquid_fuel_tot: f[15],
                liquid_fuel: f[16],
                oxidizer_tot: f[17],
                oxidizer: f[18],
                echarge_tot: f[19],
                echarge: f[20],
                monoprop_tot: f[21],
                monoprop: f[22],
                intake_air_tot: f[23],
                intake_air: f[24],
                solid_fuel_tot: f[25],
                solid_fuel: f[26],
                xenon_gas_tot: f[27],
                xenon_gas: f[28],
                liquid_fuel_tot_s: f[29],
                liquid_fuel_s: f[30],
                oxidizer_tot_s: f[31],
                oxidizer_s: g[0],
                mission_time: clocks[0],
                delta_time: g[1],
                v_orbit: g[2],
                mn_time: clocks[1],
                mn_delta_v: g[3],
                pitch: g[4],
                roll: g[5],
                heading: g[6],
                action_groups: ActionGroups(words[0]),
                soi_number: bytes[0],
                max_overheat: bytes[1],
                mach_number: g[7],
                ias: g[8],
                current_stage: bytes[2],
                total_stage: bytes[3],
                target_dist: g[9],
                target_v: g[10],
                navball_sas_mode: NavballSasMode(bytes[4]),
                prograde_pitch: words[1],
                prograde_heading: words[2],
                maneuver_pitch: words[3],
                maneuver_heading: words[4],
                target_pitch: words[5],
                target_heading: words[6],
                normal_heading: words[7],
            };
            let mut buf = [0u8; VesselData::SIZE];
            vessel.encode(&mut buf).unwrap();
            prop_assert_eq!(VesselData::decode(&buf), Some(vessel));
        }
    }
}
