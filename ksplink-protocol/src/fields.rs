//! Bit-packed record fields
//!
//! Several record fields pack more than one value into a single integer.
//! Each is wrapped in a transparent newtype so callers work with named
//! modes and flags instead of masks:
//!
//! - [`NavballSasMode`]: low nibble = autopilot (SAS) mode, high nibble =
//!   navball reference mode
//! - [`MainControls`]: one bit per [`MainControl`]
//! - [`ActionGroups`]: one bit per [`ActionGroup`] (telemetry, read-only)
//! - [`ControlGroups`]: custom control groups 1-10, bit `n` = group `n`

/// Autopilot (SAS) mode, stored in the low nibble of [`NavballSasMode`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SasMode {
    Off,
    StabilityAssist,
    Prograde,
    Retrograde,
    Normal,
    Antinormal,
    RadialIn,
    RadialOut,
    Target,
    AntiTarget,
    ManeuverNode,
}

impl SasMode {
    /// Parse a mode from its 4-bit wire value
    pub fn from_bits(bits: u8) -> Option<Self> {
        match bits {
            0 => Some(SasMode::Off),
            1 => Some(SasMode::StabilityAssist),
            2 => Some(SasMode::Prograde),
            3 => Some(SasMode::Retrograde),
            4 => Some(SasMode::Normal),
            5 => Some(SasMode::Antinormal),
            6 => Some(SasMode::RadialIn),
            7 => Some(SasMode::RadialOut),
            8 => Some(SasMode::Target),
            9 => Some(SasMode::AntiTarget),
            10 => Some(SasMode::ManeuverNode),
            _ => None,
        }
    }

    /// Convert to the 4-bit wire value
    pub fn bits(self) -> u8 {
        self as u8
    }
}

/// Navball reference mode, stored in the high nibble of [`NavballSasMode`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum NavballMode {
    /// Leave the navball as it is
    Ignore,
    Orbit,
    Surface,
    Target,
}

impl NavballMode {
    /// Parse a mode from its 4-bit wire value
    pub fn from_bits(bits: u8) -> Option<Self> {
        match bits {
            0 => Some(NavballMode::Ignore),
            1 => Some(NavballMode::Orbit),
            2 => Some(NavballMode::Surface),
            3 => Some(NavballMode::Target),
            _ => None,
        }
    }

    /// Convert to the 4-bit wire value
    pub fn bits(self) -> u8 {
        self as u8
    }
}

/// Combined autopilot / navball byte
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(transparent)]
pub struct NavballSasMode(pub u8);

impl NavballSasMode {
    const SAS_MASK: u8 = 0x0F;
    const NAVBALL_SHIFT: u8 = 4;

    /// Raw 4-bit autopilot value (bits 0-3)
    pub fn sas_bits(self) -> u8 {
        self.0 & Self::SAS_MASK
    }

    /// Raw 4-bit navball value (bits 4-7)
    pub fn navball_bits(self) -> u8 {
        self.0 >> Self::NAVBALL_SHIFT
    }

    /// Autopilot mode, `None` for values the protocol does not define
    pub fn sas_mode(self) -> Option<SasMode> {
        SasMode::from_bits(self.sas_bits())
    }

    /// Navball mode, `None` for values the protocol does not define
    pub fn navball_mode(self) -> Option<NavballMode> {
        NavballMode::from_bits(self.navball_bits())
    }

    /// Replace the low nibble, keeping the navball mode
    pub fn set_sas_mode(&mut self, mode: SasMode) {
        self.0 = (self.0 & !Self::SAS_MASK) | (mode.bits() & Self::SAS_MASK);
    }

    /// Replace the high nibble, keeping the autopilot mode
    pub fn set_navball_mode(&mut self, mode: NavballMode) {
        self.0 = (self.0 & Self::SAS_MASK) | (mode.bits() << Self::NAVBALL_SHIFT);
    }
}

/// Main pilot toggles, one bit each in [`MainControls`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MainControl {
    Stage = 0,
    Abort = 1,
    Precision = 2,
    Brakes = 3,
    Gear = 4,
    Lights = 5,
    Rcs = 6,
    Sas = 7,
}

impl MainControl {
    /// All toggles in bit order
    pub const ALL: [MainControl; 8] = [
        MainControl::Stage,
        MainControl::Abort,
        MainControl::Precision,
        MainControl::Brakes,
        MainControl::Gear,
        MainControl::Lights,
        MainControl::Rcs,
        MainControl::Sas,
    ];

    /// Bit index within the main controls byte
    pub fn bit(self) -> u8 {
        self as u8
    }
}

/// Main controls byte of the control record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(transparent)]
pub struct MainControls(pub u8);

impl MainControls {
    /// Whether a toggle is currently on
    pub fn get(self, control: MainControl) -> bool {
        self.0 & (1 << control.bit()) != 0
    }

    /// Turn a toggle on or off, leaving the others alone
    pub fn set(&mut self, control: MainControl, on: bool) {
        if on {
            self.0 |= 1 << control.bit();
        } else {
            self.0 &= !(1 << control.bit());
        }
    }
}

/// Action group status bits reported in telemetry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ActionGroup {
    Sas = 0,
    Rcs = 1,
    Light = 2,
    Gear = 3,
    Brakes = 4,
    Abort = 5,
    Custom01 = 6,
    Custom02 = 7,
    Custom03 = 8,
    Custom04 = 9,
    Custom05 = 10,
    Custom06 = 11,
    Custom07 = 12,
    Custom08 = 13,
    Custom09 = 14,
    Custom10 = 15,
}

impl ActionGroup {
    /// Bit index within the action group mask
    pub fn bit(self) -> u8 {
        self as u8
    }

    /// The custom action group `n` (1-10)
    pub fn custom(n: u8) -> Option<Self> {
        match n {
            1 => Some(ActionGroup::Custom01),
            2 => Some(ActionGroup::Custom02),
            3 => Some(ActionGroup::Custom03),
            4 => Some(ActionGroup::Custom04),
            5 => Some(ActionGroup::Custom05),
            6 => Some(ActionGroup::Custom06),
            7 => Some(ActionGroup::Custom07),
            8 => Some(ActionGroup::Custom08),
            9 => Some(ActionGroup::Custom09),
            10 => Some(ActionGroup::Custom10),
            _ => None,
        }
    }
}

/// Action group status mask of the telemetry record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(transparent)]
pub struct ActionGroups(pub u16);

impl ActionGroups {
    /// Whether the host reports this group as active
    pub fn is_active(self, group: ActionGroup) -> bool {
        (self.0 >> group.bit()) & 1 == 1
    }
}

/// Custom control groups of the control record
///
/// Group `n` (1-10) lives at bit `n`; bit 0 and bits 11-15 are unused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(transparent)]
pub struct ControlGroups(pub u16);

impl ControlGroups {
    /// Lowest valid group number
    pub const FIRST: u8 = 1;
    /// Highest valid group number
    pub const LAST: u8 = 10;

    /// Whether group `n` is set; out-of-range groups read as off
    pub fn get(self, group: u8) -> bool {
        Self::valid(group) && (self.0 >> group) & 1 == 1
    }

    /// Set or clear group `n`
    ///
    /// Returns `false` and changes nothing when `n` is outside 1-10.
    pub fn set(&mut self, group: u8, on: bool) -> bool {
        if !Self::valid(group) {
            return false;
        }
        if on {
            self.0 |= 1 << group;
        } else {
            self.0 &= !(1 << group);
        }
        true
    }

    fn valid(group: u8) -> bool {
        (Self::FIRST..=Self::LAST).contains(&group)
    }
}

/// Control mode byte of the control record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ControlMode {
    #[default]
    Stage,
    Docking,
    Map,
}

impl ControlMode {
    /// Parse from the wire byte
    pub fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            0 => Some(ControlMode::Stage),
            1 => Some(ControlMode::Docking),
            2 => Some(ControlMode::Map),
            _ => None,
        }
    }

    /// Convert to the wire byte
    pub fn to_byte(self) -> u8 {
        self as u8
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sas_mode_roundtrip() {
        for bits in 0..=10 {
            let mode = SasMode::from_bits(bits).unwrap();
            assert_eq!(mode.bits(), bits);
        }
        assert!(SasMode::from_bits(11).is_none());
        assert!(SasMode::from_bits(15).is_none());
    }

    #[test]
    fn test_navball_sas_nibbles() {
        // Navball = Surface (2), SAS = Retrograde (3)
        let packed = NavballSasMode(0x23);
        assert_eq!(packed.sas_mode(), Some(SasMode::Retrograde));
        assert_eq!(packed.navball_mode(), Some(NavballMode::Surface));
    }

    #[test]
    fn test_set_sas_keeps_navball() {
        let mut packed = NavballSasMode(0x3F);
        packed.set_sas_mode(SasMode::ManeuverNode);
        assert_eq!(packed.0, 0x3A);
        assert_eq!(packed.navball_mode(), Some(NavballMode::Target));
    }

    #[test]
    fn test_set_navball_keeps_sas() {
        let mut packed = NavballSasMode(0xF2);
        packed.set_navball_mode(NavballMode::Orbit);
        assert_eq!(packed.0, 0x12);
        assert_eq!(packed.sas_mode(), Some(SasMode::Prograde));
    }

    #[test]
    fn test_undefined_nibbles() {
        let packed = NavballSasMode(0xFF);
        assert_eq!(packed.sas_bits(), 0x0F);
        assert_eq!(packed.navball_bits(), 0x0F);
        assert!(packed.sas_mode().is_none());
        assert!(packed.navball_mode().is_none());
    }

    #[test]
    fn test_main_controls() {
        let mut controls = MainControls::default();
        controls.set(MainControl::Sas, true);
        controls.set(MainControl::Stage, true);
        assert_eq!(controls.0, 0b1000_0001);

        controls.set(MainControl::Sas, false);
        assert_eq!(controls.0, 0b0000_0001);
        assert!(controls.get(MainControl::Stage));
        assert!(!controls.get(MainControl::Gear));
    }

    #[test]
    fn test_main_control_bits_are_distinct() {
        let mut controls = MainControls::default();
        for control in MainControl::ALL {
            controls.set(control, true);
        }
        assert_eq!(controls.0, 0xFF);
    }

    #[test]
    fn test_action_groups() {
        let groups = ActionGroups(0b1000_0000_0100_0001);
        assert!(groups.is_active(ActionGroup::Sas));
        assert!(groups.is_active(ActionGroup::Custom01));
        assert!(groups.is_active(ActionGroup::Custom10));
        assert!(!groups.is_active(ActionGroup::Rcs));
        assert_eq!(ActionGroup::custom(10), Some(ActionGroup::Custom10));
        assert_eq!(ActionGroup::custom(0), None);
    }

    #[test]
    fn test_control_groups() {
        let mut groups = ControlGroups::default();
        assert!(groups.set(1, true));
        assert!(groups.set(10, true));
        assert_eq!(groups.0, (1 << 1) | (1 << 10));
        assert!(groups.get(10));

        assert!(groups.set(1, false));
        assert!(!groups.get(1));
    }

    #[test]
    fn test_control_groups_out_of_range() {
        let mut groups = ControlGroups::default();
        assert!(!groups.set(0, true));
        assert!(!groups.set(11, true));
        assert_eq!(groups.0, 0);
        assert!(!ControlGroups(0xFFFF).get(0));
    }

    #[test]
    fn test_control_mode() {
        assert_eq!(ControlMode::from_byte(2), Some(ControlMode::Map));
        assert_eq!(ControlMode::Docking.to_byte(), 1);
        assert!(ControlMode::from_byte(3).is_none());
    }
}
