use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GlobalFlags(u16);

bitflags::bitflags! {
    /// This bitflag represents the overrides requested by the logic conditions
    /// during the latest evaluation. It is cleared at the start of every
    /// update, so a flag is only present while its condition keeps running.
    impl GlobalFlags: u16 {

        /// **Bit 0** - Allow arming regardless of the arming safety.
        const OVERRIDE_ARMING_SAFETY   = 1 << 0;

        /// **Bit 1** - The throttle scale is set by a condition.
        const OVERRIDE_THROTTLE_SCALE  = 1 << 1;

        /// **Bit 2** - Roll and yaw inputs are swapped.
        const OVERRIDE_SWAP_ROLL_YAW   = 1 << 2;

        /// **Bit 3** - The roll input is inverted.
        const OVERRIDE_INVERT_ROLL     = 1 << 3;

        /// **Bit 4** - The pitch input is inverted.
        const OVERRIDE_INVERT_PITCH    = 1 << 4;

        /// **Bit 5** - The yaw input is inverted.
        const OVERRIDE_INVERT_YAW      = 1 << 5;

        /// **Bit 6** - The throttle is set by a condition.
        const OVERRIDE_THROTTLE        = 1 << 6;

        /// **Bit 7** - The OSD layout is set by a condition.
        const OVERRIDE_OSD_LAYOUT      = 1 << 7;

        /// **Bit 8** - One or more RC channels are overridden.
        const OVERRIDE_RC_CHANNEL      = 1 << 8;

        /// **Bit 9** - The loiter radius is set by a condition.
        const OVERRIDE_LOITER_RADIUS   = 1 << 9;

        /// **Bit 10** - One or more flight axes have an angle or rate target.
        const OVERRIDE_FLIGHT_AXIS     = 1 << 10;

        /// **Bit 11** - The GPS fix should be treated as lost.
        const DISABLE_GPS_FIX          = 1 << 11;

        /// **Bit 12** - The gimbal sensitivity is set by a condition.
        const OVERRIDE_GIMBAL_SENSITIVITY = 1 << 12;
    }
}
