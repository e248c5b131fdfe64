use strum::IntoEnumIterator;
use strum_macros::{AsRefStr, Display, EnumIter, EnumString};

use crate::constants::*;

/// Logical command target on the vehicle.
#[derive(Debug, EnumIter, EnumString, Display, AsRefStr, Clone, Copy, Eq, PartialEq, Hash)]
#[strum(serialize_all = "UPPERCASE", ascii_case_insensitive)]
pub enum Device {
    Own = 0x01,
    Test = 0x02,
}

impl Device {
    pub fn begin_id(self) -> u8 {
        match self {
            Device::Own => CMD_BEGIN_OWN_ATTITUDE,
            Device::Test => CMD_BEGIN_TEST_ATTITUDE,
        }
    }

    pub fn end_id(self) -> u8 {
        match self {
            Device::Own => CMD_END_OWN_ATTITUDE,
            Device::Test => CMD_END_TEST_ATTITUDE,
        }
    }
}

/// Format the vehicle streams attitude data in.
#[derive(Debug, EnumIter, EnumString, Display, Clone, Copy, Eq, PartialEq, Hash, Default)]
pub enum AttitudeMode {
    #[default]
    Raw = 0,
    Euler = 1,
    Quaternion = 2,
}

impl AttitudeMode {
    /// Exact, case-sensitive label match. Anything unrecognized is `Raw`.
    pub fn from_label(label: &str) -> Self {
        label.parse().unwrap_or_default()
    }

    pub fn code(self) -> u8 {
        self as u8
    }

    pub fn from_code(code: u8) -> Option<Self> {
        AttitudeMode::iter().find(|mode| mode.code() == code)
    }
}

pub(crate) fn period_in_range(period: i64) -> bool {
    (MIN_PERIOD..=MAX_PERIOD).contains(&period)
}
