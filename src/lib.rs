mod constants;
mod types;
mod commander;
mod transport;

pub mod config;
pub mod dispatch;
pub mod error;
pub mod fields;
pub mod packet;

pub use commander::{begin_command_text, end_command_text, parse_period, resolve_attitude_mode, Commander};
pub use transport::{PacketSink, Transport};
pub use types::{AttitudeMode, Device};

// Re-export commonly used items
pub use constants::{
    CMD_BEGIN_OWN_ATTITUDE, CMD_BEGIN_TEST_ATTITUDE, CMD_END_OWN_ATTITUDE, CMD_END_TEST_ATTITUDE, MAX_PERIOD,
    MIN_PERIOD, SYNC_PATTERN,
};
