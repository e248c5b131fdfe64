use uuid::Uuid;

// Command target, as named by the dispatch facility
pub const TARGET: &str = "BLUEBOY";

// Command ids
pub const CMD_BEGIN_OWN_ATTITUDE: u8 = 0x10;
pub const CMD_END_OWN_ATTITUDE: u8 = 0x11;
pub const CMD_BEGIN_TEST_ATTITUDE: u8 = 0x20;
pub const CMD_END_TEST_ATTITUDE: u8 = 0x21;
pub const CMD_UNKNOWN_DEVICE: u8 = 0x00;

// Logging period bounds
pub const MIN_PERIOD: i64 = 0;
pub const MAX_PERIOD: i64 = 65535;

// Operator field names are "<DEVICE><suffix>"
pub const PERIOD_FIELD_SUFFIX: &str = "_PERIOD";
pub const MODE_FIELD_SUFFIX: &str = "_MODE";

// Packet framing
pub const SYNC_PATTERN: u32 = 0xDEAD_BEEF;
pub const HEADER_LEN: usize = 6;

// BLE serial module
pub const SERVICE_UUID: Uuid = Uuid::from_u128(0x0000ffe000001000800000805f9b34fb);
pub const CHARACTERISTIC_UUID: Uuid = Uuid::from_u128(0x0000ffe100001000800000805f9b34fb);
pub const DEFAULT_LINK_NAME: &str = "Blueboy";
pub const DEFAULT_SCAN_TIMEOUT_SECS: u64 = 5;
pub const BLE_CHUNK_LEN: usize = 20;
