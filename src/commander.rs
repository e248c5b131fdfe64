use crate::{
    constants::*,
    dispatch::CommandSink,
    fields::FieldSource,
    types::{period_in_range, AttitudeMode, Device},
};
use strum::IntoEnumIterator;
use tracing::debug;

/// Map an operator mode label to its numeric code. Exact match only.
pub fn resolve_attitude_mode(label: &str) -> u8 {
    AttitudeMode::from_label(label).code()
}

/// Lenient integer parse of operator-entered text.
///
/// Leading whitespace is skipped, one sign is accepted, and decimal digits are
/// consumed up to the first other character. A single underscore between two
/// digits is ignored. Text with no leading digits reads as 0; values beyond
/// `i64` saturate.
pub fn parse_period(text: &str) -> i64 {
    let text = text.trim_start_matches(|c: char| matches!(c, ' ' | '\t' | '\n' | '\x0b' | '\x0c' | '\r'));
    let (negative, digits) = match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    };

    let bytes = digits.as_bytes();
    let mut value: i64 = 0;
    let mut after_digit = false;
    for (i, &b) in bytes.iter().enumerate() {
        match b {
            b'0'..=b'9' => {
                value = value.saturating_mul(10).saturating_add((b - b'0') as i64);
                after_digit = true;
            }
            b'_' if after_digit && bytes.get(i + 1).is_some_and(|next| next.is_ascii_digit()) => {
                after_digit = false;
            }
            _ => break,
        }
    }

    if negative {
        -value
    } else {
        value
    }
}

pub fn begin_command_text(device: &str, id: u8, period: i64, mode: u8) -> String {
    format!(
        "{} BEGIN{}ATT with ID {}, PERIOD {}, TYPE {}",
        TARGET, device, id, period, mode
    )
}

pub fn end_command_text(device: &str, id: u8) -> String {
    format!("{} END{}ATT with ID {}", TARGET, device, id)
}

fn field_name(device: &str, suffix: &str) -> String {
    format!("{}{}", device, suffix)
}

/// Builds attitude logging commands from operator fields and hands them to a
/// sink. Holds no state between calls.
pub struct Commander<F, S> {
    fields: F,
    sink: S,
}

impl<F: FieldSource, S: CommandSink> Commander<F, S> {
    pub fn new(fields: F, sink: S) -> Self {
        Commander { fields, sink }
    }

    pub fn fields(&self) -> &F {
        &self.fields
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    pub fn into_parts(self) -> (F, S) {
        (self.fields, self.sink)
    }

    /// Start attitude logging for `device` using its `_PERIOD` and `_MODE`
    /// fields. Does nothing if the period is outside 0..=65535.
    pub fn begin_attitude(&mut self, device: &str) {
        let device = device.to_uppercase();
        let period = parse_period(&self.fields.field_text(&field_name(&device, PERIOD_FIELD_SUFFIX)));
        let mode = resolve_attitude_mode(&self.fields.field_text(&field_name(&device, MODE_FIELD_SUFFIX)));

        if !period_in_range(period) {
            debug!(device = %device, period, "period out of range, begin command dropped");
            return;
        }

        let id = device
            .parse::<Device>()
            .map(Device::begin_id)
            .unwrap_or(CMD_UNKNOWN_DEVICE);

        let command = begin_command_text(&device, id, period, mode);
        debug!(command = %command, "dispatching");
        self.sink.send_command(&command);
    }

    pub fn begin_attitude_all(&mut self) {
        for device in Device::iter() {
            self.begin_attitude(device.as_ref());
        }
    }

    /// Stop attitude logging for `device`. Always emits.
    pub fn end_attitude(&mut self, device: &str) {
        let device = device.to_uppercase();
        let id = device
            .parse::<Device>()
            .map(Device::end_id)
            .unwrap_or(CMD_UNKNOWN_DEVICE);

        let command = end_command_text(&device, id);
        debug!(command = %command, "dispatching");
        self.sink.send_command(&command);
    }

    pub fn end_attitude_all(&mut self) {
        for device in Device::iter() {
            self.end_attitude(device.as_ref());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatch::RecordingSink;
    use crate::fields::FieldStore;

    fn commander(fields: &[(&str, &str)]) -> Commander<FieldStore, RecordingSink> {
        Commander::new(fields.iter().copied().collect(), RecordingSink::new())
    }

    #[test]
    fn mode_resolution() {
        assert_eq!(resolve_attitude_mode("Raw"), 0);
        assert_eq!(resolve_attitude_mode("Euler"), 1);
        assert_eq!(resolve_attitude_mode("Quaternion"), 2);
        assert_eq!(resolve_attitude_mode("RAW"), 0);
        assert_eq!(resolve_attitude_mode("euler"), 0);
        assert_eq!(resolve_attitude_mode("quaternion"), 0);
        assert_eq!(resolve_attitude_mode(" Euler"), 0);
        assert_eq!(resolve_attitude_mode(""), 0);
    }

    #[test]
    fn period_parsing() {
        assert_eq!(parse_period("100"), 100);
        assert_eq!(parse_period("  42ms"), 42);
        assert_eq!(parse_period("\t\n7"), 7);
        assert_eq!(parse_period("-5"), -5);
        assert_eq!(parse_period("+9"), 9);
        assert_eq!(parse_period("1_000"), 1000);
        assert_eq!(parse_period("1__0"), 1);
        assert_eq!(parse_period("_1"), 0);
        assert_eq!(parse_period("12_"), 12);
        assert_eq!(parse_period("12.9"), 12);
        assert_eq!(parse_period("0x10"), 0);
        assert_eq!(parse_period("abc"), 0);
        assert_eq!(parse_period(""), 0);
        assert_eq!(parse_period("-"), 0);
        assert_eq!(parse_period("--1"), 0);
        assert_eq!(parse_period("99999999999999999999999"), i64::MAX);
    }

    #[test]
    fn begin_lowercase_device() {
        let mut c = commander(&[("OWN_PERIOD", "100"), ("OWN_MODE", "Euler")]);
        c.begin_attitude("own");
        assert_eq!(c.sink().commands(), ["BLUEBOY BEGINOWNATT with ID 16, PERIOD 100, TYPE 1"]);
    }

    #[test]
    fn begin_out_of_range_is_silent() {
        let mut c = commander(&[("TEST_PERIOD", "70000"), ("TEST_MODE", "Raw")]);
        c.begin_attitude("TEST");
        c.begin_attitude("test");
        assert!(c.sink().commands().is_empty());
    }

    #[test]
    fn begin_with_missing_fields_uses_defaults() {
        let mut c = commander(&[]);
        c.begin_attitude("Test");
        assert_eq!(c.sink().commands(), ["BLUEBOY BEGINTESTATT with ID 32, PERIOD 0, TYPE 0"]);
    }

    #[test]
    fn begin_unknown_device_uses_id_zero() {
        let mut c = commander(&[("FOO_PERIOD", "5"), ("FOO_MODE", "Quaternion")]);
        c.begin_attitude("foo");
        assert_eq!(c.sink().commands(), ["BLUEBOY BEGINFOOATT with ID 0, PERIOD 5, TYPE 2"]);
    }

    #[test]
    fn fields_are_looked_up_by_upper_case_name() {
        let mut c = commander(&[("own_PERIOD", "100"), ("OWN_PERIOD", "200")]);
        c.begin_attitude("own");
        assert_eq!(c.sink().commands(), ["BLUEBOY BEGINOWNATT with ID 16, PERIOD 200, TYPE 0"]);
    }

    #[test]
    fn end_always_emits() {
        let mut c = commander(&[("OWN_PERIOD", "-1")]);
        c.end_attitude("own");
        c.end_attitude("TEST");
        c.end_attitude("bar");
        assert_eq!(
            c.sink().commands(),
            [
                "BLUEBOY ENDOWNATT with ID 17",
                "BLUEBOY ENDTESTATT with ID 33",
                "BLUEBOY ENDBARATT with ID 0",
            ]
        );
    }

    #[test]
    fn all_variants_go_own_then_test() {
        let mut c = commander(&[
            ("OWN_PERIOD", "10"),
            ("OWN_MODE", "Raw"),
            ("TEST_PERIOD", "20"),
            ("TEST_MODE", "Euler"),
        ]);
        c.begin_attitude_all();
        c.end_attitude_all();
        assert_eq!(
            c.sink().commands(),
            [
                "BLUEBOY BEGINOWNATT with ID 16, PERIOD 10, TYPE 0",
                "BLUEBOY BEGINTESTATT with ID 32, PERIOD 20, TYPE 1",
                "BLUEBOY ENDOWNATT with ID 17",
                "BLUEBOY ENDTESTATT with ID 33",
            ]
        );
    }
}
