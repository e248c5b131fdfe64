//! Typed Blueboy commands and their wire framing.
//!
//! Packets start with a sync pattern and are of the form
//! `[sync: u32 LE] [length: u16 LE] [id: u8] [data: length - 1 bytes]`,
//! where length counts the id byte and the data.

use std::fmt;
use std::str::FromStr;

use strum::IntoEnumIterator;

use crate::{
    commander::{begin_command_text, end_command_text},
    constants::*,
    error::PacketError,
    types::{AttitudeMode, Device},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlueboyCommand {
    BeginAttitude {
        device: Device,
        period: u16,
        mode: AttitudeMode,
    },
    EndAttitude {
        device: Device,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Verb {
    Begin,
    End,
}

impl BlueboyCommand {
    pub fn device(&self) -> Device {
        match *self {
            BlueboyCommand::BeginAttitude { device, .. } | BlueboyCommand::EndAttitude { device } => device,
        }
    }

    pub fn id(&self) -> u8 {
        match *self {
            BlueboyCommand::BeginAttitude { device, .. } => device.begin_id(),
            BlueboyCommand::EndAttitude { device } => device.end_id(),
        }
    }

    /// Parse a command string of the form
    /// `BLUEBOY <NAME> with <PARAM> <value>, <PARAM> <value>, ...`.
    pub fn parse(text: &str) -> Result<Self, PacketError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(PacketError::Empty);
        }

        let (target, rest) = text.split_once(' ').unwrap_or((text, ""));
        if target != TARGET {
            return Err(PacketError::UnknownTarget(target.to_string()));
        }

        let rest = rest.trim();
        let (name, params) = match rest.split_once(" with ") {
            Some((name, params)) => (name.trim(), Some(params)),
            None => (rest, None),
        };
        let (verb, device) = parse_name(name)?;
        let params = Params::parse(params)?;

        let id = params.require("ID", 0, u8::MAX as i64)? as u8;
        let command = match verb {
            Verb::Begin => {
                let period = params.require("PERIOD", MIN_PERIOD, MAX_PERIOD)? as u16;
                let code = params.require("TYPE", 0, u8::MAX as i64)?;
                let mode = AttitudeMode::from_code(code as u8).ok_or_else(|| PacketError::OutOfRange {
                    name: "TYPE".to_string(),
                    value: code,
                })?;
                params.reject_others(&["ID", "PERIOD", "TYPE"])?;
                BlueboyCommand::BeginAttitude { device, period, mode }
            }
            Verb::End => {
                params.reject_others(&["ID"])?;
                BlueboyCommand::EndAttitude { device }
            }
        };

        if command.id() != id {
            return Err(PacketError::IdMismatch {
                command: name.to_string(),
                given: id,
                expected: command.id(),
            });
        }
        Ok(command)
    }

    /// Frame the command as a packet ready for the serial link.
    pub fn encode(&self) -> Vec<u8> {
        let mut data = Vec::new();
        if let BlueboyCommand::BeginAttitude { period, mode, .. } = *self {
            data.extend_from_slice(&period.to_le_bytes());
            data.push(mode.code());
        }

        let len = (1 + data.len()) as u16;
        let mut packet = Vec::with_capacity(HEADER_LEN + len as usize);
        packet.extend_from_slice(&SYNC_PATTERN.to_le_bytes());
        packet.extend_from_slice(&len.to_le_bytes());
        packet.push(self.id());
        packet.extend_from_slice(&data);
        packet
    }
}

impl FromStr for BlueboyCommand {
    type Err = PacketError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BlueboyCommand::parse(s)
    }
}

impl fmt::Display for BlueboyCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match *self {
            BlueboyCommand::BeginAttitude { device, period, mode } => {
                begin_command_text(device.as_ref(), self.id(), period as i64, mode.code())
            }
            BlueboyCommand::EndAttitude { device } => end_command_text(device.as_ref(), self.id()),
        };
        f.write_str(&text)
    }
}

fn parse_name(name: &str) -> Result<(Verb, Device), PacketError> {
    let unknown = || PacketError::UnknownCommand(name.to_string());

    let (verb, rest) = if let Some(rest) = name.strip_prefix("BEGIN") {
        (Verb::Begin, rest)
    } else if let Some(rest) = name.strip_prefix("END") {
        (Verb::End, rest)
    } else {
        return Err(unknown());
    };

    let device_name = rest.strip_suffix("ATT").ok_or_else(unknown)?;
    let device = Device::iter()
        .find(|device| device.as_ref() == device_name)
        .ok_or_else(unknown)?;
    Ok((verb, device))
}

struct Params<'a> {
    values: Vec<(&'a str, i64)>,
}

impl<'a> Params<'a> {
    fn parse(params: Option<&'a str>) -> Result<Self, PacketError> {
        let mut values: Vec<(&str, i64)> = Vec::new();
        let Some(params) = params else {
            return Ok(Params { values });
        };

        for item in params.split(',') {
            let item = item.trim();
            let (name, value) = item
                .split_once(' ')
                .ok_or_else(|| PacketError::Malformed(item.to_string()))?;
            let value = value.trim();
            let number = value.parse::<i64>().map_err(|_| PacketError::NotNumeric {
                name: name.to_string(),
                value: value.to_string(),
            })?;
            if values.iter().any(|(existing, _)| *existing == name) {
                return Err(PacketError::DuplicateParameter(name.to_string()));
            }
            values.push((name, number));
        }
        Ok(Params { values })
    }

    fn require(&self, name: &'static str, min: i64, max: i64) -> Result<i64, PacketError> {
        let value = self
            .values
            .iter()
            .find(|(param, _)| *param == name)
            .map(|(_, value)| *value)
            .ok_or(PacketError::MissingParameter(name))?;
        if !(min..=max).contains(&value) {
            return Err(PacketError::OutOfRange {
                name: name.to_string(),
                value,
            });
        }
        Ok(value)
    }

    fn reject_others(&self, known: &[&str]) -> Result<(), PacketError> {
        match self.values.iter().find(|(name, _)| !known.contains(name)) {
            Some((name, _)) => Err(PacketError::UnknownParameter(name.to_string())),
            None => Ok(()),
        }
    }
}
