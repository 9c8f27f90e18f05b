use crate::hex;
use crate::layout::{Field, FrameLayout, WordField, TITAN};
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Serialize, Serializer};

/// Bytes in front of the payload: header, opcode and length.
pub const HEADER_LENGTH: usize = 3;

/// Anomaly observed while decoding a frame. Decoding continues after any of these.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Warning {
    /// Less than [`HEADER_LENGTH`] bytes were received.
    FrameTooShort,
    /// The length byte announces more payload than was received.
    LengthOverrun { declared: u8, available: usize },
    UnexpectedHeader(u8),
    UnexpectedOpcode(u8),
    EmptyHex,
    InvalidHex,
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Warning::FrameTooShort => write!(
                f,
                "Frame shorter than 3 bytes; cannot parse length/payload."
            ),
            Warning::LengthOverrun {
                declared,
                available,
            } => write!(
                f,
                "Declared payload length ({declared}) exceeds available bytes ({available})."
            ),
            Warning::UnexpectedHeader(header) => write!(f, "Unexpected header: 0x{header:x}"),
            Warning::UnexpectedOpcode(opcode) => write!(f, "Unexpected opcode: 0x{opcode:x}"),
            Warning::EmptyHex => write!(f, "Empty or non-string hex input."),
            Warning::InvalidHex => write!(f, "Invalid hex string."),
        }
    }
}

#[cfg(feature = "serde")]
impl Serialize for Warning {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Decoded telemetry frame.
///
/// Every field that depends on the frame content is optional and stays `None` when the
/// received bytes do not cover it.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct DecodedFrame {
    pub raw_hex: String,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub header: Option<u8>,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub opcode: Option<u8>,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub length: Option<u8>,
    pub payload_hex: String,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub trailer_hex: Option<String>,
    #[cfg_attr(feature = "serde", serde(rename = "wordsBE"))]
    pub words_be: Vec<u16>,

    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub capacity_ah: Option<u16>,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub soc_pct: Option<u16>,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub unknown2: Option<u16>,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub unknown3: Option<u16>,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub status1: Option<u16>,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub voltage_v: Option<f64>,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub current_a: Option<f64>, // negative=discharging
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub flags: Option<u16>,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub status2: Option<u16>,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub power_w: Option<f64>,

    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Vec::is_empty"))]
    pub warnings: Vec<Warning>,
}

impl DecodedFrame {
    /// Frame carrying nothing but the given raw text and a single warning.
    fn stub(raw_hex: String, warning: Warning) -> Self {
        Self {
            raw_hex,
            warnings: vec![warning],
            ..Default::default()
        }
    }

    /// Warnings rendered as the human readable messages.
    pub fn warning_messages(&self) -> Vec<String> {
        self.warnings.iter().map(ToString::to_string).collect()
    }

    /// Raw value of a table field. Scaled fields are reported in their unit.
    pub fn value(&self, field: Field) -> Option<f64> {
        match field {
            Field::CapacityAh => self.capacity_ah.map(f64::from),
            Field::SocPct => self.soc_pct.map(f64::from),
            Field::Unknown2 => self.unknown2.map(f64::from),
            Field::Unknown3 => self.unknown3.map(f64::from),
            Field::Status1 => self.status1.map(f64::from),
            Field::CurrentA => self.current_a,
            Field::VoltageV => self.voltage_v,
            Field::Flags => self.flags.map(f64::from),
            Field::Status2 => self.status2.map(f64::from),
        }
    }

    fn set(&mut self, entry: &WordField, word: u16, negative: bool) {
        let scaled = || {
            let value = f64::from(word) / f64::from(entry.divisor);
            if negative {
                -value
            } else {
                value
            }
        };
        match entry.field {
            Field::CapacityAh => self.capacity_ah = Some(word),
            Field::SocPct => self.soc_pct = Some(word),
            Field::Unknown2 => self.unknown2 = Some(word),
            Field::Unknown3 => self.unknown3 = Some(word),
            Field::Status1 => self.status1 = Some(word),
            Field::CurrentA => self.current_a = Some(scaled()),
            Field::VoltageV => self.voltage_v = Some(scaled()),
            Field::Flags => self.flags = Some(word),
            Field::Status2 => self.status2 = Some(word),
        }
    }
}

// Half-cent ties round towards positive infinity
fn round2(value: f64) -> f64 {
    (value * 100.0 + 0.5).floor() / 100.0
}

/// Payload chunked into big-endian words. An unpaired last byte is left out.
pub fn words_be(payload: &[u8]) -> Vec<u16> {
    payload
        .chunks_exact(2)
        .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
        .collect()
}

/// Stateless decoder for one frame layout.
#[derive(Debug, Clone, Copy)]
pub struct FrameDecoder {
    layout: &'static FrameLayout,
}

impl Default for FrameDecoder {
    fn default() -> Self {
        Self::new(&TITAN)
    }
}

impl FrameDecoder {
    pub const fn new(layout: &'static FrameLayout) -> Self {
        Self { layout }
    }

    pub fn layout(&self) -> &'static FrameLayout {
        self.layout
    }

    /// Decodes a frame given as hex text. `None` is treated like an empty string.
    pub fn decode_hex<'a>(&self, text: impl Into<Option<&'a str>>) -> DecodedFrame {
        let text = match text.into() {
            Some(text) if !text.is_empty() => text,
            _ => {
                log::warn!("Empty hex input");
                return DecodedFrame::stub(String::new(), Warning::EmptyHex);
            }
        };
        match hex::decode(text) {
            Ok(bytes) => self.decode_bytes(bytes.as_slice()),
            Err(err) => {
                log::warn!("Cannot convert hex input - {err}");
                DecodedFrame::stub(hex::clean(text), Warning::InvalidHex)
            }
        }
    }

    /// Decodes a raw frame. `None` is treated like an empty buffer.
    pub fn decode_bytes<'a>(&self, bytes: impl Into<Option<&'a [u8]>>) -> DecodedFrame {
        let bytes = bytes.into().unwrap_or_default();
        let raw_hex = hex::encode(bytes);

        if bytes.len() < HEADER_LENGTH {
            log::warn!(
                "Invalid frame size - required={} received={}",
                HEADER_LENGTH,
                bytes.len()
            );
            return DecodedFrame::stub(raw_hex, Warning::FrameTooShort);
        }

        let mut warnings = Vec::new();
        let header = bytes[0];
        let opcode = bytes[1];
        let length = bytes[2];

        let mut payload_end = HEADER_LENGTH + usize::from(length);
        if payload_end > bytes.len() {
            let available = bytes.len() - HEADER_LENGTH;
            log::warn!("Payload length overrun - declared={length} available={available}");
            warnings.push(Warning::LengthOverrun {
                declared: length,
                available,
            });
            payload_end = bytes.len();
        }
        let payload = &bytes[HEADER_LENGTH..payload_end];
        let trailer = &bytes[payload_end..];

        let words = words_be(payload);
        if payload.len() % 2 != 0 {
            log::debug!(
                "Unpaired payload byte dropped - payload_len={} byte={:02X?}",
                payload.len(),
                payload[payload.len() - 1]
            );
        }

        let mut frame = DecodedFrame {
            raw_hex,
            header: Some(header),
            opcode: Some(opcode),
            length: Some(length),
            payload_hex: hex::encode(payload),
            trailer_hex: (!trailer.is_empty()).then(|| hex::encode(trailer)),
            ..Default::default()
        };

        for entry in self.layout.fields {
            let Some(word) = entry.read(&words) else {
                continue;
            };
            let negative = entry.sign.is_some_and(|sign| {
                self.layout
                    .field(sign.source)
                    .and_then(|source| source.read(&words))
                    .is_some_and(|source| source & sign.mask != 0)
            });
            log::trace!(
                "Word #{} {}={:04X} negative={}",
                entry.index,
                entry.field,
                word,
                negative
            );
            frame.set(entry, word, negative);
        }

        if let (Some(voltage), Some(current)) = (frame.voltage_v, frame.current_a) {
            frame.power_w = Some(round2(voltage * current));
        }

        if header != self.layout.header {
            log::warn!(
                "Unexpected header - expected={:02X?} received={:02X?}",
                self.layout.header,
                header
            );
            warnings.push(Warning::UnexpectedHeader(header));
        }
        if opcode != self.layout.opcode {
            log::warn!(
                "Unexpected opcode - expected={:02X?} received={:02X?}",
                self.layout.opcode,
                opcode
            );
            warnings.push(Warning::UnexpectedOpcode(opcode));
        }

        frame.words_be = words;
        frame.warnings = warnings;
        log::debug!("Decoded {} frame: {:?}", self.layout.name, frame);
        frame
    }
}

/// Decodes a hex frame with the [`TITAN`] layout.
pub fn decode_hex<'a>(text: impl Into<Option<&'a str>>) -> DecodedFrame {
    FrameDecoder::default().decode_hex(text)
}

/// Decodes a raw frame with the [`TITAN`] layout.
pub fn decode_bytes<'a>(bytes: impl Into<Option<&'a [u8]>>) -> DecodedFrame {
    FrameDecoder::default().decode_bytes(bytes)
}
