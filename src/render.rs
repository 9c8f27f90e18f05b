use crate::config::DisplayConfig;
use anyhow::Result;
use bmsframe_lib::protocol::DecodedFrame;
use bmsframe_lib::FrameLayout;
use std::fmt::{self, Display};

use crate::commandline::OutputFormat;

pub struct Renderer {
    config: DisplayConfig,
    format: OutputFormat,
}

impl Renderer {
    pub fn new(config: DisplayConfig, format: OutputFormat) -> Self {
        Self { config, format }
    }

    pub fn render(&self, frame: &DecodedFrame) -> Result<String> {
        match self.format {
            OutputFormat::Text => Ok(self.text(frame)),
            OutputFormat::Json => Ok(serde_json::to_string_pretty(frame)? + "\n"),
        }
    }

    fn text(&self, frame: &DecodedFrame) -> String {
        TextFrame {
            frame,
            config: &self.config,
        }
        .to_string()
    }
}

/// Text view of a frame, in the order of the telemetry page.
struct TextFrame<'a> {
    frame: &'a DecodedFrame,
    config: &'a DisplayConfig,
}

impl TextFrame<'_> {
    fn or_placeholder<T: Display>(&self, value: Option<T>) -> String {
        value
            .map(|v| v.to_string())
            .unwrap_or_else(|| self.config.placeholder.clone())
    }
}

impl Display for TextFrame<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let frame = self.frame;
        if !frame.warnings.is_empty() {
            writeln!(f, "Warnings:")?;
            for warning in &frame.warnings {
                writeln!(f, "  - {warning}")?;
            }
        }
        if self.config.show_raw {
            writeln!(f, "Raw: {}", frame.raw_hex)?;
            writeln!(f, "Payload: {}", frame.payload_hex)?;
            if let Some(trailer) = &frame.trailer_hex {
                writeln!(f, "Trailer: {trailer}")?;
            }
        }
        if self.config.show_words {
            let words: Vec<String> = frame.words_be.iter().map(|w| format!("{w:04x}")).collect();
            writeln!(f, "Words: [{}]", words.join(", "))?;
        }
        let rows: [(&str, String); 10] = [
            ("State of Charge (%)", self.or_placeholder(frame.soc_pct)),
            ("Capacity (AH)", self.or_placeholder(frame.capacity_ah)),
            ("Voltage (V)", self.or_placeholder(frame.voltage_v)),
            ("Current (A)", self.or_placeholder(frame.current_a)),
            ("Power (W)", self.or_placeholder(frame.power_w)),
            ("Flags", self.or_placeholder(frame.flags)),
            ("Status 1", self.or_placeholder(frame.status1)),
            ("Status 2", self.or_placeholder(frame.status2)),
            ("Unknown 2", self.or_placeholder(frame.unknown2)),
            ("Unknown 3", self.or_placeholder(frame.unknown3)),
        ];
        for (label, value) in rows {
            writeln!(f, "{label}: {value}")?;
        }
        Ok(())
    }
}

/// Word table of a layout, one row per field.
pub struct LayoutTable<'a>(pub &'a FrameLayout);

impl Display for LayoutTable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let layout = self.0;
        writeln!(
            f,
            "Layout '{}' header=0x{:02x} opcode=0x{:02x}",
            layout.name, layout.header, layout.opcode
        )?;
        for entry in layout.fields {
            let scale = if entry.is_scaled() {
                format!("/{}", entry.divisor)
            } else {
                "x1".to_string()
            };
            let sign = entry
                .sign
                .map(|s| format!(" negative if {} & 0x{:02x}", s.source, s.mask))
                .unwrap_or_default();
            writeln!(
                f,
                "word {} {} {} (min words {}){}",
                entry.index, entry.field, scale, entry.min_words, sign
            )?;
        }
        Ok(())
    }
}
