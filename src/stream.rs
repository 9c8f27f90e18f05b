use anyhow::{Context, Result};
use bmsframe_lib::FrameDecoder;
use log::{info, warn};
use std::io::{BufRead, Write};

use crate::render::Renderer;

/// Decodes one hex frame per input line until end of input. Blank lines are skipped.
pub fn run<R: BufRead, W: Write>(
    decoder: FrameDecoder,
    renderer: &Renderer,
    input: R,
    mut output: W,
) -> Result<usize> {
    info!("Starting stream mode: layout={}", decoder.layout().name);
    let mut frames = 0;
    for line in input.lines() {
        let line = line.with_context(|| "Cannot read frame from input")?;
        if line.trim().is_empty() {
            continue;
        }
        let frame = decoder.decode_hex(line.as_str());
        if !frame.warnings.is_empty() {
            warn!(
                "Frame #{} decoded with warnings: {:?}",
                frames + 1,
                frame.warning_messages()
            );
        }
        writeln!(output, "--- Frame at {} ---", chrono::Local::now().to_rfc3339())?;
        write!(output, "{}", renderer.render(&frame)?)?;
        writeln!(output)?;
        frames += 1;
    }
    info!("Stream ended after {frames} frames");
    Ok(frames)
}
