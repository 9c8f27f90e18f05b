use anyhow::{Context, Result};
use bmsframe_lib::FrameDecoder;
use clap::Parser;
use flexi_logger::{Logger, LoggerHandle};
use log::*;
use std::{ops::Deref, panic};

mod commandline;
mod config;
mod render;
mod response;
mod stream;

use commandline::{CliArgs, CliCommands};
use config::DisplayConfig;
use render::Renderer;

fn logging_init(loglevel: LevelFilter) -> LoggerHandle {
    let log_handle = Logger::try_with_env_or_str(loglevel.as_str())
        .expect("Cannot init logging")
        .start()
        .expect("Cannot start logging");

    panic::set_hook(Box::new(|panic_info| {
        let (filename, line, column) = panic_info
            .location()
            .map(|loc| (loc.file(), loc.line(), loc.column()))
            .unwrap_or(("<unknown>", 0, 0));
        let cause = panic_info
            .payload()
            .downcast_ref::<String>()
            .map(String::deref);
        let cause = cause.unwrap_or_else(|| {
            panic_info
                .payload()
                .downcast_ref::<&str>()
                .copied()
                .unwrap_or("<cause unknown>")
        });

        error!(
            "Thread '{}' panicked at {}:{}:{}: {}",
            std::thread::current().name().unwrap_or("<unknown>"),
            filename,
            line,
            column,
            cause
        );
    }));
    log_handle
}

fn main() -> Result<()> {
    let args = CliArgs::parse();

    let _log_handle = logging_init(args.verbose.log_level_filter());

    let config = match &args.config {
        Some(path) => DisplayConfig::load(path)
            .with_context(|| format!("Failed to load display config '{}'", path.display()))?,
        None => DisplayConfig::default(),
    };
    let renderer = Renderer::new(config, args.format);
    let decoder = FrameDecoder::default();

    match args.command {
        CliCommands::Decode { hex } => {
            let frame = decoder.decode_hex(hex.join(" ").as_str());
            print!("{}", renderer.render(&frame)?);
        }
        CliCommands::Response { file } => {
            let body = response::read_body(file.as_deref())?;
            let hex = response::hex_from_body(&body)
                .with_context(|| "Cannot decode scanning service response")?;
            info!("Received frame: {hex}");
            let frame = decoder.decode_hex(hex.as_str());
            print!("{}", renderer.render(&frame)?);
        }
        CliCommands::Stream => {
            let stdin = std::io::stdin();
            stream::run(decoder, &renderer, stdin.lock(), std::io::stdout().lock())?;
        }
        CliCommands::Layout => print!("{}", render::LayoutTable(decoder.layout())),
    }

    Ok(())
}
