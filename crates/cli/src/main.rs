use std::{
    fs::File,
    io::{self, BufWriter, Write},
};

use crate::{
    commands::{Commands, Emit, Format},
    error::{Error, Result},
};
use clap::Parser;
use env_defines::{loader, render, DefineSet};
use tracing::info;
use tracing_subscriber::EnvFilter;

mod commands;
mod error;

const HEADER_GUARD: &str = "ENV_DEFINES_H";

fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let args = commands::Args::parse();
    match args.command {
        Commands::Emit(emit) => run_emit(&emit)?,
    }

    Ok(())
}

fn run_emit(emit: &Emit) -> Result<()> {
    let mut defines = DefineSet::new();
    loader::load(&emit.project_dir, &mut defines);
    info!(count = defines.len(), format = ?emit.format, "emitting definitions");

    match &emit.output {
        Some(path) => {
            let file = File::create(path).map_err(|source| Error::CreateOutput {
                path: path.clone(),
                source,
            })?;
            write_defines(&defines, emit.format, &mut BufWriter::new(file))
        }
        None => write_defines(&defines, emit.format, &mut io::stdout().lock()),
    }
}

fn write_defines<W: Write>(defines: &DefineSet, format: Format, out: &mut W) -> Result<()> {
    match format {
        Format::Flags => render::write_flags(defines, out)?,
        Format::Header => render::write_header(defines, HEADER_GUARD, out)?,
        Format::Cargo => render::write_cargo_env(defines, out)?,
    }
    out.flush().map_err(env_defines::Error::from)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn emits_header_file() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(".env"), "WIFI_SLOTS_MAX=1\nWIFI_SSID1=Lab\n").unwrap();
        let output = dir.path().join("env.h");

        run_emit(&Emit {
            project_dir: dir.path().to_path_buf(),
            format: Format::Header,
            output: Some(output.clone()),
        })
        .unwrap();

        let header = fs::read_to_string(output).unwrap();
        assert!(header.contains("#define WIFI_SSID1 \"Lab\"\n"));
        assert!(header.contains("#define WIFI_SSID \"Lab\"\n"));
        assert!(header.contains("#define DEVICE_ID \"esp32_001\"\n"));
    }

    #[test]
    fn missing_output_dir_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let err = run_emit(&Emit {
            project_dir: dir.path().to_path_buf(),
            format: Format::Flags,
            output: Some(dir.path().join("missing/flags.txt")),
        })
        .unwrap_err();

        assert!(matches!(err, Error::CreateOutput { .. }));
    }
}
