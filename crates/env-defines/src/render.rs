//! Output formats for a [`DefineSet`].

use crate::{
    define::{Define, DefineSet},
    error::Result,
    loader,
};
use std::{io::Write, path::Path};

/// Writes one compiler flag per line, duplicates included.
pub fn write_flags<W: Write>(defines: &DefineSet, out: &mut W) -> Result<()> {
    for define in defines {
        writeln!(out, "{define}")?;
    }
    Ok(())
}

/// Writes a C header with an include guard. Duplicate keys keep their last value.
pub fn write_header<W: Write>(defines: &DefineSet, guard: &str, out: &mut W) -> Result<()> {
    writeln!(out, "// Generated from .env, do not edit.")?;
    writeln!(out, "#ifndef {guard}")?;
    writeln!(out, "#define {guard}")?;
    writeln!(out)?;
    for define in defines.resolved() {
        match define {
            Define::Str { key, value } => writeln!(out, "#define {key} \"{}\"", escape_c(value))?,
            Define::Int { key, value } => writeln!(out, "#define {key} {value}")?,
        }
    }
    writeln!(out)?;
    writeln!(out, "#endif // {guard}")?;
    Ok(())
}

/// Writes `cargo:rustc-env` directives so firmware crates can use `env!()`.
pub fn write_cargo_env<W: Write>(defines: &DefineSet, out: &mut W) -> Result<()> {
    for define in defines {
        writeln!(out, "cargo:rustc-env={}={}", define.key(), define.value())?;
    }
    Ok(())
}

/// Loads `<project_dir>/.env` and writes build script directives to `out`.
///
/// The `rerun-if-changed` line comes first, followed by one `rustc-env` line per define.
pub fn write_cargo_directives<W: Write>(project_dir: &Path, out: &mut W) -> Result<DefineSet> {
    let mut defines = DefineSet::new();
    loader::load(project_dir, &mut defines);

    writeln!(
        out,
        "cargo:rerun-if-changed={}",
        loader::env_path(project_dir).display()
    )?;
    write_cargo_env(&defines, out)?;
    Ok(defines)
}

/// Prints build script directives for `<project_dir>/.env` to stdout.
///
/// Intended to be called from a firmware crate's `build.rs`.
pub fn emit_cargo_directives(project_dir: &Path) -> Result<DefineSet> {
    write_cargo_directives(project_dir, &mut std::io::stdout().lock())
}

fn escape_c(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        if matches!(c, '\\' | '"') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::define::DefineSink;

    fn sample() -> DefineSet {
        let mut set = DefineSet::new();
        set.append(Define::string("WIFI_SSID1", "Home"));
        set.append(Define::string("WIFI_SSID", "Home"));
        set.append(Define::int("MQTT_PORT", "1883"));
        set.append(Define::string("WIFI_SSID", "Office \"5G\""));
        set
    }

    fn render(f: impl FnOnce(&mut Vec<u8>) -> Result<()>) -> String {
        let mut out = Vec::new();
        f(&mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn flags_keep_every_entry() {
        let text = render(|out| write_flags(&sample(), out));
        let lines: Vec<_> = text.lines().collect();

        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], r#"-DWIFI_SSID1=\"Home\""#);
        assert_eq!(lines[2], "-DMQTT_PORT=1883");
    }

    #[test]
    fn header_uses_last_value_and_escapes() {
        let text = render(|out| write_header(&sample(), "ENV_DEFINES_H", out));

        assert!(text.contains("#ifndef ENV_DEFINES_H\n#define ENV_DEFINES_H\n"));
        assert!(text.contains("#define WIFI_SSID1 \"Home\"\n"));
        assert!(text.contains("#define WIFI_SSID \"Office \\\"5G\\\"\"\n"));
        assert!(text.contains("#define MQTT_PORT 1883\n"));
        assert_eq!(text.matches("#define WIFI_SSID ").count(), 1);
        assert!(text.trim_end().ends_with("#endif // ENV_DEFINES_H"));
    }

    #[test]
    fn cargo_env_is_unquoted() {
        let text = render(|out| write_cargo_env(&sample(), out));

        assert!(text.starts_with("cargo:rustc-env=WIFI_SSID1=Home\n"));
        assert!(text.contains("cargo:rustc-env=MQTT_PORT=1883\n"));
    }

    #[test]
    fn cargo_directives_start_with_rerun_line() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(".env"), "WIFI_SLOTS_MAX=1\nWIFI_SSID1=Lab\n").unwrap();

        let mut out = Vec::new();
        let defines = write_cargo_directives(dir.path(), &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<_> = text.lines().collect();

        assert_eq!(
            lines[0],
            format!("cargo:rerun-if-changed={}", dir.path().join(".env").display())
        );
        assert_eq!(lines[1], "cargo:rustc-env=WIFI_SSID1=Lab");
        assert_eq!(lines.len(), 1 + defines.len());
        assert!(lines[1..].iter().all(|line| line.starts_with("cargo:rustc-env=")));
        assert!(lines.contains(&"cargo:rustc-env=MQTT_PORT=1883"));
    }
}
