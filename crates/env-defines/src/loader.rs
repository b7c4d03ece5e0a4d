use crate::{
    define::{Define, DefineSink},
    env::{self, EnvTable},
};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Name of the environment file looked up in the project root.
pub const ENV_FILE_NAME: &str = ".env";

/// Slot count used when `WIFI_SLOTS_MAX` is absent or unusable.
pub const DEFAULT_WIFI_SLOTS: usize = 10;

/// Upper bound on `WIFI_SLOTS_MAX`; larger values are clamped.
pub const MAX_WIFI_SLOTS: usize = 255;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    Str,
    Int,
}

/// Definitions that are always emitted, with their fallback values.
pub const FIXED_DEFINES: &[(&str, Kind, &str)] = &[
    ("MQTT_HOST_ONLINE", Kind::Str, ""),
    ("MQTT_HOST_OFFLINE", Kind::Str, "192.168.31.108"),
    ("MQTT_PORT", Kind::Int, "1883"),
    ("BACKEND_BASE", Kind::Str, ""),
    ("BACKEND_HOST", Kind::Str, "192.168.31.108"),
    ("BACKEND_PORT", Kind::Int, "5000"),
    ("DEVICE_ID", Kind::Str, "esp32_001"),
];

/// Path of the environment file for a project.
pub fn env_path(project_dir: &Path) -> PathBuf {
    project_dir.join(ENV_FILE_NAME)
}

/// Reads `<project_dir>/.env` and appends every firmware definition to `sink`.
///
/// Returns the parsed table so callers can report on what was found.
pub fn load<S: DefineSink>(project_dir: &Path, sink: &mut S) -> EnvTable {
    let path = env_path(project_dir);
    let table = env::parse(&path);
    info!(path = %path.display(), keys = table.len(), "loaded env file");

    EnvDefineLoader::new(&table, sink).define_all();
    table
}

/// Maps an [`EnvTable`] onto a [`DefineSink`].
pub struct EnvDefineLoader<'a, S: DefineSink> {
    table: &'a EnvTable,
    sink: &'a mut S,
}

impl<'a, S: DefineSink> EnvDefineLoader<'a, S> {
    pub fn new(table: &'a EnvTable, sink: &'a mut S) -> Self {
        Self { table, sink }
    }

    /// Emits the WiFi slots, the legacy WiFi pair and the fixed definitions, in that order.
    pub fn define_all(&mut self) {
        self.define_wifi_slots();
        self.define_wifi_legacy();
        self.define_fixed();
    }

    pub fn define_string(&mut self, key: &str, default: &str) {
        let value = self.table.get_or(key, default);
        debug!(key, value, "string define");
        self.sink.append(Define::string(key, value));
    }

    pub fn define_int(&mut self, key: &str, default: &str) {
        let value = self.table.get_or(key, default);
        debug!(key, value, "int define");
        self.sink.append(Define::int(key, value));
    }

    /// Number of WiFi slots to define, from `WIFI_SLOTS_MAX`.
    ///
    /// Negative counts define no slots. Counts above [`MAX_WIFI_SLOTS`] are clamped.
    pub fn wifi_slots(&self) -> usize {
        let Some(raw) = self.table.get("WIFI_SLOTS_MAX") else {
            return DEFAULT_WIFI_SLOTS;
        };

        match raw.parse::<i64>() {
            Ok(slots) if slots < 0 => 0,
            Ok(slots) if slots > MAX_WIFI_SLOTS as i64 => {
                warn!(value = slots, max = MAX_WIFI_SLOTS, "WIFI_SLOTS_MAX too large, clamping");
                MAX_WIFI_SLOTS
            }
            Ok(slots) => slots as usize,
            Err(e) => {
                warn!(value = raw, error = %e, default = DEFAULT_WIFI_SLOTS, "invalid WIFI_SLOTS_MAX");
                DEFAULT_WIFI_SLOTS
            }
        }
    }

    /// Defines `WIFI_SSID{i}` and `WIFI_PASS{i}` for every slot, starting at 1.
    pub fn define_wifi_slots(&mut self) {
        let slots = self.wifi_slots();
        for i in 1..=slots {
            self.define_string(&format!("WIFI_SSID{i}"), "");
            self.define_string(&format!("WIFI_PASS{i}"), "");
        }
    }

    /// Defines the unindexed `WIFI_SSID`/`WIFI_PASS` pair.
    ///
    /// An explicit non-empty value wins; otherwise slot 1 is used.
    pub fn define_wifi_legacy(&mut self) {
        let table = self.table;
        for (legacy, slot) in [("WIFI_SSID", "WIFI_SSID1"), ("WIFI_PASS", "WIFI_PASS1")] {
            let value = table
                .get_non_empty(legacy)
                .unwrap_or_else(|| table.get_or(slot, ""));
            debug!(key = legacy, value, "legacy wifi define");
            self.sink.append(Define::string(legacy, value));
        }
    }

    pub fn define_fixed(&mut self) {
        for &(key, kind, default) in FIXED_DEFINES {
            match kind {
                Kind::Str => self.define_string(key, default),
                Kind::Int => self.define_int(key, default),
            }
        }
    }
}
