use std::path::{Path, PathBuf};

use anyhow::Context;
use directories_next::ProjectDirs;
use json_encoding::Encoding;
use serde::{Deserialize, Serialize};

use crate::append_log;
use crate::record::RecordKeys;

const CONFIG_DIR_ENV: &str = "RECORD_SIMULATOR_CONFIG_DIR";
const SETTINGS_FILE: &str = "settings.yaml";

/// Contents of `settings.yaml`; every field is optional.
#[derive(Clone, Debug, Serialize, Deserialize, Default, Eq, PartialEq)]
pub struct SettingsFile {
    #[serde(default)]
    pub encoding: Option<Encoding>,
    #[serde(default)]
    pub capture_stdin: Option<bool>,
    #[serde(default)]
    pub append_log: Option<bool>,
    #[serde(default)]
    pub append_path: Option<PathBuf>,
    #[serde(default)]
    pub keys: KeySettings,
}

#[derive(Clone, Debug, Serialize, Deserialize, Default, Eq, PartialEq)]
pub struct KeySettings {
    #[serde(default)]
    pub items: Option<String>,
    #[serde(default)]
    pub integer: Option<String>,
}

#[derive(Clone, Debug, Default)]
pub struct CliOverrides {
    pub encoding: Option<Encoding>,
    pub capture_stdin: Option<bool>,
    pub append_log: Option<bool>,
    pub append_path: Option<PathBuf>,
    pub items_key: Option<String>,
    pub integer_key: Option<String>,
}

/// Fully resolved run configuration.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SimulatorSettings {
    pub encoding: Encoding,
    pub capture_stdin: bool,
    pub append_log: bool,
    pub append_path: PathBuf,
    pub keys: RecordKeys,
}

impl Default for SimulatorSettings {
    fn default() -> Self {
        Self {
            encoding: Encoding::default(),
            capture_stdin: false,
            append_log: false,
            append_path: append_log::default_path(),
            keys: RecordKeys::default(),
        }
    }
}

/// Loads settings from `explicit`, or from the default location when none is given.
///
/// A missing default file yields empty settings; a missing explicit file is an error.
pub fn load_settings(explicit: Option<&Path>) -> anyhow::Result<(SettingsFile, PathBuf)> {
    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => {
            let path = settings_path()?;
            if !path.exists() {
                return Ok((SettingsFile::default(), path));
            }
            path
        }
    };
    let contents = std::fs::read_to_string(&path)
        .with_context(|| format!("unable to read settings file {}", path.display()))?;
    let settings = parse_settings(&contents)
        .with_context(|| format!("unable to parse settings file {}", path.display()))?;
    Ok((settings, path))
}

pub fn parse_settings(contents: &str) -> anyhow::Result<SettingsFile> {
    if contents.trim().is_empty() {
        return Ok(SettingsFile::default());
    }
    Ok(serde_yaml_bw::from_str(contents)?)
}

pub fn settings_path() -> anyhow::Result<PathBuf> {
    if let Ok(value) = std::env::var(CONFIG_DIR_ENV) {
        return Ok(Path::new(&value).join(SETTINGS_FILE));
    }
    let dirs = ProjectDirs::from("", "", "record-simulator")
        .ok_or_else(|| anyhow::anyhow!("unable to determine config directory"))?;
    Ok(dirs.config_dir().join(SETTINGS_FILE))
}

/// Merges CLI flags over the settings file over built-in defaults.
///
/// A relative `append_path` from the file is resolved against the file's directory.
/// Key spellings that collide with each other or with a fixed key are rejected.
pub fn effective_settings(
    cli: CliOverrides,
    file: SettingsFile,
    config_dir: &Path,
) -> anyhow::Result<SimulatorSettings> {
    let defaults = SimulatorSettings::default();
    let append_path = match cli.append_path {
        Some(path) => path,
        None => file
            .append_path
            .map(|path| resolve_relative(config_dir, path))
            .unwrap_or(defaults.append_path),
    };
    let keys = RecordKeys {
        items: cli
            .items_key
            .or(file.keys.items)
            .unwrap_or(defaults.keys.items),
        integer: cli
            .integer_key
            .or(file.keys.integer)
            .unwrap_or(defaults.keys.integer),
    };
    keys.validate()?;
    Ok(SimulatorSettings {
        encoding: cli.encoding.or(file.encoding).unwrap_or(defaults.encoding),
        capture_stdin: cli
            .capture_stdin
            .or(file.capture_stdin)
            .unwrap_or(defaults.capture_stdin),
        append_log: cli
            .append_log
            .or(file.append_log)
            .unwrap_or(defaults.append_log),
        append_path,
        keys,
    })
}

fn resolve_relative(base: &Path, path: PathBuf) -> PathBuf {
    if path.is_absolute() {
        path
    } else {
        base.join(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_plain_variant() {
        let settings = effective_settings(
            CliOverrides::default(),
            SettingsFile::default(),
            Path::new("/etc"),
        )
        .unwrap();
        assert_eq!(settings, SimulatorSettings::default());
        assert_eq!(settings.encoding, Encoding::Ascii);
        assert!(!settings.capture_stdin);
        assert!(!settings.append_log);
        assert_eq!(settings.keys.items, "items");
        assert_eq!(settings.keys.integer, "integer");
    }

    #[test]
    fn parses_yaml_settings() {
        let file = parse_settings(
            "encoding: raw\ncapture_stdin: true\nappend_log: true\nappend_path: logs/out.log\nkeys:\n  items: itens\n  integer: interge\n",
        )
        .unwrap();
        assert_eq!(file.encoding, Some(Encoding::Raw));
        assert_eq!(file.capture_stdin, Some(true));
        assert_eq!(file.keys.items.as_deref(), Some("itens"));

        let settings = effective_settings(CliOverrides::default(), file, Path::new("/srv/sim")).unwrap();
        assert_eq!(settings.append_path, PathBuf::from("/srv/sim/logs/out.log"));
        assert_eq!(settings.keys.integer, "interge");
        assert!(settings.capture_stdin);
    }

    #[test]
    fn empty_file_is_default() {
        assert_eq!(parse_settings("  \n").unwrap(), SettingsFile::default());
    }

    #[test]
    fn cli_overrides_win_over_file() {
        let file = SettingsFile {
            encoding: Some(Encoding::Raw),
            append_path: Some(PathBuf::from("from-file.log")),
            keys: KeySettings {
                items: Some("itens".to_string()),
                integer: None,
            },
            ..SettingsFile::default()
        };
        let cli = CliOverrides {
            encoding: Some(Encoding::Ascii),
            append_path: Some(PathBuf::from("cli.log")),
            integer_key: Some("interge".to_string()),
            ..CliOverrides::default()
        };
        let settings = effective_settings(cli, file, Path::new("/cfg")).unwrap();
        assert_eq!(settings.encoding, Encoding::Ascii);
        assert_eq!(settings.append_path, PathBuf::from("cli.log"));
        assert_eq!(settings.keys.items, "itens");
        assert_eq!(settings.keys.integer, "interge");
    }

    #[test]
    fn rejects_unknown_encoding() {
        assert!(parse_settings("encoding: utf16\n").is_err());
    }

    #[test]
    fn rejects_key_spellings_that_collide() {
        let cli = CliOverrides {
            items_key: Some("random".to_string()),
            ..CliOverrides::default()
        };
        let err = effective_settings(cli, SettingsFile::default(), Path::new("/cfg")).unwrap_err();
        assert!(err.to_string().contains("random"), "error lacked key: {err}");

        let file = SettingsFile {
            keys: KeySettings {
                items: Some("same".to_string()),
                integer: Some("same".to_string()),
            },
            ..SettingsFile::default()
        };
        let err = effective_settings(CliOverrides::default(), file, Path::new("/cfg")).unwrap_err();
        assert!(err.to_string().contains("same"), "error lacked key: {err}");

        let cli = CliOverrides {
            integer_key: Some("boolean".to_string()),
            ..CliOverrides::default()
        };
        assert!(effective_settings(cli, SettingsFile::default(), Path::new("/cfg")).is_err());
    }
}
