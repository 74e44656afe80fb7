//! Loader for `alarmpanel/config.toml`

use std::path::{Path, PathBuf};

use alarmpanel_core::prelude::*;

use super::types::PanelConfig;

pub const CONFIG_FILENAME: &str = "config.toml";
const APP_DIR: &str = "alarmpanel";

/// Environment variable that overrides `connection.token`.
pub const TOKEN_ENV_VAR: &str = "ALARMPANEL_TOKEN";

const DEFAULT_CONFIG: &str = r#"# Alarm Panel configuration

[connection]
url = "http://homeassistant.local:8123"
# token = "..."     # long-lived access token, or set ALARMPANEL_TOKEN

[card]
entity = "alarm_control_panel.secure_alarm"
service_domain = "secure_alarm"
arm_code = "123456"

# [[card.entry_points]]
# entity_id = "lock.front_door"
# name = "Front Door"
# type = "door"
# battery_entity = "sensor.front_door_battery"

[ui]
icons = "unicode"   # or "nerd_fonts"
tick_ms = 1000
"#;

/// `$XDG_CONFIG_HOME/alarmpanel/config.toml` (platform equivalent elsewhere).
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR).join(CONFIG_FILENAME))
}

/// Load and validate the config file.
///
/// Unlike optional settings files, the panel cannot run without this one: a
/// missing file is [`Error::ConfigNotFound`] and a file that fails to parse or
/// validate is [`Error::ConfigInvalid`].
pub fn load_config(path: &Path) -> Result<PanelConfig> {
    if !path.exists() {
        return Err(Error::config_not_found(path));
    }

    let content = std::fs::read_to_string(path)
        .map_err(|e| Error::config(format!("Failed to read {}: {}", path.display(), e)))?;
    let config: PanelConfig = toml::from_str(&content)?;
    config.validate()?;

    debug!(
        "Loaded config from {:?} ({} entry point(s))",
        path,
        config.card.entry_points.len()
    );
    Ok(config)
}

/// Access token: `ALARMPANEL_TOKEN` if set and non-empty, else the file value.
pub fn resolve_token(config: &PanelConfig) -> Result<String> {
    if let Ok(token) = std::env::var(TOKEN_ENV_VAR) {
        let token = token.trim();
        if !token.is_empty() {
            return Ok(token.to_string());
        }
    }

    config
        .connection
        .token
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .ok_or_else(|| {
            Error::config_invalid(format!(
                "No access token: set connection.token or {TOKEN_ENV_VAR}"
            ))
        })
}

/// Write a commented starter config. Refuses to overwrite an existing file.
pub fn write_default_config(path: &Path) -> Result<()> {
    if path.exists() {
        return Err(Error::config(format!(
            "{} already exists, not overwriting",
            path.display()
        )));
    }
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| {
            Error::config(format!("Failed to create {}: {}", parent.display(), e))
        })?;
    }
    std::fs::write(path, DEFAULT_CONFIG)?;
    info!("Wrote default config to {:?}", path);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use tempfile::tempdir;

    fn write(dir: &Path, content: &str) -> PathBuf {
        let path = dir.join(CONFIG_FILENAME);
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_load_missing_file() {
        let temp = tempdir().unwrap();
        let err = load_config(&temp.path().join("nope.toml")).unwrap_err();
        assert!(matches!(err, Error::ConfigNotFound { .. }));
        assert!(err.is_fatal());
    }

    #[test]
    fn test_load_invalid_toml() {
        let temp = tempdir().unwrap();
        let path = write(temp.path(), "not valid toml {{{{");
        let err = load_config(&path).unwrap_err();
        assert!(matches!(err, Error::ConfigInvalid { .. }));
    }

    #[test]
    fn test_load_without_entity() {
        let temp = tempdir().unwrap();
        let path = write(temp.path(), "[connection]\nurl = \"http://ha:8123\"\n");
        let err = load_config(&path).unwrap_err();
        assert!(err.to_string().contains("Please define an entity"));
    }

    #[test]
    fn test_load_custom() {
        let temp = tempdir().unwrap();
        let path = write(
            temp.path(),
            r#"
[connection]
url = "https://ha.example.com"
token = "abc"

[card]
entity = "alarm_control_panel.house"
service_domain = "alarmo"

[ui]
tick_ms = 250
"#,
        );

        let config = load_config(&path).unwrap();
        assert_eq!(config.card.entity, "alarm_control_panel.house");
        assert_eq!(config.card.service_domain, "alarmo");
        assert_eq!(config.card.arm_code, "123456");
        assert_eq!(config.ui.tick_ms, 250);
        assert_eq!(config.connection.token.as_deref(), Some("abc"));
    }

    #[test]
    fn test_default_config_round_trips() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("nested").join(CONFIG_FILENAME);

        write_default_config(&path).unwrap();
        let config = load_config(&path).unwrap();
        assert_eq!(config.card.entity, "alarm_control_panel.secure_alarm");

        assert!(write_default_config(&path).is_err());
    }

    #[test]
    fn test_default_config_path_ends_with_app_dir() {
        if let Some(path) = default_config_path() {
            assert!(path.ends_with("alarmpanel/config.toml"));
        }
    }

    #[test]
    #[serial]
    fn test_token_from_file() {
        std::env::remove_var(TOKEN_ENV_VAR);
        let mut config = PanelConfig::default();
        config.connection.token = Some(" file-token ".to_string());

        assert_eq!(resolve_token(&config).unwrap(), "file-token");
    }

    #[test]
    #[serial]
    fn test_token_env_overrides_file() {
        std::env::set_var(TOKEN_ENV_VAR, "env-token");
        let mut config = PanelConfig::default();
        config.connection.token = Some("file-token".to_string());

        let token = resolve_token(&config);
        std::env::remove_var(TOKEN_ENV_VAR);
        assert_eq!(token.unwrap(), "env-token");
    }

    #[test]
    #[serial]
    fn test_missing_token_is_invalid() {
        std::env::remove_var(TOKEN_ENV_VAR);
        let err = resolve_token(&PanelConfig::default()).unwrap_err();
        assert!(matches!(err, Error::ConfigInvalid { .. }));
    }
}
