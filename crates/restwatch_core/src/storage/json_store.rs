use crate::error::AppError;
use crate::settings::Settings;
use std::path::{Path, PathBuf};

const SETTINGS_FILE_NAME: &str = "settings.json";
const SETTINGS_ENV_VAR: &str = "RESTWATCH_SETTINGS_PATH";

pub fn settings_path() -> Result<PathBuf, AppError> {
    if let Ok(path) = std::env::var(SETTINGS_ENV_VAR)
        && !path.trim().is_empty()
    {
        return Ok(PathBuf::from(path));
    }

    if cfg!(windows) {
        let appdata =
            std::env::var("APPDATA").map_err(|_| AppError::invalid_data("APPDATA is not set"))?;
        Ok(PathBuf::from(appdata)
            .join("restwatch")
            .join(SETTINGS_FILE_NAME))
    } else {
        let home = std::env::var("HOME").map_err(|_| AppError::invalid_data("HOME is not set"))?;
        Ok(PathBuf::from(home)
            .join(".config")
            .join("restwatch")
            .join(SETTINGS_FILE_NAME))
    }
}

pub fn load_settings(path: &Path) -> Result<Option<Settings>, AppError> {
    if !path.exists() {
        return Ok(None);
    }

    let content = std::fs::read_to_string(path)
        .map_err(|err| AppError::io(format!("{}: {}", path.display(), err)))?;
    let settings = serde_json::from_str(&content).map_err(|err| {
        AppError::invalid_data(format!("invalid JSON in {}: {}", path.display(), err))
    })?;

    Ok(Some(settings))
}

#[derive(Debug, Clone)]
pub struct SettingsLoad {
    pub settings: Settings,
    pub error: Option<AppError>,
}

/// A missing or malformed file degrades to default (unconfigured) settings
/// and triggers the first-run prompt flow downstream; it is never fatal.
pub fn load_settings_with_fallback(path: &Path) -> SettingsLoad {
    match load_settings(path) {
        Ok(Some(settings)) => SettingsLoad {
            settings,
            error: None,
        },
        Ok(None) => SettingsLoad {
            settings: Settings::default(),
            error: None,
        },
        Err(err) => SettingsLoad {
            settings: Settings::default(),
            error: Some(err),
        },
    }
}

pub fn save_settings(path: &Path, settings: &Settings) -> Result<(), AppError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let content = serde_json::to_string_pretty(settings)
        .map_err(|err| AppError::invalid_data(err.to_string()))?;
    std::fs::write(path, content)?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let permissions = std::fs::Permissions::from_mode(0o600);
        std::fs::set_permissions(path, permissions)?;
    }

    Ok(())
}
