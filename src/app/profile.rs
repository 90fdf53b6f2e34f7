//! # Connection Profiles
//!
//! Profiles describe how to reach a form server: the base URL, optional
//! stored credentials, and an optional download directory. Profiles live in
//! an INI file, one section per profile name.
//!
//! ```ini
//! [default]
//! server = https://forms.example.org
//! user = reporter
//! password = hunter2
//! download_dir = /home/reporter/exports
//! ```

use anyhow::{Context, Result};
use ini::Ini;
use std::path::Path;

/// Connection settings required to build the HTTP services
pub trait ConnectionProfile {
    /// Base URL of the form server
    fn server(&self) -> Option<&String>;

    /// Username for the credential exchange
    fn user(&self) -> Option<&String>;

    /// Password for the credential exchange
    fn password(&self) -> Option<&String>;

    /// Directory downloads are persisted into
    fn download_dir(&self) -> Option<&String>;
}

/// Profile loaded from an INI section
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IniProfile {
    server: Option<String>,
    user: Option<String>,
    password: Option<String>,
    download_dir: Option<String>,
}

impl ConnectionProfile for IniProfile {
    fn server(&self) -> Option<&String> {
        self.server.as_ref()
    }

    fn user(&self) -> Option<&String> {
        self.user.as_ref()
    }

    fn password(&self) -> Option<&String> {
        self.password.as_ref()
    }

    fn download_dir(&self) -> Option<&String> {
        self.download_dir.as_ref()
    }
}

/// Profile with nothing configured, used when the requested profile is missing
pub fn blank_profile() -> IniProfile {
    IniProfile::default()
}

/// Store reading profiles from an INI file on disk
pub struct IniProfileStore {
    path: String,
}

impl IniProfileStore {
    /// Create a store for the given profile file path (`~` is expanded)
    pub fn new(path: &str) -> Self {
        Self {
            path: path.to_string(),
        }
    }

    /// Load a profile section by name, or None when the file or section is absent
    pub fn get_profile(&self, name: &str) -> Result<Option<IniProfile>> {
        let expanded = shellexpand::tilde(&self.path);
        let path = Path::new(expanded.as_ref());
        if !path.exists() {
            tracing::debug!("Profile file '{}' does not exist", path.display());
            return Ok(None);
        }

        let ini = Ini::load_from_file(path)
            .with_context(|| format!("failed to read profile file '{}'", path.display()))?;

        let Some(section) = ini.section(Some(name)) else {
            tracing::debug!("Profile '{name}' not found in '{}'", path.display());
            return Ok(None);
        };

        let get = |key: &str| section.get(key).map(str::to_string);
        Ok(Some(IniProfile {
            server: get("server"),
            user: get("user"),
            password: get("password"),
            download_dir: get("download_dir"),
        }))
    }
}
