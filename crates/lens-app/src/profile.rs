use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use directories::ProjectDirs;
use lens_config::Config;
use serde::{Deserialize, Serialize};

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("dev", "lens", "lens")
}

/// Where downloaded language data goes when no tessdata dir is configured
pub fn default_tessdata_dir() -> PathBuf {
    project_dirs()
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from(".lens"))
        .join("tessdata")
}

/// Represents a user profile
#[derive(Serialize, Deserialize)]
pub struct Profile {
    pub name: String,
    pub value: Config,
}

/// JSON profiles, one file per name, `main.json` always present after init
pub struct ProfileStore {
    dir: PathBuf,
}

impl ProfileStore {
    pub fn at(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Platform config directory, e.g. `~/.config/lens/profiles`
    pub fn default_location() -> Self {
        let dir = project_dirs()
            .map(|dirs| dirs.config_dir().to_path_buf())
            .unwrap_or_else(|| PathBuf::from(".lens"))
            .join("profiles");
        Self::at(dir)
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path(&self, name: &str) -> PathBuf {
        self.dir.join(format!("{name}.json"))
    }

    /// Create the profiles folder and the main profile if missing
    pub fn init(&self) -> anyhow::Result<()> {
        fs::create_dir_all(&self.dir)
            .with_context(|| format!("Failed to create {}", self.dir.display()))?;

        let main_profile = self.path("main");
        if !main_profile.exists() {
            let profile = Profile {
                name: "main".into(),
                value: Config::default(),
            };
            fs::write(&main_profile, serde_json::to_string_pretty(&profile)?)?;
            tracing::info!("Created main profile at {}", main_profile.display());
        }
        Ok(())
    }

    fn read(path: &Path) -> anyhow::Result<Config> {
        let data = fs::read_to_string(path)?;
        let profile: Profile = serde_json::from_str(&data)
            .with_context(|| format!("Invalid profile {}", path.display()))?;
        Ok(profile.value)
    }

    /// Load a profile by name, falling back to main, then to defaults
    pub fn load(&self, name: &str) -> anyhow::Result<Config> {
        let profile_file = self.path(name);
        if profile_file.exists() {
            return Self::read(&profile_file);
        }

        tracing::warn!("Profile {name} not found, falling back to main profile or defaults");
        let main_file = self.path("main");
        if main_file.exists() {
            Self::read(&main_file)
        } else {
            Ok(Config::default())
        }
    }
}
