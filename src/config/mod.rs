use serde::{Deserialize, Serialize};
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

#[derive(Debug, Serialize, Deserialize)]
pub struct Config {
    pub database: String,
    #[serde(default = "default_grade")]
    pub default_grade: String,
    #[serde(default = "default_placeholder")]
    pub roster_placeholder: String,
}

fn default_grade() -> String {
    "PP4".to_string()
}
fn default_placeholder() -> String {
    "-".to_string()
}

impl Default for Config {
    fn default() -> Self {
        let db_path = Self::database_file();
        Self {
            database: db_path.to_string_lossy().to_string(),
            default_grade: default_grade(),
            roster_placeholder: default_placeholder(),
        }
    }
}

impl Config {
    /// Return the standard configuration directory depending on the platform
    pub fn config_dir() -> PathBuf {
        if cfg!(target_os = "windows") {
            let appdata = std::env::var("APPDATA").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(appdata).join("rosterctl")
        } else {
            let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
            home.join(".rosterctl")
        }
    }

    /// Return the full path of the config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("rosterctl.conf")
    }

    /// Return the full path of the SQLite database
    pub fn database_file() -> PathBuf {
        Self::config_dir().join("rosterctl.sqlite")
    }

    /// Session state lives next to the database so that a `--db` override
    /// (tests, multiple rosters) also isolates the logged-in user.
    pub fn session_file(&self) -> PathBuf {
        PathBuf::from(format!("{}.session", self.database))
    }

    /// Load configuration from file, or return defaults if not found
    pub fn load() -> Self {
        let path = Self::config_file();

        if path.exists() {
            match fs::read_to_string(&path) {
                Ok(content) => serde_yaml::from_str(&content).unwrap_or_default(),
                Err(_) => Config::default(),
            }
        } else {
            Config::default()
        }
    }

    /// Initialize configuration and database files
    pub fn init_all(custom_name: Option<String>, is_test: bool) -> io::Result<()> {
        let dir = Self::config_dir();
        fs::create_dir_all(&dir)?;

        // DB name: user provided or default
        let db_path = if let Some(name) = custom_name {
            let p = std::path::Path::new(&name);
            if p.is_absolute() {
                p.to_path_buf()
            } else {
                dir.join(p)
            }
        } else {
            Self::database_file()
        };

        let config = Config {
            database: db_path.to_string_lossy().to_string(),
            default_grade: default_grade(),
            roster_placeholder: default_placeholder(),
        };

        // Write config file (skipped in test mode)
        if !is_test {
            let yaml = serde_yaml::to_string(&config)
                .map_err(|e| io::Error::other(e.to_string()))?;
            let mut file = fs::File::create(Self::config_file())?;
            file.write_all(yaml.as_bytes())?;
            println!("✅ Config file: {:?}", Self::config_file());
        }

        // Create empty DB file if not exists
        if !db_path.exists() {
            fs::File::create(&db_path)?;
        }

        println!("✅ Database:    {:?}", db_path);

        Ok(())
    }
}
