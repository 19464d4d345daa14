use std::env;
use std::fs;
use std::io::{self, ErrorKind};
use std::path::{Path, PathBuf};

use field_control_playoff::PlayoffType;
use log::LevelFilter;
use serde::{Deserialize, Serialize};
use thiserror::Error;

macro_rules! from_environment {
    ($config:expr, $($key:expr, $name:tt),*$(,)?) => {{
        $(
            {
                if let Ok(value) = env::var($key) {
                    if let Ok(value) = value.parse() {
                        $config.$name = value;
                    }
                }
            }
        )*
    }};
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub loglevel: LevelFilter,
    /// The path of the JSON event store.
    pub store: PathBuf,
    pub playoff: Playoff,
}

impl Config {
    /// Reads the config from the TOML file at `path`. Returns the default config if the file
    /// does not exist.
    pub fn from_file<P>(path: P) -> Result<Self, ConfigError>
    where
        P: AsRef<Path>,
    {
        let buf = match fs::read_to_string(path) {
            Ok(buf) => buf,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Self::default()),
            Err(err) => return Err(err.into()),
        };

        Self::from_toml(&buf)
    }

    #[inline]
    pub fn from_toml(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    pub fn with_environment(mut self) -> Self {
        from_environment!(self, "FC_LOGLEVEL", loglevel, "FC_STORE", store);
        self.playoff = self.playoff.with_environment();

        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            loglevel: LevelFilter::Info,
            store: PathBuf::from("event.json"),
            playoff: Playoff::default(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Playoff {
    pub kind: PlayoffType,
    pub alliances: usize,
}

impl Playoff {
    pub fn with_environment(mut self) -> Self {
        from_environment!(
            self,
            "FC_PLAYOFF_KIND",
            kind,
            "FC_PLAYOFF_ALLIANCES",
            alliances,
        );

        self
    }
}

impl Default for Playoff {
    fn default() -> Self {
        Self {
            kind: PlayoffType::DoubleElimination,
            alliances: 8,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Toml(#[from] toml::de::Error),
}
