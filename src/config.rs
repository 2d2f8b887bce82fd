use crate::error::{KbdError, KbdResult};
use crate::layouts::DEFAULT_LAYOUT;
use crate::reference::REFERENCE_COUNTRY;
use clap::{parser::ValueSource, ArgMatches, Args};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Args, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyboardConfig {
    /// Directory holding exported `.keyboard` files.
    #[arg(long, default_value = "keyboards")]
    pub keyboards_dir: String,

    /// Host layout the reference keyboard is typed on.
    #[arg(long, default_value = REFERENCE_COUNTRY)]
    pub reference_country: String,

    #[arg(long, default_value = "US")]
    pub default_country: String,

    #[arg(long, default_value_t = DEFAULT_LAYOUT.to_string())]
    pub default_layout: String,

    /// Also sample shift+alt-gr as a fourth character level.
    #[arg(long, default_value_t = true, action = clap::ArgAction::Set)]
    pub shift_altgr: bool,
}

impl Default for KeyboardConfig {
    fn default() -> Self {
        Self {
            keyboards_dir: "keyboards".to_string(),
            reference_country: REFERENCE_COUNTRY.to_string(),
            default_country: "US".to_string(),
            default_layout: DEFAULT_LAYOUT.to_string(),
            shift_altgr: true,
        }
    }
}

impl KeyboardConfig {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> KbdResult<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            KbdError::Config(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;
        serde_json::from_str(&content).map_err(|e| {
            KbdError::Config(format!(
                "Failed to parse config JSON '{}': {}",
                path.display(),
                e
            ))
        })
    }

    /// Copies over the values the user actually typed on the command line,
    /// leaving file values in place for everything left at its default.
    pub fn merge_from_cli(&mut self, cli: &KeyboardConfig, matches: &ArgMatches) {
        macro_rules! update_if_present {
            ($field:ident, $arg_name:expr) => {
                if matches.value_source($arg_name) == Some(ValueSource::CommandLine) {
                    self.$field = cli.$field.clone();
                }
            };
        }

        update_if_present!(keyboards_dir, "keyboards_dir");
        update_if_present!(reference_country, "reference_country");
        update_if_present!(default_country, "default_country");
        update_if_present!(default_layout, "default_layout");
        update_if_present!(shift_altgr, "shift_altgr");
    }
}
