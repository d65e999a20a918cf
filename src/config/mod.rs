// Copyright 2025 Muvon Un Limited
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::path::PathBuf;
use std::str::FromStr;

pub mod loading;
pub mod validation;

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_defaults_point_at_hosted_runtime() {
		let config = Config::default();
		assert_eq!(config.runtime_url, "https://general-runtime.voiceflow.com");
		assert_eq!(config.api_url, "https://api.voiceflow.com/v2");
		assert_eq!(config.default_user_id, "user-456");
		assert_eq!(config.request_timeout_seconds, 30);
		assert!(!config.resolve_live_version);
		assert_eq!(config.log_level, LogLevel::None);
	}

	#[test]
	fn test_version_id_falls_back_to_project_id() {
		let mut config = Config {
			project_id: "proj-1".to_string(),
			..Default::default()
		};
		assert_eq!(config.effective_version_id(), "proj-1");

		config.version_id = Some("ver-9".to_string());
		assert_eq!(config.effective_version_id(), "ver-9");

		// Blank overrides are ignored
		config.version_id = Some("  ".to_string());
		assert_eq!(config.effective_version_id(), "proj-1");
	}

	#[test]
	fn test_empty_optional_fields_are_not_serialized() {
		let config = Config::default();
		let toml_str = toml::to_string(&config).unwrap();

		assert!(
			!toml_str.contains("version_id"),
			"Unset version_id should be skipped, but TOML contains: {}",
			toml_str
		);
		assert!(toml_str.contains("log_level = \"none\""));
	}

	#[test]
	fn test_partial_toml_uses_defaults() {
		let config: Config = toml::from_str(
			r#"
api_key = "VF.DM.abc"
project_id = "p1"
log_level = "debug"
"#,
		)
		.unwrap();

		assert_eq!(config.api_key, "VF.DM.abc");
		assert_eq!(config.project_id, "p1");
		assert_eq!(config.log_level, LogLevel::Debug);
		assert_eq!(config.request_timeout_seconds, 30);
		assert_eq!(config.default_user_id, "user-456");
	}

	#[test]
	fn test_log_level_parsing() {
		assert_eq!("INFO".parse::<LogLevel>().unwrap(), LogLevel::Info);
		assert_eq!("debug".parse::<LogLevel>().unwrap(), LogLevel::Debug);
		assert_eq!("none".parse::<LogLevel>().unwrap(), LogLevel::None);
		assert!("verbose".parse::<LogLevel>().is_err());

		assert!(LogLevel::Debug.is_info_enabled());
		assert!(!LogLevel::Info.is_debug_enabled());
		assert!(!LogLevel::None.is_info_enabled());
	}
}

pub const DEFAULT_RUNTIME_URL: &str = "https://general-runtime.voiceflow.com";
pub const DEFAULT_API_URL: &str = "https://api.voiceflow.com/v2";
pub const DEFAULT_USER_ID: &str = "user-456";

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
	#[serde(rename = "none")]
	None,
	#[serde(rename = "info")]
	Info,
	#[serde(rename = "debug")]
	Debug,
}

impl Default for LogLevel {
	fn default() -> Self {
		Self::None
	}
}

impl LogLevel {
	/// Check if info logging is enabled
	pub fn is_info_enabled(&self) -> bool {
		matches!(self, LogLevel::Info | LogLevel::Debug)
	}

	/// Check if debug logging is enabled
	pub fn is_debug_enabled(&self) -> bool {
		matches!(self, LogLevel::Debug)
	}
}

impl FromStr for LogLevel {
	type Err = String;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.to_lowercase().as_str() {
			"none" => Ok(LogLevel::None),
			"info" => Ok(LogLevel::Info),
			"debug" => Ok(LogLevel::Debug),
			other => Err(format!(
				"Unknown log level: '{}'. Valid levels are none, info, debug",
				other
			)),
		}
	}
}

// Default functions
fn default_runtime_url() -> String {
	DEFAULT_RUNTIME_URL.to_string()
}

fn default_api_url() -> String {
	DEFAULT_API_URL.to_string()
}

fn default_user_id() -> String {
	DEFAULT_USER_ID.to_string()
}

fn default_request_timeout_seconds() -> u64 {
	30
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
	#[serde(default)]
	pub log_level: LogLevel,

	/// Dialog manager API key, sent verbatim in the Authorization header
	#[serde(default)]
	pub api_key: String,

	#[serde(default)]
	pub project_id: String,

	/// Transcript version; the project id is used when unset
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub version_id: Option<String>,

	#[serde(default = "default_runtime_url")]
	pub runtime_url: String,

	#[serde(default = "default_api_url")]
	pub api_url: String,

	#[serde(default = "default_user_id")]
	pub default_user_id: String,

	#[serde(default = "default_request_timeout_seconds")]
	pub request_timeout_seconds: u64,

	/// Look up the project's live version before submitting transcripts
	#[serde(default)]
	pub resolve_live_version: bool,

	#[serde(skip)]
	pub config_path: Option<PathBuf>,
}

impl Default for Config {
	fn default() -> Self {
		Self {
			log_level: LogLevel::default(),
			api_key: String::new(),
			project_id: String::new(),
			version_id: None,
			runtime_url: default_runtime_url(),
			api_url: default_api_url(),
			default_user_id: default_user_id(),
			request_timeout_seconds: default_request_timeout_seconds(),
			resolve_live_version: false,
			config_path: None,
		}
	}
}

impl Config {
	pub fn get_log_level(&self) -> LogLevel {
		self.log_level
	}

	pub fn effective_version_id(&self) -> String {
		match &self.version_id {
			Some(version) if !version.trim().is_empty() => version.clone(),
			_ => self.project_id.clone(),
		}
	}
}

thread_local! {
	static CURRENT_CONFIG: RefCell<Option<Config>> = const { RefCell::new(None) };
}

/// Set the config for the current thread so logging macros can read the level
pub fn set_thread_config(config: &Config) {
	CURRENT_CONFIG.with(|c| {
		*c.borrow_mut() = Some(config.clone());
	});
}

/// Get the current config for the thread
pub fn with_thread_config<F, R>(f: F) -> Option<R>
where
	F: FnOnce(&Config) -> R,
{
	CURRENT_CONFIG.with(|c| (*c.borrow()).as_ref().map(f))
}

/// Info logging macro with automatic cyan coloring
/// Shows info messages when log level is Info OR Debug
#[macro_export]
macro_rules! log_info {
	($fmt:expr) => {
		if let Some(should_log) = $crate::config::with_thread_config(|config| config.get_log_level().is_info_enabled()) {
			if should_log {
				use colored::Colorize;
				println!("{}", $fmt.cyan());
			}
		}
	};
	($fmt:expr, $($arg:expr),*) => {
		if let Some(should_log) = $crate::config::with_thread_config(|config| config.get_log_level().is_info_enabled()) {
			if should_log {
				use colored::Colorize;
				println!("{}", format!($fmt, $($arg),*).cyan());
			}
		}
	};
}

/// Debug logging macro with automatic bright blue coloring
#[macro_export]
macro_rules! log_debug {
	($fmt:expr) => {
		if let Some(should_log) = $crate::config::with_thread_config(|config| config.get_log_level().is_debug_enabled()) {
			if should_log {
				use colored::Colorize;
				println!("{}", $fmt.bright_blue());
			}
		}
	};
	($fmt:expr, $($arg:expr),*) => {
		if let Some(should_log) = $crate::config::with_thread_config(|config| config.get_log_level().is_debug_enabled()) {
			if should_log {
				use colored::Colorize;
				println!("{}", format!($fmt, $($arg),*).bright_blue());
			}
		}
	};
}

/// Error logging macro with automatic bright red coloring
/// Always visible regardless of log level (errors should always be shown)
#[macro_export]
macro_rules! log_error {
	($fmt:expr) => {{
		use colored::Colorize;
		eprintln!("{}", $fmt.bright_red());
	}};
	($fmt:expr, $($arg:expr),*) => {{
		use colored::Colorize;
		eprintln!("{}", format!($fmt, $($arg),*).bright_red());
	}};
}
