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

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use super::Config;

pub const API_KEY_ENV: &str = "VOICEFLOW_API_KEY";
pub const PROJECT_ID_ENV: &str = "VOICEFLOW_PROJECT_ID";
pub const VERSION_ID_ENV: &str = "VOICEFLOW_VERSION_ID";

impl Config {
	/// Load configuration from the system-wide config file
	pub fn load() -> Result<Self> {
		let config_path = crate::directories::get_config_file_path()?;

		if config_path.exists() {
			Self::load_from_path(&config_path)
		} else {
			// No file yet: defaults plus whatever the environment provides
			let mut config = Self::default();
			config.config_path = Some(config_path);
			config.apply_env_overrides();
			Ok(config)
		}
	}

	/// Load configuration from a specific file path
	pub fn load_from_path(path: &Path) -> Result<Self> {
		let config_str = fs::read_to_string(path)
			.context(format!("Failed to read config from {}", path.display()))?;
		let mut config: Config =
			toml::from_str(&config_str).context("Failed to parse TOML configuration")?;

		// Store the config path for future saves
		config.config_path = Some(path.to_path_buf());

		// Environment variables take precedence over config file values
		config.apply_env_overrides();

		Ok(config)
	}

	/// Apply credential and target overrides from the environment
	pub fn apply_env_overrides(&mut self) {
		if let Ok(api_key) = std::env::var(API_KEY_ENV) {
			if !api_key.is_empty() {
				self.api_key = api_key;
			}
		}
		if let Ok(project_id) = std::env::var(PROJECT_ID_ENV) {
			if !project_id.is_empty() {
				self.project_id = project_id;
			}
		}
		if let Ok(version_id) = std::env::var(VERSION_ID_ENV) {
			if !version_id.is_empty() {
				self.version_id = Some(version_id);
			}
		}
	}

	/// Save configuration to a specific file path
	pub fn save_to_path(&self, path: &Path) -> Result<()> {
		// Ensure the parent directory exists
		if let Some(parent) = path.parent() {
			fs::create_dir_all(parent).context(format!(
				"Failed to create config directory: {}",
				parent.display()
			))?;
		}

		let config_str =
			toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

		fs::write(path, config_str)
			.context(format!("Failed to write config to {}", path.display()))?;

		Ok(())
	}
}
