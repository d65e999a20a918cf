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

// Directory utilities for cross-platform data directory management

use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

/// Get the system-wide data directory for vfchat
///
/// This function returns the appropriate data directory based on the OS:
/// - macOS: ~/.local/share/vfchat
/// - Linux: ~/.local/share/vfchat (following XDG Base Directory specification)
/// - Windows: %LOCALAPPDATA%/vfchat
pub fn get_vfchat_data_dir() -> Result<PathBuf> {
	let data_dir = match dirs::home_dir() {
		Some(home) => {
			#[cfg(target_os = "windows")]
			let path = {
				match dirs::data_local_dir() {
					Some(dir) => dir.join("vfchat"),
					None => home.join("AppData").join("Local").join("vfchat"),
				}
			};

			#[cfg(not(target_os = "windows"))]
			let path = home.join(".local").join("share").join("vfchat");

			path
		}
		None => {
			return Err(anyhow::anyhow!("Unable to determine home directory"));
		}
	};

	Ok(data_dir)
}

/// Get the configuration directory path, creating it when missing
pub fn get_config_dir() -> Result<PathBuf> {
	let config_dir = get_vfchat_data_dir()?.join("config");

	if !config_dir.exists() {
		fs::create_dir_all(&config_dir).context(format!(
			"Failed to create vfchat config directory: {}",
			config_dir.display()
		))?;
	}

	Ok(config_dir)
}

/// Get the default configuration file path
pub fn get_config_file_path() -> Result<PathBuf> {
	let config_dir = get_config_dir()?;
	Ok(config_dir.join("config.toml"))
}
