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

use anyhow::{anyhow, Result};
use url::Url;

use super::loading::{API_KEY_ENV, PROJECT_ID_ENV};
use super::Config;

impl Config {
	/// Validate the configuration for common issues
	pub fn validate(&self) -> Result<()> {
		self.validate_credentials()?;
		self.validate_urls()?;
		self.validate_timeout()?;
		Ok(())
	}

	pub fn validate_credentials(&self) -> Result<()> {
		if self.api_key.trim().is_empty() {
			return Err(anyhow!(
				"API key is not configured. Set {} or add api_key to your config file",
				API_KEY_ENV
			));
		}

		if self.project_id.trim().is_empty() {
			return Err(anyhow!(
				"Project ID is not configured. Set {} or add project_id to your config file",
				PROJECT_ID_ENV
			));
		}

		Ok(())
	}

	pub fn validate_urls(&self) -> Result<()> {
		for (name, value) in [("runtime_url", &self.runtime_url), ("api_url", &self.api_url)] {
			let parsed =
				Url::parse(value).map_err(|e| anyhow!("Invalid {}: '{}' ({})", name, value, e))?;

			if !matches!(parsed.scheme(), "http" | "https") {
				return Err(anyhow!(
					"Invalid {}: '{}'. Only http and https URLs are supported",
					name,
					value
				));
			}
		}

		Ok(())
	}

	pub fn validate_timeout(&self) -> Result<()> {
		if self.request_timeout_seconds == 0 || self.request_timeout_seconds > 600 {
			return Err(anyhow!(
				"Request timeout out of range: {}. Must be between 1 and 600 seconds",
				self.request_timeout_seconds
			));
		}

		Ok(())
	}
}
