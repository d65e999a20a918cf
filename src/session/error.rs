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

use reqwest::StatusCode;
use thiserror::Error;

use super::SessionState;

/// Failures surfaced by the session client.
///
/// Whether a kind is fatal depends on the call that produced it: a failed
/// launch ends the run, while failed turns, variable updates and transcript
/// uploads are reported and the conversation carries on.
#[derive(Debug, Error)]
pub enum SessionError {
	#[error("Variables must be a valid JSON object: {0}")]
	InvalidVariables(String),

	#[error("Invalid endpoint URL: {0}")]
	InvalidUrl(String),

	#[error("HTTP {status}: {body}")]
	Status { status: StatusCode, body: String },

	#[error("Request timed out: {0}")]
	Timeout(#[source] reqwest::Error),

	#[error("Transport failure: {0}")]
	Transport(#[source] reqwest::Error),

	#[error("Failed to decode response: {message}. Response: {body}")]
	Decode { message: String, body: String },

	#[error("Operation not allowed while session is {0:?}")]
	InvalidState(SessionState),
}

impl SessionError {
	/// Classify a reqwest failure, keeping timeouts distinct from other transport errors
	pub fn from_transport(err: reqwest::Error) -> Self {
		if err.is_timeout() {
			SessionError::Timeout(err)
		} else {
			SessionError::Transport(err)
		}
	}

	pub fn is_transport(&self) -> bool {
		matches!(self, SessionError::Timeout(_) | SessionError::Transport(_))
	}
}
