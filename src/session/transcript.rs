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

// Local conversation record and its transcript-API wire format

use serde::Serialize;

/// Marker identifying this client in submitted transcripts
pub const CLIENT_BROWSER: &str = "CLI";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
	User,
	Assistant,
}

impl Role {
	pub fn as_str(&self) -> &'static str {
		match self {
			Role::User => "user",
			Role::Assistant => "assistant",
		}
	}
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscriptEntry {
	pub role: Role,
	pub text: String,
	/// Milliseconds since the Unix epoch
	pub timestamp: i64,
}

/// Append-only, chronologically ordered record of one conversation
#[derive(Debug, Clone, Default)]
pub struct Transcript {
	entries: Vec<TranscriptEntry>,
}

impl Transcript {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn push_user(&mut self, text: &str) {
		self.push(Role::User, text);
	}

	pub fn push_assistant(&mut self, text: &str) {
		self.push(Role::Assistant, text);
	}

	fn push(&mut self, role: Role, text: &str) {
		self.entries.push(TranscriptEntry {
			role,
			text: text.to_string(),
			timestamp: chrono::Utc::now().timestamp_millis(),
		});
	}

	pub fn clear(&mut self) {
		self.entries.clear();
	}

	pub fn entries(&self) -> &[TranscriptEntry] {
		&self.entries
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	pub fn to_messages(&self) -> Vec<TranscriptMessage<'_>> {
		self.entries
			.iter()
			.map(|entry| TranscriptMessage {
				message_type: entry.role.as_str(),
				text: &entry.text,
				timestamp: entry.timestamp,
			})
			.collect()
	}
}

#[derive(Debug, Clone, Serialize)]
pub struct TranscriptMessage<'a> {
	#[serde(rename = "type")]
	pub message_type: &'static str,
	pub text: &'a str,
	pub timestamp: i64,
}

/// Body of `PUT /transcripts`
#[derive(Debug, Clone, Serialize)]
pub struct TranscriptSubmission<'a> {
	#[serde(rename = "projectID")]
	pub project_id: &'a str,
	#[serde(rename = "versionID")]
	pub version_id: &'a str,
	#[serde(rename = "userID")]
	pub user_id: &'a str,
	#[serde(rename = "sessionID")]
	pub session_id: &'a str,
	pub messages: Vec<TranscriptMessage<'a>>,
	pub os: &'static str,
	pub browser: &'static str,
	pub device: &'static str,
}

/// Host OS name in the capitalized form the transcript viewer displays
pub fn host_os_name() -> &'static str {
	match std::env::consts::OS {
		"linux" => "Linux",
		"macos" => "Darwin",
		"windows" => "Windows",
		"freebsd" => "FreeBSD",
		"openbsd" => "OpenBSD",
		"netbsd" => "NetBSD",
		other => other,
	}
}

pub fn host_machine() -> &'static str {
	std::env::consts::ARCH
}
