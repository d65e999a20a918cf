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

// Session client for the hosted agent runtime and transcript APIs

use colored::*;
use reqwest::{Client, RequestBuilder, StatusCode};
use serde_json::Value;
use std::time::Duration;
use url::Url;

use super::protocol::{parse_traces, Action, InteractRequest, TraceEvent};
use super::transcript::{host_machine, host_os_name, Transcript, TranscriptSubmission, CLIENT_BROWSER};
use super::variables::{VariableSet, MESSAGE_TYPE_VARIABLE};
use super::SessionError;
use crate::config::Config;
use crate::log_debug;

const DM_KEY_PREFIX: &str = "VF.DM.";

/// Who is talking to which agent, and through which endpoints.
/// Fixed for the life of a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionIdentity {
	pub user_id: String,
	pub project_id: String,
	pub version_id: String,
	pub credential: String,
	pub base_url: String,
	pub transcript_api_url: String,
}

impl SessionIdentity {
	/// Build the identity from config, applying command line overrides
	pub fn from_config(
		config: &Config,
		user_id: Option<&str>,
		version_id: Option<&str>,
	) -> Self {
		let user_id = user_id
			.filter(|id| !id.trim().is_empty())
			.unwrap_or(&config.default_user_id);
		let version_id = version_id
			.filter(|id| !id.trim().is_empty())
			.map(str::to_string)
			.unwrap_or_else(|| config.effective_version_id());

		Self {
			user_id: user_id.to_string(),
			project_id: config.project_id.clone(),
			version_id,
			credential: config.api_key.clone(),
			base_url: config.runtime_url.clone(),
			transcript_api_url: config.api_url.clone(),
		}
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
	NotStarted,
	Active,
	Ended,
}

/// Result of handing one batch of traces to the client
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnOutcome {
	Continue,
	Ended,
}

pub struct SessionClient {
	identity: SessionIdentity,
	message_type: Option<String>,
	resolve_live_version: bool,
	http: Client,
	transcript: Transcript,
	state: SessionState,
	transcript_submitted: bool,
}

impl SessionClient {
	pub fn new(identity: SessionIdentity, timeout: Duration) -> Result<Self, SessionError> {
		let http = Client::builder()
			.timeout(timeout)
			.build()
			.map_err(SessionError::from_transport)?;

		Ok(Self {
			identity,
			message_type: None,
			resolve_live_version: false,
			http,
			transcript: Transcript::new(),
			state: SessionState::NotStarted,
			transcript_submitted: false,
		})
	}

	/// Value pushed as the `message_type` variable right before launch
	pub fn with_message_type(mut self, message_type: Option<String>) -> Self {
		self.message_type = message_type.filter(|value| !value.is_empty());
		self
	}

	pub fn with_live_version_lookup(mut self, enabled: bool) -> Self {
		self.resolve_live_version = enabled;
		self
	}

	pub fn identity(&self) -> &SessionIdentity {
		&self.identity
	}

	pub fn state(&self) -> SessionState {
		self.state
	}

	pub fn transcript(&self) -> &Transcript {
		&self.transcript
	}

	pub fn transcript_submitted(&self) -> bool {
		self.transcript_submitted
	}

	/// Merge variables into the user's runtime state
	pub async fn set_variables(&self, variables: &VariableSet) -> Result<(), SessionError> {
		let url = endpoint(
			&self.identity.base_url,
			&["state", "user", self.identity.user_id.as_str(), "variables"],
		)?;

		let response = self
			.authorized(self.http.patch(url))
			.json(variables)
			.send()
			.await
			.map_err(SessionError::from_transport)?;

		let status = response.status();
		let body = response.text().await.map_err(SessionError::from_transport)?;

		if !status.is_success() {
			return Err(SessionError::Status { status, body });
		}

		let rendered = serde_json::to_string(variables).unwrap_or_default();
		println!("Variables successfully set: {}", rendered);
		Ok(())
	}

	/// Launch the conversation. Only legal once, before any message.
	pub async fn start_session(&mut self) -> Result<TurnOutcome, SessionError> {
		if self.state != SessionState::NotStarted {
			return Err(SessionError::InvalidState(self.state));
		}

		if let Some(message_type) = self.message_type.clone() {
			let mut variables = VariableSet::new();
			variables.insert(MESSAGE_TYPE_VARIABLE.to_string(), Value::String(message_type));

			// The launch still goes ahead without the message type
			if let Err(e) = self.set_variables(&variables).await {
				report_failure("setting variables", &e);
			}
		}

		let traces = self.interact(Action::Launch).await?;

		self.state = SessionState::Active;
		let outcome = self.interpret_traces(&traces);

		// The greeting is shown but the recorded conversation starts empty,
		// unless the agent ended it right away and it is about to be submitted
		if outcome == TurnOutcome::Continue {
			self.transcript.clear();
		}

		Ok(outcome)
	}

	/// Send one user utterance and handle whatever the agent answers
	pub async fn send_message(&mut self, text: &str) -> Result<TurnOutcome, SessionError> {
		if self.state != SessionState::Active {
			return Err(SessionError::InvalidState(self.state));
		}

		self.transcript.push_user(text);

		let traces = self.interact(Action::Text { payload: text }).await?;
		Ok(self.interpret_traces(&traces))
	}

	/// Print agent output and record it, in the order the server sent it.
	/// An `end` trace stops processing of the remaining batch.
	pub fn interpret_traces(&mut self, traces: &[TraceEvent]) -> TurnOutcome {
		for trace in traces {
			match trace {
				TraceEvent::Text { message } | TraceEvent::Speak { message } => {
					println!("\n{} {}", "Voiceflow:".bright_green(), message);
					self.transcript.push_assistant(message);
				}
				TraceEvent::End => {
					println!("\n{} Conversation ended.", "Voiceflow:".bright_green());
					self.state = SessionState::Ended;
					return TurnOutcome::Ended;
				}
				TraceEvent::Other(tag) => {
					log_debug!("Skipping trace of type '{}'", tag);
				}
			}
		}

		TurnOutcome::Continue
	}

	/// Upload the transcript. Only the first call per run reaches the network;
	/// the session is considered ended afterwards.
	pub async fn submit_transcript(&mut self) -> Result<(), SessionError> {
		if self.transcript_submitted {
			log_debug!("Transcript already submitted, skipping");
			return Ok(());
		}
		self.transcript_submitted = true;
		self.state = SessionState::Ended;

		let version_id = self.resolve_version_id().await;

		let url = endpoint(&self.identity.transcript_api_url, &["transcripts"])?;
		let submission = TranscriptSubmission {
			project_id: &self.identity.project_id,
			version_id: &version_id,
			user_id: &self.identity.user_id,
			session_id: &self.identity.user_id,
			messages: self.transcript.to_messages(),
			os: host_os_name(),
			browser: CLIENT_BROWSER,
			device: host_machine(),
		};

		let response = self
			.authorized(self.http.put(url))
			.json(&submission)
			.send()
			.await
			.map_err(SessionError::from_transport)?;

		let status = response.status();
		let body = response.text().await.map_err(SessionError::from_transport)?;

		if !status.is_success() {
			return Err(SessionError::Status { status, body });
		}

		println!("\nTranscript successfully submitted to Voiceflow.");
		Ok(())
	}

	/// Version recorded on the transcript. Passthrough of the configured id
	/// unless live version lookup is enabled.
	pub async fn resolve_version_id(&self) -> String {
		if !self.resolve_live_version {
			println!("Using version ID: {}", self.identity.version_id);
			return self.identity.version_id.clone();
		}

		match self.lookup_live_version().await {
			Ok(Some(live_version)) => {
				println!("Found live version ID: {}", live_version);
				live_version
			}
			Ok(None) => {
				println!("No live version found in project data");
				println!("Using version ID: {}", self.identity.version_id);
				self.identity.version_id.clone()
			}
			Err(e) => {
				println!("Warning: Could not get version ID: {}", e);
				println!("Using version ID: {}", self.identity.version_id);
				self.identity.version_id.clone()
			}
		}
	}

	async fn lookup_live_version(&self) -> Result<Option<String>, SessionError> {
		let url = endpoint(
			&self.identity.transcript_api_url,
			&["projects", self.identity.project_id.as_str()],
		)?;
		log_debug!("GET {}", url);

		// The project API takes the bare key without the dialog manager prefix
		let credential = self.identity.credential.as_str();
		let key = credential
			.split_once(DM_KEY_PREFIX)
			.map(|(_, rest)| rest)
			.unwrap_or(credential);

		let response = self
			.http
			.get(url)
			.header("Authorization", key)
			.header("Content-Type", "application/json")
			.send()
			.await
			.map_err(SessionError::from_transport)?;

		let status = response.status();
		let body = response.text().await.map_err(SessionError::from_transport)?;

		if !status.is_success() {
			return Err(SessionError::Status { status, body });
		}

		let project: Value = serde_json::from_str(&body).map_err(|e| SessionError::Decode {
			message: e.to_string(),
			body: body.clone(),
		})?;

		Ok(project
			.get("liveVersion")
			.and_then(|version| version.as_str())
			.map(str::to_string))
	}

	async fn interact(&self, action: Action<'_>) -> Result<Vec<TraceEvent>, SessionError> {
		let url = endpoint(
			&self.identity.base_url,
			&["state", "user", self.identity.user_id.as_str(), "interact"],
		)?;
		log_debug!("POST {}", url);

		let request = InteractRequest {
			project_id: &self.identity.project_id,
			action,
		};

		let response = self
			.authorized(self.http.post(url))
			.json(&request)
			.send()
			.await
			.map_err(SessionError::from_transport)?;

		let status = response.status();
		let body = response.text().await.map_err(SessionError::from_transport)?;
		log_debug!("Interact response ({}): {}", status, body);

		// The runtime answers a successful turn with exactly 200
		if status != StatusCode::OK {
			return Err(SessionError::Status { status, body });
		}

		parse_traces(&body).map_err(|e| SessionError::Decode {
			message: e.to_string(),
			body,
		})
	}

	fn authorized(&self, builder: RequestBuilder) -> RequestBuilder {
		builder
			.header("Authorization", &self.identity.credential)
			.header("Content-Type", "application/json")
	}
}

/// Append path segments to a base URL, escaping each segment
fn endpoint(base: &str, segments: &[&str]) -> Result<Url, SessionError> {
	let mut url = Url::parse(base).map_err(|e| SessionError::InvalidUrl(format!("{}: {}", base, e)))?;

	url.path_segments_mut()
		.map_err(|_| SessionError::InvalidUrl(format!("{}: cannot be a base", base)))?
		.pop_if_empty()
		.extend(segments);

	Ok(url)
}

/// Print a recoverable failure the way the user expects to see it:
/// status line first, then the raw body.
pub fn report_failure(context: &str, err: &SessionError) {
	match err {
		SessionError::Status { status, body } => {
			println!("{}", format!("Error {}: {}", context, status.as_u16()).bright_red());
			println!("{}", body);
		}
		other if other.is_transport() => {
			println!(
				"{}",
				format!("Error {}: network failure: {}", context, other).bright_red()
			);
		}
		other => {
			println!("{}", format!("Error {}: {}", context, other).bright_red());
		}
	}
}
