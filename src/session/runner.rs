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

// Interactive session runner

use anyhow::Result;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use super::client::report_failure;
use super::input::{LineSource, TerminalInput, UserInput};
use super::variables::{build_initial_variables, VariableSet};
use super::{SessionClient, SessionIdentity, TurnOutcome};
use crate::config::Config;
use crate::{log_debug, log_error, log_info};

/// Words that end the conversation when typed on their own
pub const EXIT_KEYWORDS: &[&str] = &["exit", "quit", "bye"];

/// Per-run choices that come from the command line
#[derive(Debug, Clone, Default)]
pub struct SessionOptions {
	pub user_id: Option<String>,
	pub message_type: Option<String>,
	pub version_id: Option<String>,
	pub variables: Option<String>,
	pub cible: Option<String>,
}

/// How a run finished
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionExit {
	/// The agent sent an end trace
	Ended,
	/// Exit keyword or end of input
	UserExit,
	/// Ctrl+C
	Interrupted,
	/// The launch request failed
	StartFailed,
	/// `--variables` was not a JSON object
	InvalidVariables,
}

impl SessionExit {
	pub fn code(&self) -> i32 {
		match self {
			SessionExit::Ended | SessionExit::UserExit | SessionExit::Interrupted => 0,
			SessionExit::StartFailed | SessionExit::InvalidVariables => 1,
		}
	}
}

pub fn is_exit_command(input: &str) -> bool {
	let input = input.trim().to_lowercase();
	EXIT_KEYWORDS.contains(&input.as_str())
}

// Run an interactive session against the configured agent
pub async fn run_interactive_session(config: &Config, options: SessionOptions) -> Result<SessionExit> {
	// Malformed variables are rejected before any network activity
	let variables = match build_initial_variables(options.variables.as_deref(), options.cible.as_deref()) {
		Ok(variables) => variables,
		Err(e) => {
			log_error!("Error: {}", e);
			return Ok(SessionExit::InvalidVariables);
		}
	};

	let identity = SessionIdentity::from_config(
		config,
		options.user_id.as_deref(),
		options.version_id.as_deref(),
	);

	let mut client = SessionClient::new(identity, Duration::from_secs(config.request_timeout_seconds))?
		.with_message_type(options.message_type)
		.with_live_version_lookup(config.resolve_live_version);

	let identity = client.identity();
	log_info!(
		"Session for user '{}' on project '{}' (version '{}')",
		identity.user_id,
		identity.project_id,
		identity.version_id
	);

	let interrupted = Arc::new(AtomicBool::new(false));
	let interrupted_clone = interrupted.clone();

	ctrlc::set_handler(move || {
		// Double Ctrl+C forces immediate exit
		if interrupted_clone.swap(true, Ordering::SeqCst) {
			println!("\nForcing exit due to repeated Ctrl+C...");
			std::process::exit(130); // 130 is standard exit code for SIGINT
		}
		println!("\nInterrupt received, finishing after the current request.");
		println!("Press Ctrl+C again to force exit");
	})?;

	let mut input = TerminalInput::new()?;

	Ok(run_conversation(&mut client, &variables, &mut input, &interrupted).await)
}

/// Drive one conversation to completion: apply variables, launch, then
/// alternate between reading a line and sending it. The transcript is
/// submitted on every exit path except a failed launch.
pub async fn run_conversation<S: LineSource>(
	client: &mut SessionClient,
	variables: &VariableSet,
	input: &mut S,
	interrupted: &AtomicBool,
) -> SessionExit {
	if !variables.is_empty() {
		println!("Setting custom variables...");
		if let Err(e) = client.set_variables(variables).await {
			report_failure("setting variables", &e);
		}
	}

	println!("Starting conversation with Voiceflow agent...");
	match client.start_session().await {
		Ok(TurnOutcome::Ended) => {
			finish(client).await;
			return SessionExit::Ended;
		}
		Ok(TurnOutcome::Continue) => {}
		Err(e) => {
			report_failure("starting session", &e);
			return SessionExit::StartFailed;
		}
	}

	loop {
		// Interrupts that arrived mid-request are honored here, between turns
		if interrupted.load(Ordering::SeqCst) {
			println!("\nExiting conversation...");
			finish(client).await;
			return SessionExit::Interrupted;
		}

		let line = match input.next_line() {
			Ok(UserInput::Line(line)) => line,
			Ok(UserInput::Interrupted) => {
				println!("\nExiting conversation...");
				finish(client).await;
				return SessionExit::Interrupted;
			}
			Ok(UserInput::Eof) => {
				println!("\nExiting conversation...");
				finish(client).await;
				return SessionExit::UserExit;
			}
			Err(e) => {
				log_error!("Failed to read input: {}", e);
				finish(client).await;
				return SessionExit::UserExit;
			}
		};

		if is_exit_command(&line) {
			println!("Exiting conversation...");
			finish(client).await;
			return SessionExit::UserExit;
		}

		match client.send_message(&line).await {
			Ok(TurnOutcome::Ended) => {
				finish(client).await;
				return SessionExit::Ended;
			}
			Ok(TurnOutcome::Continue) => {}
			Err(e) => report_failure("sending message", &e),
		}
	}
}

async fn finish(client: &mut SessionClient) {
	log_debug!(
		"Submitting transcript with {} entries",
		client.transcript().len()
	);
	if let Err(e) = client.submit_transcript().await {
		report_failure("submitting transcript", &e);
	}
}
