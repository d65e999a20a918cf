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

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use vfchat::config::{self, Config, LogLevel};
use vfchat::log_error;
use vfchat::session::{run_interactive_session, SessionOptions};

#[derive(Parser, Debug)]
#[command(name = "vfchat")]
#[command(version = "0.1.0")]
#[command(about = "Chat with a hosted Voiceflow agent from your terminal")]
struct VfchatArgs {
	/// User ID for the Voiceflow session
	#[arg(long)]
	user_id: Option<String>,

	/// Message type to pass to Voiceflow
	#[arg(long)]
	message_type: Option<String>,

	/// Version ID recorded on the transcript (defaults to the project ID)
	#[arg(long)]
	version_id: Option<String>,

	/// JSON string of variables to set before starting conversation
	#[arg(long)]
	variables: Option<String>,

	/// Value for the Cible variable
	#[arg(long)]
	cible: Option<String>,

	/// Path to a config file instead of the system-wide one
	#[arg(long)]
	config: Option<PathBuf>,

	/// Override the configured log level (none, info, debug)
	#[arg(long)]
	log_level: Option<LogLevel>,

	/// Write a default config file and exit
	#[arg(long)]
	init_config: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), anyhow::Error> {
	let args = VfchatArgs::parse();

	if args.init_config {
		return handle_init_config(args.config.as_deref());
	}

	let mut config = match &args.config {
		Some(path) => Config::load_from_path(path)?,
		None => Config::load()?,
	};

	if let Some(level) = args.log_level {
		config.log_level = level;
	}

	if let Err(e) = config.validate() {
		log_error!("Configuration error: {}", e);
		if let Some(path) = &config.config_path {
			log_error!("Config file: {}", path.display());
		}
		std::process::exit(1);
	}

	// Make the log level visible to the logging macros
	config::set_thread_config(&config);

	let options = SessionOptions {
		user_id: args.user_id,
		message_type: args.message_type,
		version_id: args.version_id,
		variables: args.variables,
		cible: args.cible,
	};

	let exit = run_interactive_session(&config, options).await?;
	std::process::exit(exit.code());
}

// Handle the --init-config flag
fn handle_init_config(path: Option<&std::path::Path>) -> Result<(), anyhow::Error> {
	let path = match path {
		Some(path) => path.to_path_buf(),
		None => vfchat::directories::get_config_file_path()?,
	};

	if path.exists() {
		println!("Config file already exists at {}", path.display());
		return Ok(());
	}

	Config::default()
		.save_to_path(&path)
		.context("Failed to write default configuration")?;

	println!("Configuration saved to {}", path.display());
	println!("Set api_key and project_id there, or export VOICEFLOW_API_KEY and VOICEFLOW_PROJECT_ID.");
	Ok(())
}
