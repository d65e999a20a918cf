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

// User input handling module

use anyhow::Result;
use colored::*;
use rustyline::error::ReadlineError;
use rustyline::{CompletionType, Config as RustylineConfig, DefaultEditor, EditMode};

/// What the user did at the prompt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserInput {
	Line(String),
	/// Ctrl+C while waiting for input
	Interrupted,
	/// Ctrl+D or closed stdin
	Eof,
}

/// Source of user turns. The conversation loop blocks on it between requests.
pub trait LineSource {
	fn next_line(&mut self) -> Result<UserInput>;
}

/// Interactive terminal prompt backed by rustyline
pub struct TerminalInput {
	editor: DefaultEditor,
}

impl TerminalInput {
	pub fn new() -> Result<Self> {
		let config = RustylineConfig::builder()
			.completion_type(CompletionType::List)
			.edit_mode(EditMode::Emacs)
			.auto_add_history(true) // Automatically add lines to history
			.bell_style(rustyline::config::BellStyle::None) // No bell
			.build();

		let editor = DefaultEditor::with_config(config)?;
		Ok(Self { editor })
	}
}

impl LineSource for TerminalInput {
	fn next_line(&mut self) -> Result<UserInput> {
		println!();
		let prompt = "You: ".bright_blue().to_string();

		match self.editor.readline(&prompt) {
			Ok(line) => Ok(UserInput::Line(line)),
			Err(ReadlineError::Interrupted) => Ok(UserInput::Interrupted),
			Err(ReadlineError::Eof) => Ok(UserInput::Eof),
			Err(err) => Err(err.into()),
		}
	}
}

/// Replays a fixed list of inputs, then reports end of input
pub struct ScriptedInput {
	inputs: std::collections::VecDeque<UserInput>,
}

impl ScriptedInput {
	pub fn new<I>(inputs: I) -> Self
	where
		I: IntoIterator<Item = UserInput>,
	{
		Self {
			inputs: inputs.into_iter().collect(),
		}
	}

	pub fn lines<I, S>(lines: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		Self::new(lines.into_iter().map(|line| UserInput::Line(line.into())))
	}
}

impl LineSource for ScriptedInput {
	fn next_line(&mut self) -> Result<UserInput> {
		Ok(self.inputs.pop_front().unwrap_or(UserInput::Eof))
	}
}
