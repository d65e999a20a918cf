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

// Session module for conversations with a hosted agent

pub mod client; // Runtime and transcript API client
mod error; // Session error kinds
pub mod input; // Prompt and scripted line sources
pub mod protocol; // Interact request and trace shapes
pub mod runner; // Interactive conversation loop
pub mod transcript; // Local transcript and its upload format
pub mod variables; // Pre-conversation variable handling

pub use client::{report_failure, SessionClient, SessionIdentity, SessionState, TurnOutcome};
pub use error::SessionError;
pub use input::{LineSource, ScriptedInput, TerminalInput, UserInput};
pub use protocol::TraceEvent;
pub use runner::{is_exit_command, run_conversation, run_interactive_session, SessionExit, SessionOptions};
pub use transcript::{Role, Transcript, TranscriptEntry};
pub use variables::{build_initial_variables, VariableSet};
