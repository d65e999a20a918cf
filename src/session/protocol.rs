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

// Wire shapes for the runtime interact endpoint

use serde::Serialize;
use serde_json::Value;

/// Body of `POST /state/user/{userId}/interact`
#[derive(Debug, Clone, Serialize)]
pub struct InteractRequest<'a> {
	#[serde(rename = "projectID")]
	pub project_id: &'a str,
	pub action: Action<'a>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Action<'a> {
	Launch,
	Text { payload: &'a str },
}

/// One unit of agent output returned by an interact call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TraceEvent {
	Text { message: String },
	Speak { message: String },
	End,
	/// Any tag this client does not act on
	Other(String),
}

impl TraceEvent {
	/// Build a trace from its raw JSON object. Missing fields degrade to
	/// empty values instead of failing the whole batch.
	pub fn from_value(value: &Value) -> Self {
		let trace_type = value.get("type").and_then(|t| t.as_str()).unwrap_or("");

		match trace_type {
			"text" => TraceEvent::Text {
				message: payload_message(value),
			},
			"speak" => TraceEvent::Speak {
				message: payload_message(value),
			},
			"end" => TraceEvent::End,
			other => TraceEvent::Other(other.to_string()),
		}
	}
}

fn payload_message(value: &Value) -> String {
	value
		.get("payload")
		.and_then(|payload| payload.get("message"))
		.and_then(|message| message.as_str())
		.unwrap_or("")
		.to_string()
}

/// Parse an interact response body into traces, preserving server order
pub fn parse_traces(body: &str) -> Result<Vec<TraceEvent>, serde_json::Error> {
	let raw: Vec<Value> = serde_json::from_str(body)?;
	Ok(raw.iter().map(TraceEvent::from_value).collect())
}
