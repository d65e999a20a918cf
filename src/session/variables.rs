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

use serde_json::{Map, Value};

use super::SessionError;

/// Variables pushed into the user's runtime state before the first turn
pub type VariableSet = Map<String, Value>;

/// Well-known variable that has its own CLI shortcut
pub const CIBLE_VARIABLE: &str = "Cible";

pub const MESSAGE_TYPE_VARIABLE: &str = "message_type";

/// Merge the `--variables` JSON blob with the `--cible` shortcut.
/// The shortcut wins when both set the same key.
pub fn build_initial_variables(
	variables_json: Option<&str>,
	cible: Option<&str>,
) -> Result<VariableSet, SessionError> {
	let mut variables = match variables_json.filter(|raw| !raw.trim().is_empty()) {
		Some(raw) => match serde_json::from_str::<Value>(raw) {
			Ok(Value::Object(map)) => map,
			Ok(other) => {
				return Err(SessionError::InvalidVariables(format!(
					"expected an object, got {}",
					json_kind(&other)
				)))
			}
			Err(e) => return Err(SessionError::InvalidVariables(e.to_string())),
		},
		None => VariableSet::new(),
	};

	if let Some(cible) = cible.filter(|value| !value.is_empty()) {
		variables.insert(CIBLE_VARIABLE.to_string(), Value::String(cible.to_string()));
	}

	Ok(variables)
}

fn json_kind(value: &Value) -> &'static str {
	match value {
		Value::Null => "null",
		Value::Bool(_) => "a boolean",
		Value::Number(_) => "a number",
		Value::String(_) => "a string",
		Value::Array(_) => "an array",
		Value::Object(_) => "an object",
	}
}
