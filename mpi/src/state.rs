//
// Copyright 2017-2026 Hans W. Uhlig. All Rights Reserved.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//      http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//

use crate::MpiError;
use std::fmt;
use std::str::FromStr;

/// Position of the MPI scanner within the inbound stream.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum MpiState {
    /// Plain text, looking for the next line break
    Data,
    /// Just after a line break, checking for the init sequence
    #[default]
    Newline,
    /// Matching the init sequence
    Init,
    /// Expecting the single command byte
    Command,
    /// Accumulating the decimal body length
    Length,
    /// Accumulating the body
    Body,
}

impl MpiState {
    /// Every state, in scanning order.
    pub const ALL: [MpiState; 6] = [
        MpiState::Data,
        MpiState::Newline,
        MpiState::Init,
        MpiState::Command,
        MpiState::Length,
        MpiState::Body,
    ];

    /// Lowercase name of the state.
    pub fn as_str(self) -> &'static str {
        match self {
            MpiState::Data => "data",
            MpiState::Newline => "newline",
            MpiState::Init => "init",
            MpiState::Command => "command",
            MpiState::Length => "length",
            MpiState::Body => "body",
        }
    }
}

impl fmt::Display for MpiState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MpiState {
    type Err = MpiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MpiState::ALL
            .into_iter()
            .find(|state| state.as_str() == s)
            .ok_or_else(|| MpiError::InvalidState(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_names_round_trip() {
        for state in MpiState::ALL {
            assert_eq!(state.to_string().parse::<MpiState>().unwrap(), state);
        }
    }

    #[test]
    fn test_invalid_state_rejected() {
        let err = "Body".parse::<MpiState>().unwrap_err();
        assert!(matches!(err, MpiError::InvalidState(name) if name == "Body"));
    }

    #[test]
    fn test_stream_starts_at_line_start() {
        assert_eq!(MpiState::default(), MpiState::Newline);
    }
}
