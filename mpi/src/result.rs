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

//! Error types for the MPI layer

/// Result type for MPI operations
pub type MpiResult<T> = Result<T, MpiError>;

/// MPI layer error types
#[derive(Debug, thiserror::Error)]
pub enum MpiError {
    /// I/O error while handling a temporary file or talking to the terminal
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A command payload does not have the layout its command requires
    #[error("Malformed payload for MPI command '{command}': {reason}")]
    MalformedPayload {
        /// The command byte, as a character
        command: char,
        /// What is missing or wrong
        reason: &'static str,
    },

    /// A textual state outside of the scanner's state set
    #[error("Invalid MPI state '{0}'")]
    InvalidState(String),

    /// An external editor or pager exited unsuccessfully
    #[error("Program '{program}' exited unsuccessfully: {status}")]
    Launch {
        /// The program string that was run
        program: String,
        /// Exit status as reported by the operating system
        status: String,
    },
}
