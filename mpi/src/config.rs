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

//! MPI layer configuration
//!
//! ```
//! use mudlink_mpi::{MpiConfig, OutputFormat};
//!
//! let config = MpiConfig::default()
//!     .with_editor("vim")
//!     .with_output_format(OutputFormat::Tintin);
//! assert_eq!(config.editor, "vim");
//! ```

use std::env;

/// Environment variable overriding the editor program.
pub const EDITOR_VAR: &str = "TINTINEDITOR";

/// Environment variable overriding the pager program.
pub const PAGER_VAR: &str = "TINTINPAGER";

/// Largest MPI body accepted by default. Longer announced lengths are treated as plain text.
pub const DEFAULT_MAX_BODY_SIZE: usize = 1 << 20;

#[cfg(windows)]
const DEFAULT_EDITOR: &str = "notepad";
#[cfg(windows)]
const DEFAULT_PAGER: &str = "notepad";
#[cfg(not(windows))]
const DEFAULT_EDITOR: &str = "nano -w";
#[cfg(not(windows))]
const DEFAULT_PAGER: &str = "less";

/// How editing and viewing sessions reach the user.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum OutputFormat {
    /// Run the program directly and wait for it to exit
    #[default]
    Normal,
    /// Print an `MPICOMMAND` line for a TinTin++ front end and wait for a line on stdin
    Tintin,
}

/// Configuration for an [`MpiProtocol`](crate::MpiProtocol)
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct MpiConfig {
    /// Program used to edit text, split on whitespace into program and arguments
    pub editor: String,

    /// Program used to view read-only text, split on whitespace into program and arguments
    pub pager: String,

    /// How sessions are presented
    pub output_format: OutputFormat,

    /// Largest body length a frame may announce
    pub max_body_size: usize,
}

impl Default for MpiConfig {
    fn default() -> Self {
        Self {
            editor: DEFAULT_EDITOR.to_string(),
            pager: DEFAULT_PAGER.to_string(),
            output_format: OutputFormat::default(),
            max_body_size: DEFAULT_MAX_BODY_SIZE,
        }
    }
}

impl MpiConfig {
    /// Defaults, overridden by [`EDITOR_VAR`] and [`PAGER_VAR`] when they are set.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(editor) = env::var(EDITOR_VAR) {
            config.editor = editor;
        }
        if let Ok(pager) = env::var(PAGER_VAR) {
            config.pager = pager;
        }
        config
    }

    /// Set the editor program
    pub fn with_editor(mut self, editor: impl Into<String>) -> Self {
        self.editor = editor.into();
        self
    }

    /// Set the pager program
    pub fn with_pager(mut self, pager: impl Into<String>) -> Self {
        self.pager = pager.into();
        self
    }

    /// Set the output format
    pub fn with_output_format(mut self, output_format: OutputFormat) -> Self {
        self.output_format = output_format;
        self
    }

    /// Set the largest body length a frame may announce
    pub fn with_max_body_size(mut self, max_body_size: usize) -> Self {
        self.max_body_size = max_body_size;
        self
    }
}
