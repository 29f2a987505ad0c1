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

//! Telnet layer configuration
//!
//! ```
//! use mudlink_telnet::TelnetConfig;
//!
//! let config = TelnetConfig::default()
//!     .with_line_feed_prompts()
//!     .with_charset("UTF-8");
//! assert_eq!(config.prompt_terminator(), b"\r\n");
//! ```

use crate::consts::{CR_LF, GA, IAC};
use bytes::Bytes;

/// Wire name of the character set requested when none is configured.
pub const DEFAULT_CHARSET: &str = "US-ASCII";

/// Separator between the entries of a CHARSET `REQUEST`.
pub const CHARSET_SEPARATOR: u8 = b';';

/// Known character sets, keyed by lowercase alias, with their wire names.
pub const CHARSET_ALIASES: &[(&str, &str)] = &[
    ("us-ascii", "US-ASCII"),
    ("latin-1", "ISO-8859-1"),
    ("utf-8", "UTF-8"),
];

/// Resolve a character set alias (case-insensitive) to its wire name.
pub fn charset_wire_name(name: &str) -> Option<&'static str> {
    CHARSET_ALIASES
        .iter()
        .find(|(alias, wire)| alias.eq_ignore_ascii_case(name) || wire.eq_ignore_ascii_case(name))
        .map(|(_, wire)| *wire)
}

/// Configuration for a [`TelnetHandler`](crate::TelnetHandler)
#[derive(Debug, Clone)]
pub struct TelnetConfig {
    /// Bytes emitted in place of `IAC GA`. `None` re-emits `IAC GA` unchanged.
    pub prompt_terminator: Option<Bytes>,

    /// Wire name of the character set requested once CHARSET is agreed
    pub charset: String,
}

impl Default for TelnetConfig {
    fn default() -> Self {
        Self {
            prompt_terminator: None,
            charset: DEFAULT_CHARSET.to_string(),
        }
    }
}

impl TelnetConfig {
    /// Replace `IAC GA` prompts with the given bytes
    pub fn with_prompt_terminator(mut self, terminator: impl Into<Bytes>) -> Self {
        self.prompt_terminator = Some(terminator.into());
        self
    }

    /// Replace `IAC GA` prompts with `CR LF`
    pub fn with_line_feed_prompts(self) -> Self {
        self.with_prompt_terminator(Bytes::from_static(CR_LF))
    }

    /// Set the character set requested during CHARSET negotiation
    pub fn with_charset(mut self, charset: impl Into<String>) -> Self {
        self.charset = charset.into();
        self
    }

    /// The bytes emitted for each `IAC GA`.
    pub fn prompt_terminator(&self) -> &[u8] {
        const GO_AHEAD: &[u8] = &[IAC, GA];
        self.prompt_terminator.as_deref().unwrap_or(GO_AHEAD)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = TelnetConfig::default();
        assert!(config.prompt_terminator.is_none());
        assert_eq!(config.prompt_terminator(), &[IAC, GA]);
        assert_eq!(config.charset, "US-ASCII");
    }

    #[test]
    fn test_custom_prompt_terminator() {
        let config = TelnetConfig::default().with_prompt_terminator(&b"<PROMPT>"[..]);
        assert_eq!(config.prompt_terminator(), b"<PROMPT>");
    }

    #[test]
    fn test_charset_aliases() {
        assert_eq!(charset_wire_name("utf-8"), Some("UTF-8"));
        assert_eq!(charset_wire_name("UTF-8"), Some("UTF-8"));
        assert_eq!(charset_wire_name("Latin-1"), Some("ISO-8859-1"));
        assert_eq!(charset_wire_name("iso-8859-1"), Some("ISO-8859-1"));
        assert_eq!(charset_wire_name("ebcdic"), None);
    }
}
