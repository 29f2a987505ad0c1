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

//! # Mudlink Telnet Layer
//!
//! This crate provides the wire-closest layer of the MUD protocol chain: a [`TelnetHandler`]
//! that decodes the RFC854 command stream and negotiates options with the RFC1143 Q method.
//!
//! ## Overview
//!
//! The handler consumes raw transport bytes and forwards only application bytes:
//!
//! - **Escaping**: `IAC IAC` becomes a single literal `0xFF` byte
//! - **Prompts**: `IAC GA` is replaced by a configurable prompt terminator
//! - **Negotiation**: `WILL`, `WONT`, `DO` and `DONT` are answered and never forwarded
//! - **Subnegotiation**: CHARSET ([RFC2066](https://tools.ietf.org/html/rfc2066)) replies are
//!   consumed, every other `IAC SB ... IAC SE` frame is forwarded verbatim
//!
//! ## Example
//!
//! ```
//! use mudlink_protocol::Manager;
//! use mudlink_telnet::{TelnetConfig, TelnetHandler, consts};
//! use std::sync::{Arc, Mutex};
//!
//! let sent = Arc::new(Mutex::new(Vec::new()));
//! let sink = Arc::clone(&sent);
//! let mut manager = Manager::new(
//!     move |data: &[u8]| sink.lock().unwrap().extend_from_slice(data),
//!     |_text: &[u8]| {},
//! );
//! manager.connect();
//! manager
//!     .register(|writer| TelnetHandler::new(writer, TelnetConfig::default()))
//!     .unwrap();
//!
//! // The server offers to echo; ECHO has no semantics here, so it is refused.
//! manager.parse(&[consts::IAC, consts::WILL, consts::option::ECHO]);
//! assert_eq!(
//!     *sent.lock().unwrap(),
//!     vec![consts::IAC, consts::DONT, consts::option::ECHO]
//! );
//! ```

#![warn(
    clippy::cargo,
    missing_docs,
    clippy::pedantic,
    future_incompatible,
    rust_2018_idioms
)]
#![allow(clippy::module_name_repetitions, clippy::missing_errors_doc)]

mod config;
mod handler;
mod options;
mod result;

pub use self::config::{
    CHARSET_ALIASES, CHARSET_SEPARATOR, DEFAULT_CHARSET, TelnetConfig, charset_wire_name,
};
pub use self::handler::TelnetHandler;
pub use self::options::{OptionState, QState, TelnetOption, TelnetSide};
pub use self::result::{TelnetError, TelnetResult};
pub use mudlink_protocol::consts;
