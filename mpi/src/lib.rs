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

//! # Mudlink MPI Layer
//!
//! This crate implements the MUME remote editing protocol (MPI) as a layer of the mudlink
//! protocol chain. It sits above the telnet layer and watches the decoded text for out-of-band
//! frames:
//!
//! ```text
//! ~$#E <command> <decimal length> LF <body>
//! ```
//!
//! A frame is only recognised at the start of a line. Two commands are handled out of the box:
//!
//! - **`E`** (edit): the body is `<marker><session> LF <description> LF <text>`. The text is
//!   opened in the configured editor; the reply is `E<session> LF <text>` when the file was
//!   saved and `C<session>` when it was not.
//! - **`V`** (view): the body is opened in the configured pager. There is no reply.
//!
//! Commands run on worker threads so the decode path never waits for the user. Frames for any
//! other command are forwarded unchanged.
//!
//! ## Example
//!
//! ```
//! use mudlink_mpi::{MpiConfig, MpiProtocol};
//! use mudlink_protocol::Manager;
//! use std::sync::{Arc, Mutex};
//!
//! let text = Arc::new(Mutex::new(Vec::new()));
//! let sink = Arc::clone(&text);
//! let mut manager = Manager::new(
//!     |_data: &[u8]| {},
//!     move |data: &[u8]| sink.lock().unwrap().extend_from_slice(data),
//! );
//! manager.connect();
//! manager
//!     .register(|writer| MpiProtocol::new(writer, MpiConfig::default()))
//!     .unwrap();
//!
//! // Frames for commands without a handler are passed through untouched.
//! manager.parse(b"Hello\n~$#EZ2\nhi");
//! assert_eq!(&text.lock().unwrap()[..], b"Hello\n~$#EZ2\nhi");
//! ```

#![warn(
    clippy::cargo,
    missing_docs,
    clippy::pedantic,
    future_incompatible,
    rust_2018_idioms
)]
#![allow(clippy::module_name_repetitions, clippy::missing_errors_doc)]

pub mod command;
mod config;
mod launcher;
mod protocol;
mod result;
mod state;

pub use self::command::{CommandHandler, MpiContext};
pub use self::config::{DEFAULT_MAX_BODY_SIZE, EDITOR_VAR, MpiConfig, OutputFormat, PAGER_VAR};
pub use self::launcher::{Launcher, ProcessLauncher, TintinLauncher};
pub use self::protocol::MpiProtocol;
pub use self::result::{MpiError, MpiResult};
pub use self::state::MpiState;

/// The sequence that opens every MPI frame.
pub const MPI_INIT: &[u8] = b"~$#E";
