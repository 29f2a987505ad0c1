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

//! # Mudlink Protocol Chain
//!
//! This crate provides the connection-facing core of a MUD client: a [`Manager`] that owns the
//! connection state and an ordered chain of [`Protocol`] layers sitting between a raw transport
//! and the application that renders game text.
//!
//! ## Overview
//!
//! - **Inbound**: bytes read from the transport are handed to [`Manager::parse`], which feeds the
//!   wire-closest layer. Each layer forwards whatever it does not consume to the next layer, and
//!   the last layer forwards to the application receiver.
//! - **Outbound**: every layer holds a clone of the manager's [`Writer`]. Writes go straight to
//!   the transport and never re-enter the chain. With `escape` set, `IAC` bytes are doubled and
//!   newlines are canonicalized for the remote NVT.
//! - **Buffering**: until the manager is connected and holds at least one layer, both directions
//!   are buffered and later flushed exactly once, in order.
//!
//! ## Core Components
//!
//! ### [`Manager`]
//!
//! Connection lifecycle and chain composition. Layers are unique by type, registered with
//! [`Manager::register`] and removed with [`Manager::unregister`].
//!
//! ### [`Protocol`]
//!
//! The capability every chain member implements: `on_data_received`, `on_connection_made` and
//! `on_connection_lost`.
//!
//! ### [`Writer`]
//!
//! A cloneable, thread-safe handle to the transport. Worker threads may write through it
//! concurrently with the decode path.
//!
//! ### [`consts`]
//!
//! Telnet command bytes, option numbers and CHARSET subcommands shared by every layer.

#![warn(
    clippy::cargo,
    missing_docs,
    clippy::pedantic,
    future_incompatible,
    rust_2018_idioms
)]
#![allow(
    clippy::module_name_repetitions,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc
)]

pub mod consts;
pub mod escape;
mod manager;
mod protocol;
mod result;
mod writer;

pub use self::manager::Manager;
pub use self::protocol::{AsAny, Protocol};
pub use self::result::{ManagerError, ManagerResult};
pub use self::writer::Writer;
