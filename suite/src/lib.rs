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

//! # Mudlink Suite
//!
//! A complete client stack, telnet below MPI, wired to in-memory buffers so the whole chain can
//! be exercised without a network connection.

#![warn(missing_docs, rust_2018_idioms)]

use mudlink_mpi::{Launcher, MpiConfig, MpiProtocol};
use mudlink_protocol::{Manager, ManagerResult};
use mudlink_telnet::{TelnetConfig, TelnetHandler};
use std::sync::{Arc, Mutex, PoisonError};

type Buffer = Arc<Mutex<Vec<u8>>>;

/// A [`Manager`] holding a [`TelnetHandler`] and an [`MpiProtocol`], in that order.
///
/// Bytes sent to the peer and bytes delivered to the application are collected in memory.
/// The stack starts out disconnected.
#[derive(Debug)]
pub struct Stack {
    manager: Manager,
    sent: Buffer,
    received: Buffer,
}

impl Stack {
    /// Build the stack with the given configurations and editor/pager launcher.
    pub fn new(
        telnet: TelnetConfig,
        mpi: MpiConfig,
        launcher: impl Launcher + 'static,
    ) -> ManagerResult<Self> {
        let sent: Buffer = Arc::default();
        let received: Buffer = Arc::default();
        let sent_sink = Arc::clone(&sent);
        let received_sink = Arc::clone(&received);
        let mut manager = Manager::new(
            move |data: &[u8]| append(&sent_sink, data),
            move |data: &[u8]| append(&received_sink, data),
        );
        manager.register(|writer| TelnetHandler::new(writer, telnet))?;
        manager.register(|writer| MpiProtocol::new(writer, mpi).with_launcher(launcher))?;
        Ok(Stack {
            manager,
            sent,
            received,
        })
    }

    /// The underlying manager.
    pub fn manager(&mut self) -> &mut Manager {
        &mut self.manager
    }

    /// The telnet layer, while it is registered.
    pub fn telnet(&mut self) -> Option<&mut TelnetHandler> {
        self.manager.handler_mut::<TelnetHandler>()
    }

    /// Drain the bytes sent to the peer so far.
    pub fn take_sent(&self) -> Vec<u8> {
        take(&self.sent)
    }

    /// Drain the bytes delivered to the application so far.
    pub fn take_received(&self) -> Vec<u8> {
        take(&self.received)
    }
}

fn append(buffer: &Buffer, data: &[u8]) {
    buffer
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .extend_from_slice(data);
}

fn take(buffer: &Buffer) -> Vec<u8> {
    std::mem::take(&mut *buffer.lock().unwrap_or_else(PoisonError::into_inner))
}
