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

use crate::escape::escape_outbound;
use bytes::BytesMut;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::trace;

type Transport = Box<dyn Fn(&[u8]) + Send + Sync>;

/// Cloneable handle to the outbound side of a connection.
///
/// Every layer receives a clone at registration time. All clones share one pending buffer and one
/// transport, and the transport is only ever invoked while the shared lock is held, so writes
/// issued from worker threads are serialized with writes issued from the decode path.
#[derive(Clone)]
pub struct Writer {
    outbound: Arc<Outbound>,
}

struct Outbound {
    transport: Transport,
    state: Mutex<OutboundState>,
}

#[derive(Default)]
struct OutboundState {
    ready: bool,
    pending: BytesMut,
}

impl Writer {
    /// Create a new writer around a transport callable. The writer starts out buffering.
    pub fn new<F>(transport: F) -> Self
    where
        F: Fn(&[u8]) + Send + Sync + 'static,
    {
        Writer {
            outbound: Arc::new(Outbound {
                transport: Box::new(transport),
                state: Mutex::new(OutboundState::default()),
            }),
        }
    }

    /// Send bytes to the remote end, buffering them until the connection is ready.
    ///
    /// With `escape` set the bytes get `IAC` doubling and NVT newline canonicalization first.
    pub fn write(&self, data: &[u8], escape: bool) {
        let escaped;
        let data = if escape {
            escaped = escape_outbound(data);
            &escaped[..]
        } else {
            data
        };
        let mut state = self.lock();
        if !state.ready {
            trace!("Buffering {} outbound bytes", data.len());
            state.pending.extend_from_slice(data);
            return;
        }
        if state.pending.is_empty() {
            if !data.is_empty() {
                (self.outbound.transport)(data);
            }
        } else {
            let mut combined = state.pending.split();
            combined.extend_from_slice(data);
            (self.outbound.transport)(&combined);
        }
    }

    /// Whether writes currently reach the transport.
    pub fn is_ready(&self) -> bool {
        self.lock().ready
    }

    /// Number of bytes held back until the connection is ready.
    pub fn pending_len(&self) -> usize {
        self.lock().pending.len()
    }

    /// Toggle between buffering and pass-through. Becoming ready flushes the pending buffer.
    pub(crate) fn set_ready(&self, ready: bool) {
        let mut state = self.lock();
        if state.ready == ready {
            return;
        }
        state.ready = ready;
        if ready && !state.pending.is_empty() {
            let pending = state.pending.split();
            trace!("Flushing {} buffered outbound bytes", pending.len());
            (self.outbound.transport)(&pending);
        }
    }

    fn lock(&self) -> MutexGuard<'_, OutboundState> {
        self.outbound
            .state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl fmt::Debug for Writer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.lock();
        f.debug_struct("Writer")
            .field("ready", &state.ready)
            .field("pending", &state.pending.len())
            .finish()
    }
}
