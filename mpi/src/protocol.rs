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

use crate::command::{self, CommandHandler, MpiContext};
use crate::{Launcher, MPI_INIT, MpiConfig, MpiState, OutputFormat, ProcessLauncher, TintinLauncher};
use bytes::{Buf, BufMut, Bytes, BytesMut};
use mudlink_protocol::consts::LF;
use mudlink_protocol::{Protocol, Writer};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use tracing::{debug, error, warn};

/// MUME remote editing layer of the protocol chain.
///
/// Scans the decoded application stream for frames of the form
/// `~$#E <command> <length> LF <body>` that start at the beginning of a line. Frames with a
/// registered command are removed from the stream and handed to a worker thread; everything
/// else, including frames for unknown commands, is forwarded unchanged.
///
/// The scanner tolerates arbitrary fragmentation: a frame may arrive one byte at a time.
/// Text that only resembles a frame is put back into the stream as plain text, and so is a frame
/// announcing more than [`MpiConfig::max_body_size`] bytes.
pub struct MpiProtocol {
    context: MpiContext,
    commands: HashMap<u8, CommandHandler>,
    state: MpiState,
    buffer: BytesMut,
    command: u8,
    length: usize,
    workers: Vec<JoinHandle<()>>,
}

impl MpiProtocol {
    /// Create the layer with the default `E` and `V` commands.
    ///
    /// The launcher follows `config.output_format`.
    pub fn new(writer: Writer, config: MpiConfig) -> Self {
        let launcher: Arc<dyn Launcher> = match config.output_format {
            OutputFormat::Normal => Arc::new(ProcessLauncher),
            OutputFormat::Tintin => Arc::new(TintinLauncher),
        };
        let mut commands: HashMap<u8, CommandHandler> = HashMap::new();
        commands.insert(b'E', Arc::new(command::edit));
        commands.insert(b'V', Arc::new(command::view));
        MpiProtocol {
            context: MpiContext::new(writer, config, launcher),
            commands,
            state: MpiState::default(),
            buffer: BytesMut::new(),
            command: 0,
            length: 0,
            workers: Vec::new(),
        }
    }

    /// Replace the launcher used by editing and viewing sessions.
    #[must_use]
    pub fn with_launcher(mut self, launcher: impl Launcher + 'static) -> Self {
        self.context.set_launcher(Arc::new(launcher));
        self
    }

    /// Install or replace the handler for a command byte.
    pub fn set_command<F>(&mut self, command: u8, handler: F)
    where
        F: Fn(&MpiContext, Bytes) -> crate::MpiResult<()> + Send + Sync + 'static,
    {
        self.commands.insert(command, Arc::new(handler));
    }

    /// Remove the handler for a command byte. Its frames are then forwarded like unknown ones.
    pub fn remove_command(&mut self, command: u8) -> bool {
        self.commands.remove(&command).is_some()
    }

    /// Current scanner state.
    pub fn state(&self) -> MpiState {
        self.state
    }

    /// The context shared with command workers.
    pub fn context(&self) -> &MpiContext {
        &self.context
    }

    /// Number of worker threads that may still be running.
    pub fn active_workers(&self) -> usize {
        self.workers
            .iter()
            .filter(|worker| !worker.is_finished())
            .count()
    }

    /// Dispatch a complete frame.
    ///
    /// Known commands run on a new worker thread. Unknown commands are rebuilt into their
    /// original frame and passed to `forward`.
    pub fn on_command(&mut self, command: u8, data: Bytes, forward: &mut dyn FnMut(&[u8])) {
        let Some(handler) = self.commands.get(&command).map(Arc::clone) else {
            warn!("Invalid MPI command {:?}", char::from(command));
            forward(&command::frame(command, &data));
            return;
        };
        debug!(
            "Dispatching MPI command {:?} with {} bytes",
            char::from(command),
            data.len()
        );
        self.workers.retain(|worker| !worker.is_finished());
        let context = self.context.clone();
        let spawned = thread::Builder::new()
            .name(format!("mpi-{}", char::from(command)))
            .spawn(move || {
                if let Err(err) = handler(&context, data) {
                    error!("MPI command {:?} failed: {}", char::from(command), err);
                }
            });
        match spawned {
            Ok(worker) => self.workers.push(worker),
            Err(err) => error!("Unable to start MPI worker: {}", err),
        }
    }

    /// Join every worker that is still running.
    pub fn join_workers(&mut self) {
        for worker in self.workers.drain(..) {
            if worker.join().is_err() {
                error!("MPI worker panicked");
            }
        }
    }

    /// Put a misdetected frame prefix back in front of the unread input.
    fn reinject(&mut self, prefix: &[u8], rest: &Bytes) -> Bytes {
        let mut data = BytesMut::with_capacity(prefix.len() + self.buffer.len() + rest.len());
        data.put_slice(prefix);
        data.put_slice(&self.buffer);
        data.put_slice(rest);
        self.buffer.clear();
        self.state = MpiState::Data;
        data.freeze()
    }

    fn complete_body(&mut self, forward: &mut dyn FnMut(&[u8])) {
        let body = self.buffer.split().freeze();
        self.state = MpiState::Data;
        self.on_command(self.command, body, forward);
    }
}

fn parse_length(digits: &[u8]) -> Option<usize> {
    if digits.is_empty() || !digits.iter().all(u8::is_ascii_digit) {
        return None;
    }
    std::str::from_utf8(digits).ok()?.parse().ok()
}

impl Protocol for MpiProtocol {
    fn on_data_received(&mut self, data: &[u8], forward: &mut dyn FnMut(&[u8])) {
        let mut data = Bytes::copy_from_slice(data);
        let mut app = BytesMut::new();
        while !data.is_empty() {
            match self.state {
                MpiState::Data => match data.iter().position(|&byte| byte == LF) {
                    Some(index) => {
                        app.put_slice(&data.split_to(index + 1));
                        self.state = MpiState::Newline;
                    }
                    None => {
                        app.put_slice(&data);
                        data.clear();
                    }
                },
                MpiState::Newline => {
                    let probe = &data[..data.len().min(MPI_INIT.len())];
                    self.state = if MPI_INIT.starts_with(probe) {
                        MpiState::Init
                    } else {
                        MpiState::Data
                    };
                }
                MpiState::Init => {
                    let wanted = (MPI_INIT.len() - self.buffer.len()).min(data.len());
                    self.buffer.put_slice(&data.split_to(wanted));
                    if self.buffer[..] == *MPI_INIT {
                        if !app.is_empty() {
                            forward(&app.split());
                        }
                        self.buffer.clear();
                        self.state = MpiState::Command;
                    } else if !MPI_INIT.starts_with(&self.buffer) {
                        data = self.reinject(&[], &data);
                    }
                }
                MpiState::Command => {
                    self.command = data[0];
                    data.advance(1);
                    self.state = MpiState::Length;
                }
                MpiState::Length => {
                    let separator = data.iter().position(|&byte| byte == LF);
                    let field = data.split_to(separator.unwrap_or(data.len()));
                    self.buffer.put_slice(&field);
                    let limit = self.context.config().max_body_size;
                    let length = parse_length(&self.buffer).filter(|&length| length <= limit);
                    if length.is_some() && separator.is_none() {
                        continue;
                    }
                    match length.filter(|_| separator.is_some()) {
                        Some(length) => {
                            data.advance(1);
                            self.buffer.clear();
                            self.length = length;
                            self.state = MpiState::Body;
                            if length == 0 {
                                self.complete_body(&mut *forward);
                            }
                        }
                        None => {
                            if !self.buffer.is_empty() && self.buffer.iter().all(u8::is_ascii_digit) {
                                warn!(
                                    "MPI length {} exceeds the limit of {} bytes",
                                    String::from_utf8_lossy(&self.buffer),
                                    limit
                                );
                            } else {
                                warn!(
                                    "Invalid data {:?} in MPI length. Digit expected.",
                                    String::from_utf8_lossy(&self.buffer)
                                );
                            }
                            let mut prefix = MPI_INIT.to_vec();
                            prefix.push(self.command);
                            let prefix_len = prefix.len();
                            data = self.reinject(&prefix, &data);
                            debug!("Reinjected {} bytes as text", prefix_len);
                        }
                    }
                }
                MpiState::Body => {
                    let wanted = (self.length - self.buffer.len()).min(data.len());
                    self.buffer.put_slice(&data.split_to(wanted));
                    if self.buffer.len() == self.length {
                        self.complete_body(&mut *forward);
                    }
                }
            }
        }
        if !app.is_empty() {
            forward(&app);
        }
    }

    fn on_connection_made(&mut self) {
        let mut handshake = MPI_INIT.to_vec();
        handshake.extend_from_slice(&[b'I', LF]);
        self.context.writer().write(&handshake, false);
    }

    fn on_connection_lost(&mut self) {
        self.join_workers();
    }
}

impl fmt::Debug for MpiProtocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut commands: Vec<char> = self.commands.keys().copied().map(char::from).collect();
        commands.sort_unstable();
        f.debug_struct("MpiProtocol")
            .field("state", &self.state)
            .field("commands", &commands)
            .field("buffer", &self.buffer.len())
            .field("workers", &self.workers.len())
            .field("context", &self.context)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use tracing_test::traced_test;

    type Calls = Arc<Mutex<Vec<(u8, Vec<u8>)>>>;

    fn recording() -> (MpiProtocol, Calls) {
        recording_with(MpiConfig::default())
    }

    fn recording_with(config: MpiConfig) -> (MpiProtocol, Calls) {
        let calls: Calls = Arc::default();
        let mut mpi = MpiProtocol::new(Writer::new(|_: &[u8]| {}), config);
        for command in [b'E', b'V'] {
            let sink = Arc::clone(&calls);
            mpi.set_command(command, move |_context: &MpiContext, body: Bytes| {
                sink.lock().unwrap().push((command, body.to_vec()));
                Ok(())
            });
        }
        (mpi, calls)
    }

    fn feed(mpi: &mut MpiProtocol, data: &[u8]) -> Vec<u8> {
        let mut out = Vec::new();
        mpi.on_data_received(data, &mut |chunk: &[u8]| out.extend_from_slice(chunk));
        out
    }

    fn finish(mpi: &mut MpiProtocol, calls: &Calls) -> Vec<(u8, Vec<u8>)> {
        mpi.join_workers();
        calls.lock().unwrap().clone()
    }

    // ============================================================================
    // Frame Detection Tests
    // ============================================================================

    #[test]
    fn test_frame_split_across_calls() {
        let (mut mpi, calls) = recording();
        assert!(feed(&mut mpi, b"~").is_empty());
        assert_eq!(mpi.state(), MpiState::Init);
        assert!(feed(&mut mpi, b"$#").is_empty());
        assert!(feed(&mut mpi, b"EE3\nabc").is_empty());
        assert_eq!(mpi.state(), MpiState::Data);
        assert_eq!(finish(&mut mpi, &calls), vec![(b'E', b"abc".to_vec())]);
    }

    #[test]
    fn test_state_progression() {
        let (mut mpi, _calls) = recording();
        assert_eq!(mpi.state(), MpiState::Newline);
        feed(&mut mpi, b"~$#E");
        assert_eq!(mpi.state(), MpiState::Command);
        feed(&mut mpi, b"V");
        assert_eq!(mpi.state(), MpiState::Length);
        feed(&mut mpi, b"12");
        assert_eq!(mpi.state(), MpiState::Length);
        feed(&mut mpi, b"\n");
        assert_eq!(mpi.state(), MpiState::Body);
    }

    #[test]
    fn test_frame_after_text_line() {
        let (mut mpi, calls) = recording();
        let out = feed(&mut mpi, b"You see a scroll.\n~$#EV5\nhello> ");
        assert_eq!(out, b"You see a scroll.\n> ");
        assert_eq!(finish(&mut mpi, &calls), vec![(b'V', b"hello".to_vec())]);
    }

    #[test]
    fn test_frame_mid_line_is_text() {
        let (mut mpi, calls) = recording();
        let out = feed(&mut mpi, b"say ~$#EV1\nx");
        assert_eq!(out, b"say ~$#EV1\nx");
        assert!(finish(&mut mpi, &calls).is_empty());
    }

    #[test]
    fn test_init_misdetection_is_text() {
        let (mut mpi, calls) = recording();
        assert!(feed(&mut mpi, b"~$").is_empty());
        assert_eq!(feed(&mut mpi, b"x marks the spot\n"), b"~$x marks the spot\n");
        assert_eq!(mpi.state(), MpiState::Newline);
        assert!(finish(&mut mpi, &calls).is_empty());
    }

    #[test]
    fn test_zero_length_body() {
        let (mut mpi, calls) = recording();
        assert!(feed(&mut mpi, b"~$#EV0\n").is_empty());
        assert_eq!(mpi.state(), MpiState::Data);
        assert_eq!(finish(&mut mpi, &calls), vec![(b'V', Vec::new())]);
    }

    #[test]
    fn test_body_may_contain_line_breaks() {
        let (mut mpi, calls) = recording();
        let out = feed(&mut mpi, b"~$#EE6\na\nb\nc\nrest");
        assert_eq!(out, b"rest");
        assert_eq!(finish(&mut mpi, &calls), vec![(b'E', b"a\nb\nc\n".to_vec())]);
    }

    // ============================================================================
    // Recovery Tests
    // ============================================================================

    #[test]
    #[traced_test]
    fn test_non_digit_length_is_reinjected() {
        let (mut mpi, calls) = recording();
        assert_eq!(feed(&mut mpi, b"~$#EX\n"), b"~$#EX\n");
        assert_eq!(mpi.state(), MpiState::Newline);
        assert!(finish(&mut mpi, &calls).is_empty());
        assert!(logs_contain("Digit expected"));
    }

    #[test]
    fn test_letters_in_length_are_reinjected() {
        let (mut mpi, calls) = recording();
        assert_eq!(feed(&mut mpi, b"~$#EE1a"), b"~$#EE1a");
        assert_eq!(mpi.state(), MpiState::Data);
        assert_eq!(feed(&mut mpi, b"\n~$#EV1\nz"), b"\n");
        assert_eq!(finish(&mut mpi, &calls), vec![(b'V', b"z".to_vec())]);
    }

    #[test]
    fn test_overflowing_length_is_reinjected() {
        let (mut mpi, calls) = recording();
        let input = b"~$#EE99999999999999999999999999\n";
        assert_eq!(feed(&mut mpi, input), input);
        assert!(finish(&mut mpi, &calls).is_empty());
    }

    #[test]
    #[traced_test]
    fn test_huge_length_does_not_swallow_stream() {
        let (mut mpi, calls) = recording();
        let input = b"~$#EE18446744073709551615\nYou are in a room.\n> ";
        assert_eq!(feed(&mut mpi, input), input);
        assert_eq!(mpi.state(), MpiState::Data);
        assert!(finish(&mut mpi, &calls).is_empty());
        assert!(logs_contain("exceeds the limit"));
    }

    #[test]
    fn test_length_over_configured_limit_is_text() {
        let (mut mpi, calls) = recording_with(MpiConfig::default().with_max_body_size(4));
        assert_eq!(feed(&mut mpi, b"~$#EV5\nhello\n"), b"~$#EV5\nhello\n");
        assert_eq!(feed(&mut mpi, b"~$#EV4\nhell"), b"");
        assert_eq!(finish(&mut mpi, &calls), vec![(b'V', b"hell".to_vec())]);
    }

    #[test]
    fn test_oversized_length_is_rejected_before_separator() {
        let (mut mpi, calls) = recording_with(MpiConfig::default().with_max_body_size(99));
        assert!(feed(&mut mpi, b"~$#EE10").is_empty());
        assert_eq!(mpi.state(), MpiState::Length);
        assert_eq!(feed(&mut mpi, b"0"), b"~$#EE100");
        assert_eq!(mpi.state(), MpiState::Data);
        assert_eq!(feed(&mut mpi, b"\nbody"), b"\nbody");
        assert!(finish(&mut mpi, &calls).is_empty());
    }

    // ============================================================================
    // Command Table Tests
    // ============================================================================

    #[test]
    #[traced_test]
    fn test_unknown_command_is_forwarded_in_order() {
        let (mut mpi, calls) = recording();
        let input = b"a\n~$#EZ1\nxb";
        assert_eq!(feed(&mut mpi, input), input);
        assert!(finish(&mut mpi, &calls).is_empty());
        assert!(logs_contain("Invalid MPI command"));
    }

    #[test]
    fn test_removed_command_is_forwarded() {
        let (mut mpi, calls) = recording();
        assert!(mpi.remove_command(b'V'));
        assert!(!mpi.remove_command(b'V'));
        assert_eq!(feed(&mut mpi, b"~$#EV2\nhi"), b"~$#EV2\nhi");
        assert!(finish(&mut mpi, &calls).is_empty());
    }

    #[test]
    fn test_failing_command_does_not_stall_scanner() {
        let (mut mpi, calls) = recording();
        mpi.set_command(b'E', |_context: &MpiContext, _body: Bytes| {
            Err(crate::MpiError::MalformedPayload {
                command: 'E',
                reason: "missing body",
            })
        });
        assert_eq!(feed(&mut mpi, b"~$#EE1\nx\n~$#EV1\ny!"), b"\n!");
        assert_eq!(finish(&mut mpi, &calls), vec![(b'V', b"y".to_vec())]);
        assert_eq!(mpi.active_workers(), 0);
    }

    #[test]
    fn test_parse_length() {
        assert_eq!(parse_length(b"42"), Some(42));
        assert_eq!(parse_length(b"007"), Some(7));
        assert_eq!(parse_length(b""), None);
        assert_eq!(parse_length(b"4 2"), None);
        assert_eq!(parse_length(b"-1"), None);
    }
}
