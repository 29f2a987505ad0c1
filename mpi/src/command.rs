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

//! The `E` (edit) and `V` (view) commands.

use crate::{Launcher, MPI_INIT, MpiConfig, MpiError, MpiResult};
use bytes::{BufMut, Bytes, BytesMut};
use mudlink_protocol::Writer;
use mudlink_protocol::consts::{CR, CR_LF, LF};
use mudlink_protocol::escape::{escape_iac, replace};
use std::fs;
use std::io::Write;
use std::sync::Arc;
use tempfile::{Builder, NamedTempFile};
use tracing::{debug, warn};

/// A command implementation, run on its own worker thread with the frame body.
pub type CommandHandler = Arc<dyn Fn(&MpiContext, Bytes) -> MpiResult<()> + Send + Sync>;

/// Everything a command needs once it has left the decode path.
#[derive(Clone)]
pub struct MpiContext {
    writer: Writer,
    config: Arc<MpiConfig>,
    launcher: Arc<dyn Launcher>,
}

impl MpiContext {
    pub(crate) fn new(writer: Writer, config: MpiConfig, launcher: Arc<dyn Launcher>) -> Self {
        MpiContext {
            writer,
            config: Arc::new(config),
            launcher,
        }
    }

    pub(crate) fn set_launcher(&mut self, launcher: Arc<dyn Launcher>) {
        self.launcher = launcher;
    }

    /// The connection writer.
    pub fn writer(&self) -> &Writer {
        &self.writer
    }

    /// The layer configuration.
    pub fn config(&self) -> &MpiConfig {
        &self.config
    }

    /// The launcher used to open files for the user.
    pub fn launcher(&self) -> &dyn Launcher {
        &*self.launcher
    }

    /// Send `init + command + length + LF + payload` to the peer.
    ///
    /// `IAC` bytes are doubled for the telnet layer; the length counts the payload before that.
    /// Line endings are left alone so the length stays exact.
    pub fn send_frame(&self, command: u8, payload: &[u8]) {
        self.writer.write(&escape_iac(&frame(command, payload)), false);
    }
}

impl std::fmt::Debug for MpiContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MpiContext")
            .field("writer", &self.writer)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// Build an MPI frame around `payload`.
pub fn frame(command: u8, payload: &[u8]) -> BytesMut {
    let length = payload.len().to_string();
    let mut frame = BytesMut::with_capacity(MPI_INIT.len() + length.len() + payload.len() + 2);
    frame.put_slice(MPI_INIT);
    frame.put_u8(command);
    frame.put_slice(length.as_bytes());
    frame.put_u8(LF);
    frame.put_slice(payload);
    frame
}

/// Strip carriage returns and use the platform line ending.
fn to_native_text(data: &[u8]) -> BytesMut {
    let stripped = replace(data, &[CR], &[]);
    if cfg!(windows) {
        replace(&stripped, &[LF], CR_LF)
    } else {
        stripped
    }
}

fn scratch_file(prefix: &str, contents: &[u8]) -> MpiResult<NamedTempFile> {
    let mut file = Builder::new().prefix(prefix).suffix(".txt").tempfile()?;
    file.write_all(&to_native_text(contents))?;
    file.flush()?;
    Ok(file)
}

/// Let the user edit a text and send the result back.
///
/// The payload is `<marker><session> LF <description> LF <body>`. The reply is an `E` frame
/// carrying `E<session> LF <text>`, or `C<session>` when the file was left unmodified.
pub fn edit(context: &MpiContext, data: Bytes) -> MpiResult<()> {
    let malformed = |reason| MpiError::MalformedPayload {
        command: 'E',
        reason,
    };
    let payload = data.get(1..).ok_or(malformed("empty payload"))?;
    let mut parts = payload.splitn(3, |&byte| byte == LF);
    let session = parts.next().ok_or(malformed("missing session"))?;
    let _description = parts.next().ok_or(malformed("missing description"))?;
    let body = parts.next().ok_or(malformed("missing body"))?;

    let file = scratch_file("mume_editing_", body)?;
    let path = file.path();
    let before = fs::metadata(path)?.modified()?;
    let editor = &context.config().editor;
    if let Err(err) = context.launcher().launch(editor, path) {
        warn!("Editor session ended abnormally: {}", err);
    }
    let after = fs::metadata(path)?.modified()?;

    let mut response = BytesMut::new();
    if after == before {
        debug!("Edit session cancelled");
        response.put_u8(b'C');
        response.put_slice(session);
    } else {
        debug!("Edit session saved");
        response.put_u8(b'E');
        response.put_slice(session);
        response.put_u8(LF);
        response.put_slice(&fs::read(path)?);
    }
    let response = replace(&response, &[CR], &[]);
    let mut reply = BytesMut::from(response.trim_ascii());
    reply.put_u8(LF);
    context.send_frame(b'E', &reply);
    Ok(())
}

/// Show a read-only text to the user. Nothing is sent back.
pub fn view(context: &MpiContext, data: Bytes) -> MpiResult<()> {
    let file = scratch_file("mume_viewing_", &data)?;
    context.launcher().launch(&context.config().pager, file.path())
}
