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

//! Ways of handing a temporary file to the user.

use crate::{MpiError, MpiResult};
use std::io::{BufRead, Write};
use std::path::Path;
use std::process::Command;
use tracing::debug;

/// Opens a file for the user and blocks until they are done with it.
///
/// Launchers run on MPI worker threads, never on the decode path.
pub trait Launcher: Send + Sync {
    /// Open `path` with `program` and return once the user has finished.
    fn launch(&self, program: &str, path: &Path) -> MpiResult<()>;
}

impl<F> Launcher for F
where
    F: Fn(&str, &Path) -> MpiResult<()> + Send + Sync,
{
    fn launch(&self, program: &str, path: &Path) -> MpiResult<()> {
        self(program, path)
    }
}

/// Runs the program as a child process and waits for it to exit.
///
/// The program string is split on whitespace; the first word is the executable and the rest are
/// arguments placed before the file path.
#[derive(Clone, Copy, Debug, Default)]
pub struct ProcessLauncher;

impl Launcher for ProcessLauncher {
    fn launch(&self, program: &str, path: &Path) -> MpiResult<()> {
        let mut words = program.split_whitespace();
        let executable = words.next().unwrap_or_default();
        debug!("Launching '{}' on {}", program, path.display());
        let status = Command::new(executable).args(words).arg(path).status()?;
        if status.success() {
            Ok(())
        } else {
            Err(MpiError::Launch {
                program: program.to_string(),
                status: status.to_string(),
            })
        }
    }
}

/// Hands the session to a TinTin++ front end.
///
/// Prints `MPICOMMAND:<program> <path>:MPICOMMAND` on stdout and waits for a line on stdin.
#[derive(Clone, Copy, Debug, Default)]
pub struct TintinLauncher;

impl TintinLauncher {
    /// The line announcing a session to the front end.
    pub fn command_line(program: &str, path: &Path) -> String {
        format!("MPICOMMAND:{} {}:MPICOMMAND", program, path.display())
    }
}

impl Launcher for TintinLauncher {
    fn launch(&self, program: &str, path: &Path) -> MpiResult<()> {
        {
            let mut stdout = std::io::stdout().lock();
            writeln!(stdout, "{}", Self::command_line(program, path))?;
            write!(stdout, "Continue:")?;
            stdout.flush()?;
        }
        let mut line = String::new();
        std::io::stdin().lock().read_line(&mut line)?;
        Ok(())
    }
}
