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

use crate::consts::option;
use std::fmt::Formatter;

///
/// [Telnet Terminal Options](https://www.iana.org/assignments/telnet-options/telnet-options.xhtml)
/// seen on MUD connections.
///
/// Only [`TelnetOption::Charset`] carries semantics in this crate; every other option is
/// negotiated generically.
///
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum TelnetOption {
    /// [`option::BINARY`] Binary Transmission [RFC856](https://tools.ietf.org/html/rfc856)
    Binary,
    /// [`option::ECHO`] Echo [RFC857](https://tools.ietf.org/html/rfc857)
    Echo,
    /// [`option::SGA`] Suppress Go Ahead [RFC858](https://tools.ietf.org/html/rfc858)
    SuppressGoAhead,
    /// [`option::STATUS`] Status [RFC859](https://tools.ietf.org/html/rfc859)
    Status,
    /// [`option::TM`] Timing Mark [RFC860](https://tools.ietf.org/html/rfc860)
    TimingMark,
    /// [`option::TTYPE`] Terminal Type [RFC1091](https://tools.ietf.org/html/rfc1091)
    TerminalType,
    /// [`option::EOR`] End of Record [RFC885](https://tools.ietf.org/html/rfc885)
    EndOfRecord,
    /// [`option::NAWS`] Negotiate About Window Size [RFC1073](https://tools.ietf.org/html/rfc1073)
    Naws,
    /// [`option::LINEMODE`] Linemode [RFC1184](https://tools.ietf.org/html/rfc1184)
    Linemode,
    /// [`option::NEW_ENVIRONMENT`] New Environment [RFC1572](https://tools.ietf.org/html/rfc1572)
    NewEnvironment,
    /// [`option::CHARSET`] Charset [RFC2066](https://tools.ietf.org/html/rfc2066)
    Charset,
    /// [`option::MSDP`] Mud Server Data Protocol
    Msdp,
    /// [`option::MSSP`] Mud Server Status Protocol
    Mssp,
    /// [`option::COMPRESS1`] Mud Client Compression Protocol v1
    Compress1,
    /// [`option::COMPRESS2`] Mud Client Compression Protocol v2
    Compress2,
    /// [`option::COMPRESS3`] Mud Client Compression Protocol v3
    Compress3,
    /// [`option::MSP`] Mud Sound Protocol
    Msp,
    /// [`option::MXP`] Mud eXtension Protocol
    Mxp,
    /// [`option::ZMP`] Zenith Mud Protocol
    Zmp,
    /// [`option::ATCP`] Achaea Telnet Client Protocol
    Atcp,
    /// [`option::GMCP`] Generic Mud Communication Protocol
    Gmcp,
    /// [`option::EXOPL`] Extended Options List [RFC861](https://tools.ietf.org/html/rfc861)
    Exopl,
    /// Any option number without a named variant
    Unknown(u8),
}

impl TelnetOption {
    /// The option number sent on the wire.
    pub fn to_u8(self) -> u8 {
        match self {
            TelnetOption::Binary => option::BINARY,
            TelnetOption::Echo => option::ECHO,
            TelnetOption::SuppressGoAhead => option::SGA,
            TelnetOption::Status => option::STATUS,
            TelnetOption::TimingMark => option::TM,
            TelnetOption::TerminalType => option::TTYPE,
            TelnetOption::EndOfRecord => option::EOR,
            TelnetOption::Naws => option::NAWS,
            TelnetOption::Linemode => option::LINEMODE,
            TelnetOption::NewEnvironment => option::NEW_ENVIRONMENT,
            TelnetOption::Charset => option::CHARSET,
            TelnetOption::Msdp => option::MSDP,
            TelnetOption::Mssp => option::MSSP,
            TelnetOption::Compress1 => option::COMPRESS1,
            TelnetOption::Compress2 => option::COMPRESS2,
            TelnetOption::Compress3 => option::COMPRESS3,
            TelnetOption::Msp => option::MSP,
            TelnetOption::Mxp => option::MXP,
            TelnetOption::Zmp => option::ZMP,
            TelnetOption::Atcp => option::ATCP,
            TelnetOption::Gmcp => option::GMCP,
            TelnetOption::Exopl => option::EXOPL,
            TelnetOption::Unknown(byte) => byte,
        }
    }

    /// Map an option number to its variant, falling back to [`TelnetOption::Unknown`].
    pub fn from_u8(byte: u8) -> Self {
        match byte {
            option::BINARY => TelnetOption::Binary,
            option::ECHO => TelnetOption::Echo,
            option::SGA => TelnetOption::SuppressGoAhead,
            option::STATUS => TelnetOption::Status,
            option::TM => TelnetOption::TimingMark,
            option::TTYPE => TelnetOption::TerminalType,
            option::EOR => TelnetOption::EndOfRecord,
            option::NAWS => TelnetOption::Naws,
            option::LINEMODE => TelnetOption::Linemode,
            option::NEW_ENVIRONMENT => TelnetOption::NewEnvironment,
            option::CHARSET => TelnetOption::Charset,
            option::MSDP => TelnetOption::Msdp,
            option::MSSP => TelnetOption::Mssp,
            option::COMPRESS1 => TelnetOption::Compress1,
            option::COMPRESS2 => TelnetOption::Compress2,
            option::COMPRESS3 => TelnetOption::Compress3,
            option::MSP => TelnetOption::Msp,
            option::MXP => TelnetOption::Mxp,
            option::ZMP => TelnetOption::Zmp,
            option::ATCP => TelnetOption::Atcp,
            option::GMCP => TelnetOption::Gmcp,
            option::EXOPL => TelnetOption::Exopl,
            byte => TelnetOption::Unknown(byte),
        }
    }
}

impl std::fmt::Display for TelnetOption {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            TelnetOption::Binary => write!(f, "BINARY"),
            TelnetOption::Echo => write!(f, "ECHO"),
            TelnetOption::SuppressGoAhead => write!(f, "SGA"),
            TelnetOption::Status => write!(f, "STATUS"),
            TelnetOption::TimingMark => write!(f, "TM"),
            TelnetOption::TerminalType => write!(f, "TTYPE"),
            TelnetOption::EndOfRecord => write!(f, "EOR"),
            TelnetOption::Naws => write!(f, "NAWS"),
            TelnetOption::Linemode => write!(f, "LINEMODE"),
            TelnetOption::NewEnvironment => write!(f, "NEW-ENVIRON"),
            TelnetOption::Charset => write!(f, "CHARSET"),
            TelnetOption::Msdp => write!(f, "MSDP"),
            TelnetOption::Mssp => write!(f, "MSSP"),
            TelnetOption::Compress1 => write!(f, "MCCP1"),
            TelnetOption::Compress2 => write!(f, "MCCP2"),
            TelnetOption::Compress3 => write!(f, "MCCP3"),
            TelnetOption::Msp => write!(f, "MSP"),
            TelnetOption::Mxp => write!(f, "MXP"),
            TelnetOption::Zmp => write!(f, "ZMP"),
            TelnetOption::Atcp => write!(f, "ATCP"),
            TelnetOption::Gmcp => write!(f, "GMCP"),
            TelnetOption::Exopl => write!(f, "EXOPL"),
            TelnetOption::Unknown(byte) => write!(f, "UNKNOWN({byte})"),
        }
    }
}

impl From<u8> for TelnetOption {
    fn from(byte: u8) -> Self {
        TelnetOption::from_u8(byte)
    }
}

impl From<TelnetOption> for u8 {
    fn from(option: TelnetOption) -> Self {
        option.to_u8()
    }
}

/// Which end of the connection performs an option.
///
/// Each option runs two independent negotiations:
///
/// - **Local**: whether *we* perform the option. We send `WILL`/`WONT`, the peer answers with
///   `DO`/`DONT`.
/// - **Remote**: whether the *peer* performs the option. We send `DO`/`DONT`, the peer answers
///   with `WILL`/`WONT`.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum TelnetSide {
    /// The local side of the connection
    Local,
    /// The remote side of the connection
    Remote,
}

impl std::fmt::Display for TelnetSide {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            TelnetSide::Local => write!(f, "Local"),
            TelnetSide::Remote => write!(f, "Remote"),
        }
    }
}

/// Negotiation state of one side of one option, per the Q method of
/// [RFC1143](https://tools.ietf.org/html/rfc1143).
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub enum QState {
    /// Disabled
    #[default]
    No,
    /// Enabled
    Yes,
    /// Disable requested, waiting for the peer
    WantNo,
    /// Enable requested, waiting for the peer
    WantYes,
    /// Disable requested, enable queued behind it
    WantNoOpposite,
    /// Enable requested, disable queued behind it
    WantYesOpposite,
}

impl std::fmt::Display for QState {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            QState::No => write!(f, "No"),
            QState::Yes => write!(f, "Yes"),
            QState::WantNo => write!(f, "WantNo"),
            QState::WantYes => write!(f, "WantYes"),
            QState::WantNoOpposite => write!(f, "WantNoOpposite"),
            QState::WantYesOpposite => write!(f, "WantYesOpposite"),
        }
    }
}

/// Independent local and remote state of a single option.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct OptionState {
    /// Whether we perform the option
    pub local: QState,
    /// Whether the peer performs the option
    pub remote: QState,
}

impl OptionState {
    /// State of one side.
    pub fn get(&self, side: TelnetSide) -> QState {
        match side {
            TelnetSide::Local => self.local,
            TelnetSide::Remote => self.remote,
        }
    }

    pub(crate) fn get_mut(&mut self, side: TelnetSide) -> &mut QState {
        match side {
            TelnetSide::Local => &mut self.local,
            TelnetSide::Remote => &mut self.remote,
        }
    }
}
