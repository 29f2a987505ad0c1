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

//! Wire constants shared by every layer of the stack.
//!
//! Command bytes follow [RFC854](https://tools.ietf.org/html/rfc854); option numbers follow the
//! [IANA registry](https://www.iana.org/assignments/telnet-options/telnet-options.xhtml) plus the
//! common MUD extensions.

/// Null, also the filler after a bare carriage return.
pub const NUL: u8 = 0x00;
/// Line Feed
pub const LF: u8 = 0x0A;
/// Carriage Return
pub const CR: u8 = 0x0D;
/// Carriage Return followed by Line Feed
pub const CR_LF: &[u8] = &[CR, LF];
/// Carriage Return followed by Null
pub const CR_NUL: &[u8] = &[CR, NUL];

/// End of File
pub const XEOF: u8 = 0xEC;
/// Suspend Process
pub const SUSP: u8 = 0xED;
/// Abort Process
pub const ABORT: u8 = 0xEE;
/// End of Record [RFC885](https://tools.ietf.org/html/rfc885)
pub const EOR: u8 = 0xEF;
/// End of Subnegotiation
pub const SE: u8 = 0xF0;
/// No Operation
pub const NOP: u8 = 0xF1;
/// Data Mark
pub const DM: u8 = 0xF2;
/// Break
pub const BRK: u8 = 0xF3;
/// Interrupt Process
pub const IP: u8 = 0xF4;
/// Abort Output
pub const AO: u8 = 0xF5;
/// Are You There
pub const AYT: u8 = 0xF6;
/// Erase Character
pub const EC: u8 = 0xF7;
/// Erase Line
pub const EL: u8 = 0xF8;
/// Go Ahead, sent by MUME after every prompt
pub const GA: u8 = 0xF9;
/// Begin Subnegotiation
pub const SB: u8 = 0xFA;
/// Sender wants to begin, or confirms it is performing, an option
pub const WILL: u8 = 0xFB;
/// Sender refuses to perform an option
pub const WONT: u8 = 0xFC;
/// Sender asks the receiver to perform an option
pub const DO: u8 = 0xFD;
/// Sender demands the receiver stop performing an option
pub const DONT: u8 = 0xFE;
/// Interpret As Command
pub const IAC: u8 = 0xFF;

/// Telnet option numbers.
pub mod option {
    /// Binary Transmission [RFC856](https://tools.ietf.org/html/rfc856)
    pub const BINARY: u8 = 0;
    /// Echo [RFC857](https://tools.ietf.org/html/rfc857)
    pub const ECHO: u8 = 1;
    /// Suppress Go Ahead [RFC858](https://tools.ietf.org/html/rfc858)
    pub const SGA: u8 = 3;
    /// Status [RFC859](https://tools.ietf.org/html/rfc859)
    pub const STATUS: u8 = 5;
    /// Timing Mark [RFC860](https://tools.ietf.org/html/rfc860)
    pub const TM: u8 = 6;
    /// Terminal Type [RFC1091](https://tools.ietf.org/html/rfc1091)
    pub const TTYPE: u8 = 24;
    /// End of Record [RFC885](https://tools.ietf.org/html/rfc885)
    pub const EOR: u8 = 25;
    /// Negotiate About Window Size [RFC1073](https://tools.ietf.org/html/rfc1073)
    pub const NAWS: u8 = 31;
    /// Linemode [RFC1184](https://tools.ietf.org/html/rfc1184)
    pub const LINEMODE: u8 = 34;
    /// New Environment [RFC1572](https://tools.ietf.org/html/rfc1572)
    pub const NEW_ENVIRONMENT: u8 = 39;
    /// Charset [RFC2066](https://tools.ietf.org/html/rfc2066)
    pub const CHARSET: u8 = 42;
    /// Mud Server Data Protocol
    pub const MSDP: u8 = 69;
    /// Mud Server Status Protocol
    pub const MSSP: u8 = 70;
    /// Mud Client Compression Protocol v1
    pub const COMPRESS1: u8 = 85;
    /// Mud Client Compression Protocol v2
    pub const COMPRESS2: u8 = 86;
    /// Mud Client Compression Protocol v3
    pub const COMPRESS3: u8 = 87;
    /// Mud Sound Protocol
    pub const MSP: u8 = 90;
    /// Mud eXtension Protocol
    pub const MXP: u8 = 91;
    /// Zenith Mud Protocol
    pub const ZMP: u8 = 93;
    /// Achaea Telnet Client Protocol
    pub const ATCP: u8 = 200;
    /// Generic Mud Communication Protocol
    pub const GMCP: u8 = 201;
    /// Extended Options List [RFC861](https://tools.ietf.org/html/rfc861)
    pub const EXOPL: u8 = 255;
}

/// Charset subnegotiation commands [RFC2066](https://tools.ietf.org/html/rfc2066).
pub mod charset {
    /// Request one of the listed character sets
    pub const REQUEST: u8 = 1;
    /// The named character set was accepted
    pub const ACCEPTED: u8 = 2;
    /// None of the requested character sets were acceptable
    pub const REJECTED: u8 = 3;
    /// Translation table follows
    pub const TTABLE_IS: u8 = 4;
    /// Translation table rejected
    pub const TTABLE_REJECTED: u8 = 5;
    /// Translation table acknowledged
    pub const TTABLE_ACK: u8 = 6;
    /// Translation table not acknowledged
    pub const TTABLE_NAK: u8 = 7;
}
