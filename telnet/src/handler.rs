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

use crate::config::{CHARSET_SEPARATOR, charset_wire_name};
use crate::consts::{DO, DONT, GA, IAC, SB, SE, WILL, WONT, charset};
use crate::{OptionState, QState, TelnetConfig, TelnetError, TelnetOption, TelnetResult, TelnetSide};
use bytes::{BufMut, BytesMut};
use mudlink_protocol::escape::escape_iac;
use mudlink_protocol::{Protocol, Writer};
use std::collections::HashMap;
use tracing::{debug, warn};

/// Telnet layer of the protocol chain.
///
/// Strips RFC854 commands out of the inbound stream and answers option negotiation with the
/// RFC1143 Q method. Only decoded application bytes are forwarded to the next layer, except for
/// subnegotiations of options this layer does not understand, which are forwarded verbatim.
///
/// An option is *known* once it is in the option table. CHARSET is known from the start; any
/// option passed to [`TelnetHandler::enable_option`] or [`TelnetHandler::disable_option`] becomes
/// known. Negotiation of unknown options is refused.
#[derive(Debug)]
pub struct TelnetHandler {
    writer: Writer,
    config: TelnetConfig,
    options: HashMap<TelnetOption, OptionState>,
    in_command: bool,
    option_negotiation: Option<u8>,
    in_sub_option: bool,
    sub_option_iac: bool,
    sub_option_buffer: BytesMut,
    processed: BytesMut,
    accepted_charset: Option<String>,
}

impl TelnetHandler {
    /// Create a handler that answers the peer through `writer`.
    pub fn new(writer: Writer, config: TelnetConfig) -> Self {
        let mut options = HashMap::new();
        options.insert(TelnetOption::Charset, OptionState::default());
        TelnetHandler {
            writer,
            config,
            options,
            in_command: false,
            option_negotiation: None,
            in_sub_option: false,
            sub_option_iac: false,
            sub_option_buffer: BytesMut::new(),
            processed: BytesMut::new(),
            accepted_charset: None,
        }
    }

    /// Current configuration.
    pub fn config(&self) -> &TelnetConfig {
        &self.config
    }

    /// The character set the peer accepted, if any.
    pub fn accepted_charset(&self) -> Option<&str> {
        self.accepted_charset.as_deref()
    }

    /// Handle the byte following an unescaped `IAC`.
    pub fn handle_command(&mut self, byte: u8) {
        self.in_command = false;
        match byte {
            IAC => self.processed.put_u8(IAC),
            SB => self.in_sub_option = true,
            GA => {
                let terminator = self.config.prompt_terminator();
                self.processed.extend_from_slice(terminator);
            }
            WILL | WONT | DO | DONT if self.option_negotiation.is_none() => {
                self.option_negotiation = Some(byte);
            }
            _ => self.processed.put_slice(&[IAC, byte]),
        }
    }

    /// Handle the option byte of a `WILL`, `WONT`, `DO` or `DONT` negotiation.
    pub fn handle_option(&mut self, byte: u8) {
        let Some(command) = self.option_negotiation.take() else {
            return;
        };
        let option = TelnetOption::from_u8(byte);
        let (side, rx_accept, tx_accept, tx_deny) = match command {
            WILL | WONT => (TelnetSide::Remote, WILL, DO, DONT),
            _ => (TelnetSide::Local, DO, WILL, WONT),
        };
        let accepted = command == rx_accept;

        let Some(state) = self.options.get_mut(&option) else {
            if accepted {
                debug!("Refusing {} option {}", side, option);
                self.send_option(tx_deny, option);
            }
            return;
        };

        let qstate = state.get_mut(side);
        let previous = *qstate;
        let (next, reply) = if accepted {
            match previous {
                QState::No => (QState::Yes, Some(tx_accept)),
                QState::WantNo => (QState::No, None),
                QState::WantNoOpposite | QState::Yes | QState::WantYes => (QState::Yes, None),
                QState::WantYesOpposite => (QState::WantNo, Some(tx_deny)),
            }
        } else {
            match previous {
                QState::Yes => (QState::No, Some(tx_deny)),
                QState::WantNoOpposite => (QState::WantYes, Some(tx_accept)),
                _ => (QState::No, None),
            }
        };
        *qstate = next;
        debug!("{} option {}: {} -> {}", side, option, previous, next);

        if let Some(reply) = reply {
            self.send_option(reply, option);
        }
        if option == TelnetOption::Charset
            && side == TelnetSide::Local
            && accepted
            && matches!(previous, QState::No | QState::Yes | QState::WantYes)
        {
            self.request_charset();
        }
    }

    /// Handle one byte inside an `IAC SB ... IAC SE` subnegotiation.
    pub fn handle_sub_option(&mut self, byte: u8) {
        if self.sub_option_iac {
            self.sub_option_iac = false;
            if byte == SE {
                self.complete_sub_option();
            } else {
                self.sub_option_buffer.put_slice(&[IAC, byte]);
            }
        } else if byte == IAC {
            self.sub_option_iac = true;
        } else {
            self.sub_option_buffer.put_u8(byte);
        }
    }

    fn complete_sub_option(&mut self) {
        self.in_sub_option = false;
        let raw = self.sub_option_buffer.split();
        let Some((&option, payload)) = raw.split_first() else {
            warn!("Empty subnegotiation received");
            return;
        };
        if TelnetOption::from_u8(option) != TelnetOption::Charset {
            self.processed.put_slice(&[IAC, SB]);
            self.processed.put_slice(&raw);
            self.processed.put_slice(&[IAC, SE]);
            return;
        }

        let payload = unescape_iac(payload);
        match payload.split_first() {
            Some((&charset::ACCEPTED, name)) => {
                let name = String::from_utf8_lossy(name).into_owned();
                debug!("Charset '{}' accepted", name);
                self.accepted_charset = Some(name);
            }
            Some((&charset::REJECTED, _)) => {
                warn!("Charset '{}' rejected", self.config.charset);
            }
            _ => {
                warn!(
                    "Unknown charset negotiation response: {:?}",
                    [&[IAC, SB][..], &raw[..], &[IAC, SE][..]].concat()
                );
            }
        }
    }

    /// Send `IAC <command>` to the peer.
    pub fn send_command(&self, command: u8) {
        self.writer.write(&[IAC, command], false);
    }

    /// Send `IAC SB <option> <data> IAC SE` to the peer, doubling any `IAC` inside `data`.
    pub fn send_sub_option(&self, option: TelnetOption, data: &[u8]) {
        let escaped = escape_iac(data);
        let mut frame = BytesMut::with_capacity(escaped.len() + 5);
        frame.put_slice(&[IAC, SB, option.to_u8()]);
        frame.put_slice(&escaped);
        frame.put_slice(&[IAC, SE]);
        self.writer.write(&frame, false);
    }

    fn send_option(&self, command: u8, option: TelnetOption) {
        self.writer.write(&[IAC, command, option.to_u8()], false);
    }

    fn request_charset(&self) {
        debug!("Requesting charset '{}'", self.config.charset);
        let mut data = BytesMut::with_capacity(self.config.charset.len() + 2);
        data.put_u8(charset::REQUEST);
        data.put_u8(CHARSET_SEPARATOR);
        data.put_slice(self.config.charset.as_bytes());
        self.send_sub_option(TelnetOption::Charset, &data);
    }

    /// Whether the option has been fully agreed on for `side`.
    pub fn is_option_enabled(&self, option: TelnetOption, side: TelnetSide) -> bool {
        self.is_option_in_state(option, side, QState::Yes)
    }

    /// Whether the option is currently in `state` for `side`. Untouched options are in
    /// [`QState::No`].
    pub fn is_option_in_state(&self, option: TelnetOption, side: TelnetSide, state: QState) -> bool {
        self.option_state(option, side) == state
    }

    /// Current negotiation state of the option for `side`.
    pub fn option_state(&self, option: TelnetOption, side: TelnetSide) -> QState {
        self.options
            .get(&option)
            .map_or(QState::No, |state| state.get(side))
    }

    /// Ask for the option to be enabled on `side`.
    ///
    /// Only a `No -> WantYes` transition puts a message on the wire; calls made while a
    /// negotiation is already pending just update the queued intent.
    pub fn enable_option(&mut self, option: TelnetOption, side: TelnetSide) {
        let qstate = self.options.entry(option).or_default().get_mut(side);
        let previous = *qstate;
        let send = match previous {
            QState::No => {
                *qstate = QState::WantYes;
                true
            }
            QState::WantNo => {
                *qstate = QState::WantNoOpposite;
                false
            }
            QState::WantYesOpposite => {
                *qstate = QState::WantYes;
                false
            }
            _ => false,
        };
        debug!("Enable {} option {} from {}", side, option, previous);
        if send {
            let accept = match side {
                TelnetSide::Local => WILL,
                TelnetSide::Remote => DO,
            };
            self.send_option(accept, option);
        }
    }

    /// Ask for the option to be disabled on `side`.
    ///
    /// Only a `Yes -> WantNo` transition puts a message on the wire.
    pub fn disable_option(&mut self, option: TelnetOption, side: TelnetSide) {
        let qstate = self.options.entry(option).or_default().get_mut(side);
        let previous = *qstate;
        let send = match previous {
            QState::Yes => {
                *qstate = QState::WantNo;
                true
            }
            QState::WantYes => {
                *qstate = QState::WantYesOpposite;
                false
            }
            QState::WantNoOpposite => {
                *qstate = QState::WantNo;
                false
            }
            _ => false,
        };
        debug!("Disable {} option {} from {}", side, option, previous);
        if send {
            let deny = match side {
                TelnetSide::Local => WONT,
                TelnetSide::Remote => DONT,
            };
            self.send_option(deny, option);
        }
    }

    /// Offer to negotiate the named character set.
    ///
    /// `name` is one of `us-ascii`, `latin-1` or `utf-8` (case-insensitive), or their wire names.
    pub fn charset(&mut self, name: &str) -> TelnetResult<()> {
        let wire_name =
            charset_wire_name(name).ok_or_else(|| TelnetError::UnknownCharset(name.to_string()))?;
        debug!("Offering charset negotiation for '{}'", wire_name);
        self.config.charset = wire_name.to_string();
        self.enable_option(TelnetOption::Charset, TelnetSide::Local);
        Ok(())
    }
}

impl Protocol for TelnetHandler {
    fn on_data_received(&mut self, data: &[u8], forward: &mut dyn FnMut(&[u8])) {
        for &byte in data {
            if self.in_sub_option {
                self.handle_sub_option(byte);
            } else if self.option_negotiation.is_some() {
                self.handle_option(byte);
            } else if self.in_command {
                self.handle_command(byte);
            } else if byte == IAC {
                self.in_command = true;
            } else {
                self.processed.put_u8(byte);
            }
        }
        if !self.processed.is_empty() {
            let processed = self.processed.split();
            forward(&processed);
        }
    }
}

fn unescape_iac(data: &[u8]) -> BytesMut {
    let mut output = BytesMut::with_capacity(data.len());
    let mut bytes = data.iter().copied().peekable();
    while let Some(byte) = bytes.next() {
        output.put_u8(byte);
        if byte == IAC {
            // Skip the second half of an escaped IAC.
            let _ = bytes.next_if_eq(&IAC);
        }
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{CR, LF, NOP, option};
    use mudlink_protocol::Manager;
    use std::sync::{Arc, Mutex};
    use tracing_test::traced_test;

    const CHARSET: u8 = option::CHARSET;

    struct Harness {
        manager: Manager,
        sent: Arc<Mutex<Vec<u8>>>,
        received: Arc<Mutex<Vec<u8>>>,
    }

    fn harness_with(config: TelnetConfig) -> Harness {
        let sent = Arc::new(Mutex::new(Vec::new()));
        let received = Arc::new(Mutex::new(Vec::new()));
        let sent_sink = Arc::clone(&sent);
        let received_sink = Arc::clone(&received);
        let mut manager = Manager::new(
            move |data: &[u8]| sent_sink.lock().unwrap().extend_from_slice(data),
            move |data: &[u8]| received_sink.lock().unwrap().extend_from_slice(data),
        );
        manager.connect();
        manager
            .register(|writer| TelnetHandler::new(writer, config))
            .unwrap();
        Harness {
            manager,
            sent,
            received,
        }
    }

    fn harness() -> Harness {
        harness_with(TelnetConfig::default())
    }

    impl Harness {
        fn feed(&mut self, data: &[u8]) -> Vec<u8> {
            self.manager.parse(data);
            std::mem::take(&mut *self.received.lock().unwrap())
        }

        fn take_sent(&self) -> Vec<u8> {
            std::mem::take(&mut *self.sent.lock().unwrap())
        }

        fn telnet(&mut self) -> &mut TelnetHandler {
            self.manager.handler_mut::<TelnetHandler>().unwrap()
        }

        fn local(&mut self, option: TelnetOption) -> QState {
            self.telnet().option_state(option, TelnetSide::Local)
        }

        fn remote(&mut self, option: TelnetOption) -> QState {
            self.telnet().option_state(option, TelnetSide::Remote)
        }
    }

    fn charset_request(name: &str) -> Vec<u8> {
        let mut frame = vec![IAC, SB, CHARSET, charset::REQUEST, b';'];
        frame.extend_from_slice(name.as_bytes());
        frame.extend_from_slice(&[IAC, SE]);
        frame
    }

    // ============================================================================
    // Command Parsing Tests
    // ============================================================================

    #[test]
    fn test_plain_data_passes_through() {
        let mut h = harness();
        assert_eq!(
            h.feed(b"You are standing in a field.\r\n"),
            b"You are standing in a field.\r\n"
        );
    }

    #[test]
    fn test_escaped_iac_yields_single_byte() {
        let mut h = harness();
        assert_eq!(h.feed(&[b'a', IAC, IAC, b'b']), vec![b'a', IAC, b'b']);
    }

    #[test]
    fn test_escaped_iac_split_across_chunks() {
        let mut h = harness();
        assert_eq!(h.feed(&[b'a', IAC]), b"a");
        assert_eq!(h.feed(&[IAC, b'b']), vec![IAC, b'b']);
    }

    #[test]
    fn test_go_ahead_default_terminator() {
        let mut h = harness();
        assert_eq!(h.feed(&[b'>', IAC, GA]), vec![b'>', IAC, GA]);
    }

    #[test]
    fn test_go_ahead_custom_terminator() {
        let mut h = harness_with(TelnetConfig::default().with_line_feed_prompts());
        assert_eq!(h.feed(&[b'>', IAC, GA, b'x']), vec![b'>', CR, LF, b'x']);
    }

    #[test]
    fn test_other_commands_pass_through() {
        let mut h = harness();
        assert_eq!(h.feed(&[IAC, NOP, b'z']), vec![IAC, NOP, b'z']);
    }

    // ============================================================================
    // Unknown Option Tests
    // ============================================================================

    #[test]
    fn test_unknown_will_refused() {
        let mut h = harness();
        assert_eq!(h.feed(&[IAC, WILL, option::GMCP, b'x']), b"x");
        assert_eq!(h.take_sent(), vec![IAC, DONT, option::GMCP]);
    }

    #[test]
    fn test_unknown_do_refused() {
        let mut h = harness();
        assert!(h.feed(&[IAC, DO, option::NAWS]).is_empty());
        assert_eq!(h.take_sent(), vec![IAC, WONT, option::NAWS]);
    }

    #[test]
    fn test_unknown_wont_and_dont_are_silent() {
        let mut h = harness();
        assert!(h.feed(&[IAC, WONT, option::ECHO, IAC, DONT, option::ECHO]).is_empty());
        assert!(h.take_sent().is_empty());
        assert_eq!(h.remote(TelnetOption::Echo), QState::No);
    }

    #[test]
    fn test_negotiation_split_across_chunks() {
        let mut h = harness();
        h.feed(&[IAC]);
        h.feed(&[WILL]);
        assert!(h.take_sent().is_empty());
        assert_eq!(h.feed(&[option::MSSP, b'!']), b"!");
        assert_eq!(h.take_sent(), vec![IAC, DONT, option::MSSP]);
    }

    // ============================================================================
    // Q Method Tests
    // ============================================================================

    #[test]
    fn test_do_charset_accepts_and_requests() {
        let mut h = harness_with(TelnetConfig::default().with_charset("UTF-8"));
        h.feed(&[IAC, DO, CHARSET]);

        let mut expected = vec![IAC, WILL, CHARSET];
        expected.extend(charset_request("UTF-8"));
        assert_eq!(h.take_sent(), expected);
        assert_eq!(h.local(TelnetOption::Charset), QState::Yes);
        assert!(h.telnet().is_option_enabled(TelnetOption::Charset, TelnetSide::Local));
    }

    #[test]
    fn test_duplicate_do_repeats_request_only() {
        let mut h = harness_with(TelnetConfig::default().with_charset("UTF-8"));
        h.feed(&[IAC, DO, CHARSET]);
        h.take_sent();
        h.feed(&[IAC, DO, CHARSET]);
        assert_eq!(h.take_sent(), charset_request("UTF-8"));
        assert_eq!(h.local(TelnetOption::Charset), QState::Yes);
    }

    #[test]
    fn test_will_charset_answers_with_one_do() {
        let mut h = harness();
        h.feed(&[IAC, WILL, CHARSET]);
        assert_eq!(h.take_sent(), vec![IAC, DO, CHARSET]);
        assert_eq!(h.remote(TelnetOption::Charset), QState::Yes);
        assert_eq!(h.local(TelnetOption::Charset), QState::No);

        h.feed(&[IAC, WILL, CHARSET]);
        assert!(h.take_sent().is_empty());
    }

    #[test]
    fn test_deny_while_enabled() {
        let mut h = harness();
        h.feed(&[IAC, WILL, CHARSET]);
        h.take_sent();
        h.feed(&[IAC, WONT, CHARSET]);
        assert_eq!(h.take_sent(), vec![IAC, DONT, CHARSET]);
        assert_eq!(h.remote(TelnetOption::Charset), QState::No);
    }

    #[test]
    fn test_enable_option_then_accept() {
        let mut h = harness();
        h.telnet().enable_option(TelnetOption::Charset, TelnetSide::Local);
        assert_eq!(h.take_sent(), vec![IAC, WILL, CHARSET]);
        assert_eq!(h.local(TelnetOption::Charset), QState::WantYes);

        h.telnet().enable_option(TelnetOption::Charset, TelnetSide::Local);
        assert!(h.take_sent().is_empty());

        h.feed(&[IAC, DO, CHARSET]);
        assert_eq!(h.take_sent(), charset_request("US-ASCII"));
        assert_eq!(h.local(TelnetOption::Charset), QState::Yes);
    }

    #[test]
    fn test_enable_option_refused() {
        let mut h = harness();
        h.telnet().enable_option(TelnetOption::Echo, TelnetSide::Remote);
        assert_eq!(h.take_sent(), vec![IAC, DO, option::ECHO]);
        h.feed(&[IAC, WONT, option::ECHO]);
        assert!(h.take_sent().is_empty());
        assert_eq!(h.remote(TelnetOption::Echo), QState::No);
    }

    #[test]
    fn test_enabled_option_becomes_known() {
        let mut h = harness();
        h.telnet().enable_option(TelnetOption::SuppressGoAhead, TelnetSide::Remote);
        h.take_sent();
        h.feed(&[IAC, WILL, option::SGA]);
        assert!(h.take_sent().is_empty());
        assert!(h.telnet().is_option_enabled(TelnetOption::SuppressGoAhead, TelnetSide::Remote));
    }

    #[test]
    fn test_disable_option_round_trip() {
        let mut h = harness();
        h.feed(&[IAC, DO, CHARSET]);
        h.take_sent();

        h.telnet().disable_option(TelnetOption::Charset, TelnetSide::Local);
        assert_eq!(h.take_sent(), vec![IAC, WONT, CHARSET]);
        assert_eq!(h.local(TelnetOption::Charset), QState::WantNo);

        h.telnet().disable_option(TelnetOption::Charset, TelnetSide::Local);
        assert!(h.take_sent().is_empty());

        h.feed(&[IAC, DONT, CHARSET]);
        assert!(h.take_sent().is_empty());
        assert_eq!(h.local(TelnetOption::Charset), QState::No);
    }

    #[test]
    fn test_accept_while_want_no_is_stale() {
        let mut h = harness();
        h.feed(&[IAC, DO, CHARSET]);
        h.telnet().disable_option(TelnetOption::Charset, TelnetSide::Local);
        h.take_sent();

        h.feed(&[IAC, DO, CHARSET]);
        assert!(h.take_sent().is_empty());
        assert_eq!(h.local(TelnetOption::Charset), QState::No);
    }

    #[test]
    fn test_queued_enable_after_disable() {
        let mut h = harness();
        h.feed(&[IAC, DO, CHARSET]);
        h.telnet().disable_option(TelnetOption::Charset, TelnetSide::Local);
        h.telnet().enable_option(TelnetOption::Charset, TelnetSide::Local);
        assert_eq!(h.local(TelnetOption::Charset), QState::WantNoOpposite);
        h.take_sent();

        h.feed(&[IAC, DONT, CHARSET]);
        assert_eq!(h.take_sent(), vec![IAC, WILL, CHARSET]);
        assert_eq!(h.local(TelnetOption::Charset), QState::WantYes);
    }

    #[test]
    fn test_queued_disable_after_enable() {
        let mut h = harness();
        h.telnet().enable_option(TelnetOption::Charset, TelnetSide::Local);
        h.telnet().disable_option(TelnetOption::Charset, TelnetSide::Local);
        assert_eq!(h.local(TelnetOption::Charset), QState::WantYesOpposite);
        h.take_sent();

        h.feed(&[IAC, DO, CHARSET]);
        assert_eq!(h.take_sent(), vec![IAC, WONT, CHARSET]);
        assert_eq!(h.local(TelnetOption::Charset), QState::WantNo);
    }

    // ============================================================================
    // Charset Tests
    // ============================================================================

    #[test]
    fn test_charset_selects_wire_name() {
        let mut h = harness();
        h.telnet().charset("latin-1").unwrap();
        assert_eq!(h.telnet().config().charset, "ISO-8859-1");
        assert_eq!(h.take_sent(), vec![IAC, WILL, CHARSET]);

        h.feed(&[IAC, DO, CHARSET]);
        assert_eq!(h.take_sent(), charset_request("ISO-8859-1"));
    }

    #[test]
    fn test_charset_rejects_unknown_name() {
        let mut h = harness();
        let err = h.telnet().charset("klingon").unwrap_err();
        assert_eq!(err, TelnetError::UnknownCharset("klingon".to_string()));
        assert!(h.take_sent().is_empty());
    }

    #[test]
    #[traced_test]
    fn test_charset_accepted() {
        let mut h = harness();
        let mut frame = vec![IAC, SB, CHARSET, charset::ACCEPTED];
        frame.extend_from_slice(b"UTF-8");
        frame.extend_from_slice(&[IAC, SE]);
        assert!(h.feed(&frame).is_empty());
        assert_eq!(h.telnet().accepted_charset(), Some("UTF-8"));
        assert!(logs_contain("Charset 'UTF-8' accepted"));
    }

    #[test]
    #[traced_test]
    fn test_charset_rejected() {
        let mut h = harness_with(TelnetConfig::default().with_charset("UTF-8"));
        assert!(h.feed(&[IAC, SB, CHARSET, charset::REJECTED, IAC, SE]).is_empty());
        assert!(h.telnet().accepted_charset().is_none());
        assert!(logs_contain("Charset 'UTF-8' rejected"));
    }

    #[test]
    #[traced_test]
    fn test_charset_malformed_reply() {
        let mut h = harness();
        assert!(h.feed(&[IAC, SB, CHARSET, 0x09, IAC, SE]).is_empty());
        assert!(logs_contain("Unknown charset negotiation response"));
    }

    // ============================================================================
    // Subnegotiation Tests
    // ============================================================================

    #[test]
    fn test_unknown_subnegotiation_forwarded_verbatim() {
        let mut h = harness();
        let frame = [IAC, SB, option::GMCP, b'a', IAC, IAC, b'b', IAC, SE];
        let mut input = b"x".to_vec();
        input.extend_from_slice(&frame);
        input.push(b'y');

        let mut expected = b"x".to_vec();
        expected.extend_from_slice(&frame);
        expected.push(b'y');
        assert_eq!(h.feed(&input), expected);
    }

    #[test]
    fn test_subnegotiation_split_across_chunks() {
        let mut h = harness();
        assert!(h.feed(&[IAC, SB, option::MSDP, 1]).is_empty());
        assert!(h.feed(&[2, IAC]).is_empty());
        assert_eq!(h.feed(&[SE]), vec![IAC, SB, option::MSDP, 1, 2, IAC, SE]);
    }

    #[test]
    fn test_send_sub_option_escapes_iac() {
        let mut h = harness();
        h.telnet().send_sub_option(TelnetOption::Gmcp, &[1, IAC, 2]);
        assert_eq!(h.take_sent(), vec![IAC, SB, option::GMCP, 1, IAC, IAC, 2, IAC, SE]);
    }

    #[test]
    fn test_send_command() {
        let mut h = harness();
        h.telnet().send_command(NOP);
        assert_eq!(h.take_sent(), vec![IAC, NOP]);
    }

    #[test]
    fn test_unescape_iac() {
        assert_eq!(&unescape_iac(&[1, IAC, IAC, 2])[..], &[1, IAC, 2]);
        assert_eq!(&unescape_iac(&[IAC, IAC, IAC, IAC])[..], &[IAC, IAC]);
        assert_eq!(&unescape_iac(&[IAC])[..], &[IAC]);
    }
}
