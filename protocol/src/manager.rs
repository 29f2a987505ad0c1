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

use crate::{AsAny, ManagerError, ManagerResult, Protocol, Writer};
use bytes::BytesMut;
use std::any::type_name;
use std::fmt;
use tracing::{debug, trace};

type Receiver = Box<dyn FnMut(&[u8]) + Send>;

/// Owns the connection state and the ordered chain of protocol layers.
///
/// Inbound bytes enter through [`Manager::parse`] and travel up the chain, wire-closest layer
/// first, until the last layer hands them to the application receiver. Outbound bytes go through
/// the shared [`Writer`] straight to the transport.
///
/// While the manager is disconnected, or while the chain is empty, both directions are buffered.
/// The buffers are flushed, in order, the moment the manager is connected and holds at least one
/// layer.
///
/// ```
/// use mudlink_protocol::{Manager, Protocol, Writer};
/// use std::sync::{Arc, Mutex};
///
/// struct Upper;
///
/// impl Protocol for Upper {
///     fn on_data_received(&mut self, data: &[u8], forward: &mut dyn FnMut(&[u8])) {
///         forward(&data.to_ascii_uppercase());
///     }
/// }
///
/// let lines = Arc::new(Mutex::new(Vec::new()));
/// let sink = Arc::clone(&lines);
/// let mut manager = Manager::new(
///     |_data: &[u8]| {},
///     move |data: &[u8]| sink.lock().unwrap().extend_from_slice(data),
/// );
/// manager.parse(b"hello");
/// manager.register(|_writer: Writer| Upper).unwrap();
/// manager.connect();
/// assert_eq!(&lines.lock().unwrap()[..], b"HELLO");
/// ```
pub struct Manager {
    writer: Writer,
    receiver: Receiver,
    handlers: Vec<Box<dyn Protocol>>,
    read_buffer: BytesMut,
    connected: bool,
}

impl Manager {
    /// Create a disconnected manager with an empty chain.
    ///
    /// `transport` receives every outbound byte. `receiver` receives the fully decoded application
    /// bytes leaving the last layer. The transport is invoked while the writer's internal lock is
    /// held, so it must not write back through the writer.
    pub fn new<T, R>(transport: T, receiver: R) -> Self
    where
        T: Fn(&[u8]) + Send + Sync + 'static,
        R: FnMut(&[u8]) + Send + 'static,
    {
        Manager {
            writer: Writer::new(transport),
            receiver: Box::new(receiver),
            handlers: Vec::new(),
            read_buffer: BytesMut::new(),
            connected: false,
        }
    }

    /// Mark the connection as established and flush anything buffered so far.
    pub fn connect(&mut self) {
        if !self.connected {
            debug!("Connection established");
            self.connected = true;
        }
        self.update_ready();
    }

    /// Remove every layer, head first, then mark the connection as closed.
    pub fn disconnect(&mut self) {
        while !self.handlers.is_empty() {
            let mut handler = self.handlers.remove(0);
            if self.handlers.is_empty() {
                self.writer.set_ready(false);
            }
            handler.on_connection_lost();
        }
        if self.connected {
            debug!("Connection closed");
            self.connected = false;
        }
        self.writer.set_ready(false);
    }

    /// Alias of [`Manager::disconnect`].
    pub fn close(&mut self) {
        self.disconnect();
    }

    /// Whether [`Manager::connect`] has been called since the last disconnect.
    pub fn is_connected(&self) -> bool {
        self.connected
    }

    /// Feed bytes read from the transport into the chain.
    pub fn parse(&mut self, data: &[u8]) {
        if !self.is_ready() {
            trace!("Buffering {} inbound bytes", data.len());
            self.read_buffer.extend_from_slice(data);
        } else if !self.read_buffer.is_empty() {
            let mut combined = self.read_buffer.split();
            combined.extend_from_slice(data);
            self.dispatch(&combined);
        } else if !data.is_empty() {
            self.dispatch(data);
        }
    }

    /// Send bytes to the remote end. See [`Writer::write`].
    pub fn write(&self, data: &[u8], escape: bool) {
        self.writer.write(data, escape);
    }

    /// A handle to the outbound side, shared with every layer.
    pub fn writer(&self) -> Writer {
        self.writer.clone()
    }

    /// Build a layer with a clone of the writer and append it to the chain.
    ///
    /// The new layer becomes the last one, so the bytes it forwards go to the application
    /// receiver. Its [`Protocol::on_connection_made`] runs before this returns.
    pub fn register<P, F>(&mut self, build: F) -> ManagerResult<()>
    where
        P: Protocol,
        F: FnOnce(Writer) -> P,
    {
        if self.position::<P>().is_some() {
            return Err(ManagerError::DuplicateHandler(type_name::<P>()));
        }
        let handler = build(self.writer.clone());
        self.handlers.push(Box::new(handler));
        debug!("Registered {} at depth {}", type_name::<P>(), self.handlers.len() - 1);
        if let Some(handler) = self.handlers.last_mut() {
            handler.on_connection_made();
        }
        self.update_ready();
        Ok(())
    }

    /// Remove a layer from the chain and hand it back.
    ///
    /// The layers on either side are joined directly. [`Protocol::on_connection_lost`] runs on
    /// the removed layer before it is returned.
    pub fn unregister<P: Protocol>(&mut self) -> ManagerResult<P> {
        let index = self
            .position::<P>()
            .ok_or(ManagerError::NotRegistered(type_name::<P>()))?;
        let mut handler = self.handlers.remove(index);
        debug!("Unregistered {} from depth {}", type_name::<P>(), index);
        self.writer.set_ready(self.is_ready());
        handler.on_connection_lost();
        AsAny::into_any(handler)
            .downcast::<P>()
            .map(|handler| *handler)
            .map_err(|_| ManagerError::NotRegistered(type_name::<P>()))
    }

    /// Whether a layer of type `P` is part of the chain.
    pub fn is_registered<P: Protocol>(&self) -> bool {
        self.position::<P>().is_some()
    }

    /// Borrow the registered layer of type `P`.
    pub fn handler<P: Protocol>(&self) -> Option<&P> {
        self.handlers
            .iter()
            .find_map(|handler| (**handler).as_any().downcast_ref::<P>())
    }

    /// Mutably borrow the registered layer of type `P`.
    pub fn handler_mut<P: Protocol>(&mut self) -> Option<&mut P> {
        self.handlers
            .iter_mut()
            .find_map(|handler| (**handler).as_any_mut().downcast_mut::<P>())
    }

    fn position<P: Protocol>(&self) -> Option<usize> {
        self.handlers
            .iter()
            .position(|handler| (**handler).as_any().is::<P>())
    }

    fn is_ready(&self) -> bool {
        self.connected && !self.handlers.is_empty()
    }

    fn update_ready(&mut self) {
        let ready = self.is_ready();
        if ready && !self.read_buffer.is_empty() {
            let buffered = self.read_buffer.split();
            trace!("Flushing {} buffered inbound bytes", buffered.len());
            self.dispatch(&buffered);
        }
        self.writer.set_ready(ready);
    }

    fn dispatch(&mut self, data: &[u8]) {
        forward(&mut self.handlers, data, &mut *self.receiver);
    }
}

/// Hand `data` to the head of `chain`, wiring each layer's output into the next one.
fn forward(chain: &mut [Box<dyn Protocol>], data: &[u8], receiver: &mut dyn FnMut(&[u8])) {
    if data.is_empty() {
        return;
    }
    match chain.split_first_mut() {
        Some((head, rest)) => {
            head.on_data_received(data, &mut |chunk: &[u8]| {
                forward(&mut *rest, chunk, &mut *receiver);
            });
        }
        None => receiver(data),
    }
}

impl Drop for Manager {
    fn drop(&mut self) {
        self.disconnect();
    }
}

impl fmt::Debug for Manager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Manager")
            .field("connected", &self.connected)
            .field("handlers", &self.handlers.len())
            .field("read_buffer", &self.read_buffer.len())
            .field("writer", &self.writer)
            .finish_non_exhaustive()
    }
}
