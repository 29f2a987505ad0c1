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

use std::any::Any;

/// Upcast helper so the [`Manager`](crate::Manager) can recover the concrete type of a layer.
///
/// Implemented for every `'static` type; layers never implement it by hand.
pub trait AsAny: Any {
    /// Borrow as [`Any`]
    fn as_any(&self) -> &dyn Any;
    /// Mutably borrow as [`Any`]
    fn as_any_mut(&mut self) -> &mut dyn Any;
    /// Convert a boxed value into a boxed [`Any`]
    fn into_any(self: Box<Self>) -> Box<dyn Any>;
}

impl<T: Any> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn into_any(self: Box<Self>) -> Box<dyn Any> {
        self
    }
}

/// A single layer of the protocol chain.
///
/// Layers are ordered wire-closest first. Each layer receives the bytes emitted by the layer
/// below it and hands whatever it does not consume to `forward`, which leads to the next layer
/// or, for the last layer, to the application receiver. Outbound bytes never travel through the
/// chain; a layer that needs to talk to the remote end holds the [`Writer`](crate::Writer) it
/// was built with.
pub trait Protocol: AsAny + Send {
    /// Consume bytes from the layer below and forward the residual application bytes.
    ///
    /// `forward` may be called any number of times, including zero. Empty slices are dropped
    /// before they reach the next layer.
    fn on_data_received(&mut self, data: &[u8], forward: &mut dyn FnMut(&[u8]));

    /// Called once, right after the layer joins the chain.
    fn on_connection_made(&mut self) {}

    /// Called once, right after the layer leaves the chain.
    fn on_connection_lost(&mut self) {}
}
