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

//! Error types for chain composition

/// Result type for [`Manager`](crate::Manager) operations
pub type ManagerResult<T> = Result<T, ManagerError>;

/// Contract violations raised while composing the handler chain.
///
/// These are programmer errors; the manager never retries them.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ManagerError {
    /// An instance of this handler type is already part of the chain
    #[error("Handler {0} is already registered")]
    DuplicateHandler(&'static str),

    /// No instance of this handler type is part of the chain
    #[error("Handler {0} is not registered")]
    NotRegistered(&'static str),
}
