/*
 * Copyright 2024 by Ideal Labs, LLC
 *
 * Licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License.
 * You may obtain a copy of the License at
 *
 *     http://www.apache.org/licenses/LICENSE-2.0
 *
 * Unless required by applicable law or agreed to in writing, software
 * distributed under the License is distributed on an "AS IS" BASIS,
 * WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
 * See the License for the specific language governing permissions and
 * limitations under the License.
 */

//! An RFC 5091 Boneh-Franklin identity-based encryption engine, built on
//! the `ibe-pairing` Type A pairing provider.
//!
//! [`facade`] is the entry point most callers want: it exposes the system
//! as strings and byte buffers, the same shape the CLI binaries and the C
//! FFI bridge both build on. The lower modules ([`params`], [`ibe`],
//! [`shard`], [`codec`]) are public for callers that want the typed values
//! directly instead of going through text/bytes.

#![warn(
	unused,
	future_incompatible,
	nonstandard_style,
	rust_2018_idioms,
	rust_2021_compatibility
)]

pub mod codec;
pub mod error;
pub mod facade;
pub mod hash;
pub mod ibe;
pub mod params;
pub mod security;
pub mod shard;

pub use error::{BfError, Result};
pub use ibe::fullident::Message;
pub use params::{Params, Secret};
pub use security::SecurityProfile;
