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

use thiserror::Error;

/// The error taxonomy shared by every layer of the engine: setup, the
/// hash primitives, shard algebra, serialization, and the facade all
/// return `Result<_, BfError>`.
#[derive(Debug, Error)]
pub enum BfError {
	/// The requested security level is outside `1..=5`.
	#[error("security level must be between 1 and 5")]
	InvalidLevel,

	/// The CSPRNG refused to produce bytes (e.g. the OS entropy source
	/// failed).
	#[error("failed to draw randomness: {0}")]
	RandomFailure(String),

	/// Text or binary input does not match the expected format.
	#[error("failed to parse input: {0}")]
	ParseError(String),

	/// Attempting to combine or consume shards with differing level, `q`,
	/// or curve descriptor.
	#[error("shard parameters do not match: {0}")]
	ShardMismatch(String),

	/// The Fujisaki-Okamoto validity check failed on decryption.
	#[error("ciphertext failed decryption validation")]
	DecryptionInvalid,

	/// File I/O surface in external adapters.
	#[error("I/O error: {0}")]
	IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, BfError>;
