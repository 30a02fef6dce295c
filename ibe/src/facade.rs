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

//! The high-level string/bytes API external adapters (the CLI binaries, the
//! FFI bridge) build on, mirroring the reference facade's entry points one
//! for one. Unlike that facade, every function here returns an owned
//! `Result` instead of a raw pointer, so there is nothing for a caller to
//! leak by forgetting to free it.

use rand::{CryptoRng, RngCore};

use crate::codec;
use crate::error::Result;
use crate::ibe::fullident::{self, Message};
use crate::params::{Params, Secret};
use crate::shard;

/// `generate_system`: builds a fresh IBE system at `security_level`.
pub fn generate_system<R: RngCore + CryptoRng>(
	security_level: u8,
	rng: &mut R,
) -> Result<(Params, Secret)> {
	Params::setup(security_level, rng)
}

/// `generate_shard`: draws a new shard of `base_system`, leaving it
/// untouched and returning a fresh `Params`/`Secret` pair.
pub fn generate_shard<R: RngCore + CryptoRng>(
	base_system: &Params,
	rng: &mut R,
) -> (Params, Secret) {
	let mut system = base_system.clone();
	let secret = system.generate_shard(rng);
	(system, secret)
}

/// `format_system_params` / `parse_system_params`.
pub fn format_system_params(system: &Params) -> String {
	codec::params_to_text(system)
}

pub fn parse_system_params(param_string: &str) -> Result<Params> {
	codec::params_from_text(param_string)
}

/// `format_system_secret` / `parse_system_secret`.
pub fn format_system_secret(secret: &Secret) -> String {
	codec::secret_to_text(secret)
}

pub fn parse_system_secret(secret_string: &str) -> Result<Secret> {
	codec::secret_from_text(secret_string)
}

/// `generate_private_key` / `format_private_key` / `parse_private_key`.
pub fn generate_private_key(system: &Params, secret: &Secret, address: &[u8]) -> String {
	let d_id = system.extract(secret, address);
	codec::private_key_to_text(system, &d_id)
}

pub fn parse_private_key(system: &Params, key_string: &str) -> Result<ibe_pairing::G1> {
	codec::private_key_from_text(system, key_string)
}

/// `encrypt_ibe`: encrypts `message` for `address` under `system`, returning
/// the binary ciphertext encoding.
pub fn encrypt_ibe<R: RngCore + CryptoRng>(
	system: &Params,
	address: &[u8],
	message: &[u8],
	rng: &mut R,
) -> Result<Vec<u8>> {
	let public_key = system.public_of(address);
	let ciphertext = fullident::encrypt(system, &public_key, message, rng)?;
	Ok(codec::message_to_bytes(system, &ciphertext))
}

/// `decrypt_ibe`: decrypts a binary ciphertext produced by [`encrypt_ibe`]
/// under the recipient's extracted private key.
pub fn decrypt_ibe(system: &Params, key: &ibe_pairing::G1, ciphertext: &[u8]) -> Result<Vec<u8>> {
	let msg: Message = codec::message_from_bytes(system, ciphertext)?;
	fullident::decrypt(system, key, &msg)
}

/// `add_public`: combines two shards' public parameters into the params of
/// their joint system.
pub fn add_public(system1: &Params, system2: &Params) -> Result<Params> {
	shard::add_public(system1, system2)
}

/// `add_secret`: sums two shards' secrets, parsed from their text encoding,
/// and returns the combined secret re-encoded the same way.
pub fn add_secret(system: &Params, secret1: &str, secret2: &str) -> Result<String> {
	let s1 = codec::secret_from_text(secret1)?;
	let s2 = codec::secret_from_text(secret2)?;
	let combined = shard::add_secret(system, &s1, &s2);
	Ok(codec::secret_to_text(&combined))
}
