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

//! Text and binary serialization for public parameters, private keys, and
//! ciphertexts.
//!
//! `Message`'s binary layout fixes every field at a known width instead of
//! writing a host `size_t`/pointer-width integer the way the reference
//! exporter does, so an encoding produced on one machine decodes correctly
//! on any other.

use base64::Engine;
use num_bigint::BigUint;
use num_traits::Num;

use ibe_pairing::{PairingPrecomp, TypeAParams, G1};

use crate::error::{BfError, Result};
use crate::ibe::fullident::Message;
use crate::params::{Params, Secret};
use crate::security::SecurityProfile;

const FORMAT_VERSION: u8 = 1;

/// `bf_params_to_file` / `bf_params_to_string` (text form): security level,
/// `P`, `P_pub`, `q` (base 36, per spec.md §6/§4.7), then the curve
/// descriptor, one field per line.
pub fn params_to_text(params: &Params) -> String {
	format!(
		"security {}\n{}\n{}\n{}\n{}",
		params.security.level,
		params.p.to_decimal_string(),
		params.p_pub.to_decimal_string(),
		params.q.to_str_radix(36),
		params.curve.to_text(),
	)
}

/// `bf_params_from_file` / `bf_params_from_string`.
pub fn params_from_text(text: &str) -> Result<Params> {
	let mut lines = text.lines();

	let header = lines.next().ok_or_else(|| BfError::ParseError("empty input".into()))?;
	let level: u8 = header
		.strip_prefix("security ")
		.ok_or_else(|| BfError::ParseError("missing security header".into()))?
		.trim()
		.parse()
		.map_err(|_| BfError::ParseError("malformed security level".into()))?;
	let security = SecurityProfile::for_level(level)?;

	let p_line = lines.next().ok_or_else(|| BfError::ParseError("missing P".into()))?;
	let p_pub_line = lines.next().ok_or_else(|| BfError::ParseError("missing P_pub".into()))?;
	let q_line = lines.next().ok_or_else(|| BfError::ParseError("missing q".into()))?;

	let q = BigUint::from_str_radix(q_line.trim(), 36)
		.map_err(|_| BfError::ParseError("malformed q".into()))?;

	let rest: String = lines.collect::<Vec<_>>().join("\n");
	let curve = TypeAParams::from_text(&rest).map_err(|e| BfError::ParseError(e.to_string()))?;

	let p = G1::from_decimal_string(&curve.p, p_line.trim())
		.ok_or_else(|| BfError::ParseError("malformed P".into()))?;
	let p_pub = G1::from_decimal_string(&curve.p, p_pub_line.trim())
		.ok_or_else(|| BfError::ParseError("malformed P_pub".into()))?;

	let pairing = ibe_pairing::Pairing::new(&curve);
	let p_pub_precomp = Some(PairingPrecomp::new(&pairing, &p_pub));

	Ok(Params { security, curve, q, p, p_pub, p_pub_precomp, pairing })
}

/// Text form of the master secret: base 36, per spec.md §6
/// ("Master-secret text format") and the original `BIGINT_STRING_BASE`.
pub fn secret_to_text(secret: &Secret) -> String {
	secret.value().to_str_radix(36)
}

pub fn secret_from_text(text: &str) -> Result<Secret> {
	let value = BigUint::from_str_radix(text.trim(), 36)
		.map_err(|_| BfError::ParseError("malformed secret".into()))?;
	Ok(Secret::from_raw(value))
}

/// Text form of an extracted private key `D_id` (a `G1` point).
pub fn private_key_to_text(params: &Params, d_id: &G1) -> String {
	let _ = params;
	d_id.to_decimal_string()
}

pub fn private_key_from_text(params: &Params, text: &str) -> Result<G1> {
	G1::from_decimal_string(&params.curve.p, text.trim())
		.ok_or_else(|| BfError::ParseError("malformed private key".into()))
}

/// `bf_message_to_bytes`: `length` (8 bytes, little-endian, fixed width),
/// `security_level` (1 byte, per spec.md §6), format version (1 byte),
/// `U` (fixed-width point encoding), `V` (`hash_len` bytes), then `W`
/// (`length` bytes).
pub fn message_to_bytes(params: &Params, msg: &Message) -> Vec<u8> {
	let mut out = Vec::with_capacity(8 + 2 + G1::byte_len(&params.curve.p) + msg.v.len() + msg.w.len());
	out.extend_from_slice(&msg.length.to_le_bytes());
	out.push(params.security.level);
	out.push(FORMAT_VERSION);
	out.extend(msg.u.to_bytes());
	out.extend_from_slice(&msg.v);
	out.extend_from_slice(&msg.w);
	out
}

/// `bf_message_from_bytes`. Rejects a ciphertext whose `security_level`
/// does not match `params.security.level` with [`BfError::ShardMismatch`],
/// per spec.md §6.
pub fn message_from_bytes(params: &Params, bytes: &[u8]) -> Result<Message> {
	let elem_len = G1::byte_len(&params.curve.p);
	let hash_len = params.security.hash_len;
	let header_len = 8 + 2;
	if bytes.len() < header_len + elem_len + hash_len {
		return Err(BfError::ParseError("message too short".into()));
	}

	let mut len_bytes = [0u8; 8];
	len_bytes.copy_from_slice(&bytes[..8]);
	let length = u64::from_le_bytes(len_bytes);

	let security_level = bytes[8];
	if security_level != params.security.level {
		return Err(BfError::ShardMismatch(format!(
			"ciphertext security level {security_level} does not match params level {}",
			params.security.level
		)));
	}

	let version = bytes[9];
	if version != FORMAT_VERSION {
		return Err(BfError::ParseError(format!("unsupported message format version {version}")));
	}

	let mut cursor = header_len;
	let u = G1::from_bytes(&params.curve.p, &bytes[cursor..cursor + elem_len])
		.ok_or_else(|| BfError::ParseError("malformed U".into()))?;
	cursor += elem_len;

	let v = bytes[cursor..cursor + hash_len].to_vec();
	cursor += hash_len;

	if bytes.len() != cursor + length as usize {
		return Err(BfError::ParseError("length field does not match payload size".into()));
	}
	let w = bytes[cursor..].to_vec();

	Ok(Message { length, u, v, w })
}

/// `bf_message_to_string` / `bf_message_from_string`: unpadded standard
/// base64 of the binary form.
pub fn message_to_text(params: &Params, msg: &Message) -> String {
	base64::engine::general_purpose::STANDARD_NO_PAD.encode(message_to_bytes(params, msg))
}

pub fn message_from_text(params: &Params, text: &str) -> Result<Message> {
	let bytes = base64::engine::general_purpose::STANDARD_NO_PAD
		.decode(text.trim())
		.map_err(|e| BfError::ParseError(e.to_string()))?;
	message_from_bytes(params, &bytes)
}

#[cfg(test)]
mod tests {
	use super::*;
	use rand::thread_rng;

	#[test]
	fn params_round_trip_through_text() {
		let mut rng = thread_rng();
		let (params, _secret) = Params::setup(3, &mut rng).unwrap();
		let text = params_to_text(&params);
		let parsed = params_from_text(&text).unwrap();
		assert_eq!(parsed.security, params.security);
		assert_eq!(parsed.q, params.q);
		assert_eq!(parsed.p, params.p);
		assert_eq!(parsed.p_pub, params.p_pub);
	}

	#[test]
	fn secret_round_trips_through_text() {
		let mut rng = thread_rng();
		let (_params, secret) = Params::setup(3, &mut rng).unwrap();
		let text = secret_to_text(&secret);
		let parsed = secret_from_text(&text).unwrap();
		assert_eq!(parsed.value(), secret.value());
	}

	#[test]
	fn secret_and_q_are_encoded_in_base_36() {
		let mut rng = thread_rng();
		let (params, secret) = Params::setup(3, &mut rng).unwrap();

		let secret_text = secret_to_text(&secret);
		assert_eq!(secret_text, secret.value().to_str_radix(36));

		let params_text = params_to_text(&params);
		let q_line = params_text.lines().nth(3).unwrap();
		assert_eq!(q_line, params.q.to_str_radix(36));
	}

	#[test]
	fn message_round_trips_through_bytes_and_text() {
		let mut rng = thread_rng();
		let (params, secret) = Params::setup(3, &mut rng).unwrap();
		let id = b"alice@example.com";
		let q_id = params.public_of(id);
		let msg = crate::ibe::fullident::encrypt(&params, &q_id, b"a payload", &mut rng).unwrap();

		let bytes = message_to_bytes(&params, &msg);
		let from_bytes = message_from_bytes(&params, &bytes).unwrap();
		assert_eq!(from_bytes, msg);

		let text = message_to_text(&params, &msg);
		let from_text = message_from_text(&params, &text).unwrap();
		assert_eq!(from_text, msg);

		let _ = secret;
	}

	#[test]
	fn decoding_under_the_wrong_security_level_is_a_shard_mismatch() {
		let mut rng = thread_rng();
		let (params3, secret3) = Params::setup(3, &mut rng).unwrap();
		let id = b"alice@example.com";
		let msg = crate::ibe::fullident::encrypt(&params3, &params3.public_of(id), b"hi", &mut rng).unwrap();
		let bytes = message_to_bytes(&params3, &msg);

		let (params4, _secret4) = Params::setup(4, &mut rng).unwrap();
		assert!(matches!(message_from_bytes(&params4, &bytes), Err(BfError::ShardMismatch(_))));
		let _ = secret3;
	}

	#[test]
	fn incrementing_the_length_field_does_not_yield_arbitrary_plaintext() {
		let mut rng = thread_rng();
		let (params, _secret) = Params::setup(3, &mut rng).unwrap();
		let id = b"alice@example.com";
		let msg = crate::ibe::fullident::encrypt(&params, &params.public_of(id), b"hello", &mut rng).unwrap();
		let mut bytes = message_to_bytes(&params, &msg);

		let mut len_bytes = [0u8; 8];
		len_bytes.copy_from_slice(&bytes[..8]);
		let incremented = u64::from_le_bytes(len_bytes) + 1;
		bytes[..8].copy_from_slice(&incremented.to_le_bytes());

		assert!(message_from_bytes(&params, &bytes).is_err());
	}
}
