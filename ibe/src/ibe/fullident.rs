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

//! BF-Encrypt / BF-Decrypt (RFC 5091 §5), the Fujisaki-Okamoto-transformed
//! variant of BF-BasicIdent. Ciphertexts carry their own integrity check:
//! decryption recomputes the sender's randomness and rejects any ciphertext
//! that doesn't re-derive the same `U`, rather than ever returning a
//! tampered plaintext.

use ibe_pairing::G1;
use rand::{CryptoRng, RngCore};
use zeroize::Zeroize;

use crate::error::{BfError, Result};
use crate::params::Params;

/// A Boneh-Franklin ciphertext: `(U, V, W)` in the RFC's naming. `length`
/// records the plaintext length so `W`'s keystream can be regenerated on
/// decryption without the caller having to pass it back in.
#[derive(Clone, Debug, PartialEq)]
pub struct Message {
	pub length: u64,
	pub u: G1,
	pub v: Vec<u8>,
	pub w: Vec<u8>,
}

/// `bf_encrypt`: encrypts `m` under the recipient's public key `q_id`.
pub fn encrypt<R: RngCore + CryptoRng>(
	params: &Params,
	q_id: &G1,
	m: &[u8],
	rng: &mut R,
) -> Result<Message> {
	let precomp = params
		.p_pub_precomp
		.as_ref()
		.ok_or_else(|| BfError::ParseError("params have no pairing precomputation".into()))?;

	let hlen = params.security.hash_len;
	let mut rho = vec![0u8; hlen];
	rng.try_fill_bytes(&mut rho)
		.map_err(|e| BfError::RandomFailure(e.to_string()))?;

	let t = params.security.hash(m);
	let mut rho_t = rho.clone();
	rho_t.extend_from_slice(&t);
	let l = crate::hash::hash_to_range(&params.security, &rho_t, &params.q);

	let u = params.p.mul(&l);

	let theta = precomp.apply(q_id).pow(&l);
	let z = theta.to_bytes();
	let h_z = params.security.hash(&z);
	let v = xor(&h_z, &rho);

	let pad = crate::hash::hash_to_bytes(&params.security, &rho, m.len());
	let w = xor(&pad, m);

	Ok(Message { length: m.len() as u64, u, v, w })
}

/// `bf_decrypt`: recovers the plaintext carried by `message` under the
/// recipient's private key `d_id`, or fails with [`BfError::DecryptionInvalid`]
/// if the ciphertext does not validate.
pub fn decrypt(params: &Params, d_id: &G1, message: &Message) -> Result<Vec<u8>> {
	let theta = params.pairing.apply(&message.u, d_id);
	let z = theta.to_bytes();
	let h_z = params.security.hash(&z);
	let rho = xor(&h_z, &message.v);

	let pad = crate::hash::hash_to_bytes(&params.security, &rho, message.length as usize);
	let m = xor(&pad, &message.w);

	let t = params.security.hash(&m);
	let mut rho_t = rho.clone();
	rho_t.extend_from_slice(&t);
	let l = crate::hash::hash_to_range(&params.security, &rho_t, &params.q);

	if params.p.mul(&l) != message.u {
		// FO validation failed: scrub the recovered plaintext before
		// returning so a caller cannot read it off a dangling buffer.
		let mut m = m;
		m.zeroize();
		return Err(BfError::DecryptionInvalid);
	}
	Ok(m)
}

fn xor(a: &[u8], b: &[u8]) -> Vec<u8> {
	debug_assert_eq!(a.len(), b.len());
	a.iter().zip(b.iter()).map(|(x, y)| x ^ y).collect()
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::security::SecurityProfile;
	use rand::thread_rng;

	fn tiny_params(level: u8, rng: &mut impl RngCore) -> (Params, crate::params::Secret) {
		let security = SecurityProfile { level, n_p: 48, n_q: 32, hash_len: 20 };
		let curve = ibe_pairing::TypeAParams::generate(security.n_q as u64, security.n_p as u64, rng);
		let q = curve.order().clone();
		let pairing = ibe_pairing::Pairing::new(&curve);
		let p = loop {
			let candidate = ibe_pairing::random_point(&curve, rng).mul(curve.cofactor());
			if !candidate.is_identity() {
				break candidate;
			}
		};
		let field_modulus = curve.p.clone();
		let mut params = Params {
			security,
			curve,
			q,
			p,
			p_pub: G1::identity(field_modulus),
			p_pub_precomp: None,
			pairing,
		};
		let secret = params.generate_shard(rng);
		(params, secret)
	}

	#[test]
	fn encrypt_then_decrypt_recovers_message() {
		let mut rng = thread_rng();
		let (params, secret) = tiny_params(3, &mut rng);
		let id = b"alice@example.com";
		let q_id = params.public_of(id);
		let d_id = params.extract(&secret, id);

		let plaintext = b"a short test message";
		let message = encrypt(&params, &q_id, plaintext, &mut rng).unwrap();
		let recovered = decrypt(&params, &d_id, &message).unwrap();
		assert_eq!(recovered, plaintext);
	}

	#[test]
	fn decrypting_with_the_wrong_identity_fails() {
		let mut rng = thread_rng();
		let (params, secret) = tiny_params(3, &mut rng);
		let q_id = params.public_of(b"alice@example.com");
		let d_wrong = params.extract(&secret, b"bob@example.com");

		let message = encrypt(&params, &q_id, b"hello", &mut rng).unwrap();
		assert!(matches!(decrypt(&params, &d_wrong, &message), Err(BfError::DecryptionInvalid)));
	}

	#[test]
	fn flipping_a_byte_of_v_breaks_decryption() {
		let mut rng = thread_rng();
		let (params, secret) = tiny_params(3, &mut rng);
		let id = b"alice@example.com";
		let q_id = params.public_of(id);
		let d_id = params.extract(&secret, id);

		let mut message = encrypt(&params, &q_id, b"hello world", &mut rng).unwrap();
		message.v[0] ^= 0xff;
		assert!(matches!(decrypt(&params, &d_id, &message), Err(BfError::DecryptionInvalid)));
	}
}
