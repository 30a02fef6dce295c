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

//! The three hash primitives RFC 5091 §4 builds the rest of the scheme on.

use num_bigint::BigUint;

use crate::security::SecurityProfile;

/// `hash_to_point`: hashes `id` under the profile's digest, then lets the
/// pairing provider map the digest onto the curve.
pub fn hash_to_point(profile: &SecurityProfile, params: &ibe_pairing::TypeAParams, id: &[u8]) -> ibe_pairing::G1 {
	let digest = profile.hash(id);
	ibe_pairing::hash_to_point(params, &digest)
}

/// `HashToRange` (RFC 5091 §4.2): hashes `b` into an integer in `[0, q)`.
/// Exactly two rounds, as the RFC specifies — sufficient because every
/// profile's `2 * hash_len * 8 >= n_q`.
pub fn hash_to_range(profile: &SecurityProfile, b: &[u8], q: &BigUint) -> BigUint {
	let hlen = profile.hash_len;
	let m = BigUint::from(256u32).pow(hlen as u32);
	let mut v = BigUint::from(0u32);
	let mut h = vec![0u8; hlen];

	for _ in 0..2 {
		let mut t = h.clone();
		t.extend_from_slice(b);
		h = profile.hash(&t);
		let a = BigUint::from_bytes_be(&h);
		v = v * &m + a;
	}
	v % q
}

/// `HashBytes` (RFC 5091 §4.2.1): expands `seed` into `outlen` pseudorandom
/// bytes via repeated hashing.
pub fn hash_to_bytes(profile: &SecurityProfile, seed: &[u8], outlen: usize) -> Vec<u8> {
	let hlen = profile.hash_len;
	let k = profile.hash(seed);
	let mut h = vec![0u8; hlen];
	let mut out = Vec::with_capacity(outlen);

	while out.len() < outlen {
		h = profile.hash(&h);
		let mut h_k = h.clone();
		h_k.extend_from_slice(&k);
		let r = profile.hash(&h_k);
		let remaining = outlen - out.len();
		out.extend_from_slice(&r[..remaining.min(hlen)]);
	}
	out
}

#[cfg(test)]
mod tests {
	use super::*;
	use rand::thread_rng;

	#[test]
	fn hash_to_range_is_in_bounds() {
		let profile = SecurityProfile::for_level(3).unwrap();
		let q = BigUint::from(104729u32);
		for b in [b"a".as_slice(), b"a much longer identifier string"] {
			let v = hash_to_range(&profile, b, &q);
			assert!(v < q);
		}
	}

	#[test]
	fn hash_to_bytes_produces_requested_length() {
		let profile = SecurityProfile::for_level(3).unwrap();
		for outlen in [0usize, 1, 31, 32, 33, 257] {
			assert_eq!(hash_to_bytes(&profile, b"seed", outlen).len(), outlen);
		}
	}

	#[test]
	fn hash_to_bytes_is_deterministic() {
		let profile = SecurityProfile::for_level(3).unwrap();
		assert_eq!(hash_to_bytes(&profile, b"seed", 64), hash_to_bytes(&profile, b"seed", 64));
	}

	#[test]
	fn hash_to_point_lands_in_the_subgroup() {
		let mut rng = thread_rng();
		let params = ibe_pairing::TypeAParams::generate(32, 48, &mut rng);
		let profile = SecurityProfile { level: 3, n_p: 48, n_q: 32, hash_len: 32 };
		let q = hash_to_point(&profile, &params, b"alice@example.com");
		assert!(!q.is_identity());
	}
}
