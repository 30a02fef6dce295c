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

//! Public parameters and the master secret: `setup`, `generate_shard`, and
//! the owned types that carry curve state between the engine's operations.

use num_bigint::BigUint;
use rand::RngCore;
use zeroize::Zeroize;

use ibe_pairing::{PairingPrecomp, TypeAParams, G1};

use crate::error::{BfError, Result};
use crate::security::SecurityProfile;

/// The PKG's master secret, `s`. Zeroized on drop so it does not linger in
/// memory once the holding `Params`/local variable goes out of scope —
/// the C reference never did this; we add it because the rest of this
/// corpus treats long-lived secret-key material this way.
#[derive(Clone)]
pub struct Secret(pub(crate) BigUint);

impl Secret {
	pub fn value(&self) -> &BigUint {
		&self.0
	}

	/// Wraps an already-reduced scalar, e.g. the sum of two shards' secrets.
	pub fn from_raw(value: BigUint) -> Self {
		Secret(value)
	}
}

impl Drop for Secret {
	fn drop(&mut self) {
		// BigUint has no Zeroize impl of its own; overwrite the limbs we can
		// reach through its byte representation instead.
		let mut bytes = std::mem::take(&mut self.0).to_bytes_le();
		bytes.zeroize();
		self.0 = BigUint::from_bytes_le(&bytes);
	}
}

impl std::fmt::Debug for Secret {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_tuple("Secret").field(&"<redacted>").finish()
	}
}

/// The public parameters of a Boneh-Franklin IBE system: everything a
/// sender or a recipient needs, and everything that is safe to publish.
#[derive(Clone)]
pub struct Params {
	pub security: SecurityProfile,
	pub curve: TypeAParams,
	pub q: BigUint,
	pub p: G1,
	pub p_pub: G1,
	pub p_pub_precomp: Option<PairingPrecomp>,
	pub(crate) pairing: ibe_pairing::Pairing,
}

impl Params {
	/// `bf_setup`: builds a fresh IBE system at the given security level.
	pub fn setup<R: RngCore>(level: u8, rng: &mut R) -> Result<(Params, Secret)> {
		let security = SecurityProfile::for_level(level)?;
		let curve = TypeAParams::generate(security.n_q as u64, security.n_p as u64, rng);
		let q = curve.order().clone();
		let pairing = ibe_pairing::Pairing::new(&curve);

		// Find a generator of the prime-order subgroup: sample a random
		// point of E(F_p), multiply by the cofactor, reject the identity.
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
			p_pub: G1::identity(field_modulus), // replaced by generate_shard below
			p_pub_precomp: None,
			pairing,
		};
		let secret = params.generate_shard(rng);
		Ok((params, secret))
	}

	/// `bf_generate_shard`: draws a fresh secret `s` in `[2, q-1]`, sets
	/// `P_pub = [s]P`, and rebuilds the pairing precomputation. Also used
	/// to refresh an existing `Params` in place — any prior precomputation
	/// is torn down (simply dropped; Rust has no manual `pairing_pp_clear`
	/// to call) before the new one is built.
	pub fn generate_shard<R: RngCore>(&mut self, rng: &mut R) -> Secret {
		let s_max = &self.q - BigUint::from(2u8);
		let s = ibe_pairing::random_scalar_below(&s_max, rng) + BigUint::from(2u8);

		self.p_pub = self.p.mul(&s);
		self.p_pub_precomp = None; // drop the stale precomputation first
		self.p_pub_precomp = Some(PairingPrecomp::new(&self.pairing, &self.p_pub));

		Secret(s)
	}

	/// `bf_generate_public_key` / `public_of`: the recipient's public key
	/// derived from their identifier, with no secret material involved.
	pub fn public_of(&self, id: &[u8]) -> G1 {
		crate::hash::hash_to_point(&self.security, &self.curve, id)
	}

	/// `bf_generate_private_key` / `extract`: `[s] . H1(id)`, performed by
	/// the PKG (or, after shard composition, jointly).
	pub fn extract(&self, s: &Secret, id: &[u8]) -> G1 {
		self.public_of(id).mul(&s.0)
	}
}

impl std::fmt::Debug for Params {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Params")
			.field("level", &self.security.level)
			.field("q_bits", &self.q.bits())
			.finish()
	}
}

pub(crate) fn invalid_level_if_mismatched(a: &SecurityProfile, b: &SecurityProfile) -> Result<()> {
	if a.level != b.level {
		return Err(BfError::ShardMismatch(format!(
			"security levels differ: {} vs {}",
			a.level, b.level
		)));
	}
	Ok(())
}
