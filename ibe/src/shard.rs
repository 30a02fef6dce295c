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

//! Additive composition of key-management shards: combining two PKGs'
//! public parameters into a joint system, and combining their secrets to
//! match.

use num_bigint::BigUint;

use ibe_pairing::PairingPrecomp;

use crate::error::{BfError, Result};
use crate::params::{Params, Secret};

/// `add_public`: combines two shards' public parameters into the params of
/// their joint system. Both shards must share a security level, subgroup
/// order, and curve descriptor — added check beyond the curve descriptor
/// comparison that went missing upstream.
pub fn add_public(a: &Params, b: &Params) -> Result<Params> {
	crate::params::invalid_level_if_mismatched(&a.security, &b.security)?;

	if a.q != b.q {
		return Err(BfError::ShardMismatch("subgroup orders differ".into()));
	}
	if a.curve.to_text() != b.curve.to_text() {
		return Err(BfError::ShardMismatch("curve descriptors differ".into()));
	}

	let p_pub = a.p_pub.add(&b.p_pub);
	let p_pub_precomp = Some(PairingPrecomp::new(&a.pairing, &p_pub));

	Ok(Params {
		security: a.security,
		curve: a.curve.clone(),
		q: a.q.clone(),
		p: a.p.clone(),
		p_pub,
		p_pub_precomp,
		pairing: a.pairing.clone(),
	})
}

/// `add_secret`: sums two shards' secrets modulo the shared subgroup order.
pub fn add_secret(params: &Params, a: &Secret, b: &Secret) -> Secret {
	let sum: BigUint = (a.value() + b.value()) % &params.q;
	Secret::from_raw(sum)
}

#[cfg(test)]
mod tests {
	use super::*;
	use rand::thread_rng;

	#[test]
	fn shards_of_the_same_system_combine_to_the_sum() {
		let mut rng = thread_rng();
		let (params_a, secret_a) = Params::setup(3, &mut rng).unwrap();
		// A second shard of the same system: clone the curve/pairing, draw
		// a fresh P_pub.
		let mut params_b = params_a.clone();
		let secret_b = params_b.generate_shard(&mut rng);

		let joint = add_public(&params_a, &params_b).unwrap();
		let joint_secret = add_secret(&joint, &secret_a, &secret_b);

		let id = b"alice@example.com";
		let expected = joint.extract(&joint_secret, id);
		let from_pub = joint.public_of(id).mul(joint_secret.value());
		assert_eq!(expected, from_pub);
	}

	#[test]
	fn mismatched_levels_are_rejected() {
		let mut rng = thread_rng();
		let (params_a, _) = Params::setup(3, &mut rng).unwrap();
		let (params_b, _) = Params::setup(4, &mut rng).unwrap();
		assert!(add_public(&params_a, &params_b).is_err());
	}
}
