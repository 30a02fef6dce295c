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

//! Bare modular-arithmetic helpers over `BigUint`, shared by the base field
//! and its quadratic extension.

use num_bigint::BigUint;
use num_traits::{One, Zero};

pub fn add_mod(a: &BigUint, b: &BigUint, p: &BigUint) -> BigUint {
	(a + b) % p
}

pub fn sub_mod(a: &BigUint, b: &BigUint, p: &BigUint) -> BigUint {
	if a >= b {
		(a - b) % p
	} else {
		p - ((b - a) % p)
	}
}

pub fn mul_mod(a: &BigUint, b: &BigUint, p: &BigUint) -> BigUint {
	(a * b) % p
}

pub fn neg_mod(a: &BigUint, p: &BigUint) -> BigUint {
	if a.is_zero() {
		BigUint::zero()
	} else {
		p - (a % p)
	}
}

/// Modular inverse via Fermat's little theorem (`p` must be prime).
pub fn inv_mod(a: &BigUint, p: &BigUint) -> BigUint {
	debug_assert!(!a.is_zero(), "cannot invert zero mod p");
	a.modpow(&(p - BigUint::from(2u8)), p)
}

/// Square root of `a` mod `p`, valid only for `p ≡ 3 (mod 4)` (always true
/// of the field primes this provider generates). Returns `None` if `a` is a
/// quadratic non-residue.
pub fn sqrt_mod(a: &BigUint, p: &BigUint) -> Option<BigUint> {
	if a.is_zero() {
		return Some(BigUint::zero());
	}
	let exp = (p + BigUint::one()) >> 2u32;
	let candidate = a.modpow(&exp, p);
	if mul_mod(&candidate, &candidate, p) == (a % p) {
		Some(candidate)
	} else {
		None
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn inverse_round_trips() {
		let p = BigUint::from(10007u32); // prime
		let a = BigUint::from(1234u32);
		let inv = inv_mod(&a, &p);
		assert_eq!(mul_mod(&a, &inv, &p), BigUint::one());
	}

	#[test]
	fn sqrt_round_trips_for_residues() {
		let p = BigUint::from(10007u32); // 10007 % 4 == 3
		let a = BigUint::from(81u32);
		let root = sqrt_mod(&a, &p).expect("81 is a QR");
		assert_eq!(mul_mod(&root, &root, &p), a);
	}
}
