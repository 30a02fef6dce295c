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

//! Probabilistic primality testing and random prime search.
//!
//! `num-bigint` ships no primality test of its own, so this is the one piece
//! of number theory the provider has to grow by hand instead of borrowing
//! from a crate.

use num_bigint::{BigUint, RandBigInt};
use num_traits::{One, Zero};
use rand::RngCore;

const MILLER_RABIN_ROUNDS: usize = 40;

/// Miller-Rabin compositeness test. False negatives (reporting composite for
/// a prime) never happen; false positives (reporting prime for a composite)
/// occur with probability at most `4^-MILLER_RABIN_ROUNDS`.
pub fn is_probably_prime<R: RngCore>(n: &BigUint, rng: &mut R) -> bool {
	let small_primes: [u64; 12] = [2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37];
	if n.is_zero() || n == &BigUint::one() {
		return false;
	}
	for p in small_primes.iter() {
		let p = BigUint::from(*p);
		if n == &p {
			return true;
		}
		if (n % &p).is_zero() {
			return false;
		}
	}

	// write n - 1 = 2^s * d with d odd
	let one = BigUint::one();
	let n_minus_one = n - &one;
	let mut d = n_minus_one.clone();
	let mut s = 0u32;
	while (&d % 2u8).is_zero() {
		d >>= 1u32;
		s += 1;
	}

	'witness: for _ in 0..MILLER_RABIN_ROUNDS {
		let a = rng.gen_biguint_range(&BigUint::from(2u8), &(n - 2u8));
		let mut x = a.modpow(&d, n);
		if x == one || x == n_minus_one {
			continue;
		}
		for _ in 0..s.saturating_sub(1) {
			x = x.modpow(&BigUint::from(2u8), n);
			if x == n_minus_one {
				continue 'witness;
			}
		}
		return false;
	}
	true
}

/// Draws a uniformly random odd candidate of exactly `bits` bits (top bit
/// set) and Miller-Rabin-tests it, retrying until a probable prime is found.
pub fn random_prime<R: RngCore>(bits: u64, rng: &mut R) -> BigUint {
	assert!(bits >= 2, "prime search needs at least 2 bits");
	loop {
		let mut candidate = rng.gen_biguint(bits);
		candidate.set_bit(bits - 1, true);
		candidate.set_bit(0, true);
		if is_probably_prime(&candidate, rng) {
			return candidate;
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rand::thread_rng;

	#[test]
	fn known_primes_pass() {
		let mut rng = thread_rng();
		for p in [2u64, 3, 5, 7, 104729, 999983] {
			assert!(is_probably_prime(&BigUint::from(p), &mut rng), "{p} should be prime");
		}
	}

	#[test]
	fn known_composites_fail() {
		let mut rng = thread_rng();
		for n in [4u64, 9, 15, 100, 104730, 999984] {
			assert!(!is_probably_prime(&BigUint::from(n), &mut rng), "{n} should be composite");
		}
	}

	#[test]
	fn random_prime_has_requested_width() {
		let mut rng = thread_rng();
		let p = random_prime(160, &mut rng);
		assert_eq!(p.bits(), 160);
		assert!(is_probably_prime(&p, &mut rng));
	}
}
