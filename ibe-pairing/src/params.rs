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

//! Generation and textual (de)serialization of Type A curve descriptors.

use num_bigint::{BigUint, RandBigInt};
use num_integer::Integer;
use num_traits::{One, Zero};
use rand::RngCore;

use crate::error::PairingError;
use crate::primes::{is_probably_prime, random_prime};

/// An opaque Type A curve descriptor: `E/F_p : y^2 = x^3 + x` with
/// `p ≡ 3 (mod 4)` and a prime-order subgroup of order `r` dividing
/// `p + 1 = h * r`.
///
/// Corresponds to `pbc_param_t` in the reference implementation this
/// provider replaces; `r` is what RFC 5091 calls `q`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TypeAParams {
	pub p: BigUint,
	pub r: BigUint,
	pub h: BigUint,
}

impl TypeAParams {
	/// Generates a Type A curve with a subgroup of order `rbits` bits over a
	/// field of `qbits` bits. Matches the argument order of the PBC function
	/// `pbc_param_init_a_gen(rbits, qbits)` that the original C code calls.
	pub fn generate<R: RngCore>(rbits: u64, qbits: u64, rng: &mut R) -> Self {
		assert!(qbits > rbits, "field must be wider than the subgroup order");
		let cofactor_bits = qbits - rbits;
		loop {
			let r = random_prime(rbits, rng);
			// Search for a cofactor h such that p = h*r - 1 is prime and
			// congruent to 3 mod 4 (so -1 is a quadratic non-residue and
			// E/F_p: y^2 = x^3+x is supersingular with #E(F_p) = p+1).
			for _ in 0..4096 {
				let mut h = rng.gen_biguint(cofactor_bits.max(2));
				// force h even so p = h*r - 1 has a chance at p mod 4 == 3
				if h.is_odd() {
					h += BigUint::one();
				}
				let p = &h * &r - BigUint::one();
				if (&p % BigUint::from(4u8)) != BigUint::from(3u8) {
					continue;
				}
				if p.bits() != qbits {
					continue;
				}
				if is_probably_prime(&p, rng) {
					return TypeAParams { p, r, h };
				}
			}
			// exhausted the cofactor search for this r, draw a fresh r
		}
	}

	pub fn order(&self) -> &BigUint {
		&self.r
	}

	pub fn cofactor(&self) -> &BigUint {
		&self.h
	}

	/// `(p^2 - 1) / r`, the exponent the final exponentiation step of the
	/// Tate pairing raises the Miller loop output to.
	pub fn final_exponent(&self) -> BigUint {
		let p2_minus_1 = &self.p * &self.p - BigUint::one();
		let (q, rem) = p2_minus_1.div_rem(&self.r);
		debug_assert!(rem.is_zero(), "r must divide p^2 - 1");
		q
	}

	/// Multi-line provider text form: `p`, `r`, `h`, one per line, base 10.
	pub fn to_text(&self) -> String {
		format!("typea\np {}\nr {}\nh {}\n", self.p, self.r, self.h)
	}

	/// Parses the text form produced by [`TypeAParams::to_text`], consuming
	/// exactly the lines it wrote and nothing more (callers that embed this
	/// in a larger stream should slice those lines out first).
	pub fn from_text(s: &str) -> Result<Self, PairingError> {
		let mut lines = s.lines();
		let header = lines.next().ok_or(PairingError::MalformedDescriptor)?;
		if header.trim() != "typea" {
			return Err(PairingError::MalformedDescriptor);
		}
		let p = parse_field(lines.next(), "p")?;
		let r = parse_field(lines.next(), "r")?;
		let h = parse_field(lines.next(), "h")?;
		Ok(TypeAParams { p, r, h })
	}
}

fn parse_field(line: Option<&str>, name: &str) -> Result<BigUint, PairingError> {
	let line = line.ok_or(PairingError::MalformedDescriptor)?;
	let (got_name, value) = line.trim().split_once(' ').ok_or(PairingError::MalformedDescriptor)?;
	if got_name != name {
		return Err(PairingError::MalformedDescriptor);
	}
	value.parse::<BigUint>().map_err(|_| PairingError::MalformedDescriptor)
}
