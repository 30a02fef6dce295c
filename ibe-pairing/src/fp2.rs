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

//! The quadratic extension `F_p[i]/(i^2 + 1)`, used for the target group GT.
//!
//! `-1` is a non-residue whenever `p ≡ 3 (mod 4)`, which holds for every
//! prime this provider generates, so `i` genuinely has no square root in
//! `F_p` and this construction is a field.

use num_bigint::BigUint;
use num_traits::{One, Zero};

use crate::modmath::{add_mod, inv_mod, mul_mod, neg_mod, sub_mod};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Fp2 {
	pub p: BigUint,
	pub c0: BigUint,
	pub c1: BigUint,
}

impl Fp2 {
	pub fn new(p: BigUint, c0: BigUint, c1: BigUint) -> Self {
		Fp2 { c0: c0 % &p, c1: c1 % &p, p }
	}

	pub fn from_base(p: BigUint, c0: BigUint) -> Self {
		let zero = BigUint::zero();
		Fp2::new(p, c0, zero)
	}

	pub fn zero(p: BigUint) -> Self {
		Fp2::new(p, BigUint::zero(), BigUint::zero())
	}

	pub fn one(p: BigUint) -> Self {
		Fp2::new(p, BigUint::one(), BigUint::zero())
	}

	pub fn is_zero(&self) -> bool {
		self.c0.is_zero() && self.c1.is_zero()
	}

	pub fn add(&self, other: &Fp2) -> Fp2 {
		Fp2::new(
			self.p.clone(),
			add_mod(&self.c0, &other.c0, &self.p),
			add_mod(&self.c1, &other.c1, &self.p),
		)
	}

	pub fn sub(&self, other: &Fp2) -> Fp2 {
		Fp2::new(
			self.p.clone(),
			sub_mod(&self.c0, &other.c0, &self.p),
			sub_mod(&self.c1, &other.c1, &self.p),
		)
	}

	pub fn neg(&self) -> Fp2 {
		Fp2::new(self.p.clone(), neg_mod(&self.c0, &self.p), neg_mod(&self.c1, &self.p))
	}

	/// `(a0 + a1 i)(b0 + b1 i) = (a0 b0 - a1 b1) + (a0 b1 + a1 b0) i`
	pub fn mul(&self, other: &Fp2) -> Fp2 {
		let a0b0 = mul_mod(&self.c0, &other.c0, &self.p);
		let a1b1 = mul_mod(&self.c1, &other.c1, &self.p);
		let a0b1 = mul_mod(&self.c0, &other.c1, &self.p);
		let a1b0 = mul_mod(&self.c1, &other.c0, &self.p);
		Fp2::new(
			self.p.clone(),
			sub_mod(&a0b0, &a1b1, &self.p),
			add_mod(&a0b1, &a1b0, &self.p),
		)
	}

	pub fn square(&self) -> Fp2 {
		self.mul(self)
	}

	/// The norm `a0^2 + a1^2`, used by inversion.
	fn norm(&self) -> BigUint {
		add_mod(
			&mul_mod(&self.c0, &self.c0, &self.p),
			&mul_mod(&self.c1, &self.c1, &self.p),
			&self.p,
		)
	}

	pub fn inv(&self) -> Fp2 {
		debug_assert!(!self.is_zero(), "cannot invert zero in Fp2");
		let n_inv = inv_mod(&self.norm(), &self.p);
		Fp2::new(
			self.p.clone(),
			mul_mod(&self.c0, &n_inv, &self.p),
			neg_mod(&mul_mod(&self.c1, &n_inv, &self.p), &self.p),
		)
	}

	/// Square-and-multiply exponentiation by an arbitrary-precision exponent.
	pub fn pow(&self, exp: &BigUint) -> Fp2 {
		let mut result = Fp2::one(self.p.clone());
		let mut base = self.clone();
		let bits = exp.bits();
		for i in 0..bits {
			if exp.bit(i) {
				result = result.mul(&base);
			}
			base = base.square();
		}
		result
	}

	/// Canonical big-endian byte encoding: `c0` then `c1`, each padded to
	/// `ceil(bits(p)/8)` bytes.
	pub fn to_bytes(&self) -> Vec<u8> {
		let elem_len = ((self.p.bits() + 7) / 8) as usize;
		let mut out = Vec::with_capacity(2 * elem_len);
		out.extend(pad_be(&self.c0, elem_len));
		out.extend(pad_be(&self.c1, elem_len));
		out
	}

	pub fn byte_len(p: &BigUint) -> usize {
		2 * ((p.bits() + 7) / 8) as usize
	}
}

pub(crate) fn pad_be(v: &BigUint, len: usize) -> Vec<u8> {
	let bytes = v.to_bytes_be();
	let mut out = vec![0u8; len.saturating_sub(bytes.len())];
	out.extend_from_slice(&bytes);
	out
}

#[cfg(test)]
mod tests {
	use super::*;

	fn p() -> BigUint {
		BigUint::from(10007u32)
	}

	#[test]
	fn inverse_is_multiplicative_identity() {
		let a = Fp2::new(p(), BigUint::from(123u32), BigUint::from(45u32));
		let inv = a.inv();
		let prod = a.mul(&inv);
		assert_eq!(prod, Fp2::one(p()));
	}

	#[test]
	fn pow_matches_repeated_mul() {
		let a = Fp2::new(p(), BigUint::from(7u32), BigUint::from(3u32));
		let by_pow = a.pow(&BigUint::from(5u32));
		let mut by_mul = a.clone();
		for _ in 0..4 {
			by_mul = by_mul.mul(&a);
		}
		assert_eq!(by_pow, by_mul);
	}
}
