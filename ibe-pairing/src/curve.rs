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

//! The supersingular curve `E/F_p : y^2 = x^3 + x`, `p ≡ 3 (mod 4)`.
//!
//! This is the curve RFC 5091's PBC-based reference implementation calls a
//! "Type A" curve: trace zero (`#E(F_p) = p + 1`), embedding degree 2, and a
//! distortion map `(x, y) -> (-x, iy)` that lets a single group `G = G1 = G2`
//! support a non-degenerate symmetric pairing (see `pairing.rs`).

use num_bigint::{BigUint, RandBigInt};
use num_traits::{One, Zero};
use rand::RngCore;

use crate::fp2::{pad_be, Fp2};
use crate::modmath::{add_mod, inv_mod, mul_mod, neg_mod, sqrt_mod, sub_mod};

/// An affine point of `E(F_p)`. `G1` and `G2` share this representation
/// because the pairing this provider implements is symmetric.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AffinePoint {
	pub p: BigUint,
	/// `None` represents the point at infinity (the group identity).
	pub coords: Option<(BigUint, BigUint)>,
}

impl AffinePoint {
	pub fn identity(p: BigUint) -> Self {
		AffinePoint { p, coords: None }
	}

	pub fn is_identity(&self) -> bool {
		self.coords.is_none()
	}

	pub fn x(&self) -> Option<&BigUint> {
		self.coords.as_ref().map(|(x, _)| x)
	}

	pub fn y(&self) -> Option<&BigUint> {
		self.coords.as_ref().map(|(_, y)| y)
	}

	/// Tries to lift `x` to a curve point by solving `y^2 = x^3 + x`.
	fn lift_x(p: &BigUint, x: &BigUint) -> Option<Self> {
		let x = x % p;
		let x2 = mul_mod(&x, &x, p);
		let x3 = mul_mod(&x2, &x, p);
		let rhs = add_mod(&x3, &x, p);
		sqrt_mod(&rhs, p).map(|y| AffinePoint { p: p.clone(), coords: Some((x, y)) })
	}

	/// Draws a uniformly random point of `E(F_p)` (not necessarily in the
	/// prime-order subgroup — callers multiply by the cofactor to land
	/// there, exactly as `bf_setup` does with `element_mul_mpz(P, P, h)`).
	pub fn random<R: RngCore>(p: &BigUint, rng: &mut R) -> Self {
		loop {
			let x = rng.gen_biguint_below(p);
			if let Some(pt) = Self::lift_x(p, &x) {
				return pt;
			}
		}
	}

	pub fn neg(&self) -> Self {
		match &self.coords {
			None => self.clone(),
			Some((x, y)) => AffinePoint {
				p: self.p.clone(),
				coords: Some((x.clone(), neg_mod(y, &self.p))),
			},
		}
	}

	pub fn double(&self) -> Self {
		let (x, y) = match &self.coords {
			None => return self.clone(),
			Some(c) => c,
		};
		if y.is_zero() {
			return AffinePoint::identity(self.p.clone());
		}
		let p = &self.p;
		// lambda = (3x^2 + 1) / (2y), curve coefficient a = 1
		let three_x2 = mul_mod(&BigUint::from(3u8), &mul_mod(x, x, p), p);
		let num = add_mod(&three_x2, &BigUint::one(), p);
		let den = inv_mod(&add_mod(y, y, p), p);
		let lambda = mul_mod(&num, &den, p);
		let x3 = sub_mod(&sub_mod(&mul_mod(&lambda, &lambda, p), x, p), x, p);
		let y3 = sub_mod(&mul_mod(&lambda, &sub_mod(x, &x3, p), p), y, p);
		AffinePoint { p: p.clone(), coords: Some((x3, y3)) }
	}

	pub fn add(&self, other: &AffinePoint) -> Self {
		let (x1, y1) = match &self.coords {
			None => return other.clone(),
			Some(c) => c,
		};
		let (x2, y2) = match &other.coords {
			None => return self.clone(),
			Some(c) => c,
		};
		let p = &self.p;
		if x1 == x2 {
			if y1 == y2 {
				return self.double();
			}
			// x1 == x2, y1 == -y2: sum is the point at infinity
			return AffinePoint::identity(p.clone());
		}
		let num = sub_mod(y2, y1, p);
		let den = inv_mod(&sub_mod(x2, x1, p), p);
		let lambda = mul_mod(&num, &den, p);
		let x3 = sub_mod(&sub_mod(&mul_mod(&lambda, &lambda, p), x1, p), x2, p);
		let y3 = sub_mod(&mul_mod(&lambda, &sub_mod(x1, &x3, p), p), y1, p);
		AffinePoint { p: p.clone(), coords: Some((x3, y3)) }
	}

	/// Double-and-add scalar multiplication.
	pub fn mul(&self, scalar: &BigUint) -> Self {
		let mut result = AffinePoint::identity(self.p.clone());
		let mut base = self.clone();
		let bits = scalar.bits();
		for i in 0..bits {
			if scalar.bit(i) {
				result = result.add(&base);
			}
			base = base.double();
		}
		result
	}

	/// Maps an arbitrary-length digest onto the curve by repeatedly
	/// reducing it to a candidate `x` coordinate until one lifts, then
	/// clearing the cofactor so the result lands in the prime-order
	/// subgroup (mirrors PBC's `element_from_hash` for a Type A curve).
	pub fn hash_to_point(p: &BigUint, cofactor: &BigUint, digest: &[u8]) -> Self {
		let mut counter: u64 = 0;
		loop {
			let mut input = digest.to_vec();
			input.extend_from_slice(&counter.to_be_bytes());
			let candidate = BigUint::from_bytes_be(&input) % p;
			if let Some(pt) = Self::lift_x(p, &candidate) {
				let cleared = pt.mul(cofactor);
				if !cleared.is_identity() {
					return cleared;
				}
			}
			counter += 1;
		}
	}

	/// The distortion map `(x, y) -> (-x, iy)` lifting a point of `E(F_p)`
	/// into `E(F_{p^2})`, landing outside the `F_p`-rational subgroup so the
	/// pairing is non-degenerate on `G1 = G2`.
	pub fn distort(&self) -> (Fp2, Fp2) {
		let p = self.p.clone();
		match &self.coords {
			None => (Fp2::zero(p.clone()), Fp2::zero(p)),
			Some((x, y)) => {
				let neg_x = Fp2::from_base(p.clone(), neg_mod(x, &self.p));
				let iy = Fp2::new(p, BigUint::zero(), y.clone());
				(neg_x, iy)
			}
		}
	}

	/// Fixed-width encoding: a one-byte infinity flag, then `x` and `y` each
	/// padded to `ceil(bits(p)/8)` bytes.
	pub fn to_bytes(&self) -> Vec<u8> {
		let elem_len = ((self.p.bits() + 7) / 8) as usize;
		let mut out = Vec::with_capacity(1 + 2 * elem_len);
		match &self.coords {
			None => {
				out.push(0);
				out.extend(vec![0u8; 2 * elem_len]);
			}
			Some((x, y)) => {
				out.push(1);
				out.extend(pad_be(x, elem_len));
				out.extend(pad_be(y, elem_len));
			}
		}
		out
	}

	pub fn from_bytes(p: &BigUint, bytes: &[u8]) -> Option<Self> {
		let elem_len = ((p.bits() + 7) / 8) as usize;
		if bytes.len() != 1 + 2 * elem_len {
			return None;
		}
		if bytes[0] == 0 {
			return Some(AffinePoint::identity(p.clone()));
		}
		let x = BigUint::from_bytes_be(&bytes[1..1 + elem_len]);
		let y = BigUint::from_bytes_be(&bytes[1 + elem_len..1 + 2 * elem_len]);
		Some(AffinePoint { p: p.clone(), coords: Some((x, y)) })
	}

	pub fn byte_len(p: &BigUint) -> usize {
		1 + 2 * ((p.bits() + 7) / 8) as usize
	}

	/// Provider-defined decimal text form: `"x,y"`, or `"inf"` for the
	/// identity. Parsed with radix 10, matching `element_set_str(..., 10)`
	/// in the original PBC-backed implementation.
	pub fn to_decimal_string(&self) -> String {
		match &self.coords {
			None => "inf".to_string(),
			Some((x, y)) => format!("{x},{y}"),
		}
	}

	pub fn from_decimal_string(p: &BigUint, s: &str) -> Option<Self> {
		let s = s.trim();
		if s == "inf" {
			return Some(AffinePoint::identity(p.clone()));
		}
		let (xs, ys) = s.split_once(',')?;
		let x = xs.trim().parse::<BigUint>().ok()?;
		let y = ys.trim().parse::<BigUint>().ok()?;
		if mul_mod(&y, &y, p) != add_mod(&mul_mod(&mul_mod(&x, &x, p), &x, p), &x, p) {
			return None;
		}
		Some(AffinePoint { p: p.clone(), coords: Some((x, y)) })
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rand::thread_rng;

	fn small_curve_order_dividing_p_plus_1() -> BigUint {
		// p = 10007 ≡ 3 (mod 4), #E(F_p) = p + 1 = 10008 = 2^3 * 3 * 3 * 139
		BigUint::from(10007u32)
	}

	#[test]
	fn double_and_add_agree() {
		let p = small_curve_order_dividing_p_plus_1();
		let mut rng = thread_rng();
		let g = AffinePoint::random(&p, &mut rng);
		let doubled = g.double();
		let added = g.add(&g);
		assert_eq!(doubled, added);
	}

	#[test]
	fn scalar_mul_by_two_matches_doubling() {
		let p = small_curve_order_dividing_p_plus_1();
		let mut rng = thread_rng();
		let g = AffinePoint::random(&p, &mut rng);
		assert_eq!(g.mul(&BigUint::from(2u8)), g.double());
	}

	#[test]
	fn identity_is_additive_neutral() {
		let p = small_curve_order_dividing_p_plus_1();
		let mut rng = thread_rng();
		let g = AffinePoint::random(&p, &mut rng);
		let id = AffinePoint::identity(p);
		assert_eq!(g.add(&id), g);
	}

	#[test]
	fn point_negation_sums_to_identity() {
		let p = small_curve_order_dividing_p_plus_1();
		let mut rng = thread_rng();
		let g = AffinePoint::random(&p, &mut rng);
		let sum = g.add(&g.neg());
		assert!(sum.is_identity());
	}

	#[test]
	fn byte_round_trip() {
		let p = small_curve_order_dividing_p_plus_1();
		let mut rng = thread_rng();
		let g = AffinePoint::random(&p, &mut rng);
		let bytes = g.to_bytes();
		let back = AffinePoint::from_bytes(&p, &bytes).unwrap();
		assert_eq!(g, back);
	}

	#[test]
	fn decimal_round_trip() {
		let p = small_curve_order_dividing_p_plus_1();
		let mut rng = thread_rng();
		let g = AffinePoint::random(&p, &mut rng);
		let s = g.to_decimal_string();
		let back = AffinePoint::from_decimal_string(&p, &s).unwrap();
		assert_eq!(g, back);
	}
}
