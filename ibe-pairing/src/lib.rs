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

//! A from-scratch pairing provider implementing the capability surface the
//! Boneh-Franklin IBE engine (`ibe`) needs: Type A curve generation at a
//! runtime-chosen bit width, group element arithmetic, hashing to the curve,
//! and a precomputable symmetric pairing.
//!
//! No published Rust pairing crate offers a runtime-variable-width Type A
//! curve (the ecosystem's pairing crates, e.g. `bls12_381`/`ark-bls12-381`,
//! fix both the curve and its bit-width at compile time), so this crate is
//! the engine's one and only provider rather than a trait with multiple
//! implementations. Everything above `ibe-pairing` treats [`G1`], [`Gt`],
//! and [`TypeAParams`] as opaque, exactly as `ibe::ibe` treats
//! `ibe_pairing` itself as an opaque dependency.

mod curve;
mod error;
mod fp2;
mod modmath;
mod pairing;
mod params;
mod primes;

pub use crate::error::PairingError;
pub use crate::params::TypeAParams;

use num_bigint::{BigUint, RandBigInt};
use rand::RngCore;

/// A point of `G1` (equivalently `G2`, since this pairing is symmetric).
pub type G1 = curve::AffinePoint;
/// An element of the target group `GT`.
pub type Gt = pairing::Gt;
pub use crate::pairing::{Pairing, PairingPrecomp};

/// Draws a point of `E(F_p)` for the given descriptor. Not necessarily in
/// the prime-order subgroup; callers multiply by [`TypeAParams::cofactor`]
/// to land there, exactly as `bf_setup` does when it searches for `P`.
pub fn random_point<R: RngCore>(params: &TypeAParams, rng: &mut R) -> G1 {
	G1::random(&params.p, rng)
}

/// Hashes an arbitrary byte string onto the prime-order subgroup of `G1`.
pub fn hash_to_point(params: &TypeAParams, digest: &[u8]) -> G1 {
	G1::hash_to_point(&params.p, &params.h, digest)
}

/// Draws a scalar uniformly from `[0, bound)`.
pub fn random_scalar_below<R: RngCore>(bound: &BigUint, rng: &mut R) -> BigUint {
	rng.gen_biguint_below(bound)
}
