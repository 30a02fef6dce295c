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

//! Security-level table (RFC 5091 recommends level 3 or above for
//! production use; levels 1 and 2 exist only so this implementation is
//! feature-complete with the RFC).

use crate::error::BfError;

/// One row of the RFC 5091 security-level table: prime-field and subgroup
/// widths, plus which digest backs every hash primitive at this level.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SecurityProfile {
	pub level: u8,
	/// Bit-width of the pairing-group prime `p` (PBC's `qbits`).
	pub n_p: u32,
	/// Bit-width of the prime subgroup order `q` (PBC's `rbits`).
	pub n_q: u32,
	/// Digest length in bytes.
	pub hash_len: usize,
}

impl SecurityProfile {
	pub fn for_level(level: u8) -> Result<Self, BfError> {
		let profile = match level {
			1 => SecurityProfile { level, n_p: 512, n_q: 160, hash_len: 20 },
			2 => SecurityProfile { level, n_p: 1024, n_q: 224, hash_len: 28 },
			3 => SecurityProfile { level, n_p: 1536, n_q: 256, hash_len: 32 },
			4 => SecurityProfile { level, n_p: 3840, n_q: 384, hash_len: 48 },
			5 => SecurityProfile { level, n_p: 7680, n_q: 512, hash_len: 64 },
			_ => return Err(BfError::InvalidLevel),
		};
		Ok(profile)
	}

	/// Dispatches to the profile's digest (SHA-1 for level 1, SHA-2 of the
	/// matching width otherwise).
	pub fn hash(&self, input: &[u8]) -> Vec<u8> {
		use sha2::Digest;
		match self.level {
			1 => {
				let mut h = sha1::Sha1::new();
				h.update(input);
				h.finalize().to_vec()
			}
			2 => {
				let mut h = sha2::Sha224::new();
				h.update(input);
				h.finalize().to_vec()
			}
			3 => {
				let mut h = sha2::Sha256::new();
				h.update(input);
				h.finalize().to_vec()
			}
			4 => {
				let mut h = sha2::Sha384::new();
				h.update(input);
				h.finalize().to_vec()
			}
			5 => {
				let mut h = sha2::Sha512::new();
				h.update(input);
				h.finalize().to_vec()
			}
			_ => unreachable!("constructed only via for_level"),
		}
	}
}
