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

//! Shared plumbing for the `genibe`, `genprivatekey`, and `benchmark`
//! binaries: the file-format operations each one drives, a `tracing`
//! subscriber, and the mapping from [`ibe::BfError`] to a process exit
//! code, per spec.md §7's "user-visible behavior."

use std::path::Path;

use ibe::params::{Params, Secret};
use ibe::BfError;

/// Installs an `EnvFilter`-driven `tracing` subscriber, honoring
/// `RUST_LOG` and defaulting to `info`.
pub fn init_tracing() {
	use tracing_subscriber::EnvFilter;
	let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
	tracing_subscriber::fmt().with_env_filter(filter).init();
}

/// Logs `err` as a single-line diagnostic and returns the exit code the
/// binary should terminate with.
pub fn report_and_exit_code(err: &BfError) -> i32 {
	tracing::error!(%err, "operation failed");
	match err {
		BfError::InvalidLevel => 2,
		BfError::RandomFailure(_) => 3,
		BfError::ParseError(_) => 4,
		BfError::ShardMismatch(_) => 5,
		BfError::DecryptionInvalid => 6,
		BfError::IoError(_) => 7,
	}
}

/// The fixed filenames `genibe`/`genprivatekey` read and write in a given
/// directory, matching the original `bfibe/app/{genibe,genprivatekey}.c`.
pub const PARAM_FILE: &str = "param.txt";
pub const SECRET_FILE: &str = "secret.txt";

/// `genibe`'s body: builds a fresh system at `level` and writes
/// `param.txt`/`secret.txt` into `dir`. Factored out of the `genibe`
/// binary so it can be driven from a temp directory in tests instead of
/// the process's actual current directory.
pub fn genibe<R: rand::RngCore + rand::CryptoRng>(
	dir: &Path,
	level: u8,
	rng: &mut R,
) -> ibe::Result<(Params, Secret)> {
	let (params, secret) = ibe::facade::generate_system(level, rng)?;
	std::fs::write(dir.join(PARAM_FILE), ibe::facade::format_system_params(&params))?;
	std::fs::write(dir.join(SECRET_FILE), ibe::facade::format_system_secret(&secret))?;
	Ok((params, secret))
}

/// `genprivatekey`'s body: reads `param.txt`/`secret.txt` from `dir` and
/// extracts a private key for `identifier`, returning its text encoding.
pub fn genprivatekey(dir: &Path, identifier: &[u8]) -> ibe::Result<String> {
	let param_text = std::fs::read_to_string(dir.join(PARAM_FILE))?;
	let secret_text = std::fs::read_to_string(dir.join(SECRET_FILE))?;

	let params = ibe::facade::parse_system_params(&param_text)?;
	let secret = ibe::facade::parse_system_secret(&secret_text)?;

	Ok(ibe::facade::generate_private_key(&params, &secret, identifier))
}

#[cfg(test)]
mod tests {
	use super::*;
	use rand::thread_rng;

	#[test]
	fn genibe_then_genprivatekey_round_trips_through_the_files() {
		let dir = tempfile::tempdir().unwrap();
		let mut rng = thread_rng();

		let (params, secret) = genibe(dir.path(), 3, &mut rng).unwrap();
		let identifier = b"alice@example.com";
		let private_key_text = genprivatekey(dir.path(), identifier).unwrap();

		let private_key = ibe::facade::parse_private_key(&params, &private_key_text).unwrap();
		assert_eq!(private_key, params.extract(&secret, identifier));
	}

	#[test]
	fn genprivatekey_without_param_files_is_an_io_error() {
		let dir = tempfile::tempdir().unwrap();
		assert!(matches!(
			genprivatekey(dir.path(), b"alice@example.com"),
			Err(BfError::IoError(_))
		));
	}
}
