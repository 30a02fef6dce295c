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

//! `benchmark`: exercises security levels 1..5, timing setup, encryption,
//! and decryption, mirroring the original `bfibe/app/benchmark.c` (100
//! repetitions of a fixed 32-byte payload under `"alice@example.com"`).

use std::time::Instant;

use ibe::params::Params;

const PAYLOAD_BYTES: usize = 32;
const REPS: u32 = 100;
const EMAIL: &[u8] = b"alice@example.com";

fn main() {
	ibe_cli::init_tracing();

	if let Err(err) = run() {
		std::process::exit(ibe_cli::report_and_exit_code(&err));
	}
}

fn run() -> ibe::Result<()> {
	let mut rng = rand::thread_rng();
	let payload: Vec<u8> = (0..PAYLOAD_BYTES as u8).collect();

	for level in 1..=5u8 {
		tracing::info!(level, "benchmarking security level");

		let start = Instant::now();
		let (params, secret) = Params::setup(level, &mut rng)?;
		let init_time = start.elapsed().as_secs_f64();

		let alice_pub = params.public_of(EMAIL);
		let alice_pk = params.extract(&secret, EMAIL);

		let start = Instant::now();
		let mut message = None;
		for _ in 0..REPS {
			message = Some(ibe::ibe::fullident::encrypt(&params, &alice_pub, &payload, &mut rng)?);
		}
		let encrypt_time = start.elapsed().as_secs_f64() / REPS as f64;

		let message = message.expect("REPS > 0");
		let start = Instant::now();
		for _ in 0..REPS {
			ibe::ibe::fullident::decrypt(&params, &alice_pk, &message)?;
		}
		let decrypt_time = start.elapsed().as_secs_f64() / REPS as f64;

		println!(
			"Security level {level}\nModulus bits: {}\nHash bits: {}\n\
			 Initialize: {init_time:.6}\nEncrypt: {encrypt_time:.6}\nDecrypt: {decrypt_time:.6}\n",
			params.security.n_p, params.security.n_q,
		);
	}

	Ok(())
}
