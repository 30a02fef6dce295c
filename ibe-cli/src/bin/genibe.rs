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

//! `genibe [level]`: builds a fresh IBE system at `level` (default 3) and
//! writes its public parameters and master secret to `param.txt` and
//! `secret.txt` in the current directory, mirroring the original
//! `bfibe/app/genibe.c`.

use clap::Parser;

#[derive(Parser)]
#[command(about = "Generate a fresh Boneh-Franklin IBE system")]
struct Args {
	/// Security level, 1-5 (RFC 5091 recommends 3 or above for production)
	#[arg(default_value_t = 3)]
	level: u8,
}

fn main() {
	ibe_cli::init_tracing();
	let args = Args::parse();

	if let Err(err) = run(args.level) {
		std::process::exit(ibe_cli::report_and_exit_code(&err));
	}
}

fn run(level: u8) -> ibe::Result<()> {
	let mut rng = rand::thread_rng();
	let cwd = std::env::current_dir()?;
	ibe_cli::genibe(&cwd, level, &mut rng)?;

	tracing::info!(level, "wrote param.txt and secret.txt");
	Ok(())
}
