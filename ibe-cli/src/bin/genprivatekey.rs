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

//! `genprivatekey <identifier>`: reads `param.txt`/`secret.txt` from the
//! current directory and prints the identifier's extracted private key,
//! mirroring the original `bfibe/app/genprivatekey.c`.

use clap::Parser;

#[derive(Parser)]
#[command(about = "Extract a private key for an identifier from param.txt/secret.txt")]
struct Args {
	/// The identifier to extract a private key for (e.g. an email address)
	identifier: String,
}

fn main() {
	ibe_cli::init_tracing();
	let args = Args::parse();

	if let Err(err) = run(&args.identifier) {
		std::process::exit(ibe_cli::report_and_exit_code(&err));
	}
}

fn run(identifier: &str) -> ibe::Result<()> {
	let cwd = std::env::current_dir()?;
	let private_key = ibe_cli::genprivatekey(&cwd, identifier.as_bytes())?;
	println!("{identifier}\n{private_key}");
	Ok(())
}
