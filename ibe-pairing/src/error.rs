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

use thiserror::Error;

/// Failures surfaced by the pairing provider's capability surface.
#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum PairingError {
	#[error("curve or pairing descriptor is malformed")]
	MalformedDescriptor,
	#[error("group element encoding has the wrong length or is out of range")]
	InvalidEncoding,
}
