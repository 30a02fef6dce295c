/*
 * Copyright 2025 by Ideal Labs, LLC
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

//! C-compatible FFI bindings for the Boneh-Franklin IBE engine.
//!
//! This crate provides C-compatible wrapper functions over `ibe`'s facade:
//! system setup, shard generation, private-key extraction, encryption,
//! decryption, and the two shard-algebra operations, plus the text-format
//! (de)serialization a caller needs to carry `Params`/`Secret`/private keys
//! across the FFI boundary. Every opaque value crossing the boundary is a
//! boxed handle returned as a raw pointer with a matching `_free` function;
//! every entry point validates its pointer arguments for null before
//! dereferencing and returns a result code rather than panicking across
//! the boundary.

// Allow unsafe code for FFI bindings - this is necessary for C interop
#![allow(unsafe_code)]

use std::cell::RefCell;
use std::ffi::{CStr, CString};
use std::os::raw::{c_char, c_uchar};
use std::ptr;
use std::slice;

use ibe::facade;
use ibe::params::{Params, Secret};
use ibe::BfError;
use ibe_pairing::G1;

// Thread-local storage for error messages
thread_local! {
	static LAST_ERROR: RefCell<Option<CString>> = RefCell::new(None);
}

fn set_last_error(message: impl Into<Vec<u8>>) {
	LAST_ERROR.with(|e| {
		*e.borrow_mut() = CString::new(message).ok();
	});
}

fn clear_last_error() {
	LAST_ERROR.with(|e| {
		*e.borrow_mut() = None;
	});
}

/// Result codes for IBE operations, one per [`ibe::BfError`] variant plus
/// `InvalidInput` for FFI-layer argument validation (null pointers,
/// non-UTF-8 strings) that has no counterpart in the engine's own
/// taxonomy.
#[repr(C)]
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum BfFfiResult {
	Success = 0,
	InvalidInput = 1,
	InvalidLevel = 2,
	RandomFailure = 3,
	ParseError = 4,
	ShardMismatch = 5,
	DecryptionInvalid = 6,
	IoError = 7,
}

impl From<&BfError> for BfFfiResult {
	fn from(err: &BfError) -> Self {
		match err {
			BfError::InvalidLevel => BfFfiResult::InvalidLevel,
			BfError::RandomFailure(_) => BfFfiResult::RandomFailure,
			BfError::ParseError(_) => BfFfiResult::ParseError,
			BfError::ShardMismatch(_) => BfFfiResult::ShardMismatch,
			BfError::DecryptionInvalid => BfFfiResult::DecryptionInvalid,
			BfError::IoError(_) => BfFfiResult::IoError,
		}
	}
}

fn fail(err: BfError) -> BfFfiResult {
	let code = BfFfiResult::from(&err);
	set_last_error(err.to_string());
	code
}

/// Opaque handle wrapping a [`Params`] value.
pub struct BfParams(Params);
/// Opaque handle wrapping a [`Secret`] (a PKG's master secret, or one
/// shard's contribution to it).
pub struct BfSecret(Secret);
/// Opaque handle wrapping a `G2` element: either an extracted private key
/// or a recipient's public key (`public_of`), which share a
/// representation in this engine.
pub struct BfPrivateKey(G1);

/// A heap buffer handed to the caller, freed with [`bf_buffer_free`].
#[repr(C)]
pub struct BfBuffer {
	pub data: *mut c_uchar,
	pub len: usize,
}

fn buffer_from_vec(mut v: Vec<u8>) -> BfBuffer {
	v.shrink_to_fit();
	let data = v.as_mut_ptr();
	let len = v.len();
	std::mem::forget(v);
	BfBuffer { data, len }
}

/// Frees a buffer returned by [`bf_encrypt`] or [`bf_decrypt`].
///
/// # Safety
/// `buffer` must have been produced by this crate's functions and not
/// freed already.
#[no_mangle]
pub unsafe extern "C" fn bf_buffer_free(buffer: BfBuffer) {
	if !buffer.data.is_null() {
		let _ = Vec::from_raw_parts(buffer.data, buffer.len, buffer.len);
	}
}

/// Frees a C string returned by one of this crate's `_to_text` functions.
///
/// # Safety
/// `s` must have been produced by `CString::into_raw` in this crate and
/// not freed already.
#[no_mangle]
pub unsafe extern "C" fn bf_string_free(s: *mut c_char) {
	if !s.is_null() {
		drop(CString::from_raw(s));
	}
}

/// Frees a `Params` handle.
///
/// # Safety
/// `params` must be a pointer returned by this crate and not freed already.
#[no_mangle]
pub unsafe extern "C" fn bf_params_free(params: *mut BfParams) {
	if !params.is_null() {
		drop(Box::from_raw(params));
	}
}

/// Frees a `Secret` handle. Scrubs the underlying scalar on drop ([`Secret`]
/// implements `Drop` + zeroization internally).
///
/// # Safety
/// `secret` must be a pointer returned by this crate and not freed already.
#[no_mangle]
pub unsafe extern "C" fn bf_secret_free(secret: *mut BfSecret) {
	if !secret.is_null() {
		drop(Box::from_raw(secret));
	}
}

/// Frees a private-key / public-key handle.
///
/// # Safety
/// `key` must be a pointer returned by this crate and not freed already.
#[no_mangle]
pub unsafe extern "C" fn bf_private_key_free(key: *mut BfPrivateKey) {
	if !key.is_null() {
		drop(Box::from_raw(key));
	}
}

/// Returns the last error message set on this thread, or null if none.
///
/// # Safety
/// The returned pointer is valid until the next call to any `ibe-ffi`
/// function on this thread.
#[no_mangle]
pub unsafe extern "C" fn bf_last_error() -> *const c_char {
	LAST_ERROR.with(|e| match &*e.borrow() {
		Some(s) => s.as_ptr(),
		None => ptr::null(),
	})
}

/// `bf_setup`: builds a fresh IBE system at `level` (1-5).
///
/// # Safety
/// `params_out` and `secret_out` must be valid, non-null, writable
/// pointers.
#[no_mangle]
pub unsafe extern "C" fn bf_setup(
	level: u8,
	params_out: *mut *mut BfParams,
	secret_out: *mut *mut BfSecret,
) -> BfFfiResult {
	if params_out.is_null() || secret_out.is_null() {
		set_last_error("null output pointer");
		return BfFfiResult::InvalidInput;
	}
	let mut rng = rand::thread_rng();
	match facade::generate_system(level, &mut rng) {
		Ok((params, secret)) => {
			*params_out = Box::into_raw(Box::new(BfParams(params)));
			*secret_out = Box::into_raw(Box::new(BfSecret(secret)));
			clear_last_error();
			BfFfiResult::Success
		}
		Err(e) => fail(e),
	}
}

/// `bf_generate_shard`: draws a fresh shard of `base_system`, leaving it
/// untouched, and returns a new `Params`/`Secret` pair.
///
/// # Safety
/// `base_system` must be a valid, non-null `BfParams` pointer;
/// `params_out`/`secret_out` must be valid, non-null, writable pointers.
#[no_mangle]
pub unsafe extern "C" fn bf_generate_shard(
	base_system: *const BfParams,
	params_out: *mut *mut BfParams,
	secret_out: *mut *mut BfSecret,
) -> BfFfiResult {
	if base_system.is_null() || params_out.is_null() || secret_out.is_null() {
		set_last_error("null pointer argument");
		return BfFfiResult::InvalidInput;
	}
	let mut rng = rand::thread_rng();
	let base = &(*base_system).0;
	let (params, secret) = facade::generate_shard(base, &mut rng);
	*params_out = Box::into_raw(Box::new(BfParams(params)));
	*secret_out = Box::into_raw(Box::new(BfSecret(secret)));
	clear_last_error();
	BfFfiResult::Success
}

/// `bf_extract`: derives the private key for `id` under `secret`.
///
/// # Safety
/// `params`/`secret` must be valid non-null pointers; `id` must point to
/// `id_len` readable bytes; `key_out` must be a valid, non-null, writable
/// pointer.
#[no_mangle]
pub unsafe extern "C" fn bf_extract(
	params: *const BfParams,
	secret: *const BfSecret,
	id: *const c_uchar,
	id_len: usize,
	key_out: *mut *mut BfPrivateKey,
) -> BfFfiResult {
	if params.is_null() || secret.is_null() || id.is_null() || key_out.is_null() {
		set_last_error("null pointer argument");
		return BfFfiResult::InvalidInput;
	}
	let params = &(*params).0;
	let secret = &(*secret).0;
	let id = slice::from_raw_parts(id, id_len);

	let key = params.extract(secret, id);
	*key_out = Box::into_raw(Box::new(BfPrivateKey(key)));
	clear_last_error();
	BfFfiResult::Success
}

/// `bf_public_of`: derives the recipient's public key for `id` (no secret
/// material involved).
///
/// # Safety
/// Same requirements as [`bf_extract`], minus `secret`.
#[no_mangle]
pub unsafe extern "C" fn bf_public_of(
	params: *const BfParams,
	id: *const c_uchar,
	id_len: usize,
	key_out: *mut *mut BfPrivateKey,
) -> BfFfiResult {
	if params.is_null() || id.is_null() || key_out.is_null() {
		set_last_error("null pointer argument");
		return BfFfiResult::InvalidInput;
	}
	let params = &(*params).0;
	let id = slice::from_raw_parts(id, id_len);

	let key = params.public_of(id);
	*key_out = Box::into_raw(Box::new(BfPrivateKey(key)));
	clear_last_error();
	BfFfiResult::Success
}

/// `bf_encrypt`: encrypts `message` for the holder of `public_key`,
/// returning the binary ciphertext encoding in `ciphertext_out`.
///
/// # Safety
/// `params`/`public_key` must be valid non-null pointers; `message` must
/// point to `message_len` readable bytes; `ciphertext_out` must be a
/// valid, non-null, writable pointer.
#[no_mangle]
pub unsafe extern "C" fn bf_encrypt(
	params: *const BfParams,
	public_key: *const BfPrivateKey,
	message: *const c_uchar,
	message_len: usize,
	ciphertext_out: *mut BfBuffer,
) -> BfFfiResult {
	if params.is_null() || public_key.is_null() || message.is_null() || ciphertext_out.is_null() {
		set_last_error("null pointer argument");
		return BfFfiResult::InvalidInput;
	}
	let params = &(*params).0;
	let q_id = &(*public_key).0;
	let message = slice::from_raw_parts(message, message_len);

	let mut rng = rand::thread_rng();
	match ibe::ibe::fullident::encrypt(params, q_id, message, &mut rng) {
		Ok(ciphertext) => {
			let bytes = ibe::codec::message_to_bytes(params, &ciphertext);
			*ciphertext_out = buffer_from_vec(bytes);
			clear_last_error();
			BfFfiResult::Success
		}
		Err(e) => fail(e),
	}
}

/// `bf_decrypt`: decrypts a ciphertext produced by [`bf_encrypt`] under
/// the recipient's extracted private key.
///
/// # Safety
/// `params`/`private_key` must be valid non-null pointers; `ciphertext`
/// must point to `ciphertext_len` readable bytes; `plaintext_out` must be
/// a valid, non-null, writable pointer. On `DecryptionInvalid`, no
/// plaintext buffer is allocated and `*plaintext_out` is left untouched.
#[no_mangle]
pub unsafe extern "C" fn bf_decrypt(
	params: *const BfParams,
	private_key: *const BfPrivateKey,
	ciphertext: *const c_uchar,
	ciphertext_len: usize,
	plaintext_out: *mut BfBuffer,
) -> BfFfiResult {
	if params.is_null() || private_key.is_null() || ciphertext.is_null() || plaintext_out.is_null() {
		set_last_error("null pointer argument");
		return BfFfiResult::InvalidInput;
	}
	let params = &(*params).0;
	let key = &(*private_key).0;
	let bytes = slice::from_raw_parts(ciphertext, ciphertext_len);

	let message = match ibe::codec::message_from_bytes(params, bytes) {
		Ok(m) => m,
		Err(e) => return fail(e),
	};
	match ibe::ibe::fullident::decrypt(params, key, &message) {
		Ok(plaintext) => {
			*plaintext_out = buffer_from_vec(plaintext);
			clear_last_error();
			BfFfiResult::Success
		}
		Err(e) => fail(e),
	}
}

/// `bf_add_public`: combines two shards' public parameters into the
/// params of their joint system.
///
/// # Safety
/// `a`/`b` must be valid non-null pointers; `out` must be a valid,
/// non-null, writable pointer.
#[no_mangle]
pub unsafe extern "C" fn bf_add_public(
	a: *const BfParams,
	b: *const BfParams,
	out: *mut *mut BfParams,
) -> BfFfiResult {
	if a.is_null() || b.is_null() || out.is_null() {
		set_last_error("null pointer argument");
		return BfFfiResult::InvalidInput;
	}
	match facade::add_public(&(*a).0, &(*b).0) {
		Ok(joint) => {
			*out = Box::into_raw(Box::new(BfParams(joint)));
			clear_last_error();
			BfFfiResult::Success
		}
		Err(e) => fail(e),
	}
}

/// `bf_add_secret`: sums two shards' secrets into a fresh `Secret` handle.
///
/// # Safety
/// `params`/`a`/`b` must be valid non-null pointers; `out` must be a
/// valid, non-null, writable pointer.
#[no_mangle]
pub unsafe extern "C" fn bf_add_secret(
	params: *const BfParams,
	a: *const BfSecret,
	b: *const BfSecret,
	out: *mut *mut BfSecret,
) -> BfFfiResult {
	if params.is_null() || a.is_null() || b.is_null() || out.is_null() {
		set_last_error("null pointer argument");
		return BfFfiResult::InvalidInput;
	}
	let params = &(*params).0;
	let combined = ibe::shard::add_secret(params, &(*a).0, &(*b).0);
	*out = Box::into_raw(Box::new(BfSecret(combined)));
	clear_last_error();
	BfFfiResult::Success
}

/// Formats `params` as text (`bf_params_to_file`'s string form).
///
/// # Safety
/// `params` must be a valid non-null pointer. The returned string is
/// owned by the caller and must be freed with [`bf_string_free`].
#[no_mangle]
pub unsafe extern "C" fn bf_params_to_text(params: *const BfParams) -> *mut c_char {
	if params.is_null() {
		set_last_error("null pointer argument");
		return ptr::null_mut();
	}
	let text = facade::format_system_params(&(*params).0);
	match CString::new(text) {
		Ok(s) => s.into_raw(),
		Err(_) => {
			set_last_error("params text form contained an interior NUL");
			ptr::null_mut()
		}
	}
}

/// Parses the text form produced by [`bf_params_to_text`].
///
/// # Safety
/// `text` must be a valid, non-null, null-terminated C string; `out` must
/// be a valid, non-null, writable pointer.
#[no_mangle]
pub unsafe extern "C" fn bf_params_from_text(text: *const c_char, out: *mut *mut BfParams) -> BfFfiResult {
	if text.is_null() || out.is_null() {
		set_last_error("null pointer argument");
		return BfFfiResult::InvalidInput;
	}
	let text = match CStr::from_ptr(text).to_str() {
		Ok(s) => s,
		Err(_) => {
			set_last_error("params text is not valid UTF-8");
			return BfFfiResult::InvalidInput;
		}
	};
	match facade::parse_system_params(text) {
		Ok(params) => {
			*out = Box::into_raw(Box::new(BfParams(params)));
			clear_last_error();
			BfFfiResult::Success
		}
		Err(e) => fail(e),
	}
}

/// Formats `secret` as text (base 36, matching the original — see
/// `ibe::codec`).
///
/// # Safety
/// `secret` must be a valid non-null pointer. The returned string is
/// owned by the caller and must be freed with [`bf_string_free`].
#[no_mangle]
pub unsafe extern "C" fn bf_secret_to_text(secret: *const BfSecret) -> *mut c_char {
	if secret.is_null() {
		set_last_error("null pointer argument");
		return ptr::null_mut();
	}
	let text = facade::format_system_secret(&(*secret).0);
	match CString::new(text) {
		Ok(s) => s.into_raw(),
		Err(_) => {
			set_last_error("secret text form contained an interior NUL");
			ptr::null_mut()
		}
	}
}

/// Parses the text form produced by [`bf_secret_to_text`].
///
/// # Safety
/// `text` must be a valid, non-null, null-terminated C string; `out` must
/// be a valid, non-null, writable pointer.
#[no_mangle]
pub unsafe extern "C" fn bf_secret_from_text(text: *const c_char, out: *mut *mut BfSecret) -> BfFfiResult {
	if text.is_null() || out.is_null() {
		set_last_error("null pointer argument");
		return BfFfiResult::InvalidInput;
	}
	let text = match CStr::from_ptr(text).to_str() {
		Ok(s) => s,
		Err(_) => {
			set_last_error("secret text is not valid UTF-8");
			return BfFfiResult::InvalidInput;
		}
	};
	match facade::parse_system_secret(text) {
		Ok(secret) => {
			*out = Box::into_raw(Box::new(BfSecret(secret)));
			clear_last_error();
			BfFfiResult::Success
		}
		Err(e) => fail(e),
	}
}

/// Formats a private/public key handle as text.
///
/// # Safety
/// `params`/`key` must be valid non-null pointers. The returned string is
/// owned by the caller and must be freed with [`bf_string_free`].
#[no_mangle]
pub unsafe extern "C" fn bf_private_key_to_text(
	params: *const BfParams,
	key: *const BfPrivateKey,
) -> *mut c_char {
	if params.is_null() || key.is_null() {
		set_last_error("null pointer argument");
		return ptr::null_mut();
	}
	let text = ibe::codec::private_key_to_text(&(*params).0, &(*key).0);
	match CString::new(text) {
		Ok(s) => s.into_raw(),
		Err(_) => {
			set_last_error("private key text form contained an interior NUL");
			ptr::null_mut()
		}
	}
}

/// Parses the text form produced by [`bf_private_key_to_text`].
///
/// # Safety
/// `params`/`text` must be valid non-null pointers; `out` must be a
/// valid, non-null, writable pointer.
#[no_mangle]
pub unsafe extern "C" fn bf_private_key_from_text(
	params: *const BfParams,
	text: *const c_char,
	out: *mut *mut BfPrivateKey,
) -> BfFfiResult {
	if params.is_null() || text.is_null() || out.is_null() {
		set_last_error("null pointer argument");
		return BfFfiResult::InvalidInput;
	}
	let text = match CStr::from_ptr(text).to_str() {
		Ok(s) => s,
		Err(_) => {
			set_last_error("private key text is not valid UTF-8");
			return BfFfiResult::InvalidInput;
		}
	};
	match ibe::codec::private_key_from_text(&(*params).0, text) {
		Ok(key) => {
			*out = Box::into_raw(Box::new(BfPrivateKey(key)));
			clear_last_error();
			BfFfiResult::Success
		}
		Err(e) => fail(e),
	}
}

/// Returns the version of this crate (static, no need to free).
#[no_mangle]
pub unsafe extern "C" fn bf_get_version() -> *const c_char {
	static VERSION: &str = concat!(env!("CARGO_PKG_VERSION"), "\0");
	VERSION.as_ptr() as *const c_char
}

#[cfg(test)]
mod tests;
