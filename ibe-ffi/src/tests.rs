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

//! Tests for the Boneh-Franklin FFI bindings.

use super::*;
use std::ptr;

unsafe fn setup(level: u8) -> (*mut BfParams, *mut BfSecret) {
	let mut params = ptr::null_mut();
	let mut secret = ptr::null_mut();
	let rc = bf_setup(level, &mut params, &mut secret);
	assert_eq!(rc, BfFfiResult::Success);
	(params, secret)
}

unsafe fn cstr_to_owned(ptr: *const std::os::raw::c_char) -> String {
	std::ffi::CStr::from_ptr(ptr).to_string_lossy().into_owned()
}

#[test]
fn setup_rejects_out_of_range_level() {
	unsafe {
		let mut params = ptr::null_mut();
		let mut secret = ptr::null_mut();
		let rc = bf_setup(7, &mut params, &mut secret);
		assert_eq!(rc, BfFfiResult::InvalidLevel);
		assert!(!bf_last_error().is_null());
	}
}

#[test]
fn setup_rejects_null_output_pointers() {
	unsafe {
		let mut secret = ptr::null_mut();
		let rc = bf_setup(3, ptr::null_mut(), &mut secret);
		assert_eq!(rc, BfFfiResult::InvalidInput);
	}
}

#[test]
fn full_round_trip_through_the_ffi_surface() {
	unsafe {
		let (params, secret) = setup(3);

		let id = b"alice@example.com";
		let mut public_key = ptr::null_mut();
		assert_eq!(
			bf_public_of(params, id.as_ptr(), id.len(), &mut public_key),
			BfFfiResult::Success
		);

		let mut private_key = ptr::null_mut();
		assert_eq!(
			bf_extract(params, secret, id.as_ptr(), id.len(), &mut private_key),
			BfFfiResult::Success
		);

		let plaintext = b"a message encrypted across the FFI boundary";
		let mut ciphertext = BfBuffer { data: ptr::null_mut(), len: 0 };
		assert_eq!(
			bf_encrypt(params, public_key, plaintext.as_ptr(), plaintext.len(), &mut ciphertext),
			BfFfiResult::Success
		);

		let mut recovered = BfBuffer { data: ptr::null_mut(), len: 0 };
		assert_eq!(
			bf_decrypt(params, private_key, ciphertext.data, ciphertext.len, &mut recovered),
			BfFfiResult::Success
		);
		let recovered_slice = std::slice::from_raw_parts(recovered.data, recovered.len);
		assert_eq!(recovered_slice, plaintext);

		bf_buffer_free(ciphertext);
		bf_buffer_free(recovered);
		bf_private_key_free(public_key);
		bf_private_key_free(private_key);
		bf_secret_free(secret);
		bf_params_free(params);
	}
}

#[test]
fn decrypting_with_the_wrong_identity_fails() {
	unsafe {
		let (params, secret) = setup(3);

		let mut alice_pub = ptr::null_mut();
		let alice = b"alice@example.com";
		bf_public_of(params, alice.as_ptr(), alice.len(), &mut alice_pub);

		let mut bob_key = ptr::null_mut();
		let bob = b"bob@example.com";
		bf_extract(params, secret, bob.as_ptr(), bob.len(), &mut bob_key);

		let plaintext = b"for alice's eyes only";
		let mut ciphertext = BfBuffer { data: ptr::null_mut(), len: 0 };
		bf_encrypt(params, alice_pub, plaintext.as_ptr(), plaintext.len(), &mut ciphertext);

		let mut recovered = BfBuffer { data: ptr::null_mut(), len: 0 };
		let rc = bf_decrypt(params, bob_key, ciphertext.data, ciphertext.len, &mut recovered);
		assert_eq!(rc, BfFfiResult::DecryptionInvalid);

		bf_buffer_free(ciphertext);
		bf_private_key_free(alice_pub);
		bf_private_key_free(bob_key);
		bf_secret_free(secret);
		bf_params_free(params);
	}
}

#[test]
fn params_and_secret_text_round_trip() {
	unsafe {
		let (params, secret) = setup(3);

		let params_text = bf_params_to_text(params);
		assert!(!params_text.is_null());
		let mut parsed_params = ptr::null_mut();
		assert_eq!(bf_params_from_text(params_text, &mut parsed_params), BfFfiResult::Success);

		let secret_text = bf_secret_to_text(secret);
		assert!(!secret_text.is_null());
		let mut parsed_secret = ptr::null_mut();
		assert_eq!(bf_secret_from_text(secret_text, &mut parsed_secret), BfFfiResult::Success);

		assert_eq!((*parsed_params).0.q, (*params).0.q);
		assert_eq!((*parsed_secret).0.value(), (*secret).0.value());

		bf_string_free(params_text);
		bf_string_free(secret_text);
		bf_params_free(params);
		bf_params_free(parsed_params);
		bf_secret_free(secret);
		bf_secret_free(parsed_secret);
	}
}

#[test]
fn shards_combine_through_the_ffi_surface() {
	unsafe {
		let (params_a, secret_a) = setup(3);
		let mut params_b = ptr::null_mut();
		let mut secret_b = ptr::null_mut();
		assert_eq!(
			bf_generate_shard(params_a, &mut params_b, &mut secret_b),
			BfFfiResult::Success
		);

		let mut joint = ptr::null_mut();
		assert_eq!(bf_add_public(params_a, params_b, &mut joint), BfFfiResult::Success);

		let mut joint_secret = ptr::null_mut();
		assert_eq!(
			bf_add_secret(joint, secret_a, secret_b, &mut joint_secret),
			BfFfiResult::Success
		);

		let id = b"carol@example.com";
		let mut public_key = ptr::null_mut();
		bf_public_of(joint, id.as_ptr(), id.len(), &mut public_key);
		let mut private_key = ptr::null_mut();
		bf_extract(joint, joint_secret, id.as_ptr(), id.len(), &mut private_key);

		let plaintext = b"shard test payload";
		let mut ciphertext = BfBuffer { data: ptr::null_mut(), len: 0 };
		bf_encrypt(joint, public_key, plaintext.as_ptr(), plaintext.len(), &mut ciphertext);
		let mut recovered = BfBuffer { data: ptr::null_mut(), len: 0 };
		let rc = bf_decrypt(joint, private_key, ciphertext.data, ciphertext.len, &mut recovered);
		assert_eq!(rc, BfFfiResult::Success);
		assert_eq!(std::slice::from_raw_parts(recovered.data, recovered.len), plaintext);

		bf_buffer_free(ciphertext);
		bf_buffer_free(recovered);
		bf_private_key_free(public_key);
		bf_private_key_free(private_key);
		bf_params_free(params_a);
		bf_params_free(params_b);
		bf_params_free(joint);
		bf_secret_free(secret_a);
		bf_secret_free(secret_b);
		bf_secret_free(joint_secret);
	}
}

#[test]
fn add_public_rejects_mismatched_levels() {
	unsafe {
		let (params_a, secret_a) = setup(3);
		let (params_b, secret_b) = setup(4);

		let mut joint = ptr::null_mut();
		let rc = bf_add_public(params_a, params_b, &mut joint);
		assert_eq!(rc, BfFfiResult::ShardMismatch);
		assert!(!bf_last_error().is_null());

		bf_params_free(params_a);
		bf_params_free(params_b);
		bf_secret_free(secret_a);
		bf_secret_free(secret_b);
	}
}

#[test]
fn decrypt_rejects_a_tampered_ciphertext() {
	unsafe {
		let (params, secret) = setup(3);
		let id = b"alice@example.com";
		let mut public_key = ptr::null_mut();
		bf_public_of(params, id.as_ptr(), id.len(), &mut public_key);
		let mut private_key = ptr::null_mut();
		bf_extract(params, secret, id.as_ptr(), id.len(), &mut private_key);

		let plaintext = b"tamper with me";
		let mut ciphertext = BfBuffer { data: ptr::null_mut(), len: 0 };
		bf_encrypt(params, public_key, plaintext.as_ptr(), plaintext.len(), &mut ciphertext);

		// flip a byte inside V/W (past the length+level+version+U header)
		let tampered = std::slice::from_raw_parts_mut(ciphertext.data, ciphertext.len);
		let last = tampered.len() - 1;
		tampered[last] ^= 0xff;

		let mut recovered = BfBuffer { data: ptr::null_mut(), len: 0 };
		let rc = bf_decrypt(params, private_key, ciphertext.data, ciphertext.len, &mut recovered);
		assert_eq!(rc, BfFfiResult::DecryptionInvalid);

		bf_buffer_free(ciphertext);
		bf_private_key_free(public_key);
		bf_private_key_free(private_key);
		bf_secret_free(secret);
		bf_params_free(params);
	}
}

#[test]
fn last_error_message_is_human_readable() {
	unsafe {
		let mut params = ptr::null_mut();
		let mut secret = ptr::null_mut();
		bf_setup(0, &mut params, &mut secret);
		let msg = cstr_to_owned(bf_last_error());
		assert!(msg.contains("security level"), "unexpected message: {msg}");
	}
}

#[test]
fn version_string_is_not_empty() {
	unsafe {
		let version = cstr_to_owned(bf_get_version());
		assert!(!version.is_empty());
	}
}
