use base64::{Engine, prelude::BASE64_URL_SAFE_NO_PAD};
use rand::{RngExt, rng};
use str_newtype::StrNewType;

use super::is_vschar_string;

/// An OAuth 2.0 state parameter (borrowed).
///
/// The state parameter is an opaque value used to maintain state between an
/// authorization request and callback, primarily for CSRF protection.
///
/// See: <https://datatracker.ietf.org/doc/html/rfc6749#section-10.12>
///
/// # Grammar
///
/// ```abnf
/// state = 1*VSCHAR
/// ```
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash, StrNewType)]
#[newtype(serde, owned(StateBuf, derive(PartialEq, Eq, PartialOrd, Ord, Hash)))]
pub struct State(str);

impl State {
	/// Validates that the given string is a well-formed state value.
	pub const fn validate_str(s: &str) -> bool {
		Self::validate_bytes(s.as_bytes())
	}

	/// Validates that the given byte slice is a well-formed state value.
	pub const fn validate_bytes(bytes: &[u8]) -> bool {
		is_vschar_string(bytes)
	}

	/// Checks the value echoed back in a redirection URI against this state.
	///
	/// The comparison is exact: no case folding, trimming or decoding.
	pub fn matches(&self, received: &str) -> bool {
		self.as_str().as_bytes() == received.as_bytes()
	}
}

impl StateBuf {
	/// Number of random bytes in a generated state value.
	pub const RANDOM_LEN: u32 = 16;

	/// Generates a new random, base64url-encoded 128-bit CSRF token.
	pub fn new_random() -> Self {
		Self::new_random_len(Self::RANDOM_LEN)
	}

	/// Generates a new random, base64url-encoded CSRF token from `len`
	/// random bytes.
	///
	/// # Panics
	///
	/// Panics if `len` is zero.
	pub fn new_random_len(len: u32) -> Self {
		assert!(len > 0);
		let random_bytes: Vec<u8> = (0..len).map(|_| rng().random::<u8>()).collect();
		unsafe {
			// SAFETY: base64url output of at least one byte is a non-empty
			//         VSCHAR string.
			Self::new_unchecked(BASE64_URL_SAFE_NO_PAD.encode(random_bytes))
		}
	}
}
