use str_newtype::StrNewType;

use super::is_vschar;

/// An OAuth 2.0 client identifier (borrowed).
///
/// Issued to the client by the authorization server at registration time
/// and sent with both the authorization request and the token request.
///
/// See: <https://datatracker.ietf.org/doc/html/rfc6749#section-2.2>
///
/// Unlike the other protocol strings in this crate, a client identifier may
/// be empty.
///
/// # Grammar
///
/// ```abnf
/// client-id = *VSCHAR
/// ```
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash, StrNewType)]
#[newtype(
	serde,
	owned(ClientIdBuf, derive(PartialEq, Eq, PartialOrd, Ord, Hash))
)]
pub struct ClientId(str);

impl ClientId {
	pub const fn validate_str(s: &str) -> bool {
		Self::validate_bytes(s.as_bytes())
	}

	pub const fn validate_bytes(bytes: &[u8]) -> bool {
		let mut i = 0;

		while i < bytes.len() {
			if !is_vschar(bytes[i]) {
				return false;
			}

			i += 1
		}

		true
	}
}

#[macro_export]
macro_rules! client_id {
	($value:literal) => {{
		match $crate::ClientId::new($value) {
			Ok(value) => value,
			Err(_) => panic!("invalid client identifier"),
		}
	}};
}
