use str_newtype::StrNewType;

use super::is_vschar_string;

/// Refresh Token.
///
/// Credential used to obtain a new access token once the current one
/// expires.
///
/// See: <https://datatracker.ietf.org/doc/html/rfc6749#section-1.5>
///
/// # Grammar
///
/// ```abnf
/// refresh-token = 1*VSCHAR
/// ```
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash, StrNewType)]
#[newtype(
	serde,
	owned(RefreshTokenBuf, derive(PartialEq, Eq, PartialOrd, Ord, Hash))
)]
pub struct RefreshToken(str);

impl RefreshToken {
	pub const fn validate_str(s: &str) -> bool {
		Self::validate_bytes(s.as_bytes())
	}

	pub const fn validate_bytes(bytes: &[u8]) -> bool {
		is_vschar_string(bytes)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn refresh_token_grammar() {
		assert!(RefreshToken::new("tGzv3JOkF0XG5Qx2TlKWIA").is_ok());
		assert!(RefreshTokenBuf::new("r1".to_owned()).is_ok());
		assert!(RefreshToken::new("").is_err());
		assert!(RefreshToken::new("\x1b[0m").is_err());
	}
}
