use str_newtype::StrNewType;

use super::is_vschar_string;

/// An OAuth 2.0 authorization code (borrowed).
///
/// Returned in the `code` parameter of the redirection URI and exchanged
/// exactly once at the token endpoint.
///
/// See: <https://datatracker.ietf.org/doc/html/rfc6749#section-4.1.2>
///
/// # Grammar
///
/// ```abnf
/// code = 1*VSCHAR
/// ```
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash, StrNewType)]
#[newtype(serde, owned(CodeBuf, derive(PartialEq, Eq, PartialOrd, Ord, Hash)))]
pub struct Code(str);

impl Code {
	pub const fn validate_str(s: &str) -> bool {
		Self::validate_bytes(s.as_bytes())
	}

	pub const fn validate_bytes(bytes: &[u8]) -> bool {
		is_vschar_string(bytes)
	}
}

#[macro_export]
macro_rules! code {
	($value:literal) => {{
		match $crate::Code::new($value) {
			Ok(value) => value,
			Err(_) => panic!("invalid authorization code"),
		}
	}};
}
