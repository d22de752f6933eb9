use str_newtype::StrNewType;

use super::is_nqchar;

/// A single OAuth 2.0 scope token (borrowed).
///
/// See: <https://datatracker.ietf.org/doc/html/rfc6749#section-3.3>
///
/// # Grammar
///
/// ```abnf
/// scope-token = 1*NQCHAR
/// ```
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash, StrNewType)]
#[newtype(
	serde,
	owned(ScopeTokenBuf, derive(PartialEq, Eq, PartialOrd, Ord, Hash))
)]
pub struct ScopeToken(str);

impl ScopeToken {
	pub const fn validate_str(s: &str) -> bool {
		Self::validate_bytes(s.as_bytes())
	}

	pub const fn validate_bytes(bytes: &[u8]) -> bool {
		let mut i = 0;

		while i < bytes.len() {
			if !is_nqchar(bytes[i]) {
				return false;
			}

			i += 1;
		}

		i > 0
	}
}

/// Conversion into the optional scope of an authorization request.
///
/// An empty token list means no scope is requested.
pub trait IntoScope {
	fn into_scope(self) -> Option<ScopeBuf>;
}

impl IntoScope for Option<ScopeBuf> {
	fn into_scope(self) -> Option<ScopeBuf> {
		self
	}
}

impl IntoScope for ScopeBuf {
	fn into_scope(self) -> Option<ScopeBuf> {
		Some(self)
	}
}

impl IntoScope for &Scope {
	fn into_scope(self) -> Option<ScopeBuf> {
		Some(self.to_owned())
	}
}

impl IntoScope for Vec<ScopeTokenBuf> {
	fn into_scope(self) -> Option<ScopeBuf> {
		ScopeBuf::from_tokens(self.iter().map(|t| t.as_scope_token()))
	}
}

impl IntoScope for &[ScopeTokenBuf] {
	fn into_scope(self) -> Option<ScopeBuf> {
		ScopeBuf::from_tokens(self.iter().map(|t| t.as_scope_token()))
	}
}

/// Access Token Scope: a space-delimited list of scope tokens.
///
/// The order of tokens does not matter to the protocol. An authorization
/// server may grant fewer tokens than requested, or list them in another
/// order.
///
/// See: <https://datatracker.ietf.org/doc/html/rfc6749#section-3.3>
///
/// # Grammar
///
/// ```abnf
/// scope       = scope-token *( SP scope-token )
/// scope-token = 1*NQCHAR
/// ```
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash, StrNewType)]
#[newtype(serde, owned(ScopeBuf, derive(PartialEq, Eq, PartialOrd, Ord, Hash)))]
pub struct Scope(str);

impl Scope {
	pub const fn validate_str(s: &str) -> bool {
		Self::validate_bytes(s.as_bytes())
	}

	pub const fn validate_bytes(bytes: &[u8]) -> bool {
		let mut i = 0;

		let mut expect_token = true;
		while expect_token {
			expect_token = false;
			let mut scope_token_empty = true;

			while i < bytes.len() {
				match bytes[i] {
					c if is_nqchar(c) => {
						scope_token_empty = false;
						i += 1;
					}
					b' ' => {
						expect_token = true;
						i += 1;
						break;
					}
					_ => return false,
				}
			}

			if scope_token_empty {
				return false;
			}
		}

		true
	}

	/// Returns `true` if this scope contains the given token.
	pub fn contains(&self, token: &ScopeToken) -> bool {
		self.iter().any(|t| t == token)
	}

	/// Returns an iterator over the individual scope tokens.
	pub fn iter(&self) -> ScopeIter<'_> {
		ScopeIter(self.0.split(' '))
	}
}

impl<'a> IntoIterator for &'a Scope {
	type IntoIter = ScopeIter<'a>;
	type Item = &'a ScopeToken;

	fn into_iter(self) -> Self::IntoIter {
		self.iter()
	}
}

#[macro_export]
macro_rules! scope {
	($value:literal) => {{
		match $crate::Scope::new($value) {
			Ok(value) => value,
			Err(_) => panic!("invalid scope"),
		}
	}};
}

/// Iterator over the [`ScopeToken`]s of a [`Scope`].
pub struct ScopeIter<'a>(std::str::Split<'a, char>);

impl<'a> Iterator for ScopeIter<'a> {
	type Item = &'a ScopeToken;

	fn next(&mut self) -> Option<Self::Item> {
		self.0.next().map(|t| unsafe {
			// SAFETY: a valid scope splits into valid scope tokens.
			ScopeToken::new_unchecked(t)
		})
	}
}

impl ScopeBuf {
	/// Joins scope tokens with spaces.
	///
	/// Returns `None` if the iterator yields no tokens.
	pub fn from_tokens<T>(tokens: impl IntoIterator<Item = T>) -> Option<Self>
	where
		T: AsRef<ScopeToken>,
	{
		let mut result = String::new();

		for token in tokens {
			if !result.is_empty() {
				result.push(' ');
			}

			result.push_str(token.as_ref().as_str());
		}

		if result.is_empty() {
			None
		} else {
			Some(Self(result))
		}
	}
}
