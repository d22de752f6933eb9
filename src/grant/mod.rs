//! Grant-specific token request parameters.
//!
//! - [`authorization_code`]: Authorization Code Grant
//!   ([RFC 6749 Section 4.1.3](https://datatracker.ietf.org/doc/html/rfc6749#section-4.1.3)).
//! - [`refresh`]: Refreshing an Access Token
//!   ([RFC 6749 Section 6](https://datatracker.ietf.org/doc/html/rfc6749#section-6)).
pub mod authorization_code;
pub mod refresh;
