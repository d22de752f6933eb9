//! URI query string and form encoding utilities.
use std::collections::BTreeMap;

use iref::{
	UriBuf,
	uri::{Query, QueryBuf},
};
use serde::Serialize;

/// Extends the query parameters of a URI by serializing `value` as
/// `application/x-www-form-urlencoded` and appending the result.
///
/// Existing query parameters on the URI are preserved and come first.
///
/// # Panics
///
/// Panics if `value` cannot be serialized as form-urlencoded data.
pub fn extend_uri_query<T: Serialize>(uri: &mut UriBuf, value: T) {
	let query = serialize_concat_query(
		uri.query().map(ToOwned::to_owned).unwrap_or_default(),
		value,
	);

	if !query.is_empty() {
		uri.set_query(Some(
			Query::new(&query)
				// UNWRAP SAFETY: `query` is already a valid query.
				.unwrap(),
		));
	}
}

/// Serializes `value` as form-urlencoded data and concatenates it with the
/// existing query string.
///
/// # Panics
///
/// Panics if `value` cannot be serialized as form-urlencoded data.
pub fn serialize_concat_query<T>(query: QueryBuf, value: T) -> QueryBuf
where
	T: Serialize,
{
	concat_query(
		query,
		&QueryBuf::new(serde_html_form::to_string(value).unwrap().into_bytes())
			// UNWRAP SAFETY: form-urlencoded output only contains
			//                characters allowed in a query.
			.unwrap(),
	)
}

/// Concatenates two query strings with `&` as separator.
///
/// If either query is empty, the other is returned as-is without a
/// separator.
pub fn concat_query(query: QueryBuf, other: &Query) -> QueryBuf {
	let mut query = query.into_string();

	if !query.is_empty() && !other.is_empty() {
		query.push('&')
	}

	query.push_str(other.as_str());

	// UNWRAP SAFETY: `&` joining two queries is a query.
	QueryBuf::new(query.into_bytes()).unwrap()
}

/// Splits a query or fragment string into its decoded parameters.
///
/// When a parameter appears more than once, the last value wins.
pub fn split_query(query: &str) -> BTreeMap<String, String> {
	form_urlencoded::parse(query.as_bytes())
		.into_owned()
		.collect()
}

/// Encodes a single value as `application/x-www-form-urlencoded`.
pub fn form_encode(value: &str) -> String {
	form_urlencoded::byte_serialize(value.as_bytes()).collect()
}
