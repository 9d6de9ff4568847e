//! Strongly typed identifiers for the values the service exchanges in clear text.

// std
use std::{borrow::Borrow, ops::Deref};
// self
use crate::_prelude::*;

macro_rules! def_id {
	($name:ident, $doc:literal, $kind:literal) => {
		#[doc = $doc]
		#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
		#[serde(try_from = "String", into = "String")]
		pub struct $name(String);
		impl $name {
			/// Creates a new identifier after validation.
			pub fn new(value: impl AsRef<str>) -> Result<Self, IdentifierError> {
				let view = value.as_ref();

				validate_view($kind, view)?;

				Ok(Self(view.to_owned()))
			}
		}
		impl Deref for $name {
			type Target = str;

			fn deref(&self) -> &Self::Target {
				&self.0
			}
		}
		impl AsRef<str> for $name {
			fn as_ref(&self) -> &str {
				&self.0
			}
		}
		impl From<$name> for String {
			fn from(value: $name) -> Self {
				value.0
			}
		}
		impl TryFrom<String> for $name {
			type Error = IdentifierError;

			fn try_from(value: String) -> Result<Self, Self::Error> {
				validate_view($kind, &value)?;

				Ok(Self(value))
			}
		}
		impl Borrow<str> for $name {
			fn borrow(&self) -> &str {
				&self.0
			}
		}
		impl Debug for $name {
			fn fmt(&self, f: &mut Formatter) -> FmtResult {
				write!(f, concat!($kind, "({})"), self.0)
			}
		}
		impl Display for $name {
			fn fmt(&self, f: &mut Formatter) -> FmtResult {
				f.write_str(&self.0)
			}
		}
		impl FromStr for $name {
			type Err = IdentifierError;

			fn from_str(s: &str) -> Result<Self, Self::Err> {
				Self::new(s)
			}
		}
	};
}

const IDENTIFIER_MAX_LEN: usize = 256;

/// Error returned when identifier validation fails.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, ThisError)]
pub enum IdentifierError {
	/// The identifier was empty.
	#[error("{kind} identifier cannot be empty.")]
	Empty {
		/// Kind of identifier (application, user code, logout token).
		kind: &'static str,
	},
	/// The identifier contains whitespace characters.
	#[error("{kind} identifier contains whitespace.")]
	ContainsWhitespace {
		/// Kind of identifier (application, user code, logout token).
		kind: &'static str,
	},
	/// The identifier exceeded the allowed character count.
	#[error("{kind} identifier exceeds {max} characters.")]
	TooLong {
		/// Kind of identifier (application, user code, logout token).
		kind: &'static str,
		/// Maximum permitted character count.
		max: usize,
	},
}

def_id! { AppId, "Static identifier naming the calling application to the service.", "AppId" }
def_id! { UserCode, "Short-lived code obtained out-of-band and exchanged for an access token.", "UserCode" }
def_id! { LogoutToken, "Single-use token that terminates a user's session server-side.", "LogoutToken" }

fn validate_view(kind: &'static str, view: &str) -> Result<(), IdentifierError> {
	if view.is_empty() {
		return Err(IdentifierError::Empty { kind });
	}
	if view.chars().any(char::is_whitespace) {
		return Err(IdentifierError::ContainsWhitespace { kind });
	}
	if view.len() > IDENTIFIER_MAX_LEN {
		return Err(IdentifierError::TooLong { kind, max: IDENTIFIER_MAX_LEN });
	}

	Ok(())
}

#[cfg(test)]
mod tests {
	// std
	use std::collections::HashMap;
	// self
	use super::*;

	#[test]
	fn identifiers_reject_whitespace_and_empties() {
		assert!(AppId::new(" app-123").is_err(), "Leading whitespace must be rejected.");
		assert!(AppId::new("app-123 ").is_err(), "Trailing whitespace must be rejected.");
		assert!(UserCode::new("").is_err());
		assert!(LogoutToken::new("with space").is_err());

		let app_id = AppId::new("app-123").expect("Application fixture should be valid.");

		assert_eq!(app_id.as_ref(), "app-123");
	}

	#[test]
	fn serde_round_trip_enforces_validation() {
		let payload = "\"code-42\"";
		let code: UserCode =
			serde_json::from_str(payload).expect("User code should deserialize successfully.");

		assert_eq!(code.as_ref(), "code-42");
		assert!(serde_json::from_str::<UserCode>("\"with space\"").is_err());
		assert!(serde_json::from_str::<UserCode>("\"\"").is_err());
	}

	#[test]
	fn unicode_whitespace_and_length_limits() {
		let nbsp = format!("code{}id", '\u{00A0}');

		assert!(UserCode::new(&nbsp).is_err());

		let exact = "a".repeat(IDENTIFIER_MAX_LEN);

		UserCode::new(&exact).expect("Exact length should succeed.");

		let too_long = "a".repeat(IDENTIFIER_MAX_LEN + 1);

		assert!(UserCode::new(&too_long).is_err());
	}

	#[test]
	fn borrow_supports_fast_lookup() {
		let map: HashMap<AppId, u8> = HashMap::from_iter([(
			AppId::new("app-123").expect("Application ID used for lookup should be valid."),
			7_u8,
		)]);

		assert_eq!(map.get("app-123"), Some(&7));
	}
}
