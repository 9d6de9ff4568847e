//! Redacted wrappers keeping secret material out of logs and debug output.

// self
use crate::_prelude::*;

macro_rules! def_secret {
	($name:ident, $doc:literal) => {
		#[doc = $doc]
		#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
		pub struct $name(String);
		impl $name {
			/// Wraps a new secret string.
			pub fn new(value: impl Into<String>) -> Self {
				Self(value.into())
			}

			/// Returns the inner value. Callers must avoid logging this string.
			pub fn expose(&self) -> &str {
				&self.0
			}
		}
		impl AsRef<str> for $name {
			fn as_ref(&self) -> &str {
				self.expose()
			}
		}
		impl Debug for $name {
			fn fmt(&self, f: &mut Formatter) -> FmtResult {
				f.debug_tuple(stringify!($name)).field(&"<redacted>").finish()
			}
		}
		impl Display for $name {
			fn fmt(&self, f: &mut Formatter) -> FmtResult {
				f.write_str("<redacted>")
			}
		}
	};
}

def_secret! { AppSecret, "Static secret authenticating the calling application to the service." }
def_secret! { AccessToken, "Bearer credential returned by the authorize exchange." }

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn secret_formatters_redact() {
		let secret = AppSecret::new("super-secret");
		let token = AccessToken::new("bearer-value");

		assert_eq!(format!("{secret:?}"), "AppSecret(\"<redacted>\")");
		assert_eq!(format!("{secret}"), "<redacted>");
		assert_eq!(format!("{token:?}"), "AccessToken(\"<redacted>\")");
		assert_eq!(token.expose(), "bearer-value");
	}

	#[test]
	fn secrets_serialize_as_plain_strings() {
		let token = AccessToken::new("bearer-value");
		let payload = serde_json::to_string(&token).expect("Token should serialize to JSON.");

		assert_eq!(payload, "\"bearer-value\"");

		let round_trip: AccessToken =
			serde_json::from_str(&payload).expect("Serialized token should deserialize.");

		assert_eq!(round_trip, token);
	}
}
