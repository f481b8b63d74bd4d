//! Strategy-level error types shared across phases, the request builder, and the hand-off.

// self
use crate::_prelude::*;

/// Crate-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Reason codes reported through the strategy's failure channel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureReason {
	/// Provider unreachable or timed out while initiating authentication.
	ConnectionFailed,
	/// OpenID round trip completed but did not report success.
	InvalidCredentials,
}
impl FailureReason {
	/// Returns the stable reason label surfaced to callers.
	pub const fn as_str(self) -> &'static str {
		match self {
			FailureReason::ConnectionFailed => "connection_failed",
			FailureReason::InvalidCredentials => "invalid_credentials",
		}
	}
}
impl Display for FailureReason {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Canonical strategy error exposed by public APIs.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Local configuration problem.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// Transport failure (DNS, TCP, TLS).
	#[error(transparent)]
	Transport(#[from] TransportError),

	/// Terminal authentication failure carrying a named reason code.
	///
	/// Protocol-level failures are terminal for the transaction; retries, if
	/// any, are the caller's responsibility.
	#[error("Authentication failed: {reason}.")]
	AuthenticationFailed {
		/// Reason code surfaced to the caller.
		reason: FailureReason,
	},
}
impl Error {
	/// Shorthand for the `connection_failed` terminal failure.
	pub const fn connection_failed() -> Self {
		Self::AuthenticationFailed { reason: FailureReason::ConnectionFailed }
	}

	/// Shorthand for the `invalid_credentials` terminal failure.
	pub const fn invalid_credentials() -> Self {
		Self::AuthenticationFailed { reason: FailureReason::InvalidCredentials }
	}

	/// Returns the reason code when the error is terminal for the transaction.
	pub const fn failure_reason(&self) -> Option<FailureReason> {
		match self {
			Self::AuthenticationFailed { reason } => Some(*reason),
			_ => None,
		}
	}
}

/// Configuration and validation failures raised by the strategy.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// Identifier endpoint cannot be parsed.
	#[error("Identifier endpoint is invalid.")]
	InvalidEndpoint {
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// Provider-relative or request-derived URL cannot be computed.
	#[error("Unable to derive the {target} URL.")]
	InvalidDerivedUrl {
		/// Which URL failed to derive.
		target: &'static str,
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// Path option is not absolute.
	#[error("The {option} option must start with `/`: {path}.")]
	RelativePath {
		/// Name of the offending descriptor option.
		option: &'static str,
		/// Path value that failed validation.
		path: String,
	},
	/// Consumer key configured without a matching secret.
	#[error("Consumer key is configured without a consumer secret.")]
	MissingConsumerSecret,
	/// Hand-off requested without configured consumer credentials.
	#[error("OAuth hand-off requires a configured consumer key and secret.")]
	MissingConsumerKey,
	/// Identifier parameter name is empty.
	#[error("Identifier parameter name cannot be empty.")]
	EmptyIdentifierParam,
}

/// Transport-level failures (network, IO).
#[derive(Debug, ThisError)]
pub enum TransportError {
	/// Underlying HTTP client reported a network failure.
	#[error("Network error occurred while calling the provider.")]
	Network {
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
	/// Underlying IO failure surfaced during transport.
	#[error("I/O error occurred while calling the provider.")]
	Io(#[from] std::io::Error),
}
impl TransportError {
	/// Wraps a transport-specific network error.
	pub fn network(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Network { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for TransportError {
	fn from(e: ReqwestError) -> Self {
		Self::network(e)
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn failure_reasons_have_stable_labels() {
		assert_eq!(FailureReason::ConnectionFailed.as_str(), "connection_failed");
		assert_eq!(FailureReason::InvalidCredentials.as_str(), "invalid_credentials");
	}

	#[test]
	fn terminal_errors_expose_their_reason() {
		assert_eq!(
			Error::connection_failed().failure_reason(),
			Some(FailureReason::ConnectionFailed),
		);
		assert_eq!(
			Error::invalid_credentials().failure_reason(),
			Some(FailureReason::InvalidCredentials),
		);
		assert_eq!(Error::from(ConfigError::MissingConsumerKey).failure_reason(), None);
	}
}
