use displaydoc::Display;

/// A specialized result type for the hatlight programs.
pub type Result<T> = core::result::Result<T, Error>;

/// Errors that can occur while fetching data or driving the display.
#[derive(Clone, PartialEq, Eq, Display, Debug)]
pub enum Error {
    /// The WSDOT access token is missing, set the `WSDOT_API_TOKEN` environment variable.
    MissingCredential,
    /// Network request failed: {0}
    Network(String),
    /// Unable to decode the response payload: {0}
    Decode(String),
    /// Display device error: {0}
    Device(String),
}

impl Error {
    /// Creates a new network error.
    pub fn network<E>(err: E) -> Self
    where
        E: core::fmt::Display,
    {
        Self::Network(err.to_string())
    }

    /// Creates a new decode data error.
    pub fn decode<E>(err: E) -> Self
    where
        E: core::fmt::Display,
    {
        Self::Decode(err.to_string())
    }

    pub fn device<E>(err: E) -> Self
    where
        E: core::fmt::Display,
    {
        Self::Device(err.to_string())
    }
}

impl std::error::Error for Error {}
