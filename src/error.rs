use std::error::Error;
use std::convert::From;

use config::ConfigError;

quick_error! {
    #[derive(Debug)]
    /// The notes core's main error object.
    pub enum NError {
        Boxed(err: Box<dyn Error + Send + Sync>) {
            display("error: {}", err)
        }
        Msg(str: String) {
            description(str)
            display("error: {}", str)
        }
        /// The transport never got a response out of the service
        Network(str: String) {
            description(str)
            display("network error: {}", str)
        }
        /// The service answered with a non-2xx status
        Service(status: u16, msg: String) {
            description(msg)
            display("service error ({}): {}", status, msg)
        }
        Validation(model: String, errors: Vec<(String, String)>) {
            description("validation error")
            display("validation error: {}: {}", model, errors.iter()
                .map(|(field, msg)| format!("{} {}", field, msg))
                .collect::<Vec<_>>()
                .join(", "))
        }
        NotFound(id: String) {
            description(id)
            display("not found: {}", id)
        }
        Json(err: ::serde_json::Error) {
            cause(err)
            description("JSON error")
            display("JSON error: {}", err)
        }
        Config(err: ConfigError) {
            cause(err)
            description("config error")
            display("config error: {}", err)
        }
        MissingField(str: String) {
            description(str)
            display("missing field: {}", str)
        }
        MissingCommand(str: String) {
            description(str)
            display("unknown command: {}", str)
        }
    }
}

impl NError {
    /// Whether this error means the targeted note does not exist
    pub fn is_not_found(&self) -> bool {
        match *self {
            NError::NotFound(..) => true,
            NError::Service(404, ..) => true,
            _ => false,
        }
    }

    pub fn is_validation(&self) -> bool {
        match *self {
            NError::Validation(..) => true,
            _ => false,
        }
    }
}

/// Converts non-NError errors to NError via the From trait.
#[macro_export]
macro_rules! tonerr {
    ($e:expr) => (
        {
            let err: $crate::error::NError = From::from($e);
            err
        }
    )
}

/// Shorthand for returning an error that converts into NError
#[macro_export]
macro_rules! NErr {
    ($e:expr) => (Err(From::from($e)));
}

/// A macro to make it easy to create From impls for NError
macro_rules! from_err {
    ($t:ty) => (
        impl From<$t> for NError {
            fn from(err: $t) -> NError {
                NError::Boxed(Box::new(err))
            }
        }
    )
}

impl From<::serde_json::Error> for NError {
    fn from(err: ::serde_json::Error) -> NError {
        NError::Json(err)
    }
}
impl From<ConfigError> for NError {
    fn from(err: ConfigError) -> NError {
        NError::Config(err)
    }
}
from_err!(::std::io::Error);

pub type NResult<T> = Result<T, NError>;
