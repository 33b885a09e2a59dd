//! Invocation error taxonomy.

/// Errors surfaced by the generic invocation engine.
///
/// Plain name lookups on [`ClassInfo`](crate::class::ClassInfo) are not
/// errors; `property` and `function` return `None` and callers are expected
/// to check. Invocation is where a missing name must be reported, and the
/// `dyn Any` slot model lets the engine also report the arity and type
/// mismatches that a raw-pointer erasure scheme would turn into undefined
/// behavior.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvokeError {
    /// Function name absent along the entire superclass chain
    FunctionNotFound { class: String, function: String },
    /// Caller supplied a different argument count than the function declares
    ArityMismatch {
        function: String,
        expected: usize,
        got: usize,
    },
    /// The instance is not of the type the invoker was registered for
    InstanceTypeMismatch { expected: &'static str },
    /// An argument slot held a different type than the parameter expects
    ArgumentTypeMismatch {
        index: usize,
        expected: &'static str,
    },
    /// The return slot does not match the function's concrete return type
    ReturnTypeMismatch { expected: &'static str },
}

impl std::fmt::Display for InvokeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InvokeError::FunctionNotFound { class, function } => {
                write!(f, "Function {}::{} not found", class, function)
            }
            InvokeError::ArityMismatch {
                function,
                expected,
                got,
            } => {
                write!(
                    f,
                    "Function {} expects {} argument(s), {} given",
                    function, expected, got
                )
            }
            InvokeError::InstanceTypeMismatch { expected } => {
                write!(f, "Instance is not a {}", expected)
            }
            InvokeError::ArgumentTypeMismatch { index, expected } => {
                write!(f, "Argument {} is not a {}", index, expected)
            }
            InvokeError::ReturnTypeMismatch { expected } => {
                write!(f, "Return slot is not a {}", expected)
            }
        }
    }
}

impl std::error::Error for InvokeError {}
