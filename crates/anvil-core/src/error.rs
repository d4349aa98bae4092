// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Subsystem-namespaced error codes and the structured diagnostic block printed
//! when a failure is escalated to fatal.

use std::fmt;

/// Namespace for failures raised by the runtime itself rather than a backend.
pub const RUNTIME_NAMESPACE: &str = "ANVILRUNTIME";

/// A stable identifier for an error condition, rendered as `ERR-<NAMESPACE>-<n>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ErrorCode {
    namespace: &'static str,
    number: u32,
}

impl ErrorCode {
    /// Creates a code in the given subsystem namespace.
    pub const fn new(namespace: &'static str, number: u32) -> Self {
        Self { namespace, number }
    }

    /// Creates a code in the runtime's own namespace.
    pub const fn runtime(number: u32) -> Self {
        Self::new(RUNTIME_NAMESPACE, number)
    }

    /// The subsystem namespace (e.g. `GRAPHICS`).
    pub fn namespace(&self) -> &'static str {
        self.namespace
    }

    /// The number within the namespace.
    pub fn number(&self) -> u32 {
        self.number
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ERR-{}-{}", self.namespace, self.number)
    }
}

/// An error that carries a stable [`ErrorCode`].
///
/// Every error type of the runtime implements this so that the application edge
/// can turn any of them into a [`Diagnostic`].
pub trait CodedError: std::error::Error {
    /// The stable code of this error.
    fn code(&self) -> ErrorCode;

    /// The component the error originated from. Defaults to the lowercased namespace.
    fn origin(&self) -> String {
        self.code().namespace().to_ascii_lowercase()
    }
}

/// How severe a reported condition is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    /// Unexpected but the runtime continues.
    Warning,
    /// An operation failed.
    Error,
    /// The process cannot continue.
    Fatal,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Severity::Warning => "warning",
            Severity::Error => "error",
            Severity::Fatal => "fatal",
        };
        f.write_str(label)
    }
}

/// A structured report of a failure: level, origin, description and stable code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// Severity of the report.
    pub severity: Severity,
    /// The component that failed.
    pub source: String,
    /// Human readable description, including the chain of underlying causes.
    pub description: String,
    /// Stable code.
    pub code: ErrorCode,
}

impl Diagnostic {
    /// Builds a diagnostic from any coded error, flattening its `source()` chain
    /// into the description.
    pub fn from_error<E: CodedError + ?Sized>(severity: Severity, error: &E) -> Self {
        let mut description = error.to_string();
        let mut cause = error.source();
        while let Some(inner) = cause {
            description.push_str(": ");
            description.push_str(&inner.to_string());
            cause = inner.source();
        }
        Self {
            severity,
            source: error.origin(),
            description,
            code: error.code(),
        }
    }

    /// Shorthand for a [`Severity::Fatal`] diagnostic.
    pub fn fatal<E: CodedError + ?Sized>(error: &E) -> Self {
        Self::from_error(Severity::Fatal, error)
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "[{}]", self.severity)?;
        writeln!(f, "source: {}", self.source)?;
        writeln!(f, "description: {}", self.description)?;
        write!(f, "error id: {}", self.code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, thiserror::Error)]
    #[error("device lost")]
    struct DeviceLost {
        #[source]
        cause: std::io::Error,
    }

    impl CodedError for DeviceLost {
        fn code(&self) -> ErrorCode {
            ErrorCode::new("GRAPHICS", 7)
        }
    }

    #[test]
    fn code_rendering() {
        assert_eq!(ErrorCode::new("AUDIO", 2).to_string(), "ERR-AUDIO-2");
        assert_eq!(ErrorCode::runtime(1).to_string(), "ERR-ANVILRUNTIME-1");
    }

    #[test]
    fn diagnostic_block_layout() {
        let error = DeviceLost {
            cause: std::io::Error::other("driver reset"),
        };
        let report = Diagnostic::fatal(&error);

        assert_eq!(report.source, "graphics");
        assert_eq!(report.description, "device lost: driver reset");
        assert_eq!(
            report.to_string(),
            "[fatal]\nsource: graphics\ndescription: device lost: driver reset\nerror id: ERR-GRAPHICS-7"
        );
    }
}
