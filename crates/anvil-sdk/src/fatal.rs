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

//! Reporting of unrecoverable errors at the application edge.
//!
//! Libraries of the runtime never terminate the process; they return typed errors.
//! A binary that decides an error is fatal hands it to [`exit`], which logs a
//! [`Diagnostic`] and ends the process with status 1.

use anvil_core::asset::AssetError;
use anvil_core::audio::AudioError;
use anvil_core::config::ConfigError;
use anvil_core::error::{CodedError, Diagnostic, ErrorCode, Severity};
use anvil_core::renderer::RenderError;
use anvil_infra::PlatformError;

/// Exit status used for fatal errors.
pub const EXIT_FAILURE: i32 = 1;

/// Code reported for errors that carry none of their own.
pub const UNCLASSIFIED: ErrorCode = ErrorCode::runtime(1);

/// Logs the fatal diagnostic of `error` and terminates the process.
pub fn exit<E: CodedError + ?Sized>(error: &E) -> ! {
    terminate(Diagnostic::fatal(error))
}

/// Like [`exit`], for an [`anyhow::Error`] wrapping one of the runtime's errors.
pub fn exit_with(error: &anyhow::Error) -> ! {
    terminate(diagnose(error))
}

/// Logs the fatal diagnostic of `error` at `error` level and returns it.
pub fn report<E: CodedError + ?Sized>(error: &E) -> Diagnostic {
    let diagnostic = Diagnostic::fatal(error);
    log::error!("{diagnostic}");
    diagnostic
}

/// Builds the fatal diagnostic of an [`anyhow::Error`].
///
/// The first error in the chain that belongs to the runtime supplies the code and
/// origin; the description always covers the whole chain. Errors foreign to the
/// runtime are reported under [`UNCLASSIFIED`].
pub fn diagnose(error: &anyhow::Error) -> Diagnostic {
    let mut diagnostic = match error.chain().find_map(coded) {
        Some(coded) => Diagnostic::fatal(coded),
        None => Diagnostic {
            severity: Severity::Fatal,
            source: "anvil".to_string(),
            description: String::new(),
            code: UNCLASSIFIED,
        },
    };
    diagnostic.description = format!("{error:#}");
    diagnostic
}

fn coded<'a>(error: &'a (dyn std::error::Error + 'static)) -> Option<&'a dyn CodedError> {
    if let Some(e) = error.downcast_ref::<PlatformError>() {
        return Some(e);
    }
    if let Some(e) = error.downcast_ref::<RenderError>() {
        return Some(e);
    }
    if let Some(e) = error.downcast_ref::<AssetError>() {
        return Some(e);
    }
    if let Some(e) = error.downcast_ref::<AudioError>() {
        return Some(e);
    }
    error.downcast_ref::<ConfigError>().map(|e| e as &dyn CodedError)
}

fn terminate(diagnostic: Diagnostic) -> ! {
    log::error!("{diagnostic}");
    log::logger().flush();
    std::process::exit(EXIT_FAILURE)
}

/// Escalates an `Err` to a fatal exit.
pub trait OrExit<T> {
    /// Returns the `Ok` value, or reports the error and terminates the process.
    fn or_exit(self) -> T;
}

impl<T, E: CodedError> OrExit<T> for Result<T, E> {
    fn or_exit(self) -> T {
        match self {
            Ok(value) => value,
            Err(error) => exit(&error),
        }
    }
}
