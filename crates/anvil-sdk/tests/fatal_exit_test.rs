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


//! `fatal::exit` ends the process, so it runs in a child copy of this test binary.

use anvil_core::audio::AudioError;
use anvil_sdk::{fatal, logging};
use anyhow::Result;
use std::process::Command;

const CHILD: &str = "ANVIL_FATAL_EXIT_CHILD";

#[test]
fn exit_logs_the_diagnostic_once() -> Result<()> {
    if std::env::var_os(CHILD).is_some() {
        logging::init();
        fatal::exit(&AudioError::DeviceUnavailable("no card".into()));
    }

    // --- 1. ARRANGE ---
    let mut child = Command::new(std::env::current_exe()?);
    child
        .args(["exit_logs_the_diagnostic_once", "--exact", "--nocapture"])
        .env(CHILD, "1")
        .env("RUST_LOG", "error");

    // --- 2. ACT ---
    let output = child.output()?;

    // --- 3. ASSERT ---
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert_eq!(output.status.code(), Some(fatal::EXIT_FAILURE), "{stderr}");
    assert_eq!(stderr.matches("error id: ERR-AUDIO-1").count(), 1, "{stderr}");
    assert_eq!(stderr.matches("[fatal]").count(), 1, "{stderr}");
    Ok(())
}
