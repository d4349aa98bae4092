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

use super::{Asset, AssetKind};

/// The pipeline stage a shader source is written for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShaderKind {
    /// Entry point `vs_main`, linked with the built-in fragment stage.
    Vertex,
    /// Entry point `fs_main`, linked with the built-in vertex stage.
    Fragment,
}

/// Shader source text and its stage. Compiled lazily by the renderer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shader {
    source: String,
    kind: ShaderKind,
}

impl Shader {
    /// Wraps WGSL source for `kind`.
    pub fn new(source: impl Into<String>, kind: ShaderKind) -> Self {
        Self {
            source: source.into(),
            kind,
        }
    }

    /// The WGSL source.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// The stage.
    pub fn kind(&self) -> ShaderKind {
        self.kind
    }
}

impl Asset for Shader {
    const KIND: AssetKind = AssetKind::Shader;
}
