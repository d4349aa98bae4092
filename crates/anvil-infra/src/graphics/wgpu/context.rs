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

//! Instance, adapter, device and surface set-up for one window.

use super::conversions::{present_mode, sample_count};
use anvil_core::renderer::RenderError;
use std::sync::Arc;
use winit::window::Window;

/// The `wgpu` objects bound to one window surface.
pub(super) struct GpuContext {
    pub surface: wgpu::Surface<'static>,
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
    pub config: wgpu::SurfaceConfiguration,
    pub sample_count: u32,
    pub supports_lines: bool,
}

impl GpuContext {
    /// Creates the surface for `window` and a device able to draw into it.
    ///
    /// ## Arguments
    /// * `window` - The window to present into. The surface keeps it alive.
    /// * `vsync` - Initial presentation mode.
    /// * `samples` - Requested sample count; anything above one asks for 4x MSAA.
    pub fn new(window: Arc<Window>, vsync: bool, samples: u32) -> Result<Self, RenderError> {
        let window_size = window.inner_size();

        // --- 1. Instance and surface ---
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor::default());
        let surface = instance
            .create_surface(window)
            .map_err(|e| RenderError::InitializationFailed(format!("surface: {e}")))?;

        // --- 2. Adapter ---
        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::HighPerformance,
            compatible_surface: Some(&surface),
            force_fallback_adapter: false,
        }))
        .map_err(|e| RenderError::InitializationFailed(format!("adapter: {e}")))?;
        let info = adapter.get_info();
        log::info!(
            "Selected graphics adapter: \"{}\" (Backend: {:?}, Device: {:?})",
            info.name,
            info.backend,
            info.device_type
        );

        // --- 3. Logical device and queue ---
        let supports_lines = adapter
            .features()
            .contains(wgpu::Features::POLYGON_MODE_LINE);
        let required_features = if supports_lines {
            wgpu::Features::POLYGON_MODE_LINE
        } else {
            wgpu::Features::empty()
        };
        let (device, queue) = pollster::block_on(adapter.request_device(&wgpu::DeviceDescriptor {
            label: Some("Anvil Logical Device"),
            required_features,
            required_limits: wgpu::Limits::downlevel_defaults().using_resolution(adapter.limits()),
            memory_hints: wgpu::MemoryHints::default(),
            trace: wgpu::Trace::Off,
        }))
        .map_err(|e| RenderError::InitializationFailed(format!("device: {e}")))?;
        device.on_uncaptured_error(Box::new(|e| {
            log::error!("WGPU Uncaptured Error: {e:?}");
        }));
        log::info!("Logical device and command queue created.");

        // --- 4. Surface configuration ---
        let caps = surface.get_capabilities(&adapter);
        let format = caps
            .formats
            .iter()
            .copied()
            .find(|f| f.is_srgb())
            .or_else(|| caps.formats.first().copied())
            .ok_or_else(|| {
                RenderError::InitializationFailed("surface reports no texture format".into())
            })?;
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: window_size.width.max(1),
            height: window_size.height.max(1),
            present_mode: present_mode(vsync),
            alpha_mode: caps
                .alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto),
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let mut sample_count = sample_count(samples);
        if sample_count > 1
            && !adapter
                .get_texture_format_features(format)
                .flags
                .sample_count_supported(sample_count)
        {
            log::warn!("{sample_count}x MSAA unsupported for {format:?}, rendering without it.");
            sample_count = 1;
        }
        log::info!(
            "Surface configured: {}x{} {format:?}, {sample_count} sample(s), vsync {vsync}.",
            config.width,
            config.height
        );

        Ok(Self {
            surface,
            device,
            queue,
            config,
            sample_count,
            supports_lines,
        })
    }

    /// Reconfigures the surface for a new window size. Zero sizes (minimized
    /// windows) are ignored.
    pub fn resize(&mut self, width: u32, height: u32) -> bool {
        if width == 0 || height == 0 || (width, height) == (self.config.width, self.config.height)
        {
            return false;
        }
        log::debug!("Resizing surface to {width}x{height}.");
        self.config.width = width;
        self.config.height = height;
        self.surface.configure(&self.device, &self.config);
        true
    }

    pub fn set_vsync(&mut self, vsync: bool) {
        self.config.present_mode = present_mode(vsync);
        self.surface.configure(&self.device, &self.config);
    }

    /// Reconfigures the surface after it was lost or outdated.
    pub fn reconfigure(&self) {
        self.surface.configure(&self.device, &self.config);
    }
}
