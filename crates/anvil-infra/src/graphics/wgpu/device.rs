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

use super::context::GpuContext;
use super::conversions::{clear_color, expand_to_rgba8};
use super::pipeline::{PipelineFactory, PipelineKey};
use super::DEFAULT_SHADER;
use anvil_core::asset::ShaderKind;
use anvil_core::math::Rgba;
use anvil_core::renderer::{
    BatchState, DrawList, GraphicsDevice, PixelFormat, ProgramHandle, RenderError, TextureHandle,
    Vertex,
};
use std::collections::HashMap;
use std::sync::Arc;
use winit::window::Window;

const INITIAL_VERTEX_CAPACITY: u64 = 4096;

struct GpuTexture {
    _texture: wgpu::Texture,
    bind_group: wgpu::BindGroup,
}

struct Program {
    kind: ShaderKind,
    module: wgpu::ShaderModule,
}

/// A [`GraphicsDevice`] presenting into a window through `wgpu`.
///
/// Every batch of the [`DrawList`] becomes one draw call in a single render pass.
/// Untextured batches sample a 1x1 white texture. Pipelines are created lazily per
/// (program, wireframe) pair.
pub struct WgpuDevice {
    window: Arc<Window>,
    context: GpuContext,
    factory: PipelineFactory,
    builtin: wgpu::ShaderModule,
    sampler: wgpu::Sampler,
    white: GpuTexture,
    msaa_view: Option<wgpu::TextureView>,
    pipelines: HashMap<PipelineKey, wgpu::RenderPipeline>,
    programs: HashMap<ProgramHandle, Program>,
    textures: HashMap<TextureHandle, GpuTexture>,
    vertex_buffer: wgpu::Buffer,
    vertex_capacity: u64,
    next_handle: u64,
}

impl WgpuDevice {
    /// Creates a device for `window`.
    ///
    /// # Errors
    /// [`RenderError::InitializationFailed`] if no adapter, device or surface could
    /// be created.
    pub fn new(window: Arc<Window>, vsync: bool, samples: u32) -> Result<Self, RenderError> {
        let context = GpuContext::new(window.clone(), vsync, samples)?;
        let device = &context.device;

        let factory = PipelineFactory::new(device, context.config.format, context.sample_count);
        let builtin = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Anvil Default Shader"),
            source: wgpu::ShaderSource::Wgsl(DEFAULT_SHADER.into()),
        });
        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("Anvil Sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Nearest,
            min_filter: wgpu::FilterMode::Linear,
            ..Default::default()
        });
        let white = create_gpu_texture(&context, &factory, &sampler, 1, 1, &[255; 4]);
        let vertex_buffer = create_vertex_buffer(device, INITIAL_VERTEX_CAPACITY);

        let mut this = Self {
            window,
            context,
            factory,
            builtin,
            sampler,
            white,
            msaa_view: None,
            pipelines: HashMap::new(),
            programs: HashMap::new(),
            textures: HashMap::new(),
            vertex_buffer,
            vertex_capacity: INITIAL_VERTEX_CAPACITY,
            next_handle: 1,
        };
        this.recreate_msaa_target();
        log::info!("WgpuDevice created.");
        Ok(this)
    }

    fn next_handle(&mut self) -> u64 {
        let handle = self.next_handle;
        self.next_handle += 1;
        handle
    }

    fn recreate_msaa_target(&mut self) {
        if self.context.sample_count <= 1 {
            self.msaa_view = None;
            return;
        }
        let texture = self.context.device.create_texture(&wgpu::TextureDescriptor {
            label: Some("Anvil MSAA Target"),
            size: wgpu::Extent3d {
                width: self.context.config.width,
                height: self.context.config.height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: self.context.sample_count,
            dimension: wgpu::TextureDimension::D2,
            format: self.context.config.format,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });
        self.msaa_view = Some(texture.create_view(&wgpu::TextureViewDescriptor::default()));
    }

    /// Follows the window size, which may have changed since the last frame.
    fn sync_surface_size(&mut self) {
        let size = self.window.inner_size();
        if self.context.resize(size.width, size.height) {
            self.recreate_msaa_target();
        }
    }

    fn module_for(
        &self,
        program: Option<ProgramHandle>,
        stage: ShaderKind,
    ) -> &wgpu::ShaderModule {
        match program.and_then(|h| self.programs.get(&h)) {
            Some(p) if p.kind == stage => &p.module,
            _ => &self.builtin,
        }
    }

    /// Wireframe batches fall back to filled triangles without line support.
    fn pipeline_key(&self, state: BatchState) -> PipelineKey {
        PipelineKey {
            program: state.program,
            wireframe: state.wireframe && self.context.supports_lines,
        }
    }

    fn ensure_pipeline(&mut self, key: PipelineKey) -> Result<(), RenderError> {
        if self.pipelines.contains_key(&key) {
            return Ok(());
        }
        if let Some(handle) = key.program {
            if !self.programs.contains_key(&handle) {
                return Err(RenderError::Device(format!("unknown program {handle:?}")));
            }
        }
        let pipeline = self.factory.create(
            &self.context.device,
            self.module_for(key.program, ShaderKind::Vertex),
            self.module_for(key.program, ShaderKind::Fragment),
            key.wireframe,
        );
        self.pipelines.insert(key, pipeline);
        Ok(())
    }

    fn ensure_vertex_capacity(&mut self, vertices: usize) {
        let needed = vertices as u64;
        if needed <= self.vertex_capacity {
            return;
        }
        let capacity = needed.next_power_of_two();
        log::debug!("Growing vertex buffer to {capacity} vertices.");
        self.vertex_buffer = create_vertex_buffer(&self.context.device, capacity);
        self.vertex_capacity = capacity;
    }

    fn acquire_frame(&self) -> Result<wgpu::SurfaceTexture, RenderError> {
        match self.context.surface.get_current_texture() {
            Ok(frame) => Ok(frame),
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                log::warn!("Surface lost or outdated, reconfiguring.");
                self.context.reconfigure();
                self.context
                    .surface
                    .get_current_texture()
                    .map_err(|e| RenderError::SurfaceUnavailable(e.to_string()))
            }
            Err(e) => Err(RenderError::SurfaceUnavailable(e.to_string())),
        }
    }

    fn record(&self, frame: &DrawList, target: &wgpu::TextureView) -> wgpu::CommandBuffer {
        let mut encoder =
            self.context
                .device
                .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                    label: Some("Anvil Frame Encoder"),
                });
        {
            let (view, resolve_target) = match &self.msaa_view {
                Some(msaa) => (msaa, Some(target)),
                None => (target, None),
            };
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Anvil Frame Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view,
                    depth_slice: None,
                    resolve_target,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(clear_color(
                            frame.clear_color.unwrap_or(Rgba::BLACK),
                        )),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                occlusion_query_set: None,
                timestamp_writes: None,
            });

            if !frame.vertices.is_empty() {
                let bytes = (frame.vertices.len() * std::mem::size_of::<Vertex>()) as u64;
                pass.set_vertex_buffer(0, self.vertex_buffer.slice(..bytes));
            }
            for batch in &frame.batches {
                let key = self.pipeline_key(batch.state);
                let (Some(pipeline), Some(texture)) = (
                    self.pipelines.get(&key),
                    match batch.state.texture {
                        Some(handle) => self.textures.get(&handle),
                        None => Some(&self.white),
                    },
                ) else {
                    continue;
                };
                pass.set_pipeline(pipeline);
                pass.set_bind_group(0, &texture.bind_group, &[]);
                pass.draw(
                    batch.first_vertex..batch.first_vertex + batch.vertex_count,
                    0..1,
                );
            }
        }
        encoder.finish()
    }
}

impl GraphicsDevice for WgpuDevice {
    fn surface_size(&self) -> (u32, u32) {
        let size = self.window.inner_size();
        (size.width, size.height)
    }

    fn compile_program(
        &mut self,
        source: &str,
        kind: ShaderKind,
    ) -> Result<ProgramHandle, RenderError> {
        let device = &self.context.device;
        device.push_error_scope(wgpu::ErrorFilter::Validation);
        let module = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Anvil User Shader"),
            source: wgpu::ShaderSource::Wgsl(source.into()),
        });
        // Linking against the built-in counterpart surfaces entry point and
        // interface mismatches now rather than at the first draw.
        let (vertex, fragment) = match kind {
            ShaderKind::Vertex => (&module, &self.builtin),
            ShaderKind::Fragment => (&self.builtin, &module),
        };
        let pipeline = self.factory.create(device, vertex, fragment, false);
        if let Some(error) = pollster::block_on(device.pop_error_scope()) {
            return Err(RenderError::ShaderCompilation {
                kind,
                details: error.to_string(),
            });
        }

        let handle = ProgramHandle(self.next_handle());
        self.pipelines.insert(
            PipelineKey {
                program: Some(handle),
                wireframe: false,
            },
            pipeline,
        );
        self.programs.insert(handle, Program { kind, module });
        log::debug!("Compiled {kind:?} program {handle:?}.");
        Ok(handle)
    }

    fn upload_texture(
        &mut self,
        width: u32,
        height: u32,
        format: PixelFormat,
        pixels: &[u8],
    ) -> Result<TextureHandle, RenderError> {
        let expected = width as usize * height as usize * format.bytes_per_pixel();
        if pixels.len() != expected || expected == 0 {
            return Err(RenderError::InvalidTextureData {
                expected,
                actual: pixels.len(),
            });
        }
        let rgba = expand_to_rgba8(format, pixels);
        let texture = create_gpu_texture(
            &self.context,
            &self.factory,
            &self.sampler,
            width,
            height,
            &rgba,
        );
        let handle = TextureHandle(self.next_handle());
        self.textures.insert(handle, texture);
        Ok(handle)
    }

    fn release_texture(&mut self, handle: TextureHandle) {
        self.textures.remove(&handle);
    }

    fn set_vsync(&mut self, enabled: bool) {
        self.context.set_vsync(enabled);
    }

    fn supports_wireframe(&self) -> bool {
        self.context.supports_lines
    }

    fn present(&mut self, frame: &DrawList) -> Result<(), RenderError> {
        self.sync_surface_size();

        for batch in &frame.batches {
            if let Some(handle) = batch.state.texture {
                if !self.textures.contains_key(&handle) {
                    return Err(RenderError::UnknownTexture(handle));
                }
            }
            self.ensure_pipeline(self.pipeline_key(batch.state))?;
        }
        self.ensure_vertex_capacity(frame.vertices.len());

        let output = self.acquire_frame()?;
        let target = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        self.context.device.push_error_scope(wgpu::ErrorFilter::Validation);
        if !frame.vertices.is_empty() {
            self.context.queue.write_buffer(
                &self.vertex_buffer,
                0,
                bytemuck::cast_slice(&frame.vertices),
            );
        }
        let commands = self.record(frame, &target);
        self.context.queue.submit(std::iter::once(commands));
        output.present();

        match pollster::block_on(self.context.device.pop_error_scope()) {
            Some(error) => Err(RenderError::Device(error.to_string())),
            None => Ok(()),
        }
    }
}

impl std::fmt::Debug for WgpuDevice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WgpuDevice")
            .field("format", &self.context.config.format)
            .field("size", &(self.context.config.width, self.context.config.height))
            .field("sample_count", &self.context.sample_count)
            .field("programs", &self.programs.len())
            .field("textures", &self.textures.len())
            .finish()
    }
}

fn create_vertex_buffer(device: &wgpu::Device, vertices: u64) -> wgpu::Buffer {
    device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("Anvil Vertex Buffer"),
        size: vertices * std::mem::size_of::<Vertex>() as u64,
        usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    })
}

fn create_gpu_texture(
    context: &GpuContext,
    factory: &PipelineFactory,
    sampler: &wgpu::Sampler,
    width: u32,
    height: u32,
    rgba: &[u8],
) -> GpuTexture {
    let size = wgpu::Extent3d {
        width,
        height,
        depth_or_array_layers: 1,
    };
    let texture = context.device.create_texture(&wgpu::TextureDescriptor {
        label: Some("Anvil Texture"),
        size,
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: wgpu::TextureFormat::Rgba8UnormSrgb,
        usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
        view_formats: &[],
    });
    context.queue.write_texture(
        wgpu::TexelCopyTextureInfo {
            texture: &texture,
            mip_level: 0,
            origin: wgpu::Origin3d::ZERO,
            aspect: wgpu::TextureAspect::All,
        },
        rgba,
        wgpu::TexelCopyBufferLayout {
            offset: 0,
            bytes_per_row: Some(4 * width),
            rows_per_image: Some(height),
        },
        size,
    );
    let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
    let bind_group = context.device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some("Anvil Texture Bind Group"),
        layout: &factory.bind_group_layout,
        entries: &[
            wgpu::BindGroupEntry {
                binding: 0,
                resource: wgpu::BindingResource::TextureView(&view),
            },
            wgpu::BindGroupEntry {
                binding: 1,
                resource: wgpu::BindingResource::Sampler(sampler),
            },
        ],
    });
    GpuTexture {
        _texture: texture,
        bind_group,
    }
}
