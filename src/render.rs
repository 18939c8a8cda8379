use metaball_core::gpu::{pack_balls, FieldUniforms, GpuBall};
use metaball_core::{FieldBackend, FrameStats, FrameView, Plane, RenderError, FIELD_WGSL};
use web_sys as web;

// ===================== WebGPU field backend =====================

/// One canvas the field shader draws into.
struct Target {
    surface: wgpu::Surface<'static>,
    config: wgpu::SurfaceConfiguration,
    uniform_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
}

pub struct GpuState {
    device: wgpu::Device,
    queue: wgpu::Queue,
    bind_group_layout: wgpu::BindGroupLayout,
    slice_pipeline: wgpu::RenderPipeline,
    preview_pipeline: wgpu::RenderPipeline,
    ball_buffer: wgpu::Buffer,
    ball_capacity: usize,
    /// Slice targets in `Plane::index()` order.
    slices: Vec<Target>,
    preview: Target,
}

impl GpuState {
    /// Probe for an adapter before touching any canvas, so a failure leaves
    /// the canvases free for 2D contexts.
    pub async fn new(
        slice_canvases: &[web::HtmlCanvasElement; 3],
        preview_canvas: &web::HtmlCanvasElement,
    ) -> anyhow::Result<Self> {
        let instance = wgpu::Instance::default();
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: None,
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow::anyhow!("No WebGPU adapter"))?;
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::Performance,
                    label: Some("field_device"),
                },
                None,
            )
            .await
            .map_err(|e| anyhow::anyhow!(format!("request_device error: {:?}", e)))?;

        let mut surfaces = Vec::with_capacity(4);
        for canvas in slice_canvases.iter().chain(std::iter::once(preview_canvas)) {
            let surface = instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))?;
            surfaces.push((surface, canvas.width(), canvas.height()));
        }
        let caps = surfaces[0].0.get_capabilities(&adapter);
        // Shader output is already display-referred; avoid a second sRGB encode.
        let format = caps
            .formats
            .iter()
            .copied()
            .find(|f| !f.is_srgb())
            .or_else(|| caps.formats.first().copied())
            .ok_or_else(|| anyhow::anyhow!("surface reports no formats"))?;
        let alpha_mode = caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("field_shader"),
            source: wgpu::ShaderSource::Wgsl(FIELD_WGSL.into()),
        });
        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("field_bgl"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Storage { read_only: true },
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                },
            ],
        });
        let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("field_pl"),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });
        let slice_pipeline = make_field_pipeline(&device, &layout, &shader, "fs_slice", format);
        let preview_pipeline =
            make_field_pipeline(&device, &layout, &shader, "fs_preview", format);

        let ball_capacity = 16;
        let ball_buffer = create_ball_buffer(&device, ball_capacity);

        let mut targets = Vec::with_capacity(4);
        for (surface, width, height) in surfaces {
            let config = wgpu::SurfaceConfiguration {
                usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
                format,
                width: width.max(1),
                height: height.max(1),
                present_mode: wgpu::PresentMode::Fifo,
                alpha_mode,
                view_formats: vec![],
                desired_maximum_frame_latency: 2,
            };
            surface.configure(&device, &config);
            let uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
                label: Some("field_uniforms"),
                size: std::mem::size_of::<FieldUniforms>() as u64,
                usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
                mapped_at_creation: false,
            });
            let bind_group =
                create_bind_group(&device, &bind_group_layout, &uniform_buffer, &ball_buffer);
            targets.push(Target {
                surface,
                config,
                uniform_buffer,
                bind_group,
            });
        }
        let preview = targets
            .pop()
            .ok_or_else(|| anyhow::anyhow!("preview surface missing"))?;
        log::info!("WebGPU ready: {:?} ({:?})", adapter.get_info().name, format);

        Ok(Self {
            device,
            queue,
            bind_group_layout,
            slice_pipeline,
            preview_pipeline,
            ball_buffer,
            ball_capacity,
            slices: targets,
            preview,
        })
    }

    /// Upload the balls, growing the storage buffer (and the bind groups that
    /// reference it) when the scene outgrows it. The buffer always holds at
    /// least one element; `ball_count` tells the shader how many are live.
    fn upload_balls(&mut self, balls: &[GpuBall]) {
        if balls.len() > self.ball_capacity {
            self.ball_capacity = balls.len().next_power_of_two();
            self.ball_buffer = create_ball_buffer(&self.device, self.ball_capacity);
            for target in self.slices.iter_mut().chain(std::iter::once(&mut self.preview)) {
                target.bind_group = create_bind_group(
                    &self.device,
                    &self.bind_group_layout,
                    &target.uniform_buffer,
                    &self.ball_buffer,
                );
            }
        }
        if !balls.is_empty() {
            self.queue
                .write_buffer(&self.ball_buffer, 0, bytemuck::cast_slice(balls));
        }
    }

    fn draw(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        pipeline: &wgpu::RenderPipeline,
        target: &mut Target,
        uniforms: &FieldUniforms,
    ) -> Result<(), RenderError> {
        let (w, h) = (uniforms.viewport[0] as u32, uniforms.viewport[1] as u32);
        if w == 0 || h == 0 {
            return Ok(());
        }
        if w != target.config.width || h != target.config.height {
            target.config.width = w;
            target.config.height = h;
            target.surface.configure(device, &target.config);
        }
        queue.write_buffer(&target.uniform_buffer, 0, bytemuck::bytes_of(uniforms));

        let frame = match target.surface.get_current_texture() {
            Ok(frame) => frame,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                target.surface.configure(device, &target.config);
                return Err(RenderError::SurfaceLost);
            }
            Err(e) => return Err(RenderError::SurfaceUnavailable(format!("{:?}", e))),
        };
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("field_encoder"),
        });
        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("field_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::WHITE),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            rpass.set_pipeline(pipeline);
            rpass.set_bind_group(0, &target.bind_group, &[]);
            rpass.draw(0..3, 0..1);
        }
        queue.submit(Some(encoder.finish()));
        frame.present();
        Ok(())
    }
}

impl FieldBackend for GpuState {
    fn name(&self) -> &'static str {
        "webgpu"
    }

    fn render(&mut self, frame: &FrameView<'_>) -> Result<FrameStats, RenderError> {
        self.upload_balls(&pack_balls(frame.balls));
        // Every target is drawn even if an earlier one failed; the first
        // error is reported.
        let mut first_error = None;
        for plane in Plane::ALL {
            let uniforms = FieldUniforms::for_slice(frame, plane);
            let target = &mut self.slices[plane.index()];
            if let Err(e) = Self::draw(
                &self.device,
                &self.queue,
                &self.slice_pipeline,
                target,
                &uniforms,
            ) {
                first_error.get_or_insert(e);
            }
        }
        let camera = frame.camera.frame(&frame.bounds, frame.preview_viewport);
        let uniforms = FieldUniforms::for_preview(frame, &camera);
        if let Err(e) = Self::draw(
            &self.device,
            &self.queue,
            &self.preview_pipeline,
            &mut self.preview,
            &uniforms,
        ) {
            first_error.get_or_insert(e);
        }
        match first_error {
            Some(e) => Err(e),
            None => Ok(FrameStats::default()),
        }
    }
}

fn make_field_pipeline(
    device: &wgpu::Device,
    layout: &wgpu::PipelineLayout,
    shader: &wgpu::ShaderModule,
    frag_entry: &str,
    color_format: wgpu::TextureFormat,
) -> wgpu::RenderPipeline {
    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some(frag_entry),
        layout: Some(layout),
        vertex: wgpu::VertexState {
            module: shader,
            entry_point: Some("vs_fullscreen"),
            buffers: &[],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        },
        primitive: wgpu::PrimitiveState::default(),
        depth_stencil: None,
        multisample: wgpu::MultisampleState::default(),
        fragment: Some(wgpu::FragmentState {
            module: shader,
            entry_point: Some(frag_entry),
            targets: &[Some(wgpu::ColorTargetState {
                format: color_format,
                blend: Some(wgpu::BlendState::REPLACE),
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        }),
        cache: None,
        multiview: None,
    })
}

fn create_ball_buffer(device: &wgpu::Device, capacity: usize) -> wgpu::Buffer {
    device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("field_balls"),
        size: (capacity.max(1) * std::mem::size_of::<GpuBall>()) as u64,
        usage: wgpu::BufferUsages::STORAGE | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    })
}

fn create_bind_group(
    device: &wgpu::Device,
    layout: &wgpu::BindGroupLayout,
    uniforms: &wgpu::Buffer,
    balls: &wgpu::Buffer,
) -> wgpu::BindGroup {
    device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some("field_bg"),
        layout,
        entries: &[
            wgpu::BindGroupEntry {
                binding: 0,
                resource: uniforms.as_entire_binding(),
            },
            wgpu::BindGroupEntry {
                binding: 1,
                resource: balls.as_entire_binding(),
            },
        ],
    })
}
