use fnv::FnvHashMap;
use glam::Mat4;
use hollow_core::constants::{FOG_COLOR, FOG_DENSITY};
use hollow_core::mesh::{self, Vertex};
use hollow_core::{Material, Mesh, PixelCanvas, Scene};
use std::num::NonZeroU64;
use web_sys as web;
use wgpu::util::DeviceExt;

// Per-draw uniforms live in one buffer at this stride (WebGPU's minimum
// dynamic offset alignment).
const DRAW_STRIDE: u64 = 256;
const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth24Plus;

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct GlobalsUniform {
    view: [[f32; 4]; 4],
    proj: [[f32; 4]; 4],
    fog: [f32; 4],
}

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct DrawUniform {
    model: [[f32; 4]; 4],
    tint: [f32; 4],
    uv_repeat: [f32; 4],
}

/// Meshes are keyed by their exact parameters so identical shapes share buffers.
type MeshKey = (u8, [u32; 4]);

fn mesh_key(mesh: &Mesh) -> MeshKey {
    let b = f32::to_bits;
    match *mesh {
        Mesh::Cuboid { width, height, depth } => (0, [b(width), b(height), b(depth), 0]),
        Mesh::Plane { width, height } => (1, [b(width), b(height), 0, 0]),
        Mesh::Sphere { radius, segments, rings, theta_length } => {
            (2, [b(radius), segments, rings, b(theta_length)])
        }
        Mesh::Cylinder { radius_top, radius_bottom, height, segments } => {
            (3, [b(radius_top), b(radius_bottom), b(height), segments])
        }
        Mesh::Cone { radius, height, segments } => (4, [b(radius), b(height), segments, 0]),
        Mesh::Icosahedron { radius } => (5, [b(radius), 0, 0, 0]),
        Mesh::Disc { radius, segments } => (6, [b(radius), segments, 0, 0]),
    }
}

#[inline]
fn srgb_to_linear(c: f32) -> f32 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

struct GpuMesh {
    vertices: wgpu::Buffer,
    indices: wgpu::Buffer,
    index_count: u32,
}

struct GpuTexture {
    texture: wgpu::Texture,
    bind_group: wgpu::BindGroup,
    version: u64,
}

pub struct GpuState {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    opaque_pipeline: wgpu::RenderPipeline,
    translucent_pipeline: wgpu::RenderPipeline,
    globals_buffer: wgpu::Buffer,
    globals_bind_group: wgpu::BindGroup,
    draw_bgl: wgpu::BindGroupLayout,
    draw_buffer: wgpu::Buffer,
    draw_bind_group: wgpu::BindGroup,
    draw_capacity: u64,
    textures: Vec<GpuTexture>,
    white: wgpu::BindGroup,
    meshes: FnvHashMap<MeshKey, GpuMesh>,
    depth_view: wgpu::TextureView,
    width: u32,
    height: u32,
    fog_linear: [f32; 3],
}

impl GpuState {
    pub async fn new(canvas: &web::HtmlCanvasElement, scene: &Scene) -> anyhow::Result<Self> {
        let width = canvas.width().max(1);
        let height = canvas.height().max(1);

        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::LowPower,
                compatible_surface: Some(&surface),
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
                    label: None,
                },
                None,
            )
            .await
            .map_err(|e| anyhow::anyhow!(format!("request_device error: {:?}", e)))?;
        let caps = surface.get_capabilities(&adapter);
        let format = caps
            .formats
            .iter()
            .copied()
            .find(|f| {
                matches!(
                    f,
                    wgpu::TextureFormat::Bgra8UnormSrgb | wgpu::TextureFormat::Rgba8UnormSrgb
                )
            })
            .or_else(|| caps.formats.first().copied())
            .ok_or_else(|| anyhow::anyhow!("surface reports no formats"))?;
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width,
            height,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: caps
                .alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto),
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);
        log::info!("[gpu] surface {}x{} {:?}", width, height, format);

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("scene_shader"),
            source: wgpu::ShaderSource::Wgsl(hollow_core::SCENE_WGSL.into()),
        });

        let globals_bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("globals_bgl"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });
        let draw_bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("draw_bgl"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: true,
                    min_binding_size: NonZeroU64::new(std::mem::size_of::<DrawUniform>() as u64),
                },
                count: None,
            }],
        });
        let texture_bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("texture_bgl"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                        view_dimension: wgpu::TextureViewDimension::D2,
                        multisampled: false,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        });

        let globals_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("globals"),
            size: std::mem::size_of::<GlobalsUniform>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let globals_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("globals_bg"),
            layout: &globals_bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: globals_buffer.as_entire_binding(),
            }],
        });
        let draw_capacity = (scene.len() as u64).next_power_of_two().max(64);
        let (draw_buffer, draw_bind_group) = make_draw_buffer(&device, &draw_bgl, draw_capacity);

        // Nearest filtering keeps texels square; repeat handles tiled grass/brick.
        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("pixel_sampler"),
            address_mode_u: wgpu::AddressMode::Repeat,
            address_mode_v: wgpu::AddressMode::Repeat,
            address_mode_w: wgpu::AddressMode::Repeat,
            mag_filter: wgpu::FilterMode::Nearest,
            min_filter: wgpu::FilterMode::Nearest,
            mipmap_filter: wgpu::FilterMode::Nearest,
            ..Default::default()
        });

        let mut white_canvas = PixelCanvas::new(1, 1)?;
        white_canvas.fill([255; 4]);
        let white_tex = upload_texture(&device, &queue, &texture_bgl, &sampler, "white", &white_canvas);
        let textures = scene
            .textures()
            .iter()
            .map(|c| upload_texture(&device, &queue, &texture_bgl, &sampler, "canvas", c))
            .collect::<Vec<_>>();

        let mut meshes: FnvHashMap<MeshKey, GpuMesh> = FnvHashMap::default();
        for node in scene.nodes() {
            if let Some(m) = &node.mesh {
                meshes
                    .entry(mesh_key(m))
                    .or_insert_with(|| upload_mesh(&device, m));
            }
        }
        log::info!(
            "[gpu] uploaded {} meshes, {} textures",
            meshes.len(),
            textures.len()
        );

        let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("scene_layout"),
            bind_group_layouts: &[&globals_bgl, &draw_bgl, &texture_bgl],
            push_constant_ranges: &[],
        });
        let opaque_pipeline = make_scene_pipeline(
            &device,
            &layout,
            &shader,
            format,
            Some(wgpu::BlendState::REPLACE),
            true,
        );
        let translucent_pipeline = make_scene_pipeline(
            &device,
            &layout,
            &shader,
            format,
            Some(wgpu::BlendState::ALPHA_BLENDING),
            false,
        );

        let depth_view = make_depth_view(&device, width, height);

        Ok(Self {
            surface,
            device,
            queue,
            config,
            opaque_pipeline,
            translucent_pipeline,
            globals_buffer,
            globals_bind_group,
            draw_bgl,
            draw_buffer,
            draw_bind_group,
            draw_capacity,
            textures,
            white: white_tex.bind_group,
            meshes,
            depth_view,
            width,
            height,
            fog_linear: FOG_COLOR.map(srgb_to_linear),
        })
    }

    pub fn aspect(&self) -> f32 {
        self.width as f32 / self.height.max(1) as f32
    }

    pub fn resize_if_needed(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        if width != self.width || height != self.height {
            self.width = width;
            self.height = height;
            self.reconfigure();
        }
    }

    /// Re-apply the surface configuration, e.g. after the surface was lost.
    pub fn reconfigure(&mut self) {
        self.config.width = self.width;
        self.config.height = self.height;
        self.surface.configure(&self.device, &self.config);
        self.depth_view = make_depth_view(&self.device, self.width, self.height);
    }

    /// Re-upload every canvas whose version moved since the last frame.
    fn sync_textures(&mut self, scene: &Scene) {
        for (gpu, canvas) in self.textures.iter_mut().zip(scene.textures()) {
            if gpu.version != canvas.version() {
                write_canvas(&self.queue, &gpu.texture, canvas);
                gpu.version = canvas.version();
            }
        }
    }

    fn ensure_draw_capacity(&mut self, draws: u64) {
        if draws <= self.draw_capacity {
            return;
        }
        self.draw_capacity = draws.next_power_of_two();
        let (buffer, bind_group) = make_draw_buffer(&self.device, &self.draw_bgl, self.draw_capacity);
        self.draw_buffer = buffer;
        self.draw_bind_group = bind_group;
    }

    pub fn render(&mut self, scene: &Scene, view: Mat4, proj: Mat4) -> Result<(), wgpu::SurfaceError> {
        self.sync_textures(scene);

        let world = scene.world_matrices();
        // Opaque first, then translucent so blending sees what is behind it.
        let mut order: Vec<usize> = Vec::with_capacity(scene.len());
        let nodes = scene.nodes();
        order.extend((0..nodes.len()).filter(|&i| nodes[i].mesh.is_some() && !nodes[i].material.is_translucent()));
        let first_translucent = order.len();
        order.extend((0..nodes.len()).filter(|&i| nodes[i].mesh.is_some() && nodes[i].material.is_translucent()));

        self.ensure_draw_capacity(order.len() as u64);
        let mut staging = vec![0u8; order.len() * DRAW_STRIDE as usize];
        for (slot, &i) in order.iter().enumerate() {
            let (tint, uv_repeat) = match nodes[i].material {
                Material::Color { rgb, opacity } => (
                    [
                        srgb_to_linear(rgb[0]),
                        srgb_to_linear(rgb[1]),
                        srgb_to_linear(rgb[2]),
                        opacity,
                    ],
                    [1.0, 1.0, 0.0, 0.0],
                ),
                Material::Textured(t) => {
                    let r = scene.texture(t).repeat;
                    ([1.0; 4], [r.x, r.y, 0.0, 0.0])
                }
            };
            let u = DrawUniform {
                model: world[i].to_cols_array_2d(),
                tint,
                uv_repeat,
            };
            let at = slot * DRAW_STRIDE as usize;
            staging[at..at + std::mem::size_of::<DrawUniform>()]
                .copy_from_slice(bytemuck::bytes_of(&u));
        }
        if !staging.is_empty() {
            self.queue.write_buffer(&self.draw_buffer, 0, &staging);
        }
        let globals = GlobalsUniform {
            view: view.to_cols_array_2d(),
            proj: proj.to_cols_array_2d(),
            fog: [self.fog_linear[0], self.fog_linear[1], self.fog_linear[2], FOG_DENSITY],
        };
        self.queue
            .write_buffer(&self.globals_buffer, 0, bytemuck::bytes_of(&globals));

        let frame = self.surface.get_current_texture()?;
        let target = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("encoder"),
            });
        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("scene_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &target,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: self.fog_linear[0] as f64,
                            g: self.fog_linear[1] as f64,
                            b: self.fog_linear[2] as f64,
                            a: 1.0,
                        }),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            rpass.set_pipeline(&self.opaque_pipeline);
            rpass.set_bind_group(0, &self.globals_bind_group, &[]);
            for (slot, &i) in order.iter().enumerate() {
                if slot == first_translucent {
                    rpass.set_pipeline(&self.translucent_pipeline);
                }
                let node = &nodes[i];
                let Some(mesh) = node.mesh.as_ref().and_then(|m| self.meshes.get(&mesh_key(m))) else {
                    continue;
                };
                let texture = match node.material {
                    Material::Textured(t) => match self.textures.get(t.0) {
                        Some(gpu) => &gpu.bind_group,
                        None => &self.white,
                    },
                    Material::Color { .. } => &self.white,
                };
                rpass.set_bind_group(1, &self.draw_bind_group, &[(slot as u64 * DRAW_STRIDE) as u32]);
                rpass.set_bind_group(2, texture, &[]);
                rpass.set_vertex_buffer(0, mesh.vertices.slice(..));
                rpass.set_index_buffer(mesh.indices.slice(..), wgpu::IndexFormat::Uint32);
                rpass.draw_indexed(0..mesh.index_count, 0, 0..1);
            }
        }
        self.queue.submit(Some(encoder.finish()));
        frame.present();
        Ok(())
    }
}

fn make_draw_buffer(
    device: &wgpu::Device,
    layout: &wgpu::BindGroupLayout,
    capacity: u64,
) -> (wgpu::Buffer, wgpu::BindGroup) {
    let buffer = device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("draws"),
        size: capacity * DRAW_STRIDE,
        usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    });
    let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some("draws_bg"),
        layout,
        entries: &[wgpu::BindGroupEntry {
            binding: 0,
            resource: wgpu::BindingResource::Buffer(wgpu::BufferBinding {
                buffer: &buffer,
                offset: 0,
                size: NonZeroU64::new(std::mem::size_of::<DrawUniform>() as u64),
            }),
        }],
    });
    (buffer, bind_group)
}

fn make_depth_view(device: &wgpu::Device, width: u32, height: u32) -> wgpu::TextureView {
    device
        .create_texture(&wgpu::TextureDescriptor {
            label: Some("depth"),
            size: wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: DEPTH_FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        })
        .create_view(&wgpu::TextureViewDescriptor::default())
}

fn upload_mesh(device: &wgpu::Device, m: &Mesh) -> GpuMesh {
    let geometry = mesh::build(m);
    let vertices = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some("mesh_vertices"),
        contents: bytemuck::cast_slice(&geometry.vertices),
        usage: wgpu::BufferUsages::VERTEX,
    });
    let indices = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some("mesh_indices"),
        contents: bytemuck::cast_slice(&geometry.indices),
        usage: wgpu::BufferUsages::INDEX,
    });
    GpuMesh {
        vertices,
        indices,
        index_count: geometry.indices.len() as u32,
    }
}

fn write_canvas(queue: &wgpu::Queue, texture: &wgpu::Texture, canvas: &PixelCanvas) {
    queue.write_texture(
        wgpu::TexelCopyTextureInfo {
            texture,
            mip_level: 0,
            origin: wgpu::Origin3d::ZERO,
            aspect: wgpu::TextureAspect::All,
        },
        canvas.as_bytes(),
        wgpu::TexelCopyBufferLayout {
            offset: 0,
            bytes_per_row: Some(4 * canvas.width()),
            rows_per_image: Some(canvas.height()),
        },
        wgpu::Extent3d {
            width: canvas.width(),
            height: canvas.height(),
            depth_or_array_layers: 1,
        },
    );
}

fn upload_texture(
    device: &wgpu::Device,
    queue: &wgpu::Queue,
    layout: &wgpu::BindGroupLayout,
    sampler: &wgpu::Sampler,
    label: &str,
    canvas: &PixelCanvas,
) -> GpuTexture {
    let texture = device.create_texture(&wgpu::TextureDescriptor {
        label: Some(label),
        size: wgpu::Extent3d {
            width: canvas.width(),
            height: canvas.height(),
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: wgpu::TextureFormat::Rgba8UnormSrgb,
        usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
        view_formats: &[],
    });
    write_canvas(queue, &texture, canvas);
    let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
    let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some(label),
        layout,
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
        texture,
        bind_group,
        version: canvas.version(),
    }
}

fn make_scene_pipeline(
    device: &wgpu::Device,
    layout: &wgpu::PipelineLayout,
    shader: &wgpu::ShaderModule,
    color_format: wgpu::TextureFormat,
    blend: Option<wgpu::BlendState>,
    depth_write: bool,
) -> wgpu::RenderPipeline {
    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some(if depth_write { "opaque_pipeline" } else { "translucent_pipeline" }),
        layout: Some(layout),
        vertex: wgpu::VertexState {
            module: shader,
            entry_point: Some("vs_main"),
            buffers: &[wgpu::VertexBufferLayout {
                array_stride: std::mem::size_of::<Vertex>() as u64,
                step_mode: wgpu::VertexStepMode::Vertex,
                attributes: &wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x2],
            }],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        },
        // No culling: planes and discs are seen from both sides.
        primitive: wgpu::PrimitiveState::default(),
        depth_stencil: Some(wgpu::DepthStencilState {
            format: DEPTH_FORMAT,
            depth_write_enabled: depth_write,
            depth_compare: wgpu::CompareFunction::Less,
            stencil: wgpu::StencilState::default(),
            bias: wgpu::DepthBiasState::default(),
        }),
        multisample: wgpu::MultisampleState::default(),
        fragment: Some(wgpu::FragmentState {
            module: shader,
            entry_point: Some("fs_main"),
            targets: &[Some(wgpu::ColorTargetState {
                format: color_format,
                blend,
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        }),
        cache: None,
        multiview: None,
    })
}
