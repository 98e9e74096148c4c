use std::borrow::Cow;
use std::path::Path;
use std::sync::Arc;

use wgpu::{Device, Queue, RenderPipeline, Surface, SurfaceConfiguration};

use crate::{
    config::DemoConfig,
    error::{DemoError, ResourceKind, Result},
    model::{NormalMappedVertex, Quad, QuadMesh, Texture},
    scene::{Camera, Scene, Transform},
};

const BUILTIN_SHADER: &str = include_str!("shaders/normal_map.wgsl");
const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;
const CLEAR_COLOR: wgpu::Color = wgpu::Color {
    r: 0.2,
    g: 0.3,
    b: 0.3,
    a: 1.0,
};

/// Per-draw uniforms. Layout mirrors `DrawUniforms` in the shader.
#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct DrawUniform {
    projection: [[f32; 4]; 4],
    view: [[f32; 4]; 4],
    model: [[f32; 4]; 4],
    view_pos: [f32; 4],
    light_pos: [f32; 4],
    is_light: u32,
    _padding: [u32; 3],
}

impl DrawUniform {
    pub fn new(camera: &Camera, light_pos: glam::Vec3, model: &Transform, is_light: bool) -> Self {
        Self {
            projection: camera.projection_matrix().to_cols_array_2d(),
            view: camera.view_matrix().to_cols_array_2d(),
            model: model.to_matrix().to_cols_array_2d(),
            view_pos: camera.position.extend(1.0).to_array(),
            light_pos: light_pos.extend(1.0).to_array(),
            is_light: is_light as u32,
            _padding: [0; 3],
        }
    }
}

/// Uniform buffer plus the bind group that exposes it at group 0.
struct DrawBinding {
    buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
}

impl DrawBinding {
    fn new(device: &Device, layout: &wgpu::BindGroupLayout, label: &str) -> Self {
        let buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some(label),
            size: std::mem::size_of::<DrawUniform>() as wgpu::BufferAddress,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(label),
            layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: buffer.as_entire_binding(),
            }],
        });

        Self { buffer, bind_group }
    }
}

/// Pipeline, textures, mesh and depth buffer. Everything the frame needs
/// except the surface it is presented on.
pub struct FrameResources {
    device: Arc<Device>,
    queue: Arc<Queue>,
    render_pipeline: RenderPipeline,
    ground: DrawBinding,
    light_marker: DrawBinding,
    material_bind_group: wgpu::BindGroup,
    diffuse: Texture,
    normal_map: Texture,
    mesh: QuadMesh,
    depth_texture: wgpu::Texture,
    depth_view: wgpu::TextureView,
    disposed: bool,
}

impl FrameResources {
    /// Compiles the program, uploads both textures and the quad mesh.
    pub fn new(
        device: Arc<Device>,
        queue: Arc<Queue>,
        format: wgpu::TextureFormat,
        width: u32,
        height: u32,
        demo: &DemoConfig,
    ) -> Result<Self> {
        let (uniform_bind_group_layout, material_bind_group_layout) = create_bind_group_layouts(&device);

        let diffuse = Texture::from_path(&device, &queue, &demo.diffuse_path, ResourceKind::DiffuseTexture)?;
        let normal_map = Texture::from_path(&device, &queue, &demo.normal_map_path, ResourceKind::NormalMap)?;

        let material_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Material Bind Group"),
            layout: &material_bind_group_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&diffuse.view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::TextureView(&normal_map.view),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: wgpu::BindingResource::Sampler(&diffuse.sampler),
                },
                wgpu::BindGroupEntry {
                    binding: 3,
                    resource: wgpu::BindingResource::Sampler(&normal_map.sampler),
                },
            ],
        });

        let render_pipeline = create_pipeline(
            &device,
            format,
            &[&uniform_bind_group_layout, &material_bind_group_layout],
            demo.shader_path.as_deref(),
        )?;

        let ground = DrawBinding::new(&device, &uniform_bind_group_layout, "Ground Uniform Buffer");
        let light_marker = DrawBinding::new(&device, &uniform_bind_group_layout, "Light Marker Uniform Buffer");

        let mesh = QuadMesh::upload(&device, &Quad::unit(demo.uv_repeat))?;

        let (depth_texture, depth_view) = create_depth_texture(&device, width, height);

        Ok(Self {
            device,
            queue,
            render_pipeline,
            ground,
            light_marker,
            material_bind_group,
            diffuse,
            normal_map,
            mesh,
            depth_texture,
            depth_view,
            disposed: false,
        })
    }

    pub fn resize_depth(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 || self.disposed {
            return;
        }
        self.depth_texture.destroy();
        let (depth_texture, depth_view) = create_depth_texture(&self.device, width, height);
        self.depth_texture = depth_texture;
        self.depth_view = depth_view;
    }

    /// Clears `target`, draws the ground quad, then the light marker over it,
    /// and submits. The target must match the depth buffer's size.
    pub fn draw(&self, scene: &Scene, target: &wgpu::TextureView) -> Result<()> {
        if self.disposed {
            return Err(DemoError::graphics("render called after dispose"));
        }

        let light_pos = scene.light.position;
        let ground = DrawUniform::new(&scene.camera, light_pos, &scene.ground_transform(), false);
        let marker = DrawUniform::new(&scene.camera, light_pos, &scene.light_marker_transform(), true);
        self.queue.write_buffer(&self.ground.buffer, 0, bytemuck::cast_slice(&[ground]));
        self.queue.write_buffer(&self.light_marker.buffer, 0, bytemuck::cast_slice(&[marker]));

        let mut encoder = self.device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("Render Encoder"),
        });

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: target,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(CLEAR_COLOR),
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
                occlusion_query_set: None,
                timestamp_writes: None,
            });

            render_pass.set_pipeline(&self.render_pipeline);
            render_pass.set_bind_group(1, &self.material_bind_group, &[]);

            render_pass.set_bind_group(0, &self.ground.bind_group, &[]);
            self.mesh.render(&mut render_pass);

            render_pass.set_bind_group(0, &self.light_marker.bind_group, &[]);
            self.mesh.render(&mut render_pass);
        }

        self.queue.submit(Some(encoder.finish()));
        Ok(())
    }

    /// Releases every GPU resource. A second call only logs.
    pub fn dispose(&mut self) {
        if self.disposed {
            log::warn!("Renderer already disposed");
            return;
        }
        self.mesh.destroy();
        self.ground.buffer.destroy();
        self.light_marker.buffer.destroy();
        self.diffuse.destroy();
        self.normal_map.destroy();
        self.depth_texture.destroy();
        self.disposed = true;
        log::info!("Released GPU resources");
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }
}

pub struct Renderer {
    pub config: SurfaceConfiguration,
    surface: Surface<'static>,
    resources: FrameResources,
}

impl Renderer {
    pub fn new(
        device: Arc<Device>,
        queue: Arc<Queue>,
        config: &SurfaceConfiguration,
        surface: Surface<'static>,
        demo: &DemoConfig,
    ) -> Result<Self> {
        let resources = FrameResources::new(device, queue, config.format, config.width, config.height, demo)?;
        Ok(Self {
            config: config.clone(),
            surface,
            resources,
        })
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 || self.resources.is_disposed() {
            return;
        }
        self.config.width = width;
        self.config.height = height;
        self.surface.configure(&self.resources.device, &self.config);
        self.resources.resize_depth(width, height);
    }

    /// Draws one frame into the next surface texture and presents it.
    pub fn render(&mut self, scene: &Scene) -> Result<()> {
        if self.resources.is_disposed() {
            return Err(DemoError::graphics("render called after dispose"));
        }

        let frame = match self.surface.get_current_texture() {
            Ok(frame) => frame,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                log::warn!("Surface lost or outdated, reconfiguring");
                self.surface.configure(&self.resources.device, &self.config);
                return Ok(());
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                return Err(DemoError::graphics("out of memory acquiring surface texture"));
            }
            Err(e) => {
                log::warn!("Skipping frame: {}", e);
                return Ok(());
            }
        };
        let view = frame.texture.create_view(&wgpu::TextureViewDescriptor::default());

        self.resources.draw(scene, &view)?;
        frame.present();

        Ok(())
    }

    pub fn dispose(&mut self) {
        self.resources.dispose();
    }
}

/// Group 0 holds the per-draw uniforms, group 1 the material.
fn create_bind_group_layouts(device: &Device) -> (wgpu::BindGroupLayout, wgpu::BindGroupLayout) {
    let uniform_bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some("Draw Uniform Bind Group Layout"),
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

    let texture_entry = |binding| wgpu::BindGroupLayoutEntry {
        binding,
        visibility: wgpu::ShaderStages::FRAGMENT,
        ty: wgpu::BindingType::Texture {
            sample_type: wgpu::TextureSampleType::Float { filterable: true },
            view_dimension: wgpu::TextureViewDimension::D2,
            multisampled: false,
        },
        count: None,
    };
    let sampler_entry = |binding| wgpu::BindGroupLayoutEntry {
        binding,
        visibility: wgpu::ShaderStages::FRAGMENT,
        ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
        count: None,
    };

    // Texture slot 0 is the diffuse map, slot 1 the normal map.
    let material_bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some("Material Bind Group Layout"),
        entries: &[texture_entry(0), texture_entry(1), sampler_entry(2), sampler_entry(3)],
    });

    (uniform_bind_group_layout, material_bind_group_layout)
}

fn load_shader_source(path: Option<&Path>) -> Result<Cow<'static, str>> {
    match path {
        Some(path) => std::fs::read_to_string(path)
            .map(Cow::Owned)
            .map_err(|e| DemoError::resource(ResourceKind::Shader, path, e)),
        None => Ok(Cow::Borrowed(BUILTIN_SHADER)),
    }
}

/// Builds the normal-mapping pipeline, turning wgpu validation errors into
/// a `ResourceLoad` error instead of letting the device's handler panic.
fn create_pipeline(
    device: &Device,
    format: wgpu::TextureFormat,
    bind_group_layouts: &[&wgpu::BindGroupLayout],
    shader_path: Option<&Path>,
) -> Result<RenderPipeline> {
    let source = load_shader_source(shader_path)?;
    let origin = shader_path.unwrap_or(Path::new("<built-in normal_map.wgsl>"));

    device.push_error_scope(wgpu::ErrorFilter::Validation);

    let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some("Normal Map Shader"),
        source: wgpu::ShaderSource::Wgsl(source),
    });

    let render_pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("Render Pipeline Layout"),
        bind_group_layouts,
        push_constant_ranges: &[],
    });

    let render_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some("Normal Map Pipeline"),
        layout: Some(&render_pipeline_layout),
        vertex: wgpu::VertexState {
            module: &shader,
            entry_point: Some("vs_main"),
            buffers: &[NormalMappedVertex::desc()],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        },
        fragment: Some(wgpu::FragmentState {
            module: &shader,
            entry_point: Some("fs_main"),
            targets: &[Some(wgpu::ColorTargetState {
                format,
                blend: Some(wgpu::BlendState::REPLACE),
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        }),
        primitive: wgpu::PrimitiveState {
            topology: wgpu::PrimitiveTopology::TriangleList,
            strip_index_format: None,
            front_face: wgpu::FrontFace::Ccw,
            // The plane is visible from both sides once the camera flies behind it.
            cull_mode: None,
            polygon_mode: wgpu::PolygonMode::Fill,
            unclipped_depth: false,
            conservative: false,
        },
        depth_stencil: Some(wgpu::DepthStencilState {
            format: DEPTH_FORMAT,
            depth_write_enabled: true,
            depth_compare: wgpu::CompareFunction::Less,
            stencil: wgpu::StencilState::default(),
            bias: wgpu::DepthBiasState::default(),
        }),
        multisample: wgpu::MultisampleState {
            count: 1,
            mask: !0,
            alpha_to_coverage_enabled: false,
        },
        multiview: None,
        cache: None,
    });

    if let Some(error) = pollster::block_on(device.pop_error_scope()) {
        return Err(DemoError::resource(ResourceKind::Shader, origin, error.to_string()));
    }

    log::info!("Compiled shader program from {}", origin.display());
    Ok(render_pipeline)
}

fn create_depth_texture(device: &Device, width: u32, height: u32) -> (wgpu::Texture, wgpu::TextureView) {
    let depth_texture = device.create_texture(&wgpu::TextureDescriptor {
        label: Some("Depth Texture"),
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
    });
    let depth_view = depth_texture.create_view(&wgpu::TextureViewDescriptor::default());
    (depth_texture, depth_view)
}
