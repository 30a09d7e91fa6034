//! WebGPU rendering module
//!
//! `scene` turns game state into a draw list; the rest uploads it. All
//! geometry is converted to NDC on the CPU, so shaders need no uniforms.

pub mod pipeline;
pub mod scene;
pub mod shapes;
pub mod sprite_pipeline;
pub mod vertex;

pub use scene::{Scene, SpriteId, build_scene};

use wgpu::util::DeviceExt;

use crate::assets::SpriteImages;
use crate::error::GameError;
use sprite_pipeline::SpritePipeline;
use vertex::color_for_surface;

/// Main render state
pub struct Renderer {
    pub surface: wgpu::Surface<'static>,
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
    pub config: wgpu::SurfaceConfiguration,
    quad_pipeline: wgpu::RenderPipeline,
    sprites: Option<SpritePipeline>,
    /// Viewport size in pixels
    pub size: (u32, u32),
}

impl Renderer {
    /// Set up the device and pipelines. Sprite images enable the textured path.
    pub async fn new(
        surface: wgpu::Surface<'static>,
        adapter: &wgpu::Adapter,
        width: u32,
        height: u32,
        images: Option<&SpriteImages>,
    ) -> Result<Self, GameError> {
        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("flappy-arcade-device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::downlevel_webgl2_defaults(),
                memory_hints: Default::default(),
                trace: Default::default(),
                experimental_features: Default::default(),
            })
            .await
            .map_err(|e| GameError::Graphics(format!("failed to create device: {e}")))?;

        let surface_caps = surface.get_capabilities(adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .or_else(|| surface_caps.formats.first())
            .copied()
            .ok_or_else(|| GameError::Graphics("surface has no supported formats".into()))?;
        let alpha_mode = surface_caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width,
            height,
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let quad_pipeline = pipeline::create_quad_pipeline(&device, config.format);
        let sprites = images.map(|images| SpritePipeline::new(&device, &queue, config.format, images));

        log::info!(
            "Renderer ready: {}x{} {:?}{}",
            width,
            height,
            config.format,
            if sprites.is_some() { " with sprites" } else { "" }
        );

        Ok(Self {
            surface,
            device,
            queue,
            config,
            quad_pipeline,
            sprites,
            size: (width, height),
        })
    }

    pub fn resize(&mut self, new_width: u32, new_height: u32) {
        if new_width > 0 && new_height > 0 {
            self.size = (new_width, new_height);
            self.config.width = new_width;
            self.config.height = new_height;
            self.surface.configure(&self.device, &self.config);
        }
    }

    /// Upload the scene and draw it
    pub fn render(&mut self, scene: &Scene) -> Result<(), wgpu::SurfaceError> {
        let srgb = self.config.format.is_srgb();
        let rect_vertices = shapes::scene_vertices(scene, srgb);
        let (sprite_vertices, batches) = shapes::sprite_batches(scene);

        let rect_buffer = (!rect_vertices.is_empty()).then(|| {
            self.device
                .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                    label: Some("rect_vertex_buffer"),
                    contents: bytemuck::cast_slice(&rect_vertices),
                    usage: wgpu::BufferUsages::VERTEX,
                })
        });
        let sprite_buffer = (!sprite_vertices.is_empty()).then(|| {
            self.device
                .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                    label: Some("sprite_vertex_buffer"),
                    contents: bytemuck::cast_slice(&sprite_vertices),
                    usage: wgpu::BufferUsages::VERTEX,
                })
        });

        let output = self.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("render_encoder"),
            });

        {
            let [r, g, b, a] = color_for_surface(scene.clear_color, srgb);
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("render_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: r as f64,
                            g: g as f64,
                            b: b as f64,
                            a: a as f64,
                        }),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
                multiview_mask: None,
            });

            if let Some(buffer) = &rect_buffer {
                render_pass.set_pipeline(&self.quad_pipeline);
                render_pass.set_vertex_buffer(0, buffer.slice(..));
                render_pass.draw(0..rect_vertices.len() as u32, 0..1);
            }
            if let (Some(sprites), Some(buffer)) = (&self.sprites, &sprite_buffer) {
                sprites.draw(&mut render_pass, buffer, &batches);
            }
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        Ok(())
    }
}
