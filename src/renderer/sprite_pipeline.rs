//! Textured sprite pipeline (sprite variant)
//!
//! One texture and bind group per sprite image. Draws are issued in
//! batches so layering follows scene order.

use std::collections::HashMap;

use super::scene::SpriteId;
use super::shapes::SpriteBatch;
use super::vertex::SpriteVertex;
use crate::assets::{DecodedImage, SpriteImages};

pub struct SpritePipeline {
    pipeline: wgpu::RenderPipeline,
    bind_groups: HashMap<SpriteId, wgpu::BindGroup>,
}

impl SpritePipeline {
    pub fn new(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        format: wgpu::TextureFormat,
        images: &SpriteImages,
    ) -> Self {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("sprite_shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("sprite.wgsl").into()),
        });

        // Layout is derived from the shader's bindings
        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("sprite_pipeline"),
            layout: None,
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[SpriteVertex::desc()],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        });

        let layout = pipeline.get_bind_group_layout(0);
        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("sprite_sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            ..Default::default()
        });

        let mut bind_groups = HashMap::new();
        for (id, image) in [
            (SpriteId::Background, &images.background),
            (SpriteId::Bird, &images.bird),
            (SpriteId::Pipe, &images.pipe),
        ] {
            let view = upload_texture(device, queue, id, image);
            let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
                label: Some("sprite_bind_group"),
                layout: &layout,
                entries: &[
                    wgpu::BindGroupEntry {
                        binding: 0,
                        resource: wgpu::BindingResource::TextureView(&view),
                    },
                    wgpu::BindGroupEntry {
                        binding: 1,
                        resource: wgpu::BindingResource::Sampler(&sampler),
                    },
                ],
            });
            bind_groups.insert(id, bind_group);
        }

        Self {
            pipeline,
            bind_groups,
        }
    }

    /// Record the sprite batches into an open render pass
    pub fn draw(
        &self,
        pass: &mut wgpu::RenderPass<'_>,
        vertex_buffer: &wgpu::Buffer,
        batches: &[SpriteBatch],
    ) {
        pass.set_pipeline(&self.pipeline);
        pass.set_vertex_buffer(0, vertex_buffer.slice(..));
        for batch in batches {
            let Some(bind_group) = self.bind_groups.get(&batch.sprite) else {
                continue;
            };
            pass.set_bind_group(0, bind_group, &[]);
            pass.draw(batch.vertices.clone(), 0..1);
        }
    }
}

fn upload_texture(
    device: &wgpu::Device,
    queue: &wgpu::Queue,
    id: SpriteId,
    image: &DecodedImage,
) -> wgpu::TextureView {
    let size = wgpu::Extent3d {
        width: image.width,
        height: image.height,
        depth_or_array_layers: 1,
    };
    let texture = device.create_texture(&wgpu::TextureDescriptor {
        label: Some(match id {
            SpriteId::Background => "background_texture",
            SpriteId::Bird => "bird_texture",
            SpriteId::Pipe => "pipe_texture",
        }),
        size,
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: wgpu::TextureFormat::Rgba8UnormSrgb,
        usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
        view_formats: &[],
    });
    queue.write_texture(
        wgpu::TexelCopyTextureInfo {
            texture: &texture,
            mip_level: 0,
            origin: wgpu::Origin3d::ZERO,
            aspect: wgpu::TextureAspect::All,
        },
        &image.rgba,
        wgpu::TexelCopyBufferLayout {
            offset: 0,
            bytes_per_row: Some(4 * image.width),
            rows_per_image: Some(image.height),
        },
        size,
    );
    texture.create_view(&wgpu::TextureViewDescriptor::default())
}
