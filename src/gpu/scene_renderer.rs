//! wgpu backend for [`SceneRenderer`].

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use rustc_hash::{FxHashMap, FxHashSet};
use wgpu::util::DeviceExt;

use super::{
    dynamic_buffer::DynamicBuffer,
    pipeline_util::{create_depth_view, uniform_entry, Pipelines},
    prepared::{DrawKind, PreparedDraw},
    render_context::RenderContext,
    shader_composer::ShaderComposer,
    uniforms::LightingUniform,
};
use crate::camera::{Camera, CameraUniform};
use crate::error::ChemviewError;
use crate::scene::{Renderable, Scene};
use crate::viewer::SceneRenderer;

type ObjectKey = *const RefCell<Renderable>;

/// GPU resources for one renderable.
struct GpuObject {
    owner: Weak<RefCell<Renderable>>,
    revision: u64,
    kind: DrawKind,
    count: u32,
    vertices: DynamicBuffer,
    indices: Option<DynamicBuffer>,
    uniform: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
}

impl GpuObject {
    fn new(
        device: &wgpu::Device,
        layout: &wgpu::BindGroupLayout,
        owner: Weak<RefCell<Renderable>>,
        revision: u64,
        draw: &PreparedDraw,
    ) -> Self {
        let uniform = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Object Uniform"),
            contents: bytemuck::bytes_of(&draw.uniform),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Object Bind Group"),
            layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform.as_entire_binding(),
            }],
        });
        let vertices = DynamicBuffer::new_with_data(
            device,
            "Object Vertices",
            &draw.vertices,
            wgpu::BufferUsages::VERTEX,
        );
        let indices = (!draw.indices.is_empty()).then(|| {
            DynamicBuffer::new_with_data(
                device,
                "Object Indices",
                &draw.indices,
                wgpu::BufferUsages::INDEX,
            )
        });
        Self {
            owner,
            revision,
            kind: draw.kind,
            count: draw.count,
            vertices,
            indices,
            uniform,
            bind_group,
        }
    }

    fn refresh(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        revision: u64,
        draw: &PreparedDraw,
    ) {
        queue.write_buffer(&self.uniform, 0, bytemuck::bytes_of(&draw.uniform));
        let _ = self.vertices.write(device, queue, &draw.vertices);
        if draw.indices.is_empty() {
            self.indices = None;
        } else if let Some(indices) = &mut self.indices {
            let _ = indices.write(device, queue, &draw.indices);
        } else {
            self.indices = Some(DynamicBuffer::new_with_data(
                device,
                "Object Indices",
                &draw.indices,
                wgpu::BufferUsages::INDEX,
            ));
        }
        self.kind = draw.kind;
        self.count = draw.count;
        self.revision = revision;
    }
}

/// Draws a [`Scene`] to a wgpu surface.
///
/// Buffers are cached per renderable and re-uploaded only when the
/// renderable's revision changes. Entries whose renderable is no longer in
/// the scene are released at the end of each frame.
pub struct GpuRenderer {
    context: RenderContext,
    pipelines: Pipelines,
    depth_view: wgpu::TextureView,
    camera_uniform: CameraUniform,
    camera_buffer: wgpu::Buffer,
    lighting_buffer: wgpu::Buffer,
    frame_bind_group: wgpu::BindGroup,
    object_layout: wgpu::BindGroupLayout,
    objects: FxHashMap<ObjectKey, GpuObject>,
}

impl GpuRenderer {
    /// Build pipelines and frame resources on an initialized context.
    ///
    /// # Errors
    ///
    /// Returns [`ChemviewError::Shader`] if a shader fails to compose.
    pub fn new(context: RenderContext) -> Result<Self, ChemviewError> {
        let device = &context.device;

        let frame_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Frame Bind Group Layout"),
            entries: &[uniform_entry(0), uniform_entry(1)],
        });
        let object_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Object Bind Group Layout"),
            entries: &[uniform_entry(0)],
        });

        let camera_uniform = CameraUniform::new();
        let camera_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Camera Buffer"),
            contents: bytemuck::bytes_of(&camera_uniform),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });
        let lighting_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Lighting Buffer"),
            size: size_of::<LightingUniform>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let frame_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Frame Bind Group"),
            layout: &frame_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: camera_buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: lighting_buffer.as_entire_binding(),
                },
            ],
        });

        let mut composer = ShaderComposer::new()?;
        let pipelines = Pipelines::new(&context, &mut composer, &frame_layout, &object_layout)?;
        let depth_view = create_depth_view(device, context.config.width, context.config.height);

        Ok(Self {
            context,
            pipelines,
            depth_view,
            camera_uniform,
            camera_buffer,
            lighting_buffer,
            frame_bind_group,
            object_layout,
            objects: FxHashMap::default(),
        })
    }

    /// The underlying device, queue and surface.
    #[must_use]
    pub fn context(&self) -> &RenderContext {
        &self.context
    }

    /// Number of renderables with live GPU buffers.
    #[must_use]
    pub fn cached_objects(&self) -> usize {
        self.objects.len()
    }

    fn sync_objects(&mut self, scene: &Scene) -> Vec<ObjectKey> {
        let device = &self.context.device;
        let queue = &self.context.queue;
        let mut order = Vec::new();
        for shared in scene.objects() {
            let key = Rc::as_ptr(&shared);
            let renderable = shared.borrow();
            let revision = renderable.revision();
            match self.objects.get_mut(&key) {
                Some(obj) if obj.revision == revision => {}
                Some(obj) => {
                    let draw = PreparedDraw::from_renderable(&renderable);
                    obj.refresh(device, queue, revision, &draw);
                }
                None => {
                    let draw = PreparedDraw::from_renderable(&renderable);
                    let obj = GpuObject::new(
                        device,
                        &self.object_layout,
                        Rc::downgrade(&shared),
                        revision,
                        &draw,
                    );
                    let _ = self.objects.insert(key, obj);
                }
            }
            order.push(key);
        }

        // Release anything that left the scene or was dropped.
        let live: FxHashSet<ObjectKey> = order.iter().copied().collect();
        let before = self.objects.len();
        self.objects
            .retain(|key, obj| obj.owner.strong_count() > 0 && live.contains(key));
        let released = before - self.objects.len();
        if released > 0 {
            log::debug!("released {released} cached renderables");
        }
        order
    }
}

impl SceneRenderer for GpuRenderer {
    fn set_size(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.context.resize(width, height);
        self.depth_view = create_depth_view(&self.context.device, width, height);
    }

    fn render(&mut self, scene: &Scene, camera: &Camera) -> Result<(), ChemviewError> {
        let frame = match self.context.get_next_frame() {
            Ok(frame) => frame,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                log::debug!("surface lost or outdated, reconfiguring");
                self.context.reconfigure();
                return Ok(());
            }
            Err(e) => return Err(e.into()),
        };

        let (width, height) = (self.context.config.width, self.context.config.height);
        self.camera_uniform.update(camera, width, height);
        self.context.queue.write_buffer(
            &self.camera_buffer,
            0,
            bytemuck::bytes_of(&self.camera_uniform),
        );
        self.context.queue.write_buffer(
            &self.lighting_buffer,
            0,
            bytemuck::bytes_of(&LightingUniform::from_scene(scene)),
        );

        let order = self.sync_objects(scene);

        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let [r, g, b] = scene.background();
        let mut encoder = self.context.create_encoder();
        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Scene Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    depth_slice: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: f64::from(r),
                            g: f64::from(g),
                            b: f64::from(b),
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

            pass.set_bind_group(0, &self.frame_bind_group, &[]);
            for key in &order {
                let Some(obj) = self.objects.get(key) else {
                    continue;
                };
                if obj.count == 0 {
                    continue;
                }
                pass.set_pipeline(self.pipelines.get(obj.kind));
                pass.set_bind_group(1, &obj.bind_group, &[]);
                pass.set_vertex_buffer(0, obj.vertices.buffer().slice(..));
                match (obj.kind, &obj.indices) {
                    (DrawKind::Points, _) => pass.draw(0..6, 0..obj.count),
                    (_, Some(indices)) => {
                        pass.set_index_buffer(
                            indices.buffer().slice(..),
                            wgpu::IndexFormat::Uint32,
                        );
                        pass.draw_indexed(0..obj.count, 0, 0..1);
                    }
                    (_, None) => pass.draw(0..obj.count, 0..1),
                }
            }
        }

        self.context.submit(encoder);
        frame.present();
        Ok(())
    }
}
