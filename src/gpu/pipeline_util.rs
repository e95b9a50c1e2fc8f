//! Shared wgpu boilerplate for the scene pipelines.

use crate::error::ChemviewError;

use super::{
    prepared::DrawKind,
    render_context::RenderContext,
    shader_composer::{ShaderComposer, LINES_SHADER, MESH_SHADER, POINTS_SHADER},
    uniforms::{MeshVertex, PointInstance},
};

/// Depth buffer format used by every pipeline.
pub const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

const POINT_ATTRIBUTES: [wgpu::VertexAttribute; 2] =
    wgpu::vertex_attr_array![0 => Float32x4, 1 => Float32x4];
const LINE_ATTRIBUTES: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![0 => Float32x3];
const MESH_ATTRIBUTES: [wgpu::VertexAttribute; 2] =
    wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3];

/// Standard depth-stencil state used by all render pipelines.
pub fn depth_stencil_state() -> wgpu::DepthStencilState {
    wgpu::DepthStencilState {
        format: DEPTH_FORMAT,
        depth_write_enabled: true,
        depth_compare: wgpu::CompareFunction::Less,
        stencil: wgpu::StencilState::default(),
        bias: wgpu::DepthBiasState::default(),
    }
}

/// Vertex- and fragment-visible uniform buffer binding.
pub fn uniform_entry(binding: u32) -> wgpu::BindGroupLayoutEntry {
    wgpu::BindGroupLayoutEntry {
        binding,
        visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
        ty: wgpu::BindingType::Buffer {
            ty: wgpu::BufferBindingType::Uniform,
            has_dynamic_offset: false,
            min_binding_size: None,
        },
        count: None,
    }
}

/// Create a depth texture view matching the surface size.
pub fn create_depth_view(device: &wgpu::Device, width: u32, height: u32) -> wgpu::TextureView {
    let texture = device.create_texture(&wgpu::TextureDescriptor {
        label: Some("Depth Texture"),
        size: wgpu::Extent3d {
            width: width.max(1),
            height: height.max(1),
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: DEPTH_FORMAT,
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
        view_formats: &[],
    });
    texture.create_view(&wgpu::TextureViewDescriptor::default())
}

fn create_pipeline(
    context: &RenderContext,
    label: &str,
    shader: &wgpu::ShaderModule,
    layout: &wgpu::PipelineLayout,
    vertex_layout: wgpu::VertexBufferLayout<'static>,
    topology: wgpu::PrimitiveTopology,
) -> wgpu::RenderPipeline {
    context
        .device
        .create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some(label),
            layout: Some(layout),
            vertex: wgpu::VertexState {
                module: shader,
                entry_point: Some("vs_main"),
                buffers: &[vertex_layout],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: context.format(),
                    blend: None,
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology,
                cull_mode: None,
                ..Default::default()
            },
            depth_stencil: Some(depth_stencil_state()),
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
            cache: None,
        })
}

/// One pipeline per [`DrawKind`].
pub struct Pipelines {
    points: wgpu::RenderPipeline,
    lines: wgpu::RenderPipeline,
    line_strip: wgpu::RenderPipeline,
    mesh: wgpu::RenderPipeline,
    wireframe: wgpu::RenderPipeline,
}

impl Pipelines {
    /// Compose the shaders and build every pipeline against the frame
    /// (group 0) and object (group 1) layouts.
    pub fn new(
        context: &RenderContext,
        composer: &mut ShaderComposer,
        frame_layout: &wgpu::BindGroupLayout,
        object_layout: &wgpu::BindGroupLayout,
    ) -> Result<Self, ChemviewError> {
        let layout = context
            .device
            .create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some("Scene Pipeline Layout"),
                bind_group_layouts: &[frame_layout, object_layout],
                push_constant_ranges: &[],
            });

        let points_shader = composer.compose(&context.device, "Points Shader", POINTS_SHADER)?;
        let lines_shader = composer.compose(&context.device, "Lines Shader", LINES_SHADER)?;
        let mesh_shader = composer.compose(&context.device, "Mesh Shader", MESH_SHADER)?;

        let point_layout = wgpu::VertexBufferLayout {
            array_stride: size_of::<PointInstance>() as u64,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &POINT_ATTRIBUTES,
        };
        let line_layout = wgpu::VertexBufferLayout {
            array_stride: size_of::<[f32; 3]>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &LINE_ATTRIBUTES,
        };
        let mesh_layout = wgpu::VertexBufferLayout {
            array_stride: size_of::<MeshVertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &MESH_ATTRIBUTES,
        };

        use wgpu::PrimitiveTopology as T;
        Ok(Self {
            points: create_pipeline(
                context,
                "Points Pipeline",
                &points_shader,
                &layout,
                point_layout,
                T::TriangleList,
            ),
            lines: create_pipeline(
                context,
                "Lines Pipeline",
                &lines_shader,
                &layout,
                line_layout.clone(),
                T::LineList,
            ),
            line_strip: create_pipeline(
                context,
                "Line Strip Pipeline",
                &lines_shader,
                &layout,
                line_layout,
                T::LineStrip,
            ),
            mesh: create_pipeline(
                context,
                "Mesh Pipeline",
                &mesh_shader,
                &layout,
                mesh_layout.clone(),
                T::TriangleList,
            ),
            wireframe: create_pipeline(
                context,
                "Wireframe Pipeline",
                &mesh_shader,
                &layout,
                mesh_layout,
                T::LineList,
            ),
        })
    }

    /// Pipeline for a draw kind.
    pub fn get(&self, kind: DrawKind) -> &wgpu::RenderPipeline {
        match kind {
            DrawKind::Points => &self.points,
            DrawKind::Lines => &self.lines,
            DrawKind::LineStrip => &self.line_strip,
            DrawKind::Mesh => &self.mesh,
            DrawKind::Wireframe => &self.wireframe,
        }
    }
}
