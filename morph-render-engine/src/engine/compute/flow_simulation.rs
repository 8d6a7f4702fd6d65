use bevy::prelude::*;
use bevy::render::extract_resource::{ExtractResource, ExtractResourcePlugin};
use bevy::render::{
    Render, RenderApp, RenderSet,
    render_asset::RenderAssets,
    render_resource::{
        BindGroup, BindGroupEntry, BindGroupLayout, BindGroupLayoutEntry, BindingResource,
        Buffer, BindingType, BufferBindingType, BufferDescriptor, BufferUsages,
        CachedComputePipelineId, CommandEncoder, CommandEncoderDescriptor, ComputePassDescriptor,
        ComputePipelineDescriptor, Extent3d, PipelineCache, ShaderStages, StorageTextureAccess,
        TextureSampleType, TextureViewDimension,
    },
    renderer::{RenderDevice, RenderQueue},
    texture::GpuImage,
};
use constants::texture::{SIMULATION_TEXTURE_FORMAT, WORKGROUP_SIZE};

use crate::engine::compute::graph::{
    BoundInput, ComputeGraph, ExternalTexture, PassDescriptor, SimVariable,
    morph_simulation_passes,
};
use crate::engine::compute::uniforms::{FlowDirectionUniform, FlowFieldUniform, PositionUniform};
use crate::engine::core::app_state::AppState;
use crate::engine::simulation::session::MorphSession;

/// GPU images backing the simulation, created once the models are loaded.
#[derive(Resource, Clone, ExtractResource)]
pub struct SimulationTextures {
    pub size: u32,
    /// Encoded positions of each model, indexed by `ActiveModel::index`.
    pub model_positions: [Handle<Image>; 2],
    /// Ping-pong pair per variable, indexed by `SimVariable::index`.
    pub buffers: [[Handle<Image>; 2]; 3],
    /// Copy of the latest position buffer, bound by the particle material.
    pub live_position: Handle<Image>,
}

impl SimulationTextures {
    pub fn buffer(&self, variable: SimVariable, slot: usize) -> &Handle<Image> {
        &self.buffers[variable.index()][slot]
    }

    pub fn external(&self, texture: ExternalTexture, session: &MorphSession) -> &Handle<Image> {
        let model = match texture {
            ExternalTexture::BasePosition => session.base_model,
            ExternalTexture::TargetPosition => session.target_model(),
        };
        &self.model_positions[model.index()]
    }

    fn extent(&self) -> Extent3d {
        Extent3d {
            width: self.size,
            height: self.size,
            depth_or_array_layers: 1,
        }
    }
}

struct PassPipeline {
    layout: BindGroupLayout,
    pipeline: CachedComputePipelineId,
    /// Rewritten every tick with `RenderQueue::write_buffer`.
    uniforms: Buffer,
}

/// Render-world state: compiled pass pipelines and the graph's buffer slots.
#[derive(Resource, Default)]
pub struct FlowSimulationState {
    graph: Option<ComputeGraph>,
    passes: Vec<PassPipeline>,
    applied_reset: u32,
    disabled: bool,
}

pub struct FlowSimulationPlugin;

impl Plugin for FlowSimulationPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(ExtractResourcePlugin::<MorphSession>::default())
            .add_plugins(ExtractResourcePlugin::<SimulationTextures>::default());

        let Some(render_app) = app.get_sub_app_mut(RenderApp) else {
            return;
        };
        render_app
            .init_resource::<FlowSimulationState>()
            .add_systems(
                Render,
                run_flow_simulation
                    .in_set(RenderSet::Queue)
                    .run_if(in_state(AppState::Running)),
            );
    }
}

/// Runs one simulation tick: optional position reset, the scheduled passes,
/// then a copy of the newest position buffer into the live texture.
///
/// Each pass binds its inputs in declaration order, then its output and uniforms:
/// ```wgsl
/// @group(0) @binding(0..n) var input_i: texture_2d<f32>;
/// @group(0) @binding(n) var output: texture_storage_2d<rgba32float, write>;
/// @group(0) @binding(n + 1) var<uniform> params: PassParams;
/// ```
pub fn run_flow_simulation(
    mut state: ResMut<FlowSimulationState>,
    session: Option<Res<MorphSession>>,
    textures: Option<Res<SimulationTextures>>,
    render_device: Res<RenderDevice>,
    render_queue: Res<RenderQueue>,
    pipeline_cache: Res<PipelineCache>,
    gpu_images: Res<RenderAssets<GpuImage>>,
    asset_server: Res<AssetServer>,
) {
    let (Some(session), Some(textures)) = (session, textures) else {
        return;
    };
    if state.disabled {
        return;
    }
    if state.graph.is_none() {
        initialise_flow_pipelines(&mut state, &render_device, &pipeline_cache, &asset_server);
    }

    let FlowSimulationState {
        graph,
        passes,
        applied_reset,
        ..
    } = &mut *state;
    let Some(graph) = graph.as_mut() else {
        return;
    };

    let mut pipelines = Vec::with_capacity(passes.len());
    for pass in passes.iter() {
        let Some(pipeline) = pipeline_cache.get_compute_pipeline(pass.pipeline) else {
            debug!("Flow simulation pipelines still compiling, skipping tick");
            return;
        };
        pipelines.push(pipeline);
    }

    let Some(live_gpu) = gpu_images.get(&textures.live_position) else {
        return;
    };
    let position_slot = graph.current_slot(SimVariable::Position);
    let Some(position_gpu) = gpu_images.get(textures.buffer(SimVariable::Position, position_slot))
    else {
        return;
    };
    let Some(latest_gpu) =
        gpu_images.get(textures.buffer(SimVariable::Position, 1 - position_slot))
    else {
        return;
    };

    let pending_reset = session
        .position_reset
        .filter(|reset| reset.generation != *applied_reset);
    let reset_source = match pending_reset {
        Some(reset) => {
            let Some(source) = gpu_images.get(&textures.model_positions[reset.source.index()])
            else {
                return;
            };
            Some(source)
        }
        None => None,
    };

    let mut dispatches = Vec::with_capacity(passes.len());
    for planned in graph.plan_tick() {
        let pass = &passes[planned.index];
        render_queue.write_buffer(
            &pass.uniforms,
            0,
            &pass_uniform_bytes(planned.descriptor.output, &session),
        );
        let Some(bind_group) = create_pass_bind_group(
            &render_device,
            pass,
            planned.descriptor,
            &planned.inputs,
            planned.output_slot,
            &session,
            &textures,
            &gpu_images,
        ) else {
            return;
        };
        dispatches.push((planned.index, bind_group));
    }

    let mut encoder = render_device.create_command_encoder(&CommandEncoderDescriptor {
        label: Some("flow_simulation"),
    });

    if let (Some(reset), Some(source)) = (pending_reset, reset_source) {
        copy_texture(&mut encoder, source, position_gpu, textures.extent());
        *applied_reset = reset.generation;
        info!("Particle positions reset onto model {}", reset.source.index());
    }

    let workgroups = textures.size.div_ceil(WORKGROUP_SIZE);
    for (index, bind_group) in &dispatches {
        let mut pass = encoder.begin_compute_pass(&ComputePassDescriptor {
            label: Some(graph.passes()[*index].label),
            timestamp_writes: None,
        });
        pass.set_pipeline(pipelines[*index]);
        pass.set_bind_group(0, bind_group, &[]);
        pass.dispatch_workgroups(workgroups, workgroups, 1);
    }

    graph.finish_tick();
    copy_texture(&mut encoder, latest_gpu, live_gpu, textures.extent());

    render_queue.submit([encoder.finish()]);
}

/// Validates the pass graph and queues one compute pipeline per pass.
fn initialise_flow_pipelines(
    state: &mut FlowSimulationState,
    render_device: &RenderDevice,
    pipeline_cache: &PipelineCache,
    asset_server: &AssetServer,
) {
    let graph = match ComputeGraph::new(morph_simulation_passes()) {
        Ok(graph) => graph,
        Err(err) => {
            error!("Flow simulation disabled: {err}");
            state.disabled = true;
            return;
        }
    };

    state.passes = graph
        .passes()
        .iter()
        .map(|pass| {
            let layout = create_pass_layout(render_device, pass);
            let pipeline = pipeline_cache.queue_compute_pipeline(ComputePipelineDescriptor {
                label: Some(pass.label.into()),
                layout: vec![layout.clone()],
                push_constant_ranges: Vec::new(),
                shader: asset_server.load(pass.shader),
                shader_defs: vec![],
                entry_point: "main".into(),
                zero_initialize_workgroup_memory: true,
            });
            let uniforms = render_device.create_buffer(&BufferDescriptor {
                label: Some(pass.label),
                size: uniform_size(pass.output),
                usage: BufferUsages::UNIFORM | BufferUsages::COPY_DST,
                mapped_at_creation: false,
            });
            PassPipeline {
                layout,
                pipeline,
                uniforms,
            }
        })
        .collect();
    state.graph = Some(graph);
    info!("Queued {} flow simulation pipelines", state.passes.len());
}

fn create_pass_layout(render_device: &RenderDevice, pass: &PassDescriptor) -> BindGroupLayout {
    let input_count = pass.inputs.len() as u32;
    let mut entries: Vec<BindGroupLayoutEntry> = (0..input_count)
        .map(|binding| BindGroupLayoutEntry {
            binding,
            visibility: ShaderStages::COMPUTE,
            ty: BindingType::Texture {
                sample_type: TextureSampleType::Float { filterable: false },
                view_dimension: TextureViewDimension::D2,
                multisampled: false,
            },
            count: None,
        })
        .collect();
    entries.push(BindGroupLayoutEntry {
        binding: input_count,
        visibility: ShaderStages::COMPUTE,
        ty: BindingType::StorageTexture {
            access: StorageTextureAccess::WriteOnly,
            format: SIMULATION_TEXTURE_FORMAT,
            view_dimension: TextureViewDimension::D2,
        },
        count: None,
    });
    entries.push(BindGroupLayoutEntry {
        binding: input_count + 1,
        visibility: ShaderStages::COMPUTE,
        ty: BindingType::Buffer {
            ty: BufferBindingType::Uniform,
            has_dynamic_offset: false,
            min_binding_size: None,
        },
        count: None,
    });

    render_device.create_bind_group_layout(pass.label, &entries)
}

#[allow(clippy::too_many_arguments)]
fn create_pass_bind_group(
    render_device: &RenderDevice,
    pipeline: &PassPipeline,
    pass: &PassDescriptor,
    inputs: &[BoundInput],
    output_slot: usize,
    session: &MorphSession,
    textures: &SimulationTextures,
    gpu_images: &RenderAssets<GpuImage>,
) -> Option<BindGroup> {
    let mut views = Vec::with_capacity(inputs.len() + 1);
    for input in inputs {
        let handle = match *input {
            BoundInput::Buffer { variable, slot } => textures.buffer(variable, slot),
            BoundInput::External(texture) => textures.external(texture, session),
        };
        views.push(&gpu_images.get(handle)?.texture_view);
    }
    views.push(&gpu_images.get(textures.buffer(pass.output, output_slot))?.texture_view);

    let mut entries: Vec<BindGroupEntry> = views
        .into_iter()
        .enumerate()
        .map(|(binding, view)| BindGroupEntry {
            binding: binding as u32,
            resource: BindingResource::TextureView(view),
        })
        .collect();
    entries.push(BindGroupEntry {
        binding: entries.len() as u32,
        resource: pipeline.uniforms.as_entire_binding(),
    });

    Some(render_device.create_bind_group(pass.label, &pipeline.layout, &entries))
}

fn uniform_size(output: SimVariable) -> u64 {
    let size = match output {
        SimVariable::FlowField => size_of::<FlowFieldUniform>(),
        SimVariable::FlowDirection => size_of::<FlowDirectionUniform>(),
        SimVariable::Position => size_of::<PositionUniform>(),
    };
    size as u64
}

fn pass_uniform_bytes(output: SimVariable, session: &MorphSession) -> Vec<u8> {
    match output {
        SimVariable::FlowField => {
            bytemuck::bytes_of(&FlowFieldUniform::from_session(session)).to_vec()
        }
        SimVariable::FlowDirection => {
            bytemuck::bytes_of(&FlowDirectionUniform::from_session(session)).to_vec()
        }
        SimVariable::Position => {
            bytemuck::bytes_of(&PositionUniform::from_session(session)).to_vec()
        }
    }
}

fn copy_texture(
    encoder: &mut CommandEncoder,
    source: &GpuImage,
    destination: &GpuImage,
    extent: Extent3d,
) {
    encoder.copy_texture_to_texture(
        source.texture.as_image_copy(),
        destination.texture.as_image_copy(),
        extent,
    );
}
