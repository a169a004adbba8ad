//! Automaton stepping
//!
//! One step binds every channel's grids and the output surface, dispatches the
//! kernel across the full grid domain, submits the work, and swaps the
//! channels. The kernel itself is opaque to this module; only its binding
//! slots are contractual.

use wgpu::{
    BindGroupLayoutDescriptor, BindGroupLayoutEntry, BindingType, BufferBindingType,
    ComputePassDescriptor, ComputePipelineDescriptor, ShaderModuleDescriptor, ShaderSource,
    ShaderStages, StorageTextureAccess, TextureFormat, TextureViewDimension,
};

use crate::config::WORKGROUP_SIZE;
use crate::sim::buffer_pair::AutomatonState;

/// Fixed binding slots the kernel must declare.
///
/// | slot | resource                          |
/// |------|-----------------------------------|
/// | 0    | primary front (read)              |
/// | 1    | primary back (write)              |
/// | 2    | secondary front (read)            |
/// | 3    | secondary back (write)            |
/// | 4    | output surface (write-only image) |
const PRIMARY_READ_SLOT: u32 = 0;
const PRIMARY_WRITE_SLOT: u32 = 1;
const SECONDARY_READ_SLOT: u32 = 2;
const SECONDARY_WRITE_SLOT: u32 = 3;
const OUTPUT_SLOT: u32 = 4;

/// Dispatches compute passes over the automaton state.
pub struct Stepper {
    pipeline: wgpu::ComputePipeline,
    bind_group_layout: wgpu::BindGroupLayout,
    width: u32,
    height: u32,
}

impl Stepper {
    /// Builds the compute pipeline from a caller-supplied WGSL kernel.
    ///
    /// The kernel may implement any per-cell rule; it must declare (a subset
    /// of) the fixed binding slots. Shader compilation failure surfaces
    /// through the device error handler and is fatal.
    pub fn new(device: &wgpu::Device, kernel_source: &str, width: u32, height: u32) -> Self {
        let module = device.create_shader_module(ShaderModuleDescriptor {
            label: Some("automaton kernel"),
            source: ShaderSource::Wgsl(kernel_source.into()),
        });

        let storage_entry = |binding: u32, read_only: bool| BindGroupLayoutEntry {
            binding,
            visibility: ShaderStages::COMPUTE,
            ty: BindingType::Buffer {
                ty: BufferBindingType::Storage { read_only },
                has_dynamic_offset: false,
                min_binding_size: None,
            },
            count: None,
        };

        let bind_group_layout = device.create_bind_group_layout(&BindGroupLayoutDescriptor {
            label: Some("automaton bind group layout"),
            entries: &[
                storage_entry(PRIMARY_READ_SLOT, true),
                storage_entry(PRIMARY_WRITE_SLOT, false),
                storage_entry(SECONDARY_READ_SLOT, true),
                storage_entry(SECONDARY_WRITE_SLOT, false),
                BindGroupLayoutEntry {
                    binding: OUTPUT_SLOT,
                    visibility: ShaderStages::COMPUTE,
                    ty: BindingType::StorageTexture {
                        access: StorageTextureAccess::WriteOnly,
                        format: TextureFormat::Rgba8Unorm,
                        view_dimension: TextureViewDimension::D2,
                    },
                    count: None,
                },
            ],
        });

        let pipeline = device.create_compute_pipeline(&ComputePipelineDescriptor {
            label: Some("automaton pipeline"),
            layout: Some(
                &device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                    label: Some("automaton pipeline layout"),
                    bind_group_layouts: &[&bind_group_layout],
                    push_constant_ranges: &[],
                }),
            ),
            module: &module,
            entry_point: Some("main"),
            cache: None,
            compilation_options: Default::default(),
        });

        Self {
            pipeline,
            bind_group_layout,
            width,
            height,
        }
    }

    /// Advances the automaton by one generation.
    ///
    /// Binds every channel's front for read and back for write plus the
    /// output surface, dispatches enough workgroups to cover the full grid,
    /// submits, and swaps all channels. Submission is the visibility barrier:
    /// wgpu orders queue submissions, so commands recorded afterwards (the
    /// presentation pass included) observe the completed grid and image
    /// writes, never a torn step.
    pub fn step(
        &self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        state: &mut AutomatonState,
        output: &wgpu::TextureView,
    ) {
        let [primary_read, primary_write] = state
            .primary
            .bind_entries(PRIMARY_READ_SLOT, PRIMARY_WRITE_SLOT);
        let [secondary_read, secondary_write] = state
            .secondary
            .bind_entries(SECONDARY_READ_SLOT, SECONDARY_WRITE_SLOT);

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("automaton bind group"),
            layout: &self.bind_group_layout,
            entries: &[
                primary_read,
                primary_write,
                secondary_read,
                secondary_write,
                wgpu::BindGroupEntry {
                    binding: OUTPUT_SLOT,
                    resource: wgpu::BindingResource::TextureView(output),
                },
            ],
        });

        let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("automaton step encoder"),
        });

        {
            let mut pass = encoder.begin_compute_pass(&ComputePassDescriptor {
                label: Some("automaton step pass"),
                timestamp_writes: None,
            });
            pass.set_pipeline(&self.pipeline);
            pass.set_bind_group(0, &bind_group, &[]);

            // Round up so partial workgroups at the edges still cover the
            // whole domain; the kernel bounds-checks the overhang.
            let groups_x = self.width.div_ceil(WORKGROUP_SIZE);
            let groups_y = self.height.div_ceil(WORKGROUP_SIZE);
            pass.dispatch_workgroups(groups_x, groups_y, 1);
        }

        queue.submit(std::iter::once(encoder.finish()));

        state.swap_all();
    }
}
