//! Double-buffered channel state
//!
//! Each channel of the automaton owns exactly two device grids: *front*, the
//! last-written generation the kernel reads, and *back*, the write target of
//! the next step. The pair swaps roles as a unit after every step; swapping is
//! a handle exchange, never a copy, because at 512x512 a copy would dominate
//! frame time.

use rand::rngs::StdRng;

use crate::sim::grid::{fill_cells, InitRule};

/// One channel's front/back grid pair in device memory.
///
/// Front and back are distinct allocations for the lifetime of the pair; the
/// only thing [`BufferPair::swap`] exchanges is which handle plays which role.
pub struct BufferPair {
    front: wgpu::Buffer,
    back: wgpu::Buffer,
    width: u32,
    height: u32,
}

impl BufferPair {
    /// Reserves two equally sized device grids of `width * height` f32 cells.
    ///
    /// Allocation refusal surfaces through the device error handler and is
    /// fatal to startup; no fallback allocation path exists.
    pub fn allocate(device: &wgpu::Device, width: u32, height: u32, label: &str) -> Self {
        let size = (width as u64) * (height as u64) * std::mem::size_of::<f32>() as u64;
        let allocate_grid = |role: &str| {
            let label = format!("{label} {role} grid");
            device.create_buffer(&wgpu::BufferDescriptor {
                label: Some(&label),
                size,
                usage: wgpu::BufferUsages::STORAGE
                    | wgpu::BufferUsages::COPY_DST
                    | wgpu::BufferUsages::COPY_SRC,
                mapped_at_creation: false,
            })
        };

        Self {
            front: allocate_grid("front"),
            back: allocate_grid("back"),
            width,
            height,
        }
    }

    /// Sets every cell of the front grid by evaluating `rule`.
    ///
    /// Called exactly once per grid, before the first step.
    pub fn init_front(&self, queue: &wgpu::Queue, rule: InitRule, rng: &mut StdRng) {
        let cells = fill_cells(rule, self.width, self.height, rng);
        queue.write_buffer(&self.front, 0, bytemuck::cast_slice(&cells));
    }

    /// Sets every cell of the back grid by evaluating `rule`.
    pub fn init_back(&self, queue: &wgpu::Queue, rule: InitRule, rng: &mut StdRng) {
        let cells = fill_cells(rule, self.width, self.height, rng);
        queue.write_buffer(&self.back, 0, bytemuck::cast_slice(&cells));
    }

    /// Exposes the pair to the compute stage: front at the read slot, back at
    /// the write slot for the step being recorded.
    pub fn bind_entries(&self, read_slot: u32, write_slot: u32) -> [wgpu::BindGroupEntry<'_>; 2] {
        [
            wgpu::BindGroupEntry {
                binding: read_slot,
                resource: self.front.as_entire_binding(),
            },
            wgpu::BindGroupEntry {
                binding: write_slot,
                resource: self.back.as_entire_binding(),
            },
        ]
    }

    /// Exchanges the front/back roles. O(1); cell data is untouched.
    pub fn swap(&mut self) {
        std::mem::swap(&mut self.front, &mut self.back);
    }

    /// The grid currently in the readable role.
    pub fn front(&self) -> &wgpu::Buffer {
        &self.front
    }

    /// The grid currently in the writable role.
    pub fn back(&self) -> &wgpu::Buffer {
        &self.back
    }

    /// Size of one grid in bytes.
    pub fn grid_size_bytes(&self) -> u64 {
        (self.width as u64) * (self.height as u64) * std::mem::size_of::<f32>() as u64
    }
}

/// The automaton's full state: exactly two channels of identical dimensions.
pub struct AutomatonState {
    pub primary: BufferPair,
    pub secondary: BufferPair,
}

impl AutomatonState {
    /// Allocates both channels. All four grids share `width * height`.
    pub fn allocate(device: &wgpu::Device, width: u32, height: u32) -> Self {
        Self {
            primary: BufferPair::allocate(device, width, height, "primary channel"),
            secondary: BufferPair::allocate(device, width, height, "secondary channel"),
        }
    }

    /// Populates the startup generation: the primary channel saturated on both
    /// grids, the secondary channel sparsely seeded in front and cleared in
    /// back.
    pub fn seed_initial_state(&self, queue: &wgpu::Queue, spawn_probability: f64, rng: &mut StdRng) {
        self.primary.init_front(queue, InitRule::Ones, rng);
        self.primary.init_back(queue, InitRule::Ones, rng);
        self.secondary
            .init_front(queue, InitRule::Sparse(spawn_probability), rng);
        self.secondary.init_back(queue, InitRule::Zeros, rng);
    }

    /// Swaps every channel as a unit. Swapping only one half of the state
    /// would desynchronize the channels, so no per-channel entry point exists.
    pub fn swap_all(&mut self) {
        self.primary.swap();
        self.secondary.swap();
    }
}
