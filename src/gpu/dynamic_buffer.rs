//! Vertex/instance buffers that grow with their contents.

use std::marker::PhantomData;

/// Typed GPU buffer that reallocates (2x) when a write outgrows it.
/// Never shrinks.
pub struct GrowableBuffer<T> {
    buffer: wgpu::Buffer,
    label: &'static str,
    usage: wgpu::BufferUsages,
    capacity: usize,
    count: usize,
    _marker: PhantomData<T>,
}

impl<T: bytemuck::Pod> GrowableBuffer<T> {
    /// Empty buffer with room for `capacity` items (at least one).
    #[must_use]
    pub fn new(
        device: &wgpu::Device,
        label: &'static str,
        capacity: usize,
        usage: wgpu::BufferUsages,
    ) -> Self {
        let capacity = capacity.max(1);
        Self {
            buffer: Self::allocate(device, label, capacity, usage),
            label,
            usage,
            capacity,
            count: 0,
            _marker: PhantomData,
        }
    }

    fn allocate(
        device: &wgpu::Device,
        label: &'static str,
        capacity: usize,
        usage: wgpu::BufferUsages,
    ) -> wgpu::Buffer {
        device.create_buffer(&wgpu::BufferDescriptor {
            label: Some(label),
            size: (capacity * std::mem::size_of::<T>()) as u64,
            usage: usage | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        })
    }

    /// Replace the contents, growing if needed. Returns `true` if the
    /// buffer was reallocated.
    pub fn write(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        data: &[T],
    ) -> bool {
        let reallocated = data.len() > self.capacity;
        if reallocated {
            self.capacity = (data.len() * 2).max(self.capacity + 64);
            self.buffer =
                Self::allocate(device, self.label, self.capacity, self.usage);
            log::debug!("{} grown to {} items", self.label, self.capacity);
        }
        if !data.is_empty() {
            queue.write_buffer(&self.buffer, 0, bytemuck::cast_slice(data));
        }
        self.count = data.len();
        reallocated
    }

    /// The underlying buffer.
    pub fn buffer(&self) -> &wgpu::Buffer {
        &self.buffer
    }

    /// Items written by the last `write`.
    pub fn count(&self) -> u32 {
        self.count as u32
    }

    /// Whether the last write was empty.
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Byte range holding the last write.
    pub fn used_slice(&self) -> wgpu::BufferSlice<'_> {
        self.buffer
            .slice(..(self.count * std::mem::size_of::<T>()) as u64)
    }
}
