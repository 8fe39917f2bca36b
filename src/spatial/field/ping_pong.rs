use super::*;

/// Two same-shaped fields used alternately as read source and write target
///
/// Iteration `i` reads buffer `i % 2` and writes the other one, so a pass
/// never reads and writes the same buffer. Buffers keep their contents
/// between frames, so the first iteration of a frame starts from the last
/// frame's estimate. Write counts are kept for instrumentation.
#[derive(Clone, Debug)]
pub struct PingPong<T> {
    buffers: [GridField<T>; 2],
    writes: [u32; 2],
    last_written: Option<usize>,
}

impl<T: FieldValue> PingPong<T> {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            buffers: [GridField::new(width, height), GridField::new(width, height)],
            writes: [0, 0],
            last_written: None,
        }
    }

    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        self.buffers[0].dimensions()
    }

    #[inline]
    pub fn buffer(&self, idx: usize) -> &GridField<T> {
        &self.buffers[idx & 1]
    }

    #[inline]
    pub fn buffer_mut(&mut self, idx: usize) -> &mut GridField<T> {
        &mut self.buffers[idx & 1]
    }

    /// (source, target) for iteration `iteration`; counts the write.
    pub fn pass(&mut self, iteration: u32) -> (&GridField<T>, &mut GridField<T>) {
        let read = (iteration & 1) as usize;
        let write = read ^ 1;
        self.writes[write] += 1;
        self.last_written = Some(write);
        let [a, b] = &mut self.buffers;
        if read == 0 {
            (&*a, b)
        } else {
            (&*b, a)
        }
    }

    /// Index of the buffer written by the most recent pass
    #[inline]
    pub fn last_written(&self) -> Option<usize> {
        self.last_written
    }

    /// Per-buffer write counts since the last `reset_write_counts`
    #[inline]
    pub fn write_counts(&self) -> [u32; 2] {
        self.writes
    }

    pub fn reset_write_counts(&mut self) {
        self.writes = [0, 0];
    }

    pub fn clear(&mut self) {
        for b in self.buffers.iter_mut() {
            b.fill(T::default());
        }
        self.writes = [0, 0];
        self.last_written = None;
    }
}
