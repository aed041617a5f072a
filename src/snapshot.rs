use std::fmt;

/// Immutable capture of the surface's pixel contents at one instant.
///
/// A snapshot never aliases the live buffer: capturing copies the pixels, so
/// later drawing cannot retroactively change what was captured. Snapshots are
/// owned either by the history stacks (committed strokes) or by the active
/// stroke session (the pre-stroke snapshot used for shape previews).
#[derive(Clone, PartialEq, Eq)]
pub struct Snapshot {
    data: Vec<u8>,
    width: u32,
    height: u32,
}

impl Snapshot {
    /// Wrap raw RGBA bytes, row-major, 4 bytes per pixel
    pub fn new(width: u32, height: u32, data: Vec<u8>) -> Self {
        debug_assert_eq!(data.len(), (width as usize) * (height as usize) * 4);
        Self { data, width, height }
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Memory held by this snapshot's pixel data
    pub fn size_bytes(&self) -> usize {
        self.data.len()
    }
}

// Keep assertion failures readable instead of dumping the whole pixel buffer
impl fmt::Debug for Snapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Snapshot")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("bytes", &self.data.len())
            .finish()
    }
}
