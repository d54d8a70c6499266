/// A `BytesReader` is a simple helper type to read little-endian values from
/// a slice. This is most useful for parsers of fixed-layout payloads, where
/// fields are consumed one after another.
pub(crate) struct BytesReader<'a> {
    buf: &'a [u8],
    idx: usize,
}

impl<'a> BytesReader<'a> {
    /// Construct a new `BytesReader`
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf, idx: 0 }
    }

    /// Get the next `N` bytes as an array, if there are enough left
    fn next_array<const N: usize>(&mut self) -> Option<[u8; N]> {
        let bytes = self.buf.get(self.idx..self.idx + N)?;
        self.idx += N;
        bytes.try_into().ok()
    }

    pub fn read_u8(&mut self) -> Option<u8> {
        self.next_array::<1>().map(|[b]| b)
    }

    pub fn read_i8(&mut self) -> Option<i8> {
        self.next_array::<1>().map(i8::from_le_bytes)
    }

    pub fn read_u16(&mut self) -> Option<u16> {
        self.next_array().map(u16::from_le_bytes)
    }

    pub fn read_i32(&mut self) -> Option<i32> {
        self.next_array().map(i32::from_le_bytes)
    }
}
