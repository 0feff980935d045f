//! Little-endian field cursors for fixed-layout records
//!
//! Records are packed with no padding, so encoding is a straight walk over
//! the fields in declaration order. Callers size the slice from the record's
//! `SIZE`; running off the end is a layout bug, not a runtime condition.

pub(crate) struct Writer<'a> {
    buf: &'a mut [u8],
    pos: usize,
}

impl<'a> Writer<'a> {
    pub(crate) fn new(buf: &'a mut [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    fn put<const N: usize>(&mut self, bytes: [u8; N]) {
        self.buf[self.pos..self.pos + N].copy_from_slice(&bytes);
        self.pos += N;
    }

    pub(crate) fn u8(&mut self, v: u8) {
        self.put([v]);
    }

    pub(crate) fn u16(&mut self, v: u16) {
        self.put(v.to_le_bytes());
    }

    pub(crate) fn i16(&mut self, v: i16) {
        self.put(v.to_le_bytes());
    }

    pub(crate) fn u32(&mut self, v: u32) {
        self.put(v.to_le_bytes());
    }

    pub(crate) fn i32(&mut self, v: i32) {
        self.put(v.to_le_bytes());
    }

    pub(crate) fn f32(&mut self, v: f32) {
        self.put(v.to_le_bytes());
    }

    pub(crate) fn position(&self) -> usize {
        self.pos
    }
}

pub(crate) struct Reader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    pub(crate) fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    fn take<const N: usize>(&mut self) -> [u8; N] {
        let mut out = [0u8; N];
        out.copy_from_slice(&self.buf[self.pos..self.pos + N]);
        self.pos += N;
        out
    }

    pub(crate) fn u8(&mut self) -> u8 {
        self.take::<1>()[0]
    }

    pub(crate) fn u16(&mut self) -> u16 {
        u16::from_le_bytes(self.take())
    }

    pub(crate) fn i16(&mut self) -> i16 {
        i16::from_le_bytes(self.take())
    }

    pub(crate) fn u32(&mut self) -> u32 {
        u32::from_le_bytes(self.take())
    }

    pub(crate) fn i32(&mut self) -> i32 {
        i32::from_le_bytes(self.take())
    }

    pub(crate) fn f32(&mut self) -> f32 {
        f32::from_le_bytes(self.take())
    }
}
