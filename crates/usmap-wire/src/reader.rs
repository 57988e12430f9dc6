use crate::error::WireError;

/// Bounds-checked little-endian cursor over a byte slice.
///
/// Every read checks that `position + count` fits inside the buffer
/// before touching it. A failed read returns
/// [`WireError::UnexpectedEof`] and leaves the position where it was,
/// so the offset in the error always points at the start of the field
/// that could not be read.
///
/// ```text
///   buf:  [ 0x30 0xC4 | 0x03 | ... ]
///                       ^
///                       pos (advances only on success)
/// ```
#[derive(Clone, Debug)]
pub struct ByteReader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> ByteReader<'a> {
    /// Create a reader positioned at the first byte of `buf`.
    #[must_use]
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    /// Current byte offset from the start of the buffer.
    #[must_use]
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Number of bytes left to read.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    /// Total length of the underlying buffer.
    #[must_use]
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Consume exactly `count` bytes and return them as a borrowed slice.
    ///
    /// # Errors
    ///
    /// [`WireError::UnexpectedEof`] if fewer than `count` bytes remain.
    pub fn read_bytes(&mut self, count: usize) -> Result<&'a [u8], WireError> {
        let end = self
            .pos
            .checked_add(count)
            .filter(|&end| end <= self.buf.len())
            .ok_or(WireError::UnexpectedEof {
                offset: self.pos,
                needed: count,
                remaining: self.remaining(),
            })?;
        let bytes = &self.buf[self.pos..end];
        self.pos = end;
        Ok(bytes)
    }

    /// Advance past `count` bytes without interpreting them.
    ///
    /// # Errors
    ///
    /// [`WireError::UnexpectedEof`] if fewer than `count` bytes remain.
    pub fn skip(&mut self, count: usize) -> Result<(), WireError> {
        self.read_bytes(count).map(|_| ())
    }

    fn read_array<const N: usize>(&mut self) -> Result<[u8; N], WireError> {
        let bytes = self.read_bytes(N)?;
        let mut out = [0u8; N];
        out.copy_from_slice(bytes);
        Ok(out)
    }

    /// # Errors
    ///
    /// [`WireError::UnexpectedEof`] at end of input.
    pub fn read_u8(&mut self) -> Result<u8, WireError> {
        Ok(self.read_array::<1>()?[0])
    }

    /// # Errors
    ///
    /// [`WireError::UnexpectedEof`] at end of input.
    pub fn read_i8(&mut self) -> Result<i8, WireError> {
        Ok(i8::from_le_bytes(self.read_array()?))
    }

    /// # Errors
    ///
    /// [`WireError::UnexpectedEof`] if fewer than 2 bytes remain.
    pub fn read_u16(&mut self) -> Result<u16, WireError> {
        Ok(u16::from_le_bytes(self.read_array()?))
    }

    /// # Errors
    ///
    /// [`WireError::UnexpectedEof`] if fewer than 2 bytes remain.
    pub fn read_i16(&mut self) -> Result<i16, WireError> {
        Ok(i16::from_le_bytes(self.read_array()?))
    }

    /// # Errors
    ///
    /// [`WireError::UnexpectedEof`] if fewer than 4 bytes remain.
    pub fn read_u32(&mut self) -> Result<u32, WireError> {
        Ok(u32::from_le_bytes(self.read_array()?))
    }

    /// # Errors
    ///
    /// [`WireError::UnexpectedEof`] if fewer than 4 bytes remain.
    pub fn read_i32(&mut self) -> Result<i32, WireError> {
        Ok(i32::from_le_bytes(self.read_array()?))
    }

    /// # Errors
    ///
    /// [`WireError::UnexpectedEof`] if fewer than 8 bytes remain.
    pub fn read_u64(&mut self) -> Result<u64, WireError> {
        Ok(u64::from_le_bytes(self.read_array()?))
    }

    /// # Errors
    ///
    /// [`WireError::UnexpectedEof`] if fewer than 8 bytes remain.
    pub fn read_i64(&mut self) -> Result<i64, WireError> {
        Ok(i64::from_le_bytes(self.read_array()?))
    }

    /// Read a single byte as a boolean. Any nonzero value is `true`.
    ///
    /// # Errors
    ///
    /// [`WireError::UnexpectedEof`] at end of input.
    pub fn read_bool(&mut self) -> Result<bool, WireError> {
        Ok(self.read_u8()? != 0)
    }

    /// Read exactly `len` bytes and interpret them as UTF-8 text.
    ///
    /// Invalid sequences are replaced with U+FFFD rather than rejected;
    /// nothing is trimmed.
    ///
    /// # Errors
    ///
    /// [`WireError::UnexpectedEof`] if fewer than `len` bytes remain.
    pub fn read_string(&mut self, len: usize) -> Result<String, WireError> {
        let bytes = self.read_bytes(len)?;
        Ok(String::from_utf8_lossy(bytes).into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_little_endian_integers() {
        let buf = [
            0x01, // u8
            0x34, 0x12, // u16
            0x78, 0x56, 0x34, 0x12, // u32
            0xFF, 0xFF, 0xFF, 0xFF, // i32 = -1
            0x08, 0x07, 0x06, 0x05, 0x04, 0x03, 0x02, 0x01, // u64
        ];
        let mut r = ByteReader::new(&buf);
        assert_eq!(r.read_u8().unwrap(), 0x01);
        assert_eq!(r.read_u16().unwrap(), 0x1234);
        assert_eq!(r.read_u32().unwrap(), 0x1234_5678);
        assert_eq!(r.read_i32().unwrap(), -1);
        assert_eq!(r.read_u64().unwrap(), 0x0102_0304_0506_0708);
        assert_eq!(r.remaining(), 0);
    }

    #[test]
    fn signed_reads() {
        let buf = [0x80, 0xFE, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF];
        let mut r = ByteReader::new(&buf);
        assert_eq!(r.read_i8().unwrap(), -128);
        assert_eq!(r.read_i16().unwrap(), -2);
        assert_eq!(r.read_i64().unwrap(), -1);
    }

    #[test]
    fn bool_is_any_nonzero() {
        let mut r = ByteReader::new(&[0x00, 0x01, 0x7F]);
        assert!(!r.read_bool().unwrap());
        assert!(r.read_bool().unwrap());
        assert!(r.read_bool().unwrap());
    }

    #[test]
    fn read_string_takes_exact_length() {
        let mut r = ByteReader::new(b"Actor\0tail");
        assert_eq!(r.read_string(6).unwrap(), "Actor\0");
        assert_eq!(r.position(), 6);
        assert_eq!(r.read_string(4).unwrap(), "tail");
    }

    #[test]
    fn read_string_replaces_invalid_utf8() {
        let mut r = ByteReader::new(&[b'a', 0xFF, b'b']);
        assert_eq!(r.read_string(3).unwrap(), "a\u{FFFD}b");
    }

    #[test]
    fn failed_read_does_not_advance() {
        let mut r = ByteReader::new(&[0xAA, 0xBB, 0xCC]);
        r.read_u8().unwrap();
        let err = r.read_u32().unwrap_err();
        assert!(matches!(
            err,
            WireError::UnexpectedEof {
                offset: 1,
                needed: 4,
                remaining: 2
            }
        ));
        assert_eq!(r.position(), 1);
        assert_eq!(r.read_u16().unwrap(), 0xCCBB);
    }

    #[test]
    fn empty_buffer_fails_first_read() {
        let mut r = ByteReader::new(&[]);
        assert!(r.is_empty());
        assert!(matches!(
            r.read_u8(),
            Err(WireError::UnexpectedEof { offset: 0, .. })
        ));
    }

    #[test]
    fn huge_length_does_not_overflow() {
        let mut r = ByteReader::new(&[0u8; 4]);
        r.skip(2).unwrap();
        assert!(matches!(
            r.read_bytes(usize::MAX),
            Err(WireError::UnexpectedEof { offset: 2, .. })
        ));
        assert_eq!(r.position(), 2);
    }
}
