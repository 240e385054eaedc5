//! Half-byte (nibble) integer coding shared by linear and pic
//!
//! A 32-bit integer is written as a head nibble followed by its significant
//! nibbles, least significant first. Heads 0..=8 count leading zero nibbles;
//! heads 9..=15 count leading `0xf` nibbles plus 8. Nibbles are packed high
//! half first and a trailing odd nibble is padded with zero.

use super::NumpressError;

const MASK: u32 = 0xf000_0000;

/// Packs nibbles into an output buffer
pub(crate) struct HalfByteWriter {
    out: Vec<u8>,
    pending: Option<u8>,
}

impl HalfByteWriter {
    /// Continue writing after whatever `out` already holds
    pub(crate) fn new(out: Vec<u8>) -> Self {
        Self { out, pending: None }
    }

    fn push(&mut self, nibble: u8) {
        match self.pending.take() {
            Some(high) => self.out.push((high << 4) | (nibble & 0xf)),
            None => self.pending = Some(nibble & 0xf),
        }
    }

    /// Write one integer
    pub(crate) fn write_int(&mut self, x: u32) {
        let init = x & MASK;

        let (head, start) = if init == 0 {
            let leading = (0..8).find(|i| x & (MASK >> (4 * i)) != 0).unwrap_or(8);
            (leading as u8, leading)
        } else if init == MASK {
            let leading = (0..8)
                .find(|i| {
                    let m = MASK >> (4 * i);
                    x & m != m
                })
                .unwrap_or(7);
            (leading as u8 + 8, leading)
        } else {
            (0, 0)
        };

        self.push(head);
        for i in start..8 {
            self.push((x >> (4 * (i - start))) as u8);
        }
    }

    /// Flush a pending half byte and return the buffer
    pub(crate) fn finish(mut self) -> Vec<u8> {
        if let Some(high) = self.pending.take() {
            self.out.push(high << 4);
        }
        self.out
    }
}

/// Reads nibbles back out of a packed buffer
pub(crate) struct HalfByteReader<'a> {
    data: &'a [u8],
    nibble: usize,
}

impl<'a> HalfByteReader<'a> {
    pub(crate) fn new(data: &'a [u8]) -> Self {
        Self { data, nibble: 0 }
    }

    /// True once every value has been read; a lone zero nibble at the end is padding
    pub(crate) fn is_done(&self) -> bool {
        let total = self.data.len() * 2;
        if self.nibble >= total {
            return true;
        }
        self.nibble == total - 1 && self.peek() == Some(0)
    }

    fn peek(&self) -> Option<u8> {
        let byte = *self.data.get(self.nibble / 2)?;
        Some(if self.nibble % 2 == 0 { byte >> 4 } else { byte & 0xf })
    }

    fn next_nibble(&mut self) -> Result<u8, NumpressError> {
        let nibble = self
            .peek()
            .ok_or(NumpressError::Corrupt("half-byte stream ended inside an integer"))?;
        self.nibble += 1;
        Ok(nibble)
    }

    /// Read one integer
    pub(crate) fn read_int(&mut self) -> Result<u32, NumpressError> {
        let head = self.next_nibble()?;

        let (n, mut res) = if head <= 8 {
            (head as usize, 0u32)
        } else {
            let n = (head - 8) as usize;
            let filled = (0..n).fold(0u32, |acc, i| acc | (MASK >> (4 * i)));
            (n, filled)
        };

        for i in n..8 {
            let hb = self.next_nibble()?;
            res |= (hb as u32) << ((i - n) * 4);
        }
        Ok(res)
    }
}
