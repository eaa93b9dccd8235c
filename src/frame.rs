//! # Rotating byte frame published alongside the fortunes.
//!
//! [`ByteFrame`] holds exactly [`FRAME_LEN`] bytes, initialized to the identity
//! pattern `frame[i] = i`. Each publish cycle rotates the frame left by one
//! position (first byte moves to the end), so after `k` rotations
//! `frame[i] == (i + k) % 256`. The shifting pattern makes individual publish
//! cycles visible on the subscriber side.

/// Number of bytes in a frame.
pub const FRAME_LEN: usize = 256;

/// Fixed-size byte pattern, rotated in place between publishes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ByteFrame {
    data: [u8; FRAME_LEN],
}

impl ByteFrame {
    /// Creates the initial identity pattern `frame[i] = i`.
    pub fn new() -> Self {
        let mut data = [0u8; FRAME_LEN];
        for (i, b) in data.iter_mut().enumerate() {
            *b = i as u8;
        }
        Self { data }
    }

    /// Rotates the frame left by one position (first byte to the back).
    pub fn rotate(&mut self) {
        self.data.rotate_left(1);
    }

    /// Returns an owned copy of the current pattern.
    ///
    /// The transport consumes payloads asynchronously, so publishes always
    /// hand over a snapshot rather than a view into the live frame.
    pub fn snapshot(&self) -> Vec<u8> {
        self.data.to_vec()
    }

    /// Borrows the current pattern.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }
}

impl Default for ByteFrame {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_frame_is_identity_pattern() {
        let frame = ByteFrame::new();
        for (i, b) in frame.as_bytes().iter().enumerate() {
            assert_eq!(*b, i as u8);
        }
    }

    #[test]
    fn rotation_is_cyclic_permutation() {
        let original = ByteFrame::new();
        let mut frame = ByteFrame::new();
        for k in 1..=300usize {
            frame.rotate();
            for i in 0..FRAME_LEN {
                assert_eq!(
                    frame.as_bytes()[i],
                    original.as_bytes()[(i + k) % FRAME_LEN],
                    "mismatch at index {i} after {k} rotations"
                );
            }
        }
    }

    #[test]
    fn full_cycle_restores_original() {
        let mut frame = ByteFrame::new();
        for _ in 0..FRAME_LEN {
            frame.rotate();
        }
        assert_eq!(frame, ByteFrame::new());
    }

    #[test]
    fn snapshot_is_independent_copy() {
        let mut frame = ByteFrame::new();
        let snap = frame.snapshot();
        frame.rotate();
        assert_eq!(snap[0], 0);
        assert_eq!(frame.as_bytes()[0], 1);
    }
}
