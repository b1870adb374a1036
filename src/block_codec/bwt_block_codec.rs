use super::error::BlockError;
use super::header::{header_len, read_header, write_header, MAX_HEADER_LEN};
use super::BwtTransform;
use crate::bwt_algorithms::bwt::Bwt;
use log::{debug, error, trace, warn};

/// Encodes and decodes BWT blocks: header (primary index) followed by the BWT data.
///
/// The codec keeps no state of its own. The primary index lives in the wrapped transform between
/// the transform step and the header step, so a codec must not be shared by overlapping calls.
pub struct BwtBlockCodec<T: BwtTransform = Bwt> {
    bwt: T,
}

impl BwtBlockCodec<Bwt> {
    pub fn new() -> Self {
        Self { bwt: Bwt::new() }
    }
}

impl Default for BwtBlockCodec<Bwt> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: BwtTransform> BwtBlockCodec<T> {
    /// Wrap an alternate BWT implementation.
    pub fn with_transform(bwt: T) -> Self {
        Self { bwt }
    }

    /// Access the wrapped transform.
    pub fn transform(&self) -> &T {
        &self.bwt
    }

    /// Upper bound of the encoded size for a block of src_len bytes (data plus largest header).
    pub fn max_encoded_length(&self, src_len: usize) -> usize {
        src_len + MAX_HEADER_LEN
    }

    /// Transform count bytes of src starting at src_idx and write the encoded block to dst at dst_idx.
    /// dst must have room for max_encoded_length(count) bytes. Returns the number of bytes written.
    pub fn encode(
        &mut self,
        src: &[u8],
        src_idx: usize,
        count: usize,
        dst: &mut [u8],
        dst_idx: usize,
    ) -> Result<usize, BlockError> {
        let input = src
            .get(src_idx..src_idx.saturating_add(count))
            .ok_or(BlockError::OutOfBounds)?;
        let end = dst_idx.saturating_add(self.max_encoded_length(count));
        if end > dst.len() {
            warn!(
                "Output buffer holds {} bytes, encoding needs {}.",
                dst.len(),
                end
            );
            return Err(BlockError::OutOfBounds);
        }

        // Apply the forward transform
        if !self.bwt.forward(input, &mut dst[dst_idx..dst_idx + count]) {
            error!("BWT forward transform failed on a block of {} bytes.", count);
            return Err(BlockError::Transform);
        }

        let primary_index = self.bwt.primary_index();
        let header_size = match header_len(primary_index) {
            Some(len) => len,
            None => {
                error!("Primary index {} is too large for a header.", primary_index);
                return Err(BlockError::PrimaryIndexTooLarge(primary_index));
            }
        };

        // Shift the data to leave space for the header (ranges overlap)
        dst.copy_within(dst_idx..dst_idx + count, dst_idx + header_size);
        write_header(primary_index, &mut dst[dst_idx..dst_idx + header_size]);

        debug!(
            "Encoded {} bytes with primary index {} ({} byte header).",
            count, primary_index, header_size
        );
        trace!("\rHeader: {:02x?}", &dst[dst_idx..dst_idx + header_size]);
        Ok(header_size + count)
    }

    /// Decode the block of count bytes (header included) at src_idx and write the original data to dst
    /// at dst_idx. Returns the number of bytes produced.
    pub fn decode(
        &mut self,
        src: &[u8],
        src_idx: usize,
        count: usize,
        dst: &mut [u8],
        dst_idx: usize,
    ) -> Result<usize, BlockError> {
        let block = src
            .get(src_idx..src_idx.saturating_add(count))
            .ok_or(BlockError::OutOfBounds)?;

        // Read block header (mode + primary index)
        let header = read_header(block).map_err(|e| {
            warn!("Rejected block: {}.", e);
            e
        })?;

        // A header with no data is an empty block
        if count == header.len {
            debug!("Empty block, nothing to decode.");
            return Ok(0);
        }

        let payload = &block[header.len..];
        let output = dst
            .get_mut(dst_idx..dst_idx.saturating_add(payload.len()))
            .ok_or(BlockError::OutOfBounds)?;

        debug!(
            "Decoding {} bytes with primary index {} ({} byte header).",
            payload.len(),
            header.primary_index,
            header.len
        );
        self.bwt.set_primary_index(header.primary_index);

        // Apply the inverse transform
        self.bwt.inverse(payload, output).ok_or_else(|| {
            error!("BWT inverse transform failed on a block of {} bytes.", payload.len());
            BlockError::Transform
        })
    }

    /// Encode a whole slice into a new vec.
    pub fn encode_block(&mut self, data: &[u8]) -> Result<Vec<u8>, BlockError> {
        let mut out = vec![0_u8; self.max_encoded_length(data.len())];
        let written = self.encode(data, 0, data.len(), &mut out, 0)?;
        out.truncate(written);
        Ok(out)
    }

    /// Decode a whole encoded block into a new vec.
    pub fn decode_block(&mut self, block: &[u8]) -> Result<Vec<u8>, BlockError> {
        let mut out = vec![0_u8; block.len().saturating_sub(1)];
        let produced = self.decode(block, 0, block.len(), &mut out, 0)?;
        out.truncate(produced);
        Ok(out)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    /// Copies the data unchanged and reports a fixed primary index. Counts inverse calls.
    struct FixedIndex {
        primary_index: u32,
        fail: bool,
        inverse_calls: usize,
    }

    impl FixedIndex {
        fn new(primary_index: u32) -> Self {
            Self {
                primary_index,
                fail: false,
                inverse_calls: 0,
            }
        }
    }

    impl BwtTransform for FixedIndex {
        fn forward(&mut self, input: &[u8], output: &mut [u8]) -> bool {
            if self.fail {
                return false;
            }
            output.copy_from_slice(input);
            true
        }

        fn inverse(&mut self, input: &[u8], output: &mut [u8]) -> Option<usize> {
            self.inverse_calls += 1;
            if self.fail {
                return None;
            }
            output[..input.len()].copy_from_slice(input);
            Some(input.len())
        }

        fn primary_index(&self) -> u32 {
            self.primary_index
        }

        fn set_primary_index(&mut self, primary_index: u32) {
            self.primary_index = primary_index;
        }
    }

    fn pattern(len: usize) -> Vec<u8> {
        (0..len).map(|i| (i * 7 + i / 251) as u8).collect()
    }

    #[test]
    fn max_encoded_length_test() {
        let codec = BwtBlockCodec::new();
        assert_eq!(codec.max_encoded_length(0), 4);
        assert_eq!(codec.max_encoded_length(900_000), 900_004);
    }

    #[test]
    fn encode_300_test() {
        let mut codec = BwtBlockCodec::with_transform(FixedIndex::new(300));
        let data = b"payload";
        let mut out = vec![0_u8; codec.max_encoded_length(data.len())];
        assert_eq!(codec.encode(data, 0, data.len(), &mut out, 0), Ok(9));
        assert_eq!(&out[..2], &[0x41, 0x2c]);
        assert_eq!(&out[2..9], data);
    }

    #[test]
    fn decode_300_test() {
        let mut codec = BwtBlockCodec::with_transform(FixedIndex::new(0));
        let block = [0x41, 0x2c, b'x', b'y', b'z'];
        let mut out = [0_u8; 3];
        assert_eq!(codec.decode(&block, 0, block.len(), &mut out, 0), Ok(3));
        assert_eq!(codec.transform().primary_index(), 300);
        assert_eq!(&out, b"xyz");
    }

    #[test]
    fn minimal_header_test() {
        for (idx, expected) in [
            (0, 1),
            (63, 1),
            (64, 2),
            (16_383, 2),
            (16_384, 3),
            (4_194_303, 3),
            (4_194_304, 4),
        ] {
            let mut codec = BwtBlockCodec::with_transform(FixedIndex::new(idx));
            let encoded = codec.encode_block(b"abc").unwrap();
            assert_eq!(encoded.len(), expected + 3, "index {}", idx);
            assert_eq!((encoded[0] >> 6) as usize, expected - 1);
        }
    }

    #[test]
    fn round_trip_boundaries_test() {
        for len in [0, 1, 2, 63, 64, 65, 1000, 16_383, 16_384, 4_194_303, 4_194_304] {
            let data = pattern(len);
            let mut indices = vec![0, len / 2, len.saturating_sub(1)];
            indices.dedup();
            for idx in indices {
                let mut codec = BwtBlockCodec::with_transform(FixedIndex::new(idx as u32));
                let encoded = codec.encode_block(&data).unwrap();
                codec.transform_mut_for_test().primary_index = u32::MAX;
                let decoded = codec.decode_block(&encoded).unwrap();
                assert_eq!(decoded, data, "length {} index {}", len, idx);
                // Header-only blocks never reach the transform
                if len > 0 {
                    assert_eq!(codec.transform().primary_index(), idx as u32);
                }
            }
        }
    }

    #[test]
    fn encode_at_offsets_test() {
        let mut codec = BwtBlockCodec::with_transform(FixedIndex::new(5000));
        let src = pattern(300);
        let mut dst = vec![0xee_u8; 10 + 200 + 4 + 10];
        let written = codec.encode(&src, 50, 200, &mut dst, 10).unwrap();
        assert_eq!(written, 202);
        // Nothing before the offset is touched
        assert_eq!(&dst[..10], &[0xee; 10]);
        assert_eq!(&dst[12..212], &src[50..250]);

        let mut back = vec![0_u8; 205];
        assert_eq!(codec.decode(&dst, 10, written, &mut back, 5), Ok(200));
        assert_eq!(&back[5..], &src[50..250]);
    }

    #[test]
    fn header_only_block_test() {
        let mut codec = BwtBlockCodec::with_transform(FixedIndex::new(0));
        let mut out = [0_u8; 4];
        assert_eq!(codec.decode(&[0x00], 0, 1, &mut out, 0), Ok(0));
        assert_eq!(codec.decode(&[0x81, 2, 3], 0, 3, &mut out, 0), Ok(0));
        assert_eq!(codec.transform().inverse_calls, 0);
    }

    #[test]
    fn malformed_header_test() {
        let mut codec = BwtBlockCodec::with_transform(FixedIndex::new(0));
        let mut out = [0_u8; 8];
        // Four byte header declared, only two bytes in the block
        let block = [0xc0, 0x01, 0x02, 0x03];
        assert_eq!(
            codec.decode(&block, 0, 2, &mut out, 0),
            Err(BlockError::MalformedHeader {
                declared: 4,
                available: 2
            })
        );
        assert_eq!(
            codec.decode(&block, 0, 0, &mut out, 0),
            Err(BlockError::MalformedHeader {
                declared: 1,
                available: 0
            })
        );
        assert_eq!(codec.transform().inverse_calls, 0);
    }

    #[test]
    fn out_of_bounds_test() {
        let mut codec = BwtBlockCodec::with_transform(FixedIndex::new(0));
        let src = [1_u8; 8];
        let mut small = [0_u8; 10];
        // 8 bytes of data need 12 bytes of room
        assert_eq!(
            codec.encode(&src, 0, 8, &mut small, 0),
            Err(BlockError::OutOfBounds)
        );
        assert_eq!(small, [0; 10]);
        assert_eq!(
            codec.encode(&src, 4, 8, &mut small, 0),
            Err(BlockError::OutOfBounds)
        );
        assert_eq!(
            codec.decode(&src, 4, 8, &mut small, 0),
            Err(BlockError::OutOfBounds)
        );
        let block = [0x00, 1, 2, 3, 4];
        let mut tiny = [0_u8; 3];
        assert_eq!(
            codec.decode(&block, 0, 5, &mut tiny, 0),
            Err(BlockError::OutOfBounds)
        );
    }

    #[test]
    fn transform_failure_test() {
        let mut bwt = FixedIndex::new(0);
        bwt.fail = true;
        let mut codec = BwtBlockCodec::with_transform(bwt);
        let mut out = [0x55_u8; 8];
        assert_eq!(
            codec.encode(b"abcd", 0, 4, &mut out, 0),
            Err(BlockError::Transform)
        );
        assert_eq!(out, [0x55; 8]);
        assert_eq!(
            codec.decode(&[0x01, b'a', b'b'], 0, 3, &mut out, 0),
            Err(BlockError::Transform)
        );
        assert_eq!(codec.transform().inverse_calls, 1);
    }

    #[test]
    fn index_too_large_test() {
        let mut codec = BwtBlockCodec::with_transform(FixedIndex::new(1 << 30));
        assert_eq!(
            codec.encode_block(b"abc"),
            Err(BlockError::PrimaryIndexTooLarge(1 << 30))
        );
    }

    #[test]
    fn bwt_round_trip_test() {
        let mut codec = BwtBlockCodec::new();
        let texts: [&[u8]; 6] = [
            b"",
            b"a",
            b"banana",
            b"mississippi",
            b"3.14159265358979323846264338327950288419716939937510",
            b"SIX.MIXED.PIXIES.SIFT.SIXTY.PIXIE.DUST.BOXES",
        ];
        for text in texts {
            let encoded = codec.encode_block(text).unwrap();
            assert_eq!(encoded.len(), text.len() + 1);
            assert_eq!(codec.decode_block(&encoded).unwrap(), text);
        }
    }

    #[test]
    fn bwt_header_len_test() {
        let mut codec = BwtBlockCodec::new();
        let data: Vec<u8> = (0..5_000_u32)
            .map(|i| (i.wrapping_mul(2_654_435_761) >> 24) as u8)
            .collect();
        let encoded = codec.encode_block(&data).unwrap();
        let primary_index = codec.transform().primary_index();
        assert_eq!(
            encoded.len() - data.len(),
            header_len(primary_index).unwrap()
        );
        assert_eq!(codec.decode_block(&encoded).unwrap(), data);
    }

    impl<T: BwtTransform> BwtBlockCodec<T> {
        fn transform_mut_for_test(&mut self) -> &mut T {
            &mut self.bwt
        }
    }
}
