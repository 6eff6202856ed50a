use h2_headers_gen::FRAME_HEADER_SIZE;

/// A frame read back from generated bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WireFrame {
    pub length: usize,
    pub frame_type: u8,
    pub flags: u8,
    pub stream_id: u32,
    pub payload: Vec<u8>,
}

impl WireFrame {
    pub fn has(&self, flag: u8) -> bool {
        self.flags & flag != 0
    }
}

/// Split a byte stream into frames, checking that every declared length
/// matches the bytes that follow it.
pub fn split_frames(mut bytes: &[u8]) -> Vec<WireFrame> {
    let mut frames = Vec::new();
    while !bytes.is_empty() {
        assert!(bytes.len() >= FRAME_HEADER_SIZE, "truncated frame header");
        let length = ((bytes[0] as usize) << 16) | ((bytes[1] as usize) << 8) | bytes[2] as usize;
        assert_eq!(bytes[5] & 0x80, 0, "reserved bit set");
        let stream_id = u32::from_be_bytes([bytes[5], bytes[6], bytes[7], bytes[8]]);
        let end = FRAME_HEADER_SIZE + length;
        assert!(bytes.len() >= end, "declared length {} runs past the output", length);
        frames.push(WireFrame {
            length,
            frame_type: bytes[3],
            flags: bytes[4],
            stream_id,
            payload: bytes[FRAME_HEADER_SIZE..end].to_vec(),
        });
        bytes = &bytes[end..];
    }
    frames
}
