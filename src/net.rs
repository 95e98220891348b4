//! Outgoing client message buffer and the camera's spectating-position write.
//!
//! Only the pieces the camera touches live here; the rest of the client
//! protocol is owned by the networking layer.

/// Object tags written at the start of each client message section
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ClientNetObject {
    EndOfMessage = 0,
    SyncIds = 1,
    ChatMessage = 2,
    Vote = 3,
    CharacterInput = 4,
    EntityState = 5,
    SpectatingPos = 6,
}

impl ClientNetObject {
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::EndOfMessage),
            1 => Some(Self::SyncIds),
            2 => Some(Self::ChatMessage),
            3 => Some(Self::Vote),
            4 => Some(Self::CharacterInput),
            5 => Some(Self::EntityState),
            6 => Some(Self::SpectatingPos),
            _ => None,
        }
    }
}

/// Little-endian byte buffer for an outgoing client message
#[derive(Debug, Clone, Default)]
pub struct OutgoingMessage {
    buf: Vec<u8>,
}

impl OutgoingMessage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn write_u8(&mut self, value: u8) {
        self.buf.push(value);
    }

    pub fn write_f32(&mut self, value: f32) {
        self.buf.extend_from_slice(&value.to_le_bytes());
    }

    pub fn write_tag(&mut self, tag: ClientNetObject) {
        self.write_u8(tag as u8);
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }
}

/// Read a little-endian f32 at `offset`
pub fn read_f32(buf: &[u8], offset: usize) -> Option<f32> {
    let bytes: [u8; 4] = buf.get(offset..offset + 4)?.try_into().ok()?;
    Some(f32::from_le_bytes(bytes))
}
