//! Builders for synthetic sentences.

#![allow(dead_code)]

/// Six-bit text alphabet, indexed by value.
const SIXBIT_ASCII: &[u8; 64] =
    b"@ABCDEFGHIJKLMNOPQRSTUVWXYZ[\\]^_ !\"#$%&'()*+,-./0123456789:;<=>?";

/// A message under construction, one bit per element.
#[derive(Debug, Clone, Default)]
pub struct Bits(Vec<bool>);

impl Bits {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a message with its type, repeat indicator and MMSI.
    pub fn header(message_id: u64, mmsi: u64) -> Self {
        Self::new().uint(message_id, 6).uint(0, 2).uint(mmsi, 30)
    }

    pub fn uint(mut self, value: u64, width: usize) -> Self {
        for i in (0..width).rev() {
            self.0.push((value >> i) & 1 == 1);
        }
        self
    }

    pub fn int(self, value: i64, width: usize) -> Self {
        let mask = if width == 64 { u64::MAX } else { (1 << width) - 1 };
        self.uint(value as u64 & mask, width)
    }

    pub fn flag(self, value: bool) -> Self {
        self.uint(u64::from(value), 1)
    }

    /// Append six-bit text, padded with `@` to `width` bits.
    pub fn text(mut self, text: &str, width: usize) -> Self {
        let mut chars = text.bytes();
        for _ in 0..width / 6 {
            let c = chars.next().unwrap_or(b'@');
            let value = SIXBIT_ASCII.iter().position(|&a| a == c).unwrap();
            self = self.uint(value as u64, 6);
        }
        self
    }

    /// Overwrite `width` bits at `offset` with a two's complement value,
    /// growing the message as needed.
    pub fn set(mut self, offset: usize, value: i64, width: usize) -> Self {
        self.0.resize(self.0.len().max(offset + width), false);
        for i in 0..width {
            self.0[offset + i] = (value >> (width - 1 - i)) & 1 == 1;
        }
        self
    }

    /// Overwrite six-bit text at `offset`, padded with `@` to `width` bits.
    pub fn set_text(mut self, offset: usize, text: &str, width: usize) -> Self {
        let mut chars = text.bytes();
        for i in 0..width / 6 {
            let c = chars.next().unwrap_or(b'@');
            let value = SIXBIT_ASCII.iter().position(|&a| a == c).unwrap();
            self = self.set(offset + i * 6, value as i64, 6);
        }
        self
    }

    /// Append zero bits up to a total length.
    pub fn pad_to(mut self, len: usize) -> Self {
        self.0.resize(len.max(self.0.len()), false);
        self
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Armor into six-bit characters, returning the payload and pad.
    pub fn armor(&self) -> (String, u32) {
        let pad = (6 - self.0.len() % 6) % 6;
        let mut bits = self.0.clone();
        bits.resize(bits.len() + pad, false);

        let payload = bits
            .chunks(6)
            .map(|chunk| chunk.iter().fold(0u8, |acc, &b| (acc << 1) | u8::from(b)))
            .map(|v| char::from(if v < 40 { v + 48 } else { v + 56 }))
            .collect();

        (payload, pad as u32)
    }

    /// Wrap in a single-sentence envelope.
    pub fn sentence(&self) -> String {
        let (payload, pad) = self.armor();
        sentence(1, 1, "", &payload, pad)
    }
}

/// XOR of the bytes between the envelope delimiters.
pub fn checksum(body: &str) -> u8 {
    body.bytes().fold(0, |acc, b| acc ^ b)
}

/// Build an AIVDM sentence with a valid checksum.
pub fn sentence(total: u32, number: u32, sequence: &str, payload: &str, pad: u32) -> String {
    let body = format!("AIVDM,{total},{number},{sequence},A,{payload},{pad}");
    format!("!{body}*{:02X}", checksum(&body))
}

/// A Class A position report with every field settable.
#[derive(Debug, Clone, Copy)]
pub struct ClassA {
    pub message_id: u64,
    pub mmsi: u64,
    pub nav_status: u64,
    pub rot: i64,
    pub sog: u64,
    pub position_accuracy: bool,
    /// Longitude in 1/10000 minutes.
    pub lon: i64,
    /// Latitude in 1/10000 minutes.
    pub lat: i64,
    pub cog: u64,
    pub true_heading: u64,
    pub timestamp: u64,
    pub special_manoeuvre: u64,
}

impl Default for ClassA {
    fn default() -> Self {
        Self {
            message_id: 1,
            mmsi: 244_670_316,
            nav_status: 0,
            rot: 0,
            sog: 123,
            position_accuracy: true,
            lon: 27_000_000,
            lat: 31_200_000,
            cog: 900,
            true_heading: 90,
            timestamp: 30,
            special_manoeuvre: 0,
        }
    }
}

impl ClassA {
    pub fn bits(&self) -> Bits {
        Bits::header(self.message_id, self.mmsi)
            .uint(self.nav_status, 4)
            .int(self.rot, 8)
            .uint(self.sog, 10)
            .flag(self.position_accuracy)
            .int(self.lon, 28)
            .int(self.lat, 27)
            .uint(self.cog, 12)
            .uint(self.true_heading, 9)
            .uint(self.timestamp, 6)
            .uint(self.special_manoeuvre, 2)
            .uint(0, 3)
            .flag(false)
            .pad_to(168)
    }

    pub fn sentence(&self) -> String {
        self.bits().sentence()
    }
}
