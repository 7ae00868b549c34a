//! Minimal protobuf wire primitives.
//!
//! Only what vector tile serialization needs: varints, zig-zag, and
//! tag-length framed fields appended to a byte buffer. Submessages are
//! built in scratch buffers so their length is known before framing.

pub const WIRE_VARINT: u32 = 0;
pub const WIRE_FIXED64: u32 = 1;
pub const WIRE_LEN: u32 = 2;

/// Maps signed integers to unsigned so small magnitudes stay small.
pub fn zigzag32(v: i32) -> u32 {
    ((v as u32) << 1) ^ ((v >> 31) as u32)
}

/// Base-128 little-endian varint.
pub fn write_varint(buf: &mut Vec<u8>, mut v: u64) {
    while v >= 0x80 {
        buf.push(v as u8 | 0x80);
        v >>= 7;
    }
    buf.push(v as u8);
}

pub fn write_key(buf: &mut Vec<u8>, field: u32, wire_type: u32) {
    write_varint(buf, u64::from(field << 3 | wire_type));
}

pub fn write_uint32(buf: &mut Vec<u8>, field: u32, value: u32) {
    write_key(buf, field, WIRE_VARINT);
    write_varint(buf, u64::from(value));
}

pub fn write_uint64(buf: &mut Vec<u8>, field: u32, value: u64) {
    write_key(buf, field, WIRE_VARINT);
    write_varint(buf, value);
}

pub fn write_bool(buf: &mut Vec<u8>, field: u32, value: bool) {
    write_key(buf, field, WIRE_VARINT);
    write_varint(buf, u64::from(value));
}

pub fn write_double(buf: &mut Vec<u8>, field: u32, value: f64) {
    write_key(buf, field, WIRE_FIXED64);
    buf.extend_from_slice(&value.to_le_bytes());
}

pub fn write_string(buf: &mut Vec<u8>, field: u32, value: &str) {
    write_key(buf, field, WIRE_LEN);
    write_varint(buf, value.len() as u64);
    buf.extend_from_slice(value.as_bytes());
}

pub fn write_message(buf: &mut Vec<u8>, field: u32, payload: &[u8]) {
    write_key(buf, field, WIRE_LEN);
    write_varint(buf, payload.len() as u64);
    buf.extend_from_slice(payload);
}

pub fn write_packed_uint32(buf: &mut Vec<u8>, field: u32, values: &[u32]) {
    let mut packed = Vec::with_capacity(values.len() * 2);
    for &v in values {
        write_varint(&mut packed, u64::from(v));
    }
    write_message(buf, field, &packed);
}
