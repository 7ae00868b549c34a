//! Mapbox Vector Tile (2.1) encoding.
//!
//! Layers are built in scratch buffers and framed into the tile once
//! complete. Field emission order matches the call order below, which
//! keeps the produced bytes stable across runs.

pub mod geometry;
pub mod pbf;

/// Grid resolution of one tile.
pub const EXTENT: u32 = 4096;
/// Overdraw margin around the tile, in grid units.
pub const BUFFER: i32 = 128;
/// Vector tile specification version.
pub const VERSION: u32 = 2;

// Tile fields
const LAYER_TAG: u32 = 3;
// Layer fields
const NAME_TAG: u32 = 1;
const FEATURE_TAG: u32 = 2;
const KEY_TAG: u32 = 3;
const VALUE_TAG: u32 = 4;
const EXTENT_TAG: u32 = 5;
const VERSION_TAG: u32 = 15;
// Feature fields
const ID_TAG: u32 = 1;
const TAGS_TAG: u32 = 2;
const GEOM_TYPE_TAG: u32 = 3;
const GEOMETRY_TAG: u32 = 4;
// Value variant fields
const VALUE_STRING_TAG: u32 = 1;
const VALUE_DOUBLE_TAG: u32 = 3;
const VALUE_UINT_TAG: u32 = 5;
const VALUE_BOOL_TAG: u32 = 7;

/// Feature geometry type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeomType {
    Point = 1,
    Line = 2,
}

/// Scalar attribute value in a layer value table.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    String(String),
    Double(f64),
    Uint(u64),
    Bool(bool),
}

/// Incrementally serialized tile layer.
///
/// The frame opens with version, name and extent; features, keys and
/// values follow in the order they are added. Every key/value index a
/// feature references must be added before [`LayerWriter::finish`].
#[derive(Debug)]
pub struct LayerWriter {
    buf: Vec<u8>,
}

impl LayerWriter {
    pub fn new(name: &str) -> Self {
        let mut buf = Vec::new();
        pbf::write_uint32(&mut buf, VERSION_TAG, VERSION);
        pbf::write_string(&mut buf, NAME_TAG, name);
        pbf::write_uint32(&mut buf, EXTENT_TAG, EXTENT);
        Self { buf }
    }

    /// Appends a feature. `tags` holds interleaved key/value table indices.
    pub fn add_feature(&mut self, id: u64, geom_type: GeomType, tags: &[u32], commands: &[u32]) {
        let mut feature = Vec::new();
        pbf::write_uint32(&mut feature, GEOM_TYPE_TAG, geom_type as u32);
        pbf::write_uint64(&mut feature, ID_TAG, id);
        pbf::write_packed_uint32(&mut feature, TAGS_TAG, tags);
        pbf::write_packed_uint32(&mut feature, GEOMETRY_TAG, commands);
        pbf::write_message(&mut self.buf, FEATURE_TAG, &feature);
    }

    pub fn add_key(&mut self, key: &str) {
        pbf::write_string(&mut self.buf, KEY_TAG, key);
    }

    pub fn add_value(&mut self, value: Value) {
        let mut encoded = Vec::new();
        match value {
            Value::String(s) => pbf::write_string(&mut encoded, VALUE_STRING_TAG, &s),
            Value::Double(d) => pbf::write_double(&mut encoded, VALUE_DOUBLE_TAG, d),
            Value::Uint(u) => pbf::write_uint64(&mut encoded, VALUE_UINT_TAG, u),
            Value::Bool(b) => pbf::write_bool(&mut encoded, VALUE_BOOL_TAG, b),
        }
        pbf::write_message(&mut self.buf, VALUE_TAG, &encoded);
    }

    /// Frames the finished layer into the tile buffer.
    pub fn finish(self, tile: &mut Vec<u8>) {
        pbf::write_message(tile, LAYER_TAG, &self.buf);
    }
}
