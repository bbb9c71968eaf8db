use std::io::Cursor;

use bevy::asset::io::Reader;
use bevy::asset::{AssetLoader, LoadContext};
use bevy::color::ColorToComponents;
use bevy::prelude::*;
use constants::render_settings::DEFAULT_POINT_COLOR;
use ply_rs::parser::Parser;
use ply_rs::ply::{DefaultElement, Encoding, Property, PropertyType, ScalarType};

use crate::engine::loading::point_cloud_model::{PointCloudLoadError, PointCloudModel};
use crate::engine::loading::progress::read_with_progress;

const END_HEADER: &[u8] = b"end_header";

#[derive(Default, TypePath)]
pub struct PlyLoader;

impl AssetLoader for PlyLoader {
    type Asset = PointCloudModel;
    type Settings = ();
    type Error = PointCloudLoadError;

    async fn load(
        &self,
        reader: &mut dyn Reader,
        _settings: &(),
        load_context: &mut LoadContext<'_>,
    ) -> Result<Self::Asset, Self::Error> {
        let path = load_context.path().display().to_string();
        let bytes = read_with_progress(reader, &path, ply_expected_len).await?;
        let model = decode_ply(&bytes)?;
        info!("{path}: decoded {} points", model.len());
        Ok(model)
    }

    fn extensions(&self) -> &[&str] {
        &["ply"]
    }
}

/// Decode the `vertex` element of a PLY file in any of its three encodings.
pub fn decode_ply(bytes: &[u8]) -> Result<PointCloudModel, PointCloudLoadError> {
    let mut cursor = Cursor::new(bytes);
    let ply = Parser::<DefaultElement>::new()
        .read_ply(&mut cursor)
        .map_err(|err| PointCloudLoadError::Ply(err.to_string()))?;

    let vertices = ply
        .payload
        .get("vertex")
        .ok_or(PointCloudLoadError::NoVertexElement)?;

    let colored = vertices
        .first()
        .is_some_and(|vertex| color_channel(vertex, "red").is_some());

    let mut positions = Vec::with_capacity(vertices.len());
    let mut colors = Vec::with_capacity(if colored { vertices.len() } else { 0 });

    for (index, vertex) in vertices.iter().enumerate() {
        positions.push([
            coordinate(vertex, index, "x")?,
            coordinate(vertex, index, "y")?,
            coordinate(vertex, index, "z")?,
        ]);

        if colored {
            let channel = |name| color_channel(vertex, name).unwrap_or(1.0);
            // PLY colours are sRGB; the point material works in linear space.
            let linear = Color::srgba(
                channel("red"),
                channel("green"),
                channel("blue"),
                channel("alpha"),
            )
            .to_linear();
            colors.push(linear.to_f32_array());
        }
    }

    PointCloudModel::new(positions, colored.then_some(colors), DEFAULT_POINT_COLOR)
}

/// Total file length for binary PLY files without list properties. ASCII
/// rows have no fixed size, so their length is unknown until the end.
pub fn ply_expected_len(bytes: &[u8]) -> Option<u64> {
    let marker = bytes
        .windows(END_HEADER.len())
        .position(|window| window == END_HEADER)?;
    let header_len = marker
        + END_HEADER.len()
        + bytes[marker + END_HEADER.len()..]
            .iter()
            .position(|byte| *byte == b'\n')?
        + 1;

    let mut cursor = Cursor::new(&bytes[..header_len]);
    let header = Parser::<DefaultElement>::new()
        .read_header(&mut cursor)
        .ok()?;

    if matches!(header.encoding, Encoding::Ascii) {
        return None;
    }

    let mut body_len = 0u64;
    for element in header.elements.values() {
        let mut row_len = 0u64;
        for property in element.properties.values() {
            match &property.data_type {
                PropertyType::Scalar(scalar) => row_len += scalar_size(scalar),
                PropertyType::List(..) => return None,
            }
        }
        body_len += row_len * element.count as u64;
    }

    Some(header_len as u64 + body_len)
}

fn scalar_size(scalar: &ScalarType) -> u64 {
    match scalar {
        ScalarType::Char | ScalarType::UChar => 1,
        ScalarType::Short | ScalarType::UShort => 2,
        ScalarType::Int | ScalarType::UInt | ScalarType::Float => 4,
        ScalarType::Double => 8,
    }
}

fn coordinate(
    vertex: &DefaultElement,
    index: usize,
    property: &'static str,
) -> Result<f32, PointCloudLoadError> {
    match vertex.get(property) {
        Some(Property::Float(value)) => Ok(*value),
        Some(Property::Double(value)) => Ok(*value as f32),
        Some(Property::Int(value)) => Ok(*value as f32),
        Some(Property::UInt(value)) => Ok(*value as f32),
        Some(Property::Short(value)) => Ok(*value as f32),
        Some(Property::UShort(value)) => Ok(*value as f32),
        _ => Err(PointCloudLoadError::MissingCoordinate { index, property }),
    }
}

/// Colour channel normalised to 0..1. Integer channels are scaled by their
/// type's range; float channels are taken as is. Also accepts the
/// `diffuse_` prefixed names some exporters write.
fn color_channel(vertex: &DefaultElement, name: &str) -> Option<f32> {
    let property = vertex
        .get(name)
        .or_else(|| vertex.get(&format!("diffuse_{name}")))?;

    let value = match property {
        Property::UChar(value) => *value as f32 / 255.0,
        Property::Char(value) => *value as f32 / 127.0,
        Property::UShort(value) => *value as f32 / 65_535.0,
        Property::Short(value) => *value as f32 / 32_767.0,
        Property::UInt(value) => *value as f32 / 255.0,
        Property::Int(value) => *value as f32 / 255.0,
        Property::Float(value) => *value,
        Property::Double(value) => *value as f32,
        _ => return None,
    };
    Some(value.clamp(0.0, 1.0))
}
