use std::io::Cursor;

use bevy::asset::io::Reader;
use bevy::asset::{AssetLoader, LoadContext};
use bevy::color::ColorToComponents;
use bevy::math::DVec3;
use bevy::prelude::*;
use constants::render_settings::DEFAULT_POINT_COLOR;

use crate::engine::loading::point_cloud_model::{PointCloudLoadError, PointCloudModel};
use crate::engine::loading::progress::read_with_progress;

#[derive(Default, TypePath)]
pub struct LasLoader;

impl AssetLoader for LasLoader {
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
        let bytes = read_with_progress(reader, &path, las_expected_len).await?;
        let model = decode_las(bytes)?;
        info!("{path}: decoded {} points", model.len());
        Ok(model)
    }

    fn extensions(&self) -> &[&str] {
        &["las", "laz"]
    }
}

/// Decode a LAS or LAZ file. Georeferenced coordinates are recentred on
/// their bounding box so the cloud sits around the origin in f32.
pub fn decode_las(bytes: Vec<u8>) -> Result<PointCloudModel, PointCloudLoadError> {
    let mut reader = las::Reader::new(Cursor::new(bytes))
        .map_err(|err| PointCloudLoadError::Las(err.to_string()))?;

    let mut raw_positions = Vec::new();
    let mut raw_colors = Vec::new();
    let mut colored = true;

    for point in reader.points() {
        let point = point.map_err(|err| PointCloudLoadError::Las(err.to_string()))?;
        raw_positions.push(DVec3::new(point.x, point.y, point.z));
        match point.color {
            Some(color) if colored => raw_colors.push([color.red, color.green, color.blue]),
            _ => colored = false,
        }
    }

    let (min, max) = raw_positions.iter().fold(
        (DVec3::splat(f64::INFINITY), DVec3::splat(f64::NEG_INFINITY)),
        |(min, max), p| (min.min(*p), max.max(*p)),
    );
    let center = (min + max) * 0.5;
    let positions = raw_positions
        .iter()
        .map(|p| (*p - center).as_vec3().to_array())
        .collect();

    let colors = colored.then(|| {
        // Some writers store 8-bit values in the 16-bit channels.
        let peak = raw_colors
            .iter()
            .flat_map(|rgb| rgb.iter().copied())
            .max()
            .unwrap_or(0);
        let scale = if peak > 255 { 65_535.0 } else { 255.0 };
        raw_colors
            .iter()
            .map(|[r, g, b]| {
                Color::srgb(*r as f32 / scale, *g as f32 / scale, *b as f32 / scale)
                    .to_linear()
                    .to_f32_array()
            })
            .collect()
    });

    PointCloudModel::new(positions, colors, DEFAULT_POINT_COLOR)
}

/// Total file length of an uncompressed LAS file, read from its public
/// header block. Compressed point data has no fixed record size.
pub fn las_expected_len(bytes: &[u8]) -> Option<u64> {
    let header = las::raw::Header::read_from(Cursor::new(bytes)).ok()?;
    if &header.file_signature != b"LASF" {
        return None;
    }
    let format = las::point::Format::new(header.point_data_record_format).ok()?;
    if format.is_compressed {
        return None;
    }

    let count = header
        .large_file
        .map(|large| large.number_of_point_records)
        .filter(|count| *count > 0)
        .unwrap_or(u64::from(header.number_of_point_records));

    let record_len = u64::from(header.point_data_record_length);
    Some(u64::from(header.offset_to_point_data) + count * record_len)
}
