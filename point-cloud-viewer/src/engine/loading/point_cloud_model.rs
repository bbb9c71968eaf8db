use bevy::prelude::*;
use thiserror::Error;

/// Errors raised while fetching or decoding a model file.
#[derive(Debug, Error)]
pub enum PointCloudLoadError {
    #[error("could not read model: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed PLY: {0}")]
    Ply(String),

    #[error("PLY file has no vertex element")]
    NoVertexElement,

    #[error("vertex {index} has no usable '{property}' value")]
    MissingCoordinate {
        index: usize,
        property: &'static str,
    },

    #[error("LAS decode failed: {0}")]
    Las(String),

    #[error("model contains no points")]
    Empty,

    #[error("{colors} colours supplied for {positions} points")]
    ColorMismatch { positions: usize, colors: usize },
}

/// Decoded point positions and per-point linear RGBA colours.
#[derive(Asset, TypePath, Debug, Clone)]
pub struct PointCloudModel {
    positions: Vec<[f32; 3]>,
    colors: Vec<[f32; 4]>,
}

impl PointCloudModel {
    /// Points without colours are painted `fallback`.
    pub fn new(
        positions: Vec<[f32; 3]>,
        colors: Option<Vec<[f32; 4]>>,
        fallback: [f32; 4],
    ) -> Result<Self, PointCloudLoadError> {
        if positions.is_empty() {
            return Err(PointCloudLoadError::Empty);
        }

        let colors = match colors {
            Some(colors) if colors.len() != positions.len() => {
                return Err(PointCloudLoadError::ColorMismatch {
                    positions: positions.len(),
                    colors: colors.len(),
                });
            }
            Some(colors) => colors,
            None => vec![fallback; positions.len()],
        };

        Ok(Self { positions, colors })
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn positions(&self) -> &[[f32; 3]] {
        &self.positions
    }

    pub fn colors(&self) -> &[[f32; 4]] {
        &self.colors
    }

    /// Axis-aligned bounds as (min, max).
    pub fn bounds(&self) -> (Vec3, Vec3) {
        self.positions.iter().fold(
            (Vec3::splat(f32::INFINITY), Vec3::splat(f32::NEG_INFINITY)),
            |(min, max), p| {
                let p = Vec3::from_array(*p);
                (min.min(p), max.max(p))
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WHITE: [f32; 4] = [1.0; 4];

    #[test]
    fn missing_colours_fall_back() {
        let model = PointCloudModel::new(vec![[0.0; 3], [1.0; 3]], None, WHITE).unwrap();
        assert_eq!(model.len(), 2);
        assert_eq!(model.colors(), &[WHITE, WHITE]);
    }

    #[test]
    fn empty_cloud_is_an_error() {
        assert!(matches!(
            PointCloudModel::new(Vec::new(), None, WHITE),
            Err(PointCloudLoadError::Empty)
        ));
    }

    #[test]
    fn colour_count_must_match() {
        let result = PointCloudModel::new(vec![[0.0; 3]; 3], Some(vec![WHITE; 2]), WHITE);
        assert!(matches!(
            result,
            Err(PointCloudLoadError::ColorMismatch {
                positions: 3,
                colors: 2
            })
        ));
    }

    #[test]
    fn bounds_cover_all_points() {
        let model = PointCloudModel::new(
            vec![[-1.0, 2.0, 0.5], [3.0, -4.0, 0.0], [0.0, 0.0, 9.0]],
            None,
            WHITE,
        )
        .unwrap();
        let (min, max) = model.bounds();
        assert_eq!(min, Vec3::new(-1.0, -4.0, 0.0));
        assert_eq!(max, Vec3::new(3.0, 2.0, 9.0));
    }
}
