//! Anchor (prior) generation for multi-stride face detectors.
//!
//! The emission order is stride → grid row → grid column → anchor size.
//! It must match the network's output layout exactly: every raw tensor row
//! `i` is decoded against anchor `i`.

use super::config_error::ConfigError;
use super::detector_config::DetectorConfig;

/// Reference box, normalized to `[0, 1]` of the square network input.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Anchor {
    pub cx: f32,
    pub cy: f32,
    pub sx: f32,
    pub sy: f32,
}

/// Generates the ordered anchor list for `config`.
pub fn generate_anchors(config: &DetectorConfig) -> Result<Vec<Anchor>, ConfigError> {
    config.validate()?;

    let input = config.input_size as f32;
    let mut anchors = Vec::with_capacity(config.num_anchors());

    for (&stride, sizes) in config.strides.iter().zip(&config.anchor_sizes) {
        let grid_size = config.input_size / stride;
        let step = stride as f32;
        for row in 0..grid_size {
            let cy = (row as f32 + 0.5) * step / input;
            for col in 0..grid_size {
                let cx = (col as f32 + 0.5) * step / input;
                for &size in sizes {
                    let s = size as f32 / input;
                    anchors.push(Anchor {
                        cx,
                        cy,
                        sx: s,
                        sy: s,
                    });
                }
            }
        }
    }

    log::debug!(
        "Generated {} anchors for input {} with strides {:?}",
        anchors.len(),
        config.input_size,
        config.strides
    );
    Ok(anchors)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    use crate::shared::constants::DEFAULT_NUM_ANCHORS;

    fn small_config() -> DetectorConfig {
        DetectorConfig {
            input_size: 32,
            strides: vec![16, 32],
            anchor_sizes: vec![vec![4, 8], vec![16]],
            ..DetectorConfig::default()
        }
    }

    #[test]
    fn test_default_count() {
        let anchors = generate_anchors(&DetectorConfig::default()).unwrap();
        assert_eq!(anchors.len(), DEFAULT_NUM_ANCHORS);
    }

    #[test]
    fn test_count_matches_formula() {
        // (32/16)² × 2 + (32/32)² × 1 = 9
        let anchors = generate_anchors(&small_config()).unwrap();
        assert_eq!(anchors.len(), 9);
        assert_eq!(anchors.len(), small_config().num_anchors());
    }

    #[test]
    fn test_order_is_stride_row_col_size() {
        let a = generate_anchors(&small_config()).unwrap();

        // stride 16, row 0, col 0: both sizes share a center
        assert_relative_eq!(a[0].cx, 0.25);
        assert_relative_eq!(a[0].cy, 0.25);
        assert_relative_eq!(a[0].sx, 0.125);
        assert_relative_eq!(a[1].cx, 0.25);
        assert_relative_eq!(a[1].sx, 0.25);

        // row 0, col 1 advances x before y
        assert_relative_eq!(a[2].cx, 0.75);
        assert_relative_eq!(a[2].cy, 0.25);

        // row 1, col 0
        assert_relative_eq!(a[4].cx, 0.25);
        assert_relative_eq!(a[4].cy, 0.75);

        // stride 32 comes last
        assert_relative_eq!(a[8].cx, 0.5);
        assert_relative_eq!(a[8].cy, 0.5);
        assert_relative_eq!(a[8].sx, 0.5);
        assert_relative_eq!(a[8].sy, 0.5);
    }

    #[test]
    fn test_default_first_and_last_anchor() {
        let a = generate_anchors(&DetectorConfig::default()).unwrap();
        let first = a[0];
        assert_relative_eq!(first.cx, 4.0 / 640.0);
        assert_relative_eq!(first.cy, 4.0 / 640.0);
        assert_relative_eq!(first.sx, 16.0 / 640.0);

        let last = a[a.len() - 1];
        assert_relative_eq!(last.cx, 624.0 / 640.0);
        assert_relative_eq!(last.cy, 624.0 / 640.0);
        assert_relative_eq!(last.sx, 512.0 / 640.0);
    }

    #[test]
    fn test_deterministic() {
        let config = DetectorConfig::default();
        assert_eq!(
            generate_anchors(&config).unwrap(),
            generate_anchors(&config).unwrap()
        );
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = DetectorConfig {
            input_size: 0,
            ..DetectorConfig::default()
        };
        assert_eq!(generate_anchors(&config), Err(ConfigError::ZeroInputSize));
    }
}
