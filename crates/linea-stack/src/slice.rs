use linea_core::{Error, Grid, ImageView};
use log::debug;

/// Cuts an elevation raster into `layer_count + 1` padded binary layers,
/// bottom first.
///
/// With `z_step = (max - min) / layer_count`, a sample at elevation `z`
/// reaches layer `floor((z - min) / z_step)` (clamped to `layer_count`) and is
/// set in that layer and every layer below it. Layer 0 therefore holds every
/// finite sample. A flat raster fills layer 0 only. Non-finite samples are
/// left out of all layers.
pub fn slice_layers(heights: &ImageView<'_, f32>, layer_count: usize) -> Result<Vec<Grid>, Error> {
    if layer_count == 0 {
        return Err(Error::InvalidConfig("layer-count must be at least 1".into()));
    }
    let (w, h) = (heights.width(), heights.height());
    if w == 0 || h == 0 {
        return Err(Error::InvalidConfig(format!(
            "cannot slice an empty {w}x{h} raster"
        )));
    }

    let (z_min, z_max) = finite_range(heights).ok_or_else(|| {
        Error::InvalidConfig("elevation raster has no finite samples".into())
    })?;
    let z_step = (z_max - z_min) / layer_count as f32;

    let mut top = Vec::with_capacity(w * h);
    for row in heights.rows() {
        for &z in row {
            let level = if !z.is_finite() {
                None
            } else if z_step > 0.0 {
                let raw = ((z - z_min) / z_step).floor().max(0.0) as usize;
                Some(raw.min(layer_count))
            } else {
                Some(0)
            };
            top.push(level);
        }
    }

    debug!(
        "slicing {w}x{h} raster: z in [{z_min}, {z_max}], step {z_step}, {} layers",
        layer_count + 1
    );

    Ok((0..=layer_count)
        .map(|layer| Grid::pad_with(w, h, |x, y| top[y * w + x].is_some_and(|t| t >= layer)))
        .collect())
}

fn finite_range(heights: &ImageView<'_, f32>) -> Option<(f32, f32)> {
    heights
        .rows()
        .flatten()
        .copied()
        .filter(|z| z.is_finite())
        .fold(None, |acc, z| match acc {
            None => Some((z, z)),
            Some((lo, hi)) => Some((lo.min(z), hi.max(z))),
        })
}

#[cfg(test)]
mod tests {
    use linea_core::{Error, Image};

    use super::slice_layers;

    fn ramp() -> Image<f32> {
        // 4x1 row at elevations 0, 1, 2, 4
        Image::from_vec(4, 1, vec![0.0, 1.0, 2.0, 4.0]).expect("valid image")
    }

    #[test]
    fn layers_nest_from_the_bottom() {
        let img = ramp();
        let layers = slice_layers(&img.as_view(), 4).expect("slice");

        assert_eq!(layers.len(), 5);
        let counts: Vec<_> = layers.iter().map(|g| g.count_set()).collect();
        assert_eq!(counts, vec![4, 3, 2, 1, 1]);

        for g in &layers {
            assert_eq!((g.inner_width(), g.inner_height()), (4, 1));
        }
        for (lower, upper) in layers.iter().zip(layers.iter().skip(1)) {
            for x in 1..=4 {
                if upper.is_set(x, 1) {
                    assert!(lower.is_set(x, 1));
                }
            }
        }
        assert!(layers[4].is_set(4, 1));
    }

    #[test]
    fn peak_lands_in_the_top_layer() {
        let img = ramp();
        let layers = slice_layers(&img.as_view(), 3).expect("slice");

        assert_eq!(layers.len(), 4);
        assert_eq!(layers[3].count_set(), 1);
        assert!(layers[3].is_set(4, 1));
    }

    #[test]
    fn flat_raster_fills_the_base_only() {
        let img = Image::new_fill(3, 2, 7.5f32);
        let layers = slice_layers(&img.as_view(), 5).expect("slice");

        assert_eq!(layers.len(), 6);
        assert_eq!(layers[0].count_set(), 6);
        assert!(layers[1..].iter().all(|g| g.count_set() == 0));
    }

    #[test]
    fn non_finite_samples_are_skipped() {
        let img = Image::from_vec(3, 1, vec![f32::NAN, 0.0, 2.0]).expect("valid image");
        let layers = slice_layers(&img.as_view(), 2).expect("slice");

        assert_eq!(layers[0].count_set(), 2);
        assert!(!layers[0].is_set(1, 1));
        assert_eq!(layers[2].count_set(), 1);
    }

    #[test]
    fn degenerate_requests_are_rejected() {
        let img = ramp();
        assert!(matches!(
            slice_layers(&img.as_view(), 0),
            Err(Error::InvalidConfig(_))
        ));

        let empty = Image::<f32>::from_vec(0, 0, Vec::new()).expect("empty image");
        assert!(matches!(
            slice_layers(&empty.as_view(), 3),
            Err(Error::InvalidConfig(_))
        ));
    }
}
