use crate::{Error, Image, ImageView};

/// Binary layer raster surrounded by a 1-cell all-zero gutter.
///
/// Cells are stored as `0`/`1`. Every constructor establishes the gutter, so
/// code walking a `Grid` may index the four axis neighbours of any interior
/// cell without bounds checks.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    cells: Image<u8>,
}

impl Grid {
    /// Wraps an image that already carries the gutter. Nonzero values are
    /// foreground.
    pub fn from_padded(image: Image<u8>) -> Result<Self, Error> {
        let (w, h) = (image.width(), image.height());
        if w < 2 || h < 2 {
            return Err(Error::GridTooSmall {
                width: w,
                height: h,
            });
        }

        for y in 0..h {
            for x in 0..w {
                let on_gutter = x == 0 || y == 0 || x == w - 1 || y == h - 1;
                if on_gutter && image.get(x, y).is_some_and(|&v| v != 0) {
                    return Err(Error::GutterNotClear { x, y });
                }
            }
        }

        let data = image.into_data().into_iter().map(|v| u8::from(v != 0)).collect();
        Ok(Self {
            cells: Image::from_vec(w, h, data)?,
        })
    }

    /// Copies `mask` into a fresh grid with the gutter added around it.
    pub fn pad(mask: &ImageView<'_, u8>) -> Self {
        Self::pad_with(mask.width(), mask.height(), |x, y| {
            mask.get(x, y).is_some_and(|&v| v != 0)
        })
    }

    /// Builds a padded grid of `width x height` inner cells from a predicate.
    pub fn pad_with(
        width: usize,
        height: usize,
        mut is_set: impl FnMut(usize, usize) -> bool,
    ) -> Self {
        let mut cells = Image::new_fill(width + 2, height + 2, 0u8);
        for y in 0..height {
            for x in 0..width {
                if is_set(x, y)
                    && let Some(c) = cells.get_mut(x + 1, y + 1)
                {
                    *c = 1;
                }
            }
        }
        Self { cells }
    }

    /// Parses rows of `#` (foreground) and any other character (background),
    /// then pads. Short rows are filled with background.
    pub fn from_ascii(rows: &[&str]) -> Self {
        let height = rows.len();
        let width = rows.iter().map(|r| r.chars().count()).max().unwrap_or(0);
        Self::pad_with(width, height, |x, y| rows[y].chars().nth(x) == Some('#'))
    }

    /// Padded width.
    pub fn width(&self) -> usize {
        self.cells.width()
    }

    /// Padded height.
    pub fn height(&self) -> usize {
        self.cells.height()
    }

    pub fn inner_width(&self) -> usize {
        self.cells.width() - 2
    }

    pub fn inner_height(&self) -> usize {
        self.cells.height() - 2
    }

    /// Value at padded coordinates; out-of-range reads as background.
    #[inline]
    pub fn is_set(&self, x: usize, y: usize) -> bool {
        self.cells.get(x, y).is_some_and(|&v| v != 0)
    }

    pub fn count_set(&self) -> usize {
        self.cells.data().iter().filter(|&&v| v != 0).count()
    }

    pub fn as_view(&self) -> ImageView<'_, u8> {
        self.cells.as_view()
    }
}
