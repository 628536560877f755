use crate::Error;

/// Owned row-major raster: layer masks, heightmaps and distance maps.
#[derive(Debug, Clone, PartialEq)]
pub struct Image<T> {
    width: usize,
    height: usize,
    data: Vec<T>,
}

impl<T> Image<T> {
    pub fn from_vec(width: usize, height: usize, data: Vec<T>) -> Result<Self, Error> {
        let expected = width.checked_mul(height).ok_or(Error::OutOfBounds)?;
        if data.len() != expected {
            return Err(Error::SizeMismatch {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn data(&self) -> &[T] {
        &self.data
    }

    pub fn into_data(self) -> Vec<T> {
        self.data
    }

    #[inline]
    fn offset(&self, x: usize, y: usize) -> Option<usize> {
        (x < self.width && y < self.height).then(|| y * self.width + x)
    }

    pub fn get(&self, x: usize, y: usize) -> Option<&T> {
        self.offset(x, y).map(|i| &self.data[i])
    }

    pub fn get_mut(&mut self, x: usize, y: usize) -> Option<&mut T> {
        self.offset(x, y).map(|i| &mut self.data[i])
    }

    pub fn as_view(&self) -> ImageView<'_, T> {
        ImageView {
            width: self.width,
            height: self.height,
            stride: self.width,
            data: &self.data,
        }
    }
}

impl<T: Clone> Image<T> {
    pub fn new_fill(width: usize, height: usize, value: T) -> Self {
        Self {
            width,
            height,
            data: vec![value; width * height],
        }
    }
}

/// Borrowed raster with a row stride, so a sub-rectangle or a row-padded
/// decoder buffer can be read without copying.
#[derive(Debug, Clone, Copy)]
pub struct ImageView<'a, T> {
    width: usize,
    height: usize,
    stride: usize,
    data: &'a [T],
}

impl<'a, T> ImageView<'a, T> {
    pub fn from_slice(
        width: usize,
        height: usize,
        stride: usize,
        data: &'a [T],
    ) -> Result<Self, Error> {
        if stride < width {
            return Err(Error::SizeMismatch {
                expected: width,
                actual: stride,
            });
        }

        let needed = match (width, height) {
            (0, _) | (_, 0) => 0,
            _ => (height - 1)
                .checked_mul(stride)
                .and_then(|v| v.checked_add(width))
                .ok_or(Error::OutOfBounds)?,
        };
        if data.len() < needed {
            return Err(Error::SizeMismatch {
                expected: needed,
                actual: data.len(),
            });
        }

        Ok(Self {
            width,
            height,
            stride,
            data,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Row `y`, exactly `width` samples long. Panics if `y >= height`.
    pub fn row(&self, y: usize) -> &'a [T] {
        assert!(y < self.height, "row {y} out of bounds for height {}", self.height);
        let start = y * self.stride;
        &self.data[start..start + self.width]
    }

    pub fn rows(&self) -> impl Iterator<Item = &'a [T]> + '_ {
        (0..self.height).map(move |y| self.row(y))
    }

    pub fn get(&self, x: usize, y: usize) -> Option<&'a T> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.data.get(y * self.stride + x)
    }
}

/// Widens an integer raster, e.g. an 8- or 16-bit grayscale heightmap, to
/// `f32` elevations.
pub fn to_f32<T: Copy + Into<f32>>(img: &ImageView<'_, T>) -> Image<f32> {
    let data = img.rows().flatten().map(|&v| v.into()).collect();
    Image {
        width: img.width(),
        height: img.height(),
        data,
    }
}
