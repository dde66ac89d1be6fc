//! Sobel edge detection.
//!
//! The RGB input is reduced to luminance, then horizontal and vertical
//! 3x3 Sobel gradients are combined into a Euclidean magnitude.
//!
//! Output is a single-channel (height, width) plane, not an RGB image.

use ndarray::{Array2, ArrayView2, ArrayView3, Zip};

use super::core::correlate_3x3;
use super::grayscale::rgb_to_luma;

/// Horizontal derivative kernel (d/dx)
pub const SOBEL_X: [[i32; 3]; 3] = [[-1, 0, 1], [-2, 0, 2], [-1, 0, 1]];

/// Vertical derivative kernel (d/dy)
pub const SOBEL_Y: [[i32; 3]; 3] = [[-1, -2, -1], [0, 0, 0], [1, 2, 1]];

/// Detect edges with the Sobel operator.
///
/// # Arguments
/// * `input` - RGB image (height, width, 3) as u8
///
/// # Returns
/// Gradient magnitude (height, width), clipped to 0-255 and truncated
pub fn edge_detect(input: ArrayView3<u8>) -> Array2<u8> {
    let gray = rgb_to_luma(input);
    sobel_magnitude(gray.view())
}

/// Sobel gradient magnitude of a luminance plane.
///
/// Gradients are exact integers; the magnitude is taken in f64.
/// Borders use REFLECT_101, so a flat border produces zero response.
pub fn sobel_magnitude(gray: ArrayView2<u8>) -> Array2<u8> {
    let gx = correlate_3x3(gray, &SOBEL_X);
    let gy = correlate_3x3(gray, &SOBEL_Y);

    let mut output = Array2::<u8>::zeros(gray.dim());
    Zip::from(&mut output)
        .and(&gx)
        .and(&gy)
        .par_for_each(|o, &dx, &dy| {
            let mag = (dx as f64).hypot(dy as f64);
            *o = mag.clamp(0.0, 255.0) as u8;
        });

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array3;

    fn vertical_edge(height: usize, width: usize, edge_x: usize) -> Array3<u8> {
        Array3::from_shape_fn((height, width, 3), |(_, x, _)| if x < edge_x { 0 } else { 255 })
    }

    #[test]
    fn test_edge_detect_output_is_single_channel() {
        let img = Array3::<u8>::zeros((4, 6, 3));
        let result = edge_detect(img.view());
        assert_eq!(result.dim(), (4, 6));
    }

    #[test]
    fn test_edge_detect_flat_is_zero() {
        let img = Array3::from_elem((5, 5, 3), 90u8);
        let result = edge_detect(img.view());
        assert!(result.iter().all(|&v| v == 0));
    }

    #[test]
    fn test_edge_detect_vertical_edge() {
        let img = vertical_edge(8, 10, 5);
        let result = edge_detect(img.view());

        for y in 0..8 {
            for x in 0..10 {
                let v = result[[y, x]];
                if x == 4 || x == 5 {
                    // gx = 4 * 255, saturated
                    assert_eq!(v, 255, "expected edge at ({y}, {x})");
                } else {
                    assert_eq!(v, 0, "expected no edge at ({y}, {x})");
                }
            }
        }
    }

    #[test]
    fn test_edge_detect_weak_edge_magnitude() {
        // Step of 10 gives |gx| = 40 on both sides of the step
        let img = Array3::from_shape_fn((5, 6, 3), |(_, x, _)| if x < 3 { 100 } else { 110 });
        let result = edge_detect(img.view());
        assert_eq!(result[[2, 2]], 40);
        assert_eq!(result[[2, 3]], 40);
        assert_eq!(result[[2, 0]], 0);
    }

    #[test]
    fn test_edge_detect_diagonal_combines_gradients() {
        // Single bright pixel: at a diagonal neighbour gx = gy = 10
        let mut gray = Array2::<u8>::zeros((5, 5));
        gray[[2, 2]] = 10;
        let result = sobel_magnitude(gray.view());
        // sqrt(10^2 + 10^2) = 14.14 -> 14
        assert_eq!(result[[1, 1]], 14);
        // Directly left: gx = 20, gy = 0
        assert_eq!(result[[2, 1]], 20);
    }
}
