/// Distance along the view axis at which a box of the given extents fits the frustum.
///
/// With `cover == false` the whole box stays visible; with `cover == true` the box
/// fills the viewport instead. `fov_degrees` is the vertical field of view.
/// Inputs are expected positive and finite; degenerate extents yield non-finite results.
pub fn distance_to_fit_box(
    width: f32,
    height: f32,
    depth: f32,
    fov_degrees: f32,
    aspect: f32,
    cover: bool,
) -> f32 {
    let box_aspect = width / height;
    let fov_rad = fov_degrees.to_radians();

    let fit_by_height = if cover {
        box_aspect > aspect
    } else {
        box_aspect < aspect
    };
    let height_to_fit = if fit_by_height { height } else { width / aspect };

    (height_to_fit * 0.5) / (fov_rad * 0.5).tan() + depth * 0.5
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use test_case::test_case;

    const EPSILON: f32 = 1e-4;

    #[test_case(2.0, 2.0, 0.0, 90.0, 1.0 => 1.0; "square box at ninety degrees")]
    #[test_case(2.0, 2.0, 4.0, 90.0, 1.0 => 3.0; "depth adds half its value")]
    #[test_case(4.0, 2.0, 0.0, 90.0, 1.0 => 2.0; "wide box fits by width")]
    #[test_case(2.0, 4.0, 0.0, 90.0, 1.0 => 2.0; "tall box fits by height")]
    fn fits_known_boxes(width: f32, height: f32, depth: f32, fov: f32, aspect: f32) -> f32 {
        let distance = distance_to_fit_box(width, height, depth, fov, aspect, false);
        (distance * 1000.0).round() / 1000.0
    }

    #[test]
    fn cover_flips_the_fit_axis() {
        // Wide box on a square viewport: fit shows the whole width, cover fills the height.
        let fit = distance_to_fit_box(4.0, 2.0, 0.0, 90.0, 1.0, false);
        let cover = distance_to_fit_box(4.0, 2.0, 0.0, 90.0, 1.0, true);
        assert!((fit - 2.0).abs() < EPSILON);
        assert!((cover - 1.0).abs() < EPSILON);
    }

    #[test]
    fn continuous_across_the_aspect_boundary() {
        let (width, height) = (3.0, 2.0);
        let boundary = width / height;
        let at = distance_to_fit_box(width, height, 1.0, 45.0, boundary, false);
        let above = distance_to_fit_box(width, height, 1.0, 45.0, boundary + 1e-4, false);
        let below = distance_to_fit_box(width, height, 1.0, 45.0, boundary - 1e-4, false);
        assert!((at - above).abs() < 1e-3);
        assert!((at - below).abs() < 1e-3);
    }

    proptest! {
        #[test]
        fn distance_is_positive(
            width in 0.01f32..500.0,
            height in 0.01f32..500.0,
            depth in 0.0f32..500.0,
            fov in 1.0f32..170.0,
            aspect in 0.1f32..10.0,
        ) {
            let distance = distance_to_fit_box(width, height, depth, fov, aspect, false);
            prop_assert!(distance.is_finite());
            prop_assert!(distance > 0.0);
        }

        #[test]
        fn distance_grows_with_depth(
            width in 0.01f32..500.0,
            height in 0.01f32..500.0,
            depth in 0.0f32..500.0,
            extra in 1.0f32..100.0,
            fov in 1.0f32..170.0,
            aspect in 0.1f32..10.0,
        ) {
            let near = distance_to_fit_box(width, height, depth, fov, aspect, false);
            let far = distance_to_fit_box(width, height, depth + extra, fov, aspect, false);
            prop_assert!(far > near);
        }
    }
}
