use glam::Vec3;

/// The 12 edges of the axis-aligned box spanned by two opposite corners,
/// as 24 line-segment endpoints.
#[must_use]
pub fn box_edges(start: Vec3, end: Vec3) -> Vec<Vec3> {
    let (s, e) = (start, end);
    let corner = |x: f32, y: f32, z: f32| Vec3::new(x, y, z);
    vec![
        // edges leaving the start corner
        s,
        corner(e.x, s.y, s.z),
        s,
        corner(s.x, e.y, s.z),
        s,
        corner(s.x, s.y, e.z),
        // edges leaving the end corner
        e,
        corner(s.x, e.y, e.z),
        e,
        corner(e.x, s.y, e.z),
        e,
        corner(e.x, e.y, s.z),
        // the remaining six
        corner(e.x, e.y, s.z),
        corner(e.x, s.y, s.z),
        corner(e.x, e.y, s.z),
        corner(s.x, e.y, s.z),
        corner(e.x, s.y, e.z),
        corner(e.x, s.y, s.z),
        corner(e.x, s.y, e.z),
        corner(s.x, s.y, e.z),
        corner(s.x, e.y, e.z),
        corner(s.x, e.y, s.z),
        corner(s.x, e.y, e.z),
        corner(s.x, s.y, e.z),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn twelve_axis_aligned_edges_of_the_right_length() {
        let edges = box_edges(Vec3::ZERO, Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(edges.len(), 24);
        let mut lengths: Vec<f32> = edges
            .chunks_exact(2)
            .map(|pair| {
                let d = pair[1] - pair[0];
                // exactly one axis changes along an edge
                let moving = [d.x, d.y, d.z].iter().filter(|c| **c != 0.0).count();
                assert_eq!(moving, 1);
                d.length()
            })
            .collect();
        lengths.sort_by(f32::total_cmp);
        assert_eq!(lengths, [1.0, 1.0, 1.0, 1.0, 2.0, 2.0, 2.0, 2.0, 3.0, 3.0, 3.0, 3.0]);
    }
}
