use crate::types::Vector2;

// Smallest closed ring: a triangle plus its closing point
const MIN_RING_POINTS: usize = 4;

pub(crate) struct Simplifier;

impl Simplifier {
    /// Douglas-Peucker simplification of a closed ring. The first and last
    /// points are always kept, and a ring that would collapse below a
    /// triangle keeps its original coordinates.
    pub fn simplify_ring(ring: &[Vector2], tolerance: f64) -> Vec<Vector2> {
        if tolerance <= 0.0 || ring.len() <= MIN_RING_POINTS {
            return ring.to_vec();
        }

        let simplified = Self::simplify_line(ring, tolerance);

        if simplified.len() < MIN_RING_POINTS {
            ring.to_vec()
        } else {
            simplified
        }
    }

    pub fn simplify_line(line: &[Vector2], tolerance: f64) -> Vec<Vector2> {
        if line.len() < 3 {
            return line.to_vec();
        }

        let mut keep = vec![false; line.len()];
        keep[0] = true;
        keep[line.len() - 1] = true;

        // Explicit stack so long coastlines can't overflow the call stack
        let mut pending = vec![(0, line.len() - 1)];

        while let Some((first, last)) = pending.pop() {
            if last <= first + 1 {
                continue;
            }

            let (farthest, distance) = (first + 1..last)
                .map(|i| (i, Self::segment_distance(&line[i], &line[first], &line[last])))
                .fold((first, -1.0), |best, candidate| {
                    if candidate.1 > best.1 { candidate } else { best }
                });

            if distance > tolerance {
                keep[farthest] = true;
                pending.push((first, farthest));
                pending.push((farthest, last));
            }
        }

        line.iter()
            .zip(keep)
            .filter_map(|(point, kept)| kept.then_some(*point))
            .collect()
    }

    // Distance from `point` to the segment `from`-`to`. A closed ring starts
    // and ends on the same point, which degrades to a point distance.
    fn segment_distance(point: &Vector2, from: &Vector2, to: &Vector2) -> f64 {
        let dx = to.x - from.x;
        let dy = to.y - from.y;
        let length_sq = dx * dx + dy * dy;

        if length_sq == 0.0 {
            return point.distance(from);
        }

        let t = (((point.x - from.x) * dx + (point.y - from.y) * dy) / length_sq).clamp(0.0, 1.0);
        point.distance(&Vector2::new(from.x + t * dx, from.y + t * dy))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn simplify_line_drops_collinear_points() {
        let line = (0..=10)
            .map(|i| Vector2::new(i as f64, 0.0))
            .collect::<Vec<_>>();

        let simplified = Simplifier::simplify_line(&line, 0.01);

        assert_eq!(
            simplified,
            vec![Vector2::new(0.0, 0.0), Vector2::new(10.0, 0.0)]
        );
    }

    #[test]
    fn simplify_line_keeps_significant_corners() {
        let line = vec![
            Vector2::new(0.0, 0.0),
            Vector2::new(1.0, 0.01),
            Vector2::new(2.0, 0.0),
            Vector2::new(3.0, 5.0),
            Vector2::new(4.0, 0.0),
        ];

        let simplified = Simplifier::simplify_line(&line, 0.1);

        assert_eq!(
            simplified,
            vec![
                Vector2::new(0.0, 0.0),
                Vector2::new(2.0, 0.0),
                Vector2::new(3.0, 5.0),
                Vector2::new(4.0, 0.0),
            ]
        );
    }

    #[test]
    fn simplify_ring_keeps_it_closed() {
        // A square with a point in the middle of every side
        let ring = vec![
            Vector2::new(0.0, 0.0),
            Vector2::new(1.0, 0.0),
            Vector2::new(2.0, 0.0),
            Vector2::new(2.0, 1.0),
            Vector2::new(2.0, 2.0),
            Vector2::new(1.0, 2.0),
            Vector2::new(0.0, 2.0),
            Vector2::new(0.0, 1.0),
            Vector2::new(0.0, 0.0),
        ];

        let simplified = Simplifier::simplify_ring(&ring, 0.1);

        assert_eq!(simplified.first(), simplified.last());
        assert_eq!(simplified.len(), 5);
    }

    #[test]
    fn simplify_ring_never_collapses() {
        let ring = vec![
            Vector2::new(0.0, 0.0),
            Vector2::new(0.01, 0.0),
            Vector2::new(0.01, 0.01),
            Vector2::new(0.0, 0.01),
            Vector2::new(0.0, 0.0),
        ];

        assert_eq!(Simplifier::simplify_ring(&ring, 1.0), ring);
    }

    #[test]
    fn zero_tolerance_is_a_no_op() {
        let ring = vec![
            Vector2::new(0.0, 0.0),
            Vector2::new(1.0, 0.0),
            Vector2::new(2.0, 0.0),
            Vector2::new(2.0, 2.0),
            Vector2::new(0.0, 0.0),
        ];

        assert_eq!(Simplifier::simplify_ring(&ring, 0.0), ring);
    }
}
