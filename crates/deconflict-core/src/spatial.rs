//! 3D geometry for proximity checks between flight path segments.

/// Tolerance applied to every coordinate and distance comparison, so that
/// exact-boundary cases are not flagged as conflicts due to rounding.
pub const FLOAT_TOLERANCE: f64 = 1e-9;

fn sub(a: [f64; 3], b: [f64; 3]) -> [f64; 3] {
    [a[0] - b[0], a[1] - b[1], a[2] - b[2]]
}

fn dot(a: [f64; 3], b: [f64; 3]) -> f64 {
    a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
}

fn norm_sq(v: [f64; 3]) -> f64 {
    dot(v, v)
}

/// Euclidean distance between two 3D points.
pub fn distance(a: [f64; 3], b: [f64; 3]) -> f64 {
    norm_sq(sub(a, b)).sqrt()
}

/// Minimum distance from a 3D point to a 3D line segment.
///
/// Projects the point onto the segment's line and clamps to the endpoints.
/// A degenerate segment falls back to plain point distance.
pub fn distance_point_to_segment(point: [f64; 3], seg_start: [f64; 3], seg_end: [f64; 3]) -> f64 {
    let seg = sub(seg_end, seg_start);
    let to_point = sub(point, seg_start);

    let len_sq = norm_sq(seg);
    if len_sq < FLOAT_TOLERANCE {
        return norm_sq(to_point).sqrt();
    }

    let t = dot(to_point, seg) / len_sq;
    if t < 0.0 {
        norm_sq(to_point).sqrt()
    } else if t > 1.0 {
        distance(point, seg_end)
    } else {
        let closest = [
            seg_start[0] + t * seg[0],
            seg_start[1] + t * seg[1],
            seg_start[2] + t * seg[2],
        ];
        distance(point, closest)
    }
}

/// Minimum distance between two 3D line segments.
///
/// Solves for the closest points on the two carrier lines and clamps both
/// parameters to the segments, so crossings strictly between endpoints are
/// detected as well; endpoint-only distance checks can miss X-crossings.
/// Degenerate segments collapse to point-to-segment or point-to-point checks.
pub fn segment_to_segment_distance(
    a_start: [f64; 3],
    a_end: [f64; 3],
    b_start: [f64; 3],
    b_end: [f64; 3],
) -> f64 {
    let dir_a = sub(a_end, a_start);
    let dir_b = sub(b_end, b_start);
    let offset = sub(a_start, b_start);

    let len_a_sq = norm_sq(dir_a);
    let len_b_sq = norm_sq(dir_b);

    if len_a_sq < FLOAT_TOLERANCE && len_b_sq < FLOAT_TOLERANCE {
        return distance(a_start, b_start);
    }
    if len_a_sq < FLOAT_TOLERANCE {
        return distance_point_to_segment(a_start, b_start, b_end);
    }
    if len_b_sq < FLOAT_TOLERANCE {
        return distance_point_to_segment(b_start, a_start, a_end);
    }

    let ab = dot(dir_a, dir_b);
    let a_off = dot(dir_a, offset);
    let b_off = dot(dir_b, offset);
    let denom = len_a_sq * len_b_sq - ab * ab;

    // Parallel segments collapse the linear system; anchor s at the start of
    // segment A and let the t-clamp below pick the closest configuration.
    let mut s = if denom > FLOAT_TOLERANCE {
        ((ab * b_off - a_off * len_b_sq) / denom).clamp(0.0, 1.0)
    } else {
        0.0
    };
    let mut t = (ab * s + b_off) / len_b_sq;

    if t < 0.0 {
        t = 0.0;
        s = (-a_off / len_a_sq).clamp(0.0, 1.0);
    } else if t > 1.0 {
        t = 1.0;
        s = ((ab - a_off) / len_a_sq).clamp(0.0, 1.0);
    }

    let closest_a = [
        a_start[0] + s * dir_a[0],
        a_start[1] + s * dir_a[1],
        a_start[2] + s * dir_a[2],
    ];
    let closest_b = [
        b_start[0] + t * dir_b[0],
        b_start[1] + t * dir_b[1],
        b_start[2] + t * dir_b[2],
    ];
    distance(closest_a, closest_b)
}

/// Whether two segments come closer than the safety buffer.
///
/// The tolerance keeps pairs sitting exactly on the buffer boundary from
/// being flagged due to floating-point rounding.
pub fn segments_within_buffer(
    a_start: [f64; 3],
    a_end: [f64; 3],
    b_start: [f64; 3],
    b_end: [f64; 3],
    safety_buffer: f64,
) -> bool {
    segment_to_segment_distance(a_start, a_end, b_start, b_end) < safety_buffer - FLOAT_TOLERANCE
}
