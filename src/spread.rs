//! Pairwise repulsion to declutter labelled points
//!
//! Points closer than the configured minimum (measured in display pixels) are
//! pushed apart symmetrically about their midpoint. The result is a heuristic:
//! a push can move a point closer to a third one, so a bounded number of
//! passes is made.

use crate::config::SpreadConfig;
use crate::domain::NamedPoint;

/// Separation below which coincident points are nudged before pushing
const MIN_SEPARATION: f32 = 1.0;

/// Spread out points that are too close together
///
/// `true_width` is the natural image width and `visible_width` the width it
/// is displayed at; distances are compared after scaling by their ratio.
/// Returns new points in input order; the input is left untouched.
pub fn spread_out_pairs(
    points: &[NamedPoint],
    true_width: f32,
    visible_width: f32,
    config: &SpreadConfig,
) -> Vec<NamedPoint> {
    let mut points = points.to_vec();
    let ratio = visible_width / true_width;
    if !ratio.is_finite() || ratio <= 0.0 {
        log::warn!(
            "Cannot spread points with image width {} shown at {}",
            true_width,
            visible_width
        );
        return points;
    }

    let distance = |a: &NamedPoint, b: &NamedPoint| ratio * a.position().distance(b.position());
    // Half the minimum separation, in image units
    let half = config.min_distance / 2.0 / ratio;

    for pass in 0..config.max_passes {
        let mut close_pairs = Vec::new();
        for i in 0..points.len() {
            for j in i + 1..points.len() {
                if distance(&points[i], &points[j]) < config.min_distance {
                    close_pairs.push((i, j));
                }
            }
        }

        if close_pairs.is_empty() {
            break;
        }
        log::trace!("Spread pass {}: {} close pairs", pass, close_pairs.len());

        for (i, j) in close_pairs {
            let dist = distance(&points[i], &points[j]);
            if dist >= config.min_distance {
                continue;
            }
            if dist < MIN_SEPARATION {
                points[i].x += 1.0;
                points[j].y -= 1.0;
            }

            let cx = (points[i].x + points[j].x) / 2.0;
            let cy = (points[i].y + points[j].y) / 2.0;
            for k in [i, j] {
                let p = &mut points[k];
                let dx = p.x - cx;
                let dy = p.y - cy;
                let d = (dx * dx + dy * dy).sqrt();
                let factor = half / d;
                p.x = cx + factor * dx;
                p.y = cy + factor * dy;
            }
        }
    }

    points
}
