//! Picks the drawable shape of every snake segment from the body layout.
//!
//! The renderer calls this once per frame; nothing here touches the
//! terminal.

use crate::geometry::{Direction, Position};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Corner {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SegmentShape {
    /// Head facing the way it last moved.
    Head(Direction),
    /// Tail pointing away from the rest of the body.
    Tail(Direction),
    Vertical,
    Horizontal,
    /// Bend joining the two named sides of the cell.
    Corner(Corner),
}

/// Shape of the segment at `index` in a head-first `body`.
///
/// `None` means the layout around that segment is not a clean grid path
/// (out of range index, body shorter than two, overlapping or detached
/// neighbours). Callers draw those as a plain block.
pub fn segment_shape(index: usize, body: &[Position]) -> Option<SegmentShape> {
    if body.len() < 2 || index >= body.len() {
        return None;
    }

    let last = body.len() - 1;

    if index == 0 {
        return Direction::from_offset(body[0] - body[1]).map(SegmentShape::Head);
    }

    if index == last {
        return Direction::from_offset(body[last - 1] - body[last])
            .map(|dir| SegmentShape::Tail(dir.opposite()));
    }

    let block = body[index];
    let prev_rel = body[index + 1] - block;
    let next_rel = body[index - 1] - block;

    // Both neighbours must be orthogonally adjacent.
    Direction::from_offset(prev_rel)?;
    Direction::from_offset(next_rel)?;

    if prev_rel.x == next_rel.x {
        return Some(SegmentShape::Vertical);
    }
    if prev_rel.y == next_rel.y {
        return Some(SegmentShape::Horizontal);
    }

    // One relation is horizontal, the other vertical. Which side each lies
    // on names the corner, whichever of the two supplies it.
    let dx = prev_rel.x + next_rel.x;
    let dy = prev_rel.y + next_rel.y;

    let corner = match (dx, dy) {
        (-1, -1) => Corner::TopLeft,
        (-1, 1) => Corner::BottomLeft,
        (1, -1) => Corner::TopRight,
        (1, 1) => Corner::BottomRight,
        _ => return None,
    };

    Some(SegmentShape::Corner(corner))
}

pub fn body_shapes(body: &[Position]) -> Vec<Option<SegmentShape>> {
    (0..body.len()).map(|i| segment_shape(i, body)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use Corner::*;
    use Direction::*;
    use SegmentShape as S;

    fn pos(x: i32, y: i32) -> Position {
        Position::new(x, y)
    }

    #[test]
    fn test_straight_runs() {
        let horizontal = [pos(5, 5), pos(6, 5), pos(7, 5)];
        assert_eq!(segment_shape(1, &horizontal), Some(S::Horizontal));

        let vertical = [pos(5, 5), pos(5, 6), pos(5, 7)];
        assert_eq!(segment_shape(1, &vertical), Some(S::Vertical));
    }

    #[test]
    fn test_head_follows_last_step() {
        assert_eq!(segment_shape(0, &[pos(4, 5), pos(5, 5), pos(6, 5)]), Some(S::Head(Left)));
        assert_eq!(segment_shape(0, &[pos(6, 5), pos(5, 5), pos(4, 5)]), Some(S::Head(Right)));
        assert_eq!(segment_shape(0, &[pos(5, 4), pos(5, 5), pos(5, 6)]), Some(S::Head(Up)));
        assert_eq!(segment_shape(0, &[pos(5, 6), pos(5, 5), pos(5, 4)]), Some(S::Head(Down)));
    }

    #[test]
    fn test_tail_points_away_from_body() {
        // Body continues to the left of the tail, so the tail points right.
        assert_eq!(segment_shape(2, &[pos(4, 5), pos(5, 5), pos(6, 5)]), Some(S::Tail(Right)));
        assert_eq!(segment_shape(2, &[pos(6, 5), pos(5, 5), pos(4, 5)]), Some(S::Tail(Left)));
        assert_eq!(segment_shape(2, &[pos(5, 4), pos(5, 5), pos(5, 6)]), Some(S::Tail(Down)));
        assert_eq!(segment_shape(2, &[pos(5, 6), pos(5, 5), pos(5, 4)]), Some(S::Tail(Up)));
    }

    #[test]
    fn test_corners_in_all_eight_configurations() {
        let c = pos(5, 5);
        let left = pos(4, 5);
        let right = pos(6, 5);
        let up = pos(5, 4);
        let down = pos(5, 6);

        let cases = [
            (left, up, TopLeft),
            (up, left, TopLeft),
            (right, up, TopRight),
            (up, right, TopRight),
            (left, down, BottomLeft),
            (down, left, BottomLeft),
            (right, down, BottomRight),
            (down, right, BottomRight),
        ];

        for (head, tail, expected) in cases {
            let body = [head, c, tail];
            assert_eq!(segment_shape(1, &body), Some(S::Corner(expected)), "head {:?} tail {:?}", head, tail);
        }
    }

    #[test]
    fn test_degenerate_layouts() {
        assert_eq!(segment_shape(0, &[pos(1, 1)]), None);
        assert_eq!(segment_shape(3, &[pos(1, 1), pos(2, 1), pos(3, 1)]), None);
        // Head stacked on its neck.
        assert_eq!(segment_shape(0, &[pos(5, 5), pos(5, 5), pos(6, 5)]), None);
        // Detached neighbour.
        assert_eq!(segment_shape(1, &[pos(3, 5), pos(5, 5), pos(6, 5)]), None);
    }

    #[test]
    fn test_body_shapes_covers_every_segment() {
        let body = [pos(5, 4), pos(5, 5), pos(6, 5), pos(7, 5)];
        assert_eq!(
            body_shapes(&body),
            vec![Some(S::Head(Up)), Some(S::Corner(TopRight)), Some(S::Horizontal), Some(S::Tail(Right))]
        );
    }
}
