use tetris_duel::core::{base_shape, spawn_x, Piece};
use tetris_duel::types::ShapeKind;

#[test]
fn test_every_shape_has_four_cells() {
    for kind in ShapeKind::ALL {
        assert_eq!(base_shape(kind).cell_count(), 4, "{kind:?}");
    }
}

#[test]
fn test_spawn_is_centered_on_row_zero() {
    let i = Piece::spawn(ShapeKind::I);
    assert_eq!((i.x, i.y, i.rotation), (3, 0, 0));

    let o = Piece::spawn(ShapeKind::O);
    assert_eq!(o.x, 4);

    let t = Piece::spawn(ShapeKind::T);
    assert_eq!(t.x, spawn_x(&base_shape(ShapeKind::T)));
    assert_eq!(t.x, 4);
}

#[test]
fn test_rotation_swaps_dimensions() {
    let l = base_shape(ShapeKind::L);
    assert_eq!((l.rows(), l.cols()), (3, 2));
    let turned = l.rotated_cw();
    assert_eq!((turned.rows(), turned.cols()), (2, 3));
    // [[1,0],[1,0],[1,1]] turned clockwise is [[1,1,1],[1,0,0]].
    assert!(turned.is_filled(0, 0));
    assert!(turned.is_filled(0, 2));
    assert!(turned.is_filled(1, 0));
    assert!(!turned.is_filled(1, 2));
}

#[test]
fn test_four_rotations_restore_every_shape() {
    for kind in ShapeKind::ALL {
        let base = base_shape(kind);
        assert_eq!(base.rotated_cw().rotated(3), base, "{kind:?}");

        let piece = Piece::spawn(kind);
        let back = piece.rotated_cw().rotated_cw().rotated_cw().rotated_cw();
        assert_eq!(back, piece, "{kind:?}");
    }
}

#[test]
fn test_rotation_keeps_anchor() {
    let mut piece = Piece::spawn(ShapeKind::J);
    piece.x = 2;
    piece.y = 7;
    let turned = piece.rotated_cw();
    assert_eq!((turned.x, turned.y), (2, 7));
    assert_eq!(turned.rotation, 1);
}

#[test]
fn test_occupies_row() {
    let piece = Piece::spawn(ShapeKind::I).rotated_cw().shifted(0, 5);
    for row in 5..9 {
        assert!(piece.occupies_row(row));
    }
    assert!(!piece.occupies_row(4));
    assert!(!piece.occupies_row(9));
}
