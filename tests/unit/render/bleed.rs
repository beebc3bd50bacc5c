use super::*;

const GEOM: GridGeometry = GridGeometry {
    target_size: 8,
    margin: 2,
    row_count: 3,
};

fn masked(rgb: [u8; 3], mask: u8) -> MaskedSource {
    MaskedSource {
        source: LayerBuffer::solid(12, 12, [rgb[0], rgb[1], rgb[2], 255]),
        mask: LayerBuffer::solid(12, 12, [mask, mask, mask, 255]),
    }
}

fn layers() -> BleedLayers {
    BleedLayers {
        own: masked([200, 100, 40], 128),
        neighbors: [
            masked([10, 0, 0], 64),
            masked([0, 20, 0], 64),
            masked([0, 0, 40], 64),
            masked([80, 80, 80], 64),
        ],
    }
}

#[test]
fn neighbour_indices() {
    let i = TileIndex(5);
    assert_eq!(Side::Left.neighbor(i, 3), TileIndex(6));
    assert_eq!(Side::Right.neighbor(i, 3), TileIndex(4));
    assert_eq!(Side::Top.neighbor(i, 3), TileIndex(8));
    assert_eq!(Side::Bottom.neighbor(i, 3), TileIndex(2));
}

#[test]
fn band_membership() {
    assert!(Side::Left.contains(1, 4, &GEOM));
    assert!(!Side::Left.contains(2, 4, &GEOM));
    // right band starts strictly after target - margin
    assert!(!Side::Right.contains(6, 4, &GEOM));
    assert!(Side::Right.contains(7, 4, &GEOM));
    assert!(Side::Top.contains(4, 0, &GEOM));
    assert!(Side::Bottom.contains(4, 7, &GEOM));
}

#[test]
fn interior_pixel_is_own_contribution_only() {
    let out = base_color(&layers(), &GEOM, 4, 4);
    assert_eq!(out, [100.0, 50.0, 20.0]);
}

#[test]
fn left_band_adds_left_neighbour() {
    let out = base_color(&layers(), &GEOM, 0, 4);
    assert_eq!(out, [100.0 + 2.5, 50.0, 20.0]);
}

#[test]
fn corner_accumulates_both_sides() {
    // top-left corner: own + left + top
    let out = base_color(&layers(), &GEOM, 0, 0);
    assert_eq!(out, [102.5, 50.0, 30.0]);

    // bottom-right corner: own + right + bottom
    let out = base_color(&layers(), &GEOM, 7, 7);
    assert_eq!(out, [120.0, 75.0, 40.0]);
}

#[test]
fn neighbour_is_sampled_from_its_mirrored_edge() {
    let mut left_src = vec![0u8; 12 * 12 * 4];
    // only the input pixel (x_in + target, y_in) = (2 + 8, 4 + 2) is lit
    let i = (6 * 12 + 10) * 4;
    left_src[i..i + 4].copy_from_slice(&[255, 255, 255, 255]);

    let mut l = layers();
    l.neighbors[0] = MaskedSource {
        source: LayerBuffer::from_rgba8(12, 12, left_src).unwrap(),
        mask: LayerBuffer::solid(12, 12, [128, 0, 0, 255]),
    };
    l.own = masked([0, 0, 0], 0);

    assert_eq!(base_color(&l, &GEOM, 0, 4), [127.5, 127.5, 127.5]);
    assert_eq!(base_color(&l, &GEOM, 1, 4), [0.0, 0.0, 0.0]);
}

#[test]
fn sums_may_exceed_channel_range() {
    let l = BleedLayers {
        own: masked([255, 255, 255], 255),
        neighbors: std::array::from_fn(|_| masked([255, 255, 255], 255)),
    };
    let out = base_color(&l, &GEOM, 0, 0);
    assert!(out[0] > 255.0);
}
