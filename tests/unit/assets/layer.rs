use super::*;

#[test]
fn placeholders_per_kind() {
    let i = TileIndex(3);
    assert_eq!(LayerKind::Source.placeholder().rgba(i), [0, 0, 0, 255]);
    assert_eq!(LayerKind::Mask.placeholder().rgba(i), [0, 0, 0, 255]);
    assert_eq!(LayerKind::Bump.placeholder().rgba(i), [128, 128, 128, 255]);
    assert_eq!(LayerKind::Stroke.placeholder().rgba(i), [255, 255, 255, 255]);
    assert_eq!(LayerKind::TileId.placeholder().rgba(i), [255, 255, 255, 255]);
    assert_eq!(LayerKind::Overlay.placeholder().rgba(i), [0, 0, 0, 0]);
}

#[test]
fn index_derived_placeholder_is_stable_and_varies() {
    let a = Placeholder::IndexDerived.rgba(TileIndex(7));
    let b = Placeholder::IndexDerived.rgba(TileIndex(7));
    let c = Placeholder::IndexDerived.rgba(TileIndex(8));
    assert_eq!(a, b);
    assert_ne!(a, c);
    assert_eq!(a[3], 255);
}

#[test]
fn template_kinds() {
    let templated: Vec<_> = LayerKind::ALL
        .into_iter()
        .filter(|k| k.is_template())
        .collect();
    assert_eq!(
        templated,
        vec![
            LayerKind::Mask,
            LayerKind::Bump,
            LayerKind::Stroke,
            LayerKind::TileId
        ]
    );
}

#[test]
fn from_rgb8_sets_opaque_alpha() {
    let buf = LayerBuffer::from_rgb8(2, 1, &[1, 2, 3, 4, 5, 6]).unwrap();
    assert_eq!(buf.rgba(0, 0), [1, 2, 3, 255]);
    assert_eq!(buf.rgba(1, 0), [4, 5, 6, 255]);
}

#[test]
fn from_rgba8_rejects_wrong_length() {
    assert!(LayerBuffer::from_rgba8(2, 2, vec![0; 15]).is_err());
}

#[test]
fn weight_uses_first_channel_over_256() {
    let buf = LayerBuffer::solid(1, 1, [128, 0, 0, 255]);
    assert_eq!(buf.weight(0, 0), 0.5);
    let buf = LayerBuffer::solid(1, 1, [255, 255, 255, 255]);
    assert_eq!(buf.weight(0, 0), 255.0 / 256.0);
}

#[test]
fn signed_get_is_bounds_checked() {
    let buf = LayerBuffer::solid(2, 2, [9, 9, 9, 9]);
    assert_eq!(buf.get(1, 1), Some([9, 9, 9, 9]));
    assert_eq!(buf.get(-1, 0), None);
    assert_eq!(buf.get(0, 2), None);
}
