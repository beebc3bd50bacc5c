use std::path::PathBuf;

use super::*;
use crate::assets::provider::{LayerSettings, MemoryLayerProvider};
use crate::foundation::core::GridGeometry;

fn colour(pos: Compass) -> [u8; 4] {
    let v = (pos as u8 + 1) * 20;
    [v, v, v, 255]
}

fn tiles(index: i64) -> StoryTiles {
    StoryTiles {
        index: TileIndex(index),
        tiles: Compass::ALL.map(|pos| LayerBuffer::solid(4, 4, colour(pos))),
    }
}

#[test]
fn angle_sequence() {
    let s = StorySettings::default();
    assert_eq!(s.angle_deg(TileIndex(0)), -23.0);
    // 137.50309 - 3 * 42 = 11.50309
    assert!((s.angle_deg(TileIndex(1)) - (11.50309 - 23.0)).abs() < 1e-9);
    // 275.00618 - 6 * 42 = 23.00618
    assert!((s.angle_deg(TileIndex(2)) - 0.00618).abs() < 1e-9);
    for i in -50..50 {
        let a = s.angle_deg(TileIndex(i));
        assert!((-23.0..19.0).contains(&a), "angle {a} for {i}");
    }
}

#[test]
fn compass_addresses_index_offsets() {
    let c = TileIndex(10);
    let got: Vec<i64> = Compass::ALL.iter().map(|p| p.tile_index(c, 3).0).collect();
    assert_eq!(got, vec![14, 13, 12, 11, 10, 9, 8, 7, 6]);
}

#[test]
fn load_requests_nine_rendered_tiles() {
    let settings = LayerSettings {
        geometry: GridGeometry {
            target_size: 4,
            margin: 1,
            row_count: 3,
        },
        templates: vec!["a".to_string()],
        assets_root: PathBuf::from("."),
        output_dir: PathBuf::from("output"),
    };
    let provider = MemoryLayerProvider::new(settings);
    let t = StoryTiles::load(&provider, TileIndex(4), 3);
    assert_eq!(provider.requests().len(), 9);
    assert!(provider
        .requests()
        .iter()
        .all(|(k, _)| *k == LayerKind::RenderedPost));
    assert!(t.get(Compass::Center).is_square(4));
}

#[test]
fn centre_range_samples_only_the_centre_tile() {
    let t = tiles(0);
    let origin = (4, 4);
    for y in 4..8 {
        for x in 4..8 {
            assert_eq!(canvas_pixel(&t, origin, x, y), [100, 100, 100]);
        }
    }
}

#[test]
fn regions_map_to_compass_neighbours() {
    let t = tiles(0);
    let origin = (4, 4);
    let rgb = |pos: Compass| {
        let c = colour(pos);
        [c[0], c[1], c[2]]
    };
    assert_eq!(canvas_pixel(&t, origin, 0, 0), rgb(Compass::NorthWest));
    assert_eq!(canvas_pixel(&t, origin, 5, 3), rgb(Compass::North));
    assert_eq!(canvas_pixel(&t, origin, 8, 0), rgb(Compass::NorthEast));
    assert_eq!(canvas_pixel(&t, origin, 3, 5), rgb(Compass::West));
    assert_eq!(canvas_pixel(&t, origin, 11, 7), rgb(Compass::East));
    assert_eq!(canvas_pixel(&t, origin, 0, 11), rgb(Compass::SouthWest));
    assert_eq!(canvas_pixel(&t, origin, 6, 8), rgb(Compass::South));
    assert_eq!(canvas_pixel(&t, origin, 11, 11), rgb(Compass::SouthEast));
}

#[test]
fn beyond_the_neighbourhood_is_black() {
    let t = tiles(0);
    assert_eq!(canvas_pixel(&t, (4, 4), -1, 5), [0, 0, 0]);
    assert_eq!(canvas_pixel(&t, (4, 4), 12, 5), [0, 0, 0]);
}

#[test]
fn wrapped_coordinates_keep_pixel_positions() {
    let mut data = vec![0u8; 4 * 4 * 4];
    // mark local (3, 1) in the west tile
    let i = (4 + 3) * 4;
    data[i..i + 4].copy_from_slice(&[7, 8, 9, 255]);
    let mut t = tiles(0);
    t.tiles[Compass::West as usize] = LayerBuffer::from_rgba8(4, 4, data).unwrap();

    // canvas x = origin - 1 wraps to local x = 3
    assert_eq!(canvas_pixel(&t, (4, 4), 3, 5), [7, 8, 9]);
}

#[test]
fn assembled_canvas_is_centred() {
    let settings = StorySettings {
        canvas_width: 6,
        canvas_height: 6,
        ..StorySettings::default()
    };
    let canvas = assemble_canvas(&tiles(0), &settings, true);
    assert_eq!((canvas.width, canvas.height), (6, 6));
    assert_eq!(canvas.pixel(1, 1), [100, 100, 100]);
    assert_eq!(canvas.pixel(4, 4), [100, 100, 100]);
    assert_eq!(canvas.pixel(0, 0), [20, 20, 20]);
    assert_eq!(canvas.pixel(5, 5), [180, 180, 180]);
}

#[test]
fn story_has_portrait_frame() {
    let settings = StorySettings {
        canvas_width: 10,
        canvas_height: 12,
        width: 6,
        height: 10,
        ..StorySettings::default()
    };
    let img = render_story(&tiles(3), &settings, false).unwrap();
    assert_eq!((img.width, img.height), (6, 10));
    assert_eq!(img, render_story(&tiles(3), &settings, true).unwrap());
}

#[test]
fn story_rejects_empty_frame() {
    let settings = StorySettings {
        width: 0,
        ..StorySettings::default()
    };
    assert!(render_story(&tiles(0), &settings, false).is_err());
}
