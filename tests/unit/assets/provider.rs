use super::*;

fn small_settings(root: &str) -> LayerSettings {
    LayerSettings {
        geometry: GridGeometry {
            target_size: 8,
            margin: 2,
            row_count: 3,
        },
        templates: ["a", "b", "c", "d", "e", "f", "g"]
            .iter()
            .map(|s| s.to_string())
            .collect(),
        assets_root: PathBuf::from(root),
        output_dir: PathBuf::from(root).join("output"),
    }
}

#[test]
fn templates_cycle_by_index_mod_len() {
    let s = small_settings(".");
    assert_eq!(s.template_for(TileIndex(0)), "a");
    assert_eq!(s.template_for(TileIndex(6)), "g");
    assert_eq!(s.template_for(TileIndex(7)), "a");
    assert_eq!(s.template_for(TileIndex(9)), "c");
    assert_eq!(s.template_for(TileIndex(-1)), "g");
}

#[test]
fn conventional_paths() {
    let s = small_settings("assets");
    assert_eq!(
        s.path_for(LayerKind::Source, TileIndex(5)),
        PathBuf::from("assets/source/5.png")
    );
    assert_eq!(
        s.path_for(LayerKind::Overlay, TileIndex(5)),
        PathBuf::from("assets/overlay/overlay_5.png")
    );
    assert_eq!(
        s.path_for(LayerKind::Mask, TileIndex(8)),
        PathBuf::from("assets/mask/mask_b.png")
    );
    assert_eq!(
        s.path_for(LayerKind::TileId, TileIndex(2)),
        PathBuf::from("assets/tileid/tileid_c.png")
    );
    assert_eq!(
        s.path_for(LayerKind::RenderedPost, TileIndex(4)),
        PathBuf::from("assets/output/post_4.png")
    );
}

#[test]
fn fs_provider_substitutes_placeholders_for_missing_files() {
    let provider = FsLayerProvider::new(small_settings("target/unit_provider_missing"));

    let bump = provider.load(LayerKind::Bump, TileIndex(1));
    assert!(bump.is_square(12));
    assert_eq!(bump.rgba(5, 5), [128, 128, 128, 255]);

    let overlay = provider.load(LayerKind::Overlay, TileIndex(1));
    assert_eq!(overlay.rgba(0, 0), [0, 0, 0, 0]);

    let post = provider.load(LayerKind::RenderedPost, TileIndex(1));
    assert!(post.is_square(8));
}

#[test]
fn fs_provider_rejects_wrong_dimensions() {
    let root = PathBuf::from("target").join("unit_provider_dims");
    let settings = small_settings(root.to_str().unwrap());
    let path = settings.path_for(LayerKind::Source, TileIndex(0));
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    image::RgbImage::from_pixel(3, 3, image::Rgb([200, 10, 10]))
        .save(&path)
        .unwrap();

    let provider = FsLayerProvider::new(settings);
    let src = provider.load(LayerKind::Source, TileIndex(0));
    assert!(src.is_square(12));
    assert_eq!(src.rgba(0, 0), [0, 0, 0, 255]);
}

#[test]
fn fs_provider_loads_present_assets() {
    let root = PathBuf::from("target").join("unit_provider_present");
    let settings = small_settings(root.to_str().unwrap());
    let path = settings.path_for(LayerKind::Mask, TileIndex(7));
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    image::RgbImage::from_pixel(12, 12, image::Rgb([77, 0, 0]))
        .save(&path)
        .unwrap();

    let provider = FsLayerProvider::new(settings);
    assert_eq!(provider.load(LayerKind::Mask, TileIndex(0)).rgba(3, 3), [77, 0, 0, 255]);
    assert_eq!(provider.load(LayerKind::Mask, TileIndex(14)).rgba(3, 3), [77, 0, 0, 255]);
}

#[test]
fn memory_provider_records_requests_and_resolves_templates() {
    let mut provider = MemoryLayerProvider::new(small_settings("."));
    provider.insert_template(LayerKind::Mask, "b", LayerBuffer::solid(12, 12, [9, 0, 0, 255]));
    provider.insert(
        LayerKind::Source,
        TileIndex(1),
        LayerBuffer::solid(12, 12, [1, 2, 3, 255]),
    );

    assert_eq!(provider.load(LayerKind::Mask, TileIndex(8)).rgba(0, 0), [9, 0, 0, 255]);
    assert_eq!(provider.load(LayerKind::Source, TileIndex(1)).rgba(0, 0), [1, 2, 3, 255]);
    assert_eq!(provider.load(LayerKind::Source, TileIndex(2)).rgba(0, 0), [0, 0, 0, 255]);

    assert_eq!(
        provider.requests(),
        vec![
            (LayerKind::Mask, TileIndex(8)),
            (LayerKind::Source, TileIndex(1)),
            (LayerKind::Source, TileIndex(2)),
        ]
    );
}
