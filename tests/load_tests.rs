// tests/load_tests.rs

use std::fs;
use std::path::PathBuf;

use macroquad_tile_sprites::{
    ErrorKind, FileSource, HeadlessAssets, LayerContent, Map, MapError, MemorySource,
};

const EXTERNAL_TILESET: &str = r#"
{
  "name": "terrain",
  "tilewidth": 8,
  "tileheight": 8,
  "spacing": 1,
  "margin": 1,
  "image": "img/terrain.png",
  "imagewidth": 37,
  "imageheight": 19
}
"#;

const MAP_WITH_EXTERNAL: &str = r#"
{
  "width": 2,
  "height": 1,
  "tilewidth": 8,
  "tileheight": 8,
  "tilesets": [ { "firstgid": 1, "source": "tiles/terrain.json" } ],
  "layers": [ { "type": "tilelayer", "name": "L", "width": 2, "height": 1, "data": [0, 6] } ]
}
"#;

fn temp_dir(name: &str) -> PathBuf {
    let mut dir = std::env::temp_dir();
    dir.push(name);
    fs::create_dir_all(dir.join("maps/tiles")).unwrap();
    dir
}

#[test]
fn integration_load_from_files_and_memory() {
    let dir = temp_dir("tile_sprites_load_integration");
    fs::write(dir.join("maps/level.json"), MAP_WITH_EXTERNAL).unwrap();
    fs::write(dir.join("maps/tiles/terrain.json"), EXTERNAL_TILESET).unwrap();

    let mut assets = HeadlessAssets::new();
    let map = Map::load(&FileSource::new(&dir), &mut assets, "maps/level.json").unwrap();
    assert_eq!(assets.locator("terrain"), Some("maps/tiles/img/terrain.png"));

    let ts = &map.tilesets()[0];
    assert_eq!((ts.columns, ts.rows, ts.spacing, ts.margin), (4, 2, 1, 1));
    let tile = match &map.layers()[0].content {
        LayerContent::Tiles(grid) => grid.cells()[1].clone().unwrap(),
        LayerContent::Objects(_) => panic!("expected tiles"),
    };
    // gid 6 -> local 5 -> column 1, row 1, each step 8 + 1 px after a 1 px margin
    assert_eq!((tile.src.x, tile.src.y), (10.0, 10.0));

    let mem = MemorySource::new()
        .with("maps/level.json", MAP_WITH_EXTERNAL)
        .with("maps/tiles/terrain.json", EXTERNAL_TILESET);
    let from_memory = Map::load(&mem, &mut HeadlessAssets::new(), "maps/level.json").unwrap();
    assert_eq!(from_memory.tilesets(), map.tilesets());

    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn missing_map_file_is_io_error() {
    let src = FileSource::new(std::env::temp_dir());
    let err = Map::load(&src, &mut HeadlessAssets::new(), "tile_sprites_missing.json").unwrap_err();
    assert!(matches!(err, MapError::Io { ref locator, .. } if locator == "tile_sprites_missing.json"));
    assert_eq!(err.kind(), ErrorKind::Io);
}

#[test]
fn integration_unsupported_format() {
    let err = Map::load(&MemorySource::new(), &mut HeadlessAssets::new(), "foo.tmx").unwrap_err();
    assert!(matches!(err, MapError::InvalidMap(ref msg) if msg.contains("foo.tmx")));
    assert_eq!(err.kind(), ErrorKind::Parse);
}

#[test]
fn error_on_layer_size_mismatch() {
    let json = r#"{
      "width": 2, "height": 2, "tilewidth": 8, "tileheight": 8,
      "layers": [ { "name": "oops", "width": 2, "height": 2, "data": [1,2,3] } ]
    }"#;
    let src = MemorySource::new().with("m.json", json);
    let err = Map::load(&src, &mut HeadlessAssets::new(), "m.json").unwrap_err();
    assert!(matches!(err, MapError::InvalidLayerSize { ref layer, expected: 4, found: 3 } if layer == "oops"));
}

#[test]
fn load_ignores_extra_fields_and_allows_empty_names() {
    let json = r#"{
      "width": 1, "height": 1, "tilewidth": 8, "tileheight": 8,
      "dummyField": "ignored",
      "layers": [ { "name": "", "width": 1, "height": 1, "data": [0], "opacity": 0.5, "properties": [] } ]
    }"#;
    let src = MemorySource::new().with("m.json", json);
    let map = Map::load(&src, &mut HeadlessAssets::new(), "m.json").expect("unknown fields are ignored");
    assert_eq!(map.layers()[0].name, "");
}

#[test]
fn unsupported_layers_are_dropped_from_the_map() {
    let json = r#"{
      "width": 1, "height": 1, "tilewidth": 8, "tileheight": 8,
      "layers": [
        { "type": "imagelayer", "name": "sky", "image": "sky.png" },
        { "type": "tilelayer", "name": "ground", "width": 1, "height": 1, "data": [0] }
      ]
    }"#;
    let src = MemorySource::new().with("m.json", json);
    let map = Map::load(&src, &mut HeadlessAssets::new(), "m.json").unwrap();
    assert_eq!(map.layers().len(), 1);
    assert_eq!(map.layers()[0].name, "ground");
}

#[test]
fn tileset_narrower_than_a_tile_is_rejected() {
    let json = r#"{
      "width": 1, "height": 1, "tilewidth": 8, "tileheight": 8, "layers": [],
      "tilesets": [ { "firstgid": 1, "name": "thin", "tilewidth": 16, "tileheight": 16,
                      "image": "thin.png", "imagewidth": 8, "imageheight": 16 } ]
    }"#;
    let src = MemorySource::new().with("m.json", json);
    let err = Map::load(&src, &mut HeadlessAssets::new(), "m.json").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Parse);
}

#[test]
fn bad_player_number_fails_the_load() {
    let json = r#"{
      "width": 1, "height": 1, "tilewidth": 8, "tileheight": 8,
      "layers": [ { "type": "objectgroup", "name": "o", "objects": [
        { "id": 1, "name": "hero", "type": "player", "width": 8, "height": 8, "properties": [
          { "name": "srcRect", "value": "{\"x\":0,\"y\":0,\"w\":8,\"h\":8}" },
          { "name": "numrows", "value": "four" },
          { "name": "numframes", "value": 3 },
          { "name": "animmaps", "value": "[]" }
        ] }
      ] } ]
    }"#;
    let src = MemorySource::new().with("m.json", json);
    let err = Map::load(&src, &mut HeadlessAssets::new(), "m.json").unwrap_err();
    assert!(matches!(err, MapError::InvalidNumber { ref name, .. } if name == "numrows"));
}
