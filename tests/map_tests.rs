// tests/map_tests.rs

use std::time::Duration;

use macroquad_tile_sprites::{
    AssetStore, Camera, CommandBuffer, DrawCommand, ErrorKind, HeadlessAssets, InputState,
    LayerContent, Map, MemorySource, Point, Rect, Size, Vector,
};

const MAP: &str = r#"
{
  "width": 4,
  "height": 3,
  "tilewidth": 32,
  "tileheight": 32,
  "tilesets": [
    { "firstgid": 1, "name": "ground", "tilewidth": 32, "tileheight": 32,
      "image": "ground.png", "imagewidth": 128, "imageheight": 64 }
  ],
  "layers": [
    { "type": "tilelayer", "name": "ground", "width": 4, "height": 3,
      "data": [1,2,3,4, 5,6,7,8, 1,0,3,4] },
    { "type": "tilelayer", "name": "hidden", "width": 4, "height": 3, "visible": false,
      "data": [1,1,1,1, 1,1,1,1, 1,1,1,1] }
    __OBJECTS__
  ]
}
"#;

const OBJECTS: &str = r#",
    { "type": "objectgroup", "name": "actors", "objects": [
      { "id": 1, "name": "hero", "type": "player", "x": 40, "y": 40, "width": 16, "height": 16,
        "properties": [
          { "name": "srcRect", "value": "{\"x\":0,\"y\":0,\"w\":16,\"h\":16}" },
          { "name": "movespeed", "type": "int", "value": 4 },
          { "name": "numrows", "value": "4" },
          { "name": "numframes", "value": "3" },
          { "name": "animmaps", "value": "[{\"name\":\"hero\",\"row\":2,\"first\":0,\"length\":3,\"type\":\"key\",\"triggers\":[\"d\",\"right\"]}]" }
        ] },
      { "id": 2, "name": "sign", "type": "marker", "x": 96, "y": 0, "width": 32, "height": 8 }
    ] }"#;

fn load(with_objects: bool) -> (Map, HeadlessAssets) {
    let json = MAP.replace("__OBJECTS__", if with_objects { OBJECTS } else { "" });
    let src = MemorySource::new().with("level.json", &json);
    let mut assets = HeadlessAssets::new();
    let map = Map::load(&src, &mut assets, "level.json").expect("map loads");
    (map, assets)
}

fn draws(map: &Map, assets: &HeadlessAssets, camera: &Camera) -> Vec<(Rect, Rect)> {
    let mut surface = CommandBuffer::new();
    map.draw(&mut surface, assets, camera).expect("draw");
    surface
        .commands
        .iter()
        .filter_map(|c| match c {
            DrawCommand::Image { src, dest, .. } => Some((*src, *dest)),
            _ => None,
        })
        .collect()
}

#[test]
fn registers_tileset_atlas_under_its_name() {
    let (map, assets) = load(false);
    assert_eq!(map.tilesets().len(), 1);
    assert_eq!(assets.locator("ground"), Some("ground.png"));
    assert_eq!(map.world_rect(), Rect::new(0.0, 0.0, 128.0, 96.0));
}

#[test]
fn draws_only_tiles_under_the_camera() {
    let (map, assets) = load(false);
    let camera = Camera::new(Rect::new(0.0, 0.0, 64.0, 64.0), map.tile_size());
    let d = draws(&map, &assets, &camera);

    let dests: Vec<Rect> = d.iter().map(|(_, dest)| *dest).collect();
    assert_eq!(
        dests,
        vec![
            Rect::new(0.0, 0.0, 32.0, 32.0),
            Rect::new(32.0, 0.0, 32.0, 32.0),
            Rect::new(0.0, 32.0, 32.0, 32.0),
            Rect::new(32.0, 32.0, 32.0, 32.0),
        ]
    );
    // gid 6 is the second column of the second atlas row
    assert_eq!(d[3].0, Rect::new(32.0, 32.0, 32.0, 32.0));
}

#[test]
fn partly_visible_tiles_are_drawn_and_empty_cells_skipped() {
    let (map, assets) = load(false);
    let camera = Camera::new(Rect::new(16.0, 16.0, 64.0, 80.0), map.tile_size());
    // 3x3 cells overlap the view; the empty cell at (1, 2) draws nothing
    assert_eq!(draws(&map, &assets, &camera).len(), 8);
}

#[test]
fn camera_outside_the_map_draws_nothing() {
    let (map, assets) = load(false);
    let camera = Camera::new(Rect::new(500.0, 500.0, 64.0, 64.0), map.tile_size());
    assert!(draws(&map, &assets, &camera).is_empty());
}

#[test]
fn scrolling_shifts_every_tile_by_minus_delta() {
    let (map, assets) = load(false);
    let mut camera = Camera::new(Rect::new(0.0, 0.0, 64.0, 64.0), Size::new(32.0, 32.0));
    let before = draws(&map, &assets, &camera);

    camera.set_position(Vector::new(10.0, 5.0));
    let after = draws(&map, &assets, &camera);

    for (src, dest) in &before {
        let (_, moved) = after
            .iter()
            .find(|(s, _)| s == src)
            .expect("tile still visible");
        assert_eq!(moved.top_left(), dest.top_left() - Vector::new(10.0, 5.0));
    }
}

#[test]
fn invisible_layers_are_not_drawn() {
    let (map, assets) = load(false);
    let camera = Camera::new(Rect::new(0.0, 0.0, 128.0, 96.0), map.tile_size());
    assert_eq!(draws(&map, &assets, &camera).len(), 11);
    assert!(!map.layer_by_name("hidden").unwrap().1.visible);
}

#[test]
fn tile_lookup_by_cell() {
    let (map, _) = load(false);
    assert!(map.tile_at(0, Point::new(1, 2)).unwrap().is_none());
    let tile = map.tile_at(0, Point::new(2, 2)).unwrap().unwrap();
    assert_eq!(tile.atlas_name, "ground");
    assert_eq!(tile.dest, Rect::new(64.0, 64.0, 32.0, 32.0));
    assert_eq!(map.tile_at(0, Point::new(4, 0)).unwrap_err().kind(), ErrorKind::Index);
}

#[test]
fn gid_ranges_pick_the_owning_tileset() {
    let json = r#"{
      "width": 1, "height": 1, "tilewidth": 16, "tileheight": 16, "layers": [],
      "tilesets": [
        { "firstgid": 12, "name": "c", "tilewidth": 16, "tileheight": 16, "image": "c.png", "imagewidth": 64, "imageheight": 64 },
        { "firstgid": 1, "name": "a", "tilewidth": 16, "tileheight": 16, "image": "a.png", "imagewidth": 64, "imageheight": 16 },
        { "firstgid": 5, "name": "b", "tilewidth": 16, "tileheight": 16, "image": "b.png", "imagewidth": 64, "imageheight": 32 }
      ]
    }"#;
    let src = MemorySource::new().with("gids.json", json);
    let mut assets = HeadlessAssets::new();
    let map = Map::load(&src, &mut assets, "gids.json").unwrap();

    let owner = |gid| map.tileset_for_gid(gid).unwrap().name.clone();
    assert_eq!(owner(4), "a");
    assert_eq!(owner(5), "b");
    assert_eq!(owner(11), "b");
    assert_eq!(owner(100), "c");
    assert_eq!(map.tileset_for_gid(0).unwrap_err().kind(), ErrorKind::Reference);
    assert_eq!(assets.len(), 3);
}

#[test]
fn gid_without_tileset_fails_the_load() {
    let json = r#"{
      "width": 2, "height": 1, "tilewidth": 16, "tileheight": 16,
      "tilesets": [
        { "firstgid": 10, "name": "late", "tilewidth": 16, "tileheight": 16, "image": "late.png", "imagewidth": 64, "imageheight": 16 }
      ],
      "layers": [ { "type": "tilelayer", "name": "g", "width": 2, "height": 1, "data": [0, 3] } ]
    }"#;
    let src = MemorySource::new().with("bad.json", json);
    let err = Map::load(&src, &mut HeadlessAssets::new(), "bad.json").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Reference);
}

#[test]
fn object_layers_spawn_players_and_keep_records() {
    let (map, _) = load(true);
    assert_eq!(map.object_layers().count(), 1);
    assert_eq!(map.objects().count(), 2);
    assert_eq!(map.actors().count(), 1);
    match &map.layer_by_name("actors").unwrap().1.content {
        LayerContent::Objects(o) => assert_eq!(o.objects[1].kind, "marker"),
        LayerContent::Tiles(_) => panic!("expected object layer"),
    }
}

#[test]
fn players_update_and_draw_with_the_camera_offset() {
    let (mut map, mut assets) = load(true);
    let hero = assets.register("hero", "hero.png").unwrap();

    let mut input = InputState::new();
    input.press_key("right");
    map.update(&input, Duration::from_millis(16));
    let player = map.actors().next().unwrap();
    assert_eq!(player.dest().top_left(), Vector::new(44.0, 40.0));
    assert_eq!(player.sprite().sprite().row(), 2);

    let camera = Camera::new(Rect::new(10.0, 0.0, 64.0, 64.0), map.tile_size());
    let mut surface = CommandBuffer::new();
    map.draw(&mut surface, &assets, &camera).unwrap();
    let last = surface.commands.last().unwrap();
    assert_eq!(
        *last,
        DrawCommand::Image {
            atlas: hero,
            src: Rect::new(0.0, 32.0, 16.0, 16.0),
            dest: Rect::new(34.0, 40.0, 16.0, 16.0),
        }
    );
}

#[test]
fn drawing_an_actor_without_its_image_fails() {
    let (map, assets) = load(true);
    let camera = Camera::new(Rect::new(0.0, 0.0, 64.0, 64.0), map.tile_size());
    let mut surface = CommandBuffer::new();
    let err = map.draw(&mut surface, &assets, &camera).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Reference);
}

#[test]
fn debug_outlines_follow_the_camera() {
    let (map, _) = load(true);
    let camera = Camera::new(Rect::new(8.0, 0.0, 64.0, 64.0), map.tile_size());
    let mut surface = CommandBuffer::new();
    map.draw_objects_debug(&mut surface, &camera);
    assert_eq!(
        surface.commands,
        vec![
            DrawCommand::Stroke(Rect::new(32.0, 40.0, 16.0, 16.0)),
            DrawCommand::Stroke(Rect::new(88.0, 0.0, 32.0, 8.0)),
        ]
    );
}

#[test]
fn larger_tileset_tiles_are_drawn_while_they_overlap_the_camera() {
    let json = r#"{
      "width": 4, "height": 1, "tilewidth": 32, "tileheight": 32,
      "tilesets": [
        { "firstgid": 1, "name": "big", "tilewidth": 64, "tileheight": 64,
          "image": "big.png", "imagewidth": 128, "imageheight": 64 }
      ],
      "layers": [ { "type": "tilelayer", "name": "g", "width": 4, "height": 1, "data": [0, 0, 0, 2] } ]
    }"#;
    let src = MemorySource::new().with("mixed.json", json);
    let mut assets = HeadlessAssets::new();
    let map = Map::load(&src, &mut assets, "mixed.json").unwrap();

    // cell 3 of a 64px tileset lands at 192..256, past the 32px grid the camera sees
    let camera = Camera::new(Rect::new(200.0, 0.0, 32.0, 32.0), map.tile_size());
    let d = draws(&map, &assets, &camera);
    assert_eq!(d, vec![(Rect::new(64.0, 0.0, 64.0, 64.0), Rect::new(-8.0, 0.0, 64.0, 64.0))]);
}

#[test]
fn gid_at_the_top_of_the_range_loads() {
    let json = r#"{
      "width": 1, "height": 1, "tilewidth": 16, "tileheight": 16,
      "tilesets": [
        { "firstgid": 1, "name": "column", "tilewidth": 16, "tileheight": 16,
          "image": "column.png", "imagewidth": 16, "imageheight": 64 }
      ],
      "layers": [ { "type": "tilelayer", "name": "g", "width": 1, "height": 1, "data": [536870911] } ]
    }"#;
    let src = MemorySource::new().with("far.json", json);
    let map = Map::load(&src, &mut HeadlessAssets::new(), "far.json").unwrap();
    let tile = map.tile_at(0, Point::new(0, 0)).unwrap().unwrap();
    assert_eq!(tile.src.x, 0.0);
    assert!(tile.src.y > 8.0e9);
}
