//! Tiled JSON documents decoded into [`IrMap`].

use crate::error::MapError;
use crate::grid::Grid;
use crate::ir_map::*;
use crate::loader::source::{sibling, DocumentSource};
use crate::tileset::TilesetDescriptor;
use serde::Deserialize;
use serde_json::Value as JsonValue;

#[derive(Deserialize)]
struct JsonLayer {
    // required on tile layers, absent on object groups
    #[serde(default)]
    data: Option<Vec<u32>>,
    #[serde(default)]
    width: Option<usize>,
    #[serde(default)]
    height: Option<usize>,
    #[serde(default = "default_true")]
    visible: bool,
    #[serde(default)]
    name: String,
    #[serde(rename = "type")]
    kind: Option<String>, // "tilelayer" when absent
    #[serde(default)]
    properties: Vec<JsonProperty>,
    #[serde(default)]
    objects: Vec<JsonObject>,
}

fn default_true() -> bool {
    true
}
fn default_orientation() -> String {
    "orthogonal".to_owned()
}
fn default_render_order() -> String {
    "right-down".to_owned()
}

/// Either an embedded tileset or a `{firstgid, source}` reference to an
/// external tileset document. External documents carry no `firstgid`.
#[derive(Deserialize, Default)]
struct JsonTileset {
    #[serde(default)]
    firstgid: Option<u32>,
    #[serde(default)]
    source: Option<String>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    tilewidth: Option<u32>,
    #[serde(default)]
    tileheight: Option<u32>,
    #[serde(default)]
    spacing: u32,
    #[serde(default)]
    margin: u32,
    #[serde(default)]
    image: Option<String>,
    #[serde(default)]
    imagewidth: Option<u32>,
    #[serde(default)]
    imageheight: Option<u32>,
    #[serde(default)]
    properties: Vec<JsonProperty>,
}

#[derive(Deserialize)]
struct JsonMap {
    #[serde(default)]
    version: Option<JsonValue>, // string in current documents, number in old ones
    #[serde(default = "default_orientation")]
    orientation: String,
    #[serde(default = "default_render_order")]
    renderorder: String,
    width: u32,
    height: u32,
    tilewidth: u32,
    tileheight: u32,
    #[serde(default)]
    nextobjectid: u32,
    layers: Vec<JsonLayer>,
    #[serde(default)]
    tilesets: Vec<JsonTileset>,
    #[serde(default)]
    properties: Vec<JsonProperty>,
}

#[derive(Deserialize)]
struct JsonProperty {
    name: String,
    #[serde(default, rename = "type")]
    kind: Option<String>,
    value: JsonValue,
}

#[derive(Deserialize)]
struct JsonObject {
    #[serde(default)]
    id: u32,
    #[serde(default)]
    name: String,
    #[serde(default, rename = "type")]
    kind: String,
    #[serde(default)]
    class: String,
    #[serde(default)]
    x: f32,
    #[serde(default)]
    y: f32,
    #[serde(default)]
    width: f32,
    #[serde(default)]
    height: f32,
    #[serde(default = "default_true")]
    visible: bool,
    #[serde(default)]
    properties: Vec<JsonProperty>,
}

fn invalid_number(name: &str, value: &JsonValue) -> MapError {
    let value = match value {
        JsonValue::String(s) => s.clone(),
        other => other.to_string(),
    };
    MapError::InvalidNumber { name: name.to_owned(), value }
}

/// Declared types are honoured strictly; undeclared strings that read as
/// integers become integers.
fn json_property_to_ir(prop: JsonProperty) -> Result<(String, PropertyValue), MapError> {
    let JsonProperty { name, kind, value } = prop;

    let parsed = match kind.as_deref() {
        Some("bool") => match &value {
            JsonValue::Bool(b) => PropertyValue::Bool(*b),
            JsonValue::String(s) if s == "true" || s == "false" => PropertyValue::Bool(s == "true"),
            _ => return Err(MapError::InvalidMap(format!("property '{name}' is not a bool"))),
        },
        Some("int") | Some("object") => match &value {
            JsonValue::Number(n) => match n.as_i64() {
                Some(v) => PropertyValue::I64(v),
                None => return Err(invalid_number(&name, &value)),
            },
            JsonValue::String(s) => match s.trim().parse() {
                Ok(v) => PropertyValue::I64(v),
                Err(_) => return Err(invalid_number(&name, &value)),
            },
            _ => return Err(invalid_number(&name, &value)),
        },
        Some("float") => match &value {
            JsonValue::Number(n) => match n.as_f64() {
                Some(v) => PropertyValue::F32(v as f32),
                None => return Err(invalid_number(&name, &value)),
            },
            JsonValue::String(s) => match s.trim().parse() {
                Ok(v) => PropertyValue::F32(v),
                Err(_) => return Err(invalid_number(&name, &value)),
            },
            _ => return Err(invalid_number(&name, &value)),
        },
        Some("string") | Some("file") | Some("color") | Some("class") => match value {
            JsonValue::String(s) => PropertyValue::String(s),
            other => PropertyValue::String(other.to_string()),
        },
        Some(other) => {
            return Err(MapError::UnsupportedPropertyType {
                name,
                kind: other.to_owned(),
            });
        }
        None => match value {
            JsonValue::Bool(b) => PropertyValue::Bool(b),
            JsonValue::Number(n) => match n.as_i64() {
                Some(v) => PropertyValue::I64(v),
                None => PropertyValue::F32(n.as_f64().unwrap_or_default() as f32),
            },
            JsonValue::String(s) => match s.trim().parse::<i64>() {
                Ok(v) => PropertyValue::I64(v),
                Err(_) => PropertyValue::String(s),
            },
            other => PropertyValue::String(other.to_string()),
        },
    };

    Ok((name, parsed))
}

fn properties_from_json(props: Vec<JsonProperty>) -> Result<Properties, MapError> {
    let mut out = Properties::new();
    for p in props {
        let (name, value) = json_property_to_ir(p)?;
        out.insert(name, value);
    }
    Ok(out)
}

fn object_to_ir(obj: JsonObject) -> Result<ObjectRecord, MapError> {
    let kind = if !obj.class.is_empty() {
        obj.class
    } else {
        obj.kind
    };

    Ok(ObjectRecord {
        id: obj.id,
        name: obj.name,
        kind,
        x: obj.x,
        y: obj.y,
        width: obj.width,
        height: obj.height,
        visible: obj.visible,
        properties: properties_from_json(obj.properties)?,
    })
}

fn parse_json<T: serde::de::DeserializeOwned>(locator: &str, text: &str) -> Result<T, MapError> {
    serde_json::from_str(text).map_err(|source| MapError::Json {
        locator: locator.to_owned(),
        source,
    })
}

fn require<T>(value: Option<T>, tileset: &str, field: &str) -> Result<T, MapError> {
    value.ok_or_else(|| MapError::InvalidMap(format!("tileset '{tileset}' is missing '{field}'")))
}

fn tileset_to_ir(
    source: &impl DocumentSource,
    map_locator: &str,
    ts: JsonTileset,
) -> Result<TilesetDescriptor, MapError> {
    let first_gid = ts.firstgid.ok_or_else(|| {
        let label = ts.name.as_deref().or(ts.source.as_deref()).unwrap_or("?");
        MapError::InvalidMap(format!("tileset '{label}' is missing 'firstgid'"))
    })?;
    // External tilesets carry everything but firstgid in their own document.
    let (ts, image_base) = match ts.source.as_deref() {
        Some(rel) => {
            let ts_locator = sibling(map_locator, rel);
            let text = source.fetch_text(&ts_locator)?;
            let ext: JsonTileset = parse_json(&ts_locator, &text)?;
            (ext, ts_locator)
        }
        None => (ts, map_locator.to_owned()),
    };

    let label = ts.name.clone().unwrap_or_else(|| format!("firstgid {first_gid}"));
    let name = require(ts.name, &label, "name")?;
    let tile_w = require(ts.tilewidth, &label, "tilewidth")?;
    let tile_h = require(ts.tileheight, &label, "tileheight")?;
    let image = require(ts.image, &label, "image")?;
    let image_w = require(ts.imagewidth, &label, "imagewidth")?;
    let image_h = require(ts.imageheight, &label, "imageheight")?;

    let mut descriptor = TilesetDescriptor::new(
        first_gid,
        name,
        (tile_w, tile_h),
        sibling(&image_base, &image),
        (image_w, image_h),
    )?
    .with_spacing(ts.spacing, ts.margin);
    descriptor.properties = properties_from_json(ts.properties)?;
    Ok(descriptor)
}

/// Fetches and decodes the map document at `locator` (plus any external
/// tilesets it references) into the intermediate representation.
pub fn decode_map_to_ir(source: &impl DocumentSource, locator: &str) -> Result<IrMap, MapError> {
    if !(locator.ends_with(".json") || locator.ends_with(".tmj")) {
        return Err(MapError::InvalidMap(format!(
            "Map file must be a JSON file: {locator}"
        )));
    }

    let txt = source.fetch_text(locator)?;
    let j: JsonMap = parse_json(locator, &txt)?;

    let tilesets = j
        .tilesets
        .into_iter()
        .map(|ts| tileset_to_ir(source, locator, ts))
        .collect::<Result<Vec<_>, _>>()?;

    let mut layers = Vec::with_capacity(j.layers.len());
    for l in j.layers {
        let properties = properties_from_json(l.properties)?;
        let kind = match l.kind.as_deref().unwrap_or("tilelayer") {
            "tilelayer" => {
                let missing = |field: &str| {
                    MapError::InvalidMap(format!("tile layer '{}' is missing '{field}'", l.name))
                };
                let width = l.width.ok_or_else(|| missing("width"))?;
                let height = l.height.ok_or_else(|| missing("height"))?;
                let data = l.data.ok_or_else(|| missing("data"))?;
                IrLayerKind::Tiles(Grid::from_vec(&l.name, width, height, data)?)
            }
            "objectgroup" => IrLayerKind::Objects(
                l.objects
                    .into_iter()
                    .map(object_to_ir)
                    .collect::<Result<Vec<_>, _>>()?,
            ),
            other => {
                log::warn!("layer '{}' has unsupported type '{}', skipping", l.name, other);
                IrLayerKind::Unsupported(other.to_owned())
            }
        };
        layers.push(IrLayer {
            name: l.name,
            visible: l.visible,
            properties,
            kind,
        });
    }

    let version = match j.version {
        Some(JsonValue::String(s)) => s,
        Some(other) => other.to_string(),
        None => String::new(),
    };

    log::info!(
        "decoded map {} ({}x{} tiles, {} tilesets, {} layers)",
        locator,
        j.width,
        j.height,
        tilesets.len(),
        layers.len()
    );

    Ok(IrMap {
        version,
        orientation: j.orientation,
        render_order: j.renderorder,
        width: j.width,
        height: j.height,
        tile_w: j.tilewidth,
        tile_h: j.tileheight,
        next_object_id: j.nextobjectid,
        properties: properties_from_json(j.properties)?,
        tilesets,
        layers,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::geom::Point;
    use crate::loader::source::MemorySource;

    const TILESET_JSON: &str = r#"{
      "name":"terrain",
      "tilewidth":16,
      "tileheight":16,
      "spacing":1,
      "margin":2,
      "image":"img/terrain.png",
      "imagewidth":64,
      "imageheight":48,
      "properties":[{"name":"biome","type":"string","value":"forest"}]
    }"#;

    #[test]
    fn parses_map_layers_objects_and_properties() {
        let map_json = r#"{
          "version": "1.10",
          "orientation": "orthogonal",
          "width": 2,
          "height": 2,
          "tilewidth": 16,
          "tileheight": 16,
          "nextobjectid": 8,
          "properties": [
            {"name":"is_night","type":"bool","value":true},
            {"name":"gravity","type":"float","value":9.8},
            {"name":"theme","type":"string","value":"forest"}
          ],
          "layers": [
            {
              "type":"tilelayer",
              "name":"ground",
              "width":2,
              "height":2,
              "data":[1,0,0,3],
              "properties":[{"name":"difficulty","type":"int","value":3}]
            },
            {
              "type":"objectgroup",
              "name":"spawns",
              "objects":[
                {
                  "id": 7,
                  "name":"hero",
                  "type":"player",
                  "x": 32, "y": 48, "width": 16, "height": 24,
                  "properties":[
                    {"name":"movespeed","value":"3"},
                    {"name":"label","value":"north gate"}
                  ]
                }
              ]
            },
            {"type":"imagelayer","name":"sky"}
          ],
          "tilesets":[{"firstgid":1,"source":"tiles/terrain.json"}]
        }"#;
        let src = MemorySource::new()
            .with("maps/level.json", map_json)
            .with("maps/tiles/terrain.json", TILESET_JSON);

        let ir = decode_map_to_ir(&src, "maps/level.json").expect("decode");

        assert_eq!(ir.version, "1.10");
        assert_eq!((ir.width, ir.height, ir.tile_w, ir.tile_h), (2, 2, 16, 16));
        assert_eq!(ir.next_object_id, 8);
        assert_eq!(ir.render_order, "right-down");
        assert_eq!(ir.properties.get_bool("is_night"), Some(true));
        assert_eq!(ir.properties.get_f32("gravity"), Some(9.8));
        assert_eq!(ir.properties.get_string("theme"), Some("forest"));

        let ts = &ir.tilesets[0];
        assert_eq!(ts.name, "terrain");
        assert_eq!(ts.atlas_source, "maps/tiles/img/terrain.png");
        assert_eq!((ts.spacing, ts.margin, ts.columns, ts.rows), (1, 2, 4, 3));
        assert_eq!(ts.properties.get_string("biome"), Some("forest"));

        assert_eq!(ir.layers[0].properties.get_i32("difficulty"), Some(3));
        match &ir.layers[0].kind {
            IrLayerKind::Tiles(grid) => {
                assert_eq!(*grid.get(Point::new(1, 1)).unwrap(), 3);
                assert_eq!(*grid.get(Point::new(1, 0)).unwrap(), 0);
            }
            _ => panic!("expected tile layer"),
        }
        match &ir.layers[1].kind {
            IrLayerKind::Objects(objects) => {
                assert_eq!(objects.len(), 1);
                let hero = &objects[0];
                assert_eq!((hero.id, hero.kind.as_str()), (7, "player"));
                assert_eq!(hero.rect(), crate::geom::Rect::new(32.0, 48.0, 16.0, 24.0));
                assert_eq!(hero.properties.get_i64("movespeed"), Some(3));
                assert_eq!(hero.properties.get_string("label"), Some("north gate"));
            }
            _ => panic!("expected object layer"),
        }
        assert!(matches!(ir.layers[2].kind, IrLayerKind::Unsupported(ref k) if k == "imagelayer"));
    }

    #[test]
    fn embedded_tileset_resolves_image_next_to_map() {
        let map_json = r#"{
          "width":1,"height":1,"tilewidth":8,"tileheight":8,
          "layers":[],
          "tilesets":[{
            "firstgid":5,"name":"items","tilewidth":8,"tileheight":8,
            "image":"items.png","imagewidth":32,"imageheight":8
          }]
        }"#;
        let src = MemorySource::new().with("levels/a.json", map_json);
        let ir = decode_map_to_ir(&src, "levels/a.json").unwrap();
        assert_eq!(ir.tilesets[0].first_gid, 5);
        assert_eq!(ir.tilesets[0].atlas_source, "levels/items.png");
    }

    #[test]
    fn returns_typed_error_for_malformed_json() {
        let src = MemorySource::new().with("map.json", "{ not json");
        let err = decode_map_to_ir(&src, "map.json").unwrap_err();
        assert!(matches!(err, MapError::Json { .. }));
        assert_eq!(err.kind(), ErrorKind::Parse);
    }

    #[test]
    fn returns_typed_error_for_missing_tileset_file() {
        let map_json = r#"{
          "width":1,"height":1,"tilewidth":16,"tileheight":16,
          "layers": [],
          "tilesets":[{"firstgid":1,"source":"missing_tileset.json"}]
        }"#;
        let src = MemorySource::new().with("map.json", map_json);
        let err = decode_map_to_ir(&src, "map.json").unwrap_err();
        assert!(matches!(err, MapError::Io { .. }));
    }

    #[test]
    fn returns_typed_error_for_layer_size_mismatch() {
        let map_json = r#"{
          "width":2,"height":2,"tilewidth":8,"tileheight":8,
          "layers":[{"type":"tilelayer","name":"oops","width":2,"height":2,"data":[1,2,3]}]
        }"#;
        let src = MemorySource::new().with("map.json", map_json);
        let err = decode_map_to_ir(&src, "map.json").unwrap_err();
        assert!(matches!(err, MapError::InvalidLayerSize { ref layer, .. } if layer == "oops"));
    }

    #[test]
    fn declared_int_that_is_not_numeric_fails() {
        let map_json = r#"{
          "width":1,"height":1,"tilewidth":8,"tileheight":8,
          "layers":[{"type":"objectgroup","name":"o","objects":[
            {"id":1,"name":"x","properties":[{"name":"speed","type":"int","value":"fast"}]}
          ]}]
        }"#;
        let src = MemorySource::new().with("map.json", map_json);
        let err = decode_map_to_ir(&src, "map.json").unwrap_err();
        assert!(matches!(err, MapError::InvalidNumber { ref name, .. } if name == "speed"));
        assert_eq!(err.kind(), ErrorKind::Value);
    }

    #[test]
    fn returns_typed_error_for_unknown_property_type() {
        let map_json = r#"{
          "width":1,"height":1,"tilewidth":8,"tileheight":8,
          "properties":[{"name":"mystery","type":"not_supported","value":"x"}],
          "layers":[]
        }"#;
        let src = MemorySource::new().with("map.json", map_json);
        let err = decode_map_to_ir(&src, "map.json").unwrap_err();
        assert!(matches!(err, MapError::UnsupportedPropertyType { .. }));
    }

    #[test]
    fn tileset_without_image_size_is_parse_error() {
        let map_json = r#"{
          "width":1,"height":1,"tilewidth":8,"tileheight":8,"layers":[],
          "tilesets":[{"firstgid":1,"name":"t","tilewidth":8,"tileheight":8,"image":"t.png"}]
        }"#;
        let src = MemorySource::new().with("map.json", map_json);
        let err = decode_map_to_ir(&src, "map.json").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Parse);
        assert!(err.to_string().contains("imagewidth"));
    }

    #[test]
    fn tileset_without_firstgid_is_parse_error() {
        let map_json = r#"{
          "width":1,"height":1,"tilewidth":8,"tileheight":8,"layers":[],
          "tilesets":[{"name":"t","tilewidth":8,"tileheight":8,"image":"t.png","imagewidth":8,"imageheight":8}]
        }"#;
        let src = MemorySource::new().with("map.json", map_json);
        let err = decode_map_to_ir(&src, "map.json").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Parse);
        assert!(err.to_string().contains("firstgid"));
    }

    #[test]
    fn tile_layer_without_dimensions_is_parse_error() {
        for layer in [
            r#"{"type":"tilelayer","name":"g","height":1,"data":[0]}"#,
            r#"{"type":"tilelayer","name":"g","width":1,"data":[0]}"#,
            r#"{"name":"g","width":1,"height":1}"#,
        ] {
            let map_json = format!(
                r#"{{"width":1,"height":1,"tilewidth":8,"tileheight":8,"layers":[{layer}]}}"#
            );
            let src = MemorySource::new().with("map.json", &map_json);
            let err = decode_map_to_ir(&src, "map.json").unwrap_err();
            assert!(matches!(err, MapError::InvalidMap(ref m) if m.contains("tile layer 'g'")), "{layer}");
        }
    }

    #[test]
    fn rejects_non_json_locator() {
        let src = MemorySource::new();
        let err = decode_map_to_ir(&src, "level.tmx").unwrap_err();
        assert!(matches!(err, MapError::InvalidMap(_)));
    }
}
