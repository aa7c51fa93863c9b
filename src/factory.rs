//! Builds live actors from object-group records.
//!
//! Only `player` objects are recognised. Their sprite setup travels in
//! object properties (`srcRect`, `numrows`, `numframes`, `animmaps`, and
//! optionally `movespeed`, `animspeed`). `srcRect` and `animmaps` hold JSON
//! text:
//!
//! ```json
//! {"x": 0, "y": 0, "w": 32, "h": 32}
//! [{"name": "hero", "row": 1, "first": 0, "length": 3, "type": "key", "triggers": ["a", "left"]}]
//! ```

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value as JsonValue;

use crate::anim::{AnimMap, ControlledSpriteObject, PointerTrigger, Trigger};
use crate::error::MapError;
use crate::geom::Rect;
use crate::input::MouseButton;
use crate::ir_map::{ObjectRecord, Properties};
use crate::player::Player;
use crate::sprite::{ImageObject, SpriteObject};

/// Numbers inside embedded JSON may be written as numbers or as strings.
#[derive(Deserialize)]
#[serde(untagged)]
enum Lenient {
    Int(i64),
    Float(f64),
    Text(String),
}

impl Lenient {
    fn to_f32(&self, name: &str) -> Result<f32, MapError> {
        match self {
            Lenient::Int(v) => Ok(*v as f32),
            Lenient::Float(v) => Ok(*v as f32),
            Lenient::Text(s) => s.trim().parse().map_err(|_| MapError::InvalidNumber {
                name: name.to_owned(),
                value: s.clone(),
            }),
        }
    }

    fn to_u32(&self, name: &str) -> Result<u32, MapError> {
        let invalid = |value: String| MapError::InvalidNumber { name: name.to_owned(), value };
        let v = match self {
            Lenient::Int(v) => *v,
            Lenient::Float(v) if v.fract() == 0.0 => *v as i64,
            Lenient::Float(v) => return Err(invalid(v.to_string())),
            Lenient::Text(s) => s.trim().parse().map_err(|_| invalid(s.clone()))?,
        };
        u32::try_from(v).map_err(|_| invalid(v.to_string()))
    }
}

#[derive(Deserialize)]
struct RectJson {
    x: Lenient,
    y: Lenient,
    w: Lenient,
    h: Lenient,
}

impl RectJson {
    fn to_rect(&self) -> Result<Rect, MapError> {
        Ok(Rect::new(
            self.x.to_f32("x")?,
            self.y.to_f32("y")?,
            self.w.to_f32("w")?,
            self.h.to_f32("h")?,
        ))
    }
}

#[derive(Deserialize)]
struct AnimMapJson {
    name: String,
    row: Lenient,
    first: Lenient,
    length: Lenient,
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    triggers: Vec<JsonValue>,
}

fn embedded_json<T: DeserializeOwned>(
    object: &ObjectRecord,
    property: &str,
) -> Result<T, MapError> {
    let text = object.properties.require_str(property)?;
    serde_json::from_str(text).map_err(|source| MapError::Json {
        locator: format!("object '{}' property '{}'", object.name, property),
        source,
    })
}

fn trigger_from_json(kind: &str, values: Vec<JsonValue>) -> Result<Trigger, MapError> {
    let strings = |values: Vec<JsonValue>| -> Result<Vec<String>, MapError> {
        values
            .into_iter()
            .map(|v| match v {
                JsonValue::String(s) => Ok(s),
                other => Err(MapError::InvalidMap(format!(
                    "{kind} trigger expects names, got {other}"
                ))),
            })
            .collect()
    };

    match kind.to_lowercase().as_str() {
        "key" => Ok(Trigger::keys(strings(values)?)),
        "mousebutton" => {
            let buttons = strings(values)?
                .iter()
                .map(|name| {
                    MouseButton::parse(name).ok_or_else(|| {
                        MapError::InvalidMap(format!("unknown mouse button '{name}'"))
                    })
                })
                .collect::<Result<Vec<_>, _>>()?;
            Ok(Trigger::MouseButton(buttons))
        }
        "mousemove" => {
            let rects = values
                .into_iter()
                .map(|v| {
                    let r: RectJson = serde_json::from_value(v).map_err(|source| MapError::Json {
                        locator: "mousemove trigger".to_owned(),
                        source,
                    })?;
                    Ok(PointerTrigger::Inside(r.to_rect()?))
                })
                .collect::<Result<Vec<_>, MapError>>()?;
            Ok(Trigger::MouseMove(rects))
        }
        other => Err(MapError::InvalidMap(format!("unknown trigger type '{other}'"))),
    }
}

/// Values for properties a `player` object may leave out.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnDefaults {
    /// Frame interval in milliseconds.
    pub anim_speed_ms: u64,
    /// Pixels per tick.
    pub move_speed: f32,
}

impl Default for SpawnDefaults {
    fn default() -> Self {
        SpawnDefaults {
            anim_speed_ms: 133,
            move_speed: 1.4,
        }
    }
}

fn require_u32(props: &Properties, name: &str) -> Result<u32, MapError> {
    let v = props.require_i64(name)?;
    u32::try_from(v).map_err(|_| MapError::InvalidNumber {
        name: name.to_owned(),
        value: v.to_string(),
    })
}

/// Builds a [`Player`] from a `player` object record. The object's name is
/// the sprite's image name and its rectangle the sprite's destination.
pub fn player_from_object(
    object: &ObjectRecord,
    defaults: &SpawnDefaults,
) -> Result<Player, MapError> {
    let props = &object.properties;
    let src = embedded_json::<RectJson>(object, "srcRect")?.to_rect()?;
    let move_speed = match props.get("movespeed") {
        Some(_) => props.require_f32("movespeed")?,
        None => defaults.move_speed,
    };
    let anim_speed = match props.get("animspeed") {
        Some(_) => u64::from(require_u32(props, "animspeed")?),
        None => defaults.anim_speed_ms,
    };
    let rows = require_u32(props, "numrows")?;
    let frames = require_u32(props, "numframes")?;

    let anim_maps = embedded_json::<Vec<AnimMapJson>>(object, "animmaps")?
        .into_iter()
        .map(|m| {
            Ok(AnimMap::new(
                m.name,
                m.row.to_u32("row")?,
                m.first.to_u32("first")?,
                m.length.to_u32("length")?,
                trigger_from_json(&m.kind, m.triggers)?,
            ))
        })
        .collect::<Result<Vec<_>, MapError>>()?;

    let image = ImageObject::new(object.name.clone(), src, object.rect());
    let sprite = SpriteObject::new(image, frames, rows, anim_speed);
    Ok(Player::new(ControlledSpriteObject::new(sprite, anim_maps), move_speed))
}

/// Spawns an actor for every record of a known type, in record order.
pub fn spawn_actors(
    objects: &[ObjectRecord],
    defaults: &SpawnDefaults,
) -> Result<Vec<Player>, MapError> {
    let mut actors = Vec::new();
    for object in objects {
        match object.kind.to_lowercase().as_str() {
            "player" => {
                actors.push(player_from_object(object, defaults)?);
                log::debug!("spawned player '{}' (object {})", object.name, object.id);
            }
            other => log::debug!("object '{}' of type '{}' has no actor", object.name, other),
        }
    }
    Ok(actors)
}
