//! Typed model of the entity collection document.
//!
//! The document is externally owned: it is produced by another tool, holds
//! far more state than this crate understands, and must round-trip without
//! losing any of it. The model therefore types only the fields the record
//! builders read or write (class tags, path names, transforms, entity
//! payloads) and flattens everything else into opaque JSON maps.

use std::io::{Read, Write};
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{SaveError, SaveResult};

/// Placement transform of an actor record.
///
/// Rotation is a quaternion in `[x, y, z, w]` component order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActorTransform {
    /// Orientation quaternion, `[x, y, z, w]`.
    pub rotation: [f64; 4],

    /// World-space position.
    pub translation: [f64; 3],

    /// Per-axis scale factors.
    #[serde(rename = "scale3d")]
    pub scale: [f64; 3],
}

impl ActorTransform {
    /// Identity transform: no rotation, origin position, unit scale.
    #[must_use]
    pub const fn identity() -> Self {
        Self {
            rotation: [0.0, 0.0, 0.0, 1.0],
            translation: [0.0, 0.0, 0.0],
            scale: [1.0, 1.0, 1.0],
        }
    }
}

impl Default for ActorTransform {
    fn default() -> Self {
        Self::identity()
    }
}

/// A placed actor record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Actor {
    /// Blueprint class tag, e.g.
    /// `/Game/.../BP_ItemPickup_Spawnable.BP_ItemPickup_Spawnable_C`.
    #[serde(rename = "className")]
    pub class_name: String,

    /// Unique instance path, ending in `_<id>`.
    #[serde(rename = "pathName")]
    pub path_name: String,

    /// World placement.
    pub transform: ActorTransform,

    /// Gameplay state payload. Opaque to everything but the builders that
    /// construct it.
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub entity: Value,

    /// All remaining fields, preserved verbatim.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A non-actor component record, owned by an actor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Component {
    /// Component class tag.
    #[serde(rename = "className")]
    pub class_name: String,

    /// Unique instance path, ending in `_<id>`.
    #[serde(rename = "pathName")]
    pub path_name: String,

    /// Path of the actor this component belongs to.
    #[serde(rename = "outerPathName", default)]
    pub parent_actor_path: String,

    /// Component state payload.
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub entity: Value,

    /// All remaining fields, preserved verbatim.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// An entity collection document: the actor and component lists the record
/// builders append to, plus everything else the host tool stored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SaveDocument {
    /// Placed actors.
    pub actors: Vec<Actor>,

    /// Components owned by actors.
    pub components: Vec<Component>,

    /// All remaining document state, preserved verbatim.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl SaveDocument {
    /// Parses a document from a JSON reader.
    ///
    /// # Errors
    ///
    /// Returns [`SaveError::Json`] if the stream is not valid JSON or the
    /// actor/component lists do not match the expected shape.
    pub fn from_reader<R: Read>(reader: R) -> SaveResult<Self> {
        Ok(serde_json::from_reader(reader)?)
    }

    /// Serializes the document as JSON.
    ///
    /// # Errors
    ///
    /// Returns [`SaveError::Json`] on serialization failure or
    /// [`SaveError::Io`] wrapped inside it on write failure.
    pub fn to_writer<W: Write>(&self, writer: W) -> SaveResult<()> {
        Ok(serde_json::to_writer_pretty(writer, self)?)
    }

    /// Stamps `saveDateTime` with the current wall-clock time in
    /// nanoseconds, so the save sorts to the top of the host's load list.
    pub fn touch_save_time(&mut self) {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos())
            .unwrap_or_default();
        self.extra
            .insert("saveDateTime".to_owned(), Value::String(nanos.to_string()));
    }

    /// Returns the next free instance id for actors of the given class.
    ///
    /// Scans every actor whose class tag matches, parses the trailing
    /// `_<digits>` segment of its path name, and returns one past the
    /// maximum. When no actor of the class exists the first id is `1`.
    ///
    /// # Errors
    ///
    /// Returns [`SaveError::BadPathSuffix`] if a matching actor's path name
    /// does not end in a decimal id. Handing out an id that collides with
    /// an unparseable record would corrupt the document, so this is fatal.
    pub fn next_path_id(&self, class_name: &str) -> SaveResult<u64> {
        let mut max_id = 0;
        for actor in self.actors.iter().filter(|a| a.class_name == class_name) {
            let id = path_id(&actor.path_name).ok_or_else(|| SaveError::BadPathSuffix {
                path_name: actor.path_name.clone(),
            })?;
            max_id = max_id.max(id);
        }
        Ok(max_id + 1)
    }
}

/// Parses the trailing `_<digits>` segment of an instance path.
fn path_id(path_name: &str) -> Option<u64> {
    let (_, suffix) = path_name.rsplit_once('_')?;
    suffix.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn actor(class_name: &str, path_name: &str) -> Actor {
        Actor {
            class_name: class_name.to_owned(),
            path_name: path_name.to_owned(),
            transform: ActorTransform::identity(),
            entity: Value::Null,
            extra: Map::new(),
        }
    }

    #[test]
    fn next_id_is_one_past_the_max() {
        let mut doc = SaveDocument::default();
        doc.actors.push(actor("BP_Pickup_C", "Level:PersistentLevel.BP_Pickup_C_3"));
        doc.actors.push(actor("BP_Pickup_C", "Level:PersistentLevel.BP_Pickup_C_17"));
        doc.actors.push(actor("BP_Other_C", "Level:PersistentLevel.BP_Other_C_99"));

        let id = doc.next_path_id("BP_Pickup_C");
        assert!(matches!(id, Ok(18)));
    }

    #[test]
    fn next_id_starts_at_one_for_unknown_class() {
        let doc = SaveDocument::default();
        let id = doc.next_path_id("BP_Pickup_C");
        assert!(matches!(id, Ok(1)));
    }

    #[test]
    fn malformed_suffix_is_fatal() {
        let mut doc = SaveDocument::default();
        doc.actors
            .push(actor("BP_Pickup_C", "Level:PersistentLevel.BP_Pickup_C_abc"));

        let result = doc.next_path_id("BP_Pickup_C");
        assert!(matches!(result, Err(SaveError::BadPathSuffix { .. })));
    }

    #[test]
    fn other_class_suffixes_are_not_parsed() {
        let mut doc = SaveDocument::default();
        doc.actors
            .push(actor("BP_Other_C", "Level:PersistentLevel.BP_Other_C_junk"));

        let id = doc.next_path_id("BP_Pickup_C");
        assert!(matches!(id, Ok(1)));
    }

    #[test]
    fn unknown_fields_round_trip() {
        let input = json!({
            "saveHeaderType": 8,
            "saveVersion": 25,
            "actors": [{
                "type": 1,
                "className": "BP_Pickup_C",
                "pathName": "Level:PersistentLevel.BP_Pickup_C_1",
                "needTransform": true,
                "transform": {
                    "rotation": [0.0, 0.0, 0.0, 1.0],
                    "translation": [1.0, 2.0, 3.0],
                    "scale3d": [1.0, 1.0, 1.0]
                },
                "entity": { "properties": [] }
            }],
            "components": [{
                "type": 0,
                "className": "SplineComponent",
                "pathName": "Level:PersistentLevel.SplineComponent_2",
                "outerPathName": "Level:PersistentLevel.BP_Pickup_C_1",
                "entity": { "properties": [] }
            }]
        });

        let doc: SaveDocument =
            serde_json::from_value(input.clone()).unwrap_or_else(|_| SaveDocument::default());
        assert_eq!(doc.actors.len(), 1);
        assert_eq!(doc.actors[0].extra.get("needTransform"), Some(&json!(true)));
        assert_eq!(doc.extra.get("saveVersion"), Some(&json!(25)));
        assert_eq!(
            doc.components[0].parent_actor_path,
            "Level:PersistentLevel.BP_Pickup_C_1"
        );

        let output = serde_json::to_value(&doc).unwrap_or_default();
        assert_eq!(output, input);
    }

    #[test]
    fn touch_save_time_sets_a_string_timestamp() {
        let mut doc = SaveDocument::default();
        doc.touch_save_time();
        assert!(matches!(
            doc.extra.get("saveDateTime"),
            Some(Value::String(_))
        ));
    }
}
