//! Pickup point record construction.

use hashbrown::HashMap;
use nalgebra::{Point3, UnitQuaternion};
use serde_json::json;

use crate::document::{Actor, ActorTransform, SaveDocument};

/// Default blueprint class for spawnable item pickups.
pub const PICKUP_CLASS: &str =
    "/Game/FactoryGame/Resource/BP_ItemPickup_Spawnable.BP_ItemPickup_Spawnable_C";

/// Default level name for placed records.
pub const PERSISTENT_LEVEL: &str = "Persistent_Level";

/// Per-material placement counters for one scatter run.
///
/// State is scoped to the run that owns it; two concurrent runs never share
/// counters.
#[derive(Debug, Clone, Default)]
pub struct ScatterStats {
    /// Number of records placed, keyed by material tag.
    pub placed: HashMap<String, usize>,
}

impl ScatterStats {
    /// Creates an empty counter set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Bumps the counter for a material tag.
    pub fn record(&mut self, material: &str) {
        *self.placed.entry_ref(material).or_insert(0) += 1;
    }

    /// Number of records placed for one material tag.
    #[must_use]
    pub fn count(&self, material: &str) -> usize {
        self.placed.get(material).copied().unwrap_or(0)
    }

    /// Total records placed across all materials.
    #[must_use]
    pub fn total(&self) -> usize {
        self.placed.values().sum()
    }
}

/// Shared shape of every pickup record one writer produces.
#[derive(Debug, Clone)]
pub struct PointTemplate {
    /// Blueprint class tag of the placed actor.
    pub class_name: String,

    /// Level the actor is placed into.
    pub level_name: String,

    /// Material tag stored in the pickup's inventory payload.
    pub item_name: String,

    /// Per-axis scale of the placed actor.
    pub scale: [f64; 3],
}

impl PointTemplate {
    /// Creates a pickup template with the default class and level, carrying
    /// the given material tag.
    #[must_use]
    pub fn pickup(item_name: impl Into<String>) -> Self {
        Self {
            class_name: PICKUP_CLASS.to_owned(),
            level_name: PERSISTENT_LEVEL.to_owned(),
            item_name: item_name.into(),
            scale: [1.0, 1.0, 1.0],
        }
    }

    /// Sets the per-axis scale of placed actors.
    #[must_use]
    pub const fn with_scale(mut self, scale: [f64; 3]) -> Self {
        self.scale = scale;
        self
    }
}

/// Appends pickup actor records to a document, one per placement point.
#[derive(Debug, Clone)]
pub struct PointRecordWriter {
    template: PointTemplate,
}

impl PointRecordWriter {
    /// Creates a writer from a record template.
    #[must_use]
    pub const fn new(template: PointTemplate) -> Self {
        Self { template }
    }

    /// The material tag this writer stamps into every record.
    #[must_use]
    pub fn material(&self) -> &str {
        &self.template.item_name
    }

    /// Appends one pickup record at `position` with the given instance id.
    ///
    /// A `None` orientation keeps the identity rotation; positions are
    /// written as-is, already in world space.
    pub fn write(
        &self,
        doc: &mut SaveDocument,
        stats: &mut ScatterStats,
        position: Point3<f64>,
        orientation: Option<&UnitQuaternion<f64>>,
        id: u64,
    ) {
        let rotation = orientation.map_or([0.0, 0.0, 0.0, 1.0], |q| [q.i, q.j, q.k, q.w]);
        let short_class = short_class_name(&self.template.class_name);
        let path_name = format!(
            "{}:PersistentLevel.{}_{}",
            self.template.level_name, short_class, id
        );

        doc.actors.push(Actor {
            class_name: self.template.class_name.clone(),
            path_name,
            transform: ActorTransform {
                rotation,
                translation: [position.x, position.y, position.z],
                scale: self.template.scale,
            },
            entity: pickup_entity(&self.template.item_name),
            extra: actor_extra(&self.template.level_name),
        });
        stats.record(&self.template.item_name);
    }
}

/// Trailing class segment of a full blueprint path, used in instance paths.
fn short_class_name(class_name: &str) -> &str {
    class_name
        .rsplit(['.', '/'])
        .next()
        .unwrap_or(class_name)
}

fn actor_extra(level_name: &str) -> serde_json::Map<String, serde_json::Value> {
    let mut extra = serde_json::Map::new();
    extra.insert("type".to_owned(), json!(1));
    extra.insert("levelName".to_owned(), json!(level_name));
    extra.insert("needTransform".to_owned(), json!(true));
    extra.insert("wasPlacedInLevel".to_owned(), json!(false));
    extra
}

/// Inventory payload of an item pickup: one stack of one item of the
/// template's material.
fn pickup_entity(item_name: &str) -> serde_json::Value {
    json!({
        "levelName": "",
        "pathName": "",
        "children": [],
        "properties": [
            {
                "name": "mPickupItems",
                "type": "StructProperty",
                "index": 0,
                "value": {
                    "type": "InventoryStack",
                    "properties": [
                        {
                            "name": "Item",
                            "type": "StructProperty",
                            "index": 0,
                            "value": {
                                "type": "InventoryItem",
                                "itemName": item_name,
                                "levelName": "",
                                "pathName": ""
                            }
                        },
                        {
                            "name": "NumItems",
                            "type": "IntProperty",
                            "index": 0,
                            "value": 1
                        }
                    ]
                }
            }
        ]
    })
}
