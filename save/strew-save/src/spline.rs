//! Spline actor record construction.

use nalgebra::{Point3, Vector3};
use serde_json::json;

use crate::document::{Actor, ActorTransform, Component, SaveDocument};
use crate::point::PERSISTENT_LEVEL;

/// Default blueprint class for spline-shaped pipeline actors.
pub const PIPELINE_CLASS: &str =
    "/Game/FactoryGame/Buildable/Factory/Pipeline/Build_Pipeline.Build_Pipeline_C";

/// Default component class carrying the spline geometry.
pub const SPLINE_COMPONENT_CLASS: &str = "SplineComponent";

/// One spline waypoint: a position plus the incoming and outgoing tangent
/// used by the host's curve interpolation.
#[derive(Debug, Clone, PartialEq)]
pub struct SplinePointData {
    /// Waypoint position, relative to the owning actor.
    pub location: Point3<f64>,

    /// Tangent of the curve arriving at this waypoint.
    pub arrive_tangent: Vector3<f64>,

    /// Tangent of the curve leaving this waypoint.
    pub leave_tangent: Vector3<f64>,
}

impl SplinePointData {
    /// Creates a waypoint.
    #[must_use]
    pub const fn new(
        location: Point3<f64>,
        arrive_tangent: Vector3<f64>,
        leave_tangent: Vector3<f64>,
    ) -> Self {
        Self {
            location,
            arrive_tangent,
            leave_tangent,
        }
    }
}

/// Shared shape of the spline actor records one builder run produces.
#[derive(Debug, Clone)]
pub struct SplineTemplate {
    /// Blueprint class tag of the spline actor.
    pub actor_class: String,

    /// Class tag of the spline component.
    pub component_class: String,

    /// Level the records are placed into.
    pub level_name: String,
}

impl SplineTemplate {
    /// Template for pipeline actors with the default classes and level.
    #[must_use]
    pub fn pipeline() -> Self {
        Self {
            actor_class: PIPELINE_CLASS.to_owned(),
            component_class: SPLINE_COMPONENT_CLASS.to_owned(),
            level_name: PERSISTENT_LEVEL.to_owned(),
        }
    }
}

/// Builds one spline actor and its spline component as typed records.
///
/// Each builder consumes exactly [`SplineActorBuilder::ID_SPAN`] instance
/// ids regardless of how many waypoints the curve has: one for the actor,
/// one for the component.
#[derive(Debug, Clone)]
pub struct SplineActorBuilder {
    actor: Actor,
    component: Component,
}

impl SplineActorBuilder {
    /// Instance ids consumed per built spline actor.
    pub const ID_SPAN: u64 = 2;

    /// Builds the actor/component pair.
    ///
    /// The actor is translated to `anchor`; waypoint locations are
    /// interpreted relative to it. The actor takes id `id_offset`, the
    /// component `id_offset + 1`, and the two records cross-reference each
    /// other by path.
    #[must_use]
    pub fn new(
        template: &SplineTemplate,
        id_offset: u64,
        anchor: Point3<f64>,
        waypoints: &[SplinePointData],
    ) -> Self {
        let actor_path = format!(
            "{}:PersistentLevel.{}_{}",
            template.level_name,
            short_class_name(&template.actor_class),
            id_offset
        );
        let component_path = format!(
            "{}:PersistentLevel.{}_{}",
            template.level_name,
            short_class_name(&template.component_class),
            id_offset + 1
        );

        let actor = Actor {
            class_name: template.actor_class.clone(),
            path_name: actor_path.clone(),
            transform: ActorTransform {
                rotation: [0.0, 0.0, 0.0, 1.0],
                translation: [anchor.x, anchor.y, anchor.z],
                scale: [1.0, 1.0, 1.0],
            },
            entity: spline_entity(&component_path, waypoints),
            extra: record_extra(1, &template.level_name),
        };

        let component = Component {
            class_name: template.component_class.clone(),
            path_name: component_path,
            parent_actor_path: actor_path,
            entity: json!({ "properties": [] }),
            extra: record_extra(0, &template.level_name),
        };

        Self { actor, component }
    }

    /// Number of waypoints stored in the actor's spline data.
    #[must_use]
    pub fn waypoint_count(&self) -> usize {
        self.actor
            .entity
            .pointer("/properties/0/value/values")
            .and_then(serde_json::Value::as_array)
            .map_or(0, Vec::len)
    }

    /// Appends the actor and component onto the document's lists.
    pub fn append_to(self, doc: &mut SaveDocument) {
        doc.actors.push(self.actor);
        doc.components.push(self.component);
    }
}

fn short_class_name(class_name: &str) -> &str {
    class_name
        .rsplit(['.', '/'])
        .next()
        .unwrap_or(class_name)
}

fn record_extra(record_type: i64, level_name: &str) -> serde_json::Map<String, serde_json::Value> {
    let mut extra = serde_json::Map::new();
    extra.insert("type".to_owned(), json!(record_type));
    extra.insert("levelName".to_owned(), json!(level_name));
    extra
}

fn vector_property(name: &str, v: [f64; 3]) -> serde_json::Value {
    json!({
        "name": name,
        "type": "StructProperty",
        "index": 0,
        "value": {
            "type": "Vector",
            "x": v[0],
            "y": v[1],
            "z": v[2]
        }
    })
}

/// Actor payload: the component reference plus the `mSplineData` waypoint
/// array in the host's property shape.
fn spline_entity(component_path: &str, waypoints: &[SplinePointData]) -> serde_json::Value {
    let values: Vec<serde_json::Value> = waypoints
        .iter()
        .map(|wp| {
            json!({
                "properties": [
                    vector_property("Location", [wp.location.x, wp.location.y, wp.location.z]),
                    vector_property(
                        "ArriveTangent",
                        [wp.arrive_tangent.x, wp.arrive_tangent.y, wp.arrive_tangent.z],
                    ),
                    vector_property(
                        "LeaveTangent",
                        [wp.leave_tangent.x, wp.leave_tangent.y, wp.leave_tangent.z],
                    ),
                ]
            })
        })
        .collect();

    json!({
        "levelName": "",
        "pathName": component_path,
        "children": [],
        "properties": [
            {
                "name": "mSplineData",
                "type": "ArrayProperty",
                "index": 0,
                "value": {
                    "type": "StructProperty",
                    "values": values
                }
            }
        ]
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square_waypoints() -> Vec<SplinePointData> {
        let corners = [
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(10.0, 0.0, 0.0),
            Point3::new(10.0, 10.0, 0.0),
            Point3::new(0.0, 10.0, 0.0),
        ];
        corners
            .iter()
            .map(|&c| SplinePointData::new(c, Vector3::zeros(), Vector3::zeros()))
            .collect()
    }

    #[test]
    fn builder_emits_one_actor_and_one_component() {
        let mut doc = SaveDocument::default();
        let builder = SplineActorBuilder::new(
            &SplineTemplate::pipeline(),
            7,
            Point3::new(100.0, 200.0, 300.0),
            &square_waypoints(),
        );
        builder.append_to(&mut doc);

        assert_eq!(doc.actors.len(), 1);
        assert_eq!(doc.components.len(), 1);
        assert_eq!(doc.actors[0].transform.translation, [100.0, 200.0, 300.0]);
    }

    #[test]
    fn records_cross_reference_each_other() {
        let builder = SplineActorBuilder::new(
            &SplineTemplate::pipeline(),
            7,
            Point3::origin(),
            &square_waypoints(),
        );

        assert_eq!(
            builder.actor.path_name,
            "Persistent_Level:PersistentLevel.Build_Pipeline_C_7"
        );
        assert_eq!(
            builder.component.path_name,
            "Persistent_Level:PersistentLevel.SplineComponent_8"
        );
        assert_eq!(builder.component.parent_actor_path, builder.actor.path_name);
        assert_eq!(
            builder.actor.entity.pointer("/pathName"),
            Some(&serde_json::Value::String(
                builder.component.path_name.clone()
            ))
        );
    }

    #[test]
    fn waypoints_land_in_the_spline_data() {
        let builder = SplineActorBuilder::new(
            &SplineTemplate::pipeline(),
            1,
            Point3::origin(),
            &square_waypoints(),
        );

        assert_eq!(builder.waypoint_count(), 4);
        let first = builder
            .actor
            .entity
            .pointer("/properties/0/value/values/0/properties/0/value/x");
        assert_eq!(first, Some(&json!(0.0)));
    }

    #[test]
    fn id_span_covers_both_records() {
        assert_eq!(SplineActorBuilder::ID_SPAN, 2);
    }
}
