//! Topology map decoding.
//!
//! Map files use a columnar encoding: a shared key list (`nodeKeys`,
//! `lineKeys`) names the positions of every row in `nodeArr` / `lineArr`.
//! Decoding zips keys with rows eagerly, so no positional index survives
//! past this module. A row shorter than its key list leaves the trailing
//! fields at documented defaults; a malformed cell is treated the same as
//! an absent one.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{DecodeError, Result};

/// Node type value for a regular waypoint.
pub const NODE_TYPE_WAYPOINT: i64 = 0;

/// Node type value for a charge-capable node.
pub const NODE_TYPE_CHARGE: i64 = 6;

/// A point in world space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct WorldPoint {
    pub x: f64,
    pub y: f64,
}

impl WorldPoint {
    /// Create a new world-space point.
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// World-space extent of a map.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WorldBounds {
    pub width: f64,
    pub height: f64,
}

impl Default for WorldBounds {
    /// Maps are authored in a 100,000 x 100,000 world unless they say
    /// otherwise.
    fn default() -> Self {
        Self {
            width: 100_000.0,
            height: 100_000.0,
        }
    }
}

/// Classification of a node by its `type` value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeClass {
    /// Regular waypoint (`type == 0`)
    Waypoint,
    /// Charge-capable node (`type == 6`)
    Charge,
    /// Any other type value, including an absent one
    Other,
}

/// A point of interest in the navigation topology.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    /// World-space position
    pub x: f64,
    pub y: f64,
    /// Raw type value; -1 when the row did not carry one
    pub node_type: i64,
    /// String payload carried by the node
    pub content: String,
    /// Unique key used for cross-references (edges, charge bindings)
    pub name: String,
    pub is_turn: bool,
    pub shelf_is_turn: bool,
    /// Auxiliary type values, in row order
    pub extra_types: Vec<i64>,
}

impl Node {
    /// Classify this node for rendering.
    pub fn class(&self) -> NodeClass {
        match self.node_type {
            NODE_TYPE_WAYPOINT => NodeClass::Waypoint,
            NODE_TYPE_CHARGE => NodeClass::Charge,
            _ => NodeClass::Other,
        }
    }

    fn from_row(row: &RowView<'_>) -> Self {
        Self {
            x: row.num_or("x", 0.0),
            y: row.num_or("y", 0.0),
            node_type: row.int_or("type", -1),
            content: row.text("content"),
            name: row.text("name"),
            is_turn: row.flag("isTurn"),
            shelf_is_turn: row.flag("shelfIsTurn"),
            extra_types: row.ints("extraTypes"),
        }
    }
}

/// A directed connector between two nodes, carrying an explicit polyline.
///
/// Endpoint names are weak references: a dangling `from`/`to` never fails,
/// the edge is simply skipped where it cannot be resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    pub from: String,
    pub to: String,
    /// Corridor widths; -1 means unset
    pub left_width: f64,
    pub right_width: f64,
    pub start_expand_distance: f64,
    pub end_expand_distance: f64,
    /// The polyline actually drawn; need not coincide with the endpoints
    pub path: Vec<WorldPoint>,
}

impl Edge {
    /// An edge needs at least two path points to produce any geometry.
    pub fn is_drawable(&self) -> bool {
        self.path.len() >= 2
    }

    fn from_row(row: &RowView<'_>) -> Self {
        Self {
            from: row.text("from"),
            to: row.text("to"),
            left_width: row.num_or("leftWidth", -1.0),
            right_width: row.num_or("rightWidth", -1.0),
            start_expand_distance: row.num_or("startExpandDistance", -1.0),
            end_expand_distance: row.num_or("endExpandDistance", -1.0),
            path: row.points("path"),
        }
    }
}

/// Association between a node name and a local offset.
#[derive(Debug, Clone, PartialEq)]
pub struct ChargeBinding {
    pub node_name: String,
    pub offset: WorldPoint,
}

/// A fully decoded topology map.
///
/// Immutable after decode; importing a new map replaces the whole value.
#[derive(Debug, Clone)]
pub struct TopologyMap {
    map_type: String,
    width: Option<f64>,
    height: Option<f64>,
    nodes: Vec<Node>,
    lines: Vec<Edge>,
    charge_bindings: Vec<ChargeBinding>,
    index: HashMap<String, usize>,
}

impl TopologyMap {
    /// Decode a map file.
    ///
    /// `nodeKeys`, `lineKeys` and `nodeArr` are required; anything else is
    /// optional. No partial map is ever produced: a missing required field
    /// fails the whole decode.
    pub fn decode(raw: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(raw)?;

        let node_keys = key_list(&value, "nodeKeys")?;
        let line_keys = key_list(&value, "lineKeys")?;
        let node_arr = value
            .get("nodeArr")
            .and_then(Value::as_array)
            .ok_or(DecodeError::MissingField("nodeArr"))?;
        let line_arr = value
            .get("lineArr")
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or(&[]);

        let nodes: Vec<Node> = node_arr
            .iter()
            .map(|row| Node::from_row(&RowView::new(&node_keys, row)))
            .collect();
        let lines: Vec<Edge> = line_arr
            .iter()
            .map(|row| Edge::from_row(&RowView::new(&line_keys, row)))
            .collect();
        let charge_bindings = decode_charge_bindings(value.get("chargeCoor"));

        // Name -> row index; on duplicate names the last row wins.
        let index = nodes
            .iter()
            .enumerate()
            .map(|(i, node)| (node.name.clone(), i))
            .collect();

        Ok(Self {
            map_type: value
                .get("type")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_owned(),
            width: value.get("width").and_then(Value::as_f64),
            height: value.get("height").and_then(Value::as_f64),
            nodes,
            lines,
            charge_bindings,
            index,
        })
    }

    /// Informational type tag from the file (e.g. "topo").
    pub fn map_type(&self) -> &str {
        &self.map_type
    }

    /// World bounds, when the file declared both dimensions.
    ///
    /// Absence means "keep the last known bounds in effect".
    pub fn bounds(&self) -> Option<WorldBounds> {
        match (self.width, self.height) {
            (Some(width), Some(height)) => Some(WorldBounds { width, height }),
            _ => None,
        }
    }

    /// All nodes, in row order. Row order is also draw order.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// All edges, in row order.
    pub fn lines(&self) -> &[Edge] {
        &self.lines
    }

    /// Charge-station bindings, in file order.
    pub fn charge_bindings(&self) -> &[ChargeBinding] {
        &self.charge_bindings
    }

    /// O(1) lookup of a node by its unique name.
    pub fn node_by_name(&self, name: &str) -> Option<&Node> {
        self.index.get(name).map(|&i| &self.nodes[i])
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }
}

/// A single columnar row viewed through its key list.
struct RowView<'a> {
    keys: &'a [String],
    row: &'a [Value],
}

impl<'a> RowView<'a> {
    fn new(keys: &'a [String], row: &'a Value) -> Self {
        // A row that is not an array decodes like an all-empty one.
        let row = row.as_array().map(Vec::as_slice).unwrap_or(&[]);
        Self { keys, row }
    }

    fn get(&self, key: &str) -> Option<&'a Value> {
        let position = self.keys.iter().position(|k| k == key)?;
        self.row.get(position)
    }

    fn num_or(&self, key: &str, default: f64) -> f64 {
        self.get(key).and_then(Value::as_f64).unwrap_or(default)
    }

    fn int_or(&self, key: &str, default: i64) -> i64 {
        self.get(key).and_then(Value::as_i64).unwrap_or(default)
    }

    fn text(&self, key: &str) -> String {
        self.get(key)
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_owned()
    }

    /// Boolean-as-int flag: any non-zero number (or a literal true) is set.
    fn flag(&self, key: &str) -> bool {
        match self.get(key) {
            Some(Value::Bool(b)) => *b,
            Some(value) => value.as_f64().is_some_and(|n| n != 0.0),
            None => false,
        }
    }

    fn ints(&self, key: &str) -> Vec<i64> {
        self.get(key)
            .and_then(Value::as_array)
            .map(|values| values.iter().filter_map(Value::as_i64).collect())
            .unwrap_or_default()
    }

    /// A polyline cell: an array of `[x, y]` pairs.
    fn points(&self, key: &str) -> Vec<WorldPoint> {
        self.get(key)
            .and_then(Value::as_array)
            .map(|values| values.iter().filter_map(point_pair).collect())
            .unwrap_or_default()
    }
}

fn point_pair(value: &Value) -> Option<WorldPoint> {
    let pair = value.as_array()?;
    Some(WorldPoint::new(
        pair.first()?.as_f64()?,
        pair.get(1)?.as_f64()?,
    ))
}

fn key_list(value: &Value, field: &'static str) -> Result<Vec<String>> {
    let keys = value
        .get(field)
        .and_then(Value::as_array)
        .ok_or(DecodeError::MissingField(field))?;
    Ok(keys
        .iter()
        .map(|k| k.as_str().unwrap_or_default().to_owned())
        .collect())
}

/// Decode `chargeCoor`, a sequence of `[nodeName, {x, y}]` pairs.
///
/// Entries that do not carry a node name are dropped here; bindings whose
/// name does not resolve against the loaded map are kept and skipped at
/// render time instead.
fn decode_charge_bindings(value: Option<&Value>) -> Vec<ChargeBinding> {
    let Some(entries) = value.and_then(Value::as_array) else {
        return Vec::new();
    };

    entries
        .iter()
        .filter_map(|entry| {
            let pair = entry.as_array()?;
            let node_name = pair.first()?.as_str()?.to_owned();
            let offset = pair
                .get(1)
                .map(|o| {
                    WorldPoint::new(
                        o.get("x").and_then(Value::as_f64).unwrap_or(0.0),
                        o.get("y").and_then(Value::as_f64).unwrap_or(0.0),
                    )
                })
                .unwrap_or_default();
            Some(ChargeBinding { node_name, offset })
        })
        .collect()
}
