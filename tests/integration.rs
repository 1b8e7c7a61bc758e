//! Integration tests for the scene pipeline.
//!
//! These tests go from scene JSON to the laid-out geometry snapshot.
//! They verify:
//! - Scene JSON deserializes, including the tagged node kinds
//! - BorderPane and StackPane place their children where expected
//! - Styles feed border insets, padding and size overrides into layout
//! - Malformed scenes are reported with the right error variant

use fxregion::scene::ElementInfo;
use fxregion::{layout_json, LayoutInfo, RegionError};

// ─── Helpers ────────────────────────────────────────────────────

fn lay_out(json: &str) -> LayoutInfo {
    layout_json(json).unwrap_or_else(|e| panic!("layout failed: {}", e))
}

fn named<'a>(info: &'a LayoutInfo, name: &str) -> &'a ElementInfo {
    info.root
        .find(name)
        .unwrap_or_else(|| panic!("no element named {}", name))
}

fn rect_of(e: &ElementInfo) -> (f64, f64, f64, f64) {
    (e.x, e.y, e.width, e.height)
}

// ─── BorderPane ─────────────────────────────────────────────────

#[test]
fn test_border_pane_five_slots() {
    let info = lay_out(
        r#"{
            "width": 300, "height": 200,
            "root": {
                "kind": { "type": "BorderPane" },
                "children": [
                    { "kind": { "type": "Block", "pref": { "width": 50, "height": 20 } }, "name": "top", "slot": "Top" },
                    { "kind": { "type": "Block", "pref": { "width": 50, "height": 30 } }, "name": "bottom", "slot": "Bottom" },
                    { "kind": { "type": "Block", "pref": { "width": 40, "height": 10 } }, "name": "left", "slot": "Left" },
                    { "kind": { "type": "Rectangle", "width": 30, "height": 30 }, "name": "right", "slot": "Right" },
                    { "kind": { "type": "Block", "pref": { "width": 10, "height": 10 } }, "name": "center", "slot": "Center" }
                ]
            }
        }"#,
    );
    assert_eq!((info.width, info.height), (300.0, 200.0));
    assert_eq!(rect_of(named(&info, "top")), (0.0, 0.0, 300.0, 20.0));
    assert_eq!(rect_of(named(&info, "bottom")), (0.0, 170.0, 300.0, 30.0));
    assert_eq!(rect_of(named(&info, "left")), (0.0, 20.0, 40.0, 150.0));
    assert_eq!(rect_of(named(&info, "right")), (270.0, 20.0, 30.0, 30.0));
    assert_eq!(rect_of(named(&info, "center")), (40.0, 20.0, 230.0, 150.0));
}

#[test]
fn test_border_pane_pref_size_from_slots() {
    let info = lay_out(
        r#"{
            "root": {
                "kind": { "type": "BorderPane" },
                "children": [
                    { "kind": { "type": "Rectangle", "width": 100, "height": 20 }, "slot": "Top" },
                    { "kind": { "type": "Rectangle", "width": 30, "height": 50 }, "slot": "Left" },
                    { "kind": { "type": "Rectangle", "width": 40, "height": 60 }, "slot": "Center" }
                ]
            }
        }"#,
    );
    assert_eq!((info.width, info.height), (100.0, 80.0));
}

#[test]
fn test_border_pane_slot_margin() {
    let info = lay_out(
        r#"{
            "width": 100, "height": 100,
            "root": {
                "kind": { "type": "BorderPane" },
                "children": [
                    {
                        "kind": { "type": "Block", "pref": { "width": 10, "height": 10 } },
                        "name": "center", "slot": "Center",
                        "margin": { "top": 5, "right": 10, "bottom": 15, "left": 20 }
                    }
                ]
            }
        }"#,
    );
    assert_eq!(rect_of(named(&info, "center")), (20.0, 5.0, 70.0, 80.0));
}

// ─── StackPane ──────────────────────────────────────────────────

#[test]
fn test_stack_pane_centers_and_aligns() {
    let info = lay_out(
        r#"{
            "width": 300, "height": 200,
            "root": {
                "kind": { "type": "StackPane" },
                "children": [
                    { "kind": { "type": "Rectangle", "width": 100, "height": 50 }, "name": "middle" },
                    { "kind": { "type": "Rectangle", "width": 100, "height": 50 }, "name": "corner", "alignment": "BottomRight" }
                ]
            }
        }"#,
    );
    assert_eq!(rect_of(named(&info, "middle")), (100.0, 75.0, 100.0, 50.0));
    assert_eq!(rect_of(named(&info, "corner")), (200.0, 150.0, 100.0, 50.0));
}

#[test]
fn test_stack_pane_alignment_applies_to_all_children() {
    let info = lay_out(
        r#"{
            "width": 100, "height": 100,
            "root": {
                "kind": { "type": "StackPane", "alignment": "TopLeft" },
                "children": [
                    { "kind": { "type": "Rectangle", "width": 10, "height": 10 }, "name": "a" }
                ]
            }
        }"#,
    );
    assert_eq!(rect_of(named(&info, "a")), (0.0, 0.0, 10.0, 10.0));
}

#[test]
fn test_unmanaged_children_do_not_size_the_pane() {
    let info = lay_out(
        r#"{
            "root": {
                "kind": { "type": "StackPane" },
                "children": [
                    { "kind": { "type": "Rectangle", "width": 40, "height": 40 } },
                    { "kind": { "type": "Rectangle", "width": 100, "height": 100 }, "name": "floating", "managed": false }
                ]
            }
        }"#,
    );
    assert_eq!((info.width, info.height), (40.0, 40.0));
    let floating = named(&info, "floating");
    assert!(!floating.managed);
    assert_eq!((floating.x, floating.y), (0.0, 0.0));
}

// ─── Pane ───────────────────────────────────────────────────────

#[test]
fn test_pane_keeps_child_positions() {
    let info = lay_out(
        r#"{
            "root": {
                "kind": { "type": "Pane" },
                "children": [
                    { "kind": { "type": "Rectangle", "width": 50, "height": 40 }, "name": "r", "x": 10, "y": 20 }
                ]
            }
        }"#,
    );
    assert_eq!((info.width, info.height), (60.0, 60.0));
    assert_eq!(rect_of(named(&info, "r")), (10.0, 20.0, 50.0, 40.0));
    assert_eq!(info.root.kind, "Pane");
}

// ─── Styles ─────────────────────────────────────────────────────

#[test]
fn test_border_and_padding_offset_children() {
    let info = lay_out(
        r#"{
            "width": 100, "height": 100,
            "root": {
                "kind": { "type": "StackPane", "alignment": "TopLeft" },
                "style": "-fx-border-color: black; -fx-border-width: 5",
                "padding": { "top": 10, "right": 10, "bottom": 10, "left": 10 },
                "children": [
                    { "kind": { "type": "Rectangle", "width": 10, "height": 10 }, "name": "r" }
                ]
            }
        }"#,
    );
    assert_eq!(rect_of(named(&info, "r")), (15.0, 15.0, 10.0, 10.0));
    let border = info.root.border.as_ref().unwrap();
    assert_eq!(border.strokes, 1);
    assert_eq!(border.insets.top, 5.0);
}

#[test]
fn test_style_overrides_node_fields() {
    let info = lay_out(
        r#"{
            "root": {
                "kind": { "type": "StackPane" },
                "prefWidth": 120, "prefHeight": 80,
                "style": "-fx-pref-width: 50px"
            }
        }"#,
    );
    assert_eq!((info.width, info.height), (50.0, 80.0));
}

#[test]
fn test_em_lengths_use_scene_font_size() {
    let info = lay_out(
        r#"{
            "fontSize": 20,
            "root": {
                "kind": { "type": "StackPane" },
                "style": "-fx-padding: 1em",
                "children": [
                    { "kind": { "type": "Rectangle", "width": 10, "height": 10 }, "name": "r" }
                ]
            }
        }"#,
    );
    assert_eq!((info.width, info.height), (50.0, 50.0));
    assert_eq!((named(&info, "r").x, named(&info, "r").y), (20.0, 20.0));
}

#[test]
fn test_background_snapshot_serializes_camel_case() {
    let info = lay_out(
        r#"{
            "width": 100, "height": 50,
            "root": {
                "kind": { "type": "Pane" },
                "name": "box",
                "style": "-fx-background-color: white, red; -fx-background-insets: -2, 4"
            }
        }"#,
    );
    let json = serde_json::to_value(&info).unwrap();
    let bg = &json["root"]["background"];
    assert_eq!(bg["fills"], 2);
    assert_eq!(bg["outsets"]["top"], 2.0);
    assert!(bg.get("opaqueInsets").is_some());
    assert!(json["root"].get("children").is_none());
    assert_eq!(json["root"]["name"], "box");
}

// ─── Errors ─────────────────────────────────────────────────────

#[test]
fn test_null_padding_is_a_parse_error() {
    let err = layout_json(r#"{ "root": { "kind": { "type": "Pane" }, "padding": null } }"#).unwrap_err();
    assert!(matches!(err, RegionError::ParseError { .. }));
    assert!(err.to_string().contains("Hint"));
}

#[test]
fn test_unknown_node_type_is_a_parse_error() {
    let err = layout_json(r#"{ "root": { "kind": { "type": "GridPane" } } }"#).unwrap_err();
    assert!(matches!(err, RegionError::ParseError { .. }));
}

#[test]
fn test_structural_mistakes_are_invalid_scenes() {
    let cases = [
        // BorderPane child without a slot
        r#"{ "root": { "kind": { "type": "BorderPane" }, "children": [
            { "kind": { "type": "Rectangle", "width": 1, "height": 1 } } ] } }"#,
        // slot used twice
        r#"{ "root": { "kind": { "type": "BorderPane" }, "children": [
            { "kind": { "type": "Rectangle", "width": 1, "height": 1 }, "slot": "Top" },
            { "kind": { "type": "Rectangle", "width": 1, "height": 1 }, "slot": "Top" } ] } }"#,
        // slot under a StackPane
        r#"{ "root": { "kind": { "type": "StackPane" }, "children": [
            { "kind": { "type": "Rectangle", "width": 1, "height": 1 }, "slot": "Left" } ] } }"#,
        // children on a leaf
        r#"{ "root": { "kind": { "type": "Rectangle", "width": 1, "height": 1 }, "children": [
            { "kind": { "type": "Pane" } } ] } }"#,
        // negative scene size
        r#"{ "width": -1, "root": { "kind": { "type": "Pane" } } }"#,
    ];
    for json in cases {
        let err = layout_json(json).unwrap_err();
        assert!(matches!(err, RegionError::InvalidScene(_)), "{}: {:?}", json, err);
    }
}
