//! Text rendering of forests

use std::fmt::Write;

use assettree::prelude::*;

use crate::config::DisplayConfig;

struct Glyphs {
    branch: &'static str,
    last: &'static str,
    pipe: &'static str,
    blank: &'static str,
}

const UNICODE: Glyphs = Glyphs {
    branch: "├── ",
    last: "└── ",
    pipe: "│   ",
    blank: "    ",
};

const ASCII: Glyphs = Glyphs {
    branch: "|-- ",
    last: "`-- ",
    pipe: "|   ",
    blank: "    ",
};

/// Render a forest with one line per node.
pub fn render_forest(forest: &[TreeNode], display: DisplayConfig) -> String {
    let glyphs = if display.ascii { &ASCII } else { &UNICODE };
    let mut out = String::new();

    for root in forest {
        let _ = writeln!(out, "{}", node_label(root, display));
        render_children(&root.children, "", glyphs, display, &mut out);
    }

    out
}

fn render_children(
    children: &[TreeNode],
    prefix: &str,
    glyphs: &Glyphs,
    display: DisplayConfig,
    out: &mut String,
) {
    for (i, child) in children.iter().enumerate() {
        let is_last = i + 1 == children.len();
        let connector = if is_last { glyphs.last } else { glyphs.branch };
        let _ = writeln!(out, "{prefix}{connector}{}", node_label(child, display));

        let next_prefix = format!("{prefix}{}", if is_last { glyphs.blank } else { glyphs.pipe });
        render_children(&child.children, &next_prefix, glyphs, display, out);
    }
}

/// Kind marker, name, sensor indicator and optionally the id.
pub fn node_label(node: &TreeNode, display: DisplayConfig) -> String {
    let attrs = &node.attributes;
    let name = attrs.name.as_deref().unwrap_or("(unnamed)");
    let mut label = format!("{} {name}", kind_marker(attrs.kind, display.ascii));

    // Only components carrying both a status and a sensor type get an indicator
    if let (Some(status), Some(sensor)) = (attrs.status, attrs.sensor_type) {
        let _ = write!(label, " {} {}", sensor_marker(sensor, display.ascii), status.as_str());
    }

    if display.show_ids {
        let _ = write!(label, " ({})", node.id);
    }

    label
}

fn kind_marker(kind: Option<NodeKind>, ascii: bool) -> &'static str {
    match (kind, ascii) {
        (Some(NodeKind::Location), false) => "⌖",
        (Some(NodeKind::Asset), false) => "▣",
        (Some(NodeKind::Component), false) => "◈",
        (Some(NodeKind::Unknown) | None, false) => "·",
        (Some(NodeKind::Location), true) => "[L]",
        (Some(NodeKind::Asset), true) => "[A]",
        (Some(NodeKind::Component), true) => "[C]",
        (Some(NodeKind::Unknown) | None, true) => "[?]",
    }
}

fn sensor_marker(sensor: SensorType, ascii: bool) -> &'static str {
    match (sensor, ascii) {
        (SensorType::Energy, false) => "⚡",
        (SensorType::Vibration, false) => "●",
        (SensorType::Unknown, false) => "○",
        (SensorType::Energy, true) => "<energy>",
        (SensorType::Vibration, true) => "<vibration>",
        (SensorType::Unknown, true) => "<sensor>",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample_forest() -> Forest {
        let locations = parse_records(r#"[{ "id": "L1", "name": "Plant" }]"#).unwrap();
        let assets = parse_records(
            r#"[
                { "id": "A1", "name": "Motor", "parentId": "L1" },
                { "id": "C1", "name": "Vibe", "parentId": "A1", "sensorId": "S1",
                  "sensorType": "vibration", "status": "alert" },
                { "id": "A2", "name": "Belt", "parentId": "L1" },
                { "id": "X", "parentId": "ghost" }
            ]"#,
        )
        .unwrap();
        HierarchyGraph::from_records(locations, assets).build_tree().unwrap()
    }

    // The unnamed placeholder root sorts before "Plant".
    #[test]
    fn test_render_unicode() {
        let text = render_forest(&sample_forest(), DisplayConfig::default());
        assert_eq!(
            text,
            "· (unnamed)\n\
             └── ▣ (unnamed)\n\
             ⌖ Plant\n\
             ├── ▣ Motor\n\
             │   └── ◈ Vibe ● alert\n\
             └── ▣ Belt\n"
        );
    }

    #[test]
    fn test_render_ascii_with_ids() {
        let display = DisplayConfig {
            show_ids: true,
            ascii: true,
        };
        let text = render_forest(&sample_forest()[1..], display);
        assert_eq!(
            text,
            "[L] Plant (L1)\n\
             |-- [A] Motor (A1)\n\
             |   `-- [C] Vibe <vibration> alert (C1)\n\
             `-- [A] Belt (A2)\n"
        );
    }

    #[test]
    fn test_status_without_sensor_type_has_no_indicator() {
        let node = TreeNode {
            id: "C9".to_string(),
            attributes: Attributes::named("Tag")
                .with_kind(NodeKind::Component)
                .with_status(AssetStatus::Operating),
            children: Vec::new(),
        };
        assert_eq!(node_label(&node, DisplayConfig::default()), "◈ Tag");
    }
}
