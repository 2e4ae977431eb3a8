use crate::dom::document::{ComputedStyle, NodeId, NodeSpec, OverlayHost};
use crate::dom::geometry::Rect;
use crate::screen::screen_model::{ElementRecord, Snapshot};

pub const CONTAINER_ID: &str = "screen-index-overlay";

pub const PALETTE: [&str; 6] = [
    "#ff5f5f", "#58d365", "#5899ff", "#ffa656", "#c158ff", "#00c3c3",
];

const Z_INDEX: u32 = 2_147_483_640;

pub fn color_for(index: usize) -> &'static str {
    PALETTE[index % PALETTE.len()]
}

/// Draws one labelled box per snapshot record into a full-viewport,
/// pointer-transparent container, and owns every node it injects.
#[derive(Debug, Default)]
pub struct OverlayRenderer {
    injected: Vec<NodeId>,
}

impl OverlayRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Find or create the overlay container and empty it. `None` when the
    /// page has no root container to attach to.
    pub fn init_container(&mut self, host: &mut dyn OverlayHost) -> Option<NodeId> {
        let container = match host.element_by_id(CONTAINER_ID) {
            Some(existing) => existing,
            None => {
                let parent = host.container()?;
                let viewport = host.viewport();
                let spec = NodeSpec::new("div")
                    .attr("id", CONTAINER_ID)
                    .inline_style(&[
                        ("position", "fixed".into()),
                        ("top", "0".into()),
                        ("left", "0".into()),
                        ("width", "100%".into()),
                        ("height", "100%".into()),
                        ("pointer-events", "none".into()),
                        ("z-index", Z_INDEX.to_string()),
                    ])
                    .style(overlay_style())
                    .rect(viewport.as_rect());
                host.create_element(parent, spec)
            }
        };

        if !self.injected.contains(&container) {
            self.injected.push(container);
        }

        host.remove_children(container);
        // Boxes from the previous pass went with the container's children.
        self.injected.retain(|n| host.is_attached(*n));

        Some(container)
    }

    pub fn draw_box(&mut self, host: &mut dyn OverlayHost, container: NodeId, record: &ElementRecord) {
        let color = color_for(record.index);
        let r: Rect = record.rect.into();

        let frame = NodeSpec::new("div")
            .inline_style(&[
                ("position", "fixed".into()),
                ("left", format!("{}px", r.x)),
                ("top", format!("{}px", r.y)),
                ("width", format!("{}px", r.width)),
                ("height", format!("{}px", r.height)),
                ("border", format!("2px solid {}", color)),
                ("background", format!("{}1a", color)),
                ("box-sizing", "border-box".into()),
            ])
            .style(overlay_style())
            .rect(r);
        let frame = host.create_element(container, frame);

        let label = NodeSpec::new("span")
            .inline_style(&[
                ("position", "absolute".into()),
                ("top", "2px".into()),
                ("right", "2px".into()),
                ("background", color.into()),
                ("color", "#fff".into()),
                ("font", "10px/12px sans-serif".into()),
                ("padding", "0 2px".into()),
                ("border-radius", "2px".into()),
            ])
            .style(ComputedStyle {
                display: "inline".into(),
                ..overlay_style()
            })
            .text(format!("{}({})", record.index, record.priority));
        host.create_element(frame, label);

        self.injected.push(frame);
    }

    pub fn render(&mut self, host: &mut dyn OverlayHost, container: NodeId, snapshot: &Snapshot) {
        for record in snapshot {
            self.draw_box(host, container, record);
        }
    }

    /// Remove every injected node. Safe to call repeatedly.
    pub fn dispose(&mut self, host: &mut dyn OverlayHost) {
        for node in self.injected.drain(..).rev() {
            host.remove(node);
        }
    }

    /// Injected nodes still owned (container plus boxes).
    pub fn injected(&self) -> usize {
        self.injected.len()
    }
}

fn overlay_style() -> ComputedStyle {
    ComputedStyle {
        pointer_events: "none".into(),
        position: "fixed".into(),
        ..ComputedStyle::default()
    }
}
