use crate::entities::{LabelKey, PlacementId, PrimitiveKey, PrimitiveShape};
use crate::geometry::primitives::Point;

/// Reference to any entity on the layment.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EntityRef {
    Contour(PlacementId),
    Primitive(PrimitiveKey),
    Label(LabelKey),
}

/// Interactions an entity kind supports.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Capabilities {
    pub movable: bool,
    pub rotatable: bool,
    pub resizable: bool,
    pub deletable: bool,
    /// Labels can be attached to it
    pub labelable: bool,
}

impl EntityRef {
    pub fn capabilities(&self) -> Capabilities {
        match self {
            EntityRef::Contour(_) => Capabilities {
                movable: true,
                rotatable: true,
                resizable: false,
                deletable: true,
                labelable: true,
            },
            EntityRef::Primitive(_) => Capabilities {
                movable: true,
                rotatable: false,
                resizable: true,
                deletable: true,
                labelable: false,
            },
            EntityRef::Label(_) => Capabilities {
                movable: true,
                rotatable: false,
                resizable: false,
                deletable: true,
                labelable: false,
            },
        }
    }
}

/// An edit of the layout, applied with [`Layout::apply`](crate::entities::Layout::apply).
///
/// Positions and deltas are in workspace units, sizes of new primitives in millimetres.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// Places a catalog item, centred on the layment if no position is given
    PlaceContour {
        catalog_id: String,
        position: Option<Point>,
    },
    Move {
        target: EntityRef,
        dx: f32,
        dy: f32,
    },
    Rotate {
        id: PlacementId,
        angle: f32,
    },
    RotateStep {
        id: PlacementId,
    },
    /// Snaps an observed angle, e.g. at the end of an interactive rotation
    SnapAngle {
        id: PlacementId,
        observed: f32,
    },
    AddPrimitive {
        shape: PrimitiveShape,
        position: Option<Point>,
    },
    /// `size` is expressed in workspace units
    ResizePrimitive {
        key: PrimitiveKey,
        size: PrimitiveShape,
    },
    Delete {
        target: EntityRef,
    },
    AttachLabel {
        owner: PlacementId,
        text: String,
        offset: Option<(f32, f32)>,
    },
    SetLabelText {
        key: LabelKey,
        text: String,
    },
    SetScale {
        scale: f32,
    },
    ResizeLayment {
        width: f32,
        height: f32,
    },
    ApplyPreset {
        name: String,
    },
}

/// What applying a [`Command`] changed.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CommandOutcome {
    /// The persisted workspace changed and should be saved
    pub persist: bool,
    /// Entity created by the command
    pub created: Option<EntityRef>,
}

impl CommandOutcome {
    pub(crate) fn persist() -> Self {
        CommandOutcome {
            persist: true,
            created: None,
        }
    }

    pub(crate) fn created(entity: EntityRef) -> Self {
        CommandOutcome {
            persist: true,
            created: Some(entity),
        }
    }

    pub(crate) fn unchanged() -> Self {
        CommandOutcome::default()
    }
}
