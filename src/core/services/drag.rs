//! Drag exchange protocol
//!
//! State machine for moving an entity between drop-target containers:
//!
//! ```text
//! Idle -> Armed -> InFlight <-> Hovering -> Dropped -> Idle
//!            \________\___________\_______> Cancelled -> Idle
//! ```
//!
//! The gesture payload carries only the entity identifier and the origin
//! container tag. A successful drop is persisted through
//! [`ReactiveStore::move_status`], whose no-op rule makes a drop onto the
//! entity's current column invisible.
//!
//! Every event returns a [`Transition`] so the caller can update drop-target
//! indicators on the render surface.

use log::{debug, info, warn};
use serde::Serialize;

use super::store::{Entity, ReactiveStore};

/// Transfer type set by `drag_start`
pub const TEXT_PLAIN: &str = "text/plain";

/// A drop-target container (a board column)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Container<S> {
    /// Container tag, e.g. "active"
    pub tag: String,
    /// Status given to entities dropped here
    pub status: S,
    /// Transfer types this container accepts
    pub accepts: Vec<String>,
}

impl<S> Container<S> {
    /// Create a container accepting [`TEXT_PLAIN`]
    pub fn new(tag: impl Into<String>, status: S) -> Self {
        Self {
            tag: tag.into(),
            status,
            accepts: vec![TEXT_PLAIN.to_string()],
        }
    }

    /// Replace the accepted transfer types
    #[must_use]
    pub fn accepting<I, T>(mut self, types: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.accepts = types.into_iter().map(Into::into).collect();
        self
    }

    /// Whether a payload of this transfer type may be dropped here
    #[must_use]
    pub fn accepts(&self, transfer_type: &str) -> bool {
        self.accepts.iter().any(|t| t == transfer_type)
    }
}

/// Data carried by a drag gesture
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DragPayload {
    /// Transfer data: the entity identifier as text
    pub data: String,
    /// Tag of the container the drag started from
    pub origin: String,
    /// Declared transfer type
    pub transfer_type: String,
}

impl DragPayload {
    /// Entity identifier, or `None` when the data is blank
    #[must_use]
    pub fn entity_id(&self) -> Option<&str> {
        let id = self.data.trim();
        (!id.is_empty()).then_some(id)
    }
}

/// Current gesture state
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DragState {
    /// No gesture in progress
    #[default]
    Idle,
    /// Pointer is down on a draggable item
    Armed {
        /// Entity under the pointer
        entity_id: String,
        /// Container the item sits in
        origin: String,
    },
    /// Drag started, not over an accepting container
    InFlight(DragPayload),
    /// Over an accepting container
    Hovering {
        /// Gesture payload
        payload: DragPayload,
        /// Hovered container tag
        target: String,
    },
}

/// Why a gesture ended without a drop
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CancelReason {
    /// Drop arrived with no gesture in progress
    NoPayload,
    /// Payload data did not name an entity
    MalformedPayload,
    /// Drop on a container that was not being hovered
    NotHovered,
    /// Drop on a container that is not registered
    UnknownTarget,
    /// Gesture ended without a drop
    Abandoned,
}

impl std::fmt::Display for CancelReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoPayload => write!(f, "no drag in progress"),
            Self::MalformedPayload => write!(f, "malformed payload"),
            Self::NotHovered => write!(f, "target was not hovered"),
            Self::UnknownTarget => write!(f, "unknown target"),
            Self::Abandoned => write!(f, "drag ended without a drop"),
        }
    }
}

/// What an event did
///
/// `left` names a container whose drop indicator must be turned off.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "transition", rename_all = "snake_case")]
pub enum Transition {
    /// Pointer down recorded
    Armed,
    /// Gesture started
    Started {
        /// Entity being dragged
        entity_id: String,
        /// Origin container
        origin: String,
        /// Container left by an abandoned previous gesture
        left: Option<String>,
    },
    /// Now over an accepting container
    Hovering {
        /// Hovered container
        target: String,
        /// Container hovered before, if any
        left: Option<String>,
    },
    /// Left the hovered container
    Left {
        /// Container left
        target: String,
    },
    /// Container is unknown or does not accept the payload
    Rejected {
        /// Container that refused
        target: String,
        /// Container hovered before, if any
        left: Option<String>,
    },
    /// Drop completed
    Dropped {
        /// Entity dropped
        entity_id: String,
        /// Container dropped on
        target: String,
        /// Whether the store changed (false for same column or unknown id)
        moved: bool,
    },
    /// Gesture ended without a drop
    Cancelled {
        /// Why
        reason: CancelReason,
        /// Container that was hovered, if any
        left: Option<String>,
    },
    /// Event does not apply to the current state
    Ignored,
}

/// Drag exchange between registered containers
#[derive(Debug, Clone)]
pub struct DragExchange<S> {
    containers: Vec<Container<S>>,
    state: DragState,
}

impl<S: Copy + PartialEq + std::fmt::Display> DragExchange<S> {
    /// Create a protocol over the given containers
    pub fn new(containers: impl IntoIterator<Item = Container<S>>) -> Self {
        let mut exchange = Self {
            containers: Vec::new(),
            state: DragState::Idle,
        };
        for container in containers {
            exchange.add_container(container);
        }
        exchange
    }

    /// Register a container, replacing one with the same tag
    pub fn add_container(&mut self, container: Container<S>) {
        if let Some(existing) = self.containers.iter_mut().find(|c| c.tag == container.tag) {
            *existing = container;
        } else {
            self.containers.push(container);
        }
    }

    /// Registered containers
    #[must_use]
    pub fn containers(&self) -> &[Container<S>] {
        &self.containers
    }

    /// Look up a container by tag
    #[must_use]
    pub fn container(&self, tag: &str) -> Option<&Container<S>> {
        self.containers.iter().find(|c| c.tag == tag)
    }

    /// Current gesture state
    #[must_use]
    pub const fn state(&self) -> &DragState {
        &self.state
    }

    /// Pointer down on a draggable item
    pub fn arm(&mut self, entity_id: &str, origin: &str) -> Transition {
        if self.state != DragState::Idle {
            debug!("arm ignored: gesture already in progress");
            return Transition::Ignored;
        }
        self.state = DragState::Armed {
            entity_id: entity_id.to_string(),
            origin: origin.to_string(),
        };
        Transition::Armed
    }

    /// Start dragging an entity
    ///
    /// An unfinished previous gesture is abandoned. A blank id cancels
    /// straight away.
    pub fn drag_start(&mut self, entity_id: &str, origin: &str) -> Transition {
        let left = match std::mem::take(&mut self.state) {
            DragState::Hovering { target, .. } => Some(target),
            _ => None,
        };
        if left.is_some() {
            debug!("drag_start abandoned the previous gesture");
        }
        let entity_id = entity_id.trim();
        if entity_id.is_empty() {
            return cancelled(CancelReason::MalformedPayload, left);
        }

        self.state = DragState::InFlight(DragPayload {
            data: entity_id.to_string(),
            origin: origin.to_string(),
            transfer_type: TEXT_PLAIN.to_string(),
        });
        debug!("drag started: {entity_id} from {origin}");
        Transition::Started {
            entity_id: entity_id.to_string(),
            origin: origin.to_string(),
            left,
        }
    }

    /// Pointer moves over a container
    pub fn drag_over(&mut self, target: &str) -> Transition {
        let (payload, current) = match &self.state {
            DragState::InFlight(payload) => (payload, None),
            DragState::Hovering { payload, target: current } => {
                if current == target {
                    return Transition::Ignored;
                }
                (payload, Some(current.clone()))
            },
            DragState::Idle | DragState::Armed { .. } => return Transition::Ignored,
        };

        let accepted = self.container(target).is_some_and(|c| c.accepts(&payload.transfer_type));
        let payload = payload.clone();

        if accepted {
            self.state = DragState::Hovering {
                payload,
                target: target.to_string(),
            };
            Transition::Hovering {
                target: target.to_string(),
                left: current,
            }
        } else {
            debug!("drag_over rejected by {target}");
            self.state = DragState::InFlight(payload);
            Transition::Rejected {
                target: target.to_string(),
                left: current,
            }
        }
    }

    /// Pointer leaves a container without dropping
    pub fn drag_leave(&mut self, target: &str) -> Transition {
        match std::mem::take(&mut self.state) {
            DragState::Hovering { payload, target: current } if current == target => {
                self.state = DragState::InFlight(payload);
                Transition::Left { target: current }
            },
            other => {
                self.state = other;
                Transition::Ignored
            },
        }
    }

    /// Drop on a container, moving the entity to the container's status
    ///
    /// The payload id was checked for blankness by [`Self::drag_start`],
    /// the only place payloads are built, so it is used as is.
    pub fn drop<T>(&mut self, target: &str, store: &mut ReactiveStore<T>) -> Transition
    where
        T: Entity<Status = S>,
    {
        let (payload, hovered) = match std::mem::take(&mut self.state) {
            DragState::Hovering { payload, target } => (payload, target),
            DragState::InFlight(_) => return cancelled(CancelReason::NotHovered, None),
            DragState::Idle | DragState::Armed { .. } => {
                return cancelled(CancelReason::NoPayload, None);
            },
        };

        if hovered != target {
            return cancelled(CancelReason::NotHovered, Some(hovered));
        }
        let Some(status) = self.container(target).map(|c| c.status) else {
            return cancelled(CancelReason::UnknownTarget, Some(hovered));
        };
        let entity_id = payload.data.as_str();

        let moved = store.move_status(entity_id, status);
        info!("dropped {entity_id} on {target} (moved: {moved})");
        Transition::Dropped {
            entity_id: entity_id.to_string(),
            target: hovered,
            moved,
        }
    }

    /// Gesture ended (pointer released) without a drop
    pub fn drag_end(&mut self) -> Transition {
        match std::mem::take(&mut self.state) {
            DragState::Idle => Transition::Ignored,
            DragState::Armed { .. } | DragState::InFlight(_) => {
                cancelled(CancelReason::Abandoned, None)
            },
            DragState::Hovering { target, .. } => cancelled(CancelReason::Abandoned, Some(target)),
        }
    }

    /// Abandon the gesture in progress
    pub fn cancel(&mut self) -> Transition {
        self.drag_end()
    }
}

fn cancelled(reason: CancelReason, left: Option<String>) -> Transition {
    match reason {
        CancelReason::Abandoned => debug!("drag cancelled: {reason}"),
        _ => warn!("drag cancelled: {reason}"),
    }
    Transition::Cancelled { reason, left }
}
