//! Gesture decoding
//!
//! Per-device state machine translating raw vendor command/attribute frames
//! into canonical `(gesture, target)` events. Matching is exact tuple
//! equality against the active quirk's trigger table in declared order;
//! emission is edge-triggered on arrival. Frames matching no trigger are
//! passed through to generic attribute-report handling.

use crate::model::{Gesture, QuirkDefinition, Target, TriggerKey, TriggerSpec};

/// Outcome of feeding one frame to the decoder
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decoded {
    /// Frame matched a trigger; one canonical event to emit
    Trigger { gesture: Gesture, target: Target },
    /// No trigger matched; hand the frame to generic report handling
    PassThrough,
}

/// Decoder state between frames
///
/// Only long presses leave a mark: some devices report a hold once per
/// hold rather than once per hold-start, so the candidate target is kept
/// until the next matched frame. Emission itself stays edge-triggered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum DecoderState {
    #[default]
    Idle,
    HeldCandidate(Target),
}

/// Per-device gesture decoder bound to one quirk's trigger table
#[derive(Debug, Clone)]
pub struct GestureDecoder {
    triggers: Vec<(TriggerKey, TriggerSpec)>,
    state: DecoderState,
}

impl GestureDecoder {
    /// Build a decoder for an applied quirk
    #[must_use]
    pub fn new(quirk: &QuirkDefinition) -> Self {
        Self {
            triggers: quirk.triggers.clone(),
            state: DecoderState::Idle,
        }
    }

    /// Whether a long press has fired without a subsequent matched frame
    #[must_use]
    pub fn held_target(&self) -> Option<Target> {
        match self.state {
            DecoderState::HeldCandidate(target) => Some(target),
            DecoderState::Idle => None,
        }
    }

    /// Feed one incoming frame tuple to the decoder
    ///
    /// The first trigger whose (endpoint, cluster, attr id, value) tuple
    /// equals the frame's wins; values are compared by exact equality,
    /// never by range.
    pub fn decode(&mut self, endpoint_id: u8, cluster_id: u16, attr_id: u16, value: u32) -> Decoded {
        let hit = self.triggers.iter().find(|(_, spec)| {
            spec.endpoint_id == endpoint_id
                && spec.cluster_id == cluster_id
                && spec.attr_id == attr_id
                && spec.value == value
        });

        let Some((key, spec)) = hit else {
            tracing::debug!(
                "Pass-through frame: endpoint={} cluster={:#06x} attr={:#06x} value={}",
                endpoint_id,
                cluster_id,
                attr_id,
                value
            );
            return Decoded::PassThrough;
        };

        self.state = match key.gesture {
            Gesture::LongPress => DecoderState::HeldCandidate(key.target),
            _ => DecoderState::Idle,
        };

        tracing::debug!(
            "Decoded {:?}/{:?} from command '{}' on endpoint {}",
            key.gesture,
            key.target,
            spec.command,
            endpoint_id
        );

        Decoded::Trigger {
            gesture: key.gesture,
            target: key.target,
        }
    }
}
