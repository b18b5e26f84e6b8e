// Client session: wires snapshots, prediction, reconciliation and visibility.

use crate::domain::systems::interpolation::{InterpolatedPeer, interpolate_peer};
use crate::domain::systems::prediction::predict;
use crate::domain::systems::reconciliation::{Correction, reconcile};
use crate::domain::systems::visibility::{Viewer, is_visible};
use crate::domain::{
    EventSink, InputIntent, LocalEntity, RenderSink, Snapshot, SnapshotEvent, Tuning,
};
use crate::use_cases::sequencer::SnapshotSequencer;
use tracing::{debug, trace};

#[derive(Debug, Clone)]
pub struct SessionSettings {
    /// Identity of the locally controlled entity.
    pub local_id: u64,
    /// Seconds over which remote peers are blended between snapshots.
    pub interpolation_delay: f32,
    pub tuning: Tuning,
}

/// A remote peer prepared for the rendering hand-off.
#[derive(Debug, Clone, PartialEq)]
pub struct PeerView {
    pub peer: InterpolatedPeer,
    pub visible: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderStats {
    pub drawn: usize,
    pub hidden: usize,
    pub skipped: usize,
}

pub struct ClientSession<E> {
    settings: SessionSettings,
    sequencer: SnapshotSequencer,
    local: Option<LocalEntity>,
    // Arena-wide illumination; overrides every visibility gate.
    arena_lit: bool,
    active: bool,
    events: E,
}

impl<E: EventSink> ClientSession<E> {
    pub fn new(settings: SessionSettings, events: E) -> Self {
        Self {
            settings,
            sequencer: SnapshotSequencer::new(),
            local: None,
            arena_lit: false,
            active: true,
            events,
        }
    }

    /// Hands a decoded snapshot to the sequencer. Events and reconciliation
    /// only run for accepted snapshots; events additionally skip replays of
    /// the current sequence number.
    pub fn on_snapshot(&mut self, snapshot: Snapshot) -> bool {
        let last_seq = self.sequencer.current().map(|s| s.seq);
        if !self.sequencer.accept(snapshot) {
            return false;
        }
        let Some(current) = self.sequencer.current() else {
            return false;
        };

        // A replayed sequence number re-applies positions but never events.
        if last_seq != Some(current.seq) {
            for event in &current.events {
                dispatch(&mut self.events, &mut self.arena_lit, event);
            }
        }

        match current.peer(self.settings.local_id) {
            Some(authority) => {
                let correction =
                    reconcile(&mut self.local, authority, &self.settings.tuning.reconcile);
                match correction {
                    Correction::Seeded => {
                        debug!(local_id = self.settings.local_id, "local entity seeded")
                    }
                    Correction::Snapped { distance } => {
                        debug!(seq = current.seq, distance, "local entity snapped")
                    }
                    Correction::Blended { distance, factor } => {
                        trace!(seq = current.seq, distance, factor, "local entity blended")
                    }
                }
            }
            None => trace!(seq = current.seq, "local entity absent; nothing to reconcile"),
        }

        true
    }

    /// Runs one frame of local simulation. A missing intent skips prediction
    /// for this frame only.
    pub fn tick(&mut self, dt: f32, input: Option<&InputIntent>) {
        self.sequencer.advance(dt);

        if !self.active {
            return;
        }
        let Some(local) = self.local.as_mut() else {
            return;
        };
        let Some(input) = input else {
            debug!("no input intent this frame; prediction skipped");
            return;
        };

        let tuning = &self.settings.tuning;
        predict(
            local,
            input,
            dt,
            self.sequencer.current_inset(),
            &tuning.player,
            &tuning.arena,
        );
    }

    /// Remote peers with their interpolated pose and this frame's visibility.
    pub fn peer_views(&self) -> Vec<PeerView> {
        let Some(current) = self.sequencer.current() else {
            return Vec::new();
        };
        let previous = self.sequencer.previous();
        let alpha = self.sequencer.alpha(self.settings.interpolation_delay);
        let viewer = self.viewer();
        let tuning = &self.settings.tuning;

        current
            .peers
            .iter()
            .filter(|p| p.id != self.settings.local_id)
            .map(|curr| {
                let prev = previous.and_then(|s| s.peer(curr.id));
                let peer = interpolate_peer(prev, curr, alpha, &tuning.arena);
                let visible = is_visible(
                    &viewer,
                    peer.x,
                    peer.y,
                    self.arena_lit,
                    &tuning.flashlight,
                    &tuning.arena.obstacles,
                );
                PeerView { peer, visible }
            })
            .collect()
    }

    /// Draws the local entity and every perceptible peer. Peers the
    /// collaborator cannot represent are skipped.
    pub fn render<R: RenderSink>(&self, sink: &mut R) -> RenderStats {
        let mut stats = RenderStats::default();
        sink.begin_frame();

        if let Some(local) = &self.local {
            if let Err(e) = sink.draw_local(local) {
                debug!(error = %e, "local entity not drawn");
            }
        }

        for view in self.peer_views() {
            if !view.visible {
                stats.hidden += 1;
                continue;
            }
            match sink.draw_peer(&view.peer) {
                Ok(()) => stats.drawn += 1,
                Err(e) => {
                    debug!(peer_id = view.peer.id, error = %e, "peer skipped");
                    stats.skipped += 1;
                }
            }
        }

        stats
    }

    /// Re-targets the session at an identity assigned by the authority. The
    /// local entity is rebuilt from the next snapshot that contains it.
    pub fn assign_identity(&mut self, local_id: u64) {
        if self.settings.local_id != local_id {
            self.settings.local_id = local_id;
            self.local = None;
        }
    }

    pub fn local_id(&self) -> u64 {
        self.settings.local_id
    }

    /// Pauses or resumes local prediction; snapshots are still ingested.
    pub fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    /// Drops all per-match state on disconnect, game end or leave.
    pub fn leave(&mut self) {
        self.local = None;
        self.sequencer.reset();
        self.arena_lit = false;
    }

    pub fn local(&self) -> Option<&LocalEntity> {
        self.local.as_ref()
    }

    pub fn sequencer(&self) -> &SnapshotSequencer {
        &self.sequencer
    }

    pub fn arena_lit(&self) -> bool {
        self.arena_lit
    }

    pub fn time_remaining(&self) -> Option<f32> {
        self.sequencer.current().and_then(|s| s.time_remaining)
    }

    pub fn events(&self) -> &E {
        &self.events
    }

    fn viewer(&self) -> Viewer {
        let light_on = self
            .sequencer
            .current()
            .and_then(|s| s.peer(self.settings.local_id))
            .is_some_and(|p| p.status.light_on);

        match &self.local {
            Some(local) => Viewer {
                x: local.x,
                y: local.y,
                facing: local.facing,
                light_on,
            },
            // Not spawned yet: only the arena lights reveal anything.
            None => Viewer {
                x: 0.0,
                y: 0.0,
                facing: 0.0,
                light_on: false,
            },
        }
    }
}

fn dispatch<E: EventSink>(events: &mut E, arena_lit: &mut bool, event: &SnapshotEvent) {
    match *event {
        SnapshotEvent::Hit {
            target_id,
            attacker_id,
        } => events.on_hit(target_id, attacker_id),
        SnapshotEvent::Death { entity_id } => events.on_death(entity_id),
        SnapshotEvent::PickupCollected {
            pickup_id,
            collector_id,
        } => events.on_pickup_collected(pickup_id, collector_id),
        SnapshotEvent::Throw { thrower_id, x, y } => events.on_throw(thrower_id, x, y),
        SnapshotEvent::Sound { x, y, volume } => events.on_sound(x, y, volume),
        SnapshotEvent::LightToggle { on } => {
            *arena_lit = on;
            events.on_light_toggle(on);
        }
    }
}
