use super::EtherCore;

pub(super) fn pointer_move(core: &mut EtherCore, x: f32, y: f32, now_ms: f64) -> bool {
    if core.disposed {
        return false;
    }
    let inside = core.pointer.pointer_move(x, y, now_ms);
    if inside {
        note_interaction(core, now_ms);
    }
    inside
}

pub(super) fn pointer_down(core: &mut EtherCore, x: f32, y: f32, now_ms: f64) -> bool {
    if core.disposed {
        return false;
    }
    let inside = core.pointer.pointer_down(x, y, now_ms);
    if inside {
        note_interaction(core, now_ms);
    }
    inside
}

pub(super) fn pointer_up(core: &mut EtherCore, touch: bool) {
    if touch {
        core.pointer.pointer_leave();
    }
}

pub(super) fn pointer_leave(core: &mut EtherCore) {
    core.pointer.pointer_leave();
}

/// Restart the idle countdown and hand the pointer back to the user.
///
/// Runs after the tracker saw the event, so a takeover has already been
/// started from the autopilot's last position.
fn note_interaction(core: &mut EtherCore, now_ms: f64) {
    core.last_interaction_ms = now_ms;
    if core.autopilot.is_active() {
        log::debug!("autopilot: user took over");
    }
    core.autopilot.force_stop(&mut core.pointer);
}
