//! Pointer repulsion.

use glam::DVec2;

use crate::blob::Blob;
use crate::config::MouseInteraction;

/// Velocity kick for a blob at `position` from a pointer at `pointer`.
///
/// `None` when interaction is off, the blob is out of range, or the pointer
/// sits exactly on the blob center (no direction to push in).
pub fn impulse(position: DVec2, pointer: DVec2, settings: &MouseInteraction) -> Option<DVec2> {
    if !settings.enabled {
        return None;
    }
    let offset = position - pointer;
    let distance = offset.length();
    if distance >= settings.distance {
        return None;
    }
    let direction = offset.try_normalize()?;
    let strength = (settings.distance - distance) / settings.distance * settings.force;
    Some(direction * strength)
}

/// Adds the pointer impulse to every blob in range. Speed limits are left to
/// the next simulation step.
pub fn repel(blobs: &mut [Blob], pointer: DVec2, settings: &MouseInteraction) -> usize {
    let mut pushed = 0;
    for blob in blobs.iter_mut() {
        if let Some(kick) = impulse(blob.position, pointer, settings) {
            blob.velocity += kick;
            pushed += 1;
        }
    }
    pushed
}
