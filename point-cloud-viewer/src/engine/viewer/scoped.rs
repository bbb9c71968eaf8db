use std::collections::HashMap;
use std::fmt::Display;

use bevy::prelude::*;

use crate::engine::viewer::Viewer;

/// A handle owned by exactly one viewer, created when the viewer appears and
/// dropped when it is despawned. Dropping releases whatever it holds.
pub trait ViewerScoped: Sized + 'static {
    /// Shared state every attachment is created from.
    type Context: Resource;
    type Error: Display;

    fn attach(
        entity: Entity,
        viewer: &Viewer,
        context: &Self::Context,
    ) -> Result<Self, Self::Error>;
}

/// Live handles by viewer entity. Kept as a non-send resource so handles may
/// wrap main-thread-only values.
pub struct ScopedToViewers<T>(HashMap<Entity, T>);

impl<T> Default for ScopedToViewers<T> {
    fn default() -> Self {
        Self(HashMap::new())
    }
}

impl<T> ScopedToViewers<T> {
    pub fn get(&self, viewer: Entity) -> Option<&T> {
        self.0.get(&viewer)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

pub fn attach_scoped<T: ViewerScoped>(
    viewers: Query<(Entity, &Viewer), Added<Viewer>>,
    mut scoped: NonSendMut<ScopedToViewers<T>>,
    context: Res<T::Context>,
) {
    for (entity, viewer) in &viewers {
        match T::attach(entity, viewer, &context) {
            Ok(handle) => {
                scoped.0.insert(entity, handle);
            }
            Err(err) => warn!("Viewer {}: {}", viewer.index(), err),
        }
    }
}

pub fn release_scoped<T: 'static>(
    mut removed: RemovedComponents<Viewer>,
    mut scoped: NonSendMut<ScopedToViewers<T>>,
) {
    for entity in removed.read() {
        if scoped.0.remove(&entity).is_some() {
            debug!("Released {} of {:?}", std::any::type_name::<T>(), entity);
        }
    }
}

/// Register attach and release for one kind of viewer-scoped handle.
pub fn add_viewer_scoped<T: ViewerScoped>(app: &mut App) {
    app.insert_non_send_resource(ScopedToViewers::<T>::default())
        .add_systems(Update, (attach_scoped::<T>, release_scoped::<T>));
}
