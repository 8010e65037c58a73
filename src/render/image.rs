use bevy::prelude::*;

use crate::store::CurrentImage;
use crate::viewport::Viewport;

/// The sprite showing the loaded bitmap under the boxes
#[derive(Component)]
pub struct CanvasImage;

pub fn spawn_canvas_image(mut commands: Commands) {
    commands.spawn((
        CanvasImage,
        Sprite::default(),
        Transform::default(),
        Visibility::Hidden,
    ));
}

/// Keep the sprite on the fit rectangle under the current pan and zoom.
pub fn sync_canvas_image(
    current: Res<CurrentImage>,
    viewport: Res<Viewport>,
    mut sprite_query: Query<(&mut Sprite, &mut Transform, &mut Visibility), With<CanvasImage>>,
) {
    let Ok((mut sprite, mut transform, mut visibility)) = sprite_query.single_mut() else {
        return;
    };

    let (Some(handle), Some(fit)) = (current.handle.as_ref(), viewport.fit_rect()) else {
        visibility.set_if_neq(Visibility::Hidden);
        return;
    };

    if sprite.image != *handle {
        sprite.image = handle.clone();
    }
    let size = fit.draw_size * viewport.scale;
    if sprite.custom_size != Some(size) {
        sprite.custom_size = Some(size);
    }

    let center = viewport.canvas_to_world(fit.origin + fit.draw_size / 2.0);
    transform.translation = center.extend(0.0);
    visibility.set_if_neq(Visibility::Visible);
}
