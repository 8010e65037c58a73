mod badges;
mod detection_panel;
mod dialogs;
mod toolbar;

use bevy::prelude::*;
use bevy_egui::EguiPrimaryContextPass;

use crate::config::ConfigResetNotification;
use crate::session::EditSession;
use crate::store::StoreErrorDialog;

/// Resource that tracks whether any modal dialog is currently open.
/// Canvas input handlers check this to avoid processing input
/// while the operator is interacting with a dialog.
#[derive(Resource, Default)]
pub struct DialogState {
    /// True when any modal dialog is open that should block canvas input
    pub any_modal_open: bool,
}

/// The panels that shrink the canvas. Anything reading the free area runs after this.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub struct UiPanels;

/// Aggregate all dialog open states into a single resource.
/// Runs in First schedule before input handlers.
fn update_dialog_state(
    session: Res<EditSession>,
    toolbar: Res<toolbar::ToolbarState>,
    store_error: Res<StoreErrorDialog>,
    config_reset: Res<ConfigResetNotification>,
    mut dialog_state: ResMut<DialogState>,
) {
    let open = session.draft.is_some()
        || session.pending_delete.is_some()
        || store_error.message.is_some()
        || config_reset.show
        || toolbar.is_browsing();
    if dialog_state.any_modal_open != open {
        dialog_state.any_modal_open = open;
    }
}

pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<DialogState>()
            .init_resource::<toolbar::ToolbarState>()
            .add_systems(Startup, toolbar::sync_actor_field.after(crate::config::ConfigLoaded))
            // Toolbar first so the detection panel fits below it
            .add_systems(
                EguiPrimaryContextPass,
                (toolbar::toolbar_ui, detection_panel::detection_panel_ui)
                    .chain()
                    .in_set(UiPanels),
            )
            .add_systems(
                EguiPrimaryContextPass,
                (
                    badges::status_badges_ui,
                    dialogs::new_box_dialog_ui,
                    dialogs::delete_confirmation_ui,
                    dialogs::store_error_dialog_ui,
                    dialogs::config_reset_notification_ui,
                )
                    .after(UiPanels),
            )
            .add_systems(First, update_dialog_state);
    }
}
