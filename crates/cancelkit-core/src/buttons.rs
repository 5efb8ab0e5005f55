use crate::purchase::Purchase;
use crate::router::FlowState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogAction {
    Chat,
    Cancel,
    Previous,
    Next,
    Remove,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DialogButton {
    pub action: DialogAction,
    pub disabled: bool,
    pub primary: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ButtonFlags {
    pub removal_survey: bool,
    pub precancellation_chat: bool,
    pub advance_allowed: bool,
}

/// Ordered buttons for the removal dialog in its current state.
pub fn dialog_buttons(
    purchase: &Purchase,
    state: &FlowState,
    flags: ButtonFlags,
) -> Vec<DialogButton> {
    let busy = state.is_removing;
    let button = |action: DialogAction| DialogButton {
        action,
        disabled: busy,
        primary: action == DialogAction::Remove,
    };

    let mut buttons = if purchase.is_domain_registration() || !flags.removal_survey {
        vec![button(DialogAction::Cancel), button(DialogAction::Remove)]
    } else if state.in_final_step() {
        vec![
            button(DialogAction::Cancel),
            button(DialogAction::Previous),
            button(DialogAction::Remove),
        ]
    } else {
        let next = DialogButton {
            disabled: busy || !flags.advance_allowed,
            ..button(DialogAction::Next)
        };
        if state.current_step == 2 {
            vec![button(DialogAction::Cancel), button(DialogAction::Previous), next]
        } else {
            vec![button(DialogAction::Cancel), next]
        }
    };

    if flags.precancellation_chat {
        buttons.insert(0, button(DialogAction::Chat));
    }

    buttons
}
