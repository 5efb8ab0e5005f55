use crate::eligibility::FinalStep;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Backward,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlowState {
    pub is_dialog_visible: bool,
    pub is_removing: bool,
    pub current_step: u8,
    pub final_step: FinalStep,
}

impl Default for FlowState {
    fn default() -> Self {
        Self {
            is_dialog_visible: false,
            is_removing: false,
            current_step: 1,
            final_step: FinalStep::Two,
        }
    }
}

impl FlowState {
    pub fn in_final_step(&self) -> bool {
        self.current_step == self.final_step.as_step()
    }

    /// Moves to the next survey step. `final_step` must be freshly computed by
    /// the caller; step and final step are updated together.
    pub fn advance(&mut self, direction: Direction, final_step: FinalStep) -> u8 {
        let next = next_step(self.current_step, final_step, direction);
        self.final_step = final_step;
        self.current_step = next;
        next
    }

    /// Hides the dialog and rewinds the survey. `is_removing` is left alone:
    /// closing never cancels an in-flight removal.
    pub fn close(&mut self) {
        self.is_dialog_visible = false;
        self.current_step = 1;
        self.final_step = FinalStep::Two;
    }
}

/// Step transition table. The two-step survey toggles between 1 and 2 and
/// ignores the direction. Step 1 has no "previous" control, so a backward
/// move from it is treated like forward.
pub fn next_step(current: u8, final_step: FinalStep, direction: Direction) -> u8 {
    match final_step {
        FinalStep::Three => match (current, direction) {
            (1, _) => 2,
            (2, Direction::Backward) => 1,
            (2, Direction::Forward) => 3,
            (3, _) => 2,
            _ => 1,
        },
        FinalStep::Two => {
            if current == 1 {
                2
            } else {
                1
            }
        }
    }
}
