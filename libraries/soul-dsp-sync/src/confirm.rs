//! Confirmation gate for destructive operations

/// Prompt shown before the whole chain is cleared
pub const CLEAR_CHAIN_PROMPT: &str = "Clear all effects from the DSP chain?";

/// Asks the user to confirm an operation
pub trait ConfirmGate {
    fn confirm(&self, prompt: &str) -> bool;
}

impl<F> ConfirmGate for F
where
    F: Fn(&str) -> bool,
{
    fn confirm(&self, prompt: &str) -> bool {
        self(prompt)
    }
}
