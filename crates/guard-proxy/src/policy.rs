use clap::ValueEnum;
use guard_protocol::{Decision, Side};
use serde::{Deserialize, Serialize};

/// Which half of the exchange a block decision is enforced against.
#[derive(ValueEnum, Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum EnforceSide {
    User,
    Assistant,
    Both,
}

/// True when enforcement must halt the exchange. `review` is informational
/// and never blocks on its own; a `block` halts only when it lands on an
/// enforced side.
pub fn should_block(decision: Decision, side: Side, enforce: EnforceSide) -> bool {
    if decision != Decision::Block {
        return false;
    }
    match enforce {
        EnforceSide::Both => true,
        EnforceSide::User => side == Side::User,
        EnforceSide::Assistant => side == Side::Assistant,
    }
}
